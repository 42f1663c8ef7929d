#![forbid(unsafe_code)]

//! Stateless rendering for the sylva explorer: text measurement, layout, scene graph, SVG,
//! minimap and detail panel.

pub mod color;
pub mod detail;
pub mod format;
pub mod layout;
pub mod minimap;
pub mod model;
pub mod plot;
pub mod scene;
pub mod svg;
pub mod text;

use crate::layout::{LayoutSettings, layout_tree};
use crate::scene::{Scene, build_scene};
use crate::text::{CachedTextMeasurer, DeterministicTextMeasurer, TextMeasurer};
use std::sync::Arc;
use sylva_core::geom::{Size, ViewTransform};
use sylva_core::{CrossRefIndex, ExplorerConfig, NodeId, Tree};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown node: {id}")]
    UnknownNode { id: NodeId },
    #[error(transparent)]
    Core(#[from] sylva_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub settings: LayoutSettings,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            settings: LayoutSettings::default(),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl LayoutOptions {
    pub fn from_config(cfg: &ExplorerConfig) -> Self {
        Self {
            settings: LayoutSettings::from_config(cfg),
            ..Self::default()
        }
    }

    /// A fresh memoizing measurer over `text_measurer`.
    pub fn cached_measurer(&self) -> CachedTextMeasurer {
        CachedTextMeasurer::new(
            self.text_measurer.clone(),
            self.settings.font_family.clone(),
        )
    }
}

/// One-shot layout and scene build of the current visible set.
pub fn render_scene(tree: &Tree, options: &LayoutOptions, size: Size) -> Scene {
    let layout = layout_tree(tree, &options.cached_measurer(), &options.settings);
    build_scene(
        tree,
        &CrossRefIndex::build(tree),
        &layout,
        options.settings.origin_x,
        size,
        ViewTransform::IDENTITY,
    )
}

pub fn render_svg(tree: &Tree, options: &LayoutOptions, size: Size) -> String {
    render_scene(tree, options, size).to_svg()
}
