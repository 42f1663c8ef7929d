#![forbid(unsafe_code)]

//! `sylva` is a headless explorer for hierarchical knowledge trees.
//!
//! It lays out a collapsible tree left to right, renders it to an SVG scene, and keeps the camera,
//! minimap and detail panel consistent under pan, zoom, touch and press gestures. The host feeds
//! input events and timestamps in; everything runs synchronously on the caller's thread.
//!
//! ```
//! use sylva::{Explorer, ExplorerConfig};
//! use sylva::geom::size;
//!
//! let json = r##"{"data":{"name":"Root","color":"#ffffff","children":[
//!     {"name":"Vision","color":"#3b82f6","children":[{"name":"CNN","color":"#3b82f6"}]}
//! ]}}"##;
//! let mut explorer = Explorer::from_json_str(json, ExplorerConfig::default(), size(800.0, 600.0))?;
//! assert_eq!(explorer.search("cnn"), 1);
//! assert!(explorer.to_svg().contains("CNN"));
//! # Ok::<(), sylva::ExplorerError>(())
//! ```

pub mod explorer;
pub mod gesture;
pub mod press;
pub mod search;
pub mod viewport;

pub use explorer::{Explorer, PressOutcome};
pub use gesture::TouchPoint;
pub use press::PointerId;
pub use sylva_core::{
    CrossRefIndex, Dataset, ExplorerConfig, Node, NodeData, NodeId, Tree, geom,
};
pub use viewport::Viewport;

pub mod render {
    pub use sylva_render::detail::{CrossLink, DetailView};
    pub use sylva_render::minimap::{MinimapScene, MinimapSettings};
    pub use sylva_render::scene::{Scene, SceneLink, SceneNode};
    pub use sylva_render::svg::SvgRenderOptions;
    pub use sylva_render::text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
    pub use sylva_render::{LayoutOptions, render_svg};
}

#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error(transparent)]
    Core(#[from] sylva_core::Error),
    #[error(transparent)]
    Render(#[from] sylva_render::Error),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
