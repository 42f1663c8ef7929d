//! The explorer: single owner of tree state, camera and gesture state.
//!
//! Every mutating entry point ends in one of two synchronization steps:
//! - [`Explorer::render`] after structural or highlight changes (re-layout, new scene, minimap)
//! - [`Explorer::apply_transform`] after camera-only changes (transform pushed, minimap redrawn)

use crate::gesture::{MouseDrag, TouchGesture, TouchPoint};
use crate::press::{PointerId, PressEnd, PressTracker};
use crate::search::apply_search;
use crate::viewport::Viewport;
use crate::Result;
use indexmap::IndexMap;
use sylva_core::geom::{Point, Size, ViewTransform, size};
use sylva_core::tree::DEFAULT_COLLAPSE_DEPTH;
use sylva_core::{CrossRefIndex, Dataset, ExplorerConfig, NodeId, Tree};
use sylva_render::detail::DetailView;
use sylva_render::layout::{LayoutSettings, layout_tree};
use sylva_render::minimap::{MinimapScene, MinimapSettings, build_minimap, navigate_transform};
use sylva_render::model::TreeLayout;
use sylva_render::scene::{Scene, build_scene};
use sylva_render::text::CachedTextMeasurer;
use sylva_render::LayoutOptions;

fn long_press_ms(cfg: &ExplorerConfig) -> u64 {
    cfg.get_u64("interaction.longPressMs")
        .unwrap_or(crate::press::DEFAULT_LONG_PRESS_MS)
}

/// Result of a pointer event on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Short press on a node with children: collapse flag flipped, scene rebuilt.
    Toggled(NodeId),
    /// Long press: the detail panel is now open for this node.
    OpenDetail(NodeId),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct InteractionSettings {
    frame_min_scale: f64,
    wheel_zoom_in: f64,
    wheel_zoom_out: f64,
    reset_depth: usize,
}

impl InteractionSettings {
    fn from_config(cfg: &ExplorerConfig) -> Self {
        Self {
            frame_min_scale: cfg.get_f64("viewport.frameMinScale").unwrap_or(0.8),
            wheel_zoom_in: cfg.get_f64("viewport.wheelZoomIn").unwrap_or(1.1),
            wheel_zoom_out: cfg.get_f64("viewport.wheelZoomOut").unwrap_or(0.9),
            reset_depth: cfg
                .get_u64("layout.initialCollapseDepth")
                .map_or(DEFAULT_COLLAPSE_DEPTH, |d| d as usize),
        }
    }
}

#[derive(Debug)]
pub struct Explorer {
    tree: Tree,
    xref: CrossRefIndex,
    abbr: IndexMap<String, String>,
    config: ExplorerConfig,
    options: LayoutOptions,
    measurer: CachedTextMeasurer,
    interaction: InteractionSettings,
    layout: TreeLayout,
    scene: Scene,
    viewport: Viewport,
    minimap_settings: MinimapSettings,
    minimap: MinimapScene,
    mouse: MouseDrag,
    touch: TouchGesture,
    presses: PressTracker,
    minimap_drag: bool,
    detail: Option<DetailView>,
}

impl Explorer {
    /// Builds the tree, indexes it and renders the first frame.
    pub fn new(dataset: Dataset, config: ExplorerConfig, canvas: Size) -> Self {
        Self::with_options(dataset, config, canvas, None)
    }

    /// Like [`Explorer::new`], with a custom text measurer (layout settings still come from
    /// `config`).
    pub fn with_options(
        dataset: Dataset,
        config: ExplorerConfig,
        canvas: Size,
        options: Option<LayoutOptions>,
    ) -> Self {
        let interaction = InteractionSettings::from_config(&config);
        let settings = LayoutSettings::from_config(&config);
        let options = match options {
            Some(o) => LayoutOptions { settings, ..o },
            None => LayoutOptions::from_config(&config),
        };
        let tree = Tree::initialize_with_collapse_depth(dataset.data, interaction.reset_depth);
        let xref = CrossRefIndex::build(&tree);
        let long_press = long_press_ms(&config);
        tracing::debug!(
            nodes = tree.len(),
            groups = xref.len(),
            abbreviations = dataset.abbr.len(),
            "explorer loaded"
        );

        let mut explorer = Self {
            measurer: options.cached_measurer(),
            viewport: Viewport::from_config(&config, canvas),
            minimap_settings: MinimapSettings::from_config(&config),
            minimap: MinimapScene {
                size: size(0.0, 0.0),
                projection: None,
                dots: Vec::new(),
                viewport: None,
            },
            tree,
            xref,
            abbr: dataset.abbr,
            config,
            options,
            interaction,
            layout: TreeLayout::default(),
            scene: Scene::default(),
            mouse: MouseDrag::default(),
            touch: TouchGesture::default(),
            presses: PressTracker::new(long_press),
            minimap_drag: false,
            detail: None,
        };
        explorer.render();
        explorer
    }

    /// Parses a startup document. Malformed input is fatal; no explorer is built.
    pub fn from_json_str(text: &str, config: ExplorerConfig, canvas: Size) -> Result<Self> {
        let dataset = Dataset::from_json_str(text)?;
        Ok(Self::new(dataset, config, canvas))
    }

    /// Awaits the startup fetch, then builds the explorer.
    pub async fn load<F>(fetch: F, config: ExplorerConfig, canvas: Size) -> Result<Self>
    where
        F: Future<Output = std::io::Result<String>>,
    {
        let dataset = Dataset::load(fetch).await?;
        Ok(Self::new(dataset, config, canvas))
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn xref(&self) -> &CrossRefIndex {
        &self.xref
    }

    pub fn abbreviations(&self) -> &IndexMap<String, String> {
        &self.abbr
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Overrides one config key at runtime, re-derives every setting read from the config and
    /// re-renders. The text measurement cache starts over.
    pub fn set_config_value(&mut self, dotted_path: &str, value: serde_json::Value) {
        self.config.set_value(dotted_path, value);
        self.interaction = InteractionSettings::from_config(&self.config);
        self.options.settings = LayoutSettings::from_config(&self.config);
        self.measurer = self.options.cached_measurer();
        self.minimap_settings = MinimapSettings::from_config(&self.config);
        self.viewport.apply_config(&self.config);
        self.presses.set_threshold_ms(long_press_ms(&self.config));
        tracing::debug!(key = dotted_path, "config value set");
        self.render();
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn transform(&self) -> ViewTransform {
        self.viewport.transform()
    }

    pub fn minimap(&self) -> &MinimapScene {
        &self.minimap
    }

    pub fn measurer(&self) -> &CachedTextMeasurer {
        &self.measurer
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn to_svg(&self) -> String {
        self.scene.to_svg()
    }

    pub fn minimap_svg(&self) -> String {
        self.minimap.to_svg()
    }

    /// Scene-space center of a visible node's box.
    pub fn node_center(&self, id: NodeId) -> Option<Point> {
        self.layout.get(id).map(|b| b.center() + self.scene.offset)
    }

    /// Topmost node under a screen point.
    pub fn node_at(&self, screen: Point) -> Option<NodeId> {
        self.scene.hit_test(screen)
    }

    /// Re-layout of the visible set followed by a full scene rebuild.
    pub fn render(&mut self) {
        self.layout = layout_tree(&self.tree, &self.measurer, &self.options.settings);
        self.scene = build_scene(
            &self.tree,
            &self.xref,
            &self.layout,
            self.options.settings.origin_x,
            self.viewport.size(),
            self.viewport.transform(),
        );
        self.apply_transform();
    }

    /// Pushes the camera transform to the scene and redraws the minimap.
    pub fn apply_transform(&mut self) {
        self.scene.set_transform(self.viewport.transform());
        self.minimap = build_minimap(
            &self.scene,
            self.viewport.transform(),
            self.viewport.size(),
            &self.minimap_settings,
        );
    }

    pub fn set_transform(&mut self, t: ViewTransform) {
        self.viewport.set_transform(t);
        self.apply_transform();
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan(dx, dy);
        self.apply_transform();
    }

    pub fn zoom_at(&mut self, pointer: Point, factor: f64) {
        if self.viewport.zoom_at(pointer, factor) {
            self.apply_transform();
        }
    }

    /// Scroll down (`delta_y > 0`) zooms out, anything else zooms in, about the cursor.
    pub fn wheel(&mut self, pointer: Point, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            self.interaction.wheel_zoom_out
        } else {
            self.interaction.wheel_zoom_in
        };
        tracing::trace!(delta_y, factor, "wheel");
        self.zoom_at(pointer, factor);
    }

    /// Starts a canvas drag unless the press landed on a node. Returns whether a drag began.
    pub fn mouse_down(&mut self, p: Point) -> bool {
        if self.node_at(p).is_some() {
            return false;
        }
        self.mouse.begin(p, &self.viewport);
        true
    }

    pub fn mouse_move(&mut self, p: Point) {
        if self.mouse.update(p, &mut self.viewport) {
            self.apply_transform();
        }
    }

    pub fn mouse_up(&mut self) {
        self.mouse.end();
        self.minimap_drag = false;
    }

    /// Touches that land on a node are left to the node handlers.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        if let [one] = touches {
            if self.node_at(one.position).is_some() {
                return;
            }
        }
        self.touch.start(touches, &self.viewport);
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint]) {
        if self.touch.update(touches, &mut self.viewport) {
            self.apply_transform();
        }
    }

    pub fn touch_end(&mut self, _remaining: &[TouchPoint]) {
        self.touch.end();
    }

    pub fn pointer_down(&mut self, pointer: PointerId, node: NodeId, now_ms: u64) {
        if self.tree.contains(node) {
            self.presses.pointer_down(pointer, node, now_ms);
        }
    }

    pub fn pointer_up(&mut self, pointer: PointerId, now_ms: u64) -> PressOutcome {
        match self.presses.pointer_up(pointer, now_ms) {
            PressEnd::Short(id) => {
                if self.tree.toggle_collapsed(id) {
                    self.render();
                    PressOutcome::Toggled(id)
                } else {
                    PressOutcome::None
                }
            }
            PressEnd::Long(id) => self.open_detail(id),
            PressEnd::Handled(_) | PressEnd::None => PressOutcome::None,
        }
    }

    pub fn pointer_leave(&mut self, pointer: PointerId) {
        self.presses.pointer_leave(pointer);
    }

    pub fn pointer_cancel(&mut self, pointer: PointerId) {
        self.presses.pointer_cancel(pointer);
    }

    /// Delivers long presses that are due at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> Vec<PressOutcome> {
        self.presses
            .tick(now_ms)
            .into_iter()
            .map(|id| self.open_detail(id))
            .collect()
    }

    /// When the host should call [`Explorer::tick`] next.
    pub fn next_tick_deadline(&self) -> Option<u64> {
        self.presses.next_deadline()
    }

    fn open_detail(&mut self, id: NodeId) -> PressOutcome {
        match self.show_detail(id) {
            Ok(_) => PressOutcome::OpenDetail(id),
            Err(_) => PressOutcome::None,
        }
    }

    /// Flips a node's collapsed flag and re-renders. Leaves have nothing to toggle.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        let changed = self.tree.toggle_collapsed(id);
        if changed {
            self.render();
        }
        changed
    }

    /// Highlight hook for external matchers; call [`Explorer::render`] afterwards.
    pub fn set_highlight(&mut self, id: NodeId, highlight: bool) {
        self.tree.set_highlight(id, highlight);
    }

    pub fn clear_highlights(&mut self) {
        self.tree.clear_highlights();
    }

    /// Expands every collapsed ancestor, re-renders, and centers the camera on the node's box
    /// with a scale of at least `viewport.frameMinScale`.
    pub fn frame(&mut self, id: NodeId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        let expanded = self.tree.expand_ancestors(id);
        self.render();
        let Some(center) = self.node_center(id) else {
            return false;
        };
        self.viewport
            .center_on(center, self.interaction.frame_min_scale);
        tracing::debug!(
            node = %id,
            expanded,
            scale = self.viewport.scale(),
            "framed node"
        );
        self.apply_transform();
        true
    }

    /// Makes `id` the only highlighted node and frames it.
    pub fn navigate_to(&mut self, id: NodeId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        self.tree.clear_highlights();
        self.tree.set_highlight(id, true);
        self.frame(id)
    }

    /// Identity camera and the initial collapse depth.
    pub fn reset(&mut self) {
        self.viewport.reset();
        self.tree.collapse_to_depth(self.interaction.reset_depth);
        tracing::debug!(depth = self.interaction.reset_depth, "view reset");
        self.render();
    }

    pub fn expand_all(&mut self) {
        self.tree.expand_all();
        self.render();
    }

    pub fn collapse_to_depth(&mut self, depth: usize) {
        self.tree.collapse_to_depth(depth);
        self.render();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite()) {
            return;
        }
        self.viewport.set_size(size(width.max(0.0), height.max(0.0)));
        self.render();
    }

    /// Highlights every node whose name contains `query` and reveals it. Returns the count.
    pub fn search(&mut self, query: &str) -> usize {
        let count = apply_search(&mut self.tree, query);
        self.render();
        count
    }

    pub fn show_detail(&mut self, id: NodeId) -> Result<&DetailView> {
        let view = DetailView::build(&self.tree, &self.xref, &self.abbr, id)?;
        tracing::debug!(node = %id, "detail opened");
        Ok(self.detail.insert(view))
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Follows cross-link `index` of the open panel: closes it and navigates to the target.
    /// `None` when no panel is open or the index is out of range.
    pub fn activate_cross_link(&mut self, index: usize) -> Option<NodeId> {
        let target = self.detail.as_ref()?.cross_link_target(index)?;
        self.close_detail();
        self.navigate_to(target);
        Some(target)
    }

    /// Recenters the main camera on the scene point under a minimap point, keeping the scale.
    pub fn minimap_navigate(&mut self, p: Point) -> bool {
        let Some(projection) = self.minimap.projection else {
            return false;
        };
        let next = navigate_transform(
            &projection,
            p,
            self.viewport.transform(),
            self.viewport.size(),
        );
        self.viewport.set_transform(next);
        self.apply_transform();
        true
    }

    /// Minimap pointer handlers take minimap-local coordinates.
    pub fn minimap_mouse_down(&mut self, p: Point) {
        self.minimap_drag = true;
        self.minimap_navigate(p);
    }

    pub fn minimap_mouse_move(&mut self, p: Point) {
        if self.minimap_drag {
            self.minimap_navigate(p);
        }
    }

    pub fn minimap_mouse_up(&mut self) {
        self.minimap_drag = false;
    }

    pub fn minimap_touch_start(&mut self, touches: &[TouchPoint]) {
        if let Some(first) = touches.first() {
            self.minimap_drag = true;
            self.minimap_navigate(first.position);
        }
    }

    pub fn minimap_touch_move(&mut self, touches: &[TouchPoint]) {
        if let (true, Some(first)) = (self.minimap_drag, touches.first()) {
            self.minimap_navigate(first.position);
        }
    }

    pub fn minimap_touch_end(&mut self) {
        self.minimap_drag = false;
    }
}
