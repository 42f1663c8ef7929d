//! SVG serialization for scenes.
//!
//! Output is a single string; element order follows paint order (links under nodes).

use crate::model::Bounds;
use crate::scene::{CROSS_REF_COLOR, CROSS_REF_GLYPH, HIGHLIGHT_COLOR, Scene, SceneNode};
use std::fmt::Write as _;
use sylva_core::geom::ViewTransform;


#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Id of the `<g>` that carries the camera transform.
    pub root_group_id: String,
    pub font_family: Option<String>,
    pub include_tooltips: bool,
    pub include_cross_ref_markers: bool,
    pub background: Option<String>,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            root_group_id: "gRoot".to_string(),
            font_family: None,
            include_tooltips: true,
            include_cross_ref_markers: true,
            background: None,
        }
    }
}

/// Number formatting for attributes: no `-0`, no float noise within 1e-6 of an integer,
/// non-finite values render as `0`.
pub(crate) fn fmt(v: f64) -> FmtDisplay {
    FmtDisplay(v)
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FmtDisplay(f64);

impl std::fmt::Display for FmtDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut v = self.0;
        if !v.is_finite() {
            return f.write_str("0");
        }
        if v.abs() < 1e-9 {
            v = 0.0;
        }
        let nearest = v.round();
        if (v - nearest).abs() < 1e-6 {
            v = nearest;
        }
        if v == 0.0 {
            v = 0.0;
        }
        write!(f, "{v}")
    }
}

pub(crate) fn escape_text(text: &str) -> std::borrow::Cow<'_, str> {
    htmlize::escape_text(text)
}

pub(crate) fn escape_attr(text: &str) -> std::borrow::Cow<'_, str> {
    htmlize::escape_attribute(text)
}

pub fn transform_attr(t: &ViewTransform) -> String {
    format!("translate({},{}) scale({})", fmt(t.x), fmt(t.y), fmt(t.k))
}

/// Scene-space bounding box of every node box.
pub fn scene_bounds(scene: &Scene) -> Option<Bounds> {
    Bounds::from_points(scene.nodes.iter().flat_map(|n| {
        let r = n.rect;
        [(r.min_x(), r.min_y()), (r.max_x(), r.max_y())]
    }))
}

pub fn render_scene_svg(scene: &Scene, options: &SvgRenderOptions) -> String {
    let mut out = String::with_capacity(256 + scene.nodes.len() * 320 + scene.links.len() * 160);
    let w = scene.size.width;
    let h = scene.size.height;
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}""#,
        fmt(w),
        fmt(h),
        fmt(w),
        fmt(h)
    );
    if let Some(family) = options.font_family.as_deref() {
        let _ = write!(out, r#" font-family="{}""#, escape_attr(family));
    }
    out.push('>');
    if let Some(bg) = options.background.as_deref() {
        let _ = write!(
            out,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape_attr(bg)
        );
    }
    let _ = write!(
        out,
        r#"<g id="{}" transform="{}">"#,
        escape_attr(&options.root_group_id),
        transform_attr(&scene.transform)
    );

    out.push_str(r#"<g class="links">"#);
    for link in &scene.links {
        let _ = write!(
            out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}"/>"#,
            link.path_data(),
            escape_attr(&link.stroke),
            fmt(link.stroke_width),
            fmt(link.opacity)
        );
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for node in &scene.nodes {
        render_node(&mut out, node, options);
    }
    out.push_str("</g></g></svg>");
    out
}

fn render_node(out: &mut String, node: &SceneNode, options: &SvgRenderOptions) {
    let r = node.rect;
    let (w, h) = (r.width(), r.height());
    let _ = write!(
        out,
        r#"<g class="node" data-id="{}" transform="translate({},{})">"#,
        node.id,
        fmt(r.min_x()),
        fmt(r.min_y())
    );
    if options.include_tooltips {
        if let Some(tip) = node.tooltip.as_deref() {
            let _ = write!(out, "<title>{}</title>", escape_text(tip));
        }
    }
    if node.highlighted {
        let _ = write!(
            out,
            r#"<rect x="-3" y="-3" width="{}" height="{}" rx="{}" fill="none" stroke="{HIGHLIGHT_COLOR}" stroke-width="2.5" opacity="0.9"/>"#,
            fmt(w + 6.0),
            fmt(h + 6.0),
            fmt(node.corner_radius + 2.0)
        );
    }
    let _ = write!(
        out,
        r#"<rect width="{}" height="{}" rx="{}" fill="{}" stroke="{}" stroke-width="{}" opacity="{}"/>"#,
        fmt(w),
        fmt(h),
        fmt(node.corner_radius),
        escape_attr(&node.fill),
        escape_attr(&node.stroke),
        fmt(node.stroke_width),
        fmt(node.opacity)
    );

    let label = &node.label;
    for (idx, line) in label.lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-size="{}" font-weight="{}" fill="{}">{}</text>"#,
            fmt(w / 2.0),
            fmt(label.line_y(idx, h)),
            fmt(label.font_size),
            label.font_weight,
            label.fill,
            escape_text(line)
        );
    }

    if let Some(badge) = node.collapse_badge.as_deref() {
        let _ = write!(
            out,
            r#"<text x="{}" y="7" text-anchor="end" font-size="8" fill="{}" opacity="0.8">{}</text>"#,
            fmt(w - 4.0),
            escape_attr(&node.badge_color),
            escape_text(badge)
        );
    }
    if options.include_cross_ref_markers && node.cross_ref_marker {
        let _ = write!(
            out,
            r#"<text x="4" y="{}" font-size="7" fill="{CROSS_REF_COLOR}" opacity="0.85">{CROSS_REF_GLYPH}</text>"#,
            fmt(h - 3.0)
        );
    }
    out.push_str("</g>");
}
