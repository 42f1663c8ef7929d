//! Detail panel view model.

use crate::color::is_light;
use crate::format::{escape_html, format_math};
use crate::plot::function_plot;
use crate::{Error, Result};
use indexmap::IndexMap;
use std::fmt::Write as _;
use sylva_core::{CrossRefIndex, NodeId, Tree};

pub const ROOT_TRAIL_LABEL: &str = "Root";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBadge {
    pub label: String,
    pub background: String,
    pub text_color: &'static str,
}

/// Another node with the same name, shown with its interior path.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossLink {
    pub target: NodeId,
    pub trail: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub node: NodeId,
    pub badge: CategoryBadge,
    pub title: String,
    pub full_name: Option<String>,
    pub description_html: String,
    pub plot_svg: Option<String>,
    /// Normalized names from the root to the node. Shown only when longer than one entry.
    pub path: Vec<String>,
    pub subtopics: Vec<String>,
    pub siblings: Vec<String>,
    pub cross_links: Vec<CrossLink>,
}

impl DetailView {
    pub fn build(
        tree: &Tree,
        xref: &CrossRefIndex,
        abbr: &IndexMap<String, String>,
        id: NodeId,
    ) -> Result<Self> {
        let node = tree.get(id).ok_or(Error::UnknownNode { id })?;
        let title = node.normalized_name();
        let names = |ids: &[NodeId]| -> Vec<String> {
            ids.iter().map(|c| tree.node(*c).normalized_name()).collect()
        };

        let siblings = node
            .parent()
            .map(|p| {
                tree.node(p)
                    .children()
                    .iter()
                    .copied()
                    .filter(|c| *c != id)
                    .map(|c| tree.node(c).normalized_name())
                    .collect()
            })
            .unwrap_or_default();

        let cross_links = xref
            .others(id)
            .into_iter()
            .map(|target| {
                let path = tree.path_to(target);
                let interior = if path.len() > 2 {
                    &path[1..path.len() - 1]
                } else {
                    &[][..]
                };
                let trail = if interior.is_empty() {
                    ROOT_TRAIL_LABEL.to_string()
                } else {
                    names(interior).join(" \u{203A} ")
                };
                CrossLink { target, trail }
            })
            .collect();

        Ok(Self {
            node: id,
            badge: CategoryBadge {
                label: tree.category(id).unwrap_or_default(),
                background: node.color().to_string(),
                text_color: if is_light(node.color()) { "#111" } else { "#fff" },
            },
            full_name: abbr.get(&title).filter(|f| !f.is_empty()).cloned(),
            plot_svg: function_plot(&title),
            title,
            description_html: node.desc().map(format_math).unwrap_or_default(),
            path: names(&tree.path_to(id)),
            subtopics: names(node.children()),
            siblings,
            cross_links,
        })
    }

    pub fn cross_link_target(&self, index: usize) -> Option<NodeId> {
        self.cross_links.get(index).map(|c| c.target)
    }

    /// Panel body as an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(512);
        let _ = write!(
            out,
            r#"<div class="dp-badge" style="background:{};color:{}">{}</div>"#,
            escape_html(&self.badge.background),
            self.badge.text_color,
            escape_html(&self.badge.label)
        );
        let _ = write!(out, r#"<h2 class="dp-title">{}</h2>"#, escape_html(&self.title));
        out.push_str(r#"<div class="dp-subtitle">"#);
        if let Some(full) = &self.full_name {
            let _ = write!(out, r#"<div class="dp-fullname">{}</div>"#, escape_html(full));
        }
        out.push_str(&self.description_html);
        out.push_str("</div>");

        out.push_str(r#"<div class="dp-body">"#);
        if let Some(svg) = &self.plot_svg {
            let _ = write!(out, r#"<div class="dp-graph">{svg}</div>"#);
        }
        if self.path.len() > 1 {
            let trail: Vec<String> = self.path.iter().map(|p| escape_html(p)).collect();
            let _ = write!(
                out,
                r#"<div class="dp-section"><div class="dp-section-title">Location</div><p class="dp-path">{}</p></div>"#,
                trail.join(" \u{2192} ")
            );
        }
        write_keywords(&mut out, "Subtopics", &self.subtopics);
        write_keywords(&mut out, "Same category", &self.siblings);
        if !self.cross_links.is_empty() {
            let _ = write!(
                out,
                r#"<div class="dp-section"><div class="dp-section-title">{} Also appears in ({})</div>"#,
                crate::scene::CROSS_REF_GLYPH,
                self.cross_links.len()
            );
            for (idx, link) in self.cross_links.iter().enumerate() {
                let _ = write!(
                    out,
                    r#"<div class="dp-crosslink" data-nav-idx="{idx}"><span class="dp-crosslink-path">{}</span><span class="dp-crosslink-arrow">{}</span></div>"#,
                    escape_html(&link.trail),
                    '\u{2192}'
                );
            }
            out.push_str("</div>");
        }
        out.push_str("</div>");
        out
    }
}

fn write_keywords(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = write!(
        out,
        r#"<div class="dp-section"><div class="dp-section-title">{title} ({})</div><div class="dp-keywords">"#,
        items.len()
    );
    for item in items {
        let _ = write!(out, r#"<span class="dp-kw">{}</span>"#, escape_html(item));
    }
    out.push_str("</div></div>");
}
