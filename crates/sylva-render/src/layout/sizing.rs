//! Box sizing by depth tier.

use crate::text::CachedTextMeasurer;
use sylva_core::Node;

/// Three visual tiers: the root, primary categories at depth 1, and everything deeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthTier {
    Root,
    Category,
    Term,
}

impl DepthTier {
    pub fn of(depth: usize) -> Self {
        match depth {
            0 => Self::Root,
            1 => Self::Category,
            _ => Self::Term,
        }
    }

    pub fn font_size(self) -> f64 {
        match self {
            Self::Root => 15.0,
            Self::Category => 11.5,
            Self::Term => 10.0,
        }
    }

    pub fn padding(self) -> f64 {
        match self {
            Self::Root => 26.0,
            Self::Category => 18.0,
            Self::Term => 14.0,
        }
    }

    pub fn min_width(self) -> f64 {
        match self {
            Self::Root => 90.0,
            Self::Category => 72.0,
            Self::Term => 48.0,
        }
    }

    pub fn corner_radius(self) -> f64 {
        match self {
            Self::Root => 10.0,
            Self::Category => 7.0,
            Self::Term => 5.0,
        }
    }

    fn base_height(self) -> f64 {
        match self {
            Self::Root => 16.0,
            Self::Category => 12.0,
            Self::Term => 10.0,
        }
    }

    fn line_height(self) -> f64 {
        match self {
            Self::Root => 20.0,
            Self::Category => 15.0,
            Self::Term => 13.0,
        }
    }

    pub fn height(self, line_count: usize) -> f64 {
        self.base_height() + self.line_height() * line_count.max(1) as f64
    }

    /// Baseline-to-baseline distance between label lines.
    pub fn line_pitch(self) -> f64 {
        self.font_size() + 1.5
    }
}

pub fn node_width(node: &Node, measurer: &CachedTextMeasurer) -> f64 {
    let tier = DepthTier::of(node.depth());
    let font_size = tier.font_size();
    let longest = node
        .label_lines()
        .into_iter()
        .map(|line| measurer.line_width(line, font_size))
        .fold(0.0, f64::max);
    tier.min_width().max(longest + tier.padding())
}

pub fn node_height(node: &Node) -> f64 {
    DepthTier::of(node.depth()).height(node.line_count())
}
