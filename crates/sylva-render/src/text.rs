use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::sync::Arc;
use unicode_width::UnicodeWidthChar;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-independent measurer driven by Unicode display width.
///
/// Wide (East Asian) glyphs count as one em, everything else as `char_width_factor` em.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub wide_char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }

    fn factors(&self) -> (f64, f64, f64) {
        let or = |v: f64, d: f64| if v == 0.0 { d } else { v };
        (
            or(self.char_width_factor, 0.6),
            or(self.wide_char_width_factor, 1.0),
            or(self.line_height_factor, 1.2),
        )
    }

    pub fn line_width_em(&self, line: &str) -> f64 {
        let (narrow, wide, _) = self.factors();
        line.chars()
            .map(|ch| match ch.width() {
                Some(2) => wide,
                Some(0) | None => 0.0,
                Some(_) => narrow,
            })
            .sum()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let (_, _, line_height_factor) = self.factors();
        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let width = lines
            .iter()
            .map(|l| self.line_width_em(l))
            .fold(0.0, f64::max)
            * font_size;
        TextMetrics {
            width,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}

/// Memoizes single-line widths per `(text, font size)`.
///
/// Measurement is the one potentially expensive primitive in layout, and the same labels are
/// measured on every re-layout.
pub struct CachedTextMeasurer {
    inner: Arc<dyn TextMeasurer + Send + Sync>,
    font_family: Option<String>,
    widths: RefCell<FxHashMap<(String, u64), f64>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl std::fmt::Debug for CachedTextMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedTextMeasurer")
            .field("font_family", &self.font_family)
            .field("entries", &self.widths.borrow().len())
            .field("hits", &self.hits.get())
            .field("misses", &self.misses.get())
            .finish()
    }
}

impl CachedTextMeasurer {
    pub fn new(inner: Arc<dyn TextMeasurer + Send + Sync>, font_family: Option<String>) -> Self {
        Self {
            inner,
            font_family,
            widths: RefCell::new(FxHashMap::default()),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    pub fn deterministic(font_family: Option<String>) -> Self {
        Self::new(Arc::new(DeterministicTextMeasurer::default()), font_family)
    }

    /// Pixel width of one label line at `font_size`.
    pub fn line_width(&self, line: &str, font_size: f64) -> f64 {
        let key = (line.to_string(), font_size.to_bits());
        if let Some(w) = self.widths.borrow().get(&key).copied() {
            self.hits.set(self.hits.get() + 1);
            return w;
        }
        self.misses.set(self.misses.get() + 1);
        let style = TextStyle {
            font_family: self.font_family.clone(),
            font_size,
            font_weight: None,
        };
        let w = self.inner.measure(line, &style).width;
        let w = if w.is_finite() { w.max(0.0) } else { 0.0 };
        self.widths.borrow_mut().insert(key, w);
        w
    }

    pub fn hits(&self) -> u64 {
        self.hits.get()
    }

    pub fn misses(&self) -> u64 {
        self.misses.get()
    }

    pub fn len(&self) -> usize {
        self.widths.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.borrow().is_empty()
    }
}
