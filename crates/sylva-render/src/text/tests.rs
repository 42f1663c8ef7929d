use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn wide_glyphs_measure_one_em() {
    let measurer = DeterministicTextMeasurer::default();
    let style = TextStyle {
        font_size: 10.0,
        ..Default::default()
    };
    let ascii = measurer.measure("abcd", &style);
    let cjk = measurer.measure("勾配降下", &style);
    assert!(approx(ascii.width, 24.0), "{}", ascii.width);
    assert!(approx(cjk.width, 40.0), "{}", cjk.width);
    assert_eq!(cjk.line_count, 1);
}

#[test]
fn multi_line_width_is_longest_line() {
    let measurer = DeterministicTextMeasurer::default();
    let style = TextStyle {
        font_size: 10.0,
        ..Default::default()
    };
    let m = measurer.measure("ab\nabcdef\nabc", &style);
    assert!(approx(m.width, 36.0), "{}", m.width);
    assert_eq!(m.line_count, 3);
    assert!(approx(m.height, 36.0), "{}", m.height);
}

#[test]
fn empty_string_measures_zero_without_panicking() {
    let cache = CachedTextMeasurer::deterministic(None);
    assert_eq!(cache.line_width("", 11.5), 0.0);
}

#[test]
fn cache_hits_on_repeat_pairs_only() {
    let cache = CachedTextMeasurer::deterministic(None);
    let a = cache.line_width("Dropout", 10.0);
    let b = cache.line_width("Dropout", 10.0);
    assert_eq!(a, b);
    assert_eq!((cache.hits(), cache.misses()), (1, 1));

    // Same text at another size is a distinct entry.
    cache.line_width("Dropout", 11.5);
    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.len(), 2);
}

struct NanMeasurer;

impl TextMeasurer for NanMeasurer {
    fn measure(&self, _text: &str, _style: &TextStyle) -> TextMetrics {
        TextMetrics {
            width: f64::NAN,
            height: 0.0,
            line_count: 1,
        }
    }
}

#[test]
fn non_finite_widths_are_sanitized() {
    let cache = CachedTextMeasurer::new(Arc::new(NanMeasurer), None);
    assert_eq!(cache.line_width("x", 10.0), 0.0);
}
