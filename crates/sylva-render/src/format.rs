//! Description formatting for the detail panel.
//!
//! Plain-text descriptions use a light ASCII math notation (`x_i`, `W_{out}`, `e^(x)`, `x^2`).
//! [`format_math`] escapes the text and turns that notation into inline HTML.

use regex::Regex;
use std::sync::OnceLock;

struct MathPatterns {
    sub_braced: Regex,
    sub_single: Regex,
    sup_paren: Regex,
    sup_word: Regex,
    symbol: Regex,
    formula_char: Regex,
    long_cjk_run: Regex,
}

fn patterns() -> &'static MathPatterns {
    static PATTERNS: OnceLock<MathPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| MathPatterns {
        sub_braced: Regex::new(r"([A-Za-zα-ωΑ-Ωθσμλεηγβδτπ])_\{([^}]+)\}").expect("valid regex"),
        sub_single: Regex::new(r"([A-Za-zα-ωΑ-Ωθσμλεηγβδτπ])_([A-Za-z0-9])").expect("valid regex"),
        sup_paren: Regex::new(r"([A-Za-z0-9)])?\^(\([^)]+\))").expect("valid regex"),
        sup_word: Regex::new(r"([A-Za-z0-9)])?\^([A-Za-z0-9²³]+)").expect("valid regex"),
        symbol: Regex::new(r"[Σ∫∇∂√∞≤≥≠≈∈∩∪]").expect("valid regex"),
        formula_char: Regex::new(r"[=+\-*/()Σ∫∇√∂₀-₉⁰-⁹<>αβγδεθλμστπηφ]").expect("valid regex"),
        long_cjk_run: Regex::new(r"[\x{3000}-\x{9fff}]{6,}").expect("valid regex"),
    })
}

/// Escapes `&`, `<` and `>`.
pub fn escape_html(text: &str) -> String {
    htmlize::escape_text(text).into_owned()
}

/// A sentence chunk reads as a formula when it is short, contains `=`, has more than three
/// math characters and no long run of CJK prose.
fn looks_like_formula(chunk: &str) -> bool {
    let p = patterns();
    p.formula_char.find_iter(chunk).count() > 3
        && chunk.chars().count() < 80
        && chunk.contains('=')
        && !p.long_cjk_run.is_match(chunk)
}

/// Escapes `text` and renders the inline notation. Each `。`-terminated chunk that reads as a
/// formula (judged on the raw text) is wrapped in a block span.
pub fn format_math(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    for chunk in text.split_inclusive('。') {
        let html = format_inline(chunk);
        if looks_like_formula(chunk) {
            out.push_str(r#"<span class="dp-math-block">"#);
            out.push_str(html.trim());
            out.push_str("</span>");
        } else {
            out.push_str(&html);
        }
    }
    out
}

fn format_inline(text: &str) -> String {
    let p = patterns();
    let s = escape_html(text);
    let s = p.sub_braced.replace_all(&s, "${1}<sub>${2}</sub>");
    let s = p.sub_single.replace_all(&s, "${1}<sub>${2}</sub>");
    let s = p.sup_paren.replace_all(&s, "${1}<sup>${2}</sup>");
    let s = p.sup_word.replace_all(&s, "${1}<sup>${2}</sup>");
    p.symbol
        .replace_all(&s, r#"<span class="dp-math">${0}</span>"#)
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_before_formatting() {
        assert_eq!(format_math("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn subscripts() {
        assert_eq!(format_math("W_{out}"), "W<sub>out</sub>");
        assert_eq!(format_math("x_i"), "x<sub>i</sub>");
    }

    #[test]
    fn superscripts() {
        assert_eq!(format_math("e^(x)"), "e<sup>(x)</sup>");
        assert_eq!(format_math("x^2"), "x<sup>2</sup>");
        assert_eq!(format_math("^T"), "<sup>T</sup>");
    }

    #[test]
    fn symbols_are_wrapped() {
        assert_eq!(format_math("∞"), r#"<span class="dp-math">∞</span>"#);
    }

    #[test]
    fn short_equation_chunks_become_blocks() {
        let out = format_math("損失関数。 y = (a + b) * c。");
        assert_eq!(
            out,
            r#"損失関数。<span class="dp-math-block">y = (a + b) * c。</span>"#
        );
    }

    #[test]
    fn prose_is_left_inline() {
        let text = "この関数は勾配消失問題を緩和するために広く使われる (a=b+c)。";
        assert!(!format_math(text).contains("dp-math-block"));
    }

    #[test]
    fn empty_is_empty() {
        assert_eq!(format_math(""), "");
    }
}
