//! Hex color helpers.

fn parse_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut it = digits.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some((it.next()??, it.next()??, it.next()??))
        }
        6 | 8 => Some((
            channel(digits.get(0..2)?)?,
            channel(digits.get(2..4)?)?,
            channel(digits.get(4..6)?)?,
        )),
        _ => None,
    }
}

/// Subtracts `amount` from every channel (saturating at zero) and returns `rgb(r,g,b)`.
///
/// Non-hex colors pass through unchanged.
pub fn darken(color: &str, amount: u8) -> String {
    match parse_hex_rgb(color) {
        Some((r, g, b)) => format!(
            "rgb({},{},{})",
            r.saturating_sub(amount),
            g.saturating_sub(amount),
            b.saturating_sub(amount)
        ),
        None => color.to_string(),
    }
}

/// Perceived luma above 150 (ITU-R 601 weights). Non-hex colors are treated as dark.
pub fn is_light(color: &str) -> bool {
    parse_hex_rgb(color).is_some_and(|(r, g, b)| {
        f64::from(r) * 0.299 + f64::from(g) * 0.587 + f64::from(b) * 0.114 > 150.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_saturates_each_channel() {
        assert_eq!(darken("#3b82f6", 120), "rgb(0,10,126)");
        assert_eq!(darken("#ffffff", 80), "rgb(175,175,175)");
    }

    #[test]
    fn short_hex_expands() {
        assert_eq!(darken("#fff", 0), "rgb(255,255,255)");
    }

    #[test]
    fn named_colors_pass_through() {
        assert_eq!(darken("steelblue", 120), "steelblue");
        assert_eq!(darken("#zzzzzz", 10), "#zzzzzz");
    }

    #[test]
    fn luma_threshold() {
        assert!(is_light("#fbbf24"));
        assert!(!is_light("#1e3a8a"));
        assert!(!is_light("red"));
    }
}
