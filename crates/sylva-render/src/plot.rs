//! Small function plots shown in the detail panel for activation-function terms.

use crate::svg::{escape_text, fmt};
use std::fmt::Write as _;

const WIDTH: f64 = 280.0;
const HEIGHT: f64 = 150.0;
const MARGIN_X: f64 = 30.0;
const MARGIN_Y: f64 = 20.0;
const STEPS: usize = 80;
const AXIS_COLOR: &str = "#475569";
const TICK_COLOR: &str = "#64748b";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guide {
    None,
    /// Dashed line at `y = 1`.
    Unit,
    /// Dashed lines at `y = 1` and `y = -1`.
    Symmetric,
}

#[derive(Debug, Clone, Copy)]
struct PlotFn {
    f: fn(f64) -> f64,
    x_range: (f64, f64),
    y_range: (f64, f64),
    color: &'static str,
    formula: &'static str,
    guide: Guide,
}

fn relu(x: f64) -> f64 {
    x.max(0.0)
}

fn leaky_relu(x: f64) -> f64 {
    if x >= 0.0 { x } else { 0.1 * x }
}

fn gelu(x: f64) -> f64 {
    let c = (2.0 / std::f64::consts::PI).sqrt();
    0.5 * x * (1.0 + (c * (x + 0.044715 * x * x * x)).tanh())
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn lookup(name: &str) -> Option<PlotFn> {
    let tanh = PlotFn {
        f: f64::tanh,
        x_range: (-4.0, 4.0),
        y_range: (-1.2, 1.2),
        color: "#10b981",
        formula: "f(x) = tanh(x)",
        guide: Guide::Symmetric,
    };
    let softmax = PlotFn {
        f: sigmoid,
        x_range: (-6.0, 6.0),
        y_range: (-0.1, 1.1),
        color: "#ec4899",
        formula: "softmax(zᵢ) = eᶻⁱ/Σeᶻʲ (σ for two classes)",
        guide: Guide::Unit,
    };
    Some(match name {
        "ReLU" => PlotFn {
            f: relu,
            x_range: (-3.0, 3.0),
            y_range: (-0.5, 3.0),
            color: "#3b82f6",
            formula: "f(x) = max(0, x)",
            guide: Guide::None,
        },
        "Leaky ReLU" => PlotFn {
            f: leaky_relu,
            x_range: (-3.0, 3.0),
            y_range: (-0.5, 3.0),
            color: "#60a5fa",
            formula: "f(x) = max(αx, x), α=0.1",
            guide: Guide::None,
        },
        "GELU" => PlotFn {
            f: gelu,
            x_range: (-4.0, 4.0),
            y_range: (-0.5, 4.0),
            color: "#818cf8",
            formula: "f(x) = x·Φ(x)",
            guide: Guide::None,
        },
        "Sigmoid function" => PlotFn {
            f: sigmoid,
            x_range: (-6.0, 6.0),
            y_range: (-0.1, 1.1),
            color: "#f59e0b",
            formula: "σ(x) = 1/(1+e⁻ˣ)",
            guide: Guide::Unit,
        },
        "tanh" | "双曲線正接関数" => tanh,
        "Softmax" | "ソフトマックス関数" => softmax,
        _ => return None,
    })
}

pub fn has_plot(name: &str) -> bool {
    lookup(name).is_some()
}

/// SVG plot for a known activation function, keyed by normalized node name.
pub fn function_plot(name: &str) -> Option<String> {
    let curve = lookup(name)?;
    let (x_min, x_max) = curve.x_range;
    let (y_min, y_max) = curve.y_range;
    let gw = WIDTH - MARGIN_X * 2.0;
    let gh = HEIGHT - MARGIN_Y * 2.0;
    let to_x = |v: f64| MARGIN_X + (v - x_min) / (x_max - x_min) * gw;
    let to_y = |v: f64| MARGIN_Y + (y_max - v) / (y_max - y_min) * gh;

    let mut path = String::with_capacity(STEPS * 14);
    for i in 0..=STEPS {
        let x = x_min + (x_max - x_min) * i as f64 / STEPS as f64;
        let y = (curve.f)(x).clamp(y_min, y_max);
        let _ = write!(
            path,
            "{}{:.1},{:.1}",
            if i == 0 { 'M' } else { 'L' },
            to_x(x),
            to_y(y)
        );
    }

    let mut grid = String::new();
    let hline = |out: &mut String, y: f64, width: &str, dashed: bool| {
        let _ = write!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{AXIS_COLOR}" stroke-width="{width}"{}/>"#,
            fmt(MARGIN_X),
            fmt(to_y(y)),
            fmt(MARGIN_X + gw),
            fmt(to_y(y)),
            if dashed { r#" stroke-dasharray="4,3""# } else { "" }
        );
    };
    if y_min <= 0.0 && y_max >= 0.0 {
        hline(&mut grid, 0.0, "0.8", false);
        let _ = write!(
            grid,
            r#"<text x="{}" y="{}" fill="{TICK_COLOR}" font-size="9">0</text>"#,
            fmt(MARGIN_X + gw + 4.0),
            fmt(to_y(0.0) + 3.0)
        );
    }
    if x_min <= 0.0 && x_max >= 0.0 {
        let _ = write!(
            grid,
            r#"<line x1="{x}" y1="{}" x2="{x}" y2="{}" stroke="{AXIS_COLOR}" stroke-width="0.8"/>"#,
            fmt(MARGIN_Y),
            fmt(MARGIN_Y + gh),
            x = fmt(to_x(0.0))
        );
    }
    if curve.guide != Guide::None && y_max >= 1.0 {
        hline(&mut grid, 1.0, "0.5", true);
        let _ = write!(
            grid,
            r#"<text x="{}" y="{}" fill="{TICK_COLOR}" font-size="8">1</text>"#,
            fmt(MARGIN_X - 14.0),
            fmt(to_y(1.0) + 3.0)
        );
    }
    if curve.guide == Guide::Symmetric && y_min <= -1.0 {
        hline(&mut grid, -1.0, "0.5", true);
        let _ = write!(
            grid,
            r#"<text x="{}" y="{}" fill="{TICK_COLOR}" font-size="8">-1</text>"#,
            fmt(MARGIN_X - 18.0),
            fmt(to_y(-1.0) + 3.0)
        );
    }

    let total_h = HEIGHT + 22.0;
    Some(format!(
        concat!(
            r#"<svg class="dp-plot" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{grid}"#,
            r#"<path d="{path}" fill="none" stroke="{color}" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round"/>"#,
            r##"<text x="{cx}" y="{ty}" text-anchor="middle" fill="#94a3b8" font-size="11" font-family="monospace">{formula}</text></svg>"##
        ),
        w = fmt(WIDTH),
        h = fmt(total_h),
        grid = grid,
        path = path,
        color = curve.color,
        cx = fmt(WIDTH / 2.0),
        ty = fmt(HEIGHT + 16.0),
        formula = escape_text(curve.formula),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_only() {
        assert!(has_plot("ReLU"));
        assert!(has_plot("ソフトマックス関数"));
        assert!(!has_plot("relu"));
        assert!(function_plot("Dropout").is_none());
    }

    #[test]
    fn path_has_one_command_per_step() {
        let svg = function_plot("ReLU").expect("known plot");
        assert_eq!(svg.matches('L').count(), STEPS);
        assert!(svg.contains(r#"d="M30.0,"#));
        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn guides_follow_the_function_shape() {
        let relu = function_plot("ReLU").expect("known plot");
        assert!(!relu.contains("stroke-dasharray"));
        let sigmoid = function_plot("Sigmoid function").expect("known plot");
        assert_eq!(sigmoid.matches("stroke-dasharray").count(), 1);
        let tanh = function_plot("tanh").expect("known plot");
        assert_eq!(tanh.matches("stroke-dasharray").count(), 2);
        assert!(tanh.contains(">-1</text>"));
    }

    #[test]
    fn curve_is_clamped_to_the_plot_area() {
        let svg = function_plot("GELU").expect("known plot");
        let d = svg
            .split(r#"d=""#)
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .expect("path data");
        for pair in d.split(['M', 'L']).filter(|s| !s.is_empty()) {
            let (_, y) = pair.split_once(',').expect("x,y pair");
            let y: f64 = y.parse().expect("number");
            assert!((MARGIN_Y - 0.05..=HEIGHT - MARGIN_Y + 0.05).contains(&y), "{y}");
        }
    }
}
