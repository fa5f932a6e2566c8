//! Chart geometry for the dashboard.
//!
//! Everything here is plain arithmetic on counts; `ui` turns the result into
//! SVG.

use std::f64::consts::{FRAC_PI_2, TAU};

pub const PIE_PALETTE: [&str; 4] = ["#b8860b", "#e0b14a", "#f3e6c2", "#c8b7ff"];
pub const BAR_COLOR: &str = "#c88b2a";

const LEGEND_X: f64 = 10.0;
const LEGEND_Y: f64 = 12.0;
const LEGEND_STEP: f64 = 16.0;
const BAR_MARGIN: f64 = 20.0;
const BAR_HEADROOM: f64 = 30.0;
const BAR_FILL_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub start_angle: f64,
    pub sweep: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub canvas: Canvas,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub slices: Vec<PieSlice>,
    pub legend: Vec<TextLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SliceShape {
    Circle,
    Wedge(String),
}

impl PieChart {
    /// Shape of each slice with a visible sweep, paired with its colour.
    pub fn shapes(&self) -> Vec<(SliceShape, &'static str)> {
        self.slices
            .iter()
            .filter(|slice| slice.sweep > 0.0)
            .map(|slice| (self.shape(slice), slice.color))
            .collect()
    }

    fn shape(&self, slice: &PieSlice) -> SliceShape {
        if slice.sweep >= TAU - 1e-9 {
            return SliceShape::Circle;
        }
        let (x0, y0) = self.point_at(slice.start_angle);
        let (x1, y1) = self.point_at(slice.start_angle + slice.sweep);
        let large_arc = u8::from(slice.sweep > std::f64::consts::PI);
        SliceShape::Wedge(format!(
            "M {:.2} {:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z",
            self.cx,
            self.cy,
            r = self.radius,
        ))
    }

    fn point_at(&self, angle: f64) -> (f64, f64) {
        (
            self.cx + self.radius * angle.cos(),
            self.cy + self.radius * angle.sin(),
        )
    }
}

/// Proportional wedges starting at the top and running clockwise, with a
/// `label (count)` legend in the corner.
pub fn pie_chart(canvas: Canvas, labels: &[&str], values: &[usize]) -> PieChart {
    let total = values.iter().sum::<usize>().max(1) as f64;
    let mut angle = -FRAC_PI_2;
    let mut slices = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let sweep = *value as f64 / total * TAU;
        slices.push(PieSlice {
            start_angle: angle,
            sweep,
            color: PIE_PALETTE[index % PIE_PALETTE.len()],
        });
        angle += sweep;
    }

    let legend = labels
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (label, value))| TextLabel {
            x: LEGEND_X,
            y: LEGEND_Y + index as f64 * LEGEND_STEP,
            text: format!("{label} ({value})"),
        })
        .collect();

    PieChart {
        canvas,
        cx: canvas.width / 2.0,
        cy: canvas.height / 2.0,
        radius: canvas.width.min(canvas.height) / 3.0,
        slices,
        legend,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: TextLabel,
    pub count: TextLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub canvas: Canvas,
    pub bars: Vec<Bar>,
}

/// One bar per value, scaled against the largest value (at least 1).
pub fn bar_chart(canvas: Canvas, labels: &[&str], values: &[usize]) -> BarChart {
    if values.is_empty() {
        return BarChart { canvas, bars: Vec::new() };
    }

    let plot_width = canvas.width - BAR_MARGIN * 2.0;
    let plot_height = canvas.height - BAR_MARGIN * 2.0;
    let max = values.iter().copied().max().unwrap_or(0).max(1) as f64;
    let slot = plot_width / values.len() as f64;
    let bar_width = slot * BAR_FILL_RATIO;

    let bars = labels
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (label, value))| {
            let x = BAR_MARGIN + index as f64 * slot + (slot - bar_width) / 2.0;
            let height = *value as f64 / max * (plot_height - BAR_HEADROOM);
            let y = BAR_MARGIN + (plot_height - height);
            Bar {
                x,
                y,
                width: bar_width,
                height,
                label: TextLabel {
                    x,
                    y: canvas.height - 6.0,
                    text: (*label).to_string(),
                },
                count: TextLabel {
                    x,
                    y: y - 6.0,
                    text: value.to_string(),
                },
            }
        })
        .collect();

    BarChart { canvas, bars }
}
