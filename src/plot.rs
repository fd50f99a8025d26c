//! Simple x-y line charts written as svg.

use crate::numbers::extent;
use svg::node::element::{Group, Line, Polyline, Rectangle, Text};
use svg::node::Text as TextNode;
use svg::Document;

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 540.0;
const LEFT: f64 = 90.0;
const RIGHT: f64 = 260.0;
const TOP: f64 = 50.0;
const BOTTOM: f64 = 70.0;
const TICKS: usize = 5;

const COLOURS: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
];

/// One named curve.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
struct Reference {
    label: String,
    y: f64,
}

#[derive(Debug, Clone)]
pub struct Chart {
    title: String,
    x_label: String,
    y_label: String,
    series: Vec<Series>,
    references: Vec<Reference>,
}

/// Format points for a `points` attribute.
pub fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.3},{:.3}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn tick_label(v: f64) -> String {
    if v != 0.0 && (v.abs() >= 1e4 || v.abs() < 1e-2) {
        format!("{:.2e}", v)
    } else {
        format!("{:.2}", v)
    }
}

fn text(x: f64, y: f64, anchor: &str, content: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
        .set("font-family", "sans-serif")
        .set("font-size", 12)
        .add(TextNode::new(content))
}

/// Widen a zero-width range so it can be scaled.
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else if lo == 0.0 {
        (-1.0, 1.0)
    } else {
        (lo - 0.1 * lo.abs(), hi + 0.1 * hi.abs())
    }
}

impl Chart {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            series: vec![],
            references: vec![],
        }
    }

    pub fn add_series(&mut self, label: &str, points: Vec<(f64, f64)>) -> &mut Self {
        self.series.push(Series {
            label: label.to_string(),
            points,
        });
        self
    }

    /// Dashed horizontal line across the whole chart.
    pub fn add_reference(&mut self, label: &str, y: f64) -> &mut Self {
        self.references.push(Reference {
            label: label.to_string(),
            y,
        });
        self
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    fn extents(&self) -> Result<((f64, f64), (f64, f64)), String> {
        let xs = extent(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
        let ys = extent(
            self.series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.1))
                .chain(self.references.iter().map(|r| r.y)),
        );

        match (xs, ys) {
            (Some((x0, x1)), Some((y0, y1))) => Ok((padded(x0, x1), padded(y0, y1))),
            _ => Err(format!("chart '{}' has no data to plot", self.title)),
        }
    }

    pub fn document(&self) -> Result<Document, String> {
        let ((x0, x1), (y0, y1)) = self.extents()?;
        let plot_w = WIDTH - LEFT - RIGHT;
        let plot_h = HEIGHT - TOP - BOTTOM;
        let sx = |x: f64| LEFT + (x - x0) / (x1 - x0) * plot_w;
        let sy = |y: f64| TOP + plot_h - (y - y0) / (y1 - y0) * plot_h;

        let mut axes = Group::new()
            .set("stroke", "black")
            .set("stroke-width", 1)
            .add(
                Rectangle::new()
                    .set("x", LEFT)
                    .set("y", TOP)
                    .set("width", plot_w)
                    .set("height", plot_h)
                    .set("fill", "none"),
            );
        let mut labels = Group::new();

        for i in 0..=TICKS {
            let f = i as f64 / TICKS as f64;
            let (xv, yv) = (x0 + f * (x1 - x0), y0 + f * (y1 - y0));
            let (px, py) = (sx(xv), sy(yv));

            axes = axes
                .add(Line::new().set("x1", px).set("y1", TOP).set("x2", px).set("y2", TOP + plot_h).set("stroke", "#dddddd"))
                .add(Line::new().set("x1", LEFT).set("y1", py).set("x2", LEFT + plot_w).set("y2", py).set("stroke", "#dddddd"));
            labels = labels
                .add(text(px, TOP + plot_h + 18.0, "middle", &tick_label(xv)))
                .add(text(LEFT - 6.0, py + 4.0, "end", &tick_label(yv)));
        }

        labels = labels
            .add(text(LEFT + plot_w / 2.0, 28.0, "middle", &self.title).set("font-size", 16))
            .add(text(LEFT + plot_w / 2.0, HEIGHT - 20.0, "middle", &self.x_label))
            .add(
                text(20.0, TOP + plot_h / 2.0, "middle", &self.y_label)
                    .set("transform", format!("rotate(-90 20 {})", TOP + plot_h / 2.0)),
            );

        let mut curves = Group::new().set("fill", "none").set("stroke-width", 1.5);
        let mut legend = Group::new();
        let legend_x = LEFT + plot_w + 16.0;

        for (i, series) in self.series.iter().enumerate() {
            let colour = COLOURS[i % COLOURS.len()];
            let scaled: Vec<(f64, f64)> = series.points.iter().map(|&(x, y)| (sx(x), sy(y))).collect();
            curves = curves.add(
                Polyline::new()
                    .set("points", points_attr(&scaled))
                    .set("stroke", colour),
            );

            let ly = TOP + 12.0 + 18.0 * i as f64;
            legend = legend
                .add(Line::new().set("x1", legend_x).set("y1", ly).set("x2", legend_x + 20.0).set("y2", ly).set("stroke", colour).set("stroke-width", 2))
                .add(text(legend_x + 26.0, ly + 4.0, "start", &series.label));
        }

        for (j, reference) in self.references.iter().enumerate() {
            let py = sy(reference.y);
            curves = curves.add(
                Line::new()
                    .set("x1", LEFT)
                    .set("y1", py)
                    .set("x2", LEFT + plot_w)
                    .set("y2", py)
                    .set("stroke", "black")
                    .set("stroke-dasharray", "6,4"),
            );

            let ly = TOP + 12.0 + 18.0 * (self.series.len() + j) as f64;
            legend = legend
                .add(Line::new().set("x1", legend_x).set("y1", ly).set("x2", legend_x + 20.0).set("y2", ly).set("stroke", "black").set("stroke-dasharray", "6,4"))
                .add(text(legend_x + 26.0, ly + 4.0, "start", &reference.label));
        }

        Ok(Document::new()
            .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
            .set("width", WIDTH)
            .set("height", HEIGHT)
            .add(Rectangle::new().set("width", WIDTH).set("height", HEIGHT).set("fill", "white"))
            .add(axes)
            .add(curves)
            .add(labels)
            .add(legend))
    }

    pub fn save(&self, path: &str) -> Result<(), String> {
        let document = self.document()?;
        svg::save(path, &document).map_err(|why| format!("could not write '{}': {}", path, why))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempdir::TempDir;

    #[test]
    fn tick_labels_switch_to_exponent() {
        assert_eq!(tick_label(0.0), "0.00");
        assert_eq!(tick_label(12.5), "12.50");
        assert_eq!(tick_label(250000.0), "2.50e5");
        assert_eq!(tick_label(0.001), "1.00e-3");
    }

    #[test]
    fn flat_range_is_widened() {
        assert_eq!(padded(0.0, 0.0), (-1.0, 1.0));
        let (lo, hi) = padded(5.0, 5.0);
        assert!(lo < 5.0 && hi > 5.0);
    }

    #[test]
    fn empty_chart_is_an_error() {
        let chart = Chart::new("empty", "x", "y");
        assert!(chart.document().is_err());
    }

    #[test]
    fn chart_is_written_with_every_series() {
        let dir = TempDir::new("plot").unwrap();
        let path = dir.path().join("chart.svg");
        let path = path.to_str().unwrap();

        let mut chart = Chart::new("Crack growth", "Cycles", "Crack Length (m)");
        chart
            .add_series("first", vec![(0.0, 0.001), (500.0, 0.002)])
            .add_series("second", vec![(0.0, 0.001), (400.0, 0.003)])
            .add_reference("Failure Threshold", 0.02);
        chart.save(path).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents.matches("<polyline").count(), 2);
        assert!(contents.contains("Failure Threshold"));
        assert!(contents.contains("stroke-dasharray"));
        assert!(contents.contains("Crack growth"));
    }
}
