//! Support reactions of the triangular platform frame.
//!
//! The frame is a right triangle with floats at `A` and `B` and both
//! turbines at the apex `C`. Each beam weighs the same and its weight
//! acts at the beam midpoint. `A` is pinned and `B` rests on a roller.

use crate::numbers::extent;
use crate::plot::points_attr;
use crate::COMMENT;
use svg::node::element::{Circle, Group, Line, Polygon, Text};
use svg::node::Text as TextNode;
use svg::Document;

/// Acceleration due to gravity (m/s^2)
pub const GRAVITY: f64 = 9.81;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 560.0;
const MARGIN: f64 = 90.0;
/// distributed load arrows drawn along each beam
const LOAD_ARROWS: usize = 5;
const ARROW_LENGTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

#[derive(Debug, Clone)]
pub struct TriangleFrame {
    /// Float 1
    pub a: Point,
    /// Float 2
    pub b: Point,
    /// Apex carrying the turbines
    pub c: Point,
    /// Weight of each beam (N)
    pub beam_weight: f64,
    /// Weight of each turbine (N)
    pub turbine_weight: f64,
    pub turbine_count: u32,
}

impl Default for TriangleFrame {
    fn default() -> Self {
        Self {
            a: Point::new(0.0, 0.0),
            b: Point::new(100.0, 0.0),
            c: Point::new(100.0, 50.0),
            beam_weight: 1000.0 * GRAVITY,
            turbine_weight: 500.0 * GRAVITY,
            turbine_count: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reactions {
    /// Beam lengths AB, AC, BC (m)
    pub lengths: [f64; 3],
    /// Distributed load on AB, AC, BC (N/m)
    pub distributed: [f64; 3],
    /// Turbine load at C (N)
    pub point_load: f64,
    /// Moment of all loads about A (N m)
    pub moment_a: f64,
    pub total_vertical_load: f64,
    pub ax: f64,
    pub ay: f64,
    pub bx: f64,
    pub by: f64,
}

impl TriangleFrame {
    /// Solve ∑Fx = 0, ∑Fy = 0 and ∑M_A = 0 for the support reactions.
    pub fn solve_reactions(&self) -> Result<Reactions, String> {
        let span = self.b.x - self.a.x;
        if span.abs() <= f64::EPSILON {
            return Err(format!(
                "supports A {:?} and B {:?} are on the same vertical line",
                self.a, self.b
            ));
        }

        let beams = [(self.a, self.b), (self.a, self.c), (self.b, self.c)];
        let mut lengths = [0.0; 3];
        let mut distributed = [0.0; 3];
        let mut moment_a = 0.0;

        for (i, (start, end)) in beams.iter().enumerate() {
            let length = start.distance(end);
            if length <= 0.0 {
                return Err(format!("beam {} has zero length", i));
            }
            lengths[i] = length;
            distributed[i] = self.beam_weight / length;
            moment_a += self.beam_weight * (start.midpoint(end).x - self.a.x);
        }

        let point_load = f64::from(self.turbine_count) * self.turbine_weight;
        moment_a += point_load * (self.c.x - self.a.x);

        let total_vertical_load = 3.0 * self.beam_weight + point_load;
        let by = moment_a / span;
        let ay = total_vertical_load - by;

        Ok(Reactions {
            lengths,
            distributed,
            point_load,
            moment_a,
            total_vertical_load,
            ax: 0.0,
            ay,
            bx: 0.0,
            by,
        })
    }
}

pub fn display_reactions(reactions: &Reactions) {
    let names = ["AB", "AC", "BC"];
    println!("{}Beam lengths and distributed loads", COMMENT);
    for (i, name) in names.iter().enumerate() {
        println!(
            "{:>6} {:12.3} m {:12.3} N/m",
            name, reactions.lengths[i], reactions.distributed[i]
        );
    }
    println!("{}Point load at C = {:.2} N", COMMENT, reactions.point_load);
    println!("{}Reaction forces:", COMMENT);
    println!("Ax = {:.2} N", reactions.ax);
    println!("Ay = {:.2} N", reactions.ay);
    println!("Bx = {:.2} N", reactions.bx);
    println!("By = {:.2} N", reactions.by);
}

fn label(x: f64, y: f64, anchor: &str, content: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
        .set("font-family", "sans-serif")
        .set("font-size", 13)
        .add(TextNode::new(content))
}

/// Vertical arrow with its head at `(x, y)`.
fn arrow(x: f64, y: f64, length: f64) -> Group {
    // a negative length points the arrow up
    let head = 6.0 * length.signum();
    Group::new()
        .add(
            Line::new()
                .set("x1", x)
                .set("y1", y - length)
                .set("x2", x)
                .set("y2", y - head),
        )
        .add(Polygon::new().set(
            "points",
            points_attr(&[(x - 4.0, y - head), (x + 4.0, y - head), (x, y)]),
        ))
}

/// Elevation of the frame with its loads and support reactions.
pub fn model_document(frame: &TriangleFrame, reactions: &Reactions) -> Result<Document, String> {
    let corners = [frame.a, frame.b, frame.c];
    let xs = extent(corners.iter().map(|p| p.x));
    let ys = extent(corners.iter().map(|p| p.y));
    let ((x0, x1), (y0, y1)) = match (xs, ys) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err("frame coordinates are not finite".to_string()),
    };

    // equal scale on both axes, y up
    let span = (x1 - x0).max(y1 - y0).max(f64::EPSILON);
    let scale = ((WIDTH - 2.0 * MARGIN) / span).min((HEIGHT - 2.0 * MARGIN) / span);
    let map = |p: &Point| (MARGIN + (p.x - x0) * scale, HEIGHT - MARGIN - (p.y - y0) * scale);

    let beams = [("AB", frame.a, frame.b), ("AC", frame.a, frame.c), ("BC", frame.b, frame.c)];

    let mut members = Group::new().set("stroke", "black").set("stroke-width", 3);
    let mut loads = Group::new().set("stroke", "#2ca02c").set("fill", "#2ca02c");
    let mut labels = Group::new();
    for (i, (name, start, end)) in beams.iter().enumerate() {
        let (sx, sy) = map(start);
        let (ex, ey) = map(end);
        members = members.add(Line::new().set("x1", sx).set("y1", sy).set("x2", ex).set("y2", ey));

        for k in 1..=LOAD_ARROWS {
            let f = k as f64 / (LOAD_ARROWS + 1) as f64;
            loads = loads.add(arrow(sx + f * (ex - sx), sy + f * (ey - sy), ARROW_LENGTH));
        }

        let (mx, my) = map(&start.midpoint(end));
        labels = labels
            .add(label(mx, my - ARROW_LENGTH - 8.0, "middle", &format!("Beam {}", name)))
            .add(
                label(mx, my + 18.0, "middle", &format!("{:.1} N/m", reactions.distributed[i]))
                    .set("fill", "#2ca02c"),
            );
    }

    let (ax, ay) = map(&frame.a);
    let (bx, by) = map(&frame.b);
    let (cx, cy) = map(&frame.c);

    let floats = Group::new()
        .set("fill", "#1f77b4")
        .add(Circle::new().set("cx", ax).set("cy", ay).set("r", 12))
        .add(Circle::new().set("cx", bx).set("cy", by).set("r", 12));
    let turbine = Circle::new()
        .set("cx", cx)
        .set("cy", cy)
        .set("r", 10)
        .set("fill", "#d62728");

    // reactions push up on the floats, the point load pushes down on C
    let forces = Group::new()
        .set("stroke", "#d62728")
        .set("fill", "#d62728")
        .set("stroke-width", 2)
        .add(arrow(ax, ay + 14.0, -50.0))
        .add(arrow(bx, by + 14.0, -50.0))
        .add(arrow(cx, cy - 12.0, 50.0));

    labels = labels
        .add(label(ax, ay + 84.0, "middle", &format!("Ay = {:.2} N", reactions.ay)))
        .add(label(bx, by + 84.0, "middle", &format!("By = {:.2} N", reactions.by)))
        .add(label(cx, cy - 70.0, "middle", &format!("Point Load = {:.2} N", reactions.point_load)))
        .add(label(ax - 16.0, ay - 10.0, "end", "A"))
        .add(label(bx + 16.0, by - 10.0, "start", "B"))
        .add(label(cx + 14.0, cy - 10.0, "start", "C"))
        .add(label(WIDTH / 2.0, 30.0, "middle", "2D Structural Model with Forces").set("font-size", 18));

    Ok(Document::new()
        .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
        .set("width", WIDTH)
        .set("height", HEIGHT)
        .add(members)
        .add(loads)
        .add(floats)
        .add(turbine)
        .add(forces)
        .add(labels))
}

pub fn save_model(frame: &TriangleFrame, reactions: &Reactions, path: &str) -> Result<(), String> {
    let document = model_document(frame, reactions)?;
    svg::save(path, &document).map_err(|why| format!("could not write '{}': {}", path, why))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempdir::TempDir;

    #[test]
    fn default_frame_reactions() {
        let r = TriangleFrame::default().solve_reactions().unwrap();
        let w = 1000.0 * GRAVITY;

        assert!((r.lengths[0] - 100.0).abs() < 1e-12);
        assert!((r.lengths[1] - 12500f64.sqrt()).abs() < 1e-12);
        assert!((r.lengths[2] - 50.0).abs() < 1e-12);
        assert!((r.point_load - w).abs() < 1e-9);
        assert!((r.moment_a - 300.0 * w).abs() < 1e-6);
        assert!((r.by - 3.0 * w).abs() < 1e-9);
        assert!((r.ay - w).abs() < 1e-9);
    }

    #[test]
    fn reactions_balance_total_load() {
        let frame = TriangleFrame {
            c: Point::new(140.0, 80.0),
            b: Point::new(200.0, 0.0),
            ..TriangleFrame::default()
        };
        let r = frame.solve_reactions().unwrap();

        assert!((r.ay + r.by - r.total_vertical_load).abs() < 1e-9);
        // moment about B is also zero
        let span = frame.b.x - frame.a.x;
        assert!((r.ay * span - (r.total_vertical_load * span - r.moment_a)).abs() < 1e-6);
    }

    #[test]
    fn symmetric_frame_shares_load() {
        let frame = TriangleFrame {
            c: Point::new(50.0, 40.0),
            ..TriangleFrame::default()
        };
        let r = frame.solve_reactions().unwrap();
        assert!((r.ay - r.by).abs() < 1e-9);
    }

    #[test]
    fn vertical_supports_are_rejected() {
        let frame = TriangleFrame {
            b: Point::new(0.0, 10.0),
            ..TriangleFrame::default()
        };
        assert!(frame.solve_reactions().is_err());
    }

    #[test]
    fn model_figure_shows_beams_and_reactions() {
        let dir = TempDir::new("statics").unwrap();
        let path = dir.path().join("model.svg");
        let path = path.to_str().unwrap();

        let frame = TriangleFrame::default();
        let r = frame.solve_reactions().unwrap();
        save_model(&frame, &r, path).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("2D Structural Model with Forces"));
        for beam in &["Beam AB", "Beam AC", "Beam BC"] {
            assert!(contents.contains(beam));
        }
        assert!(contents.contains(&format!("Ay = {:.2} N", r.ay)));
        assert!(contents.contains(&format!("By = {:.2} N", r.by)));
        assert!(contents.contains("Point Load ="));
        // two floats and the turbine
        assert_eq!(contents.matches("<circle").count(), 3);
    }
}
