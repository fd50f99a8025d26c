//! 3D sketch of the support structure rendered as an isometric svg.

use crate::plot::points_attr;
use std::f64::consts::PI;
use svg::node::element::{Circle, Group, Line, Polygon, Text};
use svg::node::Text as TextNode;
use svg::Document;

const SIZE: f64 = 600.0;
const MARGIN: f64 = 60.0;
const FLOAT_SEGMENTS: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Point3) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2) + (other.z - self.z).powi(2)).sqrt()
    }

    /// Isometric projection onto the drawing plane, y pointing down.
    fn project(&self) -> (f64, f64) {
        let c = (PI / 6.0).cos();
        let s = (PI / 6.0).sin();
        ((self.x - self.y) * c, (self.x + self.y) * s - self.z)
    }
}

#[derive(Debug, Clone)]
pub struct Structure {
    pub points: Vec<(String, Point3)>,
    /// pairs of point names
    pub members: Vec<(String, String)>,
    pub turbines: Vec<String>,
    pub floats: Vec<String>,
    pub float_radius: f64,
}

impl Default for Structure {
    fn default() -> Self {
        let points = vec![
            ("corner1", Point3::new(0.0, 0.0, 0.0)),
            ("corner2", Point3::new(2.0, 0.0, 0.0)),
            ("corner3", Point3::new(1.0, 3f64.sqrt(), 0.0)),
            ("beam1_top", Point3::new(0.5, 0.0, 2.0)),
            ("beam2_top", Point3::new(1.5, 0.0, 2.0)),
            ("middle_bottom", Point3::new(1.0, 0.0, 0.0)),
        ];
        let members = [
            ("corner1", "beam1_top"),
            ("corner2", "beam2_top"),
            ("beam1_top", "beam2_top"),
            ("beam1_top", "middle_bottom"),
            ("beam2_top", "middle_bottom"),
            ("corner3", "beam1_top"),
            ("corner3", "beam2_top"),
            ("corner1", "corner2"),
            ("corner2", "corner3"),
            ("corner3", "corner1"),
        ];

        Self {
            points: points.into_iter().map(|(n, p)| (n.to_string(), p)).collect(),
            members: members
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            turbines: vec!["beam1_top".to_string(), "beam2_top".to_string()],
            floats: vec![
                "corner1".to_string(),
                "corner2".to_string(),
                "corner3".to_string(),
            ],
            float_radius: 0.2,
        }
    }
}

impl Structure {
    pub fn point(&self, name: &str) -> Result<Point3, String> {
        self.points
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| *p)
            .ok_or_else(|| format!("unknown point '{}' in structure", name))
    }

    /// Length of every member in order.
    pub fn member_lengths(&self) -> Result<Vec<(String, String, f64)>, String> {
        self.members
            .iter()
            .map(|(a, b)| -> Result<(String, String, f64), String> {
                let length = self.point(a)?.distance(&self.point(b)?);
                Ok((a.clone(), b.clone(), length))
            })
            .collect()
    }

    fn float_outline(&self, centre: Point3) -> Vec<(f64, f64)> {
        (0..FLOAT_SEGMENTS)
            .map(|i| {
                let theta = 2.0 * PI * i as f64 / FLOAT_SEGMENTS as f64;
                Point3::new(
                    centre.x + self.float_radius * theta.cos(),
                    centre.y + self.float_radius * theta.sin(),
                    centre.z,
                )
                .project()
            })
            .collect()
    }

    pub fn document(&self) -> Result<Document, String> {
        if self.points.is_empty() {
            return Err("structure has no points to draw".to_string());
        }

        // bounds include the float outlines
        let mut projected: Vec<(f64, f64)> = self.points.iter().map(|(_, p)| p.project()).collect();
        for name in &self.floats {
            projected.extend(self.float_outline(self.point(name)?));
        }
        let xs = crate::numbers::extent(projected.iter().map(|p| p.0));
        let ys = crate::numbers::extent(projected.iter().map(|p| p.1));
        let ((x0, x1), (y0, y1)) = match (xs, ys) {
            (Some(x), Some(y)) => (x, y),
            _ => return Err("structure coordinates are not finite".to_string()),
        };
        let span = (x1 - x0).max(y1 - y0).max(f64::EPSILON);
        let scale = (SIZE - 2.0 * MARGIN) / span;
        let map = |(x, y): (f64, f64)| (MARGIN + (x - x0) * scale, MARGIN + (y - y0) * scale);

        let mut floats = Group::new()
            .set("fill", "#9ecae1")
            .set("stroke", "#3182bd");
        for name in &self.floats {
            let outline: Vec<(f64, f64)> = self
                .float_outline(self.point(name)?)
                .into_iter()
                .map(&map)
                .collect();
            floats = floats.add(Polygon::new().set("points", points_attr(&outline)));
        }

        let mut members = Group::new().set("stroke", "#636363").set("stroke-width", 3);
        for (a, b) in &self.members {
            let (ax, ay) = map(self.point(a)?.project());
            let (bx, by) = map(self.point(b)?.project());
            members = members.add(
                Line::new()
                    .set("x1", ax)
                    .set("y1", ay)
                    .set("x2", bx)
                    .set("y2", by),
            );
        }

        let mut turbines = Group::new().set("fill", "#d62728");
        for name in &self.turbines {
            let (x, y) = map(self.point(name)?.project());
            turbines = turbines.add(Circle::new().set("cx", x).set("cy", y).set("r", 8));
        }

        let mut labels = Group::new()
            .set("font-family", "sans-serif")
            .set("font-size", 11);
        for (name, p) in &self.points {
            let (x, y) = map(p.project());
            labels = labels.add(
                Text::new()
                    .set("x", x + 10.0)
                    .set("y", y - 6.0)
                    .add(TextNode::new(name.as_str())),
            );
        }

        Ok(Document::new()
            .set("viewBox", (0.0, 0.0, SIZE, SIZE))
            .set("width", SIZE)
            .set("height", SIZE)
            .add(floats)
            .add(members)
            .add(turbines)
            .add(labels))
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
    fn default_member_lengths() {
        let lengths = Structure::default().member_lengths().unwrap();
        assert_eq!(lengths.len(), 10);

        // corner1 to beam1_top
        assert!((lengths[0].2 - 4.25f64.sqrt()).abs() < 1e-12);
        // beam1_top to beam2_top
        assert!((lengths[2].2 - 1.0).abs() < 1e-12);
        // base triangle is equilateral
        for l in &lengths[7..] {
            assert!((l.2 - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn unknown_member_end_is_an_error() {
        let mut structure = Structure::default();
        structure
            .members
            .push(("corner1".to_string(), "nowhere".to_string()));
        assert!(structure.member_lengths().is_err());
        assert!(structure.document().is_err());
    }

    #[test]
    fn isometric_projection_lifts_height() {
        let low = Point3::new(1.0, 1.0, 0.0).project();
        let high = Point3::new(1.0, 1.0, 2.0).project();
        assert!((low.0 - high.0).abs() < 1e-12);
        assert!((low.1 - high.1 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn sketch_is_written() {
        let dir = TempDir::new("sketch").unwrap();
        let path = dir.path().join("structure.svg");
        let path = path.to_str().unwrap();

        Structure::default().save(path).unwrap();
        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents.matches("<polygon").count(), 3);
        assert_eq!(contents.matches("<circle").count(), 2);
        assert_eq!(contents.matches("<line").count(), 10);
        assert!(contents.contains("middle_bottom"));
    }
}
