//! Common types used throughout rt_rrt_star

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::common::error::{PlannerError, PlannerResult};

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from(tuple: (f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

impl From<[f64; 2]> for Point2D {
    fn from(a: [f64; 2]) -> Self {
        Self { x: a[0], y: a[1] }
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// Path represented as a sequence of 2D points
#[derive(Debug, Clone, PartialEq)]
pub struct Path2D {
    pub points: Vec<Point2D>,
}

impl Path2D {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: Point2D) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point2D> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point2D> {
        self.points.last()
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn total_length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.points.windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

impl Default for Path2D {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis-aligned workspace bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaBounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl AreaBounds {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        AreaBounds { xmin, xmax, ymin, ymax }
    }

    /// `[xmin, xmax, ymin, ymax]`
    pub fn from_array(area: [f64; 4]) -> Self {
        AreaBounds {
            xmin: area[0],
            xmax: area[1],
            ymin: area[2],
            ymax: area[3],
        }
    }

    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Bounds must be finite with a strictly positive extent on both axes.
    pub fn validate(&self) -> PlannerResult<()> {
        let finite = [self.xmin, self.xmax, self.ymin, self.ymax]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.xmin >= self.xmax || self.ymin >= self.ymax {
            return Err(PlannerError::InvalidBounds {
                xmin: self.xmin,
                xmax: self.xmax,
                ymin: self.ymin,
                ymax: self.ymax,
            });
        }
        Ok(())
    }
}

/// Static line-segment obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// `(start x, start y, end x, end y)`
impl From<(f64, f64, f64, f64)> for Segment {
    fn from(t: (f64, f64, f64, f64)) -> Self {
        Segment::new(Point2D::new(t.0, t.1), Point2D::new(t.2, t.3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2d_distance() {
        let p1 = Point2D::new(0.0, 0.0);
        let p2 = Point2D::new(3.0, 4.0);
        assert!((p1.distance(&p2) - 5.0).abs() < 1e-10);
        assert!((p1.distance_squared(&p2) - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_path2d_total_length() {
        let path = Path2D::from_points(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
        ]);
        assert!((path.total_length() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_bounds_validate() {
        assert!(AreaBounds::new(-1.0, 11.0, -1.0, 1.0).validate().is_ok());
        assert!(AreaBounds::new(1.0, -1.0, -1.0, 1.0).validate().is_err());
        assert!(AreaBounds::new(0.0, 0.0, -1.0, 1.0).validate().is_err());
        assert!(AreaBounds::new(0.0, f64::NAN, -1.0, 1.0).validate().is_err());
    }

    #[test]
    fn test_bounds_contains() {
        let b = AreaBounds::from_array([-10.0, 10.0, -10.0, 10.0]);
        assert!(b.contains(&Point2D::new(10.0, -10.0)));
        assert!(!b.contains(&Point2D::new(10.1, 0.0)));
    }

    #[test]
    fn test_segment_from_tuple() {
        let s: Segment = (-8.0, 1.0, -6.0, 1.0).into();
        assert_eq!(s.start, Point2D::new(-8.0, 1.0));
        assert_eq!(s.end, Point2D::new(-6.0, 1.0));
        assert!((s.length() - 2.0).abs() < 1e-12);
    }
}
