//! Bounded-length extension from a tree node toward a target point

use crate::common::Point2D;

/// A node that has been proposed but not yet inserted into the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub position: Point2D,
    pub parent: usize,
}

/// Move from `from` toward `toward` by at most `max_step`.
///
/// When `toward` is within reach the result is exactly `toward`, so repeated
/// steering at the same target lands on the same coordinates.
pub fn steer_point(from: &Point2D, toward: &Point2D, max_step: f64) -> Point2D {
    let delta = toward.to_vector() - from.to_vector();
    let d = delta.norm();
    if d <= max_step || !d.is_finite() {
        return *toward;
    }
    // rounding must never carry the point past the step limit
    let mut scale = max_step / d;
    loop {
        let p = Point2D::from(from.to_vector() + delta * scale);
        if from.distance(&p) <= max_step {
            return p;
        }
        scale *= 1.0 - 1e-9;
    }
}

/// Steer from the tree node `from_index` located at `from`.
pub fn steer(from_index: usize, from: &Point2D, toward: &Point2D, max_step: f64) -> Candidate {
    Candidate {
        position: steer_point(from, toward, max_step),
        parent: from_index,
    }
}
