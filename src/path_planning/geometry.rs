//! Segment intersection and edge clearance against line-segment obstacles

use crate::common::{Point2D, Segment};

/// Slack applied to the bounding-box containment test so that an intersection
/// lying exactly on an axis-aligned segment is not lost to rounding.
const RANGE_EPS: f64 = 1e-9;

fn det(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.1 - a.1 * b.0
}

fn within(v: f64, a: f64, b: f64) -> bool {
    v >= a.min(b) - RANGE_EPS && v <= a.max(b) + RANGE_EPS
}

/// Determinant based test of whether segment `p1-p2` crosses segment `p3-p4`.
///
/// The intersection point of the two supporting lines is computed and then
/// checked against both segments' extents. Parallel and collinear segments
/// have a zero determinant and are reported as *not* intersecting, so an edge
/// running along an obstacle is considered clear.
pub fn segments_intersect(p1: &Point2D, p2: &Point2D, p3: &Point2D, p4: &Point2D) -> bool {
    let delta_x = (p1.x - p2.x, p3.x - p4.x);
    let delta_y = (p1.y - p2.y, p3.y - p4.y);

    let div = det(delta_x, delta_y);
    if div == 0.0 {
        return false;
    }

    let d = (det((p1.x, p1.y), (p2.x, p2.y)), det((p3.x, p3.y), (p4.x, p4.y)));
    let x = det(d, delta_x) / div;
    let y = det(d, delta_y) / div;

    within(x, p1.x, p2.x)
        && within(y, p1.y, p2.y)
        && within(x, p3.x, p4.x)
        && within(y, p3.y, p4.y)
}

/// True if the straight segment `a-b` crosses none of the obstacles.
pub fn segment_is_clear(a: &Point2D, b: &Point2D, obstacles: &[Segment]) -> bool {
    !obstacles
        .iter()
        .any(|wall| segments_intersect(a, b, &wall.start, &wall.end))
}

/// Clearance of the edge from a node to its parent.
///
/// A node without a parent has no edge to test and is always clear.
pub fn edge_is_clear(node: &Point2D, parent: Option<&Point2D>, obstacles: &[Segment]) -> bool {
    match parent {
        Some(parent) => segment_is_clear(node, parent, obstacles),
        None => true,
    }
}
