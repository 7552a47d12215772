//! Nearest-node and radius-neighborhood lookups
//!
//! Both queries scan the arena linearly. Results only depend on node
//! positions and arena order, so a spatial index can replace the scan later
//! without changing what callers observe.

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::common::Point2D;
use crate::path_planning::tree::Node;

/// Index of the node closest to `point`; ties go to the lowest index.
///
/// Returns `None` only for an empty arena.
pub fn nearest(point: &Point2D, nodes: &[Node]) -> Option<usize> {
    nodes
        .iter()
        .position_min_by_key(|n| OrderedFloat(n.position.distance_squared(point)))
}

/// Indices of every node within `radius` of `point` (inclusive), in arena order.
pub fn neighbors_within(point: &Point2D, radius: f64, nodes: &[Node]) -> Vec<usize> {
    let r2 = radius * radius;
    nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.position.distance_squared(point) <= r2)
        .map(|(i, _)| i)
        .collect()
}
