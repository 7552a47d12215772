//! Read-only view of the planner state handed to observers between calls

use crate::common::{AreaBounds, Path2D, Point2D, Segment};
use crate::path_planning::tree::Tree;

#[derive(Debug, Clone, Copy)]
pub struct TreeSnapshot<'a> {
    pub tree: &'a Tree,
    pub obstacles: &'a [Segment],
    pub bounds: AreaBounds,
    /// Start handed to the planning call
    pub start: Point2D,
    pub goal: Point2D,
    /// Last point drawn by the sampler, if any
    pub sample: Option<Point2D>,
    pub path: Option<&'a Path2D>,
}

impl<'a> TreeSnapshot<'a> {
    /// Position of the current root.
    pub fn root(&self) -> Option<Point2D> {
        self.tree.root().map(|i| self.tree.position(i))
    }

    /// Every parent edge as `(child, parent)` positions.
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + 'a {
        let tree = self.tree;
        tree.nodes()
            .iter()
            .filter_map(move |n| n.parent.map(|p| (n.position, tree.position(p))))
    }
}
