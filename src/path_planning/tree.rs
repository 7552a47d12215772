//! Append-only node arena shared across planning calls
//!
//! Parents are plain indices into the same arena, so re-rooting and rewiring
//! only ever reassign `Option<usize>` values. Cost-to-come is derived on
//! demand by walking parent links, which keeps it consistent no matter how
//! often links are rewired or reversed.

use crate::common::{PlannerError, PlannerResult, Point2D};

/// Tree node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub position: Point2D,
    pub parent: Option<usize>,
}

impl Node {
    pub fn new(position: Point2D, parent: Option<usize>) -> Self {
        Node { position, parent }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Node arena
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Empty tree for a cold start.
    pub fn new() -> Self {
        Tree { nodes: Vec::new() }
    }

    pub fn with_root(root: Point2D) -> Self {
        Tree {
            nodes: vec![Node::new(root, None)],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn position(&self, index: usize) -> Point2D {
        self.nodes[index].position
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.nodes[index].parent
    }

    /// Index of the first parentless node.
    pub fn root(&self) -> Option<usize> {
        self.nodes.iter().position(Node::is_root)
    }

    /// Index of the node sitting exactly at `position`.
    pub fn index_of(&self, position: &Point2D) -> Option<usize> {
        self.nodes.iter().position(|n| n.position == *position)
    }

    pub fn contains(&self, position: &Point2D) -> bool {
        self.index_of(position).is_some()
    }

    /// Parent chain from `index` up to and including the root.
    ///
    /// The walk is capped at the arena size so a corrupt (cyclic) arena
    /// cannot hang the caller.
    pub fn chain_to_root(&self, index: usize) -> Vec<usize> {
        let mut chain = vec![index];
        let mut current = index;
        while let Some(parent) = self.nodes[current].parent {
            if chain.len() > self.nodes.len() {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Accumulated edge length from the root to `index`.
    pub fn cost_to_come(&self, index: usize) -> f64 {
        self.chain_to_root(index)
            .windows(2)
            .map(|w| self.nodes[w[0]].position.distance(&self.nodes[w[1]].position))
            .sum()
    }

    /// Cost `position` would have if it hung below `parent`.
    pub fn cost_via(&self, parent: usize, position: &Point2D) -> f64 {
        self.cost_to_come(parent) + self.nodes[parent].position.distance(position)
    }

    /// Straight-line distance from `index` to `goal`.
    pub fn cost_to_go(&self, index: usize, goal: &Point2D) -> f64 {
        self.nodes[index].position.distance(goal)
    }

    /// True if `ancestor` lies on the parent chain of `index` (or is `index`).
    pub fn is_ancestor(&self, ancestor: usize, index: usize) -> bool {
        self.chain_to_root(index).contains(&ancestor)
    }

    pub(crate) fn push(&mut self, position: Point2D, parent: Option<usize>) -> usize {
        self.nodes.push(Node::new(position, parent));
        self.nodes.len() - 1
    }

    pub(crate) fn set_parent(&mut self, index: usize, parent: Option<usize>) {
        self.nodes[index].parent = parent;
    }

    /// Make `new_root` the root by reversing every edge between it and the
    /// current root. Returns the number of edges flipped.
    ///
    /// Node positions and the node count are untouched; the old root ends up
    /// a descendant of `new_root`.
    pub fn reroot(&mut self, new_root: usize) -> usize {
        let chain = self.chain_to_root(new_root);
        for pair in chain.windows(2) {
            let (child, parent) = (pair[0], pair[1]);
            self.nodes[parent].parent = Some(child);
        }
        self.nodes[new_root].parent = None;
        chain.len() - 1
    }

    /// Check the arena invariants: exactly one root, parent indices in range,
    /// no cycles and no two nodes at the same coordinates.
    pub fn validate(&self) -> PlannerResult<()> {
        if self.nodes.is_empty() {
            return Ok(());
        }

        let roots = self.nodes.iter().filter(|n| n.is_root()).count();
        if roots != 1 {
            return Err(PlannerError::CorruptTree(format!(
                "expected exactly one root, found {}",
                roots
            )));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                if parent >= self.nodes.len() {
                    return Err(PlannerError::CorruptTree(format!(
                        "node {} points at missing parent {}",
                        i, parent
                    )));
                }
            }
        }

        for i in 0..self.nodes.len() {
            let chain = self.chain_to_root(i);
            let last = chain[chain.len() - 1];
            if !self.nodes[last].is_root() {
                return Err(PlannerError::CorruptTree(format!(
                    "node {} is part of a parent cycle",
                    i
                )));
            }
        }

        let mut positions: Vec<(f64, f64)> =
            self.nodes.iter().map(|n| (n.position.x, n.position.y)).collect();
        positions.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        if let Some(w) = positions.windows(2).find(|w| w[0] == w[1]) {
            return Err(PlannerError::CorruptTree(format!(
                "duplicate node at ({}, {})",
                w[0].0, w[0].1
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 0 -> 1 -> 2 -> 3 along the x axis, plus 4 branching off 1.
    fn line_tree() -> Tree {
        let mut tree = Tree::with_root(Point2D::new(0.0, 0.0));
        tree.push(Point2D::new(1.0, 0.0), Some(0));
        tree.push(Point2D::new(2.0, 0.0), Some(1));
        tree.push(Point2D::new(3.0, 0.0), Some(2));
        tree.push(Point2D::new(1.0, 1.0), Some(1));
        tree
    }

    #[test]
    fn test_cost_to_come_sums_edges() {
        let tree = line_tree();
        assert_relative_eq!(tree.cost_to_come(0), 0.0);
        assert_relative_eq!(tree.cost_to_come(3), 3.0, epsilon = 1e-12);
        assert_relative_eq!(tree.cost_to_come(4), 2.0, epsilon = 1e-12);
        assert_relative_eq!(tree.cost_via(2, &Point2D::new(2.0, 2.0)), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cost_to_go() {
        let tree = line_tree();
        assert_relative_eq!(tree.cost_to_go(3, &Point2D::new(3.0, 4.0)), 4.0);
    }

    #[test]
    fn test_index_lookup() {
        let tree = line_tree();
        assert_eq!(tree.index_of(&Point2D::new(2.0, 0.0)), Some(2));
        assert_eq!(tree.index_of(&Point2D::new(2.0, 0.5)), None);
        assert_eq!(tree.root(), Some(0));
    }

    #[test]
    fn test_reroot_two_edges_deep() {
        let mut tree = line_tree();
        let before: Vec<Point2D> = tree.nodes().iter().map(|n| n.position).collect();

        let flipped = tree.reroot(2);

        assert_eq!(flipped, 2);
        assert_eq!(tree.root(), Some(2));
        assert_eq!(tree.parent(1), Some(2));
        assert_eq!(tree.parent(0), Some(1));
        assert_eq!(tree.parent(3), Some(2));
        assert_eq!(tree.parent(4), Some(1));
        assert!(tree.is_ancestor(2, 0));
        let after: Vec<Point2D> = tree.nodes().iter().map(|n| n.position).collect();
        assert_eq!(before, after);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_reroot_at_root_is_noop() {
        let mut tree = line_tree();
        assert_eq!(tree.reroot(0), 0);
        assert_eq!(tree.root(), Some(0));
    }

    #[test]
    fn test_validate_detects_corruption() {
        let mut tree = line_tree();
        tree.set_parent(0, Some(3));
        assert!(matches!(tree.validate(), Err(PlannerError::CorruptTree(_))));

        let mut tree = line_tree();
        tree.push(Point2D::new(3.0, 0.0), Some(2));
        assert!(tree.validate().is_err());
    }
}
