//! Tree invariants under repeated growth, rewiring and re-rooting

use approx::assert_relative_eq;
use proptest::prelude::*;
use rt_rrt_star::path_planning::{
    extract_path, GrowthOutcome, IterationBudget, RtRrtStar, RtRrtStarConfig, Tree,
};
use rt_rrt_star::{AreaBounds, Point2D, Segment};

fn scene() -> Vec<Segment> {
    vec![
        Segment::from((-0.5, -2.0, -0.5, 1.0)),
        Segment::from((0.5, -1.0, 0.5, 2.0)),
        Segment::from((-1.5, 0.5, -1.0, 0.0)),
    ]
}

fn bounds() -> AreaBounds {
    AreaBounds::new(-2.0, 2.0, -2.0, 2.0)
}

fn config() -> RtRrtStarConfig {
    RtRrtStarConfig {
        max_step: 0.3,
        neighbor_radius: 0.45,
        ..Default::default()
    }
}

fn assert_tree_consistent(tree: &Tree) {
    tree.validate().unwrap();
    assert_eq!(tree.nodes().iter().filter(|n| n.is_root()).count(), 1);
    for i in 0..tree.len() {
        let (path, chain) = extract_path(tree, i, None);
        assert!(!chain[1..].contains(&i), "node {} is its own ancestor", i);
        assert_relative_eq!(tree.cost_to_come(i), path.total_length(), epsilon = 1e-9);
    }
}

#[test]
fn rewiring_strictly_lowers_cost() {
    let mut planner = RtRrtStar::seeded(config(), bounds(), scene(), 31).unwrap();
    let mut tree = Tree::with_root(Point2D::new(-1.5, -1.5));
    let goal = Point2D::new(1.5, 1.5);
    let mut seen = 0;

    for _ in 0..3000 {
        if let GrowthOutcome::Inserted { index, rewires, .. } = planner.grow_once(&mut tree, goal) {
            for rewire in &rewires {
                assert!(rewire.new_cost < rewire.old_cost);
                assert_eq!(rewire.new_parent, index);
                assert_eq!(tree.parent(rewire.node), Some(index));
                seen += 1;
            }
        }
    }

    assert!(seen > 0, "expected at least one rewire");
    assert_tree_consistent(&tree);
}

#[test]
fn edges_never_cross_obstacles() {
    let walls = scene();
    let mut planner = RtRrtStar::seeded(config(), bounds(), walls.clone(), 8).unwrap();
    let mut tree = Tree::new();
    planner
        .plan(
            &mut tree,
            Point2D::new(-1.5, -1.5),
            Point2D::new(1.5, 1.5),
            IterationBudget::new(2000),
        )
        .unwrap();

    for node in tree.nodes() {
        if let Some(p) = node.parent {
            assert!(rt_rrt_star::path_planning::segment_is_clear(
                &node.position,
                &tree.position(p),
                &walls
            ));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_growth_and_reroot_keep_arena_valid(
        seed in any::<u64>(),
        reroots in prop::collection::vec(any::<prop::sample::Index>(), 1..6),
    ) {
        let mut planner = RtRrtStar::seeded(config(), bounds(), scene(), seed).unwrap();
        let mut tree = Tree::with_root(Point2D::new(-1.5, -1.5));
        let goal = Point2D::new(1.5, 1.5);

        for pick in reroots {
            for _ in 0..150 {
                planner.grow_once(&mut tree, goal);
            }
            let positions: Vec<Point2D> = tree.nodes().iter().map(|n| n.position).collect();

            let new_root = pick.index(tree.len());
            tree.reroot(new_root);

            prop_assert_eq!(tree.root(), Some(new_root));
            let after: Vec<Point2D> = tree.nodes().iter().map(|n| n.position).collect();
            prop_assert_eq!(positions, after);
            assert_tree_consistent(&tree);
        }
    }
}
