//! RT-RRT* (real-time RRT*) path planning
//!
//! Anytime variant of RRT* that keeps its tree between planning calls. Each
//! call moves the root to the agent's current position, grows the tree until
//! the caller's budget runs out, connects the goal if it can and returns the
//! best path found so far together with the node the agent should move to
//! next.
//!
//! Obstacles are static line segments; edges are straight lines.

use log::{debug, info, trace, warn};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{AreaBounds, Budget, Path2D, PlannerError, PlannerResult, Point2D, Segment};
use crate::path_planning::budget::Deadline;
use crate::path_planning::config::RtRrtStarConfig;
use crate::path_planning::geometry::{edge_is_clear, segment_is_clear};
use crate::path_planning::sampler::GoalBiasedSampler;
use crate::path_planning::snapshot::TreeSnapshot;
use crate::path_planning::spatial::{nearest, neighbors_within};
use crate::path_planning::steering::steer;
use crate::path_planning::tree::Tree;

/// Why a growth iteration added nothing to the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Steered edge crosses an obstacle
    Collision,
    /// Neighborhood already holds `kmax` or more nodes
    NeighborCapExceeded,
    /// No neighbor reaches the candidate with a clear edge
    NoFeasibleParent,
    /// A node already sits at the candidate's exact coordinates
    DuplicateNode,
}

/// Parent reassignment performed while rewiring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rewire {
    pub node: usize,
    pub old_parent: Option<usize>,
    pub new_parent: usize,
    pub old_cost: f64,
    pub new_cost: f64,
}

/// Result of a single growth iteration
#[derive(Debug, Clone, PartialEq)]
pub enum GrowthOutcome {
    Inserted {
        index: usize,
        parent: usize,
        rewires: Vec<Rewire>,
    },
    Rejected(RejectReason),
}

/// Per-call growth counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthStats {
    pub iterations: usize,
    pub inserted: usize,
    pub collisions: usize,
    pub neighbor_cap: usize,
    pub no_feasible_parent: usize,
    pub duplicates: usize,
    pub rewires: usize,
}

impl GrowthStats {
    pub fn record(&mut self, outcome: &GrowthOutcome) {
        self.iterations += 1;
        match outcome {
            GrowthOutcome::Inserted { rewires, .. } => {
                self.inserted += 1;
                self.rewires += rewires.len();
            }
            GrowthOutcome::Rejected(RejectReason::Collision) => self.collisions += 1,
            GrowthOutcome::Rejected(RejectReason::NeighborCapExceeded) => self.neighbor_cap += 1,
            GrowthOutcome::Rejected(RejectReason::NoFeasibleParent) => {
                self.no_feasible_parent += 1
            }
            GrowthOutcome::Rejected(RejectReason::DuplicateNode) => self.duplicates += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.iterations - self.inserted
    }
}

/// Outcome of a planning call
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    /// True if the goal was connected to the tree
    pub found: bool,
    /// Root first; ends at the goal when found, else at the node closest to it
    pub path: Path2D,
    /// Tree index of the last tree node on the path
    pub terminal: usize,
    /// Node the agent should advance to before the next call
    pub next_root: usize,
    pub next_root_position: Point2D,
    pub stats: GrowthStats,
}

/// RT-RRT* planner
pub struct RtRrtStar<R = StdRng> {
    config: RtRrtStarConfig,
    bounds: AreaBounds,
    obstacles: Vec<Segment>,
    sampler: GoalBiasedSampler,
    rng: R,
    last_sample: Option<Point2D>,
}

impl RtRrtStar<StdRng> {
    /// Create a planner with an entropy-seeded random source
    pub fn new<I, S>(config: RtRrtStarConfig, bounds: AreaBounds, obstacles: I) -> PlannerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        Self::with_rng(config, bounds, obstacles, StdRng::from_entropy())
    }

    /// Create a planner whose random source is seeded for reproducible runs
    pub fn seeded<I, S>(
        config: RtRrtStarConfig,
        bounds: AreaBounds,
        obstacles: I,
        seed: u64,
    ) -> PlannerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        Self::with_rng(config, bounds, obstacles, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RtRrtStar<R> {
    pub fn with_rng<I, S>(
        config: RtRrtStarConfig,
        bounds: AreaBounds,
        obstacles: I,
        rng: R,
    ) -> PlannerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        config.validate()?;
        bounds.validate()?;
        let obstacles: Vec<Segment> = obstacles.into_iter().map(Into::into).collect();
        if let Some(bad) = obstacles
            .iter()
            .find(|s| !(s.start.is_finite() && s.end.is_finite()))
        {
            return Err(PlannerError::InvalidObstacle(format!("{:?}", bad)));
        }
        if obstacles.is_empty() {
            debug!("Planner created without obstacles");
        }
        let sampler = GoalBiasedSampler::new(&bounds, config.goal_bias_probability)?;

        Ok(RtRrtStar {
            config,
            bounds,
            obstacles,
            sampler,
            rng,
            last_sample: None,
        })
    }

    pub fn config(&self) -> &RtRrtStarConfig {
        &self.config
    }

    pub fn bounds(&self) -> &AreaBounds {
        &self.bounds
    }

    pub fn obstacles(&self) -> &[Segment] {
        &self.obstacles
    }

    /// Last point drawn by the sampler
    pub fn last_sample(&self) -> Option<Point2D> {
        self.last_sample
    }

    /// Run one planning call.
    ///
    /// An empty `tree` is a cold start rooted at `start`. Otherwise `start`
    /// must coincide with a node of `tree` (normally the previous call's
    /// `next_root_position`), which becomes the new root. Growth stops the
    /// first time `budget` reports exhaustion.
    pub fn plan<B: Budget>(
        &mut self,
        tree: &mut Tree,
        start: Point2D,
        goal: Point2D,
        mut budget: B,
    ) -> PlannerResult<PlanOutcome> {
        self.check_endpoints(&start, &goal)?;
        self.prepare_root(tree, start)?;

        let mut stats = GrowthStats::default();
        while !budget.exhausted() {
            let outcome = self.grow_once(tree, goal);
            stats.record(&outcome);
        }
        if stats.inserted == 0 {
            warn!(
                "No node inserted during planning call ({} iterations)",
                stats.iterations
            );
        }

        let connection = self.connect_goal(tree, goal);
        let (found, terminal) = match connection {
            Some(index) => (true, index),
            None => (false, closest_to_goal(tree, &goal)),
        };
        let (path, chain) = extract_path(tree, terminal, if found { Some(goal) } else { None });
        let next_root = next_root_index(&chain);

        debug!(
            "Planning call: {} iterations, {} inserted, {} rewires, {} rejected \
             (collision {}, kmax {}, no parent {}, duplicate {}), tree size {}, found {}",
            stats.iterations,
            stats.inserted,
            stats.rewires,
            stats.rejected(),
            stats.collisions,
            stats.neighbor_cap,
            stats.no_feasible_parent,
            stats.duplicates,
            tree.len(),
            found
        );

        Ok(PlanOutcome {
            found,
            path,
            terminal,
            next_root,
            next_root_position: tree.position(next_root),
            stats,
        })
    }

    /// [`plan`](Self::plan) bounded by the configured time budget, measured
    /// from the moment of the call.
    pub fn plan_for_time_budget(
        &mut self,
        tree: &mut Tree,
        start: Point2D,
        goal: Point2D,
    ) -> PlannerResult<PlanOutcome> {
        let budget = self.config.budget_duration()?;
        let deadline = Deadline::checked_from_now(budget).ok_or_else(|| {
            PlannerError::invalid_parameter(format!("time_budget {:?} overflows the clock", budget))
        })?;
        self.plan(tree, start, goal, deadline)
    }

    /// View of the current state for an observer.
    pub fn snapshot<'a>(
        &'a self,
        tree: &'a Tree,
        start: Point2D,
        goal: Point2D,
        path: Option<&'a Path2D>,
    ) -> TreeSnapshot<'a> {
        TreeSnapshot {
            tree,
            obstacles: &self.obstacles,
            bounds: self.bounds,
            start,
            goal,
            sample: self.last_sample,
            path,
        }
    }

    /// Sample a point and try to extend the tree toward it.
    pub fn grow_once(&mut self, tree: &mut Tree, goal: Point2D) -> GrowthOutcome {
        let sample = self.sampler.sample(goal, &mut self.rng);
        self.last_sample = Some(sample);
        self.extend_toward(tree, &sample)
    }

    /// One RRT* growth step toward `sample`: steer, validate, choose the
    /// cheapest collision-free parent in the neighborhood, insert, rewire.
    pub fn extend_toward(&self, tree: &mut Tree, sample: &Point2D) -> GrowthOutcome {
        let nearest_ind = match nearest(sample, tree.nodes()) {
            Some(i) => i,
            None => return GrowthOutcome::Rejected(RejectReason::NoFeasibleParent),
        };
        let candidate = steer(
            nearest_ind,
            &tree.position(nearest_ind),
            sample,
            self.config.max_step,
        );
        let position = candidate.position;

        let nearest_pos = tree.position(candidate.parent);
        if !edge_is_clear(&position, Some(&nearest_pos), &self.obstacles) {
            trace!("Rejected ({}, {}): collision", position.x, position.y);
            return GrowthOutcome::Rejected(RejectReason::Collision);
        }

        let near_inds = neighbors_within(&position, self.config.neighbor_radius, tree.nodes());
        if near_inds.len() >= self.config.kmax {
            trace!(
                "Rejected ({}, {}): {} neighbors",
                position.x,
                position.y,
                near_inds.len()
            );
            return GrowthOutcome::Rejected(RejectReason::NeighborCapExceeded);
        }

        let parent = match self.choose_parent(tree, &position, &near_inds) {
            Some(p) => p,
            None => {
                trace!("Rejected ({}, {}): no feasible parent", position.x, position.y);
                return GrowthOutcome::Rejected(RejectReason::NoFeasibleParent);
            }
        };

        if tree.contains(&position) {
            trace!("Rejected ({}, {}): duplicate", position.x, position.y);
            return GrowthOutcome::Rejected(RejectReason::DuplicateNode);
        }

        let index = tree.push(position, Some(parent));
        let rewires = self.rewire(tree, index, &near_inds);
        trace!(
            "Inserted node {} at ({}, {}) under {}, {} rewires",
            index,
            position.x,
            position.y,
            parent,
            rewires.len()
        );

        GrowthOutcome::Inserted {
            index,
            parent,
            rewires,
        }
    }

    /// Neighbor giving `position` the lowest cost-to-come over a clear edge.
    fn choose_parent(&self, tree: &Tree, position: &Point2D, near_inds: &[usize]) -> Option<usize> {
        near_inds
            .iter()
            .copied()
            .filter(|&i| segment_is_clear(&tree.position(i), position, &self.obstacles))
            .min_by_key(|&i| OrderedFloat(tree.cost_via(i, position)))
    }

    /// Hang neighbors below `new_index` wherever that strictly shortens them.
    fn rewire(&self, tree: &mut Tree, new_index: usize, near_inds: &[usize]) -> Vec<Rewire> {
        let new_pos = tree.position(new_index);
        let mut rewires = Vec::new();

        for &i in near_inds {
            let near_pos = tree.position(i);
            let old_cost = tree.cost_to_come(i);
            let new_cost = tree.cost_via(new_index, &near_pos);

            if new_cost >= old_cost {
                continue;
            }
            if !segment_is_clear(&new_pos, &near_pos, &self.obstacles) {
                continue;
            }
            // hanging an ancestor below its own descendant would close a cycle
            if tree.is_ancestor(i, new_index) {
                continue;
            }

            let old_parent = tree.parent(i);
            tree.set_parent(i, Some(new_index));
            rewires.push(Rewire {
                node: i,
                old_parent,
                new_parent: new_index,
                old_cost,
                new_cost,
            });
        }

        rewires
    }

    /// Cheapest node within `max_step` of the goal with a clear edge to it.
    ///
    /// If a node already sits exactly on the goal and hanging it below the
    /// chosen node is strictly cheaper, it is re-parented there.
    pub fn connect_goal(&self, tree: &mut Tree, goal: Point2D) -> Option<usize> {
        let best = tree
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.position.distance(&goal) <= self.config.max_step)
            .filter(|(_, n)| segment_is_clear(&n.position, &goal, &self.obstacles))
            .map(|(i, _)| i)
            .min_by_key(|&i| OrderedFloat(tree.cost_to_come(i)))?;

        if let Some(goal_ind) = tree.index_of(&goal) {
            if goal_ind != best
                && tree.cost_via(best, &goal) < tree.cost_to_come(goal_ind)
                && !tree.is_ancestor(goal_ind, best)
            {
                tree.set_parent(goal_ind, Some(best));
            }
        }

        info!(
            "Goal ({}, {}) connected through node {} (cost {:.3})",
            goal.x,
            goal.y,
            best,
            tree.cost_to_come(best)
        );
        Some(best)
    }

    fn check_endpoints(&self, start: &Point2D, goal: &Point2D) -> PlannerResult<()> {
        if !start.is_finite() || !goal.is_finite() {
            return Err(PlannerError::invalid_parameter(format!(
                "start {:?} and goal {:?} must be finite",
                start, goal
            )));
        }
        if start == goal {
            return Err(PlannerError::StartEqualsGoal {
                x: start.x,
                y: start.y,
            });
        }
        if !self.bounds.contains(start) {
            return Err(PlannerError::OutOfBounds {
                x: start.x,
                y: start.y,
            });
        }
        if !self.bounds.contains(goal) {
            warn!("Goal ({}, {}) lies outside the workspace", goal.x, goal.y);
        }
        Ok(())
    }

    /// Seed an empty tree with `start`, or move the root of a warm tree to it.
    fn prepare_root(&self, tree: &mut Tree, start: Point2D) -> PlannerResult<()> {
        if tree.is_empty() {
            tree.push(start, None);
            return Ok(());
        }
        let start_ind = tree.index_of(&start).ok_or(PlannerError::StartNotInTree {
            x: start.x,
            y: start.y,
        })?;
        if tree.parent(start_ind).is_some() {
            let flipped = tree.reroot(start_ind);
            info!(
                "Re-rooted tree at node {} ({}, {}), {} edges reversed",
                start_ind, start.x, start.y, flipped
            );
        }
        Ok(())
    }
}

/// Node with the smallest straight-line distance to `goal`.
fn closest_to_goal(tree: &Tree, goal: &Point2D) -> usize {
    nearest(goal, tree.nodes()).unwrap_or(0)
}

/// Walk from `terminal` to the root and return the root-first path, with
/// `goal` appended when given, along with the tree indices visited.
pub fn extract_path(tree: &Tree, terminal: usize, goal: Option<Point2D>) -> (Path2D, Vec<usize>) {
    let mut chain = tree.chain_to_root(terminal);
    chain.reverse();

    let mut path = Path2D::from_points(chain.iter().map(|&i| tree.position(i)).collect());
    if let Some(goal) = goal {
        if path.last() != Some(&goal) {
            path.push(goal);
        }
    }
    (path, chain)
}

/// Second node from the root end of `chain`, or its only node.
pub fn next_root_index(chain: &[usize]) -> usize {
    match chain {
        [] => 0,
        [only] => *only,
        [_, next, ..] => *next,
    }
}
