//! rt_rrt_star - real-time RRT* path planning in Rust
//!
//! An anytime, incremental sampling-based planner for a bounded 2D workspace
//! with static line-segment obstacles. The tree survives between planning
//! calls: each call re-roots it at the agent's position, grows it until the
//! caller's budget runs out, and returns the best path found so far.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod path_planning;

// Re-export common types for convenience
pub use common::{AreaBounds, Path2D, Point2D, Segment};
pub use common::{Budget, TreeObserver};
pub use common::{PlannerError, PlannerResult};
pub use path_planning::{PlanOutcome, RtRrtStar, RtRrtStarConfig, Tree};
