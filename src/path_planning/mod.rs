// Path Planning module: real-time RRT* and its building blocks

pub mod budget;
pub mod config;
pub mod geometry;
pub mod rt_rrt_star;
pub mod sampler;
pub mod snapshot;
pub mod spatial;
pub mod steering;
pub mod tree;

pub use budget::*;
pub use config::*;
pub use geometry::{edge_is_clear, segment_is_clear, segments_intersect};
pub use rt_rrt_star::*;
pub use sampler::GoalBiasedSampler;
pub use snapshot::TreeSnapshot;
pub use spatial::{nearest, neighbors_within};
pub use steering::{steer, steer_point, Candidate};
pub use tree::{Node, Tree};
