//! Error types for rt_rrt_star

use thiserror::Error;

/// Errors raised while configuring or invoking the planner.
///
/// Everything that can go wrong inside a single growth iteration (collision,
/// duplicate node, no feasible parent) is *not* an error: those are reported
/// as [`crate::path_planning::RejectReason`] and the loop carries on.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Workspace bounds are inverted, empty, or not finite
    #[error("Invalid bounds: x [{xmin}, {xmax}], y [{ymin}, {ymax}]")]
    InvalidBounds {
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
    },

    /// Obstacle segment with non-finite coordinates
    #[error("Invalid obstacle: {0}")]
    InvalidObstacle(String),

    /// Start and goal coincide
    #[error("Start equals goal at ({x}, {y})")]
    StartEqualsGoal { x: f64, y: f64 },

    /// A point lies outside the workspace
    #[error("Point ({x}, {y}) lies outside the workspace")]
    OutOfBounds { x: f64, y: f64 },

    /// Warm start requested at a position that is not a tree node
    #[error("Start ({x}, {y}) does not match any node of the tree")]
    StartNotInTree { x: f64, y: f64 },

    /// Tree structure violates an arena invariant
    #[error("Corrupt tree: {0}")]
    CorruptTree(String),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Visualization error
    #[error("Visualization error: {0}")]
    Visualization(String),
}

impl PlannerError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        PlannerError::InvalidParameter(msg.into())
    }
}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlannerError::StartEqualsGoal { x: 1.0, y: 2.0 };
        assert_eq!(format!("{}", err), "Start equals goal at (1, 2)");

        let err = PlannerError::invalid_parameter("max_step must be positive");
        assert_eq!(format!("{}", err), "Invalid parameter: max_step must be positive");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PlannerError = io_err.into();
        assert!(matches!(err, PlannerError::Io(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let parse_err = toml::from_str::<toml::Value>("max_step = = 1").unwrap_err();
        let err: PlannerError = parse_err.into();
        assert!(matches!(err, PlannerError::ConfigParse(_)));
    }
}
