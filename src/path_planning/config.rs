//! Planner configuration
//!
//! [`RtRrtStarConfig`] carries compiled defaults and can be overridden from a
//! TOML document. Keys missing from the document keep their defaults, so a
//! file naming only `max_step` is valid:
//!
//! ```toml
//! max_step = 0.5
//! time_budget = 0.25   # seconds
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::common::{PlannerError, PlannerResult};

pub const DEFAULT_MAX_STEP: f64 = 0.2;
pub const DEFAULT_NEIGHBOR_RADIUS: f64 = 0.3;
pub const DEFAULT_KMAX: usize = 100;
pub const DEFAULT_GOAL_BIAS_PROBABILITY: f64 = 0.05;
pub const DEFAULT_TIME_BUDGET_SECS: f64 = 0.5;
/// Upper bound on `time_budget` [s]
pub const MAX_TIME_BUDGET_SECS: f64 = 86_400.0;

/// Configuration for the RT-RRT* planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtRrtStarConfig {
    /// Maximum extension length per growth step
    pub max_step: f64,
    /// Radius of the neighborhood used for parent selection and rewiring
    pub neighbor_radius: f64,
    /// Iterations whose neighborhood holds at least this many nodes are dropped
    pub kmax: usize,
    /// Probability of sampling the goal instead of a uniform point
    pub goal_bias_probability: f64,
    /// Growth time per planning call [s]
    pub time_budget: f64,
}

impl Default for RtRrtStarConfig {
    fn default() -> Self {
        Self {
            max_step: DEFAULT_MAX_STEP,
            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
            kmax: DEFAULT_KMAX,
            goal_bias_probability: DEFAULT_GOAL_BIAS_PROBABILITY,
            time_budget: DEFAULT_TIME_BUDGET_SECS,
        }
    }
}

impl RtRrtStarConfig {
    pub fn from_toml_str(s: &str) -> PlannerResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> PlannerResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("Loaded planner config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn budget_duration(&self) -> PlannerResult<Duration> {
        Duration::try_from_secs_f64(self.time_budget).map_err(|e| {
            PlannerError::invalid_parameter(format!("time_budget {}: {}", self.time_budget, e))
        })
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if !(self.max_step.is_finite() && self.max_step > 0.0) {
            return Err(PlannerError::invalid_parameter(format!(
                "max_step must be positive and finite, got {}",
                self.max_step
            )));
        }
        if !(self.neighbor_radius.is_finite() && self.neighbor_radius > 0.0) {
            return Err(PlannerError::invalid_parameter(format!(
                "neighbor_radius must be positive and finite, got {}",
                self.neighbor_radius
            )));
        }
        if self.kmax == 0 {
            return Err(PlannerError::invalid_parameter("kmax must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.goal_bias_probability) {
            return Err(PlannerError::invalid_parameter(format!(
                "goal_bias_probability must lie in [0, 1], got {}",
                self.goal_bias_probability
            )));
        }
        if !(self.time_budget.is_finite() && self.time_budget > 0.0) {
            return Err(PlannerError::invalid_parameter(format!(
                "time_budget must be positive and finite, got {}",
                self.time_budget
            )));
        }
        if self.time_budget > MAX_TIME_BUDGET_SECS {
            return Err(PlannerError::invalid_parameter(format!(
                "time_budget must not exceed {} s, got {}",
                MAX_TIME_BUDGET_SECS, self.time_budget
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RtRrtStarConfig::default();
        assert_eq!(config.max_step, 0.2);
        assert_eq!(config.neighbor_radius, 0.3);
        assert_eq!(config.kmax, 100);
        assert_eq!(config.goal_bias_probability, 0.05);
        assert_eq!(config.budget_duration().unwrap(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RtRrtStarConfig::from_toml_str("max_step = 1.0\nkmax = 40\n").unwrap();
        assert_eq!(config.max_step, 1.0);
        assert_eq!(config.kmax, 40);
        assert_eq!(config.neighbor_radius, DEFAULT_NEIGHBOR_RADIUS);
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        assert!(matches!(
            RtRrtStarConfig::from_toml_str("neighbor_radius = -1.0"),
            Err(PlannerError::InvalidParameter(_))
        ));
        assert!(matches!(
            RtRrtStarConfig::from_toml_str("kmax = \"many\""),
            Err(PlannerError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_validate() {
        let bad = [
            RtRrtStarConfig {
                max_step: 0.0,
                ..Default::default()
            },
            RtRrtStarConfig {
                kmax: 0,
                ..Default::default()
            },
            RtRrtStarConfig {
                goal_bias_probability: 1.2,
                ..Default::default()
            },
            RtRrtStarConfig {
                time_budget: f64::NAN,
                ..Default::default()
            },
        ];
        for config in bad.iter() {
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn test_oversized_time_budget() {
        let config = RtRrtStarConfig {
            time_budget: 1e20,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlannerError::InvalidParameter(_))
        ));
        assert!(matches!(
            config.budget_duration(),
            Err(PlannerError::InvalidParameter(_))
        ));
        assert!(RtRrtStarConfig::from_toml_str("time_budget = 1e20").is_err());

        let longest = RtRrtStarConfig {
            time_budget: MAX_TIME_BUDGET_SECS,
            ..Default::default()
        };
        assert!(longest.validate().is_ok());
        assert_eq!(longest.budget_duration().unwrap(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_missing_file() {
        let err = RtRrtStarConfig::from_toml_file("/nonexistent/planner.toml").unwrap_err();
        assert!(matches!(err, PlannerError::Io(_)));
    }
}
