//! Goal-biased random sampling of the workspace

use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Uniform};

use crate::common::{AreaBounds, PlannerError, PlannerResult, Point2D};

/// Draws the goal with a fixed probability and otherwise a uniform point
/// inside the workspace bounds.
#[derive(Debug, Clone)]
pub struct GoalBiasedSampler {
    goal_bias: Bernoulli,
    x_dist: Uniform<f64>,
    y_dist: Uniform<f64>,
}

impl GoalBiasedSampler {
    pub fn new(bounds: &AreaBounds, bias_probability: f64) -> PlannerResult<Self> {
        bounds.validate()?;
        let goal_bias = Bernoulli::new(bias_probability).map_err(|_| {
            PlannerError::invalid_parameter(format!(
                "goal_bias_probability must lie in [0, 1], got {}",
                bias_probability
            ))
        })?;
        Ok(Self {
            goal_bias,
            x_dist: Uniform::new_inclusive(bounds.xmin, bounds.xmax),
            y_dist: Uniform::new_inclusive(bounds.ymin, bounds.ymax),
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, goal: Point2D, rng: &mut R) -> Point2D {
        if self.goal_bias.sample(rng) {
            goal
        } else {
            Point2D::new(self.x_dist.sample(rng), self.y_dist.sample(rng))
        }
    }
}

/// One-shot form of [`GoalBiasedSampler::sample`].
pub fn sample<R: Rng + ?Sized>(
    goal: Point2D,
    bounds: &AreaBounds,
    bias_probability: f64,
    rng: &mut R,
) -> PlannerResult<Point2D> {
    Ok(GoalBiasedSampler::new(bounds, bias_probability)?.sample(goal, rng))
}
