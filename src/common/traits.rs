//! Common traits defining the seams of the planner

use crate::common::error::PlannerError;
use crate::path_planning::TreeSnapshot;

/// Termination signal checked once per growth iteration.
///
/// The growth loop never reads a clock itself; whatever decides "time is up"
/// is handed in by the caller through this trait.
pub trait Budget {
    /// Returns true once no further growth iterations may run.
    fn exhausted(&mut self) -> bool;
}

impl<B: Budget + ?Sized> Budget for &mut B {
    fn exhausted(&mut self) -> bool {
        (**self).exhausted()
    }
}

/// Receives read-only snapshots of the planner state between planning calls.
pub trait TreeObserver {
    fn observe(&mut self, snapshot: &TreeSnapshot<'_>) -> Result<(), PlannerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown(usize);

    impl Budget for Countdown {
        fn exhausted(&mut self) -> bool {
            if self.0 == 0 {
                return true;
            }
            self.0 -= 1;
            false
        }
    }

    fn drain<B: Budget>(mut budget: B) -> usize {
        let mut n = 0;
        while !budget.exhausted() {
            n += 1;
        }
        n
    }

    #[test]
    fn test_budget_through_mut_ref() {
        let mut countdown = Countdown(3);
        assert_eq!(drain(&mut countdown), 3);
        assert!(countdown.exhausted());
    }
}
