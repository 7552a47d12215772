//! Budgets that bound the growth loop of a planning call

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::common::Budget;

/// Allows a fixed number of growth iterations.
#[derive(Debug, Clone)]
pub struct IterationBudget {
    remaining: usize,
}

impl IterationBudget {
    pub fn new(iterations: usize) -> Self {
        Self { remaining: iterations }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl Budget for IterationBudget {
    fn exhausted(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }
}

/// Wall-clock deadline chosen by the caller.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    pub fn from_now(budget: Duration) -> Self {
        Self { at: Instant::now() + budget }
    }

    /// `None` when the deadline is not representable as an `Instant`.
    pub fn checked_from_now(budget: Duration) -> Option<Self> {
        Instant::now().checked_add(budget).map(Self::at)
    }
}

impl Budget for Deadline {
    fn exhausted(&mut self) -> bool {
        Instant::now() >= self.at
    }
}

/// Cooperative cancellation shared with another owner.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Budget for CancelFlag {
    fn exhausted(&mut self) -> bool {
        self.is_cancelled()
    }
}

/// Exhausted as soon as either budget is.
#[derive(Debug, Clone)]
pub struct FirstOf<A, B>(pub A, pub B);

impl<A: Budget, B: Budget> Budget for FirstOf<A, B> {
    fn exhausted(&mut self) -> bool {
        self.0.exhausted() || self.1.exhausted()
    }
}
