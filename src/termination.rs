//! Run budgets and stop reasons shared by both engines.
//!
//! Budgets are polled, not preemptive: each engine checks once per outer
//! iteration (GRASP) or generation (GA), so a slow iteration can overrun the
//! time limit by up to its own duration.

use crate::target::TargetTracker;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// Wall-clock budget elapsed.
    TimeLimit,
    /// Every target threshold was crossed.
    TargetsReached,
    /// The configured iteration or generation cap was hit.
    IterationLimit,
    /// The cancellation flag was raised.
    Cancelled,
    /// A caller-supplied end-of-generation hook asked to stop.
    Requested,
}

/// Wall-clock, iteration and cancellation limits for one run.
#[derive(Debug, Clone)]
pub struct Budget {
    start: Instant,
    time_limit: Duration,
    max_iterations: Option<usize>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Budget {
    /// Starts the clock.
    pub fn start(
        time_limit: Duration,
        max_iterations: Option<usize>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            start: Instant::now(),
            time_limit,
            max_iterations,
            cancel,
        }
    }

    /// Time since [`start`](Self::start).
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns the reason to stop before running iteration `completed + 1`,
    /// or `None` to keep going.
    ///
    /// Checked in order: targets, cancellation, time, iteration cap.
    pub fn check(&self, completed: usize, targets: &TargetTracker) -> Option<StopReason> {
        if targets.is_exhausted() {
            return Some(StopReason::TargetsReached);
        }
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(StopReason::Cancelled);
            }
        }
        if self.elapsed() >= self.time_limit {
            return Some(StopReason::TimeLimit);
        }
        if let Some(max) = self.max_iterations {
            if completed >= max {
                return Some(StopReason::IterationLimit);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_until_iteration_cap() {
        let budget = Budget::start(Duration::from_secs(60), Some(3), None);
        let targets = TargetTracker::new(None);
        assert_eq!(budget.check(0, &targets), None);
        assert_eq!(budget.check(2, &targets), None);
        assert_eq!(budget.check(3, &targets), Some(StopReason::IterationLimit));
    }

    #[test]
    fn test_targets_take_precedence() {
        let budget = Budget::start(Duration::ZERO, Some(0), None);
        let targets = TargetTracker::new(Some(vec![]));
        assert_eq!(budget.check(0, &targets), Some(StopReason::TargetsReached));
    }

    #[test]
    fn test_time_limit() {
        let budget = Budget::start(Duration::ZERO, None, None);
        let targets = TargetTracker::new(None);
        assert_eq!(budget.check(0, &targets), Some(StopReason::TimeLimit));
    }

    #[test]
    fn test_cancellation() {
        let flag = Arc::new(AtomicBool::new(false));
        let budget = Budget::start(Duration::from_secs(60), None, Some(flag.clone()));
        let targets = TargetTracker::new(None);
        assert_eq!(budget.check(5, &targets), None);
        flag.store(true, Ordering::Relaxed);
        assert_eq!(budget.check(5, &targets), Some(StopReason::Cancelled));
    }
}
