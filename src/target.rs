//! Target-threshold tracking for convergence reporting.
//!
//! A run may be given an ordered list of integer quality thresholds. Each
//! time the best-known value changes, the engine hands the tracker a
//! quality measure (higher is better); every remaining threshold at or below
//! it is crossed, recorded once with the iteration, elapsed time and the
//! solution at that moment, and removed. Engines stop as soon as the list
//! runs dry. Thresholds never reached are reported as unmet, in the order
//! they were supplied.
//!
//! This is the data needed for time-to-target plots: how long each solver
//! configuration takes to first reach a given solution quality.

use crate::solution::Solution;
use std::time::Duration;
use tracing::{info, warn};

/// First crossing of one threshold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TargetEvent {
    /// The threshold that was crossed.
    pub threshold: i64,
    /// Iteration (GRASP) or generation (GA) of the crossing; 0 = before the loop.
    pub iteration: usize,
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
    /// Best-known solution at the crossing.
    pub solution: Solution,
}

/// Final target outcome of a run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TargetReport {
    /// Crossings, in the order they happened.
    pub crossed: Vec<TargetEvent>,
    /// Thresholds never reached, in their original order.
    pub unmet: Vec<i64>,
}

impl TargetReport {
    /// Crossing record for `threshold`, if it was reached.
    pub fn crossing(&self, threshold: i64) -> Option<&TargetEvent> {
        self.crossed.iter().find(|e| e.threshold == threshold)
    }
}

/// Consumes a working copy of the target list during a run.
#[derive(Debug, Clone)]
pub struct TargetTracker {
    pending: Vec<i64>,
    crossed: Vec<TargetEvent>,
    tracking: bool,
}

impl TargetTracker {
    /// Creates a tracker. `None` disables tracking: nothing is ever crossed
    /// and the tracker never reports exhaustion.
    pub fn new(targets: Option<Vec<i64>>) -> Self {
        match targets {
            Some(pending) => Self {
                pending,
                crossed: Vec::new(),
                tracking: true,
            },
            None => Self {
                pending: Vec::new(),
                crossed: Vec::new(),
                tracking: false,
            },
        }
    }

    /// Crosses every remaining threshold `<= quality`.
    ///
    /// Returns the number of thresholds crossed by this call.
    pub fn observe(
        &mut self,
        quality: f64,
        iteration: usize,
        elapsed: Duration,
        solution: &Solution,
    ) -> usize {
        let before = self.crossed.len();
        let mut remaining = Vec::with_capacity(self.pending.len());
        for &threshold in &self.pending {
            if quality >= threshold as f64 {
                info!(
                    threshold,
                    iteration,
                    elapsed_secs = elapsed.as_secs_f64(),
                    best = %solution,
                    "target reached"
                );
                self.crossed.push(TargetEvent {
                    threshold,
                    iteration,
                    elapsed,
                    solution: solution.clone(),
                });
            } else {
                remaining.push(threshold);
            }
        }
        self.pending = remaining;
        self.crossed.len() - before
    }

    /// Whether a tracked target list has been fully consumed.
    pub fn is_exhausted(&self) -> bool {
        self.tracking && self.pending.is_empty()
    }

    /// Thresholds still waiting to be crossed.
    pub fn pending(&self) -> &[i64] {
        &self.pending
    }

    /// Crossings recorded so far.
    pub fn crossed(&self) -> &[TargetEvent] {
        &self.crossed
    }

    /// Ends tracking, logging each unmet threshold.
    pub fn finish(self) -> TargetReport {
        for threshold in &self.pending {
            warn!(threshold, "target not reached");
        }
        TargetReport {
            crossed: self.crossed,
            unmet: self.pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::QuadraticBinary;

    fn sol() -> Solution {
        Solution::from_elements([0, 2], &QuadraticBinary::scenario())
    }

    #[test]
    fn test_crosses_each_threshold_once() {
        let mut tracker = TargetTracker::new(Some(vec![5, 10, 20]));
        let s = sol();

        assert_eq!(tracker.observe(4.0, 0, Duration::ZERO, &s), 0);
        assert_eq!(tracker.observe(10.0, 3, Duration::from_millis(7), &s), 2);
        assert_eq!(tracker.observe(12.0, 4, Duration::from_millis(9), &s), 0);
        assert_eq!(tracker.pending(), &[20]);
        assert!(!tracker.is_exhausted());

        let report = tracker.finish();
        assert_eq!(report.crossed.len(), 2);
        let ten = report.crossing(10).expect("10 crossed");
        assert_eq!(ten.iteration, 3);
        assert_eq!(ten.elapsed, Duration::from_millis(7));
        assert_eq!(ten.solution, s);
        assert_eq!(report.unmet, vec![20]);
    }

    #[test]
    fn test_unmet_keep_original_order() {
        let mut tracker = TargetTracker::new(Some(vec![30, 1, 20, 40]));
        tracker.observe(25.0, 1, Duration::ZERO, &sol());
        assert_eq!(tracker.finish().unmet, vec![30, 40]);
    }

    #[test]
    fn test_exhaustion() {
        let mut tracker = TargetTracker::new(Some(vec![3]));
        tracker.observe(3.0, 1, Duration::ZERO, &sol());
        assert!(tracker.is_exhausted());

        assert!(TargetTracker::new(Some(vec![])).is_exhausted());
    }

    #[test]
    fn test_untracked_never_exhausts() {
        let mut tracker = TargetTracker::new(None);
        assert_eq!(tracker.observe(1e9, 1, Duration::ZERO, &sol()), 0);
        assert!(!tracker.is_exhausted());
        assert_eq!(tracker.finish(), TargetReport::default());
    }

    #[test]
    fn test_non_finite_quality() {
        let mut tracker = TargetTracker::new(Some(vec![0]));
        assert_eq!(tracker.observe(f64::NAN, 1, Duration::ZERO, &sol()), 0);
        assert_eq!(tracker.observe(f64::NEG_INFINITY, 2, Duration::ZERO, &sol()), 0);
        assert_eq!(tracker.observe(f64::INFINITY, 3, Duration::ZERO, &sol()), 1);
    }
}
