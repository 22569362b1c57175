/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Job data structure for the unit-time scheduler.
//!
//! A [`Job`] is created once (by input generation or a loader) and only read
//! during scheduling.  Every job takes exactly one slot, so it carries no
//! duration field.
//!
//! ```text
//! (deadline, priority) pairs ──► Job ──(UnitTimeScheduler)──► Schedule
//!                                 ↑ immutable input               ↑ slot → JobId
//! ```

use serde::{Deserialize, Serialize};

// ── JobId ─────────────────────────────────────────────────────────────────────

/// Caller-supplied job identifier.
///
/// Must be unique within one scheduling call.  [`Job::from_pairs`] uses the
/// input position, so ids double as indices into the original slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub usize);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "J{}", self.0)
    }
}

// ── Job ───────────────────────────────────────────────────────────────────────

/// A unit-time job.
///
/// * `deadline` is a slot index.  Values `<= 0` are representable and mean
///   the job can never be scheduled; the scheduler drops such jobs instead of
///   failing.
/// * `priority` is the value gained by scheduling the job.  It must be finite
///   and positive; [`UnitTimeScheduler::schedule`] rejects anything else
///   before the algorithm runs.
///
/// [`UnitTimeScheduler::schedule`]: crate::scheduler::UnitTimeScheduler::schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub deadline: i64,
    pub priority: f64,
}

impl Job {
    pub fn new(id: usize, deadline: i64, priority: f64) -> Self {
        Self {
            id: JobId(id),
            deadline,
            priority,
        }
    }

    /// Build jobs from `(deadline, priority)` pairs, numbering them by input
    /// position.
    pub fn from_pairs(pairs: &[(i64, f64)]) -> Vec<Job> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, &(deadline, priority))| Job::new(i, deadline, priority))
            .collect()
    }

    /// `true` if the job can occupy at least one slot.
    pub fn is_feasible(&self) -> bool {
        self.deadline > 0
    }

    /// `true` if `slot` (1-based) lies within `1..=deadline`.
    pub fn fits_slot(&self, slot: usize) -> bool {
        slot >= 1 && (slot as u64) <= self.deadline.max(0) as u64
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_numbers_jobs_by_position() {
        let jobs = Job::from_pairs(&[(3, 100.0), (2, 80.0), (3, 60.0)]);
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].id, JobId(0));
        assert_eq!(jobs[2].id, JobId(2));
        assert_eq!(jobs[1].deadline, 2);
        assert_eq!(jobs[1].priority, 80.0);
    }

    #[test]
    fn from_pairs_empty_is_empty() {
        assert!(Job::from_pairs(&[]).is_empty());
    }

    #[test]
    fn non_positive_deadline_is_infeasible() {
        assert!(!Job::new(0, 0, 1.0).is_feasible());
        assert!(!Job::new(1, -4, 1.0).is_feasible());
        assert!(Job::new(2, 1, 1.0).is_feasible());
    }

    #[test]
    fn fits_slot_respects_deadline() {
        let job = Job::new(0, 3, 1.0);
        assert!(!job.fits_slot(0));
        assert!(job.fits_slot(1));
        assert!(job.fits_slot(3));
        assert!(!job.fits_slot(4));

        let dead = Job::new(1, -1, 1.0);
        assert!(!dead.fits_slot(1));
    }

    #[test]
    fn job_id_displays_with_prefix() {
        assert_eq!(JobId(7).to_string(), "J7");
    }
}
