/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the unit-time scheduler.
//!
//! Two error enums model the two failure layers:
//!
//! * [`SchedulerError`] — malformed input rejected by
//!   [`UnitTimeScheduler::schedule()`](super::UnitTimeScheduler::schedule)
//!   before the algorithm runs.
//! * [`FeasibilityViolation`] — why a [`Schedule`](super::Schedule) failed
//!   [`check_feasible()`](super::feasibility::check_feasible).
//!
//! A job with a deadline `<= 0` is not an error: it is dropped like any other
//! job that finds no free slot.

use thiserror::Error;

use crate::job::JobId;

// ── Top-level scheduler errors ────────────────────────────────────────────────

/// Input rejected at the boundary of
/// [`UnitTimeScheduler::schedule()`](super::UnitTimeScheduler::schedule).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    /// Priority is NaN, infinite, zero or negative.
    #[error("job {job} has invalid priority {value} (must be finite and > 0)")]
    InvalidPriority { job: JobId, value: f64 },

    /// Two jobs in the same call share an id.
    #[error("job id {job} appears more than once")]
    DuplicateJobId { job: JobId },
}

// ── Feasibility violations ────────────────────────────────────────────────────

/// Reason a schedule is not feasible for the jobs it claims to schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeasibilityViolation {
    /// The schedule references a job that is not in the input.
    #[error("assigned job {job} is not part of the input")]
    UnknownJob { job: JobId },

    /// A job sits in slot 0 or after its deadline.
    #[error("job {job} assigned to slot {slot} but its deadline is {deadline}")]
    DeadlineMissed {
        job: JobId,
        slot: usize,
        deadline: i64,
    },

    /// Two assignments share a slot.
    #[error("slot {slot} holds both {first} and {second}")]
    SlotConflict {
        slot: usize,
        first: JobId,
        second: JobId,
    },

    /// A job was assigned more than once.
    #[error("job {job} is assigned to more than one slot")]
    JobRepeated { job: JobId },

    /// The slot vector disagrees with the assignment list.
    #[error("slot {slot} records {recorded:?} but the assignment list says {expected:?}")]
    SlotTableMismatch {
        slot: usize,
        recorded: Option<JobId>,
        expected: Option<JobId>,
    },

    /// `total_priority` is not the sum of the assigned priorities.
    #[error("reported total priority {reported} but assigned jobs sum to {actual}")]
    TotalMismatch { reported: f64, actual: f64 },
}
