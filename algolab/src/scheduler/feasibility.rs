/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedule verification and exhaustive optimality reference.
//!
//! * [`check_feasible`] validates a [`Schedule`] against the jobs it was built
//!   from: every slot within its job's deadline, no shared slots, a consistent
//!   slot table and a correct total.
//! * [`optimal_total_priority`] finds the best achievable total by trying
//!   every subset.  Exponential, so it is capped at [`BRUTE_FORCE_LIMIT`] jobs
//!   and only used for tests and small experiment sizes.
//!
//! # Theory
//! A set of unit-time jobs can be placed in distinct slots `1, 2, …` within
//! their deadlines **iff**, with deadlines sorted ascending
//! `d(1) <= d(2) <= … <= d(k)`, every `d(i) >= i`.  Running the jobs in
//! deadline order (EDF) is then a valid placement; if some `d(i) < i`, the `i`
//! jobs with deadline `<= d(i)` cannot fit in `d(i)` slots.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::job::{Job, JobId};

use super::{FeasibilityViolation, Schedule};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Largest job count [`optimal_total_priority`] will enumerate (2^20 subsets).
pub const BRUTE_FORCE_LIMIT: usize = 20;

/// Relative tolerance used when comparing summed priorities.
const TOTAL_TOLERANCE: f64 = 1e-9;

// ── Public API ────────────────────────────────────────────────────────────────

/// Check that `schedule` is a feasible placement of a subset of `jobs`.
///
/// Deadlines and priorities are taken from `jobs`, not from the copies stored
/// in the schedule.
pub fn check_feasible(schedule: &Schedule, jobs: &[Job]) -> Result<(), FeasibilityViolation> {
    let by_id: HashMap<JobId, &Job> = jobs.iter().map(|j| (j.id, j)).collect();
    let mut owners: BTreeMap<usize, JobId> = BTreeMap::new();
    let mut seen: HashSet<JobId> = HashSet::new();
    let mut actual_total = 0.0;

    for assignment in &schedule.assignments {
        let id = assignment.job.id;
        let job = by_id
            .get(&id)
            .ok_or(FeasibilityViolation::UnknownJob { job: id })?;

        if !job.fits_slot(assignment.slot) {
            return Err(FeasibilityViolation::DeadlineMissed {
                job: id,
                slot: assignment.slot,
                deadline: job.deadline,
            });
        }
        if !seen.insert(id) {
            return Err(FeasibilityViolation::JobRepeated { job: id });
        }
        if let Some(&first) = owners.get(&assignment.slot) {
            return Err(FeasibilityViolation::SlotConflict {
                slot: assignment.slot,
                first,
                second: id,
            });
        }

        owners.insert(assignment.slot, id);
        actual_total += job.priority;
    }

    for (&slot, &recorded) in &schedule.slots {
        let expected = owners.get(&slot).copied();
        if expected != Some(recorded) {
            return Err(FeasibilityViolation::SlotTableMismatch {
                slot,
                recorded: Some(recorded),
                expected,
            });
        }
    }
    // Assignments the slot table does not mention
    if let Some((&slot, &id)) = owners
        .iter()
        .find(|(slot, _)| !schedule.slots.contains_key(slot))
    {
        return Err(FeasibilityViolation::SlotTableMismatch {
            slot,
            recorded: None,
            expected: Some(id),
        });
    }

    let tolerance = TOTAL_TOLERANCE * actual_total.abs().max(1.0);
    if (schedule.total_priority - actual_total).abs() > tolerance {
        return Err(FeasibilityViolation::TotalMismatch {
            reported: schedule.total_priority,
            actual: actual_total,
        });
    }

    Ok(())
}

/// `true` if every job in `jobs` can be given its own slot within its
/// deadline.
pub fn is_schedulable(jobs: &[&Job]) -> bool {
    let mut deadlines: Vec<i64> = jobs.iter().map(|j| j.deadline).collect();
    deadlines.sort_unstable();
    deadlines
        .iter()
        .enumerate()
        .all(|(i, &d)| d >= i as i64 + 1)
}

/// Best achievable total priority for `jobs`, by exhaustive subset search.
///
/// Returns `None` if `jobs.len()` exceeds [`BRUTE_FORCE_LIMIT`], and `Some(0.0)`
/// for an empty slice.
pub fn optimal_total_priority(jobs: &[Job]) -> Option<f64> {
    if jobs.len() > BRUTE_FORCE_LIMIT {
        return None;
    }

    let mut best = 0.0_f64;
    let mut subset: Vec<&Job> = Vec::with_capacity(jobs.len());

    for mask in 0u32..(1u32 << jobs.len()) {
        subset.clear();
        subset.extend(
            jobs.iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, j)| j),
        );
        if !is_schedulable(&subset) {
            continue;
        }
        let total: f64 = subset.iter().map(|j| j.priority).sum();
        if total > best {
            best = total;
        }
    }

    Some(best)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
