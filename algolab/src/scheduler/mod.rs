//! Greedy unit-time job scheduler.
//!
//! [`UnitTimeScheduler`] selects a subset of unit-time [`Job`]s and places
//! each one in a distinct slot no later than its deadline, maximising the sum
//! of priorities.  The result is a [`Schedule`]: the chosen jobs ordered by
//! slot, the slot table, the dropped jobs and the total priority.
//!
//! # Algorithm
//! 1. Order jobs by priority, highest first.  Equal priorities keep their
//!    input order (stable sort), so the output is fully deterministic.
//! 2. For each job, claim the latest free slot in `1..=deadline`.
//! 3. If no slot is free, or the deadline is `<= 0`, drop the job.
//!
//! Unit-time jobs with deadlines form a matroid (a set is schedulable iff for
//! every `t` at most `t` of its deadlines are `<= t`), so the greedy choice by
//! weight is optimal.  Taking the *latest* free slot keeps earlier slots open
//! for jobs with tighter deadlines.
//!
//! # Slot structures
//! | [`SlotStrategy`] | Lookup | Schedule |
//! |---|---|---|
//! | `LinearScan` | backward scan over the taken slots | reference |
//! | `DisjointSet` | union-find "latest free slot `<= x`" | identical to `LinearScan` |
//!
//! Both keep only claimed slots, so a deadline of `1 << 40` costs no more
//! memory than a deadline of `3`.
//!
//! # Example
//! ```rust
//! use algolab::scheduler::schedule_pairs;
//!
//! let schedule = schedule_pairs(&[(3, 100.0), (2, 80.0), (3, 60.0)]).unwrap();
//! assert_eq!(schedule.total_priority, 240.0);
//! assert_eq!(schedule.assignments.len(), 3);
//! ```

pub mod error;
pub mod feasibility;
pub mod slots;

pub use error::{FeasibilityViolation, SchedulerError};

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::job::{Job, JobId};

use slots::{DisjointSetSlots, FreeSlots, LinearScan};

// ── SlotStrategy ──────────────────────────────────────────────────────────────

/// Which free-slot structure backs the greedy pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStrategy {
    /// Backward linear scan, O(n) per job.
    LinearScan,
    /// Union-find with path compression, near-linear overall.
    #[default]
    DisjointSet,
}

impl SlotStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SlotStrategy::LinearScan => "linear_scan",
            SlotStrategy::DisjointSet => "disjoint_set",
        }
    }
}

impl std::fmt::Display for SlotStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotStrategy {
    type Err = String;

    /// Accepts `linear_scan` / `linear-scan` / `linear` and
    /// `disjoint_set` / `disjoint-set` / `dsu`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "linear_scan" | "linear" => Ok(SlotStrategy::LinearScan),
            "disjoint_set" | "dsu" | "union_find" => Ok(SlotStrategy::DisjointSet),
            other => Err(format!(
                "unknown slot strategy '{other}' (valid: linear_scan, disjoint_set)"
            )),
        }
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// One scheduled job and the slot it occupies (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assignment {
    pub slot: usize,
    pub job: Job,
}

/// Result of one [`UnitTimeScheduler::schedule`] call.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Schedule {
    /// Scheduled jobs, ordered by slot.
    pub assignments: Vec<Assignment>,

    /// Slot table: occupied slot → job.  Free slots have no entry.
    pub slots: BTreeMap<usize, JobId>,

    /// Jobs that were not scheduled, in the order the greedy pass met them.
    pub dropped: Vec<JobId>,

    /// Sum of the priorities of all scheduled jobs.
    pub total_priority: f64,

    /// Number of slots considered (largest positive deadline, or 0).
    pub horizon: usize,
}

impl Schedule {
    /// Scheduled jobs in slot order.
    pub fn selected_jobs(&self) -> impl Iterator<Item = &Job> + '_ {
        self.assignments.iter().map(|a| &a.job)
    }

    /// Job occupying slot `slot` (1-based), if any.
    pub fn job_in_slot(&self, slot: usize) -> Option<JobId> {
        self.slots.get(&slot).copied()
    }

    /// Slot assigned to `job`, if it was scheduled.
    pub fn slot_of(&self, job: JobId) -> Option<usize> {
        self.assignments
            .iter()
            .find(|a| a.job.id == job)
            .map(|a| a.slot)
    }

    pub fn scheduled_count(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

// ── UnitTimeScheduler ─────────────────────────────────────────────────────────

/// The greedy latest-free-slot scheduler.
///
/// Holds only configuration.  All per-call state (slot structure, slot table)
/// is allocated inside [`schedule()`](Self::schedule) and dropped at the end
/// of the call, so repeated calls on the same input give the same result.
#[derive(Debug, Clone, Default)]
pub struct UnitTimeScheduler {
    strategy: SlotStrategy,
}

impl UnitTimeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: SlotStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> SlotStrategy {
        self.strategy
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Schedule `jobs` and return the resulting [`Schedule`].
    ///
    /// An empty slice yields an empty schedule with total priority `0`.
    ///
    /// # Errors
    /// * [`SchedulerError::InvalidPriority`] for NaN, infinite or
    ///   non-positive priorities.
    /// * [`SchedulerError::DuplicateJobId`] if two jobs share an id.
    pub fn schedule(&self, jobs: &[Job]) -> Result<Schedule, SchedulerError> {
        // ── Preconditions ─────────────────────────────────────────────────────
        Self::validate(jobs)?;
        let horizon = Self::horizon_for(jobs);

        info!(
            strategy = %self.strategy,
            job_count = jobs.len(),
            horizon = horizon,
            "=== UnitTimeScheduler::schedule() ==="
        );

        // ── Strategy dispatch ─────────────────────────────────────────────────
        let schedule = match self.strategy {
            SlotStrategy::LinearScan => Self::assign(jobs, horizon, LinearScan::new()),
            SlotStrategy::DisjointSet => Self::assign(jobs, horizon, DisjointSetSlots::new()),
        };

        info!(
            scheduled = schedule.scheduled_count(),
            dropped = schedule.dropped.len(),
            total_priority = schedule.total_priority,
            "=== Scheduling complete ==="
        );

        Ok(schedule)
    }

    // ── Validation ────────────────────────────────────────────────────────────

    fn validate(jobs: &[Job]) -> Result<(), SchedulerError> {
        let mut seen = HashSet::with_capacity(jobs.len());
        for job in jobs {
            if !job.priority.is_finite() || job.priority <= 0.0 {
                return Err(SchedulerError::InvalidPriority {
                    job: job.id,
                    value: job.priority,
                });
            }
            if !seen.insert(job.id) {
                return Err(SchedulerError::DuplicateJobId { job: job.id });
            }
        }
        Ok(())
    }

    /// Largest positive deadline, or 0.  Saturates on targets where a
    /// deadline does not fit in `usize`.
    fn horizon_for(jobs: &[Job]) -> usize {
        let max_deadline = jobs.iter().map(|j| j.deadline).max().unwrap_or(0);
        if max_deadline <= 0 {
            return 0;
        }
        usize::try_from(max_deadline).unwrap_or(usize::MAX)
    }

    // ── Greedy pass ───────────────────────────────────────────────────────────

    /// Indices of `jobs` ordered by priority descending; ties keep input
    /// order.
    fn processing_order(jobs: &[Job]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..jobs.len()).collect();
        order.sort_by(|&a, &b| jobs[b].priority.total_cmp(&jobs[a].priority));
        order
    }

    fn assign<S: FreeSlots>(jobs: &[Job], horizon: usize, mut free: S) -> Schedule {
        let mut table: BTreeMap<usize, Job> = BTreeMap::new();
        let mut dropped = Vec::new();
        let mut total_priority = 0.0;

        for idx in Self::processing_order(jobs) {
            let job = jobs[idx];

            if !job.is_feasible() {
                debug!(job = %job.id, deadline = job.deadline, "✗ non-positive deadline, dropped");
                dropped.push(job.id);
                continue;
            }

            let upto = usize::try_from(job.deadline).map_or(horizon, |d| d.min(horizon));
            match free.claim_latest(upto) {
                Some(slot) => {
                    table.insert(slot, job);
                    total_priority += job.priority;
                    debug!(
                        job = %job.id,
                        slot = slot,
                        deadline = job.deadline,
                        priority = job.priority,
                        "✓ scheduled"
                    );
                }
                None => {
                    debug!(job = %job.id, deadline = job.deadline, "✗ no free slot, dropped");
                    dropped.push(job.id);
                }
            }
        }

        let assignments = table
            .iter()
            .map(|(&slot, &job)| Assignment { slot, job })
            .collect();
        let slots = table.iter().map(|(&slot, job)| (slot, job.id)).collect();

        Schedule {
            assignments,
            slots,
            dropped,
            total_priority,
            horizon,
        }
    }
}

/// Schedule `(deadline, priority)` pairs with the default scheduler.
///
/// Job ids are the input positions.
pub fn schedule_pairs(pairs: &[(i64, f64)]) -> Result<Schedule, SchedulerError> {
    UnitTimeScheduler::new().schedule(&Job::from_pairs(pairs))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use super::feasibility::{check_feasible, optimal_total_priority};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // ── Test helpers ──────────────────────────────────────────────────────────

    fn both_strategies() -> [UnitTimeScheduler; 2] {
        [
            UnitTimeScheduler::new().with_strategy(SlotStrategy::LinearScan),
            UnitTimeScheduler::new().with_strategy(SlotStrategy::DisjointSet),
        ]
    }

    /// Random jobs with integer-valued priorities so sums compare exactly.
    fn random_jobs(rng: &mut StdRng, n: usize, max_deadline: i64) -> Vec<Job> {
        (0..n)
            .map(|i| {
                Job::new(
                    i,
                    rng.random_range(-1..=max_deadline),
                    rng.random_range(1..=20u32) as f64,
                )
            })
            .collect()
    }

    // ── Concrete cases ────────────────────────────────────────────────────────

    #[test]
    fn three_job_example_schedules_everything() {
        for sched in both_strategies() {
            let jobs = Job::from_pairs(&[(3, 100.0), (2, 80.0), (3, 60.0)]);
            let s = sched.schedule(&jobs).unwrap();

            assert_eq!(s.total_priority, 240.0);
            assert_eq!(s.horizon, 3);
            assert!(s.dropped.is_empty());
            // 100 takes slot 3, 80 takes slot 2, 60 falls back to slot 1
            assert_eq!(s.job_in_slot(3), Some(JobId(0)));
            assert_eq!(s.job_in_slot(2), Some(JobId(1)));
            assert_eq!(s.job_in_slot(1), Some(JobId(2)));
            check_feasible(&s, &jobs).unwrap();
        }
    }

    #[test]
    fn lower_priority_job_is_dropped_when_slots_run_out() {
        let jobs = Job::from_pairs(&[(1, 10.0), (1, 30.0), (2, 20.0)]);
        let s = UnitTimeScheduler::new().schedule(&jobs).unwrap();

        assert_eq!(s.total_priority, 50.0);
        assert_eq!(s.job_in_slot(1), Some(JobId(1)));
        assert_eq!(s.job_in_slot(2), Some(JobId(2)));
        assert_eq!(s.dropped, vec![JobId(0)]);
    }

    #[test]
    fn selected_jobs_are_in_slot_order() {
        let jobs = Job::from_pairs(&[(3, 100.0), (2, 80.0), (3, 60.0)]);
        let s = UnitTimeScheduler::new().schedule(&jobs).unwrap();
        let ids: Vec<JobId> = s.selected_jobs().map(|j| j.id).collect();
        assert_eq!(ids, vec![JobId(2), JobId(1), JobId(0)]);
        assert_eq!(s.slot_of(JobId(1)), Some(2));
        assert_eq!(s.slot_of(JobId(9)), None);
    }

    // ── Edge cases ────────────────────────────────────────────────────────────

    #[test]
    fn empty_input_gives_empty_schedule() {
        for sched in both_strategies() {
            let s = sched.schedule(&[]).unwrap();
            assert!(s.is_empty());
            assert_eq!(s.total_priority, 0.0);
            assert_eq!(s.horizon, 0);
            assert!(s.slots.is_empty());
        }
    }

    #[test]
    fn all_zero_deadlines_give_empty_schedule() {
        for sched in both_strategies() {
            let jobs = Job::from_pairs(&[(0, 5.0), (0, 7.0), (0, 1.0)]);
            let s = sched.schedule(&jobs).unwrap();
            assert!(s.is_empty());
            assert_eq!(s.total_priority, 0.0);
            assert_eq!(s.dropped.len(), 3);
        }
    }

    #[test]
    fn negative_deadline_is_dropped_not_rejected() {
        let jobs = Job::from_pairs(&[(-3, 1000.0), (1, 1.0)]);
        let s = UnitTimeScheduler::new().schedule(&jobs).unwrap();
        assert_eq!(s.total_priority, 1.0);
        assert_eq!(s.dropped, vec![JobId(0)]);
        assert_eq!(s.horizon, 1);
    }

    #[test]
    fn job_in_slot_out_of_range_is_none() {
        let s = schedule_pairs(&[(2, 1.0)]).unwrap();
        assert_eq!(s.job_in_slot(0), None);
        assert_eq!(s.job_in_slot(1), None);
        assert_eq!(s.job_in_slot(2), Some(JobId(0)));
        assert_eq!(s.job_in_slot(3), None);
    }

    // ── Tie-breaking ──────────────────────────────────────────────────────────

    #[test]
    fn equal_priorities_keep_input_order() {
        // Only one slot: the first of the tied jobs wins.
        let jobs = Job::from_pairs(&[(1, 50.0), (1, 50.0), (1, 50.0)]);
        let s = UnitTimeScheduler::new().schedule(&jobs).unwrap();
        assert_eq!(s.job_in_slot(1), Some(JobId(0)));
        assert_eq!(s.dropped, vec![JobId(1), JobId(2)]);
    }

    #[test]
    fn tie_break_decides_slot_placement() {
        // Both fit; the earlier input claims the later slot.
        let jobs = Job::from_pairs(&[(2, 9.0), (2, 9.0)]);
        let s = UnitTimeScheduler::new().schedule(&jobs).unwrap();
        assert_eq!(s.job_in_slot(2), Some(JobId(0)));
        assert_eq!(s.job_in_slot(1), Some(JobId(1)));
    }

    // ── Input validation ──────────────────────────────────────────────────────

    #[test]
    fn nan_priority_is_rejected() {
        let jobs = vec![Job::new(0, 1, 1.0), Job::new(1, 2, f64::NAN)];
        let err = UnitTimeScheduler::new().schedule(&jobs).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::InvalidPriority { job: JobId(1), .. }
        ));
    }

    #[test]
    fn non_positive_or_infinite_priority_is_rejected() {
        for bad in [0.0, -1.0, f64::INFINITY, f64::NEG_INFINITY] {
            let err = UnitTimeScheduler::new()
                .schedule(&[Job::new(0, 1, bad)])
                .unwrap_err();
            assert!(
                matches!(err, SchedulerError::InvalidPriority { .. }),
                "priority {bad} should be rejected, got {err}"
            );
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let jobs = vec![Job::new(4, 1, 1.0), Job::new(4, 2, 2.0)];
        let err = UnitTimeScheduler::new().schedule(&jobs).unwrap_err();
        assert_eq!(err, SchedulerError::DuplicateJobId { job: JobId(4) });
    }

    // ── Large deadlines ───────────────────────────────────────────────────────

    #[test]
    fn deadline_past_two_to_the_24_is_scheduled() {
        let s = schedule_pairs(&[(1 << 25, 5.0), (1, 3.0)]).unwrap();
        assert_eq!(s.total_priority, 8.0);
        assert_eq!(s.horizon, 1 << 25);
        assert_eq!(s.job_in_slot(1 << 25), Some(JobId(0)));
        assert_eq!(s.job_in_slot(1), Some(JobId(1)));
        assert!(s.dropped.is_empty());
    }

    #[test]
    fn huge_deadlines_use_sparse_slot_table() {
        let far: i64 = 1 << 40;
        let jobs = Job::from_pairs(&[(far, 10.0), (far, 9.0), (2, 8.0), (1, 7.0), (1, 6.0)]);
        for sched in both_strategies() {
            let s = sched.schedule(&jobs).unwrap();
            assert_eq!(s.horizon, far as usize);
            assert_eq!(s.slots.len(), 4);
            assert_eq!(s.job_in_slot(far as usize), Some(JobId(0)));
            assert_eq!(s.job_in_slot(far as usize - 1), Some(JobId(1)));
            assert_eq!(s.job_in_slot(2), Some(JobId(2)));
            assert_eq!(s.job_in_slot(1), Some(JobId(3)));
            assert_eq!(s.dropped, vec![JobId(4)]);
            assert_eq!(s.total_priority, 34.0);
            check_feasible(&s, &jobs).unwrap();
        }
    }

    #[test]
    fn max_deadline_does_not_overflow() {
        let jobs = Job::from_pairs(&[(i64::MAX, 2.0), (i64::MAX, 1.0)]);
        for sched in both_strategies() {
            let s = sched.schedule(&jobs).unwrap();
            assert_eq!(s.scheduled_count(), 2);
            check_feasible(&s, &jobs).unwrap();
        }
    }

    // ── Strategies ────────────────────────────────────────────────────────────

    #[test]
    fn strategy_parses_from_cli_and_config_spellings() {
        assert_eq!("linear-scan".parse::<SlotStrategy>(), Ok(SlotStrategy::LinearScan));
        assert_eq!("linear_scan".parse::<SlotStrategy>(), Ok(SlotStrategy::LinearScan));
        assert_eq!("Disjoint-Set".parse::<SlotStrategy>(), Ok(SlotStrategy::DisjointSet));
        assert_eq!("dsu".parse::<SlotStrategy>(), Ok(SlotStrategy::DisjointSet));
        assert!("round_robin".parse::<SlotStrategy>().is_err());
    }

    #[test]
    fn default_strategy_is_disjoint_set() {
        assert_eq!(UnitTimeScheduler::new().strategy(), SlotStrategy::DisjointSet);
    }

    #[test]
    fn linear_and_disjoint_set_give_identical_schedules() {
        let mut rng = StdRng::seed_from_u64(0x5107);
        let [linear, dsu] = both_strategies();
        for n in [0, 1, 2, 5, 17, 64, 300] {
            for _ in 0..20 {
                let jobs = random_jobs(&mut rng, n, (n as i64).max(1) * 2);
                assert_eq!(
                    linear.schedule(&jobs).unwrap(),
                    dsu.schedule(&jobs).unwrap(),
                    "strategies diverged on {jobs:?}"
                );
            }
        }
    }

    // ── Correctness properties ────────────────────────────────────────────────

    #[test]
    fn random_schedules_are_feasible() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [1, 3, 10, 100, 1000] {
            let jobs = random_jobs(&mut rng, n, n as i64);
            for sched in both_strategies() {
                let s = sched.schedule(&jobs).unwrap();
                check_feasible(&s, &jobs).unwrap();
                assert_eq!(s.scheduled_count() + s.dropped.len(), n);
            }
        }
    }

    #[test]
    fn greedy_total_matches_brute_force_optimum() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..300 {
            let n = rng.random_range(0..=8);
            let jobs = random_jobs(&mut rng, n, 6);
            let optimum = optimal_total_priority(&jobs).unwrap();
            let s = UnitTimeScheduler::new().schedule(&jobs).unwrap();
            assert_eq!(s.total_priority, optimum, "greedy not optimal for {jobs:?}");
        }
    }

    #[test]
    fn scheduler_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(9);
        let jobs = random_jobs(&mut rng, 200, 150);
        let sched = UnitTimeScheduler::new();
        let reference = sched.schedule(&jobs).unwrap();
        for _ in 0..10 {
            assert_eq!(sched.schedule(&jobs).unwrap(), reference);
        }
    }

    #[test]
    fn schedule_pairs_uses_default_scheduler() {
        let s = schedule_pairs(&[(3, 100.0), (2, 80.0), (3, 60.0)]).unwrap();
        assert_eq!(s.total_priority, 240.0);
        assert_eq!(s.scheduled_count(), 3);
    }
}
