/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Timed, verified experiment trials.
//!
//! For every configured size `n` and every trial:
//!
//! ```text
//! seed ──► generate input ──► time core call ──► verify ──► trial record
//!                                                               │
//!                              per-size averages ◄──────────────┘
//! ```
//!
//! Scheduler trials are checked for feasibility, compared with the other slot
//! strategy and, for small `n`, against the brute-force optimum.  Valley
//! trials are compared with the linear scan.

use std::time::Instant;

use algolab::scheduler::feasibility::{check_feasible, optimal_total_priority};
use algolab::{find_valley, find_valley_linear, SlotStrategy, UnitTimeScheduler, Valley};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ExperimentConfig, SchedulerExperimentConfig, ValleyExperimentConfig};
use crate::generate::{generate_histogram, generate_jobs, trial_seed};

/// Absolute tolerance when comparing a greedy total with the brute-force one.
const OPTIMUM_TOLERANCE: f64 = 1e-6;

// ── Scheduler records ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SchedulerTrial {
    pub trial: usize,
    pub n: usize,
    pub seed: u64,
    pub elapsed_time_ms: f64,
    pub scheduled_jobs: usize,
    pub total_priority: f64,
    /// Passed [`check_feasible`].
    pub valid: bool,
    /// The other slot strategy produced the same schedule.
    pub matches_other_strategy: bool,
    /// Equals the brute-force optimum; `None` when `n` is too large to check.
    pub optimal: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchedulerSizeResult {
    pub input_size: usize,
    pub trials: Vec<SchedulerTrial>,
    pub average_execution_time_ms: f64,
    pub average_scheduled_jobs: f64,
    pub average_total_priority: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchedulerReport {
    pub algorithm: &'static str,
    pub complexity: &'static str,
    pub strategy: SlotStrategy,
    pub experiments: Vec<SchedulerSizeResult>,
}

impl SchedulerReport {
    /// `true` if every trial was feasible, strategy-consistent and, where
    /// checked, optimal.
    pub fn all_verified(&self) -> bool {
        self.experiments.iter().flat_map(|e| &e.trials).all(|t| {
            t.valid && t.matches_other_strategy && t.optimal.unwrap_or(true)
        })
    }
}

// ── Valley records ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ValleyTrial {
    pub trial: usize,
    pub n: usize,
    pub seed: u64,
    pub valley_index: usize,
    pub valley_value: u64,
    pub dc_elapsed_time_ms: f64,
    pub bf_elapsed_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub par_elapsed_time_ms: Option<f64>,
    /// Brute-force time over divide-and-conquer time.
    pub speedup: f64,
    /// The reported level holds the reported count and it is the minimum.
    pub valid: bool,
    pub matches_bruteforce: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValleySizeResult {
    pub input_size: usize,
    pub trials: Vec<ValleyTrial>,
    pub average_dc_time_ms: f64,
    pub average_bf_time_ms: f64,
    pub average_speedup: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValleyReport {
    pub algorithm: &'static str,
    pub complexity: &'static str,
    pub experiments: Vec<ValleySizeResult>,
}

impl ValleyReport {
    pub fn all_verified(&self) -> bool {
        self.experiments
            .iter()
            .flat_map(|e| &e.trials)
            .all(|t| t.valid && t.matches_bruteforce)
    }
}

// ── Scheduler experiments ─────────────────────────────────────────────────────

pub fn run_scheduler_experiments(config: &ExperimentConfig) -> Result<SchedulerReport> {
    let cfg = &config.scheduler;
    let scheduler = UnitTimeScheduler::new().with_strategy(cfg.strategy);
    let other = UnitTimeScheduler::new().with_strategy(match cfg.strategy {
        SlotStrategy::LinearScan => SlotStrategy::DisjointSet,
        SlotStrategy::DisjointSet => SlotStrategy::LinearScan,
    });

    let mut experiments = Vec::with_capacity(cfg.sizes.len());
    for &n in &cfg.sizes {
        info!(n = n, trials = cfg.trials, strategy = %cfg.strategy, "Running scheduler experiments");

        let trials = (0..cfg.trials)
            .map(|t| scheduler_trial(cfg, &scheduler, &other, config.seed, t, n))
            .collect::<Result<Vec<_>>>()?;

        let result = SchedulerSizeResult {
            input_size: n,
            average_execution_time_ms: mean(trials.iter().map(|t| t.elapsed_time_ms)),
            average_scheduled_jobs: mean(trials.iter().map(|t| t.scheduled_jobs as f64)),
            average_total_priority: mean(trials.iter().map(|t| t.total_priority)),
            trials,
        };
        info!(
            n = n,
            avg_ms = result.average_execution_time_ms,
            avg_scheduled = result.average_scheduled_jobs,
            "Scheduler size complete"
        );
        experiments.push(result);
    }

    Ok(SchedulerReport {
        algorithm: "Greedy Unit-Time Scheduling",
        complexity: "O(n log n)",
        strategy: cfg.strategy,
        experiments,
    })
}

fn scheduler_trial(
    cfg: &SchedulerExperimentConfig,
    scheduler: &UnitTimeScheduler,
    other: &UnitTimeScheduler,
    base_seed: u64,
    trial: usize,
    n: usize,
) -> Result<SchedulerTrial> {
    let seed = trial_seed(base_seed, trial, n);
    let max_deadline = i64::try_from(n.saturating_mul(cfg.deadline_factor)).unwrap_or(i64::MAX);
    let jobs = generate_jobs(n, max_deadline, cfg.priority_range, seed);

    let start = Instant::now();
    let schedule = scheduler
        .schedule(&jobs)
        .with_context(|| format!("scheduling failed for n={n}, trial={}", trial + 1))?;
    let elapsed_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    let valid = match check_feasible(&schedule, &jobs) {
        Ok(()) => true,
        Err(violation) => {
            warn!(n = n, trial = trial + 1, %violation, "✗ infeasible schedule");
            false
        }
    };
    let matches_other_strategy = other
        .schedule(&jobs)
        .map(|s| s == schedule)
        .unwrap_or(false);
    let optimal = optimal_total_priority(&jobs)
        .map(|best| (best - schedule.total_priority).abs() <= OPTIMUM_TOLERANCE);

    debug!(
        n = n,
        trial = trial + 1,
        ms = elapsed_time_ms,
        scheduled = schedule.scheduled_count(),
        total = schedule.total_priority,
        "scheduler trial"
    );

    Ok(SchedulerTrial {
        trial: trial + 1,
        n,
        seed,
        elapsed_time_ms,
        scheduled_jobs: schedule.scheduled_count(),
        total_priority: schedule.total_priority,
        valid,
        matches_other_strategy,
        optimal,
    })
}

// ── Valley experiments ────────────────────────────────────────────────────────

pub fn run_valley_experiments(config: &ExperimentConfig) -> Result<ValleyReport> {
    let cfg = &config.valley;

    let mut experiments = Vec::with_capacity(cfg.sizes.len());
    for &n in &cfg.sizes {
        info!(n = n, trials = cfg.trials, "Running valley experiments");

        let trials = (0..cfg.trials)
            .map(|t| valley_trial(cfg, config.seed, t, n))
            .collect::<Result<Vec<_>>>()?;

        let result = ValleySizeResult {
            input_size: n,
            average_dc_time_ms: mean(trials.iter().map(|t| t.dc_elapsed_time_ms)),
            average_bf_time_ms: mean(trials.iter().map(|t| t.bf_elapsed_time_ms)),
            average_speedup: mean(trials.iter().map(|t| t.speedup)),
            trials,
        };
        info!(
            n = n,
            avg_dc_ms = result.average_dc_time_ms,
            avg_bf_ms = result.average_bf_time_ms,
            "Valley size complete"
        );
        experiments.push(result);
    }

    Ok(ValleyReport {
        algorithm: "Divide and Conquer Valley Finding",
        complexity: "O(n)",
        experiments,
    })
}

fn valley_trial(cfg: &ValleyExperimentConfig, base_seed: u64, trial: usize, n: usize) -> Result<ValleyTrial> {
    let seed = trial_seed(base_seed, trial, n);
    let histogram = generate_histogram(n, cfg.num_peaks, cfg.noise_level, seed);

    let start = Instant::now();
    let dc = find_valley(&histogram);
    let dc_elapsed_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let bf = find_valley_linear(&histogram);
    let bf_elapsed_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    #[cfg(feature = "parallel")]
    let par_elapsed_time_ms = {
        let start = Instant::now();
        let par = algolab::find_valley_par(&histogram);
        let ms = start.elapsed().as_secs_f64() * 1000.0;
        if par != dc {
            warn!(n = n, trial = trial + 1, "✗ parallel valley differs from sequential");
        }
        Some(ms)
    };
    #[cfg(not(feature = "parallel"))]
    let par_elapsed_time_ms = None;

    let Some(Valley { index, value }) = dc else {
        bail!("histogram of size {n} produced no valley (trial {})", trial + 1);
    };
    let minimum = histogram.counts().iter().min().copied();
    let valid = histogram.get(index) == Some(value) && minimum == Some(value);
    let speedup = if dc_elapsed_time_ms > 0.0 {
        bf_elapsed_time_ms / dc_elapsed_time_ms
    } else {
        1.0
    };

    Ok(ValleyTrial {
        trial: trial + 1,
        n,
        seed,
        valley_index: index,
        valley_value: value,
        dc_elapsed_time_ms,
        bf_elapsed_time_ms,
        par_elapsed_time_ms,
        speedup,
        valid,
        matches_bruteforce: dc == bf,
    })
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
