/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Seeded random inputs for the experiments.
//!
//! Both generators take an explicit seed so a trial can be reproduced from
//! its result record alone.

use algolab::{Histogram, Job};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Base count added to every histogram level.
const HISTOGRAM_BASE: f64 = 10.0;

/// Height of each Gaussian peak.
const PEAK_AMPLITUDE: f64 = 1000.0;

/// Seed for trial `trial` (0-based) of size `n`.
pub fn trial_seed(base: u64, trial: usize, n: usize) -> u64 {
    base.wrapping_add((trial as u64).wrapping_mul(n as u64))
}

/// `n` jobs with deadlines uniform in `1..=max_deadline` and integer-valued
/// priorities uniform in `priority_range`.
///
/// `max_deadline` below 1 is treated as 1.
pub fn generate_jobs(n: usize, max_deadline: i64, priority_range: (u32, u32), seed: u64) -> Vec<Job> {
    let mut rng = StdRng::seed_from_u64(seed);
    let max_deadline = max_deadline.max(1);
    let (lo, hi) = priority_range;

    (0..n)
        .map(|id| {
            let deadline = rng.random_range(1..=max_deadline);
            let priority = rng.random_range(lo..=hi) as f64;
            Job::new(id, deadline, priority)
        })
        .collect()
}

/// Synthetic multi-peak histogram of `size` levels.
///
/// Peaks sit at `(i + 1) · size / (num_peaks + 1)` with standard deviation
/// `size / (num_peaks · 4)`; each level then receives uniform noise of up to
/// `± noise_level` of its value and is clamped at zero.
pub fn generate_histogram(size: usize, num_peaks: usize, noise_level: f64, seed: u64) -> Histogram {
    let mut rng = StdRng::seed_from_u64(seed);

    let peaks: Vec<f64> = (0..num_peaks)
        .map(|i| (((i + 1) * size) as f64 / (num_peaks + 1) as f64).trunc())
        .collect();
    let sigma = if num_peaks > 0 {
        size as f64 / (num_peaks * 4) as f64
    } else {
        1.0
    };

    let counts = (0..size)
        .map(|level| {
            let x = level as f64;
            let value: f64 = HISTOGRAM_BASE
                + peaks
                    .iter()
                    .map(|&p| PEAK_AMPLITUDE * (-(x - p).powi(2) / (2.0 * sigma * sigma)).exp())
                    .sum::<f64>();

            let spread = noise_level * value;
            let noise = if spread > 0.0 {
                rng.random_range(-spread..=spread)
            } else {
                0.0
            };
            (value + noise).max(0.0) as u64
        })
        .collect();

    Histogram::new(counts)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
