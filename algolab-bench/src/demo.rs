/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Small worked examples printed by `algolab-bench demo`.

use std::time::Instant;

use algolab::scheduler::feasibility::check_feasible;
use algolab::{find_valley, find_valley_linear, Job, UnitTimeScheduler};
use anyhow::Result;

use crate::generate::generate_histogram;
use crate::report::{histogram_bars, print_jobs, print_schedule, print_valley};

/// Five jobs competing for three slots.
pub fn demo_jobs() -> Vec<Job> {
    Job::from_pairs(&[(2, 50.0), (1, 40.0), (2, 60.0), (1, 30.0), (3, 45.0)])
}

pub fn demonstrate_scheduler(scheduler: &UnitTimeScheduler) -> Result<()> {
    println!("{}", "=".repeat(80));
    println!("GREEDY UNIT-TIME SCHEDULING DEMONSTRATION ({})", scheduler.strategy());
    println!("{}", "=".repeat(80));

    let jobs = demo_jobs();
    println!("\nInput jobs:");
    print_jobs(&jobs);

    let start = Instant::now();
    let schedule = scheduler.schedule(&jobs)?;
    let elapsed = start.elapsed();

    println!("\nSchedule:");
    print_schedule(&schedule);
    println!("\nExecution time: {:.4} ms", elapsed.as_secs_f64() * 1000.0);
    println!("Valid schedule: {}", check_feasible(&schedule, &jobs).is_ok());
    println!();
    Ok(())
}

pub fn demonstrate_valley() {
    println!("{}", "=".repeat(80));
    println!("DIVIDE AND CONQUER VALLEY FINDING DEMONSTRATION");
    println!("{}", "=".repeat(80));

    let histogram = generate_histogram(50, 2, 0.05, 42);
    println!("\nHistogram (50 levels):");
    println!("Level | Count");
    println!("{}", "-".repeat(30));
    for line in histogram_bars(&histogram) {
        println!("{line}");
    }

    let start = Instant::now();
    let dc = find_valley(&histogram);
    let dc_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let bf = find_valley_linear(&histogram);
    let bf_ms = start.elapsed().as_secs_f64() * 1000.0;

    println!();
    print_valley("Divide & conquer", dc);
    println!("  Execution time: {dc_ms:.6} ms");
    print_valley("Linear scan", bf);
    println!("  Execution time: {bf_ms:.6} ms");
    println!("\nResults match: {}", dc == bf);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use algolab::JobId;

    #[test]
    fn demo_jobs_drop_the_two_unit_deadline_losers() {
        let schedule = UnitTimeScheduler::new().schedule(&demo_jobs()).unwrap();
        assert_eq!(schedule.total_priority, 155.0);
        assert_eq!(schedule.job_in_slot(1), Some(JobId(0)));
        assert_eq!(schedule.job_in_slot(2), Some(JobId(2)));
        assert_eq!(schedule.job_in_slot(3), Some(JobId(4)));
        assert_eq!(schedule.dropped, vec![JobId(1), JobId(3)]);
    }
}
