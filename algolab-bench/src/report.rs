/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Result files and console output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use algolab::{Histogram, Job, Schedule, Valley};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::experiment::{SchedulerReport, ValleyReport};

/// File name for the scheduler experiment results.
pub const SCHEDULER_RESULTS_FILE: &str = "greedy_results.json";

/// File name for the valley experiment results.
pub const VALLEY_RESULTS_FILE: &str = "divide_conquer_results.json";

/// Counts per `*` in the histogram bar chart.
const BAR_UNIT: u64 = 50;

/// Longest bar printed; longer bars are cut and end in `+`.
const MAX_BAR_WIDTH: u64 = 80;

// ── JSON ──────────────────────────────────────────────────────────────────────

/// Write `value` as pretty-printed JSON to `dir/file_name`, creating `dir` if
/// needed.  Returns the full path written.
pub fn write_json<T: Serialize>(dir: &Path, file_name: &str, value: &T) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory: {}", dir.display()))?;
    let path = dir.join(file_name);

    let file = File::create(&path)
        .with_context(|| format!("Cannot create results file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to serialise results to {}", path.display()))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to write results file: {}", path.display()))?;

    info!(path = %path.display(), "Results saved");
    Ok(path)
}

// ── Console tables ────────────────────────────────────────────────────────────

pub fn print_scheduler_summary(report: &SchedulerReport) {
    println!("\nSummary of scheduler experiments ({}):", report.strategy);
    println!("{:<15} {:<20} {:<20}", "Input Size", "Avg Time (ms)", "Avg Scheduled");
    println!("{}", "-".repeat(55));
    for exp in &report.experiments {
        println!(
            "{:<15} {:<20.4} {:<20.1}",
            exp.input_size, exp.average_execution_time_ms, exp.average_scheduled_jobs
        );
    }
}

pub fn print_valley_summary(report: &ValleyReport) {
    println!("\nSummary of valley experiments:");
    println!(
        "{:<15} {:<20} {:<20} {:<15}",
        "Input Size", "D&C Time (ms)", "BF Time (ms)", "Speedup"
    );
    println!("{}", "-".repeat(70));
    for exp in &report.experiments {
        println!(
            "{:<15} {:<20.6} {:<20.6} {:<15.2}",
            exp.input_size, exp.average_dc_time_ms, exp.average_bf_time_ms, exp.average_speedup
        );
    }
}

pub fn print_jobs(jobs: &[Job]) {
    println!("{:<8} {:<10} {:<10}", "ID", "Deadline", "Priority");
    println!("{}", "-".repeat(30));
    for job in jobs {
        println!("{:<8} {:<10} {:<10}", job.id.to_string(), job.deadline, job.priority);
    }
}

pub fn print_schedule(schedule: &Schedule) {
    println!("{:<6} {:<8} {:<10} {:<10}", "Slot", "Job", "Deadline", "Priority");
    println!("{}", "-".repeat(36));
    for a in &schedule.assignments {
        println!(
            "{:<6} {:<8} {:<10} {:<10}",
            a.slot,
            a.job.id.to_string(),
            a.job.deadline,
            a.job.priority
        );
    }
    if !schedule.dropped.is_empty() {
        let dropped: Vec<String> = schedule.dropped.iter().map(|id| id.to_string()).collect();
        println!("Dropped: {}", dropped.join(", "));
    }
    println!("Total priority: {}", schedule.total_priority);
}

/// One line per level, `*` per [`BAR_UNIT`] counts, at most
/// [`MAX_BAR_WIDTH`] stars.
pub fn histogram_bars(histogram: &Histogram) -> Vec<String> {
    histogram
        .counts()
        .iter()
        .enumerate()
        .map(|(level, &count)| {
            let stars = count / BAR_UNIT;
            let mut bar = "*".repeat(stars.min(MAX_BAR_WIDTH) as usize);
            if stars > MAX_BAR_WIDTH {
                bar.push('+');
            }
            format!("{level:5} | {count:5} {bar}")
        })
        .collect()
}

pub fn print_valley(label: &str, valley: Option<Valley>) {
    match valley {
        Some(v) => println!("{label}: level {} (count {})", v.index, v.value),
        None => println!("{label}: histogram is empty"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExperimentConfig;
    use crate::experiment::run_valley_experiments;

    #[test]
    fn write_json_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/results");
        let path = write_json(&out, "x.json", &vec![1, 2, 3]).unwrap();

        assert_eq!(path, out.join("x.json"));
        let text = fs::read_to_string(&path).unwrap();
        let back: Vec<u32> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn valley_report_serialises_expected_keys() {
        let mut cfg = ExperimentConfig::default();
        cfg.valley.sizes = vec![10];
        cfg.valley.trials = 1;
        let report = run_valley_experiments(&cfg).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), VALLEY_RESULTS_FILE, &report).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(json["algorithm"], "Divide and Conquer Valley Finding");
        let trial = &json["experiments"][0]["trials"][0];
        assert_eq!(trial["n"], 10);
        assert!(trial["dc_elapsed_time_ms"].is_number());
        assert_eq!(trial["matches_bruteforce"], true);
    }

    #[test]
    fn write_json_fails_on_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        assert!(write_json(&blocker, "x.json", &1).is_err());
    }

    #[test]
    fn histogram_bars_scale_counts() {
        let bars = histogram_bars(&Histogram::new(vec![0, 49, 50, 160]));
        assert_eq!(bars.len(), 4);
        assert!(bars[0].ends_with(' '));
        assert!(!bars[1].contains('*'));
        assert!(bars[2].ends_with(" *"));
        assert!(bars[3].ends_with(" ***"));
    }

    #[test]
    fn histogram_bars_are_clamped_for_huge_counts() {
        let exact = MAX_BAR_WIDTH * BAR_UNIT;
        let bars = histogram_bars(&Histogram::new(vec![exact, exact + BAR_UNIT, u64::MAX]));
        let width = MAX_BAR_WIDTH as usize;

        assert!(bars[0].ends_with(&format!(" {}", "*".repeat(width))));
        assert!(bars[1].ends_with(&format!(" {}+", "*".repeat(width))));
        assert!(bars[2].ends_with('+'));
        assert_eq!(bars[2].matches('*').count(), width);
    }
}
