/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn};

use algolab::scheduler::feasibility::check_feasible;
use algolab::{find_valley, find_valley_linear, SlotStrategy, UnitTimeScheduler};
use algolab_bench::config::ExperimentConfig;
use algolab_bench::experiment::{run_scheduler_experiments, run_valley_experiments};
use algolab_bench::report::{
    print_schedule, print_scheduler_summary, print_valley, print_valley_summary, write_json,
    SCHEDULER_RESULTS_FILE, VALLEY_RESULTS_FILE,
};
use algolab_bench::{demo, input};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Greedy unit-time scheduling and divide-and-conquer valley finding.
///
/// Example:
///   algolab-bench experiment --config experiment.yaml --output-dir results
#[derive(Debug, Parser)]
#[command(
    name = "algolab-bench",
    about = "Run, verify and time the algolab algorithms",
    long_about = None,
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "algolab=trace").
    #[arg(short = 'l', long = "log-level", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Schedule the jobs in a JSON or YAML file and print the slot table.
    Schedule {
        /// Job file: a list of {deadline, priority} entries.
        #[arg(short = 'i', long = "input")]
        input: PathBuf,

        /// Free-slot structure: linear_scan or disjoint_set.
        #[arg(short = 's', long = "strategy", default_value_t = SlotStrategy::DisjointSet)]
        strategy: SlotStrategy,
    },

    /// Find the deepest valley of a histogram in a JSON or YAML file.
    Valley {
        /// Histogram file: a list of non-negative integer counts.
        #[arg(short = 'i', long = "input")]
        input: PathBuf,
    },

    /// Print the worked examples for both algorithms.
    Demo,

    /// Run timed trials over generated inputs and write JSON results.
    Experiment {
        /// YAML experiment configuration; defaults are used when omitted.
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,

        /// Directory for the result files (overrides the configuration).
        #[arg(short = 'o', long = "output-dir")]
        output_dir: Option<PathBuf>,

        /// Run only one of the two experiment families.
        #[arg(long = "only", value_enum)]
        only: Option<Family>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Family {
    Scheduler,
    Valley,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    // Level is controlled by the RUST_LOG env-var, falling back to --log-level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Schedule { input, strategy } => run_schedule(&input, strategy),
        Command::Valley { input } => run_valley(&input),
        Command::Demo => {
            demo::demonstrate_scheduler(&UnitTimeScheduler::new())?;
            demo::demonstrate_valley();
            Ok(())
        }
        Command::Experiment {
            config,
            output_dir,
            only,
        } => run_experiment(config, output_dir, only),
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_schedule(path: &std::path::Path, strategy: SlotStrategy) -> Result<()> {
    let jobs = input::load_jobs(path)?;
    let schedule = UnitTimeScheduler::new()
        .with_strategy(strategy)
        .schedule(&jobs)
        .with_context(|| format!("Cannot schedule jobs from {}", path.display()))?;

    print_schedule(&schedule);
    check_feasible(&schedule, &jobs).context("Produced schedule failed verification")?;
    info!(
        scheduled = schedule.scheduled_count(),
        dropped = schedule.dropped.len(),
        "Schedule verified"
    );
    Ok(())
}

fn run_valley(path: &std::path::Path) -> Result<()> {
    let histogram = input::load_histogram(path)?;
    let dc = find_valley(&histogram);
    let bf = find_valley_linear(&histogram);

    print_valley("Divide & conquer", dc);
    print_valley("Linear scan", bf);
    if dc != bf {
        warn!(?dc, ?bf, "divide and conquer disagrees with linear scan");
    }
    println!("Results match: {}", dc == bf);
    Ok(())
}

fn run_experiment(
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    only: Option<Family>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => ExperimentConfig::load_from_file(path)?,
        None => {
            warn!("No experiment configuration file provided, using default settings");
            ExperimentConfig::default()
        }
    };
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    info!(
        seed = config.seed,
        output_dir = %config.output_dir.display(),
        only = ?only,
        "Configuration"
    );

    if only != Some(Family::Valley) {
        let report = run_scheduler_experiments(&config)?;
        write_json(&config.output_dir, SCHEDULER_RESULTS_FILE, &report)?;
        print_scheduler_summary(&report);
        if !report.all_verified() {
            warn!("Some scheduler trials failed verification, see the results file");
        }
    }

    if only != Some(Family::Scheduler) {
        let report = run_valley_experiments(&config)?;
        write_json(&config.output_dir, VALLEY_RESULTS_FILE, &report)?;
        print_valley_summary(&report);
        if !report.all_verified() {
            warn!("Some valley trials failed verification, see the results file");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_schedule_with_strategy() {
        let cli = Cli::try_parse_from([
            "algolab-bench",
            "schedule",
            "-i",
            "jobs.json",
            "--strategy",
            "linear-scan",
        ])
        .unwrap();
        match cli.command {
            Command::Schedule { input, strategy } => {
                assert_eq!(input, PathBuf::from("jobs.json"));
                assert_eq!(strategy, SlotStrategy::LinearScan);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_experiment_filters() {
        let cli = Cli::try_parse_from([
            "algolab-bench",
            "--log-level",
            "debug",
            "experiment",
            "--only",
            "valley",
            "-o",
            "out",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Command::Experiment {
                config,
                output_dir,
                only,
            } => {
                assert!(config.is_none());
                assert_eq!(output_dir, Some(PathBuf::from("out")));
                assert_eq!(only, Some(Family::Valley));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    fn shipped(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("configs")
            .join(name)
    }

    #[test]
    fn schedule_command_runs_on_shipped_jobs() {
        for strategy in [SlotStrategy::LinearScan, SlotStrategy::DisjointSet] {
            run_schedule(&shipped("jobs.yaml"), strategy).unwrap();
        }
    }

    #[test]
    fn valley_command_runs_on_shipped_histogram() {
        run_valley(&shipped("histogram.json")).unwrap();
    }

    #[test]
    fn schedule_command_reports_missing_input() {
        let err = run_schedule(&shipped("missing.yaml"), SlotStrategy::DisjointSet).unwrap_err();
        assert!(format!("{err:#}").contains("missing.yaml"), "got: {err:#}");
    }

    #[test]
    fn unknown_strategy_is_rejected_by_cli() {
        assert!(Cli::try_parse_from(["algolab-bench", "schedule", "-i", "x", "-s", "fifo"]).is_err());
    }
}
