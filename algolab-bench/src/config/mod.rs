//! Experiment configuration loading.
//!
//! Every field is optional; anything left out falls back to the values the
//! experiments have always used.  The expected YAML structure is:
//! ```yaml
//! seed: 0
//! output_dir: "results"
//! scheduler:
//!   sizes: [10, 50, 100, 500, 1000]
//!   trials: 5
//!   strategy: disjoint_set      # or linear_scan
//!   deadline_factor: 2          # max deadline = factor × n
//!   priority_range: [1, 100]
//! valley:
//!   sizes: [100, 1000, 10000]
//!   trials: 5
//!   num_peaks: 3
//!   noise_level: 0.1
//! ```

use std::path::{Path, PathBuf};

use algolab::SlotStrategy;
use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

// ── Defaults ──────────────────────────────────────────────────────────────────

const DEFAULT_SCHEDULER_SIZES: [usize; 8] = [10, 50, 100, 500, 1000, 2000, 5000, 10000];
const DEFAULT_VALLEY_SIZES: [usize; 8] = [100, 500, 1000, 5000, 10000, 20000, 50000, 100000];
const DEFAULT_TRIALS: usize = 5;
const DEFAULT_DEADLINE_FACTOR: usize = 2;
const DEFAULT_PRIORITY_RANGE: (u32, u32) = (1, 100);
const DEFAULT_NUM_PEAKS: usize = 3;
const DEFAULT_NOISE_LEVEL: f64 = 0.1;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExperimentConfigFile {
    seed: Option<u64>,
    output_dir: Option<PathBuf>,
    #[serde(default)]
    scheduler: SchedulerEntry,
    #[serde(default)]
    valley: ValleyEntry,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchedulerEntry {
    sizes: Option<Vec<usize>>,
    trials: Option<usize>,
    strategy: Option<SlotStrategy>,
    deadline_factor: Option<usize>,
    priority_range: Option<(u32, u32)>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ValleyEntry {
    sizes: Option<Vec<usize>>,
    trials: Option<usize>,
    num_peaks: Option<usize>,
    noise_level: Option<f64>,
}

// ── Public data structures ────────────────────────────────────────────────────

/// Settings for the scheduler experiments.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerExperimentConfig {
    pub sizes: Vec<usize>,
    pub trials: usize,
    pub strategy: SlotStrategy,
    /// Deadlines are drawn from `1..=deadline_factor × n`.
    pub deadline_factor: usize,
    /// Inclusive bounds for the integer-valued priorities.
    pub priority_range: (u32, u32),
}

impl Default for SchedulerExperimentConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SCHEDULER_SIZES.to_vec(),
            trials: DEFAULT_TRIALS,
            strategy: SlotStrategy::default(),
            deadline_factor: DEFAULT_DEADLINE_FACTOR,
            priority_range: DEFAULT_PRIORITY_RANGE,
        }
    }
}

/// Settings for the valley experiments.
#[derive(Debug, Clone, PartialEq)]
pub struct ValleyExperimentConfig {
    pub sizes: Vec<usize>,
    pub trials: usize,
    pub num_peaks: usize,
    /// Fraction of each level's value used as the uniform noise amplitude.
    pub noise_level: f64,
}

impl Default for ValleyExperimentConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_VALLEY_SIZES.to_vec(),
            trials: DEFAULT_TRIALS,
            num_peaks: DEFAULT_NUM_PEAKS,
            noise_level: DEFAULT_NOISE_LEVEL,
        }
    }
}

/// Fully-resolved experiment configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// Base seed; trial `t` of size `n` uses `seed + t × n`.
    pub seed: u64,
    pub output_dir: PathBuf,
    pub scheduler: SchedulerExperimentConfig,
    pub valley: ValleyExperimentConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            output_dir: PathBuf::from("."),
            scheduler: SchedulerExperimentConfig::default(),
            valley: ValleyExperimentConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Parses `path` as YAML and validates the result.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, the YAML is invalid or
    /// contains unknown keys, or a value fails [`validate`](Self::validate).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading experiment configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))
    }

    /// Parses a YAML document.  An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: ExperimentConfigFile = if content.trim().is_empty() {
            ExperimentConfigFile::default()
        } else {
            serde_yaml::from_str(content).context("Failed to parse YAML")?
        };

        let defaults = Self::default();
        let config = Self {
            seed: file.seed.unwrap_or(defaults.seed),
            output_dir: file.output_dir.unwrap_or(defaults.output_dir),
            scheduler: SchedulerExperimentConfig {
                sizes: file.scheduler.sizes.unwrap_or(defaults.scheduler.sizes),
                trials: file.scheduler.trials.unwrap_or(defaults.scheduler.trials),
                strategy: file.scheduler.strategy.unwrap_or(defaults.scheduler.strategy),
                deadline_factor: file
                    .scheduler
                    .deadline_factor
                    .unwrap_or(defaults.scheduler.deadline_factor),
                priority_range: file
                    .scheduler
                    .priority_range
                    .unwrap_or(defaults.scheduler.priority_range),
            },
            valley: ValleyExperimentConfig {
                sizes: file.valley.sizes.unwrap_or(defaults.valley.sizes),
                trials: file.valley.trials.unwrap_or(defaults.valley.trials),
                num_peaks: file.valley.num_peaks.unwrap_or(defaults.valley.num_peaks),
                noise_level: file.valley.noise_level.unwrap_or(defaults.valley.noise_level),
            },
        };

        config.validate()?;

        debug!(
            seed = config.seed,
            output_dir = %config.output_dir.display(),
            scheduler_sizes = ?config.scheduler.sizes,
            valley_sizes = ?config.valley.sizes,
            strategy = %config.scheduler.strategy,
            "Experiment configuration resolved"
        );

        Ok(config)
    }

    /// Rejects settings the experiment loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        let s = &self.scheduler;
        ensure!(!s.sizes.is_empty(), "scheduler.sizes must not be empty");
        ensure!(
            s.sizes.iter().all(|&n| n > 0),
            "scheduler.sizes must be positive, got {:?}",
            s.sizes
        );
        ensure!(s.trials > 0, "scheduler.trials must be at least 1");
        ensure!(
            s.deadline_factor > 0,
            "scheduler.deadline_factor must be at least 1"
        );
        let (lo, hi) = s.priority_range;
        ensure!(
            lo >= 1 && lo <= hi,
            "scheduler.priority_range must satisfy 1 <= min <= max, got [{lo}, {hi}]"
        );

        let v = &self.valley;
        ensure!(!v.sizes.is_empty(), "valley.sizes must not be empty");
        ensure!(
            v.sizes.iter().all(|&n| n > 0),
            "valley.sizes must be positive, got {:?}",
            v.sizes
        );
        ensure!(v.trials > 0, "valley.trials must be at least 1");
        ensure!(
            v.noise_level.is_finite() && v.noise_level >= 0.0,
            "valley.noise_level must be a finite value >= 0, got {}",
            v.noise_level
        );

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
