/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Job set and histogram loading from JSON or YAML files.
//!
//! The format is chosen from the file extension: `.json` is parsed as JSON,
//! anything else as YAML.  Malformed numbers (NaN priorities, negative or
//! fractional counts) are rejected here, before any algorithm sees them.
//!
//! Accepted job layouts:
//! ```yaml
//! - { deadline: 3, priority: 100 }
//! - { id: 7, deadline: 2, priority: 80.5 }
//! ```
//! or the same list under a top-level `jobs:` key.  Histograms are a plain
//! list of counts or the same list under `counts:`.

use std::path::Path;

use algolab::{Histogram, Job};
use anyhow::{ensure, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;

// ── Private deserialization types ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JobsFile {
    List(Vec<JobEntry>),
    Wrapped { jobs: Vec<JobEntry> },
}

#[derive(Debug, Deserialize)]
struct JobEntry {
    /// Defaults to the entry's position in the list.
    id: Option<usize>,
    deadline: i64,
    priority: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HistogramFile {
    List(Vec<f64>),
    Wrapped { counts: Vec<f64> },
}

// ── Format detection ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Yaml,
        }
    }

    fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            InputFormat::Json => serde_json::from_str(content).context("Failed to parse JSON"),
            InputFormat::Yaml => serde_yaml::from_str(content).context("Failed to parse YAML"),
        }
    }
}

fn read_input<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open input file: {}", path.display()))?;
    InputFormat::from_path(path)
        .parse(&content)
        .with_context(|| format!("Invalid input file: {}", path.display()))
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate a job set.
pub fn load_jobs(path: &Path) -> Result<Vec<Job>> {
    let file: JobsFile = read_input(path)?;
    let jobs = jobs_from_entries(match file {
        JobsFile::List(entries) | JobsFile::Wrapped { jobs: entries } => entries,
    })
    .with_context(|| format!("Invalid job in {}", path.display()))?;
    info!(path = %path.display(), jobs = jobs.len(), "Loaded job set");
    Ok(jobs)
}

/// Load and validate a histogram.
pub fn load_histogram(path: &Path) -> Result<Histogram> {
    let file: HistogramFile = read_input(path)?;
    let values = match file {
        HistogramFile::List(values) | HistogramFile::Wrapped { counts: values } => values,
    };
    let histogram = Histogram::try_from_values(&values)
        .with_context(|| format!("Invalid histogram in {}", path.display()))?;
    info!(path = %path.display(), levels = histogram.len(), "Loaded histogram");
    Ok(histogram)
}

fn jobs_from_entries(entries: Vec<JobEntry>) -> Result<Vec<Job>> {
    entries
        .into_iter()
        .enumerate()
        .map(|(pos, entry)| {
            ensure!(
                entry.priority.is_finite() && entry.priority > 0.0,
                "entry {pos}: priority must be a finite number > 0, got {}",
                entry.priority
            );
            Ok(Job::new(entry.id.unwrap_or(pos), entry.deadline, entry.priority))
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
