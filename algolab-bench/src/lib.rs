/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! algolab-bench – experiment harness for the algolab algorithms
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── config/       – YAML experiment configuration
//! ├── generate      – seeded random job sets and histograms
//! ├── input         – JSON / YAML input files
//! ├── experiment    – timed, verified trials and per-size averages
//! ├── report        – JSON result files, console tables
//! └── demo          – worked examples
//! ```

pub mod config;
pub mod demo;
pub mod experiment;
pub mod generate;
pub mod input;
pub mod report;
