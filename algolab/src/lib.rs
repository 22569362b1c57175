/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! algolab – greedy unit-time scheduling and divide-and-conquer valley finding
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── job           – Job entity, JobId
//! ├── scheduler/    – latest-free-slot greedy, slot structures, feasibility
//! └── valley/       – Histogram, recursive and linear minimum search
//! ```
//!
//! Everything in this crate is a pure, synchronous computation over in-memory
//! slices.  Input generation, timing and result files live in `algolab-bench`.

pub mod job;
pub mod scheduler;
pub mod valley;

pub use job::{Job, JobId};
pub use scheduler::{schedule_pairs, Schedule, SchedulerError, SlotStrategy, UnitTimeScheduler};
pub use valley::{find_valley, find_valley_linear, Histogram, HistogramError, Valley};

#[cfg(feature = "parallel")]
pub use valley::find_valley_par;
