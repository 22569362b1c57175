/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Errors raised while building a [`Histogram`](super::Histogram) from
//! untrusted numbers.
//!
//! The valley search itself cannot fail: [`Histogram`](super::Histogram)
//! stores `u64` counts, so every value that reaches the algorithm is already a
//! non-negative integer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HistogramError {
    #[error("histogram level {index} is NaN")]
    NotANumber { index: usize },

    #[error("histogram level {index} is infinite ({value})")]
    Infinite { index: usize, value: f64 },

    #[error("histogram level {index} has negative count {value}")]
    Negative { index: usize, value: f64 },

    /// Counts are whole numbers of pixels.
    #[error("histogram level {index} has fractional count {value}")]
    Fractional { index: usize, value: f64 },

    #[error("histogram level {index} count {value} does not fit in 64 bits")]
    OutOfRange { index: usize, value: f64 },
}
