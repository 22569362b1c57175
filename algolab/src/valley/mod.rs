//! Divide-and-conquer valley (minimum) search over an intensity histogram.
//!
//! The deepest valley of a histogram is a natural segmentation threshold: the
//! intensity level with the fewest pixels between two tissue peaks.
//!
//! [`find_valley`] splits the level range in half, recurses on both halves and
//! combines the two minima with the midpoint count.  It is equivalent to the
//! single pass [`find_valley_linear`] and exists so the two can be compared;
//! both report the **first** index holding the minimum count.
//!
//! # Tie-breaking
//! When the left minimum, the midpoint and the right minimum hold equal
//! counts, the combine step prefers left, then midpoint, then right.  Because
//! the midpoint belongs to the left half and every left index precedes every
//! right index, this always selects the lowest index among equal minima.
//!
//! # Example
//! ```rust
//! use algolab::valley::{find_valley, Histogram};
//!
//! let h = Histogram::new(vec![80000, 50000, 20000, 5000, 30000, 60000]);
//! let v = find_valley(&h).unwrap();
//! assert_eq!((v.index, v.value), (3, 5000));
//! ```

pub mod error;

pub use error::HistogramError;

use serde::{Deserialize, Serialize};
use tracing::debug;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Ranges of at most this many levels are resolved by a direct scan.
const BASE_CASE_LEN: usize = 3;

/// Below this many levels the parallel search stops forking and recurses
/// sequentially.
#[cfg(feature = "parallel")]
const PARALLEL_GRAIN: usize = 4096;

// ── Histogram ─────────────────────────────────────────────────────────────────

/// Pixel counts indexed by intensity level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram {
    counts: Vec<u64>,
}

impl Histogram {
    pub fn new(counts: Vec<u64>) -> Self {
        Self { counts }
    }

    /// Build a histogram from arbitrary floating-point values, rejecting NaN,
    /// infinities, negative, fractional and out-of-range counts.
    pub fn try_from_values(values: &[f64]) -> Result<Self, HistogramError> {
        let counts = values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                if value.is_nan() {
                    Err(HistogramError::NotANumber { index })
                } else if value.is_infinite() {
                    Err(HistogramError::Infinite { index, value })
                } else if value < 0.0 {
                    Err(HistogramError::Negative { index, value })
                } else if value.fract() != 0.0 {
                    Err(HistogramError::Fractional { index, value })
                } else if value >= u64::MAX as f64 {
                    Err(HistogramError::OutOfRange { index, value })
                } else {
                    Ok(value as u64)
                }
            })
            .collect::<Result<Vec<u64>, _>>()?;
        Ok(Self { counts })
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn get(&self, level: usize) -> Option<u64> {
        self.counts.get(level).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// ── Valley ────────────────────────────────────────────────────────────────────

/// A minimum of the histogram: intensity level and its count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valley {
    pub index: usize,
    pub value: u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Divide-and-conquer minimum search.
///
/// Returns `None` for an empty histogram.
pub fn find_valley(histogram: &Histogram) -> Option<Valley> {
    let counts = histogram.counts();
    if counts.is_empty() {
        return None;
    }
    let valley = min_in(counts, 0, counts.len());
    debug!(
        levels = counts.len(),
        index = valley.index,
        value = valley.value,
        "valley found (divide and conquer)"
    );
    Some(valley)
}

/// Reference single-pass scan: the first level with the smallest count.
///
/// Returns `None` for an empty histogram.
pub fn find_valley_linear(histogram: &Histogram) -> Option<Valley> {
    let counts = histogram.counts();
    if counts.is_empty() {
        return None;
    }
    Some(scan(counts, 0, counts.len()))
}

/// [`find_valley`] with the two halves searched concurrently via
/// `rayon::join`.  Splits at the same midpoints, so the result is identical.
#[cfg(feature = "parallel")]
pub fn find_valley_par(histogram: &Histogram) -> Option<Valley> {
    let counts = histogram.counts();
    if counts.is_empty() {
        return None;
    }
    Some(min_in_par(counts, 0, counts.len()))
}

// ── Recursion ─────────────────────────────────────────────────────────────────

/// Linear scan over `counts[lo..hi]`; strict `<` keeps the first minimum.
/// Requires `lo < hi`.
fn scan(counts: &[u64], lo: usize, hi: usize) -> Valley {
    let mut best = Valley {
        index: lo,
        value: counts[lo],
    };
    for (index, &value) in counts.iter().enumerate().take(hi).skip(lo + 1) {
        if value < best.value {
            best = Valley { index, value };
        }
    }
    best
}

/// Midpoint of the non-empty range `[lo, hi)`; it belongs to the left half.
fn split(lo: usize, hi: usize) -> usize {
    lo + (hi - lo - 1) / 2
}

/// Minimum of `counts[lo..hi]`, `lo < hi`.
fn min_in(counts: &[u64], lo: usize, hi: usize) -> Valley {
    if hi - lo <= BASE_CASE_LEN {
        return scan(counts, lo, hi);
    }
    let mid = split(lo, hi);
    let left = min_in(counts, lo, mid + 1);
    let right = min_in(counts, mid + 1, hi);
    combine(
        left,
        Valley {
            index: mid,
            value: counts[mid],
        },
        right,
    )
}

#[cfg(feature = "parallel")]
fn min_in_par(counts: &[u64], lo: usize, hi: usize) -> Valley {
    if hi - lo <= PARALLEL_GRAIN {
        return min_in(counts, lo, hi);
    }
    let mid = split(lo, hi);
    let (left, right) = rayon::join(
        || min_in_par(counts, lo, mid + 1),
        || min_in_par(counts, mid + 1, hi),
    );
    combine(
        left,
        Valley {
            index: mid,
            value: counts[mid],
        },
        right,
    )
}

/// Smallest of the three candidates; ties go left, then mid, then right.
fn combine(left: Valley, mid: Valley, right: Valley) -> Valley {
    if left.value <= mid.value && left.value <= right.value {
        left
    } else if mid.value <= right.value {
        mid
    } else {
        right
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
