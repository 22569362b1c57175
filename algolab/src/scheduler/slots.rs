/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Free-slot bookkeeping for the greedy scheduler.
//!
//! Both structures answer one question: "what is the latest free slot `<= x`,
//! and claim it".  Slots are 1-based; slot `0` is never handed out and acts as
//! the "nothing free" sentinel.
//!
//! Storage is sparse: only claimed slots are recorded, so memory is O(n) in
//! the number of claims no matter how large the deadlines are.
//!
//! | Structure | Claim cost | Total for n jobs |
//! |---|---|---|
//! | [`LinearScan`] | O(claimed) worst case | O(n²) |
//! | [`DisjointSetSlots`] | amortised ~O(α(n)) | near-linear |

use std::collections::{HashMap, HashSet};

/// Latest-free-slot allocator.
pub trait FreeSlots {
    /// Claim the latest free slot in `1..=upto` and return it, or `None` if
    /// every slot in that range is taken.
    fn claim_latest(&mut self, upto: usize) -> Option<usize>;
}

// ── LinearScan ────────────────────────────────────────────────────────────────

/// Set of taken slots, scanned backward on every claim.
///
/// The scan only ever steps over taken slots, so it stops within
/// `claimed() + 1` steps.
#[derive(Debug, Clone, Default)]
pub struct LinearScan {
    taken: HashSet<usize>,
}

impl LinearScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots handed out so far.
    pub fn claimed(&self) -> usize {
        self.taken.len()
    }
}

impl FreeSlots for LinearScan {
    fn claim_latest(&mut self, upto: usize) -> Option<usize> {
        let slot = (1..=upto).rev().find(|t| !self.taken.contains(t))?;
        self.taken.insert(slot);
        Some(slot)
    }
}

// ── DisjointSetSlots ──────────────────────────────────────────────────────────

/// Union-find over slots where the root of `t` is the latest free slot `<= t`.
///
/// Claiming slot `r` links it to `r - 1`, so later lookups skip over it.  Path
/// compression keeps the trees flat.  A slot with no parent entry is its own
/// root, so only claimed slots occupy memory.
#[derive(Debug, Clone, Default)]
pub struct DisjointSetSlots {
    parent: HashMap<usize, usize>,
}

impl DisjointSetSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots handed out so far.
    pub fn claimed(&self) -> usize {
        self.parent.len()
    }

    /// Root of `x` with full path compression (iterative, so deep chains
    /// cannot overflow the stack).
    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while let Some(&next) = self.parent.get(&root) {
            root = next;
        }
        let mut cur = x;
        while cur != root {
            // Every node on the path below the root has an entry
            match self.parent.insert(cur, root) {
                Some(next) => cur = next,
                None => break,
            }
        }
        root
    }
}

impl FreeSlots for DisjointSetSlots {
    fn claim_latest(&mut self, upto: usize) -> Option<usize> {
        let slot = self.find(upto);
        if slot == 0 {
            return None;
        }
        self.parent.insert(slot, slot - 1);
        Some(slot)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
