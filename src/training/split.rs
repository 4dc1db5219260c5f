//! Candidate enumeration and range statistics for the two-level search.
//!
//! The search works on one buffer of targets sorted by x. Every candidate
//! is described by sorted positions only, and its squared error is read off
//! [`PrefixSums`] in O(1).

use std::ops::Range;

use serde::{Deserialize, Serialize};

// =============================================================================
// Prefix sums
// =============================================================================

/// Cumulative sums of targets and squared targets.
///
/// Targets are centered on their global mean before accumulation; the sum of
/// squared errors of a range is shift-invariant, and centering keeps
/// `Σy² - (Σy)²/n` away from catastrophic cancellation.
#[derive(Debug, Clone)]
pub struct PrefixSums {
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
}

impl PrefixSums {
    /// Build prefix sums over `ys` (already in sorted-x order).
    pub fn new(ys: &[f64]) -> Self {
        let center = if ys.is_empty() {
            0.0
        } else {
            ys.iter().sum::<f64>() / ys.len() as f64
        };

        let mut sum = Vec::with_capacity(ys.len() + 1);
        let mut sum_sq = Vec::with_capacity(ys.len() + 1);
        sum.push(0.0);
        sum_sq.push(0.0);

        let (mut s, mut sq) = (0.0f64, 0.0f64);
        for &y in ys {
            let d = y - center;
            s += d;
            sq += d * d;
            sum.push(s);
            sum_sq.push(sq);
        }

        Self { sum, sum_sq }
    }

    /// Number of accumulated values.
    #[inline]
    pub fn len(&self) -> usize {
        self.sum.len() - 1
    }

    /// Whether no values were accumulated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of squared deviations from the range mean.
    ///
    /// Returns 0 for an empty range. Rounding can push the raw difference
    /// slightly below zero, so the result is clamped.
    #[inline]
    pub fn range_sse(&self, range: Range<usize>) -> f64 {
        let count = range.len();
        if count == 0 {
            return 0.0;
        }
        let s = self.sum[range.end] - self.sum[range.start];
        let sq = self.sum_sq[range.end] - self.sum_sq[range.start];
        (sq - s * s / count as f64).max(0.0)
    }
}

// =============================================================================
// Partition
// =============================================================================

/// Contiguous leaves over `n` sorted samples, described by cut positions.
///
/// A cut at position `c` starts a new leaf at sorted sample `c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Partition {
    /// One leaf covering every sample.
    Single,
    /// Two leaves: `[0, cut)` and `[cut, n)`.
    Two { cut: usize },
    /// Three leaves: `[0, first)`, `[first, second)` and `[second, n)`.
    Three { first: usize, second: usize },
}

impl Partition {
    /// Cut positions in ascending order.
    pub fn cuts(&self) -> Vec<usize> {
        match *self {
            Partition::Single => vec![],
            Partition::Two { cut } => vec![cut],
            Partition::Three { first, second } => vec![first, second],
        }
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.cuts().len() + 1
    }

    /// Leaf ranges over `n` sorted samples.
    pub fn leaves(&self, n: usize) -> Vec<Range<usize>> {
        let mut bounds = Vec::with_capacity(4);
        bounds.push(0);
        bounds.extend(self.cuts());
        bounds.push(n);
        bounds.windows(2).map(|w| w[0]..w[1]).collect()
    }
}

// =============================================================================
// Candidates
// =============================================================================

/// Which side of the primary split receives the secondary split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One three-leaf candidate of the exhaustive search.
///
/// `primary` splits `[0, n)` into `[0, primary)` and `[primary, n)`.
/// `secondary` is an offset inside the chosen side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub primary: usize,
    pub side: Side,
    pub secondary: usize,
}

impl Candidate {
    /// Sorted positions where the second and third leaves start.
    #[inline]
    pub fn bounds(&self) -> (usize, usize) {
        match self.side {
            Side::Left => (self.secondary, self.primary),
            Side::Right => (self.primary, self.primary + self.secondary),
        }
    }

    /// The partition this candidate induces.
    #[inline]
    pub fn partition(&self) -> Partition {
        let (first, second) = self.bounds();
        Partition::Three { first, second }
    }

    /// Total squared error of the candidate's three leaves.
    #[inline]
    pub fn sse(&self, sums: &PrefixSums) -> f64 {
        let (a, b) = self.bounds();
        sums.range_sse(0..a) + sums.range_sse(a..b) + sums.range_sse(b..sums.len())
    }

    /// Mean squared error over `ys` computed directly: leaf means by slice
    /// summation, then one squared-error pass over every sample in order.
    ///
    /// Slower than [`sse`](Self::sse) but free of prefix-sum cancellation, so
    /// exact ties stay exact.
    pub fn direct_mse(&self, ys: &[f64]) -> f64 {
        let n = ys.len();
        let (a, b) = self.bounds();
        let mean = |r: Range<usize>| ys[r.clone()].iter().sum::<f64>() / r.len() as f64;
        let (m0, m1, m2) = (mean(0..a), mean(a..b), mean(b..n));
        ys.iter()
            .enumerate()
            .map(|(k, y)| {
                let p = if k < a {
                    m0
                } else if k < b {
                    m1
                } else {
                    m2
                };
                (y - p) * (y - p)
            })
            .sum::<f64>()
            / n as f64
    }
}

/// Every three-leaf candidate over `n` sorted samples, in search order.
///
/// Primary splits ascend over `1..n`. For each, left-side secondary splits
/// (`1..primary`) come first, then right-side ones (`1..n - primary`).
/// Partitions reachable both ways appear twice; the first occurrence wins
/// ties, so the order is part of the contract.
pub fn candidates(n: usize) -> impl Iterator<Item = Candidate> {
    (1..n).flat_map(move |primary| {
        let left = (1..primary).map(move |secondary| Candidate { primary, side: Side::Left, secondary });
        let right = (1..n - primary).map(move |secondary| Candidate { primary, side: Side::Right, secondary });
        left.chain(right)
    })
}
