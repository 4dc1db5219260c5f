//! Exhaustive two-level regression tree fitter.
//!
//! Fits a three-leaf step function to one-dimensional data by scoring every
//! pair of split points. The search is exact: no pruning, no binning. For
//! `n` samples there are `(n - 1)(n - 2)` candidates, each scored in O(1)
//! from prefix sums.
//!
//! # Boundary policy
//!
//! | samples | result                                  |
//! |---------|-----------------------------------------|
//! | 1       | one leaf holding the sample's y         |
//! | 2       | two single-sample leaves (MSE 0)        |
//! | ≥ 3     | the best three-leaf partition           |
//!
//! # Example
//!
//! ```
//! use boost_steps::data::Dataset;
//! use boost_steps::training::{Partition, TwoLevelFitter};
//!
//! let ds = Dataset::from_xy(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
//! let fit = TwoLevelFitter::new().fit(&ds);
//!
//! assert_eq!(fit.partition(), Partition::Three { first: 2, second: 3 });
//! assert_eq!(fit.step().predictions(), &[0.5, 0.5, 4.0, 9.0]);
//! ```

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Sample};
use crate::repr::{StepError, StepFunction};

use super::split::{candidates, Candidate, Partition, PrefixSums};

/// Relative width, against the total sum of squares, of the band around the
/// prefix-sum minimum that is rescored directly.
const TIE_TOLERANCE: f64 = 1e-9;

// =============================================================================
// FittedTree
// =============================================================================

/// Result of one fit: the step function, its leaves, and its training MSE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TreeParts")]
pub struct FittedTree {
    step: StepFunction,
    partition: Partition,
    mse: f64,
}

/// Unchecked wire form of [`FittedTree`].
#[derive(Deserialize)]
struct TreeParts {
    step: StepFunction,
    partition: Partition,
    mse: f64,
}

impl TryFrom<TreeParts> for FittedTree {
    type Error = StepError;

    fn try_from(parts: TreeParts) -> Result<Self, Self::Error> {
        let n = parts.step.len();
        let in_range = match parts.partition {
            Partition::Single => true,
            Partition::Two { cut } => 0 < cut && cut < n,
            Partition::Three { first, second } => 0 < first && first < second && second < n,
        };
        if !in_range {
            return Err(StepError::Invalid {
                reason: format!("partition {:?} does not fit {n} samples", parts.partition),
            });
        }
        Ok(Self { step: parts.step, partition: parts.partition, mse: parts.mse })
    }
}

impl FittedTree {
    /// The fitted step function in sorted-x order.
    #[inline]
    pub fn step(&self) -> &StepFunction {
        &self.step
    }

    /// Leaf boundaries in sorted positions.
    #[inline]
    pub fn partition(&self) -> Partition {
        self.partition
    }

    /// Mean squared error of the fit over all samples.
    #[inline]
    pub fn mse(&self) -> f64 {
        self.mse
    }

    /// One value per leaf, left to right.
    pub fn leaf_values(&self) -> Vec<f64> {
        self.partition
            .leaves(self.step.len())
            .into_iter()
            .map(|r| self.step.predictions()[r.start])
            .collect()
    }

    /// Consume and return the step function.
    pub fn into_step(self) -> StepFunction {
        self.step
    }
}

// =============================================================================
// TwoLevelFitter
// =============================================================================

/// Fits the best depth-two tree (at most three leaves) on one feature.
///
/// Stateless; every call to [`fit`](Self::fit) is independent and
/// deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoLevelFitter;

impl TwoLevelFitter {
    /// Create a fitter.
    pub fn new() -> Self {
        Self
    }

    /// Fit a step function to `dataset`.
    ///
    /// Samples are sorted by x with a stable sort, so equal x values keep
    /// their input order. Among partitions with equal squared error the
    /// first one in [`candidates`] order wins.
    pub fn fit(&self, dataset: &Dataset) -> FittedTree {
        let sorted = sort_by_x(dataset.samples());
        let ys: Vec<f64> = sorted.iter().map(|s| s.y).collect();

        let partition = match ys.len() {
            0 | 1 => Partition::Single,
            2 => Partition::Two { cut: 1 },
            _ => search(&ys),
        };

        assemble(&sorted, &ys, partition)
    }
}

/// Stable sort of samples by x.
fn sort_by_x(samples: &[Sample]) -> Vec<Sample> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
    sorted
}

/// Score every three-leaf candidate and keep the first minimum.
///
/// Prefix sums locate the minimum in O(1) per candidate. Candidates whose
/// prefix-sum score lies within rounding distance of it are then rescored
/// with [`Candidate::direct_mse`] in scan order, so exact ties resolve to
/// the first candidate found.
fn search(ys: &[f64]) -> Partition {
    let n = ys.len();
    let sums = PrefixSums::new(ys);
    let Some(min_sse) = candidates(n).map(|c| c.sse(&sums)).min_by(f64::total_cmp) else {
        return Partition::Single;
    };
    let tolerance = TIE_TOLERANCE * (1.0 + sums.range_sse(0..n));

    let mut best: Option<(f64, Candidate)> = None;
    for candidate in candidates(n) {
        if candidate.sse(&sums) - min_sse > tolerance {
            continue;
        }
        let mse = candidate.direct_mse(ys);
        if best.map_or(true, |(best_mse, _)| mse < best_mse) {
            best = Some((mse, candidate));
        }
    }

    best.map_or(Partition::Single, |(_, candidate)| candidate.partition())
}

/// Build the step function for a chosen partition.
///
/// Leaf means and the reported MSE are computed directly from the samples
/// rather than from prefix sums.
fn assemble(sorted: &[Sample], ys: &[f64], partition: Partition) -> FittedTree {
    let n = sorted.len();
    let mut predictions = vec![0.0; n];

    for leaf in partition.leaves(n) {
        let members = &ys[leaf.clone()];
        let mean = members.iter().sum::<f64>() / members.len() as f64;
        predictions[leaf].fill(mean);
    }

    let mse = ys
        .iter()
        .zip(&predictions)
        .map(|(y, p)| (y - p) * (y - p))
        .sum::<f64>()
        / n as f64;

    let xs = sorted.iter().map(|s| s.x).collect();
    let original_indices = sorted.iter().map(|s| s.original_index).collect();

    FittedTree {
        step: StepFunction::from_parts(xs, predictions, original_indices),
        partition,
        mse,
    }
}
