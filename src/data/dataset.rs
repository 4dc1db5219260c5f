//! Dataset container for one-dimensional regression samples.
//!
//! This module provides [`Sample`] and [`Dataset`].

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use super::error::{DatasetError, Field};

/// A single `(x, y)` observation with its position in the caller's ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Feature value.
    pub x: f64,
    /// Target value (a residual when the dataset feeds a boosting stage).
    pub y: f64,
    /// Index of this sample in the caller's original ordering.
    pub original_index: usize,
}

impl Sample {
    /// Create a sample.
    pub fn new(x: f64, y: f64, original_index: usize) -> Self {
        Self { x, y, original_index }
    }
}

/// A validated, ordered collection of samples.
///
/// # Invariants
///
/// - At least one sample.
/// - Every `x` and `y` is finite.
/// - The original indices form a permutation of `0..len`.
///
/// Because these are checked on construction, every `Dataset` is a valid
/// input for [`TwoLevelFitter`](crate::training::TwoLevelFitter).
///
/// # Example
///
/// ```
/// use boost_steps::data::Dataset;
///
/// let ds = Dataset::from_xy(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
/// assert_eq!(ds.len(), 3);
/// assert!((ds.mean_y() - 5.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Sample>", into = "Vec<Sample>")]
pub struct Dataset {
    /// Samples in caller order.
    samples: Vec<Sample>,
}

impl Dataset {
    /// Create a dataset from explicit samples.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::Empty`] for no samples
    /// - [`DatasetError::NonFinite`] if any `x` or `y` is NaN or infinite
    /// - [`DatasetError::InvalidIndices`] if the original indices are not a
    ///   permutation of `0..len`
    pub fn new(samples: Vec<Sample>) -> Result<Self, DatasetError> {
        if samples.is_empty() {
            return Err(DatasetError::Empty);
        }

        for (index, s) in samples.iter().enumerate() {
            if !s.x.is_finite() {
                return Err(DatasetError::NonFinite { index, field: Field::X, value: s.x });
            }
            if !s.y.is_finite() {
                return Err(DatasetError::NonFinite { index, field: Field::Y, value: s.y });
            }
        }

        let n = samples.len();
        let mut seen = vec![false; n];
        for s in &samples {
            let idx = s.original_index;
            if idx >= n {
                return Err(DatasetError::InvalidIndices {
                    n,
                    reason: format!("index {idx} out of range"),
                });
            }
            if std::mem::replace(&mut seen[idx], true) {
                return Err(DatasetError::InvalidIndices {
                    n,
                    reason: format!("index {idx} appears more than once"),
                });
            }
        }

        Ok(Self { samples })
    }

    /// Pair `xs[i]` with `ys[i]`, assigning original index `i`.
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Result<Self, DatasetError> {
        if xs.len() != ys.len() {
            return Err(DatasetError::LengthMismatch { xs: xs.len(), ys: ys.len() });
        }
        let samples = xs
            .iter()
            .zip(ys)
            .enumerate()
            .map(|(i, (&x, &y))| Sample::new(x, y, i))
            .collect();
        Self::new(samples)
    }

    /// Build from ndarray views (x values and targets).
    pub fn from_arrays(xs: ArrayView1<f64>, ys: ArrayView1<f64>) -> Result<Self, DatasetError> {
        if xs.len() != ys.len() {
            return Err(DatasetError::LengthMismatch { xs: xs.len(), ys: ys.len() });
        }
        let samples = xs
            .iter()
            .zip(ys.iter())
            .enumerate()
            .map(|(i, (&x, &y))| Sample::new(x, y, i))
            .collect();
        Self::new(samples)
    }

    /// Same x values and original indices, new targets.
    ///
    /// `targets` is indexed by original index, which is how the boosting
    /// trainer stores residuals between stages.
    pub fn with_targets(&self, targets: &[f64]) -> Result<Self, DatasetError> {
        if targets.len() != self.len() {
            return Err(DatasetError::LengthMismatch { xs: self.len(), ys: targets.len() });
        }
        let samples = self
            .samples
            .iter()
            .map(|s| Sample::new(s.x, targets[s.original_index], s.original_index))
            .collect();
        Self::new(samples)
    }

    /// Number of samples. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in caller order.
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// X values indexed by original index.
    pub fn xs(&self) -> Vec<f64> {
        self.by_original(|s| s.x)
    }

    /// Y values indexed by original index.
    pub fn ys(&self) -> Vec<f64> {
        self.by_original(|s| s.y)
    }

    /// Arithmetic mean of all targets.
    pub fn mean_y(&self) -> f64 {
        self.samples.iter().map(|s| s.y).sum::<f64>() / self.len() as f64
    }

    fn by_original(&self, f: impl Fn(&Sample) -> f64) -> Vec<f64> {
        let mut out = vec![0.0; self.len()];
        for s in &self.samples {
            out[s.original_index] = f(s);
        }
        out
    }
}

impl TryFrom<Vec<Sample>> for Dataset {
    type Error = DatasetError;

    fn try_from(samples: Vec<Sample>) -> Result<Self, Self::Error> {
        Self::new(samples)
    }
}

impl From<Dataset> for Vec<Sample> {
    fn from(ds: Dataset) -> Self {
        ds.samples
    }
}
