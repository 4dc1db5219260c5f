//! Piecewise-constant step functions over sorted samples.
//!
//! A [`StepFunction`] stores one entry per sample in ascending-x order:
//! the sample's x, its predicted value, and its original index. Consumers
//! use the parallel arrays directly for plotting and scatter the predictions
//! back into caller order for residual bookkeeping.

use serde::{Deserialize, Serialize};

// ============================================================================
// StepError
// ============================================================================

/// Errors from combining step functions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    /// No step functions were given.
    #[error("cannot combine an empty set of step functions")]
    Empty,
    /// Two step functions disagree on their sorted sample order.
    #[error("step function {index} has a different sample order than the first")]
    Misaligned { index: usize },
    /// Parallel arrays that break a [`StepFunction`] invariant.
    #[error("invalid step function: {reason}")]
    Invalid { reason: String },
}

// ============================================================================
// Segment
// ============================================================================

/// A maximal run of sorted positions sharing one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// First sorted position (inclusive).
    pub start: usize,
    /// Last sorted position (exclusive).
    pub end: usize,
    /// X of the first sample in the run.
    pub x_start: f64,
    /// X of the last sample in the run.
    pub x_end: f64,
    /// Prediction shared by the run.
    pub value: f64,
}

impl Segment {
    /// Number of samples in the run.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always `false`: segments cover at least one sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

// ============================================================================
// StepFunction
// ============================================================================

/// Per-sample predictions laid out in ascending-x order.
///
/// # Invariants
///
/// - `xs`, `predictions` and `original_indices` have equal, non-zero length.
/// - `xs` is non-decreasing.
/// - `original_indices` is a permutation of `0..len`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StepParts")]
pub struct StepFunction {
    xs: Vec<f64>,
    predictions: Vec<f64>,
    original_indices: Vec<usize>,
}

/// Unchecked wire form of [`StepFunction`].
#[derive(Deserialize)]
struct StepParts {
    xs: Vec<f64>,
    predictions: Vec<f64>,
    original_indices: Vec<usize>,
}

impl TryFrom<StepParts> for StepFunction {
    type Error = StepError;

    fn try_from(parts: StepParts) -> Result<Self, Self::Error> {
        let StepParts { xs, predictions, original_indices } = parts;
        let invalid = |reason: String| StepError::Invalid { reason };

        let n = xs.len();
        if n == 0 {
            return Err(invalid("no samples".into()));
        }
        if predictions.len() != n || original_indices.len() != n {
            return Err(invalid(format!(
                "array lengths differ: {n} xs, {} predictions, {} indices",
                predictions.len(),
                original_indices.len()
            )));
        }
        if xs.iter().any(|x| x.is_nan()) {
            return Err(invalid("xs contain NaN".into()));
        }
        if let Some(i) = xs.windows(2).position(|w| w[0] > w[1]) {
            return Err(invalid(format!("xs not sorted at position {}", i + 1)));
        }

        let mut seen = vec![false; n];
        for &idx in &original_indices {
            if idx >= n || std::mem::replace(&mut seen[idx], true) {
                return Err(invalid(format!("original indices are not a permutation of 0..{n}")));
            }
        }

        Ok(Self { xs, predictions, original_indices })
    }
}

impl StepFunction {
    /// Assemble from parallel arrays already in sorted order.
    pub(crate) fn from_parts(xs: Vec<f64>, predictions: Vec<f64>, original_indices: Vec<usize>) -> Self {
        debug_assert_eq!(xs.len(), predictions.len());
        debug_assert_eq!(xs.len(), original_indices.len());
        debug_assert!(xs.windows(2).all(|w| w[0] <= w[1]));
        Self { xs, predictions, original_indices }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Whether there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// X of each sample in sorted order (the break x-coordinates).
    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Prediction of each sample in sorted order.
    #[inline]
    pub fn predictions(&self) -> &[f64] {
        &self.predictions
    }

    /// Original index of each sample in sorted order.
    #[inline]
    pub fn original_indices(&self) -> &[usize] {
        &self.original_indices
    }

    /// Predictions in original sample order.
    pub fn scatter(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.len()];
        self.scatter_add(&mut out);
        out
    }

    /// Add each prediction into `acc[original_index]`.
    ///
    /// # Panics
    ///
    /// Panics if `acc` is shorter than the number of samples.
    pub fn scatter_add(&self, acc: &mut [f64]) {
        for (&idx, &p) in self.original_indices.iter().zip(&self.predictions) {
            acc[idx] += p;
        }
    }

    /// Elementwise sum of several step functions by sorted position.
    ///
    /// All inputs must share the same sorted sample order, which holds for
    /// every stage of one boosting run since x never changes.
    ///
    /// # Errors
    ///
    /// [`StepError::Empty`] for no input, [`StepError::Misaligned`] when an
    /// input's original-index order differs from the first one.
    pub fn combine<'a>(steps: impl IntoIterator<Item = &'a StepFunction>) -> Result<Self, StepError> {
        let mut iter = steps.into_iter();
        let first = iter.next().ok_or(StepError::Empty)?;
        let mut combined = first.clone();

        for (i, step) in iter.enumerate() {
            if step.original_indices != combined.original_indices {
                return Err(StepError::Misaligned { index: i + 1 });
            }
            for (acc, &p) in combined.predictions.iter_mut().zip(&step.predictions) {
                *acc += p;
            }
        }

        Ok(combined)
    }

    /// The same step shifted vertically by `offset`.
    pub fn offset(&self, offset: f64) -> Self {
        let mut shifted = self.clone();
        shifted.predictions.iter_mut().for_each(|p| *p += offset);
        shifted
    }

    /// Maximal runs of equal prediction in sorted order.
    pub fn segments(&self) -> Vec<Segment> {
        let mut out: Vec<Segment> = Vec::new();
        for (i, (&x, &p)) in self.xs.iter().zip(&self.predictions).enumerate() {
            match out.last_mut() {
                Some(seg) if seg.value == p => {
                    seg.end = i + 1;
                    seg.x_end = x;
                }
                _ => out.push(Segment { start: i, end: i + 1, x_start: x, x_end: x, value: p }),
            }
        }
        out
    }

    /// Number of positions where the prediction changes value.
    pub fn change_points(&self) -> usize {
        self.predictions.windows(2).filter(|w| w[0] != w[1]).count()
    }

    /// Evaluate the step at an arbitrary x.
    ///
    /// Each sample's value holds from its x up to the next sample's x; values
    /// left of the first sample take the first prediction.
    pub fn predict(&self, x: f64) -> f64 {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        self.predictions[pos.saturating_sub(1)]
    }
}
