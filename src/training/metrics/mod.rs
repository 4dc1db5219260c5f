//! Evaluation metrics for stage quality.
//!
//! Metrics score the running approximation against the original targets
//! after each boosting stage. Both buffers are in original sample order.
//!
//! # Available Metrics
//!
//! - [`Mse`]: Mean Squared Error (the fitter's own criterion)
//! - [`Rmse`]: Root Mean Squared Error

mod regression;

pub use regression::{Mse, Rmse};

/// A named evaluation metric.
pub trait Metric {
    /// Score `predictions` against `targets`. Both slices have equal length.
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64;

    /// Whether larger values mean a better fit.
    fn higher_is_better(&self) -> bool {
        false
    }

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// A computed metric value with its name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricValue {
    pub name: &'static str,
    pub value: f64,
}

impl MetricValue {
    /// Evaluate `metric` and tag the result with its name.
    pub fn evaluate<M: Metric + ?Sized>(metric: &M, predictions: &[f64], targets: &[f64]) -> Self {
        Self {
            name: metric.name(),
            value: metric.compute(predictions, targets),
        }
    }
}
