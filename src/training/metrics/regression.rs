//! Regression metrics.

use super::Metric;

// =============================================================================
// MSE (Mean Squared Error)
// =============================================================================

/// Mean Squared Error: mean((pred - label)²)
///
/// Lower is better. Returns 0 for empty input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mse;

impl Metric for Mse {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        debug_assert_eq!(predictions.len(), targets.len());
        if predictions.is_empty() {
            return 0.0;
        }
        predictions
            .iter()
            .zip(targets)
            .map(|(p, l)| {
                let diff = p - l;
                diff * diff
            })
            .sum::<f64>()
            / predictions.len() as f64
    }

    fn name(&self) -> &'static str {
        "mse"
    }
}

// =============================================================================
// RMSE (Root Mean Squared Error)
// =============================================================================

/// Root Mean Squared Error: sqrt(mean((pred - label)²))
///
/// Lower is better. Same units as the targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmse;

impl Metric for Rmse {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        Mse.compute(predictions, targets).sqrt()
    }

    fn name(&self) -> &'static str {
        "rmse"
    }
}
