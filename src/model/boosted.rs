//! Boosted model: base score plus a sequence of residual trees.

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, DatasetError};
use crate::repr::{StepError, StepFunction};
use crate::training::{BoostTrainer, FittedTree};

use super::BoostConfig;

// =============================================================================
// Stage
// =============================================================================

/// One boosting round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Residuals the tree was fitted on, in original order.
    targets: Vec<f64>,
    /// The fitted tree.
    tree: FittedTree,
    /// Running approximation after adding this stage, in original order.
    approximation: Vec<f64>,
    /// Training metric of `approximation` against the original targets.
    metric: f64,
}

impl Stage {
    pub(crate) fn new(targets: Vec<f64>, tree: FittedTree, approximation: Vec<f64>, metric: f64) -> Self {
        Self { targets, tree, approximation, metric }
    }

    /// Residuals this stage was fitted on (original order).
    #[inline]
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// The stage's fitted tree.
    #[inline]
    pub fn tree(&self) -> &FittedTree {
        &self.tree
    }

    /// The stage's step function.
    #[inline]
    pub fn step(&self) -> &StepFunction {
        self.tree.step()
    }

    /// Approximation after this stage (original order).
    #[inline]
    pub fn approximation(&self) -> &[f64] {
        &self.approximation
    }

    /// Training metric after this stage.
    #[inline]
    pub fn metric(&self) -> f64 {
        self.metric
    }
}

// =============================================================================
// BoostedModel
// =============================================================================

/// Additive model `base_score + Σ stage steps`.
///
/// Keeps every intermediate approximation so each stage can be displayed
/// on its own or cumulatively.
///
/// # Example
///
/// ```
/// use boost_steps::data::{noisy_quadratic, QuadraticParams};
/// use boost_steps::model::{BoostConfig, BoostedModel};
///
/// let data = noisy_quadratic(&QuadraticParams::default()).unwrap();
/// let model = BoostedModel::train(&data, BoostConfig::default()).unwrap();
///
/// assert_eq!(model.n_stages(), 4);
/// assert_eq!(model.predictions().len(), data.len());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelParts")]
pub struct BoostedModel {
    base_score: f64,
    targets: Vec<f64>,
    #[serde(skip_serializing)]
    initial: Vec<f64>,
    stages: Vec<Stage>,
}

/// Errors from restoring a [`BoostedModel`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// No training targets.
    #[error("model has no targets")]
    NoTargets,
    /// A stage covers a different number of samples than the model.
    #[error("stage {stage} covers {found} samples, expected {expected}")]
    StageLength { stage: usize, expected: usize, found: usize },
}

/// Unchecked wire form of [`BoostedModel`].
#[derive(Deserialize)]
struct ModelParts {
    base_score: f64,
    targets: Vec<f64>,
    stages: Vec<Stage>,
}

impl TryFrom<ModelParts> for BoostedModel {
    type Error = ModelError;

    fn try_from(parts: ModelParts) -> Result<Self, Self::Error> {
        let expected = parts.targets.len();
        if expected == 0 {
            return Err(ModelError::NoTargets);
        }
        for (stage, s) in parts.stages.iter().enumerate() {
            let found = [s.targets.len(), s.approximation.len(), s.step().len()]
                .into_iter()
                .find(|&len| len != expected);
            if let Some(found) = found {
                return Err(ModelError::StageLength { stage, expected, found });
            }
        }
        Ok(Self::from_parts(parts.base_score, parts.targets, parts.stages))
    }
}

impl BoostedModel {
    pub(crate) fn from_parts(base_score: f64, targets: Vec<f64>, stages: Vec<Stage>) -> Self {
        let initial = vec![base_score; targets.len()];
        Self { base_score, targets, initial, stages }
    }

    /// Train with the default fitter and MSE metric.
    pub fn train(dataset: &Dataset, config: BoostConfig) -> Result<Self, DatasetError> {
        BoostTrainer::new(config).train(dataset)
    }

    /// Mean of the original targets; the approximation before any stage.
    #[inline]
    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    /// Original targets (original order).
    #[inline]
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Number of fitted stages.
    #[inline]
    pub fn n_stages(&self) -> usize {
        self.stages.len()
    }

    /// All stages in fitting order.
    #[inline]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Final approximation (original order).
    pub fn predictions(&self) -> &[f64] {
        self.stages
            .last()
            .map_or(&self.initial, |s| &s.approximation)
    }

    /// Approximation after the first `k` stages; `k = 0` is the base score.
    ///
    /// Returns `None` for `k > n_stages`.
    pub fn approximation(&self, k: usize) -> Option<&[f64]> {
        match k {
            0 => Some(&self.initial),
            _ => self.stages.get(k - 1).map(|s| s.approximation.as_slice()),
        }
    }

    /// Residuals against the approximation after `k` stages.
    ///
    /// `residuals(k)` is exactly what stage `k` (zero-based) was fitted on.
    pub fn residuals(&self, k: usize) -> Option<Vec<f64>> {
        self.approximation(k).map(|approx| {
            self.targets
                .iter()
                .zip(approx)
                .map(|(y, a)| y - a)
                .collect()
        })
    }

    /// Sum of the first `k` stage steps by sorted position.
    ///
    /// `k` is clamped to the number of stages.
    ///
    /// # Errors
    ///
    /// [`StepError::Empty`] for `k = 0`.
    pub fn cumulative_step(&self, k: usize) -> Result<StepFunction, StepError> {
        StepFunction::combine(self.stages.iter().take(k).map(Stage::step))
    }

    /// Training metric after each stage.
    pub fn stage_metrics(&self) -> Vec<f64> {
        self.stages.iter().map(Stage::metric).collect()
    }

    /// Evaluate the model at an arbitrary x.
    pub fn predict(&self, x: f64) -> f64 {
        self.base_score + self.stages.iter().map(|s| s.step().predict(x)).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parabola() -> Dataset {
        let xs: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
        Dataset::from_xy(&xs, &ys).unwrap()
    }

    #[test]
    fn deserialize_checks_stage_lengths() {
        let model = BoostedModel::train(&parabola(), BoostConfig::default()).unwrap();
        let mut value = serde_json::to_value(&model).unwrap();
        let back: BoostedModel = serde_json::from_value(value.clone()).unwrap();
        assert!((back.base_score() - model.base_score()).abs() < 1e-12);
        assert_eq!(back.approximation(0).unwrap().len(), 6);
        assert_eq!(back.n_stages(), 4);

        value["targets"].as_array_mut().unwrap().pop();
        let err = serde_json::from_value::<BoostedModel>(value).unwrap_err();
        assert!(err.to_string().contains("covers 6 samples, expected 5"), "{err}");

        let empty = r#"{"base_score":0.0,"targets":[],"stages":[]}"#;
        assert!(serde_json::from_str::<BoostedModel>(empty).is_err());
    }

    #[test]
    fn approximation_bounds() {
        let model = BoostedModel::train(&parabola(), BoostConfig::default()).unwrap();
        assert_eq!(model.approximation(0).unwrap(), vec![model.base_score(); 6].as_slice());
        assert!(model.approximation(4).is_some());
        assert!(model.approximation(5).is_none());
        assert_eq!(model.approximation(4).unwrap(), model.predictions());
    }

    #[test]
    fn residuals_match_stage_targets() {
        let model = BoostedModel::train(&parabola(), BoostConfig::default()).unwrap();
        for (k, stage) in model.stages().iter().enumerate() {
            assert_eq!(model.residuals(k).unwrap(), stage.targets());
        }
    }

    #[test]
    fn cumulative_step_zero_is_error() {
        let model = BoostedModel::train(&parabola(), BoostConfig::default()).unwrap();
        assert_eq!(model.cumulative_step(0), Err(StepError::Empty));
        assert!(model.cumulative_step(99).is_ok());
    }

    #[test]
    fn predict_at_sample_x_matches_predictions() {
        let data = parabola();
        let model = BoostedModel::train(&data, BoostConfig::default()).unwrap();
        for (x, p) in data.xs().iter().zip(model.predictions()) {
            assert!((model.predict(*x) - p).abs() < 1e-9);
        }
    }
}
