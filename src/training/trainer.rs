//! Residual boosting trainer.
//!
//! Starts from the mean of the targets, then for each stage fits a
//! [`TwoLevelFitter`] tree to the current residuals and adds its
//! predictions (scattered back to original order) to the running
//! approximation.
//!
//! # Example
//!
//! ```
//! use boost_steps::data::Dataset;
//! use boost_steps::model::BoostConfig;
//! use boost_steps::training::BoostTrainer;
//!
//! let ds = Dataset::from_xy(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
//! let config = BoostConfig::builder().n_stages(2).build().unwrap();
//! let model = BoostTrainer::new(config).train(&ds).unwrap();
//!
//! assert_eq!(model.n_stages(), 2);
//! ```

use crate::data::{Dataset, DatasetError};
use crate::model::{BoostConfig, BoostedModel, Stage};

use super::fitter::TwoLevelFitter;
use super::logger::{TrainingLogger, Verbosity};
use super::metrics::{Metric, MetricValue, Mse};

/// Boosting trainer.
///
/// Generic over the metric reported after each stage; the fitter itself
/// always minimizes squared error.
#[derive(Debug, Clone)]
pub struct BoostTrainer<M: Metric = Mse> {
    fitter: TwoLevelFitter,
    metric: M,
    config: BoostConfig,
}

impl BoostTrainer<Mse> {
    /// Create a trainer reporting MSE.
    pub fn new(config: BoostConfig) -> Self {
        Self::with_metric(config, Mse)
    }
}

impl<M: Metric> BoostTrainer<M> {
    /// Create a trainer reporting `metric`.
    pub fn with_metric(config: BoostConfig, metric: M) -> Self {
        Self { fitter: TwoLevelFitter::new(), metric, config }
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &BoostConfig {
        &self.config
    }

    /// Get reference to the metric.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Run all stages on `dataset`.
    ///
    /// # Errors
    ///
    /// Residuals are re-validated each stage; a [`DatasetError::NonFinite`]
    /// means the targets were large enough to overflow.
    pub fn train(&self, dataset: &Dataset) -> Result<BoostedModel, DatasetError> {
        let n_stages = self.config.n_stages() as usize;
        let targets = dataset.ys();
        let base_score = dataset.mean_y();
        let mut approximation = vec![base_score; dataset.len()];

        let mut logger = TrainingLogger::new(self.config.verbosity());
        logger.start_training(n_stages, dataset.len());

        let mut stages = Vec::with_capacity(n_stages);
        for stage in 0..n_stages {
            let residuals: Vec<f64> = targets
                .iter()
                .zip(&approximation)
                .map(|(y, a)| y - a)
                .collect();
            let stage_data = dataset.with_targets(&residuals)?;

            let tree = self.fitter.fit(&stage_data);
            if logger.enabled(Verbosity::Debug) {
                logger.debug(&format!(
                    "stage {}: cuts {:?}, leaves {:?}, residual mse {:.6}",
                    stage + 1,
                    tree.partition().cuts(),
                    tree.leaf_values(),
                    tree.mse()
                ));
            }

            tree.step().scatter_add(&mut approximation);

            let metric = MetricValue::evaluate(&self.metric, &approximation, &targets);
            logger.log_metrics(stage, &[metric]);

            stages.push(Stage::new(residuals, tree, approximation.clone(), metric.value));
        }

        logger.finish_training();
        Ok(BoostedModel::from_parts(base_score, targets, stages))
    }
}
