//! boost-steps: residual boosting with exhaustive two-split regression trees.
//!
//! Fits a short sequence of three-leaf step functions to successive
//! residuals of a one-dimensional dataset, and lays the data, residuals and
//! cumulative approximation out as plot scenes.
//!
//! # Key Types
//!
//! - [`Dataset`] / [`Sample`] - validated `(x, y)` samples with original indices
//! - [`TwoLevelFitter`] - exact search for the best two-split partition
//! - [`StepFunction`] - per-sample piecewise-constant predictions
//! - [`BoostedModel`] / [`BoostConfig`] - the stage loop and its result
//! - [`Dashboard`] - headless panels and click hit-testing
//!
//! # Example
//!
//! ```
//! use boost_steps::{noisy_quadratic, BoostConfig, BoostedModel, QuadraticParams};
//!
//! let data = noisy_quadratic(&QuadraticParams::default()).unwrap();
//! let model = BoostedModel::train(&data, BoostConfig::default()).unwrap();
//!
//! let first = model.stages()[0].tree();
//! assert!(first.step().change_points() <= 2);
//! ```

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod data;
pub mod model;
pub mod plot;
pub mod repr;
pub mod testing;
pub mod training;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::{noisy_quadratic, Dataset, DatasetError, QuadraticParams, Sample};
pub use model::{BoostConfig, BoostedModel, ConfigError, ModelError, Stage};
pub use plot::{Dashboard, PlotFrame, Scene, Selection};
pub use repr::{StepError, StepFunction};
pub use training::{BoostTrainer, FittedTree, Partition, TwoLevelFitter, Verbosity};
