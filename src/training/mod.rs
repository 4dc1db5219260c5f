//! Training infrastructure for residual boosting.
//!
//! - [`TwoLevelFitter`]: exhaustive three-leaf regression tree on one feature
//! - [`BoostTrainer`]: stage loop fitting trees to successive residuals
//! - [`Metric`]: per-stage evaluation ([`Mse`], [`Rmse`])
//! - [`TrainingLogger`], [`Verbosity`]: structured logging via `tracing`
//!
//! The [`split`] submodule exposes the candidate enumeration and prefix-sum
//! scoring the fitter is built on.

mod fitter;
mod logger;
mod metrics;
pub mod split;
mod trainer;

pub use fitter::{FittedTree, TwoLevelFitter};
pub use logger::{TrainingLogger, Verbosity};
pub use metrics::{Metric, MetricValue, Mse, Rmse};
pub use split::{Candidate, Partition, PrefixSums, Side};
pub use trainer::BoostTrainer;
