//! Training progress logging with verbosity levels.
//!
//! [`TrainingLogger`] gates events on a [`Verbosity`] and forwards them to
//! `tracing`. Installing a subscriber is left to the application; without
//! one, events are discarded.

use std::time::Instant;

use super::metrics::MetricValue;

/// How much the trainer reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Only warnings.
    Warning,
    /// Start, per-stage metrics and summary.
    Info,
    /// Everything, including chosen partitions.
    Debug,
}

/// Per-run logger used by the boosting trainer.
#[derive(Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
    n_stages: usize,
    started: Option<Instant>,
}

impl TrainingLogger {
    /// Create a logger at the given verbosity.
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity, n_stages: 0, started: None }
    }

    /// Current verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Whether events at `level` are emitted.
    #[inline]
    pub fn enabled(&self, level: Verbosity) -> bool {
        level != Verbosity::Silent && self.verbosity >= level
    }

    /// Mark the start of a run.
    pub fn start_training(&mut self, n_stages: usize, n_samples: usize) {
        self.n_stages = n_stages;
        self.started = Some(Instant::now());
        if self.enabled(Verbosity::Info) {
            tracing::info!(n_stages, n_samples, "starting residual boosting");
        }
    }

    /// Report the metrics after a stage.
    pub fn log_metrics(&self, stage: usize, metrics: &[MetricValue]) {
        if !self.enabled(Verbosity::Info) {
            return;
        }
        let summary = metrics
            .iter()
            .map(|m| format!("{}={:.6}", m.name, m.value))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!(stage = stage + 1, of = self.n_stages, "{summary}");
    }

    /// Free-form debug message.
    pub fn debug(&self, message: &str) {
        if self.enabled(Verbosity::Debug) {
            tracing::debug!("{message}");
        }
    }

    /// Warning message.
    pub fn warn(&self, message: &str) {
        if self.enabled(Verbosity::Warning) {
            tracing::warn!("{message}");
        }
    }

    /// Mark the end of a run.
    pub fn finish_training(&self) {
        if !self.enabled(Verbosity::Info) {
            return;
        }
        let elapsed_us = self.started.map_or(0, |t| t.elapsed().as_micros());
        tracing::info!(n_stages = self.n_stages, elapsed_us, "residual boosting finished");
    }
}
