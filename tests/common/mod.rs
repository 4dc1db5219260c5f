//! Shared fixtures for integration tests.
//!
//! For assertion helpers, use `boost_steps::testing`.

#![allow(dead_code)]

use boost_steps::data::{noisy_quadratic, Dataset, QuadraticParams};
use boost_steps::model::{BoostConfig, BoostedModel};

/// The default ten-point noisy parabola.
pub fn default_data() -> Dataset {
    noisy_quadratic(&QuadraticParams::default()).expect("default params are valid")
}

/// Default data plus a four-stage model trained on it.
pub fn trained() -> (Dataset, BoostedModel) {
    let data = default_data();
    let model = BoostedModel::train(&data, BoostConfig::default()).expect("training succeeds");
    (data, model)
}

/// Evenly spaced integer x values `0..n`.
pub fn grid(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}
