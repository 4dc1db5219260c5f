//! Synthetic noisy-parabola data.

use rand::prelude::*;

use super::{Dataset, DatasetError};

/// Parameters for [`noisy_quadratic`].
///
/// Points are evenly spaced over `[x_min, x_max]` and targets follow
/// `y = x² + (u - 0.5) * noise_amplitude` with `u` uniform in `[0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticParams {
    /// Number of points. Default: 10.
    pub n_points: usize,
    /// Leftmost x. Default: -2.0.
    pub x_min: f64,
    /// Rightmost x. Default: 2.0.
    pub x_max: f64,
    /// Peak-to-peak width of the uniform noise. Default: 1.5.
    pub noise_amplitude: f64,
    /// Random seed. Default: 42.
    pub seed: u64,
}

impl Default for QuadraticParams {
    fn default() -> Self {
        Self {
            n_points: 10,
            x_min: -2.0,
            x_max: 2.0,
            noise_amplitude: 1.5,
            seed: 42,
        }
    }
}

impl QuadraticParams {
    fn validate(&self) -> Result<(), DatasetError> {
        if self.n_points == 0 {
            return Err(DatasetError::InvalidParams {
                field: "n_points",
                reason: "must be at least 1".into(),
            });
        }
        if !self.x_min.is_finite() || !self.x_max.is_finite() || self.x_max <= self.x_min {
            return Err(DatasetError::InvalidParams {
                field: "x_max",
                reason: format!("range [{}, {}] is empty or non-finite", self.x_min, self.x_max),
            });
        }
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(DatasetError::InvalidParams {
                field: "noise_amplitude",
                reason: format!("must be finite and non-negative, got {}", self.noise_amplitude),
            });
        }
        Ok(())
    }
}

/// Generate evenly spaced samples of a noisy parabola.
///
/// The same `seed` always yields the same dataset.
pub fn noisy_quadratic(params: &QuadraticParams) -> Result<Dataset, DatasetError> {
    params.validate()?;
    let mut rng = StdRng::seed_from_u64(params.seed);
    let n = params.n_points;
    let width = params.x_max - params.x_min;

    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    for i in 0..n {
        let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
        let x = params.x_min + width * t;
        let noise = (rng.r#gen::<f64>() - 0.5) * params.noise_amplitude;
        xs.push(x);
        ys.push(x * x + noise);
    }

    Dataset::from_xy(&xs, &ys)
}
