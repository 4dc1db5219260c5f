//! Data input abstractions.
//!
//! - [`Dataset`]: validated one-dimensional regression samples
//! - [`synthetic`]: seeded noisy-parabola generator used by demos and tests

mod dataset;
mod error;
pub mod synthetic;

pub use dataset::{Dataset, Sample};
pub use error::{DatasetError, Field};
pub use synthetic::{noisy_quadratic, QuadraticParams};
