//! Canonical representations produced by training.
//!
//! - [`StepFunction`]: piecewise-constant prediction over sorted samples
//! - [`Segment`]: a maximal run of equal prediction

pub mod step;

pub use step::{Segment, StepError, StepFunction};
