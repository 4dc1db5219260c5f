//! High-level model types.
//!
//! - [`BoostConfig`]: validated configuration (builder via `bon`)
//! - [`BoostedModel`]: base score plus per-stage trees and approximations

mod boosted;
mod config;

pub use boosted::{BoostedModel, ModelError, Stage};
pub use config::{BoostConfig, BoostConfigBuilder, ConfigError};
