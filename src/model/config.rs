//! Boosting configuration with builder pattern.
//!
//! [`BoostConfig`] uses the `bon` crate for builder generation and validates
//! on `build()`.
//!
//! # Example
//!
//! ```
//! use boost_steps::model::BoostConfig;
//! use boost_steps::training::Verbosity;
//!
//! // All defaults: four stages, silent
//! let config = BoostConfig::builder().build().unwrap();
//! assert_eq!(config.n_stages(), 4);
//!
//! let config = BoostConfig::builder()
//!     .n_stages(8)
//!     .verbosity(Verbosity::Info)
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;

use crate::training::Verbosity;

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Number of stages must be at least 1.
    #[error("n_stages must be at least 1")]
    InvalidNStages,
}

/// Configuration for a residual boosting run.
///
/// Fields are private; a config is obtained from the builder or
/// [`Default`], so every instance has passed validation.
///
/// ```compile_fail
/// use boost_steps::model::BoostConfig;
/// use boost_steps::training::Verbosity;
///
/// let config = BoostConfig { n_stages: 0, verbosity: Verbosity::Silent };
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct BoostConfig {
    /// Number of boosting stages (trees). Default: 4.
    #[builder(default = 4)]
    n_stages: u32,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    verbosity: Verbosity,
}

impl<S: boost_config_builder::IsComplete> BoostConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNStages`] when `n_stages == 0`.
    pub fn build(self) -> Result<BoostConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl BoostConfig {
    /// Number of boosting stages.
    #[inline]
    pub fn n_stages(&self) -> u32 {
        self.n_stages
    }

    /// Verbosity of the training logger.
    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.n_stages == 0 {
            return Err(ConfigError::InvalidNStages);
        }
        Ok(())
    }
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self { n_stages: 4, verbosity: Verbosity::default() }
    }
}
