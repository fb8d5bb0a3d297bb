//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file overlaid with `DOCGATE__*` environment variables.
//! Each sub-module represents a logical configuration section.

pub mod logging;
pub mod search;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::search::SearchConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "DOCGATE";

/// Accepted values of `logging.format`.
const LOG_FORMATS: &[&str] = &["json", "pretty"];

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Search, sorting, and pagination settings.
    #[serde(default)]
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load and validate configuration from a TOML file and the environment.
    ///
    /// The file is optional; a missing file yields the defaults. Environment
    /// variables such as `DOCGATE__SEARCH__MAX_PAGE_SIZE=50` take precedence.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let loaded = Self::read(path)?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Read configuration like [`AppConfig::load`] without validating it.
    pub fn read(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        let search = &self.search;
        if search.max_page_size == 0 {
            return Err(AppError::configuration("search.max_page_size must be positive"));
        }
        if search.default_page_size == 0 || search.default_page_size > search.max_page_size {
            return Err(AppError::configuration(format!(
                "search.default_page_size must be between 1 and {}",
                search.max_page_size
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(AppError::configuration(format!(
                "logging.format must be one of {}, got '{}'",
                LOG_FORMATS.join(", "),
                self.logging.format
            )));
        }
        Ok(())
    }
}
