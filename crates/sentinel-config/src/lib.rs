//! Sentinel configuration system.
//!
//! TOML-based configuration with serde defaults and full validation.
//! All sections have sensible defaults so a missing or partial config
//! works out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{SentinelConfig, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{default_config_path, load_from_path};

use sentinel_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<SentinelConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}
