//! TOML config file loading and creation.

use crate::schema::{SentinelConfig, CONFIG_SCHEMA_VERSION};
use crate::validation;
use sentinel_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// After loading, the config is validated; if validation fails, a warning
/// is logged and the default config is returned.
pub fn load_from_path(path: &Path) -> Result<SentinelConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: SentinelConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(SentinelConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/sentinel/config.toml`
/// On Linux: `~/.config/sentinel/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<SentinelConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(SentinelConfig::default());
    }

    load_from_path(&path)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("sentinel").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let content = default_config_toml();

    std::fs::write(path, content).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Generate the default TOML config content with comments.
fn default_config_toml() -> String {
    format!(
        r##"# Sentinel Configuration
# Schema version {CONFIG_SCHEMA_VERSION}
# Only override what you want to change -- missing fields use defaults.

[content]
# url = "https://staging-website.prompthire.in/instruction"
# user_agent = "Sentinel/0.1"

[window]
# title = "Sentinel"
# icon = "/path/to/icon.png"
# always_on_top = true

[capture]
# sample_rate = 44100        # 8000-192000
# echo_cancellation = true
# noise_suppression = true

[quit_prompt]
# message = "Are you sure you want to quit?"
# yes_label = "Yes"
# no_label = "No"
"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [content]
            url = "https://kiosk.example.com"

            [capture]
            sample_rate = 48000
            "#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.content.url, "https://kiosk.example.com");
        assert_eq!(config.capture.sample_rate, 48000);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is [ not toml").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [content]
            url = "not-a-url"
            "#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        // Validation failed, defaults returned
        assert!(config.content.url.starts_with("https://"));
    }

    #[test]
    fn create_default_writes_parseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        create_default_config(&path).unwrap();
        assert!(path.exists());

        // The generated template (all comments) parses to defaults
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.capture.sample_rate, 44100);
    }

    #[test]
    fn default_template_states_current_schema_version() {
        let template = default_config_toml();
        assert!(template.contains(&format!("# Schema version {CONFIG_SCHEMA_VERSION}")));
    }
}
