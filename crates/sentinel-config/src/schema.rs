//! Configuration schema types for Sentinel.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with defaults matching the shipped kiosk setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

// =============================================================================
// Content Config
// =============================================================================

/// Remote content configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// The single remote URL the kiosk window loads. Must be http(s).
    pub url: String,
    /// User agent string sent by the embedded webview.
    pub user_agent: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            url: "https://staging-website.prompthire.in/instruction".into(),
            user_agent: "Sentinel/0.1".into(),
        }
    }
}

// =============================================================================
// Window Config
// =============================================================================

/// Kiosk window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Path to a PNG window icon. Skipped with a warning when missing.
    pub icon: Option<PathBuf>,
    /// Keep the window above all others.
    pub always_on_top: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sentinel".into(),
            icon: None,
            always_on_top: true,
        }
    }
}

// =============================================================================
// Capture Config
// =============================================================================

/// Audio/video capture constraints requested by the page client on load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Audio sample rate in Hz (valid range: 8000-192000).
    pub sample_rate: u32,
    pub echo_cancellation: bool,
    pub noise_suppression: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            echo_cancellation: true,
            noise_suppression: true,
        }
    }
}

// =============================================================================
// Quit Prompt Config
// =============================================================================

/// Text shown by the confirm-before-quit prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuitPromptConfig {
    pub message: String,
    pub yes_label: String,
    pub no_label: String,
}

impl Default for QuitPromptConfig {
    fn default() -> Self {
        Self {
            message: "Are you sure you want to quit?".into(),
            yes_label: "Yes".into(),
            no_label: "No".into(),
        }
    }
}

// =============================================================================
// Root Config
// =============================================================================

/// Root configuration for the Sentinel shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelConfig {
    pub content: ContentConfig,
    pub window: WindowConfig,
    pub capture: CaptureConfig,
    pub quit_prompt: QuitPromptConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let config = SentinelConfig::default();
        assert!(config.content.url.starts_with("https://"));
        assert_eq!(config.capture.sample_rate, 44100);
        assert!(config.capture.echo_cancellation);
        assert!(config.capture.noise_suppression);
        assert!(config.window.always_on_top);
        assert!(config.window.icon.is_none());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: SentinelConfig = toml::from_str(
            r#"
            [content]
            url = "https://kiosk.example.com/start"
            "#,
        )
        .unwrap();
        assert_eq!(config.content.url, "https://kiosk.example.com/start");
        // Untouched sections keep defaults
        assert_eq!(config.capture.sample_rate, 44100);
        assert_eq!(config.quit_prompt.yes_label, "Yes");
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: SentinelConfig = toml::from_str("").unwrap();
        let defaults = SentinelConfig::default();
        assert_eq!(config.content.url, defaults.content.url);
        assert_eq!(config.window.title, defaults.window.title);
    }

    #[test]
    fn capture_section_overrides() {
        let config: SentinelConfig = toml::from_str(
            r#"
            [capture]
            sample_rate = 48000
            echo_cancellation = false
            "#,
        )
        .unwrap();
        assert_eq!(config.capture.sample_rate, 48000);
        assert!(!config.capture.echo_cancellation);
        // Missing field in the section still defaults
        assert!(config.capture.noise_suppression);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = SentinelConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: SentinelConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.content.url, config.content.url);
        assert_eq!(parsed.capture.sample_rate, config.capture.sample_rate);
    }
}
