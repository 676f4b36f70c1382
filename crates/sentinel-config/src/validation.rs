//! Configuration validation.
//!
//! Checks the content URL scheme, capture ranges, and prompt text.

use crate::schema::SentinelConfig;
use sentinel_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SentinelConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    let url = config.content.url.trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        errors.push(format!("content.url must be http(s), got '{url}'"));
    }

    if config.window.title.trim().is_empty() {
        errors.push("window.title must not be empty".into());
    }

    let rate = config.capture.sample_rate;
    if !(8_000..=192_000).contains(&rate) {
        errors.push(format!(
            "capture.sample_rate out of range 8000-192000: {rate}"
        ));
    }

    if config.quit_prompt.message.trim().is_empty() {
        errors.push("quit_prompt.message must not be empty".into());
    }
    if config.quit_prompt.yes_label.trim().is_empty()
        || config.quit_prompt.no_label.trim().is_empty()
    {
        errors.push("quit_prompt button labels must not be empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
