//! Widget configuration loading
//!
//! Native embedders load [`WidgetConfig`] from TOML; the browser adapter
//! deserializes it from a JS object and runs the same [`validate`].

use std::path::Path;

use tickdown_types::WidgetConfig;

use crate::error::ConfigError;

/// Parse and validate a TOML document. Missing keys take their defaults.
pub fn from_toml_str(source: &str) -> Result<WidgetConfig, ConfigError> {
    let config: WidgetConfig =
        toml::from_str(source).map_err(|source| ConfigError::ParseToml { source })?;
    validate(&config)?;
    Ok(config)
}

/// Read, parse and validate a TOML config file
pub fn load(path: &Path) -> Result<WidgetConfig, ConfigError> {
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let config = from_toml_str(&source)?;
    tracing::debug!(path = %path.display(), "Loaded widget config");
    Ok(config)
}

/// Reject settings the widgets cannot run with
pub fn validate(config: &WidgetConfig) -> Result<(), ConfigError> {
    if config.countdown.tick_interval_ms == 0 {
        return Err(invalid("countdown.tick_interval_ms must be greater than zero"));
    }
    if config.cooldown.tick_interval_ms == 0 {
        return Err(invalid("cooldown.tick_interval_ms must be greater than zero"));
    }
    if config.countdown.warning_threshold_secs < config.countdown.urgent_threshold_secs {
        return Err(invalid(
            "countdown.warning_threshold_secs must not be below urgent_threshold_secs",
        ));
    }

    let ids = [
        ("rate_limit.container_id", &config.rate_limit.container_id),
        ("rate_limit.timer_element_id", &config.rate_limit.timer_element_id),
        ("rate_limit.alert_element_id", &config.rate_limit.alert_element_id),
    ];
    for (key, value) in ids {
        if value.trim().is_empty() {
            return Err(invalid(&format!("{key} must not be empty")));
        }
    }

    Ok(())
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_string(),
    }
}
