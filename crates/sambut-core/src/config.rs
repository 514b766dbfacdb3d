//! Page configuration.
//!
//! Every field has a default matching the shipped page; hosts may override any
//! subset from JSON:
//!
//! ```json
//! { "alert_timeout_ms": 8000, "storage_keys": { "history": "sambut.history" } }
//! ```

use core::time::Duration;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage key names for the two persisted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Key of the saved display name.
    pub user_name: String,
    /// Key of the JSON submission history.
    pub history: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            user_name: "userName".to_string(),
            history: "messageHistory".to_string(),
        }
    }
}

/// Timing, layout, and storage settings for a [`Page`](crate::Page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Alert auto-dismiss delay. Default: 5000.
    pub alert_timeout_ms: u64,
    /// Delay before the alert slides in. Default: 100.
    pub alert_reveal_delay_ms: u64,
    /// Duration of the greeting pulse. Default: 300.
    pub pulse_duration_ms: u64,
    /// Number of submissions rendered in the history panel. Default: 5.
    pub history_preview_limit: usize,
    /// Fixed header height subtracted from anchor scroll targets. Default: 60.
    pub header_offset_px: f64,
    /// Scroll offset above which the header gets the raised shadow. Default: 100.
    pub shadow_threshold_px: f64,
    pub storage_keys: StorageKeys,
    /// Maximum tracing level: `error`, `warn`, `info`, `debug`, `trace`, or `off`.
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            alert_timeout_ms: 5_000,
            alert_reveal_delay_ms: 100,
            pulse_duration_ms: 300,
            history_preview_limit: 5,
            header_offset_px: 60.0,
            shadow_threshold_px: 100.0,
            storage_keys: StorageKeys::default(),
            log_level: "info".to_string(),
        }
    }
}

impl PageConfig {
    /// Parse a JSON override document on top of the defaults.
    ///
    /// The document must be an object; serde would otherwise accept an array
    /// and assign fields by position.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let document: serde_json::Value = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        if !document.is_object() {
            return Err(ConfigError::Invalid("options must be a JSON object"));
        }
        if document.get("storage_keys").is_some_and(|keys| !keys.is_object()) {
            return Err(ConfigError::Invalid("storage_keys must be a JSON object"));
        }
        let config: Self = serde_json::from_value(document).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the page cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alert_timeout_ms == 0 {
            return Err(ConfigError::Invalid("alert_timeout_ms must be positive"));
        }
        if self.alert_reveal_delay_ms >= self.alert_timeout_ms {
            return Err(ConfigError::Invalid(
                "alert_reveal_delay_ms must be shorter than alert_timeout_ms",
            ));
        }
        if self.storage_keys.user_name.is_empty() || self.storage_keys.history.is_empty() {
            return Err(ConfigError::Invalid("storage keys must be non-empty"));
        }
        if self.storage_keys.user_name == self.storage_keys.history {
            return Err(ConfigError::Invalid("storage keys must be distinct"));
        }
        if !self.header_offset_px.is_finite() || !self.shadow_threshold_px.is_finite() {
            return Err(ConfigError::Invalid("pixel offsets must be finite"));
        }
        Ok(())
    }

    #[must_use]
    pub fn alert_timeout(&self) -> Duration {
        Duration::from_millis(self.alert_timeout_ms)
    }

    #[must_use]
    pub fn alert_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.alert_reveal_delay_ms)
    }

    #[must_use]
    pub fn pulse_duration(&self) -> Duration {
        Duration::from_millis(self.pulse_duration_ms)
    }
}

/// Configuration could not be used.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON document did not parse.
    Parse(serde_json::Error),
    /// A value is out of range.
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid page config: {e}"),
            Self::Invalid(msg) => write!(f, "invalid page config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}
