//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::safety::{
    default_unsafe_patterns, UnsafePattern, DEFAULT_MAX_MESSAGE_LENGTH, DEFAULT_MIN_INTERVAL_MS,
};
use crate::preferences::THEME_KEY;
use crate::session::HISTORY_KEY;

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Chat backend configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// Admission pipeline configuration
    #[serde(default)]
    pub admission: AdmissionConfig,
    /// Local storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chat backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL; `/chat` and `/reset` are appended
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Admission pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionConfig {
    /// Maximum message length in UTF-16 code units
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
    /// Minimum interval between accepted messages
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    /// Unsafe-content patterns, evaluated in order
    #[serde(default = "default_unsafe_patterns")]
    pub unsafe_patterns: Vec<UnsafePattern>,
}

fn default_max_message_length() -> usize {
    DEFAULT_MAX_MESSAGE_LENGTH
}

fn default_min_interval_ms() -> u64 {
    DEFAULT_MIN_INTERVAL_MS
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_message_length: default_max_message_length(),
            min_interval_ms: default_min_interval_ms(),
            unsafe_patterns: default_unsafe_patterns(),
        }
    }
}

/// Local storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage directory; empty means `<config dir>/storage`
    #[serde(default)]
    pub dir: String,
    /// Key holding the saved chat history
    #[serde(default = "default_history_key")]
    pub history_key: String,
    /// Key holding the theme preference
    #[serde(default = "default_theme_key")]
    pub theme_key: String,
}

fn default_history_key() -> String {
    HISTORY_KEY.to_string()
}

fn default_theme_key() -> String {
    THEME_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            history_key: default_history_key(),
            theme_key: default_theme_key(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            overrides: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.admission.max_message_length, 500);
        assert_eq!(config.admission.min_interval_ms, 3000);
        assert_eq!(config.admission.unsafe_patterns.len(), 16);
        assert_eq!(config.storage.history_key, "chatHistory");
        assert_eq!(config.storage.theme_key, "theme");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"admission":{"max_message_length":200}}"#).unwrap();
        assert_eq!(config.admission.max_message_length, 200);
        assert_eq!(config.admission.min_interval_ms, 3000);
        assert_eq!(config.backend.base_url, "http://localhost:8000");
    }
}
