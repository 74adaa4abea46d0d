//! Configuration validation rules.

use super::schema::Config;
use crate::safety::ContentFilter;
use crate::utils::safe_filename;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    let base_url = config.backend.base_url.trim();
    if base_url.is_empty() {
        errors.push("backend.base_url must not be empty".to_string());
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push("backend.base_url must start with http:// or https://".to_string());
    }

    if config.admission.max_message_length == 0 {
        errors.push("admission.max_message_length must be > 0".to_string());
    }
    if let Err(e) = ContentFilter::new(&config.admission.unsafe_patterns) {
        errors.push(format!("admission.unsafe_patterns: {}", e));
    }

    if config.storage.history_key.trim().is_empty() {
        errors.push("storage.history_key must not be empty".to_string());
    }
    if config.storage.theme_key.trim().is_empty() {
        errors.push("storage.theme_key must not be empty".to_string());
    }
    // Keys that map to the same file would overwrite each other.
    if safe_filename(&config.storage.history_key) == safe_filename(&config.storage.theme_key) {
        errors.push("storage.history_key and storage.theme_key must differ".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}
