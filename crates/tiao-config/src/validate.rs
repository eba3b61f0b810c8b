//! Validation helpers for configuration documents.

use crate::error::{ConfigError, ConfigResult};
use crate::model::UiConfig;

/// Log format names the telemetry crate understands.
const LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// Validate a configuration.
///
/// # Errors
/// Returns [`ConfigError::InvalidField`] for an empty or URL-unsafe resource
/// name, an unknown log format, zero lock timeouts (the lock would never
/// auto-release), or a zero audit log limit.
pub fn validate(config: &UiConfig) -> ConfigResult<()> {
    validate_resource_name(&config.resource_name)?;
    if let Some(format) = config.log_format.as_deref()
        && !LOG_FORMATS.contains(&format)
    {
        return Err(invalid("log_format", format, "must be `json` or `pretty`"));
    }
    ensure_positive("timings.request_lock_ms", config.timings.request_lock_ms)?;
    ensure_positive("timings.submit_lock_ms", config.timings.submit_lock_ms)?;
    if config.admin_logs_limit == 0 {
        return Err(invalid("admin_logs_limit", "0", "must be positive"));
    }
    Ok(())
}

/// Check that `raw` can stand as the host part of a callback URL.
///
/// # Errors
/// Returns [`ConfigError::InvalidField`] when the name is blank or carries a
/// path, query, fragment or whitespace.
pub fn validate_resource_name(raw: &str) -> ConfigResult<()> {
    let resource = raw.trim();
    if resource.is_empty() {
        return Err(invalid("resource_name", raw, "must not be empty"));
    }
    if resource.contains(['/', '?', '#', '@', '\\']) || resource.contains(char::is_whitespace) {
        return Err(invalid("resource_name", raw, "must be a bare host name"));
    }
    Ok(())
}

fn ensure_positive(field: &'static str, value: u64) -> ConfigResult<()> {
    if value == 0 {
        return Err(invalid(field, "0", "must be positive"));
    }
    Ok(())
}

fn invalid(field: &'static str, value: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidField {
        field,
        value: value.to_string(),
        reason,
    }
}
