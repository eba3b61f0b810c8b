//! JSON loading with host overrides.
//!
//! # Design
//! - The host page may embed a JSON document; every field is optional.
//! - A broken document never blocks the UI: the loader logs and falls back to defaults.
//! - A valid resource name reported by the host runtime wins over the document.

use tracing::warn;

use crate::error::{ConfigError, ConfigResult};
use crate::model::UiConfig;
use crate::validate::{validate, validate_resource_name};

impl UiConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidField`] when validation fails.
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })?;
        validate(&config)?;
        Ok(config)
    }

    /// Replace the resource name when the host runtime reports a usable one.
    ///
    /// Blank names are ignored; names that are not a bare host are logged and
    /// ignored as well.
    #[must_use]
    pub fn with_resource_name(mut self, resource: Option<String>) -> Self {
        let Some(name) = resource.map(|name| name.trim().to_string()) else {
            return self;
        };
        if name.is_empty() {
            return self;
        }
        match validate_resource_name(&name) {
            Ok(()) => self.resource_name = name,
            Err(err) => {
                warn!(error = %err, "host resource name rejected; keeping the configured one");
            }
        }
        self
    }
}

/// Load configuration from an optional embedded document, falling back to defaults.
#[must_use]
pub fn load_or_default(raw: Option<&str>, resource: Option<String>) -> UiConfig {
    let base = match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => UiConfig::default(),
        Some(raw) => UiConfig::from_json(raw).unwrap_or_else(|err| {
            warn!(error = %err, "ui config rejected; using defaults");
            UiConfig::default()
        }),
    };
    base.with_resource_name(resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NumberLocale;

    #[test]
    fn partial_documents_keep_defaults() {
        let config = UiConfig::from_json(r#"{"number_locale":"pt-BR","timings":{"focus_settle_ms":10}}"#)
            .expect("config parses");
        assert_eq!(config.number_locale, NumberLocale::PtBr);
        assert_eq!(config.timings.focus_settle_ms, 10);
        assert_eq!(config.timings.submit_lock_ms, 5_000);
    }

    #[test]
    fn broken_documents_fall_back() {
        let config = load_or_default(Some("{not json"), None);
        assert_eq!(config, UiConfig::default());
        let config = load_or_default(Some(r#"{"admin_logs_limit":0}"#), None);
        assert_eq!(config.admin_logs_limit, 80);
    }

    #[test]
    fn host_resource_name_overrides_document() {
        let config = load_or_default(Some(r#"{"resource_name":"doc_name"}"#), Some("host_name".into()));
        assert_eq!(config.resource_name, "host_name");
        let config = load_or_default(None, Some("  ".into()));
        assert_eq!(config.resource_name, "space_economy");
    }

    #[test]
    fn unsafe_host_resource_names_are_ignored() {
        for name in ["evil.example/steal", "two words", "eco?x=1", "eco#frag"] {
            let config =
                load_or_default(Some(r#"{"resource_name":"doc_name"}"#), Some(name.into()));
            assert_eq!(config.resource_name, "doc_name", "host name {name:?}");
        }
        let config = load_or_default(None, Some(" host_name ".into()));
        assert_eq!(config.host_base_url(), "https://host_name");
    }

    #[test]
    fn log_format_is_read_from_the_document() {
        let config = load_or_default(Some(r#"{"log_format":"json"}"#), None);
        assert_eq!(config.log_format.as_deref(), Some("json"));
        let config = load_or_default(Some(r#"{"log_format":"xml"}"#), None);
        assert_eq!(config.log_format, None);
    }
}
