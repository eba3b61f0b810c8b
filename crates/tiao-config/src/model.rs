//! Typed UI configuration.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Locale used to group thousands in money values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberLocale {
    /// `1,234.50`
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// `1.234,50`
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl NumberLocale {
    /// Thousands separator.
    #[must_use]
    pub const fn group_separator(self) -> char {
        match self {
            Self::EnUs => ',',
            Self::PtBr => '.',
        }
    }
}

/// Delays and lock timeouts, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Busy timeout for admin data requests.
    pub request_lock_ms: u64,
    /// Busy timeout for submissions (save, issue, pay, vault moves).
    pub submit_lock_ms: u64,
    /// Delay before focusing a freshly opened panel.
    pub focus_settle_ms: u64,
    /// Overlay close transition length.
    pub close_transition_ms: u64,
    /// Optimistic "request sent" delay for tax issuance.
    pub issue_feedback_ms: u64,
    /// Optimistic success delay for payments.
    pub payment_feedback_ms: u64,
    /// Calculator re-enable delay.
    pub calculator_unlock_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            request_lock_ms: defaults::REQUEST_LOCK_MS,
            submit_lock_ms: defaults::SUBMIT_LOCK_MS,
            focus_settle_ms: defaults::FOCUS_SETTLE_MS,
            close_transition_ms: defaults::CLOSE_TRANSITION_MS,
            issue_feedback_ms: defaults::ISSUE_FEEDBACK_MS,
            payment_feedback_ms: defaults::PAYMENT_FEEDBACK_MS,
            calculator_unlock_ms: defaults::CALCULATOR_UNLOCK_MS,
        }
    }
}

/// Complete UI configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Host resource name; requests go to `https://{resource_name}/{event}`.
    pub resource_name: String,
    /// Raise logging to `debug`.
    pub debug: bool,
    /// Log output format (`json` or `pretty`); the build default when unset.
    pub log_format: Option<String>,
    /// Thousands grouping for money values.
    pub number_locale: NumberLocale,
    /// Audit log entries requested per fetch.
    pub admin_logs_limit: u32,
    /// Delays and lock timeouts.
    pub timings: Timings,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            resource_name: defaults::RESOURCE_NAME.to_string(),
            debug: false,
            log_format: None,
            number_locale: NumberLocale::default(),
            admin_logs_limit: defaults::ADMIN_LOGS_LIMIT,
            timings: Timings::default(),
        }
    }
}

impl UiConfig {
    /// Base URL for host callbacks.
    #[must_use]
    pub fn host_base_url(&self) -> String {
        format!("https://{}", self.resource_name)
    }

    /// Log level implied by the `debug` flag.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}
