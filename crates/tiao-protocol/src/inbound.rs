//! Host → UI messages.
//!
//! # Design
//! - The envelope is tagged by `action`; unknown actions decode to
//!   [`HostMessage::Unknown`] so newer hosts never break older UIs.
//! - `mode` and `key` stay strings in the envelope and are resolved with
//!   [`OpenMode::parse`] / [`AdminDataKey::parse`], keeping "unknown" a
//!   recoverable state instead of a decode failure.
//! - Payloads are decoded lazily per branch with [`decode_payload`].

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::catalog::{self, TaxTypeDescriptor};
use crate::error::{ProtocolError, ProtocolResult};
use crate::lenient;
use crate::records::{AuditLogEntry, Metrics};

/// Message pushed by the host into the browser surface.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostMessage {
    /// Host-initiated close of whatever is showing.
    Close,
    /// Open a panel described by `mode`.
    Open {
        /// Panel selector (`admin`, `vault_view`, ...).
        #[serde(default, deserialize_with = "lenient::text")]
        mode: Option<String>,
        /// Mode-specific payload.
        #[serde(default)]
        payload: Option<Value>,
    },
    /// Reply to an earlier `admin_requestData` call.
    AdminData {
        /// Which request this answers (`admin_state`, `admin_logs`, ...).
        #[serde(default, deserialize_with = "lenient::text")]
        key: Option<String>,
        /// Reply body.
        #[serde(default)]
        data: Option<Value>,
    },
    /// Any action this UI does not know about.
    #[serde(other)]
    Unknown,
}

impl HostMessage {
    /// Decode a message from a JSON value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::MalformedMessage`] when the value is not an
    /// object carrying a string `action`.
    pub fn from_value(value: Value) -> ProtocolResult<Self> {
        serde_json::from_value(value).map_err(|source| ProtocolError::MalformedMessage { source })
    }

    /// Decode a message from JSON text.
    ///
    /// # Errors
    /// Returns [`ProtocolError::MalformedMessage`] for invalid JSON or envelopes.
    pub fn from_json(raw: &str) -> ProtocolResult<Self> {
        serde_json::from_str(raw).map_err(|source| ProtocolError::MalformedMessage { source })
    }

    /// Discriminator used in logs.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Open { .. } => "open",
            Self::AdminData { .. } => "adminData",
            Self::Unknown => "unknown",
        }
    }
}

/// Panel requested by an `open` message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenMode {
    /// Admin dashboard.
    Admin,
    /// Vault balance view.
    VaultView,
    /// Vault deposit form.
    VaultAdd,
    /// Vault withdrawal form.
    VaultWithdraw,
    /// Tax calculator.
    Tax,
    /// Tax payment confirmation.
    Payment,
}

impl OpenMode {
    /// Resolve a wire mode; unknown modes yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Self::Admin),
            "vault_view" => Some(Self::VaultView),
            "vault_add" => Some(Self::VaultAdd),
            "vault_withdraw" => Some(Self::VaultWithdraw),
            "tax" => Some(Self::Tax),
            "payment" => Some(Self::Payment),
            _ => None,
        }
    }

    /// Wire value of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::VaultView => "vault_view",
            Self::VaultAdd => "vault_add",
            Self::VaultWithdraw => "vault_withdraw",
            Self::Tax => "tax",
            Self::Payment => "payment",
        }
    }
}

/// Which request an `adminData` message answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminDataKey {
    /// Metrics + settings snapshot.
    AdminState,
    /// Audit log page.
    AdminLogs,
    /// Active debts list.
    DebtsActive,
    /// Single debt lookup.
    DebtSpecific,
}

impl AdminDataKey {
    /// Resolve a wire key; unknown keys yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin_state" => Some(Self::AdminState),
            "admin_logs" => Some(Self::AdminLogs),
            "debts_active" => Some(Self::DebtsActive),
            "debt_specific" => Some(Self::DebtSpecific),
            _ => None,
        }
    }

    /// Wire value of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdminState => "admin_state",
            Self::AdminLogs => "admin_logs",
            Self::DebtsActive => "debts_active",
            Self::DebtSpecific => "debt_specific",
        }
    }
}

/// `open` payload for the vault balance view.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct VaultBalancePayload {
    /// Current vault balance.
    #[serde(default, deserialize_with = "lenient::number")]
    pub balance: Option<f64>,
}

/// `open` payload for the payment confirmation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PaymentPayload {
    /// Amount due.
    #[serde(default, deserialize_with = "lenient::number")]
    pub tax: Option<f64>,
    /// Reason shown to the player.
    #[serde(default, deserialize_with = "lenient::text")]
    pub reason: Option<String>,
}

/// `admin_state` reply (also the `open`/`admin` payload).
///
/// Each section decodes on its own: a malformed metrics object or catalog
/// entry never costs the settings document, and vice versa.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AdminStatePayload {
    /// Headline metrics; `None` when absent or not an object.
    #[serde(default, deserialize_with = "lenient::object")]
    pub metrics: Option<Metrics>,
    /// Raw settings document; typed by the reconciler.
    #[serde(default)]
    pub settings: Option<Value>,
    /// Host-specific tax catalog, restricted to entries that carry a key.
    #[serde(default, rename = "taxCatalog", deserialize_with = "catalog::host_catalog")]
    pub tax_catalog: Option<Vec<TaxTypeDescriptor>>,
}

/// `admin_logs` reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AdminLogsPayload {
    /// Log entries, newest first as sent by the host; entries that are not
    /// objects are dropped.
    #[serde(default, deserialize_with = "lenient::list")]
    pub logs: Option<Vec<AuditLogEntry>>,
}

/// Decode an optional payload; absent or `null` payloads yield the default.
///
/// # Errors
/// Returns [`ProtocolError::UnexpectedPayload`] tagged with `context` when the
/// payload does not match `T`.
pub fn decode_payload<T>(context: &'static str, payload: Option<Value>) -> ProtocolResult<T>
where
    T: DeserializeOwned + Default,
{
    match payload {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value)
            .map_err(|source| ProtocolError::UnexpectedPayload { context, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::DebtRecord;
    use serde_json::json;
    use tiao_test_support::fixtures;

    #[test]
    fn envelopes_decode_by_action() {
        assert_eq!(
            HostMessage::from_value(json!({"action": "close"})).expect("close"),
            HostMessage::Close
        );
        let open = HostMessage::from_value(fixtures::open_message("payment", json!({"tax": 10})))
            .expect("open");
        assert_eq!(
            open,
            HostMessage::Open {
                mode: Some("payment".to_string()),
                payload: Some(json!({"tax": 10})),
            }
        );
        let data = HostMessage::from_value(fixtures::admin_data("admin_logs", json!(null)))
            .expect("adminData");
        assert_eq!(
            data,
            HostMessage::AdminData {
                key: Some("admin_logs".to_string()),
                data: None,
            }
        );
    }

    #[test]
    fn unknown_actions_are_tolerated_but_missing_actions_are_not() {
        assert_eq!(
            HostMessage::from_json(r#"{"action":"teleport","x":1}"#).expect("unknown"),
            HostMessage::Unknown
        );
        assert!(HostMessage::from_json(r#"{"mode":"tax"}"#).is_err());
        assert!(HostMessage::from_json("[]").is_err());
        assert!(HostMessage::from_json("not json").is_err());
    }

    #[test]
    fn modes_and_keys_round_trip_their_wire_names() {
        for mode in [
            OpenMode::Admin,
            OpenMode::VaultView,
            OpenMode::VaultAdd,
            OpenMode::VaultWithdraw,
            OpenMode::Tax,
            OpenMode::Payment,
        ] {
            assert_eq!(OpenMode::parse(mode.as_str()), Some(mode));
        }
        for key in [
            AdminDataKey::AdminState,
            AdminDataKey::AdminLogs,
            AdminDataKey::DebtsActive,
            AdminDataKey::DebtSpecific,
        ] {
            assert_eq!(AdminDataKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(OpenMode::parse("garage"), None);
        assert_eq!(AdminDataKey::parse("weather"), None);
    }

    #[test]
    fn payload_decoding_defaults_and_reports_context() {
        let state: AdminStatePayload =
            decode_payload("admin_state", None).expect("absent payload defaults");
        assert_eq!(state, AdminStatePayload::default());

        let debts: Vec<DebtRecord> =
            decode_payload("debts_active", Some(fixtures::debt_rows(2))).expect("debts decode");
        assert_eq!(debts.len(), 2);

        let err = decode_payload::<Vec<DebtRecord>>("debts_active", Some(json!("oops")))
            .expect_err("string is not a list");
        assert!(matches!(
            err,
            ProtocolError::UnexpectedPayload { context: "debts_active", .. }
        ));
    }

    #[test]
    fn admin_state_sections_decode_independently() {
        let state: AdminStatePayload = decode_payload(
            "admin_state",
            Some(json!({
                "metrics": {"vault": 1000},
                "settings": {"mode": {"inflation": "manual"}, "limits": {"maxDebt": 5000}},
                "taxCatalog": [{"key": "FEE", "fixed": 50}, {"label": "orphan"}]
            })),
        )
        .expect("partial state decodes");
        assert_eq!(state.metrics.and_then(|metrics| metrics.vault), Some(1000.0));
        assert_eq!(
            state.settings.map(|settings| settings["limits"]["maxDebt"].clone()),
            Some(json!(5000))
        );
        let catalog = state.tax_catalog.expect("keyed entry kept");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].label, "FEE");

        let state: AdminStatePayload = decode_payload(
            "admin_state",
            Some(json!({"metrics": "n/a", "settings": {}, "taxCatalog": "none"})),
        )
        .expect("malformed sections fall away");
        assert_eq!(state.metrics, None);
        assert_eq!(state.tax_catalog, None);
        assert_eq!(state.settings, Some(json!({})));

        let logs: AdminLogsPayload = decode_payload(
            "admin_logs",
            Some(json!({"logs": [{"message": "ok"}, "garbage", {"category": "tax"}]})),
        )
        .expect("logs decode");
        assert_eq!(logs.logs.map(|logs| logs.len()), Some(2));
    }
}
