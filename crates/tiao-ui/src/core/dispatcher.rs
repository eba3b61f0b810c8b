//! Host message dispatch.
//!
//! # Design
//! - `open` is always acknowledged with `ready`, even for modes this UI does
//!   not know.
//! - Every `adminData` reply releases the busy lock, whatever its key, so a
//!   reply the UI cannot use never leaves controls disabled.
//! - Payloads that do not match their schema are logged and replaced by
//!   defaults; the panel still opens. Lists keep the rows that decode, and an
//!   admin state that is not an object leaves the dashboard as it was.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tiao_protocol::{
    AdminDataKey, AdminLogsPayload, AdminRequest, AdminStatePayload, DebtRecord, HostMessage,
    HostRequest, OpenMode, PaymentPayload, VaultBalancePayload, decode_payload, lenient,
};
use tracing::{debug, warn};

use crate::core::effects::{Effect, Millis};
use crate::core::engine::{NO_REASON, PaymentContext, UiEngine};
use crate::core::error::{UiError, UiResult};
use crate::core::format::currency;
use crate::core::panels::PanelId;
use crate::core::render::{DebtDetailView, audit_log_rows, debt_rows};

impl UiEngine {
    /// Decode and apply a message given as JSON text.
    ///
    /// # Errors
    /// Returns [`UiError::MalformedMessage`] when the text is not an action
    /// envelope; the state is unchanged.
    pub fn handle_host_json(&mut self, raw: &str, now: Millis) -> UiResult<Vec<Effect>> {
        let message = HostMessage::from_json(raw)?;
        Ok(self.handle_host_message(message, now))
    }

    /// Decode and apply a message given as a JSON value.
    ///
    /// # Errors
    /// Returns [`UiError::MalformedMessage`] when the value is not an action
    /// envelope; the state is unchanged.
    pub fn handle_host_value(&mut self, value: Value, now: Millis) -> UiResult<Vec<Effect>> {
        let message = HostMessage::from_value(value)?;
        Ok(self.handle_host_message(message, now))
    }

    /// Apply a decoded host message.
    pub fn handle_host_message(&mut self, message: HostMessage, now: Millis) -> Vec<Effect> {
        debug!(action = message.action(), "host message");
        let mut effects = Vec::new();
        match message {
            HostMessage::Close => self.close(false, &mut effects),
            HostMessage::Open { mode, payload } => {
                effects.push(Effect::Post(HostRequest::Ready));
                match mode.as_deref().and_then(OpenMode::parse) {
                    Some(mode) => self.open_mode(mode, payload, now, &mut effects),
                    None => debug!(mode = mode.as_deref().unwrap_or(""), "unknown open mode"),
                }
            }
            HostMessage::AdminData { key, data } => {
                match key.as_deref().and_then(AdminDataKey::parse) {
                    Some(key) => self.apply_admin_data(key, data, &mut effects),
                    None => debug!(key = key.as_deref().unwrap_or(""), "unknown admin data key"),
                }
                self.busy.release();
            }
            HostMessage::Unknown => debug!("ignoring unknown host action"),
        }
        effects
    }

    fn open_mode(
        &mut self,
        mode: OpenMode,
        payload: Option<Value>,
        now: Millis,
        effects: &mut Vec<Effect>,
    ) {
        let locale = self.config().number_locale;
        match mode {
            OpenMode::Admin => {
                self.open(PanelId::AdminDashboard, effects);
                self.admin.bootstrap();
                self.apply_admin_state("admin", payload);
                self.admin_request(AdminRequest::State, now, effects);
            }
            OpenMode::VaultView => {
                let vault: VaultBalancePayload = decode_or_default("vault_view", payload);
                self.vault_balance = currency(vault.balance.unwrap_or(0.0), locale);
                self.open(PanelId::VaultView, effects);
            }
            OpenMode::VaultAdd => {
                self.inputs.vault_add.clear();
                self.open(PanelId::VaultAdd, effects);
            }
            OpenMode::VaultWithdraw => {
                self.inputs.vault_withdraw.clear();
                self.open(PanelId::VaultWithdraw, effects);
            }
            OpenMode::Tax => {
                self.inputs.calculator.clear();
                self.open(PanelId::TaxCalculator, effects);
            }
            OpenMode::Payment => {
                let payment: PaymentPayload = decode_or_default("payment", payload);
                self.payment = PaymentContext {
                    tax: payment.tax.unwrap_or(0.0),
                    reason: payment
                        .reason
                        .filter(|reason| !reason.is_empty())
                        .unwrap_or_else(|| NO_REASON.to_string()),
                };
                self.open(PanelId::Payment, effects);
            }
        }
    }

    /// A state payload that is not an object changes nothing; its sections
    /// are otherwise decoded independently of each other.
    fn apply_admin_state(&mut self, context: &'static str, payload: Option<Value>) {
        match decode_payload::<AdminStatePayload>(context, payload) {
            Ok(state) => {
                self.admin.apply_authoritative(state);
            }
            Err(err) => warn!(error = %UiError::from(err), "admin state ignored"),
        }
    }

    fn apply_admin_data(&mut self, key: AdminDataKey, data: Option<Value>, effects: &mut Vec<Effect>) {
        let locale = self.config().number_locale;
        match key {
            AdminDataKey::AdminState => self.apply_admin_state(key.as_str(), data),
            AdminDataKey::AdminLogs => {
                let logs: AdminLogsPayload = decode_or_default(key.as_str(), data);
                self.audit_log = audit_log_rows(logs.logs.as_deref());
            }
            AdminDataKey::DebtsActive => {
                let debts = data.as_ref().map_or_else(Vec::new, |value| {
                    lenient::each::<DebtRecord>(value).unwrap_or_else(|| {
                        warn!(context = key.as_str(), "debt list is not an array; showing none");
                        Vec::new()
                    })
                });
                self.debts = debt_rows(Some(debts.as_slice()), locale);
                self.open(PanelId::DebtList, effects);
            }
            AdminDataKey::DebtSpecific => {
                let debt: DebtRecord = decode_or_default(key.as_str(), data);
                self.debt_detail = DebtDetailView::from_record(&debt, locale);
                self.open(PanelId::DebtDetail, effects);
            }
        }
    }
}

fn decode_or_default<T>(context: &'static str, payload: Option<Value>) -> T
where
    T: DeserializeOwned + Default,
{
    decode_payload(context, payload).unwrap_or_else(|err| {
        warn!(error = %UiError::from(err), "payload ignored; using defaults");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::posted;
    use crate::core::render::NO_DATA;
    use serde_json::json;
    use tiao_test_support::fixtures;

    fn push(engine: &mut UiEngine, message: Value) -> Vec<Effect> {
        engine
            .handle_host_value(message, 0)
            .expect("fixture messages decode")
    }

    #[test]
    fn open_acknowledges_even_unknown_modes() {
        let mut engine = UiEngine::default();
        let effects = push(&mut engine, fixtures::open_message("garage", json!({})));
        assert_eq!(posted(&effects), vec![&HostRequest::Ready]);
        assert_eq!(engine.visibility().visible_panel(), None);
    }

    #[test]
    fn payment_open_loads_context_with_defaults() {
        let mut engine = UiEngine::default();
        push(&mut engine, fixtures::open_message("payment", json!({"tax": "250"})));
        assert!(engine.visibility().is_visible(PanelId::Payment));
        assert_eq!(engine.payment().tax, 250.0);
        assert_eq!(engine.payment().reason, NO_REASON);
    }

    #[test]
    fn vault_view_shows_formatted_balance() {
        let mut engine = UiEngine::default();
        push(&mut engine, fixtures::open_message("vault_view", json!({"balance": 12345.6})));
        assert_eq!(engine.vault_balance(), "$12,345");
        assert!(engine.visibility().is_visible(PanelId::VaultView));
    }

    #[test]
    fn opening_forms_resets_their_inputs() {
        let mut engine = UiEngine::default();
        engine.inputs.vault_add = "99".into();
        push(&mut engine, fixtures::open_message("vault_add", Value::Null));
        assert_eq!(engine.inputs().vault_add, "");
        assert!(engine.visibility().is_visible(PanelId::VaultAdd));
    }

    #[test]
    fn admin_open_bootstraps_and_requests_state() {
        let mut engine = UiEngine::default();
        let effects = push(
            &mut engine,
            fixtures::open_message("admin", fixtures::admin_state(500.0, "auto")),
        );
        assert!(engine.visibility().is_visible(PanelId::AdminDashboard));
        assert!(engine.admin().is_ready());
        assert_eq!(engine.admin().metrics().vault, "$500");
        assert_eq!(
            posted(&effects),
            vec![
                &HostRequest::Ready,
                &HostRequest::AdminRequestData(AdminRequest::State)
            ]
        );
        assert!(engine.busy().is_locked(0));
    }

    #[test]
    fn non_object_admin_state_leaves_the_dashboard_alone() {
        let mut engine = UiEngine::default();
        push(
            &mut engine,
            fixtures::open_message("admin", fixtures::admin_state(500.0, "manual")),
        );
        let before = engine.admin().clone();
        push(&mut engine, fixtures::admin_data("admin_state", json!("offline")));
        assert_eq!(engine.admin(), &before);
    }

    #[test]
    fn admin_data_always_releases_busy() {
        let mut engine = UiEngine::default();
        engine.handle_command(crate::core::commands::UiCommand::RefreshAdmin, 0);
        assert!(engine.busy().is_locked(0));
        push(&mut engine, fixtures::admin_data("weather", json!({})));
        assert!(!engine.busy().is_locked(0));
    }

    #[test]
    fn debts_open_their_panels() {
        let mut engine = UiEngine::default();
        push(&mut engine, fixtures::admin_data("debts_active", fixtures::debt_rows(3)));
        assert!(engine.visibility().is_visible(PanelId::DebtList));
        assert_eq!(engine.debts().row_count(), 3);

        push(&mut engine, fixtures::admin_data("debts_active", json!("not a list")));
        assert!(engine.debts().is_blank());

        push(
            &mut engine,
            fixtures::admin_data(
                "debts_active",
                json!([{"playerName": "Ana", "amount": 5}, 17, {"playerName": "Rui"}]),
            ),
        );
        assert_eq!(engine.debts().row_count(), 2);

        push(
            &mut engine,
            fixtures::admin_data("debt_specific", json!({"playerName": "Ana", "amount": 10})),
        );
        assert!(engine.visibility().is_visible(PanelId::DebtDetail));
        assert_eq!(engine.debt_detail().name, "Ana");
        assert_eq!(engine.debt_detail().amount, "$10");
    }

    #[test]
    fn logs_render_rows_or_placeholder() {
        let mut engine = UiEngine::default();
        push(&mut engine, fixtures::admin_data("admin_logs", fixtures::audit_logs(2)));
        assert_eq!(engine.audit_log().row_count(), 2);
        push(&mut engine, fixtures::admin_data("admin_logs", json!({"logs": []})));
        assert_eq!(
            engine.audit_log().placeholder.map(|placeholder| placeholder.text),
            Some(NO_DATA)
        );
    }

    #[test]
    fn host_close_does_not_notify_back() {
        let mut engine = UiEngine::default();
        push(&mut engine, fixtures::open_message("tax", Value::Null));
        let effects = push(&mut engine, fixtures::close_message());
        assert!(posted(&effects).is_empty());
    }

    #[test]
    fn malformed_messages_are_rejected_without_side_effects() {
        let mut engine = UiEngine::default();
        let before = engine.clone();
        assert!(matches!(
            engine.handle_host_json("{\"mode\":\"tax\"}", 0),
            Err(UiError::MalformedMessage { .. })
        ));
        assert!(engine.handle_host_json("not json", 0).is_err());
        assert_eq!(engine, before);
        assert!(push(&mut engine, json!({"action": "teleport"})).is_empty());
    }
}
