//! Admin dashboard state: authoritative settings, local draft, and the
//! issuance form.
//!
//! # Design
//! - The host owns the settings; the dashboard keeps an authoritative copy
//!   plus an independent working draft.
//! - Pushes always refresh metrics and the tax catalog, but only replace the
//!   draft while there are no unsaved local edits.
//! - Saving is optimistic: the dirty flag clears as soon as the request is
//!   posted and the host is expected to push the new state back.

pub mod issue;
pub mod metrics;

use serde_json::Value;
use tiao_config::NumberLocale;
use tiao_protocol::lenient::parse_number;
use tiao_protocol::{
    AdminRequest, AdminSettings, AdminStatePayload, HostRequest, ModeTarget, SettingField,
    SettingMode, TaxTypeDescriptor, default_tax_catalog,
};
use tracing::{debug, warn};

use crate::core::busy::BusyLock;
use crate::core::effects::{Effect, Millis, TimerEvent};
use issue::{IssueForm, IssueRejection, StatusTone};
use metrics::MetricsView;

/// Status shown while an issuance request is in flight.
pub const ISSUE_SENDING: &str = "Sending…";
/// Status shown once the issuance request was handed to the host.
pub const ISSUE_SENT: &str = "Request sent.";

/// Dashboard section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdminView {
    /// Metrics and quick actions.
    #[default]
    Overview,
    /// Economy settings editor.
    Settings,
    /// Tax issuance form.
    Issue,
    /// Vault and debt operations.
    Operations,
    /// Audit log.
    Logs,
}

impl AdminView {
    /// All sections in navigation order.
    pub const ALL: [Self; 5] = [
        Self::Overview,
        Self::Settings,
        Self::Issue,
        Self::Operations,
        Self::Logs,
    ];

    /// Resolve a navigation key; unknown keys show the overview.
    #[must_use]
    pub fn from_key(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|view| view.as_str() == raw)
            .unwrap_or_default()
    }

    /// Navigation key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Settings => "settings",
            Self::Issue => "issue",
            Self::Operations => "operations",
            Self::Logs => "logs",
        }
    }
}

/// Outcome of an issuance submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The busy lock was held; nothing happened.
    Ignored,
    /// Refused locally with an inline message.
    Rejected(IssueRejection),
    /// Posted to the host.
    Sent,
}

/// Settings reconciler and dashboard view state.
#[derive(Clone, Debug, PartialEq)]
pub struct AdminReconciler {
    ready: bool,
    dirty: bool,
    authoritative: Option<AdminSettings>,
    draft: Option<AdminSettings>,
    manual_text: [String; 2],
    view: AdminView,
    metrics: MetricsView,
    tax_catalog: Vec<TaxTypeDescriptor>,
    issue: IssueForm,
    locale: NumberLocale,
}

impl Default for AdminReconciler {
    fn default() -> Self {
        Self::new(NumberLocale::default())
    }
}

impl AdminReconciler {
    /// Empty reconciler formatting money for `locale`.
    #[must_use]
    pub fn new(locale: NumberLocale) -> Self {
        Self {
            ready: false,
            dirty: false,
            authoritative: None,
            draft: None,
            manual_text: [String::new(), String::new()],
            view: AdminView::Overview,
            metrics: MetricsView::from_metrics(&tiao_protocol::Metrics::default(), locale),
            tax_catalog: default_tax_catalog(),
            issue: IssueForm::default(),
            locale,
        }
    }

    /// Reset for a fresh dashboard session.
    pub fn bootstrap(&mut self) {
        self.view = AdminView::Overview;
        self.ready = false;
        self.dirty = false;
    }

    /// Apply a host push. Returns whether the settings draft was replaced.
    ///
    /// Metrics and the catalog refresh on every push. A settings document
    /// that does not decode leaves the current draft untouched.
    pub fn apply_authoritative(&mut self, payload: AdminStatePayload) -> bool {
        let settings = payload
            .settings
            .map_or_else(|| Ok(AdminSettings::default()), AdminSettings::from_value);

        let embedded = settings.as_ref().ok().and_then(AdminSettings::tax_catalog);
        if let Some(catalog) = payload.tax_catalog.or(embedded) {
            self.tax_catalog = catalog;
        }
        self.issue.sync_with_catalog(&self.tax_catalog);
        self.metrics = MetricsView::from_metrics(&payload.metrics.unwrap_or_default(), self.locale);

        let settings = match settings {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, "settings push did not match the schema; keeping the draft");
                return false;
            }
        };
        if self.dirty {
            debug!("settings push kept out of the draft; local edits pending");
            return false;
        }
        self.apply_settings(settings);
        true
    }

    fn apply_settings(&mut self, settings: AdminSettings) {
        self.authoritative = Some(settings.clone());
        self.draft = Some(settings);
        self.refresh_manual_text();
        self.ready = true;
        self.dirty = false;
    }

    fn refresh_manual_text(&mut self) {
        let Some(draft) = self.draft.as_ref() else {
            return;
        };
        self.manual_text = ModeTarget::ALL.map(|target| {
            draft
                .manual(target)
                .map_or_else(String::new, |value| value.to_string())
        });
    }

    /// Flip an auto/manual toggle. Ignored until a draft exists.
    pub fn set_mode(&mut self, target: ModeTarget, mode: SettingMode) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        draft.set_mode(target, mode);
        self.refresh_manual_text();
        self.dirty = true;
        true
    }

    /// Store what the operator typed into a manual input.
    ///
    /// The draft receives the parsed number, or `null` when the text does not
    /// parse. Ignored until a draft exists.
    pub fn set_manual_text(&mut self, target: ModeTarget, raw: String) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        draft.set_manual(target, parse_number(&raw));
        self.manual_text[target_index(target)] = raw;
        self.dirty = true;
        true
    }

    /// Write a typed field. Ignored until a draft exists.
    pub fn set_field(&mut self, field: SettingField, value: Value) -> bool {
        self.set_path(&field.path(), value)
    }

    /// Write `value` at a dotted path, creating intermediate objects for
    /// unknown sections. Ignored until a draft exists.
    pub fn set_path(&mut self, path: &str, value: Value) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        draft.set_path(path, value);
        self.refresh_manual_text();
        self.dirty = true;
        true
    }

    /// Post the draft. No-op unless ready, a draft exists and the lock is free.
    pub fn save(
        &mut self,
        busy: &mut BusyLock,
        now: Millis,
        lock_ms: Millis,
        effects: &mut Vec<Effect>,
    ) -> bool {
        if !self.ready || busy.is_locked(now) {
            return false;
        }
        let Some(draft) = self.draft.clone() else {
            return false;
        };
        busy.acquire(now, lock_ms, effects);
        effects.push(Effect::Post(HostRequest::AdminRequestData(
            AdminRequest::SaveSettings(draft),
        )));
        self.dirty = false;
        true
    }

    /// Post an admin data request. No-op while the lock is held.
    pub fn request(
        request: AdminRequest,
        busy: &mut BusyLock,
        now: Millis,
        lock_ms: Millis,
        effects: &mut Vec<Effect>,
    ) -> bool {
        if busy.is_locked(now) {
            debug!(data_type = request.data_type(), "admin request refused while busy");
            return false;
        }
        busy.acquire(now, lock_ms, effects);
        effects.push(Effect::Post(HostRequest::AdminRequestData(request)));
        true
    }

    /// Pick a tax chip: select its type and recompute the preview.
    pub fn pick_tax_chip(&mut self, key: String) {
        self.issue.select_tax_type(key);
        self.recalculate_preview();
    }

    /// Recompute the issuance preview.
    pub fn recalculate_preview(&mut self) {
        self.issue.recalculate(&self.tax_catalog, self.locale);
    }

    /// Validate and post the issuance form.
    pub fn submit_issue(
        &mut self,
        busy: &mut BusyLock,
        now: Millis,
        lock_ms: Millis,
        feedback_ms: Millis,
        effects: &mut Vec<Effect>,
    ) -> SubmitOutcome {
        if busy.is_locked(now) {
            return SubmitOutcome::Ignored;
        }
        let payload = match self.issue.payload() {
            Ok(payload) => payload,
            Err(rejection) => {
                self.issue.set_status(rejection.message(), StatusTone::Error);
                return SubmitOutcome::Rejected(rejection);
            }
        };
        let generation = busy.acquire(now, lock_ms, effects);
        self.issue.set_status(ISSUE_SENDING, StatusTone::Pending);
        effects.push(Effect::Post(HostRequest::AdminRequestData(
            AdminRequest::IssueTaxDebt(payload),
        )));
        effects.push(Effect::Schedule {
            delay_ms: feedback_ms,
            timer: TimerEvent::IssueFeedback { generation },
        });
        SubmitOutcome::Sent
    }

    /// Optimistic confirmation once the feedback delay elapsed.
    pub fn confirm_issue_sent(&mut self) {
        self.issue.set_status(ISSUE_SENT, StatusTone::Done);
    }

    /// Switch dashboard section.
    pub const fn set_view(&mut self, view: AdminView) {
        self.view = view;
    }

    /// Visible section.
    #[must_use]
    pub const fn view(&self) -> AdminView {
        self.view
    }

    /// Whether a host push has been applied since the dashboard opened.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether the draft has unsaved edits; also enables the save control.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Working draft.
    #[must_use]
    pub const fn draft(&self) -> Option<&AdminSettings> {
        self.draft.as_ref()
    }

    /// Last settings accepted from the host.
    #[must_use]
    pub const fn authoritative(&self) -> Option<&AdminSettings> {
        self.authoritative.as_ref()
    }

    /// Text shown in the manual input for `target`.
    #[must_use]
    pub fn manual_text(&self, target: ModeTarget) -> &str {
        &self.manual_text[target_index(target)]
    }

    /// Toggle state shown for `target`.
    #[must_use]
    pub fn mode(&self, target: ModeTarget) -> SettingMode {
        self.draft
            .as_ref()
            .map_or(SettingMode::Auto, |draft| draft.mode(target))
    }

    /// Whether the manual input for `target` accepts edits.
    #[must_use]
    pub fn manual_enabled(&self, target: ModeTarget) -> bool {
        self.mode(target).is_manual()
    }

    /// Formatted metrics strip.
    #[must_use]
    pub const fn metrics(&self) -> &MetricsView {
        &self.metrics
    }

    /// Tax catalog in use.
    #[must_use]
    pub fn tax_catalog(&self) -> &[TaxTypeDescriptor] {
        &self.tax_catalog
    }

    /// Issuance form.
    #[must_use]
    pub const fn issue(&self) -> &IssueForm {
        &self.issue
    }

    /// Mutable issuance form.
    pub const fn issue_mut(&mut self) -> &mut IssueForm {
        &mut self.issue
    }
}

const fn target_index(target: ModeTarget) -> usize {
    match target {
        ModeTarget::Inflation => 0,
        ModeTarget::TaxRate => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tiao_protocol::decode_payload;
    use tiao_test_support::fixtures;

    fn state(vault: f64, mode: &str) -> AdminStatePayload {
        decode_payload("admin_state", Some(fixtures::admin_state(vault, mode))).expect("state")
    }

    fn ready_reconciler() -> AdminReconciler {
        let mut admin = AdminReconciler::default();
        admin.bootstrap();
        assert!(admin.apply_authoritative(state(1_000.0, "auto")));
        admin
    }

    #[test]
    fn first_push_makes_the_dashboard_ready() {
        let admin = ready_reconciler();
        assert!(admin.is_ready());
        assert!(!admin.is_dirty());
        assert_eq!(admin.metrics().vault, "$1,000");
        assert_eq!(admin.draft(), admin.authoritative());
        assert_eq!(admin.manual_text(ModeTarget::TaxRate), "3");
    }

    #[test]
    fn edits_before_any_push_are_ignored() {
        let mut admin = AdminReconciler::default();
        assert!(!admin.set_mode(ModeTarget::Inflation, SettingMode::Manual));
        assert!(!admin.set_path("limits.max", json!(1)));
        assert!(!admin.is_dirty());
    }

    #[test]
    fn dirty_draft_survives_pushes_but_metrics_refresh() {
        let mut admin = ready_reconciler();
        assert!(admin.set_mode(ModeTarget::Inflation, SettingMode::Manual));
        assert!(admin.set_manual_text(ModeTarget::Inflation, "1,5".into()));
        assert!(admin.is_dirty());

        assert!(!admin.apply_authoritative(state(2_000.0, "auto")));
        assert_eq!(admin.metrics().vault, "$2,000");
        let draft = admin.draft().expect("draft kept");
        assert_eq!(draft.mode(ModeTarget::Inflation), SettingMode::Manual);
        assert_eq!(draft.manual(ModeTarget::Inflation), Some(1.5));
        assert_eq!(admin.manual_text(ModeTarget::Inflation), "1,5");
    }

    #[test]
    fn malformed_catalog_entry_does_not_cost_metrics_or_settings() {
        let mut admin = ready_reconciler();
        let payload: AdminStatePayload = decode_payload(
            "admin_state",
            Some(json!({
                "metrics": {"vault": 1000},
                "settings": {
                    "mode": {"inflation": "manual", "taxrate": "auto"},
                    "manual": {"inflation": 2.5},
                    "limits": {"maxDebt": 5000}
                },
                "taxCatalog": [{"key": "FEE", "label": "Fee", "fixed": 40}]
            })),
        )
        .expect("state");
        assert!(admin.apply_authoritative(payload));
        assert_eq!(admin.metrics().vault, "$1,000");
        assert_eq!(admin.tax_catalog()[0].mode, tiao_protocol::TaxMode::FixedAmount);
        let draft = admin.draft().expect("draft");
        assert_eq!(draft.manual(ModeTarget::Inflation), Some(2.5));
        assert_eq!(draft.extra["limits"], json!({"maxDebt": 5000}));
    }

    #[test]
    fn undecodable_settings_keep_the_draft() {
        let mut admin = ready_reconciler();
        admin.set_path("limits.maxDebt", json!(7));
        let mut busy = BusyLock::default();
        let mut effects = Vec::new();
        assert!(admin.save(&mut busy, 0, 5_000, &mut effects));
        let before = admin.draft().cloned();

        let payload: AdminStatePayload = decode_payload(
            "admin_state",
            Some(json!({"metrics": {"vault": 3000}, "settings": ["not", "settings"]})),
        )
        .expect("state");
        assert!(!admin.apply_authoritative(payload));
        assert_eq!(admin.metrics().vault, "$3,000");
        assert_eq!(admin.draft().cloned(), before);
        assert!(admin.is_ready());
    }

    #[test]
    fn unparseable_manual_text_stores_null() {
        let mut admin = ready_reconciler();
        admin.set_manual_text(ModeTarget::TaxRate, "abc".into());
        assert_eq!(admin.draft().and_then(|d| d.manual(ModeTarget::TaxRate)), None);
        assert_eq!(admin.manual_text(ModeTarget::TaxRate), "abc");
    }

    #[test]
    fn manual_input_follows_mode() {
        let mut admin = ready_reconciler();
        assert!(!admin.manual_enabled(ModeTarget::Inflation));
        admin.set_field(SettingField::Mode(ModeTarget::Inflation), json!("manual"));
        assert!(admin.manual_enabled(ModeTarget::Inflation));
    }

    #[test]
    fn save_requires_ready_and_free_lock() {
        let mut effects = Vec::new();
        let mut busy = BusyLock::default();

        let mut fresh = AdminReconciler::default();
        assert!(!fresh.save(&mut busy, 0, 5_000, &mut effects));

        let mut admin = ready_reconciler();
        admin.set_path("limits.maxDebt", json!(9));
        busy.acquire(0, 1_000, &mut effects);
        assert!(!admin.save(&mut busy, 10, 5_000, &mut effects));
        assert!(admin.is_dirty());

        effects.clear();
        assert!(admin.save(&mut busy, 1_000, 5_000, &mut effects));
        assert!(!admin.is_dirty());
        assert!(busy.is_locked(1_000));
        let Some(Effect::Post(HostRequest::AdminRequestData(AdminRequest::SaveSettings(sent)))) =
            effects.last()
        else {
            panic!("save posts the draft");
        };
        assert_eq!(sent.extra["limits"], json!({"maxDebt": 9}));
    }

    #[test]
    fn catalog_refreshes_from_settings_and_keeps_selection() {
        let mut admin = ready_reconciler();
        admin.pick_tax_chip("IPVA".into());
        let payload: AdminStatePayload = decode_payload(
            "admin_state",
            Some(json!({
                "settings": {"taxCatalog": [
                    {"key": "IPVA", "label": "IPVA", "mode": "base_percent", "percent": 4}
                ]}
            })),
        )
        .expect("state");
        admin.apply_authoritative(payload);
        assert_eq!(admin.tax_catalog().len(), 1);
        assert_eq!(admin.issue().tax_type(), "IPVA");
    }

    #[test]
    fn submit_rejects_then_sends() {
        let mut admin = ready_reconciler();
        let mut busy = BusyLock::default();
        let mut effects = Vec::new();
        assert_eq!(
            admin.submit_issue(&mut busy, 0, 5_000, 450, &mut effects),
            SubmitOutcome::Rejected(IssueRejection::InvalidAmount)
        );
        assert!(effects.is_empty());
        assert_eq!(
            admin.issue().status().map(|s| s.message.as_str()),
            Some("Invalid amount.")
        );

        admin
            .issue_mut()
            .set_field(issue::IssueField::Amount, "300".into());
        admin
            .issue_mut()
            .set_field(issue::IssueField::CitizenId, "CID9".into());
        assert_eq!(
            admin.submit_issue(&mut busy, 0, 5_000, 450, &mut effects),
            SubmitOutcome::Sent
        );
        assert_eq!(
            admin.issue().status().map(|s| s.message.as_str()),
            Some(ISSUE_SENDING)
        );
        assert!(effects.iter().any(|effect| matches!(
            effect,
            Effect::Post(HostRequest::AdminRequestData(AdminRequest::IssueTaxDebt(p)))
                if p.citizenid == "CID9" && p.amount == Some(300)
        )));
        assert_eq!(
            admin.submit_issue(&mut busy, 10, 5_000, 450, &mut effects),
            SubmitOutcome::Ignored
        );
    }

    #[test]
    fn unknown_views_fall_back_to_overview() {
        assert_eq!(AdminView::from_key("logs"), AdminView::Logs);
        assert_eq!(AdminView::from_key("garage"), AdminView::Overview);
    }
}
