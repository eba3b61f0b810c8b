//! UI controller: owns every piece of mutable UI state.
//!
//! # Design
//! - One owner for the busy lock, router, reconciler, payment context and
//!   transient inputs; the Yew shell keeps a single engine in its store.
//! - Entry points take the current time and return effects; nothing here
//!   touches the DOM, timers or the network.
//! - Host messages are handled in `dispatcher.rs`, user commands and timer
//!   firings here.

use tiao_config::UiConfig;
use tiao_protocol::lenient::parse_positive_int;
use tiao_protocol::{AdminRequest, AmountPayload, HostRequest, TaxDecision};
use tracing::debug;

use crate::core::admin::issue::StatusTone;
use crate::core::admin::{AdminReconciler, SubmitOutcome};
use crate::core::busy::BusyLock;
use crate::core::commands::{DebtLookup, InputField, Key, UiCommand, primary_control};
use crate::core::effects::{Effect, Millis, TimerEvent};
use crate::core::error::UiResult;
use crate::core::format::currency;
use crate::core::panels::{OverlayState, PanelId, PanelRouter, UiVisibility};
use crate::core::render::{DebtDetailView, TableBody, audit_log_rows};

/// Reason shown when the host sends none.
pub const NO_REASON: &str = "—";

/// Tax and reason of the pending payment.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentContext {
    /// Amount due.
    pub tax: f64,
    /// Reason shown to the player.
    pub reason: String,
}

impl Default for PaymentContext {
    fn default() -> Self {
        Self {
            tax: 0.0,
            reason: NO_REASON.to_string(),
        }
    }
}

impl PaymentContext {
    /// Body echoed to the host on pay/refuse.
    #[must_use]
    pub fn decision(&self) -> TaxDecision {
        TaxDecision {
            tax: self.tax,
            reason: self.reason.clone(),
        }
    }
}

/// Text typed into the player-facing forms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransientInputs {
    /// Deposit amount.
    pub vault_add: String,
    /// Withdrawal amount.
    pub vault_withdraw: String,
    /// Calculator amount.
    pub calculator: String,
    /// Citizen id for the pending debt lookup.
    pub debt_citizenid: String,
    /// Lookup started from the dashboard, if any.
    pub debt_lookup: Option<DebtLookup>,
}

#[derive(Clone, Copy)]
enum VaultMove {
    Deposit,
    Withdraw,
}

/// The UI state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct UiEngine {
    config: UiConfig,
    pub(crate) busy: BusyLock,
    pub(crate) router: PanelRouter,
    pub(crate) admin: AdminReconciler,
    pub(crate) payment: PaymentContext,
    pub(crate) inputs: TransientInputs,
    pub(crate) vault_balance: String,
    pub(crate) debts: TableBody,
    pub(crate) debt_detail: DebtDetailView,
    pub(crate) audit_log: TableBody,
    success_message: String,
}

impl Default for UiEngine {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

impl UiEngine {
    /// Engine with nothing shown.
    #[must_use]
    pub fn new(config: UiConfig) -> Self {
        let locale = config.number_locale;
        Self {
            busy: BusyLock::default(),
            router: PanelRouter::new(
                config.timings.focus_settle_ms,
                config.timings.close_transition_ms,
            ),
            admin: AdminReconciler::new(locale),
            payment: PaymentContext::default(),
            inputs: TransientInputs::default(),
            vault_balance: currency(0.0, locale),
            debts: TableBody::default(),
            debt_detail: DebtDetailView::from_record(&tiao_protocol::DebtRecord::default(), locale),
            audit_log: audit_log_rows(None),
            success_message: String::new(),
            config,
        }
    }

    /// Apply a user command.
    pub fn handle_command(&mut self, command: UiCommand, now: Millis) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.apply_command(command, now, &mut effects);
        effects
    }

    /// Deliver a timer scheduled by an earlier effect.
    pub fn handle_timer(&mut self, timer: TimerEvent, now: Millis) -> Vec<Effect> {
        debug!(?timer, now, "timer fired");
        let mut effects = Vec::new();
        match timer {
            TimerEvent::BusyExpired { generation } | TimerEvent::CalculatorUnlock { generation } => {
                self.busy.release_if_current(generation);
            }
            TimerEvent::FocusPanel { panel, generation } => {
                if self.router.focus_due(panel, generation) {
                    effects.push(Effect::Focus(panel));
                }
            }
            TimerEvent::FinishClose { generation } => {
                self.router.finish_close(generation);
            }
            TimerEvent::IssueFeedback { generation } => {
                self.admin.confirm_issue_sent();
                self.busy.release_if_current(generation);
            }
            TimerEvent::PaymentFeedback => {
                self.success_message = format!(
                    "Tax of {} paid successfully.",
                    currency(self.payment.tax, self.config.number_locale)
                );
                self.open(PanelId::Success, &mut effects);
            }
        }
        effects
    }

    /// Open a panel by identifier.
    ///
    /// # Errors
    /// Returns [`crate::core::error::UiError::UnknownPanel`] for unknown ids;
    /// nothing changes in that case.
    pub fn open_panel_by_id(&mut self, raw: &str) -> UiResult<Vec<Effect>> {
        let mut effects = Vec::new();
        self.router.open_by_id(raw, &mut self.busy, &mut effects)?;
        Ok(effects)
    }

    fn apply_command(&mut self, command: UiCommand, now: Millis, effects: &mut Vec<Effect>) {
        let timings = self.config.timings.clone();
        match command {
            UiCommand::Close => self.close(true, effects),
            UiCommand::Pay => self.pay(now, effects),
            UiCommand::Refuse => self.refuse(now, effects),
            UiCommand::ConfirmVaultAdd => self.confirm_vault(VaultMove::Deposit, now, effects),
            UiCommand::ConfirmVaultWithdraw => {
                self.confirm_vault(VaultMove::Withdraw, now, effects);
            }
            UiCommand::ConfirmCalculator => self.confirm_calculator(now, effects),
            UiCommand::ConfirmDebtInput => self.confirm_debt_input(now, effects),
            UiCommand::Edit { field, value } => self.edit(field, value),
            UiCommand::Navigate(view) => self.admin.set_view(view),
            UiCommand::SetMode { target, mode } => {
                self.admin.set_mode(target, mode);
            }
            UiCommand::RefreshAdmin => self.admin_request(AdminRequest::State, now, effects),
            UiCommand::SaveSettings => {
                if self.admin.is_dirty() {
                    self.admin
                        .save(&mut self.busy, now, timings.submit_lock_ms, effects);
                }
            }
            UiCommand::FetchLogs => {
                let limit = self.config.admin_logs_limit;
                self.admin_request(AdminRequest::Logs { limit }, now, effects);
            }
            UiCommand::Shortcut(shortcut) => self.admin_request(shortcut.request(), now, effects),
            UiCommand::StartDebtLookup(lookup) => {
                self.inputs.debt_lookup = Some(lookup);
                self.inputs.debt_citizenid.clear();
                self.open(PanelId::DebtInput, effects);
            }
            UiCommand::SelectTaxType(key) => self.admin.issue_mut().select_tax_type(key),
            UiCommand::PickTaxChip(key) => self.admin.pick_tax_chip(key),
            UiCommand::SetTargetMode(mode) => self.admin.issue_mut().set_target_mode(mode),
            UiCommand::PreviewIssue => self.admin.recalculate_preview(),
            UiCommand::SubmitIssue => {
                let outcome = self.admin.submit_issue(
                    &mut self.busy,
                    now,
                    timings.submit_lock_ms,
                    timings.issue_feedback_ms,
                    effects,
                );
                if outcome != SubmitOutcome::Sent {
                    debug!(?outcome, "tax issuance not sent");
                }
            }
            UiCommand::KeyPress { key, in_textarea } => {
                self.key_press(key, in_textarea, now, effects);
            }
        }
    }

    fn key_press(&mut self, key: Key, in_textarea: bool, now: Millis, effects: &mut Vec<Effect>) {
        let visibility = self.router.visibility();
        match key {
            Key::Escape => {
                if visibility.overlay == OverlayState::Shown {
                    self.close(true, effects);
                }
            }
            Key::Enter => {
                if in_textarea || visibility.overlay != OverlayState::Shown {
                    return;
                }
                let Some(panel) = visibility.active_panel else {
                    return;
                };
                let Some(control) = primary_control(panel, self.admin.view()) else {
                    return;
                };
                if control.busy_sensitive() && self.busy.controls_disabled() {
                    return;
                }
                self.apply_command(control.command(), now, effects);
            }
        }
    }

    fn edit(&mut self, field: InputField, value: String) {
        match field {
            InputField::VaultAddAmount => self.inputs.vault_add = value,
            InputField::VaultWithdrawAmount => self.inputs.vault_withdraw = value,
            InputField::CalculatorAmount => self.inputs.calculator = value,
            InputField::DebtCitizenId => self.inputs.debt_citizenid = value,
            InputField::Manual(target) => {
                self.admin.set_manual_text(target, value);
            }
            InputField::Issue(field) => self.admin.issue_mut().set_field(field, value),
        }
    }

    fn pay(&mut self, now: Millis, effects: &mut Vec<Effect>) {
        if self.busy.is_locked(now) {
            return;
        }
        let timings = &self.config.timings;
        self.busy.acquire(now, timings.submit_lock_ms, effects);
        effects.push(Effect::Post(HostRequest::PayTax(self.payment.decision())));
        effects.push(Effect::Schedule {
            delay_ms: timings.payment_feedback_ms,
            timer: TimerEvent::PaymentFeedback,
        });
    }

    fn refuse(&mut self, now: Millis, effects: &mut Vec<Effect>) {
        if self.busy.is_locked(now) {
            return;
        }
        effects.push(Effect::Post(HostRequest::RefuseTax(self.payment.decision())));
        self.close(true, effects);
    }

    fn confirm_vault(&mut self, direction: VaultMove, now: Millis, effects: &mut Vec<Effect>) {
        let raw = match direction {
            VaultMove::Deposit => &self.inputs.vault_add,
            VaultMove::Withdraw => &self.inputs.vault_withdraw,
        };
        let Some(amount) = parse_positive_int(raw) else {
            return;
        };
        if self.busy.is_locked(now) {
            return;
        }
        self.busy
            .acquire(now, self.config.timings.submit_lock_ms, effects);
        let amount = AmountPayload { amount };
        let request = match direction {
            VaultMove::Deposit => AdminRequest::DepositVault(amount),
            VaultMove::Withdraw => AdminRequest::WithdrawVault(amount),
        };
        effects.push(Effect::Post(HostRequest::AdminRequestData(request)));
        self.close(true, effects);
    }

    fn confirm_calculator(&mut self, now: Millis, effects: &mut Vec<Effect>) {
        let Some(amount) = parse_positive_int(&self.inputs.calculator) else {
            return;
        };
        if self.busy.is_locked(now) {
            return;
        }
        let timings = &self.config.timings;
        let generation = self.busy.acquire(now, timings.request_lock_ms, effects);
        effects.push(Effect::Post(HostRequest::CalculateTax(AmountPayload {
            amount,
        })));
        effects.push(Effect::Schedule {
            delay_ms: timings.calculator_unlock_ms,
            timer: TimerEvent::CalculatorUnlock { generation },
        });
    }

    fn confirm_debt_input(&mut self, now: Millis, effects: &mut Vec<Effect>) {
        let Some(lookup) = self.inputs.debt_lookup else {
            return;
        };
        let citizenid = self.inputs.debt_citizenid.trim().to_string();
        if citizenid.is_empty() || self.busy.is_locked(now) {
            return;
        }
        self.busy
            .acquire(now, self.config.timings.submit_lock_ms, effects);
        effects.push(Effect::Post(HostRequest::AdminRequestData(
            lookup.request(citizenid),
        )));
        self.close(true, effects);
    }

    pub(crate) fn admin_request(
        &mut self,
        request: AdminRequest,
        now: Millis,
        effects: &mut Vec<Effect>,
    ) {
        AdminReconciler::request(
            request,
            &mut self.busy,
            now,
            self.config.timings.request_lock_ms,
            effects,
        );
    }

    pub(crate) fn open(&mut self, panel: PanelId, effects: &mut Vec<Effect>) {
        self.router.open(panel, &mut self.busy, effects);
    }

    pub(crate) fn close(&mut self, notify_host: bool, effects: &mut Vec<Effect>) {
        self.router.close(notify_host, &mut self.busy, effects);
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Busy lock.
    #[must_use]
    pub const fn busy(&self) -> &BusyLock {
        &self.busy
    }

    /// Overlay visibility.
    #[must_use]
    pub const fn visibility(&self) -> UiVisibility {
        self.router.visibility()
    }

    /// Admin dashboard state.
    #[must_use]
    pub const fn admin(&self) -> &AdminReconciler {
        &self.admin
    }

    /// Pending payment.
    #[must_use]
    pub const fn payment(&self) -> &PaymentContext {
        &self.payment
    }

    /// Player-facing input text.
    #[must_use]
    pub const fn inputs(&self) -> &TransientInputs {
        &self.inputs
    }

    /// Formatted vault balance.
    #[must_use]
    pub fn vault_balance(&self) -> &str {
        &self.vault_balance
    }

    /// Active debts table.
    #[must_use]
    pub const fn debts(&self) -> &TableBody {
        &self.debts
    }

    /// Single debt details.
    #[must_use]
    pub const fn debt_detail(&self) -> &DebtDetailView {
        &self.debt_detail
    }

    /// Audit log table.
    #[must_use]
    pub const fn audit_log(&self) -> &TableBody {
        &self.audit_log
    }

    /// Title of the citizen id prompt.
    #[must_use]
    pub fn debt_input_title(&self) -> &'static str {
        self.inputs.debt_lookup.map_or("", DebtLookup::title)
    }

    /// Success panel message.
    #[must_use]
    pub fn success_message(&self) -> &str {
        &self.success_message
    }

    /// Status tone helper for views.
    #[must_use]
    pub fn issue_status_class(&self) -> Option<&'static str> {
        self.admin
            .issue()
            .status()
            .map(|status| StatusTone::class(status.tone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::admin::AdminView;
    use crate::core::admin::issue::IssueField;
    use crate::core::effects::posted;

    fn engine() -> UiEngine {
        UiEngine::default()
    }

    fn edit(engine: &mut UiEngine, field: InputField, value: &str) {
        engine.handle_command(
            UiCommand::Edit {
                field,
                value: value.to_string(),
            },
            0,
        );
    }

    #[test]
    fn pay_locks_posts_and_shows_success_later() {
        let mut engine = engine();
        engine.payment = PaymentContext {
            tax: 1_250.0,
            reason: "IPTU".into(),
        };
        let effects = engine.handle_command(UiCommand::Pay, 0);
        assert_eq!(
            posted(&effects),
            vec![&HostRequest::PayTax(TaxDecision {
                tax: 1_250.0,
                reason: "IPTU".into(),
            })]
        );
        assert!(engine.busy().is_locked(100));
        assert!(engine.handle_command(UiCommand::Pay, 100).is_empty());

        engine.handle_timer(TimerEvent::PaymentFeedback, 250);
        assert!(engine.visibility().is_visible(PanelId::Success));
        assert_eq!(engine.success_message(), "Tax of $1,250 paid successfully.");
        assert!(!engine.busy().is_locked(250));
    }

    #[test]
    fn refuse_posts_and_closes_without_locking() {
        let mut engine = engine();
        let effects = engine.handle_command(UiCommand::Refuse, 0);
        let requests = posted(&effects);
        assert_eq!(requests[0].event(), "refuseTax");
        assert_eq!(requests[1], &HostRequest::ForceClose);
        assert!(!engine.busy().controls_disabled());
    }

    #[test]
    fn vault_moves_need_positive_amounts() {
        let mut engine = engine();
        edit(&mut engine, InputField::VaultAddAmount, "abc");
        assert!(engine.handle_command(UiCommand::ConfirmVaultAdd, 0).is_empty());

        edit(&mut engine, InputField::VaultWithdrawAmount, "1.500");
        let effects = engine.handle_command(UiCommand::ConfirmVaultWithdraw, 0);
        assert_eq!(
            posted(&effects)[0],
            &HostRequest::AdminRequestData(AdminRequest::WithdrawVault(AmountPayload {
                amount: 1_500,
            }))
        );
        assert!(posted(&effects).contains(&&HostRequest::ForceClose));
    }

    #[test]
    fn calculator_unlocks_after_its_short_delay() {
        let mut engine = engine();
        edit(&mut engine, InputField::CalculatorAmount, "900");
        let effects = engine.handle_command(UiCommand::ConfirmCalculator, 0);
        let generation = engine.busy().state().generation;
        assert!(effects.contains(&Effect::Schedule {
            delay_ms: 300,
            timer: TimerEvent::CalculatorUnlock { generation },
        }));
        engine.handle_timer(TimerEvent::CalculatorUnlock { generation }, 300);
        assert!(!engine.busy().is_locked(300));
    }

    #[test]
    fn debt_lookup_needs_kind_and_id() {
        let mut engine = engine();
        edit(&mut engine, InputField::DebtCitizenId, "ABC");
        assert!(engine.handle_command(UiCommand::ConfirmDebtInput, 0).is_empty());

        engine.handle_command(UiCommand::StartDebtLookup(DebtLookup::Collect), 0);
        assert!(engine.visibility().is_visible(PanelId::DebtInput));
        assert_eq!(engine.debt_input_title(), "Collect Debt");
        assert_eq!(engine.inputs().debt_citizenid, "");
        assert!(engine.handle_command(UiCommand::ConfirmDebtInput, 0).is_empty());

        edit(&mut engine, InputField::DebtCitizenId, " ABC ");
        let effects = engine.handle_command(UiCommand::ConfirmDebtInput, 0);
        assert_eq!(
            posted(&effects)[0],
            &HostRequest::AdminRequestData(AdminRequest::CollectDebt("ABC".into()))
        );
    }

    #[test]
    fn admin_requests_are_refused_while_busy() {
        let mut engine = engine();
        let first = engine.handle_command(UiCommand::RefreshAdmin, 0);
        assert_eq!(posted(&first).len(), 1);
        assert!(engine.handle_command(UiCommand::FetchLogs, 1_000).is_empty());
        let later = engine.handle_command(UiCommand::FetchLogs, 2_500);
        assert_eq!(
            posted(&later),
            vec![&HostRequest::AdminRequestData(AdminRequest::Logs {
                limit: 80
            })]
        );
    }

    #[test]
    fn save_command_requires_dirty() {
        let mut engine = engine();
        engine.admin.apply_authoritative(tiao_protocol::AdminStatePayload::default());
        assert!(engine.handle_command(UiCommand::SaveSettings, 0).is_empty());
    }

    #[test]
    fn escape_closes_and_enter_runs_primary_action() {
        let mut engine = engine();
        let mut effects = Vec::new();
        engine.open(PanelId::VaultAdd, &mut effects);
        edit(&mut engine, InputField::VaultAddAmount, "10");
        let effects = engine.handle_command(
            UiCommand::KeyPress {
                key: Key::Enter,
                in_textarea: true,
            },
            0,
        );
        assert!(effects.is_empty());
        let effects = engine.handle_command(
            UiCommand::KeyPress {
                key: Key::Enter,
                in_textarea: false,
            },
            0,
        );
        assert_eq!(posted(&effects)[0].event(), "admin_requestData");

        let effects = engine.handle_command(
            UiCommand::KeyPress {
                key: Key::Escape,
                in_textarea: false,
            },
            0,
        );
        assert!(effects.is_empty(), "already closing after the deposit");
    }

    #[test]
    fn issue_feedback_confirms_and_releases() {
        let mut engine = engine();
        engine.handle_command(UiCommand::Navigate(AdminView::Issue), 0);
        edit(&mut engine, InputField::Issue(IssueField::Amount), "50");
        edit(&mut engine, InputField::Issue(IssueField::CitizenId), "C1");
        engine.handle_command(UiCommand::SubmitIssue, 0);
        let generation = engine.busy().state().generation;
        engine.handle_timer(TimerEvent::IssueFeedback { generation }, 450);
        assert_eq!(engine.issue_status_class(), Some("ok"));
        assert!(!engine.busy().controls_disabled());
    }

    #[test]
    fn group_issuance_with_zero_amount_posts_nothing() {
        let mut engine = engine();
        engine.handle_command(UiCommand::Navigate(AdminView::Issue), 0);
        engine.handle_command(UiCommand::SetTargetMode("all_online".into()), 0);
        edit(&mut engine, InputField::Issue(IssueField::Amount), "0");
        let effects = engine.handle_command(UiCommand::SubmitIssue, 0);
        assert!(posted(&effects).is_empty());
        assert_eq!(engine.issue_status_class(), Some("error"));
        assert!(!engine.busy().controls_disabled());
    }

    #[test]
    fn stale_focus_timers_do_nothing() {
        let mut engine = engine();
        let mut effects = Vec::new();
        engine.open(PanelId::Payment, &mut effects);
        engine.open(PanelId::VaultView, &mut effects);
        let stale = engine.handle_timer(
            TimerEvent::FocusPanel {
                panel: PanelId::Payment,
                generation: 1,
            },
            40,
        );
        assert!(stale.is_empty());
        let fresh = engine.handle_timer(
            TimerEvent::FocusPanel {
                panel: PanelId::VaultView,
                generation: 2,
            },
            40,
        );
        assert_eq!(fresh, vec![Effect::Focus(PanelId::VaultView)]);
    }

    #[test]
    fn open_panel_by_id_rejects_unknown_ids() {
        let mut engine = engine();
        assert!(engine.open_panel_by_id("garage").is_err());
        assert_eq!(engine.visibility(), UiVisibility::default());
        assert!(engine.open_panel_by_id("success").is_ok());
    }
}
