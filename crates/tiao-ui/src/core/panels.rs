//! Panel identifiers and the overlay router.
//!
//! # Design
//! - At most one panel is visible: the router stores a single active panel, so
//!   opening always replaces and never stacks.
//! - Closing is a two-step transition. The overlay enters `Closing`
//!   immediately and the panel is hidden when the transition timer fires.
//! - A router generation tags focus and close timers; reopening inside the
//!   transition window invalidates the pending hide.

use std::fmt;
use std::str::FromStr;

use tiao_protocol::HostRequest;
use tracing::{debug, error};

use crate::core::busy::BusyLock;
use crate::core::effects::{Effect, Millis, TimerEvent};
use crate::core::error::UiError;

/// Every panel the overlay can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelId {
    /// Vault balance view.
    VaultView,
    /// Vault deposit form.
    VaultAdd,
    /// Vault withdrawal form.
    VaultWithdraw,
    /// Tax estimate calculator.
    TaxCalculator,
    /// Tax payment confirmation.
    Payment,
    /// Active debts table.
    DebtList,
    /// Single debt details.
    DebtDetail,
    /// Citizen id prompt for debt lookups.
    DebtInput,
    /// Admin dashboard.
    AdminDashboard,
    /// Success message.
    Success,
}

/// CSS layout a panel uses while visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelLayout {
    /// Two-column grid (admin dashboard).
    Grid,
    /// Single flex column.
    Flex,
}

impl PanelLayout {
    /// CSS `display` value.
    #[must_use]
    pub const fn css_display(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Flex => "flex",
        }
    }
}

impl PanelId {
    /// All panels in markup order.
    pub const ALL: [Self; 10] = [
        Self::VaultView,
        Self::VaultAdd,
        Self::VaultWithdraw,
        Self::TaxCalculator,
        Self::Payment,
        Self::DebtList,
        Self::DebtDetail,
        Self::DebtInput,
        Self::AdminDashboard,
        Self::Success,
    ];

    /// Stable identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VaultView => "vault_view",
            Self::VaultAdd => "vault_add",
            Self::VaultWithdraw => "vault_withdraw",
            Self::TaxCalculator => "tax_calculator",
            Self::Payment => "payment",
            Self::DebtList => "debt_list",
            Self::DebtDetail => "debt_detail",
            Self::DebtInput => "debt_input",
            Self::AdminDashboard => "admin_dashboard",
            Self::Success => "success",
        }
    }

    /// DOM id of the panel container.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::VaultView => "vault-view-container",
            Self::VaultAdd => "vault-add-container",
            Self::VaultWithdraw => "vault-withdraw-container",
            Self::TaxCalculator => "calculator-container",
            Self::Payment => "payment-container",
            Self::DebtList => "debt-list-container",
            Self::DebtDetail => "debt-detail-container",
            Self::DebtInput => "debt-input-container",
            Self::AdminDashboard => "admin-dashboard-container",
            Self::Success => "success-container",
        }
    }

    /// Layout used while the panel is visible.
    #[must_use]
    pub const fn layout(self) -> PanelLayout {
        match self {
            Self::AdminDashboard => PanelLayout::Grid,
            _ => PanelLayout::Flex,
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelId {
    type Err = UiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|panel| panel.as_str() == raw)
            .ok_or_else(|| UiError::UnknownPanel { id: raw.to_string() })
    }
}

/// Overlay phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayState {
    /// Nothing is shown.
    #[default]
    Hidden,
    /// The active panel is shown.
    Shown,
    /// The overlay is fading out; the active panel stays mounted.
    Closing,
}

/// Overlay phase plus the panel it shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiVisibility {
    /// Overlay phase.
    pub overlay: OverlayState,
    /// Panel mounted in the overlay.
    pub active_panel: Option<PanelId>,
}

impl UiVisibility {
    /// Panel currently rendered, if any.
    #[must_use]
    pub const fn visible_panel(&self) -> Option<PanelId> {
        match self.overlay {
            OverlayState::Hidden => None,
            OverlayState::Shown | OverlayState::Closing => self.active_panel,
        }
    }

    /// Whether `panel` is currently rendered.
    #[must_use]
    pub fn is_visible(&self, panel: PanelId) -> bool {
        self.visible_panel() == Some(panel)
    }
}

/// Open/close state machine for the overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelRouter {
    visibility: UiVisibility,
    generation: u64,
    focus_settle_ms: Millis,
    close_transition_ms: Millis,
}

impl PanelRouter {
    /// Router using the given focus and close-transition delays.
    #[must_use]
    pub const fn new(focus_settle_ms: Millis, close_transition_ms: Millis) -> Self {
        Self {
            visibility: UiVisibility {
                overlay: OverlayState::Hidden,
                active_panel: None,
            },
            generation: 0,
            focus_settle_ms,
            close_transition_ms,
        }
    }

    /// Current visibility.
    #[must_use]
    pub const fn visibility(&self) -> UiVisibility {
        self.visibility
    }

    /// Show `panel`, replacing whatever was shown, and release the busy lock.
    pub fn open(&mut self, panel: PanelId, busy: &mut BusyLock, effects: &mut Vec<Effect>) {
        self.generation += 1;
        self.visibility = UiVisibility {
            overlay: OverlayState::Shown,
            active_panel: Some(panel),
        };
        effects.push(Effect::Schedule {
            delay_ms: self.focus_settle_ms,
            timer: TimerEvent::FocusPanel {
                panel,
                generation: self.generation,
            },
        });
        busy.release();
        debug!(%panel, "panel opened");
    }

    /// Resolve `raw` and open it.
    ///
    /// # Errors
    /// Returns [`UiError::UnknownPanel`] and leaves the state untouched when
    /// `raw` names no panel.
    pub fn open_by_id(
        &mut self,
        raw: &str,
        busy: &mut BusyLock,
        effects: &mut Vec<Effect>,
    ) -> Result<PanelId, UiError> {
        let panel = raw.parse::<PanelId>().inspect_err(|err| {
            error!(error = %err, "refusing to open panel");
        })?;
        self.open(panel, busy, effects);
        Ok(panel)
    }

    /// Start closing the overlay; `notify_host` also posts `forceClose`.
    pub fn close(&mut self, notify_host: bool, busy: &mut BusyLock, effects: &mut Vec<Effect>) {
        self.generation += 1;
        if self.visibility.overlay == OverlayState::Shown {
            self.visibility.overlay = OverlayState::Closing;
        }
        effects.push(Effect::Schedule {
            delay_ms: self.close_transition_ms,
            timer: TimerEvent::FinishClose {
                generation: self.generation,
            },
        });
        busy.release();
        if notify_host {
            effects.push(Effect::Post(HostRequest::ForceClose));
        }
        debug!(notify_host, "overlay closing");
    }

    /// Hide the overlay if no open happened since the close that scheduled it.
    pub fn finish_close(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.visibility.overlay != OverlayState::Closing {
            debug!(generation, current = self.generation, "stale close transition ignored");
            return false;
        }
        self.visibility = UiVisibility::default();
        true
    }

    /// Whether a focus timer scheduled under `generation` still applies.
    #[must_use]
    pub fn focus_due(&self, panel: PanelId, generation: u64) -> bool {
        generation == self.generation
            && self.visibility.overlay == OverlayState::Shown
            && self.visibility.active_panel == Some(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> PanelRouter {
        PanelRouter::new(40, 250)
    }

    #[test]
    fn identifiers_resolve_and_reject_unknowns() {
        for panel in PanelId::ALL {
            assert_eq!(panel.as_str().parse::<PanelId>().ok(), Some(panel));
        }
        assert!(matches!(
            "garage".parse::<PanelId>(),
            Err(UiError::UnknownPanel { .. })
        ));
        assert_eq!(PanelId::AdminDashboard.layout(), PanelLayout::Grid);
        assert_eq!(PanelId::Payment.layout().css_display(), "flex");
        assert_eq!(PanelId::VaultView.dom_id(), "vault-view-container");
    }

    #[test]
    fn open_replaces_and_releases_busy() {
        let mut router = router();
        let mut busy = BusyLock::default();
        let mut effects = Vec::new();
        busy.acquire(0, 5_000, &mut effects);
        router.open(PanelId::VaultAdd, &mut busy, &mut effects);
        router.open(PanelId::Payment, &mut busy, &mut effects);
        assert_eq!(router.visibility().visible_panel(), Some(PanelId::Payment));
        assert!(!router.visibility().is_visible(PanelId::VaultAdd));
        assert!(!busy.is_locked(0));
        assert!(effects.contains(&Effect::Schedule {
            delay_ms: 40,
            timer: TimerEvent::FocusPanel {
                panel: PanelId::Payment,
                generation: 2,
            },
        }));
    }

    #[test]
    fn open_by_id_leaves_state_on_unknown_ids() {
        let mut router = router();
        let mut busy = BusyLock::default();
        let mut effects = Vec::new();
        router.open(PanelId::Success, &mut busy, &mut effects);
        let before = router.clone();
        let result = router.open_by_id("nope", &mut busy, &mut effects);
        assert!(result.is_err());
        assert_eq!(router, before);
        assert_eq!(
            router.open_by_id("debt_list", &mut busy, &mut effects).ok(),
            Some(PanelId::DebtList)
        );
    }

    #[test]
    fn close_is_two_step_and_notifies_only_on_request() {
        let mut router = router();
        let mut busy = BusyLock::default();
        let mut effects = Vec::new();
        router.open(PanelId::Payment, &mut busy, &mut effects);
        effects.clear();
        router.close(false, &mut busy, &mut effects);
        assert_eq!(router.visibility().overlay, OverlayState::Closing);
        assert!(!effects.contains(&Effect::Post(HostRequest::ForceClose)));
        let Some(Effect::Schedule {
            delay_ms: 250,
            timer: TimerEvent::FinishClose { generation },
        }) = effects.first().cloned()
        else {
            panic!("close schedules the transition end");
        };
        assert!(router.finish_close(generation));
        assert_eq!(router.visibility(), UiVisibility::default());

        effects.clear();
        router.close(true, &mut busy, &mut effects);
        assert!(effects.contains(&Effect::Post(HostRequest::ForceClose)));
    }

    #[test]
    fn reopening_during_close_ignores_stale_transition() {
        let mut router = router();
        let mut busy = BusyLock::default();
        let mut effects = Vec::new();
        router.open(PanelId::Payment, &mut busy, &mut effects);
        router.close(false, &mut busy, &mut effects);
        let stale = 2;
        router.open(PanelId::VaultView, &mut busy, &mut effects);
        assert!(!router.finish_close(stale));
        assert!(router.visibility().is_visible(PanelId::VaultView));
        assert!(!router.focus_due(PanelId::Payment, 1));
        assert!(router.focus_due(PanelId::VaultView, 3));
    }
}
