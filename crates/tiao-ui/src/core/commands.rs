//! User intents and the controls that raise them.
//!
//! # Design
//! - Every interactive control has a [`ControlId`] mapping to exactly one
//!   [`UiCommand`]; views never build commands from free-form attributes.
//! - Text inputs raise [`UiCommand::Edit`] with the raw text so parsing stays
//!   in the engine.

use tiao_protocol::{AdminRequest, ModeTarget, SettingMode};

use crate::core::admin::AdminView;
use crate::core::admin::issue::IssueField;
use crate::core::panels::PanelId;

/// Debt lookup started from the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebtLookup {
    /// Show the debt of one citizen.
    Find,
    /// Collect the debt of one citizen.
    Collect,
}

impl DebtLookup {
    /// Title of the citizen id prompt.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Find => "Find Debt",
            Self::Collect => "Collect Debt",
        }
    }

    /// Request posted once a citizen id is entered.
    #[must_use]
    pub fn request(self, citizenid: String) -> AdminRequest {
        match self {
            Self::Find => AdminRequest::SpecificDebt(citizenid),
            Self::Collect => AdminRequest::CollectDebt(citizenid),
        }
    }
}

/// Dashboard shortcut that asks the host to run a flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminShortcut {
    /// Show the vault balance.
    ViewVault,
    /// Open the deposit flow.
    AddVault,
    /// Open the withdrawal flow.
    WithdrawVault,
    /// List active debts.
    ViewDebts,
}

impl AdminShortcut {
    /// Request the shortcut posts.
    #[must_use]
    pub const fn request(self) -> AdminRequest {
        match self {
            Self::ViewVault => AdminRequest::ViewVault,
            Self::AddVault => AdminRequest::OpenVaultDeposit,
            Self::WithdrawVault => AdminRequest::OpenVaultWithdrawal,
            Self::ViewDebts => AdminRequest::ViewDebts,
        }
    }
}

/// Text input the engine tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputField {
    /// Deposit amount.
    VaultAddAmount,
    /// Withdrawal amount.
    VaultWithdrawAmount,
    /// Calculator amount.
    CalculatorAmount,
    /// Citizen id in the debt lookup prompt.
    DebtCitizenId,
    /// Manual value for an economy knob.
    Manual(ModeTarget),
    /// Issuance form field.
    Issue(IssueField),
}

/// Named keyboard key the UI reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Close whatever is open.
    Escape,
    /// Activate the primary action of the visible panel.
    Enter,
}

impl Key {
    /// Resolve a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Escape" => Some(Self::Escape),
            "Enter" => Some(Self::Enter),
            _ => None,
        }
    }
}

/// Everything a user can ask the UI to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiCommand {
    /// Close the overlay and tell the host.
    Close,
    /// Accept the payment.
    Pay,
    /// Refuse the payment.
    Refuse,
    /// Confirm the deposit form.
    ConfirmVaultAdd,
    /// Confirm the withdrawal form.
    ConfirmVaultWithdraw,
    /// Ask for a tax estimate.
    ConfirmCalculator,
    /// Confirm the debt lookup prompt.
    ConfirmDebtInput,
    /// Store input text.
    Edit {
        /// Input being edited.
        field: InputField,
        /// Raw text.
        value: String,
    },
    /// Switch dashboard section.
    Navigate(AdminView),
    /// Flip an auto/manual toggle.
    SetMode {
        /// Knob being toggled.
        target: ModeTarget,
        /// New source.
        mode: SettingMode,
    },
    /// Reload metrics and settings.
    RefreshAdmin,
    /// Save the settings draft (only while dirty).
    SaveSettings,
    /// Load the audit log.
    FetchLogs,
    /// Run a dashboard shortcut.
    Shortcut(AdminShortcut),
    /// Open the citizen id prompt for a debt lookup.
    StartDebtLookup(DebtLookup),
    /// Select a tax type in the issuance dropdown.
    SelectTaxType(String),
    /// Pick a tax chip and recompute the preview.
    PickTaxChip(String),
    /// Change the issuance target mode.
    SetTargetMode(String),
    /// Recompute the issuance preview.
    PreviewIssue,
    /// Submit the issuance form.
    SubmitIssue,
    /// Key press; `in_textarea` suppresses Enter.
    KeyPress {
        /// Key pressed.
        key: Key,
        /// Whether focus was inside a textarea.
        in_textarea: bool,
    },
}

/// Clickable control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlId {
    /// Close button on any panel.
    Close,
    /// Payment accept button.
    Pay,
    /// Payment refuse button.
    Refuse,
    /// Deposit confirm button.
    VaultAddConfirm,
    /// Withdrawal confirm button.
    VaultWithdrawConfirm,
    /// Calculator confirm button.
    CalculatorConfirm,
    /// Debt lookup confirm button.
    DebtInputConfirm,
    /// Dashboard navigation entry.
    Nav(AdminView),
    /// Auto/manual segment.
    ModeToggle(ModeTarget, SettingMode),
    /// Dashboard refresh button.
    AdminRefresh,
    /// Settings save button.
    AdminSave,
    /// Audit log load button.
    AdminFetchLogs,
    /// Vault balance shortcut.
    AdminViewVault,
    /// Deposit shortcut.
    AdminAddVault,
    /// Withdrawal shortcut.
    AdminWithdrawVault,
    /// Debt list shortcut.
    AdminViewDebts,
    /// Single debt lookup shortcut.
    AdminViewSpecificDebt,
    /// Debt collection shortcut.
    AdminCollectDebt,
    /// Tax chip for a catalog key.
    TaxChip(String),
    /// Issuance preview button.
    IssueCalc,
    /// Issuance submit button.
    IssueSubmit,
}

impl ControlId {
    /// Command raised when the control is activated.
    #[must_use]
    pub fn command(&self) -> UiCommand {
        match self {
            Self::Close => UiCommand::Close,
            Self::Pay => UiCommand::Pay,
            Self::Refuse => UiCommand::Refuse,
            Self::VaultAddConfirm => UiCommand::ConfirmVaultAdd,
            Self::VaultWithdrawConfirm => UiCommand::ConfirmVaultWithdraw,
            Self::CalculatorConfirm => UiCommand::ConfirmCalculator,
            Self::DebtInputConfirm => UiCommand::ConfirmDebtInput,
            Self::Nav(view) => UiCommand::Navigate(*view),
            Self::ModeToggle(target, mode) => UiCommand::SetMode {
                target: *target,
                mode: mode.clone(),
            },
            Self::AdminRefresh => UiCommand::RefreshAdmin,
            Self::AdminSave => UiCommand::SaveSettings,
            Self::AdminFetchLogs => UiCommand::FetchLogs,
            Self::AdminViewVault => UiCommand::Shortcut(AdminShortcut::ViewVault),
            Self::AdminAddVault => UiCommand::Shortcut(AdminShortcut::AddVault),
            Self::AdminWithdrawVault => UiCommand::Shortcut(AdminShortcut::WithdrawVault),
            Self::AdminViewDebts => UiCommand::Shortcut(AdminShortcut::ViewDebts),
            Self::AdminViewSpecificDebt => UiCommand::StartDebtLookup(DebtLookup::Find),
            Self::AdminCollectDebt => UiCommand::StartDebtLookup(DebtLookup::Collect),
            Self::TaxChip(key) => UiCommand::PickTaxChip(key.clone()),
            Self::IssueCalc => UiCommand::PreviewIssue,
            Self::IssueSubmit => UiCommand::SubmitIssue,
        }
    }

    /// Whether the control is disabled while the busy lock is held.
    #[must_use]
    pub const fn busy_sensitive(&self) -> bool {
        !matches!(
            self,
            Self::Close | Self::Nav(_) | Self::ModeToggle(..) | Self::TaxChip(_) | Self::IssueCalc
        )
    }
}

/// Control activated by Enter while `panel` is visible.
#[must_use]
pub const fn primary_control(panel: PanelId, view: AdminView) -> Option<ControlId> {
    match panel {
        PanelId::VaultAdd => Some(ControlId::VaultAddConfirm),
        PanelId::VaultWithdraw => Some(ControlId::VaultWithdrawConfirm),
        PanelId::TaxCalculator => Some(ControlId::CalculatorConfirm),
        PanelId::Payment => Some(ControlId::Pay),
        PanelId::DebtInput => Some(ControlId::DebtInputConfirm),
        PanelId::AdminDashboard => match view {
            AdminView::Settings => Some(ControlId::AdminSave),
            AdminView::Issue => Some(ControlId::IssueSubmit),
            AdminView::Overview | AdminView::Operations | AdminView::Logs => None,
        },
        PanelId::VaultView | PanelId::DebtList | PanelId::DebtDetail | PanelId::Success => None,
    }
}
