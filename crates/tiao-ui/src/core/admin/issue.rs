//! Tax issuance form: catalog selection, preview, and submission checks.
//!
//! # Design
//! - Inputs are kept as the raw text the operator typed; parsing happens on
//!   preview and submit only.
//! - A rejected submission never reaches the host; the reason is shown inline.

use tiao_config::NumberLocale;
use tiao_protocol::catalog::FALLBACK_TAX_KEY;
use tiao_protocol::lenient::parse_positive_int;
use tiao_protocol::{IssueTaxPayload, TaxMode, TaxTypeDescriptor};

use crate::core::format::{currency, fixed};

/// Target mode that requires a citizen id.
pub const TARGET_CITIZEN_ID: &str = "citizenid";

/// Preview shown when nothing can be computed.
pub const EMPTY_PREVIEW: &str = "—";

/// Tone of the inline status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    /// Validation failure.
    Error,
    /// Request in flight.
    Pending,
    /// Request handed to the host.
    Done,
}

impl StatusTone {
    /// CSS modifier class.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Pending => "warn",
            Self::Done => "ok",
        }
    }
}

/// Inline status line under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueStatus {
    /// Message text.
    pub message: String,
    /// Tone.
    pub tone: StatusTone,
}

/// Why a submission was refused locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueRejection {
    /// Amount is not a strictly positive integer.
    InvalidAmount,
    /// Citizen target without a citizen id.
    MissingCitizenId,
}

impl IssueRejection {
    /// Operator-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidAmount => "Invalid amount.",
            Self::MissingCitizenId => "Enter the citizen ID.",
        }
    }
}

/// Editable field of the issuance form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueField {
    /// Base value for percentage taxes.
    Base,
    /// Amount to issue.
    Amount,
    /// Debt reason.
    Reason,
    /// Target citizen id.
    CitizenId,
}

/// State of the issuance form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueForm {
    tax_type: String,
    base: String,
    amount: String,
    reason: String,
    target_mode: String,
    citizenid: String,
    preview: String,
    status: Option<IssueStatus>,
}

impl Default for IssueForm {
    fn default() -> Self {
        Self {
            tax_type: FALLBACK_TAX_KEY.to_string(),
            base: String::new(),
            amount: String::new(),
            reason: String::new(),
            target_mode: TARGET_CITIZEN_ID.to_string(),
            citizenid: String::new(),
            preview: EMPTY_PREVIEW.to_string(),
            status: None,
        }
    }
}

impl IssueForm {
    /// Selected tax type key.
    #[must_use]
    pub fn tax_type(&self) -> &str {
        &self.tax_type
    }

    /// Raw text of `field`.
    #[must_use]
    pub fn field(&self, field: IssueField) -> &str {
        match field {
            IssueField::Base => &self.base,
            IssueField::Amount => &self.amount,
            IssueField::Reason => &self.reason,
            IssueField::CitizenId => &self.citizenid,
        }
    }

    /// Selected target mode.
    #[must_use]
    pub fn target_mode(&self) -> &str {
        &self.target_mode
    }

    /// Preview line.
    #[must_use]
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Status line, hidden when `None`.
    #[must_use]
    pub const fn status(&self) -> Option<&IssueStatus> {
        self.status.as_ref()
    }

    /// Whether the citizen id input is shown.
    #[must_use]
    pub fn citizen_field_visible(&self) -> bool {
        self.target_mode == TARGET_CITIZEN_ID
    }

    /// Store raw input text.
    pub fn set_field(&mut self, field: IssueField, value: String) {
        match field {
            IssueField::Base => self.base = value,
            IssueField::Amount => self.amount = value,
            IssueField::Reason => self.reason = value,
            IssueField::CitizenId => self.citizenid = value,
        }
    }

    /// Change the target mode.
    pub fn set_target_mode(&mut self, mode: String) {
        self.target_mode = mode;
    }

    /// Select a tax type without recomputing the preview.
    pub fn select_tax_type(&mut self, key: String) {
        self.tax_type = key;
    }

    /// Keep the selection when `catalog` still has it, else pick the first
    /// entry, else the fallback key.
    pub fn sync_with_catalog(&mut self, catalog: &[TaxTypeDescriptor]) {
        if catalog.iter().any(|entry| entry.key == self.tax_type) {
            return;
        }
        self.tax_type = catalog
            .first()
            .map_or_else(|| FALLBACK_TAX_KEY.to_string(), |entry| entry.key.clone());
    }

    /// Recompute the preview from the selected type and base.
    ///
    /// Overwrites the amount, fills the reason only when empty, and clears the
    /// status line.
    pub fn recalculate(&mut self, catalog: &[TaxTypeDescriptor], locale: NumberLocale) {
        self.status = None;
        let descriptor = catalog.iter().find(|entry| entry.key == self.tax_type);
        let (Some(descriptor), Some(base)) = (descriptor, parse_positive_int(&self.base)) else {
            self.preview = EMPTY_PREVIEW.to_string();
            return;
        };
        let amount = descriptor.amount_for(base);
        #[allow(clippy::cast_precision_loss)]
        let (base_value, amount_value) = (base as f64, amount as f64);
        self.preview = match descriptor.mode {
            TaxMode::PercentOfBase => format!(
                "Base {} × {}% = {}",
                currency(base_value, locale),
                fixed(descriptor.percent.unwrap_or(0.0), 2),
                currency(amount_value, locale)
            ),
            TaxMode::FixedAmount => format!("Fixed amount = {}", currency(amount_value, locale)),
        };
        self.amount = amount.to_string();
        if self.reason.is_empty() {
            self.reason.clone_from(&descriptor.label);
        }
    }

    /// Validate the form and build the request payload.
    ///
    /// # Errors
    /// Returns the first [`IssueRejection`] that applies.
    pub fn payload(&self) -> Result<IssueTaxPayload, IssueRejection> {
        let amount = parse_positive_int(&self.amount).ok_or(IssueRejection::InvalidAmount)?;
        let citizenid = self.citizenid.trim();
        if self.citizen_field_visible() && citizenid.is_empty() {
            return Err(IssueRejection::MissingCitizenId);
        }
        Ok(IssueTaxPayload {
            target_mode: non_empty_or(&self.target_mode, TARGET_CITIZEN_ID),
            citizenid: citizenid.to_string(),
            tax_type: non_empty_or(&self.tax_type, FALLBACK_TAX_KEY),
            base: parse_positive_int(&self.base),
            amount: Some(amount),
            reason: self.reason.trim().to_string(),
        })
    }

    /// Show a status line.
    pub fn set_status(&mut self, message: &str, tone: StatusTone) {
        self.status = Some(IssueStatus {
            message: message.to_string(),
            tone,
        });
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
