//! UI → host requests.
//!
//! Every request is a POST named by [`HostRequest::event`] whose JSON body is
//! produced by [`HostRequest::body`]. Admin requests share the
//! `admin_requestData` event and are discriminated by `dataType`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{ProtocolError, ProtocolResult};
use crate::settings::AdminSettings;

/// Tax amount and reason echoed back when paying or refusing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaxDecision {
    /// Amount due.
    pub tax: f64,
    /// Reason shown to the player.
    pub reason: String,
}

/// Whole-unit amount payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountPayload {
    /// Strictly positive amount.
    pub amount: u64,
}

/// Tax debt issued from the admin dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTaxPayload {
    /// Target selector (`citizenid` or a host-defined group).
    #[serde(rename = "targetMode")]
    pub target_mode: String,
    /// Citizen identifier; empty unless targeting a single citizen.
    pub citizenid: String,
    /// Tax type key from the catalog.
    #[serde(rename = "type")]
    pub tax_type: String,
    /// Base value used for the preview, when valid.
    pub base: Option<u64>,
    /// Amount to issue.
    pub amount: Option<u64>,
    /// Debt reason.
    pub reason: String,
}

/// `admin_requestData` variants, keyed by `dataType`.
#[derive(Clone, Debug, PartialEq)]
pub enum AdminRequest {
    /// Ask for a fresh metrics + settings snapshot.
    State,
    /// Ask for the newest audit log entries.
    Logs {
        /// Maximum number of entries.
        limit: u32,
    },
    /// Persist the full settings draft.
    SaveSettings(AdminSettings),
    /// Issue a tax debt.
    IssueTaxDebt(IssueTaxPayload),
    /// Ask the host to show the vault balance.
    ViewVault,
    /// Ask the host to open the deposit flow.
    OpenVaultDeposit,
    /// Deposit into the vault.
    DepositVault(AmountPayload),
    /// Ask the host to open the withdrawal flow.
    OpenVaultWithdrawal,
    /// Withdraw from the vault.
    WithdrawVault(AmountPayload),
    /// Ask for the active debts list.
    ViewDebts,
    /// Look up the debt of one citizen.
    SpecificDebt(String),
    /// Collect the debt of one citizen.
    CollectDebt(String),
}

impl AdminRequest {
    /// Wire `dataType` discriminator.
    #[must_use]
    pub const fn data_type(&self) -> &'static str {
        match self {
            Self::State => "admin_state",
            Self::Logs { .. } => "admin_logs",
            Self::SaveSettings(_) => "admin_saveSettings",
            Self::IssueTaxDebt(_) => "admin_issueTaxDebt",
            Self::ViewVault => "viewVault",
            Self::OpenVaultDeposit | Self::DepositVault(_) => "addVault",
            Self::OpenVaultWithdrawal | Self::WithdrawVault(_) => "withdrawVault",
            Self::ViewDebts => "viewDebts",
            Self::SpecificDebt(_) => "specific_debt",
            Self::CollectDebt(_) => "collect_debt",
        }
    }

    fn payload(&self) -> Result<Option<Value>, serde_json::Error> {
        Ok(match self {
            Self::State
            | Self::ViewVault
            | Self::OpenVaultDeposit
            | Self::OpenVaultWithdrawal
            | Self::ViewDebts => None,
            Self::Logs { limit } => Some(json!({ "limit": limit })),
            Self::SaveSettings(settings) => Some(serde_json::to_value(settings)?),
            Self::IssueTaxDebt(payload) => Some(serde_json::to_value(payload)?),
            Self::DepositVault(amount) | Self::WithdrawVault(amount) => {
                Some(serde_json::to_value(amount)?)
            }
            Self::SpecificDebt(citizenid) | Self::CollectDebt(citizenid) => {
                Some(Value::String(citizenid.clone()))
            }
        })
    }
}

/// Request posted to the host.
#[derive(Clone, Debug, PartialEq)]
pub enum HostRequest {
    /// Acknowledge an `open` message.
    Ready,
    /// The UI closed itself; the host should reset its session.
    ForceClose,
    /// Player accepted the payment.
    PayTax(TaxDecision),
    /// Player refused the payment.
    RefuseTax(TaxDecision),
    /// Player asked for a tax estimate.
    CalculateTax(AmountPayload),
    /// Admin dashboard data request or mutation.
    AdminRequestData(AdminRequest),
}

impl HostRequest {
    /// Event name, used as the last path segment of the POST URL.
    #[must_use]
    pub const fn event(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::ForceClose => "forceClose",
            Self::PayTax(_) => "payTax",
            Self::RefuseTax(_) => "refuseTax",
            Self::CalculateTax(_) => "calculateTax",
            Self::AdminRequestData(_) => "admin_requestData",
        }
    }

    /// JSON body of the request.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] when a payload cannot be serialized
    /// (for example a non-finite float inside a settings document).
    pub fn body(&self) -> ProtocolResult<Value> {
        let event = self.event();
        let encode = |source: serde_json::Error| ProtocolError::Encode { event, source };
        match self {
            Self::Ready => Ok(json!({ "ok": true })),
            Self::ForceClose => Ok(Value::Object(Map::new())),
            Self::PayTax(decision) | Self::RefuseTax(decision) => {
                serde_json::to_value(decision).map_err(encode)
            }
            Self::CalculateTax(amount) => serde_json::to_value(amount).map_err(encode),
            Self::AdminRequestData(request) => {
                let mut body = Map::new();
                body.insert(
                    "dataType".to_string(),
                    Value::String(request.data_type().to_string()),
                );
                if let Some(payload) = request.payload().map_err(encode)? {
                    body.insert("payload".to_string(), payload);
                }
                Ok(Value::Object(body))
            }
        }
    }
}
