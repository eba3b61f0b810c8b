//! Display-only records pushed by the host.

use serde::{Deserialize, Serialize};

use crate::lenient;

/// Headline economy metrics shown on the admin dashboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Government vault balance.
    #[serde(default, deserialize_with = "lenient::number")]
    pub vault: Option<f64>,
    /// Inflation index (1.0 means neutral).
    #[serde(default, deserialize_with = "lenient::number")]
    pub inflation: Option<f64>,
    /// Effective tax rate in percent.
    #[serde(default, deserialize_with = "lenient::number")]
    pub taxrate: Option<f64>,
    /// Total collected today.
    #[serde(default, deserialize_with = "lenient::number")]
    pub today: Option<f64>,
}

/// Outstanding debt owed by a citizen.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtRecord {
    /// Character name of the debtor.
    #[serde(rename = "playerName", default, deserialize_with = "lenient::text")]
    pub player_name: Option<String>,
    /// Citizen identifier of the debtor.
    #[serde(default, deserialize_with = "lenient::text")]
    pub citizenid: Option<String>,
    /// Amount owed.
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: Option<f64>,
    /// Reason recorded when the debt was issued.
    #[serde(default, deserialize_with = "lenient::text")]
    pub reason: Option<String>,
}

/// Entry of the admin audit log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Host-formatted timestamp.
    #[serde(default, deserialize_with = "lenient::text")]
    pub timestamp: Option<String>,
    /// Log category (e.g. `tax`, `vault`).
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: Option<String>,
    /// Free-form message.
    #[serde(default, deserialize_with = "lenient::text")]
    pub message: Option<String>,
}
