//! Tax type descriptors used to preview issued debts.
//!
//! Host catalogs are decoded entry by entry: an entry only needs a key, the
//! label falls back to the key and an unknown or missing mode means a fixed
//! amount. Entries without a key are dropped by [`catalog_from_value`].

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::lenient;

/// Key used when nothing else in the catalog can be selected.
pub const FALLBACK_TAX_KEY: &str = "OUTRO";

/// How a tax type derives its amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum TaxMode {
    /// Percentage of an operator-supplied base value.
    PercentOfBase,
    /// Flat amount independent of the base.
    #[default]
    FixedAmount,
}

impl TaxMode {
    /// Wire value understood by the host.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PercentOfBase => "base_percent",
            Self::FixedAmount => "fixed",
        }
    }
}

impl From<String> for TaxMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "base_percent" | "percentOfBase" => Self::PercentOfBase,
            _ => Self::FixedAmount,
        }
    }
}

impl<'de> Deserialize<'de> for TaxMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value
            .as_ref()
            .and_then(lenient::value_as_text)
            .map(Self::from)
            .unwrap_or_default())
    }
}

impl From<TaxMode> for String {
    fn from(value: TaxMode) -> Self {
        value.as_str().to_string()
    }
}

/// Named rule for computing a tax or fee amount.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaxTypeDescriptor {
    /// Stable key sent back to the host on issuance.
    pub key: String,
    /// Operator-facing label, also used as the default debt reason.
    pub label: String,
    /// Amount derivation rule.
    pub mode: TaxMode,
    /// Percentage applied to the base when `mode` is [`TaxMode::PercentOfBase`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    /// Flat amount when `mode` is [`TaxMode::FixedAmount`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed: Option<f64>,
}

/// Catalog entry as the host may send it.
#[derive(Deserialize)]
struct HostTaxType {
    #[serde(default, deserialize_with = "lenient::text")]
    key: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    label: Option<String>,
    #[serde(default)]
    mode: TaxMode,
    #[serde(default, deserialize_with = "lenient::number")]
    percent: Option<f64>,
    #[serde(default, alias = "fixedAmount", deserialize_with = "lenient::number")]
    fixed: Option<f64>,
}

impl<'de> Deserialize<'de> for TaxTypeDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HostTaxType::deserialize(deserializer)?;
        let key = raw
            .key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| <D::Error as DeError>::custom("tax type entry has no key"))?;
        let label = raw
            .label
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| key.clone());
        Ok(Self {
            key,
            label,
            mode: raw.mode,
            percent: raw.percent,
            fixed: raw.fixed,
        })
    }
}

/// Decode a host catalog, keeping every entry that has a key.
///
/// Returns `None` when `value` is not a list or no entry survives, so callers
/// keep the catalog they already have.
#[must_use]
pub fn catalog_from_value(value: &Value) -> Option<Vec<TaxTypeDescriptor>> {
    lenient::each::<TaxTypeDescriptor>(value).filter(|catalog| !catalog.is_empty())
}

/// `deserialize_with` adapter applying [`catalog_from_value`].
pub(crate) fn host_catalog<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<TaxTypeDescriptor>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(catalog_from_value))
}

impl TaxTypeDescriptor {
    /// Percentage-of-base descriptor.
    #[must_use]
    pub fn percent_of_base(key: &str, label: &str, percent: f64) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            mode: TaxMode::PercentOfBase,
            percent: Some(percent),
            fixed: None,
        }
    }

    /// Fixed-amount descriptor.
    #[must_use]
    pub fn fixed_amount(key: &str, label: &str, amount: f64) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            mode: TaxMode::FixedAmount,
            percent: None,
            fixed: Some(amount),
        }
    }

    /// Amount this rule yields for `base`, floored to a whole unit.
    ///
    /// Negative results clamp to zero.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn amount_for(&self, base: u64) -> u64 {
        let raw = match self.mode {
            TaxMode::PercentOfBase => {
                let percent = self.percent.unwrap_or(0.0);
                (base as f64 * (percent / 100.0)).floor()
            }
            TaxMode::FixedAmount => self.fixed.unwrap_or(0.0).floor(),
        };
        if raw.is_finite() && raw > 0.0 {
            raw as u64
        } else {
            0
        }
    }
}

/// Catalog used until the host supplies its own.
#[must_use]
pub fn default_tax_catalog() -> Vec<TaxTypeDescriptor> {
    vec![
        TaxTypeDescriptor::percent_of_base("IPTU", "IPTU", 0.3),
        TaxTypeDescriptor::percent_of_base("IPVA", "IPVA", 1.5),
        TaxTypeDescriptor::percent_of_base("IRPF", "Income Tax", 2.0),
        TaxTypeDescriptor::fixed_amount("ADMIN_FINE", "Administrative Fine", 1000.0),
        TaxTypeDescriptor::fixed_amount("GOV_FEE", "Government Fee", 500.0),
        TaxTypeDescriptor::fixed_amount(FALLBACK_TAX_KEY, "Other", 0.0),
    ]
}
