//! Typed schema for the admin settings document.
//!
//! # Design
//! - Fields the dashboard edits are strongly typed (`mode.*`, `manual.*`).
//! - Everything else the host sends is preserved verbatim in `extra` maps and
//!   echoed back on save, so the UI never drops server configuration it does
//!   not understand.
//! - Dotted control paths map onto [`SettingField`]; unknown paths fall back to
//!   nested writes into `extra`, creating intermediate objects as needed.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::catalog::{TaxTypeDescriptor, catalog_from_value};
use crate::error::{ProtocolError, ProtocolResult};
use crate::lenient;

/// Automatic vs operator-controlled value source.
///
/// Host values other than exactly `auto` or `manual` are kept verbatim in
/// [`SettingMode::Other`] so a save echoes what the host sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SettingMode {
    /// Host computes the value.
    #[default]
    Auto,
    /// Operator supplies the value through the paired manual input.
    Manual,
    /// Any other host value, e.g. `scheduled` or `MANUAL`.
    Other(String),
}

impl SettingMode {
    /// Parse a wire value without normalising it.
    #[must_use]
    pub fn from_value(raw: &str) -> Self {
        match raw {
            "auto" => Self::Auto,
            "manual" => Self::Manual,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire value for the mode.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
            Self::Other(raw) => raw,
        }
    }

    /// Whether the paired manual input should accept edits.
    ///
    /// Host spellings of `manual` in any letter case count as manual.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        match self {
            Self::Auto => false,
            Self::Manual => true,
            Self::Other(raw) => raw.trim().eq_ignore_ascii_case("manual"),
        }
    }
}

impl Serialize for SettingMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SettingMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value
            .as_ref()
            .and_then(lenient::value_as_text)
            .map_or(Self::Auto, |raw| Self::from_value(&raw)))
    }
}

/// Economy knob that has an auto/manual toggle and a paired manual value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeTarget {
    /// Inflation index.
    Inflation,
    /// Tax rate.
    TaxRate,
}

impl ModeTarget {
    /// Every toggleable knob, in dashboard order.
    pub const ALL: [Self; 2] = [Self::Inflation, Self::TaxRate];

    /// Key used inside the `mode` and `manual` sections.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Inflation => "inflation",
            Self::TaxRate => "taxrate",
        }
    }

    /// Resolve a section key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|target| target.key() == key)
    }
}

/// Editable field of the settings document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettingField {
    /// `mode.<target>` toggle.
    Mode(ModeTarget),
    /// `manual.<target>` numeric override.
    Manual(ModeTarget),
}

impl SettingField {
    /// Dotted path of the field inside the settings document.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Mode(target) => format!("mode.{}", target.key()),
            Self::Manual(target) => format!("manual.{}", target.key()),
        }
    }

    /// Resolve a dotted control path to a typed field.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let (section, key) = path.trim().split_once('.')?;
        let target = ModeTarget::from_key(key)?;
        match section {
            "mode" => Some(Self::Mode(target)),
            "manual" => Some(Self::Manual(target)),
            _ => None,
        }
    }
}

/// `mode` section of the settings document.
///
/// Toggles the host never sent stay absent on save.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeSettings {
    /// Inflation source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation: Option<SettingMode>,
    /// Tax rate source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxrate: Option<SettingMode>,
    /// Unrecognised keys, preserved for the host.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `manual` section of the settings document.
///
/// The outer `Option` records whether the key was present: absent values are
/// not written back, while `Some(None)` is sent as `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[allow(clippy::option_option)]
pub struct ManualSettings {
    /// Operator-supplied inflation index.
    #[serde(
        default,
        deserialize_with = "lenient::present_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub inflation: Option<Option<f64>>,
    /// Operator-supplied tax rate.
    #[serde(
        default,
        deserialize_with = "lenient::present_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub taxrate: Option<Option<f64>>,
    /// Unrecognised keys, preserved for the host.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Server configuration editable from the admin dashboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminSettings {
    /// Auto/manual toggles.
    #[serde(default)]
    pub mode: ModeSettings,
    /// Manual override values.
    #[serde(default)]
    pub manual: ManualSettings,
    /// Every other section the host sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AdminSettings {
    /// Decode a settings document; `null` yields the defaults.
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnexpectedPayload`] when the value is not an
    /// object or a typed section has the wrong shape.
    pub fn from_value(value: Value) -> ProtocolResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|source| ProtocolError::UnexpectedPayload {
            context: "settings",
            source,
        })
    }

    /// Current toggle for `target`; absent toggles read as automatic.
    #[must_use]
    pub fn mode(&self, target: ModeTarget) -> SettingMode {
        let slot = match target {
            ModeTarget::Inflation => &self.mode.inflation,
            ModeTarget::TaxRate => &self.mode.taxrate,
        };
        slot.clone().unwrap_or_default()
    }

    /// Current manual override for `target`.
    #[must_use]
    pub const fn manual(&self, target: ModeTarget) -> Option<f64> {
        let slot = match target {
            ModeTarget::Inflation => &self.manual.inflation,
            ModeTarget::TaxRate => &self.manual.taxrate,
        };
        match slot {
            Some(Some(value)) => Some(*value),
            Some(None) | None => None,
        }
    }

    /// Set the toggle for `target`.
    pub fn set_mode(&mut self, target: ModeTarget, mode: SettingMode) {
        let slot = match target {
            ModeTarget::Inflation => &mut self.mode.inflation,
            ModeTarget::TaxRate => &mut self.mode.taxrate,
        };
        *slot = Some(mode);
    }

    /// Set the manual override for `target`; `None` is sent as `null`.
    pub const fn set_manual(&mut self, target: ModeTarget, value: Option<f64>) {
        match target {
            ModeTarget::Inflation => self.manual.inflation = Some(value),
            ModeTarget::TaxRate => self.manual.taxrate = Some(value),
        }
    }

    /// Write `value` at a dotted `path`.
    ///
    /// Typed fields coerce the value leniently; unknown paths are written into
    /// the matching `extra` map, replacing non-object intermediates.
    pub fn set_path(&mut self, path: &str, value: Value) {
        if let Some(field) = SettingField::from_path(path) {
            match field {
                SettingField::Mode(target) => {
                    let mode = lenient::value_as_text(&value)
                        .map_or(SettingMode::Auto, |raw| SettingMode::from_value(&raw));
                    self.set_mode(target, mode);
                }
                SettingField::Manual(target) => {
                    self.set_manual(target, lenient::value_as_f64(&value));
                }
            }
            return;
        }

        let segments: Vec<&str> = path.split('.').filter(|segment| !segment.is_empty()).collect();
        match segments.as_slice() {
            [] => {}
            ["mode"] => self.mode = serde_json::from_value(value).unwrap_or_default(),
            ["manual"] => self.manual = serde_json::from_value(value).unwrap_or_default(),
            ["mode", rest @ ..] => set_in_map(&mut self.mode.extra, rest, value),
            ["manual", rest @ ..] => set_in_map(&mut self.manual.extra, rest, value),
            all => set_in_map(&mut self.extra, all, value),
        }
    }

    /// Tax catalog embedded in the settings document, if any entry is usable.
    #[must_use]
    pub fn tax_catalog(&self) -> Option<Vec<TaxTypeDescriptor>> {
        self.extra.get("taxCatalog").and_then(catalog_from_value)
    }
}

fn set_in_map(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut cursor = map;
    for segment in parents {
        let slot = cursor
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        cursor = next;
    }
    cursor.insert((*last).to_string(), value);
}
