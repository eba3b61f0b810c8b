//! Tolerant decoding of host-supplied scalars.
//!
//! # Design
//! - The host is a scripting runtime; numbers may arrive as strings and labels as numbers.
//! - Anything that cannot be interpreted decodes to `None` instead of failing the whole payload.
//! - Non-finite numbers are never surfaced.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON value as a finite number.
///
/// Strings are trimmed and may use a comma as decimal separator.
#[must_use]
pub fn value_as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_number(text),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    number.filter(|number| number.is_finite())
}

/// Interpret a JSON value as display text.
#[must_use]
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse free-form numeric input, accepting a comma as decimal separator.
///
/// Blank input parses as zero, matching how the host's numeric fields treat
/// cleared inputs.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed
        .replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Keep only the digits of `raw` and return them as a strictly positive integer.
#[must_use]
pub fn parse_positive_int(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().ok().filter(|value| *value > 0)
}

/// `deserialize_with` adapter for optional lenient numbers.
///
/// # Errors
/// Only fails when the underlying deserializer cannot produce a JSON value.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

/// `deserialize_with` adapter for optional lenient text.
///
/// # Errors
/// Only fails when the underlying deserializer cannot produce a JSON value.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_text))
}

/// `deserialize_with` adapter that keeps track of whether a number was sent.
///
/// Absent fields stay `None` through `#[serde(default)]`; present fields decode
/// to `Some`, holding `None` when the value is `null` or not numeric.
///
/// # Errors
/// Only fails when the underlying deserializer cannot produce a JSON value.
#[allow(clippy::option_option)]
pub fn present_number<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    number(deserializer).map(Some)
}

/// Decode every element of a JSON array, dropping the ones that do not fit `T`.
///
/// Returns `None` when `value` is not an array.
#[must_use]
pub fn each<T>(value: &Value) -> Option<Vec<T>>
where
    T: DeserializeOwned,
{
    let items = value.as_array()?;
    Some(items.iter().filter_map(|item| T::deserialize(item).ok()).collect())
}

/// `deserialize_with` adapter for lists decoded element by element.
///
/// # Errors
/// Only fails when the underlying deserializer cannot produce a JSON value.
pub fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(each))
}

/// `deserialize_with` adapter for nested objects; a value that does not fit
/// `T` decodes to `None` instead of failing the enclosing payload.
///
/// # Errors
/// Only fails when the underlying deserializer cannot produce a JSON value.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| T::deserialize(&value).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_accept_strings_and_commas() {
        assert_eq!(value_as_f64(&json!(12)), Some(12.0));
        assert_eq!(value_as_f64(&json!("1,5")), Some(1.5));
        assert_eq!(value_as_f64(&json!(" 2.25 ")), Some(2.25));
        assert_eq!(value_as_f64(&json!("abc")), None);
        assert_eq!(value_as_f64(&json!(null)), None);
        assert_eq!(value_as_f64(&json!({"n": 1})), None);
    }

    #[test]
    fn parse_number_rejects_non_finite_words() {
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(""), Some(0.0));
    }

    #[test]
    fn positive_int_strips_everything_but_digits() {
        assert_eq!(parse_positive_int("$ 1.500"), Some(1500));
        assert_eq!(parse_positive_int("12abc3"), Some(123));
        assert_eq!(parse_positive_int("0"), None);
        assert_eq!(parse_positive_int(""), None);
        assert_eq!(parse_positive_int("-"), None);
    }

    #[test]
    fn each_keeps_the_elements_that_fit() {
        let rows: Option<Vec<u32>> = each(&json!([1, "two", 3, null]));
        assert_eq!(rows, Some(vec![1, 3]));
        assert_eq!(each::<u32>(&json!({"0": 1})), None);
        assert_eq!(each::<u32>(&json!([])), Some(Vec::new()));
    }

    #[test]
    fn text_stringifies_scalars_only() {
        assert_eq!(value_as_text(&json!("a")).as_deref(), Some("a"));
        assert_eq!(value_as_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(value_as_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(value_as_text(&json!([1])), None);
    }
}
