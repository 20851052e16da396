//! Untyped product records and numeric coercion.
//!
//! Catalog payloads are untrusted: any field may be missing, null, or carry
//! the wrong JSON type. [`RawProduct`] keeps the record exactly as received
//! and answers presence questions field by field, leaving every judgement to
//! the validator.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Leading numeric prefix accepted by [`coerce_number`].
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("numeric prefix pattern is valid")
});

/// A single catalog record, kept as the raw JSON value it arrived as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProduct(Value);

impl RawProduct {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the field if the record is an object that contains `name`.
    ///
    /// A field that is present with a `null` value is still present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(name))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Identifier used when reporting on this record.
    ///
    /// Absent and [empty](is_empty_value) ids fall back to `Product_<index>`.
    pub fn report_id(&self, index: usize) -> Value {
        match self.field("id") {
            Some(id) if !is_empty_value(id) => id.clone(),
            _ => placeholder_id(index),
        }
    }

    /// Title used when reporting on this record, or `"Unknown"`.
    pub fn report_title(&self) -> String {
        match self.field("title") {
            Some(title) if !is_empty_value(title) => text_of(title),
            _ => "Unknown".to_string(),
        }
    }
}

fn placeholder_id(index: usize) -> Value {
    Value::String(format!("Product_{index}"))
}

/// Whether a present value carries nothing: `null`, `false`, zero or `""`.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Text form of a JSON value as it would be shown to a reader.
///
/// Strings are returned verbatim and every other value uses its compact JSON
/// rendering, so `null` reads as `null`.
pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Text form wrapped in double quotes, used as the `actual` of format defects.
pub fn quoted(value: &Value) -> Value {
    Value::String(format!("\"{}\"", text_of(value)))
}

/// Name of the JSON type of `value`.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coerces a field into a number.
///
/// JSON numbers are returned unchanged. Strings are read from their leading
/// numeric prefix after any leading whitespace, so `"19.99"` and `" 5 kg"`
/// coerce while `"abc"` and `""` do not. All other types fail coercion.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_prefix(s),
        _ => None,
    }
}

fn parse_numeric_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let prefix = NUMERIC_PREFIX.find(trimmed)?.as_str();

    match prefix.trim_start_matches(['+', '-']) {
        "Infinity" if prefix.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => prefix.parse::<f64>().ok(),
    }
}

/// Converts a coerced number back into JSON for reporting.
///
/// Whole numbers are emitted as integers; values JSON cannot represent
/// (infinities) are emitted as text.
pub fn number_value(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        return Value::from(n as i64);
    }

    Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(format_non_finite(n)))
}

fn format_non_finite(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_sign_negative() {
        "-Infinity".to_string()
    } else {
        "Infinity".to_string()
    }
}
