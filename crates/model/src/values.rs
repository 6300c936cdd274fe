//! Current user-entered parameter values.
//!
//! Values arrive from the UI layer as loosely typed JSON (strings,
//! numbers, booleans, `{amount, asset}` objects, arrays). The helpers
//! here read them with the same leniency the terminal forms apply:
//! numbers may come in as strings, empty strings count as missing.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Parameter name (or payload name) to current value. Keys starting with
/// `__` hold game-mode form state; `rcLimit` holds the resource-credit limit.
pub type ParameterValueMap = serde_json::Map<String, Value>;

/// `true` for a missing value, `null` or the empty string.
pub fn is_empty_value(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Truthiness as the form state uses it: `null`, `false`, `0` and `""`
/// are false, everything else (including empty arrays/objects) is true.
pub fn is_truthy(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Parse a decimal amount, tolerating surrounding whitespace and
/// exponent notation. Empty input is not a number.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Numeric reading of a value: JSON numbers and numeric strings.
pub fn value_to_decimal(v: &Value) -> Option<Decimal> {
    match v {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Format a JSON number the way the terminal displays it: integral
/// values without a fractional part (`5`, not `5.0`).
pub fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match parse_decimal(&n.to_string()) {
        Some(d) => d.normalize().to_string(),
        None => n.to_string(),
    }
}

/// String form of a value as it is placed into csv/raw payloads.
/// `null` becomes empty, arrays join their elements with `,`, objects
/// are written as JSON.
pub fn value_to_string(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => v.to_string(),
    }
}

/// String field of a value map, if present and a string.
pub fn get_str<'a>(values: &'a ParameterValueMap, key: &str) -> Option<&'a str> {
    values.get(key).and_then(Value::as_str)
}
