//! Permissive boolean parsing.

/// Words accepted as `true`, compared case-insensitively.
const TRUE_TOKENS: &[&str] = &["true", "t", "yes", "y", "on", "1"];
/// Words accepted as `false`, compared case-insensitively.
const FALSE_TOKENS: &[&str] = &["false", "f", "no", "n", "off", "0"];

/// Read a boolean from user text.
///
/// Accepts `true/t/yes/y/on/1` and `false/f/no/n/off/0` in any case,
/// ignoring surrounding whitespace. Anything else is `None`.
pub fn parse_bool_lenient(s: &str) -> Option<bool> {
    let s = s.trim();
    if TRUE_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(s)) {
        Some(true)
    } else if FALSE_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(s)) {
        Some(false)
    } else {
        None
    }
}

/// Read a boolean from a JSON value: booleans as-is, numbers `1`/`0`,
/// strings through [`parse_bool_lenient`].
pub fn value_to_bool_lenient(v: &serde_json::Value) -> Option<bool> {
    match v {
        serde_json::Value::Bool(b) => Some(*b),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        serde_json::Value::String(s) => parse_bool_lenient(s),
        _ => None,
    }
}
