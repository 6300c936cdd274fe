//! Payload encoding for the `json`, `csv` and `raw` parse modes.
//!
//! `game` mode lives in [`crate::game`]; [`encode`] dispatches to it.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use vscterm_codec::boolean::value_to_bool_lenient;
use vscterm_model::values::{is_empty_value, value_to_decimal, value_to_string};
use vscterm_model::{FunctionDescriptor, FunctionParameter, ParamKind, ParameterValueMap, ParseMode};

use crate::game;
use crate::intent::{EncodedPayload, SpendIntent};

/// Token used for an intent whose value names no asset.
pub(crate) const DEFAULT_TOKEN: &str = "hive";

/// Encode a call to `func` with the current `values`.
///
/// Never fails: missing or malformed values fall back to the type
/// defaults, and intents with unusable amounts are left out.
pub fn encode(func: &FunctionDescriptor, values: &ParameterValueMap) -> EncodedPayload {
    let encoded = match func.parse {
        ParseMode::Game => game::encode_game(func, values),
        mode => EncodedPayload {
            payload: match mode {
                ParseMode::Csv => encode_csv(func, values),
                ParseMode::Raw => encode_raw(func, values),
                _ => encode_json(func, values),
            },
            intents: collect_intents(func, values),
            action: func.name.clone(),
        },
    };
    tracing::debug!(
        function = %func.name,
        mode = func.parse.as_str(),
        action = %encoded.action,
        intents = encoded.intents.len(),
        "encoded payload"
    );
    encoded
}

// ──────────────────────────────────────────────
// Value lookup
// ──────────────────────────────────────────────

/// Current value of a parameter, looked up by display name, then by
/// payload name.
pub(crate) fn param_value<'a>(
    values: &'a ParameterValueMap,
    param: &FunctionParameter,
) -> Option<&'a Value> {
    values.get(&param.name).or_else(|| {
        param
            .payload_name
            .as_deref()
            .and_then(|key| values.get(key))
    })
}

/// Value used when a parameter has none.
pub fn default_value(kind: &ParamKind) -> Value {
    match kind {
        ParamKind::Bool { .. } => Value::Bool(false),
        ParamKind::Number { .. } | ParamKind::Int { .. } => Value::from(0),
        ParamKind::Meta { .. } => Value::Object(Map::new()),
        ParamKind::Address => Value::String("hive:".to_string()),
        _ => Value::String(String::new()),
    }
}

fn resolved_value(values: &ParameterValueMap, param: &FunctionParameter) -> Value {
    match param_value(values, param) {
        Some(v) if !is_empty_value(Some(v)) => v.clone(),
        _ => default_value(&param.kind),
    }
}

// ──────────────────────────────────────────────
// Intents
// ──────────────────────────────────────────────

/// Read an intent value `{amount, asset}`. `None` unless the amount is a
/// non-empty number.
pub(crate) fn intent_from_value(value: Option<&Value>) -> Option<SpendIntent> {
    let obj = value?.as_object()?;
    let amount = obj.get("amount").and_then(value_to_decimal)?;
    let token = obj
        .get("asset")
        .and_then(Value::as_str)
        .filter(|a| !a.trim().is_empty())
        .unwrap_or(DEFAULT_TOKEN);
    Some(SpendIntent::transfer_allow(token, amount))
}

fn collect_intents(func: &FunctionDescriptor, values: &ParameterValueMap) -> Vec<SpendIntent> {
    func.parameters_where(ParamKind::is_intent)
        .filter_map(|p| intent_from_value(param_value(values, p)))
        .collect()
}

// ──────────────────────────────────────────────
// json
// ──────────────────────────────────────────────

/// `true` only for `true`, `"true"`, `1` and `"1"`.
fn strict_bool(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true" || s == "1",
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

/// JSON number for a decimal; integral values stay integers.
fn number_value(d: Decimal) -> Value {
    if d.fract().is_zero() {
        if let Some(i) = d.to_i64() {
            return Value::from(i);
        }
    }
    d.to_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0))
}

fn coerce_json(func: &FunctionDescriptor, param: &FunctionParameter, value: Value) -> Value {
    if param.as_string {
        return Value::String(value_to_string(&value));
    }
    match &param.kind {
        ParamKind::Number { .. } => number_value(value_to_decimal(&value).unwrap_or_default()),
        ParamKind::Int { .. } => {
            number_value(value_to_decimal(&value).unwrap_or_default().trunc())
        }
        ParamKind::Bool { .. } => Value::Bool(strict_bool(&value)),
        ParamKind::Meta { as_array, .. } => match value {
            Value::Object(map) if as_array.unwrap_or(func.meta_as_array) => Value::Array(
                map.into_iter()
                    .map(|(key, val)| serde_json::json!({ "key": key, "val": val }))
                    .collect(),
            ),
            other => other,
        },
        _ => value,
    }
}

/// Set `value` at a dotted path, creating intermediate objects.
fn set_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut cur = root;
    for segment in parents {
        let slot = cur
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        cur = match slot {
            Value::Object(map) => map,
            _ => return,
        };
    }
    cur.insert(last.to_string(), value);
}

/// Build the payload object in declaration order and stringify it.
pub fn encode_json(func: &FunctionDescriptor, values: &ParameterValueMap) -> String {
    let mut root = Map::new();
    for param in &func.parameters {
        if param.kind.is_intent() {
            continue;
        }
        let value = coerce_json(func, param, resolved_value(values, param));
        set_path(&mut root, param.wire_key(), value);
    }
    Value::Object(root).to_string()
}

// ──────────────────────────────────────────────
// csv
// ──────────────────────────────────────────────

fn csv_value(param: &FunctionParameter, value: Option<&Value>) -> String {
    if let ParamKind::Bool {
        true_label,
        false_label,
    } = &param.kind
    {
        let parsed = match value {
            Some(v) if !is_empty_value(Some(v)) => value_to_bool_lenient(v),
            _ => Some(false),
        };
        return match parsed {
            Some(true) => true_label.as_deref().unwrap_or("true").to_string(),
            Some(false) => false_label.as_deref().unwrap_or("false").to_string(),
            None => value.map(value_to_string).unwrap_or_default(),
        };
    }
    value.map(value_to_string).unwrap_or_default()
}

/// Join parameters as `key:value` (or bare values) with the function's
/// delimiter.
pub fn encode_csv(func: &FunctionDescriptor, values: &ParameterValueMap) -> String {
    func.parameters
        .iter()
        .filter(|p| !p.kind.is_intent())
        .map(|p| {
            let value = csv_value(p, param_value(values, p));
            if func.exclude_keys {
                value
            } else {
                format!("{}{}{}", p.wire_key(), func.key_delimiter, value)
            }
        })
        .collect::<Vec<_>>()
        .join(&func.delimiter)
}

// ──────────────────────────────────────────────
// raw
// ──────────────────────────────────────────────

/// String form of the first non-intent parameter.
pub fn encode_raw(func: &FunctionDescriptor, values: &ParameterValueMap) -> String {
    func.parameters
        .iter()
        .find(|p| !p.kind.is_intent())
        .map(|p| value_to_string(&resolved_value(values, p)))
        .unwrap_or_default()
}
