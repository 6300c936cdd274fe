//! Mandatory-field validation.
//!
//! [`describe_missing`] lists every problem that blocks submission, one
//! message per failing field; [`is_valid`] is true exactly when that list
//! is empty. Neither ever fails.
//!
//! [`describe_bounds`] reports number and int values outside their
//! declared type or range. It is advisory and has no effect on validity.

use rust_decimal::Decimal;
use serde_json::Value;
use vscterm_codec::format_amount;
use vscterm_model::values::{is_empty_value, value_to_decimal};
use vscterm_model::{Asset, Balances, FunctionDescriptor, FunctionParameter, ParamKind, ParameterValueMap, ParseMode};

use crate::encode::param_value;
use crate::game::describe_game_issues;

pub fn is_valid(func: &FunctionDescriptor, values: &ParameterValueMap, balances: &Balances) -> bool {
    describe_missing(func, values, balances).is_empty()
}

/// Human-readable reasons the call cannot be submitted yet.
pub fn describe_missing(
    func: &FunctionDescriptor,
    values: &ParameterValueMap,
    balances: &Balances,
) -> Vec<String> {
    let issues = match func.parse {
        ParseMode::Game => describe_game_issues(values, balances),
        _ => func
            .parameters
            .iter()
            .filter_map(|p| parameter_issue(p, param_value(values, p), balances))
            .collect(),
    };
    tracing::debug!(
        function = %func.name,
        mode = func.parse.as_str(),
        issues = issues.len(),
        "validated parameters"
    );
    issues
}

fn parameter_issue(
    param: &FunctionParameter,
    value: Option<&Value>,
    balances: &Balances,
) -> Option<String> {
    if param.kind.is_intent() {
        return if param.mandatory {
            intent_issue(param, value, balances)
        } else {
            None
        };
    }
    (param.mandatory && is_empty_value(value)).then(|| format!("{} is required", param.name))
}

/// Present number and int values that are not numbers or fall outside
/// the declared `min`/`max`. Game functions have no bounded parameters.
pub fn describe_bounds(func: &FunctionDescriptor, values: &ParameterValueMap) -> Vec<String> {
    if func.parse == ParseMode::Game {
        return Vec::new();
    }
    func.parameters
        .iter()
        .filter_map(|p| {
            let value = param_value(values, p).filter(|v| !is_empty_value(Some(*v)))?;
            bounds_issue(p, value)
        })
        .collect()
}

/// A mandatory intent needs a positive amount covered by the balance of
/// its asset.
fn intent_issue(param: &FunctionParameter, value: Option<&Value>, balances: &Balances) -> Option<String> {
    let obj = value.and_then(Value::as_object);
    let amount = obj.and_then(|o| o.get("amount")).and_then(value_to_decimal);
    let Some(amount) = amount else {
        return Some(format!("{}: amount is required", param.name));
    };
    if amount <= Decimal::ZERO {
        return Some(format!("{}: amount must be greater than 0", param.name));
    }
    let asset = obj
        .and_then(|o| o.get("asset"))
        .and_then(Value::as_str)
        .filter(|a| !a.trim().is_empty())
        .map(Asset::parse_lenient)
        .unwrap_or(Asset::Hbd);
    let have = balances.available(asset);
    (amount > have).then(|| {
        format!(
            "{}: insufficient balance: need {} {} have {} {}",
            param.name,
            format_amount(amount),
            asset.symbol(),
            format_amount(have),
            asset.symbol()
        )
    })
}

/// Declared `min`/`max` of number and int parameters.
fn bounds_issue(param: &FunctionParameter, value: &Value) -> Option<String> {
    let (min, max) = param.kind.bounds()?;
    let Some(n) = value_to_decimal(value) else {
        return Some(format!("{} must be a number", param.name));
    };
    if matches!(param.kind, ParamKind::Int { .. }) && !n.fract().is_zero() {
        return Some(format!("{} must be a whole number", param.name));
    }
    if let Some(min) = min.filter(|min| n < *min) {
        return Some(format!("{} must be at least {}", param.name, min));
    }
    if let Some(max) = max.filter(|max| n > *max) {
        return Some(format!("{} must be at most {}", param.name, max));
    }
    None
}
