//! Loading the documents a command works on.

use std::path::Path;

use serde_json::Value;
use vscterm_model::{Balances, ContractsConfig, ParameterValueMap};

use crate::config::TerminalConfig;
use crate::ValueArgs;

pub(crate) fn load_contracts(path: &Path) -> Result<ContractsConfig, String> {
    ContractsConfig::load(path).map_err(|e| e.to_string())
}

fn read_json(path: &Path) -> Result<Value, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("error reading file '{}': {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("error parsing JSON in '{}': {}", path.display(), e))
}

/// Split `KEY=VALUE`; the value is taken as JSON when it parses and as a
/// plain string otherwise.
pub(crate) fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid --set '{}': expected KEY=VALUE", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid --set '{}': empty key", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// The value map from `--values`, with every `--set` applied on top.
pub(crate) fn load_values(args: &ValueArgs) -> Result<ParameterValueMap, String> {
    let mut values = match &args.values {
        Some(path) => match read_json(path)? {
            Value::Object(map) => map,
            _ => {
                return Err(format!(
                    "values file '{}' must contain a JSON object",
                    path.display()
                ))
            }
        },
        None => ParameterValueMap::new(),
    };
    for raw in &args.set {
        let (key, value) = parse_assignment(raw)?;
        values.insert(key, value);
    }
    Ok(values)
}

/// Balances from `--balances`, else the settings file, else all zero.
pub(crate) fn load_balances(args: &ValueArgs, settings: &TerminalConfig) -> Result<Balances, String> {
    match &args.balances {
        Some(path) => serde_json::from_value(read_json(path)?)
            .map_err(|e| format!("invalid balances in '{}': {}", path.display(), e)),
        None => Ok(settings.balances.clone().unwrap_or_default()),
    }
}
