//! Derived values the form should fill in on its own.
//!
//! The caller owns the value map; [`propose_updates`] only returns a
//! patch of keys to shallow-merge into it.

use serde_json::{Map, Value};
use vscterm_model::{FunctionDescriptor, ParamKind, ParameterValueMap};

use crate::encode::param_value;

const ACCOUNT_PREFIX: &str = "hive:";

/// Keys whose value should change, with their new value. Empty when the
/// map is already complete.
///
/// - `meta-*` parameters get every `staticValue` of their meta options;
/// - `address` parameters holding a bare account name get a `hive:` prefix.
pub fn propose_updates(func: &FunctionDescriptor, values: &ParameterValueMap) -> ParameterValueMap {
    let mut patch = Map::new();
    for param in &func.parameters {
        let current = param_value(values, param);
        match &param.kind {
            ParamKind::Meta { options, .. } => {
                let mut meta = current
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                let mut changed = false;
                for option in options {
                    let Some(fixed) = &option.static_value else {
                        continue;
                    };
                    if meta.get(&option.key).and_then(Value::as_str) != Some(fixed.as_str()) {
                        meta.insert(option.key.clone(), Value::String(fixed.clone()));
                        changed = true;
                    }
                }
                if changed {
                    patch.insert(param.name.clone(), Value::Object(meta));
                }
            }
            ParamKind::Address => {
                if let Some(account) = current.and_then(Value::as_str) {
                    let account = account.trim();
                    if !account.is_empty() && !account.contains(':') {
                        patch.insert(
                            param.name.clone(),
                            Value::String(format!("{}{}", ACCOUNT_PREFIX, account.to_lowercase())),
                        );
                    }
                }
            }
            _ => {}
        }
    }
    if !patch.is_empty() {
        tracing::debug!(function = %func.name, keys = patch.len(), "proposed value updates");
    }
    patch
}
