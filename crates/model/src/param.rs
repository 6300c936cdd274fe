//! Declared parameters of a contract function.
//!
//! The configuration format is a loose record (`name`, `type`,
//! `payloadName`, `metaOptions`, `boolTrue`, ...). On load every record
//! is converted into a [`FunctionParameter`] whose [`ParamKind`] carries
//! only the fields its `type` tag actually uses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Meta options
// ──────────────────────────────────────────────

/// Value kind of one allowed key in a `meta-*` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MetaValueKind {
    Bool,
    Account,
    Int,
    Float,
    #[default]
    String,
}

impl From<String> for MetaValueKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "bool" | "boolean" => MetaValueKind::Bool,
            "account" | "address" => MetaValueKind::Account,
            "int" | "integer" => MetaValueKind::Int,
            "float" | "number" => MetaValueKind::Float,
            _ => MetaValueKind::String,
        }
    }
}

impl From<MetaValueKind> for String {
    fn from(kind: MetaValueKind) -> Self {
        match kind {
            MetaValueKind::Bool => "bool",
            MetaValueKind::Account => "account",
            MetaValueKind::Int => "int",
            MetaValueKind::Float => "float",
            MetaValueKind::String => "string",
        }
        .to_string()
    }
}

/// One key a `meta-*` parameter accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaOption {
    pub key: String,
    #[serde(rename = "type", default)]
    pub kind: MetaValueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Fixed value the terminal fills in for this key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_value: Option<String>,
}

// ──────────────────────────────────────────────
// Parameter kinds
// ──────────────────────────────────────────────

/// Type of a declared parameter, with the fields only that type uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number {
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
    Int {
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
    /// Labels emitted for true/false in csv payloads.
    Bool {
        true_label: Option<String>,
        false_label: Option<String>,
    },
    Address,
    Url,
    /// A spending authorization (`vscIntent`); never part of the payload body.
    Intent,
    /// Inter-contract call string.
    Icc,
    LotteryMeta,
    /// `meta-<suffix>` key/value parameter.
    Meta {
        suffix: String,
        options: Vec<MetaOption>,
        as_array: Option<bool>,
    },
    /// Free text; keeps an unrecognised tag so it can be written back.
    Text { tag: Option<String> },
}

impl ParamKind {
    fn from_tag(raw: &RawParameter) -> ParamKind {
        let Some(tag) = raw.param_type.as_deref() else {
            return ParamKind::Text { tag: None };
        };
        match tag {
            "string" => ParamKind::String,
            "number" => ParamKind::Number {
                min: raw.min,
                max: raw.max,
            },
            "int" => ParamKind::Int {
                min: raw.min,
                max: raw.max,
            },
            "bool" => ParamKind::Bool {
                true_label: raw.bool_true.clone(),
                false_label: raw.bool_false.clone(),
            },
            "address" => ParamKind::Address,
            "url" => ParamKind::Url,
            "vscIntent" => ParamKind::Intent,
            "icc" => ParamKind::Icc,
            "lottery_meta" => ParamKind::LotteryMeta,
            t if t.starts_with("meta-") => ParamKind::Meta {
                suffix: t["meta-".len()..].to_string(),
                options: raw.meta_options.clone(),
                as_array: raw.meta_as_array,
            },
            other => ParamKind::Text {
                tag: Some(other.to_string()),
            },
        }
    }

    /// The configuration `type` tag this kind was read from.
    pub fn tag(&self) -> Option<String> {
        let tag = match self {
            ParamKind::String => "string",
            ParamKind::Number { .. } => "number",
            ParamKind::Int { .. } => "int",
            ParamKind::Bool { .. } => "bool",
            ParamKind::Address => "address",
            ParamKind::Url => "url",
            ParamKind::Intent => "vscIntent",
            ParamKind::Icc => "icc",
            ParamKind::LotteryMeta => "lottery_meta",
            ParamKind::Meta { suffix, .. } => return Some(format!("meta-{}", suffix)),
            ParamKind::Text { tag } => return tag.clone(),
        };
        Some(tag.to_string())
    }

    pub fn is_intent(&self) -> bool {
        matches!(self, ParamKind::Intent)
    }

    pub fn is_meta(&self) -> bool {
        matches!(self, ParamKind::Meta { .. })
    }

    /// Declared numeric bounds, if this is a `number` or `int` parameter.
    pub fn bounds(&self) -> Option<(Option<Decimal>, Option<Decimal>)> {
        match self {
            ParamKind::Number { min, max } | ParamKind::Int { min, max } => Some((*min, *max)),
            _ => None,
        }
    }
}

// ──────────────────────────────────────────────
// FunctionParameter
// ──────────────────────────────────────────────

/// One declared input of a contract action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawParameter", into = "RawParameter")]
pub struct FunctionParameter {
    /// Display key; unique within its function.
    pub name: String,
    /// Wire key override; `None` when the config leaves it unset or empty.
    pub payload_name: Option<String>,
    pub mandatory: bool,
    /// Always emit the value as a string in json payloads.
    pub as_string: bool,
    pub sort_index: Option<i64>,
    pub kind: ParamKind,
}

impl FunctionParameter {
    /// Build a parameter of the given kind with no optional attributes set.
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        FunctionParameter {
            name: name.into(),
            payload_name: None,
            mandatory: false,
            as_string: false,
            sort_index: None,
            kind,
        }
    }

    /// Key used in the payload: `payloadName`, else `name`.
    pub fn wire_key(&self) -> &str {
        self.payload_name.as_deref().unwrap_or(&self.name)
    }
}

/// Loose on-disk form of a parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParameter {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload_name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    param_type: Option<String>,
    #[serde(default)]
    mandatory: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    as_string: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    meta_options: Vec<MetaOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta_as_array: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bool_true: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bool_false: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sort_index: Option<i64>,
}

impl From<RawParameter> for FunctionParameter {
    fn from(raw: RawParameter) -> Self {
        let kind = ParamKind::from_tag(&raw);
        FunctionParameter {
            payload_name: raw.payload_name.filter(|p| !p.is_empty()),
            name: raw.name,
            mandatory: raw.mandatory,
            as_string: raw.as_string,
            sort_index: raw.sort_index,
            kind,
        }
    }
}

impl From<FunctionParameter> for RawParameter {
    fn from(param: FunctionParameter) -> Self {
        let mut raw = RawParameter {
            param_type: param.kind.tag(),
            name: param.name,
            payload_name: param.payload_name,
            mandatory: param.mandatory,
            as_string: param.as_string,
            sort_index: param.sort_index,
            ..RawParameter::default()
        };
        match param.kind {
            ParamKind::Number { min, max } | ParamKind::Int { min, max } => {
                raw.min = min;
                raw.max = max;
            }
            ParamKind::Bool {
                true_label,
                false_label,
            } => {
                raw.bool_true = true_label;
                raw.bool_false = false_label;
            }
            ParamKind::Meta {
                options, as_array, ..
            } => {
                raw.meta_options = options;
                raw.meta_as_array = as_array;
            }
            _ => {}
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn param(v: serde_json::Value) -> FunctionParameter {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn unset_type_is_free_text() {
        let p = param(json!({ "name": "Memo" }));
        assert_eq!(p.kind, ParamKind::Text { tag: None });
        assert_eq!(p.wire_key(), "Memo");
    }

    #[test]
    fn empty_payload_name_falls_back_to_name() {
        let p = param(json!({ "name": "Title", "payloadName": "", "type": "string" }));
        assert_eq!(p.payload_name, None);
        assert_eq!(p.wire_key(), "Title");
    }

    #[test]
    fn meta_type_keeps_suffix_and_options() {
        let p = param(json!({
            "name": "Meta",
            "type": "meta-project",
            "metaAsArray": true,
            "metaOptions": [
                { "key": "quorum", "type": "int", "hint": "percent" },
                { "key": "owner", "type": "account", "staticValue": "hive:dao" }
            ]
        }));
        match &p.kind {
            ParamKind::Meta {
                suffix,
                options,
                as_array,
            } => {
                assert_eq!(suffix, "project");
                assert_eq!(options.len(), 2);
                assert_eq!(options[0].kind, MetaValueKind::Int);
                assert_eq!(options[1].static_value.as_deref(), Some("hive:dao"));
                assert_eq!(*as_array, Some(true));
            }
            other => panic!("expected meta kind, got {:?}", other),
        }
    }

    #[test]
    fn number_bounds_are_read() {
        let p = param(json!({ "name": "Stake", "type": "number", "min": 1, "max": "10.5" }));
        let (min, max) = p.kind.bounds().unwrap();
        assert_eq!(min, Some(Decimal::from(1)));
        assert_eq!(max, Some(Decimal::new(105, 1)));
    }

    #[test]
    fn unknown_tag_survives_write_back() {
        let p = param(json!({ "name": "Color", "type": "colour", "mandatory": true }));
        let out = serde_json::to_value(&p).unwrap();
        assert_eq!(out["type"], "colour");
        assert_eq!(out["mandatory"], true);
    }

    #[test]
    fn bool_labels_round_trip() {
        let p = param(json!({
            "name": "Open", "type": "bool", "boolTrue": "yes", "boolFalse": "no"
        }));
        let out = serde_json::to_value(&p).unwrap();
        assert_eq!(out["boolTrue"], "yes");
        assert_eq!(out["boolFalse"], "no");
        assert_eq!(param(out), p);
    }
}
