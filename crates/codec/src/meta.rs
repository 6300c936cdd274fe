//! Meta update lists: `update_key=value;update_key=value`.
//!
//! Keys are stored with an `update_` prefix on the wire and shown
//! without it. Values are normalized according to the kind the
//! parameter's [`MetaOption`] declares for the key.

use serde::{Deserialize, Serialize};
use vscterm_model::values::parse_decimal;
use vscterm_model::{MetaOption, MetaValueKind};

use crate::boolean::parse_bool_lenient;
use crate::error::CodecError;

const ENTRY_SEPARATOR: char = ';';
const KEY_VALUE_SEPARATOR: char = '=';
pub const KEY_PREFIX: &str = "update_";
const ACCOUNT_PREFIX: &str = "hive:";

/// One key/value pair, keyed by its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaEntry {
    pub key: String,
    pub value: String,
}

pub fn parse(raw: &str) -> Vec<MetaEntry> {
    raw.split(ENTRY_SEPARATOR)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (key, value) = entry.split_once(KEY_VALUE_SEPARATOR).unwrap_or((entry, ""));
            MetaEntry {
                key: key.strip_prefix(KEY_PREFIX).unwrap_or(key).to_string(),
                value: value.to_string(),
            }
        })
        .collect()
}

pub fn serialize(entries: &[MetaEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{}{}{}{}", KEY_PREFIX, e.key, KEY_VALUE_SEPARATOR, e.value))
        .collect::<Vec<_>>()
        .join(&ENTRY_SEPARATOR.to_string())
}

/// Normalize a value for a key of the given kind.
///
/// - `bool`: any permissive boolean word becomes `true`/`false`
/// - `account`: gains a `hive:` prefix when missing
/// - `int`: an integer string
/// - `float`: a plain numeric string
/// - `string`: unchanged
pub fn normalize_value(key: &str, kind: MetaValueKind, value: &str) -> Result<String, CodecError> {
    let invalid = |expected: &'static str| CodecError::InvalidMetaValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    };
    let trimmed = value.trim();
    match kind {
        MetaValueKind::Bool => parse_bool_lenient(trimmed)
            .map(|b| b.to_string())
            .ok_or_else(|| invalid("a boolean")),
        MetaValueKind::Account => {
            let account = trimmed.strip_prefix(ACCOUNT_PREFIX).unwrap_or(trimmed);
            if account.is_empty() {
                return Err(invalid("an account name"));
            }
            Ok(format!("{}{}", ACCOUNT_PREFIX, account.to_lowercase()))
        }
        MetaValueKind::Int => match parse_decimal(trimmed) {
            Some(d) if d.fract().is_zero() => Ok(d.trunc().normalize().to_string()),
            _ => Err(invalid("an integer")),
        },
        MetaValueKind::Float => parse_decimal(trimmed)
            .map(|d| d.normalize().to_string())
            .ok_or_else(|| invalid("a number")),
        MetaValueKind::String => Ok(value.to_string()),
    }
}

/// Build a checked entry for a parameter with the given meta options.
///
/// Keys with a static value always take that value. When `options` is
/// empty any key is accepted as a string.
pub fn checked_entry(options: &[MetaOption], key: &str, value: &str) -> Result<MetaEntry, CodecError> {
    let key = key.trim();
    let key = key.strip_prefix(KEY_PREFIX).unwrap_or(key);
    if options.is_empty() {
        return Ok(MetaEntry {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    let option = options
        .iter()
        .find(|o| o.key == key)
        .ok_or_else(|| CodecError::UnknownMetaKey(key.to_string()))?;
    let value = match &option.static_value {
        Some(fixed) => fixed.clone(),
        None => normalize_value(key, option.kind, value)?,
    };
    Ok(MetaEntry {
        key: key.to_string(),
        value,
    })
}

/// Insert or replace the entry with the same key, keeping list order.
pub fn upsert(entries: &mut Vec<MetaEntry>, entry: MetaEntry) {
    match entries.iter_mut().find(|e| e.key == entry.key) {
        Some(existing) => existing.value = entry.value,
        None => entries.push(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(key: &str, kind: MetaValueKind) -> MetaOption {
        MetaOption {
            key: key.to_string(),
            kind,
            hint: None,
            static_value: None,
        }
    }

    #[test]
    fn strips_prefix_on_read() {
        let entries = parse("update_quorum=50;update_owner=hive:dao;name=x=y");
        assert_eq!(entries[0].key, "quorum");
        assert_eq!(entries[0].value, "50");
        assert_eq!(entries[1].value, "hive:dao");
        // only the first '=' splits
        assert_eq!(entries[2].key, "name");
        assert_eq!(entries[2].value, "x=y");
    }

    #[test]
    fn key_without_value() {
        let entries = parse("update_flag");
        assert_eq!(entries[0].key, "flag");
        assert_eq!(entries[0].value, "");
    }

    #[test]
    fn round_trip() {
        let raw = "update_quorum=50;update_owner=hive:dao";
        assert_eq!(serialize(&parse(raw)), raw);
    }

    #[test]
    fn normalizes_by_kind() {
        assert_eq!(normalize_value("k", MetaValueKind::Bool, "Yes").unwrap(), "true");
        assert_eq!(normalize_value("k", MetaValueKind::Bool, "off").unwrap(), "false");
        assert_eq!(
            normalize_value("k", MetaValueKind::Account, "Alice").unwrap(),
            "hive:alice"
        );
        assert_eq!(
            normalize_value("k", MetaValueKind::Account, "hive:bob").unwrap(),
            "hive:bob"
        );
        assert_eq!(normalize_value("k", MetaValueKind::Int, "42").unwrap(), "42");
        assert_eq!(normalize_value("k", MetaValueKind::Int, "42.0").unwrap(), "42");
        assert_eq!(normalize_value("k", MetaValueKind::Float, "1.50").unwrap(), "1.5");
        assert_eq!(normalize_value("k", MetaValueKind::String, " x ").unwrap(), " x ");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(normalize_value("k", MetaValueKind::Bool, "maybe").is_err());
        assert!(normalize_value("k", MetaValueKind::Int, "4.5").is_err());
        assert!(normalize_value("k", MetaValueKind::Float, "abc").is_err());
        assert!(normalize_value("k", MetaValueKind::Account, "hive:").is_err());
    }

    #[test]
    fn checked_entries_follow_options() {
        let mut options = vec![option("quorum", MetaValueKind::Int)];
        options.push(MetaOption {
            static_value: Some("mainnet".into()),
            ..option("network", MetaValueKind::String)
        });

        let e = checked_entry(&options, "update_quorum", "10").unwrap();
        assert_eq!(e.key, "quorum");
        let e = checked_entry(&options, "network", "testnet").unwrap();
        assert_eq!(e.value, "mainnet");
        assert_eq!(
            checked_entry(&options, "color", "red"),
            Err(CodecError::UnknownMetaKey("color".into()))
        );
        assert!(checked_entry(&[], "anything", "goes").is_ok());
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut entries = parse("update_a=1;update_b=2");
        upsert(
            &mut entries,
            MetaEntry {
                key: "a".into(),
                value: "3".into(),
            },
        );
        upsert(
            &mut entries,
            MetaEntry {
                key: "c".into(),
                value: "4".into(),
            },
        );
        assert_eq!(serialize(&entries), "update_a=3;update_b=2;update_c=4");
    }
}
