//! Payout lists: `receiver:amount[:asset];...`
//!
//! Receivers carry a network prefix (`hive:alice`), so the receiver is the
//! first two `:`-separated segments, the amount the third and the asset
//! the optional fourth.

use serde::{Deserialize, Serialize};

use crate::amount::is_three_decimal_amount;
use crate::error::CodecError;

const ENTRY_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = ':';
pub const DEFAULT_ASSET: &str = "HIVE";
const ACCOUNT_PREFIX: &str = "hive:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub receiver: String,
    pub amount: String,
    pub asset: String,
}

impl Payout {
    /// Checked constructor used when adding or editing a payout.
    ///
    /// The receiver gets a `hive:` prefix when it has none, the amount must
    /// have exactly three decimals and an empty asset means HIVE.
    pub fn new(receiver: &str, amount: &str, asset: &str) -> Result<Self, CodecError> {
        let receiver = receiver.trim();
        if receiver.is_empty() || receiver == ACCOUNT_PREFIX {
            return Err(CodecError::EmptyReceiver);
        }
        let amount = amount.trim();
        if !is_three_decimal_amount(amount) {
            return Err(CodecError::InvalidAmount(amount.to_string()));
        }
        let asset = asset.trim();
        Ok(Payout {
            receiver: with_account_prefix(receiver),
            amount: amount.to_string(),
            asset: if asset.is_empty() {
                DEFAULT_ASSET.to_string()
            } else {
                asset.to_uppercase()
            },
        })
    }

    pub fn has_valid_amount(&self) -> bool {
        is_three_decimal_amount(&self.amount)
    }
}

fn with_account_prefix(receiver: &str) -> String {
    if receiver.contains(FIELD_SEPARATOR) {
        receiver.to_string()
    } else {
        format!("{}{}", ACCOUNT_PREFIX, receiver)
    }
}

pub fn parse(raw: &str) -> Vec<Payout> {
    raw.split(ENTRY_SEPARATOR)
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let segments: Vec<&str> = entry.split(FIELD_SEPARATOR).collect();
            let receiver = segments
                .iter()
                .take(2)
                .copied()
                .collect::<Vec<_>>()
                .join(":");
            Payout {
                receiver,
                amount: segments.get(2).map(|s| s.to_string()).unwrap_or_default(),
                asset: segments
                    .get(3)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| DEFAULT_ASSET.to_string()),
            }
        })
        .collect()
}

pub fn serialize(payouts: &[Payout]) -> String {
    payouts
        .iter()
        .map(|p| format!("{}:{}:{}", p.receiver, p.amount, p.asset))
        .collect::<Vec<_>>()
        .join(&ENTRY_SEPARATOR.to_string())
}
