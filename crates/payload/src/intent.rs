//! Spending intents and the encoder's output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vscterm_codec::format_amount;

/// Intent type authorizing a contract to pull funds.
pub const TRANSFER_ALLOW: &str = "transfer.allow";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentArgs {
    /// Lower-case token id (`hive`, `hbd`, ...).
    pub token: String,
    /// Maximum amount, three decimals.
    pub limit: String,
}

/// Authorization for the contract to pull up to `limit` of `token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendIntent {
    #[serde(rename = "type")]
    pub kind: String,
    pub args: IntentArgs,
}

impl SpendIntent {
    pub fn transfer_allow(token: &str, limit: Decimal) -> Self {
        SpendIntent {
            kind: TRANSFER_ALLOW.to_string(),
            args: IntentArgs {
                token: token.trim().to_lowercase(),
                limit: format_amount(limit),
            },
        }
    }
}

/// Result of encoding one function call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodedPayload {
    /// Wire-format payload string.
    pub payload: String,
    pub intents: Vec<SpendIntent>,
    /// Action name sent on chain.
    pub action: String,
}
