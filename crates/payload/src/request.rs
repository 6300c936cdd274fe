//! The request handed to the external signer for broadcast.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vscterm_model::values::value_to_decimal;
use vscterm_model::{ContractDescriptor, FunctionDescriptor, ParameterValueMap};

use crate::encode::encode;
use crate::intent::SpendIntent;

/// Value-map key holding a per-call resource credit limit.
pub const RC_LIMIT_KEY: &str = "rcLimit";
pub const DEFAULT_RC_LIMIT: u64 = 1000;

/// Account key the signer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    #[default]
    Active,
    Posting,
}

/// Terminal-wide defaults applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSettings {
    pub default_rc_limit: u64,
    pub key_type: KeyType,
}

impl Default for RequestSettings {
    fn default() -> Self {
        RequestSettings {
            default_rc_limit: DEFAULT_RC_LIMIT,
            key_type: KeyType::Active,
        }
    }
}

/// Everything the signer needs: `broadcast(contract_id, action, payload,
/// rc_limit, intents, key_type)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastRequest {
    pub contract_id: String,
    pub action: String,
    pub payload: String,
    pub rc_limit: u64,
    pub intents: Vec<SpendIntent>,
    pub key_type: KeyType,
}

/// Resource credit limit from the value map; a missing, non-numeric or
/// non-positive entry means the configured default.
pub fn resolve_rc_limit(values: &ParameterValueMap, default: u64) -> u64 {
    values
        .get(RC_LIMIT_KEY)
        .and_then(value_to_decimal)
        .filter(|d| *d > Decimal::ZERO)
        .and_then(|d| d.trunc().to_u64())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// Encode the call and wrap it for the signer.
pub fn build_request(
    contract: &ContractDescriptor,
    func: &FunctionDescriptor,
    values: &ParameterValueMap,
    settings: &RequestSettings,
) -> BroadcastRequest {
    let encoded = encode(func, values);
    BroadcastRequest {
        contract_id: contract.id.clone(),
        action: encoded.action,
        payload: encoded.payload,
        rc_limit: resolve_rc_limit(values, settings.default_rc_limit),
        intents: encoded.intents,
        key_type: settings.key_type,
    }
}
