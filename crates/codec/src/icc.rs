//! Inter-contract calls: `contract|action|payload[|asset=amount,...]`.
//!
//! The payload may itself contain `|`. The last segment is read as the
//! amounts list only when there are at least four segments and it looks
//! like `asset=amount(,asset=amount)*`; otherwise it belongs to the
//! payload. A payload whose own tail has that shape is therefore read
//! as amounts.

use serde::{Deserialize, Serialize};

const SEPARATOR: char = '|';

/// An asset allowance forwarded with the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IccAmount {
    pub asset: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IccCall {
    pub contract: String,
    pub action: String,
    pub payload: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amounts: Vec<IccAmount>,
}

fn is_asset_name(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn is_plain_amount(s: &str) -> bool {
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    !int_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && (!s.contains('.') || !frac_part.is_empty())
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}

/// Read `asset=amount(,asset=amount)*`; `None` if the segment has any
/// other shape.
fn parse_amounts(segment: &str) -> Option<Vec<IccAmount>> {
    segment
        .split(',')
        .map(|pair| {
            let (asset, amount) = pair.split_once('=')?;
            (is_asset_name(asset) && is_plain_amount(amount)).then(|| IccAmount {
                asset: asset.to_string(),
                amount: amount.to_string(),
            })
        })
        .collect()
}

pub fn parse(raw: &str) -> IccCall {
    let segments: Vec<&str> = raw.split(SEPARATOR).collect();
    let contract = segments.first().copied().unwrap_or_default().to_string();
    let action = segments.get(1).copied().unwrap_or_default().to_string();

    if segments.len() >= 4 {
        if let Some(amounts) = segments.last().and_then(|last| parse_amounts(last)) {
            return IccCall {
                contract,
                action,
                payload: segments[2..segments.len() - 1].join("|"),
                amounts,
            };
        }
    }
    IccCall {
        contract,
        action,
        payload: segments.get(2..).map(|s| s.join("|")).unwrap_or_default(),
        amounts: Vec::new(),
    }
}

pub fn serialize(call: &IccCall) -> String {
    let mut out = format!("{}|{}|{}", call.contract, call.action, call.payload);
    if !call.amounts.is_empty() {
        let amounts: Vec<String> = call
            .amounts
            .iter()
            .map(|a| format!("{}={}", a.asset, a.amount))
            .collect();
        out.push(SEPARATOR);
        out.push_str(&amounts.join(","));
    }
    out
}
