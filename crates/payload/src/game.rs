//! Game-mode calls.
//!
//! Game functions take no declared parameters; the form keeps its state
//! in `__game*` keys of the value map, and the action comes from
//! `__gameAction` instead of the function name. Payloads are `|`-joined
//! and always start with the game id (except `g_create`, which has none
//! yet).

use rust_decimal::Decimal;
use serde_json::Value;
use vscterm_codec::boolean::value_to_bool_lenient;
use vscterm_codec::format_amount;
use vscterm_model::values::{get_str, is_truthy, value_to_decimal, value_to_string};
use vscterm_model::{Asset, Balances, FunctionDescriptor, ParameterValueMap};

use crate::encode::DEFAULT_TOKEN;
use crate::intent::{EncodedPayload, SpendIntent};

pub const GAME_ACTION: &str = "__gameAction";
pub const GAME_ID: &str = "__gameId";
pub const GAME_CREATE_TYPE: &str = "__gameCreateType";
pub const GAME_CREATE_NAME: &str = "__gameCreateName";
pub const GAME_CREATE_BET: &str = "__gameCreateBet";
pub const GAME_FMP_ENABLED: &str = "__gameFmpEnabled";
pub const GAME_FMP_AMOUNT: &str = "__gameFirstMovePurchase";
pub const GAME_INTENT_AMOUNT: &str = "__gameIntentAmount";
pub const GAME_INTENT_ASSET: &str = "__gameIntentAsset";
pub const GAME_CELL: &str = "__gameCell";
pub const GAME_SWAP_OP: &str = "__gameSwapOp";
pub const GAME_SWAP_ARGS: &str = "__gameSwapArgs";

/// Sub-action of a game function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAction {
    Create,
    Join,
    Move,
    Swap,
    Resign,
    Timeout,
    Other(String),
}

impl GameAction {
    pub fn parse(s: &str) -> GameAction {
        match s {
            "g_create" => GameAction::Create,
            "g_join" => GameAction::Join,
            "g_move" => GameAction::Move,
            "g_swap" => GameAction::Swap,
            "g_resign" => GameAction::Resign,
            "g_timeout" => GameAction::Timeout,
            other => GameAction::Other(other.to_string()),
        }
    }

    pub fn from_values(values: &ParameterValueMap) -> Option<GameAction> {
        get_str(values, GAME_ACTION)
            .filter(|a| !a.is_empty())
            .map(GameAction::parse)
    }
}

/// Swap operations and how many arguments each takes.
enum SwapArity {
    AtLeastOne,
    ExactlyOne,
}

fn swap_arity(op: &str) -> Option<SwapArity> {
    match op {
        "place" | "add" => Some(SwapArity::AtLeastOne),
        "choose" | "color" => Some(SwapArity::ExactlyOne),
        _ => None,
    }
}

// ──────────────────────────────────────────────
// Form state accessors
// ──────────────────────────────────────────────

fn text(values: &ParameterValueMap, key: &str) -> String {
    values.get(key).map(value_to_string).unwrap_or_default()
}

fn amount(values: &ParameterValueMap, key: &str) -> Option<Decimal> {
    values.get(key).and_then(value_to_decimal)
}

fn fmp_enabled(values: &ParameterValueMap) -> bool {
    values
        .get(GAME_FMP_ENABLED)
        .and_then(value_to_bool_lenient)
        .unwrap_or(false)
}

/// First-move-purchase amount, when enabled.
fn fmp_amount(values: &ParameterValueMap) -> Option<Decimal> {
    if fmp_enabled(values) {
        amount(values, GAME_FMP_AMOUNT)
    } else {
        None
    }
}

/// `(amount, asset)` of the bet placed when creating a game.
fn create_bet(values: &ParameterValueMap) -> (Option<Decimal>, Option<String>) {
    let Some(bet) = values.get(GAME_CREATE_BET).and_then(Value::as_object) else {
        return (None, None);
    };
    let amount = bet.get("amount").and_then(value_to_decimal);
    let asset = bet
        .get("asset")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string);
    (amount, asset)
}

/// Non-empty swap arguments; accepts a single string or an array.
pub fn swap_args(values: &ParameterValueMap) -> Vec<String> {
    match values.get(GAME_SWAP_ARGS) {
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn token(asset: Option<&str>) -> &str {
    asset
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(DEFAULT_TOKEN)
}

// ──────────────────────────────────────────────
// Encoding
// ──────────────────────────────────────────────

pub fn encode_game(func: &FunctionDescriptor, values: &ParameterValueMap) -> EncodedPayload {
    let action = get_str(values, GAME_ACTION)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| func.name.clone());
    let mut payload = text(values, GAME_ID);
    let mut intents = Vec::new();

    match GameAction::parse(&action) {
        GameAction::Create => {
            payload = format!(
                "{}|{}|",
                text(values, GAME_CREATE_TYPE),
                text(values, GAME_CREATE_NAME)
            );
            if let Some(fmp) = fmp_amount(values) {
                payload.push_str(&format_amount(fmp));
            }
            if let (Some(bet), asset) = create_bet(values) {
                if bet > Decimal::ZERO {
                    intents.push(SpendIntent::transfer_allow(token(asset.as_deref()), bet));
                }
            }
        }
        GameAction::Join => {
            if let Some(join) = amount(values, GAME_INTENT_AMOUNT) {
                let limit = join + fmp_amount(values).unwrap_or_default();
                let asset = get_str(values, GAME_INTENT_ASSET);
                intents.push(SpendIntent::transfer_allow(token(asset), limit));
            }
        }
        GameAction::Move => {
            payload.push('|');
            payload.push_str(&text(values, GAME_CELL).replace(',', "|"));
        }
        GameAction::Swap => {
            payload.push('|');
            payload.push_str(&text(values, GAME_SWAP_OP));
            for arg in swap_args(values) {
                payload.push('|');
                payload.push_str(&arg);
            }
        }
        GameAction::Resign | GameAction::Timeout | GameAction::Other(_) => {}
    }

    EncodedPayload {
        payload,
        intents,
        action,
    }
}

// ──────────────────────────────────────────────
// Validation
// ──────────────────────────────────────────────

fn check_balance(issues: &mut Vec<String>, need: Decimal, asset: &str, balances: &Balances) {
    let asset = Asset::parse_lenient(asset);
    let have = balances.available(asset);
    if need > have {
        issues.push(format!(
            "insufficient balance: need {} {} have {} {}",
            format_amount(need),
            asset.symbol(),
            format_amount(have),
            asset.symbol()
        ));
    }
}

/// Problems preventing submission of a game call; empty when valid.
pub fn describe_game_issues(values: &ParameterValueMap, balances: &Balances) -> Vec<String> {
    let mut issues = Vec::new();
    let Some(action) = GameAction::from_values(values) else {
        issues.push("game action is required".to_string());
        return issues;
    };

    if action != GameAction::Create && !is_truthy(values.get(GAME_ID)) {
        issues.push("game id is required".to_string());
    }

    match action {
        GameAction::Create => {
            if text(values, GAME_CREATE_TYPE).is_empty() {
                issues.push("game type is required".to_string());
            }
            if fmp_enabled(values) {
                match amount(values, GAME_FMP_AMOUNT) {
                    Some(fmp) if fmp >= Decimal::ZERO => {}
                    _ => issues.push("first move purchase must be a number of at least 0".to_string()),
                }
            }
            if let (Some(bet), asset) = create_bet(values) {
                if bet > Decimal::ZERO {
                    match asset {
                        Some(asset) => check_balance(&mut issues, bet, &asset, balances),
                        None => issues.push("bet asset is required".to_string()),
                    }
                }
            }
        }
        GameAction::Join => {
            let join = amount(values, GAME_INTENT_AMOUNT).unwrap_or_default();
            let total = (join + fmp_amount(values).unwrap_or_default()).max(Decimal::ZERO);
            if total > Decimal::ZERO {
                match get_str(values, GAME_INTENT_ASSET).filter(|a| !a.trim().is_empty()) {
                    Some(asset) => check_balance(&mut issues, total, asset, balances),
                    None => issues.push("join asset is required".to_string()),
                }
            }
        }
        GameAction::Move => {
            if get_str(values, GAME_CELL).map_or(true, str::is_empty) {
                issues.push("cell is required".to_string());
            }
        }
        GameAction::Swap => {
            let op = text(values, GAME_SWAP_OP);
            let args = swap_args(values);
            if op.is_empty() {
                issues.push("swap operation is required".to_string());
            } else {
                match swap_arity(&op) {
                    Some(SwapArity::AtLeastOne) if args.is_empty() => {
                        issues.push(format!("swap '{}' needs at least one argument", op))
                    }
                    Some(SwapArity::ExactlyOne) if args.len() != 1 => {
                        issues.push(format!("swap '{}' needs exactly one argument", op))
                    }
                    Some(_) => {}
                    None => issues.push(format!("unknown swap operation '{}'", op)),
                }
            }
        }
        GameAction::Resign | GameAction::Timeout => {}
        GameAction::Other(name) => issues.push(format!("unknown game action '{}'", name)),
    }
    issues
}
