//! Fixed three-decimal amount formatting.
//!
//! Chain amounts (intent limits, bets, payouts) are written with exactly
//! three decimal places. Rounding is half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of every on-chain amount.
pub const AMOUNT_DECIMALS: u32 = 3;

/// Format `amount` with exactly three decimals (`1` -> `"1.000"`).
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(AMOUNT_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(AMOUNT_DECIMALS);
    rounded.to_string()
}

/// Whether `s` is written as digits, a dot and exactly three decimals.
pub fn is_three_decimal_amount(s: &str) -> bool {
    let Some((int_part, frac_part)) = s.split_once('.') else {
        return false;
    };
    !int_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.len() == 3
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}
