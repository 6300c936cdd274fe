//! Assets and account balances.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Funds an intent or bet can draw from.
///
/// `hbd_savings` is also accepted under its legacy name `tbd_savings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    Hive,
    Hbd,
    HbdSavings,
}

impl Asset {
    /// Symbol as shown to users (`HIVE`, `HBD`, `HBD_SAVINGS`).
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Hive => "HIVE",
            Asset::Hbd => "HBD",
            Asset::HbdSavings => "HBD_SAVINGS",
        }
    }

    /// Token id used in intents (`hive`, `hbd`, `hbd_savings`).
    pub fn token(&self) -> &'static str {
        match self {
            Asset::Hive => "hive",
            Asset::Hbd => "hbd",
            Asset::HbdSavings => "hbd_savings",
        }
    }

    /// Parse a user or config supplied asset name; anything unrecognised
    /// is treated as HBD, which is where balance lookups fall back to.
    pub fn parse_lenient(s: &str) -> Asset {
        s.parse().unwrap_or(Asset::Hbd)
    }
}

impl FromStr for Asset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hive" => Ok(Asset::Hive),
            "hbd" => Ok(Asset::Hbd),
            "hbd_savings" | "tbd_savings" => Ok(Asset::HbdSavings),
            other => Err(format!("unknown asset '{}'", other)),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Spendable balances in human units (3 decimal places).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    #[serde(default)]
    pub hive: Decimal,
    #[serde(default)]
    pub hbd: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hbd_savings: Option<Decimal>,
}

impl Balances {
    /// Balance available for `asset`; unknown savings balance counts as zero.
    pub fn available(&self, asset: Asset) -> Decimal {
        match asset {
            Asset::Hive => self.hive,
            Asset::Hbd => self.hbd,
            Asset::HbdSavings => self.hbd_savings.unwrap_or(Decimal::ZERO),
        }
    }
}
