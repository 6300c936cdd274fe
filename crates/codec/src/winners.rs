//! Winner share tables for lotteries and prize splits.
//!
//! Two grammars exist:
//!
//! - simple: positive integer percentages joined by `,` (`;` accepted on
//!   read), kept in descending order;
//! - asset groups: one `;`-separated group per winner, each listing the
//!   winner's share of every asset as `amount#asset[#fixed]`, wrapped in
//!   parentheses when there is more than one asset:
//!   `(50#hive,60#hbd#fixed);(50#hive,40#hbd#fixed)`.
//!
//! Shares without `#fixed` are percentages; per asset they must add up
//! to 100 across all winners.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vscterm_model::values::parse_decimal;

const GROUP_SEPARATOR: char = ';';
const ENTRY_SEPARATOR: char = ',';
const FIELD_SEPARATOR: char = '#';
const FIXED_MARKER: &str = "fixed";
/// Written for a winner with no share of an asset.
const EMPTY_PLACEHOLDER: &str = "0";

// ──────────────────────────────────────────────
// Simple shares
// ──────────────────────────────────────────────

/// Parse `50,30,20` (or `;`-separated) into positive shares, largest first.
/// Each entry contributes its leading integer, so `50.5` reads as 50.
pub fn parse_simple(raw: &str) -> Vec<u32> {
    let mut shares: Vec<u32> = raw
        .split([';', ','])
        .filter_map(leading_int)
        .filter(|n| *n > 0)
        .collect();
    shares.sort_unstable_by(|a, b| b.cmp(a));
    shares
}

/// Optional sign then the leading digit run. Negative values yield `None`.
fn leading_int(s: &str) -> Option<u32> {
    let s = s.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let n: u32 = rest[..end].parse().ok()?;
    (!negative).then_some(n)
}

pub fn serialize_simple(shares: &[u32]) -> String {
    let mut sorted = shares.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

// ──────────────────────────────────────────────
// Asset groups
// ──────────────────────────────────────────────

/// Shares of one asset across all winners; `amounts[i]` belongs to
/// winner `i`, empty when that winner gets none of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetShares {
    pub asset: String,
    pub amounts: Vec<String>,
    /// Amounts are fixed quantities rather than percentages.
    #[serde(default)]
    pub fixed: bool,
}

impl AssetShares {
    pub fn percentage(asset: &str, amounts: &[&str]) -> Self {
        AssetShares {
            asset: asset.to_string(),
            amounts: amounts.iter().map(|a| a.to_string()).collect(),
            fixed: false,
        }
    }

    fn amount_values(&self) -> Option<Vec<Decimal>> {
        self.amounts
            .iter()
            .map(|a| {
                if a.trim().is_empty() {
                    Some(Decimal::ZERO)
                } else {
                    parse_decimal(a)
                }
            })
            .collect()
    }

    /// Percentage groups must sum to 100 (within 0.1); fixed groups need
    /// non-negative amounts with at least one above zero.
    pub fn is_valid(&self) -> bool {
        let Some(values) = self.amount_values() else {
            return false;
        };
        if values.iter().any(|v| v.is_sign_negative() && !v.is_zero()) {
            return false;
        }
        let total: Decimal = values.iter().sum();
        if self.fixed {
            total > Decimal::ZERO
        } else {
            (total - Decimal::ONE_HUNDRED).abs() <= Decimal::new(1, 1)
        }
    }
}

/// Parsed asset-group table, one [`AssetShares`] per asset in order of
/// first appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShareTable {
    pub assets: Vec<AssetShares>,
}

impl ShareTable {
    pub fn winner_count(&self) -> usize {
        self.assets.iter().map(|a| a.amounts.len()).max().unwrap_or(0)
    }

    /// A usable table has at least one asset and every asset is valid.
    pub fn is_valid(&self) -> bool {
        !self.assets.is_empty() && self.assets.iter().all(AssetShares::is_valid)
    }
}

pub fn parse_groups(raw: &str) -> ShareTable {
    let mut table = ShareTable::default();
    let winners = raw
        .split(GROUP_SEPARATOR)
        .map(str::trim)
        .filter(|g| !g.is_empty());
    for (winner, group) in winners.enumerate() {
        let inner = group
            .strip_prefix('(')
            .and_then(|g| g.strip_suffix(')'))
            .unwrap_or(group);
        for entry in inner.split(ENTRY_SEPARATOR).map(str::trim) {
            let mut fields = entry.split(FIELD_SEPARATOR);
            let amount = fields.next().unwrap_or_default().trim();
            let Some(asset) = fields.next().map(str::trim).filter(|a| !a.is_empty()) else {
                continue;
            };
            let fixed = fields.any(|f| f.trim() == FIXED_MARKER);

            let idx = match table.assets.iter().position(|a| a.asset == asset) {
                Some(idx) => idx,
                None => {
                    table.assets.push(AssetShares {
                        asset: asset.to_string(),
                        amounts: Vec::new(),
                        fixed,
                    });
                    table.assets.len() - 1
                }
            };
            let shares = &mut table.assets[idx];
            shares.fixed |= fixed;
            if shares.amounts.len() <= winner {
                shares.amounts.resize(winner + 1, String::new());
            }
            shares.amounts[winner] = amount.to_string();
        }
    }
    let winners = table.winner_count();
    for shares in &mut table.assets {
        shares.amounts.resize(winners, String::new());
    }
    table
}

pub fn serialize_groups(table: &ShareTable) -> String {
    let multi_asset = table.assets.len() > 1;
    (0..table.winner_count())
        .map(|winner| {
            let entries: Vec<String> = table
                .assets
                .iter()
                .map(|shares| {
                    let amount = shares
                        .amounts
                        .get(winner)
                        .map(|a| a.trim())
                        .filter(|a| !a.is_empty())
                        .unwrap_or(EMPTY_PLACEHOLDER);
                    if shares.fixed {
                        format!("{}#{}#{}", amount, shares.asset, FIXED_MARKER)
                    } else {
                        format!("{}#{}", amount, shares.asset)
                    }
                })
                .collect();
            if multi_asset {
                format!("({})", entries.join(","))
            } else {
                entries.join(",")
            }
        })
        .collect::<Vec<_>>()
        .join(&GROUP_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_shares_sorted_descending() {
        assert_eq!(parse_simple("20,50;30"), vec![50, 30, 20]);
        assert_eq!(parse_simple("0, x, 10, -5"), vec![10]);
        assert_eq!(serialize_simple(&[10, 60, 30]), "60,30,10");
        assert_eq!(parse_simple(&serialize_simple(&[10, 60, 30])), vec![60, 30, 10]);
    }

    #[test]
    fn simple_shares_keep_leading_integer() {
        assert_eq!(parse_simple("50.5,10abc;x,-3"), vec![50, 10]);
        assert_eq!(parse_simple(" +25 , 0.9, .5"), vec![25]);
    }

    #[test]
    fn single_asset_groups() {
        let table = parse_groups("50#hive;30#hive;20#hive");
        assert_eq!(table.assets.len(), 1);
        assert_eq!(table.assets[0].asset, "hive");
        assert_eq!(table.assets[0].amounts, vec!["50", "30", "20"]);
        assert!(!table.assets[0].fixed);
        assert!(table.is_valid());
        assert_eq!(serialize_groups(&table), "50#hive;30#hive;20#hive");
    }

    #[test]
    fn multi_asset_groups_with_fixed() {
        let raw = "(50#hive,10#hbd#fixed);(50#hive,5#hbd#fixed)";
        let table = parse_groups(raw);
        assert_eq!(table.assets.len(), 2);
        assert_eq!(table.assets[1].asset, "hbd");
        assert!(table.assets[1].fixed);
        assert_eq!(table.assets[1].amounts, vec!["10", "5"]);
        assert_eq!(serialize_groups(&table), raw);
    }

    #[test]
    fn missing_share_becomes_placeholder() {
        let table = parse_groups("(60#hive,100#hbd);40#hive");
        assert_eq!(table.assets[1].amounts, vec!["100", ""]);
        assert_eq!(
            serialize_groups(&table),
            "(60#hive,100#hbd);(40#hive,0#hbd)"
        );
    }

    #[test]
    fn round_trip_normalizes_empty_to_zero() {
        let table = ShareTable {
            assets: vec![
                AssetShares::percentage("hive", &["70", "30"]),
                AssetShares::percentage("hbd", &["100", ""]),
            ],
        };
        let back = parse_groups(&serialize_groups(&table));
        assert_eq!(back.assets[0], table.assets[0]);
        assert_eq!(back.assets[1].amounts, vec!["100", "0"]);
    }

    #[test]
    fn percentage_validation() {
        assert!(AssetShares::percentage("hive", &["50", "50"]).is_valid());
        assert!(!AssetShares::percentage("hive", &["50", "40"]).is_valid());
        assert!(AssetShares::percentage("hive", &["33.3", "33.3", "33.35"]).is_valid());
        assert!(AssetShares::percentage("hive", &["100", ""]).is_valid());
        assert!(!AssetShares::percentage("hive", &["150", "-50"]).is_valid());
        assert!(!AssetShares::percentage("hive", &["abc", "100"]).is_valid());
    }

    #[test]
    fn fixed_validation() {
        let mut shares = AssetShares::percentage("hbd", &["10", "5"]);
        shares.fixed = true;
        assert!(shares.is_valid());
        shares.amounts = vec!["0".into(), "".into()];
        assert!(!shares.is_valid());
    }

    #[test]
    fn empty_table_is_invalid() {
        assert!(!parse_groups("").is_valid());
        assert_eq!(serialize_groups(&ShareTable::default()), "");
    }
}
