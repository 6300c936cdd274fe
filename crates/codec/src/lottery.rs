//! Lottery metadata: `postUrl###donationUrl###description`.

use serde::{Deserialize, Serialize};

const SEPARATOR: &str = "###";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LotteryMeta {
    pub post_url: String,
    pub donation_url: String,
    pub description: String,
}

impl LotteryMeta {
    /// Build from user input, stripping `#` from every field so the
    /// separator cannot appear inside one.
    pub fn from_input(post_url: &str, donation_url: &str, description: &str) -> Self {
        LotteryMeta {
            post_url: strip_hashes(post_url),
            donation_url: strip_hashes(donation_url),
            description: strip_hashes(description),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.post_url.is_empty() && self.donation_url.is_empty() && self.description.is_empty()
    }
}

fn strip_hashes(s: &str) -> String {
    s.replace('#', "")
}

/// Split into the three fields; a description containing the separator
/// is rejoined.
pub fn parse(raw: &str) -> LotteryMeta {
    let mut parts = raw.split(SEPARATOR);
    let post_url = parts.next().unwrap_or_default().to_string();
    let donation_url = parts.next().unwrap_or_default().to_string();
    let description = parts.collect::<Vec<_>>().join(SEPARATOR);
    LotteryMeta {
        post_url,
        donation_url,
        description,
    }
}

/// Empty metadata serializes to the empty string.
pub fn serialize(meta: &LotteryMeta) -> String {
    if meta.is_empty() {
        return String::new();
    }
    [
        meta.post_url.as_str(),
        meta.donation_url.as_str(),
        meta.description.as_str(),
    ]
    .join(SEPARATOR)
}
