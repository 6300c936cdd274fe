//! Poll options: `text[###url];text[###url];...`

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

const ENTRY_SEPARATOR: char = ';';
const URL_SEPARATOR: &str = "###";
/// Characters that would break the grammar if typed into a field.
const RESERVED: &[char] = &['#', '|', ';'];

/// One answer of a poll, optionally linking to more detail.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PollOption {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PollOption {
    /// Build an option from user input, stripping reserved characters.
    pub fn from_input(text: &str, url: &str) -> Self {
        let url = sanitize(url);
        PollOption {
            text: sanitize(text),
            url: if url.is_empty() { None } else { Some(url) },
        }
    }
}

/// Remove `#`, `|` and `;` from user-entered text.
pub fn sanitize(s: &str) -> String {
    s.chars().filter(|c| !RESERVED.contains(c)).collect()
}

pub fn parse(raw: &str) -> Vec<PollOption> {
    raw.split(ENTRY_SEPARATOR)
        .filter(|piece| !piece.is_empty())
        .map(|piece| match piece.split_once(URL_SEPARATOR) {
            Some((text, url)) => PollOption {
                text: text.to_string(),
                url: if url.is_empty() {
                    None
                } else {
                    Some(url.to_string())
                },
            },
            None => PollOption {
                text: piece.to_string(),
                url: None,
            },
        })
        .collect()
}

pub fn serialize(options: &[PollOption]) -> String {
    options
        .iter()
        .map(|o| match &o.url {
            Some(url) if !url.is_empty() => format!("{}{}{}", o.text, URL_SEPARATOR, url),
            _ => o.text.clone(),
        })
        .collect::<Vec<_>>()
        .join(&ENTRY_SEPARATOR.to_string())
}

/// Whether two options share the same text, ignoring case and
/// surrounding whitespace.
pub fn has_duplicates(options: &[PollOption]) -> bool {
    let mut seen = HashSet::new();
    options
        .iter()
        .map(|o| o.text.trim().to_lowercase())
        .any(|t| !seen.insert(t))
}
