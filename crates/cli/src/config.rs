//! Terminal settings file for `vscterm --config`.
//!
//! # Example
//!
//! ```toml
//! [terminal]
//! contracts = "contracts.json"
//! default_rc_limit = 1500
//! key_type = "posting"
//! log_format = "json"
//!
//! [balances]
//! hive = "125.000"
//! hbd = "40.500"
//! hbd_savings = "10.000"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the
//! file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use vscterm_model::Balances;
use vscterm_payload::request::DEFAULT_RC_LIMIT;
use vscterm_payload::{KeyType, RequestSettings};

use crate::logging::LogFormat;

/// Contract configuration used when neither flag nor file names one.
pub(crate) const DEFAULT_CONTRACTS_PATH: &str = "contracts.json";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TerminalConfig {
    #[serde(default)]
    pub terminal: TerminalSettings,
    /// Wallet balances used by `validate` when `--balances` is absent.
    pub balances: Option<Balances>,
}

/// `[terminal]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TerminalSettings {
    /// Path of the contract configuration, relative to the settings file.
    pub contracts: Option<PathBuf>,
    pub default_rc_limit: Option<u64>,
    pub key_type: Option<KeyType>,
    pub log_format: Option<LogFormat>,
}

impl TerminalConfig {
    /// Contract configuration path: the flag, else the file entry, else
    /// `contracts.json` in the working directory.
    pub fn contracts_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.terminal.contracts.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTRACTS_PATH))
    }

    pub fn request_settings(&self, key_type: Option<KeyType>) -> RequestSettings {
        RequestSettings {
            default_rc_limit: self
                .terminal
                .default_rc_limit
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_RC_LIMIT),
            key_type: key_type.or(self.terminal.key_type).unwrap_or_default(),
        }
    }
}

/// Read and parse a settings file. A relative `contracts` path is
/// resolved against the file's directory.
pub(crate) fn read_terminal_config(path: &Path) -> Result<TerminalConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    let mut config: TerminalConfig = toml::from_str(&content)
        .map_err(|e| format!("could not parse '{}': {}", path.display(), e))?;

    if let (Some(contracts), Some(dir)) = (&config.terminal.contracts, path.parent()) {
        if contracts.is_relative() {
            config.terminal.contracts = Some(dir.join(contracts));
        }
    }
    tracing::debug!(path = %path.display(), "loaded terminal settings");
    Ok(config)
}
