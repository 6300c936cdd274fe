//! Contract and function descriptors, and configuration loading.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::param::{FunctionParameter, ParamKind};

/// How a function's parameters are turned into a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    #[default]
    Json,
    Csv,
    Raw,
    Game,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Json => "json",
            ParseMode::Csv => "csv",
            ParseMode::Raw => "raw",
            ParseMode::Game => "game",
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_key_delimiter() -> String {
    ":".to_string()
}

/// One invocable contract action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDescriptor {
    /// Action id sent on chain.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub parse: ParseMode,
    #[serde(default)]
    pub parameters: Vec<FunctionParameter>,
    /// Entry separator in csv mode.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Key/value separator in csv mode.
    #[serde(default = "default_key_delimiter")]
    pub key_delimiter: String,
    /// Emit bare values in csv mode.
    #[serde(default)]
    pub exclude_keys: bool,
    /// Default for `meta-*` parameters without their own `metaAsArray`.
    #[serde(default)]
    pub meta_as_array: bool,
    #[serde(default)]
    pub wizard_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wizard_steps: Option<serde_json::Value>,
}

impl FunctionDescriptor {
    /// A json-mode descriptor with the given parameters and default options.
    pub fn new(name: impl Into<String>, parameters: Vec<FunctionParameter>) -> Self {
        FunctionDescriptor {
            name: name.into(),
            friendly_name: None,
            parse: ParseMode::Json,
            parameters,
            delimiter: default_delimiter(),
            key_delimiter: default_key_delimiter(),
            exclude_keys: false,
            meta_as_array: false,
            wizard_enabled: false,
            wizard_steps: None,
        }
    }

    /// Look up a parameter by display name (case-sensitive).
    pub fn parameter(&self, name: &str) -> Option<&FunctionParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Look up a parameter by wire key, ignoring ASCII case.
    ///
    /// Used for feature detection, e.g. whether a function is scoped to a
    /// DAO project (`"projectid"`).
    pub fn parameter_by_payload_name(&self, key: &str) -> Option<&FunctionParameter> {
        self.parameters
            .iter()
            .find(|p| p.wire_key().eq_ignore_ascii_case(key))
    }

    /// All parameters whose kind satisfies `pred`, in declaration order.
    pub fn parameters_where<'a, F>(&'a self, pred: F) -> impl Iterator<Item = &'a FunctionParameter>
    where
        F: Fn(&ParamKind) -> bool + 'a,
    {
        self.parameters.iter().filter(move |p| pred(&p.kind))
    }

    /// Parameters ordered for display: by `sortIndex`, unsorted ones last.
    pub fn sorted_parameters(&self) -> Vec<&FunctionParameter> {
        let mut params: Vec<&FunctionParameter> = self.parameters.iter().collect();
        params.sort_by_key(|p| p.sort_index.unwrap_or(i64::MAX));
        params
    }

    /// Label shown to users.
    pub fn label(&self) -> &str {
        self.friendly_name.as_deref().unwrap_or(&self.name)
    }

    fn check_unique_names(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for p in &self.parameters {
            if !seen.insert(p.name.as_str()) {
                return Err(ConfigError::DuplicateParameter {
                    function: self.name.clone(),
                    name: p.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A deployed contract and the functions the terminal exposes for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDescriptor {
    /// On-chain contract id.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub functions: Vec<FunctionDescriptor>,
}

impl ContractDescriptor {
    pub fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Like [`ContractDescriptor::function`] but reports a missing function.
    pub fn require_function(&self, name: &str) -> Result<&FunctionDescriptor, ConfigError> {
        self.function(name)
            .ok_or_else(|| ConfigError::UnknownFunction {
                contract: self.name.clone(),
                function: name.to_string(),
            })
    }
}

/// All contracts known to the terminal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractsConfig {
    #[serde(default)]
    pub contracts: Vec<ContractDescriptor>,
}

impl ContractsConfig {
    /// Parse and check a configuration document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: ContractsConfig = serde_json::from_str(s).map_err(|e| {
            tracing::warn!(error = %e, "rejected contract configuration");
            ConfigError::Parse(e)
        })?;
        config.check()?;
        tracing::debug!(
            contracts = config.contracts.len(),
            "loaded contract configuration"
        );
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    fn check(&self) -> Result<(), ConfigError> {
        for contract in &self.contracts {
            for function in &contract.functions {
                if let Err(e) = function.check_unique_names() {
                    tracing::warn!(contract = %contract.name, error = %e, "rejected contract configuration");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Find a contract by on-chain id or by name.
    pub fn contract(&self, id_or_name: &str) -> Option<&ContractDescriptor> {
        self.contracts
            .iter()
            .find(|c| c.id == id_or_name || c.name == id_or_name)
    }

    pub fn require_contract(&self, id_or_name: &str) -> Result<&ContractDescriptor, ConfigError> {
        self.contract(id_or_name)
            .ok_or_else(|| ConfigError::UnknownContract(id_or_name.to_string()))
    }
}
