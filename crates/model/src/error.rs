use std::path::PathBuf;

/// Errors raised while loading or querying contract configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid JSON or does not match the
    /// descriptor schema (this includes unknown `parse` tags).
    #[error("could not parse contract configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two parameters of one function share the same `name`.
    #[error("function '{function}' declares parameter '{name}' more than once")]
    DuplicateParameter { function: String, name: String },

    /// No contract matches the requested id or name.
    #[error("unknown contract: {0}")]
    UnknownContract(String),

    /// The contract has no function with the requested name.
    #[error("contract '{contract}' has no function '{function}'")]
    UnknownFunction { contract: String, function: String },
}
