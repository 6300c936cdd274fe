//! vscterm-model: static contract configuration for the terminal.
//!
//! Provides typed descriptors for contracts, their invocable functions
//! and each function's declared parameters, plus the asset and balance
//! types shared by the codec and payload crates.
//!
//! Configuration is loaded once (usually from `contracts.json`) into an
//! immutable [`ContractsConfig`] and passed explicitly to the encoder and
//! validator. Nothing in this crate holds global state.

pub mod asset;
pub mod error;
pub mod function;
pub mod param;
pub mod values;

pub use asset::{Asset, Balances};
pub use error::ConfigError;
pub use function::{ContractDescriptor, ContractsConfig, FunctionDescriptor, ParseMode};
pub use param::{FunctionParameter, MetaOption, MetaValueKind, ParamKind};
pub use values::ParameterValueMap;
