//! vscterm-codec: string codecs for compound contract parameters.
//!
//! Several contract parameters carry structured data inside one string
//! (poll options, payout lists, meta updates, winner share tables, ...).
//! Each module here owns one of those wire grammars and exposes a
//! `parse` / `serialize` pair over a proper Rust type, so the string
//! encoding never leaks into call sites.
//!
//! Parsing is lenient and never fails: malformed pieces degrade to empty
//! or default fields. Strict constructors (e.g. [`payout::Payout::new`])
//! return a [`CodecError`] instead.

pub mod amount;
pub mod boolean;
pub mod error;
pub mod icc;
pub mod lottery;
pub mod meta;
pub mod payout;
pub mod poll;
pub mod winners;

pub use amount::{format_amount, is_three_decimal_amount};
pub use boolean::parse_bool_lenient;
pub use error::CodecError;
