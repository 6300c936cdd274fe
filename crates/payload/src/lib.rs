//! vscterm-payload: turns a contract function and the values a user
//! entered into the payload, spending intents and action name that get
//! broadcast, and decides whether those values may be submitted.
//!
//! Everything here is pure: [`encode`] and [`validate::describe_missing`]
//! read an immutable snapshot of the value map and may be called on every
//! keystroke for live previews.

pub mod autofill;
pub mod encode;
pub mod game;
pub mod intent;
pub mod request;
pub mod validate;

pub use autofill::propose_updates;
pub use encode::encode;
pub use intent::{EncodedPayload, IntentArgs, SpendIntent};
pub use request::{build_request, BroadcastRequest, KeyType, RequestSettings};
pub use validate::{describe_bounds, describe_missing, is_valid};
