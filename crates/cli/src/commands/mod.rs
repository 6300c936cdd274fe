mod codec;
mod encode;
mod functions;
mod validate;

pub(crate) use codec::cmd_codec;
pub(crate) use encode::{cmd_encode, EncodeOptions};
pub(crate) use functions::cmd_functions;
pub(crate) use validate::cmd_validate;
