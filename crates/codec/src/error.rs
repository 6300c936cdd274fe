/// Errors from strict codec constructors and normalizers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Payout amounts must be written with exactly three decimals.
    #[error("invalid payout amount '{0}': expected digits with three decimals, e.g. 1.000")]
    InvalidAmount(String),

    #[error("payout receiver must not be empty")]
    EmptyReceiver,

    /// A meta value does not fit the kind declared for its key.
    #[error("invalid value '{value}' for meta key '{key}': expected {expected}")]
    InvalidMetaValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// The key is not one of the parameter's meta options.
    #[error("unknown meta key '{0}'")]
    UnknownMetaKey(String),
}
