//! Error types for the codec.
//!
//! Every encode, decode, and address-parse operation that can fail returns a
//! [`CodecError`]. Signature recovery is deliberately absent: an
//! unrecoverable signature degrades the decoded result instead of failing it.

use thiserror::Error;

/// Errors raised by the address, field, and transaction codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The text is not plain hex, `one1...`, or `tone1...`.
    #[error("\"{0}\" is an invalid address format")]
    InvalidAddressFormat(String),

    /// A variable-width field is wider than the format allows.
    #[error("invalid length for {field}: at most {max} bytes, got {actual}")]
    FieldTooLong {
        /// Field name as it appears in the transaction.
        field: &'static str,
        /// Largest accepted width.
        max: usize,
        /// Width that was supplied.
        actual: usize,
    },

    /// A fixed-width field has the wrong length.
    #[error("invalid length for {field}: expected {expected} bytes, got {actual}")]
    FieldLengthMismatch {
        /// Field name as it appears in the transaction.
        field: &'static str,
        /// Required width.
        expected: usize,
        /// Width that was supplied.
        actual: usize,
    },

    /// The staking directive is outside `0..=4`.
    #[error("unknown staking directive {0}")]
    UnknownDirective(u64),

    /// Wrong field count, a list where a string was expected (or the
    /// reverse), or an unparseable length prefix.
    #[error("malformed transaction: {0}")]
    MalformedTransaction(String),

    /// The chain id (or the `v` it is derived from) is not a usable number.
    #[error("invalid chain id: {0}")]
    InvalidChainId(String),

    /// A caller-supplied decimal string could not be scaled to 18 digits.
    #[error("invalid decimal \"{value}\": {reason}")]
    InvalidDecimal {
        /// The rejected text.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A signature envelope carries a recovery id other than 0 or 1.
    #[error("invalid recovery id {0}: expected 0 or 1")]
    InvalidRecoveryId(u8),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedTransaction(reason.into())
    }
}
