//! Error type shared by the encoder and decoder.

use thiserror::Error;

/// Errors raised by [`ItemCodec`](crate::ItemCodec).
///
/// Both kinds are terminal: the operation stops at the first failure and no
/// partial result is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemCodecError {
    /// The operand does not match any recognized native or tagged shape.
    #[error("Invalid Parameters: {0}")]
    InvalidInput(String),
    /// The operation is refused under the current codec options.
    #[error("Not Implemented: {0}")]
    NotSupported(String),
}

impl ItemCodecError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ItemCodecError::InvalidInput(reason.into())
    }

    pub(crate) fn not_supported(reason: impl Into<String>) -> Self {
        ItemCodecError::NotSupported(reason.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ItemCodecError::InvalidInput(_))
    }

    pub fn is_not_supported(&self) -> bool {
        matches!(self, ItemCodecError::NotSupported(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_kind_and_reason() {
        let err = ItemCodecError::invalid("no recognized type key");
        assert_eq!(err.to_string(), "Invalid Parameters: no recognized type key");
        assert!(err.is_invalid_input());
        assert!(!err.is_not_supported());

        let err = ItemCodecError::not_supported("numeric encoding");
        assert_eq!(err.to_string(), "Not Implemented: numeric encoding");
        assert!(err.is_not_supported());
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&ItemCodecError::invalid("x"));
    }
}
