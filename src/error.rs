//! Error type shared by every operation in the crate.
//!
//! All validation is synchronous and happens before any state is touched,
//! so an `Err` always leaves the receiver exactly as it was.

use alloc::borrow::Cow;

/// Result alias used throughout the crate.
pub type IioResult<T> = Result<T, IioError>;

/// Errors raised by layouts, region reconciliation, and parameter objects.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IioError {
    /// A caller supplied a structurally invalid value (bad dimension,
    /// mismatched array length, unknown name).
    #[error("invalid argument: {0}")]
    InvalidArgument(Cow<'static, str>),

    /// The receiver's mode or configuration does not permit the operation.
    ///
    /// Recoverable: change the mode or configuration and retry.
    #[error("invalid state: {0}")]
    InvalidState(Cow<'static, str>),

    /// A capability flag says the feature is unavailable for this instance.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(Cow<'static, str>),

    /// Region reconciliation produced a zero-area rectangle.
    #[error("empty region: {0}")]
    EmptyRegion(&'static str),

    /// I/O failure reported by a provider or plug-in. Never raised by the
    /// core itself.
    #[error("i/o failure: {0}")]
    Io(Cow<'static, str>),

    /// The operation was cancelled through its stop token.
    #[error("operation stopped: {0}")]
    Stopped(enough::StopReason),
}

impl IioError {
    /// Build an [`IioError::InvalidArgument`].
    pub fn invalid_argument(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build an [`IioError::InvalidState`].
    pub fn invalid_state(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Build an [`IioError::UnsupportedOperation`].
    pub fn unsupported(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }

    /// Build an [`IioError::Io`].
    pub fn io(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Io(msg.into())
    }
}

impl From<enough::StopReason> for IioError {
    fn from(reason: enough::StopReason) -> Self {
        Self::Stopped(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn display_includes_kind_and_message() {
        let err = IioError::invalid_argument("Bad value for bits!");
        assert_eq!(format!("{err}"), "invalid argument: Bad value for bits!");

        let err = IioError::invalid_state(format!("tiling mode is {}", "Default"));
        assert_eq!(format!("{err}"), "invalid state: tiling mode is Default");

        let err = IioError::EmptyRegion("Empty region!");
        assert_eq!(format!("{err}"), "empty region: Empty region!");
    }

    #[test]
    fn is_error_and_send_sync() {
        fn assert_error<E: core::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&IioError::unsupported("Thumbnails not supported!"));
        assert_error(&IioError::io("provider failed"));
    }
}
