//! Error taxonomy for formatting and flushing.

use std::io;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, FormatError>;

/// Errors surfaced by a `format`/`print` call.
///
/// None of these are retried. Once one is returned, any partially built
/// output buffer must be treated as meaningless by the caller.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A numeric-only spec flag was applied to a generic-path value.
    #[error("format specifier '{0}' requires numeric argument")]
    RequiresNumeric(char),

    /// The format string itself is malformed.
    #[error("{0}")]
    Parse(&'static str),

    /// A replacement field refers to an argument that was not supplied.
    #[error("argument index {0} out of range")]
    ArgumentIndex(usize),

    /// A dynamic width or precision argument is not a non-negative integer.
    #[error("width/precision is not a non-negative integer")]
    InvalidDynamicArg,

    /// Padding would grow the output buffer past what can be allocated.
    #[error("output buffer cannot grow by {0} bytes")]
    Capacity(usize),

    /// Error raised by a value's own stream-insertion logic, passed through
    /// untouched.
    #[error(transparent)]
    Render(io::Error),

    /// The output sink failed or stalled.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FormatError {
    /// Whether this error came from the sink rather than from formatting.
    pub fn is_io(&self) -> bool {
        matches!(self, FormatError::Io(_))
    }
}
