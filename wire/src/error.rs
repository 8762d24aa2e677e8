//! Error types for header parsing.

use thiserror::Error;

use crate::Transport;

/// Result type for wire operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors raised while parsing a header layout.
///
/// Both variants are fatal for the connection being dissected: the framing
/// engine only parses after confirming enough bytes are buffered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireError {
    /// The cursor ran out of bytes in the middle of a header.
    #[error("header read failed: {0}")]
    Cursor(#[from] cursor::CursorError),

    /// Parsing consumed a different number of bytes than the layout declares.
    #[error("{transport} header consumed {consumed} bytes, layout declares {expected}")]
    HeaderSizeMismatch {
        /// Layout that was parsed.
        transport: Transport,
        /// Declared field bytes of the layout.
        expected: usize,
        /// Bytes actually consumed.
        consumed: usize,
    },
}
