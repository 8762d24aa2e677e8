//! Error types for cursor operations.

use thiserror::Error;

/// Result type for cursor operations.
pub type CursorResult<T> = Result<T, CursorError>;

/// Errors that can occur while reading from a [`crate::ByteCursor`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// Attempted to read past the end of the buffered bytes.
    #[error("short read: requested {requested} bytes but only {available} remain")]
    ShortRead {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes remaining after the read position.
        available: usize,
    },

    /// A relative seek would leave the buffered range.
    #[error("seek by {offset} from position {position} leaves buffer of {len} bytes")]
    SeekOutOfRange {
        /// Signed offset that was requested.
        offset: isize,
        /// Read position before the seek.
        position: usize,
        /// Number of buffered bytes.
        len: usize,
    },
}
