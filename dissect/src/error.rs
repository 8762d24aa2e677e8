//! Error types for the framing engine.

use thiserror::Error;

/// Result type for framing engine operations.
pub type DissectResult<T> = Result<T, DissectError>;

/// Fatal, per-connection errors.
///
/// Unqualified marker matches, unknown commands and undecodable payloads are
/// normal control flow and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DissectError {
    /// The cursor refused a read or seek the engine believed was in range.
    #[error("cursor error: {0}")]
    Cursor(#[from] cursor::CursorError),

    /// A header parse failed after the engine confirmed enough bytes.
    #[error("header error: {0}")]
    Wire(#[from] wire::WireError),

    /// A previous receive on this connection failed; the engine is unusable.
    #[error("connection aborted after earlier failure: {cause}")]
    Aborted {
        /// Rendering of the first fatal error.
        cause: String,
    },
}

impl DissectError {
    /// Returns `true` for the error returned after the first fatal failure.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}
