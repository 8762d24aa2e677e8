//! Schema lookup errors.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when resolving a schema directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The directory has no command enumeration with this name.
    #[error("schema directory has no command enumeration named {name:?}")]
    MissingEnumeration {
        /// Enumeration that was requested.
        name: String,
    },
}
