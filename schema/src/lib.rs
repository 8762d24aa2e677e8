//! Command tables and structural-decoder bindings for the gamedissect engine.
//!
//! This crate decides what a command id decodes as:
//! - Command enumerations and message catalogs from a compiled schema directory
//! - Message type name derivation from enumeration entries
//! - Transport-specific pinned overrides
//! - The immutable [`CommandTable`] shared by every connection of a transport
//! - The [`StructuralDecoder`] seam implemented by whatever compiled the schema
//!
//! # Design Principles
//!
//! - **Build once** - Name derivation runs when the table is built, never at dispatch time.
//! - **Explicit injection** - There is no process-wide table; callers share one via `Arc`.
//! - **Deterministic hashing** - A table's fingerprint is stable given the same inputs.

mod catalog;
mod command;
mod directory;
mod error;
mod hash;
mod message;
mod naming;
pub mod overrides;
mod table;

pub use catalog::{MessageCatalog, MessageKind};
pub use command::{CommandEntry, CommandEnumeration};
pub use directory::{EnumEntries, SchemaDirectory};
pub use error::{SchemaError, SchemaResult};
pub use hash::table_fingerprint;
pub use message::{Field, StructuralDecoder, StructuralError, StructuredMessage, Value};
pub use naming::{message_type_name, WORD_SEPARATOR};
pub use overrides::{command_enum_name, overrides_for, Override, OverrideTarget, RawDecoder};
pub use table::{CommandTable, DecoderRef};
