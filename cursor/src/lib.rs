//! Append-only byte cursor for the gamedissect framing engine.
//!
//! This crate provides [`ByteCursor`], a growing buffer with a read position.
//! Bytes from successive network reads are appended at the end while the
//! framing engine reads, rewinds and re-reads from the current position.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked against the bytes remaining.
//! - **No domain knowledge** - This crate knows nothing about markers, headers or commands.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use cursor::{ByteCursor, ByteOrder};
//!
//! let mut cursor = ByteCursor::new();
//! cursor.append(&[0x55, 0xAA, 0x0E]);
//! cursor.append(&[0x00]);
//!
//! assert_eq!(cursor.read_u8().unwrap(), 0x55);
//! assert_eq!(cursor.read_u8().unwrap(), 0xAA);
//! assert_eq!(cursor.read_u16(ByteOrder::Little).unwrap(), 14);
//! assert_eq!(cursor.bytes_remaining(), 0);
//! ```

mod cursor;
mod error;

pub use cursor::{ByteCursor, ByteOrder};
pub use error::{CursorError, CursorResult};
