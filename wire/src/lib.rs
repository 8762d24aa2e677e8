//! Frame marker, transports and header layouts for the gamedissect engine.
//!
//! This crate describes the binary layout of a frame header on each of the
//! two transports the game protocol is carried over. It does not scan for
//! markers or decide whether a header is genuine; that is the framing
//! engine's job.
//!
//! # Design Principles
//!
//! - **Closed set of layouts** - [`Header`] is an enum over the two known layouts.
//! - **Bit-exact contracts** - Field order, widths and byte order are fixed.
//! - **No domain knowledge** - This crate parses headers, not payloads.

mod datagram;
mod error;
mod header;
mod stream;
mod transport;

pub use datagram::DatagramHeader;
pub use error::{WireError, WireResult};
pub use header::{Header, BYTE_ORDER, MARKER};
pub use stream::StreamHeader;
pub use transport::Transport;
