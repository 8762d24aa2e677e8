//! Marker-based framing, resynchronization and dispatch for a game protocol.
//!
//! This is the main crate that ties together the cursor, wire and schema
//! crates into a per-connection [`Dissector`]:
//!
//! - Scans an accumulating byte buffer for the `0x55 0xAA` frame marker
//! - Parses the header layout of the connection's transport
//! - Rejects coincidental marker matches and resynchronizes one byte later
//! - Waits for split payloads across reads without re-scanning
//! - Routes payloads to a structural decoder, a raw sub-frame decoder, or the
//!   unrecognized fallback
//!
//! # Design Principles
//!
//! - **One engine per connection** - Connections share only the read-only
//!   [`schema::CommandTable`] and [`schema::StructuralDecoder`].
//! - **Chunking invariance** - Any split of the same bytes yields the same frames.
//! - **Errors are values** - Fatal failures poison one connection, never the process.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use dissect::{DissectLimits, Dissector, FrameEvent};
//! use schema::{
//!     CommandTable, DecoderRef, MessageKind, StructuralDecoder, StructuralError,
//!     StructuredMessage,
//! };
//! use wire::Transport;
//!
//! struct Opaque;
//!
//! impl StructuralDecoder for Opaque {
//!     fn decode(
//!         &self,
//!         kind: &MessageKind,
//!         _payload: &[u8],
//!     ) -> Result<StructuredMessage, StructuralError> {
//!         Ok(StructuredMessage::new(kind.clone()))
//!     }
//! }
//!
//! let table = CommandTable::from_entries(
//!     Transport::Datagram,
//!     [(0x0310, DecoderRef::Structural(MessageKind::new("GamePingPkg")))],
//! );
//! let mut engine = Dissector::new(
//!     Arc::new(table),
//!     Arc::new(Opaque),
//!     DissectLimits::default(),
//! );
//!
//! let mut frames: Vec<FrameEvent> = Vec::new();
//! engine
//!     .receive(&[0x55, 0xAA, 0x0E, 0x00, 0x10, 0x03, 0x01, 0x00], &mut frames)
//!     .unwrap();
//! engine
//!     .receive(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00], &mut frames)
//!     .unwrap();
//!
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].header.command(), 0x0310);
//! ```

mod dispatch;
mod engine;
mod error;
mod event;
mod limits;
mod qualify;
mod raw;
mod scratch;

pub use dispatch::Dispatcher;
pub use engine::{Dissector, ScanPhase};
pub use error::{DissectError, DissectResult};
pub use event::{FrameBody, FrameEvent, FrameSink};
pub use limits::DissectLimits;
pub use qualify::Qualifier;
pub use raw::{RawFrame, ServerTick, UserAction};
pub use scratch::DissectScratch;
