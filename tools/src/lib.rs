//! Command-line dissection tools for the gamedissect engine.
//!
//! This crate is the output collaborator of the engine:
//!
//! - Replay reassembled per-connection bytes through a fresh engine
//! - Decode protobuf payloads without a compiled schema
//! - Render frames as JSON or one text line per frame
//! - List a transport's command table with its fingerprint
//!
//! # Design Principles
//!
//! - **One file, one connection** - Every capture file gets its own engine.
//! - **Human-readable output** - Make it easy to see what the engine found.

mod protowire;
mod render;
mod report;

pub use protowire::{WireFormatDecoder, WireFormatError};
pub use render::{
    bytes_text, format_frame_pretty, format_table, message_json, DecodedBy, FrameRecord,
};
pub use report::{
    collect_capture_files, dissect_connection, parse_schema_directory, ConnectionReport,
};
