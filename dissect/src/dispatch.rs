//! Routing of qualified payloads to their decoders.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use schema::{CommandTable, DecoderRef, StructuralDecoder};
use tracing::{trace, warn};
use wire::Header;

use crate::event::{FrameBody, FrameEvent};
use crate::raw;
use crate::scratch::DissectScratch;

/// Routes a payload by command id through the table.
pub struct Dispatcher {
    table: Arc<CommandTable>,
    structural: Arc<dyn StructuralDecoder>,
    scratch: DissectScratch,
}

impl Dispatcher {
    /// Creates a dispatcher over a shared table and structural decoder.
    #[must_use]
    pub fn new(table: Arc<CommandTable>, structural: Arc<dyn StructuralDecoder>) -> Self {
        Self {
            table,
            structural,
            scratch: DissectScratch::new(),
        }
    }

    /// Command table lookups go through.
    #[must_use]
    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Decodes `payload` according to the decoder bound to `header`'s command.
    pub fn dispatch(&mut self, header: Header, payload: Bytes) -> FrameEvent {
        let command = header.command();
        let body = match self.table.get(command) {
            Some(DecoderRef::Structural(kind)) => match self.structural.decode(kind, &payload) {
                Ok(message) => FrameBody::Message(message),
                Err(err) => {
                    warn!(command, sequence = header.sequence(), error = %err, "structural decode failed");
                    FrameBody::Undecodable {
                        reason: err.to_string(),
                        payload,
                    }
                }
            },
            Some(DecoderRef::Raw(decoder)) => {
                match raw::decode(*decoder, self.scratch.load(&payload)) {
                    Ok(frame) => FrameBody::Raw(frame),
                    Err(err) => {
                        warn!(command, sequence = header.sequence(), error = %err, "raw sub-frame decode failed");
                        FrameBody::Undecodable {
                            reason: err.to_string(),
                            payload,
                        }
                    }
                }
            }
            Some(DecoderRef::Unresolved(_)) | None => {
                trace!(command, len = payload.len(), "unrecognized command");
                FrameBody::Unrecognized(payload)
            }
        };
        FrameEvent { header, body }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("table", &self.table)
            .field("scratch", &self.scratch)
            .finish_non_exhaustive()
    }
}
