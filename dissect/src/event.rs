//! Frames delivered to the output collaborator.

use bytes::Bytes;
use schema::StructuredMessage;
use wire::{Header, Transport};

use crate::raw::RawFrame;

/// A qualified frame and what its payload decoded to.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEvent {
    /// Parsed header.
    pub header: Header,
    /// Decoded payload.
    pub body: FrameBody,
}

impl FrameEvent {
    /// Transport the frame arrived on.
    #[must_use]
    pub const fn transport(&self) -> Transport {
        self.header.transport()
    }
}

/// Outcome of dispatching a frame payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameBody {
    /// Decoded by the structural decoder.
    Message(StructuredMessage),
    /// Decoded by a raw sub-frame decoder.
    Raw(RawFrame),
    /// The bound decoder rejected the payload.
    Undecodable {
        /// Decoder's reason.
        reason: String,
        /// Payload as received.
        payload: Bytes,
    },
    /// No decoder for this command.
    Unrecognized(Bytes),
}

/// Receives frames synchronously as the engine dispatches them.
pub trait FrameSink {
    /// Called once per qualified frame, in stream order.
    fn on_frame(&mut self, event: FrameEvent);
}

impl FrameSink for Vec<FrameEvent> {
    fn on_frame(&mut self, event: FrameEvent) {
        self.push(event);
    }
}
