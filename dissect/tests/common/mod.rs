//! Frame builders and a fake structural decoder shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use dissect::{DissectLimits, Dissector, FrameEvent};
use schema::{
    CommandTable, DecoderRef, MessageKind, RawDecoder, StructuralDecoder, StructuralError,
    StructuredMessage, Value,
};
use wire::{Transport, MARKER};

pub const HEARTBEAT: u16 = 0x0101;
pub const LOGIN: u16 = 0x0102;
pub const UNKNOWN: u16 = 0x0999;

pub const PING: u16 = 0x0310;
pub const USER_ACTION: u16 = 0x0306;
pub const SERVER_TICK: u16 = 0x0307;

/// Decodes every payload into a message carrying its length, except payloads
/// starting with `0xFF`, which it rejects.
pub struct LengthDecoder;

impl StructuralDecoder for LengthDecoder {
    fn decode(
        &self,
        kind: &MessageKind,
        payload: &[u8],
    ) -> Result<StructuredMessage, StructuralError> {
        if payload.first() == Some(&0xFF) {
            return Err(StructuralError {
                kind: kind.clone(),
                reason: "rejected".to_string(),
            });
        }
        Ok(StructuredMessage::new(kind.clone()).field("len", Value::UInt(payload.len() as u64)))
    }
}

pub fn stream_table() -> Arc<CommandTable> {
    Arc::new(CommandTable::from_entries(
        Transport::Stream,
        [
            (HEARTBEAT, DecoderRef::Structural(MessageKind::new("HeartBeat"))),
            (LOGIN, DecoderRef::Structural(MessageKind::new("Login"))),
        ],
    ))
}

pub fn datagram_table() -> Arc<CommandTable> {
    Arc::new(CommandTable::from_entries(
        Transport::Datagram,
        [
            (PING, DecoderRef::Structural(MessageKind::new("GamePingPkg"))),
            (USER_ACTION, DecoderRef::Raw(RawDecoder::UserAction)),
            (SERVER_TICK, DecoderRef::Raw(RawDecoder::ServerTick)),
        ],
    ))
}

pub fn stream_engine() -> Dissector {
    Dissector::new(
        stream_table(),
        Arc::new(LengthDecoder),
        DissectLimits::for_testing(),
    )
}

pub fn datagram_engine() -> Dissector {
    Dissector::new(
        datagram_table(),
        Arc::new(LengthDecoder),
        DissectLimits::for_testing(),
    )
}

/// Builds a stream frame: marker, 24 header bytes, payload.
pub fn stream_frame(command: u16, user_id: u32, sequence: u32, payload: &[u8]) -> Vec<u8> {
    let total = (Transport::Stream.header_size() + payload.len()) as u32;
    stream_frame_with_length(command, user_id, sequence, total, payload)
}

/// Builds a stream frame with an arbitrary declared total length.
pub fn stream_frame_with_length(
    command: u16,
    user_id: u32,
    sequence: u32,
    total_length: u32,
    payload: &[u8],
) -> Vec<u8> {
    let mut out = MARKER.to_vec();
    out.extend_from_slice(&total_length.to_le_bytes());
    out.extend_from_slice(&user_id.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // protocol_version
    out.extend_from_slice(&7u32.to_le_bytes()); // app_id
    out.extend_from_slice(&3u16.to_le_bytes()); // zone_id
    out.extend_from_slice(&command.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // checksum
    out.extend_from_slice(&sequence.to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// Builds a datagram frame: marker, 12 header bytes, payload.
pub fn datagram_frame(command: u16, sequence: u16, payload: &[u8]) -> Vec<u8> {
    let total = (Transport::Datagram.header_size() + payload.len()) as u16;
    let mut out = MARKER.to_vec();
    out.extend_from_slice(&total.to_le_bytes());
    out.extend_from_slice(&command.to_le_bytes());
    out.extend_from_slice(&sequence.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // ack
    out.extend_from_slice(&0u32.to_le_bytes()); // extension
    out.extend_from_slice(payload);
    out
}

/// Feeds `bytes` to `engine` split at `cuts` and collects every frame.
pub fn feed_split(engine: &mut Dissector, bytes: &[u8], cuts: &[usize]) -> Vec<FrameEvent> {
    let mut sink = Vec::new();
    let mut start = 0;
    for &cut in cuts {
        let cut = cut.clamp(start, bytes.len());
        engine.receive(&bytes[start..cut], &mut sink).unwrap();
        start = cut;
    }
    engine.receive(&bytes[start..], &mut sink).unwrap();
    sink
}

/// Feeds `bytes` in one read and collects every frame.
pub fn feed(engine: &mut Dissector, bytes: &[u8]) -> Vec<FrameEvent> {
    feed_split(engine, bytes, &[])
}
