//! Raw sub-frame layouts carried by the datagram transport.

use bytes::Bytes;
use cursor::{ByteCursor, CursorResult};
use schema::RawDecoder;
use wire::BYTE_ORDER;

/// A player action sub-frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAction {
    /// Action kind.
    pub kind: u8,
    /// Action id.
    pub action_id: u16,
    /// Opaque action body.
    pub body: Bytes,
}

/// A server tick sub-frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerTick {
    /// Tick counter.
    pub tick: u32,
    /// Opaque tick body.
    pub body: Bytes,
}

/// A payload decoded by a raw sub-frame decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFrame {
    /// Player action.
    UserAction(UserAction),
    /// Server tick.
    ServerTick(ServerTick),
}

impl RawFrame {
    /// Decoder that produced this frame.
    #[must_use]
    pub const fn decoder(&self) -> RawDecoder {
        match self {
            Self::UserAction(_) => RawDecoder::UserAction,
            Self::ServerTick(_) => RawDecoder::ServerTick,
        }
    }
}

/// Decodes the payload loaded into `scratch`.
pub(crate) fn decode(decoder: RawDecoder, scratch: &mut ByteCursor) -> CursorResult<RawFrame> {
    Ok(match decoder {
        RawDecoder::UserAction => RawFrame::UserAction(UserAction {
            kind: scratch.read_u8()?,
            action_id: scratch.read_u16(BYTE_ORDER)?,
            body: rest(scratch)?,
        }),
        RawDecoder::ServerTick => RawFrame::ServerTick(ServerTick {
            tick: scratch.read_u32(BYTE_ORDER)?,
            body: rest(scratch)?,
        }),
    })
}

fn rest(scratch: &mut ByteCursor) -> CursorResult<Bytes> {
    let n = scratch.bytes_remaining();
    scratch.read_bytes(n)
}
