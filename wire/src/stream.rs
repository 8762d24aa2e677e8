//! Header layout of the stream transport.

use std::fmt;

use cursor::ByteCursor;

use crate::error::WireResult;
use crate::BYTE_ORDER;

/// Header of a stream-transport frame, as found after the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamHeader {
    /// Frame length in bytes, marker and header included.
    pub total_length: u32,
    /// User id the connection belongs to.
    pub user_id: u32,
    /// Protocol version.
    pub protocol_version: u16,
    /// Application id.
    pub app_id: u32,
    /// Zone id.
    pub zone_id: u16,
    /// Command id.
    pub command: u16,
    /// Checksum field (carried, not verified).
    pub checksum: u16,
    /// Sequence number.
    pub sequence: u32,
}

impl StreamHeader {
    /// Field bytes following the marker (24).
    pub const FIELD_SIZE: usize = 4 + 4 + 2 + 4 + 2 + 2 + 2 + 4;

    /// Reads the header fields from the cursor.
    ///
    /// The marker must already have been consumed.
    pub fn parse(cursor: &mut ByteCursor) -> WireResult<Self> {
        Ok(Self {
            total_length: cursor.read_u32(BYTE_ORDER)?,
            user_id: cursor.read_u32(BYTE_ORDER)?,
            protocol_version: cursor.read_u16(BYTE_ORDER)?,
            app_id: cursor.read_u32(BYTE_ORDER)?,
            zone_id: cursor.read_u16(BYTE_ORDER)?,
            command: cursor.read_u16(BYTE_ORDER)?,
            checksum: cursor.read_u16(BYTE_ORDER)?,
            sequence: cursor.read_u32(BYTE_ORDER)?,
        })
    }
}

impl fmt::Display for StreamHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cmd={:04X} seq={} len={} uin={} zid={} ver={} app={} sum={}",
            self.command,
            self.sequence,
            self.total_length,
            self.user_id,
            self.zone_id,
            self.protocol_version,
            self.app_id,
            self.checksum
        )
    }
}
