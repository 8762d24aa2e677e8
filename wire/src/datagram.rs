//! Header layout of the datagram transport.

use std::fmt;

use cursor::ByteCursor;

use crate::error::WireResult;
use crate::BYTE_ORDER;

/// Header of a datagram-transport frame, as found after the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DatagramHeader {
    /// Frame length in bytes, marker and header included.
    pub total_length: u16,
    /// Command id.
    pub command: u16,
    /// Sequence number.
    pub sequence: u16,
    /// Acknowledged sequence number.
    pub ack: u16,
    /// Extension word.
    pub extension: u32,
}

impl DatagramHeader {
    /// Field bytes following the marker (12).
    pub const FIELD_SIZE: usize = 2 + 2 + 2 + 2 + 4;

    /// Reads the header fields from the cursor.
    ///
    /// The marker must already have been consumed.
    pub fn parse(cursor: &mut ByteCursor) -> WireResult<Self> {
        Ok(Self {
            total_length: cursor.read_u16(BYTE_ORDER)?,
            command: cursor.read_u16(BYTE_ORDER)?,
            sequence: cursor.read_u16(BYTE_ORDER)?,
            ack: cursor.read_u16(BYTE_ORDER)?,
            extension: cursor.read_u32(BYTE_ORDER)?,
        })
    }
}

impl fmt::Display for DatagramHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cmd={:04X} seq={} len={} ack={} ext={}",
            self.command, self.sequence, self.total_length, self.ack, self.extension
        )
    }
}
