//! Frame marker and the closed set of header layouts.

use std::fmt;

use cursor::{ByteCursor, ByteOrder};

use crate::datagram::DatagramHeader;
use crate::error::{WireError, WireResult};
use crate::stream::StreamHeader;
use crate::Transport;

/// Two-byte sequence that starts every candidate frame.
pub const MARKER: [u8; 2] = [0x55, 0xAA];

/// Byte order of every multi-byte header field.
pub const BYTE_ORDER: ByteOrder = ByteOrder::Little;

/// A parsed frame header of either transport.
///
/// All downstream decisions go through the normalized view
/// ([`Header::total_length`], [`Header::command`], [`Header::sequence`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "transport", rename_all = "lowercase"))]
pub enum Header {
    /// Stream-transport header.
    Stream(StreamHeader),
    /// Datagram-transport header.
    Datagram(DatagramHeader),
}

impl Header {
    /// Parses the header layout of `transport` at the cursor position.
    ///
    /// The marker must already have been consumed. Fails with
    /// [`WireError::Cursor`] when fewer than [`Transport::field_size`] bytes
    /// remain and with [`WireError::HeaderSizeMismatch`] if the parse did not
    /// consume exactly the declared field size.
    pub fn parse(transport: Transport, cursor: &mut ByteCursor) -> WireResult<Self> {
        let start = cursor.position();
        let header = match transport {
            Transport::Stream => Self::Stream(StreamHeader::parse(cursor)?),
            Transport::Datagram => Self::Datagram(DatagramHeader::parse(cursor)?),
        };
        let consumed = cursor.position() - start;
        let expected = transport.field_size();
        if consumed != expected {
            return Err(WireError::HeaderSizeMismatch {
                transport,
                expected,
                consumed,
            });
        }
        Ok(header)
    }

    /// Transport this header belongs to.
    #[must_use]
    pub const fn transport(&self) -> Transport {
        match self {
            Self::Stream(_) => Transport::Stream,
            Self::Datagram(_) => Transport::Datagram,
        }
    }

    /// Header size in bytes, marker included.
    #[must_use]
    pub const fn header_size(&self) -> usize {
        self.transport().header_size()
    }

    /// Declared frame length, marker and header included.
    #[must_use]
    pub const fn total_length(&self) -> u32 {
        match self {
            Self::Stream(h) => h.total_length,
            Self::Datagram(h) => h.total_length as u32,
        }
    }

    /// Command id.
    #[must_use]
    pub const fn command(&self) -> u16 {
        match self {
            Self::Stream(h) => h.command,
            Self::Datagram(h) => h.command,
        }
    }

    /// Sequence (correlation) number.
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        match self {
            Self::Stream(h) => h.sequence,
            Self::Datagram(h) => h.sequence as u32,
        }
    }

    /// User id carried by stream headers.
    #[must_use]
    pub const fn user_id(&self) -> Option<u32> {
        match self {
            Self::Stream(h) => Some(h.user_id),
            Self::Datagram(_) => None,
        }
    }

    /// Payload length implied by the header, or `None` when the declared
    /// total length is shorter than the header itself.
    #[must_use]
    pub fn payload_len(&self) -> Option<usize> {
        usize::try_from(self.total_length())
            .ok()?
            .checked_sub(self.header_size())
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(h) => fmt::Display::fmt(h, f),
            Self::Datagram(h) => fmt::Display::fmt(h, f),
        }
    }
}

impl From<StreamHeader> for Header {
    fn from(header: StreamHeader) -> Self {
        Self::Stream(header)
    }
}

impl From<DatagramHeader> for Header {
    fn from(header: DatagramHeader) -> Self {
        Self::Datagram(header)
    }
}
