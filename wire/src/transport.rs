//! Transport kinds and their header geometry.

use std::fmt;

use crate::datagram::DatagramHeader;
use crate::stream::StreamHeader;
use crate::MARKER;

/// The two transports the protocol is carried over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Transport {
    /// Connection-oriented byte stream with no message boundaries.
    Stream,
    /// Datagram transport, one datagram per read.
    Datagram,
}

impl Transport {
    /// Size of the header fields that follow the marker.
    #[must_use]
    pub const fn field_size(self) -> usize {
        match self {
            Self::Stream => StreamHeader::FIELD_SIZE,
            Self::Datagram => DatagramHeader::FIELD_SIZE,
        }
    }

    /// Full header size including the marker.
    #[must_use]
    pub const fn header_size(self) -> usize {
        MARKER.len() + self.field_size()
    }

    /// Lowercase transport name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Datagram => "datagram",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_sizes_include_marker() {
        assert_eq!(Transport::Stream.header_size(), 26);
        assert_eq!(Transport::Datagram.header_size(), 14);
    }

    #[test]
    fn field_sizes() {
        assert_eq!(Transport::Stream.field_size(), 24);
        assert_eq!(Transport::Datagram.field_size(), 12);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Transport::Stream.to_string(), "stream");
        assert_eq!(Transport::Datagram.to_string(), "datagram");
    }
}
