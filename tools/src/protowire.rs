//! Schemaless protobuf wire-format decoder.
//!
//! Stands in for a compiled schema directory's structural decoders: fields
//! are named by number and length-delimited fields are guessed to be text,
//! a nested message, or opaque bytes, in that order.

use cursor::{ByteCursor, ByteOrder, CursorError};
use schema::{Field, MessageKind, StructuralDecoder, StructuralError, StructuredMessage, Value};
use thiserror::Error;

const WIRE_VARINT: u64 = 0;
const WIRE_FIXED64: u64 = 1;
const WIRE_LEN: u64 = 2;
const WIRE_FIXED32: u64 = 5;

/// Errors raised while walking protobuf wire format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireFormatError {
    /// A field body ran past the end of the payload.
    #[error("truncated field: {0}")]
    Truncated(#[from] CursorError),

    /// A varint did not terminate within ten bytes.
    #[error("varint longer than 10 bytes")]
    VarintOverflow,

    /// Field number zero is reserved.
    #[error("field number 0 is invalid")]
    ZeroFieldNumber,

    /// Group or unknown wire type.
    #[error("field {field} has unsupported wire type {wire_type}")]
    UnsupportedWireType {
        /// Field number.
        field: u64,
        /// Wire type from the key.
        wire_type: u64,
    },
}

/// Decodes any payload as an untyped protobuf message.
#[derive(Debug, Clone)]
pub struct WireFormatDecoder {
    max_depth: usize,
}

impl Default for WireFormatDecoder {
    fn default() -> Self {
        Self { max_depth: 8 }
    }
}

impl WireFormatDecoder {
    /// Creates a decoder that guesses nested messages up to `max_depth` deep.
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl StructuralDecoder for WireFormatDecoder {
    fn decode(
        &self,
        kind: &MessageKind,
        payload: &[u8],
    ) -> Result<StructuredMessage, StructuralError> {
        let fields = parse_fields(payload, self.max_depth).map_err(|err| StructuralError {
            kind: kind.clone(),
            reason: err.to_string(),
        })?;
        Ok(StructuredMessage {
            kind: kind.clone(),
            fields,
        })
    }
}

fn parse_fields(payload: &[u8], depth: usize) -> Result<Vec<Field>, WireFormatError> {
    let mut cursor = ByteCursor::with_capacity(payload.len());
    cursor.append(payload);

    let mut fields = Vec::new();
    while cursor.bytes_remaining() > 0 {
        let key = read_varint(&mut cursor)?;
        let number = key >> 3;
        if number == 0 {
            return Err(WireFormatError::ZeroFieldNumber);
        }
        let value = match key & 0x7 {
            WIRE_VARINT => Value::UInt(read_varint(&mut cursor)?),
            WIRE_FIXED64 => {
                let lo = cursor.read_u32(ByteOrder::Little)?;
                let hi = cursor.read_u32(ByteOrder::Little)?;
                Value::UInt((u64::from(hi) << 32) | u64::from(lo))
            }
            WIRE_FIXED32 => Value::UInt(u64::from(cursor.read_u32(ByteOrder::Little)?)),
            WIRE_LEN => {
                let len = usize::try_from(read_varint(&mut cursor)?).unwrap_or(usize::MAX);
                let body = cursor.read_bytes(len)?;
                length_delimited(&body, depth)
            }
            wire_type => {
                return Err(WireFormatError::UnsupportedWireType {
                    field: number,
                    wire_type,
                })
            }
        };
        fields.push(Field {
            name: number.to_string(),
            value,
        });
    }
    Ok(fields)
}

fn length_delimited(body: &[u8], depth: usize) -> Value {
    if let Ok(text) = std::str::from_utf8(body) {
        if !text.is_empty() && text.chars().all(|c| !c.is_control() || c.is_whitespace()) {
            return Value::Text(text.to_owned());
        }
    }
    if depth > 0 && !body.is_empty() {
        if let Ok(fields) = parse_fields(body, depth - 1) {
            return Value::Message(StructuredMessage {
                kind: MessageKind::new(""),
                fields,
            });
        }
    }
    Value::Bytes(body.to_vec())
}

fn read_varint(cursor: &mut ByteCursor) -> Result<u64, WireFormatError> {
    let mut result = 0u64;
    for shift in (0..70).step_by(7) {
        let byte = cursor.read_u8()?;
        result |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(WireFormatError::VarintOverflow)
}
