//! Structured messages and the structural-decode capability.

use thiserror::Error;

use crate::MessageKind;

/// A message decoded from a payload by a [`StructuralDecoder`].
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredMessage {
    /// Kind the payload was decoded as.
    pub kind: MessageKind,
    /// Fields in wire order.
    pub fields: Vec<Field>,
}

impl StructuredMessage {
    /// Creates a message with no fields.
    #[must_use]
    pub const fn new(kind: MessageKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value,
        });
        self
    }

    /// Returns the first field with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }
}

/// A named field of a structured message.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name as known to the decoder.
    pub name: String,
    /// Field value.
    pub value: Value,
}

/// A field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Text(String),
    /// Opaque bytes.
    Bytes(Vec<u8>),
    /// Nested message.
    Message(StructuredMessage),
    /// Repeated values.
    List(Vec<Value>),
}

/// Error returned when a payload does not decode as the requested kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("payload does not decode as {kind}: {reason}")]
pub struct StructuralError {
    /// Kind the payload was decoded as.
    pub kind: MessageKind,
    /// Decoder-specific reason.
    pub reason: String,
}

/// Turns raw payload bytes plus a known message kind into a structured message.
///
/// Implemented outside this workspace by whatever compiled the schema
/// directory. Implementations are shared read-only between connections.
pub trait StructuralDecoder: Send + Sync {
    /// Decodes `payload` as a message of `kind`.
    fn decode(
        &self,
        kind: &MessageKind,
        payload: &[u8],
    ) -> Result<StructuredMessage, StructuralError>;
}
