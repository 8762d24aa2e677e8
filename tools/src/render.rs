//! JSON and text rendering of dissected frames.

use std::fmt::Write as _;

use dissect::{FrameBody, FrameEvent, RawFrame};
use schema::{table_fingerprint, CommandTable, DecoderRef, RawDecoder, StructuredMessage, Value};
use serde::Serialize;
use serde_json::{json, Map};
use wire::{Header, Transport};

/// One frame in interchange form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    /// Transport the frame arrived on.
    pub transport: Transport,
    /// Command id as `0xNNNN`.
    pub command: String,
    /// Sequence number.
    pub sequence: u32,
    /// Full header.
    pub header: Header,
    /// Which path decoded the payload.
    pub decoded_by: DecodedBy,
    /// Message type name for structural frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Decoded payload, or the raw payload as text or hex.
    pub body: serde_json::Value,
    /// Decoder's reason for undecodable payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Dispatch path of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodedBy {
    /// Structural decoder.
    Structural,
    /// Raw player-action decoder.
    UserAction,
    /// Raw server-tick decoder.
    ServerTick,
    /// A decoder was bound but rejected the payload.
    Undecodable,
    /// No decoder bound.
    Unrecognized,
}

impl From<&FrameEvent> for FrameRecord {
    fn from(event: &FrameEvent) -> Self {
        let (decoded_by, kind, body, error) = match &event.body {
            FrameBody::Message(message) => (
                DecodedBy::Structural,
                Some(message.kind.name().to_owned()),
                message_json(message),
                None,
            ),
            FrameBody::Raw(RawFrame::UserAction(action)) => (
                DecodedBy::UserAction,
                None,
                json!({
                    "kind": action.kind,
                    "action_id": action.action_id,
                    "body": bytes_text(&action.body),
                }),
                None,
            ),
            FrameBody::Raw(RawFrame::ServerTick(tick)) => (
                DecodedBy::ServerTick,
                None,
                json!({
                    "tick": tick.tick,
                    "body": bytes_text(&tick.body),
                }),
                None,
            ),
            FrameBody::Undecodable { reason, payload } => (
                DecodedBy::Undecodable,
                None,
                json!(bytes_text(payload)),
                Some(reason.clone()),
            ),
            FrameBody::Unrecognized(payload) => (
                DecodedBy::Unrecognized,
                None,
                json!(bytes_text(payload)),
                None,
            ),
        };
        Self {
            transport: event.transport(),
            command: format!("{:#06x}", event.header.command()),
            sequence: event.header.sequence(),
            header: event.header,
            decoded_by,
            kind,
            body,
            error,
        }
    }
}

/// Renders bytes as UTF-8 text, or lowercase hex when they are not valid
/// UTF-8 or contain a NUL.
#[must_use]
pub fn bytes_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) if !text.contains('\0') => text.to_owned(),
        _ => hex::encode(bytes),
    }
}

/// Renders a structured message as a JSON object keyed by field name.
///
/// Repeated field names collect into an array in wire order.
#[must_use]
pub fn message_json(message: &StructuredMessage) -> serde_json::Value {
    let mut object = Map::new();
    for field in &message.fields {
        let value = value_json(&field.value);
        match object.get_mut(&field.name) {
            Some(serde_json::Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = serde_json::Value::Array(vec![first, value]);
            }
            None => {
                object.insert(field.name.clone(), value);
            }
        }
    }
    serde_json::Value::Object(object)
}

fn value_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(v) => json!(v),
        Value::Int(v) => json!(v),
        Value::UInt(v) => json!(v),
        Value::Float(v) => json!(v),
        Value::Text(v) => json!(v),
        Value::Bytes(v) => json!(bytes_text(v)),
        Value::Message(v) => message_json(v),
        Value::List(values) => values.iter().map(value_json).collect(),
    }
}

/// Renders a frame as one text line: header, decoder, body.
#[must_use]
pub fn format_frame_pretty(record: &FrameRecord) -> String {
    let label = record.kind.as_deref().unwrap_or(match record.decoded_by {
        DecodedBy::Structural => "structural",
        DecodedBy::UserAction => "user_action",
        DecodedBy::ServerTick => "server_tick",
        DecodedBy::Undecodable => "undecodable",
        DecodedBy::Unrecognized => "unrecognized",
    });
    let mut line = format!("{} {label} {}", record.header, record.body);
    if let Some(error) = &record.error {
        let _ = write!(line, " error={error}");
    }
    line
}

/// Renders a command table, one command per line, preceded by its fingerprint.
#[must_use]
pub fn format_table(table: &CommandTable) -> String {
    let mut out = format!(
        "transport: {} commands: {} fingerprint: 0x{:016x}\n",
        table.transport(),
        table.len(),
        table_fingerprint(table)
    );
    for (command, decoder) in table.iter() {
        let target = match decoder {
            DecoderRef::Structural(kind) => format!("structural {kind}"),
            DecoderRef::Raw(RawDecoder::UserAction) => "raw user_action".to_string(),
            DecoderRef::Raw(RawDecoder::ServerTick) => "raw server_tick".to_string(),
            DecoderRef::Unresolved(name) => format!("unresolved {name}"),
        };
        let _ = writeln!(out, "  {command:#06x} {target}");
    }
    out
}
