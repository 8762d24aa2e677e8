//! Command Table: command id to decoder reference.

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};
use wire::Transport;

use crate::overrides::{overrides_for, Override, OverrideTarget, RawDecoder};
use crate::{message_type_name, CommandEnumeration, MessageCatalog, MessageKind};

/// What a command id decodes as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderRef {
    /// Decode the payload as a structural message of this kind.
    Structural(MessageKind),
    /// Decode the payload with a raw sub-frame decoder.
    Raw(RawDecoder),
    /// Pinned by an override whose message type is not in the catalog.
    ///
    /// The command still qualifies; its payload is delivered unrecognized.
    Unresolved(String),
}

/// Immutable `command id -> decoder` map for one transport.
///
/// Built once per transport and shared read-only by every connection of that
/// transport. Keys are unique; presence of a key is what qualifies a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    transport: Transport,
    entries: BTreeMap<u16, DecoderRef>,
}

impl CommandTable {
    /// Builds the table of `transport` from a command enumeration and a
    /// message catalog, then applies the transport's pinned overrides.
    #[must_use]
    pub fn build(
        transport: Transport,
        enumeration: &CommandEnumeration,
        catalog: &MessageCatalog,
    ) -> Self {
        Self::with_overrides(transport, enumeration, catalog, overrides_for(transport))
    }

    /// Builds a table with an explicit override list.
    #[must_use]
    pub fn with_overrides(
        transport: Transport,
        enumeration: &CommandEnumeration,
        catalog: &MessageCatalog,
        overrides: &[Override],
    ) -> Self {
        let mut entries = BTreeMap::new();

        for entry in enumeration.entries() {
            let Ok(command) = u16::try_from(entry.value) else {
                debug!(
                    enumeration = enumeration.name(),
                    entry = %entry.name,
                    value = entry.value,
                    "skipping enumeration entry outside command range"
                );
                continue;
            };
            let type_name = message_type_name(&entry.name);
            match catalog.get(&type_name) {
                Some(kind) => {
                    entries.insert(command, DecoderRef::Structural(kind.clone()));
                }
                None => {
                    trace!(
                        command,
                        type_name = %type_name,
                        "no message type for enumeration entry"
                    );
                }
            }
        }

        for pinned in overrides {
            let decoder = match pinned.target {
                OverrideTarget::Message(name) => match catalog.get(name) {
                    Some(kind) => DecoderRef::Structural(kind.clone()),
                    None => {
                        warn!(
                            %transport,
                            command = pinned.command,
                            type_name = name,
                            "pinned message type missing from catalog"
                        );
                        DecoderRef::Unresolved(name.to_owned())
                    }
                },
                OverrideTarget::Raw(raw) => DecoderRef::Raw(raw),
            };
            entries.insert(pinned.command, decoder);
        }

        debug!(
            %transport,
            enumeration = enumeration.name(),
            commands = entries.len(),
            "built command table"
        );

        Self { transport, entries }
    }

    /// Creates a table directly from entries, without overrides.
    #[must_use]
    pub fn from_entries<I>(transport: Transport, entries: I) -> Self
    where
        I: IntoIterator<Item = (u16, DecoderRef)>,
    {
        Self {
            transport,
            entries: entries.into_iter().collect(),
        }
    }

    /// Transport this table belongs to.
    #[must_use]
    pub const fn transport(&self) -> Transport {
        self.transport
    }

    /// Looks up the decoder of a command.
    #[must_use]
    pub fn get(&self, command: u16) -> Option<&DecoderRef> {
        self.entries.get(&command)
    }

    /// Returns `true` if the command is a key of the table.
    #[must_use]
    pub fn contains(&self, command: u16) -> bool {
        self.entries.contains_key(&command)
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in command order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &DecoderRef)> {
        self.entries.iter().map(|(command, decoder)| (*command, decoder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::{CMD_END, CMD_PING, CMD_PING_REPLY, CMD_SERVER_TICK, CMD_USER_ACTION};

    fn catalog() -> MessageCatalog {
        ["GamePingPkg", "LoadResReq", "GameEndPkg", "HeartBeat"]
            .into_iter()
            .collect()
    }

    #[test]
    fn derives_bindings_from_enumeration() {
        let e = CommandEnumeration::new(
            "ZoneSvrCmd",
            [("load_res_req", 0x0101), ("heart_beat", 0x0102), ("no_such_msg", 0x0103)],
        );
        let table = CommandTable::build(Transport::Stream, &e, &catalog());
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(0x0101),
            Some(&DecoderRef::Structural(MessageKind::new("LoadResReq")))
        );
        assert!(table.contains(0x0102));
        assert!(!table.contains(0x0103));
    }

    #[test]
    fn skips_values_outside_command_range() {
        let e = CommandEnumeration::new(
            "ZoneSvrCmd",
            [("load_res_req", -1), ("heart_beat", 0x1_0000)],
        );
        let table = CommandTable::build(Transport::Stream, &e, &catalog());
        assert!(table.is_empty());
    }

    #[test]
    fn datagram_overrides_replace_derived_bindings() {
        // Enumeration binds 0x0310 to LoadResReq; the override pins it to GamePingPkg.
        let e = CommandEnumeration::new("GameSvrCmd", [("load_res_req", i64::from(CMD_PING))]);
        let table = CommandTable::build(Transport::Datagram, &e, &catalog());
        assert_eq!(
            table.get(CMD_PING),
            Some(&DecoderRef::Structural(MessageKind::new("GamePingPkg")))
        );
        assert_eq!(
            table.get(CMD_PING_REPLY),
            Some(&DecoderRef::Structural(MessageKind::new("GamePingPkg")))
        );
        assert_eq!(
            table.get(CMD_END),
            Some(&DecoderRef::Structural(MessageKind::new("GameEndPkg")))
        );
        assert_eq!(
            table.get(CMD_USER_ACTION),
            Some(&DecoderRef::Raw(RawDecoder::UserAction))
        );
        assert_eq!(
            table.get(CMD_SERVER_TICK),
            Some(&DecoderRef::Raw(RawDecoder::ServerTick))
        );
    }

    #[test]
    fn missing_override_message_is_unresolved_but_present() {
        let table = CommandTable::build(
            Transport::Datagram,
            &CommandEnumeration::default(),
            &catalog(),
        );
        assert_eq!(
            table.get(0x0305),
            Some(&DecoderRef::Unresolved("GameStartPkg".to_string()))
        );
    }

    #[test]
    fn stream_has_no_overrides() {
        let table =
            CommandTable::build(Transport::Stream, &CommandEnumeration::default(), &catalog());
        assert!(table.is_empty());
        assert_eq!(table.transport(), Transport::Stream);
    }

    #[test]
    fn iter_in_command_order() {
        let table = CommandTable::from_entries(
            Transport::Datagram,
            [
                (0x0307, DecoderRef::Raw(RawDecoder::ServerTick)),
                (0x0306, DecoderRef::Raw(RawDecoder::UserAction)),
            ],
        );
        let ids: Vec<u16> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, [0x0306, 0x0307]);
    }
}
