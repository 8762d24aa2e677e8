//! Compiled schema directory: command enumerations plus message type names.

use std::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "serde")]
use std::fmt;

use wire::Transport;

use crate::overrides::command_enum_name;
use crate::{CommandEnumeration, CommandTable, MessageCatalog, SchemaError, SchemaResult};

/// The parts of a compiled schema directory the dissector needs.
///
/// With the `serde` feature this deserializes from
///
/// ```json
/// {
///   "enums": { "GameSvrCmd": { "game_ping_pkg": 784 } },
///   "messages": ["GamePingPkg"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchemaDirectory {
    /// Enumerations by name.
    pub enums: BTreeMap<String, EnumEntries>,
    /// Message type names.
    pub messages: BTreeSet<String>,
}

/// Entries of one enumeration in declaration order.
///
/// Serializes as a JSON object; deserialization keeps the document order
/// of its keys, so duplicate values resolve the way they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumEntries(pub Vec<(String, i64)>);

impl EnumEntries {
    /// Value of the first entry named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<i64> {
        self.0
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| *value)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, i64)> for EnumEntries {
    fn from_iter<I: IntoIterator<Item = (N, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, value)| (name.into(), value)).collect())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EnumEntries {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EnumEntries {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> serde::de::Visitor<'de> for EntriesVisitor {
            type Value = EnumEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of enumeration entry names to integer values")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<EnumEntries, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, i64>()? {
                    entries.push((name, value));
                }
                Ok(EnumEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl SchemaDirectory {
    /// Returns the named enumeration.
    pub fn enumeration(&self, name: &str) -> SchemaResult<CommandEnumeration> {
        let entries = self
            .enums
            .get(name)
            .ok_or_else(|| SchemaError::MissingEnumeration {
                name: name.to_owned(),
            })?;
        Ok(CommandEnumeration::new(
            name,
            entries.0.iter().map(|(entry, value)| (entry.as_str(), *value)),
        ))
    }

    /// Builds the message catalog.
    #[must_use]
    pub fn catalog(&self) -> MessageCatalog {
        self.messages.iter().collect()
    }

    /// Builds the command table of a transport.
    ///
    /// Fails if the transport's command enumeration is absent.
    pub fn command_table(&self, transport: Transport) -> SchemaResult<CommandTable> {
        let enumeration = self.enumeration(command_enum_name(transport))?;
        Ok(CommandTable::build(transport, &enumeration, &self.catalog()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecoderRef, MessageKind};

    fn directory() -> SchemaDirectory {
        let mut dir = SchemaDirectory::default();
        dir.enums.insert(
            "ZoneSvrCmd".to_string(),
            [("heart_beat", 0x0101)].into_iter().collect(),
        );
        dir.enums.insert("GameSvrCmd".to_string(), EnumEntries::default());
        dir.messages.insert("HeartBeat".to_string());
        dir.messages.insert("GamePingPkg".to_string());
        dir
    }

    #[test]
    fn stream_table_uses_zone_enumeration() {
        let table = directory().command_table(Transport::Stream).unwrap();
        assert_eq!(
            table.get(0x0101),
            Some(&DecoderRef::Structural(MessageKind::new("HeartBeat")))
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn datagram_table_gets_overrides() {
        let table = directory().command_table(Transport::Datagram).unwrap();
        assert_eq!(
            table.get(0x0310),
            Some(&DecoderRef::Structural(MessageKind::new("GamePingPkg")))
        );
        assert!(matches!(table.get(0x0303), Some(DecoderRef::Unresolved(_))));
    }

    #[test]
    fn duplicate_values_resolve_in_declaration_order() {
        let mut dir = directory();
        dir.enums.insert(
            "ZoneSvrCmd".to_string(),
            [("zz_heart_beat", 0x0101), ("aa_game_ping_pkg", 0x0101)]
                .into_iter()
                .collect(),
        );
        dir.messages.insert("ZzHeartBeat".to_string());
        dir.messages.insert("AaGamePingPkg".to_string());

        let table = dir.command_table(Transport::Stream).unwrap();
        assert_eq!(
            table.get(0x0101),
            Some(&DecoderRef::Structural(MessageKind::new("AaGamePingPkg")))
        );
    }

    #[test]
    fn missing_enumeration() {
        let err = SchemaDirectory::default()
            .command_table(Transport::Stream)
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingEnumeration {
                name: "ZoneSvrCmd".to_string()
            }
        );
    }
}
