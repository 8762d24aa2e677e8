//! Transport-specific command bindings pinned by id.
//!
//! Low-level control commands of the datagram transport are not named
//! consistently in its command enumeration, so their decoders are pinned
//! explicitly. Pinned bindings replace any binding derived from the
//! enumeration for the same id.

use wire::Transport;

/// Keep-alive ping.
pub const CMD_PING: u16 = 0x0310;
/// Keep-alive ping reply.
pub const CMD_PING_REPLY: u16 = 0x0311;
/// Resource-load request.
pub const CMD_LOAD_RES_REQ: u16 = 0x0303;
/// Resource-load response.
pub const CMD_LOAD_RES_RSP: u16 = 0x0304;
/// Session start.
pub const CMD_START: u16 = 0x0305;
/// Player action sub-frame (raw layout).
pub const CMD_USER_ACTION: u16 = 0x0306;
/// Server tick sub-frame (raw layout).
pub const CMD_SERVER_TICK: u16 = 0x0307;
/// Session end.
pub const CMD_END: u16 = 0x0308;
/// Duplicated session-end variant.
pub const CMD_END_DUPLICATE: u16 = 0x0309;
/// Object-hash exchange request.
pub const CMD_OBJ_HASH_REQ: u16 = 0x0312;
/// Object-hash exchange response.
pub const CMD_OBJ_HASH_RSP: u16 = 0x0313;

/// Bespoke, non-schema decoders for specific commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawDecoder {
    /// Player action: kind byte, action id, action body.
    UserAction,
    /// Server tick: tick counter, tick body.
    ServerTick,
}

/// What a pinned command decodes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideTarget {
    /// A structural message type, looked up by name in the catalog.
    Message(&'static str),
    /// A raw sub-frame decoder.
    Raw(RawDecoder),
}

/// A command binding pinned by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Override {
    /// Command id.
    pub command: u16,
    /// Binding target.
    pub target: OverrideTarget,
}

impl Override {
    const fn message(command: u16, name: &'static str) -> Self {
        Self {
            command,
            target: OverrideTarget::Message(name),
        }
    }

    const fn raw(command: u16, decoder: RawDecoder) -> Self {
        Self {
            command,
            target: OverrideTarget::Raw(decoder),
        }
    }
}

/// Pinned bindings of the datagram transport.
pub const DATAGRAM_OVERRIDES: &[Override] = &[
    Override::message(CMD_PING, "GamePingPkg"),
    Override::message(CMD_PING_REPLY, "GamePingPkg"),
    Override::message(CMD_LOAD_RES_REQ, "GameLoadResReq"),
    Override::message(CMD_LOAD_RES_RSP, "GameLoadResRsp"),
    Override::message(CMD_START, "GameStartPkg"),
    Override::message(CMD_OBJ_HASH_REQ, "GameObjHashCodeReq"),
    Override::message(CMD_OBJ_HASH_RSP, "GameObjHashCodeRsp"),
    Override::message(CMD_END, "GameEndPkg"),
    Override::message(CMD_END_DUPLICATE, "GameEndPkg"),
    Override::raw(CMD_USER_ACTION, RawDecoder::UserAction),
    Override::raw(CMD_SERVER_TICK, RawDecoder::ServerTick),
];

/// Pinned bindings of the stream transport (none).
pub const STREAM_OVERRIDES: &[Override] = &[];

/// Returns the pinned bindings of a transport.
#[must_use]
pub const fn overrides_for(transport: Transport) -> &'static [Override] {
    match transport {
        Transport::Stream => STREAM_OVERRIDES,
        Transport::Datagram => DATAGRAM_OVERRIDES,
    }
}

/// Name of the command enumeration a transport's table is derived from.
#[must_use]
pub const fn command_enum_name(transport: Transport) -> &'static str {
    match transport {
        Transport::Stream => "ZoneSvrCmd",
        Transport::Datagram => "GameSvrCmd",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn datagram_override_ids_are_unique() {
        let ids: HashSet<u16> = DATAGRAM_OVERRIDES.iter().map(|o| o.command).collect();
        assert_eq!(ids.len(), DATAGRAM_OVERRIDES.len());
    }

    #[test]
    fn raw_decoders_pinned_on_datagram_only() {
        let raw: Vec<u16> = overrides_for(Transport::Datagram)
            .iter()
            .filter(|o| matches!(o.target, OverrideTarget::Raw(_)))
            .map(|o| o.command)
            .collect();
        assert_eq!(raw, [CMD_USER_ACTION, CMD_SERVER_TICK]);
        assert!(overrides_for(Transport::Stream).is_empty());
    }

    #[test]
    fn enumeration_names() {
        assert_eq!(command_enum_name(Transport::Stream), "ZoneSvrCmd");
        assert_eq!(command_enum_name(Transport::Datagram), "GameSvrCmd");
    }
}
