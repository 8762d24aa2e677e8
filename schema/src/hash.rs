//! Deterministic Command Table hashing.

use blake3::Hasher;

use crate::{CommandTable, DecoderRef, RawDecoder};

/// Computes a deterministic fingerprint of a command table.
///
/// Two tables built from the same schema directory for the same transport
/// have the same fingerprint. Useful for checking that every connection of a
/// capture was dissected against the same table.
#[must_use]
pub fn table_fingerprint(table: &CommandTable) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(table.transport().as_str().as_bytes());
    write_u32(&mut hasher, table.len() as u32);

    for (command, decoder) in table.iter() {
        write_u16(&mut hasher, command);
        write_decoder(&mut hasher, decoder);
    }

    let hash = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}

fn write_decoder(hasher: &mut Hasher, decoder: &DecoderRef) {
    match decoder {
        DecoderRef::Structural(kind) => {
            write_u8(hasher, 0);
            write_str(hasher, kind.name());
        }
        DecoderRef::Raw(raw) => {
            write_u8(hasher, 1);
            write_u8(
                hasher,
                match raw {
                    RawDecoder::UserAction => 0,
                    RawDecoder::ServerTick => 1,
                },
            );
        }
        DecoderRef::Unresolved(name) => {
            write_u8(hasher, 2);
            write_str(hasher, name);
        }
    }
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u16(hasher: &mut Hasher, value: u16) {
    hasher.update(&value.to_le_bytes());
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}
