//! Derivation of message type names from command enumeration entries.

/// Separator between words of an enumeration entry name.
pub const WORD_SEPARATOR: char = '_';

/// Derives the message type name bound to an enumeration entry.
///
/// The entry is split on [`WORD_SEPARATOR`] and each fragment is title cased:
/// a letter is upper-cased when it starts the fragment or follows a
/// non-letter, and lower-cased otherwise. Fragments are joined without a
/// separator.
///
/// ```
/// assert_eq!(schema::message_type_name("load_res_req"), "LoadResReq");
/// assert_eq!(schema::message_type_name("GAME_PING_PKG"), "GamePingPkg");
/// ```
#[must_use]
pub fn message_type_name(entry: &str) -> String {
    let mut out = String::with_capacity(entry.len());
    for fragment in entry.split(WORD_SEPARATOR) {
        let mut after_letter = false;
        for ch in fragment.chars() {
            if ch.is_alphabetic() {
                if after_letter {
                    out.extend(ch.to_lowercase());
                } else {
                    out.extend(ch.to_uppercase());
                }
                after_letter = true;
            } else {
                out.push(ch);
                after_letter = false;
            }
        }
    }
    out
}
