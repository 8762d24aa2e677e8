//! Reusable scratch buffer for raw sub-frame decoding.

use cursor::ByteCursor;

/// Connection-owned scratch cursor, reset before each use.
#[derive(Debug, Default)]
pub struct DissectScratch {
    raw: ByteCursor,
}

impl DissectScratch {
    /// Creates a new scratch buffer with no pre-allocated capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the scratch cursor and loads `payload` into it.
    pub(crate) fn load(&mut self, payload: &[u8]) -> &mut ByteCursor {
        self.raw.clear();
        self.raw.append(payload);
        &mut self.raw
    }
}
