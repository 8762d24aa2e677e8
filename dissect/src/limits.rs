//! Configurable limits for the framing engine.

/// Per-connection engine limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DissectLimits {
    /// Largest declared `total_length` a header may carry and still qualify.
    ///
    /// Larger headers are treated as coincidental marker matches.
    pub max_frame_bytes: usize,

    /// Consumed-prefix size at which buffered bytes before the read position
    /// are dropped after a receive.
    pub compact_threshold: usize,
}

impl Default for DissectLimits {
    fn default() -> Self {
        Self {
            // Both layouts can declare at most u32::MAX; no extra bound.
            max_frame_bytes: usize::MAX,
            compact_threshold: 64 * 1024,
        }
    }
}

impl DissectLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_frame_bytes: 4096,
            compact_threshold: 256,
        }
    }

    /// Creates limits with no restrictions. The buffer is never compacted.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_frame_bytes: usize::MAX,
            compact_threshold: usize::MAX,
        }
    }
}
