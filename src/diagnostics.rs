//! Link diagnostics.
//!
//! Plain counters accumulated by the frame assembler, decoder, and
//! scheduler. None of these conditions is fatal — a corrupt frame is
//! dropped and the entity is re-read on its next poll cycle — but the
//! counts make a flaky bus visible from the host side.

/// Counters for one bus link, since driver construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Raw bytes drained from the bus.
    pub bytes_received: u64,
    /// Frames that passed checksum validation and were dispatched.
    pub frames_decoded: u32,
    /// Outbound read requests transmitted.
    pub requests_sent: u32,
    /// Frames dropped for a checksum mismatch.
    pub checksum_failures: u32,
    /// Frames dropped because they were too short for their type.
    pub short_frames: u32,
    /// Frames with an unrecognised message-type byte.
    pub unknown_types: u32,
    /// Partial frames abandoned on inter-byte timeout.
    pub timeout_abandons: u32,
    /// Frames abandoned because the declared length exceeded the
    /// receive buffer.
    pub overflow_abandons: u32,
    /// Poll requests dropped because the request queue was full.
    pub queue_drops: u32,
}

impl LinkStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total frames dropped for any integrity reason.
    pub fn frames_dropped(&self) -> u32 {
        self.checksum_failures
            .saturating_add(self.short_frames)
            .saturating_add(self.timeout_abandons)
            .saturating_add(self.overflow_abandons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_total_sums_categories() {
        let stats = LinkStats {
            checksum_failures: 2,
            short_frames: 1,
            timeout_abandons: 3,
            overflow_abandons: 1,
            ..LinkStats::default()
        };
        assert_eq!(stats.frames_dropped(), 7);
    }

    #[test]
    fn dropped_total_saturates() {
        let stats = LinkStats {
            checksum_failures: u32::MAX,
            short_frames: 10,
            ..LinkStats::default()
        };
        assert_eq!(stats.frames_dropped(), u32::MAX);
    }
}
