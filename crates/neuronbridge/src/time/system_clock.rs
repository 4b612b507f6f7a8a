use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use super::{JACS_EPOCH, TimeSource};

/// A wall-clock time source offset from a fixed epoch.
///
/// Each call reads [`SystemTime::now`], so the value follows NTP and manual
/// clock adjustments, including steps backwards. The generator treats a
/// clock that moved behind its last UID as a retryable stall.
///
/// Readings earlier than the epoch saturate to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemClock {
    epoch: Duration,
}

impl Default for SystemClock {
    /// Constructs a clock aligned to [`JACS_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(JACS_EPOCH)
    }
}

impl SystemClock {
    /// Constructs a clock using `epoch` (a [`Duration`] since 1970-01-01 UTC)
    /// as its zero point.
    ///
    /// # Example
    ///
    /// ```
    /// use neuronbridge::time::{SystemClock, TimeSource, JACS_EPOCH};
    ///
    /// let clock = SystemClock::with_epoch(JACS_EPOCH);
    /// let millis: u64 = clock.current_millis();
    /// assert!(millis > 0);
    /// ```
    #[must_use]
    pub const fn with_epoch(epoch: Duration) -> Self {
        Self { epoch }
    }

    #[must_use]
    pub const fn epoch(&self) -> Duration {
        self.epoch
    }
}

impl TimeSource<u64> for SystemClock {
    fn current_millis(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        u64::try_from(now.saturating_sub(self.epoch).as_millis()).unwrap_or(u64::MAX)
    }
}
