use core::time::Duration;

/// Backoff applied once the sequence for a millisecond is spent.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

/// Overall budget for producing one UID.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Bounds how long a blocking (or async) generation call keeps retrying.
///
/// A pending generator sleeps for [`backoff`](Self::backoff) between attempts.
/// Once [`deadline`](Self::deadline) has elapsed since the call started and
/// the generator is still pending, the call fails with
/// [`Error::Exhausted`](crate::Error::Exhausted) instead of looping forever.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use neuronbridge::generator::RetryPolicy;
///
/// let policy = RetryPolicy::default().with_deadline(Duration::from_secs(2));
/// assert_eq!(policy.backoff, Duration::from_millis(500));
/// assert_eq!(policy.next_sleep(Duration::from_millis(1_800)), Some(Duration::from_millis(200)));
/// assert_eq!(policy.next_sleep(Duration::from_secs(2)), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RetryPolicy {
    /// Pause between attempts while the generator is pending.
    pub backoff: Duration,
    /// Maximum wall time spent on a single UID.
    pub deadline: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BACKOFF, DEFAULT_DEADLINE)
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(backoff: Duration, deadline: Duration) -> Self {
        Self { backoff, deadline }
    }

    #[must_use]
    pub const fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// How long to pause after `elapsed` time spent pending, or `None` if the
    /// deadline has passed. Never sleeps past the deadline.
    #[must_use]
    pub fn next_sleep(&self, elapsed: Duration) -> Option<Duration> {
        let remaining = self.deadline.checked_sub(elapsed)?;
        if remaining.is_zero() {
            return None;
        }
        Some(self.backoff.min(remaining))
    }
}
