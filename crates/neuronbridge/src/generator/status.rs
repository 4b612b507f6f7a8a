/// The outcome of a single non-blocking generation attempt.
///
/// - [`Poll::Ready`] carries a freshly generated ID.
/// - [`Poll::Pending`] means no ID distinct from the last one exists yet: the
///   sequence for the current millisecond is spent, or the clock is behind the
///   last issued ID. Retry once `yield_for` milliseconds have passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll<ID> {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: ID,
    },
    /// No ID could be generated at the current clock reading.
    Pending {
        /// Milliseconds until the clock may have advanced far enough.
        yield_for: u64,
    },
}

impl<ID> Poll<ID> {
    /// Returns the ID if one is ready.
    pub fn ready(self) -> Option<ID> {
        match self {
            Self::Ready { id } => Some(id),
            Self::Pending { .. } => None,
        }
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}
