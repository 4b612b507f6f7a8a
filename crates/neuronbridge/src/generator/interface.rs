use core::time::Duration;

use crate::{
    Result,
    generator::{Poll, RetryPolicy},
    id::JacsUid,
};

/// A minimal interface for generating JACS UIDs.
pub trait UidGenerator {
    /// Attempts to generate a UID distinct from `last_id` without blocking.
    fn poll_id(&self, last_id: Option<JacsUid>) -> Poll<JacsUid>;

    /// The retry bounds used by blocking and async generation.
    fn policy(&self) -> RetryPolicy;

    /// Generates the next UID, calling `f` with the pause to take whenever the
    /// generator is pending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`](crate::Error::Exhausted) if the policy
    /// deadline passes while the generator is still pending.
    fn try_next_id_with(&self, last_id: Option<JacsUid>, f: impl FnMut(Duration)) -> Result<JacsUid>;

    /// Generates the next UID, blocking the current thread between attempts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`](crate::Error::Exhausted) if the policy
    /// deadline passes while the generator is still pending.
    fn try_next_id(&self, last_id: Option<JacsUid>) -> Result<JacsUid> {
        self.try_next_id_with(last_id, std::thread::sleep)
    }
}
