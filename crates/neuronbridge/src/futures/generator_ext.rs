use core::future::Future;
use std::time::Instant;

use super::SleepProvider;
use crate::{
    Error, Result,
    generator::{Poll, UidGenerator},
    id::JacsUid,
};

/// Extension trait for asynchronously generating JACS UIDs.
///
/// Instead of blocking the thread while the generator is pending, the returned
/// future awaits the [`SleepProvider`] for the policy's backoff and retries,
/// failing with [`Error::Exhausted`] once the policy deadline passes.
pub trait JacsUidGeneratorAsyncExt {
    /// Returns a future that resolves to the next UID distinct from `last_id`.
    ///
    /// # Errors
    ///
    /// Resolves to [`Error::Exhausted`] if the generator is still pending when
    /// the retry deadline passes.
    fn try_next_id_async<S>(&self, last_id: Option<JacsUid>) -> impl Future<Output = Result<JacsUid>>
    where
        S: SleepProvider;
}

impl<G> JacsUidGeneratorAsyncExt for G
where
    G: UidGenerator,
{
    fn try_next_id_async<S>(&self, last_id: Option<JacsUid>) -> impl Future<Output = Result<JacsUid>>
    where
        S: SleepProvider,
    {
        async move {
            let start = Instant::now();
            let policy = self.policy();
            loop {
                if let Poll::Ready { id } = self.poll_id(last_id) {
                    return Ok(id);
                }
                let elapsed = start.elapsed();
                let Some(pause) = policy.next_sleep(elapsed) else {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(?elapsed, ?last_id, "giving up on JACS UID generation");
                    return Err(Error::Exhausted { elapsed });
                };
                S::sleep_for(pause).await;
            }
        }
    }
}
