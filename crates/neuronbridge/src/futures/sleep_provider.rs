use core::{future::Future, time::Duration};

/// The pause a pending async UID generation awaits between attempts.
///
/// Implement this to run [`try_next_id_async`] on a runtime other than
/// tokio.
///
/// [`try_next_id_async`]: super::JacsUidGeneratorAsyncExt::try_next_id_async
pub trait SleepProvider {
    type Sleep: Future<Output = ()> + Send;

    /// Returns a future that completes once `pause` has elapsed.
    fn sleep_for(pause: Duration) -> Self::Sleep;
}
