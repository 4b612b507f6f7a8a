use core::{cell::Cell, cmp::Ordering, time::Duration};
use std::time::Instant;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, Result,
    generator::{Poll, RetryPolicy, UidGenerator},
    host::{HostSource, ResolvedHost},
    id::JacsUid,
    time::{SystemClock, TimeSource},
};

/// Deployment context used when the caller does not pick one.
pub const DEFAULT_DEPLOYMENT_CONTEXT: u8 = 2;

/// A JACS UID generator for single-threaded use.
///
/// Each UID packs the current millisecond, a sequence index, the deployment
/// context and the host component. Within one millisecond the sequence climbs
/// from the last issued UID (or the caller's `last_id`, when it shares this
/// generator's context and host), so consecutive UIDs strictly increase. Once
/// all 1024 slots of a millisecond are spent the generator is pending until
/// the clock moves on.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Never returns the caller's `last_id`
/// - ✅ Bounded retries via [`RetryPolicy`]
pub struct JacsUidGenerator<T>
where
    T: TimeSource<u64>,
{
    state: Cell<Option<JacsUid>>,
    origin: JacsUid,
    time: T,
    policy: RetryPolicy,
}

impl<T> JacsUidGenerator<T>
where
    T: TimeSource<u64>,
{
    /// Creates a generator for `deployment_context`, reading `time` on every
    /// attempt and embedding the component from `host`.
    ///
    /// The host component is read once here and reused for every UID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDeploymentContext`] if the context does not fit
    /// in four bits.
    ///
    /// # Example
    ///
    /// ```
    /// use neuronbridge::{generator::JacsUidGenerator, host::FixedHost, time::SystemClock};
    ///
    /// let generator = JacsUidGenerator::new(2, SystemClock::default(), FixedHost(42)).unwrap();
    /// let first = generator.try_next_id(None).unwrap();
    /// let second = generator.try_next_id(Some(first)).unwrap();
    /// assert!(second > first);
    /// assert_eq!(second.host(), 42);
    /// ```
    pub fn new(deployment_context: u8, time: T, host: impl HostSource) -> Result<Self> {
        if deployment_context > JacsUid::max_deployment_context() {
            return Err(Error::InvalidDeploymentContext {
                context: deployment_context,
                max: JacsUid::max_deployment_context(),
            });
        }
        Ok(Self {
            state: Cell::new(None),
            origin: JacsUid::from_components(0, 0, deployment_context, host.host_component()),
            time,
            policy: RetryPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub const fn deployment_context(&self) -> u8 {
        self.origin.deployment_context()
    }

    pub const fn host(&self) -> u8 {
        self.origin.host()
    }

    /// The most recent UID this generator handed out.
    pub fn last_issued(&self) -> Option<JacsUid> {
        self.state.get()
    }

    /// Attempts to generate a UID distinct from `last_id`.
    ///
    /// A same-origin `last_id` at or before the current millisecond is
    /// continued from, so the result is greater than it. One stamped after
    /// the current millisecond cannot collide with a UID issued now and is
    /// ignored.
    ///
    /// Returns [`Poll::Pending`] when the current millisecond has no sequence
    /// slot left, or when the clock reads earlier than this generator's own
    /// last UID.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self, last_id: Option<JacsUid>) -> Poll<JacsUid> {
        let now = self.time.current_millis();
        debug_assert!(now <= JacsUid::max_timestamp(), "timestamp overflow");

        let Some(reference) = self.reference(last_id, now) else {
            return self.issue(self.origin.rollover_to_timestamp(now));
        };
        let current_ts = reference.timestamp();

        match now.cmp(&current_ts) {
            Ordering::Equal => {
                if reference.has_sequence_room() {
                    self.issue(reference.increment_sequence())
                } else {
                    Poll::Pending { yield_for: 1 }
                }
            }
            Ordering::Greater => self.issue(reference.rollover_to_timestamp(now)),
            Ordering::Less => Self::cold_clock_behind(now, current_ts),
        }
    }

    /// Generates the next UID, calling `f` with the pause to take whenever the
    /// generator is pending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`] if the policy deadline passes while the
    /// generator is still pending.
    pub fn try_next_id_with(
        &self,
        last_id: Option<JacsUid>,
        mut f: impl FnMut(Duration),
    ) -> Result<JacsUid> {
        let start = Instant::now();
        loop {
            let _yield_for = match self.poll_id(last_id) {
                Poll::Ready { id } => break Ok(id),
                Poll::Pending { yield_for } => yield_for,
            };
            let elapsed = start.elapsed();
            let Some(pause) = self.policy.next_sleep(elapsed) else {
                #[cfg(feature = "tracing")]
                tracing::warn!(?elapsed, ?last_id, "giving up on JACS UID generation");
                break Err(Error::Exhausted { elapsed });
            };
            #[cfg(feature = "tracing")]
            tracing::debug!(yield_for = _yield_for, ?pause, "generator pending, backing off");
            f(pause);
        }
    }

    /// Generates the next UID, blocking the current thread between attempts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`] if the policy deadline passes while the
    /// generator is still pending.
    pub fn try_next_id(&self, last_id: Option<JacsUid>) -> Result<JacsUid> {
        self.try_next_id_with(last_id, std::thread::sleep)
    }

    fn reference(&self, last_id: Option<JacsUid>, now: u64) -> Option<JacsUid> {
        let caller = last_id.filter(|id| id.same_origin(&self.origin) && id.timestamp() <= now);
        self.state.get().max(caller)
    }

    fn issue(&self, id: JacsUid) -> Poll<JacsUid> {
        self.state.set(Some(id));
        Poll::Ready { id }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: u64, current_ts: u64) -> Poll<JacsUid> {
        Poll::Pending {
            yield_for: current_ts - now,
        }
    }
}

impl<T> UidGenerator for JacsUidGenerator<T>
where
    T: TimeSource<u64>,
{
    fn poll_id(&self, last_id: Option<JacsUid>) -> Poll<JacsUid> {
        self.poll_id(last_id)
    }

    fn policy(&self) -> RetryPolicy {
        self.policy
    }

    fn try_next_id_with(&self, last_id: Option<JacsUid>, f: impl FnMut(Duration)) -> Result<JacsUid> {
        self.try_next_id_with(last_id, f)
    }

    fn try_next_id(&self, last_id: Option<JacsUid>) -> Result<JacsUid> {
        self.try_next_id(last_id)
    }
}

/// Generates one JACS UID for `deployment_context` that differs from
/// `last_id`, using the system clock and this machine's resolved host
/// component.
///
/// Every call resolves the host and starts a fresh generator. Callers minting
/// many UIDs should keep a [`JacsUidGenerator`] instead.
///
/// # Errors
///
/// Returns [`Error::InvalidDeploymentContext`] for a context above 15, or
/// [`Error::Exhausted`] if the default [`RetryPolicy`] deadline passes.
///
/// # Example
///
/// ```
/// use neuronbridge::generator::generate;
///
/// let uid = generate(2, None).unwrap();
/// let next = generate(2, Some(uid)).unwrap();
/// assert_ne!(uid, next);
/// ```
pub fn generate(deployment_context: u8, last_id: Option<JacsUid>) -> Result<JacsUid> {
    JacsUidGenerator::new(
        deployment_context,
        SystemClock::default(),
        ResolvedHost::resolve(),
    )?
    .try_next_id(last_id)
}
