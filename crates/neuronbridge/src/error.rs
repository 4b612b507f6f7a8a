use core::time::Duration;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that UID generation and parsing can emit.
///
/// Listing failures are reported separately through
/// [`ListingError`](crate::listing::ListingError), since they carry the
/// client's own error type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The deployment context does not fit in the 4-bit field of a
    /// [`JacsUid`](crate::id::JacsUid).
    #[error("deployment context {context} exceeds the maximum of {max}")]
    InvalidDeploymentContext {
        /// The rejected context.
        context: u8,
        /// The largest context the layout can hold.
        max: u8,
    },

    /// No identifier distinct from the last one could be produced before the
    /// retry deadline passed.
    ///
    /// This only happens when the clock stops advancing (or runs backwards
    /// past the last issued UID) for longer than
    /// [`RetryPolicy::deadline`](crate::generator::RetryPolicy::deadline).
    #[error("could not generate a JACS UID within {elapsed:?}")]
    Exhausted {
        /// Time spent retrying before giving up.
        elapsed: Duration,
    },

    /// A textual UID was not a valid decimal `u64`.
    #[error("invalid JACS UID {input:?}")]
    ParseUid {
        /// The rejected input.
        input: String,
    },
}
