/// Errors surfaced while pulling from a [`PagedListing`](super::PagedListing).
///
/// Either variant ends the enumeration: entries already yielded stay valid,
/// but the listing is neither retried nor resumed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError<E> {
    /// The listing client failed to fetch a page.
    #[error("listing request failed: {0}")]
    Client(#[source] E),

    /// A page claimed more results but carried no continuation token, so the
    /// next page cannot be requested.
    #[error("truncated listing page carried no continuation token")]
    MissingContinuationToken,
}
