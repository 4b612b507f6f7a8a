/// Page size requested by [`PagedListing`](super::PagedListing).
pub const MAX_KEYS: usize = 1000;

/// Parameters of a single list request.
///
/// `continuation_token` is managed by [`PagedListing`](super::PagedListing);
/// callers only set the base parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListRequest {
    pub bucket: String,
    pub prefix: Option<String>,
    pub delimiter: Option<String>,
    pub continuation_token: Option<String>,
    pub max_keys: usize,
}

impl ListRequest {
    /// A request for every key in `bucket`, [`MAX_KEYS`] at a time.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: None,
            delimiter: None,
            continuation_token: None,
            max_keys: MAX_KEYS,
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    #[must_use]
    pub fn with_continuation_token(mut self, token: impl Into<String>) -> Self {
        self.continuation_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys;
        self
    }
}

/// One page of a listing response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingPage<E> {
    pub entries: Vec<E>,
    /// Key prefixes rolled up by the request's delimiter.
    pub common_prefixes: Vec<String>,
    /// True when more pages remain.
    pub truncated: bool,
    /// Cursor for the next page; present whenever `truncated` is.
    pub next_token: Option<String>,
}

impl<E> ListingPage<E> {
    /// The final page of a listing.
    pub fn last(entries: Vec<E>) -> Self {
        Self {
            entries,
            common_prefixes: Vec::new(),
            truncated: false,
            next_token: None,
        }
    }

    /// A page followed by more, resumable at `next_token`.
    pub fn truncated(entries: Vec<E>, next_token: impl Into<String>) -> Self {
        Self {
            entries,
            common_prefixes: Vec::new(),
            truncated: true,
            next_token: Some(next_token.into()),
        }
    }

    #[must_use]
    pub fn with_common_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.common_prefixes = prefixes;
        self
    }
}

/// A remote paged listing API, e.g. an object store's `ListObjectsV2`.
///
/// Each call performs one blocking round trip.
pub trait ListingClient {
    /// A listed record.
    type Entry;
    /// Transport or service failure.
    type Error;

    /// Fetches the page described by `request`.
    ///
    /// # Errors
    ///
    /// Returns the client's error if the page cannot be fetched.
    fn list(&self, request: &ListRequest) -> Result<ListingPage<Self::Entry>, Self::Error>;
}

impl<C> ListingClient for &C
where
    C: ListingClient + ?Sized,
{
    type Entry = C::Entry;
    type Error = C::Error;

    fn list(&self, request: &ListRequest) -> Result<ListingPage<Self::Entry>, Self::Error> {
        (**self).list(request)
    }
}
