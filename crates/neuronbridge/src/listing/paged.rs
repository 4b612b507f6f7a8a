use core::{iter::FusedIterator, mem};

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{ListRequest, ListingClient, ListingError, MAX_KEYS};

enum Cursor {
    Start,
    Next(String),
    MissingToken,
    Done,
}

/// A lazy, single-pass iterator over every entry of a paged listing.
///
/// Nothing is requested until the first call to [`next`](Iterator::next).
/// Entries of a page are yielded in the order received, and the next page is
/// only requested once the current one is drained, so at most one request is
/// ever in flight. The iterator ends cleanly after a page whose truncation
/// flag is unset.
///
/// A failed request is yielded as an error, after which the iterator is
/// exhausted: the enumeration is neither retried nor resumed. Dropping the
/// iterator early issues no further requests.
///
/// # Example
///
/// ```
/// use neuronbridge::listing::{ListRequest, MemoryBucket, PagedListing};
///
/// let mut bucket = MemoryBucket::new();
/// for key in ["a.png", "b.png", "c.png"] {
///     bucket.insert("janelia-flylight-color-depth", key, 1_024);
/// }
///
/// let request = ListRequest::new("janelia-flylight-color-depth");
/// let listing = PagedListing::new(&bucket, request).with_page_size(2);
/// let keys: Vec<_> = listing.map(|entry| entry.unwrap().key).collect();
/// assert_eq!(keys, ["a.png", "b.png", "c.png"]);
/// ```
pub struct PagedListing<C>
where
    C: ListingClient,
{
    client: C,
    request: ListRequest,
    buffer: std::vec::IntoIter<C::Entry>,
    common_prefixes: Vec<String>,
    cursor: Cursor,
    requests: usize,
}

impl<C> PagedListing<C>
where
    C: ListingClient,
{
    /// Prepares a listing of `request`'s bucket, prefix and delimiter with a
    /// page size of [`MAX_KEYS`]. Any continuation token on `request` is
    /// ignored.
    pub fn new(client: C, mut request: ListRequest) -> Self {
        request.continuation_token = None;
        request.max_keys = MAX_KEYS;
        Self {
            client,
            request,
            buffer: Vec::new().into_iter(),
            common_prefixes: Vec::new(),
            cursor: Cursor::Start,
            requests: 0,
        }
    }

    /// Overrides the page size.
    #[must_use]
    pub fn with_page_size(mut self, max_keys: usize) -> Self {
        self.request.max_keys = max_keys;
        self
    }

    /// Number of page requests issued so far.
    pub const fn requests(&self) -> usize {
        self.requests
    }

    /// Common prefixes reported by the pages fetched so far.
    pub fn common_prefixes(&self) -> &[String] {
        &self.common_prefixes
    }

    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(bucket = %self.request.bucket, page = self.requests)))]
    fn fetch(&mut self, token: Option<String>) -> Result<(), ListingError<C::Error>> {
        self.request.continuation_token = token;
        self.requests += 1;
        let page = self
            .client
            .list(&self.request)
            .map_err(ListingError::Client)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            entries = page.entries.len(),
            prefixes = page.common_prefixes.len(),
            truncated = page.truncated,
            "fetched listing page"
        );

        self.common_prefixes.extend(page.common_prefixes);
        self.cursor = match (page.truncated, page.next_token) {
            (false, _) => Cursor::Done,
            (true, Some(token)) => Cursor::Next(token),
            (true, None) => Cursor::MissingToken,
        };
        self.buffer = page.entries.into_iter();
        Ok(())
    }
}

impl<C> Iterator for PagedListing<C>
where
    C: ListingClient,
{
    type Item = Result<C::Entry, ListingError<C::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.buffer.next() {
                return Some(Ok(entry));
            }
            let token = match mem::replace(&mut self.cursor, Cursor::Done) {
                Cursor::Done => return None,
                Cursor::MissingToken => return Some(Err(ListingError::MissingContinuationToken)),
                Cursor::Start => None,
                Cursor::Next(token) => Some(token),
            };
            if let Err(e) = self.fetch(token) {
                return Some(Err(e));
            }
        }
    }
}

impl<C> FusedIterator for PagedListing<C> where C: ListingClient {}

/// Lists every entry under `request`, one page at a time.
pub fn list_all<C>(client: C, request: ListRequest) -> PagedListing<C>
where
    C: ListingClient,
{
    PagedListing::new(client, request)
}

/// Pages through a delimited listing and returns the rolled-up prefixes
/// ("folders") in the order the pages reported them.
///
/// # Errors
///
/// Returns the first [`ListingError`] hit while paging.
pub fn common_prefixes<C>(
    client: C,
    request: ListRequest,
) -> Result<Vec<String>, ListingError<C::Error>>
where
    C: ListingClient,
{
    let mut listing = PagedListing::new(client, request);
    for entry in listing.by_ref() {
        entry?;
    }
    Ok(listing.common_prefixes)
}
