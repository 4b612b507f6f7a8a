use core::ops::Bound;
use std::collections::BTreeMap;

use super::{ListRequest, ListingClient, ListingPage};

/// A listed object: its key and size in bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectEntry {
    pub key: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryBucketError {
    #[error("no such bucket: {bucket}")]
    NoSuchBucket { bucket: String },
}

enum Item<'a> {
    Object(&'a str, u64),
    Prefix(String),
}

impl Item<'_> {
    fn marker(&self) -> &str {
        match self {
            Self::Object(key, _) => key,
            Self::Prefix(prefix) => prefix,
        }
    }
}

/// An in-memory object store with object-store listing semantics.
///
/// - keys are listed in lexicographic order
/// - `prefix` restricts the listing to keys starting with it
/// - `delimiter` rolls keys containing it (after the prefix) up into a single
///   common prefix ending at the first delimiter
/// - each page holds at most `max_keys` objects and prefixes combined
/// - the continuation token is the last key or prefix of the previous page
#[derive(Clone, Debug, Default)]
pub struct MemoryBucket {
    buckets: BTreeMap<String, BTreeMap<String, u64>>,
}

impl MemoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `bucket` if needed and stores `key` with `size` bytes,
    /// replacing any previous object under that key.
    pub fn insert(&mut self, bucket: &str, key: impl Into<String>, size: u64) {
        self.buckets
            .entry(bucket.to_owned())
            .or_default()
            .insert(key.into(), size);
    }

    /// Creates an empty bucket.
    pub fn create_bucket(&mut self, bucket: &str) {
        self.buckets.entry(bucket.to_owned()).or_default();
    }

    /// Number of objects in `bucket`, or `None` if it does not exist.
    pub fn len(&self, bucket: &str) -> Option<usize> {
        self.buckets.get(bucket).map(BTreeMap::len)
    }

    fn items<'a>(
        objects: &'a BTreeMap<String, u64>,
        prefix: &str,
        delimiter: Option<&str>,
    ) -> Vec<Item<'a>> {
        let mut items: Vec<Item<'a>> = Vec::new();
        for (key, size) in objects.range::<str, _>((Bound::Included(prefix), Bound::Unbounded)) {
            let Some(rest) = key.strip_prefix(prefix) else {
                break;
            };
            let rolled = delimiter
                .filter(|d| !d.is_empty())
                .and_then(|d| rest.find(d).map(|at| &key[..prefix.len() + at + d.len()]));
            match rolled {
                Some(common) => {
                    if !matches!(items.last(), Some(Item::Prefix(last)) if last == common) {
                        items.push(Item::Prefix(common.to_owned()));
                    }
                }
                None => items.push(Item::Object(key, *size)),
            }
        }
        items
    }
}

impl ListingClient for MemoryBucket {
    type Entry = ObjectEntry;
    type Error = MemoryBucketError;

    fn list(&self, request: &ListRequest) -> Result<ListingPage<ObjectEntry>, MemoryBucketError> {
        let objects =
            self.buckets
                .get(&request.bucket)
                .ok_or_else(|| MemoryBucketError::NoSuchBucket {
                    bucket: request.bucket.clone(),
                })?;

        let prefix = request.prefix.as_deref().unwrap_or_default();
        let items = Self::items(objects, prefix, request.delimiter.as_deref());
        let start = match request.continuation_token.as_deref() {
            Some(token) => items.partition_point(|item| item.marker() <= token),
            None => 0,
        };
        let remaining = &items[start..];
        let take = remaining.len().min(request.max_keys);
        let truncated = take < remaining.len();

        let mut page = ListingPage::last(Vec::with_capacity(take));
        for item in &remaining[..take] {
            match item {
                Item::Object(key, size) => page.entries.push(ObjectEntry {
                    key: (*key).to_owned(),
                    size: *size,
                }),
                Item::Prefix(prefix) => page.common_prefixes.push(prefix.clone()),
            }
        }
        if truncated {
            page.truncated = true;
            page.next_token = remaining[..take].last().map(|item| item.marker().to_owned());
        }
        Ok(page)
    }
}
