use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::{ListRequest, ListingClient, ListingPage, MemoryBucket, MemoryBucketError, ObjectEntry};

/// A local directory tree served as a single bucket.
///
/// Every regular file below `root` becomes an object whose key is its path
/// relative to `root`, components joined with `/`. The tree is scanned once,
/// when the bucket is opened; later changes on disk are not seen.
#[derive(Clone, Debug)]
pub struct DirectoryBucket {
    name: String,
    root: PathBuf,
    objects: MemoryBucket,
}

impl DirectoryBucket {
    /// Scans `root` and exposes it as the bucket `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` or any directory below it cannot be read.
    pub fn open(name: impl Into<String>, root: impl Into<PathBuf>) -> io::Result<Self> {
        let name = name.into();
        let root = root.into();
        let mut objects = MemoryBucket::new();
        objects.create_bucket(&name);
        scan(&root, &root, &mut |key, size| objects.insert(&name, key, size))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(bucket = %name, root = %root.display(), objects = objects.len(&name), "opened directory bucket");

        Ok(Self {
            name,
            root,
            objects,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn scan(root: &Path, dir: &Path, f: &mut impl FnMut(String, u64)) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            scan(root, &path, f)?;
        } else if file_type.is_file() {
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            f(key, entry.metadata()?.len());
        }
    }
    Ok(())
}

impl ListingClient for DirectoryBucket {
    type Entry = ObjectEntry;
    type Error = MemoryBucketError;

    fn list(&self, request: &ListRequest) -> Result<ListingPage<ObjectEntry>, MemoryBucketError> {
        self.objects.list(request)
    }
}
