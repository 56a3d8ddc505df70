//! Site file access capability.
//!
//! Handlers treat the filesystem as an opaque "read bytes given a name" and
//! "list names in a directory" service so they can be tested against stubs
//! or temporary directories.

use std::{fs, io, path::PathBuf};

/// Read-only access to the site directory plus a raw existence probe.
pub trait SiteAssets: Send + Sync + 'static {
    /// Reads a file from the site directory.
    fn read_file(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Lists the entry names of the site directory.
    fn list_dir(&self) -> io::Result<Vec<String>>;

    /// Checks whether `path` exists, taken literally. Unlike the other two
    /// methods this is not rooted at the site directory; the `file/`
    /// endpoint probes whatever path text the client sent.
    fn file_exists(&self, path: &str) -> bool;
}

/// Filesystem-backed assets rooted at a site directory (`www` by default).
#[derive(Debug, Clone)]
pub struct FsAssets {
    root: PathBuf,
}

impl FsAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsAssets { root: root.into() }
    }

    /// The configured site directory.
    #[inline]
    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl Default for FsAssets {
    fn default() -> Self {
        FsAssets::new("www")
    }
}

impl SiteAssets for FsAssets {
    fn read_file(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(name))
    }

    fn list_dir(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn file_exists(&self, path: &str) -> bool {
        std::path::Path::new(path).exists()
    }
}
