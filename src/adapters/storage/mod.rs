//! Filesystem inventory
//!
//! The export core never copies, moves or deletes files. It only needs to know
//! what a folder contains, which is what [`FileInventory`] provides.

pub mod local;
pub mod memory;

pub use local::LocalInventory;
pub use memory::StaticInventory;

use crate::domain::Result;
use std::path::{Path, PathBuf};

/// Read-only view of folder contents
pub trait FileInventory: Send + Sync {
    /// File names in `folder`, sorted by name; empty if the folder is missing
    fn list_names(&self, folder: &Path) -> Result<Vec<String>>;

    /// Full paths of the files in `folder`, sorted by name
    fn list_paths(&self, folder: &Path) -> Result<Vec<PathBuf>>;

    /// Whether `folder` exists
    fn exists(&self, folder: &Path) -> Result<bool>;

    /// Whether `folder` contains no files
    fn is_empty(&self, folder: &Path) -> Result<bool> {
        Ok(self.list_names(folder)?.is_empty())
    }

    /// Mimetype of a file
    fn probe_mimetype(&self, path: &Path) -> String {
        guess_mimetype(path)
    }
}

/// Mimetype derived from the file extension
pub fn guess_mimetype(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
