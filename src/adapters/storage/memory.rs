//! In-memory inventory
//!
//! Used for dry runs against a recorded listing and throughout the tests.

use super::FileInventory;
use crate::domain::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Fixed folder listings keyed by folder path
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    folders: BTreeMap<PathBuf, Vec<String>>,
}

impl StaticInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `folder` with the given file names
    pub fn with_folder<I, S>(mut self, folder: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        self.folders.insert(folder.into(), names);
        self
    }
}

impl FileInventory for StaticInventory {
    fn list_names(&self, folder: &Path) -> Result<Vec<String>> {
        Ok(self.folders.get(folder).cloned().unwrap_or_default())
    }

    fn list_paths(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .list_names(folder)?
            .into_iter()
            .map(|name| folder.join(name))
            .collect())
    }

    fn exists(&self, folder: &Path) -> Result<bool> {
        Ok(self.folders.contains_key(folder))
    }
}
