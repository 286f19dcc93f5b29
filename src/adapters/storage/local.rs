//! Local filesystem inventory

use super::FileInventory;
use crate::domain::{LuxError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Inventory backed by `std::fs`
#[derive(Debug, Clone, Default)]
pub struct LocalInventory;

impl LocalInventory {
    pub fn new() -> Self {
        Self
    }

    fn entries(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        let reader = match fs::read_dir(folder) {
            Ok(reader) => reader,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(access_error(folder, e)),
        };

        let mut paths = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| access_error(folder, e))?;
            let file_type = entry.file_type().map_err(|e| access_error(folder, e))?;
            if file_type.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(paths)
    }
}

fn access_error(path: &Path, err: std::io::Error) -> LuxError {
    if err.kind() == ErrorKind::PermissionDenied {
        LuxError::AccessDenied(path.display().to_string())
    } else {
        LuxError::Io(format!("{}: {}", path.display(), err))
    }
}

impl FileInventory for LocalInventory {
    fn list_names(&self, folder: &Path) -> Result<Vec<String>> {
        Ok(self
            .entries(folder)?
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .collect())
    }

    fn list_paths(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        self.entries(folder)
    }

    fn exists(&self, folder: &Path) -> Result<bool> {
        match fs::metadata(folder) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(access_error(folder, e)),
        }
    }
}
