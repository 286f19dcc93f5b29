//! JSON file descriptor store

use super::models::DescriptorFile;
use super::DescriptorStore;
use crate::domain::{Document, LuxError, Result, Ruleset};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

/// Reads and writes descriptors as pretty-printed JSON files
#[derive(Debug, Clone, Default)]
pub struct JsonDescriptorStore;

impl JsonDescriptorStore {
    pub fn new() -> Self {
        Self
    }
}

fn descriptor_error(path: &Path, err: std::io::Error) -> LuxError {
    if err.kind() == ErrorKind::PermissionDenied {
        LuxError::AccessDenied(path.display().to_string())
    } else {
        LuxError::Descriptor(format!("{}: {}", path.display(), err))
    }
}

impl DescriptorStore for JsonDescriptorStore {
    fn read(&self, path: &Path, ruleset: Arc<Ruleset>) -> Result<Document> {
        let contents = fs::read_to_string(path).map_err(|e| descriptor_error(path, e))?;
        let file: DescriptorFile = serde_json::from_str(&contents).map_err(|e| {
            LuxError::Descriptor(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "Read descriptor");
        file.into_document(ruleset)
    }

    fn write(&self, path: &Path, document: &Document) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| descriptor_error(parent, e))?;
        }
        let file = DescriptorFile::from_document(document);
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(path, json).map_err(|e| descriptor_error(path, e))?;
        tracing::debug!(path = %path.display(), "Wrote descriptor");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Owner, StructKind};
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("meta.json");
        let store = JsonDescriptorStore::new();

        let ruleset = Arc::new(Ruleset::default());
        let mut doc = Document::new(Arc::clone(&ruleset));
        let root = doc.alloc_node(StructKind::Logical, "Person");
        doc.set_logical_root(root);
        doc.insert_metadata(Owner::Node(root), "Published", Some("Y".to_string()), None);

        store.write(&path, &doc).unwrap();
        let read = store.read(&path, ruleset).unwrap();
        let root = read.logical_root().unwrap();
        assert_eq!(read.first_value(Owner::Node(root), "Published"), Some("Y"));
    }

    #[test]
    fn test_missing_file_is_descriptor_error() {
        let dir = TempDir::new().unwrap();
        let err = JsonDescriptorStore::new()
            .read(&dir.path().join("missing.json"), Arc::new(Ruleset::default()))
            .unwrap_err();
        assert!(matches!(err, LuxError::Descriptor(_)));
    }

    #[test]
    fn test_invalid_json_is_descriptor_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.json");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonDescriptorStore::new()
            .read(&path, Arc::new(Ruleset::default()))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
