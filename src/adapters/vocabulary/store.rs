//! JSON-backed vocabulary service

use super::VocabularyService;
use crate::domain::{LuxError, Result, Vocabulary, VocabularyError, VocabularyRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Default, Serialize, Deserialize)]
struct VocabularyExport {
    #[serde(default)]
    vocabularies: Vec<Vocabulary>,
}

/// In-memory vocabulary service loaded from a JSON export
///
/// The file has the shape `{"vocabularies": [{"id", "title", "records": [...]}]}`.
#[derive(Debug, Clone, Default)]
pub struct VocabularyStore {
    vocabularies: HashMap<i64, Vocabulary>,
}

impl VocabularyStore {
    /// Creates a store holding `vocabularies`
    pub fn new(vocabularies: impl IntoIterator<Item = Vocabulary>) -> Self {
        Self {
            vocabularies: vocabularies.into_iter().map(|v| (v.id, v)).collect(),
        }
    }

    /// Loads a store from a JSON export file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LuxError::Configuration(format!(
                "Failed to read vocabulary file {}: {}",
                path.display(),
                e
            ))
        })?;
        let export: VocabularyExport = serde_json::from_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            vocabularies = export.vocabularies.len(),
            "Loaded vocabulary store"
        );
        Ok(Self::new(export.vocabularies))
    }

    /// Number of vocabularies held
    pub fn len(&self) -> usize {
        self.vocabularies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabularies.is_empty()
    }
}

impl VocabularyService for VocabularyStore {
    fn get_record(
        &self,
        vocabulary_id: i64,
        record_id: i64,
    ) -> std::result::Result<Option<VocabularyRecord>, VocabularyError> {
        tracing::trace!(vocabulary_id, record_id, "Vocabulary record lookup");
        Ok(self.vocabularies.get(&vocabulary_id).and_then(|v| {
            v.records
                .iter()
                .find(|r| r.id == record_id)
                .cloned()
        }))
    }

    fn get_vocabulary_by_id(&self, id: i64) -> std::result::Result<Vocabulary, VocabularyError> {
        let vocabulary = self
            .vocabularies
            .get(&id)
            .ok_or(VocabularyError::VocabularyNotFound(id))?;
        Ok(Vocabulary {
            id: vocabulary.id,
            title: vocabulary.title.clone(),
            records: Vec::new(),
        })
    }

    fn get_all_records(
        &self,
        vocabulary: &mut Vocabulary,
    ) -> std::result::Result<(), VocabularyError> {
        let stored = self
            .vocabularies
            .get(&vocabulary.id)
            .ok_or(VocabularyError::VocabularyNotFound(vocabulary.id))?;
        vocabulary.records = stored.records.clone();
        tracing::trace!(
            vocabulary_id = vocabulary.id,
            records = vocabulary.records.len(),
            "Loaded all vocabulary records"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EXPORT: &str = r#"{
        "vocabularies": [
            {"id": 12, "title": "Location", "records": [
                {"id": 34, "vocabulary_id": 12, "title": "Paris", "fields": []},
                {"id": 35, "vocabulary_id": 12, "title": "Berlin", "fields": []}
            ]}
        ]
    }"#;

    fn store() -> VocabularyStore {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();
        VocabularyStore::from_file(file.path()).unwrap()
    }

    #[test]
    fn test_get_record() {
        let store = store();
        assert_eq!(store.get_record(12, 35).unwrap().unwrap().title, "Berlin");
        assert!(store.get_record(12, 99).unwrap().is_none());
        assert!(store.get_record(7, 34).unwrap().is_none());
    }

    #[test]
    fn test_vocabulary_is_returned_unloaded() {
        let store = store();
        let mut vocabulary = store.get_vocabulary_by_id(12).unwrap();
        assert!(vocabulary.records.is_empty());

        store.get_all_records(&mut vocabulary).unwrap();
        assert_eq!(vocabulary.records.len(), 2);
        assert_eq!(vocabulary.record_by_title("Paris").unwrap().id, 34);
    }

    #[test]
    fn test_unknown_vocabulary() {
        assert_eq!(
            store().get_vocabulary_by_id(3),
            Err(VocabularyError::VocabularyNotFound(3))
        );
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = VocabularyStore::from_file("/nonexistent/vocabularies.json").unwrap_err();
        assert!(matches!(err, LuxError::Configuration(_)));
    }
}
