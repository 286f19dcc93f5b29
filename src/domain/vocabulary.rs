//! Controlled-vocabulary records
//!
//! Shapes returned by a [`VocabularyService`](crate::adapters::vocabulary::VocabularyService).

use serde::{Deserialize, Serialize};

/// Label/language pairing a field value is matched by
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub label: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// One labelled, optionally language-tagged value of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    pub definition: Definition,
}

impl Field {
    /// Field value, empty string when unset
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Whether the value is present and not whitespace only
    pub fn has_value(&self) -> bool {
        !self.value_str().trim().is_empty()
    }

    /// Language of the field definition if set and non-blank
    pub fn definition_language(&self) -> Option<&str> {
        self.definition
            .language
            .as_deref()
            .filter(|lang| !lang.trim().is_empty())
    }
}

/// An identifier-addressed record with ordered fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    pub id: i64,
    pub vocabulary_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl VocabularyRecord {
    /// First field with the given label
    pub fn field_by_label(&self, label: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.label == label)
    }

    /// First field whose definition carries the given label
    pub fn field_by_definition(&self, label: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.definition.label == label)
    }
}

/// A vocabulary; `records` stays empty until explicitly loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub records: Vec<VocabularyRecord>,
}

impl Vocabulary {
    /// First loaded record whose title equals `title`
    pub fn record_by_title(&self, title: &str) -> Option<&VocabularyRecord> {
        self.records.iter().find(|r| r.title == title)
    }
}
