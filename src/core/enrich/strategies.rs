//! Derivation strategies keyed by vocabulary name
//!
//! A resolved record is turned into metadata by the strategy registered for
//! the authority id of the metadata that linked to it. Names without a
//! registration fall back to [`DefaultStrategy`].

use crate::domain::{Authority, VocabularyRecord};
use std::collections::HashMap;
use std::sync::Arc;

/// New sibling metadata to attach next to the resolved metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedField {
    pub metadata_type: String,
    pub value: Option<String>,
}

/// In-place update of the resolved metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// New value, `None` clears it
    pub value: Option<String>,
    pub authority: Authority,
}

/// Everything a strategy derives from one record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Derivation {
    pub replacement: Option<Replacement>,
    pub fields: Vec<DerivedField>,
}

pub trait DerivationStrategy: Send + Sync {
    /// Derives metadata from `record` for a metadata currently holding `current_value`
    fn derive(&self, current_value: Option<&str>, record: &VocabularyRecord) -> Derivation;
}

// ----------------------------------------------------------------------
// Location
// ----------------------------------------------------------------------

pub const GEONAMES_ID: &str = "geonames";
pub const GEONAMES_URI: &str = "http://www.geonames.org/";

/// Copies the place name and re-links the metadata to GeoNames
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationStrategy;

impl DerivationStrategy for LocationStrategy {
    fn derive(&self, _current_value: Option<&str>, record: &VocabularyRecord) -> Derivation {
        // the last field of each label wins
        let mut value = None;
        let mut authority = None;
        for field in &record.fields {
            match field.definition.label.as_str() {
                "Location" => value = field.value.clone(),
                "Authority Value" => authority = field.value.clone(),
                _ => {}
            }
        }

        // both are replaced even when the record lacks the field
        let authority = Authority::new(
            GEONAMES_ID,
            GEONAMES_URI,
            format!("{GEONAMES_URI}{}", authority.unwrap_or_default()),
        );
        Derivation {
            replacement: Some(Replacement { value, authority }),
            fields: Vec::new(),
        }
    }
}

// ----------------------------------------------------------------------
// Relationships
// ----------------------------------------------------------------------

/// Vocabularies of bidirectional relation types
pub const RELATIONSHIP_VOCABULARIES: [&str; 13] = [
    "R01 Relationship Person - Person",
    "R02 Relationship Collective agent - Collective agent",
    "R03a Relationship Person - Collective agent",
    "R03b Relationship Collective agent - Person",
    "R04 Relationship Person - Event",
    "R05 Relationship Collective agent - Event",
    "R06 Relationship Person - Work",
    "R07 Relationship Collective agent - Work",
    "R08 Relationship Event - Work",
    "R09 Relationship Person - Award",
    "R10 Relationship Collective agent - Award",
    "R11 Relationship Work - Award",
    "R12 Relationship Event - Award",
];

const REVERSE_PREFIX: &str = "Reverse";
const FORWARD_PREFIX: &str = "Relationship";
const RELATIONSHIP_LANGUAGES: [&str; 3] = ["ger", "eng", "fre"];

/// Normalises a relation type into `_relationship_type_{ger,eng,fre}`
///
/// The direction is read from the field whose value equals the current value:
/// a `Reverse...` label selects the reverse side, anything else (or no match)
/// the forward side.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipStrategy;

impl DerivationStrategy for RelationshipStrategy {
    fn derive(&self, current_value: Option<&str>, record: &VocabularyRecord) -> Derivation {
        let reverse = record
            .fields
            .iter()
            .find(|f| f.value.as_deref() == current_value)
            .is_some_and(|f| f.definition.label.starts_with(REVERSE_PREFIX));
        let prefix = if reverse { REVERSE_PREFIX } else { FORWARD_PREFIX };

        let mut values: HashMap<&str, Option<String>> = HashMap::new();
        for field in record
            .fields
            .iter()
            .filter(|f| f.definition.label.starts_with(prefix))
        {
            if let Some(lang) = field.definition_language() {
                if RELATIONSHIP_LANGUAGES.contains(&lang) {
                    values.insert(lang, field.value.clone());
                }
            }
        }

        Derivation {
            replacement: None,
            fields: RELATIONSHIP_LANGUAGES
                .iter()
                .map(|lang| DerivedField {
                    metadata_type: format!("_relationship_type_{lang}"),
                    value: values.get(lang).cloned().flatten(),
                })
                .collect(),
        }
    }
}

// ----------------------------------------------------------------------
// Default
// ----------------------------------------------------------------------

/// One derived field per non-blank record field
///
/// The generated type is `_{label}_{language}` (or `_{label}` without a
/// definition language), lowercased with spaces removed. `label` is the label
/// of the record's English field when there is one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrategy;

/// Generated metadata type name for a record label and optional language
pub fn generated_type_name(record_label: &str, language: Option<&str>) -> String {
    let name = match language {
        Some(lang) => format!("_{record_label}_{lang}"),
        None => format!("_{record_label}"),
    };
    name.replace(' ', "").to_lowercase()
}

impl DerivationStrategy for DefaultStrategy {
    fn derive(&self, _current_value: Option<&str>, record: &VocabularyRecord) -> Derivation {
        let english_label = record
            .fields
            .iter()
            .find(|f| f.language.as_deref() == Some("eng"))
            .map(|f| f.label.as_str())
            .filter(|label| !label.trim().is_empty());

        let fields = record
            .fields
            .iter()
            .filter(|f| f.has_value())
            .map(|f| DerivedField {
                metadata_type: generated_type_name(
                    english_label.unwrap_or(&f.label),
                    f.definition_language(),
                ),
                value: f.value.clone(),
            })
            .collect();

        Derivation {
            replacement: None,
            fields,
        }
    }
}

// ----------------------------------------------------------------------
// Registry
// ----------------------------------------------------------------------

/// Maps vocabulary names to strategies
#[derive(Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn DerivationStrategy>>,
    fallback: Arc<dyn DerivationStrategy>,
}

impl StrategyRegistry {
    /// Registry with no named strategies
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
            fallback: Arc::new(DefaultStrategy),
        }
    }

    /// Registers `strategy` for `vocabulary_name`, replacing any previous one
    pub fn register(
        &mut self,
        vocabulary_name: impl Into<String>,
        strategy: Arc<dyn DerivationStrategy>,
    ) {
        self.strategies.insert(vocabulary_name.into(), strategy);
    }

    /// Strategy for `vocabulary_name` (exact match) or the default one
    pub fn get(&self, vocabulary_name: &str) -> &dyn DerivationStrategy {
        self.strategies
            .get(vocabulary_name)
            .unwrap_or(&self.fallback)
            .as_ref()
    }

    pub fn is_registered(&self, vocabulary_name: &str) -> bool {
        self.strategies.contains_key(vocabulary_name)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("Location", Arc::new(LocationStrategy));
        let relationship: Arc<dyn DerivationStrategy> = Arc::new(RelationshipStrategy);
        for name in RELATIONSHIP_VOCABULARIES {
            registry.register(name, Arc::clone(&relationship));
        }
        registry
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.strategies.keys().collect();
        names.sort();
        f.debug_struct("StrategyRegistry")
            .field("strategies", &names)
            .finish()
    }
}
