//! Controlled-vocabulary lookups
//!
//! The export core consumes vocabularies only through [`VocabularyService`].
//! [`VocabularyStore`] answers the same contract from a JSON export of the
//! vocabulary server, which is how exports run offline and how tests inject
//! records.

pub mod store;

pub use store::VocabularyStore;

use crate::domain::{Vocabulary, VocabularyError, VocabularyRecord};

/// Lookup contract of the vocabulary service
///
/// Calls are blocking and read-only. No caching is expected of callers.
pub trait VocabularyService: Send + Sync {
    /// Record `record_id` of vocabulary `vocabulary_id`, `None` if it does not exist
    fn get_record(
        &self,
        vocabulary_id: i64,
        record_id: i64,
    ) -> Result<Option<VocabularyRecord>, VocabularyError>;

    /// The vocabulary without its records
    fn get_vocabulary_by_id(&self, id: i64) -> Result<Vocabulary, VocabularyError>;

    /// Populates `vocabulary.records`
    fn get_all_records(&self, vocabulary: &mut Vocabulary) -> Result<(), VocabularyError>;
}
