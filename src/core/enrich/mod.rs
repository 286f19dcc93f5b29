//! Vocabulary enrichment
//!
//! Two stages read the vocabulary service:
//! - [`GroupVocabularyEnricher`] fills blank fields of configured metadata
//!   groups from the record their identifier points to
//! - [`MetadataEnricher`] resolves authority-linked metadata, rewrites the
//!   authority value and derives new metadata through a [`StrategyRegistry`]
//!
//! [`add_location_from_related_agent`] is grouped here as well; it enriches the
//! logical root from another process's descriptor instead of a vocabulary.

pub mod agent_location;
pub mod authority;
pub mod groups;
pub mod strategies;

pub use agent_location::{add_location_from_related_agent, AgentLocationReport};
pub use authority::{parse_authority_value, MetadataEnricher};
pub use groups::{GroupEnrichmentReport, GroupVocabularyEnricher};
pub use strategies::{
    DefaultStrategy, Derivation, DerivationStrategy, DerivedField, LocationStrategy,
    RelationshipStrategy, Replacement, StrategyRegistry,
};

use crate::core::export::summary::ExportError;

/// Outcome of a [`MetadataEnricher`] pass
#[derive(Debug, Clone, Default)]
pub struct EnrichmentReport {
    /// Vocabulary-linked metadata seen
    pub candidates: usize,
    /// Authority values rewritten
    pub resolved: usize,
    /// Fields left untouched because the vocabulary id was not numeric
    pub skipped: usize,
    /// Derived metadata attached
    pub derived: usize,
    /// Lookup and attach failures, one per affected field
    pub problems: Vec<ExportError>,
}
