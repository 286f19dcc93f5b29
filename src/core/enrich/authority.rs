//! Authority-linked metadata resolution

use super::strategies::{Derivation, StrategyRegistry};
use super::EnrichmentReport;
use crate::adapters::vocabulary::VocabularyService;
use crate::core::export::summary::{ExportError, ExportErrorType};
use crate::domain::metadata::is_numeric;
use crate::domain::{Document, MetadataId, Owner, VocabularyError, VocabularyRecord};

/// `(vocabulary_id, record)` parsed from `.../{vocabularyId}/{recordIdOrTitle}`
///
/// Returns `Ok(None)` when the vocabulary segment is not numeric, which leaves
/// the field untouched.
pub fn parse_authority_value(value: &str) -> Result<Option<(i64, String)>, VocabularyError> {
    let (prefix, record) = value
        .rsplit_once('/')
        .ok_or_else(|| VocabularyError::MalformedAuthority(value.to_string()))?;
    let vocabulary = prefix.rsplit_once('/').map_or(prefix, |(_, v)| v);
    if !is_numeric(vocabulary) {
        return Ok(None);
    }
    let vocabulary_id = vocabulary
        .parse::<i64>()
        .map_err(|_| VocabularyError::MalformedAuthority(value.to_string()))?;
    Ok(Some((vocabulary_id, record.to_string())))
}

/// Resolves authority-linked metadata and derives new metadata from the records
pub struct MetadataEnricher<'a> {
    vocabulary: &'a dyn VocabularyService,
    strategies: &'a StrategyRegistry,
    base_url: Option<&'a str>,
}

impl<'a> MetadataEnricher<'a> {
    /// Creates an enricher; a blank `base_url` means each metadata's own authority URI
    pub fn new(
        vocabulary: &'a dyn VocabularyService,
        strategies: &'a StrategyRegistry,
        base_url: Option<&'a str>,
    ) -> Self {
        Self {
            vocabulary,
            strategies,
            base_url: base_url.filter(|url| !url.trim().is_empty()),
        }
    }

    /// Enriches every vocabulary-linked metadata of the logical root and of
    /// its groups and their direct subgroups
    pub fn enrich(&self, doc: &mut Document) -> EnrichmentReport {
        let mut report = EnrichmentReport::default();
        let Some(root) = doc.logical_root() else {
            return report;
        };

        for id in candidates(doc, Owner::Node(root)) {
            self.enrich_metadata(doc, id, &mut report);
        }
        report
    }

    fn enrich_metadata(&self, doc: &mut Document, id: MetadataId, report: &mut EnrichmentReport) {
        let md = doc.metadata(id);
        let Some(authority) = md.authority.as_ref().filter(|a| a.is_vocabulary_link()) else {
            return;
        };
        let vocabulary_name = authority.id.clone();
        let authority_value = authority.value.clone();
        let base_url = self
            .base_url
            .map(str::to_string)
            .unwrap_or_else(|| authority.uri.clone());
        let metadata_type = md.type_name.clone();
        report.candidates += 1;

        let (vocabulary_id, record_ref) = match parse_authority_value(&authority_value) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => {
                crate::log_field_skipped!(
                    metadata_type,
                    "Vocabulary id of authority value is not numeric"
                );
                report.skipped += 1;
                return;
            }
            Err(e) => {
                report.problems.push(vocabulary_problem(&e, &metadata_type));
                return;
            }
        };

        let record = match self.resolve(vocabulary_id, &record_ref) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    metadata_type = %metadata_type,
                    authority_value = %authority_value,
                    error = %e,
                    "Vocabulary lookup failed"
                );
                report.problems.push(vocabulary_problem(&e, &metadata_type));
                return;
            }
        };

        if let Some(authority) = doc.metadata_mut(id).authority.as_mut() {
            authority.value = format!(
                "{}/{}/{}",
                base_url.trim_end_matches('/'),
                record.vocabulary_id,
                record.id
            );
        }
        report.resolved += 1;

        let current_value = doc.metadata(id).value.clone();
        let derivation = self
            .strategies
            .get(&vocabulary_name)
            .derive(current_value.as_deref(), &record);
        apply_derivation(doc, id, derivation, report);
    }

    fn resolve(
        &self,
        vocabulary_id: i64,
        record_ref: &str,
    ) -> Result<VocabularyRecord, VocabularyError> {
        let not_found = || VocabularyError::RecordNotFound {
            vocabulary_id,
            record: record_ref.to_string(),
        };

        if is_numeric(record_ref) {
            let record_id = record_ref.parse::<i64>().map_err(|_| not_found())?;
            return self
                .vocabulary
                .get_record(vocabulary_id, record_id)?
                .ok_or_else(not_found);
        }

        let mut vocabulary = self.vocabulary.get_vocabulary_by_id(vocabulary_id)?;
        self.vocabulary.get_all_records(&mut vocabulary)?;
        vocabulary
            .record_by_title(record_ref)
            .cloned()
            .ok_or_else(not_found)
    }
}

/// Metadata of `owner`, of its groups and of their direct subgroups, in that order
fn candidates(doc: &Document, owner: Owner) -> Vec<MetadataId> {
    let mut ids = doc.metadata_ids(owner).to_vec();
    for group in doc.group_ids(owner) {
        ids.extend_from_slice(doc.metadata_ids(Owner::Group(*group)));
        for subgroup in doc.group_ids(Owner::Group(*group)) {
            ids.extend_from_slice(doc.metadata_ids(Owner::Group(*subgroup)));
        }
    }
    ids
}

fn vocabulary_problem(err: &VocabularyError, metadata_type: &str) -> ExportError {
    ExportError::new(ExportErrorType::Vocabulary, err.to_string())
        .with_context(format!("metadata_type={metadata_type}"))
}

/// Applies a derivation next to metadata `id`
///
/// Derived types unknown to the ruleset are skipped; attach failures are
/// reported as problems.
fn apply_derivation(
    doc: &mut Document,
    id: MetadataId,
    derivation: Derivation,
    report: &mut EnrichmentReport,
) {
    if let Some(replacement) = derivation.replacement {
        let md = doc.metadata_mut(id);
        md.value = replacement.value;
        md.authority = Some(replacement.authority);
    }

    let owner = doc.metadata(id).owner();
    for field in derivation.fields {
        if !doc.ruleset().has_metadata_type(&field.metadata_type) {
            tracing::trace!(metadata_type = %field.metadata_type, "Derived type unknown");
            continue;
        }
        match doc.add_metadata(owner, &field.metadata_type, field.value) {
            Ok(_) => report.derived += 1,
            Err(e) => {
                tracing::debug!(
                    metadata_type = %field.metadata_type,
                    error = %e,
                    "Derived metadata not attached"
                );
                report.problems.push(
                    ExportError::new(ExportErrorType::Structure, e.to_string())
                        .with_context(format!("metadata_type={}", field.metadata_type)),
                );
            }
        }
    }
}
