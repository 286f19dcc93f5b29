//! Group enrichment from configured vocabulary records

use crate::adapters::vocabulary::VocabularyService;
use crate::config::VocabularyRecordConfig;
use crate::core::export::summary::{ExportError, ExportErrorType};
use crate::domain::metadata::{is_blank_or_null, is_numeric};
use crate::domain::{Document, GroupId, Owner, VocabularyRecord};

/// Record id used when the identifier metadata is blank or not numeric
const UNRESOLVABLE_RECORD: i64 = -1;

/// Outcome of a [`GroupVocabularyEnricher`] pass
#[derive(Debug, Clone, Default)]
pub struct GroupEnrichmentReport {
    /// Groups matching a configured type
    pub groups: usize,
    /// Identifiers that did not resolve to a record
    pub unresolved: usize,
    /// Metadata values filled
    pub filled: usize,
    /// Lookup failures
    pub problems: Vec<ExportError>,
}

/// Fills blank metadata of configured groups from vocabulary records
pub struct GroupVocabularyEnricher<'a> {
    vocabulary: &'a dyn VocabularyService,
    configs: &'a [VocabularyRecordConfig],
}

impl<'a> GroupVocabularyEnricher<'a> {
    pub fn new(vocabulary: &'a dyn VocabularyService, configs: &'a [VocabularyRecordConfig]) -> Self {
        Self { vocabulary, configs }
    }

    /// Enriches the logical root's groups and their direct subgroups
    pub fn enrich(&self, doc: &mut Document) -> GroupEnrichmentReport {
        let mut report = GroupEnrichmentReport::default();
        if self.configs.is_empty() {
            return report;
        }
        let Some(root) = doc.logical_root() else {
            return report;
        };

        let mut groups = Vec::new();
        for group in doc.group_ids(Owner::Node(root)) {
            groups.push(*group);
            groups.extend_from_slice(doc.group_ids(Owner::Group(*group)));
        }

        for group in groups {
            for config in self.configs {
                if doc.group(group).type_name == config.metadata_group_type {
                    report.groups += 1;
                    self.enrich_group(doc, group, config, &mut report);
                }
            }
        }
        report
    }

    fn enrich_group(
        &self,
        doc: &mut Document,
        group: GroupId,
        config: &VocabularyRecordConfig,
        report: &mut GroupEnrichmentReport,
    ) {
        let owner = Owner::Group(group);
        for id in doc.metadata_by_type(owner, &config.record_identifier_metadata) {
            let record_id = record_id(doc.metadata(id).value.as_deref());
            let record = match self.vocabulary.get_record(config.vocabulary_id, record_id) {
                Ok(Some(record)) => record,
                Ok(None) => {
                    tracing::debug!(
                        group_type = %config.metadata_group_type,
                        vocabulary_id = config.vocabulary_id,
                        record_id,
                        "Group identifier does not resolve"
                    );
                    report.unresolved += 1;
                    continue;
                }
                Err(e) => {
                    report.problems.push(
                        ExportError::new(ExportErrorType::Vocabulary, e.to_string())
                            .with_context(format!("group_type={}", config.metadata_group_type)),
                    );
                    continue;
                }
            };
            report.filled += fill_from_record(doc, group, config, &record);
        }
    }
}

fn record_id(value: Option<&str>) -> i64 {
    value
        .filter(|v| is_numeric(v))
        .and_then(|v| v.parse().ok())
        .unwrap_or(UNRESOLVABLE_RECORD)
}

/// Overwrites blank or `null` targets; returns how many were filled
fn fill_from_record(
    doc: &mut Document,
    group: GroupId,
    config: &VocabularyRecordConfig,
    record: &VocabularyRecord,
) -> usize {
    let mut filled = 0;
    for enrichment in &config.enrich {
        let Some(value) = record
            .field_by_label(&enrichment.vocabulary_field)
            .and_then(|f| f.value.as_deref())
            .filter(|v| !is_blank_or_null(Some(v)))
        else {
            continue;
        };

        for target in doc.metadata_by_type(Owner::Group(group), &enrichment.metadata_type) {
            let md = doc.metadata_mut(target);
            if md.is_blank_or_null() {
                md.value = Some(value.to_string());
                filled += 1;
            }
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::vocabulary::VocabularyStore;
    use crate::config::VocabularyEnrichmentConfig;
    use crate::domain::{Definition, Field, NodeId, Ruleset, StructKind, Vocabulary};
    use std::sync::Arc;
    use test_case::test_case;

    fn field(label: &str, value: &str) -> Field {
        Field {
            label: label.to_string(),
            language: None,
            value: Some(value.to_string()),
            definition: Definition {
                label: label.to_string(),
                language: None,
            },
        }
    }

    fn store() -> VocabularyStore {
        VocabularyStore::new([Vocabulary {
            id: 7,
            title: "Agents".to_string(),
            records: vec![VocabularyRecord {
                id: 42,
                vocabulary_id: 7,
                title: "Jean Dupont".to_string(),
                fields: vec![
                    field("Name", "Jean Dupont"),
                    field("Name", "Second name"),
                    field("Born", "null"),
                ],
            }],
        }])
    }

    fn config() -> Vec<VocabularyRecordConfig> {
        vec![VocabularyRecordConfig {
            metadata_group_type: "Relationship".to_string(),
            vocabulary_id: 7,
            record_identifier_metadata: "RelationEntityID".to_string(),
            enrich: vec![
                VocabularyEnrichmentConfig {
                    vocabulary_field: "Name".to_string(),
                    metadata_type: "RelationName".to_string(),
                },
                VocabularyEnrichmentConfig {
                    vocabulary_field: "Born".to_string(),
                    metadata_type: "RelationBorn".to_string(),
                },
            ],
        }]
    }

    fn document() -> (Document, NodeId) {
        let mut doc = Document::new(Arc::new(Ruleset::default()));
        let root = doc.alloc_node(StructKind::Logical, "Person");
        doc.set_logical_root(root);
        (doc, root)
    }

    fn relationship(doc: &mut Document, owner: Owner, id: &str, name: Option<&str>) -> GroupId {
        let group = doc.insert_group(owner, "Relationship");
        doc.insert_metadata(Owner::Group(group), "RelationEntityID", Some(id.to_string()), None);
        doc.insert_metadata(
            Owner::Group(group),
            "RelationName",
            name.map(str::to_string),
            None,
        );
        doc.insert_metadata(Owner::Group(group), "RelationBorn", None, None);
        group
    }

    fn name(doc: &Document, group: GroupId) -> Option<String> {
        doc.first_value(Owner::Group(group), "RelationName")
            .map(str::to_string)
    }

    #[test_case(None ; "unset")]
    #[test_case(Some("  ") ; "blank")]
    #[test_case(Some("NULL") ; "null literal")]
    fn test_fills_blank_target(current: Option<&str>) {
        let (mut doc, root) = document();
        let group = relationship(&mut doc, Owner::Node(root), "42", current);
        let vocab = store();
        let configs = config();

        let report = GroupVocabularyEnricher::new(&vocab, &configs).enrich(&mut doc);

        assert_eq!(report.filled, 1);
        assert_eq!(name(&doc, group).as_deref(), Some("Jean Dupont"));
    }

    #[test]
    fn test_keeps_existing_value() {
        let (mut doc, root) = document();
        let group = relationship(&mut doc, Owner::Node(root), "42", Some("J. Dupont"));
        let vocab = store();
        let configs = config();

        let report = GroupVocabularyEnricher::new(&vocab, &configs).enrich(&mut doc);

        assert_eq!(report.filled, 0);
        assert_eq!(name(&doc, group).as_deref(), Some("J. Dupont"));
    }

    #[test]
    fn test_null_field_value_is_not_copied() {
        let (mut doc, root) = document();
        let group = relationship(&mut doc, Owner::Node(root), "42", Some("x"));
        let vocab = store();
        let configs = config();

        GroupVocabularyEnricher::new(&vocab, &configs).enrich(&mut doc);

        assert_eq!(doc.first_value(Owner::Group(group), "RelationBorn"), None);
    }

    #[test]
    fn test_subgroups_are_enriched() {
        let (mut doc, root) = document();
        let outer = doc.insert_group(Owner::Node(root), "Event");
        let inner = relationship(&mut doc, Owner::Group(outer), "42", None);
        let deeper_parent = doc.insert_group(Owner::Group(outer), "Wrapper");
        let too_deep = relationship(&mut doc, Owner::Group(deeper_parent), "42", None);
        let vocab = store();
        let configs = config();

        GroupVocabularyEnricher::new(&vocab, &configs).enrich(&mut doc);

        assert_eq!(name(&doc, inner).as_deref(), Some("Jean Dupont"));
        assert_eq!(name(&doc, too_deep), None);
    }

    #[test_case("abc" ; "non numeric")]
    #[test_case("" ; "blank")]
    #[test_case("99" ; "unknown record")]
    fn test_unresolved_identifier_changes_nothing(id: &str) {
        let (mut doc, root) = document();
        let group = relationship(&mut doc, Owner::Node(root), id, None);
        let vocab = store();
        let configs = config();

        let report = GroupVocabularyEnricher::new(&vocab, &configs).enrich(&mut doc);

        assert_eq!(report.unresolved, 1);
        assert!(report.problems.is_empty());
        assert_eq!(name(&doc, group), None);
    }

    #[test]
    fn test_record_id_parsing() {
        assert_eq!(record_id(Some("42")), 42);
        assert_eq!(record_id(Some(" 42 ")), UNRESOLVABLE_RECORD);
        assert_eq!(record_id(Some("-3")), UNRESOLVABLE_RECORD);
        assert_eq!(record_id(None), UNRESOLVABLE_RECORD);
    }
}
