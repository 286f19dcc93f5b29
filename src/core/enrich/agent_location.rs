//! Event location copied from the organizing agent

use crate::adapters::descriptor::DescriptorStore;
use crate::core::export::summary::{ExportError, ExportErrorType};
use crate::domain::{Document, GroupId, Owner};
use std::path::{Path, PathBuf};

pub const LOCATION_GROUP: &str = "LocationGroup";
pub const RELATIONSHIP_GROUP: &str = "Relationship";

/// Relationship types linking an event to the agent that organized it
pub const ORGANIZER_RELATIONS: [&str; 2] = ["was organized by", "organized"];

/// Descriptor file name inside a process folder
pub const DESCRIPTOR_FILE: &str = "meta.json";

/// Outcome of [`add_location_from_related_agent`]
#[derive(Debug, Clone, Default)]
pub struct AgentLocationReport {
    /// Organizing agents found in relationships
    pub agents: usize,
    /// Location groups copied onto the logical root
    pub imported: usize,
    /// Unreadable descriptors and rejected groups
    pub problems: Vec<ExportError>,
}

/// Copies the first `LocationGroup` of every organizing agent onto the logical root
///
/// Does nothing when the root already has a location group. Agent descriptors
/// are read from `{metadata_folder}/{RelationProcessID}/meta.json`.
pub fn add_location_from_related_agent(
    doc: &mut Document,
    store: &dyn DescriptorStore,
    metadata_folder: &Path,
) -> AgentLocationReport {
    let mut report = AgentLocationReport::default();
    let Some(root) = doc.logical_root() else {
        return report;
    };
    let root = Owner::Node(root);
    if !doc.groups_by_type(root, LOCATION_GROUP).is_empty() {
        tracing::debug!("Logical root already has a location");
        return report;
    }

    for relationship in doc.groups_by_type(root, RELATIONSHIP_GROUP) {
        let Some(agent) = organizing_agent(doc, relationship) else {
            continue;
        };
        report.agents += 1;

        let path = agent_descriptor_path(metadata_folder, &agent);
        let agent_doc = match store.read(&path, doc.ruleset_handle()) {
            Ok(agent_doc) => agent_doc,
            Err(e) => {
                tracing::error!(
                    agent = %agent,
                    path = %path.display(),
                    error = %e,
                    "Unable to read agent descriptor"
                );
                report.problems.push(
                    ExportError::new(ExportErrorType::Descriptor, e.to_string())
                        .with_context(format!("agent={agent}")),
                );
                continue;
            }
        };

        let Some(location) = agent_doc
            .logical_root()
            .and_then(|r| agent_doc.groups_by_type(Owner::Node(r), LOCATION_GROUP).first().copied())
        else {
            tracing::debug!(agent = %agent, "Agent has no location");
            continue;
        };

        match doc.import_group(&agent_doc, location, root) {
            Ok(_) => {
                tracing::info!(agent = %agent, "Added event location from agent");
                report.imported += 1;
            }
            Err(e) => {
                tracing::error!(agent = %agent, error = %e, "Unable to add location to event");
                report.problems.push(
                    ExportError::new(ExportErrorType::Structure, e.to_string())
                        .with_context(format!("agent={agent}")),
                );
            }
        }
    }
    report
}

/// Process id of the agent a relationship group points to, if it organized the event
fn organizing_agent(doc: &Document, group: GroupId) -> Option<String> {
    let owner = Owner::Group(group);
    let entity_type = doc.first_value(owner, "RelationEntityType");
    let relation = doc.first_value(owner, "Type")?;
    if entity_type != Some("Agent") || !ORGANIZER_RELATIONS.contains(&relation) {
        return None;
    }
    doc.first_value(owner, "RelationProcessID")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn agent_descriptor_path(metadata_folder: &Path, agent: &str) -> PathBuf {
    metadata_folder.join(agent).join(DESCRIPTOR_FILE)
}
