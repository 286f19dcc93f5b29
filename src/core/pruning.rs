//! Unpublished group pruning
//!
//! Top-level groups of the logical root flagged `Published = N` are removed
//! before any later stage reads the tree. Retained groups contribute their
//! nested `Source` groups and, if they are bibliographies, themselves to the
//! aggregates exposed in [`PruneReport`].

use crate::core::admission::PUBLISHED;
use crate::domain::{Document, GroupId, LuxError, Owner, Result};

pub const SOURCE_GROUP: &str = "Source";
pub const BIBLIOGRAPHY_GROUP: &str = "Bibliography";

/// Outcome of pruning
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Number of groups removed
    pub removed: usize,

    /// `Source` groups nested (at any depth) in retained groups
    pub sources: Vec<GroupId>,

    /// Retained groups of type `Bibliography`
    pub bibliography: Vec<GroupId>,
}

/// Removes unpublished top-level groups from the logical root
///
/// # Errors
///
/// Returns [`LuxError::MissingLogicalStructure`] when there is no logical root.
pub fn prune_unpublished_groups(doc: &mut Document) -> Result<PruneReport> {
    let root = doc.logical_root().ok_or(LuxError::MissingLogicalStructure)?;
    let owner = Owner::Node(root);
    let mut report = PruneReport::default();

    for group in doc.group_ids(owner).to_vec() {
        let unpublished = doc
            .metadata_by_type(Owner::Group(group), PUBLISHED)
            .into_iter()
            .any(|id| doc.metadata(id).value_str().eq_ignore_ascii_case("N"));

        if unpublished {
            tracing::debug!(
                group_type = %doc.group(group).type_name,
                "Removing unpublished metadata group"
            );
            doc.remove_group(owner, group);
            report.removed += 1;
            continue;
        }

        report
            .sources
            .extend(doc.groups_by_type_recursive(Owner::Group(group), SOURCE_GROUP));
        if doc.group(group).type_name == BIBLIOGRAPHY_GROUP {
            report.bibliography.push(group);
        }
    }

    Ok(report)
}
