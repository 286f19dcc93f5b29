//! Export admission
//!
//! A document is exportable when its logical root carries a `Published`
//! metadata whose value is a single `Y` or `J` (any case), unless unpublished
//! records are exported too.

use crate::domain::{Document, LuxError, Owner, Result};

/// Metadata type marking a record or group as published
pub const PUBLISHED: &str = "Published";

/// Result of the admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Proceed,
    NotApplicable,
}

fn is_published_flag(value: &str) -> bool {
    matches!(value, "Y" | "y" | "J" | "j")
}

/// Decides whether `doc` may be exported
///
/// # Errors
///
/// Returns [`LuxError::MissingLogicalStructure`] when the document has no
/// logical root; that check runs before the flag is considered.
pub fn check_admission(doc: &Document, export_unpublished_records: bool) -> Result<Admission> {
    let root = doc.logical_root().ok_or(LuxError::MissingLogicalStructure)?;
    if export_unpublished_records {
        return Ok(Admission::Proceed);
    }

    let published = doc
        .metadata_by_type(Owner::Node(root), PUBLISHED)
        .into_iter()
        .filter_map(|id| doc.metadata(id).value.as_deref())
        .any(is_published_flag);

    if published {
        Ok(Admission::Proceed)
    } else {
        tracing::debug!("Record is not marked as exportable, skip export");
        Ok(Admission::NotApplicable)
    }
}
