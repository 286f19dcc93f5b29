//! Page reconciliation against the image folder

use super::PHYS_PAGE_NUMBER;
use crate::domain::document::base_name;
use crate::domain::{Document, NodeId, Owner};
use std::collections::HashSet;

/// Outcome of reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub removed: usize,
    pub retained: usize,
}

/// Removes duplicate and missing pages, then renumbers the survivors
///
/// A page is removed when its image base name repeats an earlier page's
/// (the first occurrence wins), when its image file name is not in
/// `folder_names`, or when it has no content file at all. Each removed page
/// loses every reference into it before it is detached. Survivors get
/// `physPageNumber` values `1..N` in their existing order.
pub fn reconcile_pages(doc: &mut Document, folder_names: &[String]) -> ReconcileReport {
    let Some(physical) = doc.physical_root() else {
        return ReconcileReport::default();
    };

    let in_folder: HashSet<&str> = folder_names.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut to_remove: Vec<NodeId> = Vec::new();

    for page in doc.children(physical).to_vec() {
        let Some(name) = doc.page_image_name(page) else {
            tracing::debug!(page = %page, "Page has no content file");
            to_remove.push(page);
            continue;
        };

        let duplicate = !seen.insert(base_name(&name).to_string());
        let missing = !in_folder.contains(name.as_str());
        if duplicate || missing {
            tracing::debug!(
                page = %page,
                image = %name,
                duplicate,
                missing,
                "Removing page"
            );
            to_remove.push(page);
        }
    }

    for page in &to_remove {
        doc.remove_page(physical, *page);
    }

    renumber_pages(doc, physical);
    ReconcileReport {
        removed: to_remove.len(),
        retained: doc.children(physical).len(),
    }
}

/// Rewrites the first `physPageNumber` of every child page
fn renumber_pages(doc: &mut Document, physical: NodeId) {
    let mut order = 1usize;
    for page in doc.children(physical).to_vec() {
        if let Some(id) = doc
            .metadata_by_type(Owner::Node(page), PHYS_PAGE_NUMBER)
            .first()
            .copied()
        {
            doc.metadata_mut(id).value = Some(order.to_string());
            order += 1;
        }
    }
}
