//! Pagination rebuild from a folder listing

use super::{LOGICAL_PAGE_NUMBER, PAGE_TYPE, PHYS_PAGE_NUMBER};
use crate::adapters::storage::FileInventory;
use crate::core::export::summary::{ExportError, ExportErrorType};
use crate::domain::{ContentFile, Document, Owner, Result, StructKind, LOGICAL_PHYSICAL};
use std::path::Path;

/// Logical page number given to every rebuilt page
pub const UNCOUNTED: &str = "uncounted";

/// Outcome of a pagination rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationReport {
    /// Whether the rebuild ran at all
    pub rebuilt: bool,

    /// Pages present before the rebuild
    pub removed: usize,

    /// Pages created from the listing
    pub created: usize,

    /// The caller must persist the document
    pub write_back: bool,

    /// Pages that could not be fully attached
    pub problems: Vec<ExportError>,
}

/// `file://` location of `name` inside `folder`
pub fn file_location(folder: &Path, name: &str) -> String {
    let folder = folder.to_string_lossy();
    if folder.ends_with('/') {
        format!("file://{folder}{name}")
    } else {
        format!("file://{folder}/{name}")
    }
}

/// Regenerates the physical page sequence from the files in `folder`
///
/// Does nothing when there is no physical root or it has no pages. Otherwise
/// every page, every reference into a page and every content file is removed
/// regardless of what is on disk, and one page is created per listed file.
///
/// # Errors
///
/// Fails when the folder cannot be listed or the ruleset has no `page` type.
pub fn rebuild_pagination(
    doc: &mut Document,
    inventory: &dyn FileInventory,
    folder: &Path,
) -> Result<PaginationReport> {
    let Some(physical) = doc.physical_root() else {
        return Ok(PaginationReport::default());
    };
    let old_pages = doc.children(physical).to_vec();
    if old_pages.is_empty() {
        return Ok(PaginationReport::default());
    }

    let listing = inventory.list_paths(folder)?;
    let mut report = PaginationReport {
        rebuilt: true,
        removed: old_pages.len(),
        ..Default::default()
    };

    for page in &old_pages {
        doc.remove_page(physical, *page);
    }
    for file in doc.file_ids().to_vec() {
        doc.remove_file(file);
    }

    let logical = doc.logical_root();
    let mut order = 0usize;
    for path in &listing {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let page = doc.create_node(StructKind::Physical, PAGE_TYPE)?;
        let number = order + 1;

        let attached = doc
            .add_child(physical, page)
            .and_then(|_| {
                doc.add_metadata(Owner::Node(page), PHYS_PAGE_NUMBER, Some(number.to_string()))
            })
            .and_then(|_| {
                doc.add_metadata(
                    Owner::Node(page),
                    LOGICAL_PAGE_NUMBER,
                    Some(UNCOUNTED.to_string()),
                )
            });
        if let Err(e) = attached {
            doc.remove_page(physical, page);
            tracing::error!(file = %name, error = %e, "Failed to create page");
            report.problems.push(
                ExportError::new(ExportErrorType::Structure, e.to_string())
                    .with_context(format!("file={name}")),
            );
            continue;
        }
        order = number;

        if let Some(logical) = logical {
            doc.add_reference(logical, page, LOGICAL_PHYSICAL);
        }
        let mimetype = inventory.probe_mimetype(path);
        doc.add_content_file(page, ContentFile::new(mimetype, file_location(folder, name)));
        report.created += 1;
    }

    report.write_back = !old_pages.is_empty();
    tracing::info!(
        removed = report.removed,
        created = report.created,
        folder = %folder.display(),
        "Rebuilt pagination"
    );
    Ok(report)
}
