//! File-group planning
//!
//! Turns the configured file groups into the virtual file groups written into
//! the exported descriptor. When a group references the original files, page
//! content files are relinked to the matching files of the media folder.

use crate::adapters::storage::FileInventory;
use crate::config::FileGroupConfig;
use crate::core::variables::{ProcessInfo, VariableReplacer};
use crate::domain::document::{base_name, file_name};
use crate::domain::{Document, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Name of the main file group
pub const MAIN_GROUP: &str = "PRESENTATION";

/// A file group of the exported descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualFileGroup {
    pub name: String,
    pub path_to_files: String,
    pub mimetype: String,
    pub file_suffix: String,
    pub extensions_to_ignore: Vec<String>,
    pub ignore_configured_mimetype_and_suffix: bool,
    pub main_group: bool,
}

impl VirtualFileGroup {
    fn from_config(config: &FileGroupConfig, replacer: &VariableReplacer<'_>) -> Self {
        Self {
            name: config.name.clone(),
            path_to_files: replacer.replace(&config.path),
            mimetype: config.mimetype.clone(),
            file_suffix: config.suffix.trim().to_string(),
            extensions_to_ignore: config
                .ignore_mimetypes
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .collect(),
            ignore_configured_mimetype_and_suffix: config.use_original_files,
            main_group: config.name == MAIN_GROUP,
        }
    }
}

/// Virtual file groups of one export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileGroupPlan {
    pub groups: Vec<VirtualFileGroup>,
    /// Pages whose content file now points at an original file
    pub relinked: usize,
}

impl FileGroupPlan {
    /// The `PRESENTATION` group, if planned
    pub fn main_group(&self) -> Option<&VirtualFileGroup> {
        self.groups.iter().find(|g| g.main_group)
    }
}

/// Plans the file groups and relinks pages to original files when requested
///
/// A group with a `folder` is planned only if that folder exists and is not
/// empty. Group paths and folders may contain variables.
///
/// # Errors
///
/// Fails when a folder cannot be inspected.
pub fn plan_file_groups(
    doc: &mut Document,
    configs: &[FileGroupConfig],
    process: &ProcessInfo,
    inventory: &dyn FileInventory,
    media_folder: &Path,
) -> Result<FileGroupPlan> {
    let mut plan = FileGroupPlan::default();
    let mut use_original_files = false;
    {
        let replacer = VariableReplacer::new(doc, process);
        for config in configs {
            use_original_files |= config.use_original_files;

            if let Some(folder) = config.folder.as_deref().filter(|f| !f.trim().is_empty()) {
                let folder = PathBuf::from(replacer.replace(folder));
                if !inventory.exists(&folder)? || inventory.is_empty(&folder)? {
                    tracing::debug!(
                        group = %config.name,
                        folder = %folder.display(),
                        "Skipping file group without files"
                    );
                    continue;
                }
            }
            plan.groups.push(VirtualFileGroup::from_config(config, &replacer));
        }
    }

    if use_original_files {
        let mut originals = inventory.list_paths(media_folder)?;
        sort_originals(&mut originals);
        plan.relinked = relink_pages(doc, &originals);
    }

    tracing::debug!(
        groups = plan.groups.len(),
        relinked = plan.relinked,
        "Planned file groups"
    );
    Ok(plan)
}

/// Sorts by name; among names whose base names are equal ignoring case, the
/// one without extension comes last
fn sort_originals(paths: &mut [PathBuf]) {
    paths.sort_by_cached_key(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base = base_name(&name).to_lowercase();
        let no_extension = base_name(&name).len() == name.len();
        (base, no_extension, name)
    });
}

/// Points each page's content file at the first original with the same base name
fn relink_pages(doc: &mut Document, originals: &[PathBuf]) -> usize {
    if originals.is_empty() {
        return 0;
    }
    let mut relinked = 0;
    for page in doc.pages() {
        let Some(image) = doc.page_image_name(page) else {
            continue;
        };
        let wanted = base_name(&image).to_string();
        let found = originals.iter().find(|path| {
            let location = path.to_string_lossy();
            base_name(file_name(&location)).eq_ignore_ascii_case(&wanted)
        });
        if let (Some(path), Some(file)) = (found, doc.page_files(page).first().copied()) {
            doc.file_mut(file).location = path.to_string_lossy().into_owned();
            relinked += 1;
        }
    }
    relinked
}
