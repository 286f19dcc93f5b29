//! Representative image selection

use crate::domain::document::file_name;
use crate::domain::{Document, Owner};
use regex::Regex;
use std::sync::OnceLock;

pub const MEDIA_GROUP: &str = "Media";

/// Media subjects that qualify a group's file as representative
///
/// The trailing space in `"Award visual "` matches the stored values.
pub const REPRESENTATIVE_SUBJECTS: [&str; 3] = ["Portrait", "Event visual", "Award visual "];

fn collapse_whitespace(value: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE
        .get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
        .replace_all(value, " ")
        .into_owned()
}

/// Flags the content files showing the first qualifying media file
///
/// Runs only when the file set is non-empty and no file is representative
/// yet. Returns how many files were flagged; several files may share the
/// matching suffix.
pub fn select_representative(doc: &mut Document) -> usize {
    let files = doc.file_ids().to_vec();
    if files.is_empty() || files.iter().any(|f| doc.file(*f).representative) {
        return 0;
    }
    let Some(root) = doc.logical_root() else {
        return 0;
    };

    let media = doc
        .groups_by_type(Owner::Node(root), MEDIA_GROUP)
        .into_iter()
        .find(|group| {
            doc.metadata_by_type(Owner::Group(*group), "Subject")
                .into_iter()
                .any(|id| {
                    doc.metadata(id)
                        .value
                        .as_deref()
                        .is_some_and(|v| REPRESENTATIVE_SUBJECTS.contains(&v))
                })
        });
    let Some(media) = media else {
        tracing::debug!("No media group qualifies for a representative image");
        return 0;
    };

    let Some(path) = doc
        .metadata_by_type(Owner::Group(media), "File")
        .into_iter()
        .find_map(|id| doc.metadata(id).value.clone())
    else {
        return 0;
    };
    let target = collapse_whitespace(file_name(&path));
    if target.trim().is_empty() {
        return 0;
    }

    let mut marked = 0;
    for file in files {
        if collapse_whitespace(&doc.file(file).location).ends_with(&target) {
            doc.file_mut(file).representative = true;
            marked += 1;
        }
    }
    tracing::debug!(file = %target, marked, "Selected representative image");
    marked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentFile, FileId, NodeId, Ruleset, StructKind};
    use std::sync::Arc;

    fn document(locations: &[&str]) -> (Document, NodeId, Vec<FileId>) {
        let mut doc = Document::new(Arc::new(Ruleset::default()));
        let root = doc.alloc_node(StructKind::Logical, "Person");
        let physical = doc.alloc_node(StructKind::Physical, "BoundBook");
        doc.set_logical_root(root);
        doc.set_physical_root(physical);
        let files = locations
            .iter()
            .map(|location| {
                let page = doc.alloc_node(StructKind::Physical, "page");
                doc.push_child(physical, page);
                doc.add_content_file(page, ContentFile::new("image/jpeg", *location))
            })
            .collect();
        (doc, root, files)
    }

    fn media(doc: &mut Document, root: NodeId, subject: &str, file: &str) {
        let group = doc.insert_group(Owner::Node(root), MEDIA_GROUP);
        doc.insert_metadata(Owner::Group(group), "Subject", Some(subject.to_string()), None);
        doc.insert_metadata(Owner::Group(group), "File", Some(file.to_string()), None);
    }

    #[test]
    fn test_portrait_marks_matching_file_only() {
        let (mut doc, root, files) = document(&["file:///m/img1.jpg", "file:///m/img2.jpg"]);
        media(&mut doc, root, "Portrait", "/uploads/img1.jpg");

        assert_eq!(select_representative(&mut doc), 1);
        assert!(doc.file(files[0]).representative);
        assert!(!doc.file(files[1]).representative);
    }

    #[test]
    fn test_award_subject_requires_trailing_space() {
        let (mut doc, root, files) = document(&["file:///m/award.jpg"]);
        media(&mut doc, root, "Award visual", "award.jpg");
        assert_eq!(select_representative(&mut doc), 0);

        media(&mut doc, root, "Award visual ", "award.jpg");
        assert_eq!(select_representative(&mut doc), 1);
        assert!(doc.file(files[0]).representative);
    }

    #[test]
    fn test_first_qualifying_group_wins() {
        let (mut doc, root, files) = document(&["file:///m/a.jpg", "file:///m/b.jpg"]);
        media(&mut doc, root, "Other", "a.jpg");
        media(&mut doc, root, "Event visual", "b.jpg");
        media(&mut doc, root, "Portrait", "a.jpg");

        select_representative(&mut doc);
        assert!(!doc.file(files[0]).representative);
        assert!(doc.file(files[1]).representative);
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let (mut doc, root, files) = document(&["file:///m/my  portrait.jpg"]);
        media(&mut doc, root, "Portrait", "/uploads/my portrait.jpg");

        assert_eq!(select_representative(&mut doc), 1);
        assert!(doc.file(files[0]).representative);
    }

    #[test]
    fn test_existing_representative_is_kept() {
        let (mut doc, root, files) = document(&["file:///m/a.jpg", "file:///m/b.jpg"]);
        doc.file_mut(files[1]).representative = true;
        media(&mut doc, root, "Portrait", "a.jpg");

        assert_eq!(select_representative(&mut doc), 0);
        assert!(!doc.file(files[0]).representative);
    }
}
