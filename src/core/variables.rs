//! Variable replacement for paths and generation rules
//!
//! Supported variables:
//! - `{process.title}` and `{process.id}`
//! - `{meta.TYPE}`: first value of `TYPE` on the logical root
//! - `{pages}`: number of physical pages

use crate::domain::{Document, Owner, ProcessTitle};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// The process being exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub title: ProcessTitle,
    pub id: u64,
}

impl ProcessInfo {
    pub fn new(title: ProcessTitle, id: u64) -> Self {
        Self { title, id }
    }
}

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("static pattern"))
}

/// Resolves variables against a document and its process
pub struct VariableReplacer<'a> {
    doc: &'a Document,
    process: &'a ProcessInfo,
}

impl<'a> VariableReplacer<'a> {
    pub fn new(doc: &'a Document, process: &'a ProcessInfo) -> Self {
        Self { doc, process }
    }

    /// Value of a variable name without braces, `None` if it is unknown
    pub fn value(&self, name: &str) -> Option<String> {
        match name.trim() {
            "process.title" => Some(self.process.title.to_string()),
            "process.id" => Some(self.process.id.to_string()),
            "pages" => Some(self.doc.pages().len().to_string()),
            other => {
                let metadata_type = other.strip_prefix("meta.")?;
                let root = self.doc.logical_root()?;
                self.doc
                    .first_value(Owner::Node(root), metadata_type)
                    .map(str::to_string)
            }
        }
    }

    /// Replaces every known `{variable}` in `template`; unknown ones are kept
    pub fn replace(&self, template: &str) -> String {
        placeholder()
            .replace_all(template, |caps: &Captures<'_>| {
                self.value(&caps[1]).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Ruleset, StructKind};
    use std::sync::Arc;

    fn fixture() -> (Document, ProcessInfo) {
        let mut doc = Document::new(Arc::new(Ruleset::default()));
        let root = doc.alloc_node(StructKind::Logical, "Person");
        let physical = doc.alloc_node(StructKind::Physical, "BoundBook");
        doc.set_logical_root(root);
        doc.set_physical_root(physical);
        for _ in 0..3 {
            let page = doc.alloc_node(StructKind::Physical, "page");
            doc.push_child(physical, page);
        }
        doc.insert_metadata(Owner::Node(root), "CatalogIDDigital", Some("LUX-7".into()), None);
        let process = ProcessInfo::new(ProcessTitle::new("lux_artist_0042").unwrap(), 42);
        (doc, process)
    }

    #[test]
    fn test_known_variables() {
        let (doc, process) = fixture();
        let replacer = VariableReplacer::new(&doc, &process);

        assert_eq!(replacer.value("process.title").as_deref(), Some("lux_artist_0042"));
        assert_eq!(replacer.value("process.id").as_deref(), Some("42"));
        assert_eq!(replacer.value("pages").as_deref(), Some("3"));
        assert_eq!(replacer.value("meta.CatalogIDDigital").as_deref(), Some("LUX-7"));
        assert_eq!(replacer.value("meta.Missing"), None);
        assert_eq!(replacer.value("unknown"), None);
    }

    #[test]
    fn test_replace_keeps_unknown_placeholders() {
        let (doc, process) = fixture();
        let replacer = VariableReplacer::new(&doc, &process);

        assert_eq!(
            replacer.replace("/export/{process.title}/{unknown}/media"),
            "/export/lux_artist_0042/{unknown}/media"
        );
    }
}
