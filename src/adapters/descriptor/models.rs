//! Descriptor file models
//!
//! Nested serde representation of a [`Document`]. Struct nodes and files carry
//! string ids (`LOG_0000`, `PHYS_0001`, `FILE_0001`) that references and pages
//! use to point at each other.

use crate::domain::{
    Authority, ContentFile, Document, LuxError, NodeId, Owner, Result, Ruleset, StructKind,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Root of a descriptor file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptorFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical: Option<StructEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical: Option<StructEntry>,

    #[serde(default)]
    pub files: Vec<FileEntry>,

    #[serde(default)]
    pub references: Vec<ReferenceEntry>,
}

/// A logical or physical struct node with its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructEntry {
    pub id: String,

    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupEntry>,

    /// Ids of the files shown on this node (pages only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StructEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Authority>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: String,

    #[serde(flatten)]
    pub file: ContentFile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub source: String,
    pub target: String,

    #[serde(rename = "type")]
    pub kind: String,
}

impl DescriptorFile {
    /// Builds the arena document described by this file
    ///
    /// Entries are inserted without ruleset checks: the descriptor is taken
    /// as authoritative. Dangling reference or file ids are errors.
    pub fn into_document(self, ruleset: Arc<Ruleset>) -> Result<Document> {
        let mut doc = Document::new(ruleset);
        let mut node_ids = HashMap::new();

        let mut file_ids = HashMap::new();
        for entry in self.files {
            let id = doc.insert_file(entry.file, None);
            file_ids.insert(entry.id, id);
        }

        if let Some(logical) = self.logical {
            let root = insert_struct(
                &mut doc,
                StructKind::Logical,
                logical,
                &mut node_ids,
                &file_ids,
            )?;
            doc.set_logical_root(root);
        }
        if let Some(physical) = self.physical {
            let root = insert_struct(
                &mut doc,
                StructKind::Physical,
                physical,
                &mut node_ids,
                &file_ids,
            )?;
            doc.set_physical_root(root);
        }

        for reference in self.references {
            let source = resolve(&node_ids, &reference.source)?;
            let target = resolve(&node_ids, &reference.target)?;
            doc.add_reference(source, target, &reference.kind);
        }

        Ok(doc)
    }

    /// Serializes the nodes reachable from the two roots
    ///
    /// Ids are reassigned in depth-first order, so detached pages and files
    /// removed from the file set are not written.
    pub fn from_document(doc: &Document) -> Self {
        let mut file_names = HashMap::new();
        let files = doc
            .file_ids()
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let name = format!("FILE_{:04}", i + 1);
                file_names.insert(*id, name.clone());
                FileEntry {
                    id: name,
                    file: doc.file(*id).clone(),
                }
            })
            .collect();

        let mut node_names = HashMap::new();
        let mut counters = (0usize, 0usize);
        let logical = doc
            .logical_root()
            .map(|root| export_struct(doc, root, &mut node_names, &mut counters, &file_names));
        let physical = doc
            .physical_root()
            .map(|root| export_struct(doc, root, &mut node_names, &mut counters, &file_names));

        let mut sources: Vec<&NodeId> = node_names.keys().collect();
        sources.sort();
        let mut references = Vec::new();
        for source in sources {
            for reference in doc.outgoing_references(*source) {
                if let Some(target) = node_names.get(&reference.target) {
                    references.push(ReferenceEntry {
                        source: node_names[source].clone(),
                        target: target.clone(),
                        kind: reference.kind.clone(),
                    });
                }
            }
        }

        Self {
            logical,
            physical,
            files,
            references,
        }
    }
}

fn resolve(node_ids: &HashMap<String, NodeId>, id: &str) -> Result<NodeId> {
    node_ids
        .get(id)
        .copied()
        .ok_or_else(|| LuxError::Descriptor(format!("Reference to unknown struct id {id}")))
}

fn insert_struct(
    doc: &mut Document,
    kind: StructKind,
    entry: StructEntry,
    node_ids: &mut HashMap<String, NodeId>,
    file_ids: &HashMap<String, crate::domain::FileId>,
) -> Result<NodeId> {
    let node = doc.alloc_node(kind, &entry.type_name);
    if node_ids.insert(entry.id.clone(), node).is_some() {
        return Err(LuxError::Descriptor(format!(
            "Duplicate struct id {}",
            entry.id
        )));
    }

    insert_metadata(doc, Owner::Node(node), entry.metadata);
    insert_groups(doc, Owner::Node(node), entry.groups);

    for file in entry.files {
        let id = file_ids
            .get(&file)
            .copied()
            .ok_or_else(|| LuxError::Descriptor(format!("Page refers to unknown file id {file}")))?;
        doc.link_file(node, id);
    }

    for child in entry.children {
        let child_id = insert_struct(doc, kind, child, node_ids, file_ids)?;
        doc.push_child(node, child_id);
    }
    Ok(node)
}

fn insert_metadata(doc: &mut Document, owner: Owner, entries: Vec<MetadataEntry>) {
    for md in entries {
        doc.insert_metadata(owner, &md.type_name, md.value, md.authority);
    }
}

fn insert_groups(doc: &mut Document, owner: Owner, entries: Vec<GroupEntry>) {
    for group in entries {
        let id = doc.insert_group(owner, &group.type_name);
        insert_metadata(doc, Owner::Group(id), group.metadata);
        insert_groups(doc, Owner::Group(id), group.groups);
    }
}

fn export_struct(
    doc: &Document,
    node: NodeId,
    names: &mut HashMap<NodeId, String>,
    counters: &mut (usize, usize),
    file_names: &HashMap<crate::domain::FileId, String>,
) -> StructEntry {
    let struct_node = doc.node(node);
    let id = match struct_node.kind {
        StructKind::Logical => {
            counters.0 += 1;
            format!("LOG_{:04}", counters.0 - 1)
        }
        StructKind::Physical => {
            counters.1 += 1;
            format!("PHYS_{:04}", counters.1 - 1)
        }
    };
    names.insert(node, id.clone());

    StructEntry {
        id,
        type_name: struct_node.type_name.clone(),
        metadata: export_metadata(doc, Owner::Node(node)),
        groups: export_groups(doc, Owner::Node(node)),
        files: doc
            .page_files(node)
            .iter()
            .filter_map(|f| file_names.get(f).cloned())
            .collect(),
        children: doc
            .children(node)
            .iter()
            .map(|child| export_struct(doc, *child, names, counters, file_names))
            .collect(),
    }
}

fn export_metadata(doc: &Document, owner: Owner) -> Vec<MetadataEntry> {
    doc.metadata_ids(owner)
        .iter()
        .map(|id| {
            let md = doc.metadata(*id);
            MetadataEntry {
                type_name: md.type_name.clone(),
                value: md.value.clone(),
                authority: md.authority.clone(),
            }
        })
        .collect()
}

fn export_groups(doc: &Document, owner: Owner) -> Vec<GroupEntry> {
    doc.group_ids(owner)
        .iter()
        .map(|id| GroupEntry {
            type_name: doc.group(*id).type_name.clone(),
            metadata: export_metadata(doc, Owner::Group(*id)),
            groups: export_groups(doc, Owner::Group(*id)),
        })
        .collect()
}
