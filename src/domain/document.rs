//! Arena-backed document model
//!
//! A [`Document`] owns one logical tree, one physical tree (the page sequence),
//! the metadata and metadata groups hanging off both, and the file set.
//!
//! All entities live in arenas addressed by the handles in [`super::ids`].
//! Structure is kept in explicit adjacency tables (children, parents, outgoing
//! and incoming references) so that removing a page is a single update across
//! all of them instead of pointer surgery. Handles are never reused: detached
//! nodes stay allocated but are unreachable from either root.

use super::errors::StructureError;
use super::ids::{FileId, GroupId, MetadataId, NodeId};
use super::metadata::{Authority, ContentFile, Metadata, MetadataGroup, Owner};
use super::ruleset::{ParentKind, Ruleset};
use std::collections::HashMap;
use std::sync::Arc;

/// Reference kind linking logical nodes to pages
pub const LOGICAL_PHYSICAL: &str = "logical_physical";

/// Which tree a struct node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructKind {
    Logical,
    Physical,
}

/// A typed node of the logical or physical tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructNode {
    pub kind: StructKind,
    pub type_name: String,
    metadata: Vec<MetadataId>,
    groups: Vec<GroupId>,
    files: Vec<FileId>,
}

/// Directed, labelled edge between two struct nodes
///
/// Every edge is stored twice: in the source's outgoing list and in the
/// target's incoming list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: String,
}

/// In-memory description of one exportable object
#[derive(Debug, Clone)]
pub struct Document {
    ruleset: Arc<Ruleset>,
    nodes: Vec<StructNode>,
    metadata: Vec<Metadata>,
    groups: Vec<MetadataGroup>,
    files: Vec<ContentFile>,
    logical_root: Option<NodeId>,
    physical_root: Option<NodeId>,
    children: HashMap<NodeId, Vec<NodeId>>,
    parents: HashMap<NodeId, NodeId>,
    outgoing: HashMap<NodeId, Vec<Reference>>,
    incoming: HashMap<NodeId, Vec<Reference>>,
    file_set: Vec<FileId>,
    file_pages: HashMap<FileId, NodeId>,
}

impl Document {
    /// Creates an empty document governed by `ruleset`
    pub fn new(ruleset: Arc<Ruleset>) -> Self {
        Self {
            ruleset,
            nodes: Vec::new(),
            metadata: Vec::new(),
            groups: Vec::new(),
            files: Vec::new(),
            logical_root: None,
            physical_root: None,
            children: HashMap::new(),
            parents: HashMap::new(),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            file_set: Vec::new(),
            file_pages: HashMap::new(),
        }
    }

    /// The ruleset attach operations are checked against
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Shared handle to the ruleset
    pub fn ruleset_handle(&self) -> Arc<Ruleset> {
        Arc::clone(&self.ruleset)
    }

    // ------------------------------------------------------------------
    // Struct nodes
    // ------------------------------------------------------------------

    /// Creates a detached struct node of a declared type
    pub fn create_node(
        &mut self,
        kind: StructKind,
        type_name: &str,
    ) -> Result<NodeId, StructureError> {
        if !self.ruleset.struct_types.contains_key(type_name) {
            return Err(StructureError::UnknownStructType(type_name.to_string()));
        }
        Ok(self.alloc_node(kind, type_name))
    }

    pub(crate) fn alloc_node(&mut self, kind: StructKind, type_name: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(StructNode {
            kind,
            type_name: type_name.to_string(),
            metadata: Vec::new(),
            groups: Vec::new(),
            files: Vec::new(),
        });
        id
    }

    /// Returns the node behind a handle issued by this document
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by another document.
    pub fn node(&self, id: NodeId) -> &StructNode {
        &self.nodes[id.index()]
    }

    pub fn logical_root(&self) -> Option<NodeId> {
        self.logical_root
    }

    pub fn physical_root(&self) -> Option<NodeId> {
        self.physical_root
    }

    pub fn set_logical_root(&mut self, id: NodeId) {
        self.logical_root = Some(id);
    }

    pub fn set_physical_root(&mut self, id: NodeId) {
        self.physical_root = Some(id);
    }

    /// Direct children of a node in document order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }

    /// Direct children of the physical root
    pub fn pages(&self) -> Vec<NodeId> {
        self.physical_root
            .map(|root| self.children(root).to_vec())
            .unwrap_or_default()
    }

    /// Appends `child` to `parent` after checking the ruleset
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), StructureError> {
        let parent_type = self.node(parent).type_name.clone();
        let child_type = self.node(child).type_name.clone();
        self.ruleset.check_child(&parent_type, &child_type)?;
        self.push_child(parent, child);
        Ok(())
    }

    pub(crate) fn push_child(&mut self, parent: NodeId, child: NodeId) {
        self.children.entry(parent).or_default().push(child);
        self.parents.insert(child, parent);
    }

    /// Detaches `child` from `parent` without touching references
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(list) = self.children.get_mut(&parent) else {
            return false;
        };
        let Some(pos) = list.iter().position(|c| *c == child) else {
            return false;
        };
        list.remove(pos);
        self.parents.remove(&child);
        true
    }

    /// Removes a page from its parent together with every edge touching it
    ///
    /// Incoming references are removed on both sides before the page is
    /// detached, so no referrer is left pointing at a detached page.
    pub fn remove_page(&mut self, parent: NodeId, page: NodeId) -> bool {
        self.remove_incoming_references(page);
        let outgoing: Vec<NodeId> = self
            .outgoing_references(page)
            .iter()
            .map(|r| r.target)
            .collect();
        for target in outgoing {
            self.remove_reference(page, target);
        }
        self.remove_child(parent, page)
    }

    // ------------------------------------------------------------------
    // References
    // ------------------------------------------------------------------

    /// Adds a labelled edge and its mirror entry
    pub fn add_reference(&mut self, source: NodeId, target: NodeId, kind: &str) {
        let reference = Reference {
            source,
            target,
            kind: kind.to_string(),
        };
        self.outgoing
            .entry(source)
            .or_default()
            .push(reference.clone());
        self.incoming.entry(target).or_default().push(reference);
    }

    /// Edges that start at `node`
    pub fn outgoing_references(&self, node: NodeId) -> &[Reference] {
        self.outgoing.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edges that end at `node`
    pub fn incoming_references(&self, node: NodeId) -> &[Reference] {
        self.incoming.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes the first edge `source -> target` from both sides
    pub fn remove_reference(&mut self, source: NodeId, target: NodeId) -> bool {
        let mut removed = false;
        if let Some(list) = self.outgoing.get_mut(&source) {
            if let Some(pos) = list.iter().position(|r| r.target == target) {
                list.remove(pos);
                removed = true;
            }
        }
        if let Some(list) = self.incoming.get_mut(&target) {
            if let Some(pos) = list.iter().position(|r| r.source == source) {
                list.remove(pos);
            }
        }
        removed
    }

    /// Removes every edge pointing at `target`, returning how many were removed
    pub fn remove_incoming_references(&mut self, target: NodeId) -> usize {
        let sources: Vec<NodeId> = self
            .incoming_references(target)
            .iter()
            .map(|r| r.source)
            .collect();
        sources
            .into_iter()
            .filter(|source| self.remove_reference(*source, target))
            .count()
    }

    // ------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------

    fn owner_parent(&self, owner: Owner) -> (ParentKind, &str) {
        match owner {
            Owner::Node(id) => (ParentKind::Struct, self.node(id).type_name.as_str()),
            Owner::Group(id) => (ParentKind::Group, self.group(id).type_name.as_str()),
        }
    }

    /// Type name of a node or group owner
    pub fn owner_type(&self, owner: Owner) -> &str {
        self.owner_parent(owner).1
    }

    /// Attaches a new metadata entry after checking the ruleset
    pub fn add_metadata(
        &mut self,
        owner: Owner,
        type_name: &str,
        value: Option<String>,
    ) -> Result<MetadataId, StructureError> {
        let (kind, parent_type) = self.owner_parent(owner);
        self.ruleset.check_metadata(kind, parent_type, type_name)?;
        Ok(self.insert_metadata(owner, type_name, value, None))
    }

    pub(crate) fn insert_metadata(
        &mut self,
        owner: Owner,
        type_name: &str,
        value: Option<String>,
        authority: Option<Authority>,
    ) -> MetadataId {
        let id = MetadataId(self.metadata.len() as u32);
        self.metadata.push(Metadata {
            type_name: type_name.to_string(),
            value,
            authority,
            owner,
        });
        match owner {
            Owner::Node(node) => self.nodes[node.index()].metadata.push(id),
            Owner::Group(group) => self.groups[group.index()].metadata.push(id),
        }
        id
    }

    pub fn metadata(&self, id: MetadataId) -> &Metadata {
        &self.metadata[id.index()]
    }

    pub fn metadata_mut(&mut self, id: MetadataId) -> &mut Metadata {
        &mut self.metadata[id.index()]
    }

    /// Metadata of a node or group in insertion order
    pub fn metadata_ids(&self, owner: Owner) -> &[MetadataId] {
        match owner {
            Owner::Node(node) => &self.node(node).metadata,
            Owner::Group(group) => &self.group(group).metadata,
        }
    }

    /// Metadata of one type on a node or group
    pub fn metadata_by_type(&self, owner: Owner, type_name: &str) -> Vec<MetadataId> {
        self.metadata_ids(owner)
            .iter()
            .copied()
            .filter(|id| self.metadata(*id).type_name == type_name)
            .collect()
    }

    /// Value of the first metadata of a type
    pub fn first_value(&self, owner: Owner, type_name: &str) -> Option<&str> {
        self.metadata_ids(owner)
            .iter()
            .map(|id| self.metadata(*id))
            .find(|md| md.type_name == type_name)
            .and_then(|md| md.value.as_deref())
    }

    // ------------------------------------------------------------------
    // Metadata groups
    // ------------------------------------------------------------------

    /// Attaches a new, empty metadata group after checking the ruleset
    pub fn add_group(&mut self, owner: Owner, type_name: &str) -> Result<GroupId, StructureError> {
        let (kind, parent_type) = self.owner_parent(owner);
        self.ruleset.check_group(kind, parent_type, type_name)?;
        Ok(self.insert_group(owner, type_name))
    }

    pub(crate) fn insert_group(&mut self, owner: Owner, type_name: &str) -> GroupId {
        let id = GroupId(self.groups.len() as u32);
        self.groups.push(MetadataGroup {
            type_name: type_name.to_string(),
            metadata: Vec::new(),
            groups: Vec::new(),
            owner,
        });
        match owner {
            Owner::Node(node) => self.nodes[node.index()].groups.push(id),
            Owner::Group(group) => self.groups[group.index()].groups.push(id),
        }
        id
    }

    pub fn group(&self, id: GroupId) -> &MetadataGroup {
        &self.groups[id.index()]
    }

    /// Direct groups of a node or group
    pub fn group_ids(&self, owner: Owner) -> &[GroupId] {
        match owner {
            Owner::Node(node) => &self.node(node).groups,
            Owner::Group(group) => &self.group(group).groups,
        }
    }

    /// Direct groups of one type
    pub fn groups_by_type(&self, owner: Owner, type_name: &str) -> Vec<GroupId> {
        self.group_ids(owner)
            .iter()
            .copied()
            .filter(|id| self.group(*id).type_name == type_name)
            .collect()
    }

    /// Nested groups of one type at any depth below `owner`, depth first
    pub fn groups_by_type_recursive(&self, owner: Owner, type_name: &str) -> Vec<GroupId> {
        let mut found = Vec::new();
        for id in self.group_ids(owner) {
            if self.group(*id).type_name == type_name {
                found.push(*id);
            }
            found.extend(self.groups_by_type_recursive(Owner::Group(*id), type_name));
        }
        found
    }

    /// Detaches a group from its owner
    pub fn remove_group(&mut self, owner: Owner, group: GroupId) -> bool {
        let list = match owner {
            Owner::Node(node) => &mut self.nodes[node.index()].groups,
            Owner::Group(parent) => &mut self.groups[parent.index()].groups,
        };
        match list.iter().position(|g| *g == group) {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Deep-copies a group of another document onto `owner`
    ///
    /// Only the top-level attach is checked against the ruleset; the copied
    /// content was already valid in its source document.
    pub fn import_group(
        &mut self,
        source: &Document,
        group: GroupId,
        owner: Owner,
    ) -> Result<GroupId, StructureError> {
        let type_name = source.group(group).type_name.clone();
        let (kind, parent_type) = self.owner_parent(owner);
        self.ruleset.check_group(kind, parent_type, &type_name)?;
        Ok(self.copy_group(source, group, owner))
    }

    fn copy_group(&mut self, source: &Document, group: GroupId, owner: Owner) -> GroupId {
        let source_group = source.group(group);
        let copy = self.insert_group(owner, &source_group.type_name);
        for md_id in &source_group.metadata {
            let md = source.metadata(*md_id);
            self.insert_metadata(
                Owner::Group(copy),
                &md.type_name,
                md.value.clone(),
                md.authority.clone(),
            );
        }
        for nested in &source_group.groups {
            self.copy_group(source, *nested, Owner::Group(copy));
        }
        copy
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    /// Adds a content file to the file set and associates it with `page`
    pub fn add_content_file(&mut self, page: NodeId, file: ContentFile) -> FileId {
        self.insert_file(file, Some(page))
    }

    pub(crate) fn insert_file(&mut self, file: ContentFile, page: Option<NodeId>) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(file);
        self.file_set.push(id);
        if let Some(page) = page {
            self.nodes[page.index()].files.push(id);
            self.file_pages.insert(id, page);
        }
        id
    }

    /// Associates an already stored file with a page
    pub(crate) fn link_file(&mut self, page: NodeId, id: FileId) {
        self.nodes[page.index()].files.push(id);
        self.file_pages.insert(id, page);
    }

    /// Live files in file-set order
    pub fn file_ids(&self) -> &[FileId] {
        &self.file_set
    }

    pub fn file(&self, id: FileId) -> &ContentFile {
        &self.files[id.index()]
    }

    pub fn file_mut(&mut self, id: FileId) -> &mut ContentFile {
        &mut self.files[id.index()]
    }

    /// Page a file is associated with
    pub fn file_page(&self, id: FileId) -> Option<NodeId> {
        self.file_pages.get(&id).copied()
    }

    /// Files associated with a page
    pub fn page_files(&self, page: NodeId) -> &[FileId] {
        &self.node(page).files
    }

    /// Removes a file from the file set and from its page
    pub fn remove_file(&mut self, id: FileId) -> bool {
        let Some(pos) = self.file_set.iter().position(|f| *f == id) else {
            return false;
        };
        self.file_set.remove(pos);
        if let Some(page) = self.file_pages.remove(&id) {
            self.nodes[page.index()].files.retain(|f| *f != id);
        }
        true
    }

    /// File name (final path segment) of the page's first content file
    pub fn page_image_name(&self, page: NodeId) -> Option<String> {
        self.page_files(page)
            .first()
            .map(|file| file_name(&self.file(*file).location).to_string())
            .filter(|name| !name.is_empty())
    }
}

/// Final segment of a slash-separated location
pub fn file_name(location: &str) -> &str {
    let trimmed = location.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// File name without its last extension
pub fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(pos) if pos > 0 => &file_name[..pos],
        _ => file_name,
    }
}
