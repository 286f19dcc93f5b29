//! Metadata value types
//!
//! Typed scalar metadata, metadata groups and content files as stored in the
//! [`Document`](super::document::Document) arena.

use super::ids::{GroupId, NodeId};
use serde::{Deserialize, Serialize};

/// Pointer from a metadata value to an external controlled-vocabulary record
///
/// `id` names the authority (for vocabulary links: the vocabulary name),
/// `uri` is the authority base and `value` the full record address. Once
/// resolved against the vocabulary service, `value` has the shape
/// `{base}/{vocabularyId}/{recordId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub id: String,
    pub uri: String,
    pub value: String,
}

impl Authority {
    /// Creates a new authority reference
    pub fn new(id: impl Into<String>, uri: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            value: value.into(),
        }
    }

    /// Whether this authority points into a vocabulary service
    pub fn is_vocabulary_link(&self) -> bool {
        !self.value.trim().is_empty() && self.uri.contains("vocabulary")
    }
}

/// Owner of a metadata entry or a metadata group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Node(NodeId),
    Group(GroupId),
}

/// Typed scalar metadata value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub type_name: String,
    pub value: Option<String>,
    pub authority: Option<Authority>,
    pub(crate) owner: Owner,
}

impl Metadata {
    /// The node or group this metadata is attached to
    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Current value, empty string when unset
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// True when the value is unset, blank, or the literal `null`
    pub fn is_blank_or_null(&self) -> bool {
        is_blank_or_null(self.value.as_deref())
    }
}

/// Typed container of metadata and nested groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataGroup {
    pub type_name: String,
    pub(crate) metadata: Vec<super::ids::MetadataId>,
    pub(crate) groups: Vec<GroupId>,
    pub(crate) owner: Owner,
}

impl MetadataGroup {
    /// The node or group this group belongs to
    pub fn owner(&self) -> Owner {
        self.owner
    }
}

/// A file referenced by a physical page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFile {
    pub mimetype: String,
    pub location: String,
    #[serde(default)]
    pub representative: bool,
}

impl ContentFile {
    /// Creates a non-representative content file
    pub fn new(mimetype: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            mimetype: mimetype.into(),
            location: location.into(),
            representative: false,
        }
    }
}

/// True when `value` is absent, whitespace only, or `null` in any casing
pub fn is_blank_or_null(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => v.trim().is_empty() || v.eq_ignore_ascii_case("null"),
    }
}

/// True when `value` is non-empty and made of ASCII digits only
pub fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
