//! Ruleset of permitted types
//!
//! The ruleset declares which metadata, group and struct types exist and,
//! optionally, which of them a given parent type accepts. A parent type without
//! an allow-list accepts every declared type.

use super::errors::StructureError;
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Kind of parent a metadata entry or group is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    Struct,
    Group,
}

/// Rules attached to a struct or group type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRules {
    /// Metadata types accepted by this parent (None = any declared type)
    #[serde(default)]
    pub allowed_metadata: Option<BTreeSet<String>>,

    /// Group types accepted by this parent (None = any declared type)
    #[serde(default)]
    pub allowed_groups: Option<BTreeSet<String>>,

    /// Struct types accepted as children (None = any declared type)
    #[serde(default)]
    pub allowed_children: Option<BTreeSet<String>>,
}

/// Registry of known types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    #[serde(default)]
    pub metadata_types: BTreeSet<String>,

    #[serde(default)]
    pub group_types: BTreeMap<String, TypeRules>,

    #[serde(default)]
    pub struct_types: BTreeMap<String, TypeRules>,
}

impl Ruleset {
    /// Loads a ruleset from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let ruleset: Ruleset = serde_json::from_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            metadata_types = ruleset.metadata_types.len(),
            group_types = ruleset.group_types.len(),
            struct_types = ruleset.struct_types.len(),
            "Loaded ruleset"
        );
        Ok(ruleset)
    }

    /// Declares a metadata type
    pub fn with_metadata_type(mut self, name: impl Into<String>) -> Self {
        self.metadata_types.insert(name.into());
        self
    }

    /// Declares a group type with its rules
    pub fn with_group_type(mut self, name: impl Into<String>, rules: TypeRules) -> Self {
        self.group_types.insert(name.into(), rules);
        self
    }

    /// Declares a struct type with its rules
    pub fn with_struct_type(mut self, name: impl Into<String>, rules: TypeRules) -> Self {
        self.struct_types.insert(name.into(), rules);
        self
    }

    /// Whether a metadata type of this name exists
    pub fn has_metadata_type(&self, name: &str) -> bool {
        self.metadata_types.contains(name)
    }

    /// Whether a group type of this name exists
    pub fn has_group_type(&self, name: &str) -> bool {
        self.group_types.contains_key(name)
    }

    fn rules_for(&self, parent: ParentKind, parent_type: &str) -> Option<&TypeRules> {
        match parent {
            ParentKind::Struct => self.struct_types.get(parent_type),
            ParentKind::Group => self.group_types.get(parent_type),
        }
    }

    /// Checks that `metadata_type` may be attached to a parent of `parent_type`
    pub(crate) fn check_metadata(
        &self,
        parent: ParentKind,
        parent_type: &str,
        metadata_type: &str,
    ) -> std::result::Result<(), StructureError> {
        if !self.has_metadata_type(metadata_type) {
            return Err(StructureError::UnknownMetadataType(
                metadata_type.to_string(),
            ));
        }
        let allowed = self
            .rules_for(parent, parent_type)
            .and_then(|rules| rules.allowed_metadata.as_ref());
        match allowed {
            Some(set) if !set.contains(metadata_type) => {
                Err(StructureError::MetadataTypeNotAllowed {
                    metadata_type: metadata_type.to_string(),
                    parent: parent_type.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Checks that a group of `group_type` may be attached to `parent_type`
    pub(crate) fn check_group(
        &self,
        parent: ParentKind,
        parent_type: &str,
        group_type: &str,
    ) -> std::result::Result<(), StructureError> {
        if !self.has_group_type(group_type) {
            return Err(StructureError::UnknownGroupType(group_type.to_string()));
        }
        let allowed = self
            .rules_for(parent, parent_type)
            .and_then(|rules| rules.allowed_groups.as_ref());
        match allowed {
            Some(set) if !set.contains(group_type) => {
                Err(StructureError::MetadataTypeNotAllowed {
                    metadata_type: group_type.to_string(),
                    parent: parent_type.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Checks that a struct of `child_type` may be a child of `parent_type`
    pub(crate) fn check_child(
        &self,
        parent_type: &str,
        child_type: &str,
    ) -> std::result::Result<(), StructureError> {
        if !self.struct_types.contains_key(child_type) {
            return Err(StructureError::UnknownStructType(child_type.to_string()));
        }
        let allowed = self
            .struct_types
            .get(parent_type)
            .and_then(|rules| rules.allowed_children.as_ref());
        match allowed {
            Some(set) if !set.contains(child_type) => Err(StructureError::StructTypeNotAllowed {
                child: child_type.to_string(),
                parent: parent_type.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
