//! Domain error types
//!
//! This module defines the error hierarchy for Lux Export.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Lux Export error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum LuxError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The document has no logical root
    #[error("No logical structure defined")]
    MissingLogicalStructure,

    /// The descriptor could not be read or written
    #[error("Descriptor error: {0}")]
    Descriptor(String),

    /// Filesystem access was denied
    #[error("Access to {0} was denied.")]
    AccessDenied(String),

    /// Structure model errors
    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),

    /// Vocabulary lookup errors
    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while editing the logical or physical structure
///
/// These mirror the ruleset checks: a metadata or struct type must be known
/// and permitted on the parent it is attached to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// Metadata type is not declared in the ruleset
    #[error("Unknown metadata type: {0}")]
    UnknownMetadataType(String),

    /// Metadata type exists but the parent does not accept it
    #[error("Metadata type {metadata_type} is not allowed for {parent}")]
    MetadataTypeNotAllowed {
        metadata_type: String,
        parent: String,
    },

    /// Metadata group type is not declared in the ruleset
    #[error("Unknown metadata group type: {0}")]
    UnknownGroupType(String),

    /// Struct type is not declared in the ruleset
    #[error("Unknown struct type: {0}")]
    UnknownStructType(String),

    /// Struct type is not accepted as a child of the parent
    #[error("Struct type {child} is not allowed as child of {parent}")]
    StructTypeNotAllowed { child: String, parent: String },

    /// A node id does not resolve to a live node
    #[error("Node not found: {0}")]
    NodeNotFound(String),
}

/// Vocabulary lookup errors
///
/// Scoped to a single field or group; the enrichment stages record these as
/// problems and continue with the next candidate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    /// No record matched the id or title
    #[error("Vocabulary record not found: vocabulary {vocabulary_id}, record {record}")]
    RecordNotFound { vocabulary_id: i64, record: String },

    /// The vocabulary itself does not exist
    #[error("Vocabulary not found: {0}")]
    VocabularyNotFound(i64),

    /// The backing service failed
    #[error("Vocabulary lookup failed: {0}")]
    LookupFailed(String),

    /// An authority value did not have the `.../{vocabularyId}/{recordId}` shape
    #[error("Malformed authority value: {0}")]
    MalformedAuthority(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for LuxError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            LuxError::AccessDenied(err.to_string())
        } else {
            LuxError::Io(err.to_string())
        }
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LuxError {
    fn from(err: serde_json::Error) -> Self {
        LuxError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LuxError {
    fn from(err: toml::de::Error) -> Self {
        LuxError::Configuration(format!("TOML parse error: {err}"))
    }
}
