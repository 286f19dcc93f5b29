//! Domain models and types for Lux Export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Arena handles** ([`NodeId`], [`MetadataId`], [`GroupId`], [`FileId`]) and the
//!   validated [`ProcessTitle`]
//! - **The document model** ([`Document`]) with its logical tree, physical page
//!   tree, metadata groups and file set
//! - **The ruleset** ([`Ruleset`]) that every attach operation is checked against
//! - **Vocabulary records** ([`VocabularyRecord`], [`Field`])
//! - **Error types** ([`LuxError`], [`StructureError`], [`VocabularyError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations outside the structure model return [`Result<T, LuxError>`]:
//!
//! ```rust,no_run
//! use lux_export::domain::{Result, Ruleset};
//!
//! fn example() -> Result<()> {
//!     let ruleset = Ruleset::from_file("ruleset.json")?;
//!     println!("{} metadata types", ruleset.metadata_types.len());
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod errors;
pub mod ids;
pub mod metadata;
pub mod result;
pub mod ruleset;
pub mod vocabulary;

// Re-export commonly used types for convenience
pub use document::{Document, Reference, StructKind, StructNode, LOGICAL_PHYSICAL};
pub use errors::{LuxError, StructureError, VocabularyError};
pub use ids::{FileId, GroupId, MetadataId, NodeId, ProcessTitle};
pub use metadata::{Authority, ContentFile, Metadata, MetadataGroup, Owner};
pub use result::Result;
pub use ruleset::{ParentKind, Ruleset, TypeRules};
pub use vocabulary::{Definition, Field, Vocabulary, VocabularyRecord};
