//! Document descriptor persistence
//!
//! The export core only ever sees the arena [`Document`]; this module turns
//! descriptor files into documents and back.

pub mod json;
pub mod models;

pub use json::JsonDescriptorStore;
pub use models::DescriptorFile;

use crate::domain::{Document, Result, Ruleset};
use std::path::Path;
use std::sync::Arc;

/// Descriptor reader/writer
///
/// Implementations must map permission failures to
/// [`LuxError::AccessDenied`](crate::domain::LuxError::AccessDenied) and any
/// other read or parse failure to
/// [`LuxError::Descriptor`](crate::domain::LuxError::Descriptor).
pub trait DescriptorStore: Send + Sync {
    /// Reads the descriptor at `path` into a document governed by `ruleset`
    fn read(&self, path: &Path, ruleset: Arc<Ruleset>) -> Result<Document>;

    /// Writes `document` to `path`, creating parent directories
    fn write(&self, path: &Path, document: &Document) -> Result<()>;
}
