//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::core::filegroups::FileGroupPlan;
use crate::domain::LuxError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Overall outcome of one export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStatus {
    /// The descriptor was prepared (and written unless dry-run)
    Exported,
    /// Admission rejected the document; nothing was written
    NotApplicable,
    /// A fatal problem aborted the export
    Failed,
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportStatus::Exported => "exported",
            ExportStatus::NotApplicable => "not applicable",
            ExportStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Summary of an export operation
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Process title the export ran for
    pub title: String,

    pub status: ExportStatus,

    /// When the export started
    pub started_at: DateTime<Utc>,

    /// Duration of the export
    pub duration: Duration,

    /// Problems encountered during export, in order of occurrence
    pub errors: Vec<ExportError>,

    /// Unpublished metadata groups removed
    pub groups_pruned: usize,

    /// Source groups collected from the retained groups
    pub source_groups: usize,

    /// Bibliography groups among the retained groups
    pub bibliography_groups: usize,

    /// Location groups copied from related agents
    pub locations_added: usize,

    /// Pages created by the pagination rebuild, if it ran
    pub pages_rebuilt: Option<usize>,

    /// Pages removed by reconciliation
    pub pages_removed: usize,

    /// Pages left in the exported descriptor
    pub pages: usize,

    /// Content files flagged representative
    pub representative_marked: usize,

    /// Authority-linked metadata resolved against the vocabulary
    pub metadata_resolved: usize,

    /// Metadata derived from resolved records
    pub metadata_derived: usize,

    /// Group fields filled from vocabulary records
    pub group_fields_filled: usize,

    /// Metadata created by generation rules
    pub metadata_generated: usize,

    /// Planned virtual file groups
    pub plan: Option<FileGroupPlan>,

    /// Whether the rebuilt pagination was written back to the source descriptor
    pub written_back: bool,

    /// Where the exported descriptor was written
    pub output_path: Option<PathBuf>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: ExportStatus::Exported,
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            errors: Vec::new(),
            groups_pruned: 0,
            source_groups: 0,
            bibliography_groups: 0,
            locations_added: 0,
            pages_rebuilt: None,
            pages_removed: 0,
            pages: 0,
            representative_marked: 0,
            metadata_resolved: 0,
            metadata_derived: 0,
            group_fields_filled: 0,
            metadata_generated: 0,
            plan: None,
            written_back: false,
            output_path: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Add several errors, keeping their order
    pub fn extend_errors(&mut self, errors: impl IntoIterator<Item = ExportError>) {
        self.errors.extend(errors);
    }

    /// Marks the export failed with the fatal error that aborted it
    pub fn fail(&mut self, error: &LuxError) {
        self.status = ExportStatus::Failed;
        self.add_error(ExportError::from(error));
    }

    /// True unless a fatal problem aborted the export
    ///
    /// A not-applicable export counts as successful.
    pub fn is_successful(&self) -> bool {
        self.status != ExportStatus::Failed
    }

    /// Problems as human-readable strings
    pub fn problems(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            title = %self.title,
            status = %self.status,
            started_at = %self.started_at.to_rfc3339(),
            groups_pruned = self.groups_pruned,
            pages_removed = self.pages_removed,
            pages = self.pages,
            pages_rebuilt = ?self.pages_rebuilt,
            metadata_resolved = self.metadata_resolved,
            metadata_derived = self.metadata_derived,
            group_fields_filled = self.group_fields_filled,
            metadata_generated = self.metadata_generated,
            duration_ms = self.duration.as_millis() as u64,
            "Export finished"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export finished with problems"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = ?error.context,
                    "Export problem"
                );
            }
        }
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Descriptor read/write error
    Descriptor,
    /// Missing or inconsistent structure
    Structure,
    /// Vocabulary lookup error
    Vocabulary,
    /// Metadata generation error
    Generation,
    /// Filesystem access error
    Storage,
    /// Configuration error
    Configuration,
    /// Unknown error
    Unknown,
}

/// Export error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., metadata type, group type)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{} ({})", self.message, context),
            None => f.write_str(&self.message),
        }
    }
}

impl From<&LuxError> for ExportError {
    fn from(err: &LuxError) -> Self {
        let error_type = match err {
            LuxError::Configuration(_) | LuxError::Validation(_) => ExportErrorType::Configuration,
            LuxError::MissingLogicalStructure | LuxError::Structure(_) => {
                ExportErrorType::Structure
            }
            LuxError::Descriptor(_) | LuxError::Serialization(_) => ExportErrorType::Descriptor,
            LuxError::AccessDenied(_) | LuxError::Io(_) => ExportErrorType::Storage,
            LuxError::Vocabulary(_) => ExportErrorType::Vocabulary,
            LuxError::Other(_) => ExportErrorType::Unknown,
        };
        Self::new(error_type, err.to_string())
    }
}
