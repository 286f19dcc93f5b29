//! Export orchestration
//!
//! This module provides the export workflow for Lux Export:
//! - Coordination of the export stages
//! - Summary and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::{ExportCoordinator, ExportRequest};
pub use summary::{ExportError, ExportErrorType, ExportStatus, ExportSummary};
