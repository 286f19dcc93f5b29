//! Core business logic for Lux Export.
//!
//! This module contains the export stages and their orchestration.
//!
//! # Modules
//!
//! - [`admission`] - Decides whether a document may be exported
//! - [`pruning`] - Removes unpublished metadata groups
//! - [`structure`] - Page reconciliation and pagination rebuild
//! - [`representative`] - Representative image selection
//! - [`enrich`] - Vocabulary enrichment and event locations
//! - [`generation`] - Metadata generation rules
//! - [`filegroups`] - File-group planning
//! - [`export`] - Export orchestration and reporting
//!
//! # Export Workflow
//!
//! 1. **Read** the descriptor
//! 2. **Admit**: skip documents that are not published
//! 3. **Prune** unpublished groups
//! 4. **Add event location** from the organizing agent (optional)
//! 5. **Rebuild pagination** from the media folder (optional)
//! 6. **Reconcile** pages against the image folder
//! 7. **Select** the representative image
//! 8. **Enrich** groups and authority-linked metadata
//! 9. **Generate** configured metadata
//! 10. **Plan** file groups and **write** `{title}.json`
//!
//! # Example
//!
//! ```rust,no_run
//! use lux_export::config::load_config;
//! use lux_export::core::export::{ExportCoordinator, ExportRequest};
//! use lux_export::core::variables::ProcessInfo;
//! use lux_export::domain::ProcessTitle;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("lux-export.toml")?;
//! let coordinator = ExportCoordinator::from_config(config)?;
//!
//! let process = ProcessInfo::new(ProcessTitle::new("lux_artist_0042")?, 42);
//! let request = ExportRequest::new("/data/42/meta.json", "/data/42/images/media", process);
//! let summary = coordinator.run(&request);
//!
//! println!("Status: {}", summary.status);
//! for problem in summary.problems() {
//!     println!("  {problem}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod admission;
pub mod enrich;
pub mod export;
pub mod filegroups;
pub mod generation;
pub mod pruning;
pub mod representative;
pub mod structure;
pub mod variables;
