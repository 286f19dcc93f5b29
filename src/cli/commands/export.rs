//! Export command implementation
//!
//! This module implements the `export` command, which prepares one process
//! descriptor for publication.

use crate::config::load_config;
use crate::core::export::{ExportCoordinator, ExportRequest, ExportStatus, ExportSummary};
use crate::core::variables::ProcessInfo;
use crate::domain::{LuxError, ProcessTitle};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Descriptor (meta.json) of the process to export
    #[arg(long, value_name = "FILE")]
    pub descriptor: PathBuf,

    /// Folder holding the page images
    #[arg(long, value_name = "DIR")]
    pub image_folder: PathBuf,

    /// Folder listed when rebuilding pagination and relinking original files
    /// (defaults to --image-folder)
    #[arg(long, value_name = "DIR")]
    pub media_folder: Option<PathBuf>,

    /// Process title; names the exported file
    #[arg(long)]
    pub title: String,

    /// Process id
    #[arg(long)]
    pub process_id: u64,

    /// Override export.destination
    #[arg(long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Dry run mode - run every stage without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let title = match ProcessTitle::new(self.title.as_str()) {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(error = %e, "Invalid process title");
                eprintln!("Invalid process title: {e}");
                return Ok(2);
            }
        };

        if self.dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        tracing::info!("Creating export coordinator");
        let coordinator = match ExportCoordinator::from_config(config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(match e {
                    LuxError::Configuration(_) => 2,
                    _ => 5, // Fatal error exit code
                });
            }
        };

        let request = ExportRequest {
            descriptor: self.descriptor.clone(),
            image_folder: self.image_folder.clone(),
            media_folder: self.media_folder.clone(),
            process: ProcessInfo::new(title, self.process_id),
            destination: self.destination.clone(),
            dry_run: self.dry_run,
        };

        println!("🚀 Exporting {}...", request.process.title);
        println!();
        let summary = coordinator.run(&request);
        print_summary(&summary);

        let exit_code = match summary.status {
            ExportStatus::Exported => {
                if summary.errors.is_empty() {
                    println!("✅ Export completed successfully!");
                } else {
                    println!("⚠️  Export completed with problems");
                }
                0
            }
            ExportStatus::NotApplicable => {
                println!("ℹ️  Record is not published; nothing exported");
                0
            }
            ExportStatus::Failed => {
                println!("❌ Export failed");
                1
            }
        };

        Ok(exit_code)
    }
}

fn print_summary(summary: &ExportSummary) {
    println!("📊 Export Summary:");
    println!("  Title: {}", summary.title);
    println!("  Status: {}", summary.status);
    println!(
        "  Started: {}",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Groups pruned: {}", summary.groups_pruned);
    println!(
        "  Sources / bibliography: {} / {}",
        summary.source_groups, summary.bibliography_groups
    );
    if summary.locations_added > 0 {
        println!("  Event locations added: {}", summary.locations_added);
    }
    if let Some(created) = summary.pages_rebuilt {
        println!("  Pages rebuilt: {created}");
    }
    println!("  Pages: {} ({} removed)", summary.pages, summary.pages_removed);
    println!("  Representative images: {}", summary.representative_marked);
    println!(
        "  Metadata resolved / derived / generated: {} / {} / {}",
        summary.metadata_resolved, summary.metadata_derived, summary.metadata_generated
    );
    println!("  Group fields filled: {}", summary.group_fields_filled);
    if let Some(plan) = &summary.plan {
        let names: Vec<_> = plan.groups.iter().map(|g| g.name.as_str()).collect();
        println!("  File groups: {}", names.join(", "));
        if plan.relinked > 0 {
            println!("  Pages relinked to originals: {}", plan.relinked);
        }
    }
    if let Some(path) = &summary.output_path {
        println!("  Output: {}", path.display());
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Problems encountered:");
        for error in &summary.errors {
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Context: {context}");
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(title: &str) -> ExportArgs {
        ExportArgs {
            descriptor: PathBuf::from("/data/42/meta.json"),
            image_folder: PathBuf::from("/data/42/images"),
            media_folder: None,
            title: title.to_string(),
            process_id: 42,
            destination: None,
            dry_run: true,
        }
    }

    #[test]
    fn test_missing_config_is_configuration_error() {
        let code = args("lux_artist_0042")
            .execute("/nonexistent/lux-export.toml")
            .unwrap();
        assert_eq!(code, 2);
    }

    #[test]
    fn test_missing_ruleset_is_configuration_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[ruleset]
path = "/nonexistent/ruleset.json"

[vocabulary_service]
path = "/nonexistent/vocabularies.json"
"#
        )
        .unwrap();

        let code = args("lux_artist_0042")
            .execute(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(code, 2);
    }

    #[test]
    fn test_invalid_title_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[ruleset]\npath = \"r.json\"\n\n[vocabulary_service]\npath = \"v.json\"\n"
        )
        .unwrap();

        let code = args("").execute(file.path().to_str().unwrap()).unwrap();
        assert_eq!(code, 2);
    }
}
