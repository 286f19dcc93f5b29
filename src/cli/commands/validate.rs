//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Lux Export configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Ruleset: {}", config.ruleset.path);
        println!("  Vocabularies: {}", config.vocabulary_service.path);
        println!("  Destination: {}", config.export.destination);
        println!("  Cleanup Pagination: {}", config.export.cleanup_pagination);
        println!(
            "  Export Unpublished Records: {}",
            config.export.export_unpublished_records
        );
        if config.export.add_event_location_from_agent {
            println!(
                "  Event Location From Agent: yes ({})",
                config.export.metadata_folder
            );
        }
        println!(
            "  Vocabulary Base URL: {}",
            config.export.base_url().unwrap_or("(authority URI)")
        );
        println!("  Generation Rules: {}", config.metadata.len());
        println!("  Vocabulary Records: {}", config.vocabulary.len());
        let groups: Vec<_> = config.file_groups.iter().map(|g| g.name.as_str()).collect();
        println!("  File Groups: {groups:?}");
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_args_creation() {
        let args = ValidateArgs {};
        let _ = format!("{args:?}");
    }

    #[test]
    fn test_valid_config_exits_zero() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[ruleset]\npath = \"ruleset.json\"\n\n[vocabulary_service]\npath = \"vocabularies.json\"\n"
        )
        .unwrap();

        let code = ValidateArgs {}.execute(file.path().to_str().unwrap()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_invalid_config_exits_two() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[application]\nlog_level = \"loud\"\n\n[ruleset]\npath = \"r.json\"\n\n[vocabulary_service]\npath = \"v.json\"\n"
        )
        .unwrap();

        let code = ValidateArgs {}.execute(file.path().to_str().unwrap()).unwrap();
        assert_eq!(code, 2);
    }
}
