//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::config::DEFAULT_CONFIG_FILE;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: String,

    /// Include example rules, vocabulary records and file groups
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Lux Export configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point [ruleset] and [vocabulary_service] at your exports");
                println!("  3. Validate configuration: lux-export validate-config");
                println!(
                    "  4. Run export: lux-export export --descriptor meta.json --image-folder images --title TITLE --process-id ID"
                );
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Lux Export Configuration File

[application]
log_level = "info"
dry_run = false

[export]
cleanup_pagination = false
export_unpublished_records = false
add_event_location_from_agent = false
vocabulary_base_url = ""
destination = "./export"
metadata_folder = "./metadata"

[ruleset]
path = "${LUX_RULESET}"

[vocabulary_service]
path = "${LUX_VOCABULARIES}"

[[file_groups]]
name = "PRESENTATION"
path = "https://iiif.example.org/{process.title}/"
mimetype = "image/jpeg"
suffix = "jpg"

[logging]
local_enabled = true
local_path = "/var/log/lux-export"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Lux Export Configuration File
#
# Prepares artist dictionary records for publication: admission, pruning of
# unpublished groups, page reconciliation, vocabulary enrichment, metadata
# generation and file-group planning.
#
# Values may reference environment variables with ${VAR}. Any scalar can also
# be overridden with LUX_<SECTION>_<KEY>, e.g. LUX_EXPORT_DESTINATION.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (run every stage, write nothing)
dry_run = false

# ============================================================================
# Export Settings
# ============================================================================
[export]
# Rebuild the page sequence from the media folder when it is out of date
cleanup_pagination = false

# Export records whose Published flag is not set
export_unpublished_records = false

# Copy the event location from the organizing agent's descriptor
add_event_location_from_agent = false

# Base URL written into resolved authority values (blank = authority URI)
vocabulary_base_url = "https://vocabulary.example.org/vocabularies/"

# Folder receiving {title}.json
destination = "./export"

# Folder holding other processes' descriptors ({metadata_folder}/{id}/meta.json)
metadata_folder = "./metadata"

# ============================================================================
# Collaborators
# ============================================================================
[ruleset]
# Known metadata, group and struct types
path = "${LUX_RULESET}"

[vocabulary_service]
# Exported controlled vocabularies
path = "${LUX_VOCABULARIES}"

# ============================================================================
# Metadata Generation Rules
# ============================================================================
# Parts are 'literals' and {variables} joined by '+'.
# Variables: {process.title}, {process.id}, {pages}, {meta.TYPE}
[[metadata]]
metadata_type = "CatalogIDDigital"
rule = "'lux_'+{process.id}"
number_format = "00000"

[[metadata]]
metadata_type = "PhysicalCount"
force = true
rule = "{pages}"

# ============================================================================
# Group Enrichment From Vocabulary Records
# ============================================================================
[[vocabulary]]
metadata_group_type = "Source"
vocabulary_id = 12
record_identifier_metadata = "SourceID"

[[vocabulary.enrich]]
vocabulary_field = "Title"
metadata_type = "SourceTitle"

[[vocabulary.enrich]]
vocabulary_field = "Year"
metadata_type = "SourceYear"

# ============================================================================
# File Groups
# ============================================================================
[[file_groups]]
name = "PRESENTATION"
path = "https://iiif.example.org/{process.title}/"
mimetype = "image/jpeg"
suffix = "jpg"
use_original_files = true
ignore_mimetypes = "xml, txt"

[[file_groups]]
name = "FULLTEXT"
path = "https://ocr.example.org/{process.title}/"
mimetype = "text/xml"
suffix = "xml"
# Only written when this folder exists and is not empty
folder = "/data/{process.id}/ocr/alto"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = true

# Local log file path
local_path = "/var/log/lux-export"

# Log rotation (daily or hourly)
local_rotation = "daily"
"#
        .to_string()
    }
}
