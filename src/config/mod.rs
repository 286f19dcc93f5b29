//! Configuration management for Lux Export.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Lux Export uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `LUX_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lux_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("lux-export.toml")?;
//!
//! println!("Ruleset: {}", config.ruleset.path);
//! println!("Cleanup pagination: {}", config.export.cleanup_pagination);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry run
//! - [`ExportConfig`] - Export switches, vocabulary base URL, destination
//! - [`RulesetConfig`] / [`VocabularyServiceConfig`] - Collaborator files
//! - [`MetadataRuleConfig`] - Metadata generation rules
//! - [`VocabularyRecordConfig`] - Group enrichment from vocabulary records
//! - [`FileGroupConfig`] - Output file groups
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! cleanup_pagination = false
//! export_unpublished_records = false
//! vocabulary_base_url = "${LUX_VOCABULARY_URL}"
//! destination = "/opt/lux/export"
//!
//! [ruleset]
//! path = "/opt/lux/ruleset.json"
//!
//! [vocabulary_service]
//! path = "/opt/lux/vocabularies.json"
//!
//! [[vocabulary]]
//! metadata_group_type = "Relationship"
//! vocabulary_id = 7
//! record_identifier_metadata = "RelationEntityID"
//!
//! [[vocabulary.enrich]]
//! vocabulary_field = "Name"
//! metadata_type = "RelationName"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, resolve_config_path, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
pub use schema::{
    ApplicationConfig, ExportConfig, FileGroupConfig, LoggingConfig, LuxConfig,
    MetadataRuleConfig, RulesetConfig, VocabularyEnrichmentConfig, VocabularyRecordConfig,
    VocabularyServiceConfig,
};
