//! Configuration schema types
//!
//! This module defines the configuration structure for Lux Export.

use serde::{Deserialize, Serialize};
use url::Url;

/// Main Lux Export configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LuxConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Ruleset (known metadata, group and struct types)
    pub ruleset: RulesetConfig,

    /// Vocabulary service backing file
    pub vocabulary_service: VocabularyServiceConfig,

    /// Metadata generation rules
    #[serde(default)]
    pub metadata: Vec<MetadataRuleConfig>,

    /// Vocabulary record configurations for group enrichment
    #[serde(default)]
    pub vocabulary: Vec<VocabularyRecordConfig>,

    /// File groups written alongside the descriptor
    #[serde(default)]
    pub file_groups: Vec<FileGroupConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LuxConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.ruleset.validate()?;
        self.vocabulary_service.validate()?;

        for (index, rule) in self.metadata.iter().enumerate() {
            rule.validate()
                .map_err(|e| format!("metadata[{index}]: {e}"))?;
        }
        for (index, record) in self.vocabulary.iter().enumerate() {
            record
                .validate()
                .map_err(|e| format!("vocabulary[{index}]: {e}"))?;
        }
        for (index, group) in self.file_groups.iter().enumerate() {
            group
                .validate()
                .map_err(|e| format!("file_groups[{index}]: {e}"))?;
        }

        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (don't write the descriptor)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Rebuild the physical structure from the media folder before export
    #[serde(default)]
    pub cleanup_pagination: bool,

    /// Export documents that are not marked as published
    #[serde(default)]
    pub export_unpublished_records: bool,

    /// Copy an event location from the organizing agent's descriptor
    #[serde(default)]
    pub add_event_location_from_agent: bool,

    /// Base URL written into resolved authority values.
    /// Blank means the metadata's own authority URI is used.
    #[serde(default)]
    pub vocabulary_base_url: String,

    /// Folder receiving `{title}.json`
    #[serde(default = "default_destination")]
    pub destination: String,

    /// Folder holding the descriptors of other processes
    /// (`{metadata_folder}/{id}/meta.json`)
    #[serde(default = "default_metadata_folder")]
    pub metadata_folder: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.vocabulary_base_url.trim().is_empty() {
            let url = Url::parse(self.vocabulary_base_url.trim()).map_err(|e| {
                format!(
                    "Invalid export.vocabulary_base_url '{}': {}",
                    self.vocabulary_base_url, e
                )
            })?;
            if url.cannot_be_a_base() {
                return Err(format!(
                    "export.vocabulary_base_url '{}' cannot be used as a base URL",
                    self.vocabulary_base_url
                ));
            }
        }

        if self.destination.trim().is_empty() {
            return Err("export.destination cannot be empty".to_string());
        }

        if self.add_event_location_from_agent && self.metadata_folder.trim().is_empty() {
            return Err(
                "export.metadata_folder is required when add_event_location_from_agent = true"
                    .to_string(),
            );
        }

        Ok(())
    }

    /// The configured base URL, if it is not blank
    pub fn base_url(&self) -> Option<&str> {
        let trimmed = self.vocabulary_base_url.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            cleanup_pagination: false,
            export_unpublished_records: false,
            add_event_location_from_agent: false,
            vocabulary_base_url: String::new(),
            destination: default_destination(),
            metadata_folder: default_metadata_folder(),
        }
    }
}

/// Ruleset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesetConfig {
    /// Path to the ruleset JSON file
    pub path: String,
}

impl RulesetConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("ruleset.path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Vocabulary service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyServiceConfig {
    /// Path to the vocabulary JSON file
    pub path: String,
}

impl VocabularyServiceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("vocabulary_service.path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// A metadata generation rule
///
/// ```toml
/// [[metadata]]
/// metadata_type = "CatalogIDDigital"
/// rule = "'lux_'+{process.id}"
/// number_format = "0000"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRuleConfig {
    /// Metadata type to generate
    pub metadata_type: String,

    /// Generate even if the root already carries the type
    #[serde(default)]
    pub force: bool,

    /// Expression: `'literal'` and `{variable}` parts joined by `+`
    pub rule: String,

    /// Zero padding pattern for numeric variable values, e.g. `0000`
    #[serde(default)]
    pub number_format: Option<String>,
}

impl MetadataRuleConfig {
    fn validate(&self) -> Result<(), String> {
        if self.metadata_type.trim().is_empty() {
            return Err("metadata_type cannot be empty".to_string());
        }
        if self.rule.trim().is_empty() {
            return Err(format!("rule for {} cannot be empty", self.metadata_type));
        }
        if let Some(format) = &self.number_format {
            if format.is_empty() || !format.chars().all(|c| c == '0' || c == '#') {
                return Err(format!(
                    "number_format '{}' must consist of '0' or '#' characters",
                    format
                ));
            }
        }
        Ok(())
    }
}

/// A group enrichment from a vocabulary record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyRecordConfig {
    /// Metadata group type to enrich
    pub metadata_group_type: String,

    /// Vocabulary holding the referenced records
    pub vocabulary_id: i64,

    /// Metadata inside the group holding the record id
    pub record_identifier_metadata: String,

    /// Field to metadata mappings
    #[serde(default)]
    pub enrich: Vec<VocabularyEnrichmentConfig>,
}

impl VocabularyRecordConfig {
    fn validate(&self) -> Result<(), String> {
        if self.metadata_group_type.trim().is_empty() {
            return Err("metadata_group_type cannot be empty".to_string());
        }
        if self.record_identifier_metadata.trim().is_empty() {
            return Err(format!(
                "record_identifier_metadata for {} cannot be empty",
                self.metadata_group_type
            ));
        }
        for enrichment in &self.enrich {
            if enrichment.vocabulary_field.trim().is_empty()
                || enrichment.metadata_type.trim().is_empty()
            {
                return Err(format!(
                    "enrich entries for {} need vocabulary_field and metadata_type",
                    self.metadata_group_type
                ));
            }
        }
        Ok(())
    }
}

/// Maps a vocabulary field label onto a metadata type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEnrichmentConfig {
    /// Label of the record field to read
    pub vocabulary_field: String,

    /// Metadata type to fill
    pub metadata_type: String,
}

/// A configured output file group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileGroupConfig {
    /// Group name; `PRESENTATION` is the main group
    pub name: String,

    /// Path template, may contain `{process.title}` style variables
    pub path: String,

    /// Mimetype of the group's files
    #[serde(default)]
    pub mimetype: String,

    /// File suffix
    #[serde(default)]
    pub suffix: String,

    /// Folder that must exist and be non-empty for the group to be written
    #[serde(default)]
    pub folder: Option<String>,

    /// Reference the original image files instead of derivatives
    #[serde(default)]
    pub use_original_files: bool,

    /// Comma separated file extensions left out of the group
    #[serde(default)]
    pub ignore_mimetypes: String,
}

impl FileGroupConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name cannot be empty".to_string());
        }
        if self.path.trim().is_empty() {
            return Err(format!("path for file group {} cannot be empty", self.name));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_destination() -> String {
    "./export".to_string()
}

fn default_metadata_folder() -> String {
    "./metadata".to_string()
}

fn default_local_path() -> String {
    "/var/log/lux-export".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
