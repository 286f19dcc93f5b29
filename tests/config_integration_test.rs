//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX so they do not
//! interfere with each other.

use lux_export::config::load_config;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that read or modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("LUX_APPLICATION_LOG_LEVEL");
    std::env::remove_var("LUX_APPLICATION_DRY_RUN");
    std::env::remove_var("LUX_EXPORT_DESTINATION");
    std::env::remove_var("LUX_EXPORT_CLEANUP_PAGINATION");
    std::env::remove_var("LUX_RULESET_PATH");
    std::env::remove_var("TEST_LUX_VOCABULARIES");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    let temp_file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[export]
cleanup_pagination = true
export_unpublished_records = true
add_event_location_from_agent = true
vocabulary_base_url = "https://vocabulary.example.org/vocabularies"
destination = "/srv/export"
metadata_folder = "/srv/metadata"

[ruleset]
path = "/etc/lux/ruleset.json"

[vocabulary_service]
path = "/etc/lux/vocabularies.json"

[[metadata]]
metadata_type = "CatalogIDDigital"
rule = "'lux_'+{process.id}"
number_format = "0000"

[[metadata]]
metadata_type = "PhysicalCount"
force = true
rule = "{pages}"

[[vocabulary]]
metadata_group_type = "Source"
vocabulary_id = 12
record_identifier_metadata = "SourceID"

[[vocabulary.enrich]]
vocabulary_field = "Title"
metadata_type = "SourceTitle"

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
folder = "/data/{process.id}/ocr"

[logging]
local_enabled = false
local_path = "/tmp/lux"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Application
    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);

    // Export
    assert!(config.export.cleanup_pagination);
    assert!(config.export.export_unpublished_records);
    assert!(config.export.add_event_location_from_agent);
    assert_eq!(
        config.export.base_url(),
        Some("https://vocabulary.example.org/vocabularies")
    );
    assert_eq!(config.export.destination, "/srv/export");
    assert_eq!(config.export.metadata_folder, "/srv/metadata");

    // Collaborators
    assert_eq!(config.ruleset.path, "/etc/lux/ruleset.json");
    assert_eq!(config.vocabulary_service.path, "/etc/lux/vocabularies.json");

    // Rules
    assert_eq!(config.metadata.len(), 2);
    assert_eq!(config.metadata[0].number_format.as_deref(), Some("0000"));
    assert!(!config.metadata[0].force);
    assert!(config.metadata[1].force);

    assert_eq!(config.vocabulary[0].vocabulary_id, 12);
    assert_eq!(config.vocabulary[0].enrich[0].metadata_type, "SourceTitle");

    assert_eq!(config.file_groups.len(), 2);
    assert!(config.file_groups[0].use_original_files);
    assert_eq!(config.file_groups[0].ignore_mimetypes, "xml, txt");
    assert_eq!(
        config.file_groups[1].folder.as_deref(),
        Some("/data/{process.id}/ocr")
    );

    // Logging
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/lux");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    let temp_file = write_config(
        r#"
[ruleset]
path = "ruleset.json"

[vocabulary_service]
path = "vocabularies.json"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.dry_run);
    assert!(!config.export.cleanup_pagination);
    assert!(!config.export.export_unpublished_records);
    assert!(!config.export.add_event_location_from_agent);
    assert_eq!(config.export.base_url(), None);
    assert_eq!(config.export.destination, "./export");
    assert_eq!(config.export.metadata_folder, "./metadata");
    assert!(config.metadata.is_empty());
    assert!(config.vocabulary.is_empty());
    assert!(config.file_groups.is_empty());
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_LUX_VOCABULARIES", "/srv/vocabularies.json");

    let temp_file = write_config(
        r#"
[ruleset]
path = "ruleset.json"

[vocabulary_service]
path = "${TEST_LUX_VOCABULARIES}"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(config.vocabulary_service.path, "/srv/vocabularies.json");

    std::env::remove_var("TEST_LUX_VOCABULARIES");
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[ruleset]
path = "ruleset.json"

[vocabulary_service]
path = "${TEST_LUX_VOCABULARIES}"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_LUX_VOCABULARIES"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("LUX_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("LUX_EXPORT_DESTINATION", "/srv/override");
    std::env::set_var("LUX_EXPORT_CLEANUP_PAGINATION", "true");
    std::env::set_var("LUX_RULESET_PATH", "/etc/lux/other-ruleset.json");

    let temp_file = write_config(
        r#"
[application]
log_level = "info"

[export]
destination = "./export"

[ruleset]
path = "ruleset.json"

[vocabulary_service]
path = "vocabularies.json"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.export.destination, "/srv/override");
    assert!(config.export.cleanup_pagination);
    assert_eq!(config.ruleset.path, "/etc/lux/other-ruleset.json");

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for content in [
        // unknown log level
        "[application]\nlog_level = \"invalid_level\"\n[ruleset]\npath = \"r.json\"\n[vocabulary_service]\npath = \"v.json\"\n",
        // base URL that is not a URL
        "[export]\nvocabulary_base_url = \"not a url\"\n[ruleset]\npath = \"r.json\"\n[vocabulary_service]\npath = \"v.json\"\n",
        // missing ruleset section
        "[vocabulary_service]\npath = \"v.json\"\n",
        // number format with other characters
        "[ruleset]\npath = \"r.json\"\n[vocabulary_service]\npath = \"v.json\"\n[[metadata]]\nmetadata_type = \"A\"\nrule = \"'x'\"\nnumber_format = \"0x0\"\n",
    ] {
        let temp_file = write_config(content);
        assert!(load_config(temp_file.path()).is_err(), "accepted: {content}");
    }
}

#[test]
fn test_invalid_vocabulary_entry_reports_index() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[ruleset]
path = "ruleset.json"

[vocabulary_service]
path = "vocabularies.json"

[[vocabulary]]
metadata_group_type = "Source"
vocabulary_id = 12
record_identifier_metadata = ""
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("vocabulary[0]"), "{err}");
}
