//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::LuxConfig;
use crate::domain::errors::LuxError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "lux-export.toml";

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "LUX_CONFIG";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LuxConfig
/// 4. Applies environment variable overrides (LUX_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use lux_export::config::loader::load_config;
///
/// let config = load_config("lux-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LuxConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LuxError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LuxError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: LuxConfig = toml::from_str(&contents)
        .map_err(|e| LuxError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        LuxError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Resolves the configuration path: explicit argument, then `LUX_CONFIG`,
/// then [`DEFAULT_CONFIG_FILE`]
pub fn resolve_config_path(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(CONFIG_ENV_VAR).ok())
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string())
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER
        .get_or_init(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static pattern"));
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Comments keep their placeholders
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(LuxError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using LUX_* prefix
///
/// Environment variables follow the pattern: LUX_<SECTION>_<KEY>
/// For example: LUX_EXPORT_DESTINATION, LUX_LOGGING_LOCAL_PATH
fn apply_env_overrides(config: &mut LuxConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("LUX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("LUX_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Export overrides
    if let Ok(val) = std::env::var("LUX_EXPORT_CLEANUP_PAGINATION") {
        config.export.cleanup_pagination = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("LUX_EXPORT_EXPORT_UNPUBLISHED_RECORDS") {
        config.export.export_unpublished_records = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("LUX_EXPORT_ADD_EVENT_LOCATION_FROM_AGENT") {
        config.export.add_event_location_from_agent = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("LUX_EXPORT_VOCABULARY_BASE_URL") {
        config.export.vocabulary_base_url = val;
    }
    if let Ok(val) = std::env::var("LUX_EXPORT_DESTINATION") {
        config.export.destination = val;
    }
    if let Ok(val) = std::env::var("LUX_EXPORT_METADATA_FOLDER") {
        config.export.metadata_folder = val;
    }

    // Collaborator paths
    if let Ok(val) = std::env::var("LUX_RULESET_PATH") {
        config.ruleset.path = val;
    }
    if let Ok(val) = std::env::var("LUX_VOCABULARY_SERVICE_PATH") {
        config.vocabulary_service.path = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("LUX_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("LUX_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("LUX_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
