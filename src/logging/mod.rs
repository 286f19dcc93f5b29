//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted log files
//! - Configurable log levels
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use lux_export::logging::init_logging;
//! use lux_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export
///
/// # Example
///
/// ```no_run
/// use lux_export::log_export_start;
/// use lux_export::domain::ids::ProcessTitle;
///
/// let title = ProcessTitle::new("lux_artist_0042").unwrap();
/// log_export_start!(&title, 42);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($title:expr, $process_id:expr) => {
        tracing::info!(
            title = %$title,
            process_id = $process_id,
            "Starting export"
        );
    };
}

/// Log the completion of an export
///
/// # Example
///
/// ```no_run
/// use lux_export::log_export_complete;
/// use std::time::Duration;
///
/// let pages = 12;
/// let duration = Duration::from_millis(350);
/// log_export_complete!(pages, duration);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($pages:expr, $duration:expr) => {
        tracing::info!(
            pages = $pages,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use lux_export::log_error_with_context;
/// use lux_export::domain::LuxError;
///
/// let error = LuxError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a metadata field left untouched by an enrichment stage
///
/// # Example
///
/// ```no_run
/// use lux_export::log_field_skipped;
///
/// log_field_skipped!("PlaceOfBirth", "Vocabulary id is not numeric");
/// ```
#[macro_export]
macro_rules! log_field_skipped {
    ($metadata_type:expr, $reason:expr) => {
        tracing::debug!(
            metadata_type = %$metadata_type,
            reason = $reason,
            "Field skipped"
        );
    };
}
