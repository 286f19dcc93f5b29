//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Lux Export using clap.

pub mod commands;

use crate::config::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
use clap::{Parser, Subcommand};

/// Lux Export - prepares artist dictionary records for publication
#[derive(Parser, Debug)]
#[command(name = "lux-export")]
#[command(version, about, long_about = None)]
#[command(author = "Lux Export Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, env = CONFIG_ENV_VAR)]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LUX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prepare one process descriptor for publication
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
