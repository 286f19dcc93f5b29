// Lux Export - Publication export for artist dictionary records
// Copyright (c) 2025 Lux Export Contributors
// Licensed under the MIT License

//! # Lux Export
//!
//! Lux Export prepares digitized artist dictionary records for publication. It
//! reads a process descriptor, decides whether the record may be published,
//! cleans up its structure and enriches it from controlled vocabularies before
//! writing the export descriptor.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Admitting** only records flagged as published
//! - **Pruning** metadata groups that are not marked for publication
//! - **Reconciling** the page sequence with the image folder, optionally
//!   rebuilding it from the media folder first
//! - **Enriching** authority-linked metadata and configured metadata groups
//!   from vocabulary records
//! - **Generating** metadata from rule expressions and planning file groups
//!
//! ## Architecture
//!
//! Lux Export follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export stages and their orchestration
//! - [`adapters`] - Descriptor files, vocabularies and folder inventories
//! - [`domain`] - The document arena, ruleset and vocabulary types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lux_export::config::load_config;
//! use lux_export::core::export::{ExportCoordinator, ExportRequest};
//! use lux_export::core::variables::ProcessInfo;
//! use lux_export::domain::ProcessTitle;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("lux-export.toml")?;
//!     let coordinator = ExportCoordinator::from_config(config)?;
//!
//!     let process = ProcessInfo::new(ProcessTitle::new("lux_artist_0042")?, 42);
//!     let request = ExportRequest::new("/data/42/meta.json", "/data/42/images", process);
//!     let summary = coordinator.run(&request);
//!
//!     println!("{}: {} pages", summary.status, summary.pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Working With Documents
//!
//! Structural edits go through [`domain::Document`], which checks every attach
//! against the ruleset:
//!
//! ```rust,no_run
//! use lux_export::domain::{Document, Owner, Ruleset, StructKind};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ruleset = Arc::new(Ruleset::from_file("ruleset.json")?);
//! let mut doc = Document::new(ruleset);
//! let root = doc.create_node(StructKind::Logical, "Person")?;
//! doc.set_logical_root(root);
//! doc.add_metadata(Owner::Node(root), "TitleDocMain", Some("Ackermann, Anna".to_string()))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::LuxError`]. Problems that do not abort
//! an export are collected in [`core::export::ExportSummary`] instead:
//!
//! ```rust,no_run
//! use lux_export::domain::LuxError;
//!
//! fn example() -> Result<(), LuxError> {
//!     let config = lux_export::config::load_config("lux-export.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
