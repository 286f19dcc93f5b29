//! External system integrations for Lux Export.
//!
//! This module provides adapters for the collaborators of an export:
//!
//! - [`descriptor`] - Reading and writing document descriptors
//! - [`vocabulary`] - Controlled-vocabulary lookups (trait-based)
//! - [`storage`] - Folder inventories of the image and media folders
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations. Every collaborator is a trait
//! object handed to the export coordinator, never a global.
//!
//! ```rust,no_run
//! use lux_export::adapters::storage::{FileInventory, LocalInventory};
//! use lux_export::adapters::vocabulary::{VocabularyService, VocabularyStore};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let vocabularies = VocabularyStore::from_file("vocabularies.json")?;
//! let record = vocabularies.get_record(12, 34)?;
//!
//! let names = LocalInventory::new().list_names(Path::new("/data/images"))?;
//! # Ok(())
//! # }
//! ```

pub mod descriptor;
pub mod storage;
pub mod vocabulary;
