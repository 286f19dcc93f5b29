//! Physical structure maintenance
//!
//! - [`reconcile`] prunes pages whose image is duplicated or missing on disk
//!   and renumbers the rest
//! - [`pagination`] throws the page sequence away and regenerates it from a
//!   folder listing

pub mod pagination;
pub mod reconcile;

pub use pagination::{rebuild_pagination, PaginationReport};
pub use reconcile::{reconcile_pages, ReconcileReport};

/// Physical page number metadata type
pub const PHYS_PAGE_NUMBER: &str = "physPageNumber";

/// Logical page number metadata type
pub const LOGICAL_PAGE_NUMBER: &str = "logicalPageNumber";

/// Struct type of a page
pub const PAGE_TYPE: &str = "page";
