//! # Catalog Error Types
//!
//! All errors that can occur while managing part identity.

use thiserror::Error;

use crate::part::{CategoryId, PartId};

/// Errors that can occur in the part catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Part not found in the catalog.
    #[error("part not found: {0}")]
    PartNotFound(PartId),

    /// Category not found in the catalog.
    #[error("part category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// A part or category name was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// Default generated quantity must be at least 1.
    #[error("default generated quantity must be bigger than 0")]
    ZeroDefaultYield,
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
