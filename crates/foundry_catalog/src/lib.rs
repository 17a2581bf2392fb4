//! # FOUNDRY Part Catalog
//!
//! Identity and static attributes for every part the engine knows about.
//!
//! ## Design Principles
//!
//! 1. **Identity only** - no stock quantities, no recipes; those belong to
//!    `foundry_engine`
//! 2. **Derived classification** - nothing here records whether a part is
//!    raw or composite, that is always computed from the assignment graph
//! 3. **Shared service** - [`PartCatalog`] takes `&self` everywhere and is
//!    `Send + Sync`, so one handle serves all concurrent callers
//!
//! ## Example
//!
//! ```rust
//! use foundry_catalog::{PartCatalog, PartDraft};
//!
//! let catalog = PartCatalog::new();
//! let metals = catalog.add_category("raw-materials").unwrap();
//! let ore = catalog
//!     .create_part(PartDraft::new("iron ore", metals.id))
//!     .unwrap();
//! assert_eq!(catalog.part(ore.id).unwrap().name, "iron ore");
//! ```

pub mod catalog;
pub mod error;
pub mod part;

pub use catalog::PartCatalog;
pub use error::{CatalogError, CatalogResult};
pub use part::{CategoryId, Part, PartCategory, PartDraft, PartId};
