//! # Part Catalog Service
//!
//! Shared, thread-safe registry of categories and parts.
//!
//! All methods take `&self`; internal maps are guarded by `parking_lot`
//! locks so one catalog handle can serve every concurrent caller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::RwLock;

use crate::error::{CatalogError, CatalogResult};
use crate::part::{CategoryId, Part, PartCategory, PartDraft, PartId};

/// The part catalog.
///
/// Owns part and category identity. Ids are allocated sequentially
/// starting at 1; 0 is never a valid id.
#[derive(Debug, Default)]
pub struct PartCatalog {
    /// All categories indexed by id.
    categories: RwLock<HashMap<CategoryId, PartCategory>>,
    /// All parts indexed by id.
    parts: RwLock<HashMap<PartId, Part>>,
    /// Next category id to allocate.
    next_category_id: AtomicU32,
    /// Next part id to allocate.
    next_part_id: AtomicU32,
}

impl PartCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(HashMap::new()),
            parts: RwLock::new(HashMap::new()),
            next_category_id: AtomicU32::new(1),
            next_part_id: AtomicU32::new(1),
        }
    }

    /// Adds a new category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] if the name is empty.
    pub fn add_category(&self, name: impl Into<String>) -> CatalogResult<PartCategory> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let id = self.next_category_id.fetch_add(1, Ordering::Relaxed);
        let category = PartCategory { id, name };
        self.categories.write().insert(id, category.clone());
        Ok(category)
    }

    /// Looks up a category by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CategoryNotFound`] if the id is unknown.
    pub fn category(&self, id: CategoryId) -> CatalogResult<PartCategory> {
        self.categories
            .read()
            .get(&id)
            .cloned()
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    /// Returns all categories in ascending id order.
    #[must_use]
    pub fn categories(&self) -> Vec<PartCategory> {
        let mut all: Vec<PartCategory> = self.categories.read().values().cloned().collect();
        all.sort_by_key(|c| c.id);
        all
    }

    /// Creates a new part from a draft.
    ///
    /// The part starts with no inventory record; the ledger reads absent
    /// rows as quantity 0.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EmptyName`] if the draft name is empty
    /// - [`CatalogError::CategoryNotFound`] if the category is unknown
    /// - [`CatalogError::ZeroDefaultYield`] if the default generated
    ///   quantity is 0
    pub fn create_part(&self, draft: PartDraft) -> CatalogResult<Part> {
        self.validate_draft(&draft)?;

        let id = self.next_part_id.fetch_add(1, Ordering::Relaxed);
        let part = Part {
            id,
            name: draft.name,
            category_id: draft.category_id,
            image_url: draft.image_url,
            default_generated_quantity: draft.default_generated_quantity,
        };
        self.parts.write().insert(id, part.clone());
        Ok(part)
    }

    /// Replaces the mutable fields of an existing part.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::PartNotFound`] if the id is unknown
    /// - the same draft validation errors as [`Self::create_part`]
    pub fn update_part(&self, part_id: PartId, draft: PartDraft) -> CatalogResult<Part> {
        self.validate_draft(&draft)?;

        let mut parts = self.parts.write();
        let part = parts
            .get_mut(&part_id)
            .ok_or(CatalogError::PartNotFound(part_id))?;
        part.name = draft.name;
        part.category_id = draft.category_id;
        part.image_url = draft.image_url;
        part.default_generated_quantity = draft.default_generated_quantity;
        Ok(part.clone())
    }

    /// Looks up a part by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PartNotFound`] if the id is unknown.
    pub fn part(&self, part_id: PartId) -> CatalogResult<Part> {
        self.parts
            .read()
            .get(&part_id)
            .cloned()
            .ok_or(CatalogError::PartNotFound(part_id))
    }

    /// Returns true if the part exists.
    #[must_use]
    pub fn contains(&self, part_id: PartId) -> bool {
        self.parts.read().contains_key(&part_id)
    }

    /// Returns all parts in ascending id order.
    #[must_use]
    pub fn parts(&self) -> Vec<Part> {
        let mut all: Vec<Part> = self.parts.read().values().cloned().collect();
        all.sort_by_key(|p| p.id);
        all
    }

    /// Returns the number of cataloged parts.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.read().len()
    }

    /// Shared validation for create and update drafts.
    fn validate_draft(&self, draft: &PartDraft) -> CatalogResult<()> {
        if draft.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if draft.default_generated_quantity == 0 {
            return Err(CatalogError::ZeroDefaultYield);
        }
        if !self.categories.read().contains_key(&draft.category_id) {
            return Err(CatalogError::CategoryNotFound(draft.category_id));
        }
        Ok(())
    }
}
