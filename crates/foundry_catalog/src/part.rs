//! # Part Types
//!
//! The static shape of a catalog entry: categories, parts, and the draft
//! payload used to create or update a part.

use serde::{Deserialize, Serialize};

/// Unique identifier for a part.
pub type PartId = u32;

/// Unique identifier for a part category.
pub type CategoryId = u32;

/// A named grouping of parts (raw materials, electronics, tools, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartCategory {
    /// Unique identifier.
    pub id: CategoryId,
    /// Human-readable name.
    pub name: String,
}

/// A catalog entry for one part.
///
/// Whether the part is raw (farmable) or composite (craftable) is never
/// stored here; the assignment graph owns that classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Unique identifier.
    pub id: PartId,
    /// Human-readable name.
    pub name: String,
    /// Category this part belongs to.
    pub category_id: CategoryId,
    /// Optional image reference for presentation layers.
    pub image_url: Option<String>,
    /// Suggested units produced per farm action.
    ///
    /// Advisory metadata only: the inventory ledger credits exactly the
    /// quantity it is asked to, callers that want this default pass it
    /// through themselves.
    pub default_generated_quantity: u32,
}

/// Input payload for creating or updating a part.
///
/// Updates replace all mutable fields at once, so the same draft type
/// serves both operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDraft {
    /// Part name, must be non-empty.
    pub name: String,
    /// Category the part belongs to, must exist.
    pub category_id: CategoryId,
    /// Optional image reference.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Units produced per farm action, must be at least 1.
    #[serde(default = "default_generated_quantity")]
    pub default_generated_quantity: u32,
}

/// Serde default for [`PartDraft::default_generated_quantity`].
fn default_generated_quantity() -> u32 {
    1
}

impl PartDraft {
    /// Creates a draft with no image and a default yield of 1.
    #[must_use]
    pub fn new(name: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            name: name.into(),
            category_id,
            image_url: None,
            default_generated_quantity: 1,
        }
    }

    /// Sets the image reference.
    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Sets the suggested units produced per farm action.
    #[must_use]
    pub const fn with_default_generated_quantity(mut self, quantity: u32) -> Self {
        self.default_generated_quantity = quantity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_defaults() {
        let draft = PartDraft::new("copper wire", 3);
        assert_eq!(draft.name, "copper wire");
        assert_eq!(draft.category_id, 3);
        assert_eq!(draft.image_url, None);
        assert_eq!(draft.default_generated_quantity, 1);
    }

    #[test]
    fn draft_builders() {
        let draft = PartDraft::new("battery", 2)
            .with_image("https://img.example/battery.png")
            .with_default_generated_quantity(5);
        assert_eq!(
            draft.image_url.as_deref(),
            Some("https://img.example/battery.png")
        );
        assert_eq!(draft.default_generated_quantity, 5);
    }
}
