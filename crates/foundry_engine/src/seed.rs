//! # Seed Catalogs
//!
//! Bootstrap data for a foundry, loaded once at startup from TOML.
//!
//! A seed document declares categories, parts, and component assignments
//! by name, in dependency order:
//!
//! ```toml
//! [[categories]]
//! name = "raw-materials"
//!
//! [[categories]]
//! name = "basic-materials"
//!
//! [[parts]]
//! name = "iron ore"
//! category = "raw-materials"
//!
//! [[parts]]
//! name = "iron ingot"
//! category = "basic-materials"
//!
//! [[assignments]]
//! parent = "iron ingot"
//! component = "iron ore"
//! required_quantity = 3
//! ```
//!
//! Seeding is sequential, not transactional: a bad entry aborts at that
//! entry and earlier entries stay applied. Seeds never write stock, so
//! craft/farm invariants are unaffected either way.

use std::collections::HashMap;
use std::path::Path;

use foundry_catalog::{CategoryId, PartDraft, PartId};
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::foundry::Foundry;

/// A parsed seed document.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedCatalog {
    /// Categories to create, in order.
    #[serde(default)]
    categories: Vec<SeedCategory>,
    /// Parts to create, referencing categories by name.
    #[serde(default)]
    parts: Vec<SeedPart>,
    /// Assignment edges, referencing parts by name.
    #[serde(default)]
    assignments: Vec<SeedAssignment>,
}

/// One `[[categories]]` entry.
#[derive(Clone, Debug, Deserialize)]
struct SeedCategory {
    name: String,
}

/// One `[[parts]]` entry.
#[derive(Clone, Debug, Deserialize)]
struct SeedPart {
    name: String,
    category: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default = "one")]
    default_generated_quantity: u32,
}

/// One `[[assignments]]` entry.
#[derive(Clone, Debug, Deserialize)]
struct SeedAssignment {
    parent: String,
    component: String,
    required_quantity: u32,
}

/// Serde default for quantities that fall back to 1.
fn one() -> u32 {
    1
}

/// Counts of what a seed application created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Categories created.
    pub categories: usize,
    /// Parts created.
    pub parts: usize,
    /// Component assignments created.
    pub assignments: usize,
}

impl SeedCatalog {
    /// Parses a seed document from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSeed`] if the document does not
    /// parse.
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        toml::from_str(text).map_err(|e| EngineError::InvalidSeed(e.to_string()))
    }

    /// Reads and parses a seed document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSeed`] if the file cannot be read
    /// or does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| EngineError::InvalidSeed(e.to_string()))?;
        Self::from_toml_str(&text)
    }

    /// Applies the seed to a foundry: categories, then parts, then
    /// assignments. Returns what was created.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownSeedReference`] if an entry names a
    ///   category or part not declared earlier in the document
    /// - any domain error the underlying operations raise (duplicate
    ///   assignment, cap, validation)
    pub fn apply(&self, foundry: &Foundry) -> EngineResult<SeedReport> {
        let mut category_ids: HashMap<&str, CategoryId> = HashMap::new();
        let mut part_ids: HashMap<&str, PartId> = HashMap::new();
        let mut report = SeedReport::default();

        for category in &self.categories {
            let created = foundry.add_category(category.name.clone())?;
            category_ids.insert(category.name.as_str(), created.id);
            report.categories += 1;
        }

        for part in &self.parts {
            let category_id = *category_ids.get(part.category.as_str()).ok_or_else(|| {
                EngineError::UnknownSeedReference {
                    name: part.category.clone(),
                }
            })?;
            let mut draft = PartDraft::new(part.name.clone(), category_id)
                .with_default_generated_quantity(part.default_generated_quantity);
            if let Some(image_url) = &part.image_url {
                draft = draft.with_image(image_url.clone());
            }
            let created = foundry.create_part(draft)?;
            part_ids.insert(part.name.as_str(), created.id);
            report.parts += 1;
        }

        for assignment in &self.assignments {
            let parent_id = *part_ids.get(assignment.parent.as_str()).ok_or_else(|| {
                EngineError::UnknownSeedReference {
                    name: assignment.parent.clone(),
                }
            })?;
            let component_id =
                *part_ids.get(assignment.component.as_str()).ok_or_else(|| {
                    EngineError::UnknownSeedReference {
                        name: assignment.component.clone(),
                    }
                })?;
            foundry.assign_component(parent_id, component_id, assignment.required_quantity)?;
            report.assignments += 1;
        }

        tracing::debug!(
            categories = report.categories,
            parts = report.parts,
            assignments = report.assignments,
            "seed catalog applied"
        );
        Ok(report)
    }
}
