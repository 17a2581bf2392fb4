//! # The Foundry - Craft/Farm Orchestrator
//!
//! Single point of contact for everything above the engine: the
//! presentation layer binds against this facade and nothing else.
//!
//! ## The Golden Path: Craft
//!
//! ```text
//! caller ──> craft(part, qty)
//!              1. Validate quantity (>= 1)
//!              2. Resolve part (catalog)
//!              3. Classify (assignment graph: composite?)
//!              4. Build stock transaction (required_quantity x qty per edge)
//!              5. Commit all-or-nothing (ledger, one lock section)
//!              6. Return CraftReceipt
//! ```
//!
//! Farming is the additive twin: only legal for raw parts, a single-row
//! credit.

use std::sync::Arc;

use foundry_catalog::{Part, PartCatalog, PartDraft, PartId};

use crate::error::{EngineError, EngineResult};
use crate::graph::{AssignmentGraph, ComponentAssignment};
use crate::ledger::{InventoryLedger, StockTransaction};

/// A component edge resolved against the catalog: the full component
/// part plus the per-unit requirement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentView {
    /// The component part.
    pub component: Part,
    /// Units consumed per unit of parent produced.
    pub required_quantity: u32,
}

/// Result of a successful craft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CraftReceipt {
    /// The part that was produced.
    pub part_id: PartId,
    /// Units produced (and credited to the parent).
    pub crafted: u64,
    /// Total units consumed per component, in ascending part id order.
    pub consumed: Vec<(PartId, u64)>,
}

/// The Foundry - catalog, assignment graph, and ledger behind one handle.
///
/// ## Thread Safety
///
/// `Foundry` is `Send + Sync`; clone the [`Arc`] it is usually wrapped in
/// and call from as many threads as needed. Classification is derived
/// from the graph at call time, and every craft commits inside a single
/// exclusive ledger section, so concurrent crafts over shared components
/// can never overdraw.
#[derive(Debug)]
pub struct Foundry {
    /// Part identity and attributes.
    catalog: Arc<PartCatalog>,
    /// The "built from" graph.
    graph: AssignmentGraph,
    /// Current stock per part.
    ledger: InventoryLedger,
}

impl Foundry {
    /// Creates a foundry over a fresh catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(PartCatalog::new()))
    }

    /// Creates a foundry over an existing catalog handle.
    #[must_use]
    pub fn with_catalog(catalog: Arc<PartCatalog>) -> Self {
        Self {
            catalog,
            graph: AssignmentGraph::new(),
            ledger: InventoryLedger::new(),
        }
    }

    /// The underlying catalog handle.
    #[must_use]
    pub fn catalog(&self) -> &Arc<PartCatalog> {
        &self.catalog
    }

    // ========================================================================
    // Part Catalog surface
    // ========================================================================

    /// Adds a part category.
    ///
    /// # Errors
    ///
    /// Propagates catalog validation failures.
    pub fn add_category(&self, name: impl Into<String>) -> EngineResult<foundry_catalog::PartCategory> {
        Ok(self.catalog.add_category(name)?)
    }

    /// Creates a part. Its inventory starts at 0.
    ///
    /// # Errors
    ///
    /// Propagates catalog validation failures (empty name, unknown
    /// category, zero default yield).
    pub fn create_part(&self, draft: PartDraft) -> EngineResult<Part> {
        Ok(self.catalog.create_part(draft)?)
    }

    /// Updates a part in place.
    ///
    /// # Errors
    ///
    /// Propagates catalog failures (unknown part, draft validation).
    pub fn update_part(&self, part_id: PartId, draft: PartDraft) -> EngineResult<Part> {
        Ok(self.catalog.update_part(part_id, draft)?)
    }

    /// Looks up a part by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PartNotFound`] if the part is unknown.
    pub fn part(&self, part_id: PartId) -> EngineResult<Part> {
        self.catalog
            .part(part_id)
            .map_err(|_| EngineError::PartNotFound(part_id))
    }

    /// Returns all cataloged parts in ascending id order.
    #[must_use]
    pub fn parts(&self) -> Vec<Part> {
        self.catalog.parts()
    }

    // ========================================================================
    // Component Assignment Graph surface
    // ========================================================================

    /// Declares that building one `parent_id` consumes `required_quantity`
    /// units of `component_id`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::PartNotFound`] if either part is unknown
    /// - [`EngineError::ZeroQuantity`] if `required_quantity` is 0
    /// - [`EngineError::SelfAssignment`] if the parts are the same
    /// - [`EngineError::AlreadyAssigned`] if the pair is already assigned
    /// - [`EngineError::MaxAssignmentsReached`] on the fifth assignment
    pub fn assign_component(
        &self,
        parent_id: PartId,
        component_id: PartId,
        required_quantity: u32,
    ) -> EngineResult<ComponentAssignment> {
        self.require_part(parent_id)?;
        self.require_part(component_id)?;
        self.graph.assign(parent_id, component_id, required_quantity)
    }

    /// Returns the components of a part, resolved against the catalog.
    ///
    /// An empty vector means the part is raw.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PartNotFound`] if the part is unknown.
    pub fn components(&self, part_id: PartId) -> EngineResult<Vec<ComponentView>> {
        self.require_part(part_id)?;
        self.graph
            .components_of(part_id)
            .into_iter()
            .map(|edge| {
                Ok(ComponentView {
                    component: self.catalog.part(edge.component_id)?,
                    required_quantity: edge.required_quantity,
                })
            })
            .collect()
    }

    // ========================================================================
    // Inventory Ledger surface
    // ========================================================================

    /// Returns the current on-hand quantity of a part.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PartNotFound`] if the part is unknown.
    pub fn current_quantity(&self, part_id: PartId) -> EngineResult<u64> {
        self.require_part(part_id)?;
        Ok(self.ledger.quantity(part_id))
    }

    /// Farms a raw part: credits its stock by exactly `quantity`.
    ///
    /// The part's `default_generated_quantity` is advisory; it never
    /// multiplies into this credit. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroQuantity`] if `quantity` is 0
    /// - [`EngineError::PartNotFound`] if the part is unknown
    /// - [`EngineError::MustBeCrafted`] if the part has components
    /// - ledger failures ([`EngineError::QuantityOverflow`],
    ///   [`EngineError::LedgerBusy`])
    pub fn farm(&self, part_id: PartId, quantity: u32) -> EngineResult<u64> {
        if quantity == 0 {
            return Err(EngineError::ZeroQuantity);
        }
        self.require_part(part_id)?;
        if self.graph.is_composite(part_id) {
            return Err(EngineError::MustBeCrafted { part_id });
        }

        let updated = self.ledger.credit(part_id, u64::from(quantity))?;
        tracing::debug!(part_id, quantity, updated, "part farmed");
        Ok(updated)
    }

    /// Crafts `quantity` units of a composite part.
    ///
    /// Every component edge must have `required_quantity * quantity`
    /// units on hand simultaneously; the debits and the parent credit
    /// commit as one transaction, or nothing mutates at all.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroQuantity`] if `quantity` is 0
    /// - [`EngineError::PartNotFound`] if the part is unknown
    /// - [`EngineError::MustBeFarmed`] if the part has no components
    /// - [`EngineError::InsufficientStock`] if any component is short
    ///   (no partial debit leaks)
    /// - [`EngineError::QuantityOverflow`] if a required total overflows
    /// - [`EngineError::LedgerBusy`] if the ledger lock budget runs out
    pub fn craft(&self, part_id: PartId, quantity: u32) -> EngineResult<CraftReceipt> {
        if quantity == 0 {
            return Err(EngineError::ZeroQuantity);
        }
        self.require_part(part_id)?;

        let edges = self.graph.components_of(part_id);
        if edges.is_empty() {
            return Err(EngineError::MustBeFarmed { part_id });
        }

        let mut tx = StockTransaction::credit(part_id, u64::from(quantity));
        let mut consumed = Vec::with_capacity(edges.len());
        for edge in &edges {
            let total = u64::from(edge.required_quantity)
                .checked_mul(u64::from(quantity))
                .ok_or(EngineError::QuantityOverflow)?;
            tx = tx.with_debit(edge.component_id, total)?;
            consumed.push((edge.component_id, total));
        }

        self.ledger.commit(&tx)?;
        tracing::debug!(part_id, quantity, components = edges.len(), "part crafted");
        Ok(CraftReceipt {
            part_id,
            crafted: u64::from(quantity),
            consumed,
        })
    }

    /// Existence check shared by every operation that takes a part id.
    fn require_part(&self, part_id: PartId) -> EngineResult<()> {
        if self.catalog.contains(part_id) {
            Ok(())
        } else {
            Err(EngineError::PartNotFound(part_id))
        }
    }
}

impl Default for Foundry {
    fn default() -> Self {
        Self::new()
    }
}
