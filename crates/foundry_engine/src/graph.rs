//! # Component Assignment Graph
//!
//! The directed "built from" relationship between parts. Each edge says:
//! producing one unit of `parent` consumes `required_quantity` units of
//! `component`.
//!
//! The graph is the single source of truth for part classification:
//! a part with no outgoing edges is raw (farmable), a part with at least
//! one edge is composite (craftable). Nothing stores that classification,
//! it is derived here at call time.
//!
//! ## Invariants
//!
//! - A (parent, component) pair is assigned at most once
//! - A parent has at most [`MAX_COMPONENTS_PER_PART`] assignments
//! - A part is never a component of itself
//! - Edges are immutable once created; there is no unassign operation

use std::collections::HashMap;

use foundry_catalog::PartId;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Maximum component assignments per parent part.
pub const MAX_COMPONENTS_PER_PART: usize = 4;

/// A quantity-weighted edge from a parent part to one of its components.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentAssignment {
    /// The part being built.
    pub parent_id: PartId,
    /// The part consumed to build it.
    pub component_id: PartId,
    /// Units of the component consumed per unit of parent produced.
    pub required_quantity: u32,
}

impl ComponentAssignment {
    /// Creates a new assignment edge.
    #[inline]
    #[must_use]
    pub const fn new(parent_id: PartId, component_id: PartId, required_quantity: u32) -> Self {
        Self {
            parent_id,
            component_id,
            required_quantity,
        }
    }
}

/// The component assignment graph.
///
/// Edges are stored per parent behind one `RwLock`, so the duplicate and
/// cap checks in [`AssignmentGraph::assign`] are atomic with the insert:
/// two concurrent assignments cannot both pass the count check and push
/// a parent past the cap.
#[derive(Debug, Default)]
pub struct AssignmentGraph {
    /// Outgoing edges indexed by parent part.
    edges: RwLock<HashMap<PartId, Vec<ComponentAssignment>>>,
}

impl AssignmentGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a component to a parent part.
    ///
    /// Callers are expected to have verified that both parts exist; the
    /// graph itself only enforces edge-level invariants.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroQuantity`] if `required_quantity` is 0
    /// - [`EngineError::SelfAssignment`] if parent and component are the
    ///   same part
    /// - [`EngineError::AlreadyAssigned`] if the pair is already assigned
    /// - [`EngineError::MaxAssignmentsReached`] if the parent already has
    ///   [`MAX_COMPONENTS_PER_PART`] assignments
    pub fn assign(
        &self,
        parent_id: PartId,
        component_id: PartId,
        required_quantity: u32,
    ) -> EngineResult<ComponentAssignment> {
        if required_quantity == 0 {
            return Err(EngineError::ZeroQuantity);
        }
        if component_id == parent_id {
            return Err(EngineError::SelfAssignment { part_id: parent_id });
        }

        let mut edges = self.edges.write();
        let parent_edges = edges.entry(parent_id).or_default();

        if parent_edges.iter().any(|e| e.component_id == component_id) {
            return Err(EngineError::AlreadyAssigned {
                parent_id,
                component_id,
            });
        }
        if parent_edges.len() >= MAX_COMPONENTS_PER_PART {
            return Err(EngineError::MaxAssignmentsReached {
                parent_id,
                limit: MAX_COMPONENTS_PER_PART,
            });
        }

        let assignment = ComponentAssignment::new(parent_id, component_id, required_quantity);
        parent_edges.push(assignment.clone());
        tracing::debug!(parent_id, component_id, required_quantity, "component assigned");
        Ok(assignment)
    }

    /// Returns all outgoing edges of a parent in ascending component id
    /// order.
    ///
    /// An empty vector means the part is raw; that is a normal answer,
    /// not an error.
    #[must_use]
    pub fn components_of(&self, parent_id: PartId) -> Vec<ComponentAssignment> {
        let mut components = self
            .edges
            .read()
            .get(&parent_id)
            .cloned()
            .unwrap_or_default();
        components.sort_by_key(|e| e.component_id);
        components
    }

    /// Returns the number of components assigned to a parent.
    #[must_use]
    pub fn component_count(&self, parent_id: PartId) -> usize {
        self.edges.read().get(&parent_id).map_or(0, Vec::len)
    }

    /// Returns true if the part has at least one component assignment.
    #[must_use]
    pub fn is_composite(&self, part_id: PartId) -> bool {
        self.component_count(part_id) > 0
    }
}
