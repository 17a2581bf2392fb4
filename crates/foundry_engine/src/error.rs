//! # Engine Error Types
//!
//! All errors that can occur in the composition and inventory engine.

use foundry_catalog::{CatalogError, PartId};
use thiserror::Error;

/// Errors that can occur in the composition and inventory engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A farm, craft, or assignment quantity was 0.
    #[error("quantity must be bigger than 0")]
    ZeroQuantity,

    /// Part not found in the catalog.
    #[error("part not found: {0}")]
    PartNotFound(PartId),

    /// Attempted to assign a part as a component of itself.
    #[error("part {part_id} cannot be assigned as a component of itself")]
    SelfAssignment {
        /// The part on both ends of the rejected edge.
        part_id: PartId,
    },

    /// The (parent, component) pair is already assigned.
    #[error("component {component_id} has been already assigned to part {parent_id}")]
    AlreadyAssigned {
        /// The parent part.
        parent_id: PartId,
        /// The component part.
        component_id: PartId,
    },

    /// The parent already has the maximum number of component assignments.
    #[error("max component assignment reached for part {parent_id} (limit {limit})")]
    MaxAssignmentsReached {
        /// The parent part.
        parent_id: PartId,
        /// The assignment cap.
        limit: usize,
    },

    /// Attempted to farm a composite part.
    #[error("part {part_id} cannot be added, it must be crafted")]
    MustBeCrafted {
        /// The composite part.
        part_id: PartId,
    },

    /// Attempted to craft a raw part.
    #[error("part {part_id} cannot be crafted, it has no components")]
    MustBeFarmed {
        /// The raw part.
        part_id: PartId,
    },

    /// A craft sufficiency check failed; nothing was debited.
    #[error("not enough of part {part_id}: need {required}, have {available}")]
    InsufficientStock {
        /// The component that was short.
        part_id: PartId,
        /// The total quantity the craft required.
        required: u64,
        /// The quantity on hand.
        available: u64,
    },

    /// Arithmetic overflow computing quantities.
    #[error("arithmetic overflow in quantity calculation")]
    QuantityOverflow,

    /// The ledger could not be locked within the retry budget.
    #[error("inventory ledger busy, try again")]
    LedgerBusy,

    /// A seed entry referenced a name that was not declared earlier.
    #[error("seed references unknown name: {name}")]
    UnknownSeedReference {
        /// The unresolved category or part name.
        name: String,
    },

    /// A seed document could not be parsed.
    #[error("invalid seed catalog: {0}")]
    InvalidSeed(String),

    /// Catalog-level failure (unknown part/category, invalid draft).
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
