//! # FOUNDRY Composition & Inventory Engine
//!
//! The hard core of FOUNDRY: which parts are built from which parts, and
//! how much of everything is on hand.
//!
//! ## Design Principles
//!
//! 1. **Derived classification** - raw vs composite is computed from the
//!    assignment graph at call time, never stored
//! 2. **Transactional crafting** - all component debits and the parent
//!    credit commit together, or nothing mutates
//! 3. **Injected state** - the [`Foundry`] facade owns explicit catalog,
//!    graph, and ledger handles; tests instantiate isolated ones
//! 4. **External configuration** - bootstrap catalogs live in TOML seeds
//!
//! ## Thread Safety
//!
//! Every service takes `&self` and is `Send + Sync`. Craft commits run
//! inside a single exclusive ledger section, so concurrent crafts over
//! shared components can never drive stock negative.
//!
//! ## Example
//!
//! ```rust
//! use foundry_catalog::PartDraft;
//! use foundry_engine::Foundry;
//!
//! let foundry = Foundry::new();
//! let metals = foundry.add_category("metals").unwrap();
//! let ore = foundry.create_part(PartDraft::new("iron ore", metals.id)).unwrap();
//! let ingot = foundry.create_part(PartDraft::new("iron ingot", metals.id)).unwrap();
//!
//! foundry.assign_component(ingot.id, ore.id, 3).unwrap();
//! foundry.farm(ore.id, 3).unwrap();
//! foundry.craft(ingot.id, 1).unwrap();
//!
//! assert_eq!(foundry.current_quantity(ingot.id).unwrap(), 1);
//! assert_eq!(foundry.current_quantity(ore.id).unwrap(), 0);
//! ```

pub mod error;
pub mod foundry;
pub mod graph;
pub mod ledger;
pub mod seed;

pub use error::{EngineError, EngineResult};
pub use foundry::{ComponentView, CraftReceipt, Foundry};
pub use graph::{AssignmentGraph, ComponentAssignment, MAX_COMPONENTS_PER_PART};
pub use ledger::{InventoryLedger, StockTransaction};
pub use seed::{SeedCatalog, SeedReport};
