//! # Foundry Verification Tests
//!
//! End-to-end checks of the composition and inventory contract:
//!
//! 1. **Classification**: raw parts farm, composite parts craft, never both
//! 2. **Atomicity**: a short component leaves every quantity untouched
//! 3. **Concurrency**: parallel crafts over a shared component never
//!    overdraw it, and the assignment cap holds under races
//!
//! Run with: cargo test --package foundry_engine --test foundry_verification

use std::sync::Arc;
use std::thread;

use foundry_catalog::{PartDraft, PartId};
use foundry_engine::{EngineError, Foundry};

/// Builds a foundry with one category and `count` raw parts.
fn foundry_with_parts(count: usize) -> (Arc<Foundry>, Vec<PartId>) {
    let foundry = Foundry::new();
    let category = foundry.add_category("verification parts").unwrap();
    let ids = (0..count)
        .map(|i| {
            foundry
                .create_part(PartDraft::new(format!("part {i}"), category.id))
                .unwrap()
                .id
        })
        .collect();
    (Arc::new(foundry), ids)
}

// ============================================================================
// SCENARIO 1: SINGLE-COMPONENT CRAFT CYCLE
// ============================================================================

#[test]
fn farm_then_craft_single_component() {
    let (foundry, ids) = foundry_with_parts(2);
    let (parent, component) = (ids[0], ids[1]);
    foundry.assign_component(parent, component, 2).unwrap();

    foundry.farm(component, 2).unwrap();
    assert_eq!(foundry.current_quantity(component).unwrap(), 2);

    foundry.craft(parent, 1).unwrap();
    assert_eq!(foundry.current_quantity(component).unwrap(), 0);
    assert_eq!(foundry.current_quantity(parent).unwrap(), 1);
}

// ============================================================================
// SCENARIO 2: TWO COMPONENTS, SECOND CRAFT STARVES
// ============================================================================

#[test]
fn second_craft_fails_without_leaking_debits() {
    let (foundry, ids) = foundry_with_parts(3);
    let (parent, c1, c2) = (ids[0], ids[1], ids[2]);
    foundry.assign_component(parent, c1, 2).unwrap();
    foundry.assign_component(parent, c2, 2).unwrap();

    foundry.farm(c1, 4).unwrap();
    foundry.farm(c2, 2).unwrap();

    foundry.craft(parent, 1).unwrap();
    assert_eq!(foundry.current_quantity(c1).unwrap(), 2);
    assert_eq!(foundry.current_quantity(c2).unwrap(), 0);
    assert_eq!(foundry.current_quantity(parent).unwrap(), 1);

    // c2 is dry: the craft must fail and c1 must keep its 2 units.
    let result = foundry.craft(parent, 1);
    assert_eq!(
        result,
        Err(EngineError::InsufficientStock {
            part_id: c2,
            required: 2,
            available: 0,
        })
    );
    assert_eq!(foundry.current_quantity(c1).unwrap(), 2);
    assert_eq!(foundry.current_quantity(c2).unwrap(), 0);
    assert_eq!(foundry.current_quantity(parent).unwrap(), 1);
}

// ============================================================================
// SCENARIO 3: MULTI-UNIT CRAFT
// ============================================================================

#[test]
fn craft_two_units_debits_scaled_totals() {
    let (foundry, ids) = foundry_with_parts(3);
    let (parent, c1, c2) = (ids[0], ids[1], ids[2]);
    foundry.assign_component(parent, c1, 2).unwrap();
    foundry.assign_component(parent, c2, 2).unwrap();

    foundry.farm(c1, 6).unwrap();
    foundry.farm(c2, 4).unwrap();

    let receipt = foundry.craft(parent, 2).unwrap();
    assert_eq!(receipt.crafted, 2);
    assert_eq!(receipt.consumed, vec![(c1, 4), (c2, 4)]);
    assert_eq!(foundry.current_quantity(c1).unwrap(), 2);
    assert_eq!(foundry.current_quantity(c2).unwrap(), 0);
    assert_eq!(foundry.current_quantity(parent).unwrap(), 2);
}

// ============================================================================
// SCENARIO 4: VALIDATION LEAVES STATE UNTOUCHED
// ============================================================================

#[test]
fn zero_quantity_operations_change_nothing() {
    let (foundry, ids) = foundry_with_parts(2);
    let (parent, component) = (ids[0], ids[1]);
    foundry.assign_component(parent, component, 1).unwrap();
    foundry.farm(component, 5).unwrap();

    assert_eq!(foundry.farm(component, 0), Err(EngineError::ZeroQuantity));
    assert_eq!(foundry.craft(parent, 0), Err(EngineError::ZeroQuantity));

    assert_eq!(foundry.current_quantity(component).unwrap(), 5);
    assert_eq!(foundry.current_quantity(parent).unwrap(), 0);
}

#[test]
fn assignment_cap_and_uniqueness() {
    let (foundry, ids) = foundry_with_parts(6);
    let parent = ids[0];

    for &component in &ids[1..5] {
        foundry.assign_component(parent, component, 1).unwrap();
    }
    assert_eq!(
        foundry.assign_component(parent, ids[5], 1),
        Err(EngineError::MaxAssignmentsReached { parent_id: parent, limit: 4 })
    );

    // Rejected duplicate must not disturb the original edge.
    assert_eq!(
        foundry.assign_component(parent, ids[1], 7),
        Err(EngineError::AlreadyAssigned {
            parent_id: parent,
            component_id: ids[1],
        })
    );
    let first = &foundry.components(parent).unwrap()[0];
    assert_eq!(first.required_quantity, 1);
}

// ============================================================================
// MISSION: CONCURRENT CRAFTS NEVER OVERDRAW
// ============================================================================

#[test]
fn concurrent_crafts_conserve_component_stock() {
    let (foundry, ids) = foundry_with_parts(2);
    let (parent, component) = (ids[0], ids[1]);
    foundry.assign_component(parent, component, 2).unwrap();
    foundry.farm(component, 100).unwrap();

    // 8 workers x 25 attempts need 400 units; only 100 exist, so exactly
    // 50 single-unit crafts can ever succeed.
    let successes: usize = (0..8)
        .map(|_| {
            let foundry = Arc::clone(&foundry);
            thread::spawn(move || {
                (0..25)
                    .filter(|_| foundry.craft(parent, 1).is_ok())
                    .count()
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .sum();

    assert_eq!(successes, 50);
    assert_eq!(foundry.current_quantity(component).unwrap(), 0);
    assert_eq!(foundry.current_quantity(parent).unwrap(), 50);
}

#[test]
fn concurrent_farms_are_lossless() {
    let (foundry, ids) = foundry_with_parts(1);
    let part = ids[0];

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let foundry = Arc::clone(&foundry);
            thread::spawn(move || {
                for _ in 0..100 {
                    foundry.farm(part, 3).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(foundry.current_quantity(part).unwrap(), 8 * 100 * 3);
}

#[test]
fn concurrent_assignments_respect_the_cap() {
    let (foundry, ids) = foundry_with_parts(9);
    let parent = ids[0];

    let successes: usize = ids[1..]
        .iter()
        .map(|&component| {
            let foundry = Arc::clone(&foundry);
            thread::spawn(move || foundry.assign_component(parent, component, 1).is_ok())
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&ok| ok)
        .count();

    assert_eq!(successes, 4);
    assert_eq!(foundry.components(parent).unwrap().len(), 4);
}
