//! # Inventory Ledger
//!
//! Current on-hand quantity per part, plus the all-or-nothing stock
//! transaction that crafting runs on.
//!
//! ## Guarantees
//!
//! 1. **Never negative**: every debit is checked against current stock
//!    before anything mutates
//! 2. **Atomicity**: a [`StockTransaction`] applies every debit and the
//!    credit, or nothing at all
//! 3. **Serializable**: the whole check-then-mutate sequence runs inside
//!    one exclusive lock section, so two concurrent crafts can never both
//!    pass the sufficiency check on stale reads
//!
//! Rows are implicit: a part absent from the map reads as quantity 0 and
//! gets a row on first credit. Lock acquisition is time-bounded and
//! retried a fixed number of times before surfacing
//! [`EngineError::LedgerBusy`].

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use foundry_catalog::PartId;
use parking_lot::{RwLock, RwLockWriteGuard};

use crate::error::{EngineError, EngineResult};

/// Write-lock acquisition attempts before giving up.
const COMMIT_RETRIES: u32 = 3;

/// How long each lock attempt waits before retrying.
const LOCK_PATIENCE: Duration = Duration::from_millis(50);

/// The unit of work for a craft: a set of component debits plus one
/// parent credit, committed atomically by [`InventoryLedger::commit`].
///
/// Duplicate debits against the same part are merged, and debits are
/// applied in ascending part id order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StockTransaction {
    /// The part credited when the transaction commits.
    credit_part: PartId,
    /// How much the credited part gains.
    credit_amount: u64,
    /// Required totals per debited part, keyed in ascending id order.
    debits: BTreeMap<PartId, u64>,
}

impl StockTransaction {
    /// Starts a transaction that credits `part_id` by `amount`.
    #[must_use]
    pub const fn credit(part_id: PartId, amount: u64) -> Self {
        Self {
            credit_part: part_id,
            credit_amount: amount,
            debits: BTreeMap::new(),
        }
    }

    /// Adds a debit; repeated debits of the same part accumulate.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::QuantityOverflow`] if the accumulated debit
    /// for the part overflows.
    pub fn with_debit(mut self, part_id: PartId, amount: u64) -> EngineResult<Self> {
        let slot = self.debits.entry(part_id).or_insert(0);
        *slot = slot
            .checked_add(amount)
            .ok_or(EngineError::QuantityOverflow)?;
        Ok(self)
    }

    /// The debits this transaction will apply, in ascending part id order.
    #[must_use]
    pub fn debits(&self) -> impl Iterator<Item = (PartId, u64)> + '_ {
        self.debits.iter().map(|(&part_id, &amount)| (part_id, amount))
    }
}

/// The inventory ledger.
///
/// One shared handle per store; tests instantiate their own isolated
/// ledger instead of reaching for ambient global state.
#[derive(Debug, Default)]
pub struct InventoryLedger {
    /// Current quantity per part. Missing row = 0.
    rows: RwLock<HashMap<PartId, u64>>,
}

impl InventoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current quantity of a part.
    ///
    /// Parts never credited read as 0.
    #[must_use]
    pub fn quantity(&self, part_id: PartId) -> u64 {
        self.rows.read().get(&part_id).copied().unwrap_or(0)
    }

    /// Credits a single part.
    ///
    /// # Errors
    ///
    /// - [`EngineError::QuantityOverflow`] if the row would overflow
    /// - [`EngineError::LedgerBusy`] if the lock retry budget runs out
    pub fn credit(&self, part_id: PartId, amount: u64) -> EngineResult<u64> {
        let mut rows = self.write_rows()?;
        let current = rows.get(&part_id).copied().unwrap_or(0);
        let updated = current
            .checked_add(amount)
            .ok_or(EngineError::QuantityOverflow)?;
        rows.insert(part_id, updated);
        tracing::debug!(part_id, amount, updated, "stock credited");
        Ok(updated)
    }

    /// Commits a stock transaction: verifies every debit, then applies
    /// all debits and the credit. Returns the credited part's new
    /// quantity.
    ///
    /// If any component is short, nothing mutates and the first short
    /// part in ascending id order is reported.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InsufficientStock`] if any debit exceeds current
    ///   stock
    /// - [`EngineError::QuantityOverflow`] if the credited row would
    ///   overflow
    /// - [`EngineError::LedgerBusy`] if the lock retry budget runs out
    pub fn commit(&self, tx: &StockTransaction) -> EngineResult<u64> {
        debug_assert!(
            !tx.debits.contains_key(&tx.credit_part),
            "a transaction must not debit the part it credits"
        );

        let mut rows = self.write_rows()?;

        // Check phase: nothing mutates until every precondition holds.
        for (&part_id, &required) in &tx.debits {
            let available = rows.get(&part_id).copied().unwrap_or(0);
            if available < required {
                return Err(EngineError::InsufficientStock {
                    part_id,
                    required,
                    available,
                });
            }
        }
        let credited = rows
            .get(&tx.credit_part)
            .copied()
            .unwrap_or(0)
            .checked_add(tx.credit_amount)
            .ok_or(EngineError::QuantityOverflow)?;

        // Mutate phase: cannot fail.
        for (&part_id, &required) in &tx.debits {
            if let Some(quantity) = rows.get_mut(&part_id) {
                *quantity -= required;
            }
        }
        rows.insert(tx.credit_part, credited);

        tracing::debug!(
            credit_part = tx.credit_part,
            credit_amount = tx.credit_amount,
            debit_count = tx.debits.len(),
            "stock transaction committed"
        );
        Ok(credited)
    }

    /// Acquires the row write lock with bounded patience.
    fn write_rows(&self) -> EngineResult<RwLockWriteGuard<'_, HashMap<PartId, u64>>> {
        for attempt in 0..COMMIT_RETRIES {
            if let Some(guard) = self.rows.try_write_for(LOCK_PATIENCE) {
                return Ok(guard);
            }
            tracing::warn!(attempt, "ledger write lock contended, retrying");
        }
        Err(EngineError::LedgerBusy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_part_reads_zero() {
        let ledger = InventoryLedger::new();
        assert_eq!(ledger.quantity(42), 0);
    }

    #[test]
    fn credit_accumulates() {
        let ledger = InventoryLedger::new();
        assert_eq!(ledger.credit(1, 2).unwrap(), 2);
        assert_eq!(ledger.credit(1, 3).unwrap(), 5);
        assert_eq!(ledger.quantity(1), 5);
    }

    #[test]
    fn credit_overflow_detected() {
        let ledger = InventoryLedger::new();
        ledger.credit(1, u64::MAX).unwrap();
        assert_eq!(ledger.credit(1, 1), Err(EngineError::QuantityOverflow));
        assert_eq!(ledger.quantity(1), u64::MAX);
    }

    #[test]
    fn commit_debits_and_credits() {
        let ledger = InventoryLedger::new();
        ledger.credit(1, 4).unwrap();
        ledger.credit(2, 2).unwrap();

        let tx = StockTransaction::credit(3, 1)
            .with_debit(1, 2)
            .unwrap()
            .with_debit(2, 2)
            .unwrap();
        assert_eq!(ledger.commit(&tx).unwrap(), 1);

        assert_eq!(ledger.quantity(1), 2);
        assert_eq!(ledger.quantity(2), 0);
        assert_eq!(ledger.quantity(3), 1);
    }

    #[test]
    fn commit_shortfall_mutates_nothing() {
        let ledger = InventoryLedger::new();
        ledger.credit(1, 4).unwrap();
        ledger.credit(2, 1).unwrap();

        let tx = StockTransaction::credit(3, 1)
            .with_debit(1, 2)
            .unwrap()
            .with_debit(2, 2)
            .unwrap();
        assert_eq!(
            ledger.commit(&tx),
            Err(EngineError::InsufficientStock {
                part_id: 2,
                required: 2,
                available: 1,
            })
        );

        // Full before/after snapshot: not even the sufficient component moved.
        assert_eq!(ledger.quantity(1), 4);
        assert_eq!(ledger.quantity(2), 1);
        assert_eq!(ledger.quantity(3), 0);
    }

    #[test]
    fn first_short_part_reported_in_id_order() {
        let ledger = InventoryLedger::new();
        // Both rows short; the lower id must be the one reported.
        let tx = StockTransaction::credit(9, 1)
            .with_debit(5, 1)
            .unwrap()
            .with_debit(3, 1)
            .unwrap();
        assert_eq!(
            ledger.commit(&tx),
            Err(EngineError::InsufficientStock {
                part_id: 3,
                required: 1,
                available: 0,
            })
        );
    }

    #[test]
    fn duplicate_debits_merge() {
        let tx = StockTransaction::credit(9, 1)
            .with_debit(1, 2)
            .unwrap()
            .with_debit(1, 3)
            .unwrap();
        let debits: Vec<_> = tx.debits().collect();
        assert_eq!(debits, vec![(1, 5)]);
    }
}
