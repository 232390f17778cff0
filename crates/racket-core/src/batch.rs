//! Deferred ledger writes
//!
//! The engine never mutates the store during an action's read/compute phase.
//! Each operation collects its mutations into a [`LedgerBatch`], which the
//! store applies inside a single write transaction: every write lands or
//! none does, so a cost check can never diverge from the applied effect.
//!
//! Building updates carry the version the engine read, and the store aborts
//! the whole batch when the stored version has moved on. A losing concurrent
//! request fails cleanly with a conflict instead of corrupting cost
//! accounting.

use crate::{AttackId, AttackRecord, Building, Company, Location, Money, TransactionRecord};
use serde::{Deserialize, Serialize};

/// A single pending mutation within an atomic batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LedgerWrite {
    /// Replace a building row, guarded by the version the engine read
    UpdateBuilding {
        /// The new row content (version is bumped by the store on commit)
        building: Building,
        /// The version the engine based its decision on
        expected_version: u64,
    },

    /// Replace a company row, guarded by the balance the engine read
    ///
    /// The guard keys the update on the precondition field itself: if the
    /// stored balance no longer matches, a racing debit or credit landed
    /// first and the whole batch aborts.
    UpdateCompany {
        /// The new row content
        company: Company,
        /// The balance the engine based its cost check on
        expected_cash: Money,
    },

    /// Insert a new attack record
    InsertAttack {
        /// The record to insert
        record: AttackRecord,
    },

    /// Mark an existing attack record as cleaned
    MarkAttackCleaned {
        /// The attack to mark
        id: AttackId,
    },

    /// Append an immutable transaction ledger row
    AppendTransaction {
        /// The row to append
        record: TransactionRecord,
    },

    /// Set the profit-recalc dirty flag on whatever building occupies a tile
    ///
    /// A no-op for empty tiles and for rows already marked dirty.
    MarkTileDirty {
        /// The tile to mark
        location: Location,
    },
}

/// An ordered collection of pending writes applied atomically
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerBatch {
    writes: Vec<LedgerWrite>,
}

impl LedgerBatch {
    /// Create a new empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pending write
    pub fn push(&mut self, write: LedgerWrite) {
        self.writes.push(write);
    }

    /// Extend this batch with the writes from another
    pub fn extend(&mut self, other: LedgerBatch) {
        self.writes.extend(other.writes);
    }

    /// Number of pending writes
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Check if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Iterate the pending writes in order
    pub fn iter(&self) -> impl Iterator<Item = &LedgerWrite> {
        self.writes.iter()
    }

    /// Consume the batch and return the underlying writes
    pub fn into_writes(self) -> Vec<LedgerWrite> {
        self.writes
    }
}
