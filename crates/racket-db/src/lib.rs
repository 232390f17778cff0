//! Racket DB - the Ledger Store
//!
//! Durable relational storage for building records, attack records, company
//! economic state, and the append-only transaction log. The store is the
//! sole owner of all four row families; the engine reads through point
//! queries and mutates exclusively through [`Store::apply`], which commits a
//! whole [`racket_core::LedgerBatch`] in one write transaction.

mod error;
mod models;
mod queries;
mod store;

pub use error::{Error, Result};
pub use models::{
    StoredAttack, StoredBuilding, StoredBuildingKind, StoredCompany, StoredCounter,
    StoredTransaction,
};
pub use store::Store;
