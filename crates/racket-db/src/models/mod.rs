//! Stored row models for the ledger store.

mod ledger;
mod world;

pub use ledger::{StoredAttack, StoredTransaction};
pub use world::{StoredBuilding, StoredBuildingKind, StoredCompany, StoredCounter};

pub(crate) use ledger::{StoredAttackKey, StoredTransactionKey};
pub(crate) use world::StoredBuildingKey;
