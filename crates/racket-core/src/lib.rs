//! Racket Core - Domain model for the building action engine
//!
//! This crate provides the types shared by the store and the engine:
//! - Identifiers for buildings, companies, attacks, transactions, and maps
//! - The building, company, attack, and transaction rows
//! - Tile geometry for adjacency fan-out
//! - The action error taxonomy
//! - Deferred ledger writes (`LedgerWrite`, `LedgerBatch`)
//! - Policy parameters (trick damage, fees, rates, adjacency radius)
//!
//! The engine never mutates stored state directly: each action collects its
//! mutations into a [`LedgerBatch`] which the store applies atomically.

mod attack;
mod batch;
mod building;
mod company;
mod error;
mod identity;
mod money;
mod policy;
mod tile;
mod transaction;

pub use attack::{AttackRecord, TrickKind};
pub use batch::{LedgerBatch, LedgerWrite};
pub use building::{Building, BuildingKind};
pub use company::Company;
pub use error::{ActionError, Result};
pub use identity::{AttackId, BuildingId, BuildingKindId, CompanyId, MapId, TransactionId};
pub use money::Money;
pub use policy::{Policy, PolicyError};
pub use tile::Location;
pub use transaction::{ActionKind, TransactionDetail, TransactionRecord};
