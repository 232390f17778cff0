//! Racket Engine - the building lifecycle and economic action engine
//!
//! Four priced, authorization-gated, atomically-applied actions over the
//! ledger store:
//!
//! - **attack**: apply a trick to a target building (damage, maybe fire)
//! - **extinguish**: put out a fire; the one community action, always free
//! - **cleanup**: owner clears non-fire tricks for a fee
//! - **repair**: owner restores damage to zero for a fee
//!
//! Each action is read-check-collect-apply: rows are fetched, the
//! authorization gate and domain preconditions run against them, the
//! mutations are collected into a [`racket_core::LedgerBatch`], and the
//! store commits the batch atomically. A losing concurrent request fails
//! cleanly with [`racket_core::ActionError::Conflict`] instead of
//! corrupting cost accounting.

mod adjacency;
mod api;
mod attack;
mod auth;
mod engine;
mod error;
mod ledger;
mod recovery;

pub use api::{
    ActionRequest, ActionResponse, AttackResponse, CleanupResponse, ErrorResponse,
    ExtinguishResponse, RepairResponse,
};
pub use attack::AttackOutcome;
pub use engine::Engine;
pub use error::{Error, Result};
pub use recovery::{CleanupOutcome, ExtinguishOutcome, RepairOutcome};

#[cfg(test)]
pub(crate) mod testutil;
