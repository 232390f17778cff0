//! Action error taxonomy
//!
//! Every variant is a precondition/validation failure surfaced synchronously
//! to the caller. None is fatal to the process, and none is retried by the
//! engine: a retry after a successful-but-slow commit could double-debit, so
//! resubmission is the caller's decision.

use crate::{BuildingId, Money};
use thiserror::Error;

/// Why an economic action was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// The acting company is incarcerated
    #[error("company is in prison and cannot act")]
    PrisonBlocked,

    /// The target building does not exist
    #[error("building {0} not found")]
    NotFound(BuildingId),

    /// The actor does not own the target building
    #[error("building is not owned by the acting company")]
    NotOwner,

    /// The supplied map/tile coordinates do not match the building
    #[error("supplied location does not match the building's position")]
    LocationMismatch,

    /// Extinguish on a building that is not burning
    #[error("building is not on fire")]
    NotOnFire,

    /// The target is collapsed; no recovery action applies
    #[error("building has collapsed")]
    Collapsed,

    /// Cleanup with no outstanding non-fire attacks
    #[error("no tricks to clean up")]
    NothingToClean,

    /// Repair on an undamaged building
    #[error("building is not damaged")]
    NotDamaged,

    /// Repair attempted while the building is burning
    #[error("the fire must be extinguished before the building can be repaired")]
    FireMustBeExtinguishedFirst,

    /// The actor cannot afford the computed cost
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        /// The computed cost of the action
        required: Money,
        /// The actor's current balance
        available: Money,
    },

    /// A concurrent mutation won the race; nothing was applied
    #[error("the building was modified concurrently, please retry")]
    Conflict,
}

impl ActionError {
    /// Stable machine-readable kind string for wire payloads
    pub fn kind(&self) -> &'static str {
        match self {
            ActionError::PrisonBlocked => "prison_blocked",
            ActionError::NotFound(_) => "not_found",
            ActionError::NotOwner => "not_owner",
            ActionError::LocationMismatch => "location_mismatch",
            ActionError::NotOnFire => "not_on_fire",
            ActionError::Collapsed => "collapsed",
            ActionError::NothingToClean => "nothing_to_clean",
            ActionError::NotDamaged => "not_damaged",
            ActionError::FireMustBeExtinguishedFirst => "fire_must_be_extinguished_first",
            ActionError::InsufficientFunds { .. } => "insufficient_funds",
            ActionError::Conflict => "conflict",
        }
    }

    /// The computed cost, for monetary rejections
    pub fn cost(&self) -> Option<Money> {
        match self {
            ActionError::InsufficientFunds { required, .. } => Some(*required),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ActionError>;

// Compile-time check that ActionError is Send + Sync for thread-safe
// propagation across request handlers.
fn _assert_error_send_sync<T: Send + Sync>() {}
fn _error_is_send_sync() {
    _assert_error_send_sync::<ActionError>();
}
