//! Append-only transaction ledger rows

use crate::{BuildingId, CompanyId, MapId, Money, TransactionId, TrickKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of economic action a ledger row records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// A trick applied to a target building
    Attack,
    /// Non-fire tricks cleared by the owner
    Cleanup,
    /// Fire put out; the one community action, always free
    Extinguish,
    /// Damage restored to zero by the owner
    Repair,
}

impl ActionKind {
    /// Stable name for wire payloads and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Attack => "attack",
            ActionKind::Cleanup => "cleanup",
            ActionKind::Extinguish => "extinguish",
            ActionKind::Repair => "repair",
        }
    }

    /// Whether the given signed amount is legal for this action kind
    ///
    /// Extinguish is always 0; every other kind is a cost (≤ 0) to the
    /// acting company.
    pub fn amount_sign_ok(&self, amount: Money) -> bool {
        match self {
            ActionKind::Extinguish => amount.is_zero(),
            ActionKind::Attack | ActionKind::Cleanup | ActionKind::Repair => {
                amount.amount() <= 0
            }
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action-specific payload carried by a ledger row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransactionDetail {
    /// What trick was applied and how much damage it dealt
    Attack {
        /// The trick kind
        trick: TrickKind,
        /// Damage percent actually added (after the 100 cap)
        damage_dealt: u8,
    },
    /// How many non-fire attacks were cleared
    Cleanup {
        /// Count of attacks marked cleaned
        attacks_cleaned: u32,
    },
    /// How many arson attacks were cleared along with the fire
    Extinguish {
        /// Count of attacks marked cleaned
        attacks_cleaned: u32,
    },
    /// How much damage was repaired
    Repair {
        /// The damage percent before the repair
        damage_repaired: u8,
    },
}

impl TransactionDetail {
    /// The action kind this detail belongs to
    pub fn kind(&self) -> ActionKind {
        match self {
            TransactionDetail::Attack { .. } => ActionKind::Attack,
            TransactionDetail::Cleanup { .. } => ActionKind::Cleanup,
            TransactionDetail::Extinguish { .. } => ActionKind::Extinguish,
            TransactionDetail::Repair { .. } => ActionKind::Repair,
        }
    }
}

/// An immutable audit record of one successful economic action
///
/// Created exactly once per action, in the same atomic batch as the state
/// mutation it describes. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier
    pub id: TransactionId,
    /// The company that performed the action
    pub actor: CompanyId,
    /// The map the action happened on
    pub map: MapId,
    /// What was done
    pub action: ActionKind,
    /// The targeted building
    pub building: BuildingId,
    /// The building's owner at action time, if any
    pub target_company: Option<CompanyId>,
    /// Signed amount; negative = cost to the actor
    pub amount: Money,
    /// Action-specific payload
    pub detail: TransactionDetail,
    /// When the action was committed
    pub created_at: DateTime<Utc>,
}
