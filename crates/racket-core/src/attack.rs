//! Attack (trick) kinds and records

use crate::{AttackId, BuildingId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of adversarial trick applied to a building
///
/// Arson is the sole fire-causing kind. The two recovery paths partition the
/// attack set by this distinction: arson attacks are cleaned only by
/// extinguish, every other kind only by cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrickKind {
    /// Cosmetic defacement, no structural damage
    Graffiti,
    /// Thrown debris, minor structural damage
    BrickThrow,
    /// Sets the target on fire
    Arson,
}

impl TrickKind {
    /// Whether this trick ignites the target
    pub fn causes_fire(&self) -> bool {
        matches!(self, TrickKind::Arson)
    }

    /// Stable name for wire payloads and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            TrickKind::Graffiti => "graffiti",
            TrickKind::BrickThrow => "brick_throw",
            TrickKind::Arson => "arson",
        }
    }
}

impl fmt::Display for TrickKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded instance of a trick applied to a building
///
/// Created by the attack engine, marked cleaned by exactly one recovery
/// operation depending on kind, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackRecord {
    /// Unique identifier
    pub id: AttackId,
    /// The targeted building
    pub building: BuildingId,
    /// What was done
    pub trick: TrickKind,
    /// Whether a recovery action has cleared this attack
    pub cleaned: bool,
    /// When the attack was committed
    pub created_at: DateTime<Utc>,
}

impl AttackRecord {
    /// Create a new uncleaned attack record
    pub fn new(
        id: AttackId,
        building: BuildingId,
        trick: TrickKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            building,
            trick,
            cleaned: false,
            created_at,
        }
    }
}
