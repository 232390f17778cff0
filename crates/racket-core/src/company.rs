//! Company (economic actor) rows

use crate::{CompanyId, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The acting/owning economic entity
///
/// Cash is only mutated through authorized economic actions (this engine) or
/// the external tick processor. An engine debit never takes the balance
/// below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier
    pub id: CompanyId,
    /// Display name
    pub name: String,
    /// Cash balance, never negative
    pub cash: Money,
    /// Incarcerated companies may not act at all
    pub in_prison: bool,
    /// Lifetime count of successful paid actions
    pub total_actions: u64,
    /// When the last successful action was committed
    pub last_action_at: Option<DateTime<Utc>>,
    /// Ticks elapsed since the last action; reset on every action
    pub ticks_since_action: u32,
}

impl Company {
    /// Create a new company with a starting balance
    pub fn new(id: CompanyId, name: impl Into<String>, cash: Money) -> Self {
        Self {
            id,
            name: name.into(),
            cash,
            in_prison: false,
            total_actions: 0,
            last_action_at: None,
            ticks_since_action: 0,
        }
    }

    /// Record a successful action: bump the counter, reset the idle tick
    /// count, stamp the action time
    pub fn record_action(&mut self, now: DateTime<Utc>) {
        self.total_actions += 1;
        self.ticks_since_action = 0;
        self.last_action_at = Some(now);
    }
}
