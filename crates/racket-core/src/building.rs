//! Building rows and building type definitions

use crate::{BuildingId, BuildingKindId, CompanyId, Location, Money};
use serde::{Deserialize, Serialize};

/// A building type definition
///
/// The base cost drives every cost formula: repair charges a fraction of it
/// proportional to damage, cleanup charges 5% of it per outstanding trick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingKind {
    /// Unique identifier for this type
    pub id: BuildingKindId,
    /// Display name
    pub name: String,
    /// Base monetary value
    pub base_cost: Money,
}

impl BuildingKind {
    /// Create a new building type
    pub fn new(id: BuildingKindId, name: impl Into<String>, base_cost: Money) -> Self {
        Self {
            id,
            name: name.into(),
            base_cost,
        }
    }
}

/// A placed building on a map tile
///
/// Lifecycle: placed (externally) → mutated by the attack engine (damage up,
/// fire flag) and the recovery engine (damage down, fire cleared) →
/// collapsed (external trigger, terminal for this engine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Unique identifier
    pub id: BuildingId,
    /// Owning company; `None` for unowned/claim-stake states
    pub company: Option<CompanyId>,
    /// The building type, which drives cost formulas
    pub kind: BuildingKindId,
    /// Tile position on its map
    pub location: Location,
    /// Accumulated damage, always in [0, 100]
    pub damage_percent: u8,
    /// Whether the building is currently burning
    pub on_fire: bool,
    /// Terminal state; no recovery action applies
    pub collapsed: bool,
    /// Dirty flag consumed by the external profit recalculation pass
    pub needs_profit_recalc: bool,
    /// Row version, bumped on every committed mutation
    pub version: u64,
}

impl Building {
    /// Create a new healthy building
    pub fn new(id: BuildingId, kind: BuildingKindId, location: Location) -> Self {
        Self {
            id,
            company: None,
            kind,
            location,
            damage_percent: 0,
            on_fire: false,
            collapsed: false,
            needs_profit_recalc: false,
            version: 0,
        }
    }

    /// Set the owning company
    pub fn owned_by(mut self, company: CompanyId) -> Self {
        self.company = Some(company);
        self
    }

    /// Check whether the given company owns this building
    pub fn is_owned_by(&self, company: CompanyId) -> bool {
        self.company == Some(company)
    }

    /// Add damage, saturating at 100
    pub fn apply_damage(&mut self, amount: u8) {
        self.damage_percent = self.damage_percent.saturating_add(amount).min(100);
    }
}
