//! Building, company, and counter rows.

use chrono::DateTime;
use native_db::*;
use native_model::{native_model, Model};
use racket_core::{
    Building, BuildingId, BuildingKind, BuildingKindId, Company, CompanyId, Location, MapId, Money,
};
use serde::{Deserialize, Serialize};

/// Stored building type definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredBuildingKind {
    /// Primary key - kind ID.
    #[primary_key]
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Base monetary value.
    pub base_cost: i64,
}

impl StoredBuildingKind {
    /// Create from a core BuildingKind.
    pub fn from_kind(kind: &BuildingKind) -> Self {
        Self {
            id: kind.id.raw(),
            name: kind.name.clone(),
            base_cost: kind.base_cost.amount(),
        }
    }

    /// Convert to a core BuildingKind.
    pub fn to_kind(&self) -> BuildingKind {
        BuildingKind::new(
            BuildingKindId::new(self.id),
            self.name.clone(),
            Money::new(self.base_cost),
        )
    }
}

/// Stored building row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredBuilding {
    /// Primary key - building ID.
    #[primary_key]
    pub id: u64,
    /// Composite "map:x:y" key for point-by-coordinate lookups.
    #[secondary_key]
    pub tile_key: String,
    /// Map this building sits on.
    #[secondary_key]
    pub map_id: u64,
    /// Owning company, if any.
    pub company_id: Option<u64>,
    /// Building type.
    pub kind_id: u64,
    /// Tile column.
    pub x: i32,
    /// Tile row.
    pub y: i32,
    /// Damage percent in [0, 100].
    pub damage_percent: u8,
    /// Fire flag.
    pub on_fire: bool,
    /// Terminal collapsed state.
    pub collapsed: bool,
    /// Dirty flag for the external profit recalculation pass.
    pub needs_profit_recalc: bool,
    /// Row version backing conditional updates.
    pub version: u64,
}

impl StoredBuilding {
    /// Composite tile key for a location.
    pub fn tile_key_for(location: &Location) -> String {
        format!("{}:{}:{}", location.map.raw(), location.x, location.y)
    }

    /// Create from a core Building.
    pub fn from_building(building: &Building) -> Self {
        Self {
            id: building.id.raw(),
            tile_key: Self::tile_key_for(&building.location),
            map_id: building.location.map.raw(),
            company_id: building.company.map(|c| c.raw()),
            kind_id: building.kind.raw(),
            x: building.location.x,
            y: building.location.y,
            damage_percent: building.damage_percent,
            on_fire: building.on_fire,
            collapsed: building.collapsed,
            needs_profit_recalc: building.needs_profit_recalc,
            version: building.version,
        }
    }

    /// Convert to a core Building.
    pub fn to_building(&self) -> Building {
        Building {
            id: BuildingId::new(self.id),
            company: self.company_id.map(CompanyId::new),
            kind: BuildingKindId::new(self.kind_id),
            location: Location::new(MapId::new(self.map_id), self.x, self.y),
            damage_percent: self.damage_percent,
            on_fire: self.on_fire,
            collapsed: self.collapsed,
            needs_profit_recalc: self.needs_profit_recalc,
            version: self.version,
        }
    }
}

/// Stored company row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 3, version = 1)]
#[native_db]
pub struct StoredCompany {
    /// Primary key - company ID.
    #[primary_key]
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Cash balance.
    pub cash: i64,
    /// Incarceration gate.
    pub in_prison: bool,
    /// Lifetime successful action count.
    pub total_actions: u64,
    /// UTC microseconds of the last action, if any.
    pub last_action_at: Option<i64>,
    /// Ticks since the last action.
    pub ticks_since_action: u32,
}

impl StoredCompany {
    /// Create from a core Company.
    pub fn from_company(company: &Company) -> Self {
        Self {
            id: company.id.raw(),
            name: company.name.clone(),
            cash: company.cash.amount(),
            in_prison: company.in_prison,
            total_actions: company.total_actions,
            last_action_at: company.last_action_at.map(|t| t.timestamp_micros()),
            ticks_since_action: company.ticks_since_action,
        }
    }

    /// Convert to a core Company.
    pub fn to_company(&self) -> Company {
        Company {
            id: CompanyId::new(self.id),
            name: self.name.clone(),
            cash: Money::new(self.cash),
            in_prison: self.in_prison,
            total_actions: self.total_actions,
            last_action_at: self.last_action_at.and_then(DateTime::from_timestamp_micros),
            ticks_since_action: self.ticks_since_action,
        }
    }
}

/// Monotonic ID sequence row - one per named sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 4, version = 1)]
#[native_db]
pub struct StoredCounter {
    /// Sequence name ("attack", "transaction").
    #[primary_key]
    pub id: String,
    /// Next value to hand out.
    pub next: u64,
}
