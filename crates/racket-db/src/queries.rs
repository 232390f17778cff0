//! Common query patterns for the ledger store.

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::Store;
use racket_core::{AttackRecord, Building, BuildingId, CompanyId, MapId, TransactionRecord};

impl Store {
    /// Get all attacks recorded against a building.
    pub fn attacks_by_building(&self, building: BuildingId) -> Result<Vec<AttackRecord>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().secondary::<StoredAttack>(StoredAttackKey::building_id)?;
        let iter = scan.start_with(building.raw())?;
        let rows: std::result::Result<Vec<StoredAttack>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows
            .into_iter()
            .filter(|a| a.building_id == building.raw())
            .map(|a| a.to_record())
            .collect())
    }

    /// Get uncleaned attacks on a building, partitioned by fire-causing kind.
    ///
    /// `fire = true` selects the attacks only extinguish may clean;
    /// `fire = false` selects the attacks only cleanup may clean. The two
    /// sets never overlap.
    pub fn uncleaned_attacks(&self, building: BuildingId, fire: bool) -> Result<Vec<AttackRecord>> {
        Ok(self
            .attacks_by_building(building)?
            .into_iter()
            .filter(|a| !a.cleaned && a.trick.causes_fire() == fire)
            .collect())
    }

    /// Get a company's transaction history, oldest first.
    pub fn transactions_by_actor(&self, actor: CompanyId) -> Result<Vec<TransactionRecord>> {
        let r = self.db.r_transaction()?;
        let scan = r
            .scan()
            .secondary::<StoredTransaction>(StoredTransactionKey::actor_id)?;
        let iter = scan.start_with(actor.raw())?;
        let rows: std::result::Result<Vec<StoredTransaction>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        let mut records = rows
            .into_iter()
            .filter(|t| t.actor_id == actor.raw())
            .map(|t| t.to_record())
            .collect::<Result<Vec<_>>>()?;
        records.sort_by_key(|t| t.id.raw());
        Ok(records)
    }

    /// Get all buildings on a map.
    pub fn buildings_on_map(&self, map: MapId) -> Result<Vec<Building>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().secondary::<StoredBuilding>(StoredBuildingKey::map_id)?;
        let iter = scan.start_with(map.raw())?;
        let rows: std::result::Result<Vec<StoredBuilding>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows
            .into_iter()
            .filter(|b| b.map_id == map.raw())
            .map(|b| b.to_building())
            .collect())
    }

    /// Get the buildings on a map awaiting profit recalculation.
    ///
    /// Consumed by the external recalculation pass; this crate never clears
    /// the flag.
    pub fn dirty_buildings(&self, map: MapId) -> Result<Vec<Building>> {
        Ok(self
            .buildings_on_map(map)?
            .into_iter()
            .filter(|b| b.needs_profit_recalc)
            .collect())
    }
}
