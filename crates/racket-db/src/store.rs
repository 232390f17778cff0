//! Ledger store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use native_db::*;
use racket_core::{
    AttackId, Building, BuildingId, BuildingKind, BuildingKindId, Company, CompanyId, LedgerBatch,
    LedgerWrite, Location, TransactionId,
};
use std::path::Path;
use std::sync::LazyLock;

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredBuildingKind>().unwrap();
    models.define::<StoredBuilding>().unwrap();
    models.define::<StoredCompany>().unwrap();
    models.define::<StoredCounter>().unwrap();
    models.define::<StoredAttack>().unwrap();
    models.define::<StoredTransaction>().unwrap();
    models
});

/// Ledger store for persistent game state.
pub struct Store {
    pub(crate) db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Insert or replace a building type definition.
    pub fn insert_building_kind(&self, kind: &BuildingKind) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredBuildingKind::from_kind(kind))?;
        rw.commit()?;
        Ok(())
    }

    /// Insert or replace a company.
    pub fn insert_company(&self, company: &Company) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredCompany::from_company(company))?;
        rw.commit()?;
        Ok(())
    }

    /// Insert or replace a building.
    ///
    /// Placement itself is an external collaborator; this is the seam it
    /// writes through.
    pub fn insert_building(&self, building: &Building) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredBuilding::from_building(building))?;
        rw.commit()?;
        Ok(())
    }

    /// Load a building type definition by ID.
    pub fn building_kind(&self, id: BuildingKindId) -> Result<Option<BuildingKind>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredBuildingKind> = r.get().primary(id.raw())?;
        Ok(stored.map(|s| s.to_kind()))
    }

    /// Load a building by ID.
    pub fn building(&self, id: BuildingId) -> Result<Option<Building>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredBuilding> = r.get().primary(id.raw())?;
        Ok(stored.map(|s| s.to_building()))
    }

    /// Load a company by ID.
    pub fn company(&self, id: CompanyId) -> Result<Option<Company>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredCompany> = r.get().primary(id.raw())?;
        Ok(stored.map(|s| s.to_company()))
    }

    /// Load the building occupying a tile, if any.
    pub fn building_at(&self, location: &Location) -> Result<Option<Building>> {
        let key = StoredBuilding::tile_key_for(location);
        let r = self.db.r_transaction()?;
        let scan = r.scan().secondary::<StoredBuilding>(StoredBuildingKey::tile_key)?;
        let iter = scan.start_with(key.as_str())?;
        for row in iter {
            let row = row.map_err(|e| Error::Database(e.to_string()))?;
            if row.tile_key == key {
                return Ok(Some(row.to_building()));
            }
        }
        Ok(None)
    }

    /// Allocate the next attack ID.
    pub fn next_attack_id(&self) -> Result<AttackId> {
        self.next_in_sequence("attack").map(AttackId::new)
    }

    /// Allocate the next transaction ID.
    pub fn next_transaction_id(&self) -> Result<TransactionId> {
        self.next_in_sequence("transaction").map(TransactionId::new)
    }

    // Monotonic sequence, one row per name. An allocated value is burnt even
    // if the batch that uses it later aborts; gaps are harmless.
    fn next_in_sequence(&self, name: &str) -> Result<u64> {
        let rw = self.db.rw_transaction()?;
        let counter: Option<StoredCounter> = rw.get().primary(name.to_string())?;
        let next = counter.map(|c| c.next).unwrap_or(1);
        rw.upsert(StoredCounter {
            id: name.to_string(),
            next: next + 1,
        })?;
        rw.commit()?;
        Ok(next)
    }

    /// Apply a whole batch in one write transaction.
    ///
    /// Guarded writes re-read their row inside the transaction and abort the
    /// entire batch with [`Error::Conflict`] when the stored state no longer
    /// matches what the engine based its decision on. On any error nothing
    /// is applied.
    pub fn apply(&self, batch: LedgerBatch) -> Result<()> {
        let rw = self.db.rw_transaction()?;

        for write in batch.into_writes() {
            match write {
                LedgerWrite::UpdateBuilding {
                    mut building,
                    expected_version,
                } => {
                    let stored: Option<StoredBuilding> = rw.get().primary(building.id.raw())?;
                    let stored = stored.ok_or(Error::Conflict)?;
                    if stored.version != expected_version {
                        return Err(Error::Conflict);
                    }
                    building.version = expected_version + 1;
                    rw.upsert(StoredBuilding::from_building(&building))?;
                }

                LedgerWrite::UpdateCompany {
                    company,
                    expected_cash,
                } => {
                    let stored: Option<StoredCompany> = rw.get().primary(company.id.raw())?;
                    let stored = stored.ok_or(Error::Conflict)?;
                    if stored.cash != expected_cash.amount() || company.cash.is_negative() {
                        return Err(Error::Conflict);
                    }
                    rw.upsert(StoredCompany::from_company(&company))?;
                }

                LedgerWrite::InsertAttack { record } => {
                    rw.insert(StoredAttack::from_record(&record))?;
                }

                LedgerWrite::MarkAttackCleaned { id } => {
                    let stored: Option<StoredAttack> = rw.get().primary(id.raw())?;
                    let mut stored = stored.ok_or(Error::Conflict)?;
                    stored.cleaned = true;
                    rw.upsert(stored)?;
                }

                LedgerWrite::AppendTransaction { record } => {
                    rw.insert(StoredTransaction::from_record(&record)?)?;
                }

                LedgerWrite::MarkTileDirty { location } => {
                    let key = StoredBuilding::tile_key_for(&location);
                    let occupant = {
                        let scan = rw
                            .scan()
                            .secondary::<StoredBuilding>(StoredBuildingKey::tile_key)?;
                        let mut found = None;
                        for row in scan.start_with(key.as_str())? {
                            let row = row.map_err(|e| Error::Database(e.to_string()))?;
                            if row.tile_key == key {
                                found = Some(row);
                                break;
                            }
                        }
                        found
                    };
                    // Empty tiles and already-dirty rows are no-ops
                    if let Some(mut row) = occupant {
                        if !row.needs_profit_recalc {
                            row.needs_profit_recalc = true;
                            rw.upsert(row)?;
                        }
                    }
                }
            }
        }

        rw.commit()?;
        Ok(())
    }
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}
