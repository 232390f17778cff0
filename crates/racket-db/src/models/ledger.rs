//! Attack and transaction ledger rows.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use native_db::*;
use native_model::{native_model, Model};
use racket_core::{
    ActionKind, AttackId, AttackRecord, BuildingId, CompanyId, MapId, Money, TransactionDetail,
    TransactionId, TransactionRecord, TrickKind,
};
use serde::{Deserialize, Serialize};

/// Stored attack (trick) record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 5, version = 1)]
#[native_db]
pub struct StoredAttack {
    /// Primary key - attack ID.
    #[primary_key]
    pub id: u64,
    /// Target building.
    #[secondary_key]
    pub building_id: u64,
    /// Trick kind (coded).
    pub trick: u8,
    /// Whether a recovery action cleared this attack.
    pub cleaned: bool,
    /// UTC microseconds of creation.
    pub created_at: i64,
}

impl StoredAttack {
    /// Create from a core AttackRecord.
    pub fn from_record(record: &AttackRecord) -> Self {
        let trick = match record.trick {
            TrickKind::Graffiti => 0,
            TrickKind::BrickThrow => 1,
            TrickKind::Arson => 2,
        };
        Self {
            id: record.id.raw(),
            building_id: record.building.raw(),
            trick,
            cleaned: record.cleaned,
            created_at: record.created_at.timestamp_micros(),
        }
    }

    /// The trick kind of this row.
    pub fn trick_kind(&self) -> TrickKind {
        match self.trick {
            0 => TrickKind::Graffiti,
            1 => TrickKind::BrickThrow,
            _ => TrickKind::Arson,
        }
    }

    /// Convert to a core AttackRecord.
    pub fn to_record(&self) -> AttackRecord {
        AttackRecord {
            id: AttackId::new(self.id),
            building: BuildingId::new(self.building_id),
            trick: self.trick_kind(),
            cleaned: self.cleaned,
            created_at: timestamp(self.created_at),
        }
    }
}

/// Stored transaction ledger row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 6, version = 1)]
#[native_db]
pub struct StoredTransaction {
    /// Primary key - transaction ID.
    #[primary_key]
    pub id: u64,
    /// Acting company.
    #[secondary_key]
    pub actor_id: u64,
    /// Map the action happened on.
    pub map_id: u64,
    /// Action kind (coded).
    pub action: u8,
    /// Target building.
    pub building_id: u64,
    /// Target building's owner at action time.
    pub target_company_id: Option<u64>,
    /// Signed amount; negative = cost to the actor.
    pub amount: i64,
    /// Serialized action-specific detail payload.
    pub detail: Vec<u8>,
    /// UTC microseconds of creation.
    pub created_at: i64,
}

impl StoredTransaction {
    /// Create from a core TransactionRecord.
    pub fn from_record(record: &TransactionRecord) -> Result<Self> {
        let action = match record.action {
            ActionKind::Attack => 0,
            ActionKind::Cleanup => 1,
            ActionKind::Extinguish => 2,
            ActionKind::Repair => 3,
        };
        let detail =
            bincode::serialize(&record.detail).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(Self {
            id: record.id.raw(),
            actor_id: record.actor.raw(),
            map_id: record.map.raw(),
            action,
            building_id: record.building.raw(),
            target_company_id: record.target_company.map(|c| c.raw()),
            amount: record.amount.amount(),
            detail,
            created_at: record.created_at.timestamp_micros(),
        })
    }

    /// Convert to a core TransactionRecord.
    pub fn to_record(&self) -> Result<TransactionRecord> {
        let action = match self.action {
            0 => ActionKind::Attack,
            1 => ActionKind::Cleanup,
            2 => ActionKind::Extinguish,
            _ => ActionKind::Repair,
        };
        let detail: TransactionDetail =
            bincode::deserialize(&self.detail).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(TransactionRecord {
            id: TransactionId::new(self.id),
            actor: CompanyId::new(self.actor_id),
            map: MapId::new(self.map_id),
            action,
            building: BuildingId::new(self.building_id),
            target_company: self.target_company_id.map(CompanyId::new),
            amount: Money::new(self.amount),
            detail,
            created_at: timestamp(self.created_at),
        })
    }
}

fn timestamp(micros: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(micros).unwrap_or_default()
}
