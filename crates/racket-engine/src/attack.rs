//! Attack engine: apply a trick against a target building

use crate::error::Result;
use crate::{adjacency, auth, ledger};
use chrono::Utc;
use racket_core::{
    ActionError, AttackRecord, BuildingId, CompanyId, LedgerBatch, LedgerWrite,
    TransactionDetail, TrickKind,
};
use serde::Serialize;
use tracing::debug;

use crate::engine::Engine;

/// Result of a successful attack
#[derive(Debug, Clone, Serialize)]
pub struct AttackOutcome {
    /// The attacked building
    pub building: BuildingId,
    /// Damage percent after the trick
    pub damage_percent: u8,
    /// Fire state after the trick
    pub on_fire: bool,
}

impl Engine {
    /// Apply a trick against a target building.
    ///
    /// Raises the target's damage by the policy amount for the trick
    /// (saturating at 100), ignites the target for fire-causing tricks,
    /// records an uncleaned attack entry, charges the policy fee, and fans
    /// dirty marks out over the neighbors. One atomic batch; no partial
    /// application is observable.
    pub fn perform_attack(
        &self,
        actor: CompanyId,
        building_id: BuildingId,
        trick: TrickKind,
    ) -> Result<AttackOutcome> {
        let actor_row = self.fetch_company(actor)?;
        auth::ensure_at_liberty(&actor_row)?;

        let mut target = self.fetch_building(building_id)?;
        if target.collapsed {
            return Err(ActionError::Collapsed.into());
        }
        let expected_version = target.version;

        let before = target.damage_percent;
        target.apply_damage(self.policy.trick_damage(trick));
        let damage_dealt = target.damage_percent - before;
        if trick.causes_fire() {
            target.on_fire = true;
        }

        let fee = self.policy.attack_fee();
        let expected_cash = actor_row.cash;
        let mut actor_after = actor_row;
        if !fee.is_zero() {
            actor_after.cash =
                actor_after
                    .cash
                    .checked_debit(fee)
                    .ok_or(ActionError::InsufficientFunds {
                        required: fee,
                        available: expected_cash,
                    })?;
        }
        let now = Utc::now();
        actor_after.record_action(now);

        let record = AttackRecord::new(self.store.next_attack_id()?, building_id, trick, now);
        let entry = ledger::transaction_entry(
            &self.store,
            actor,
            target.location.map,
            building_id,
            target.company,
            -fee,
            TransactionDetail::Attack { trick, damage_dealt },
            now,
        )?;

        let mut batch = LedgerBatch::new();
        batch.push(LedgerWrite::UpdateBuilding {
            building: target.clone(),
            expected_version,
        });
        batch.push(LedgerWrite::UpdateCompany {
            company: actor_after,
            expected_cash,
        });
        batch.push(LedgerWrite::InsertAttack { record });
        batch.push(LedgerWrite::AppendTransaction { record: entry });
        adjacency::collect_dirty_marks(&target.location, &self.policy, &mut batch);
        self.store.apply(batch)?;

        debug!(
            actor = %actor,
            building = %building_id,
            trick = %trick,
            damage = target.damage_percent,
            on_fire = target.on_fire,
            "attack committed"
        );

        Ok(AttackOutcome {
            building: building_id,
            damage_percent: target.damage_percent,
            on_fire: target.on_fire,
        })
    }
}
