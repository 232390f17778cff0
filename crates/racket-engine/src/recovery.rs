//! Recovery engine: extinguish, cleanup, and repair
//!
//! Three sibling operations sharing one shape: fetch the target with
//! authorization and precondition checks, compute the cost, collect one
//! atomic batch (state mutation + cash debit + ledger row), propagate
//! adjacency. Recovery ordering is strict: a fire must be extinguished
//! before repair is permitted, independent of cleanup.

use crate::error::Result;
use crate::{adjacency, auth, ledger};
use chrono::Utc;
use racket_core::{
    ActionError, BuildingId, CompanyId, LedgerBatch, LedgerWrite, Location, Money,
    TransactionDetail,
};
use serde::Serialize;
use tracing::debug;

use crate::engine::Engine;

/// Result of a successful extinguish
#[derive(Debug, Clone, Serialize)]
pub struct ExtinguishOutcome {
    /// The building whose fire was put out
    pub building: BuildingId,
    /// The building's owner, if any
    pub owner: Option<CompanyId>,
    /// The owner's display name, for the response payload
    pub owner_name: Option<String>,
    /// Arson attacks marked cleaned along with the fire
    pub attacks_cleaned: u32,
}

/// Result of a successful cleanup
#[derive(Debug, Clone, Serialize)]
pub struct CleanupOutcome {
    /// Non-fire attacks marked cleaned
    pub attacks_cleaned: u32,
    /// What the owner paid
    pub cost: Money,
}

/// Result of a successful repair
#[derive(Debug, Clone, Serialize)]
pub struct RepairOutcome {
    /// The damage percent that was repaired away
    pub damage_repaired: u8,
    /// What the owner paid
    pub cost: Money,
}

impl Engine {
    /// Put out a fire on a building.
    ///
    /// The one community action: any company may perform it, not only the
    /// owner, so fire spread risk can be contained by whoever sees it
    /// first. In exchange the caller must prove observation by supplying
    /// the building's full location, and the action is always free.
    pub fn extinguish_fire(
        &self,
        actor: CompanyId,
        building_id: BuildingId,
        claimed: Location,
    ) -> Result<ExtinguishOutcome> {
        let actor_row = self.fetch_company(actor)?;
        auth::ensure_at_liberty(&actor_row)?;

        let mut target = self.fetch_building(building_id)?;
        auth::verify_location(&target, &claimed)?;
        if !target.on_fire {
            return Err(ActionError::NotOnFire.into());
        }
        if target.collapsed {
            return Err(ActionError::Collapsed.into());
        }
        let expected_version = target.version;

        target.on_fire = false;

        let arson = self.store.uncleaned_attacks(building_id, true)?;
        let attacks_cleaned = arson.len() as u32;
        let now = Utc::now();
        let entry = ledger::transaction_entry(
            &self.store,
            actor,
            target.location.map,
            building_id,
            target.company,
            Money::ZERO,
            TransactionDetail::Extinguish { attacks_cleaned },
            now,
        )?;

        let mut batch = LedgerBatch::new();
        batch.push(LedgerWrite::UpdateBuilding {
            building: target.clone(),
            expected_version,
        });
        for attack in &arson {
            batch.push(LedgerWrite::MarkAttackCleaned { id: attack.id });
        }
        batch.push(LedgerWrite::AppendTransaction { record: entry });
        adjacency::collect_dirty_marks(&target.location, &self.policy, &mut batch);
        self.store.apply(batch)?;

        let owner_name = match target.company {
            Some(owner) => Some(self.fetch_company(owner)?.name),
            None => None,
        };

        debug!(
            actor = %actor,
            building = %building_id,
            attacks_cleaned,
            "fire extinguished"
        );

        Ok(ExtinguishOutcome {
            building: building_id,
            owner: target.company,
            owner_name,
            attacks_cleaned,
        })
    }

    /// Clear the non-fire tricks on an owned building.
    ///
    /// Charges 5% of the building's base value (policy rate) per
    /// outstanding trick. Cosmetic only: damage and fire state are
    /// untouched, so no adjacency propagation happens.
    pub fn cleanup_tricks(
        &self,
        actor: CompanyId,
        building_id: BuildingId,
    ) -> Result<CleanupOutcome> {
        let actor_row = self.fetch_company(actor)?;
        auth::ensure_at_liberty(&actor_row)?;

        let target = self.fetch_building(building_id)?;
        auth::ensure_owner(&actor_row, &target)?;
        if target.collapsed {
            return Err(ActionError::Collapsed.into());
        }

        let outstanding = self.store.uncleaned_attacks(building_id, false)?;
        if outstanding.is_empty() {
            return Err(ActionError::NothingToClean.into());
        }
        let attacks_cleaned = outstanding.len() as u32;

        let kind = self.fetch_kind(&target)?;
        let cost = kind
            .base_cost
            .scaled(self.policy.cleanup_rate() * f64::from(attacks_cleaned));

        let expected_cash = actor_row.cash;
        let mut actor_after = actor_row;
        actor_after.cash =
            actor_after
                .cash
                .checked_debit(cost)
                .ok_or(ActionError::InsufficientFunds {
                    required: cost,
                    available: expected_cash,
                })?;
        let now = Utc::now();
        actor_after.record_action(now);

        let entry = ledger::transaction_entry(
            &self.store,
            actor,
            target.location.map,
            building_id,
            target.company,
            -cost,
            TransactionDetail::Cleanup { attacks_cleaned },
            now,
        )?;

        let mut batch = LedgerBatch::new();
        for attack in &outstanding {
            batch.push(LedgerWrite::MarkAttackCleaned { id: attack.id });
        }
        batch.push(LedgerWrite::UpdateCompany {
            company: actor_after,
            expected_cash,
        });
        batch.push(LedgerWrite::AppendTransaction { record: entry });
        self.store.apply(batch)?;

        debug!(
            actor = %actor,
            building = %building_id,
            attacks_cleaned,
            cost = %cost,
            "tricks cleaned up"
        );

        Ok(CleanupOutcome {
            attacks_cleaned,
            cost,
        })
    }

    /// Restore an owned building's damage to zero.
    ///
    /// Always a full restoration, never partial: the cost is the fraction
    /// of the base value matching the current damage. A burning building
    /// must be extinguished first.
    pub fn repair_building(
        &self,
        actor: CompanyId,
        building_id: BuildingId,
    ) -> Result<RepairOutcome> {
        let actor_row = self.fetch_company(actor)?;
        auth::ensure_at_liberty(&actor_row)?;

        let mut target = self.fetch_building(building_id)?;
        auth::ensure_owner(&actor_row, &target)?;
        if target.collapsed {
            return Err(ActionError::Collapsed.into());
        }
        if target.damage_percent == 0 {
            return Err(ActionError::NotDamaged.into());
        }
        if target.on_fire {
            return Err(ActionError::FireMustBeExtinguishedFirst.into());
        }
        let expected_version = target.version;

        let kind = self.fetch_kind(&target)?;
        let damage_repaired = target.damage_percent;
        let cost = kind
            .base_cost
            .scaled(f64::from(damage_repaired) / 100.0);

        let expected_cash = actor_row.cash;
        let mut actor_after = actor_row;
        actor_after.cash =
            actor_after
                .cash
                .checked_debit(cost)
                .ok_or(ActionError::InsufficientFunds {
                    required: cost,
                    available: expected_cash,
                })?;
        let now = Utc::now();
        actor_after.record_action(now);

        target.damage_percent = 0;
        target.needs_profit_recalc = true;

        let entry = ledger::transaction_entry(
            &self.store,
            actor,
            target.location.map,
            building_id,
            target.company,
            -cost,
            TransactionDetail::Repair { damage_repaired },
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
        batch.push(LedgerWrite::AppendTransaction { record: entry });
        adjacency::collect_dirty_marks(&target.location, &self.policy, &mut batch);
        self.store.apply(batch)?;

        debug!(
            actor = %actor,
            building = %building_id,
            damage_repaired,
            cost = %cost,
            "building repaired"
        );

        Ok(RepairOutcome {
            damage_repaired,
            cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use racket_core::{ActionKind, TrickKind};

    // ========================================================================
    // Extinguish
    // ========================================================================

    #[test]
    fn test_extinguish_clears_fire_and_arson_attacks() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Arson)
            .unwrap();

        let location = world.building(world.target).location;
        // The pauper, a bystander, extinguishes: no ownership required
        let outcome = world
            .engine
            .extinguish_fire(world.pauper, world.target, location)
            .unwrap();

        assert_eq!(outcome.attacks_cleaned, 1);
        assert_eq!(outcome.owner, Some(world.owner));
        assert_eq!(outcome.owner_name.as_deref(), Some("Blue Sky Estates"));

        let target = world.building(world.target);
        assert!(!target.on_fire);
        // Damage from the arson remains until repaired
        assert_eq!(target.damage_percent, 15);
        assert!(world
            .engine
            .store()
            .uncleaned_attacks(world.target, true)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_extinguish_is_free_and_does_not_touch_counters() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Arson)
            .unwrap();

        let before = world.company(world.pauper);
        let location = world.building(world.target).location;
        world
            .engine
            .extinguish_fire(world.pauper, world.target, location)
            .unwrap();

        let after = world.company(world.pauper);
        assert_eq!(after.cash, before.cash);
        assert_eq!(after.total_actions, before.total_actions);

        let history = world
            .engine
            .store()
            .transactions_by_actor(world.pauper)
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, ActionKind::Extinguish);
        assert_eq!(history[0].amount, Money::ZERO);
    }

    #[test]
    fn test_extinguish_leaves_cleanup_attacks_alone() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Graffiti)
            .unwrap();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Arson)
            .unwrap();

        let location = world.building(world.target).location;
        world
            .engine
            .extinguish_fire(world.rival, world.target, location)
            .unwrap();

        // The graffiti still awaits cleanup; the partition never overlaps
        assert_eq!(
            world
                .engine
                .store()
                .uncleaned_attacks(world.target, false)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_extinguish_requires_matching_location() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Arson)
            .unwrap();

        let mut wrong = world.building(world.target).location;
        wrong.x += 1;
        let err = world
            .engine
            .extinguish_fire(world.pauper, world.target, wrong)
            .unwrap_err();
        assert_eq!(err.as_action(), Some(&ActionError::LocationMismatch));
        assert!(world.building(world.target).on_fire);
    }

    #[test]
    fn test_extinguish_not_burning() {
        let world = testutil::world();

        let location = world.building(world.target).location;
        let err = world
            .engine
            .extinguish_fire(world.pauper, world.target, location)
            .unwrap_err();
        assert_eq!(err.as_action(), Some(&ActionError::NotOnFire));
    }

    #[test]
    fn test_extinguish_retry_fails_not_on_fire() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Arson)
            .unwrap();

        let location = world.building(world.target).location;
        world
            .engine
            .extinguish_fire(world.pauper, world.target, location)
            .unwrap();

        let err = world
            .engine
            .extinguish_fire(world.pauper, world.target, location)
            .unwrap_err();
        assert_eq!(err.as_action(), Some(&ActionError::NotOnFire));
    }

    #[test]
    fn test_extinguish_marks_neighbors_dirty() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Arson)
            .unwrap();

        let location = world.building(world.target).location;
        world
            .engine
            .extinguish_fire(world.pauper, world.target, location)
            .unwrap();

        assert!(world.building(world.neighbor).needs_profit_recalc);
    }

    #[test]
    fn test_prisoner_cannot_extinguish() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Arson)
            .unwrap();

        let location = world.building(world.target).location;
        let err = world
            .engine
            .extinguish_fire(world.prisoner, world.target, location)
            .unwrap_err();
        assert_eq!(err.as_action(), Some(&ActionError::PrisonBlocked));
    }

    // ========================================================================
    // Cleanup
    // ========================================================================

    #[test]
    fn test_cleanup_cost_and_effect() {
        let world = testutil::world();
        for _ in 0..3 {
            world
                .engine
                .perform_attack(world.rival, world.target, TrickKind::Graffiti)
                .unwrap();
        }

        let outcome = world
            .engine
            .cleanup_tricks(world.owner, world.target)
            .unwrap();

        // 5% of 100_000 per trick, 3 tricks
        assert_eq!(outcome.cost, Money::new(15_000));
        assert_eq!(outcome.attacks_cleaned, 3);
        assert_eq!(world.company(world.owner).cash, Money::new(485_000));
        assert!(world
            .engine
            .store()
            .uncleaned_attacks(world.target, false)
            .unwrap()
            .is_empty());

        let history = world
            .engine
            .store()
            .transactions_by_actor(world.owner)
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, ActionKind::Cleanup);
        assert_eq!(history[0].amount, Money::new(-15_000));
    }

    #[test]
    fn test_cleanup_never_touches_damage_or_fire() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::BrickThrow)
            .unwrap();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Arson)
            .unwrap();

        world
            .engine
            .cleanup_tricks(world.owner, world.target)
            .unwrap();

        let target = world.building(world.target);
        assert_eq!(target.damage_percent, 25);
        assert!(target.on_fire);
        // The arson attack is extinguish's business, not cleanup's
        assert_eq!(
            world
                .engine
                .store()
                .uncleaned_attacks(world.target, true)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_cleanup_requires_ownership() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Graffiti)
            .unwrap();

        let err = world
            .engine
            .cleanup_tricks(world.rival, world.target)
            .unwrap_err();
        assert_eq!(err.as_action(), Some(&ActionError::NotOwner));
    }

    #[test]
    fn test_cleanup_with_nothing_outstanding() {
        let world = testutil::world();

        let err = world
            .engine
            .cleanup_tricks(world.owner, world.target)
            .unwrap_err();
        assert_eq!(err.as_action(), Some(&ActionError::NothingToClean));
    }

    #[test]
    fn test_cleanup_arson_only_is_nothing_to_clean() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Arson)
            .unwrap();

        let err = world
            .engine
            .cleanup_tricks(world.owner, world.target)
            .unwrap_err();
        assert_eq!(err.as_action(), Some(&ActionError::NothingToClean));
    }

    #[test]
    fn test_cleanup_insufficient_funds_carries_cost() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.shed, TrickKind::Graffiti)
            .unwrap();

        let err = world
            .engine
            .cleanup_tricks(world.pauper, world.shed)
            .unwrap_err();
        assert_eq!(
            err.as_action(),
            Some(&ActionError::InsufficientFunds {
                required: Money::new(5000),
                available: Money::new(100),
            })
        );
        // Nothing was cleaned or debited
        assert_eq!(
            world
                .engine
                .store()
                .uncleaned_attacks(world.shed, false)
                .unwrap()
                .len(),
            1
        );
        assert_eq!(world.company(world.pauper).cash, Money::new(100));
    }

    // ========================================================================
    // Repair
    // ========================================================================

    #[test]
    fn test_repair_cost_follows_damage() {
        let world = testutil::world();
        let mut building = world.building(world.target);
        building.damage_percent = 75;
        world.put_building(&building);

        let outcome = world
            .engine
            .repair_building(world.owner, world.target)
            .unwrap();

        // 75% of the 100_000 base
        assert_eq!(outcome.cost, Money::new(75_000));
        assert_eq!(outcome.damage_repaired, 75);

        let target = world.building(world.target);
        assert_eq!(target.damage_percent, 0);
        assert!(target.needs_profit_recalc);
        assert_eq!(world.company(world.owner).cash, Money::new(425_000));
    }

    #[test]
    fn test_repair_quarter_damage() {
        let world = testutil::world();
        let mut building = world.building(world.target);
        building.damage_percent = 25;
        world.put_building(&building);

        let outcome = world
            .engine
            .repair_building(world.owner, world.target)
            .unwrap();
        assert_eq!(outcome.cost, Money::new(25_000));
    }

    #[test]
    fn test_repair_logs_transaction_with_detail() {
        let world = testutil::world();
        let mut building = world.building(world.target);
        building.damage_percent = 40;
        world.put_building(&building);

        world
            .engine
            .repair_building(world.owner, world.target)
            .unwrap();

        let history = world
            .engine
            .store()
            .transactions_by_actor(world.owner)
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, ActionKind::Repair);
        assert_eq!(history[0].amount, Money::new(-40_000));
        assert_eq!(
            history[0].detail,
            TransactionDetail::Repair { damage_repaired: 40 }
        );
    }

    #[test]
    fn test_repair_marks_neighbors_dirty() {
        let world = testutil::world();
        let mut building = world.building(world.target);
        building.damage_percent = 10;
        world.put_building(&building);

        world
            .engine
            .repair_building(world.owner, world.target)
            .unwrap();

        assert!(world.building(world.neighbor).needs_profit_recalc);
        assert!(!world.building(world.shed).needs_profit_recalc);
    }

    #[test]
    fn test_repair_blocked_while_burning() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Arson)
            .unwrap();

        let err = world
            .engine
            .repair_building(world.owner, world.target)
            .unwrap_err();
        assert_eq!(
            err.as_action(),
            Some(&ActionError::FireMustBeExtinguishedFirst)
        );
        // Damage unchanged, nothing debited
        assert_eq!(world.building(world.target).damage_percent, 15);
        assert_eq!(world.company(world.owner).cash, Money::new(500_000));
    }

    #[test]
    fn test_repair_after_extinguish_succeeds() {
        let world = testutil::world();
        world
            .engine
            .perform_attack(world.rival, world.target, TrickKind::Arson)
            .unwrap();

        let location = world.building(world.target).location;
        world
            .engine
            .extinguish_fire(world.rival, world.target, location)
            .unwrap();

        let outcome = world
            .engine
            .repair_building(world.owner, world.target)
            .unwrap();
        assert_eq!(outcome.damage_repaired, 15);
        assert_eq!(world.building(world.target).damage_percent, 0);
    }

    #[test]
    fn test_repair_undamaged_rejected() {
        let world = testutil::world();

        let err = world
            .engine
            .repair_building(world.owner, world.target)
            .unwrap_err();
        assert_eq!(err.as_action(), Some(&ActionError::NotDamaged));
    }

    #[test]
    fn test_repair_requires_ownership() {
        let world = testutil::world();
        let mut building = world.building(world.target);
        building.damage_percent = 30;
        world.put_building(&building);

        let err = world
            .engine
            .repair_building(world.rival, world.target)
            .unwrap_err();
        assert_eq!(err.as_action(), Some(&ActionError::NotOwner));
    }

    #[test]
    fn test_repair_collapsed_rejected() {
        let world = testutil::world();

        let err = world
            .engine
            .repair_building(world.owner, world.collapsed_ruin)
            .unwrap_err();
        assert_eq!(err.as_action(), Some(&ActionError::Collapsed));
    }

    #[test]
    fn test_repair_insufficient_funds() {
        let world = testutil::world();
        let mut building = world.building(world.shed);
        building.damage_percent = 50;
        world.put_building(&building);

        let err = world
            .engine
            .repair_building(world.pauper, world.shed)
            .unwrap_err();
        assert_eq!(
            err.as_action(),
            Some(&ActionError::InsufficientFunds {
                required: Money::new(50_000),
                available: Money::new(100),
            })
        );
        assert_eq!(world.building(world.shed).damage_percent, 50);
    }
}
