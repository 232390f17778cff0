//! Shared test fixtures: an in-memory world with companies and buildings.

use crate::engine::Engine;
use racket_core::{
    Building, BuildingId, BuildingKind, BuildingKindId, Company, CompanyId, Location, MapId,
    Money, Policy,
};
use racket_db::Store;

pub(crate) struct World {
    pub engine: Engine,
    pub map: MapId,
    /// Owns `target` and `collapsed_ruin`, cash 500_000
    pub owner: CompanyId,
    /// Owns `neighbor`, cash 500_000
    pub rival: CompanyId,
    /// Owns `shed`, cash 100
    pub pauper: CompanyId,
    /// In prison, cash 500_000
    pub prisoner: CompanyId,
    /// Office (base cost 100_000) at (5,5)
    pub target: BuildingId,
    /// Office at (6,5), adjacent to `target`
    pub neighbor: BuildingId,
    /// Office at (20,20), far from everything
    pub shed: BuildingId,
    /// Collapsed office at (10,10)
    pub collapsed_ruin: BuildingId,
}

pub(crate) fn world() -> World {
    world_with_policy(Policy::default())
}

pub(crate) fn world_with_policy(policy: Policy) -> World {
    let store = Store::in_memory().unwrap();
    let map = MapId::new(1);

    let kind = BuildingKind::new(BuildingKindId::new(1), "Office", Money::new(100_000));
    store.insert_building_kind(&kind).unwrap();

    let owner = CompanyId::new(1);
    let rival = CompanyId::new(2);
    let pauper = CompanyId::new(3);
    let prisoner = CompanyId::new(4);
    store
        .insert_company(&Company::new(owner, "Blue Sky Estates", Money::new(500_000)))
        .unwrap();
    store
        .insert_company(&Company::new(rival, "Crimson Crew", Money::new(500_000)))
        .unwrap();
    store
        .insert_company(&Company::new(pauper, "Shoestring Ltd", Money::new(100)))
        .unwrap();
    let mut jailed = Company::new(prisoner, "Jailbird & Co", Money::new(500_000));
    jailed.in_prison = true;
    store.insert_company(&jailed).unwrap();

    let target = BuildingId::new(1);
    let neighbor = BuildingId::new(2);
    let shed = BuildingId::new(3);
    let collapsed_ruin = BuildingId::new(4);
    store
        .insert_building(
            &Building::new(target, kind.id, Location::new(map, 5, 5)).owned_by(owner),
        )
        .unwrap();
    store
        .insert_building(
            &Building::new(neighbor, kind.id, Location::new(map, 6, 5)).owned_by(rival),
        )
        .unwrap();
    store
        .insert_building(
            &Building::new(shed, kind.id, Location::new(map, 20, 20)).owned_by(pauper),
        )
        .unwrap();
    let mut ruin = Building::new(collapsed_ruin, kind.id, Location::new(map, 10, 10))
        .owned_by(owner);
    ruin.collapsed = true;
    store.insert_building(&ruin).unwrap();

    World {
        engine: Engine::new(store, policy),
        map,
        owner,
        rival,
        pauper,
        prisoner,
        target,
        neighbor,
        shed,
        collapsed_ruin,
    }
}

impl World {
    pub fn building(&self, id: BuildingId) -> Building {
        self.engine.store().building(id).unwrap().unwrap()
    }

    pub fn company(&self, id: CompanyId) -> Company {
        self.engine.store().company(id).unwrap().unwrap()
    }

    /// Overwrite a building row directly, as the external placement
    /// collaborator would.
    pub fn put_building(&self, building: &Building) {
        self.engine.store().insert_building(building).unwrap();
    }
}
