//! Block War Demo
//!
//! Walks two rival companies through a full action cycle: a brick-throw and
//! an arson against an office, a failed repair while the fire burns, a
//! bystander extinguishing it, then cleanup and repair by the owner.

use racket_core::{
    Building, BuildingId, BuildingKind, BuildingKindId, Company, CompanyId, Location, MapId,
    Money, Policy, TrickKind,
};
use racket_db::Store;
use racket_engine::Engine;

fn main() {
    println!("=== Racket Block War Demo ===\n");

    let store = Store::in_memory().expect("store");
    let map = MapId::new(1);

    // Seed the world: one building type, three companies, one office
    let office = BuildingKind::new(BuildingKindId::new(1), "Office", Money::new(100_000));
    store.insert_building_kind(&office).expect("seed kind");

    let blue_sky = CompanyId::new(1);
    let crimson = CompanyId::new(2);
    let bystander = CompanyId::new(3);
    store
        .insert_company(&Company::new(blue_sky, "Blue Sky Estates", Money::new(500_000)))
        .expect("seed company");
    store
        .insert_company(&Company::new(crimson, "Crimson Crew", Money::new(500_000)))
        .expect("seed company");
    store
        .insert_company(&Company::new(bystander, "Corner Deli", Money::new(2_000)))
        .expect("seed company");

    let target = BuildingId::new(1);
    store
        .insert_building(
            &Building::new(target, office.id, Location::new(map, 5, 5)).owned_by(blue_sky),
        )
        .expect("seed building");

    let engine = Engine::new(store, Policy::default());

    println!("Blue Sky Estates owns an Office (base value $100000) at (5,5)\n");

    // Crimson Crew attacks
    let outcome = engine
        .perform_attack(crimson, target, TrickKind::BrickThrow)
        .expect("brick throw");
    println!(
        "Crimson Crew throws a brick: damage {}%, on fire: {}",
        outcome.damage_percent, outcome.on_fire
    );

    let outcome = engine
        .perform_attack(crimson, target, TrickKind::Arson)
        .expect("arson");
    println!(
        "Crimson Crew commits arson:   damage {}%, on fire: {}\n",
        outcome.damage_percent, outcome.on_fire
    );

    // Repair is blocked while the fire burns
    match engine.repair_building(blue_sky, target) {
        Err(err) => println!("Blue Sky tries to repair: {}", err),
        Ok(_) => unreachable!("repair must not succeed while burning"),
    }

    // A bystander puts out the fire; extinguish is free and open to anyone
    let outcome = engine
        .extinguish_fire(bystander, target, Location::new(map, 5, 5))
        .expect("extinguish");
    println!(
        "Corner Deli extinguishes the fire ({} arson attack cleaned, cost $0)\n",
        outcome.attacks_cleaned
    );

    // The owner cleans up the brick and repairs the damage
    let outcome = engine.cleanup_tricks(blue_sky, target).expect("cleanup");
    println!(
        "Blue Sky cleans up {} trick(s) for {}",
        outcome.attacks_cleaned, outcome.cost
    );

    let outcome = engine.repair_building(blue_sky, target).expect("repair");
    println!(
        "Blue Sky repairs {}% damage for {}\n",
        outcome.damage_repaired, outcome.cost
    );

    // Final state
    let building = engine.store().building(target).expect("load").expect("row");
    let owner = engine.store().company(blue_sky).expect("load").expect("row");
    println!(
        "Office: damage {}%, on fire: {}, awaiting profit recalc: {}",
        building.damage_percent, building.on_fire, building.needs_profit_recalc
    );
    println!("Blue Sky Estates balance: {}", owner.cash);
    println!(
        "Ledger rows for Blue Sky: {}",
        engine
            .store()
            .transactions_by_actor(blue_sky)
            .expect("history")
            .len()
    );

    println!("\n=== Demo Complete ===");
}
