//! Property tests for the resolver and the shadow-state guard.

use proptest::prelude::*;
use spyglass_host::{
    lead_vehicle, record_departure, resolve_origin, shadow_read, shadow_stash, Building, Citizen,
    CitizenInstance, HostWorld, Vehicle, VehicleFlags, VehicleKind,
};
use spyglass_types::{BuildingId, EntityRef, VehicleId};

/// Builds a convoy of `len` coupled freight vehicles; returns every id,
/// lead first.
fn build_convoy(world: &mut HostWorld, len: usize, target: BuildingId) -> Vec<VehicleId> {
    let mut ids = Vec::with_capacity(len);
    for i in 0..len {
        let mut v = Vehicle::new(VehicleKind::Freight);
        if i == 0 {
            v.flags |= VehicleFlags::RETURNING;
            v.target_building = target;
        } else {
            v.leading = ids[i - 1];
        }
        let id = world.insert_vehicle(v);
        if i > 0 {
            world.vehicle_mut(ids[i - 1]).unwrap().trailing = id;
        }
        ids.push(id);
    }
    ids
}

proptest! {
    // For any chain length within the host's bound, every member resolves
    // to the lead's derived origin and the walk terminates.
    #[test]
    fn convoy_resolution_terminates_and_agrees(len in 1usize..50) {
        let mut world = HostWorld::new();
        let origin = world.insert_building(Building::named("Yard"));
        let ids = build_convoy(&mut world, len, origin);

        for &id in &ids {
            prop_assert_eq!(lead_vehicle(&world, id), ids[0]);
            prop_assert_eq!(resolve_origin(&world, EntityRef::vehicle(id)), origin);
        }
    }

    // The shadow slot reads back the stashed value exactly when the guard
    // holds at read time, independent of what the raw field contains.
    #[test]
    fn shadow_read_matches_guard(
        returning in any::<bool>(),
        passengers in 0u16..4,
        target_raw in 0u16..3,
        kind_passenger in any::<bool>(),
    ) {
        let mut v = Vehicle::new(VehicleKind::Freight);
        v.flags |= VehicleFlags::RETURNING;
        let stashed = shadow_stash(&mut v, BuildingId::new(42));
        prop_assert!(stashed);

        if !returning {
            v.flags.remove(VehicleFlags::RETURNING);
        }
        v.passenger_count = passengers;
        v.target_building = BuildingId::new(target_raw);
        if kind_passenger {
            v.kind = VehicleKind::Passenger;
        }

        let guard = returning && passengers == 0 && target_raw == 0 && !kind_passenger;
        let expected = guard.then_some(BuildingId::new(42));
        prop_assert_eq!(shadow_read(&v), expected);
    }

    // After any sequence of departures, a citizen instance is registered
    // as source citizen of exactly the building its own field names.
    #[test]
    fn source_registry_stays_consistent(moves in proptest::collection::vec(0u16..6, 1..30)) {
        let mut world = HostWorld::new();
        let buildings: Vec<BuildingId> = (0..5)
            .map(|i| world.insert_building(Building::named(format!("B{i}"))))
            .collect();
        let citizen = world.insert_citizen(Citizen::default());
        let instance = world.insert_instance(CitizenInstance {
            citizen,
            source_building: BuildingId::NONE,
        });
        world.citizen_mut(citizen).unwrap().instance = instance;

        for step in moves {
            // 0 means "departed from nowhere" (deregistration).
            let source = if step == 0 {
                BuildingId::NONE
            } else {
                buildings[(step - 1) as usize]
            };
            record_departure(&mut world, citizen, source);

            let stored = world.instance(instance).unwrap().source_building;
            prop_assert_eq!(stored, source);
            let registered = world.buildings_sourcing(instance);
            if source.is_none() {
                prop_assert!(registered.is_empty());
            } else {
                prop_assert_eq!(registered, vec![source]);
            }
        }
    }
}
