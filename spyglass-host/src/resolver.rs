//! Entity resolver: where did this entity's current trip start?
//!
//! Read path: `resolve_origin` maps a tagged entity reference to the
//! building the trip originated from, following multi-hop lookups
//! (citizen → moving instance → source building; vehicle → convoy lead →
//! target or shadow slot). It only reads host state and always terminates.
//!
//! Write path: `record_departure` is invoked from the intercepted
//! "start moving" call and keeps the instance's source-building field and
//! the buildings' source-citizen registries consistent with each other.

use crate::records::VehicleFlags;
use crate::shadow;
use crate::world::HostWorld;
use spyglass_types::{BuildingId, CitizenId, CitizenInstanceId, EntityKind, EntityRef, VehicleId};
use tracing::{debug, trace};

/// Upper bound on convoy chain walks. The host guarantees chains are
/// acyclic and far shorter than this; the bound only protects against a
/// corrupted link field.
pub const MAX_CONVOY_LEN: usize = 50;

/// Walks to the first vehicle of `id`'s convoy chain.
///
/// Returns `id` itself for a lone vehicle or an absent id. Never visits a
/// vehicle twice: the walk stops at `MAX_CONVOY_LEN` hops even if the
/// leading links were to form a loop.
pub fn lead_vehicle(world: &HostWorld, id: VehicleId) -> VehicleId {
    let mut current = id;
    for _ in 0..MAX_CONVOY_LEN {
        let Some(vehicle) = world.vehicle(current) else {
            return current;
        };
        if vehicle.leading.is_none() {
            return current;
        }
        current = vehicle.leading;
    }
    trace!(vehicle = %id, "convoy walk hit the hop bound");
    current
}

/// Resolves the origin building of `entity`'s current trip, or
/// `BuildingId::NONE` when there is none to report.
pub fn resolve_origin(world: &HostWorld, entity: EntityRef) -> BuildingId {
    match entity.kind {
        EntityKind::Citizen(id) => citizen_origin(world, id),
        EntityKind::CitizenInstance(id) => instance_origin(world, id),
        EntityKind::Vehicle(id) => vehicle_origin(world, id),
        EntityKind::None
        | EntityKind::ParkedVehicle(_)
        | EntityKind::Building(_)
        | EntityKind::Other(_) => BuildingId::NONE,
    }
}

fn citizen_origin(world: &HostWorld, id: CitizenId) -> BuildingId {
    let Some(citizen) = world.citizen(id) else {
        return BuildingId::NONE;
    };
    instance_origin(world, citizen.instance)
}

fn instance_origin(world: &HostWorld, id: CitizenInstanceId) -> BuildingId {
    world
        .instance(id)
        .map_or(BuildingId::NONE, |instance| instance.source_building)
}

fn vehicle_origin(world: &HostWorld, id: VehicleId) -> BuildingId {
    let lead = lead_vehicle(world, id);
    let Some(vehicle) = world.vehicle(lead) else {
        return BuildingId::NONE;
    };
    if !vehicle.flags.contains(VehicleFlags::RETURNING) {
        // Outbound: the target is the destination, not the origin.
        BuildingId::NONE
    } else if vehicle.target_building.is_some() {
        vehicle.target_building
    } else {
        shadow::read(vehicle).unwrap_or(BuildingId::NONE)
    }
}

/// Records that `citizen` started a trip from `source`.
///
/// Updates the citizen instance's source-building field and moves the
/// instance between the buildings' source-citizen registries, so that an
/// instance is registered with exactly the building its field names, and
/// no other.
pub fn record_departure(world: &mut HostWorld, citizen: CitizenId, source: BuildingId) {
    let Some(record) = world.citizen(citizen) else {
        return;
    };
    let instance_id = record.instance;
    if instance_id.is_none() {
        return;
    }
    let Some(instance) = world.instance(instance_id) else {
        return;
    };
    let previous = instance.source_building;
    if previous == source {
        return;
    }

    if previous.is_some() {
        world.remove_source_citizen(previous, instance_id);
    }
    if let Some(instance) = world.instance_mut(instance_id) {
        instance.source_building = source;
    }
    if source.is_some() {
        world.add_source_citizen(source, instance_id);
    }
    debug!(%citizen, instance = %instance_id, from = %previous, to = %source, "departure recorded");
}
