//! The host's entity tables.
//!
//! The host addresses each record kind through a dense array indexed by a
//! small integer id; slot `0` is reserved in every table and never holds a
//! live record. `HostWorld` is Spyglass's view of those tables: all reads
//! and writes the interception layer performs go through here.

use crate::records::{Building, Citizen, CitizenInstance, ParkedVehicle, Position, Vehicle};
use spyglass_types::{BuildingId, CitizenId, CitizenInstanceId, ParkedVehicleId, VehicleId};
use tracing::debug;

/// In-process mirror of the host's entity tables.
#[derive(Debug)]
pub struct HostWorld {
    citizens: Vec<Citizen>,
    instances: Vec<CitizenInstance>,
    vehicles: Vec<Vehicle>,
    parked: Vec<ParkedVehicle>,
    buildings: Vec<Building>,
}

impl Default for HostWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl HostWorld {
    /// Creates empty tables with slot 0 reserved in each.
    #[must_use]
    pub fn new() -> Self {
        Self {
            citizens: vec![Citizen::default()],
            instances: vec![CitizenInstance::default()],
            vehicles: vec![Vehicle::new(crate::records::VehicleKind::Freight)],
            parked: vec![ParkedVehicle::default()],
            buildings: vec![Building::default()],
        }
    }

    // ================================================================
    // Record insertion (table growth is host-driven; these mirror it)
    // ================================================================

    pub fn insert_citizen(&mut self, citizen: Citizen) -> CitizenId {
        self.citizens.push(citizen);
        CitizenId::new((self.citizens.len() - 1) as u32)
    }

    pub fn insert_instance(&mut self, instance: CitizenInstance) -> CitizenInstanceId {
        self.instances.push(instance);
        CitizenInstanceId::new((self.instances.len() - 1) as u16)
    }

    pub fn insert_vehicle(&mut self, vehicle: Vehicle) -> VehicleId {
        self.vehicles.push(vehicle);
        VehicleId::new((self.vehicles.len() - 1) as u16)
    }

    pub fn insert_parked_vehicle(&mut self, parked: ParkedVehicle) -> ParkedVehicleId {
        self.parked.push(parked);
        ParkedVehicleId::new((self.parked.len() - 1) as u16)
    }

    pub fn insert_building(&mut self, building: Building) -> BuildingId {
        self.buildings.push(building);
        BuildingId::new((self.buildings.len() - 1) as u16)
    }

    // ================================================================
    // Record access — id 0 and out-of-range ids resolve to nothing
    // ================================================================

    pub fn citizen(&self, id: CitizenId) -> Option<&Citizen> {
        if id.is_none() {
            return None;
        }
        self.citizens.get(id.get() as usize)
    }

    pub fn citizen_mut(&mut self, id: CitizenId) -> Option<&mut Citizen> {
        if id.is_none() {
            return None;
        }
        self.citizens.get_mut(id.get() as usize)
    }

    pub fn instance(&self, id: CitizenInstanceId) -> Option<&CitizenInstance> {
        if id.is_none() {
            return None;
        }
        self.instances.get(id.get() as usize)
    }

    pub fn instance_mut(&mut self, id: CitizenInstanceId) -> Option<&mut CitizenInstance> {
        if id.is_none() {
            return None;
        }
        self.instances.get_mut(id.get() as usize)
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        if id.is_none() {
            return None;
        }
        self.vehicles.get(id.get() as usize)
    }

    pub fn vehicle_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        if id.is_none() {
            return None;
        }
        self.vehicles.get_mut(id.get() as usize)
    }

    pub fn parked_vehicle(&self, id: ParkedVehicleId) -> Option<&ParkedVehicle> {
        if id.is_none() {
            return None;
        }
        self.parked.get(id.get() as usize)
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        if id.is_none() {
            return None;
        }
        self.buildings.get(id.get() as usize)
    }

    pub fn building_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        if id.is_none() {
            return None;
        }
        self.buildings.get_mut(id.get() as usize)
    }

    // ================================================================
    // Display lookups used by the panels
    // ================================================================

    /// Display name of a building; empty for absent ids.
    pub fn building_name(&self, id: BuildingId) -> &str {
        self.building(id).map_or("", |b| b.name.as_str())
    }

    /// Whether the camera can be pointed at this building.
    pub fn building_observable(&self, id: BuildingId) -> bool {
        self.building(id).is_some_and(Building::is_observable)
    }

    pub fn building_position(&self, id: BuildingId) -> Option<Position> {
        self.building(id).map(|b| b.position)
    }

    /// Display name of a parked vehicle; empty for absent ids.
    pub fn parked_vehicle_name(&self, id: ParkedVehicleId) -> &str {
        self.parked_vehicle(id).map_or("", |p| p.model.as_str())
    }

    pub fn parked_vehicle_position(&self, id: ParkedVehicleId) -> Option<Position> {
        self.parked_vehicle(id).map(|p| p.position)
    }

    // ================================================================
    // Source-citizen registry (the host's doubly-registered relation)
    // ================================================================

    /// Registers `instance` as sourced from `building`.
    pub fn add_source_citizen(&mut self, building: BuildingId, instance: CitizenInstanceId) {
        if let Some(record) = self.building_mut(building) {
            record.source_citizens.insert(instance);
        } else {
            debug!(%building, %instance, "source-citizen registration against missing building");
        }
    }

    /// Removes `instance` from `building`'s source registry.
    pub fn remove_source_citizen(&mut self, building: BuildingId, instance: CitizenInstanceId) {
        if let Some(record) = self.building_mut(building) {
            record.source_citizens.remove(&instance);
        }
    }

    /// Which buildings currently list `instance` as a source citizen.
    /// Diagnostic walk over the whole table; the hot paths never call it.
    pub fn buildings_sourcing(&self, instance: CitizenInstanceId) -> Vec<BuildingId> {
        self.buildings
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, b)| b.source_citizens.contains(&instance))
            .map(|(i, _)| BuildingId::new(i as u16))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::VehicleKind;

    #[test]
    fn slot_zero_resolves_to_nothing() {
        let world = HostWorld::new();
        assert!(world.citizen(CitizenId::NONE).is_none());
        assert!(world.vehicle(VehicleId::new(0)).is_none());
        assert!(world.building(BuildingId::NONE).is_none());
    }

    #[test]
    fn inserted_records_get_sequential_ids() {
        let mut world = HostWorld::new();
        let b1 = world.insert_building(Building::named("Depot"));
        let b2 = world.insert_building(Building::named("Mall"));
        assert_eq!(b1.get(), 1);
        assert_eq!(b2.get(), 2);
        assert_eq!(world.building_name(b2), "Mall");
    }

    #[test]
    fn out_of_range_ids_resolve_to_nothing() {
        let world = HostWorld::new();
        assert!(world.vehicle(VehicleId::new(999)).is_none());
        assert_eq!(world.building_name(BuildingId::new(999)), "");
    }

    #[test]
    fn source_registry_add_and_remove() {
        let mut world = HostWorld::new();
        let b = world.insert_building(Building::named("Plant"));
        let i = world.insert_instance(CitizenInstance::default());

        world.add_source_citizen(b, i);
        assert_eq!(world.buildings_sourcing(i), vec![b]);

        world.remove_source_citizen(b, i);
        assert!(world.buildings_sourcing(i).is_empty());
    }

    #[test]
    fn vehicle_round_trip() {
        let mut world = HostWorld::new();
        let v = world.insert_vehicle(Vehicle::new(VehicleKind::Service));
        world.vehicle_mut(v).unwrap().passenger_count = 3;
        assert_eq!(world.vehicle(v).unwrap().passenger_count, 3);
    }
}
