//! Fixed-size host record layouts.
//!
//! These mirror the host's own per-entity structs field for field as far
//! as Spyglass needs them. The layouts are frozen by the host — Spyglass
//! never adds fields, which is why the shadow-state store in `shadow.rs`
//! exists at all.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use spyglass_types::{BuildingId, CitizenId, CitizenInstanceId, ParkedVehicleId, VehicleId};
use std::collections::BTreeSet;

/// World-space position of a host object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

bitflags! {
    /// Movement-state flags of an active vehicle record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct VehicleFlags: u16 {
        const CREATED = 1;
        const SPAWNED = 1 << 1;
        /// Heading back to its origin with its job done.
        const RETURNING = 1 << 2;
        const STOPPED = 1 << 3;
    }
}

/// Broad vehicle category as the host classifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleKind {
    /// Cargo and delivery traffic.
    Freight,
    /// City service fleets (garbage, healthcare, maintenance and so on).
    Service,
    /// Anything that transports people.
    Passenger,
}

impl VehicleKind {
    /// Whether the tourist-count field of this kind is guaranteed unused
    /// while the vehicle returns empty. Only such kinds may carry a shadow
    /// value; for all others the field keeps the host's own semantics.
    #[must_use]
    pub const fn tourist_slot_free(self) -> bool {
        matches!(self, Self::Freight | Self::Service)
    }
}

/// One active vehicle record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub kind: VehicleKind,
    pub flags: VehicleFlags,
    /// The building the vehicle currently drives toward; cleared by the
    /// host when the vehicle is re-routed or sent home.
    pub target_building: BuildingId,
    /// Next vehicle toward the head of the convoy; `NONE` on the lead.
    pub leading: VehicleId,
    /// Next vehicle toward the tail of the convoy.
    pub trailing: VehicleId,
    /// Occupancy counter — how many people are on board right now.
    pub passenger_count: u16,
    /// Tourist headcount. Unused by the host for freight and service
    /// vehicles, which is what makes it available as a shadow slot.
    pub tourist_count: u16,
    pub position: Position,
}

impl Vehicle {
    #[must_use]
    pub fn new(kind: VehicleKind) -> Self {
        Self {
            kind,
            flags: VehicleFlags::CREATED | VehicleFlags::SPAWNED,
            target_building: BuildingId::NONE,
            leading: VehicleId::NONE,
            trailing: VehicleId::NONE,
            passenger_count: 0,
            tourist_count: 0,
            position: Position::default(),
        }
    }
}

/// One citizen record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Citizen {
    /// The citizen's moving instance while they are out in the world.
    pub instance: CitizenInstanceId,
    /// The citizen's parked private car, if any.
    pub parked_vehicle: ParkedVehicleId,
}

/// One moving citizen-instance record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitizenInstance {
    pub citizen: CitizenId,
    /// The building this trip started from.
    pub source_building: BuildingId,
}

/// One parked vehicle record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParkedVehicle {
    /// Model name the host displays for this car.
    pub model: String,
    pub position: Position,
}

/// Building category, as far as Spyglass cares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildingKind {
    #[default]
    Local,
    /// Edge-of-map connection; exists as a record but not observable
    /// in-world, so navigation targets must not point at it.
    OutsideConnection,
}

/// One building record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub name: String,
    pub position: Position,
    /// The host double-registers which citizen instances are "sourced
    /// from" this building; `record_departure` keeps this in sync with
    /// the instances' own source-building fields.
    pub source_citizens: BTreeSet<CitizenInstanceId>,
}

impl Building {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the camera can be pointed at this building.
    #[must_use]
    pub fn is_observable(&self) -> bool {
        self.kind != BuildingKind::OutsideConnection
    }
}
