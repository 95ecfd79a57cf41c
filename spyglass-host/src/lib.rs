//! Host-facing model for Spyglass.
//!
//! The host is a closed simulation binary: its per-entity records are
//! fixed-size and cannot be extended, and its methods are reached through
//! a versioned binding table rather than recompilation. This crate owns:
//! - The record layouts and the `HostWorld` tables Spyglass reads/writes
//! - The binding table mapping host version → patchable method bindings
//! - The shadow-state store (field reuse under a checked guard)
//! - The entity resolver (`resolve_origin` / `record_departure`)
//! - Camera navigation over an opaque `CameraController`

mod bindings;
mod camera;
mod records;
mod resolver;
mod shadow;
mod world;

pub use bindings::{BindingTable, HostVersion, MethodBinding, MethodKey, ResolutionError};
pub use camera::{navigate_to_building, navigate_to_parked_vehicle, CameraController};
pub use records::{
    Building, BuildingKind, Citizen, CitizenInstance, ParkedVehicle, Position, Vehicle,
    VehicleFlags, VehicleKind,
};
pub use resolver::{lead_vehicle, record_departure, resolve_origin, MAX_CONVOY_LEN};
pub use shadow::{read as shadow_read, stash as shadow_stash};
pub use world::HostWorld;
