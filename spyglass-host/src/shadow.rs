//! Shadow-state store: one extra value per vehicle, without a new field.
//!
//! The host's vehicle record is fixed-size. When a freight or service
//! vehicle is sent home, the host clears `target_building` and the origin
//! of the finished trip is lost. The tourist-count field of such a vehicle
//! is guaranteed unused while it returns empty, so Spyglass stashes the
//! about-to-be-cleared target there.
//!
//! The slot is authoritative only while the guard holds: returning flag
//! set, occupancy zero, primary target cleared, and a vehicle kind whose
//! tourist slot is provably free. The host may silently reclaim the field
//! the moment any of that stops being true, so every read re-checks the
//! guard and fails safe to "absent". This is a best-effort opportunistic
//! cache with exactly one slot per vehicle, not a general extension
//! mechanism.

use crate::records::{Vehicle, VehicleFlags};
use spyglass_types::BuildingId;
use tracing::debug;

fn guard_holds(vehicle: &Vehicle) -> bool {
    vehicle.kind.tourist_slot_free()
        && vehicle.flags.contains(VehicleFlags::RETURNING)
        && vehicle.passenger_count == 0
        && vehicle.target_building.is_none()
}

/// Stashes `origin` into the vehicle's shadow slot.
///
/// Writes only under the guard; anywhere else the field still belongs to
/// the host and is left untouched. Returns whether the value was stored.
pub fn stash(vehicle: &mut Vehicle, origin: BuildingId) -> bool {
    if origin.is_none() {
        return false;
    }
    if !guard_holds(vehicle) {
        debug!(
            kind = ?vehicle.kind,
            flags = ?vehicle.flags,
            passengers = vehicle.passenger_count,
            "shadow stash refused outside guard"
        );
        return false;
    }
    vehicle.tourist_count = origin.get();
    true
}

/// Reads the shadow slot, or `None` when the guard no longer holds —
/// even if the raw field still contains the old value. A read outside the
/// guard is a caller bug; it is traced and treated as absent rather than
/// surfaced.
pub fn read(vehicle: &Vehicle) -> Option<BuildingId> {
    if !guard_holds(vehicle) {
        if vehicle.tourist_count != 0 && vehicle.kind.tourist_slot_free() {
            debug!(
                raw = vehicle.tourist_count,
                "shadow read outside guard; treating slot as absent"
            );
        }
        return None;
    }
    let origin = BuildingId::new(vehicle.tourist_count);
    origin.is_some().then_some(origin)
}
