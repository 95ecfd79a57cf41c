//! Tagged references to host objects.

use crate::ids::{BuildingId, CitizenId, CitizenInstanceId, ParkedVehicleId, VehicleId};
use serde::{Deserialize, Serialize};

/// Which host object a reference points at.
///
/// Exactly one tag is active. An id of `0` within any tag means "absent"
/// regardless of the tag, matching the host's own convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[default]
    None,
    Citizen(CitizenId),
    CitizenInstance(CitizenInstanceId),
    Vehicle(VehicleId),
    ParkedVehicle(ParkedVehicleId),
    Building(BuildingId),
    /// A host object kind Spyglass does not inspect.
    Other(u32),
}

/// A reference to one identifiable host object, plus the host's auxiliary
/// instance index (the host threads this through display lookups; Spyglass
/// only carries it along).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub index: u32,
}

impl EntityRef {
    /// A reference to nothing.
    pub const ABSENT: Self = Self {
        kind: EntityKind::None,
        index: 0,
    };

    #[must_use]
    pub const fn citizen(id: CitizenId) -> Self {
        Self {
            kind: EntityKind::Citizen(id),
            index: 0,
        }
    }

    #[must_use]
    pub const fn citizen_instance(id: CitizenInstanceId) -> Self {
        Self {
            kind: EntityKind::CitizenInstance(id),
            index: 0,
        }
    }

    #[must_use]
    pub const fn vehicle(id: VehicleId) -> Self {
        Self {
            kind: EntityKind::Vehicle(id),
            index: 0,
        }
    }

    #[must_use]
    pub const fn parked_vehicle(id: ParkedVehicleId) -> Self {
        Self {
            kind: EntityKind::ParkedVehicle(id),
            index: 0,
        }
    }

    #[must_use]
    pub const fn building(id: BuildingId) -> Self {
        Self {
            kind: EntityKind::Building(id),
            index: 0,
        }
    }

    #[must_use]
    pub const fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    /// Whether this reference points at no record: either the `None` tag,
    /// or any tag carrying the reserved id `0`.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self.kind {
            EntityKind::None => true,
            EntityKind::Citizen(id) => id.is_none(),
            EntityKind::CitizenInstance(id) => id.is_none(),
            EntityKind::Vehicle(id) => id.is_none(),
            EntityKind::ParkedVehicle(id) => id.is_none(),
            EntityKind::Building(id) => id.is_none(),
            EntityKind::Other(raw) => raw == 0,
        }
    }

    /// Short tag name for logs.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            EntityKind::None => "none",
            EntityKind::Citizen(_) => "citizen",
            EntityKind::CitizenInstance(_) => "citizen-instance",
            EntityKind::Vehicle(_) => "vehicle",
            EntityKind::ParkedVehicle(_) => "parked-vehicle",
            EntityKind::Building(_) => "building",
            EntityKind::Other(_) => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_when_tag_is_none() {
        assert!(EntityRef::ABSENT.is_absent());
    }

    #[test]
    fn absent_when_id_is_zero_regardless_of_tag() {
        assert!(EntityRef::citizen(CitizenId::NONE).is_absent());
        assert!(EntityRef::vehicle(VehicleId::new(0)).is_absent());
        assert!(EntityRef::building(BuildingId::NONE).is_absent());
        assert!(
            EntityRef {
                kind: EntityKind::Other(0),
                index: 9
            }
            .is_absent()
        );
    }

    #[test]
    fn present_when_id_is_nonzero() {
        assert!(!EntityRef::citizen(CitizenId::new(12)).is_absent());
        assert!(!EntityRef::vehicle(VehicleId::new(3)).is_absent());
    }

    #[test]
    fn index_is_carried_through() {
        let entity = EntityRef::building(BuildingId::new(5)).with_index(77);
        assert_eq!(entity.index, 77);
        assert_eq!(entity.kind, EntityKind::Building(BuildingId::new(5)));
    }
}
