//! Camera navigation over the host's opaque camera controller.

use crate::world::HostWorld;
use spyglass_types::{BuildingId, EntityRef, ParkedVehicleId};

use crate::records::Position;

/// The host's camera controller. Camera mechanics stay on the host side;
/// Spyglass only hands it a target and a position.
pub trait CameraController {
    fn set_target(&mut self, target: EntityRef, position: Position, zoom: bool);
}

/// Re-centers the camera on a building. Does nothing for id `0` or a
/// missing record.
pub fn navigate_to_building(
    world: &HostWorld,
    camera: &mut dyn CameraController,
    building: BuildingId,
    zoom: bool,
) {
    if building.is_none() {
        return;
    }
    let Some(position) = world.building_position(building) else {
        return;
    };
    camera.set_target(EntityRef::building(building), position, zoom);
}

/// Re-centers the camera on a parked vehicle, zoomed in.
pub fn navigate_to_parked_vehicle(
    world: &HostWorld,
    camera: &mut dyn CameraController,
    parked: ParkedVehicleId,
) {
    if parked.is_none() {
        return;
    }
    let Some(position) = world.parked_vehicle_position(parked) else {
        return;
    };
    camera.set_target(EntityRef::parked_vehicle(parked), position, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Building, ParkedVehicle};

    #[derive(Default)]
    struct RecordingCamera {
        targets: Vec<(EntityRef, bool)>,
    }

    impl CameraController for RecordingCamera {
        fn set_target(&mut self, target: EntityRef, _position: Position, zoom: bool) {
            self.targets.push((target, zoom));
        }
    }

    #[test]
    fn navigates_to_existing_building() {
        let mut world = HostWorld::new();
        let b = world.insert_building(Building::named("Depot"));
        let mut camera = RecordingCamera::default();
        navigate_to_building(&world, &mut camera, b, false);
        assert_eq!(camera.targets, vec![(EntityRef::building(b), false)]);
    }

    #[test]
    fn absent_building_is_ignored() {
        let world = HostWorld::new();
        let mut camera = RecordingCamera::default();
        navigate_to_building(&world, &mut camera, BuildingId::NONE, true);
        navigate_to_building(&world, &mut camera, BuildingId::new(44), true);
        assert!(camera.targets.is_empty());
    }

    #[test]
    fn parked_vehicle_navigation_zooms_in() {
        let mut world = HostWorld::new();
        let p = world.insert_parked_vehicle(ParkedVehicle {
            model: "Hatchback".into(),
            position: Position::new(1.0, 0.0, 2.0),
        });
        let mut camera = RecordingCamera::default();
        navigate_to_parked_vehicle(&world, &mut camera, p);
        assert_eq!(camera.targets, vec![(EntityRef::parked_vehicle(p), true)]);
    }
}
