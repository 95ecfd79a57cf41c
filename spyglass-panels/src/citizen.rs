//! Citizen-panel extension: origin building plus parked car.

use crate::registry::PanelExtension;
use crate::row::InfoRow;
use crate::toolkit::UiToolkit;
use crate::tools::{host_panel_name, locate_templates};
use spyglass_host::{
    navigate_to_building, navigate_to_parked_vehicle, resolve_origin, HostWorld,
};
use spyglass_types::{BuildingId, EntityKind, EntityRef, PanelKind, ParkedVehicleId};
use std::cell::Cell;
use std::rc::Rc;
use tracing::warn;

const ORIGIN_GLYPH: &str = "▣";
const CAR_GLYPH: &str = "| P|";

/// The customized citizen panel. On top of the origin row it shows the
/// citizen's parked private car; clicking that row re-centers the camera
/// on the car.
pub struct CitizenPanel {
    origin_row: Option<InfoRow>,
    car_row: Option<InfoRow>,
    origin: Rc<Cell<BuildingId>>,
    parked: Rc<Cell<ParkedVehicleId>>,
}

impl CitizenPanel {
    /// Clones both rows into the host's citizen panel. Returns `None`
    /// (logged) on host layout drift.
    pub fn enable(ui: &mut dyn UiToolkit) -> Option<Self> {
        let panel_name = host_panel_name(PanelKind::Citizen);
        let templates = match locate_templates(ui, panel_name) {
            Ok(templates) => templates,
            Err(err) => {
                warn!(panel = %PanelKind::Citizen, %err, "failed to customize info panel");
                return None;
            }
        };

        let origin = Rc::new(Cell::new(BuildingId::NONE));
        let origin_target = Rc::clone(&origin);
        let origin_row = InfoRow::clone_from(
            ui,
            &templates,
            "OriginBuildingInfo",
            ORIGIN_GLYPH,
            Rc::new(move |world, camera| {
                navigate_to_building(world, camera, origin_target.get(), false);
            }),
        );

        let parked = Rc::new(Cell::new(ParkedVehicleId::NONE));
        let parked_target = Rc::clone(&parked);
        let car_row = InfoRow::clone_from(
            ui,
            &templates,
            "OwnedCarInfo",
            CAR_GLYPH,
            Rc::new(move |world, camera| {
                navigate_to_parked_vehicle(world, camera, parked_target.get());
            }),
        );

        Some(Self {
            origin_row: Some(origin_row),
            car_row: Some(car_row),
            origin,
            parked,
        })
    }

    fn refresh_origin(&mut self, ui: &mut dyn UiToolkit, world: &HostWorld, origin: BuildingId) {
        let Some(row) = self.origin_row.as_mut() else {
            return;
        };
        self.origin.set(origin);
        if origin.is_none() {
            row.hide(ui);
        } else {
            row.show(
                ui,
                world.building_name(origin),
                world.building_observable(origin),
            );
        }
    }

    fn refresh_car(&mut self, ui: &mut dyn UiToolkit, world: &HostWorld, parked: ParkedVehicleId) {
        let Some(row) = self.car_row.as_mut() else {
            return;
        };
        self.parked.set(parked);
        if parked.is_none() {
            row.hide(ui);
        } else {
            row.show(ui, world.parked_vehicle_name(parked), true);
        }
    }
}

impl PanelExtension for CitizenPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Citizen
    }

    fn on_refresh(&mut self, ui: &mut dyn UiToolkit, world: &HostWorld, subject: EntityRef) {
        let (origin, parked) = match subject.kind {
            EntityKind::Citizen(id) => {
                let parked = world
                    .citizen(id)
                    .map_or(ParkedVehicleId::NONE, |c| c.parked_vehicle);
                (resolve_origin(world, subject), parked)
            }
            _ => (BuildingId::NONE, ParkedVehicleId::NONE),
        };
        self.refresh_origin(ui, world, origin);
        self.refresh_car(ui, world, parked);
    }

    fn disable(&mut self, ui: &mut dyn UiToolkit) {
        if let Some(row) = self.origin_row.take() {
            row.destroy(ui);
        }
        if let Some(row) = self.car_row.take() {
            row.destroy(ui);
        }
    }
}
