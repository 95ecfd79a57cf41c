//! Origin-row extension for tourist and vehicle panels.

use crate::registry::PanelExtension;
use crate::row::InfoRow;
use crate::toolkit::UiToolkit;
use crate::tools::{host_panel_name, locate_templates};
use spyglass_host::{navigate_to_building, resolve_origin, HostWorld};
use spyglass_types::{BuildingId, EntityKind, EntityRef, PanelKind};
use std::cell::Cell;
use std::rc::Rc;
use tracing::warn;

const ORIGIN_GLYPH: &str = "▣";

/// A customized info panel showing the origin building of its subject.
/// Serves the tourist panel and both vehicle panels; they differ only in
/// which host panel is cloned and which subject tag they accept.
pub struct OriginPanel {
    kind: PanelKind,
    row: Option<InfoRow>,
    /// Navigation target of the origin button; refreshed on every redraw
    /// and read by the click handler.
    origin: Rc<Cell<BuildingId>>,
}

impl OriginPanel {
    /// Clones the origin row into the host panel for `kind`. Returns
    /// `None` (logged) when the host layout has drifted and the template
    /// widgets cannot be found; the rest of the system keeps working.
    pub fn enable(ui: &mut dyn UiToolkit, kind: PanelKind) -> Option<Self> {
        let panel_name = host_panel_name(kind);
        let templates = match locate_templates(ui, panel_name) {
            Ok(templates) => templates,
            Err(err) => {
                warn!(panel = %kind, %err, "failed to customize info panel");
                return None;
            }
        };

        let origin = Rc::new(Cell::new(BuildingId::NONE));
        let target = Rc::clone(&origin);
        let row = InfoRow::clone_from(
            ui,
            &templates,
            "OriginBuildingInfo",
            ORIGIN_GLYPH,
            Rc::new(move |world, camera| {
                navigate_to_building(world, camera, target.get(), false);
            }),
        );

        Some(Self {
            kind,
            row: Some(row),
            origin,
        })
    }

    fn subject_origin(&self, world: &HostWorld, subject: EntityRef) -> BuildingId {
        // The resolver handles the multi-hop lookups; the panel only
        // rejects subjects of the wrong tag for its kind.
        match (self.kind, subject.kind) {
            (PanelKind::Tourist, EntityKind::Citizen(_)) => resolve_origin(world, subject),
            (
                PanelKind::CitizenVehicle | PanelKind::ServiceVehicle,
                EntityKind::Vehicle(_),
            ) => resolve_origin(world, subject),
            _ => BuildingId::NONE,
        }
    }
}

impl PanelExtension for OriginPanel {
    fn kind(&self) -> PanelKind {
        self.kind
    }

    fn on_refresh(&mut self, ui: &mut dyn UiToolkit, world: &HostWorld, subject: EntityRef) {
        let origin = self.subject_origin(world, subject);
        self.origin.set(origin);
        let Some(row) = self.row.as_mut() else {
            return;
        };
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

    fn disable(&mut self, ui: &mut dyn UiToolkit) {
        if let Some(row) = self.row.take() {
            row.destroy(ui);
        }
    }
}
