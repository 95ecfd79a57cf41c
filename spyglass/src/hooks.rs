//! The concrete hook bodies behind every patch descriptor.
//!
//! Argument conventions follow the host's calling convention per method:
//! - freight set-target: `[vehicle: u16, target_building: u16]`
//! - resident start-moving (both overloads): `[citizen: u32,
//!   source_building: u16]`, returns success as a bool
//! - panel refresh: `[panel_code: u16, subject: entity]`
//!
//! Hooks read and write host state only through the frame's world handle.
//! The panel-refresh hook additionally needs the extension registry and
//! the UI toolkit; both are captured explicitly rather than read from
//! ambient state.

use spyglass_host::{shadow_stash, MethodKey};
use spyglass_panels::{ExtensionRegistry, UiToolkit};
use spyglass_patch::{HookFrame, HookValue, PatchDescriptor};
use spyglass_types::{BuildingId, CitizenId, PanelKind, VehicleId};
use std::cell::RefCell;
use std::rc::Rc;

/// Builds the full patch set, in install order.
pub fn build_patch_set(
    panels: Rc<RefCell<ExtensionRegistry>>,
    ui: Rc<RefCell<dyn UiToolkit>>,
) -> Vec<PatchDescriptor> {
    vec![
        PatchDescriptor::new(MethodKey::PanelRefreshBindings, "panel-refresh")
            .with_after(panel_refresh_hook(panels, ui)),
        PatchDescriptor::new(
            MethodKey::ResidentStartMovingWithOffer,
            "start-moving-offer",
        )
        .with_after(Rc::new(record_departure_hook)),
        PatchDescriptor::new(
            MethodKey::ResidentStartMovingToBuilding,
            "start-moving-building",
        )
        .with_after(Rc::new(record_departure_hook)),
        PatchDescriptor::new(MethodKey::FreightSetTarget, "freight-set-target")
            .with_before(Rc::new(capture_prior_target_hook))
            .with_after(Rc::new(stash_lost_target_hook)),
    ]
}

/// Before the host re-targets a freight vehicle: remember where it was
/// headed, so the after hook can tell a real clear from a reroute.
fn capture_prior_target_hook(frame: &mut HookFrame<'_>) {
    let Some(vehicle) = frame.arg_u16(0).map(VehicleId::new) else {
        return;
    };
    let prior = frame
        .world
        .vehicle(vehicle)
        .map_or(BuildingId::NONE, |v| v.target_building);
    frame.carry = Some(HookValue::U16(prior.get()));
}

/// After the host re-targets a freight vehicle: when a non-zero target
/// just became zero, the trip's origin is about to be lost — stash it in
/// the shadow slot. The store itself enforces the guard.
fn stash_lost_target_hook(frame: &mut HookFrame<'_>) {
    let Some(vehicle) = frame.arg_u16(0).map(VehicleId::new) else {
        return;
    };
    let prior = frame
        .carry
        .and_then(HookValue::as_u16)
        .map_or(BuildingId::NONE, BuildingId::new);
    let new_target = frame.arg_u16(1).map_or(BuildingId::NONE, BuildingId::new);
    if prior.is_none() || new_target.is_some() {
        return;
    }
    if let Some(record) = frame.world.vehicle_mut(vehicle) {
        shadow_stash(record, prior);
    }
}

/// After the host starts moving a citizen: when the move succeeded and
/// names a source building, record the departure.
fn record_departure_hook(frame: &mut HookFrame<'_>) {
    if frame.result_bool() != Some(true) {
        return;
    }
    let Some(citizen) = frame.arg_u32(0).map(CitizenId::new) else {
        return;
    };
    let Some(source) = frame.arg_u16(1).map(BuildingId::new) else {
        return;
    };
    if source.is_some() {
        spyglass_host::record_departure(frame.world, citizen, source);
    }
}

/// After the host redraws an info panel: route the refresh to the
/// matching extension.
fn panel_refresh_hook(
    panels: Rc<RefCell<ExtensionRegistry>>,
    ui: Rc<RefCell<dyn UiToolkit>>,
) -> spyglass_patch::HookFn {
    Rc::new(move |frame: &mut HookFrame<'_>| {
        let Some(kind) = frame.arg_u16(0).and_then(PanelKind::from_code) else {
            return;
        };
        let Some(subject) = frame.arg_entity(1) else {
            return;
        };
        let mut ui = ui.borrow_mut();
        panels
            .borrow_mut()
            .dispatch_refresh(&mut *ui, frame.world, kind, subject);
    })
}
