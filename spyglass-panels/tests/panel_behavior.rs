//! Behavior tests for the panel extensions, driven through the headless
//! toolkit.

use pretty_assertions::assert_eq;
use spyglass_host::{
    Building, BuildingKind, CameraController, Citizen, CitizenInstance, HostWorld, ParkedVehicle,
    Position,
};
use spyglass_panels::{
    host_panel_name, CitizenPanel, ExtensionRegistry, HeadlessUi, OriginPanel, PanelExtension,
    UiToolkit, WidgetId, WidgetKind,
};
use spyglass_types::{BuildingId, CitizenId, EntityRef, PanelKind};

/// Builds the host layout every info panel shares: a sizing container, an
/// items list, and a target row with a glyph label and a "Target" button.
fn panel_fixture(ui: &mut HeadlessUi, name: &str) -> WidgetId {
    let root = ui.add_root(name);
    let container = ui.add_widget(root, WidgetKind::Panel, "Container");
    ui.set_size(container, 320.0, 200.0);
    let items = ui.add_widget(container, WidgetKind::Panel, "ItemsPanel");
    ui.set_size(items, 300.0, 120.0);
    let row = ui.add_widget(items, WidgetKind::Panel, "TargetRow");
    ui.set_size(row, 300.0, 24.0);
    ui.set_padding(row, 2.0, 2.0);
    ui.add_widget(row, WidgetKind::Label, "TargetLabel");
    let button = ui.add_widget(row, WidgetKind::Button, "Target");
    ui.set_offset_x(button, 20.0);
    container
}

fn world_with_tourist(origin_name: &str) -> (HostWorld, CitizenId, BuildingId) {
    let mut world = HostWorld::new();
    let building = world.insert_building(Building::named(origin_name));
    let citizen = world.insert_citizen(Citizen::default());
    let instance = world.insert_instance(CitizenInstance {
        citizen,
        source_building: building,
    });
    world.citizen_mut(citizen).unwrap().instance = instance;
    (world, citizen, building)
}

#[derive(Default)]
struct RecordingCamera {
    targets: Vec<EntityRef>,
}

impl CameraController for RecordingCamera {
    fn set_target(&mut self, target: EntityRef, _position: Position, _zoom: bool) {
        self.targets.push(target);
    }
}

// ================================================================
// Enable: lookup-or-degrade
// ================================================================

#[test]
fn enable_clones_a_hidden_row() {
    let mut ui = HeadlessUi::new();
    let root_container = panel_fixture(&mut ui, host_panel_name(PanelKind::Tourist));
    let panel = OriginPanel::enable(&mut ui, PanelKind::Tourist);
    assert!(panel.is_some());

    let row = ui
        .find_child(ui.find_root(host_panel_name(PanelKind::Tourist)).unwrap(), "OriginBuildingInfoRow")
        .unwrap();
    assert!(!ui.is_visible(row));
    // Container size untouched while the row stays hidden.
    assert_eq!(ui.height(root_container), 200.0);
}

#[test]
fn enable_fails_when_panel_is_missing() {
    let mut ui = HeadlessUi::new();
    assert!(OriginPanel::enable(&mut ui, PanelKind::Tourist).is_none());
}

#[test]
fn enable_fails_when_target_button_is_missing() {
    let mut ui = HeadlessUi::new();
    let root = ui.add_root(host_panel_name(PanelKind::ServiceVehicle));
    ui.add_widget(root, WidgetKind::Panel, "ItemsPanel");
    assert!(OriginPanel::enable(&mut ui, PanelKind::ServiceVehicle).is_none());
}

// ================================================================
// Visibility delta round trip
// ================================================================

#[test]
fn refresh_resizes_container_by_exactly_the_row_delta() {
    let mut ui = HeadlessUi::new();
    let container = panel_fixture(&mut ui, host_panel_name(PanelKind::Tourist));
    let mut panel = OriginPanel::enable(&mut ui, PanelKind::Tourist).unwrap();
    let (world, citizen, _) = world_with_tourist("Seaside Hotel");

    panel.on_refresh(&mut ui, &world, EntityRef::citizen(citizen));
    // Row height 24 plus vertical padding 4.
    assert_eq!(ui.height(container), 228.0);

    panel.on_refresh(&mut ui, &world, EntityRef::ABSENT);
    assert_eq!(ui.height(container), 200.0);
}

#[test]
fn repeated_refresh_with_same_visibility_does_not_drift() {
    let mut ui = HeadlessUi::new();
    let container = panel_fixture(&mut ui, host_panel_name(PanelKind::Tourist));
    let mut panel = OriginPanel::enable(&mut ui, PanelKind::Tourist).unwrap();
    let (world, citizen, _) = world_with_tourist("Seaside Hotel");

    for _ in 0..3 {
        panel.on_refresh(&mut ui, &world, EntityRef::citizen(citizen));
    }
    assert_eq!(ui.height(container), 228.0);
}

// ================================================================
// Row content
// ================================================================

#[test]
fn refresh_shows_the_origin_building_name() {
    let mut ui = HeadlessUi::new();
    panel_fixture(&mut ui, host_panel_name(PanelKind::Tourist));
    let mut panel = OriginPanel::enable(&mut ui, PanelKind::Tourist).unwrap();
    let (world, citizen, _) = world_with_tourist("Seaside Hotel");

    panel.on_refresh(&mut ui, &world, EntityRef::citizen(citizen));
    let root = ui.find_root(host_panel_name(PanelKind::Tourist)).unwrap();
    let button = ui.find_child(root, "OriginBuildingInfoButton").unwrap();
    assert_eq!(ui.text(button), "Seaside Hotel");
    assert!(ui.is_enabled(button));
}

#[test]
fn origin_button_is_disabled_for_outside_connections() {
    let mut ui = HeadlessUi::new();
    panel_fixture(&mut ui, host_panel_name(PanelKind::Tourist));
    let mut panel = OriginPanel::enable(&mut ui, PanelKind::Tourist).unwrap();
    let (mut world, citizen, building) = world_with_tourist("Highway West");
    world.building_mut(building).unwrap().kind = BuildingKind::OutsideConnection;

    panel.on_refresh(&mut ui, &world, EntityRef::citizen(citizen));
    let root = ui.find_root(host_panel_name(PanelKind::Tourist)).unwrap();
    let button = ui.find_child(root, "OriginBuildingInfoButton").unwrap();
    assert!(!ui.is_enabled(button));
}

#[test]
fn long_names_are_shortened_with_a_tooltip() {
    let mut ui = HeadlessUi::new();
    panel_fixture(&mut ui, host_panel_name(PanelKind::Tourist));
    let mut panel = OriginPanel::enable(&mut ui, PanelKind::Tourist).unwrap();
    let long_name = "The Grand Metropolitan Convention And Exhibition Centre";
    let (world, citizen, _) = world_with_tourist(long_name);

    panel.on_refresh(&mut ui, &world, EntityRef::citizen(citizen));
    let root = ui.find_root(host_panel_name(PanelKind::Tourist)).unwrap();
    let button = ui.find_child(root, "OriginBuildingInfoButton").unwrap();
    let shown = ui.text(button);
    assert!(shown.len() < long_name.len());
    assert!(shown.ends_with('…'));
    assert_eq!(ui.tooltip(button), long_name);
}

#[test]
fn wrong_subject_tag_hides_the_row() {
    let mut ui = HeadlessUi::new();
    let container = panel_fixture(&mut ui, host_panel_name(PanelKind::Tourist));
    let mut panel = OriginPanel::enable(&mut ui, PanelKind::Tourist).unwrap();
    let (world, citizen, _) = world_with_tourist("Seaside Hotel");

    panel.on_refresh(&mut ui, &world, EntityRef::citizen(citizen));
    // A vehicle subject on the tourist panel must resolve to nothing.
    panel.on_refresh(&mut ui, &world, EntityRef::vehicle(7.into()));
    assert_eq!(ui.height(container), 200.0);
}

// ================================================================
// Click navigation
// ================================================================

#[test]
fn clicking_the_origin_button_recenters_the_camera() {
    let mut ui = HeadlessUi::new();
    panel_fixture(&mut ui, host_panel_name(PanelKind::Tourist));
    let mut panel = OriginPanel::enable(&mut ui, PanelKind::Tourist).unwrap();
    let (world, citizen, building) = world_with_tourist("Seaside Hotel");

    panel.on_refresh(&mut ui, &world, EntityRef::citizen(citizen));
    let root = ui.find_root(host_panel_name(PanelKind::Tourist)).unwrap();
    let button = ui.find_child(root, "OriginBuildingInfoButton").unwrap();

    let mut camera = RecordingCamera::default();
    assert!(ui.fire_click(button, &world, &mut camera));
    assert_eq!(camera.targets, vec![EntityRef::building(building)]);
}

#[test]
fn citizen_panel_shows_and_navigates_to_the_parked_car() {
    let mut ui = HeadlessUi::new();
    panel_fixture(&mut ui, host_panel_name(PanelKind::Citizen));
    let mut panel = CitizenPanel::enable(&mut ui).unwrap();

    let (mut world, citizen, _) = world_with_tourist("Seaside Hotel");
    let parked = world.insert_parked_vehicle(ParkedVehicle {
        model: "Hatchback".into(),
        position: Position::new(4.0, 0.0, 9.0),
    });
    world.citizen_mut(citizen).unwrap().parked_vehicle = parked;

    panel.on_refresh(&mut ui, &world, EntityRef::citizen(citizen));
    let root = ui.find_root(host_panel_name(PanelKind::Citizen)).unwrap();
    let car_button = ui.find_child(root, "OwnedCarInfoButton").unwrap();
    assert_eq!(ui.text(car_button), "Hatchback");

    let mut camera = RecordingCamera::default();
    assert!(ui.fire_click(car_button, &world, &mut camera));
    assert_eq!(camera.targets, vec![EntityRef::parked_vehicle(parked)]);
}

// ================================================================
// Disable
// ================================================================

#[test]
fn disable_destroys_the_cloned_widgets_and_is_idempotent() {
    let mut ui = HeadlessUi::new();
    panel_fixture(&mut ui, host_panel_name(PanelKind::Citizen));
    let before = ui.widget_count();
    let mut panel = CitizenPanel::enable(&mut ui).unwrap();
    assert!(ui.widget_count() > before);

    panel.disable(&mut ui);
    assert_eq!(ui.widget_count(), before);
    panel.disable(&mut ui);
    assert_eq!(ui.widget_count(), before);
}

// ================================================================
// Registry dispatch
// ================================================================

#[test]
fn registry_routes_refreshes_by_kind() {
    let mut ui = HeadlessUi::new();
    let container = panel_fixture(&mut ui, host_panel_name(PanelKind::Tourist));
    let mut registry = ExtensionRegistry::new();
    registry.register(Box::new(
        OriginPanel::enable(&mut ui, PanelKind::Tourist).unwrap(),
    ));
    assert!(registry.has(PanelKind::Tourist));
    assert!(!registry.has(PanelKind::ServiceVehicle));

    let (world, citizen, _) = world_with_tourist("Seaside Hotel");
    // A kind with no registered extension is silently ignored.
    registry.dispatch_refresh(
        &mut ui,
        &world,
        PanelKind::ServiceVehicle,
        EntityRef::citizen(citizen),
    );
    assert_eq!(ui.height(container), 200.0);

    registry.dispatch_refresh(
        &mut ui,
        &world,
        PanelKind::Tourist,
        EntityRef::citizen(citizen),
    );
    assert_eq!(ui.height(container), 228.0);

    registry.disable_all(&mut ui);
    assert!(registry.is_empty());
}
