//! Headless in-memory UI toolkit.
//!
//! Models just enough of the host's widget tree for the extension layer
//! to run without the host: named widgets with parent/child links, basic
//! geometry (auto-sized labels and buttons grow with their text), and
//! click handlers that can be fired programmatically. Every test in the
//! workspace drives the panels through this implementation.

use crate::toolkit::{ClickHandler, UiToolkit, WidgetId, WidgetKind};
use spyglass_host::{CameraController, HostWorld};
use std::collections::HashMap;

/// Width one character of widget text occupies in the headless geometry
/// model.
const CHAR_WIDTH: f32 = 6.0;

struct WidgetState {
    name: String,
    kind: WidgetKind,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    text: String,
    tooltip: String,
    visible: bool,
    enabled: bool,
    width: f32,
    height: f32,
    pad_top: f32,
    pad_bottom: f32,
    offset_x: f32,
    auto_size: bool,
    click: Option<ClickHandler>,
}

impl WidgetState {
    fn new(name: String, kind: WidgetKind) -> Self {
        Self {
            name,
            kind,
            parent: None,
            children: Vec::new(),
            text: String::new(),
            tooltip: String::new(),
            visible: true,
            enabled: true,
            width: 0.0,
            height: 0.0,
            pad_top: 0.0,
            pad_bottom: 0.0,
            offset_x: 0.0,
            auto_size: !matches!(kind, WidgetKind::Panel),
            click: None,
        }
    }
}

/// In-memory `UiToolkit` implementation.
#[derive(Default)]
pub struct HeadlessUi {
    widgets: HashMap<WidgetId, WidgetState>,
    roots: Vec<WidgetId>,
    next: u32,
}

impl HeadlessUi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn mint(&mut self, state: WidgetState) -> WidgetId {
        self.next += 1;
        let id = WidgetId::from_raw(self.next);
        self.widgets.insert(id, state);
        id
    }

    /// Creates a top-level panel object.
    pub fn add_root(&mut self, name: &str) -> WidgetId {
        let id = self.mint(WidgetState::new(name.to_string(), WidgetKind::Panel));
        self.roots.push(id);
        id
    }

    /// Creates a child widget under `parent`.
    pub fn add_widget(&mut self, parent: WidgetId, kind: WidgetKind, name: &str) -> WidgetId {
        let mut state = WidgetState::new(name.to_string(), kind);
        state.parent = Some(parent);
        let id = self.mint(state);
        if let Some(parent) = self.widgets.get_mut(&parent) {
            parent.children.push(id);
        }
        id
    }

    pub fn set_size(&mut self, widget: WidgetId, width: f32, height: f32) {
        if let Some(state) = self.widgets.get_mut(&widget) {
            state.width = width;
            state.height = height;
            state.auto_size = false;
        }
    }

    pub fn set_padding(&mut self, widget: WidgetId, top: f32, bottom: f32) {
        if let Some(state) = self.widgets.get_mut(&widget) {
            state.pad_top = top;
            state.pad_bottom = bottom;
        }
    }

    pub fn set_offset_x(&mut self, widget: WidgetId, offset: f32) {
        if let Some(state) = self.widgets.get_mut(&widget) {
            state.offset_x = offset;
        }
    }

    #[must_use]
    pub fn exists(&self, widget: WidgetId) -> bool {
        self.widgets.contains_key(&widget)
    }

    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    #[must_use]
    pub fn tooltip(&self, widget: WidgetId) -> String {
        self.widgets
            .get(&widget)
            .map(|s| s.tooltip.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_enabled(&self, widget: WidgetId) -> bool {
        self.widgets.get(&widget).is_some_and(|s| s.enabled)
    }

    /// Fires the click handler wired on `widget`, the way the host's UI
    /// event loop would. Returns whether a handler ran.
    pub fn fire_click(
        &self,
        widget: WidgetId,
        world: &HostWorld,
        camera: &mut dyn CameraController,
    ) -> bool {
        let Some(handler) = self.widgets.get(&widget).and_then(|s| s.click.clone()) else {
            return false;
        };
        handler(world, camera);
        true
    }

    fn find_descendant(&self, parent: WidgetId, name: &str) -> Option<WidgetId> {
        let state = self.widgets.get(&parent)?;
        for &child in &state.children {
            if self.widgets.get(&child).is_some_and(|s| s.name == name) {
                return Some(child);
            }
            if let Some(found) = self.find_descendant(child, name) {
                return Some(found);
            }
        }
        None
    }

    fn destroy_subtree(&mut self, widget: WidgetId) {
        if let Some(state) = self.widgets.remove(&widget) {
            for child in state.children {
                self.destroy_subtree(child);
            }
        }
    }

    fn refresh_auto_width(&mut self, widget: WidgetId) {
        if let Some(state) = self.widgets.get_mut(&widget) {
            if state.auto_size {
                state.width = state.text.chars().count() as f32 * CHAR_WIDTH;
            }
        }
    }
}

impl UiToolkit for HeadlessUi {
    fn find_root(&self, name: &str) -> Option<WidgetId> {
        self.roots
            .iter()
            .copied()
            .find(|id| self.widgets.get(id).is_some_and(|s| s.name == name))
    }

    fn find_child(&self, parent: WidgetId, name: &str) -> Option<WidgetId> {
        self.find_descendant(parent, name)
    }

    fn children(&self, parent: WidgetId) -> Vec<WidgetId> {
        self.widgets
            .get(&parent)
            .map(|s| s.children.clone())
            .unwrap_or_default()
    }

    fn parent(&self, widget: WidgetId) -> Option<WidgetId> {
        self.widgets.get(&widget).and_then(|s| s.parent)
    }

    fn kind(&self, widget: WidgetId) -> Option<WidgetKind> {
        self.widgets.get(&widget).map(|s| s.kind)
    }

    fn clone_into(&mut self, template: WidgetId, container: WidgetId, name: &str) -> WidgetId {
        let mut state = match self.widgets.get(&template) {
            Some(template) => {
                let mut state = WidgetState::new(name.to_string(), template.kind);
                state.width = template.width;
                state.height = template.height;
                state.pad_top = template.pad_top;
                state.pad_bottom = template.pad_bottom;
                state.offset_x = template.offset_x;
                state.auto_size = template.auto_size;
                state
            }
            None => WidgetState::new(name.to_string(), WidgetKind::Panel),
        };
        state.parent = Some(container);
        let id = self.mint(state);
        if let Some(container) = self.widgets.get_mut(&container) {
            container.children.push(id);
        }
        id
    }

    fn remove_and_destroy(&mut self, widget: WidgetId) {
        let parent = self.parent(widget);
        if let Some(parent) = parent.and_then(|p| self.widgets.get_mut(&p)) {
            parent.children.retain(|&c| c != widget);
        }
        self.destroy_subtree(widget);
    }

    fn text(&self, widget: WidgetId) -> String {
        self.widgets
            .get(&widget)
            .map(|s| s.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&mut self, widget: WidgetId, text: &str) {
        if let Some(state) = self.widgets.get_mut(&widget) {
            state.text = text.to_string();
        }
        self.refresh_auto_width(widget);
    }

    fn set_tooltip(&mut self, widget: WidgetId, tooltip: &str) {
        if let Some(state) = self.widgets.get_mut(&widget) {
            state.tooltip = tooltip.to_string();
        }
    }

    fn is_visible(&self, widget: WidgetId) -> bool {
        self.widgets.get(&widget).is_some_and(|s| s.visible)
    }

    fn set_visible(&mut self, widget: WidgetId, visible: bool) {
        if let Some(state) = self.widgets.get_mut(&widget) {
            state.visible = visible;
        }
    }

    fn set_enabled(&mut self, widget: WidgetId, enabled: bool) {
        if let Some(state) = self.widgets.get_mut(&widget) {
            state.enabled = enabled;
        }
    }

    fn width(&self, widget: WidgetId) -> f32 {
        self.widgets.get(&widget).map_or(0.0, |s| s.width)
    }

    fn height(&self, widget: WidgetId) -> f32 {
        self.widgets.get(&widget).map_or(0.0, |s| s.height)
    }

    fn set_height(&mut self, widget: WidgetId, height: f32) {
        if let Some(state) = self.widgets.get_mut(&widget) {
            state.height = height;
        }
    }

    fn vertical_padding(&self, widget: WidgetId) -> f32 {
        self.widgets
            .get(&widget)
            .map_or(0.0, |s| s.pad_top + s.pad_bottom)
    }

    fn offset_x(&self, widget: WidgetId) -> f32 {
        self.widgets.get(&widget).map_or(0.0, |s| s.offset_x)
    }

    fn set_click_handler(&mut self, widget: WidgetId, handler: Option<ClickHandler>) {
        if let Some(state) = self.widgets.get_mut(&widget) {
            state.click = handler;
        }
    }
}
