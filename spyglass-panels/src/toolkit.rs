//! The host UI toolkit contract.

use spyglass_host::{CameraController, HostWorld};
use std::rc::Rc;

/// Opaque handle to one host widget. Widgets are host-owned; Spyglass
/// only ever holds weak references like this and never assumes a handle
/// stays valid across host teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(u32);

impl WidgetId {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Panel,
    Label,
    Button,
}

/// Click callback wired onto a cloned widget. Runs inline on the host's
/// UI thread with read access to the world and the camera.
pub type ClickHandler = Rc<dyn Fn(&HostWorld, &mut dyn CameraController)>;

/// Everything Spyglass needs from the host's UI toolkit.
///
/// Lookups degrade to `None`/defaults instead of failing hard: the host
/// may remove widgets at any time, and a missing widget must never bring
/// the extension layer down.
pub trait UiToolkit {
    /// Finds a top-level panel object by name.
    fn find_root(&self, name: &str) -> Option<WidgetId>;

    /// Finds a descendant of `parent` by name, searching depth-first.
    fn find_child(&self, parent: WidgetId, name: &str) -> Option<WidgetId>;

    fn children(&self, parent: WidgetId) -> Vec<WidgetId>;

    fn parent(&self, widget: WidgetId) -> Option<WidgetId>;

    fn kind(&self, widget: WidgetId) -> Option<WidgetKind>;

    /// Clones `template` (visual properties included, children excluded)
    /// as a new child of `container`.
    fn clone_into(&mut self, template: WidgetId, container: WidgetId, name: &str) -> WidgetId;

    /// Detaches `widget` from its parent and destroys it and its subtree.
    fn remove_and_destroy(&mut self, widget: WidgetId);

    fn text(&self, widget: WidgetId) -> String;
    fn set_text(&mut self, widget: WidgetId, text: &str);
    fn set_tooltip(&mut self, widget: WidgetId, tooltip: &str);

    fn is_visible(&self, widget: WidgetId) -> bool;
    fn set_visible(&mut self, widget: WidgetId, visible: bool);
    fn set_enabled(&mut self, widget: WidgetId, enabled: bool);

    fn width(&self, widget: WidgetId) -> f32;
    fn height(&self, widget: WidgetId) -> f32;
    fn set_height(&mut self, widget: WidgetId, height: f32);

    /// Top plus bottom padding of a panel widget.
    fn vertical_padding(&self, widget: WidgetId) -> f32;

    /// Horizontal offset of `widget` inside its parent.
    fn offset_x(&self, widget: WidgetId) -> f32;

    fn set_click_handler(&mut self, widget: WidgetId, handler: Option<ClickHandler>);
}
