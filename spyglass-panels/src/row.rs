//! One injected info row: a cloned row panel, glyph label, and button.

use crate::toolkit::{ClickHandler, UiToolkit, WidgetId};
use crate::tools::{shorten_text_to_fit, Templates};

/// The cloned widget trio one extension owns inside a host panel.
///
/// The row starts hidden. Showing or hiding it resizes the surrounding
/// container by a delta precomputed at clone time (row height plus
/// vertical padding), so the panel's layout stays consistent and a
/// show/hide round trip restores the exact original size.
#[derive(Debug)]
pub struct InfoRow {
    row: WidgetId,
    label: WidgetId,
    button: WidgetId,
    height_delta: f32,
    visible: bool,
}

impl InfoRow {
    /// Clones the template trio into the items panel and wires the click
    /// handler onto the new button.
    pub fn clone_from(
        ui: &mut dyn UiToolkit,
        templates: &Templates,
        id_prefix: &str,
        glyph: &str,
        on_click: ClickHandler,
    ) -> Self {
        let row = ui.clone_into(templates.row, templates.items_panel, &format!("{id_prefix}Row"));
        let label = ui.clone_into(templates.label, row, &format!("{id_prefix}Label"));
        let button = ui.clone_into(templates.button, row, &format!("{id_prefix}Button"));

        ui.set_text(label, glyph);
        ui.set_click_handler(button, Some(on_click));
        ui.set_visible(row, false);

        let height_delta = ui.height(row) + ui.vertical_padding(row);
        Self {
            row,
            label,
            button,
            height_delta,
            visible: false,
        }
    }

    /// Shows the row with the given button text, resizing the container
    /// on the hidden → visible edge.
    pub fn show(&mut self, ui: &mut dyn UiToolkit, text: &str, enabled: bool) {
        self.set_row_visible(ui, true);
        ui.set_text(self.button, text);
        ui.set_enabled(self.button, enabled);
        shorten_text_to_fit(ui, self.button);
    }

    /// Hides the row, resizing the container back on the visible → hidden
    /// edge.
    pub fn hide(&mut self, ui: &mut dyn UiToolkit) {
        self.set_row_visible(ui, false);
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn button(&self) -> WidgetId {
        self.button
    }

    #[must_use]
    pub fn height_delta(&self) -> f32 {
        self.height_delta
    }

    fn set_row_visible(&mut self, ui: &mut dyn UiToolkit, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        ui.set_visible(self.row, visible);

        // The items panel's parent is the panel's sizing container.
        let container = ui.parent(self.row).and_then(|items| ui.parent(items));
        if let Some(container) = container {
            let current = ui.height(container);
            let next = if visible {
                current + self.height_delta
            } else {
                current - self.height_delta
            };
            ui.set_height(container, next);
        }
    }

    /// Detaches the click handler and destroys the cloned widgets.
    pub fn destroy(self, ui: &mut dyn UiToolkit) {
        ui.set_click_handler(self.button, None);
        ui.remove_and_destroy(self.label);
        ui.remove_and_destroy(self.button);
        ui.remove_and_destroy(self.row);
    }
}
