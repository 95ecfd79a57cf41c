//! Widget helpers shared by every panel extension.

use crate::error::LookupError;
use crate::toolkit::{UiToolkit, WidgetId, WidgetKind};
use spyglass_types::PanelKind;

/// Name of the target-building button present in every host info panel.
/// Its row is the template the origin row is cloned from.
const TARGET_BUTTON_NAME: &str = "Target";

/// The host object name of each info panel Spyglass extends.
#[must_use]
pub fn host_panel_name(kind: PanelKind) -> &'static str {
    match kind {
        PanelKind::Citizen => "CitizenWorldPanel",
        PanelKind::Tourist => "TouristWorldPanel",
        PanelKind::CitizenVehicle => "CitizenVehiclePanel",
        PanelKind::ServiceVehicle => "ServiceVehiclePanel",
    }
}

/// The host template widgets an extension clones from.
#[derive(Debug, Clone, Copy)]
pub struct Templates {
    /// The list container the target row lives in; clones land here too.
    pub items_panel: WidgetId,
    /// The target row panel.
    pub row: WidgetId,
    /// The glyph label inside the target row.
    pub label: WidgetId,
    /// The clickable building-name button inside the target row.
    pub button: WidgetId,
}

/// Locates the template widget group inside the named host panel.
///
/// Any missing piece means the host layout drifted; the caller logs the
/// error and leaves that panel uncustomized.
pub fn locate_templates(ui: &dyn UiToolkit, panel_name: &str) -> Result<Templates, LookupError> {
    let root = ui
        .find_root(panel_name)
        .ok_or_else(|| LookupError::PanelNotFound {
            panel: panel_name.to_string(),
        })?;

    let button =
        ui.find_child(root, TARGET_BUTTON_NAME)
            .ok_or_else(|| LookupError::WidgetNotFound {
                panel: panel_name.to_string(),
                widget: TARGET_BUTTON_NAME.to_string(),
            })?;

    let row = ui.parent(button).ok_or_else(|| LookupError::WidgetNotFound {
        panel: panel_name.to_string(),
        widget: "target row".to_string(),
    })?;

    let label = ui
        .children(row)
        .into_iter()
        .find(|&w| ui.kind(w) == Some(WidgetKind::Label))
        .ok_or_else(|| LookupError::WidgetNotFound {
            panel: panel_name.to_string(),
            widget: "target label".to_string(),
        })?;

    let items_panel = ui.parent(row).ok_or_else(|| LookupError::WidgetNotFound {
        panel: panel_name.to_string(),
        widget: "items panel".to_string(),
    })?;

    Ok(Templates {
        items_panel,
        row,
        label,
        button,
    })
}

/// Shortens a widget's text until it fits its parent's width, keeping the
/// full text as the tooltip. Mirrors how the host shortens its own
/// labels, so cloned rows truncate the same way native ones do.
pub fn shorten_text_to_fit(ui: &mut dyn UiToolkit, widget: WidgetId) {
    let Some(parent) = ui.parent(widget) else {
        return;
    };
    let target_width = ui.width(parent) - ui.offset_x(widget);
    if ui.width(widget) <= target_width {
        ui.set_tooltip(widget, "");
        return;
    }

    let full = ui.text(widget);
    ui.set_tooltip(widget, &full);
    let mut text = full;
    while ui.width(widget) > target_width && text.chars().count() > 5 {
        let keep = text.chars().count() - 4;
        text = text.chars().take(keep).collect::<String>().trim_end().to_string() + "…";
        ui.set_text(widget, &text);
    }
}
