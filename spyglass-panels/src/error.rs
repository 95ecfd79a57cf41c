//! Error types for panel customization.

use thiserror::Error;

/// Host layout drift: an expected UI object is missing.
///
/// Recoverable — the affected panel stays uncustomized while the rest of
/// the system keeps working.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("host panel '{panel}' not found")]
    PanelNotFound { panel: String },

    #[error("template widget '{widget}' not found in panel '{panel}'")]
    WidgetNotFound { panel: String, widget: String },
}
