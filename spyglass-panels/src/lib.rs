//! Info-panel extensions for the Spyglass host.
//!
//! The host draws one "world info panel" per selected entity. Spyglass
//! clones that panel's existing target-row widgets into an extra row
//! showing the entity's origin building (and, for citizens, their parked
//! car), keeping the host's look without owning any host-native widget.
//!
//! The host UI toolkit is opaque: everything goes through the `UiToolkit`
//! trait (find by name, clone, destroy, property access). `HeadlessUi`
//! is the in-memory implementation used by the workspace's tests.
//!
//! Each panel kind follows `Uninitialized → Active → Disabled`:
//! `enable` returns `None` when the host layout drifted and the template
//! widgets cannot be found (that panel degrades; everything else keeps
//! working), `on_refresh` redraws from resolver data, and `disable`
//! tears the cloned widgets down idempotently.

mod citizen;
mod error;
mod headless;
mod origin;
mod registry;
mod row;
mod toolkit;
mod tools;

pub use citizen::CitizenPanel;
pub use error::LookupError;
pub use headless::HeadlessUi;
pub use origin::OriginPanel;
pub use registry::{ExtensionRegistry, PanelExtension};
pub use row::InfoRow;
pub use toolkit::{ClickHandler, UiToolkit, WidgetId, WidgetKind};
pub use tools::{host_panel_name, locate_templates, shorten_text_to_fit, Templates};
