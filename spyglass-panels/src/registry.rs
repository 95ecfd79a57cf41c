//! The extension registry: one active extension per panel kind.

use crate::toolkit::UiToolkit;
use spyglass_host::HostWorld;
use spyglass_types::{EntityRef, PanelKind};
use std::collections::HashMap;
use tracing::info;

/// Capability interface every panel extension implements.
///
/// Per-kind lifecycle is `Uninitialized → Active → Disabled`: an
/// extension only exists once its `enable` constructor succeeded, so
/// every value behind this trait is `Active` until `disable` retires it
/// for good.
pub trait PanelExtension {
    fn kind(&self) -> PanelKind;

    /// Reacts to the host refreshing this panel for `subject`: recomputes
    /// the displayed info and updates the cloned widgets.
    fn on_refresh(&mut self, ui: &mut dyn UiToolkit, world: &HostWorld, subject: EntityRef);

    /// Removes and destroys the cloned widgets. Idempotent.
    fn disable(&mut self, ui: &mut dyn UiToolkit);
}

/// All active panel extensions, owned by the activation boundary and
/// passed to the interception callbacks explicitly — never read from
/// ambient state.
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: HashMap<PanelKind, Box<dyn PanelExtension>>,
}

impl ExtensionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an enabled extension, replacing any previous one for the
    /// same kind.
    pub fn register(&mut self, extension: Box<dyn PanelExtension>) {
        self.extensions.insert(extension.kind(), extension);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    #[must_use]
    pub fn has(&self, kind: PanelKind) -> bool {
        self.extensions.contains_key(&kind)
    }

    /// Routes a "panel refreshed" event to the matching extension, if one
    /// is active. Kinds without an extension are silently ignored.
    pub fn dispatch_refresh(
        &mut self,
        ui: &mut dyn UiToolkit,
        world: &HostWorld,
        kind: PanelKind,
        subject: EntityRef,
    ) {
        if let Some(extension) = self.extensions.get_mut(&kind) {
            extension.on_refresh(ui, world, subject);
        }
    }

    /// Disables and drops every extension.
    pub fn disable_all(&mut self, ui: &mut dyn UiToolkit) {
        for (kind, mut extension) in self.extensions.drain() {
            extension.disable(ui);
            info!(panel = %kind, "panel extension disabled");
        }
    }
}
