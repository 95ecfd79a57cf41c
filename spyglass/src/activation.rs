//! The activation/deactivation boundary.
//!
//! Activation installs the patch set first and enables the panel
//! extensions second; deactivation disables the panels first and reverts
//! the patches second — always in that order, and always fully: any patch
//! failure unwinds synchronously before control returns, leaving the host
//! exactly as if Spyglass had never been there.

use crate::config::SpyglassConfig;
use crate::hooks::build_patch_set;
use spyglass_host::{BindingTable, HostVersion};
use spyglass_panels::{CitizenPanel, ExtensionRegistry, OriginPanel, UiToolkit};
use spyglass_patch::{InstalledSet, MethodPatcher, PatchBackend, PatchError};
use spyglass_types::PanelKind;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// How the current host session was entered. Spyglass only activates
/// inside an actual game session; editors and menus stay untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSession {
    NewGame,
    LoadedGame,
    Scenario,
    Editor,
    MainMenu,
}

impl HostSession {
    #[must_use]
    pub fn is_in_game(self) -> bool {
        matches!(self, Self::NewGame | Self::LoadedGame | Self::Scenario)
    }
}

/// An activated Spyglass instance. Dropping it deactivates.
pub struct Spyglass {
    patcher: MethodPatcher,
    installed: InstalledSet,
    panels: Rc<RefCell<ExtensionRegistry>>,
    ui: Rc<RefCell<dyn UiToolkit>>,
    active: bool,
}

impl std::fmt::Debug for Spyglass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spyglass")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Spyglass {
    /// Activates Spyglass for a host session.
    ///
    /// Returns `Ok(None)` for sessions that never activate extensions
    /// (editor, menu). Returns an error when the host version is
    /// unrecognized or a patch fails to install; in both cases everything
    /// already installed has been reverted and the host is unmodified.
    /// Panel lookups that fail merely degrade that panel and are logged.
    pub fn activate(
        session: HostSession,
        host_version: HostVersion,
        config: &SpyglassConfig,
        backend: Rc<RefCell<dyn PatchBackend>>,
        ui: Rc<RefCell<dyn UiToolkit>>,
    ) -> Result<Option<Self>, PatchError> {
        if !session.is_in_game() {
            info!(?session, "session does not activate extensions");
            return Ok(None);
        }

        let table = BindingTable::for_version(host_version)?;
        let panels = Rc::new(RefCell::new(ExtensionRegistry::new()));
        let patches = build_patch_set(Rc::clone(&panels), Rc::clone(&ui));

        let mut patcher = MethodPatcher::new(backend);
        let installed = patcher.apply(&table, &patches)?;

        {
            let mut ui_ref = ui.borrow_mut();
            let mut registry = panels.borrow_mut();
            if config.is_enabled(PanelKind::Citizen) {
                if let Some(panel) = CitizenPanel::enable(&mut *ui_ref) {
                    registry.register(Box::new(panel));
                }
            }
            for kind in [
                PanelKind::Tourist,
                PanelKind::CitizenVehicle,
                PanelKind::ServiceVehicle,
            ] {
                if config.is_enabled(kind) {
                    if let Some(panel) = OriginPanel::enable(&mut *ui_ref, kind) {
                        registry.register(Box::new(panel));
                    }
                }
            }
            info!(
                host = %host_version,
                patches = installed.len(),
                panels = registry.len(),
                "spyglass activated"
            );
        }

        Ok(Some(Self {
            patcher,
            installed,
            panels,
            ui,
            active: true,
        }))
    }

    /// Number of patches currently installed.
    #[must_use]
    pub fn patch_count(&self) -> usize {
        self.patcher.active_count()
    }

    /// Number of panel extensions currently active.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.borrow().len()
    }

    /// Disables every panel extension, then reverts every patch, in that
    /// order. Idempotent, and never propagates teardown failures — this
    /// runs during host shutdown, where escalating would corrupt the
    /// host's own unwind ordering.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        {
            let mut ui = self.ui.borrow_mut();
            self.panels.borrow_mut().disable_all(&mut *ui);
        }
        self.patcher.revert(&self.installed);
        info!("spyglass deactivated");
    }
}

impl Drop for Spyglass {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_game_sessions_activate() {
        assert!(HostSession::NewGame.is_in_game());
        assert!(HostSession::LoadedGame.is_in_game());
        assert!(HostSession::Scenario.is_in_game());
        assert!(!HostSession::Editor.is_in_game());
        assert!(!HostSession::MainMenu.is_in_game());
    }
}
