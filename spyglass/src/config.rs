//! Spyglass configuration file handling.

use serde::{Deserialize, Serialize};
use spyglass_types::PanelKind;
use std::path::Path;
use tracing::{info, warn};

fn default_enabled() -> bool {
    true
}

/// Which info panels get the origin row. Everything defaults to on; a
/// config file only needs to name the panels it turns off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelToggles {
    #[serde(default = "default_enabled")]
    pub citizen: bool,
    #[serde(default = "default_enabled")]
    pub tourist: bool,
    #[serde(default = "default_enabled")]
    pub citizen_vehicle: bool,
    #[serde(default = "default_enabled")]
    pub service_vehicle: bool,
}

impl Default for PanelToggles {
    fn default() -> Self {
        Self {
            citizen: true,
            tourist: true,
            citizen_vehicle: true,
            service_vehicle: true,
        }
    }
}

/// Configuration parsed from `spyglass.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpyglassConfig {
    #[serde(default)]
    pub panels: PanelToggles,
}

impl SpyglassConfig {
    /// Loads configuration from `path`. A missing file means defaults; a
    /// file that fails to parse is logged and also falls back to
    /// defaults — configuration problems never block activation.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!(?path, "no config file found, using defaults");
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    warn!(?path, %err, "failed to parse config file, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                warn!(?path, %err, "failed to read config file, using defaults");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn is_enabled(&self, kind: PanelKind) -> bool {
        match kind {
            PanelKind::Citizen => self.panels.citizen,
            PanelKind::Tourist => self.panels.tourist,
            PanelKind::CitizenVehicle => self.panels.citizen_vehicle,
            PanelKind::ServiceVehicle => self.panels.service_vehicle,
        }
    }
}
