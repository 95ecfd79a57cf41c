//! Core type definitions for Spyglass.
//!
//! This crate defines the fundamental, host-facing types used throughout
//! the interception and shadow-state layers:
//! - Small-integer id newtypes for every host entity kind (`0` = absent)
//! - `EntityRef`, the tagged reference to one identifiable host object
//! - `PanelKind`, the set of info panels Spyglass can extend
//!
//! Everything that touches host tables, patches, or panels builds on these
//! types; host-specific record layouts belong in `spyglass-host`, not here.

mod entity;
mod ids;

pub use entity::{EntityKind, EntityRef};
pub use ids::{BuildingId, CitizenId, CitizenInstanceId, ParkedVehicleId, VehicleId};

use serde::{Deserialize, Serialize};

/// The info panel kinds Spyglass knows how to extend.
///
/// Selected via the refreshed panel's subject rather than host-type
/// inheritance; each kind maps to exactly one extension instance in the
/// registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelKind {
    Citizen,
    Tourist,
    CitizenVehicle,
    ServiceVehicle,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::Citizen,
        PanelKind::Tourist,
        PanelKind::CitizenVehicle,
        PanelKind::ServiceVehicle,
    ];

    /// Stable name used in logs and the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Tourist => "tourist",
            Self::CitizenVehicle => "citizen-vehicle",
            Self::ServiceVehicle => "service-vehicle",
        }
    }

    /// Numeric code the host uses to identify the refreshed panel when it
    /// crosses an intercepted call.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Citizen => 0,
            Self::Tourist => 1,
            Self::CitizenVehicle => 2,
            Self::ServiceVehicle => 3,
        }
    }

    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::Citizen),
            1 => Some(Self::Tourist),
            2 => Some(Self::CitizenVehicle),
            3 => Some(Self::ServiceVehicle),
            _ => None,
        }
    }
}

impl std::fmt::Display for PanelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
