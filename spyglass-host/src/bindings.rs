//! Versioned method binding table.
//!
//! The host ships as a closed binary, so Spyglass cannot look methods up
//! by reflection at run time. Instead, each supported host version carries
//! a table mapping the methods Spyglass intercepts to the dispatch slots
//! the patch backend understands. Unrecognized versions fail fast with
//! `ResolutionError` before a single patch is installed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The running host's version, as reported by the host itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostVersion {
    pub major: u16,
    pub minor: u16,
}

impl HostVersion {
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for HostVersion {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: Option<&str>| {
            part.and_then(|p| p.parse::<u16>().ok())
                .ok_or_else(|| ResolutionError::MalformedVersion {
                    version: s.to_string(),
                })
        };
        let mut parts = s.split('.');
        let major = parse(parts.next())?;
        let minor = parse(parts.next())?;
        Ok(Self { major, minor })
    }
}

/// The host methods Spyglass intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodKey {
    /// `FreightVehicleAi::set_target(vehicle, target_building)`.
    FreightSetTarget,
    /// `ResidentAi::start_moving(citizen, source_building, offer)`.
    ResidentStartMovingWithOffer,
    /// `ResidentAi::start_moving(citizen, source_building, target_building)`.
    ResidentStartMovingToBuilding,
    /// `WorldInfoPanel::refresh_bindings()` — fires after the host redraws
    /// an info panel for its current subject.
    PanelRefreshBindings,
}

impl MethodKey {
    /// The signature this key resolves against, for diagnostics.
    pub fn signature(self) -> &'static str {
        match self {
            Self::FreightSetTarget => "FreightVehicleAi::set_target(vehicle, building)",
            Self::ResidentStartMovingWithOffer => {
                "ResidentAi::start_moving(citizen, building, offer)"
            }
            Self::ResidentStartMovingToBuilding => {
                "ResidentAi::start_moving(citizen, building, building)"
            }
            Self::PanelRefreshBindings => "WorldInfoPanel::refresh_bindings()",
        }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}

/// A concrete, version-specific binding of one interceptable method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBinding {
    pub key: MethodKey,
    /// Dispatch slot the patch backend redirects. Opaque to Spyglass.
    pub slot: u32,
}

/// Binding table for one recognized host version.
///
/// Construction is the only fallible step; `resolve` afterwards is
/// deterministic and side-effect-free.
#[derive(Debug, Clone)]
pub struct BindingTable {
    version: HostVersion,
    slots: HashMap<MethodKey, u32>,
}

impl BindingTable {
    /// Builds the table for `version`, or fails when the running host is
    /// a version this build of Spyglass has no slot data for.
    pub fn for_version(version: HostVersion) -> Result<Self, ResolutionError> {
        let slots: &[(MethodKey, u32)] = match (version.major, version.minor) {
            // 1.16 predates the panel refresh rework; the binding for it
            // does not exist there and resolution of that key must fail.
            (1, 16) => &[
                (MethodKey::FreightSetTarget, 0x4a10),
                (MethodKey::ResidentStartMovingWithOffer, 0x3b02),
                (MethodKey::ResidentStartMovingToBuilding, 0x3b07),
            ],
            (1, 17) => &[
                (MethodKey::FreightSetTarget, 0x4c20),
                (MethodKey::ResidentStartMovingWithOffer, 0x3d10),
                (MethodKey::ResidentStartMovingToBuilding, 0x3d15),
                (MethodKey::PanelRefreshBindings, 0x7102),
            ],
            (1, 18) => &[
                (MethodKey::FreightSetTarget, 0x4e44),
                (MethodKey::ResidentStartMovingWithOffer, 0x3f21),
                (MethodKey::ResidentStartMovingToBuilding, 0x3f26),
                (MethodKey::PanelRefreshBindings, 0x7390),
            ],
            _ => return Err(ResolutionError::UnknownVersion { version }),
        };

        Ok(Self {
            version,
            slots: slots.iter().copied().collect(),
        })
    }

    #[must_use]
    pub fn version(&self) -> HostVersion {
        self.version
    }

    /// Resolves one method key to its binding for this host version.
    pub fn resolve(&self, key: MethodKey) -> Result<MethodBinding, ResolutionError> {
        self.slots
            .get(&key)
            .map(|&slot| MethodBinding { key, slot })
            .ok_or(ResolutionError::MethodNotFound {
                version: self.version,
                key,
            })
    }
}

/// Host version drift: the target method cannot be bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("unrecognized host version {version}; no binding table shipped for it")]
    UnknownVersion { version: HostVersion },

    #[error("host version {version} has no binding for {key}")]
    MethodNotFound { version: HostVersion, key: MethodKey },

    #[error("malformed host version string '{version}'")]
    MalformedVersion { version: String },
}
