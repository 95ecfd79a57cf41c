//! Spyglass augments a running, closed simulation host with extra
//! observable state — without recompiling the host or extending its data
//! layout.
//!
//! It intercepts a handful of host methods reversibly (departure
//! recording, freight re-targeting, panel refreshes), persists the origin
//! of a returning vehicle's finished trip in a guarded shadow slot of the
//! host's own vehicle record, and injects an origin row into the host's
//! info panels.
//!
//! This crate is the assembly point: the concrete hook bodies, the TOML
//! configuration, and the activation/deactivation boundary. The moving
//! parts live in the member crates:
//! - `spyglass-types` — ids, `EntityRef`, `PanelKind`
//! - `spyglass-host` — host records, binding table, shadow store, resolver
//! - `spyglass-patch` — descriptors, backend contract, transactional applier
//! - `spyglass-panels` — UI toolkit contract and the panel extensions

mod activation;
mod config;
mod hooks;

pub use activation::{HostSession, Spyglass};
pub use config::{PanelToggles, SpyglassConfig};
pub use hooks::build_patch_set;

pub use spyglass_host::{BindingTable, HostVersion, HostWorld};
pub use spyglass_panels::{ExtensionRegistry, HeadlessUi, UiToolkit};
pub use spyglass_patch::{InProcessBackend, MethodPatcher, PatchBackend, PatchError};
pub use spyglass_types::{EntityKind, EntityRef, PanelKind};
