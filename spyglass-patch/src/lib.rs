//! Reversible method interception for the Spyglass host.
//!
//! A patch redirects one host method so extra code runs before and/or
//! after the original body, without recompiling the host. This crate
//! owns:
//! - `PatchDescriptor` — an immutable description of one interception
//!   point (target method plus before/after hooks)
//! - `PatchBackend` — the contract of the external byte-code patching
//!   primitive (`install`/`uninstall`)
//! - `InProcessBackend` — a reference backend that dispatches hooks
//!   around a caller-supplied original body; used by embedders and tests
//! - `MethodPatcher` — the registry/applier that installs a patch set
//!   transactionally and reverts it idempotently in reverse order
//!
//! Installing a patch changes host control flow process-wide until it is
//! reverted; apply/revert are confined to a single activation boundary
//! and never run concurrently (the host is single-threaded at hook
//! granularity).

mod applier;
mod backend;
mod descriptor;
mod error;

pub use applier::{InstalledPatch, InstalledSet, MethodPatcher};
pub use backend::{BackendHandle, InProcessBackend, PatchBackend};
pub use descriptor::{HookFn, HookFrame, HookPair, HookValue, PatchDescriptor};
pub use error::{InstallError, PatchError};
