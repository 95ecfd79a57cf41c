//! The patch registry/applier.
//!
//! Owns every handle the backend mints and guarantees the host is either
//! fully patched or not patched at all: the first failure inside `apply`
//! unwinds everything installed so far, in reverse order, before the
//! error is returned. Teardown is idempotent and never escalates — it
//! frequently runs during host shutdown, where throwing would corrupt
//! the host's own unwind ordering.

use crate::backend::{BackendHandle, PatchBackend};
use crate::descriptor::PatchDescriptor;
use crate::error::PatchError;
use spyglass_host::{BindingTable, MethodKey};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{info, warn};

/// One successfully installed patch.
#[derive(Debug, Clone, Copy)]
pub struct InstalledPatch {
    pub key: MethodKey,
    pub label: &'static str,
    handle: BackendHandle,
}

/// The patches of one `apply` call, in install order. Proof that the
/// whole set went in; handed back to `revert` at teardown.
#[derive(Debug, Clone, Default)]
pub struct InstalledSet {
    patches: Vec<InstalledPatch>,
}

impl InstalledSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstalledPatch> {
        self.patches.iter()
    }
}

/// Registry and applier for patch sets.
///
/// Exclusively owns the validity of every handle it creates: a handle is
/// live from successful install until the revert that removes it, and a
/// stale handle is a defined (logged) condition, never undefined
/// behavior.
pub struct MethodPatcher {
    backend: Rc<RefCell<dyn PatchBackend>>,
    active: HashSet<u64>,
}

impl MethodPatcher {
    pub fn new(backend: Rc<RefCell<dyn PatchBackend>>) -> Self {
        Self {
            backend,
            active: HashSet::new(),
        }
    }

    /// Number of patches currently installed through this registry.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Resolves and installs every descriptor, in order, as one
    /// transaction. On the first resolution or install failure, every
    /// patch installed by this call is reverted in reverse order and the
    /// error is returned — the host is never left half-patched.
    pub fn apply(
        &mut self,
        table: &BindingTable,
        patches: &[PatchDescriptor],
    ) -> Result<InstalledSet, PatchError> {
        let mut installed = InstalledSet::default();

        for descriptor in patches {
            let binding = match table.resolve(descriptor.key()) {
                Ok(binding) => binding,
                Err(err) => {
                    warn!(label = descriptor.label(), %err, "patch resolution failed; rolling back");
                    self.revert(&installed);
                    return Err(err.into());
                }
            };

            // Bind first so the backend borrow ends before any rollback.
            let result = self
                .backend
                .borrow_mut()
                .install(binding, descriptor.hooks());
            match result {
                Ok(handle) => {
                    info!(
                        label = descriptor.label(),
                        slot = %format_args!("{:#x}", binding.slot),
                        "patch installed"
                    );
                    self.active.insert(handle.raw());
                    installed.patches.push(InstalledPatch {
                        key: descriptor.key(),
                        label: descriptor.label(),
                        handle,
                    });
                }
                Err(source) => {
                    warn!(label = descriptor.label(), %source, "patch install failed; rolling back");
                    self.revert(&installed);
                    return Err(PatchError::Install {
                        label: descriptor.label(),
                        source,
                    });
                }
            }
        }

        Ok(installed)
    }

    /// Reverts every patch in `set`, in reverse install order.
    ///
    /// Idempotent: handles already reverted (or never owned by this
    /// registry) are logged and skipped, and backend failures are logged
    /// and swallowed. Teardown never throws past this boundary.
    pub fn revert(&mut self, set: &InstalledSet) {
        for patch in set.patches.iter().rev() {
            if !self.active.remove(&patch.handle.raw()) {
                warn!(label = patch.label, handle = %patch.handle, "revert of stale handle skipped");
                continue;
            }
            match self.backend.borrow_mut().uninstall(patch.handle) {
                Ok(()) => info!(label = patch.label, "patch reverted"),
                Err(err) => {
                    warn!(label = patch.label, %err, "backend refused revert; continuing teardown");
                }
            }
        }
    }

    /// Reverts a single patch. Unlike group teardown, using a stale
    /// handle here is reported to the caller as `PatchError::StaleHandle`.
    pub fn revert_one(&mut self, patch: &InstalledPatch) -> Result<(), PatchError> {
        if !self.active.remove(&patch.handle.raw()) {
            return Err(PatchError::StaleHandle {
                handle: patch.handle.raw(),
            });
        }
        if let Err(err) = self.backend.borrow_mut().uninstall(patch.handle) {
            warn!(label = patch.label, %err, "backend refused revert; continuing teardown");
        }
        Ok(())
    }
}
