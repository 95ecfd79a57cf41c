//! The patch backend contract, plus the in-process reference backend.

use crate::descriptor::{HookFrame, HookPair, HookValue};
use crate::error::InstallError;
use serde::Serialize;
use spyglass_host::{HostWorld, MethodBinding, MethodKey};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Opaque proof of one installed redirect, minted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BackendHandle(u64);

impl BackendHandle {
    /// Mints a handle from a backend-chosen id. Only backend
    /// implementations create handles; everyone else just carries them.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BackendHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The external byte-code patching primitive.
///
/// `install` rewrites the method behind `binding.slot` so the hook pair
/// runs around the original body; `uninstall` restores the original
/// machine code. Both are process-global side effects and must only be
/// driven through `MethodPatcher`.
pub trait PatchBackend {
    fn install(
        &mut self,
        binding: MethodBinding,
        hooks: HookPair,
    ) -> Result<BackendHandle, InstallError>;

    fn uninstall(&mut self, handle: BackendHandle) -> Result<(), InstallError>;
}

struct InstalledHooks {
    handle: BackendHandle,
    key: MethodKey,
    hooks: HookPair,
}

/// In-process backend: keeps the redirects in a dispatch map instead of
/// rewriting machine code. Embedders that own the host's call sites (and
/// every test in this workspace) route calls through [`Self::dispatch`]
/// to get exactly the hook semantics the machine-code primitive provides.
#[derive(Default)]
pub struct InProcessBackend {
    next_handle: u64,
    installed: HashMap<u32, InstalledHooks>,
}

impl InProcessBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live redirects.
    #[must_use]
    pub fn installed_count(&self) -> usize {
        self.installed.len()
    }

    /// Routes one host call through the hooks installed for `key`.
    ///
    /// Calling convention, identical to the real primitive:
    /// 1. the `before` hook runs and may rewrite `args`, store a carry
    ///    value, or set a result (which skips the original body);
    /// 2. the original body runs unless a result was substituted;
    /// 3. the `after` hook runs with the result and the carry value.
    ///
    /// With no hooks installed for `key`, the original body runs plain.
    pub fn dispatch<F>(
        &self,
        key: MethodKey,
        world: &mut HostWorld,
        args: Vec<HookValue>,
        original: F,
    ) -> Option<HookValue>
    where
        F: FnOnce(&mut HostWorld, &[HookValue]) -> Option<HookValue>,
    {
        let entry = self.installed.values().find(|e| e.key == key);
        let Some(entry) = entry else {
            return original(world, &args);
        };

        let mut frame = HookFrame {
            world,
            args,
            result: None,
            carry: None,
        };
        if let Some(before) = &entry.hooks.before {
            before(&mut frame);
        }
        if frame.result.is_none() {
            frame.result = original(&mut *frame.world, &frame.args);
        } else {
            trace!(%key, "before hook substituted the return value; original body skipped");
        }
        if let Some(after) = &entry.hooks.after {
            after(&mut frame);
        }
        frame.result
    }
}

impl PatchBackend for InProcessBackend {
    fn install(
        &mut self,
        binding: MethodBinding,
        hooks: HookPair,
    ) -> Result<BackendHandle, InstallError> {
        if self.installed.contains_key(&binding.slot) {
            return Err(InstallError::Conflict { slot: binding.slot });
        }
        self.next_handle += 1;
        let handle = BackendHandle(self.next_handle);
        self.installed.insert(
            binding.slot,
            InstalledHooks {
                handle,
                key: binding.key,
                hooks,
            },
        );
        Ok(handle)
    }

    fn uninstall(&mut self, handle: BackendHandle) -> Result<(), InstallError> {
        let slot = self
            .installed
            .iter()
            .find(|(_, e)| e.handle == handle)
            .map(|(&slot, _)| slot);
        match slot {
            Some(slot) => {
                self.installed.remove(&slot);
                Ok(())
            }
            None => Err(InstallError::UnknownHandle {
                handle: handle.raw(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn binding(key: MethodKey, slot: u32) -> MethodBinding {
        MethodBinding { key, slot }
    }

    // ================================================================
    // Install / uninstall bookkeeping
    // ================================================================

    #[test]
    fn install_then_uninstall_round_trip() {
        let mut backend = InProcessBackend::new();
        let handle = backend
            .install(binding(MethodKey::FreightSetTarget, 1), HookPair::default())
            .unwrap();
        assert_eq!(backend.installed_count(), 1);
        backend.uninstall(handle).unwrap();
        assert_eq!(backend.installed_count(), 0);
    }

    #[test]
    fn double_install_on_one_slot_conflicts() {
        let mut backend = InProcessBackend::new();
        backend
            .install(binding(MethodKey::FreightSetTarget, 1), HookPair::default())
            .unwrap();
        let err = backend
            .install(binding(MethodKey::FreightSetTarget, 1), HookPair::default())
            .unwrap_err();
        assert_eq!(err, InstallError::Conflict { slot: 1 });
    }

    #[test]
    fn uninstall_of_unknown_handle_errors() {
        let mut backend = InProcessBackend::new();
        let handle = backend
            .install(binding(MethodKey::FreightSetTarget, 1), HookPair::default())
            .unwrap();
        backend.uninstall(handle).unwrap();
        let err = backend.uninstall(handle).unwrap_err();
        assert!(matches!(err, InstallError::UnknownHandle { .. }));
    }

    // ================================================================
    // Dispatch calling convention
    // ================================================================

    #[test]
    fn unpatched_dispatch_runs_original_plain() {
        let backend = InProcessBackend::new();
        let mut world = HostWorld::new();
        let result = backend.dispatch(
            MethodKey::FreightSetTarget,
            &mut world,
            vec![HookValue::U16(5)],
            |_, args| Some(HookValue::U16(args[0].as_u16().unwrap() + 1)),
        );
        assert_eq!(result, Some(HookValue::U16(6)));
    }

    #[test]
    fn before_hook_can_rewrite_arguments() {
        let mut backend = InProcessBackend::new();
        backend
            .install(
                binding(MethodKey::FreightSetTarget, 1),
                HookPair {
                    before: Some(Rc::new(|frame| frame.args[0] = HookValue::U16(100))),
                    after: None,
                },
            )
            .unwrap();
        let mut world = HostWorld::new();
        let result = backend.dispatch(
            MethodKey::FreightSetTarget,
            &mut world,
            vec![HookValue::U16(5)],
            |_, args| Some(HookValue::U16(args[0].as_u16().unwrap())),
        );
        assert_eq!(result, Some(HookValue::U16(100)));
    }

    #[test]
    fn before_hook_result_substitution_skips_original() {
        let ran = Rc::new(Cell::new(false));
        let mut backend = InProcessBackend::new();
        backend
            .install(
                binding(MethodKey::FreightSetTarget, 1),
                HookPair {
                    before: Some(Rc::new(|frame| frame.result = Some(HookValue::Bool(false)))),
                    after: None,
                },
            )
            .unwrap();
        let mut world = HostWorld::new();
        let ran_inner = Rc::clone(&ran);
        let result = backend.dispatch(MethodKey::FreightSetTarget, &mut world, vec![], move |_, _| {
            ran_inner.set(true);
            Some(HookValue::Bool(true))
        });
        assert_eq!(result, Some(HookValue::Bool(false)));
        assert!(!ran.get());
    }

    #[test]
    fn carry_flows_from_before_to_after() {
        let seen = Rc::new(Cell::new(0u16));
        let seen_in_after = Rc::clone(&seen);
        let mut backend = InProcessBackend::new();
        backend
            .install(
                binding(MethodKey::FreightSetTarget, 1),
                HookPair {
                    before: Some(Rc::new(|frame| frame.carry = Some(HookValue::U16(42)))),
                    after: Some(Rc::new(move |frame| {
                        seen_in_after.set(frame.carry.and_then(HookValue::as_u16).unwrap_or(0));
                    })),
                },
            )
            .unwrap();
        let mut world = HostWorld::new();
        backend.dispatch(MethodKey::FreightSetTarget, &mut world, vec![], |_, _| None);
        assert_eq!(seen.get(), 42);
    }
}
