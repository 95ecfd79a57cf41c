//! Patch descriptors and the hook calling convention.

use spyglass_host::{HostWorld, MethodKey};
use spyglass_types::EntityRef;
use std::fmt;
use std::rc::Rc;

/// One argument or return value crossing an intercepted call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HookValue {
    U16(u16),
    U32(u32),
    Bool(bool),
    Entity(EntityRef),
}

impl HookValue {
    pub fn as_u16(self) -> Option<u16> {
        match self {
            Self::U16(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32(self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_entity(self) -> Option<EntityRef> {
        match self {
            Self::Entity(e) => Some(e),
            _ => None,
        }
    }
}

/// The view a hook gets of one intercepted call.
///
/// A `before` hook runs ahead of the original body. It may rewrite
/// `args`, and setting `result` substitutes the original return value —
/// the original body is then skipped entirely. Whatever it stores in
/// `carry` is handed to the `after` hook of the same call.
///
/// An `after` hook runs once the original body (or the substitution) has
/// produced `result`, still inside the same host call.
pub struct HookFrame<'w> {
    pub world: &'w mut HostWorld,
    pub args: Vec<HookValue>,
    pub result: Option<HookValue>,
    pub carry: Option<HookValue>,
}

impl HookFrame<'_> {
    pub fn arg_u16(&self, index: usize) -> Option<u16> {
        self.args.get(index).copied().and_then(HookValue::as_u16)
    }

    pub fn arg_u32(&self, index: usize) -> Option<u32> {
        self.args.get(index).copied().and_then(HookValue::as_u32)
    }

    pub fn arg_entity(&self, index: usize) -> Option<EntityRef> {
        self.args.get(index).copied().and_then(HookValue::as_entity)
    }

    pub fn result_bool(&self) -> Option<bool> {
        self.result.and_then(HookValue::as_bool)
    }
}

/// A hook body. Hooks run inline on the host's own thread, inside the
/// intercepted call; they must not re-enter patched methods.
pub type HookFn = Rc<dyn Fn(&mut HookFrame<'_>)>;

/// The before/after pair handed to the backend at install time.
#[derive(Clone, Default)]
pub struct HookPair {
    pub before: Option<HookFn>,
    pub after: Option<HookFn>,
}

impl fmt::Debug for HookPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookPair")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

/// An immutable description of one interception point: which host method,
/// and what to run around it. Resolving the target against a binding
/// table is deterministic and side-effect-free; nothing happens until the
/// descriptor is applied.
#[derive(Clone)]
pub struct PatchDescriptor {
    key: MethodKey,
    label: &'static str,
    hooks: HookPair,
}

impl PatchDescriptor {
    #[must_use]
    pub fn new(key: MethodKey, label: &'static str) -> Self {
        Self {
            key,
            label,
            hooks: HookPair::default(),
        }
    }

    #[must_use]
    pub fn with_before(mut self, hook: HookFn) -> Self {
        self.hooks.before = Some(hook);
        self
    }

    #[must_use]
    pub fn with_after(mut self, hook: HookFn) -> Self {
        self.hooks.after = Some(hook);
        self
    }

    #[must_use]
    pub fn key(&self) -> MethodKey {
        self.key
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn hooks(&self) -> HookPair {
        self.hooks.clone()
    }
}

impl fmt::Debug for PatchDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("hooks", &self.hooks)
            .finish()
    }
}
