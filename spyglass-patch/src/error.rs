//! Error types for the interception layer.

use spyglass_host::ResolutionError;
use thiserror::Error;

/// Failure reported by the patch backend itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallError {
    #[error("dispatch slot {slot:#x} is already patched")]
    Conflict { slot: u32 },

    #[error("backend rejected the patch: {reason}")]
    Rejected { reason: String },

    #[error("unknown backend handle {handle}")]
    UnknownHandle { handle: u64 },
}

/// Failure at the registry/applier level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// Host version drift: the target method signature cannot be bound.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("failed to install patch '{label}': {source}")]
    Install {
        label: &'static str,
        source: InstallError,
    },

    /// A handle was used after its install was reverted.
    #[error("stale patch handle {handle}: its install is no longer valid")]
    StaleHandle { handle: u64 },
}
