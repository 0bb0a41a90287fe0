//! Error types for the audio device switch.

use thiserror::Error;

use crate::audio::{DeviceKind, LifecycleState};

#[derive(Debug, Error)]
pub enum SwitchError {
    /// The preferred device list named the same kind more than once.
    #[error("duplicate device kind in preferred list: {0}")]
    DuplicatePreferredDevice(DeviceKind),

    /// A lifecycle method was called in a state that forbids it, e.g.
    /// `activate()` while stopped. Redundant calls that are safe no-ops are
    /// only logged and never produce this error.
    #[error("{operation}() is not allowed in the {state} state")]
    InvalidState {
        operation: &'static str,
        state: LifecycleState,
    },

    /// A platform collaborator failed, e.g. audio-focus acquisition was
    /// denied. Propagated to the caller unmodified, without retries.
    #[error("platform audio error: {0}")]
    Platform(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SwitchError>;
