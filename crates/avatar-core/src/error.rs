//! Error types for the avatar engine

use thiserror::Error;

use crate::CaptureId;

/// Core avatar errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvatarError {
    // Selection errors
    #[error("Unknown {kind} selection: {id}")]
    UnknownSelection { kind: &'static str, id: String },

    // Playback errors
    #[error("Command {command} not permitted while {state}")]
    CommandRejected {
        command: &'static str,
        state: &'static str,
    },

    // Capture errors
    #[error("Capture {0} already in progress")]
    CaptureBusy(CaptureId),

    #[error("Capture unavailable: {0}")]
    CaptureUnavailable(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("No capture in progress")]
    NotRecording,
}

/// Result type for avatar operations
pub type AvatarResult<T> = Result<T, AvatarError>;
