//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while encoding, decoding or restoring a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// JSON encoding or decoding failed
    #[error("JSON checkpoint codec failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encoding or decoding failed
    #[error("Binary checkpoint codec failed: {0}")]
    Binary(#[from] bincode::Error),

    /// Checkpoint format is newer or older than this build understands
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint was taken for a different kind of subject
    #[error("Checkpoint was taken for subject type {found}, machine expects {expected}")]
    SubjectMismatch { expected: String, found: String },

    /// Subject is persisted in a different state than the checkpoint
    #[error("Subject is in state ({persisted}) but the checkpoint was taken in ({checkpoint})")]
    StateMismatch { persisted: String, checkpoint: String },

    /// Checkpoint names a state the machine does not define
    #[error("Checkpoint state ({0}) is not part of the StateMachine")]
    UnknownState(String),
}
