//! Checkpoint and resume of a machine's runtime position.
//!
//! A checkpoint records where a subject is and how it got there: the
//! current state name and the transition history. The state graph and the
//! hooks are not part of it; a resumed process rebuilds them in code and
//! then calls [`crate::machine::StateMachine::restore`] before booting.

use crate::core::TransitionHistory;
use crate::subject::MachineId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a booted machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// Machine the checkpoint was taken from
    pub machine_id: MachineId,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Subject type tag the machine expected
    pub subject_type: String,

    /// Name of the state the subject was in
    pub current_state: String,

    /// Committed transitions up to the checkpoint
    pub history: TransitionHistory,
}

impl Checkpoint {
    pub(crate) fn capture(
        machine_id: MachineId,
        subject_type: &str,
        current_state: &str,
        history: TransitionHistory,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            machine_id,
            timestamp: Utc::now(),
            subject_type: subject_type.to_string(),
            current_state: current_state.to_string(),
            history,
        }
    }

    /// Fail unless this build understands the checkpoint's format.
    pub fn verify_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)?;
        checkpoint.verify_version()?;
        Ok(checkpoint)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)?;
        checkpoint.verify_version()?;
        Ok(checkpoint)
    }
}
