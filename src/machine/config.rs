//! Runtime options of a state machine.

use serde::{Deserialize, Serialize};

/// Options applied to a [`crate::machine::StateMachine`].
///
/// Deserializable so embedding code can keep it next to its own settings;
/// missing fields take their defaults.
///
/// ```rust
/// use waypoint::machine::MachineConfig;
///
/// let config: MachineConfig = serde_json::from_str(r#"{ "history_limit": 50 }"#).unwrap();
///
/// assert!(config.record_history);
/// assert_eq!(config.history_limit, Some(50));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Append every committed transition to the machine's history
    pub record_history: bool,
    /// Keep only the newest records when set
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: None,
        }
    }
}

impl MachineConfig {
    /// Configuration that records no history.
    pub fn without_history() -> Self {
        Self {
            record_history: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_record_unbounded_history() {
        let config = MachineConfig::default();
        assert!(config.record_history);
        assert_eq!(config.history_limit, None);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: MachineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn without_history_disables_recording() {
        assert!(!MachineConfig::without_history().record_history);
    }
}
