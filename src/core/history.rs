//! Append-only history of committed transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use uuid::Uuid;

use super::transition::Transition;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Transition, TransitionRecord};
///
/// let record = TransitionRecord::now(&Transition::new("new", "paid"));
///
/// assert_eq!(record.transition, "new_paid");
/// assert_eq!(record.from, "new");
/// assert_eq!(record.to, "paid");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Unique identifier of this record
    pub id: Uuid,
    /// Name of the transition that was taken
    pub transition: String,
    /// The state being transitioned from
    pub from: String,
    /// The state being transitioned to
    pub to: String,
    /// When the new state was committed
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Record `transition` as committed at the current instant.
    pub fn now(transition: &Transition) -> Self {
        Self {
            id: Uuid::new_v4(),
            transition: transition.name().to_string(),
            from: transition.from().to_string(),
            to: transition.to().to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of committed transitions.
///
/// Records are only ever appended. When a limit is given to
/// [`TransitionHistory::record_bounded`], the oldest records are dropped.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Transition, TransitionHistory, TransitionRecord};
///
/// let mut history = TransitionHistory::new();
/// history.record(TransitionRecord::now(&Transition::new("new", "paid")));
/// history.record(TransitionRecord::now(&Transition::new("paid", "shipped")));
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.path(), ["new", "paid", "shipped"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionHistory {
    records: VecDeque<TransitionRecord>,
}

impl TransitionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn record(&mut self, record: TransitionRecord) {
        self.records.push_back(record);
    }

    /// Append a record, keeping at most `limit` of the newest ones.
    pub fn record_bounded(&mut self, record: TransitionRecord, limit: Option<usize>) {
        self.records.push_back(record);
        if let Some(limit) = limit {
            while self.records.len() > limit {
                self.records.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&TransitionRecord> {
        self.records.front()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// All records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    /// States traversed: the source of the first record, then the
    /// destination of every record.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.records.iter().map(|record| record.to.as_str()));
        path
    }

    /// Time between the first and last record, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: &str, to: &str) -> TransitionRecord {
        TransitionRecord::now(&Transition::new(from, to))
    }

    #[test]
    fn new_history_is_empty() {
        let history = TransitionHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.first().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_appends_in_order() {
        let mut history = TransitionHistory::new();
        history.record(record("new", "paid"));
        history.record(record("paid", "shipped"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.first().unwrap().transition, "new_paid");
        assert_eq!(history.last().unwrap().transition, "paid_shipped");
    }

    #[test]
    fn path_returns_state_sequence() {
        let mut history = TransitionHistory::new();
        history.record(record("new", "paid"));
        history.record(record("paid", "shipped"));

        assert_eq!(history.path(), ["new", "paid", "shipped"]);
    }

    #[test]
    fn bounded_record_drops_oldest() {
        let mut history = TransitionHistory::new();
        history.record_bounded(record("a", "b"), Some(2));
        history.record_bounded(record("b", "c"), Some(2));
        history.record_bounded(record("c", "d"), Some(2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.path(), ["b", "c", "d"]);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = TransitionHistory::new();
        history.record(record("new", "paid"));

        std::thread::sleep(std::time::Duration::from_millis(10));

        history.record(record("paid", "shipped"));

        let duration = history.duration().unwrap();
        assert!(duration >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn records_get_distinct_ids() {
        let first = record("new", "paid");
        let second = record("new", "paid");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = TransitionHistory::new();
        history.record(record("new", "paid"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: TransitionHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
