//! Insertion-ordered keyed storage for states and transitions.

use std::collections::HashMap;

/// Map that iterates in first-insertion order.
///
/// Re-inserting an existing key replaces the value in place, keeping its
/// original position. Initial-state scanning and transition binding both
/// depend on this order.
#[derive(Clone, Debug)]
pub(crate) struct Registry<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V> Registry<V> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, returning the previous value for the key.
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    /// Comma separated keys, for error messages.
    pub(crate) fn key_list(&self) -> String {
        self.keys().collect::<Vec<_>>().join(",")
    }
}
