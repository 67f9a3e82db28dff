//! Grouped counts

use docsift_domain::Memory;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Counts per distinct key, in first-encountered order until sorted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counts<K> {
    entries: Vec<(K, usize)>,
}

impl<K: Eq + Hash + Clone> Counts<K> {
    /// Tally keys in iteration order
    pub fn tally<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut entries: Vec<(K, usize)> = Vec::new();
        for key in keys {
            match index.get(&key) {
                Some(&slot) => entries[slot].1 += 1,
                None => {
                    index.insert(key.clone(), entries.len());
                    entries.push((key, 1));
                }
            }
        }
        Self { entries }
    }
}

impl<K> Counts<K> {
    /// Sort by count, highest first; equal counts keep first-encountered order
    pub fn sorted_desc(mut self) -> Self {
        // sort_by is stable
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self
    }

    /// The first `n` entries
    pub fn top(&self, n: usize) -> &[(K, usize)] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// All entries
    pub fn entries(&self) -> &[(K, usize)] {
        &self.entries
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys were counted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

impl<K: PartialEq> Counts<K> {
    /// Count recorded for `key`
    pub fn get(&self, key: &K) -> Option<usize> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, count)| *count)
    }
}

/// Memories per `data_type`, highest count first; memories without a type are
/// not counted
pub fn count_by_data_type(memories: &[Memory]) -> Counts<String> {
    Counts::tally(memories.iter().filter_map(|m| m.data_type.clone())).sorted_desc()
}

/// Memories per player, highest count first, ties by first occurrence
pub fn count_by_player(memories: &[Memory]) -> Counts<String> {
    Counts::tally(memories.iter().map(|m| m.player_id.clone())).sorted_desc()
}
