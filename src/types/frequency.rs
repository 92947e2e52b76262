// src/types/frequency.rs
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Presence counts per category: how many records mention each entry.
///
/// Sparse: an entry exists only once its count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: BTreeMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record: every distinct key is incremented exactly once
    pub fn record_presence<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let distinct: BTreeSet<String> = keys.into_iter().map(Into::into).collect();
        for key in distinct {
            *self.counts.entry(key).or_insert(0) += 1;
        }
    }

    /// Per-key addition; order of merges does not affect the result
    pub fn merge(mut self, other: FrequencyTable) -> FrequencyTable {
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
        self
    }

    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// Entries by descending count, ties broken alphabetically
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut entries: Vec<(String, usize)> = self
            .counts
            .iter()
            .map(|(key, count)| (key.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_is_counted_once_per_record() {
        let mut table = FrequencyTable::new();
        table.record_presence(["python", "python", "sql"]);
        table.record_presence(["python"]);

        assert_eq!(table.get("python"), 2);
        assert_eq!(table.get("sql"), 1);
        assert_eq!(table.get("sas"), 0);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_record_leaves_table_sparse() {
        let mut table = FrequencyTable::new();
        table.record_presence(Vec::<String>::new());
        assert!(table.is_empty());
    }

    #[test]
    fn test_merge_is_order_independent() {
        let mut a = FrequencyTable::new();
        a.record_presence(["gcp", "gmp"]);
        let mut b = FrequencyTable::new();
        b.record_presence(["gmp", "pmp"]);

        let ab = a.clone().merge(b.clone());
        let ba = b.merge(a);
        assert_eq!(ab, ba);
        assert_eq!(ab.get("gmp"), 2);
    }

    #[test]
    fn test_ranked_orders_by_count_then_name() {
        let mut table = FrequencyTable::new();
        table.record_presence(["b", "a", "c"]);
        table.record_presence(["c"]);

        let ranked = table.ranked();
        assert_eq!(
            ranked,
            vec![
                ("c".to_string(), 2),
                ("a".to_string(), 1),
                ("b".to_string(), 1)
            ]
        );
    }
}
