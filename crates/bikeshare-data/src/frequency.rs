//! Frequency counting with a deterministic tie-break.
//!
//! When several values share the highest count, the one that occurs first in
//! the input wins. `value_counts` orders by count descending and keeps
//! first-occurrence order among equal counts.

use std::collections::HashMap;
use std::hash::Hash;

/// Count every distinct value, most frequent first.
pub fn value_counts<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for value in values {
        match slots.get(&value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    // Stable sort: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The most frequent value, or `None` for empty input.
pub fn mode<K, I>(values: I) -> Option<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    value_counts(values).into_iter().next().map(|(value, _)| value)
}
