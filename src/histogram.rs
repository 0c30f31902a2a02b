//! Frequency histogram over composite n-gram keys.

use crate::tracer::TraceError;
use alloc::{string::String, vec::Vec};
use alloy_primitives::map::HashMap;

/// Mapping from n-gram key to occurrence count.
///
/// Keys are created lazily on first occurrence with count 1. The histogram
/// is the sole artifact a trace produces; it is handed to the caller
/// unchanged by [`finalize`](crate::tracer::OpcodeTracer::finalize).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Histogram {
    counts: HashMap<String, u64>,
}

impl Histogram {
    /// Creates an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for `key`, inserting it at 1 when absent.
    ///
    /// Fails with [`TraceError::CounterOverflow`] when the count would
    /// exceed [`u64::MAX`].
    pub fn increment(&mut self, key: String) -> Result<(), TraceError> {
        let count = self.counts.entry(key).or_insert(0);
        *count = count.checked_add(1).ok_or(TraceError::CounterOverflow)?;
        Ok(())
    }

    /// Returns the count recorded for `key`.
    pub fn get(&self, key: &str) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no key has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(key, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// Returns a reference to the underlying counts.
    pub const fn counts(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    /// Consumes the histogram, returning the underlying counts.
    pub fn into_inner(self) -> HashMap<String, u64> {
        self.counts
    }

    /// Returns the `k` most frequent n-grams, largest count first.
    ///
    /// Ties are broken by key so the order is deterministic.
    pub fn top(&self, k: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(k);
        entries
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Histogram {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self { counts: iter.into_iter().map(|(key, count)| (key.into(), count)).collect() }
    }
}
