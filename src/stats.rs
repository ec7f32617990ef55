//! Play and win counters keyed by [`Fingerprint`].
//!
//! The store lives for one move decision. Entries are only ever created by
//! [`StatsStore::record_new`]; updates to fingerprints that were never recorded
//! are ignored. Iteration follows recording order, which gives the decision
//! step a stable tie-break.

use std::collections::HashMap;
use std::hash::Hash;

use crate::fingerprint::Fingerprint;

/// Statistics for one fingerprint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    /// Number of simulations that visited this fingerprint.
    pub plays: u32,
    /// +1 per sole win, -1 per sole loss of the fingerprint's mover.
    pub wins: i32,
}

impl Entry {
    /// `wins / plays`, or `None` before the first play.
    #[inline]
    pub fn win_rate(&self) -> Option<f64> {
        if self.plays > 0 {
            Some(f64::from(self.wins) / f64::from(self.plays))
        } else {
            None
        }
    }
}

/// Insertion-ordered map from fingerprint to [`Entry`].
#[derive(Debug)]
pub struct StatsStore<P: Ord + Hash> {
    index: HashMap<Fingerprint<P>, usize>,
    entries: Vec<(Fingerprint<P>, Entry)>,
}

impl<P: Ord + Hash> Default for StatsStore<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Ord + Hash> StatsStore<P> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn get(&self, fp: &Fingerprint<P>) -> Option<&Entry> {
        self.index.get(fp).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, fp: &Fingerprint<P>) -> bool {
        self.index.contains_key(fp)
    }

    /// Insert a zeroed entry if `fp` is absent. Returns whether it was inserted.
    pub fn record_new(&mut self, fp: Fingerprint<P>) -> bool
    where
        P: Clone,
    {
        if self.index.contains_key(&fp) {
            return false;
        }
        self.index.insert(fp.clone(), self.entries.len());
        self.entries.push((fp, Entry::default()));
        true
    }

    /// No-op for unrecorded fingerprints.
    pub fn increment_plays(&mut self, fp: &Fingerprint<P>) {
        if let Some(entry) = self.get_mut(fp) {
            entry.plays += 1;
        }
    }

    /// No-op for unrecorded fingerprints.
    pub fn adjust_wins(&mut self, fp: &Fingerprint<P>, delta: i32) {
        if let Some(entry) = self.get_mut(fp) {
            entry.wins += delta;
        }
    }

    /// Entries in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint<P>, &Entry)> {
        self.entries.iter().map(|(fp, e)| (fp, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_mut(&mut self, fp: &Fingerprint<P>) -> Option<&mut Entry> {
        let i = *self.index.get(fp)?;
        Some(&mut self.entries[i].1)
    }
}
