//! Ordered, id-unique collection of merged artworks
//!
//! Entries are kept sorted by `(year, first-insertion sequence)`. Merging an
//! id that is already present keeps its original sequence number, so equal
//! years never trade places as results stream in.

use ahash::{AHashMap, AHashSet};

use crate::artwork::Artwork;
use crate::collection::ObjectId;

#[derive(Debug, Clone)]
struct Entry {
    sequence: u64,
    artwork: Artwork,
}

impl Entry {
    fn sort_key(&self) -> (i32, u64) {
        (self.artwork.year, self.sequence)
    }
}

/// Result of merging one artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Replaced,
    /// Identical artwork already present
    Unchanged,
}

#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    entries: Vec<Entry>,
    sequences: AHashMap<ObjectId, u64>,
    next_sequence: u64,
}

impl ResultSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `artwork`, or replace the entry with the same id
    pub fn merge(&mut self, artwork: Artwork) -> MergeOutcome {
        let existing = self
            .sequences
            .get(&artwork.id)
            .copied()
            .zip(self.position(artwork.id));

        let (sequence, outcome) = match existing {
            Some((sequence, position)) => {
                if self.entries[position].artwork == artwork {
                    return MergeOutcome::Unchanged;
                }
                self.entries.remove(position);
                (sequence, MergeOutcome::Replaced)
            }
            None => {
                let sequence = self.next_sequence;
                self.next_sequence += 1;
                self.sequences.insert(artwork.id, sequence);
                (sequence, MergeOutcome::Inserted)
            }
        };

        let entry = Entry { sequence, artwork };
        let key = entry.sort_key();
        let at = self.entries.partition_point(|e| e.sort_key() < key);
        self.entries.insert(at, entry);
        outcome
    }

    /// Drop every artwork whose id is not in `keep`; returns how many went
    pub fn retain_ids(&mut self, keep: &AHashSet<ObjectId>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| keep.contains(&e.artwork.id));
        self.sequences.retain(|id, _| keep.contains(id));
        before - self.entries.len()
    }

    /// Number of entries whose id is in `ids`
    #[must_use]
    pub fn count_in(&self, ids: &AHashSet<ObjectId>) -> usize {
        self.entries
            .iter()
            .filter(|e| ids.contains(&e.artwork.id))
            .count()
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&Artwork> {
        self.position(id).map(|position| &self.entries[position].artwork)
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.sequences.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artwork> {
        self.entries.iter().map(|e| &e.artwork)
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ObjectId> {
        self.iter().map(|a| a.id).collect()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Artwork> {
        self.iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.sequences.clear();
    }

    fn position(&self, id: ObjectId) -> Option<usize> {
        self.entries.iter().position(|e| e.artwork.id == id)
    }
}
