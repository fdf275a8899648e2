/*!

Secondary indices over the cyclic log.

A [`StoreIndex<K>`] is an ordered multi-valued map from an index key to the ordinal positions of
the rows carrying that key. Ordinals are appended as rows are written, so every bucket is in
ascending ordinal order, which is the log's insertion order. A row's ordinal never changes and is
never reused until the log is cleared, so index entries stay valid for the life of the run.

[`CyclicIndices`] bundles the three indices the store maintains so that a single call updates all
of them together:

| index                 | key                        | used when the query has       |
|-----------------------|----------------------------|-------------------------------|
| `by_timestamp`        | `Timestamp`                | only a timestamp              |
| `by_entity`           | `EntityId`                 | only an entity id             |
| `by_timestamp_entity` | `(Timestamp, EntityId)`    | both                          |

*/

use std::collections::BTreeMap;
use std::ops::RangeBounds;

use crate::ids::{EntityId, Timestamp};

#[derive(Debug, Clone)]
pub struct StoreIndex<K: Ord> {
    buckets: BTreeMap<K, Vec<usize>>,
    // Total number of (key, ordinal) entries across all buckets.
    entries: usize,
}

impl<K: Ord> Default for StoreIndex<K> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            entries: 0,
        }
    }
}

impl<K: Ord> StoreIndex<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the row at `ordinal` carries `key`.
    pub fn insert(&mut self, key: K, ordinal: usize) {
        let bucket = self.buckets.entry(key).or_default();
        debug_assert!(bucket.last().is_none_or(|last| *last < ordinal));
        bucket.push(ordinal);
        self.entries += 1;
    }

    /// The ordinals of all rows carrying `key`, in insertion order. Empty if there are none.
    #[must_use]
    pub fn get(&self, key: &K) -> &[usize] {
        self.buckets.get(key).map_or(&[], Vec::as_slice)
    }

    /// Iterates over the buckets whose keys fall in `range`, in key order.
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> impl Iterator<Item = (&K, &[usize])> {
        self.buckets
            .range(range)
            .map(|(key, ordinals)| (key, ordinals.as_slice()))
    }

    /// The distinct keys present in the index, ascending.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.keys()
    }

    /// Number of (key, ordinal) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.entries = 0;
    }
}

/// The three secondary indices of the cyclic log.
#[derive(Debug, Clone, Default)]
pub struct CyclicIndices {
    pub by_timestamp: StoreIndex<Timestamp>,
    pub by_entity: StoreIndex<EntityId>,
    pub by_timestamp_entity: StoreIndex<(Timestamp, EntityId)>,
}

impl CyclicIndices {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, timestamp: Timestamp, entity_id: EntityId, ordinal: usize) {
        self.by_timestamp.insert(timestamp, ordinal);
        self.by_entity.insert(entity_id, ordinal);
        self.by_timestamp_entity
            .insert((timestamp, entity_id), ordinal);
    }

    /// Ordinals of the candidate rows for the given filters, or `None` if neither filter is given
    /// and the whole log has to be scanned.
    #[must_use]
    pub fn candidates(
        &self,
        timestamp: Option<Timestamp>,
        entity_id: Option<EntityId>,
    ) -> Option<&[usize]> {
        match (timestamp, entity_id) {
            (Some(timestamp), Some(entity_id)) => {
                Some(self.by_timestamp_entity.get(&(timestamp, entity_id)))
            }
            (Some(timestamp), None) => Some(self.by_timestamp.get(&timestamp)),
            (None, Some(entity_id)) => Some(self.by_entity.get(&entity_id)),
            (None, None) => None,
        }
    }

    /// Distinct entity ids that have at least one row at `timestamp`, ascending.
    pub fn entities_at(&self, timestamp: Timestamp) -> impl Iterator<Item = EntityId> + '_ {
        self.by_timestamp_entity
            .range((timestamp, EntityId::MIN)..=(timestamp, EntityId::MAX))
            .map(|((_, entity_id), _)| *entity_id)
    }

    pub fn clear(&mut self) {
        self.by_timestamp.clear();
        self.by_entity.clear();
        self.by_timestamp_entity.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_timestamp.is_empty()
            && self.by_entity.is_empty()
            && self.by_timestamp_entity.is_empty()
    }
}
