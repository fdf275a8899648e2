/*!

A basic, in-process implementation of the data store.

Cyclic and acyclic rows are appended to plain vectors. A row's position in its vector (its
_ordinal_) is assigned once and never changes until [`clear`](DataStoreWrite::clear), which makes
ordinals usable as index entries and as the payload of result views.

Cyclic queries go through the cheapest applicable [`CyclicIndices`] bucket:

| timestamp | entity id | candidates                         |
|-----------|-----------|------------------------------------|
| given     | given     | `(timestamp, entity id)` bucket    |
| given     | -         | timestamp bucket                   |
| -         | given     | entity id bucket                   |
| -         | -         | whole log                          |

and are then narrowed by matching the query key against each candidate's cached tokens. Acyclic
rows are far less frequent; they are not indexed and queries scan the log applying the same
filters.

The store is owned by exactly one run and has no internal synchronization. Parallel runs use
separate instances.

*/

use std::collections::BTreeSet;

use log::{debug, trace, warn};
use serde::Serialize;

use crate::acyclic::Acyclic;
use crate::data_store::{DataStoreRead, DataStoreWrite, ACYCLICS, CYCLICS, STATICS};
use crate::error::DataStoreError;
use crate::hashing::{HashMap, HashMapExt};
use crate::ids::{EntityId, Timestamp};
use crate::index::CyclicIndices;
use crate::key::{
    is_wildcard, tokenize_borrowed, tokens_match, tokens_start_with, validate_stored_key,
    SEPARATOR,
};
use crate::result::{AcyclicResult, CyclicResult, ResultView, RowHandle};
use crate::row::{AcyclicRow, CyclicRow, Row};
use crate::run_info::RunInformation;
use crate::value::Value;

/// A static value and whether it survives `clear`.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticEntry {
    pub value: Value,
    pub persistent: bool,
}

pub type StaticStore = HashMap<String, StaticEntry>;
pub type CyclicStore = Vec<CyclicRow>;
pub type AcyclicStore = Vec<AcyclicRow>;

/// A snapshot of the store's size, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStatistics {
    pub cyclic_rows: usize,
    pub acyclic_rows: usize,
    pub statics: usize,
    pub persistent_statics: usize,
    /// Distinct timestamps in the cyclic log
    pub timestamps: usize,
    /// Distinct entity ids in the cyclic log
    pub entities: usize,
    pub epoch: u64,
}

#[derive(Debug, Default)]
pub struct BasicDataStore {
    run_information: RunInformation,
    static_store: StaticStore,
    cyclic_store: CyclicStore,
    acyclic_store: AcyclicStore,
    indices: CyclicIndices,
    // Advances whenever `clear` drops rows, invalidating outstanding `RowHandle`s.
    epoch: u64,
}

impl BasicDataStore {
    pub const COMPONENT_NAME: &'static str = "BasicDataStore";

    #[must_use]
    pub fn new(run_information: RunInformation) -> Self {
        debug!(
            "creating {} for run {} (version {})",
            Self::COMPONENT_NAME,
            run_information.run_id,
            run_information.version
        );
        Self {
            run_information,
            static_store: StaticStore::new(),
            cyclic_store: CyclicStore::new(),
            acyclic_store: AcyclicStore::new(),
            indices: CyclicIndices::new(),
            epoch: 0,
        }
    }

    /// The current epoch. Row handles from another epoch no longer resolve.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn resolve_cyclic(&self, handle: RowHandle) -> Option<&CyclicRow> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.cyclic_store.get(handle.ordinal)
    }

    #[must_use]
    pub fn resolve_acyclic(&self, handle: RowHandle) -> Option<&AcyclicRow> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.acyclic_store.get(handle.ordinal)
    }

    #[must_use]
    pub fn cyclic_len(&self) -> usize {
        self.cyclic_store.len()
    }

    #[must_use]
    pub fn acyclic_len(&self) -> usize {
        self.acyclic_store.len()
    }

    #[must_use]
    pub fn static_len(&self) -> usize {
        self.static_store.len()
    }

    #[must_use]
    pub fn statistics(&self) -> StoreStatistics {
        StoreStatistics {
            cyclic_rows: self.cyclic_store.len(),
            acyclic_rows: self.acyclic_store.len(),
            statics: self.static_store.len(),
            persistent_statics: self
                .static_store
                .values()
                .filter(|entry| entry.persistent)
                .count(),
            timestamps: self.indices.by_timestamp.key_count(),
            entities: self.indices.by_entity.key_count(),
            epoch: self.epoch,
        }
    }

    fn check_key(key: &str) -> Result<(), DataStoreError> {
        validate_stored_key(key).inspect_err(|error| warn!("rejected write: {error}"))
    }

    fn static_keys(&self, path: &[&str]) -> Vec<String> {
        let mut result = BTreeSet::new();
        for stored_key in self.static_store.keys() {
            let stored_tokens = tokenize_borrowed(stored_key);
            if stored_tokens.len() > path.len() && tokens_start_with(&stored_tokens, path) {
                result.insert(stored_tokens[path.len()]);
            }
        }
        result.into_iter().map(str::to_string).collect()
    }

    fn cyclic_keys(&self, path: &[&str]) -> Option<Vec<String>> {
        match path {
            [] => Some(
                self.indices
                    .by_timestamp
                    .keys()
                    .map(ToString::to_string)
                    .collect(),
            ),
            [timestamp] => {
                let timestamp = timestamp.parse::<Timestamp>().ok()?;
                Some(
                    self.indices
                        .entities_at(timestamp)
                        .map(|entity_id| entity_id.to_string())
                        .collect(),
                )
            }
            [timestamp, entity_id, prefix @ ..] => {
                let timestamp = timestamp.parse::<Timestamp>().ok()?;
                let entity_id = entity_id.parse::<EntityId>().ok()?;
                let rows = self
                    .indices
                    .by_timestamp_entity
                    .get(&(timestamp, entity_id))
                    .iter()
                    .map(|ordinal| &self.cyclic_store[*ordinal]);
                Some(child_tokens(rows, prefix))
            }
        }
    }

    fn acyclic_keys(&self, path: &[&str]) -> Option<Vec<String>> {
        match path {
            [] => {
                let timestamps: BTreeSet<_> =
                    self.acyclic_store.iter().map(|row| row.timestamp).collect();
                Some(timestamps.iter().map(ToString::to_string).collect())
            }
            [timestamp] => {
                let timestamp = timestamp.parse::<Timestamp>().ok()?;
                let entity_ids: BTreeSet<_> = self
                    .acyclic_store
                    .iter()
                    .filter(|row| row.timestamp == timestamp)
                    .map(|row| row.entity_id)
                    .collect();
                Some(entity_ids.iter().map(ToString::to_string).collect())
            }
            [timestamp, entity_id, prefix @ ..] => {
                let timestamp = timestamp.parse::<Timestamp>().ok()?;
                let entity_id = entity_id.parse::<EntityId>().ok()?;
                let rows = self
                    .acyclic_store
                    .iter()
                    .filter(|row| row.timestamp == timestamp && row.entity_id == entity_id);
                Some(child_tokens(rows, prefix))
            }
        }
    }
}

/// Narrows `candidates` (ordinals into `log`, ascending) to the rows whose key matches `key`.
fn select_matching<R: Row>(
    log: &[R],
    candidates: impl Iterator<Item = usize>,
    key: &str,
) -> Vec<usize> {
    // The bare wildcard matches every key, whatever its length.
    if is_wildcard(key) {
        return candidates.collect();
    }

    let query = tokenize_borrowed(key);
    candidates
        .filter(|ordinal| tokens_match(&query, log[*ordinal].tokens()))
        .collect()
}

fn passes_filters<R: Row>(row: &R, timestamp: Option<Timestamp>, entity_id: Option<EntityId>) -> bool {
    timestamp.is_none_or(|timestamp| row.timestamp() == timestamp)
        && entity_id.is_none_or(|entity_id| row.entity_id() == entity_id)
}

/// The distinct tokens that directly follow `prefix` in the keys of `rows`, sorted.
fn child_tokens<'r, R: Row + 'r>(rows: impl Iterator<Item = &'r R>, prefix: &[&str]) -> Vec<String> {
    let mut result = BTreeSet::new();
    for row in rows {
        let tokens = row.tokens();
        if tokens.len() > prefix.len() && tokens_start_with(tokens, prefix) {
            result.insert(tokens[prefix.len()].as_str());
        }
    }
    result.into_iter().map(str::to_string).collect()
}

impl DataStoreRead for BasicDataStore {
    fn get_cyclic(
        &self,
        timestamp: Option<Timestamp>,
        entity_id: Option<EntityId>,
        key: &str,
    ) -> CyclicResult<'_> {
        let ordinals = match self.indices.candidates(timestamp, entity_id) {
            Some(candidates) => {
                select_matching(&self.cyclic_store, candidates.iter().copied(), key)
            }
            None => select_matching(&self.cyclic_store, 0..self.cyclic_store.len(), key),
        };
        ResultView::new(&self.cyclic_store, self.epoch, ordinals)
    }

    fn get_acyclic(
        &self,
        timestamp: Option<Timestamp>,
        entity_id: Option<EntityId>,
        key: &str,
    ) -> AcyclicResult<'_> {
        let candidates = self
            .acyclic_store
            .iter()
            .enumerate()
            .filter(|(_, row)| passes_filters(*row, timestamp, entity_id))
            .map(|(ordinal, _)| ordinal);
        let ordinals = select_matching(&self.acyclic_store, candidates, key);
        ResultView::new(&self.acyclic_store, self.epoch, ordinals)
    }

    fn get_static(&self, key: &str) -> Vec<Value> {
        // Stored keys never contain the wildcard, so a wildcard query finds nothing.
        self.static_store
            .get(key)
            .map(|entry| vec![entry.value.clone()])
            .unwrap_or_default()
    }

    fn get_keys(&self, key: &str) -> Vec<String> {
        let tokens = tokenize_borrowed(key);
        let keys = match tokens.split_first() {
            Some((&STATICS, path)) => Some(self.static_keys(path)),
            Some((&CYCLICS, path)) => self.cyclic_keys(path),
            Some((&ACYCLICS, path)) => self.acyclic_keys(path),
            _ => None,
        };

        keys.unwrap_or_else(|| {
            warn!("Using unsupported key format for get_keys() on data store: '{key}'");
            Vec::new()
        })
    }

    fn run_information(&self) -> &RunInformation {
        &self.run_information
    }
}

impl DataStoreWrite for BasicDataStore {
    fn put_cyclic_value(
        &mut self,
        timestamp: Timestamp,
        entity_id: EntityId,
        key: &str,
        value: Value,
    ) -> Result<(), DataStoreError> {
        Self::check_key(key)?;
        trace!("put cyclic {timestamp}{SEPARATOR}{entity_id}{SEPARATOR}{key} = {value}");

        let ordinal = self.cyclic_store.len();
        self.cyclic_store
            .push(CyclicRow::new(timestamp, entity_id, key, value));
        self.indices.insert(timestamp, entity_id, ordinal);
        Ok(())
    }

    fn put_acyclic(
        &mut self,
        timestamp: Timestamp,
        entity_id: EntityId,
        key: &str,
        acyclic: Acyclic,
    ) -> Result<(), DataStoreError> {
        Self::check_key(key)?;
        trace!(
            "put acyclic {timestamp}{SEPARATOR}{entity_id}{SEPARATOR}{key} = {}",
            acyclic.name
        );

        self.acyclic_store
            .push(AcyclicRow::new(timestamp, entity_id, key, acyclic));
        Ok(())
    }

    fn put_static_value(
        &mut self,
        key: &str,
        value: Value,
        persist: bool,
    ) -> Result<(), DataStoreError> {
        Self::check_key(key)?;

        if self.static_store.contains_key(key) {
            trace!("static key '{key}' already set, ignoring {value}");
        } else {
            trace!("put static {key} = {value} (persistent: {persist})");
            self.static_store.insert(
                key.to_string(),
                StaticEntry {
                    value,
                    persistent: persist,
                },
            );
        }
        Ok(())
    }

    fn clear(&mut self) {
        let dropped_rows = self.cyclic_store.len() + self.acyclic_store.len();

        self.cyclic_store.clear();
        self.indices.clear();
        self.acyclic_store.clear();
        self.static_store.retain(|_, entry| entry.persistent);

        if dropped_rows > 0 {
            self.epoch += 1;
        }

        debug!(
            "cleared {dropped_rows} rows, now {:?}",
            self.statistics()
        );
    }
}
