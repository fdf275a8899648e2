//! Read and write capabilities of a data store.
//!
//! Producers (vehicle dynamics, driver models, event detectors) only need [`DataStoreWrite`];
//! observers and exporters only need [`DataStoreRead`]. Topics of cyclics, acyclics and statics
//! are independent of each other.

use crate::acyclic::Acyclic;
use crate::error::DataStoreError;
use crate::ids::{EntityId, Timestamp};
use crate::result::{AcyclicResult, CyclicResult};
use crate::run_info::RunInformation;
use crate::value::Value;

/// Root of the statics namespace in [`DataStoreRead::get_keys`].
pub const STATICS: &str = "Statics";
/// Root of the cyclics namespace in [`DataStoreRead::get_keys`].
pub const CYCLICS: &str = "Cyclics";
/// Root of the acyclics namespace in [`DataStoreRead::get_keys`].
pub const ACYCLICS: &str = "Acyclics";

/// Read-only access to a data store.
pub trait DataStoreRead {
    /// Retrieves stored cyclic rows.
    ///
    /// `timestamp` and `entity_id` narrow the result when given. `key` is matched token by token
    /// against the stored keys; `*` matches any single token and the bare `*` matches every key.
    /// Rows are returned in the order they were written.
    fn get_cyclic(
        &self,
        timestamp: Option<Timestamp>,
        entity_id: Option<EntityId>,
        key: &str,
    ) -> CyclicResult<'_>;

    /// Retrieves stored acyclic rows. Filters and key matching behave as in
    /// [`get_cyclic`](DataStoreRead::get_cyclic).
    fn get_acyclic(
        &self,
        timestamp: Option<Timestamp>,
        entity_id: Option<EntityId>,
        key: &str,
    ) -> AcyclicResult<'_>;

    /// Retrieves the static values stored under exactly `key`. Wildcards are not expanded.
    fn get_static(&self, key: &str) -> Vec<Value>;

    /// Retrieves the keys at a specific node of the store hierarchy.
    ///
    /// `key` has to start with `Statics`, `Cyclics` or `Acyclics`. For the latter two the next
    /// segments address a timestamp and an entity id before the topic key begins:
    ///
    /// ```rust
    /// # use simstore::{BasicDataStore, DataStoreRead, DataStoreWrite, EntityId, Timestamp};
    /// let mut store = BasicDataStore::default();
    /// store.put_static("Agents/3/Vehicle", "car").unwrap();
    /// store.put_cyclic(Timestamp(0), EntityId(3), "Vehicle/Sensors/Radar", 1).unwrap();
    ///
    /// assert_eq!(store.get_keys("Statics/Agents"), vec!["3"]);
    /// assert_eq!(store.get_keys("Cyclics/0/3/Vehicle/Sensors"), vec!["Radar"]);
    /// ```
    fn get_keys(&self, key: &str) -> Vec<String>;

    /// Metadata about the run this store belongs to.
    fn run_information(&self) -> &RunInformation;
}

/// Write access to a data store.
///
/// The generic `put_*` methods convert their value argument and forward to the `*_value`
/// methods, which are the ones an implementation provides.
pub trait DataStoreWrite {
    /// Writes cyclic information into the data store.
    ///
    /// # Errors
    ///
    /// Returns [`DataStoreError::InvalidKey`] if `key` is not a valid stored key. Nothing is
    /// written in that case.
    fn put_cyclic(
        &mut self,
        timestamp: Timestamp,
        entity_id: EntityId,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<(), DataStoreError>
    where
        Self: Sized,
    {
        self.put_cyclic_value(timestamp, entity_id, key, value.into())
    }

    /// Writes cyclic information into the data store.
    ///
    /// # Errors
    ///
    /// Returns [`DataStoreError::InvalidKey`] if `key` is not a valid stored key.
    fn put_cyclic_value(
        &mut self,
        timestamp: Timestamp,
        entity_id: EntityId,
        key: &str,
        value: Value,
    ) -> Result<(), DataStoreError>;

    /// Writes acyclic information into the data store.
    ///
    /// # Errors
    ///
    /// Returns [`DataStoreError::InvalidKey`] if `key` is not a valid stored key.
    fn put_acyclic(
        &mut self,
        timestamp: Timestamp,
        entity_id: EntityId,
        key: &str,
        acyclic: Acyclic,
    ) -> Result<(), DataStoreError>;

    /// Writes non-persistent static information. The first value written for a key wins.
    ///
    /// # Errors
    ///
    /// Returns [`DataStoreError::InvalidKey`] if `key` is not a valid stored key.
    fn put_static(&mut self, key: &str, value: impl Into<Value>) -> Result<(), DataStoreError>
    where
        Self: Sized,
    {
        self.put_static_value(key, value.into(), false)
    }

    /// Writes static information that survives [`clear`](DataStoreWrite::clear).
    ///
    /// # Errors
    ///
    /// Returns [`DataStoreError::InvalidKey`] if `key` is not a valid stored key.
    fn put_static_persistent(
        &mut self,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<(), DataStoreError>
    where
        Self: Sized,
    {
        self.put_static_value(key, value.into(), true)
    }

    /// Writes static information, optionally surviving [`clear`](DataStoreWrite::clear). The
    /// first value written for a key wins; later writes to the same key are ignored, whatever
    /// their `persist` flag.
    ///
    /// # Errors
    ///
    /// Returns [`DataStoreError::InvalidKey`] if `key` is not a valid stored key.
    fn put_static_value(
        &mut self,
        key: &str,
        value: Value,
        persist: bool,
    ) -> Result<(), DataStoreError>;

    /// Clears the data store contents, except persistent static data.
    fn clear(&mut self);
}

/// Read and write access to a data store.
pub trait DataStore: DataStoreRead + DataStoreWrite {}

impl<T: DataStoreRead + DataStoreWrite> DataStore for T {}
