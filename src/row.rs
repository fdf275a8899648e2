//! Rows of the cyclic and acyclic logs.

use serde::Serialize;

use crate::acyclic::Acyclic;
use crate::ids::{EntityId, Timestamp};
use crate::key::{tokenize, Tokens};
use crate::value::Value;

/// An entry in the cyclic log: one observation of one topic for one entity at one time step.
///
/// The key is tokenized once at construction. Equality ignores the cached tokens since they are
/// derived from the key.
#[derive(Debug, Clone, Serialize)]
pub struct CyclicRow {
    /// Simulation time timestamp [ms]
    pub timestamp: Timestamp,
    /// Id of the entity (agent or object)
    pub entity_id: EntityId,
    /// Key (topic) associated with the data
    pub key: String,
    #[serde(skip)]
    pub tokens: Tokens,
    pub value: Value,
}

impl CyclicRow {
    pub fn new(
        timestamp: Timestamp,
        entity_id: EntityId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let key = key.into();
        Self {
            timestamp,
            entity_id,
            tokens: tokenize(&key),
            key,
            value: value.into(),
        }
    }
}

impl PartialEq for CyclicRow {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && self.entity_id == other.entity_id
            && self.key == other.key
            && self.value == other.value
    }
}

/// An entry in the acyclic log.
#[derive(Debug, Clone, Serialize)]
pub struct AcyclicRow {
    pub timestamp: Timestamp,
    pub entity_id: EntityId,
    pub key: String,
    #[serde(skip)]
    pub tokens: Tokens,
    pub data: Acyclic,
}

impl AcyclicRow {
    pub fn new(
        timestamp: Timestamp,
        entity_id: EntityId,
        key: impl Into<String>,
        data: Acyclic,
    ) -> Self {
        let key = key.into();
        Self {
            timestamp,
            entity_id,
            tokens: tokenize(&key),
            key,
            data,
        }
    }
}

impl PartialEq for AcyclicRow {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && self.entity_id == other.entity_id
            && self.key == other.key
            && self.data == other.data
    }
}

/// Common accessors used by the query engine for both kinds of rows.
pub trait Row {
    fn timestamp(&self) -> Timestamp;
    fn entity_id(&self) -> EntityId;
    fn tokens(&self) -> &[String];
}

macro_rules! impl_row {
    ($row:ty) => {
        impl Row for $row {
            fn timestamp(&self) -> Timestamp {
                self.timestamp
            }

            fn entity_id(&self) -> EntityId {
                self.entity_id
            }

            fn tokens(&self) -> &[String] {
                &self.tokens
            }
        }
    };
}

impl_row!(CyclicRow);
impl_row!(AcyclicRow);
