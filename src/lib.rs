//! An in-memory data store for agent-based traffic simulations
//!
//! Simulation components publish three kinds of information while a run executes:
//! * _cyclics_: one value per timestamp, entity and topic, e.g. the velocity of agent 3 at 100 ms
//! * _acyclics_: events such as a collision, naming the entities that triggered and were
//!   affected by them along with a parameter set
//! * _statics_: run-level information such as the scenario name, written once
//!
//! Topics are hierarchical keys like `"Vehicle/Sensors/Radar/Range"`. Consumers query them with
//! optional timestamp and entity filters, using `*` to match any single key token, and can
//! explore what is stored with [`DataStoreRead::get_keys`]:
//!
//! ```rust
//! use simstore::{BasicDataStore, DataStoreRead, DataStoreWrite, EntityId, Timestamp, Value};
//!
//! let mut store = BasicDataStore::default();
//! store.put_static("Scenario/Name", "highway").unwrap();
//! store.put_cyclic(Timestamp(0), EntityId(1), "Velocity", 13.9).unwrap();
//! store.put_cyclic(Timestamp(100), EntityId(1), "Velocity", 14.2).unwrap();
//!
//! let result = store.get_cyclic(None, Some(EntityId(1)), "Velocity");
//! assert_eq!(result.len(), 2);
//! assert_eq!(result.at(1).value, Value::Double(14.2));
//! assert_eq!(store.get_keys("Cyclics"), vec!["0", "100"]);
//! ```
//!
//! Producers and consumers depend on the capability they need, [`DataStoreWrite`] or
//! [`DataStoreRead`], rather than on a concrete store. [`BasicDataStore`] is the provided
//! implementation. A store belongs to a single run; [`DataStoreWrite::clear`] resets it for the
//! next run while keeping static information written as persistent.
pub mod acyclic;
pub mod basic_data_store;
pub mod data_store;
pub mod error;
pub mod hashing;
pub mod ids;
pub mod index;
pub mod key;
pub mod log;
pub mod result;
pub mod row;
pub mod run_info;
pub mod runner;
pub mod value;

pub use acyclic::{Acyclic, AffectedEntities, TriggeringEntities};
pub use basic_data_store::{BasicDataStore, StaticEntry, StoreStatistics};
pub use data_store::{DataStore, DataStoreRead, DataStoreWrite};
pub use error::DataStoreError;
pub use hashing::{HashMap, HashMapExt};
pub use ids::{EntityId, Timestamp};
pub use key::{SEPARATOR, WILDCARD};
pub use result::{AcyclicResult, CyclicResult, ResultView, RowHandle};
pub use row::{AcyclicRow, CyclicRow, Row};
pub use run_info::RunInformation;
pub use runner::{create_cli, run_with_args, run_with_custom_args, RunArgs};
pub use value::{Parameter, Value, ValueKind};
