//! Diagnostic logging for the store.
//!
//! The store reports on its own behavior through the `log` facade: `warn!` for rejected writes
//! and unsupported `get_keys` paths, `debug!` when a store is created or cleared and `trace!` for
//! every accepted write. None of this is simulation data; results are read through
//! [`DataStoreRead`](crate::DataStoreRead).
//!
//! Nothing is printed until a level is chosen. The global level applies to every module without
//! a level of its own:
//!
//! ```rust
//! use simstore::log::{set_log_level, set_module_filter, LevelFilter};
//!
//! // Warnings from everywhere...
//! set_log_level(LevelFilter::Warn);
//! // ...and every write the store accepts.
//! set_module_filter("simstore::basic_data_store", LevelFilter::Trace);
//! ```
//!
//! A module level replaces the global level for that module and everything below it, in both
//! directions. The same settings are reachable from the command line through `--log-level` and
//! `--log-module` (see [`crate::runner`]). The macros are re-exported so host components can log
//! through the same configuration.
#[cfg(feature = "logging")]
mod standard_logger;

#[cfg(not(feature = "logging"))]
mod null_logger;

pub use log::{debug, error, info, trace, warn, LevelFilter};

use crate::hashing::{HashMap, HashMapExt};
#[cfg(feature = "logging")]
use log4rs::Handle;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

static LOG_CONFIGURATION: LazyLock<Mutex<LogConfiguration>> =
    LazyLock::new(|| Mutex::new(LogConfiguration::new()));

/// The process-wide logging setup. Loggers are global, so there is exactly one, behind
/// `LOG_CONFIGURATION`; the free functions below lock it, change it and reinstall it.
#[derive(Debug)]
pub(in crate::log) struct LogConfiguration {
    /// Level for modules without their own entry. `Off` disables logging.
    pub(in crate::log) global_level: LevelFilter,
    /// Module path to level, overriding `global_level`.
    pub(in crate::log) module_levels: HashMap<String, LevelFilter>,

    #[cfg(feature = "logging")]
    root_handle: Option<Handle>,
}

impl LogConfiguration {
    fn new() -> Self {
        Self {
            global_level: LevelFilter::Off,
            module_levels: HashMap::new(),

            #[cfg(feature = "logging")]
            root_handle: None,
        }
    }

    /// Returns true if the level of `module` changed.
    fn insert_module_level(&mut self, module: &str, level: LevelFilter) -> bool {
        self.module_levels.insert(module.to_string(), level) != Some(level)
    }

    fn update(&mut self, edit: impl FnOnce(&mut Self) -> bool) {
        if edit(self) {
            self.set_config();
        }
    }
}

/// Turns on every message. Same as `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Turns off every message from modules without their own level. Same as
/// `set_log_level(LevelFilter::Off)`.
pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

pub fn set_log_level(level: LevelFilter) {
    let mut configuration = get_log_configuration();
    configuration.global_level = level;
    // Reinstall even if unchanged, so the first call installs the logger.
    configuration.set_config();
}

pub fn set_module_filter(module_path: &str, level: LevelFilter) {
    get_log_configuration().update(|configuration| {
        configuration.insert_module_level(module_path, level)
    });
}

/// Sets several module levels, reinstalling the logger at most once.
pub fn set_module_filters<S: AsRef<str>>(module_filters: &[(S, LevelFilter)]) {
    get_log_configuration().update(|configuration| {
        module_filters.iter().fold(false, |changed, (module, level)| {
            configuration.insert_module_level(module.as_ref(), *level) | changed
        })
    });
}

/// Returns `module_path` to the global level.
pub fn remove_module_filter(module_path: &str) {
    get_log_configuration()
        .update(|configuration| configuration.module_levels.remove(module_path).is_some());
}

fn get_log_configuration() -> MutexGuard<'static, LogConfiguration> {
    // A poisoned configuration is still a valid configuration.
    LOG_CONFIGURATION
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
