//! Command line and configuration layer.
//!
//! A host binary gets a ready-to-use [`BasicDataStore`] from its command line:
//!
//! ```rust,no_run
//! use simstore::runner::run_with_args;
//! use simstore::{DataStoreWrite, EntityId, Timestamp};
//!
//! let store = run_with_args(|store, _args, _| {
//!     store.put_static_persistent("Scenario/Name", "highway")?;
//!     store.put_cyclic(Timestamp(0), EntityId(0), "Velocity", 13.9)?;
//!     Ok(())
//! })
//! .unwrap();
//! ```
//!
//! Hosts with their own arguments define a clap `Args` struct and use [`run_with_custom_args`];
//! their arguments are parsed from the same command line as [`RunArgs`].

use std::path::PathBuf;

use clap::{ArgMatches, Args, Command, FromArgMatches as _};
use log::info;

use crate::basic_data_store::BasicDataStore;
use crate::error::DataStoreError;
use crate::log::{set_log_level, set_module_filters, LevelFilter};
use crate::run_info::RunInformation;

/// Default cli arguments for a data store run
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct RunArgs {
    /// Optional path to a JSON file with run information
    #[arg(long)]
    pub run_info: Option<PathBuf>,

    /// Optional output directory; overrides the one in the run information
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Optional run id; overrides the one in the run information
    #[arg(long)]
    pub run_id: Option<u64>,

    /// Global log level: off, error, warn, info, debug or trace
    #[arg(long, value_parser = parse_log_level)]
    pub log_level: Option<LevelFilter>,

    /// Log level for a single module as `<module>=<level>`. May be repeated
    #[arg(long = "log-module", value_parser = parse_module_filter)]
    pub log_modules: Vec<(String, LevelFilter)>,
}

#[derive(Args)]
pub struct PlaceholderCustom {}

/// The command line of a data store run. Host binaries can augment it with their own `Args`.
#[must_use]
pub fn create_cli() -> Command {
    let cli = Command::new("simstore");
    RunArgs::augment_args(cli)
}

/// Parses a log level name, ignoring case.
///
/// # Errors
///
/// Returns [`DataStoreError::ArgumentError`] if `level` is not a known level name.
pub fn parse_log_level(level: &str) -> Result<LevelFilter, DataStoreError> {
    level
        .parse::<LevelFilter>()
        .map_err(|_| DataStoreError::ArgumentError(format!("unknown log level '{level}'")))
}

/// Parses a `<module>=<level>` log filter.
///
/// # Errors
///
/// Returns [`DataStoreError::ArgumentError`] if the `=` is missing, the module is empty or the
/// level is not a known level name.
pub fn parse_module_filter(filter: &str) -> Result<(String, LevelFilter), DataStoreError> {
    let Some((module, level)) = filter.split_once('=') else {
        return Err(DataStoreError::ArgumentError(format!(
            "expected <module>=<level>, found '{filter}'"
        )));
    };
    if module.is_empty() {
        return Err(DataStoreError::ArgumentError(format!(
            "missing module in log filter '{filter}'"
        )));
    }
    Ok((module.to_string(), parse_log_level(level)?))
}

impl RunArgs {
    /// Extracts the arguments from matches of a command built with [`create_cli`].
    ///
    /// # Errors
    ///
    /// Returns [`DataStoreError::ArgumentError`] if the matches do not contain valid arguments.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, DataStoreError> {
        Ok(Self::from_arg_matches(matches)?)
    }

    /// Loads the run information named by `--run-info` (or the default) and applies the
    /// command line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the run information file cannot be read or parsed.
    pub fn run_information(&self) -> Result<RunInformation, DataStoreError> {
        let mut run_information = match &self.run_info {
            Some(path) => {
                info!("Loading run information from: {}", path.display());
                RunInformation::from_json_file(path)?
            }
            None => RunInformation::default(),
        };

        if let Some(output_dir) = &self.output_dir {
            run_information = run_information.with_output_dir(output_dir);
        }
        if let Some(run_id) = self.run_id {
            run_information = run_information.with_run_id(run_id);
        }
        Ok(run_information)
    }

    /// Configures logging and creates a store for the described run.
    ///
    /// # Errors
    ///
    /// Returns an error if the run information cannot be loaded.
    pub fn apply(&self) -> Result<BasicDataStore, DataStoreError> {
        if let Some(level) = self.log_level {
            set_log_level(level);
        }
        if !self.log_modules.is_empty() {
            set_module_filters(&self.log_modules);
        }

        Ok(BasicDataStore::new(self.run_information()?))
    }
}

/// Creates a store from the command line, including custom arguments, and hands it to `setup_fn`.
///
/// # Errors
///
/// Returns an error if argument parsing, loading the run information or `setup_fn` fails.
pub fn run_with_custom_args<A, F>(setup_fn: F) -> Result<BasicDataStore, DataStoreError>
where
    A: Args,
    F: FnOnce(&mut BasicDataStore, RunArgs, Option<A>) -> Result<(), DataStoreError>,
{
    let cli = A::augment_args(create_cli());
    let matches = cli.get_matches();

    let args = RunArgs::from_matches(&matches)?;
    let custom_args = A::from_arg_matches(&matches)?;
    run_with_args_internal(args, Some(custom_args), setup_fn)
}

/// Creates a store from the command line and hands it to `setup_fn`.
///
/// # Errors
///
/// Returns an error if argument parsing, loading the run information or `setup_fn` fails.
pub fn run_with_args<F>(setup_fn: F) -> Result<BasicDataStore, DataStoreError>
where
    F: FnOnce(&mut BasicDataStore, RunArgs, Option<PlaceholderCustom>) -> Result<(), DataStoreError>,
{
    let matches = create_cli().get_matches();

    let args = RunArgs::from_matches(&matches)?;
    run_with_args_internal(args, None, setup_fn)
}

fn run_with_args_internal<A, F>(
    args: RunArgs,
    custom_args: Option<A>,
    setup_fn: F,
) -> Result<BasicDataStore, DataStoreError>
where
    F: FnOnce(&mut BasicDataStore, RunArgs, Option<A>) -> Result<(), DataStoreError>,
{
    let mut store = args.apply()?;
    setup_fn(&mut store, args, custom_args)?;
    Ok(store)
}
