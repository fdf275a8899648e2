//! Metadata about the current simulation run.
//!
//! The store does not interpret this information. It is handed to the store at construction so
//! that consumers holding only a read capability can find out which run produced the data (e.g.
//! where an exporter should write its output).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DataStoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunInformation {
    /// Version of the framework that produced the run.
    pub version: String,
    /// Identifies the run within an invocation (e.g. the Monte-Carlo invocation number).
    pub run_id: u64,
    pub output_dir: PathBuf,
    pub input_dir: PathBuf,
    pub config_dir: PathBuf,
}

impl Default for RunInformation {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            run_id: 0,
            output_dir: PathBuf::new(),
            input_dir: PathBuf::new(),
            config_dir: PathBuf::new(),
        }
    }
}

impl RunInformation {
    /// Parses run information from a JSON document. Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`DataStoreError::JsonError`] if the document is not valid.
    pub fn from_json_str(json: &str) -> Result<Self, DataStoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads run information from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DataStoreError::IoError`] if the file cannot be read and
    /// [`DataStoreError::JsonError`] if its contents are not valid.
    pub fn from_json_file(path: &Path) -> Result<Self, DataStoreError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    #[must_use]
    pub fn with_run_id(mut self, run_id: u64) -> Self {
        self.run_id = run_id;
        self
    }
}
