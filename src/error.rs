use std::fmt::{self, Debug, Display};
use std::io;

/// Provides `DataStoreError` and maps to other errors to
/// convert to a `DataStoreError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum DataStoreError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    /// A write was rejected because its key is not a valid stored key.
    InvalidKey {
        key: String,
        reason: String,
    },
    ArgumentError(String),
    DataStoreError(String),
}

impl From<io::Error> for DataStoreError {
    fn from(error: io::Error) -> Self {
        DataStoreError::IoError(error)
    }
}

impl From<serde_json::Error> for DataStoreError {
    fn from(error: serde_json::Error) -> Self {
        DataStoreError::JsonError(error)
    }
}

impl From<clap::Error> for DataStoreError {
    fn from(error: clap::Error) -> Self {
        DataStoreError::ArgumentError(error.to_string())
    }
}

impl From<String> for DataStoreError {
    fn from(error: String) -> Self {
        DataStoreError::DataStoreError(error)
    }
}

impl From<&str> for DataStoreError {
    fn from(error: &str) -> Self {
        DataStoreError::DataStoreError(error.to_string())
    }
}

impl std::error::Error for DataStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataStoreError::IoError(error) => Some(error),
            DataStoreError::JsonError(error) => Some(error),
            _ => None,
        }
    }
}

impl Display for DataStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataStoreError::InvalidKey { key, reason } => {
                write!(f, "Error: invalid key '{key}': {reason}")
            }
            DataStoreError::ArgumentError(message) | DataStoreError::DataStoreError(message) => {
                write!(f, "Error: {message}")
            }
            _ => write!(f, "Error: {self:?}"),
        }
    }
}
