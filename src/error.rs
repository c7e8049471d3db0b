use std::path::PathBuf;
use thiserror::Error;

use crate::driver::Driver;

#[derive(Debug, Error)]
pub enum ConnfigError {
    #[error("Config file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    #[error("Unable to read config file '{path}': permission denied")]
    PermissionDenied { path: PathBuf },

    #[error("No supported source format for '{path}'")]
    UnsupportedSourceType { path: PathBuf },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid connection '{connection}', key '{key}': {reason}")]
    Validation {
        connection: String,
        key: String,
        reason: String,
    },

    #[error("Connection '{connection}' does not specify a supported driver (got {driver:?})")]
    DriverNotSupported { connection: String, driver: String },

    #[error("Unknown attribute constant '{name}' in connection '{connection}'")]
    UnknownAttributeConstant { connection: String, name: String },

    #[error("No connection named '{0}' in the loaded configuration")]
    ConnectionNotFound(String),

    #[error("No DSN rendering rule for driver '{0}'")]
    UnsupportedDriverForDsn(Driver),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Error returned by [`ProfileStore::create_connection`](crate::ProfileStore::create_connection).
///
/// Failures from the injected [`Connector`](crate::Connector) propagate
/// unwrapped as `Driver`; everything else (unknown connection, DSN rendering)
/// surfaces as the usual [`ConnfigError`].
#[derive(Debug, Error)]
pub enum ConnectError<E: std::error::Error> {
    #[error(transparent)]
    Profile(#[from] ConnfigError),

    #[error(transparent)]
    Driver(E),
}
