//! The closed set of supported database drivers.
//!
//! Each variant carries exactly two pieces of behavior: the key schema the
//! validator enforces and the DSN-rendering rule. Adding a driver means adding
//! one variant, one [`Schema`] row, and one arm in [`Driver::render_dsn`] —
//! nothing else in the crate changes.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ConnfigError;

/// A supported database driver.
///
/// The wire tokens (accepted in config files and used as DSN prefixes) follow
/// PDO convention: `pgsql`, `sqlite`, `sqlsrv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Postgres,
    Sqlite,
    SqlServer,
}

/// Permitted keys for one driver, checked as an exact set: a key that is
/// neither required nor optional fails validation.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl Schema {
    pub fn permits(&self, key: &str) -> bool {
        self.required.contains(&key) || self.optional.contains(&key)
    }
}

impl Driver {
    /// Parse a config-file driver token.
    pub fn from_token(token: &str) -> Option<Driver> {
        match token {
            "pgsql" => Some(Driver::Postgres),
            "sqlite" => Some(Driver::Sqlite),
            "sqlsrv" => Some(Driver::SqlServer),
            _ => None,
        }
    }

    /// The config-file token and DSN prefix for this driver.
    pub fn token(&self) -> &'static str {
        match self {
            Driver::Postgres => "pgsql",
            Driver::Sqlite => "sqlite",
            Driver::SqlServer => "sqlsrv",
        }
    }

    /// The exact key set a profile for this driver may contain.
    pub fn schema(&self) -> Schema {
        match self {
            Driver::Postgres => Schema {
                required: &["driver"],
                optional: &["host", "port", "dbname", "username", "password", "attribute"],
            },
            Driver::Sqlite => Schema {
                required: &["driver", "path"],
                optional: &["attribute"],
            },
            Driver::SqlServer => Schema {
                required: &["driver", "server", "Database", "username"],
                optional: &["password", "attribute"],
            },
        }
    }

    /// Render the driver-specific DSN from normalized `dsn_params`.
    ///
    /// Values are interpolated verbatim, in insertion order — no escaping or
    /// quoting is performed. Drivers without a rendering rule fail with
    /// [`ConnfigError::UnsupportedDriverForDsn`] rather than guessing a
    /// generic format.
    pub fn render_dsn(&self, dsn_params: &IndexMap<String, String>) -> Result<String, ConnfigError> {
        match self {
            Driver::Postgres => {
                let fields: Vec<String> = dsn_params
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect();
                Ok(format!("{}:{}", self.token(), fields.join(";")))
            }
            Driver::Sqlite => {
                // Guaranteed present by validation; guard anyway so a
                // hand-built profile gets a diagnosable error.
                let path = dsn_params
                    .get("path")
                    .ok_or_else(|| ConnfigError::Validation {
                        connection: String::new(),
                        key: "path".into(),
                        reason: "sqlite profile has no path".into(),
                    })?;
                Ok(format!("{}:{}", self.token(), path))
            }
            Driver::SqlServer => Err(ConnfigError::UnsupportedDriverForDsn(*self)),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
