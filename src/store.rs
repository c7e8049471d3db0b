//! The normalized profile store and its read-only query surface.
//!
//! A [`ProfileStore`] is built once per loaded source and never mutated
//! afterwards. Lookups fail explicitly with
//! [`ConnfigError::ConnectionNotFound`] — there is no default profile. DSN
//! strings are rendered lazily, per lookup.

use indexmap::IndexMap;
use serde::Serialize;

use crate::driver::Driver;
use crate::error::{ConnectError, ConnfigError};

/// Resolved driver attributes: integer code → integer code, insertion order
/// preserved.
pub type Attributes = IndexMap<i64, i64>;

/// One normalized connection profile. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionProfile {
    pub driver: Driver,
    pub username: Option<String>,
    pub password: Option<String>,
    pub attributes: Attributes,
    /// Driver-specific connection fields (host, dbname, path, ...) in source
    /// order.
    pub dsn_params: IndexMap<String, String>,
}

impl ConnectionProfile {
    /// Render this profile's driver-specific DSN string.
    pub fn dsn(&self) -> Result<String, ConnfigError> {
        self.driver.render_dsn(&self.dsn_params)
    }
}

/// Everything a driver-native client library needs to open a connection.
#[derive(Debug)]
pub struct ConnectParams<'a> {
    pub driver: Driver,
    pub dsn: String,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    pub attributes: &'a Attributes,
}

/// Boundary to the actual database client library.
///
/// Connection establishment is not this crate's business — implement this for
/// your client of choice and pass it to
/// [`ProfileStore::create_connection`]. Errors from the client propagate
/// unwrapped as [`ConnectError::Driver`].
pub trait Connector {
    type Connection;
    type Error: std::error::Error;

    fn connect(&self, params: ConnectParams<'_>) -> Result<Self::Connection, Self::Error>;
}

/// All normalized profiles from one loaded source, keyed by connection name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStore {
    profiles: IndexMap<String, ConnectionProfile>,
}

impl ProfileStore {
    pub(crate) fn new(profiles: IndexMap<String, ConnectionProfile>) -> Self {
        Self { profiles }
    }

    /// The full normalized record for a connection.
    pub fn profile(&self, name: &str) -> Result<&ConnectionProfile, ConnfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConnfigError::ConnectionNotFound(name.to_string()))
    }

    /// The driver-specific DSN string for a connection.
    pub fn dsn(&self, name: &str) -> Result<String, ConnfigError> {
        self.profile(name)?.dsn()
    }

    /// Resolved attribute codes for a connection.
    pub fn attributes(&self, name: &str) -> Result<&Attributes, ConnfigError> {
        Ok(&self.profile(name)?.attributes)
    }

    pub fn username(&self, name: &str) -> Result<Option<&str>, ConnfigError> {
        Ok(self.profile(name)?.username.as_deref())
    }

    pub fn password(&self, name: &str) -> Result<Option<&str>, ConnfigError> {
        Ok(self.profile(name)?.password.as_deref())
    }

    /// Connection names in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Open a driver-native connection through the given [`Connector`].
    ///
    /// Bundles DSN, credentials, and resolved attributes for the named
    /// connection and hands them to the client library.
    pub fn create_connection<C: Connector>(
        &self,
        name: &str,
        connector: &C,
    ) -> Result<C::Connection, ConnectError<C::Error>> {
        let profile = self.profile(name)?;
        let params = ConnectParams {
            driver: profile.driver,
            dsn: profile.dsn()?,
            username: profile.username.as_deref(),
            password: profile.password.as_deref(),
            attributes: &profile.attributes,
        };
        connector.connect(params).map_err(ConnectError::Driver)
    }
}
