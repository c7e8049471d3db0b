//! Named database-connection profiles from config files. Point at an INI,
//! JSON, or TOML source and get back validated DSNs, credentials, and driver
//! attributes by connection name.
//!
//! ```no_run
//! use connfig::{AttrResolver, Connfig};
//!
//! let store = Connfig::builder()
//!     .source("etc/connfig.ini")
//!     .attr_resolver(AttrResolver::new().with("ATTR_TIMEOUT", 2))
//!     .load()?;
//!
//! let dsn = store.dsn("server")?;          // "pgsql:host=localhost;dbname=db"
//! let user = store.username("server")?;    // Some("user")
//! # Ok::<(), connfig::ConnfigError>(())
//! ```
//!
//! # Why connfig
//!
//! Applications that talk to more than one database tend to grow an ad-hoc
//! config layer: a file naming each connection, hand-rolled parsing, string
//! concatenation for DSNs, and silent typos that only surface as connection
//! failures at runtime. Connfig replaces that plumbing with one pipeline:
//! parse a source file into named profiles, validate each profile against its
//! driver's exact key schema, and normalize it into a canonical record you can
//! query — or hand straight to your client library.
//!
//! # Source files
//!
//! A source is a mapping of connection-name → profile. All three formats share
//! the shape:
//!
//! ```ini
//! [server]
//! driver = pgsql
//! host = localhost
//! dbname = db
//! username = user
//! password = pass
//! attribute[ATTR_TIMEOUT] = 30
//! ```
//!
//! ```json
//! {
//!   "server": {
//!     "driver": "pgsql",
//!     "host": "localhost",
//!     "dbname": "db",
//!     "username": "user",
//!     "password": "pass",
//!     "attribute": { "ATTR_TIMEOUT": 30 }
//!   }
//! }
//! ```
//!
//! The format is picked from the file extension (`.ini`, `.json`, `.toml`) or
//! forced with [`ConnfigBuilder::format`]. A relative source path is searched
//! **upward** from the base directory — run your tool from anywhere inside a
//! project tree and it finds the project's `etc/connfig.ini`.
//!
//! # Drivers and validation
//!
//! Drivers are a closed set ([`Driver`]); each carries an exact key schema:
//!
//! | driver | required | optional |
//! |--------|----------|----------|
//! | `pgsql` | driver | host, port, dbname, username, password, attribute |
//! | `sqlite` | driver, path | attribute |
//! | `sqlsrv` | driver, server, Database, username | password, attribute |
//!
//! Validation is strict: an unknown driver, a missing required key, or any key
//! outside the schema fails the whole load with the connection name and
//! offending key. There is no partially-loaded state.
//!
//! # Normalization
//!
//! Each validated profile is partitioned — totally and losslessly — into a
//! [`ConnectionProfile`]: `driver`, optional `username`/`password`, resolved
//! `attributes`, and whatever remains as ordered `dsn_params`. DSN strings are
//! rendered per driver dialect from `dsn_params` in source order, so the DSN
//! is deterministic for a given file.
//!
//! # Attribute constants
//!
//! Client libraries take connection options as integer codes; config files
//! spell them with symbolic names. The mapping is *injected* via
//! [`AttrResolver`] rather than baked in, so it matches whichever client you
//! target and stays testable:
//!
//! ```
//! use connfig::AttrResolver;
//!
//! let resolver = AttrResolver::new()
//!     .with("ATTR_TIMEOUT", 2)
//!     .with("ERRMODE_EXCEPTION", 2);
//! ```
//!
//! Numeric tokens pass through unchanged; unknown names fail the load.
//!
//! # Connecting
//!
//! Connfig never opens database connections itself. Implement [`Connector`]
//! for your client library and let
//! [`ProfileStore::create_connection`] hand it the DSN, credentials, and
//! resolved attributes; client errors propagate unwrapped.
//!
//! # Error handling
//!
//! All fallible operations return [`ConnfigError`]. Errors are user-facing
//! and carry enough context to diagnose from the message alone: file paths
//! for I/O and parse failures, connection name plus offending key for
//! validation failures. Nothing is retried and nothing fails silently.

pub mod error;

mod builder;
mod driver;
mod file;
mod format;
mod normalize;
mod raw;
mod resolve;
mod store;
mod validate;

pub use builder::{Connfig, ConnfigBuilder, DEFAULT_SOURCE, load};
pub use driver::{Driver, Schema};
pub use error::{ConnectError, ConnfigError};
pub use format::Format;
pub use normalize::AttrResolver;
pub use raw::RawValue;
pub use store::{Attributes, ConnectParams, ConnectionProfile, Connector, ProfileStore};
