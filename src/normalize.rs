//! Normalization: partition a validated profile into a [`ConnectionProfile`].
//!
//! The partition is total and lossless — every raw key lands in exactly one of
//! driver / username / password / attributes / dsn_params. Input is assumed to
//! have passed [`validate`](crate::validate::validate); this module does not
//! re-check shape.
//!
//! # Attribute resolution
//!
//! Database client libraries expose connection options as integer codes with
//! conventional symbolic names (`ATTR_TIMEOUT`, `ERRMODE_EXCEPTION`, ...).
//! Config files use the names for readability; the [`AttrResolver`] — an
//! injected name → integer table supplied by whoever owns the target client
//! library — maps them back to codes. Tokens that already look numeric pass
//! through unchanged. Resolution happens once, at load time, so lookup never
//! fails later.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::driver::Driver;
use crate::error::ConnfigError;
use crate::raw::RawValue;
use crate::store::{Attributes, ConnectionProfile};

/// Injected symbolic-constant table: attribute name → integer code.
///
/// ```
/// use connfig::AttrResolver;
///
/// let resolver = AttrResolver::new()
///     .with("ATTR_TIMEOUT", 2)
///     .with("ERRMODE_EXCEPTION", 2);
/// assert_eq!(resolver.resolve("ATTR_TIMEOUT"), Some(2));
/// assert_eq!(resolver.resolve("ATTR_BOGUS"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttrResolver {
    table: HashMap<String, i64>,
}

impl AttrResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one constant, builder-style.
    pub fn with(mut self, name: impl Into<String>, code: i64) -> Self {
        self.table.insert(name.into(), code);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, code: i64) {
        self.table.insert(name.into(), code);
    }

    pub fn resolve(&self, name: &str) -> Option<i64> {
        self.table.get(name).copied()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for AttrResolver {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Partition a validated profile into its canonical form.
///
/// `name` is used for error context only.
pub fn normalize(
    name: &str,
    fields: IndexMap<String, RawValue>,
    resolver: &AttrResolver,
) -> Result<ConnectionProfile, ConnfigError> {
    let mut driver = None;
    let mut username = None;
    let mut password = None;
    let mut attributes = Attributes::new();
    let mut dsn_params = IndexMap::new();

    for (key, value) in fields {
        match key.as_str() {
            "driver" => {
                let token = value.as_str().unwrap_or_default();
                driver = Some(Driver::from_token(token).ok_or_else(|| {
                    ConnfigError::DriverNotSupported {
                        connection: name.to_string(),
                        driver: token.to_string(),
                    }
                })?);
            }
            "username" => username = value.scalar_to_string(),
            "password" => password = value.scalar_to_string(),
            "attribute" => attributes = resolve_attributes(name, value, resolver)?,
            _ => {
                if let Some(rendered) = value.scalar_to_string() {
                    dsn_params.insert(key, rendered);
                }
            }
        }
    }

    let driver = driver.ok_or_else(|| ConnfigError::DriverNotSupported {
        connection: name.to_string(),
        driver: String::new(),
    })?;

    Ok(ConnectionProfile {
        driver,
        username,
        password,
        attributes,
        dsn_params,
    })
}

/// Resolve the raw `attribute` value into integer code pairs.
///
/// A bare scalar is treated as a one-element sequence; sequence entries get
/// positional integer keys. Duplicate keys overwrite (last wins).
fn resolve_attributes(
    name: &str,
    value: RawValue,
    resolver: &AttrResolver,
) -> Result<Attributes, ConnfigError> {
    let mut attrs = Attributes::new();
    match value {
        RawValue::Seq(items) => {
            for (index, item) in items.into_iter().enumerate() {
                attrs.insert(index as i64, resolve_token(name, &item, resolver)?);
            }
        }
        RawValue::Map(map) => {
            for (key, item) in map {
                let code = resolve_key_token(name, &key, resolver)?;
                attrs.insert(code, resolve_token(name, &item, resolver)?);
            }
        }
        scalar => {
            attrs.insert(0, resolve_token(name, &scalar, resolver)?);
        }
    }
    Ok(attrs)
}

fn resolve_token(
    name: &str,
    value: &RawValue,
    resolver: &AttrResolver,
) -> Result<i64, ConnfigError> {
    match value {
        RawValue::Integer(i) => Ok(*i),
        RawValue::String(s) => resolve_key_token(name, s, resolver),
        // Validation admits only strings and integers here.
        other => Err(ConnfigError::Validation {
            connection: name.to_string(),
            key: "attribute".into(),
            reason: format!("unexpected attribute value {other:?}"),
        }),
    }
}

/// Numeric tokens pass through as-is; anything else goes through the resolver.
fn resolve_key_token(name: &str, token: &str, resolver: &AttrResolver) -> Result<i64, ConnfigError> {
    if let Ok(n) = token.trim().parse::<i64>() {
        return Ok(n);
    }
    resolver
        .resolve(token)
        .ok_or_else(|| ConnfigError::UnknownAttributeConstant {
            connection: name.to_string(),
            name: token.to_string(),
        })
}
