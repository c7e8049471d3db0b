//! The load pipeline: parse → validate → normalize → [`ProfileStore`].
//!
//! Operates on pre-loaded text with no I/O, so the full pipeline is testable
//! with synthetic sources. Any step's failure aborts the whole load — a source
//! either resolves completely or yields no store at all.

use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::ConnfigError;
use crate::format::Format;
use crate::normalize::{self, AttrResolver};
use crate::raw::RawValue;
use crate::store::ProfileStore;
use crate::validate;

/// Resolve source text into a complete profile store.
///
/// `path` is used for error context only.
pub fn resolve(
    path: &Path,
    text: &str,
    format: Format,
    resolver: &AttrResolver,
) -> Result<ProfileStore, ConnfigError> {
    let root = format.parse(path, text)?;
    validate::validate(&root)?;

    // Validation guarantees a mapping of mappings.
    let connections = match root {
        RawValue::Map(map) => map,
        _ => unreachable!("validated root is a mapping"),
    };

    let mut profiles = IndexMap::with_capacity(connections.len());
    for (name, profile) in connections {
        let fields = match profile {
            RawValue::Map(fields) => fields,
            _ => unreachable!("validated profile is a mapping"),
        };
        let normalized = normalize::normalize(&name, fields, resolver)?;
        profiles.insert(name, normalized);
    }

    debug!(connections = profiles.len(), "resolved profile store");
    Ok(ProfileStore::new(profiles))
}
