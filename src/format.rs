//! Source formats and their parsers.
//!
//! Each parser turns raw text into the generic [`RawValue`] tree — a mapping
//! of connection-name → profile mapping — with key order preserved. Parsers do
//! no semantic interpretation; malformed text fails with
//! [`ConnfigError::Parse`] carrying the source path.
//!
//! The INI dialect follows PHP's `parse_ini_file` shape: each `[section]` is a
//! connection, and bracketed keys build nested mappings:
//!
//! ```ini
//! [server]
//! driver = pgsql
//! host = localhost
//! attribute[ATTR_TIMEOUT] = 30
//! attribute[] = ERRMODE_EXCEPTION
//! ```
//!
//! `attribute[NAME]` inserts under `NAME`; `attribute[]` appends with the next
//! positional index as key. All INI values are strings — the normalizer is the
//! layer that interprets numeric tokens.

use std::path::Path;

use indexmap::IndexMap;

use crate::error::ConnfigError;
use crate::raw::RawValue;

/// A supported config-file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ini,
    Json,
    Toml,
}

/// Extension → format table, matched ASCII case-insensitively.
const EXTENSIONS: &[(&str, Format)] = &[
    ("ini", Format::Ini),
    ("json", Format::Json),
    ("toml", Format::Toml),
];

impl Format {
    /// Match a file path's extension against the registered format table.
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?;
        EXTENSIONS
            .iter()
            .find(|(e, _)| ext.eq_ignore_ascii_case(e))
            .map(|(_, f)| *f)
    }

    /// Parse raw source text into the generic tree.
    ///
    /// `path` is used only for error context.
    pub fn parse(&self, path: &Path, text: &str) -> Result<RawValue, ConnfigError> {
        match self {
            Format::Ini => parse_ini(path, text),
            Format::Json => parse_json(path, text),
            Format::Toml => parse_toml(path, text),
        }
    }
}

fn parse_ini(path: &Path, text: &str) -> Result<RawValue, ConnfigError> {
    let ini = ini::Ini::load_from_str(text).map_err(|e| ConnfigError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut root: IndexMap<String, RawValue> = IndexMap::new();
    for (section, props) in ini.iter() {
        match section {
            Some(name) => {
                let mut profile: IndexMap<String, RawValue> = IndexMap::new();
                for (key, value) in props.iter() {
                    insert_ini_key(&mut profile, key, value);
                }
                root.insert(name.to_string(), RawValue::Map(profile));
            }
            None => {
                // Sectionless keys become top-level scalars; the validator
                // rejects them as "not a mapping" with the key as context.
                for (key, value) in props.iter() {
                    root.insert(key.to_string(), RawValue::String(value.to_string()));
                }
            }
        }
    }
    Ok(RawValue::Map(root))
}

/// Insert one INI property, folding `base[sub]` keys into a nested mapping.
fn insert_ini_key(profile: &mut IndexMap<String, RawValue>, key: &str, value: &str) {
    let nested = key
        .split_once('[')
        .and_then(|(base, rest)| rest.strip_suffix(']').map(|sub| (base, sub)));

    match nested {
        Some((base, sub)) => {
            let entry = profile
                .entry(base.to_string())
                .or_insert_with(|| RawValue::Map(IndexMap::new()));
            // A plain key earlier under the same name gets replaced by the
            // stanza (last wins, matching duplicate-key behavior elsewhere).
            if !matches!(entry, RawValue::Map(_)) {
                *entry = RawValue::Map(IndexMap::new());
            }
            if let RawValue::Map(map) = entry {
                let sub_key = if sub.is_empty() {
                    map.len().to_string()
                } else {
                    sub.to_string()
                };
                map.insert(sub_key, RawValue::String(value.to_string()));
            }
        }
        None => {
            profile.insert(key.to_string(), RawValue::String(value.to_string()));
        }
    }
}

fn parse_json(path: &Path, text: &str) -> Result<RawValue, ConnfigError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ConnfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(RawValue::from(value))
}

fn parse_toml(path: &Path, text: &str) -> Result<RawValue, ConnfigError> {
    let table: toml::Table = text.parse().map_err(|e: toml::de::Error| ConnfigError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(RawValue::from(toml::Value::Table(table)))
}
