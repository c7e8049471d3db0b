//! The builder entry point: configure where the source lives and how to
//! interpret it, then load.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConnfigError;
use crate::file;
use crate::format::Format;
use crate::normalize::AttrResolver;
use crate::resolve;
use crate::store::ProfileStore;

/// Default relative source path, resolved by walking up from the base
/// directory.
pub const DEFAULT_SOURCE: &str = "etc/connfig.ini";

/// Entry point for loading connection profiles.
pub struct Connfig;

impl Connfig {
    pub fn builder() -> ConnfigBuilder {
        ConnfigBuilder::new()
    }
}

/// Builder for loading a profile source into a [`ProfileStore`].
///
/// Controls four independent settings:
///
/// - **Source**: [`source()`](Self::source) — the config file path, relative
///   (searched up the ancestor tree) or absolute. Defaults to
///   [`DEFAULT_SOURCE`].
/// - **Base directory**: [`base_dir()`](Self::base_dir) — where the ancestor
///   walk for relative sources starts. Defaults to the current directory.
/// - **Format**: [`format()`](Self::format) — an explicit format, overriding
///   extension detection.
/// - **Attribute resolver**: [`attr_resolver()`](Self::attr_resolver) — the
///   symbolic-constant table for the target client library. Defaults to an
///   empty table (numeric attribute tokens still work).
#[derive(Debug, Clone, Default)]
pub struct ConnfigBuilder {
    source: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    format: Option<Format>,
    resolver: AttrResolver,
}

impl ConnfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Set the source path (default: [`DEFAULT_SOURCE`]).
    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Set the base directory for relative-source resolution (default: the
    /// current working directory).
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Force a source format instead of matching the file extension.
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Inject the attribute-constant resolver.
    pub fn attr_resolver(mut self, resolver: AttrResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Resolve, parse, validate, and normalize the source.
    ///
    /// Loading is all-or-nothing: any failure aborts with the specific error
    /// and no store is produced.
    pub fn load(self) -> Result<ProfileStore, ConnfigError> {
        let source = self
            .source
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));
        let base_dir = match self.base_dir {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(|e| ConnfigError::Io {
                path: PathBuf::from("."),
                source: e,
            })?,
        };

        let resolved = file::resolve_source_path(&source, &base_dir)?;

        let format = match self.format {
            Some(format) => format,
            None => Format::from_path(&resolved).ok_or_else(|| {
                ConnfigError::UnsupportedSourceType {
                    path: resolved.clone(),
                }
            })?,
        };

        debug!(path = %resolved.display(), ?format, "loading profile source");
        let text = file::read_source(&resolved)?;
        resolve::resolve(&resolved, &text, format, &self.resolver)
    }
}

/// Load profiles from a source path with an empty attribute resolver.
///
/// Shorthand for `Connfig::builder().source(path).load()`.
pub fn load(path: impl AsRef<Path>) -> Result<ProfileStore, ConnfigError> {
    Connfig::builder().source(path.as_ref()).load()
}
