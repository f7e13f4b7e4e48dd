//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{
    Manifest,
    validate::{ParseContext, validate_manifest},
};
use crate::{Error, Result};

/// Manifest file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Toml,
    Json,
}

impl Format {
    /// Pick the format from a file extension; anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "ifacegen.toml", Format::Toml)
    }
}

impl Manifest {
    /// Parse a manifest file, choosing the format from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string(), Format::from_path(path))
    }

    /// Parse a manifest from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str, format: Format) -> Result<Self> {
        parse_manifest(content, filename, format)
    }
}

/// Parse and validate a manifest from content with the given filename for error reporting.
#[tracing::instrument(skip(content), fields(len = content.len()))]
pub fn parse_manifest(content: &str, filename: &str, format: Format) -> Result<Manifest> {
    let ctx = ParseContext::new(content, filename);
    let manifest: Manifest = match format {
        Format::Toml => {
            toml::from_str(content).map_err(|e| ctx.source_context().parse_error(e))?
        }
        Format::Json => {
            serde_json::from_str(content).map_err(|e| ctx.source_context().json_error(e))?
        }
    };
    validate_manifest(&manifest, &ctx)?;
    tracing::debug!(
        interfaces = manifest.interfaces.len(),
        methods = manifest.method_count(),
        "manifest parsed"
    );
    Ok(manifest)
}
