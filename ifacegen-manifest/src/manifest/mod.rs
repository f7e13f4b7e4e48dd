//! Manifest types and parsing for interface manifests.

mod lower;
mod parse;
mod validate;

use serde::Deserialize;
pub use parse::{Format, parse_manifest};
pub use validate::ParseContext;

/// Root manifest describing the interfaces of one Go package.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Target package
    pub package: PackageConfig,

    /// Interfaces, in declaration order
    #[serde(default)]
    pub interfaces: Vec<InterfaceDef>,
}

/// The `[package]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    /// Name used in the package clause
    pub name: String,

    /// Import path; types qualified with it are written unqualified
    #[serde(default)]
    pub path: Option<String>,
}

impl PackageConfig {
    /// The import path, falling back to the package name.
    pub fn import_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }
}

/// An `[[interfaces]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceDef {
    pub name: String,

    #[serde(default)]
    pub comment: Option<String>,

    /// Methods, in declaration order
    #[serde(default)]
    pub methods: Vec<MethodDef>,
}

/// An `[[interfaces.methods]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDef {
    pub name: String,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub params: Vec<ParamDef>,

    #[serde(default)]
    pub returns: Vec<ParamDef>,
}

/// A parameter or return value: `{ name = "id", type = "string" }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDef {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub ty: String,
}

impl Manifest {
    /// Find an interface by name.
    pub fn interface(&self, name: &str) -> Option<&InterfaceDef> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Total number of methods across all interfaces.
    pub fn method_count(&self) -> usize {
        self.interfaces.iter().map(|i| i.methods.len()).sum()
    }
}
