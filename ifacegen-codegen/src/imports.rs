//! Import collection for generated Go files.

use indexmap::IndexMap;

use crate::{naming::package_alias, types::Qualifier};

/// Tracks the packages a file imports and the alias each one is used by.
///
/// Maintains insertion order so alias allocation is deterministic: when two
/// import paths guess the same alias, the later one gets `2`, `3`, ...
/// appended. Types from the `local` package are written unqualified.
///
/// # Example
///
/// ```
/// use ifacegen_codegen::{ImportSet, Qualifier};
///
/// let mut imports = ImportSet::new().with_local("example.com/store");
/// imports.add("context");
/// imports.add("example.com/store");
///
/// assert_eq!(imports.qualify("context", "Context"), "context.Context");
/// assert_eq!(imports.qualify("example.com/store", "User"), "User");
/// assert_eq!(imports.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    local: Option<String>,
    /// Import path -> alias
    imports: IndexMap<String, String>,
}

impl ImportSet {
    /// Create a new empty import set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the import path of the package being generated.
    pub fn with_local(mut self, path: impl Into<String>) -> Self {
        self.local = Some(path.into());
        self
    }

    /// Add an import path and return the alias it will be used by.
    ///
    /// Returns `None` for the local package, which is never imported.
    pub fn add(&mut self, path: &str) -> Option<&str> {
        if self.is_local(path) {
            return None;
        }
        if !self.imports.contains_key(path) {
            let alias = self.free_alias(&package_alias(path));
            self.imports.insert(path.to_string(), alias);
        }
        self.imports.get(path).map(String::as_str)
    }

    /// Add every path from an iterator.
    pub fn extend<'a>(&mut self, paths: impl IntoIterator<Item = &'a str>) {
        for path in paths {
            self.add(path);
        }
    }

    /// Get the alias for an import path, if imported.
    pub fn alias(&self, path: &str) -> Option<&str> {
        self.imports.get(path).map(String::as_str)
    }

    /// Check if a path is the local package.
    pub fn is_local(&self, path: &str) -> bool {
        self.local.as_deref() == Some(path)
    }

    /// Iterate over `(path, alias)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `(path, alias)` pairs sorted by path, as gofmt orders an import block.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut imports: Vec<_> = self.iter().collect();
        imports.sort_by_key(|(path, _)| *path);
        imports
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of imported packages.
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    fn free_alias(&self, guess: &str) -> String {
        let taken = |alias: &str| self.imports.values().any(|a| a == alias);
        if !taken(guess) {
            return guess.to_string();
        }
        (2..)
            .map(|n| format!("{}{}", guess, n))
            .find(|candidate| !taken(candidate.as_str()))
            .unwrap_or_else(|| guess.to_string())
    }
}

impl Qualifier for ImportSet {
    fn qualify(&self, package: &str, name: &str) -> String {
        if self.is_local(package) {
            return name.to_string();
        }
        match self.alias(package) {
            Some(alias) => format!("{}.{}", alias, name),
            None => format!("{}.{}", package_alias(package), name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_set_basic() {
        let mut imports = ImportSet::new();
        assert_eq!(imports.add("context"), Some("context"));
        assert_eq!(imports.add("net/http"), Some("http"));
        assert_eq!(imports.add("context"), Some("context"));

        assert_eq!(imports.len(), 2);
        assert_eq!(imports.alias("net/http"), Some("http"));
        assert_eq!(imports.alias("io"), None);
    }

    #[test]
    fn test_alias_collision() {
        let mut imports = ImportSet::new();
        imports.add("example.com/a/store");
        imports.add("example.com/b/store");
        imports.add("example.com/c/store");

        assert_eq!(imports.alias("example.com/a/store"), Some("store"));
        assert_eq!(imports.alias("example.com/b/store"), Some("store2"));
        assert_eq!(imports.alias("example.com/c/store"), Some("store3"));
        assert_eq!(
            imports.qualify("example.com/b/store", "User"),
            "store2.User"
        );
    }

    #[test]
    fn test_local_package_elided() {
        let mut imports = ImportSet::new().with_local("example.com/store");
        assert_eq!(imports.add("example.com/store"), None);
        assert!(imports.is_empty());
        assert_eq!(imports.qualify("example.com/store", "User"), "User");
    }

    #[test]
    fn test_sorted_by_path() {
        let mut imports = ImportSet::new();
        imports.extend(["io", "context", "example.com/model"]);
        let paths: Vec<_> = imports.sorted().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["context", "example.com/model", "io"]);
    }

    #[test]
    fn test_unknown_package_falls_back_to_guess() {
        let imports = ImportSet::new();
        assert_eq!(imports.qualify("gopkg.in/yaml.v3", "Node"), "yaml.Node");
    }
}
