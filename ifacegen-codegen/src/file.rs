//! Go source file assembly.

use crate::{
    builder::CodeBuilder, imports::ImportSet, interface::InterfaceDescriptor,
    naming::package_alias,
};

/// Marker line recognised by Go tooling as generated code.
pub const GENERATED_HEADER: &str = "Code generated by ifacegen. DO NOT EDIT.";

/// A Go source file holding interface declarations.
///
/// Combines a package clause, the import block derived from the
/// declarations, and the declarations themselves. Produces text only; where
/// that text goes is up to the caller.
///
/// # Example
///
/// ```
/// use ifacegen_codegen::{GoFile, InterfaceDescriptor, MethodSignature, TypeExpr};
///
/// let closer = InterfaceDescriptor::new(
///     "example.com/store",
///     "Closer",
///     vec![MethodSignature::new("Close").returns(TypeExpr::error())],
///     None,
/// );
/// let src = GoFile::new("store").without_header().interface(closer).build();
///
/// assert_eq!(src, "package store\n\ntype Closer interface {\n\tClose() error\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct GoFile {
    package: String,
    path: Option<String>,
    header: bool,
    interfaces: Vec<InterfaceDescriptor>,
}

impl GoFile {
    /// Create a file for the package named `package`.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            path: None,
            header: true,
            interfaces: Vec::new(),
        }
    }

    /// Set the import path of this file's package; its own types are then
    /// written unqualified.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Omit the generated-code header line.
    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    /// Append an interface declaration.
    pub fn interface(mut self, iface: InterfaceDescriptor) -> Self {
        self.interfaces.push(iface);
        self
    }

    /// Append several interface declarations.
    pub fn interfaces(mut self, ifaces: impl IntoIterator<Item = InterfaceDescriptor>) -> Self {
        self.interfaces.extend(ifaces);
        self
    }

    /// Collect the imports every declaration needs.
    pub fn imports(&self) -> ImportSet {
        let mut imports = match &self.path {
            Some(path) => ImportSet::new().with_local(path.clone()),
            None => ImportSet::new(),
        };
        for iface in &self.interfaces {
            imports.extend(iface.imports());
        }
        imports
    }

    /// Render the whole file.
    pub fn build(&self) -> String {
        let imports = self.imports();

        let mut builder = CodeBuilder::go()
            .when(self.header, |b| b.comment(GENERATED_HEADER).blank())
            .line(&format!("package {}", self.package));

        builder = match imports.sorted().as_slice() {
            [] => builder,
            [(path, alias)] => builder
                .blank()
                .line(&format!("import {}", import_spec(path, alias))),
            many => builder.blank().block_with_close("import (", ")", |b| {
                b.each(many.iter(), |b, &(path, alias)| {
                    b.line(&import_spec(path, alias))
                })
            }),
        };

        for iface in &self.interfaces {
            builder.push_blank();
            for fragment in iface.to_fragments_with(&imports) {
                builder.apply_fragment(fragment);
            }
        }
        builder.build()
    }
}

/// `"path"`, or `alias "path"` when the alias differs from the guessed one.
fn import_spec(path: &str, alias: &str) -> String {
    if package_alias(path) == alias {
        go_quote(path)
    } else {
        format!("{} {}", alias, go_quote(path))
    }
}

/// Quote `s` as a Go interpreted string literal.
///
/// Printable text, non-ASCII included, is kept as UTF-8.
fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_control() || (c.is_whitespace() && c != ' ') => {
                out.push_str(&format!("\\u{:04x}", c as u32))
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
