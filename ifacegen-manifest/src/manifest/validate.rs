//! Validation context and utilities for manifest parsing.

use std::{collections::HashSet, sync::Arc};

use ifacegen_codegen::{TypeExpr, naming::is_go_keyword};
use miette::SourceSpan;

use super::{Manifest, ParamDef};
use crate::{Result, error::SourceContext, type_expr::parse_type};

/// Parsing and validation context that carries source information.
///
/// Encapsulates the source content, filename, and current path through the
/// manifest (e.g. `Store.Get`), so nested validation reports where it is.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "ifacegen.toml");
/// ctx.validate_name("Store", "interface")?;
///
/// let nested = ctx.push("Store").push("Get");
/// nested.validate_name("ctx", "parameter")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["Store", "Get"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "parameter in 'Store.Get'" or just "interface" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Validate that a name is a valid, non-keyword Go identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        let span = || find_value_spans(self.src(), "name", name).into_iter().next();

        if is_go_keyword(name) {
            return Err(self
                .source
                .reserved_keyword_error(name, self.context_for(kind), span()));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                span(),
            ));
        }

        Ok(())
    }

    /// Validate that a type string parses into a type Go accepts here.
    ///
    /// `variadic` allows a leading `...`, which only the last parameter may use.
    pub fn validate_type(&self, ty: &str, kind: &str, variadic: bool) -> Result<()> {
        let problem = match parse_type(ty) {
            Ok(parsed) => type_problem(&parsed, variadic),
            Err(reason) => Some(reason),
        };
        match problem {
            None => Ok(()),
            Some(reason) => Err(self.source.invalid_type_error(
                ty,
                self.context_for(kind),
                reason,
                find_value_spans(self.src(), "type", ty).into_iter().next(),
            )),
        }
    }

    /// Record `name` in `seen`, failing if it was already there.
    pub fn check_unique(&self, seen: &mut HashSet<&'a str>, name: &'a str, kind: &str) -> Result<()> {
        if seen.insert(name) {
            return Ok(());
        }
        let spans = find_value_spans(self.src(), "name", name);
        Err(self.source.duplicate_name_error(
            name,
            self.context_for(kind),
            spans.first().copied(),
            spans.get(1).copied(),
        ))
    }
}

/// Validate the manifest after parsing.
pub(crate) fn validate_manifest<'a>(manifest: &'a Manifest, ctx: &ParseContext<'a>) -> Result<()> {
    ctx.validate_name(&manifest.package.name, "package")?;

    if manifest.interfaces.is_empty() {
        return Err(ctx
            .source_context()
            .validation_error("manifest defines no interfaces"));
    }

    let mut interfaces = HashSet::new();
    for iface in &manifest.interfaces {
        ctx.validate_name(&iface.name, "interface")?;
        ctx.check_unique(&mut interfaces, &iface.name, "interface")?;

        let iface_ctx = ctx.push(&iface.name);
        let mut methods = HashSet::new();
        for method in &iface.methods {
            iface_ctx.validate_name(&method.name, "method")?;
            iface_ctx.check_unique(&mut methods, &method.name, "method")?;

            let method_ctx = iface_ctx.push(&method.name);
            let mut names = HashSet::new();
            validate_params(&method_ctx, &method.params, "parameter", true, &mut names)?;
            validate_params(&method_ctx, &method.returns, "return value", false, &mut names)?;
        }
    }
    Ok(())
}

fn validate_params<'a>(
    ctx: &ParseContext<'a>,
    params: &'a [ParamDef],
    kind: &str,
    variadic_last: bool,
    names: &mut HashSet<&'a str>,
) -> Result<()> {
    let named = params.iter().filter(|p| p.name.is_some()).count();
    if named != 0 && named != params.len() {
        return Err(ctx.source_context().validation_error(format!(
            "mixed named and unnamed {}s in '{}'",
            kind,
            ctx.path_string()
        )));
    }

    let last = params.len().saturating_sub(1);
    for (i, param) in params.iter().enumerate() {
        if let Some(name) = param.name.as_deref().filter(|n| *n != "_") {
            ctx.validate_name(name, kind)?;
            ctx.check_unique(names, name, kind)?;
        }
        ctx.validate_type(&param.ty, kind, variadic_last && i == last)?;
    }
    Ok(())
}

/// Why a parsed type cannot appear where it was written, if it cannot.
fn type_problem(ty: &TypeExpr, variadic: bool) -> Option<String> {
    let ty = match ty {
        TypeExpr::Variadic(inner) if variadic => inner.as_ref(),
        _ => ty,
    };
    misplaced_variadic(ty).or_else(|| hidden_selector(ty))
}

fn misplaced_variadic(ty: &TypeExpr) -> Option<String> {
    match ty {
        TypeExpr::Variadic(_) => {
            Some("'...' is only allowed on the type of the last parameter".to_string())
        }
        TypeExpr::Named(_) | TypeExpr::Qualified { .. } | TypeExpr::Raw(_) => None,
        TypeExpr::Pointer(inner) | TypeExpr::Slice(inner) => misplaced_variadic(inner),
        TypeExpr::Array { elem, .. } | TypeExpr::Chan { elem, .. } => misplaced_variadic(elem),
        TypeExpr::Map { key, value } => misplaced_variadic(key).or_else(|| misplaced_variadic(value)),
        TypeExpr::Generic { base, args } => {
            misplaced_variadic(base).or_else(|| args.iter().find_map(misplaced_variadic))
        }
        TypeExpr::Func { params, results } => {
            let last = params.len().saturating_sub(1);
            params
                .iter()
                .enumerate()
                .find_map(|(i, p)| match p.ty() {
                    TypeExpr::Variadic(inner) if i == last => misplaced_variadic(inner),
                    other => misplaced_variadic(other),
                })
                .or_else(|| results.iter().find_map(|r| misplaced_variadic(r.ty())))
        }
    }
}

/// Verbatim `interface{...}`/`struct{...}` text is not inspected for
/// imports, so a package selector inside it would go unimported.
fn hidden_selector(ty: &TypeExpr) -> Option<String> {
    let mut found = None;
    ty.walk(&mut |t| match t {
        TypeExpr::Raw(text) if found.is_none() && has_selector(text) => {
            found = Some(format!(
                "'{}' refers to another package inside a literal type; declare a named type for it instead",
                text
            ));
        }
        _ => {}
    });
    found
}

/// Whether `text` contains `pkg.Name`.
fn has_selector(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(3).any(|w| {
        (w[0].is_alphanumeric() || w[0] == '_') && w[1] == '.' && (w[2].is_alphabetic() || w[2] == '_')
    })
}

/// Find the spans of `value` assigned to `key`, in source order.
///
/// Recognises TOML (`key = "value"`, `key="value"`, single quotes) and JSON
/// (`"key": "value"`) spellings. Only the value text is covered.
pub(crate) fn find_value_spans(src: &str, key: &str, value: &str) -> Vec<SourceSpan> {
    let patterns = [
        format!("{} = \"{}\"", key, value),
        format!("{}=\"{}\"", key, value),
        format!("{} = '{}'", key, value),
        format!("\"{}\": \"{}\"", key, value),
        format!("\"{}\":\"{}\"", key, value),
    ];

    let mut spans: Vec<SourceSpan> = patterns
        .iter()
        .flat_map(|pattern| {
            // Value sits just before the closing quote
            let skip = pattern.len() - value.len() - 1;
            src.match_indices(pattern.as_str())
                .filter(move |(pos, _)| is_key_start(src, *pos))
                .map(move |(pos, _)| SourceSpan::from((pos + skip, value.len())))
        })
        .collect();
    spans.sort_by_key(|s| s.offset());
    spans
}

/// A key match must not be the tail of a longer key (e.g. `type` in `subtype`).
fn is_key_start(src: &str, pos: usize) -> bool {
    src[..pos]
        .chars()
        .next_back()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '-'))
}

/// Validate that a name is a valid Go identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, digits, and underscores");
    }

    None
}
