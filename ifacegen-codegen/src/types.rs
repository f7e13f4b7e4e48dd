//! Language-neutral type expressions and typed parameters.
//!
//! A [`TypeExpr`] describes the type half of a parameter or return value.
//! Rendering goes through a [`Qualifier`], which decides how a type from
//! another package is spelled at the use site.

use std::fmt;

use crate::naming::package_alias;

/// A type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A type in scope without qualification (`string`, `error`, `User`).
    Named(String),
    /// An exported type from another package, identified by import path.
    Qualified {
        /// Import path (e.g. `context`, `github.com/acme/store`).
        package: String,
        /// Exported type name.
        name: String,
    },
    /// Pointer type (`*T`).
    Pointer(Box<TypeExpr>),
    /// Slice type (`[]T`).
    Slice(Box<TypeExpr>),
    /// Fixed-size array type (`[N]T`).
    Array { len: usize, elem: Box<TypeExpr> },
    /// Map type (`map[K]V`).
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// Variadic parameter type (`...T`).
    Variadic(Box<TypeExpr>),
    /// Instantiated generic type (`Name[A, B]`).
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    /// Function type (`func(ctx context.Context) error`).
    Func {
        params: Vec<Param>,
        results: Vec<Param>,
    },
    /// Channel type (`chan T`, `<-chan T`, `chan<- T`).
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    /// Verbatim type text, for anything the other variants do not cover.
    Raw(String),
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

impl TypeExpr {
    /// Create an unqualified named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Create a type qualified by its package import path.
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Create a pointer type.
    pub fn pointer(inner: TypeExpr) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Create a slice type.
    pub fn slice(inner: TypeExpr) -> Self {
        Self::Slice(Box::new(inner))
    }

    /// Create a fixed-size array type.
    pub fn array(len: usize, elem: TypeExpr) -> Self {
        Self::Array {
            len,
            elem: Box::new(elem),
        }
    }

    /// Create a map type.
    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Create a variadic parameter type.
    pub fn variadic(inner: TypeExpr) -> Self {
        Self::Variadic(Box::new(inner))
    }

    /// Create an instantiated generic type.
    pub fn generic(base: TypeExpr, args: Vec<TypeExpr>) -> Self {
        Self::Generic {
            base: Box::new(base),
            args,
        }
    }

    /// Create a function type.
    pub fn func(params: Vec<Param>, results: Vec<Param>) -> Self {
        Self::Func { params, results }
    }

    /// Create a channel type.
    pub fn chan(dir: ChanDir, elem: TypeExpr) -> Self {
        Self::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    /// Create a verbatim type.
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    /// Convenience: `string`.
    pub fn string() -> Self {
        Self::named("string")
    }

    /// Convenience: `error`.
    pub fn error() -> Self {
        Self::named("error")
    }

    /// Convenience: `context.Context`.
    pub fn context() -> Self {
        Self::qualified("context", "Context")
    }

    /// Render this type, spelling foreign packages through `qualifier`.
    pub fn render(&self, qualifier: &dyn Qualifier) -> String {
        match self {
            Self::Named(name) | Self::Raw(name) => name.clone(),
            Self::Qualified { package, name } => qualifier.qualify(package, name),
            Self::Pointer(inner) => format!("*{}", inner.render(qualifier)),
            Self::Slice(inner) => format!("[]{}", inner.render(qualifier)),
            Self::Array { len, elem } => format!("[{}]{}", len, elem.render(qualifier)),
            Self::Map { key, value } => format!(
                "map[{}]{}",
                key.render(qualifier),
                value.render(qualifier)
            ),
            Self::Variadic(inner) => format!("...{}", inner.render(qualifier)),
            Self::Generic { base, args } => {
                let args: Vec<_> = args.iter().map(|a| a.render(qualifier)).collect();
                format!("{}[{}]", base.render(qualifier), args.join(", "))
            }
            Self::Func { params, results } => {
                format!("func{}", render_signature(params, results, qualifier))
            }
            Self::Chan { dir, elem } => {
                let elem_text = elem.render(qualifier);
                match dir {
                    // `chan <-chan T` would read as `chan<- (chan T)`
                    ChanDir::Both if matches!(**elem, Self::Chan { dir: ChanDir::Recv, .. }) => {
                        format!("chan ({})", elem_text)
                    }
                    ChanDir::Both => format!("chan {}", elem_text),
                    ChanDir::Send => format!("chan<- {}", elem_text),
                    ChanDir::Recv => format!("<-chan {}", elem_text),
                }
            }
        }
    }

    /// Visit this type and every type nested in it, parents first.
    pub fn walk<'a>(&'a self, f: &mut dyn FnMut(&'a TypeExpr)) {
        f(self);
        match self {
            Self::Named(_) | Self::Raw(_) | Self::Qualified { .. } => {}
            Self::Pointer(inner) | Self::Slice(inner) | Self::Variadic(inner) => inner.walk(f),
            Self::Array { elem, .. } | Self::Chan { elem, .. } => elem.walk(f),
            Self::Map { key, value } => {
                key.walk(f);
                value.walk(f);
            }
            Self::Generic { base, args } => {
                base.walk(f);
                for arg in args {
                    arg.walk(f);
                }
            }
            Self::Func { params, results } => {
                for param in params.iter().chain(results) {
                    param.ty.walk(f);
                }
            }
        }
    }

    /// Visit every package import path referenced by this type, in order.
    pub fn visit_packages<'a>(&'a self, f: &mut dyn FnMut(&'a str)) {
        self.walk(&mut |ty| {
            if let Self::Qualified { package, .. } = ty {
                f(package);
            }
        });
    }
}

/// Render `(params) results` as Go writes it after a method or `func` name.
///
/// No results renders nothing, a single unnamed result renders bare, and
/// anything else is parenthesised.
pub(crate) fn render_signature(
    params: &[Param],
    results: &[Param],
    qualifier: &dyn Qualifier,
) -> String {
    let params = render_list(params, qualifier);
    match results {
        [] => format!("({})", params),
        [single] if single.name().is_none() => {
            format!("({}) {}", params, single.render(qualifier))
        }
        results => format!("({}) ({})", params, render_list(results, qualifier)),
    }
}

fn render_list(params: &[Param], qualifier: &dyn Qualifier) -> String {
    params
        .iter()
        .map(|p| p.render(qualifier))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&DefaultQualifier))
    }
}

/// A parameter or return value: an optional identifier and a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    name: Option<String>,
    ty: TypeExpr,
}

impl Param {
    /// Create a named parameter (`name Type`).
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    /// Create an unnamed parameter (`Type`).
    pub fn unnamed(ty: TypeExpr) -> Self {
        Self { name: None, ty }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn ty(&self) -> &TypeExpr {
        &self.ty
    }

    /// Render as `name Type` or `Type`.
    pub fn render(&self, qualifier: &dyn Qualifier) -> String {
        match &self.name {
            Some(name) => format!("{} {}", name, self.ty.render(qualifier)),
            None => self.ty.render(qualifier),
        }
    }
}

impl From<TypeExpr> for Param {
    fn from(ty: TypeExpr) -> Self {
        Self::unnamed(ty)
    }
}

/// Decides how a type from another package is written at the use site.
pub trait Qualifier {
    /// Spell `name` from the package at import path `package`.
    fn qualify(&self, package: &str, name: &str) -> String;
}

/// Qualifies with the alias guessed from the import path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultQualifier;

impl Qualifier for DefaultQualifier {
    fn qualify(&self, package: &str, name: &str) -> String {
        format!("{}.{}", package_alias(package), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_composites() {
        let ty = TypeExpr::map(
            TypeExpr::string(),
            TypeExpr::slice(TypeExpr::pointer(TypeExpr::named("User"))),
        );
        assert_eq!(ty.to_string(), "map[string][]*User");
        assert_eq!(
            TypeExpr::array(16, TypeExpr::named("byte")).to_string(),
            "[16]byte"
        );
        assert_eq!(
            TypeExpr::variadic(TypeExpr::named("any")).to_string(),
            "...any"
        );
    }

    #[test]
    fn test_render_qualified_default() {
        assert_eq!(TypeExpr::context().to_string(), "context.Context");
        assert_eq!(
            TypeExpr::qualified("github.com/jackc/pgx/v5", "Conn").to_string(),
            "pgx.Conn"
        );
    }

    #[test]
    fn test_render_generic() {
        let ty = TypeExpr::generic(
            TypeExpr::qualified("example.com/iter", "Seq2"),
            vec![TypeExpr::string(), TypeExpr::error()],
        );
        assert_eq!(ty.to_string(), "iter.Seq2[string, error]");
    }

    #[test]
    fn test_custom_qualifier() {
        struct Local;
        impl Qualifier for Local {
            fn qualify(&self, _package: &str, name: &str) -> String {
                name.to_string()
            }
        }
        let ty = TypeExpr::pointer(TypeExpr::qualified("example.com/store", "User"));
        assert_eq!(ty.render(&Local), "*User");
    }

    #[test]
    fn test_visit_packages_in_order() {
        let ty = TypeExpr::map(
            TypeExpr::qualified("b", "K"),
            TypeExpr::generic(
                TypeExpr::qualified("a", "G"),
                vec![TypeExpr::qualified("c", "V")],
            ),
        );
        let mut seen = Vec::new();
        ty.visit_packages(&mut |p| seen.push(p));
        assert_eq!(seen, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_render_func() {
        let ty = TypeExpr::func(
            vec![Param::named("ctx", TypeExpr::context())],
            vec![Param::unnamed(TypeExpr::error())],
        );
        assert_eq!(ty.to_string(), "func(ctx context.Context) error");
        assert_eq!(TypeExpr::func(vec![], vec![]).to_string(), "func()");
        assert_eq!(
            TypeExpr::func(
                vec![Param::unnamed(TypeExpr::variadic(TypeExpr::named("any")))],
                vec![
                    Param::unnamed(TypeExpr::named("int")),
                    Param::unnamed(TypeExpr::error())
                ],
            )
            .to_string(),
            "func(...any) (int, error)"
        );
    }

    #[test]
    fn test_render_chan() {
        let event = TypeExpr::qualified("example.com/bus", "Event");
        assert_eq!(
            TypeExpr::chan(ChanDir::Recv, event.clone()).to_string(),
            "<-chan bus.Event"
        );
        assert_eq!(
            TypeExpr::chan(ChanDir::Send, event.clone()).to_string(),
            "chan<- bus.Event"
        );
        assert_eq!(
            TypeExpr::chan(ChanDir::Both, TypeExpr::chan(ChanDir::Recv, event)).to_string(),
            "chan (<-chan bus.Event)"
        );
    }

    #[test]
    fn test_visit_packages_inside_func_and_chan() {
        let ty = TypeExpr::func(
            vec![Param::named("ctx", TypeExpr::context())],
            vec![Param::unnamed(TypeExpr::chan(
                ChanDir::Recv,
                TypeExpr::qualified("example.com/bus", "Event"),
            ))],
        );
        let mut seen = Vec::new();
        ty.visit_packages(&mut |p| seen.push(p));
        assert_eq!(seen, vec!["context", "example.com/bus"]);
    }

    #[test]
    fn test_param_render() {
        assert_eq!(
            Param::named("ctx", TypeExpr::context()).render(&DefaultQualifier),
            "ctx context.Context"
        );
        assert_eq!(
            Param::from(TypeExpr::error()).render(&DefaultQualifier),
            "error"
        );
    }
}
