//! Go interface descriptors.
//!
//! An [`InterfaceDescriptor`] holds the declarative description of a named
//! interface and renders it on demand:
//!
//! ```text
//! // Store persists users.
//! type Store interface {
//! 	// Get loads a user by id.
//! 	Get(ctx context.Context, id string) (*User, error)
//! }
//! ```
//!
//! Nothing is validated here. Identifier legality and name collisions are
//! the caller's concern; malformed input renders deterministically.

use indexmap::IndexSet;

use crate::{
    builder::{CodeBuilder, CodeFragment, Renderable},
    types::{DefaultQualifier, Param, Qualifier, render_signature},
};

/// A (package, name) pair identifying where a type lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedRef {
    pub package: String,
    pub name: String,
}

impl QualifiedRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

/// One method of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    name: String,
    params: Vec<Param>,
    returns: Vec<Param>,
    comment: Option<String>,
}

impl MethodSignature {
    /// Create a method with no parameters, no returns and no comment.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: Vec::new(),
            comment: None,
        }
    }

    /// Append a parameter.
    pub fn param(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Append several parameters.
    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    /// Append a return value.
    pub fn returns(mut self, ret: impl Into<Param>) -> Self {
        self.returns.push(ret.into());
        self
    }

    /// Append several return values.
    pub fn returns_all(mut self, returns: impl IntoIterator<Item = Param>) -> Self {
        self.returns.extend(returns);
        self
    }

    /// Set the method comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_list(&self) -> &[Param] {
        &self.params
    }

    pub fn return_list(&self) -> &[Param] {
        &self.returns
    }

    /// The comment, if present and non-empty.
    pub fn doc(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }

    /// Render the signature line, e.g. `Get(id string) (*User, error)`.
    pub fn signature(&self, qualifier: &dyn Qualifier) -> String {
        format!(
            "{}{}",
            self.name,
            render_signature(&self.params, &self.returns, qualifier)
        )
    }

    fn to_fragments_with(&self, qualifier: &dyn Qualifier) -> Vec<CodeFragment> {
        let mut fragments = Vec::with_capacity(2);
        if let Some(doc) = self.doc() {
            fragments.push(CodeFragment::comment(doc));
        }
        fragments.push(CodeFragment::line(self.signature(qualifier)));
        fragments
    }
}

/// Declarative description of a Go interface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    qualified: QualifiedRef,
    name: String,
    methods: Vec<MethodSignature>,
    comment: Option<String>,
}

impl InterfaceDescriptor {
    /// Create a descriptor for interface `name` living in `package`.
    ///
    /// Methods render in the order given.
    pub fn new(
        package: impl Into<String>,
        name: impl Into<String>,
        methods: Vec<MethodSignature>,
        comment: Option<String>,
    ) -> Self {
        let name = name.into();
        Self {
            qualified: QualifiedRef::new(package, name.clone()),
            name,
            methods,
            comment,
        }
    }

    /// Where this interface lives, for callers that reference it elsewhere.
    pub fn qualified(&self) -> &QualifiedRef {
        &self.qualified
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn methods(&self) -> &[MethodSignature] {
        &self.methods
    }

    /// The comment, if present and non-empty.
    pub fn doc(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }

    /// Import paths referenced by the method signatures, first use first.
    pub fn imports(&self) -> IndexSet<&str> {
        let mut packages = IndexSet::new();
        for method in &self.methods {
            for param in method.params.iter().chain(&method.returns) {
                param.ty().visit_packages(&mut |p| {
                    packages.insert(p);
                });
            }
        }
        packages
    }

    /// Render to fragments, spelling foreign packages through `qualifier`.
    pub fn to_fragments_with(&self, qualifier: &dyn Qualifier) -> Vec<CodeFragment> {
        let mut fragments = Vec::with_capacity(2);
        if let Some(doc) = self.doc() {
            fragments.push(CodeFragment::comment(doc));
        }

        if self.methods.is_empty() {
            fragments.push(CodeFragment::line(format!(
                "type {} interface{{}}",
                self.name
            )));
        } else {
            let body = self
                .methods
                .iter()
                .flat_map(|m| m.to_fragments_with(qualifier))
                .collect();
            fragments.push(CodeFragment::block(
                format!("type {} interface {{", self.name),
                body,
                Some("}".to_string()),
            ));
        }
        fragments
    }

    /// Render the interface to a CodeBuilder.
    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        builder.node(self)
    }

    /// Build the interface declaration as a string.
    pub fn build(&self) -> String {
        self.render(CodeBuilder::go()).build()
    }

    /// Build the declaration, spelling foreign packages through `qualifier`.
    pub fn build_with(&self, qualifier: &dyn Qualifier) -> String {
        let mut builder = CodeBuilder::go();
        for fragment in self.to_fragments_with(qualifier) {
            builder.apply_fragment(fragment);
        }
        builder.build()
    }
}

impl Renderable for InterfaceDescriptor {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.to_fragments_with(&DefaultQualifier)
    }
}
