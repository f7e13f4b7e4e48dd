//! Renderable trait and CodeFragment for decoupled code generation.
//!
//! This module provides abstractions that allow declarations to be composed
//! and rendered without direct coupling to CodeBuilder.

/// Represents a fragment of generated code.
///
/// CodeFragments form an intermediate representation between descriptors
/// and the final string output, enabling composition and transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    Line(String),
    /// A block with header, body fragments, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// A Go line comment, one `//` line per line of text.
    Comment(String),
}

impl CodeFragment {
    /// Create a line fragment.
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// Create a block fragment.
    pub fn block(
        header: impl Into<String>,
        body: Vec<CodeFragment>,
        close: Option<String>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    /// Create a comment fragment.
    pub fn comment(s: impl Into<String>) -> Self {
        Self::Comment(s.into())
    }
}

/// Split comment text into the lines a Go source file carries.
///
/// Text that already starts with `//` or `/*` is passed through untouched.
/// Otherwise every line gets a `// ` prefix, and empty lines become `//`.
pub fn comment_lines(text: &str) -> Vec<String> {
    if text.starts_with("//") || text.starts_with("/*") {
        return text.lines().map(str::to_string).collect();
    }
    text.lines()
        .map(|line| {
            if line.is_empty() {
                "//".to_string()
            } else {
                format!("// {}", line)
            }
        })
        .collect()
}

/// Trait for types that can be rendered to code fragments.
///
/// Implement this trait for declarations to enable them to be rendered
/// through CodeBuilder without direct coupling.
pub trait Renderable {
    /// Convert this node to a sequence of code fragments.
    fn to_fragments(&self) -> Vec<CodeFragment>;
}
