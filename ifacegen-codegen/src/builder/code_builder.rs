//! Code builder utility for generating properly indented code.

use super::{CodeFragment, Renderable, comment_lines};

/// Fluent API for building Go source, indented with one tab per level.
///
/// Supports both consuming methods (returning `Self`) for chaining and
/// mutable methods (returning `&mut Self`).
///
/// # Example (Consuming API)
///
/// ```
/// use ifacegen_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::go()
///     .line("type Closer interface {")
///     .indent()
///     .line("Close() error")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "type Closer interface {\n\tClose() error\n}\n");
/// ```
///
/// # Example (Mutable API)
///
/// ```
/// use ifacegen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::go();
/// builder
///     .push_comment("Closer closes things.")
///     .push_line("type Closer interface{}");
/// assert_eq!(builder.build(), "// Closer closes things.\ntype Closer interface{}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    indent_level: usize,
    buffer: String,
}

impl CodeBuilder {
    /// Create an empty builder at indentation level zero.
    pub fn go() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mutable API - methods prefixed with `push_`
    // =========================================================================

    /// Add a line of code with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a Go line comment, one `//` line per line of text (mutable).
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        for line in comment_lines(text) {
            self.push_line(&line);
        }
        self
    }

    /// Emit a Renderable node (mutable).
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Comment(text) => {
                self.push_comment(&text);
            }
        }
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Add a Go line comment.
    pub fn comment(mut self, text: &str) -> Self {
        self.push_comment(text);
        self
    }

    /// Add a block with a closing line.
    ///
    /// # Example
    ///
    /// ```
    /// use ifacegen_codegen::builder::CodeBuilder;
    ///
    /// let code = CodeBuilder::go()
    ///     .block_with_close("import (", ")", |b: CodeBuilder| b.line("\"context\""))
    ///     .build();
    /// assert_eq!(code, "import (\n\t\"context\"\n)\n");
    /// ```
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Emit a Renderable node.
    pub fn node(mut self, node: &impl Renderable) -> Self {
        self.emit(node);
        self
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        self.buffer.extend(std::iter::repeat_n('\t', self.indent_level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let code = CodeBuilder::go().line("package store").build();
        assert_eq!(code, "package store\n");
    }

    #[test]
    fn test_indentation() {
        let code = CodeBuilder::go()
            .line("type Store interface {")
            .indent()
            .line("Close() error")
            .dedent()
            .line("}")
            .build();

        assert_eq!(code, "type Store interface {\n\tClose() error\n}\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let builder = CodeBuilder::go().dedent().dedent();
        assert_eq!(builder.line("x").build(), "x\n");
    }

    #[test]
    fn test_nested_indentation() {
        let code = CodeBuilder::go()
            .indent()
            .indent()
            .line("Close() error")
            .build();
        assert_eq!(code, "\t\tClose() error\n");
    }

    #[test]
    fn test_blank_line() {
        let code = CodeBuilder::go()
            .line("package store")
            .blank()
            .line("type A interface{}")
            .build();

        assert_eq!(code, "package store\n\ntype A interface{}\n");
    }

    #[test]
    fn test_indented_comment() {
        let code = CodeBuilder::go()
            .indent()
            .comment("Close releases resources.\nSafe to call twice.")
            .build();

        assert_eq!(
            code,
            "\t// Close releases resources.\n\t// Safe to call twice.\n"
        );
    }

    #[test]
    fn test_conditional() {
        let with_header = CodeBuilder::go()
            .when(true, |b| b.comment("Code generated. DO NOT EDIT."))
            .line("package store")
            .build();

        let without_header = CodeBuilder::go()
            .when(false, |b| b.comment("Code generated. DO NOT EDIT."))
            .line("package store")
            .build();

        assert_eq!(
            with_header,
            "// Code generated. DO NOT EDIT.\npackage store\n"
        );
        assert_eq!(without_header, "package store\n");
    }

    #[test]
    fn test_each() {
        let code = CodeBuilder::go()
            .each(["\"context\"", "\"io\""], |b, path| b.line(path))
            .build();

        assert_eq!(code, "\"context\"\n\"io\"\n");
    }

    #[test]
    fn test_emit_with_fragments() {
        struct SimpleNode;
        impl Renderable for SimpleNode {
            fn to_fragments(&self) -> Vec<CodeFragment> {
                vec![
                    CodeFragment::comment("comment"),
                    CodeFragment::line("var x = 1"),
                ]
            }
        }

        let mut builder = CodeBuilder::go();
        builder.emit(&SimpleNode);
        assert_eq!(builder.build(), "// comment\nvar x = 1\n");
    }

    #[test]
    fn test_emit_block_fragment() {
        struct BlockNode;
        impl Renderable for BlockNode {
            fn to_fragments(&self) -> Vec<CodeFragment> {
                vec![CodeFragment::Block {
                    header: "func main() {".to_string(),
                    body: vec![CodeFragment::line("println(\"hi\")")],
                    close: Some("}".to_string()),
                }]
            }
        }

        let mut builder = CodeBuilder::go();
        builder.emit(&BlockNode);
        assert_eq!(builder.build(), "func main() {\n\tprintln(\"hi\")\n}\n");
    }
}
