//! Line builder that keeps indentation levels separate from text.

use super::Indent;

/// Records `(level, text)` pairs and only turns levels into whitespace when
/// the result is built, so the same fragment can be emitted with tabs or
/// spaces.
///
/// # Example
///
/// ```
/// use scribe_codegen::builder::{Indent, LinesBuilder};
///
/// let mut lines = LinesBuilder::new(Indent::Spaces(2));
/// lines
///     .append(0, "public override string ToString()")
///     .append(0, "{")
///     .append(1, "return \"Car\";")
///     .append(0, "}");
///
/// assert_eq!(
///     lines.build(),
///     "public override string ToString()\n{\n  return \"Car\";\n}\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinesBuilder {
    indent: Indent,
    lines: Vec<(usize, String)>,
}

impl LinesBuilder {
    /// Create a new builder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent,
            lines: Vec::new(),
        }
    }

    /// Create a new builder with tab indentation.
    pub fn tabs() -> Self {
        Self::new(Indent::Tab)
    }

    /// Add a line at the given indentation level.
    pub fn append(&mut self, level: usize, text: impl Into<String>) -> &mut Self {
        self.lines.push((level, text.into()));
        self
    }

    pub fn indent(&self) -> Indent {
        self.indent
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render every line, each terminated by `\n`.
    pub fn build(&self) -> String {
        let unit = self.indent.unit();
        let mut out = String::new();
        for (level, text) in &self.lines {
            for _ in 0..*level {
                out.push_str(&unit);
            }
            out.push_str(text);
            out.push('\n');
        }
        out
    }
}
