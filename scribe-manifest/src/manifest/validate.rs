//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use super::TargetDefinition;
use crate::{Error, Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Holds the source content, the filename and the current path through the
/// manifest hierarchy (e.g. `bundles.java-jpa`) used in error messages.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["bundles", "java-jpa"])
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

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "target in 'bundles.java-jpa'" or just "bundle" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Validation error located at the first occurrence of `needle`.
    pub fn error_at(&self, message: impl Into<String>, needle: &str) -> Box<Error> {
        self.source
            .validation_error_at(message, self.find_span(needle))
    }

    /// Validate a bundle name (letters, digits, `_` and `-`).
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        match validate_identifier(name, true) {
            None => Ok(()),
            Some(reason) => Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            )),
        }
    }

    /// Validate a variable name (letters, digits and `_`).
    pub fn validate_variable(&self, name: &str) -> Result<()> {
        match validate_identifier(name, false) {
            None => Ok(()),
            Some(reason) => Err(self.source.invalid_identifier_error(
                name,
                self.context_for("variable"),
                reason,
                self.find_span(name),
            )),
        }
    }

    /// Validate that the mandatory fields of a target definition are set.
    pub fn validate_target(&self, target: &TargetDefinition) -> Result<()> {
        let fields = [
            ("name", target.name.as_str()),
            ("file", target.file.as_str()),
            ("template", target.template.as_str()),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                let message = format!(
                    "target '{}' in '{}' has an empty {}",
                    target.name,
                    self.path_string(),
                    field
                );
                return Err(self.error_at(message, &target.name));
            }
        }
        Ok(())
    }
}

/// Find the span of a name in the TOML source.
///
/// Looks for table-header (`.name]`, `.name.`) and `name = "value"` forms.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    if name.is_empty() {
        return None;
    }

    for pattern in [format!(".{}]", name), format!(".{}.", name)] {
        if let Some(pos) = src.find(&pattern) {
            // +1 to skip the leading dot
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    for quote in ['"', '\''] {
        let pattern = format!("{quote}{name}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    for pattern in [format!("{} =", name), format!("{}=", name)] {
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos, name.len())));
        }
    }

    None
}

/// Validate an identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str, allow_dash: bool) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    for c in chars {
        let valid = c.is_ascii_alphanumeric() || c == '_' || (allow_dash && c == '-');
        if !valid {
            return Some(if allow_dash {
                "name must contain only letters, numbers, underscores, and dashes"
            } else {
                "name must contain only letters, numbers, and underscores"
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert_eq!(validate_identifier("java-jpa", true), None);
        assert_eq!(validate_identifier("ROOT_PKG", false), None);
        assert!(validate_identifier("java-jpa", false).is_some());
        assert!(validate_identifier("1bundle", true).is_some());
        assert!(validate_identifier("", true).is_some());
        assert!(validate_identifier("a b", true).is_some());
    }

    #[test]
    fn test_find_name_span_table_header() {
        let src = "[bundles.java]\n";
        let span = find_name_span(src, "java").unwrap();
        assert_eq!(span.offset(), 9);
        assert_eq!(span.len(), 4);
    }

    #[test]
    fn test_find_name_span_quoted_value() {
        let src = "name = \"Entity\"\n";
        let span = find_name_span(src, "Entity").unwrap();
        assert_eq!(span.offset(), 8);
    }

    #[test]
    fn test_find_name_span_missing() {
        assert!(find_name_span("[project]", "nothing").is_none());
    }

    #[test]
    fn test_context_for() {
        let ctx = ParseContext::new("", "scribe.toml");
        assert_eq!(ctx.context_for("bundle"), "bundle");
        let nested = ctx.push("bundles").push("web");
        assert_eq!(nested.context_for("target"), "target in 'bundles.web'");
    }
}
