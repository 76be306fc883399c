//! Database dialect profiles.
//!
//! A profile maps naming-style keys (`conv.tableName`, `conv.columnName`) and
//! neutral-type keys (`type.<neutral>`, `type.<neutral>.autoincr`) to text.
//! Profile files are TOML documents whose tables are flattened into dotted
//! keys:
//!
//! ```toml
//! [conv]
//! tableName = "snake_case"
//! columnName = "snake_case"
//!
//! [type]
//! string = "varchar(%s)"
//! "int.autoincr" = "serial"
//! ```

use std::path::Path;

use indexmap::IndexMap;

use crate::{Error, Result, error::SourceContext, manifest::ParseContext};

const BUILTIN: &[(&str, &str)] = &[
    ("postgresql", include_str!("builtin/postgresql.toml")),
    ("mysql", include_str!("builtin/mysql.toml")),
    ("sqlite", include_str!("builtin/sqlite.toml")),
    ("oracle", include_str!("builtin/oracle.toml")),
    ("sqlserver", include_str!("builtin/sqlserver.toml")),
];

/// Key-value configuration for one database dialect. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectProfile {
    name: String,
    source: String,
    entries: IndexMap<String, String>,
}

impl DialectProfile {
    /// Load one of the profiles shipped with Scribe (`postgres` is accepted
    /// for `postgresql`).
    pub fn builtin(name: &str) -> Result<Self> {
        let key = match name.trim().to_lowercase().as_str() {
            "postgres" => "postgresql".to_string(),
            other => other.to_string(),
        };
        let (found, src) = BUILTIN
            .iter()
            .find(|(builtin, _)| *builtin == key)
            .ok_or_else(|| {
                Box::new(Error::ProfileNotFound {
                    name: name.to_string(),
                    available: Self::builtin_names().join(", "),
                })
            })?;
        Self::parse(src, found, &format!("{}.toml", found))
    }

    /// Names of the built-in profiles.
    pub fn builtin_names() -> Vec<&'static str> {
        BUILTIN.iter().map(|(name, _)| *name).collect()
    }

    /// Load a profile from a TOML file; the file stem becomes the dialect name.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(&content, &name, &path.display().to_string())
    }

    /// Parse profile content. `filename` is used as the source name.
    pub fn parse(content: &str, name: &str, filename: &str) -> Result<Self> {
        let source_ctx = SourceContext::new(content, filename);
        let table: toml::Table = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;

        let ctx = ParseContext::new(content, filename);
        let mut entries = IndexMap::new();
        flatten(&ctx, "", &table, &mut entries)?;

        Ok(Self {
            name: name.to_string(),
            source: filename.to_string(),
            entries,
        })
    }

    /// Build a profile from explicit entries.
    pub fn from_entries<K, V>(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            source: "<memory>".to_string(),
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Dialect name (e.g. `postgresql`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the profile was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Value for `key`, trimmed.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|v| v.trim())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn flatten(
    ctx: &ParseContext<'_>,
    prefix: &str,
    table: &toml::Table,
    out: &mut IndexMap<String, String>,
) -> Result<()> {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::String(s) => {
                out.insert(full, s.clone());
            }
            toml::Value::Table(nested) => flatten(ctx, &full, nested, out)?,
            other => {
                return Err(ctx.error_at(
                    format!(
                        "profile key '{}' must be a string, found {}",
                        full,
                        other.type_str()
                    ),
                    key,
                ));
            }
        }
    }
    Ok(())
}
