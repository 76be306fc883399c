//! Manifest types and parsing for scribe.toml files.

mod bundle;
mod file;
mod parse;
mod project;
mod validate;

pub use bundle::{Bundle, EntityScope, TargetDefinition};
pub use file::ScribeToml;
use indexmap::IndexMap;
pub use parse::parse_manifest;
pub use project::{DEFAULT_MAX_EMBEDDED_DEPTH, ProjectConfig};
use serde::Deserialize;
pub use validate::ParseContext;

use crate::{Error, Result};

/// Root manifest for scribe.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Project settings
    pub project: ProjectConfig,

    /// Project variables, usable in path patterns as `${NAME}`
    #[serde(default)]
    pub variables: IndexMap<String, String>,

    /// Template bundles, in declaration order
    #[serde(default)]
    pub bundles: IndexMap<String, Bundle>,
}

impl Manifest {
    /// Look up a bundle by name.
    pub fn bundle(&self, name: &str) -> Result<&Bundle> {
        self.bundles.get(name).ok_or_else(|| {
            Box::new(Error::UnknownBundle {
                name: name.to_string(),
                available: self.bundle_names().join(", "),
            })
        })
    }

    /// Bundle names in declaration order.
    pub fn bundle_names(&self) -> Vec<&str> {
        self.bundles.keys().map(String::as_str).collect()
    }
}
