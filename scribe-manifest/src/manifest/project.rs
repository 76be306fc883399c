use std::path::PathBuf;

use serde::Deserialize;

/// Project settings (`[project]` table).
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Folder receiving generated files, relative to scribe.toml
    #[serde(default = "default_destination")]
    pub destination: PathBuf,

    /// Folder holding one sub-folder per bundle, relative to scribe.toml
    #[serde(default = "default_templates")]
    pub templates: PathBuf,

    /// Target database dialect (enables `sql` in templates)
    pub database: Option<String>,

    /// Custom dialect profile file, replacing the built-in profile
    pub database_profile: Option<PathBuf>,

    /// Maximum nesting of embedded generations
    #[serde(default = "default_max_embedded_depth")]
    pub max_embedded_depth: usize,
}

fn default_destination() -> PathBuf {
    PathBuf::from("generated")
}

fn default_templates() -> PathBuf {
    PathBuf::from("templates")
}

/// Default for `max_embedded_depth`.
pub const DEFAULT_MAX_EMBEDDED_DEPTH: usize = 16;

fn default_max_embedded_depth() -> usize {
    DEFAULT_MAX_EMBEDDED_DEPTH
}
