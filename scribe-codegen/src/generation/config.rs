//! Runtime configuration shared by every target of a run.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use scribe_manifest::{DEFAULT_MAX_EMBEDDED_DEPTH, DialectProfile, Manifest};

use crate::{Result, mappers::SqlMapper};

/// Settings resolved from `scribe.toml`, with paths made absolute against
/// the manifest folder.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub project_name: String,
    /// Folder receiving generated files
    pub destination: PathBuf,
    /// Folder holding one sub-folder per bundle
    pub templates: PathBuf,
    /// Project variables for path patterns and templates
    pub variables: IndexMap<String, String>,
    /// Built-in dialect name
    pub database: Option<String>,
    /// Custom dialect profile file
    pub database_profile: Option<PathBuf>,
    pub max_embedded_depth: usize,
}

impl RuntimeConfig {
    pub fn new(destination: impl Into<PathBuf>, templates: impl Into<PathBuf>) -> Self {
        Self {
            project_name: String::new(),
            destination: destination.into(),
            templates: templates.into(),
            variables: IndexMap::new(),
            database: None,
            database_profile: None,
            max_embedded_depth: DEFAULT_MAX_EMBEDDED_DEPTH,
        }
    }

    pub fn from_manifest(manifest: &Manifest, root: &Path) -> Self {
        let project = &manifest.project;
        Self {
            project_name: project.name.clone(),
            destination: root.join(&project.destination),
            templates: root.join(&project.templates),
            variables: manifest.variables.clone(),
            database: project.database.clone(),
            database_profile: project.database_profile.as_ref().map(|p| root.join(p)),
            max_embedded_depth: project.max_embedded_depth,
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_max_embedded_depth(mut self, depth: usize) -> Self {
        self.max_embedded_depth = depth;
        self
    }

    /// Mapping engine for the configured dialect, if any.
    ///
    /// A custom profile file takes precedence over the built-in profile.
    pub fn sql_mapper(&self) -> Result<Option<SqlMapper>> {
        let profile = match (&self.database_profile, &self.database) {
            (Some(path), _) => DialectProfile::from_file(path)?,
            (None, Some(name)) => DialectProfile::builtin(name)?,
            (None, None) => return Ok(None),
        };
        SqlMapper::new(profile).map(Some)
    }
}
