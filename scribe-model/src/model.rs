//! The model: a read-only graph of entities.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Entity;

/// Errors raised while loading a model document.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate entity '{0}' in model")]
    DuplicateEntity(String),
}

/// Read-only entity model, queryable by entity class name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Model {
    /// Model name (available to templates and path patterns as `${MODEL}`)
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Model {
    pub fn new(name: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self {
            name: name.into(),
            entities,
        }
    }

    /// Load a model document from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Look up an entity by class name.
    pub fn entity(&self, class_name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == class_name)
    }

    /// Entity names in declaration order.
    pub fn entity_names(&self) -> Vec<String> {
        self.entities.iter().map(|e| e.name.clone()).collect()
    }

    fn check_unique_names(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        for entity in &self.entities {
            if !seen.insert(entity.name.as_str()) {
                return Err(ModelError::DuplicateEntity(entity.name.clone()));
            }
        }
        Ok(())
    }
}

impl FromStr for Model {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let model: Model = toml::from_str(s)?;
        model.check_unique_names()?;
        Ok(model)
    }
}
