//! Bundles and target definitions.

use std::fmt;

use serde::Deserialize;

/// A named set of target definitions rendered together.
#[derive(Debug, Clone, Deserialize)]
pub struct Bundle {
    /// Bundle description for `scribe list`
    pub description: Option<String>,

    /// Target definitions in declaration order
    #[serde(default)]
    pub targets: Vec<TargetDefinition>,
}

/// Which entities a target definition is rendered for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum EntityScope {
    /// `*`: once per selected entity
    Each,
    /// `1`: once per run, without an entity
    Once,
    /// A specific entity name
    Entity(String),
}

impl TryFrom<String> for EntityScope {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim() {
            "" => Err("scope cannot be empty, use '*', '1' or an entity name".to_string()),
            "*" => Ok(EntityScope::Each),
            "1" => Ok(EntityScope::Once),
            name => Ok(EntityScope::Entity(name.to_string())),
        }
    }
}

impl fmt::Display for EntityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityScope::Each => f.write_str("*"),
            EntityScope::Once => f.write_str("1"),
            EntityScope::Entity(name) => f.write_str(name),
        }
    }
}

fn default_scope() -> EntityScope {
    EntityScope::Each
}

/// Definition of a target: which template produces which file.
///
/// `file` and `folder` are patterns that may reference variables such as
/// `${BEANNAME}` or project variables; they are resolved per entity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetDefinition {
    /// Human readable target name
    pub name: String,

    /// Output file name pattern
    pub file: String,

    /// Output folder pattern, relative to the destination folder
    #[serde(default)]
    pub folder: String,

    /// Template file, relative to the bundle folder
    pub template: String,

    /// Entity scope selector
    #[serde(default = "default_scope")]
    pub scope: EntityScope,
}

impl TargetDefinition {
    pub fn new(
        name: impl Into<String>,
        file: impl Into<String>,
        folder: impl Into<String>,
        template: impl Into<String>,
        scope: EntityScope,
    ) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            folder: folder.into(),
            template: template.into(),
            scope,
        }
    }

    /// Definition built on the fly by a template (no entity-name filter).
    pub fn dynamic(
        file: impl Into<String>,
        folder: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self::new("Dynamic target", file, folder, template, EntityScope::Each)
    }
}
