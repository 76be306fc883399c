//! Targets and their resolution from target definitions.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use scribe_core::to_snake_case;
use scribe_manifest::TargetDefinition;
use scribe_model::{Entity, Model};

use super::RuntimeConfig;

/// A resolved unit of generation: template, destination and optional entity.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    definition: TargetDefinition,
    bundle: String,
    file: String,
    folder: String,
    destination: PathBuf,
    template: PathBuf,
    entity: Option<Entity>,
}

impl Target {
    /// Definition this target was resolved from.
    pub fn definition(&self) -> &TargetDefinition {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn bundle(&self) -> &str {
        &self.bundle
    }

    /// Resolved file name.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Resolved folder, relative to the destination folder.
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Full path of the generated file.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Full path of the template.
    pub fn template(&self) -> &Path {
        &self.template
    }

    pub fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    /// Whether an entity is bound to this target.
    pub fn is_bound(&self) -> bool {
        self.entity.is_some()
    }

    /// `folder/file`, as shown in reports.
    pub fn relative_path(&self) -> String {
        if self.folder.is_empty() {
            self.file.clone()
        } else {
            format!("{}/{}", self.folder.trim_end_matches('/'), self.file)
        }
    }
}

/// Resolve a target definition for `entity` (or no entity).
///
/// Variables in the file and folder patterns are substituted, and the
/// destination becomes `destination/folder/file`.
pub fn build_target(
    config: &RuntimeConfig,
    definition: &TargetDefinition,
    bundle: &str,
    model: &Model,
    entity: Option<&Entity>,
) -> Target {
    let variables = variables(config, bundle, model, entity);
    let file = substitute(&definition.file, &variables, false);
    let folder = substitute(&definition.folder, &variables, true);

    let destination = config
        .destination
        .join(folder.trim_start_matches('/'))
        .join(&file);
    let template = config.templates.join(bundle).join(&definition.template);

    Target {
        definition: definition.clone(),
        bundle: bundle.to_string(),
        file,
        folder,
        destination,
        template,
        entity: entity.cloned(),
    }
}

fn variables(
    config: &RuntimeConfig,
    bundle: &str,
    model: &Model,
    entity: Option<&Entity>,
) -> IndexMap<String, String> {
    let mut vars = config.variables.clone();
    vars.insert("MODEL".into(), model.name.clone());
    vars.insert("BUNDLE".into(), bundle.to_string());
    if let Some(entity) = entity {
        vars.insert("BEANNAME".into(), entity.name.clone());
        vars.insert("BEANNAME_LC".into(), entity.name.to_lowercase());
        vars.insert("BEANNAME_UC".into(), entity.name.to_uppercase());
        vars.insert("BEANNAME_SNAKE".into(), to_snake_case(&entity.name));
    }
    vars
}

/// Replace `${NAME}` references. Unknown names are kept as written.
///
/// With `package_to_path`, values of `*_PKG` variables have `.` replaced by
/// `/` (`org.demo` becomes `org/demo`).
fn substitute(pattern: &str, vars: &IndexMap<String, String>, package_to_path: bool) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match vars.get(name) {
            Some(value) if package_to_path && name.ends_with("_PKG") => {
                out.push_str(&value.replace('.', "/"))
            }
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 3]),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
