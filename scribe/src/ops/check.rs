//! Check operation - validation of a project without generating.

use std::path::Path;

use scribe_codegen::generation::RuntimeConfig;
use scribe_manifest::{EntityScope, ScribeToml};
use scribe_model::Model;

use super::error_chain;
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Errors: unreadable model, unknown dialect profile, missing template
/// files and scopes naming entities absent from the model. Per-entity
/// targets whose path ignores the entity are reported as warnings.
pub fn check(file: &ScribeToml, model_path: &Path) -> CheckReport {
    let manifest = file.manifest();
    let config = RuntimeConfig::from_manifest(manifest, file.root());

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    let model = match Model::from_file(model_path) {
        Ok(model) => {
            infos.push(format!(
                "model '{}': {} entities",
                model.name,
                model.entities.len()
            ));
            Some(model)
        }
        Err(err) => {
            errors.push(error_chain(&err));
            None
        }
    };

    match config.sql_mapper() {
        Ok(Some(mapper)) => infos.push(format!(
            "database: {} (tables {}, columns {})",
            mapper.database_name(),
            mapper.table_style(),
            mapper.column_style()
        )),
        Ok(None) => {}
        Err(err) => errors.push(error_chain(&err)),
    }

    for (name, bundle) in &manifest.bundles {
        for target in &bundle.targets {
            if target.scope == EntityScope::Each && !names_entity(&target.file, &target.folder) {
                warnings.push(format!(
                    "bundle '{}': every entity of target '{}' is written to '{}'",
                    name, target.name, target.file
                ));
            }

            let template = config.templates.join(name).join(&target.template);
            if !template.is_file() {
                errors.push(format!(
                    "bundle '{}': template '{}' not found",
                    name,
                    template.display()
                ));
            }

            if let (EntityScope::Entity(entity), Some(model)) = (&target.scope, &model)
                && model.entity(entity).is_none()
            {
                errors.push(format!(
                    "bundle '{}': target '{}' refers to unknown entity '{}'",
                    name, target.name, entity
                ));
            }
        }
    }

    CheckReport {
        config_path: file.path().to_path_buf(),
        errors,
        warnings,
        infos,
    }
}

/// Whether a per-entity path pattern differs between entities.
fn names_entity(file: &str, folder: &str) -> bool {
    [file, folder].iter().any(|p| p.contains("${BEANNAME"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn setup(manifest: &str) -> (TempDir, ScribeToml) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("scribe.toml"), manifest).unwrap();
        fs::write(
            temp.path().join("model.toml"),
            "name = \"m\"\n\n[[entities]]\nname = \"Book\"\n",
        )
        .unwrap();
        fs::create_dir_all(temp.path().join("templates/sql")).unwrap();
        fs::write(temp.path().join("templates/sql/table.sql.j2"), "").unwrap();
        let file = ScribeToml::open(temp.path().join("scribe.toml")).unwrap();
        (temp, file)
    }

    #[test]
    fn test_check_valid_project() {
        let (temp, file) = setup(
            r#"
[project]
name = "demo"
database = "postgresql"

[[bundles.sql.targets]]
name = "Table"
file = "${BEANNAME}.sql"
template = "table.sql.j2"
scope = "Book"
"#,
        );

        let report = check(&file, &temp.path().join("model.toml"));

        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty());
        assert_eq!(
            report.infos,
            vec![
                "model 'm': 1 entities",
                "database: postgresql (tables snake_case, columns snake_case)"
            ]
        );
    }

    #[test]
    fn test_check_reports_problems() {
        let (temp, file) = setup(
            r#"
[project]
name = "demo"
database = "db2"

[[bundles.sql.targets]]
name = "View"
file = "view.sql"
template = "view.sql.j2"
scope = "Author"

[[bundles.sql.targets]]
name = "Grants"
file = "grants.sql"
template = "table.sql.j2"
"#,
        );

        let report = check(&file, &temp.path().join("model.toml"));

        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.errors[0], "database profile 'db2' not found");
        assert!(report.errors[1].ends_with("view.sql.j2' not found"));
        assert_eq!(
            report.errors[2],
            "bundle 'sql': target 'View' refers to unknown entity 'Author'"
        );
        assert_eq!(
            report.warnings,
            vec!["bundle 'sql': every entity of target 'Grants' is written to 'grants.sql'"]
        );
    }

    #[test]
    fn test_names_entity() {
        assert!(names_entity("${BEANNAME}.java", ""));
        assert!(names_entity("entity.md", "docs/${BEANNAME_SNAKE}"));
        assert!(!names_entity("index.md", "${SRC}"));
    }

    #[test]
    fn test_check_missing_model() {
        let (temp, file) = setup("[project]\nname = \"demo\"\n");

        let report = check(&file, &temp.path().join("missing.toml"));

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("failed to read model"));
    }
}
