//! Generate operation - renders the targets of a bundle.

use std::sync::Arc;

use eyre::{Context, Result};
use scribe_codegen::{
    engine::MiniJinjaEngine,
    generation::{Generator, Ledger, RuntimeConfig, build_target},
};
use scribe_manifest::{Bundle, ScribeToml};
use scribe_model::Model;
use tracing::{info, warn};

use super::error_chain;
use crate::reports::{GenerateReport, GeneratedFile, TargetFailure};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Bundle name, as declared in scribe.toml
    pub bundle: &'a str,
    /// Entities to generate for (all model entities when empty)
    pub entities: &'a [String],
    /// Continue with the next target definition after a failure
    pub keep_going: bool,
}

/// Execute the generate operation.
///
/// Target definitions are rendered in declaration order. Without
/// `keep_going` the first failure aborts the run.
pub fn generate(
    file: &ScribeToml,
    bundle: &Bundle,
    model: Model,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    let manifest = file.manifest();
    let config = RuntimeConfig::from_manifest(manifest, file.root());
    let destination = config.destination.clone();

    let generator = Generator::new(config, opts.bundle, Arc::new(MiniJinjaEngine::new()))
        .wrap_err("failed to prepare generation")?;

    let selected: Arc<[String]> = if opts.entities.is_empty() {
        model.entity_names().into()
    } else {
        opts.entities.into()
    };
    let model = Arc::new(model);
    let ledger = Ledger::new();

    info!(
        bundle = opts.bundle,
        entities = selected.len(),
        targets = bundle.targets.len(),
        "starting generation"
    );

    let mut failures = Vec::new();
    for definition in &bundle.targets {
        let target = build_target(generator.config(), definition, opts.bundle, &model, None);
        if let Err(err) = generator.generate_target(&target, &model, &selected, &ledger) {
            if !opts.keep_going {
                return Err(err)
                    .wrap_err_with(|| format!("target '{}' failed", definition.name));
            }
            warn!(name = %definition.name, error = %err, "target failed, continuing");
            failures.push(TargetFailure {
                target: definition.name.clone(),
                message: error_chain(&err),
            });
        }
    }

    let generated = ledger
        .targets()
        .iter()
        .map(|t| GeneratedFile {
            target: t.name().to_string(),
            entity: t.entity().map(|e| e.name.clone()),
            path: t.relative_path(),
        })
        .collect();

    Ok(GenerateReport {
        project: manifest.project.name.clone(),
        bundle: opts.bundle.to_string(),
        destination,
        entities: selected.to_vec(),
        generated,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const MANIFEST: &str = r#"
[project]
name = "library"
destination = "out"

[bundles.docs]
description = "Entity documentation"

[[bundles.docs.targets]]
name = "Entity page"
file = "${BEANNAME_SNAKE}.md"
folder = "entities"
template = "entity.md.j2"

[[bundles.docs.targets]]
name = "Index"
file = "index.md"
template = "index.md.j2"
scope = "1"
"#;

    const MODEL: &str = r#"
name = "library"

[[entities]]
name = "Book"

[[entities.attributes]]
name = "title"
type = "string"

[[entities]]
name = "LibraryMember"
"#;

    const UNKNOWN_ENTITY: &str =
        "{{ generator.generate(\"Ghost\", \"g.md\", \"g\", \"entity.md.j2\") }}";

    fn project(index_template: &str) -> (TempDir, ScribeToml, Model) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("scribe.toml"), MANIFEST).unwrap();
        let templates = temp.path().join("templates/docs");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("entity.md.j2"), "# {{ entity.name }}\n").unwrap();
        fs::write(templates.join("index.md.j2"), index_template).unwrap();

        let file = ScribeToml::open(temp.path().join("scribe.toml")).unwrap();
        let model: Model = MODEL.parse().unwrap();
        (temp, file, model)
    }

    fn options(keep_going: bool) -> GenerateOptions<'static> {
        GenerateOptions {
            bundle: "docs",
            entities: &[],
            keep_going,
        }
    }

    #[test]
    fn test_generate_bundle() {
        let (temp, file, model) =
            project("{% for name in selected_entities %}- {{ name }}\n{% endfor %}");
        let bundle = file.manifest().bundle("docs").unwrap().clone();

        let report = generate(&file, &bundle, model, options(false)).unwrap();

        let paths: Vec<_> = report.generated.iter().map(|g| g.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["entities/book.md", "entities/library_member.md", "index.md"]
        );
        assert!(report.failures.is_empty());
        assert_eq!(
            fs::read_to_string(temp.path().join("out/index.md")).unwrap(),
            "- Book\n- LibraryMember\n"
        );
    }

    #[test]
    fn test_generate_stops_at_first_failure() {
        let (_temp, file, model) = project(UNKNOWN_ENTITY);
        let mut bundle = file.manifest().bundle("docs").unwrap().clone();
        bundle.targets.reverse();

        let err = generate(&file, &bundle, model, options(false)).unwrap_err();
        assert_eq!(err.to_string(), "target 'Index' failed");
    }

    #[test]
    fn test_generate_keep_going() {
        let (temp, file, model) = project(UNKNOWN_ENTITY);
        let mut bundle = file.manifest().bundle("docs").unwrap().clone();
        bundle.targets.reverse();

        let report = generate(&file, &bundle, model, options(true)).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].target, "Index");
        assert_eq!(report.generated.len(), 2);
        assert!(temp.path().join("out/entities/book.md").is_file());
    }

    #[test]
    fn test_generate_selected_entities() {
        let (_temp, file, model) = project("index\n");
        let bundle = file.manifest().bundle("docs").unwrap().clone();
        let entities = vec!["LibraryMember".to_string()];
        let opts = GenerateOptions {
            bundle: "docs",
            entities: &entities,
            keep_going: false,
        };

        let report = generate(&file, &bundle, model, opts).unwrap();

        assert_eq!(report.entities, vec!["LibraryMember"]);
        assert_eq!(report.generated[0].entity.as_deref(), Some("LibraryMember"));
        assert_eq!(report.generated.len(), 2);
    }
}
