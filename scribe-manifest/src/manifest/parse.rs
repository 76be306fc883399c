//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "scribe.toml")
    }
}

impl Manifest {
    /// Parse a scribe.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a scribe.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    if manifest.project.max_embedded_depth == 0 {
        return Err(ctx.push("project").error_at(
            "max_embedded_depth must be at least 1",
            "max_embedded_depth",
        ));
    }

    for name in manifest.variables.keys() {
        ctx.push("variables").validate_variable(name)?;
    }

    for (name, bundle) in &manifest.bundles {
        ctx.validate_name(name, "bundle")?;

        let bundle_ctx = ctx.push("bundles").push(name);
        if bundle.targets.is_empty() {
            return Err(bundle_ctx.error_at(format!("bundle '{}' has no targets", name), name));
        }
        for target in &bundle.targets {
            bundle_ctx.validate_target(target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::EntityScope;

    use super::*;

    const MANIFEST: &str = r#"
        [project]
        name = "library"
        database = "postgresql"

        [variables]
        ROOT_PKG = "org.demo.library"
        SRC = "src/main/java"

        [bundles.java-jpa]
        description = "JPA entities"

        [[bundles.java-jpa.targets]]
        name = "JPA entity"
        file = "${BEANNAME}.java"
        folder = "${SRC}/${ROOT_PKG}/entity"
        template = "jpa_entity.j2"
        scope = "*"

        [[bundles.java-jpa.targets]]
        name = "Persistence unit"
        file = "persistence.xml"
        folder = "META-INF"
        template = "persistence_xml.j2"
        scope = "1"
    "#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest: Manifest = MANIFEST.parse().unwrap();

        assert_eq!(manifest.project.name, "library");
        assert_eq!(manifest.project.database.as_deref(), Some("postgresql"));
        assert_eq!(manifest.project.destination, Path::new("generated"));
        assert_eq!(manifest.project.max_embedded_depth, 16);
        assert_eq!(
            manifest.variables.get("ROOT_PKG").map(String::as_str),
            Some("org.demo.library")
        );

        let bundle = manifest.bundle("java-jpa").unwrap();
        assert_eq!(bundle.targets.len(), 2);
        assert_eq!(bundle.targets[0].scope, EntityScope::Each);
        assert_eq!(bundle.targets[1].scope, EntityScope::Once);
    }

    #[test]
    fn test_tables_keep_declaration_order() {
        let manifest: Manifest = r#"
            [project]
            name = "ordered"

            [variables]
            Z_DIR = "z"
            A_DIR = "a"

            [[bundles.zeta.targets]]
            name = "Z"
            file = "z.txt"
            template = "z.j2"

            [[bundles.alpha.targets]]
            name = "A"
            file = "a.txt"
            template = "a.j2"
        "#
        .parse()
        .unwrap();

        assert_eq!(manifest.bundle_names(), vec!["zeta", "alpha"]);
        let vars: Vec<&str> = manifest.variables.keys().map(String::as_str).collect();
        assert_eq!(vars, vec!["Z_DIR", "A_DIR"]);
    }

    #[test]
    fn test_scope_defaults_to_each() {
        let manifest: Manifest = r#"
            [project]
            name = "p"
            [[bundles.b.targets]]
            name = "t"
            file = "${BEANNAME}.txt"
            template = "t.j2"
        "#
        .parse()
        .unwrap();
        assert_eq!(manifest.bundles["b"].targets[0].scope, EntityScope::Each);
        assert_eq!(manifest.bundles["b"].targets[0].folder, "");
    }

    #[test]
    fn test_unknown_bundle() {
        let manifest: Manifest = MANIFEST.parse().unwrap();
        let err = manifest.bundle("python").unwrap_err();
        assert!(matches!(*err, Error::UnknownBundle { ref available, .. } if available == "java-jpa"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = "[project".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_missing_project_name() {
        let err = "[project]\ndatabase = \"mysql\"".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_empty_bundle_rejected() {
        let err = r#"
            [project]
            name = "p"
            [bundles.empty]
            description = "nothing"
        "#
        .parse::<Manifest>()
        .unwrap_err();
        assert!(err.to_string().contains("has no targets"));
    }

    #[test]
    fn test_blank_template_rejected() {
        let err = r#"
            [project]
            name = "p"
            [[bundles.b.targets]]
            name = "t"
            file = "out.txt"
            template = "  "
        "#
        .parse::<Manifest>()
        .unwrap_err();
        assert!(err.to_string().contains("template"));
    }

    #[test]
    fn test_invalid_bundle_name() {
        let err = r#"
            [project]
            name = "p"
            [[bundles."java jpa".targets]]
            name = "t"
            file = "out.txt"
            template = "t.j2"
        "#
        .parse::<Manifest>()
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_invalid_variable_name() {
        let err = r#"
            [project]
            name = "p"
            [variables]
            "ROOT PKG" = "x"
        "#
        .parse::<Manifest>()
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = r#"
            [project]
            name = "p"
            max_embedded_depth = 0
        "#
        .parse::<Manifest>()
        .unwrap_err();
        assert!(err.to_string().contains("max_embedded_depth"));
    }
}
