//! Embedded generation: a template asks for another target to be generated.

use std::sync::Arc;

use scribe_manifest::TargetDefinition;
use scribe_model::Model;
use tracing::debug;

use super::{Generator, Ledger, build_target};
use crate::{Error, Result};

const ERROR_PREFIX: &str = "error in embedded generator";

/// Bridge exposed to templates as `generator`.
///
/// `generate` resolves a new target with the configuration and bundle of the
/// enclosing run and generates it before returning, recording it in the same
/// ledger. A disabled bridge refuses every call.
#[derive(Debug)]
pub struct EmbeddedGenerator {
    inner: Option<Inner>,
}

#[derive(Debug)]
struct Inner {
    generator: Generator,
    model: Arc<Model>,
    selected: Arc<[String]>,
    ledger: Ledger,
}

impl EmbeddedGenerator {
    pub fn new(
        generator: Generator,
        model: Arc<Model>,
        selected: Arc<[String]>,
        ledger: Ledger,
    ) -> Self {
        Self {
            inner: Some(Inner {
                generator,
                model,
                selected,
                ledger,
            }),
        }
    }

    /// A bridge that cannot generate anything.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub fn name(&self) -> &'static str {
        "Scribe embedded generator"
    }

    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Generate `template_file` for the entity named `entity_class_name` into
    /// `output_folder/output_file`.
    pub fn generate(
        &self,
        entity_class_name: &str,
        output_file: &str,
        output_folder: &str,
        template_file: &str,
    ) -> Result<()> {
        let Some(inner) = &self.inner else {
            return Err(Error::configuration(format!(
                "{} (embedded generator is not able to generate, environment is not available)",
                ERROR_PREFIX
            )));
        };

        for (value, what) in [
            (entity_class_name, "entity class name"),
            (output_file, "output file"),
            (output_folder, "output folder"),
            (template_file, "template file"),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_argument(format!(
                    "{} ({} is missing)",
                    ERROR_PREFIX, what
                )));
            }
        }

        let entity = inner.model.entity(entity_class_name.trim()).ok_or_else(|| {
            Error::not_found(format!(
                "{} (entity '{}' not found in model)",
                ERROR_PREFIX, entity_class_name
            ))
        })?;

        let generator = &inner.generator;
        let max_depth = generator.config().max_embedded_depth;
        if generator.depth() > max_depth {
            return Err(Error::configuration(format!(
                "{} (maximum embedded generation depth {} exceeded)",
                ERROR_PREFIX, max_depth
            )));
        }

        let definition = TargetDefinition::dynamic(output_file, output_folder, template_file);
        let target = build_target(
            generator.config(),
            &definition,
            generator.bundle(),
            &inner.model,
            Some(entity),
        );
        debug!(
            entity = %entity.name,
            file = target.file(),
            depth = generator.depth(),
            "embedded generation"
        );
        generator.generate_target(&target, &inner.model, &inner.selected, &inner.ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_disabled_refuses_every_call() {
        let bridge = EmbeddedGenerator::disabled();
        assert!(!bridge.is_enabled());
        for args in [("Car", "a.txt", "out", "t.j2"), ("", "", "", "")] {
            let err = bridge.generate(args.0, args.1, args.2, args.3).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }
    }

    #[test]
    fn test_metadata() {
        let bridge = EmbeddedGenerator::disabled();
        assert_eq!(bridge.name(), "Scribe embedded generator");
        assert_eq!(bridge.version(), env!("CARGO_PKG_VERSION"));
    }
}
