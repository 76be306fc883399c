//! Generation of targets: entity scope iteration, rendering and output.

use std::{fmt, sync::Arc};

use scribe_core::File;
use scribe_manifest::{Bundle, EntityScope};
use scribe_model::{Entity, Model};
use tracing::{debug, info, info_span};

use super::{EmbeddedGenerator, Ledger, RuntimeConfig, Target, build_target};
use crate::{
    Error, Result,
    engine::{RenderContext, TemplateEngine},
    mappers::{CsharpHelper, SqlMapper},
};

/// Renders targets of one bundle and records them in a [`Ledger`].
///
/// Rendering is synchronous: a target, including every embedded target its
/// template triggers, is complete (or failed) when `generate_target` returns.
/// Errors are never retried and stop the iteration over entities.
#[derive(Clone)]
pub struct Generator {
    config: Arc<RuntimeConfig>,
    bundle: String,
    engine: Arc<dyn TemplateEngine>,
    sql: Option<Arc<SqlMapper>>,
    csharp: Arc<CsharpHelper>,
    depth: usize,
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("bundle", &self.bundle)
            .field("destination", &self.config.destination)
            .field("database", &self.sql.as_ref().map(|s| s.database_name()))
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

impl Generator {
    /// Create a generator for `bundle`.
    ///
    /// The dialect profile, when configured, is loaded here and shared by
    /// every render of the run.
    pub fn new(
        config: RuntimeConfig,
        bundle: impl Into<String>,
        engine: Arc<dyn TemplateEngine>,
    ) -> Result<Self> {
        let sql = config.sql_mapper()?.map(Arc::new);
        Ok(Self {
            config: Arc::new(config),
            bundle: bundle.into(),
            engine,
            sql,
            csharp: Arc::new(CsharpHelper::new()),
            depth: 0,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn bundle(&self) -> &str {
        &self.bundle
    }

    /// Embedded generation nesting level (0 for top-level generation).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Generator for targets embedded by a template rendered by `self`.
    pub(crate) fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    /// Generate `target`.
    ///
    /// - bound to an entity: rendered once for that entity
    /// - scope `*`: rendered once per selected entity, in order
    /// - scope naming an entity: rendered once for that entity
    /// - scope `1`: rendered once without an entity
    pub fn generate_target(
        &self,
        target: &Target,
        model: &Arc<Model>,
        selected: &Arc<[String]>,
        ledger: &Ledger,
    ) -> Result<()> {
        if target.is_bound() {
            return self.render(target, model, selected, ledger);
        }

        match &target.definition().scope {
            EntityScope::Each => {
                for name in selected.iter() {
                    let entity = find_entity(model, name)?;
                    let resolved = self.resolve(target, model, entity);
                    self.render(&resolved, model, selected, ledger)?;
                }
                Ok(())
            }
            EntityScope::Entity(name) => {
                let entity = find_entity(model, name)?;
                let resolved = self.resolve(target, model, entity);
                self.render(&resolved, model, selected, ledger)
            }
            EntityScope::Once => self.render(target, model, selected, ledger),
        }
    }

    /// Generate every target of `bundle`, in declaration order.
    pub fn generate_bundle(
        &self,
        bundle: &Bundle,
        model: &Arc<Model>,
        selected: &Arc<[String]>,
        ledger: &Ledger,
    ) -> Result<()> {
        for definition in &bundle.targets {
            let target = build_target(&self.config, definition, &self.bundle, model, None);
            self.generate_target(&target, model, selected, ledger)?;
        }
        Ok(())
    }

    fn resolve(&self, target: &Target, model: &Model, entity: &Entity) -> Target {
        build_target(
            &self.config,
            target.definition(),
            &self.bundle,
            model,
            Some(entity),
        )
    }

    fn render(
        &self,
        target: &Target,
        model: &Arc<Model>,
        selected: &Arc<[String]>,
        ledger: &Ledger,
    ) -> Result<()> {
        let span = info_span!(
            "target",
            name = target.name(),
            entity = target.entity().map(|e| e.name.as_str()).unwrap_or("-"),
            depth = self.depth,
        );
        let _enter = span.enter();

        let reservation = ledger.reserve();
        let context = self.context(target, model, selected, ledger);

        debug!(template = %target.template().display(), "rendering template");
        let content = self.engine.render(target.template(), &context)?;

        let file = File::new(target.destination(), content);
        file.write()
            .map_err(|e| Error::io(target.destination(), e))?;
        info!(path = %target.destination().display(), "generated");

        ledger.commit(reservation, target.clone());
        Ok(())
    }

    fn context(
        &self,
        target: &Target,
        model: &Arc<Model>,
        selected: &Arc<[String]>,
        ledger: &Ledger,
    ) -> RenderContext {
        let bridge = EmbeddedGenerator::new(
            self.nested(),
            Arc::clone(model),
            Arc::clone(selected),
            ledger.clone(),
        );
        RenderContext {
            target: target.clone(),
            model: Arc::clone(model),
            selected_entities: Arc::clone(selected),
            variables: self.config.variables.clone(),
            sql: self.sql.clone(),
            csharp: Arc::clone(&self.csharp),
            generator: Arc::new(bridge),
        }
    }
}

fn find_entity<'m>(model: &'m Model, name: &str) -> Result<&'m Entity> {
    model
        .entity(name)
        .ok_or_else(|| Error::not_found(format!("entity '{}' not found in model", name)))
}
