//! Template engines and the context they render against.

mod jinja;

use std::{path::Path, sync::Arc};

use indexmap::IndexMap;
use scribe_model::{Attribute, Entity, Model};

pub use jinja::MiniJinjaEngine;
use crate::{
    Result,
    generation::{EmbeddedGenerator, Target},
    mappers::{CsharpHelper, SqlMapper},
};

/// Renders a template file against a [`RenderContext`].
///
/// Errors raised by an embedded generation during the render must be
/// returned unchanged so that a deep failure aborts the whole chain with its
/// original cause.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &Path, context: &RenderContext) -> Result<String>;
}

impl<F> TemplateEngine for F
where
    F: Fn(&Path, &RenderContext) -> Result<String> + Send + Sync,
{
    fn render(&self, template: &Path, context: &RenderContext) -> Result<String> {
        self(template, context)
    }
}

/// Everything a template can see while rendering one target.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub target: Target,
    pub model: Arc<Model>,
    /// Entities selected for the run, in order
    pub selected_entities: Arc<[String]>,
    /// Project variables
    pub variables: IndexMap<String, String>,
    /// Present when a database dialect is configured
    pub sql: Option<Arc<SqlMapper>>,
    pub csharp: Arc<CsharpHelper>,
    /// Embedded generation bridge, exposed as `generator`
    pub generator: Arc<EmbeddedGenerator>,
}

impl RenderContext {
    /// Entity bound to the target, if any.
    pub fn entity(&self) -> Option<&Entity> {
        self.target.entity()
    }

    /// Attributes of the bound entity (empty without one).
    pub fn attributes(&self) -> &[Attribute] {
        self.entity().map(|e| e.attributes.as_slice()).unwrap_or(&[])
    }
}
