//! MiniJinja-backed template engine.
//!
//! Templates see:
//!
//! | name | value |
//! |---|---|
//! | `entity` | bound entity (or none) |
//! | `attributes` | attributes of the bound entity |
//! | `target` | `name`, `file`, `folder`, `bundle`, `destination`, `template` |
//! | `model` | the whole model |
//! | `selected_entities` | entity names selected for the run |
//! | `vars` | project variables |
//! | `sql` | database helpers, when a dialect is configured |
//! | `csharp` | C# helpers |
//! | `generator` | `name`, `version`, `generate(entity, file, folder, template)` |

use std::{
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};

use minijinja::{
    AutoEscape, Environment, ErrorKind as JinjaErrorKind, State, context,
    value::{Object, ObjectRepr, Value, ValueKind, ViaDeserialize, from_args},
};
use scribe_model::{Attribute, Entity, NeutralType};
use serde::Serialize;
use tracing::debug;

use super::{RenderContext, TemplateEngine};
use crate::{
    Error, Result,
    builder::Indent,
    generation::EmbeddedGenerator,
    mappers::{CsharpHelper, DecimalSize, SqlMapper},
};

type JinjaResult<T> = std::result::Result<T, minijinja::Error>;

/// Template engine rendering template files with MiniJinja.
#[derive(Debug, Clone, Default)]
pub struct MiniJinjaEngine {
    _private: (),
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template: &Path, ctx: &RenderContext) -> Result<String> {
        let source = std::fs::read_to_string(template).map_err(|e| Error::io(template, e))?;

        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        // no HTML escaping, even for .html and .xml templates
        env.set_auto_escape_callback(|_| AutoEscape::None);

        let failure = Failure::default();
        let sql = ctx.sql.as_ref().map(|sql| {
            Value::from_object(SqlObject {
                mapper: Arc::clone(sql),
                failure: failure.clone(),
            })
        });
        let csharp = Value::from_object(CsharpObject {
            helper: Arc::clone(&ctx.csharp),
        });
        let generator = Value::from_object(GeneratorObject {
            bridge: Arc::clone(&ctx.generator),
            failure: failure.clone(),
        });

        let values = context! {
            entity => Value::from_serialize(ctx.entity()),
            attributes => Value::from_serialize(ctx.attributes()),
            target => Value::from_serialize(TargetView::new(ctx)),
            model => Value::from_serialize(&*ctx.model),
            selected_entities => Value::from_serialize(&*ctx.selected_entities),
            vars => Value::from_serialize(&ctx.variables),
            sql => sql,
            csharp => csharp,
            generator => generator,
        };

        let name = template.display().to_string();
        debug!(template = %name, "rendering with minijinja");
        env.render_named_str(&name, &source, values).map_err(|err| {
            // an error raised by a helper is reported as is, not as a render failure
            failure
                .take()
                .unwrap_or_else(|| Error::render(template, err))
        })
    }
}

/// Slot holding the first error raised by a helper during one render.
#[derive(Debug, Clone, Default)]
struct Failure(Arc<Mutex<Option<Error>>>);

impl Failure {
    fn raise(&self, err: Error) -> minijinja::Error {
        let jinja = minijinja::Error::new(JinjaErrorKind::InvalidOperation, err.to_string());
        let mut slot = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(err);
        }
        jinja
    }

    fn take(&self) -> Option<Error> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

#[derive(Serialize)]
struct TargetView<'a> {
    name: &'a str,
    file: &'a str,
    folder: &'a str,
    bundle: &'a str,
    destination: String,
    template: String,
    entity: Option<&'a str>,
}

impl<'a> TargetView<'a> {
    fn new(ctx: &'a RenderContext) -> Self {
        let target = &ctx.target;
        Self {
            name: target.name(),
            file: target.file(),
            folder: target.folder(),
            bundle: target.bundle(),
            destination: target.destination().display().to_string(),
            template: target.template().display().to_string(),
            entity: target.entity().map(|e| e.name.as_str()),
        }
    }
}

fn unknown_method(object: &str, method: &str) -> minijinja::Error {
    minijinja::Error::new(
        JinjaErrorKind::InvalidOperation,
        format!("{} has no method named '{}'", object, method),
    )
}

/// `sql` in templates.
#[derive(Debug)]
struct SqlObject {
    mapper: Arc<SqlMapper>,
    failure: Failure,
}

impl SqlObject {
    fn column_type(&self, args: &[Value]) -> JinjaResult<Value> {
        let (ViaDeserialize(attribute),): (ViaDeserialize<Attribute>,) = from_args(args)?;
        self.mapper
            .resolve_column_type(&attribute)
            .map(Value::from)
            .map_err(|e| self.failure.raise(e))
    }

    fn convert_to_column_type(&self, args: &[Value]) -> JinjaResult<Value> {
        let (neutral, auto_incremented, size, precision): (&str, bool, Option<i64>, Option<Value>) =
            from_args(args)?;

        let neutral = neutral
            .parse::<NeutralType>()
            .map_err(|e| self.failure.raise(Error::configuration(e)))?;
        let precision = precision
            .filter(|v| !v.is_none() && !v.is_undefined())
            .map(|v| v.to_string().parse::<DecimalSize>())
            .transpose()
            .map_err(|e| self.failure.raise(Error::configuration(e)))?;

        self.mapper
            .convert_to_column_type(neutral, auto_incremented, size, precision.as_ref())
            .map(Value::from)
            .map_err(|e| self.failure.raise(e))
    }
}

impl Object for SqlObject {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> JinjaResult<Value> {
        let sql = &self.mapper;
        match method {
            "databaseName" => Ok(Value::from(sql.database_name())),
            "databaseConfigFile" => Ok(Value::from(sql.database_config_file())),
            "tableName" => {
                let (ViaDeserialize(entity),): (ViaDeserialize<Entity>,) = from_args(args)?;
                Ok(Value::from(sql.table_name(&entity)))
            }
            "columnName" => {
                let (ViaDeserialize(attribute),): (ViaDeserialize<Attribute>,) = from_args(args)?;
                Ok(Value::from(sql.column_name(&attribute)))
            }
            "columnType" => self.column_type(args),
            "columnConstraints" => {
                let (ViaDeserialize(attribute),): (ViaDeserialize<Attribute>,) = from_args(args)?;
                Ok(Value::from(sql.resolve_column_constraints(&attribute)))
            }
            "convertToTableName" => {
                let (name,): (&str,) = from_args(args)?;
                Ok(Value::from(sql.convert_to_table_name(name)))
            }
            "convertToColumnName" => {
                let (name,): (&str,) = from_args(args)?;
                Ok(Value::from(sql.convert_to_column_name(name)))
            }
            "convertToColumnType" => self.convert_to_column_type(args),
            _ => Err(unknown_method("sql", method)),
        }
    }
}

/// `csharp` in templates.
#[derive(Debug)]
struct CsharpObject {
    helper: Arc<CsharpHelper>,
}

impl CsharpObject {
    /// `toStringMethod(entity, [attributes,] level [, indentation])`
    fn to_string_method(&self, args: &[Value]) -> JinjaResult<Value> {
        let Some((first, rest)) = args.split_first() else {
            return Err(minijinja::Error::new(
                JinjaErrorKind::MissingArgument,
                "toStringMethod expects an entity",
            ));
        };
        let (ViaDeserialize(entity),): (ViaDeserialize<Entity>,) =
            from_args(std::slice::from_ref(first))?;

        let (attributes, rest) = match rest.split_first() {
            Some((list, rest)) if list.kind() == ValueKind::Seq => {
                let (ViaDeserialize(attributes),): (ViaDeserialize<Vec<Attribute>>,) =
                    from_args(std::slice::from_ref(list))?;
                (attributes, rest)
            }
            _ => (entity.attributes.clone(), rest),
        };

        let (level, indentation): (usize, Option<&str>) = from_args(rest)?;
        let indent = match indentation {
            None => Indent::Tab,
            Some(unit) => Indent::from_unit(unit).ok_or_else(|| {
                minijinja::Error::new(
                    JinjaErrorKind::InvalidOperation,
                    "indentation must be a tab or a run of spaces",
                )
            })?,
        };

        Ok(Value::from(
            self.helper
                .to_string_method(&entity, &attributes, level, indent),
        ))
    }
}

impl Object for CsharpObject {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> JinjaResult<Value> {
        match method {
            "nullableType" => {
                let (ViaDeserialize(attribute),): (ViaDeserialize<Attribute>,) = from_args(args)?;
                Ok(Value::from(self.helper.nullable_type(&attribute)))
            }
            "type" => {
                let (ViaDeserialize(attribute),): (ViaDeserialize<Attribute>,) = from_args(args)?;
                Ok(Value::from(self.helper.type_of(&attribute)))
            }
            "toStringMethod" => self.to_string_method(args),
            _ => Err(unknown_method("csharp", method)),
        }
    }
}

/// `generator` in templates.
#[derive(Debug)]
struct GeneratorObject {
    bridge: Arc<EmbeddedGenerator>,
    failure: Failure,
}

impl Object for GeneratorObject {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "name" => Some(Value::from(self.bridge.name())),
            "version" => Some(Value::from(self.bridge.version())),
            _ => None,
        }
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> JinjaResult<Value> {
        match method {
            "generate" => {
                // missing arguments are reported by the bridge, naming the parameter
                let (entity, file, folder, template): (
                    Option<&str>,
                    Option<&str>,
                    Option<&str>,
                    Option<&str>,
                ) = from_args(args)?;
                self.bridge
                    .generate(
                        entity.unwrap_or_default(),
                        file.unwrap_or_default(),
                        folder.unwrap_or_default(),
                        template.unwrap_or_default(),
                    )
                    .map_err(|e| self.failure.raise(e))?;
                Ok(Value::from(""))
            }
            _ => Err(unknown_method("generator", method)),
        }
    }
}
