//! Database type and name mapping driven by a dialect profile.

use std::fmt;

use scribe_core::NamingStyle;
use scribe_manifest::DialectProfile;
use scribe_model::{Attribute, Entity, NeutralType};

use super::DecimalSize;
use crate::{Error, Result};

const CONV_TABLE_NAME: &str = "conv.tableName";
const CONV_COLUMN_NAME: &str = "conv.columnName";

/// Which naming convention applies to an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Table,
    Column,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Table => f.write_str("table"),
            Role::Column => f.write_str("column"),
        }
    }
}

/// Converts neutral types and identifiers to the conventions of one database
/// dialect.
///
/// Naming styles are read from the profile once, at construction; a profile
/// with a missing or unknown style is rejected there.
#[derive(Debug, Clone)]
pub struct SqlMapper {
    profile: DialectProfile,
    table_style: NamingStyle,
    column_style: NamingStyle,
}

impl SqlMapper {
    pub fn new(profile: DialectProfile) -> Result<Self> {
        let table_style = naming_style(&profile, CONV_TABLE_NAME)?;
        let column_style = naming_style(&profile, CONV_COLUMN_NAME)?;
        Ok(Self {
            profile,
            table_style,
            column_style,
        })
    }

    /// Mapper for one of the built-in dialect profiles.
    pub fn builtin(database: &str) -> Result<Self> {
        Self::new(DialectProfile::builtin(database)?)
    }

    /// Configured dialect name.
    pub fn database_name(&self) -> &str {
        self.profile.name()
    }

    /// Where the dialect profile was loaded from.
    pub fn database_config_file(&self) -> &str {
        self.profile.source()
    }

    pub fn table_style(&self) -> NamingStyle {
        self.table_style
    }

    pub fn column_style(&self) -> NamingStyle {
        self.column_style
    }

    /// Apply the naming style configured for `role` to `name`.
    pub fn convert_identifier(&self, name: &str, role: Role) -> String {
        match role {
            Role::Table => self.table_style.apply(name),
            Role::Column => self.column_style.apply(name),
        }
    }

    pub fn convert_to_table_name(&self, name: &str) -> String {
        self.convert_identifier(name, Role::Table)
    }

    pub fn convert_to_column_name(&self, name: &str) -> String {
        self.convert_identifier(name, Role::Column)
    }

    /// Table name for an entity.
    pub fn table_name(&self, entity: &Entity) -> String {
        self.convert_to_table_name(&entity.name)
    }

    /// Column name for an attribute; an explicit database name is used as is.
    pub fn column_name(&self, attribute: &Attribute) -> String {
        match attribute.explicit_database_name() {
            Some(name) => name.to_string(),
            None => self.convert_to_column_name(&attribute.name),
        }
    }

    /// Column type for an attribute.
    ///
    /// An explicit database type is returned verbatim. Otherwise the type comes
    /// from the profile (`type.<neutral>`, or `type.<neutral>.autoincr` first
    /// for auto-incremented attributes) with size or precision substituted.
    pub fn resolve_column_type(&self, attribute: &Attribute) -> Result<String> {
        if let Some(explicit) = attribute.explicit_database_type() {
            return Ok(explicit.to_string());
        }
        let size = maximum_size(attribute)?;
        let precision = precision(attribute)?;
        self.convert_to_column_type(
            attribute.neutral_type,
            attribute.auto_incremented,
            size,
            precision.as_ref(),
        )
    }

    /// Column type for a neutral type with the given size and precision.
    pub fn convert_to_column_type(
        &self,
        neutral_type: NeutralType,
        auto_incremented: bool,
        size: Option<i64>,
        precision: Option<&DecimalSize>,
    ) -> Result<String> {
        let sql_type = self.config_type(neutral_type, auto_incremented)?;
        if sql_type.contains('%') {
            substitute(sql_type, size, precision)
        } else {
            Ok(sql_type.to_string())
        }
    }

    /// Column constraints: `NOT NULL` then `DEFAULT <value>`, space separated.
    pub fn resolve_column_constraints(&self, attribute: &Attribute) -> String {
        let mut parts = Vec::new();
        if attribute.database_not_null || attribute.not_null {
            parts.push("NOT NULL".to_string());
        }

        let default_value = non_empty(attribute.database_default_value.as_deref())
            .or_else(|| non_empty(attribute.default_value.as_deref()));
        if let Some(value) = default_value {
            if attribute.is_string_type() {
                parts.push(format!("DEFAULT '{}'", value));
            } else {
                parts.push(format!("DEFAULT {}", value));
            }
        }
        parts.join(" ")
    }

    fn config_type(&self, neutral_type: NeutralType, auto_incremented: bool) -> Result<&str> {
        let key = format!("type.{}", neutral_type.as_str());
        if auto_incremented
            && let Some(value) = self.profile.get(&format!("{}.autoincr", key))
        {
            return Ok(value);
        }
        self.config_value(&key)
    }

    fn config_value(&self, key: &str) -> Result<&str> {
        self.profile.get(key).ok_or_else(|| missing_entry(&self.profile, key))
    }
}

fn naming_style(profile: &DialectProfile, key: &str) -> Result<NamingStyle> {
    let value = profile.get(key).ok_or_else(|| missing_entry(profile, key))?;
    value.parse().map_err(|e: String| {
        Error::configuration(format!(
            "database profile '{}': invalid '{}': {}",
            profile.name(),
            key,
            e
        ))
    })
}

fn missing_entry(profile: &DialectProfile, key: &str) -> Error {
    Error::configuration(format!(
        "database profile '{}': missing entry '{}'",
        profile.name(),
        key
    ))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_size(text: &str) -> Result<DecimalSize> {
    text.parse().map_err(Error::configuration)
}

/// Size from the explicit database size (integer part), else the max length.
fn maximum_size(attribute: &Attribute) -> Result<Option<i64>> {
    if let Some(text) = attribute.explicit_database_size() {
        return Ok(Some(parse_size(text)?.integer()));
    }
    Ok(attribute.max_length.map(i64::from))
}

/// Precision from the explicit database size.
fn precision(attribute: &Attribute) -> Result<Option<DecimalSize>> {
    attribute.explicit_database_size().map(parse_size).transpose()
}

fn substitute(
    sql_type: &str,
    size: Option<i64>,
    precision: Option<&DecimalSize>,
) -> Result<String> {
    let has_size = sql_type.contains("%S") || sql_type.contains("%s");
    let has_precision = sql_type.contains("%P") || sql_type.contains("%p");

    match (has_size, has_precision) {
        (true, true) => Err(Error::configuration(format!(
            "SQL type '{}' : size and precision placeholders cannot be combined",
            sql_type
        ))),
        (true, false) => substitute_size(sql_type, size),
        (false, true) => substitute_precision(sql_type, precision),
        (false, false) => Ok(sql_type.to_string()),
    }
}

fn substitute_size(sql_type: &str, size: Option<i64>) -> Result<String> {
    if let Some(value) = size
        && value <= 0
    {
        return Err(Error::configuration(format!(
            "SQL type '{}' : invalid size {}",
            sql_type, value
        )));
    }

    if sql_type.contains("%S") {
        match size {
            Some(value) => Ok(sql_type.replace("%S", &value.to_string())),
            None => Err(Error::configuration(format!(
                "SQL type '{}' : size is mandatory",
                sql_type
            ))),
        }
    } else {
        match size {
            Some(value) => Ok(sql_type.replace("%s", &value.to_string())),
            None => Ok(remove_optional(sql_type, "%s")),
        }
    }
}

fn substitute_precision(sql_type: &str, precision: Option<&DecimalSize>) -> Result<String> {
    if let Some(value) = precision
        && value.integer() <= 0
    {
        return Err(Error::configuration(format!(
            "SQL type '{}' : invalid precision {}",
            sql_type, value
        )));
    }

    if sql_type.contains("%P") {
        match precision {
            Some(value) => Ok(sql_type.replace("%P", &value.to_string())),
            None => Err(Error::configuration(format!(
                "SQL type '{}' : precision is mandatory",
                sql_type
            ))),
        }
    } else {
        match precision {
            Some(value) => Ok(sql_type.replace("%p", &value.to_string())),
            None => Ok(remove_optional(sql_type, "%p")),
        }
    }
}

/// Delete an optional `marker` that has no value, together with the
/// parentheses around it when only whitespace separates them
/// (`varchar( %s )` becomes `varchar`).
fn remove_optional(sql_type: &str, marker: &str) -> String {
    let mut out = sql_type.to_string();
    while let Some(start) = out.find(marker) {
        let end = start + marker.len();
        let before = out[..start].trim_end();
        let after = out[end..].trim_start();
        match (before.strip_suffix('('), after.strip_prefix(')')) {
            (Some(head), Some(tail)) => out = format!("{}{}", head.trim_end(), tail),
            _ => out.replace_range(start..end, ""),
        }
    }
    out
}
