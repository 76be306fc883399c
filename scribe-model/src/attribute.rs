//! Entity attributes.

use serde::{Deserialize, Serialize};

use crate::NeutralType;

/// An attribute of an entity.
///
/// Fields prefixed with `database_` are dialect-specific overrides; when set
/// they take precedence over the generic values derived from the neutral type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attribute {
    /// Attribute name as written in the model (e.g. `cityCode`)
    pub name: String,

    /// Neutral type
    #[serde(rename = "type")]
    pub neutral_type: NeutralType,

    /// Generic not-null constraint
    #[serde(default)]
    pub not_null: bool,

    /// Long text (CLOB-like) content
    #[serde(default)]
    pub long_text: bool,

    /// Auto-incremented by the database
    #[serde(default)]
    pub auto_incremented: bool,

    /// Generic maximum length (e.g. for strings)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// Generic default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Explicit column name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,

    /// Explicit column type, used verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_type: Option<String>,

    /// Explicit size or precision, e.g. `45` or `10.2`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_size: Option<String>,

    /// Dialect-specific not-null constraint
    #[serde(default)]
    pub database_not_null: bool,

    /// Dialect-specific default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_default_value: Option<String>,
}

impl Attribute {
    /// Create a nullable attribute with no overrides.
    pub fn new(name: impl Into<String>, neutral_type: NeutralType) -> Self {
        Self {
            name: name.into(),
            neutral_type,
            not_null: false,
            long_text: false,
            auto_incremented: false,
            max_length: None,
            default_value: None,
            database_name: None,
            database_type: None,
            database_size: None,
            database_not_null: false,
            database_default_value: None,
        }
    }

    pub fn is_string_type(&self) -> bool {
        self.neutral_type == NeutralType::String
    }

    pub fn is_binary_type(&self) -> bool {
        self.neutral_type == NeutralType::Binary
    }

    pub fn is_long_text(&self) -> bool {
        self.long_text
    }

    /// Neither the generic nor the dialect-specific not-null flag is set.
    pub fn is_nullable(&self) -> bool {
        !self.not_null && !self.database_not_null
    }

    /// Explicit column name, ignoring blank values.
    pub fn explicit_database_name(&self) -> Option<&str> {
        non_blank(self.database_name.as_deref())
    }

    /// Explicit column type, ignoring blank values.
    pub fn explicit_database_type(&self) -> Option<&str> {
        non_blank(self.database_type.as_deref())
    }

    /// Explicit size/precision text, ignoring blank values.
    pub fn explicit_database_size(&self) -> Option<&str> {
        non_blank(self.database_size.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
