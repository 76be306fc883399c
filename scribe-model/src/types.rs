//! Neutral attribute types.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Language-agnostic attribute type recorded in the model.
///
/// Mapping engines convert a neutral type to target-specific syntax, e.g.
/// `string` to `varchar(%s)` for a SQL dialect or `string` to `string` in C#.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NeutralType {
    String,
    Byte,
    Short,
    Int,
    Long,
    Decimal,
    Float,
    Double,
    Boolean,
    Date,
    Time,
    Timestamp,
    Binary,
}

impl NeutralType {
    /// Get the neutral type name (used in model files and profile keys)
    pub fn as_str(&self) -> &'static str {
        match self {
            NeutralType::String => "string",
            NeutralType::Byte => "byte",
            NeutralType::Short => "short",
            NeutralType::Int => "int",
            NeutralType::Long => "long",
            NeutralType::Decimal => "decimal",
            NeutralType::Float => "float",
            NeutralType::Double => "double",
            NeutralType::Boolean => "boolean",
            NeutralType::Date => "date",
            NeutralType::Time => "time",
            NeutralType::Timestamp => "timestamp",
            NeutralType::Binary => "binary",
        }
    }
}

impl fmt::Display for NeutralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NeutralType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.trim() {
            "string" => NeutralType::String,
            "byte" => NeutralType::Byte,
            "short" => NeutralType::Short,
            "int" => NeutralType::Int,
            "long" => NeutralType::Long,
            "decimal" => NeutralType::Decimal,
            "float" => NeutralType::Float,
            "double" => NeutralType::Double,
            "boolean" => NeutralType::Boolean,
            "date" => NeutralType::Date,
            "time" => NeutralType::Time,
            "timestamp" => NeutralType::Timestamp,
            "binary" => NeutralType::Binary,
            other => return Err(format!("unknown neutral type '{}'", other)),
        };
        Ok(ty)
    }
}
