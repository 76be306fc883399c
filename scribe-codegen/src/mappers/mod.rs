//! Type and name mapping for target languages and database dialects.

mod csharp;
mod size;
mod sql;

use scribe_model::NeutralType;

pub use csharp::{CsharpHelper, CsharpTypeMapper};
pub use size::DecimalSize;
pub use sql::{Role, SqlMapper};

/// Trait for mapping neutral attribute types to language-specific type strings.
///
/// Implement this trait for each target language to provide type mappings.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Map a neutral type to a language-specific type string
    fn map_type(&self, neutral_type: NeutralType) -> &'static str;
}
