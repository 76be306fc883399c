//! C# type mapping and code helpers.

use scribe_model::{Attribute, Entity, NeutralType};

use super::TypeMapper;
use crate::builder::{Indent, LinesBuilder};

/// C# type mapper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsharpTypeMapper;

impl TypeMapper for CsharpTypeMapper {
    fn language(&self) -> &'static str {
        "csharp"
    }

    fn map_type(&self, neutral_type: NeutralType) -> &'static str {
        match neutral_type {
            NeutralType::String => "string",
            NeutralType::Byte => "sbyte",
            NeutralType::Short => "short",
            NeutralType::Int => "int",
            NeutralType::Long => "long",
            NeutralType::Decimal => "decimal",
            NeutralType::Float => "float",
            NeutralType::Double => "double",
            NeutralType::Boolean => "bool",
            NeutralType::Date | NeutralType::Timestamp => "DateTime",
            NeutralType::Time => "TimeSpan",
            NeutralType::Binary => "byte[]",
        }
    }
}

/// Helpers for C# templates, exposed as `csharp`.
#[derive(Debug, Clone, Default)]
pub struct CsharpHelper<M = CsharpTypeMapper> {
    mapper: M,
}

impl CsharpHelper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: TypeMapper> CsharpHelper<M> {
    pub fn with_mapper(mapper: M) -> Self {
        Self { mapper }
    }

    /// C# type of the attribute.
    pub fn type_of(&self, attribute: &Attribute) -> &'static str {
        self.mapper.map_type(attribute.neutral_type)
    }

    /// C# type with a trailing `?` when the attribute is nullable.
    pub fn nullable_type(&self, attribute: &Attribute) -> String {
        let ty = self.type_of(attribute);
        if attribute.is_nullable() {
            format!("{}?", ty)
        } else {
            ty.to_string()
        }
    }

    /// A `ToString()` override listing `attributes` with a `StringBuilder`.
    ///
    /// Binary and long-text attributes are skipped and replaced by a comment.
    pub fn to_string_method(
        &self,
        entity: &Entity,
        attributes: &[Attribute],
        level: usize,
        indent: Indent,
    ) -> String {
        let mut lines = LinesBuilder::new(indent);
        lines
            .append(level, "public override string ToString()")
            .append(level, "{");
        if attributes.is_empty() {
            lines.append(
                level + 1,
                format!("return \"{} [no attribute]\" ;", entity.name),
            );
        } else {
            self.string_builder_body(entity, attributes, level + 1, &mut lines);
        }
        lines.append(level, "}");
        lines.build()
    }

    fn string_builder_body(
        &self,
        entity: &Entity,
        attributes: &[Attribute],
        level: usize,
        lines: &mut LinesBuilder,
    ) {
        lines
            .append(
                level,
                "System.Text.StringBuilder sb = new System.Text.StringBuilder();",
            )
            .append(level, format!("sb.Append(\"{}[\");", entity.name));

        let mut count = 0;
        for attribute in attributes {
            if attribute.is_binary_type() || attribute.is_long_text() {
                lines.append(
                    level,
                    format!(
                        "// attribute '{}' (type {}) not usable in ToString()",
                        attribute.name,
                        self.type_of(attribute)
                    ),
                );
                continue;
            }
            if count > 0 {
                lines.append(level, "sb.Append(\"|\");");
            }
            lines.append(
                level,
                format!(
                    "sb.Append(\"{name}=\").Append({name});",
                    name = attribute.name
                ),
            );
            count += 1;
        }

        lines
            .append(level, "sb.Append(\"]\");")
            .append(level, "return sb.ToString();");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car() -> Entity {
        Entity::new(
            "Car",
            vec![
                Attribute {
                    not_null: true,
                    ..Attribute::new("id", NeutralType::Int)
                },
                Attribute::new("brand", NeutralType::String),
                Attribute::new("photo", NeutralType::Binary),
                Attribute {
                    long_text: true,
                    ..Attribute::new("notes", NeutralType::String)
                },
            ],
        )
    }

    #[test]
    fn test_type_mapping() {
        let mapper = CsharpTypeMapper;
        assert_eq!(mapper.language(), "csharp");
        assert_eq!(mapper.map_type(NeutralType::Boolean), "bool");
        assert_eq!(mapper.map_type(NeutralType::Binary), "byte[]");
        assert_eq!(mapper.map_type(NeutralType::Timestamp), "DateTime");
    }

    #[test]
    fn test_nullable_type() {
        let csharp = CsharpHelper::new();
        let entity = car();
        assert_eq!(csharp.nullable_type(&entity.attributes[0]), "int");
        assert_eq!(csharp.nullable_type(&entity.attributes[1]), "string?");
    }

    #[test]
    fn test_to_string_method() {
        let csharp = CsharpHelper::new();
        let entity = car();
        let code = csharp.to_string_method(&entity, &entity.attributes, 0, Indent::Spaces(2));
        insta::assert_snapshot!(code, @r#"
        public override string ToString()
        {
          System.Text.StringBuilder sb = new System.Text.StringBuilder();
          sb.Append("Car[");
          sb.Append("id=").Append(id);
          sb.Append("|");
          sb.Append("brand=").Append(brand);
          // attribute 'photo' (type byte[]) not usable in ToString()
          // attribute 'notes' (type string) not usable in ToString()
          sb.Append("]");
          return sb.ToString();
        }
        "#);
    }

    #[test]
    fn test_to_string_method_keeps_base_level() {
        let csharp = CsharpHelper::new();
        let entity = Entity::new("Tag", vec![Attribute::new("label", NeutralType::String)]);
        let code = csharp.to_string_method(&entity, &entity.attributes, 2, Indent::Tab);
        assert!(code.starts_with("\t\tpublic override string ToString()\n\t\t{\n"));
        assert!(code.contains("\t\t\tsb.Append(\"label=\").Append(label);\n"));
        assert!(code.ends_with("\t\t}\n"));
    }

    #[test]
    fn test_to_string_method_without_attributes() {
        let csharp = CsharpHelper::new();
        let entity = Entity::new("Empty", vec![]);
        let code = csharp.to_string_method(&entity, &[], 0, Indent::Tab);
        assert_eq!(
            code,
            "public override string ToString()\n{\n\treturn \"Empty [no attribute]\" ;\n}\n"
        );
    }
}
