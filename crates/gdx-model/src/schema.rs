//! Field schemas: the ordered column layout of one table.
//!
//! A schema is the sole structural contract between the record parser and
//! the record serializer. Field position is the index within the schema,
//! and the order is stable for the life of a processing run.

use serde::{Deserialize, Serialize};

/// Calendar date format used in export files (ISO 8601 date).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Semantic type of a field, used by validation and derivation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Signed integer value.
    Integer,
    /// Calendar date in [`DATE_FORMAT`].
    Date,
    /// Boolean flag (`0`/`1`/`true`/`false`).
    Flag,
}

impl FieldKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Date => "date",
            Self::Flag => "flag",
        }
    }
}

/// One column descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within a schema.
    pub name: String,
    /// Semantic type.
    pub kind: FieldKind,
    /// Default value filled in by the default-fill stage when the field is
    /// absent from a record. `None` means the field has no default.
    pub default: Option<String>,
    /// Whether validation requires a non-empty value.
    pub required: bool,
}

impl Field {
    /// Create a field with no default and no required constraint.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            required: false,
        }
    }

    /// Shorthand for a text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Shorthand for an integer field.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// Shorthand for a date field.
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    /// Shorthand for a flag field.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Flag)
    }

    /// Mark the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the default value used by the default-fill stage.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Ordered list of fields plus the token delimiter for this table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
    delimiter: char,
}

impl Schema {
    /// Create a schema with the default `,` delimiter.
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            delimiter: ',',
        }
    }

    /// Override the token delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// The fields in positional order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Token delimiter.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of a field within the schema.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Schema::new(vec![
            Field::integer("id").required(),
            Field::text("name").required(),
            Field::flag("active").with_default("true"),
        ])
    }

    #[test]
    fn test_position_follows_field_order() {
        let schema = sample_schema();
        assert_eq!(schema.position("id"), Some(0));
        assert_eq!(schema.position("name"), Some(1));
        assert_eq!(schema.position("active"), Some(2));
        assert_eq!(schema.position("missing"), None);
    }

    #[test]
    fn test_field_lookup() {
        let schema = sample_schema();
        let field = schema.field("active").unwrap();
        assert_eq!(field.kind, FieldKind::Flag);
        assert_eq!(field.default.as_deref(), Some("true"));
        assert!(!field.required);
    }

    #[test]
    fn test_default_delimiter() {
        assert_eq!(sample_schema().delimiter(), ',');
        assert_eq!(sample_schema().with_delimiter(';').delimiter(), ';');
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(FieldKind::Date.label(), "date");
        assert_eq!(FieldKind::Flag.label(), "flag");
    }
}
