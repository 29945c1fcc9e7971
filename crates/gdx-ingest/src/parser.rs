//! Positional record parsing against a field schema.

use gdx_model::{Record, Schema};

/// Split a delimited line into tokens, handling double-quoted values.
///
/// A quoted token may embed the delimiter; `""` inside quotes is an escaped
/// quote. Tokens are trimmed of surrounding whitespace.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            c if c == delimiter && !in_quotes => {
                tokens.push(current.trim().to_string());
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    // Don't forget the last token
    tokens.push(current.trim().to_string());
    tokens
}

/// Parse one decoded line into a structured record.
///
/// Token at position `i` is assigned to the schema's `i`-th field. A short
/// line leaves the trailing fields absent; whether that drops the record or
/// aborts the run is the downstream validation stage's decision. Tokens
/// beyond the schema width are dropped.
pub fn parse_record(schema: &Schema, line: &str) -> Record {
    let tokens = split_line(line, schema.delimiter());
    if tokens.len() > schema.len() {
        tracing::warn!(
            expected = schema.len(),
            found = tokens.len(),
            "line has more tokens than schema fields; extras dropped"
        );
    }
    let mut record = Record::with_capacity(schema.len());
    for (field, token) in schema.fields().iter().zip(tokens) {
        record.set(&field.name, token);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdx_model::Field;

    fn schema() -> Schema {
        Schema::new(vec![
            Field::integer("id"),
            Field::text("name"),
            Field::flag("active"),
        ])
    }

    #[test]
    fn test_split_line_simple() {
        assert_eq!(split_line("a,b,c", ','), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_line_quoted_delimiter() {
        assert_eq!(
            split_line("\"Eriksson, Jr\",b", ','),
            vec!["Eriksson, Jr", "b"]
        );
    }

    #[test]
    fn test_split_line_escaped_quotes() {
        assert_eq!(
            split_line("\"the \"\"Bull\"\"\",b", ','),
            vec!["the \"Bull\"", "b"]
        );
    }

    #[test]
    fn test_split_line_trims_whitespace() {
        assert_eq!(split_line("  a  ,  b  ", ','), vec!["a", "b"]);
    }

    #[test]
    fn test_split_line_custom_delimiter() {
        assert_eq!(split_line("a;b;c", ';'), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_record_positional() {
        let record = parse_record(&schema(), "7,Larsson,true");
        assert_eq!(record.get("id"), Some("7"));
        assert_eq!(record.get("name"), Some("Larsson"));
        assert_eq!(record.get("active"), Some("true"));
    }

    #[test]
    fn test_parse_record_short_line_leaves_fields_absent() {
        let record = parse_record(&schema(), "7,Larsson");
        assert_eq!(record.len(), 2);
        assert!(!record.contains("active"));
    }

    #[test]
    fn test_parse_record_extra_tokens_dropped() {
        let record = parse_record(&schema(), "7,Larsson,true,stray");
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("active"), Some("true"));
    }

    #[test]
    fn test_parse_record_preserves_schema_order() {
        let record = parse_record(&schema(), "7,Larsson,true");
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["id", "name", "active"]);
    }
}
