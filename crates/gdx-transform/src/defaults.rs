//! Default-value fill for absent optional fields.

use gdx_model::{Record, Schema};

/// Populate fields absent from the record with their schema defaults.
///
/// A present value is never overwritten, even when empty, so applying the
/// fill twice yields the same record as applying it once. When fields are
/// added, the record is rebuilt so its field order keeps following the
/// schema; fields the schema does not describe stay at the back in their
/// original order.
pub fn fill_defaults(schema: &Schema, record: &mut Record) {
    let needs_fill = schema
        .fields()
        .iter()
        .any(|f| f.default.is_some() && !record.contains(&f.name));
    if !needs_fill {
        return;
    }

    let mut filled = Record::with_capacity(schema.len());
    for field in schema.fields() {
        if let Some(value) = record.get(&field.name) {
            filled.set(&field.name, value);
        } else if let Some(default) = &field.default {
            filled.set(&field.name, default.clone());
        }
    }
    for (name, value) in record.iter() {
        if schema.field(name).is_none() {
            filled.set(name, value);
        }
    }
    *record = filled;
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdx_model::Field;

    fn schema() -> Schema {
        Schema::new(vec![
            Field::integer("id"),
            Field::text("name"),
            Field::flag("active").with_default("true"),
            Field::integer("wage").with_default("0"),
        ])
    }

    fn record(values: &[(&str, &str)]) -> Record {
        values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fills_absent_fields() {
        let mut rec = record(&[("id", "7"), ("name", "Larsson")]);
        fill_defaults(&schema(), &mut rec);
        assert_eq!(rec.get("active"), Some("true"));
        assert_eq!(rec.get("wage"), Some("0"));
    }

    #[test]
    fn test_never_overwrites_present_value() {
        let mut rec = record(&[("id", "7"), ("name", "Larsson"), ("active", "false")]);
        fill_defaults(&schema(), &mut rec);
        assert_eq!(rec.get("active"), Some("false"));
    }

    #[test]
    fn test_empty_value_counts_as_present() {
        let mut rec = record(&[("id", "7"), ("name", "Larsson"), ("active", "")]);
        fill_defaults(&schema(), &mut rec);
        assert_eq!(rec.get("active"), Some(""));
    }

    #[test]
    fn test_idempotent() {
        let mut once = record(&[("id", "7")]);
        fill_defaults(&schema(), &mut once);
        let mut twice = once.clone();
        fill_defaults(&schema(), &mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filled_fields_keep_schema_order() {
        let mut rec = record(&[("id", "7"), ("wage", "900")]);
        fill_defaults(&schema(), &mut rec);
        let names: Vec<&str> = rec.field_names().collect();
        assert_eq!(names, vec!["id", "active", "wage"]);
    }

    #[test]
    fn test_fields_without_default_stay_absent() {
        let mut rec = record(&[("id", "7")]);
        fill_defaults(&schema(), &mut rec);
        assert!(!rec.contains("name"));
    }
}
