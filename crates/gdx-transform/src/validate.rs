//! Per-field record validation.
//!
//! A rule set owns both the checks (derived from the field schema's
//! semantic types) and the policy for records that fail them. The pipeline
//! never decides drop-vs-abort itself; the rule set does.

use std::fmt;

use chrono::NaiveDate;
use gdx_model::{DATE_FORMAT, FieldKind, Record, Schema};

/// What to do with a record that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidRecordPolicy {
    /// Drop the record and continue the run.
    Drop,
    /// Abort the run with a validation error.
    Abort,
}

/// A field schema paired with an invalid-record policy.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    schema: Schema,
    policy: InvalidRecordPolicy,
}

impl ValidationRules {
    pub fn new(schema: Schema, policy: InvalidRecordPolicy) -> Self {
        Self { schema, policy }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn policy(&self) -> InvalidRecordPolicy {
        self.policy
    }
}

/// One failed check - each variant carries only its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Record field count differs from the schema width.
    FieldCountMismatch { expected: usize, found: usize },
    /// Required field absent from the record.
    MissingField { field: String },
    /// Required field present but empty.
    EmptyRequired { field: String },
    /// Integer field holds a non-integer value.
    NotInteger { field: String, value: String },
    /// Date field holds a value outside the calendar date format.
    InvalidDate { field: String, value: String },
    /// Flag field holds a value other than `0`/`1`/`true`/`false`.
    InvalidFlag { field: String, value: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCountMismatch { expected, found } => {
                write!(f, "record has {found} fields, schema has {expected}")
            }
            Self::MissingField { field } => write!(f, "required field '{field}' is missing"),
            Self::EmptyRequired { field } => write!(f, "required field '{field}' is empty"),
            Self::NotInteger { field, value } => {
                write!(f, "field '{field}' has non-integer value '{value}'")
            }
            Self::InvalidDate { field, value } => {
                write!(f, "field '{field}' has non-date value '{value}'")
            }
            Self::InvalidFlag { field, value } => {
                write!(f, "field '{field}' has non-flag value '{value}'")
            }
        }
    }
}

/// Join violations for error messages.
pub(crate) fn describe_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check one record against a rule set's schema.
///
/// Returns every violation found; an empty vector means the record passes.
pub fn validate_record(rules: &ValidationRules, record: &Record) -> Vec<Violation> {
    let schema = rules.schema();
    let mut violations = Vec::new();

    if record.len() != schema.len() {
        violations.push(Violation::FieldCountMismatch {
            expected: schema.len(),
            found: record.len(),
        });
    }

    for field in schema.fields() {
        let Some(value) = record.get(&field.name) else {
            if field.required {
                violations.push(Violation::MissingField {
                    field: field.name.clone(),
                });
            }
            continue;
        };

        if value.is_empty() {
            if field.required {
                violations.push(Violation::EmptyRequired {
                    field: field.name.clone(),
                });
            }
            // An empty optional value carries no type to check.
            continue;
        }

        match field.kind {
            FieldKind::Text => {}
            FieldKind::Integer => {
                if value.parse::<i64>().is_err() {
                    violations.push(Violation::NotInteger {
                        field: field.name.clone(),
                        value: value.to_string(),
                    });
                }
            }
            FieldKind::Date => {
                if NaiveDate::parse_from_str(value, DATE_FORMAT).is_err() {
                    violations.push(Violation::InvalidDate {
                        field: field.name.clone(),
                        value: value.to_string(),
                    });
                }
            }
            FieldKind::Flag => {
                if !is_flag(value) {
                    violations.push(Violation::InvalidFlag {
                        field: field.name.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }
    }

    violations
}

fn is_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "0" | "1" | "true" | "false"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdx_model::Field;

    fn rules() -> ValidationRules {
        ValidationRules::new(
            Schema::new(vec![
                Field::integer("id").required(),
                Field::text("name").required(),
                Field::date("joined"),
                Field::flag("active"),
            ]),
            InvalidRecordPolicy::Drop,
        )
    }

    fn record(values: &[(&str, &str)]) -> Record {
        values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_record_passes() {
        let rec = record(&[
            ("id", "7"),
            ("name", "Larsson"),
            ("joined", "2024-07-01"),
            ("active", "1"),
        ]);
        assert!(validate_record(&rules(), &rec).is_empty());
    }

    #[test]
    fn test_empty_optional_values_pass() {
        let rec = record(&[("id", "7"), ("name", "Larsson"), ("joined", ""), ("active", "")]);
        assert!(validate_record(&rules(), &rec).is_empty());
    }

    #[test]
    fn test_short_record_reports_count_and_missing() {
        let rec = record(&[("id", "7")]);
        let violations = validate_record(&rules(), &rec);
        assert!(violations.contains(&Violation::FieldCountMismatch {
            expected: 4,
            found: 1
        }));
        assert!(violations.contains(&Violation::MissingField {
            field: "name".to_string()
        }));
        // Optional fields may be absent without their own violation.
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_type_checks() {
        let rec = record(&[
            ("id", "seven"),
            ("name", "Larsson"),
            ("joined", "01.07.2024"),
            ("active", "maybe"),
        ]);
        let violations = validate_record(&rules(), &rec);
        assert_eq!(violations.len(), 3);
        assert!(matches!(violations[0], Violation::NotInteger { .. }));
        assert!(matches!(violations[1], Violation::InvalidDate { .. }));
        assert!(matches!(violations[2], Violation::InvalidFlag { .. }));
    }

    #[test]
    fn test_empty_required_reported() {
        let rec = record(&[
            ("id", "7"),
            ("name", ""),
            ("joined", ""),
            ("active", "0"),
        ]);
        let violations = validate_record(&rules(), &rec);
        assert_eq!(
            violations,
            vec![Violation::EmptyRequired {
                field: "name".to_string()
            }]
        );
    }

    #[test]
    fn test_flag_values() {
        for value in ["0", "1", "true", "false", "TRUE", "False"] {
            assert!(is_flag(value), "{value} should be a flag");
        }
        assert!(!is_flag("yes"));
        assert!(!is_flag("2"));
    }
}
