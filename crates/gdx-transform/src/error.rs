//! Error types for record transforms.

use thiserror::Error;

use crate::validate::{Violation, describe_violations};

/// Errors that can occur while transforming records.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A record failed validation under the abort policy.
    #[error("record failed validation: {}", describe_violations(.violations))]
    InvalidRecord { violations: Vec<Violation> },

    /// A record entering the reindex stage has no primary-key value.
    #[error("record has no value in primary column '{column}'")]
    MissingPrimaryKey { column: String },

    /// A foreign key had no reindex entry under the fail policy.
    #[error("foreign key '{value}' in column '{column}' has no entry for '{referenced}'")]
    UnresolvedForeignKey {
        column: String,
        value: String,
        referenced: String,
    },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_display() {
        let err = TransformError::InvalidRecord {
            violations: vec![
                Violation::EmptyRequired {
                    field: "id".to_string(),
                },
                Violation::NotInteger {
                    field: "wage".to_string(),
                    value: "lots".to_string(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "record failed validation: required field 'id' is empty; \
             field 'wage' has non-integer value 'lots'"
        );
    }
}
