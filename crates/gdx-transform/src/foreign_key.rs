//! Foreign-key rewriting against a materialized reindex map.

use gdx_model::{Record, ReindexMap};

use crate::error::{Result, TransformError};

/// What to do with a foreign key the reindex map does not resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnresolvedKeyPolicy {
    /// Leave the value unchanged and log a warning.
    #[default]
    Keep,
    /// Abort the run.
    Fail,
}

/// Configuration for the foreign-key apply stage.
///
/// The map must be fully materialized before the stage runs; lookups are
/// constant time per column per record.
#[derive(Debug, Clone)]
pub struct ForeignKeyRules {
    map: ReindexMap,
    referenced_primary: String,
    columns: Vec<String>,
    unresolved: UnresolvedKeyPolicy,
}

impl ForeignKeyRules {
    /// Rewrite `columns`, which reference `referenced_primary` of the
    /// renumbered table, through `map`.
    pub fn new(
        map: ReindexMap,
        referenced_primary: impl Into<String>,
        columns: Vec<String>,
    ) -> Self {
        Self {
            map,
            referenced_primary: referenced_primary.into(),
            columns,
            unresolved: UnresolvedKeyPolicy::default(),
        }
    }

    /// Override the unresolved-key policy.
    #[must_use]
    pub fn with_unresolved_policy(mut self, policy: UnresolvedKeyPolicy) -> Self {
        self.unresolved = policy;
        self
    }
}

/// Replace old foreign-key values with their renumbered counterparts.
///
/// Absent and empty columns are skipped; unresolved values follow the
/// configured policy.
pub fn apply_foreign_keys(rules: &ForeignKeyRules, record: &mut Record) -> Result<()> {
    for column in &rules.columns {
        let Some(value) = record.get(column).map(ToOwned::to_owned) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        match rules.map.resolve(&value) {
            Some(new_key) => record.set(column, new_key.to_string()),
            None => match rules.unresolved {
                UnresolvedKeyPolicy::Keep => {
                    tracing::warn!(
                        column,
                        value = %value,
                        referenced = %rules.referenced_primary,
                        "foreign key not in reindex map; value kept"
                    );
                }
                UnresolvedKeyPolicy::Fail => {
                    return Err(TransformError::UnresolvedForeignKey {
                        column: column.clone(),
                        value,
                        referenced: rules.referenced_primary.clone(),
                    });
                }
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdx_model::ReindexEntry;

    fn map() -> ReindexMap {
        let mut map = ReindexMap::new();
        map.insert(ReindexEntry::new("1", 101)).unwrap();
        map.insert(ReindexEntry::new("2", 102)).unwrap();
        map
    }

    fn record(values: &[(&str, &str)]) -> Record {
        values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolves_listed_columns() {
        let rules = ForeignKeyRules::new(
            map(),
            "id",
            vec!["first_name_id".to_string(), "last_name_id".to_string()],
        );
        let mut rec = record(&[("first_name_id", "2"), ("last_name_id", "1"), ("club_id", "2")]);
        apply_foreign_keys(&rules, &mut rec).unwrap();
        assert_eq!(rec.get("first_name_id"), Some("102"));
        assert_eq!(rec.get("last_name_id"), Some("101"));
        // Columns outside the rule set are never touched.
        assert_eq!(rec.get("club_id"), Some("2"));
    }

    #[test]
    fn test_unresolved_kept_by_default() {
        let rules = ForeignKeyRules::new(map(), "id", vec!["first_name_id".to_string()]);
        let mut rec = record(&[("first_name_id", "99")]);
        apply_foreign_keys(&rules, &mut rec).unwrap();
        assert_eq!(rec.get("first_name_id"), Some("99"));
    }

    #[test]
    fn test_unresolved_fails_under_fail_policy() {
        let rules = ForeignKeyRules::new(map(), "id", vec!["first_name_id".to_string()])
            .with_unresolved_policy(UnresolvedKeyPolicy::Fail);
        let mut rec = record(&[("first_name_id", "99")]);
        let err = apply_foreign_keys(&rules, &mut rec).unwrap_err();
        assert!(matches!(
            err,
            TransformError::UnresolvedForeignKey { .. }
        ));
    }

    #[test]
    fn test_absent_and_empty_columns_skipped() {
        let rules = ForeignKeyRules::new(
            map(),
            "id",
            vec!["first_name_id".to_string(), "nickname_id".to_string()],
        );
        let mut rec = record(&[("nickname_id", "")]);
        apply_foreign_keys(&rules, &mut rec).unwrap();
        assert_eq!(rec.get("nickname_id"), Some(""));
        assert!(!rec.contains("first_name_id"));
    }
}
