//! Sequential primary-key assignment.

use gdx_model::{Record, ReindexEntry};

use crate::error::{Result, TransformError};

/// Assigns new sequential primary keys in arrival order.
///
/// Holds only the running counter, so memory stays constant regardless of
/// how many records pass through.
#[derive(Debug, Clone)]
pub struct Reindexer {
    primary_column: String,
    next: u64,
}

impl Reindexer {
    /// Renumber starting at `starting_offset`, reading the old key from
    /// `primary_column`.
    pub fn new(primary_column: impl Into<String>, starting_offset: u64) -> Self {
        Self {
            primary_column: primary_column.into(),
            next: starting_offset,
        }
    }

    pub fn primary_column(&self) -> &str {
        &self.primary_column
    }

    /// Assign the next key to `record`, yielding its reindex entry.
    pub fn assign(&mut self, record: &Record) -> Result<ReindexEntry> {
        let old_key = record.get(&self.primary_column).filter(|v| !v.is_empty()).ok_or_else(
            || TransformError::MissingPrimaryKey {
                column: self.primary_column.clone(),
            },
        )?;
        let entry = ReindexEntry::new(old_key, self.next);
        self.next += 1;
        Ok(entry)
    }
}
