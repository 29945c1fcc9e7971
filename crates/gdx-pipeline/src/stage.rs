//! The stage contract and the built-in stage set.
//!
//! A stage consumes one item and produces zero or more items into `out`.
//! Items are either structured records or reindex mappings; a stage that
//! only understands one shape passes the other through unchanged, so the
//! chain stays a single linear sequence whatever the caller attaches.

use gdx_model::{Record, ReindexEntry, Schema};
use gdx_transform::{
    ContractTerms, ForeignKeyRules, InvalidRecordPolicy, Reindexer, TransformError,
    ValidationRules, apply_foreign_keys, extend_contract, fill_defaults, validate_record,
};

use crate::error::Result;

/// One element flowing through the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// A structured record.
    Record(Record),
    /// An old-key/new-key pair emitted by the reindex stage.
    Mapping(ReindexEntry),
}

/// A single transformation step in the chain.
///
/// The driver feeds one item at a time and only pulls the next source
/// line after the chain has fully drained the current one, so a slow
/// sink naturally delays the source read.
pub trait Stage {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Consume `item`, pushing any output items onto `out`.
    fn process(&mut self, item: Item, out: &mut Vec<Item>) -> Result<()>;
}

/// Validation stage: applies a rule set and its drop-vs-abort policy.
pub struct ValidateStage {
    rules: ValidationRules,
}

impl ValidateStage {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }
}

impl Stage for ValidateStage {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn process(&mut self, item: Item, out: &mut Vec<Item>) -> Result<()> {
        let Item::Record(record) = item else {
            out.push(item);
            return Ok(());
        };
        let violations = validate_record(&self.rules, &record);
        if violations.is_empty() {
            out.push(Item::Record(record));
            return Ok(());
        }
        match self.rules.policy() {
            InvalidRecordPolicy::Drop => {
                tracing::debug!(
                    violations = violations.len(),
                    "dropping record that failed validation"
                );
                Ok(())
            }
            InvalidRecordPolicy::Abort => {
                Err(TransformError::InvalidRecord { violations }.into())
            }
        }
    }
}

/// Filter stage: keeps records the predicate accepts.
pub struct FilterStage {
    predicate: Box<dyn Fn(&Record) -> bool>,
}

impl FilterStage {
    pub fn new(predicate: impl Fn(&Record) -> bool + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl Stage for FilterStage {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn process(&mut self, item: Item, out: &mut Vec<Item>) -> Result<()> {
        match item {
            Item::Record(record) if !(self.predicate)(&record) => Ok(()),
            item => {
                out.push(item);
                Ok(())
            }
        }
    }
}

/// Default-fill stage: populates absent fields from schema defaults.
pub struct DefaultFillStage {
    schema: Schema,
}

impl DefaultFillStage {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }
}

impl Stage for DefaultFillStage {
    fn name(&self) -> &'static str {
        "fill_defaults"
    }

    fn process(&mut self, item: Item, out: &mut Vec<Item>) -> Result<()> {
        match item {
            Item::Record(mut record) => {
                fill_defaults(&self.schema, &mut record);
                out.push(Item::Record(record));
            }
            item => out.push(item),
        }
        Ok(())
    }
}

/// Contract-extension stage.
pub struct ExtendContractStage {
    terms: ContractTerms,
}

impl ExtendContractStage {
    pub fn new(terms: ContractTerms) -> Self {
        Self { terms }
    }
}

impl Stage for ExtendContractStage {
    fn name(&self) -> &'static str {
        "extend_contract"
    }

    fn process(&mut self, item: Item, out: &mut Vec<Item>) -> Result<()> {
        match item {
            Item::Record(mut record) => {
                extend_contract(&self.terms, &mut record);
                out.push(Item::Record(record));
            }
            item => out.push(item),
        }
        Ok(())
    }
}

/// Reindex stage: replaces each record with its renumbering mapping.
pub struct ReindexStage {
    reindexer: Reindexer,
}

impl ReindexStage {
    pub fn new(reindexer: Reindexer) -> Self {
        Self { reindexer }
    }
}

impl Stage for ReindexStage {
    fn name(&self) -> &'static str {
        "reindex"
    }

    fn process(&mut self, item: Item, out: &mut Vec<Item>) -> Result<()> {
        match item {
            Item::Record(record) => {
                let entry = self.reindexer.assign(&record)?;
                out.push(Item::Mapping(entry));
                Ok(())
            }
            item => {
                out.push(item);
                Ok(())
            }
        }
    }
}

/// Foreign-key apply stage.
pub struct ApplyForeignKeyStage {
    rules: ForeignKeyRules,
}

impl ApplyForeignKeyStage {
    pub fn new(rules: ForeignKeyRules) -> Self {
        Self { rules }
    }
}

impl Stage for ApplyForeignKeyStage {
    fn name(&self) -> &'static str {
        "apply_foreign_keys"
    }

    fn process(&mut self, item: Item, out: &mut Vec<Item>) -> Result<()> {
        match item {
            Item::Record(mut record) => {
                apply_foreign_keys(&self.rules, &mut record)?;
                out.push(Item::Record(record));
                Ok(())
            }
            item => {
                out.push(item);
                Ok(())
            }
        }
    }
}

/// Converts reindex mappings back into single-field records.
pub struct MapToRecordStage {
    primary_column: String,
}

impl MapToRecordStage {
    pub fn new(primary_column: impl Into<String>) -> Self {
        Self {
            primary_column: primary_column.into(),
        }
    }
}

impl Stage for MapToRecordStage {
    fn name(&self) -> &'static str {
        "reindex_map_to_records"
    }

    fn process(&mut self, item: Item, out: &mut Vec<Item>) -> Result<()> {
        match item {
            Item::Mapping(entry) => {
                let mut record = Record::with_capacity(1);
                record.set(&self.primary_column, entry.new_key.to_string());
                out.push(Item::Record(record));
            }
            item => out.push(item),
        }
        Ok(())
    }
}

/// Pass-through observer for records at the current tail.
pub struct ObserveStage {
    callback: Box<dyn FnMut(&Record)>,
}

impl ObserveStage {
    pub fn new(callback: impl FnMut(&Record) + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl Stage for ObserveStage {
    fn name(&self) -> &'static str {
        "observe"
    }

    fn process(&mut self, item: Item, out: &mut Vec<Item>) -> Result<()> {
        if let Item::Record(record) = &item {
            (self.callback)(record);
        }
        out.push(item);
        Ok(())
    }
}
