//! The fluent table pipeline builder.
//!
//! A [`TablePipeline`] starts as decode → line-split → header-skip →
//! parse over one table's export file. Each attach method appends one
//! stage and returns the builder, so callers compose the chain in
//! whatever order the data needs. Terminal methods consume the builder,
//! drive the whole chain record by record, and return a `Result`:
//! `Ok` is the single completion signal, `Err` the single failure
//! signal, and nothing can be attached once a terminal ran.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use gdx_ingest::{HEADER_LINES, LineReader, parse_record};
use gdx_model::{Record, ReindexMap, Schema, Table};
use gdx_output::{TableWriter, json_line, serialize_record};
use gdx_transform::{ContractTerms, ForeignKeyRules, Reindexer, ValidationRules};

use crate::error::{PipelineError, Result};
use crate::stage::{
    ApplyForeignKeyStage, DefaultFillStage, ExtendContractStage, FilterStage, Item,
    MapToRecordStage, ObserveStage, ReindexStage, Stage, ValidateStage,
};

/// How records are rendered at the file sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Delimited text lines in schema order.
    #[default]
    Delimited,
    /// One JSON object per line, keeping record field order.
    Json,
}

/// Counters reported by a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Data lines decoded from the source (header and blanks excluded).
    pub lines_read: u64,
    /// Items that reached the sink.
    pub records_out: u64,
    /// Records dropped by filter or validation stages.
    pub records_dropped: u64,
}

/// Single-pass processing chain over one table's export file.
pub struct TablePipeline {
    input_dir: PathBuf,
    table: Table,
    schema: Schema,
    stages: Vec<Box<dyn Stage>>,
    chunk_observer: Option<Box<dyn FnMut(&[u8])>>,
}

impl TablePipeline {
    /// Start a chain reading `<input_dir>/<table>.txt` and parsing each
    /// line against `schema`.
    ///
    /// The source file is opened when a terminal method runs; an
    /// unreadable file surfaces there as [`PipelineError::Ingest`].
    pub fn new(input_dir: impl Into<PathBuf>, table: Table, schema: Schema) -> Self {
        Self {
            input_dir: input_dir.into(),
            table,
            schema,
            stages: Vec::new(),
            chunk_observer: None,
        }
    }

    fn attach(mut self, stage: Box<dyn Stage>) -> Self {
        tracing::debug!(
            table = %self.table,
            stage = stage.name(),
            position = self.stages.len(),
            "stage attached"
        );
        self.stages.push(stage);
        self
    }

    /// Append a validation stage; the rule set decides drop-vs-abort.
    #[must_use]
    pub fn validate(self, rules: ValidationRules) -> Self {
        self.attach(Box::new(ValidateStage::new(rules)))
    }

    /// Append a filter keeping records for which `predicate` is true.
    #[must_use]
    pub fn filter(self, predicate: impl Fn(&Record) -> bool + 'static) -> Self {
        self.attach(Box::new(FilterStage::new(predicate)))
    }

    /// Append a default-fill stage over `schema`.
    #[must_use]
    pub fn fill_defaults(self, schema: Schema) -> Self {
        self.attach(Box::new(DefaultFillStage::new(schema)))
    }

    /// Append a contract-extension stage over the date fields of
    /// `fields`; a `None` reference date means "today".
    #[must_use]
    pub fn extend_contract(self, fields: Schema, reference: Option<NaiveDate>) -> Self {
        self.attach(Box::new(ExtendContractStage::new(ContractTerms::new(
            fields, reference,
        ))))
    }

    /// Append a reindex stage assigning sequential keys from
    /// `starting_offset` in arrival order. Downstream of this stage the
    /// chain carries reindex mappings instead of records.
    #[must_use]
    pub fn reindex(self, primary_column: &str, starting_offset: u64) -> Self {
        self.attach(Box::new(ReindexStage::new(Reindexer::new(
            primary_column,
            starting_offset,
        ))))
    }

    /// Append a foreign-key apply stage over a materialized reindex map.
    #[must_use]
    pub fn apply_foreign_keys(self, rules: ForeignKeyRules) -> Self {
        self.attach(Box::new(ApplyForeignKeyStage::new(rules)))
    }

    /// Append a stage converting reindex mappings back into records
    /// carrying the new key in `primary_column`.
    #[must_use]
    pub fn reindex_map_to_records(self, primary_column: &str) -> Self {
        self.attach(Box::new(MapToRecordStage::new(primary_column)))
    }

    /// Attach a record observer at the current tail of the chain.
    #[must_use]
    pub fn observe(self, callback: impl FnMut(&Record) + 'static) -> Self {
        self.attach(Box::new(ObserveStage::new(callback)))
    }

    /// Register an observer for the encoded bytes of every line the file
    /// sink writes. Only terminals that write a file invoke it.
    #[must_use]
    pub fn on_chunk(mut self, callback: impl FnMut(&[u8]) + 'static) -> Self {
        self.chunk_observer = Some(Box::new(callback));
        self
    }

    /// Serialize surviving records in schema order and write them to
    /// `<output_dir>/<table>.txt`, creating the directory if absent.
    pub fn write(self, output_dir: &Path, schema: Schema) -> Result<RunSummary> {
        self.write_as(output_dir, schema, OutputFormat::Delimited)
    }

    /// Like [`TablePipeline::write`] with an explicit output format.
    pub fn write_as(
        mut self,
        output_dir: &Path,
        schema: Schema,
        format: OutputFormat,
    ) -> Result<RunSummary> {
        let mut sink = FileSink {
            writer: TableWriter::create(output_dir, &self.table)?,
            schema,
            format,
            observer: self.chunk_observer.take(),
        };
        let summary = self.drive(&mut sink)?;
        sink.writer.finish()?;
        Ok(summary)
    }

    /// Run the chain and collect the surviving records.
    pub fn collect(self) -> Result<Vec<Record>> {
        let mut sink = CollectSink {
            records: Vec::new(),
        };
        self.drive(&mut sink)?;
        Ok(sink.records)
    }

    /// Run the chain and materialize the reindex stage's mappings.
    pub fn collect_reindex_map(self) -> Result<ReindexMap> {
        let mut sink = MapSink {
            map: ReindexMap::new(),
        };
        self.drive(&mut sink)?;
        Ok(sink.map)
    }

    /// Run the chain for its observers alone.
    pub fn run(self) -> Result<RunSummary> {
        self.drive(&mut DrainSink)
    }

    /// Pull lines one at a time and push each through every stage before
    /// touching the next, so memory stays bounded by the schema width
    /// and a slow sink delays the source read.
    fn drive<S: ItemSink>(mut self, sink: &mut S) -> Result<RunSummary> {
        let path = self.table.path_in(&self.input_dir);
        tracing::debug!(table = %self.table, path = %path.display(), "pipeline started");

        let reader = LineReader::open(&path, HEADER_LINES)?;
        let mut summary = RunSummary::default();
        let mut current: Vec<Item> = Vec::with_capacity(1);
        let mut next: Vec<Item> = Vec::new();

        for line in reader {
            let line = line?;
            summary.lines_read += 1;
            current.push(Item::Record(parse_record(&self.schema, &line)));

            for stage in &mut self.stages {
                next.clear();
                for item in current.drain(..) {
                    stage.process(item, &mut next)?;
                }
                std::mem::swap(&mut current, &mut next);
                if current.is_empty() {
                    break;
                }
            }

            for item in current.drain(..) {
                sink.accept(item)?;
                summary.records_out += 1;
            }
        }

        summary.records_dropped = summary.lines_read.saturating_sub(summary.records_out);
        tracing::info!(
            table = %self.table,
            lines_read = summary.lines_read,
            records_out = summary.records_out,
            records_dropped = summary.records_dropped,
            "pipeline finished"
        );
        Ok(summary)
    }
}

/// Terminal consumer of chain output.
trait ItemSink {
    fn accept(&mut self, item: Item) -> Result<()>;
}

struct FileSink {
    writer: TableWriter,
    schema: Schema,
    format: OutputFormat,
    observer: Option<Box<dyn FnMut(&[u8])>>,
}

impl ItemSink for FileSink {
    fn accept(&mut self, item: Item) -> Result<()> {
        let Item::Record(record) = item else {
            return Err(PipelineError::UnroutedMapping);
        };
        let line = match self.format {
            OutputFormat::Delimited => serialize_record(&self.schema, &record),
            OutputFormat::Json => json_line(&record)?,
        };
        let bytes = self.writer.write_line(&line)?;
        if let Some(observer) = &mut self.observer {
            observer(bytes);
        }
        Ok(())
    }
}

struct CollectSink {
    records: Vec<Record>,
}

impl ItemSink for CollectSink {
    fn accept(&mut self, item: Item) -> Result<()> {
        match item {
            Item::Record(record) => {
                self.records.push(record);
                Ok(())
            }
            Item::Mapping(_) => Err(PipelineError::UnroutedMapping),
        }
    }
}

struct MapSink {
    map: ReindexMap,
}

impl ItemSink for MapSink {
    fn accept(&mut self, item: Item) -> Result<()> {
        match item {
            Item::Mapping(entry) => {
                self.map.insert(entry)?;
                Ok(())
            }
            Item::Record(_) => Err(PipelineError::UnexpectedRecord),
        }
    }
}

struct DrainSink;

impl ItemSink for DrainSink {
    fn accept(&mut self, _item: Item) -> Result<()> {
        Ok(())
    }
}
