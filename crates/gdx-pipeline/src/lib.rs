//! Streaming pipeline over game-database export tables.
//!
//! This crate provides the chain-composition core: a fluent builder that
//! reads one table's UTF-16LE export file, parses each line into a
//! structured record, pushes it through the attached transform stages in
//! order, and terminates into a file sink or a caller-visible collection.
//! One record is in flight at a time, so memory use is bounded by the
//! schema width rather than the file size, and records reach the sink in
//! source order.
//!
//! # Example
//!
//! ```no_run
//! use gdx_model::{Field, Schema, Table};
//! use gdx_pipeline::TablePipeline;
//! use std::path::Path;
//!
//! let schema = Schema::new(vec![Field::integer("id"), Field::text("name")]);
//! let output = Schema::new(vec![
//!     Field::integer("id"),
//!     Field::text("name"),
//!     Field::flag("active").with_default("true"),
//! ]);
//!
//! let summary = TablePipeline::new("data/in", Table::new("players"), schema)
//!     .filter(|record| record.get("id") != Some("0"))
//!     .fill_defaults(output.clone())
//!     .write(Path::new("data/out"), output)?;
//! println!("{} records written", summary.records_out);
//! # Ok::<(), gdx_pipeline::PipelineError>(())
//! ```
//!
//! # Renumbering primary keys
//!
//! Renumbering is a two-phase design: one run materializes the old-to-new
//! key map, a second run resolves foreign keys against it. The map is the
//! only place the chain deliberately steps outside strict streaming; it
//! stays bounded by the renumbered table's size.
//!
//! ```no_run
//! use gdx_model::{Field, Schema, Table};
//! use gdx_pipeline::TablePipeline;
//! use gdx_transform::ForeignKeyRules;
//! use std::path::Path;
//!
//! let names = Schema::new(vec![Field::integer("id"), Field::text("name")]);
//! let map = TablePipeline::new("data/in", Table::new("playernames"), names)
//!     .reindex("id", 0)
//!     .collect_reindex_map()?;
//!
//! let players = Schema::new(vec![Field::integer("id"), Field::integer("last_name_id")]);
//! TablePipeline::new("data/in", Table::new("players"), players.clone())
//!     .apply_foreign_keys(ForeignKeyRules::new(map, "id", vec!["last_name_id".into()]))
//!     .write(Path::new("data/out"), players)?;
//! # Ok::<(), gdx_pipeline::PipelineError>(())
//! ```

pub mod builder;
mod error;
pub mod stage;

pub use builder::{OutputFormat, RunSummary, TablePipeline};
pub use error::{PipelineError, Result};
pub use stage::{Item, Stage};
