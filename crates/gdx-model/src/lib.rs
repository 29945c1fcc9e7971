//! Data model types for game-database exchange files.
//!
//! A game-database export is a set of delimited text tables, one file per
//! table, with a fixed column layout per table. This crate provides the
//! types shared by every processing stage:
//!
//! - [`Table`]: logical dataset name, mapped to a file name
//! - [`Schema`] / [`Field`]: ordered column descriptors for one table
//! - [`Record`]: one parsed row, keyed by field name in schema order
//! - [`ReindexMap`]: old-key to new-key pairs produced by primary-key
//!   renumbering and consumed by foreign-key resolution

pub mod record;
pub mod reindex;
pub mod schema;
pub mod table;

pub use record::Record;
pub use reindex::{DuplicateKeyError, ReindexEntry, ReindexMap};
pub use schema::{DATE_FORMAT, Field, FieldKind, Schema};
pub use table::{TABLE_FILE_EXT, Table};
