//! Ingestion stages for game-database export files.
//!
//! An export file is UTF-16LE encoded delimited text: one header line
//! (discarded), then one record per line. [`LineReader`] decodes the byte
//! stream incrementally and yields text lines; [`parse_record`] turns one
//! line into a structured [`gdx_model::Record`] by positional assignment
//! against a field schema.

pub mod codec;
mod error;
pub mod parser;

pub use codec::{HEADER_LINES, LineReader};
pub use error::{IngestError, Result};
pub use parser::{parse_record, split_line};
