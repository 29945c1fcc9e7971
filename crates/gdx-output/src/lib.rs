//! Output stages for game-database export files.
//!
//! [`serialize_record`] turns a structured record back into a delimited
//! line in schema order, symmetric with the parser; [`TableWriter`] owns
//! the destination file and appends the record separator while encoding
//! UTF-16LE.

mod error;
pub mod serializer;
pub mod writer;

pub use error::{OutputError, Result};
pub use serializer::{json_line, serialize_record};
pub use writer::{LINE_ENDING, TableWriter};
