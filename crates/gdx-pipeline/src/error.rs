//! Pipeline-level error type.

use thiserror::Error;

use gdx_ingest::IngestError;
use gdx_model::DuplicateKeyError;
use gdx_output::OutputError;
use gdx_transform::TransformError;

/// Any failure a pipeline run can end with.
///
/// Source, decode, and parse failures arrive as [`IngestError`];
/// validation and key-resolution failures as [`TransformError`]; sink
/// failures as [`OutputError`]. A terminal returns at most one of these,
/// after which no further records are processed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Reindex(#[from] DuplicateKeyError),

    /// Reindex mappings flowed into a record-shaped sink.
    #[error("reindex mappings reached a record sink; attach reindex_map_to_records before the sink")]
    UnroutedMapping,

    /// Records flowed into the reindex-map sink.
    #[error("records reached the reindex-map sink; collect_reindex_map requires a reindex stage")]
    UnexpectedRecord,
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
