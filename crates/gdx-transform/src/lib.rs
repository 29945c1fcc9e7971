//! Record-level transforms for game-database exchange.
//!
//! Each module provides the body of one pipeline stage as a plain function
//! over a [`gdx_model::Record`] plus its configuration type. The pipeline
//! crate wraps these into chainable stages; keeping the bodies free of any
//! stream plumbing makes them directly testable.

pub mod contract;
pub mod defaults;
mod error;
pub mod foreign_key;
pub mod reindex;
pub mod validate;

pub use contract::{ContractTerms, extend_contract};
pub use defaults::fill_defaults;
pub use error::{Result, TransformError};
pub use foreign_key::{ForeignKeyRules, UnresolvedKeyPolicy, apply_foreign_keys};
pub use reindex::Reindexer;
pub use validate::{InvalidRecordPolicy, ValidationRules, Violation, validate_record};
