//! Contract-date extension relative to a reference date.
//!
//! Exports carry per-record contract dates that may already lie in the
//! past at import time; the importing game rejects such rows. This stage
//! recomputes expired, absent, or unreadable contract dates to one year
//! past the reference date.

use chrono::{Months, NaiveDate, Utc};
use gdx_model::{DATE_FORMAT, FieldKind, Record, Schema};

/// Contract fields to recompute plus the date they are measured against.
#[derive(Debug, Clone)]
pub struct ContractTerms {
    fields: Schema,
    reference: NaiveDate,
}

impl ContractTerms {
    /// Create terms over the date fields of `fields`.
    ///
    /// A `None` reference date means "today".
    pub fn new(fields: Schema, reference: Option<NaiveDate>) -> Self {
        Self {
            fields,
            reference: reference.unwrap_or_else(|| Utc::now().date_naive()),
        }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }
}

/// Recompute contract dates that do not outlive the reference date.
///
/// Only fields of kind [`FieldKind::Date`] in the terms schema are
/// touched. A date on or after the reference date is left unchanged.
pub fn extend_contract(terms: &ContractTerms, record: &mut Record) {
    for field in terms.fields.fields() {
        if field.kind != FieldKind::Date {
            continue;
        }
        let current = record
            .get(&field.name)
            .and_then(|v| NaiveDate::parse_from_str(v, DATE_FORMAT).ok());
        if current.is_none_or(|date| date < terms.reference) {
            let extended = extended_date(terms.reference);
            record.set(&field.name, extended.format(DATE_FORMAT).to_string());
        }
    }
}

fn extended_date(reference: NaiveDate) -> NaiveDate {
    reference
        .checked_add_months(Months::new(12))
        .unwrap_or(reference)
}
