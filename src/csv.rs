//! CSV export of MRZ records.
//!
//! One header row followed by one row per record, suitable for spreadsheets
//! and bulk review of scanned documents.
//!
//! # API Patterns
//!
//! - **Single record**: [`record_to_csv`]
//! - **Batch records**: [`records_to_csv`]

use crate::error::{MrzError, Result};
use crate::record::MrzRecord;

const HEADER: [&str; 18] = [
    "format",
    "code",
    "code1",
    "code2",
    "issuing_country",
    "document_number",
    "surname",
    "given_names",
    "date_of_birth",
    "sex",
    "expiration_date",
    "nationality",
    "optional",
    "optional2",
    "valid_document_number",
    "valid_date_of_birth",
    "valid_expiration_date",
    "valid_composite",
];

/// Convert a single record to CSV, header included.
///
/// # Errors
///
/// Returns an error if the CSV cannot be written.
pub fn record_to_csv(record: &MrzRecord) -> Result<String> {
    records_to_csv(std::slice::from_ref(record))
}

/// Convert records to CSV with a single header row.
///
/// Dates are written as their six MRZ characters; a missing expiration date
/// is an empty cell. The `optional` column holds the personal number on
/// passports; `optional2` is only filled for TD1-family cards.
///
/// # Errors
///
/// Returns an error if the CSV cannot be written.
pub fn records_to_csv(records: &[MrzRecord]) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record(row(record))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| MrzError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| MrzError::InvalidArgument(format!("CSV output is not UTF-8: {e}")))
}

fn row(record: &MrzRecord) -> [String; 18] {
    let optional = record
        .optional()
        .or_else(|| record.personal_number())
        .unwrap_or_default();
    [
        record.format().to_string(),
        record.code().to_string(),
        record.code1().to_string(),
        record.code2().to_string(),
        record.issuing_country().to_string(),
        record.document_number().to_string(),
        record.surname().to_string(),
        record.given_names().to_string(),
        record.date_of_birth().to_mrz(),
        record.sex().mrz_char().to_string(),
        record
            .expiration_date()
            .map(crate::date::MrzDate::to_mrz)
            .unwrap_or_default(),
        record.nationality().to_string(),
        optional.to_string(),
        record.optional2().unwrap_or_default().to_string(),
        record.valid_document_number().to_string(),
        record.valid_date_of_birth().to_string(),
        record.valid_expiration_date().to_string(),
        record.valid_composite().to_string(),
    ]
}
