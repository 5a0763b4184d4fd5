//! Error types for MRZ operations.
//!
//! This module provides the [`MrzError`] type for all MRZ library operations
//! and the [`Result`] convenience type.
//!
//! Only structural problems are errors. Check digit mismatches and out-of-range
//! dates are reported through the validity flags of
//! [`MrzRecord`](crate::record::MrzRecord) instead.

use crate::format::MrzFormat;
use crate::range::MrzRange;
use thiserror::Error;

/// Error type for all MRZ library operations.
#[derive(Error, Debug)]
pub enum MrzError {
    /// No registered format matches the row/column dimensions of the input.
    #[error("Unknown format / unsupported number of rows/cols: {rows}/{columns}")]
    UnknownFormat {
        /// Number of rows seen in the input.
        rows: usize,
        /// Length of the first row.
        columns: usize,
        /// The MRZ text being parsed.
        mrz: String,
    },

    /// A row after the first one has a different length (strict mode only).
    #[error("Different row lengths: row 0 has {expected} columns, row {row} has {actual}")]
    RowLengthMismatch {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
        /// The MRZ text being parsed.
        mrz: String,
    },

    /// A character outside `[A-Z0-9<]` was found where only MRZ characters are allowed.
    #[error("Invalid character in MRZ record at {range} ({}): {character:?}", format_label(.format))]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// The MRZ text being parsed.
        mrz: String,
        /// Location of the offending character.
        range: MrzRange,
        /// Format being attempted, if already known.
        format: Option<MrzFormat>,
    },

    /// Structural parse failure at a known location.
    #[error("Failed to parse MRZ ({}) at {range}: {message}", format_label(.format))]
    ParseError {
        /// Description of the failure.
        message: String,
        /// The MRZ text being parsed.
        mrz: String,
        /// Columns implicated in the failure.
        range: MrzRange,
        /// Format being attempted, if already known.
        format: Option<MrzFormat>,
    },

    /// A value handed to an encoder or builder cannot be represented.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A chip data-group buffer cannot be interpreted as an MRZ.
    #[error("Invalid data group: {0}")]
    DataGroup(String),

    /// Text handed to the OCR clean-up does not look like an MRZ.
    #[error("Invalid MRZ string: {0}")]
    InvalidInput(String),

    /// A decoded record failed the acceptance rule of [`crate::cleaner::parse_and_clean`].
    #[error("Invalid check digits")]
    InvalidCheckDigits,

    /// JSON conversion failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// CSV writer failure.
    #[error("CSV error: {0}")]
    CsvError(#[from] ::csv::Error),

    /// IO error from an in-memory writer.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MrzError {
    /// The columns implicated in the error, when the error has a location.
    #[must_use]
    pub fn range(&self) -> Option<MrzRange> {
        match self {
            MrzError::InvalidCharacter { range, .. } | MrzError::ParseError { range, .. } => {
                Some(*range)
            },
            _ => None,
        }
    }

    /// The format that was being attempted, when known.
    #[must_use]
    pub fn format(&self) -> Option<MrzFormat> {
        match self {
            MrzError::InvalidCharacter { format, .. } | MrzError::ParseError { format, .. } => {
                *format
            },
            _ => None,
        }
    }

    /// The raw MRZ text that failed to parse, when the error carries it.
    #[must_use]
    pub fn mrz(&self) -> Option<&str> {
        match self {
            MrzError::UnknownFormat { mrz, .. }
            | MrzError::RowLengthMismatch { mrz, .. }
            | MrzError::InvalidCharacter { mrz, .. }
            | MrzError::ParseError { mrz, .. } => Some(mrz),
            _ => None,
        }
    }
}

fn format_label(format: &Option<MrzFormat>) -> String {
    format.map_or_else(|| "unknown format".to_string(), |f| f.to_string())
}

/// Convenience type alias for [`std::result::Result`] with [`MrzError`].
pub type Result<T> = std::result::Result<T, MrzError>;
