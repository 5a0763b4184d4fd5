//! Column ranges within an MRZ.
//!
//! An [`MrzRange`] names a half-open span of columns on one row. Every field
//! layout in [`crate::records`] is written as a table of these constants.

use crate::error::MrzError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open column span `[column, column_to)` on a single MRZ row.
///
/// Deserialization rejects empty and inverted spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeFields")]
pub struct MrzRange {
    row: usize,
    column: usize,
    column_to: usize,
}

impl MrzRange {
    /// Create a range on `row` covering columns `column..column_to`.
    ///
    /// `column_to` must be greater than `column`; an empty or inverted span
    /// is a programming error in a layout table and trips a debug assertion.
    #[must_use]
    pub const fn new(row: usize, column: usize, column_to: usize) -> Self {
        debug_assert!(column_to > column);
        MrzRange {
            row,
            column,
            column_to,
        }
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// First column (inclusive).
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Last column (exclusive).
    #[must_use]
    pub const fn column_to(&self) -> usize {
        self.column_to
    }

    /// Number of columns covered.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.column_to - self.column
    }

    /// The single-column range at `column`.
    #[must_use]
    pub const fn at(row: usize, column: usize) -> Self {
        MrzRange::new(row, column, column + 1)
    }
}

#[derive(Deserialize)]
struct RangeFields {
    row: usize,
    column: usize,
    column_to: usize,
}

impl TryFrom<RangeFields> for MrzRange {
    type Error = MrzError;

    fn try_from(fields: RangeFields) -> Result<Self, Self::Error> {
        if fields.column_to <= fields.column {
            return Err(MrzError::InvalidArgument(format!(
                "range {}-{},{} is empty or inverted",
                fields.column, fields.column_to, fields.row
            )));
        }
        Ok(MrzRange::new(fields.row, fields.column, fields.column_to))
    }
}

impl fmt::Display for MrzRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{},{}", self.column, self.column_to, self.row)
    }
}
