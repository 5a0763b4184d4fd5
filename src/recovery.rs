//! Recovery strategies for MRZ text with inconsistent row lengths.
//!
//! OCR pipelines sometimes drop the last filler of a row. In
//! [`RecoveryMode::Lenient`] such rows are padded back before format detection
//! and each repair is remembered in a [`RecoveryContext`]; the default
//! [`RecoveryMode::Strict`] rejects them.

use crate::codec::FILLER;
use crate::error::{MrzError, Result};
use tracing::debug;

/// Strategy for handling rows whose length differs from the first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryMode {
    /// Strict mode: a row length mismatch is an error (default)
    #[default]
    Strict,
    /// Lenient mode: pad a short row with one filler, except 44-column rows
    Lenient,
}

/// Recovery context for a single parse
#[derive(Debug, Default)]
pub struct RecoveryContext {
    /// Current recovery mode
    pub mode: RecoveryMode,
    /// List of recovery messages
    pub recovery_messages: Vec<String>,
}

impl RecoveryContext {
    /// Create a new recovery context with the given mode
    #[must_use]
    pub fn new(mode: RecoveryMode) -> Self {
        RecoveryContext {
            mode,
            recovery_messages: Vec::new(),
        }
    }

    /// Whether any repair was applied
    #[must_use]
    pub fn has_recoveries(&self) -> bool {
        !self.recovery_messages.is_empty()
    }

    /// Try to recover from an error based on the recovery mode
    ///
    /// # Errors
    ///
    /// Returns `error` in strict mode, otherwise records it and returns `Ok(())`.
    pub fn recover(&mut self, error: MrzError, context: &str) -> Result<()> {
        match self.mode {
            RecoveryMode::Strict => Err(error),
            RecoveryMode::Lenient => {
                debug!(%error, context, "Recovering from malformed MRZ");
                self.recovery_messages.push(format!("{context}: {error}"));
                Ok(())
            },
        }
    }

    /// Bring every row after the first in line with the first row's length.
    ///
    /// In lenient mode a mismatched row gets exactly one filler appended,
    /// unless it is already 44 columns long. The row may still differ
    /// afterwards; format detection then decides.
    ///
    /// # Errors
    ///
    /// Returns [`MrzError::RowLengthMismatch`] for the first mismatched row in
    /// strict mode.
    pub fn normalize_rows(&mut self, rows: &mut [String], mrz: &str) -> Result<()> {
        let Some(expected) = rows.first().map(|row| row.chars().count()) else {
            return Ok(());
        };
        for (index, row) in rows.iter_mut().enumerate().skip(1) {
            let actual = row.chars().count();
            if actual == expected {
                continue;
            }
            let error = MrzError::RowLengthMismatch {
                row: index,
                expected,
                actual,
                mrz: mrz.to_string(),
            };
            self.recover(error, &format!("row {index}"))?;
            if actual != 44 {
                row.push(FILLER);
            }
        }
        Ok(())
    }
}
