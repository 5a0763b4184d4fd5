//! Range-based MRZ parsing primitives and the top-level decode entry points.
//!
//! An [`MrzParser`] owns the normalized rows of one MRZ together with its
//! detected format. Record layouts read fields through
//! the primitives here, which turn out-of-bounds ranges and invalid
//! characters into structural errors and check digit mismatches into `false`.

use crate::codec::{self, FILLER};
use crate::date::MrzDate;
use crate::error::{MrzError, Result};
use crate::format::{self, MrzFormat};
use crate::range::MrzRange;
use crate::record::MrzRecord;
use crate::records;
use crate::recovery::{RecoveryContext, RecoveryMode};
use crate::sex::MrzSex;
use tracing::debug;

/// Parser over the rows of a single MRZ.
#[derive(Debug)]
pub struct MrzParser {
    mrz: String,
    rows: Vec<Vec<char>>,
    format: MrzFormat,
    recovery: RecoveryContext,
}

impl MrzParser {
    /// Split and detect `mrz` in strict mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows differ in length or no format matches.
    pub fn new(mrz: &str) -> Result<Self> {
        MrzParser::with_mode(mrz, RecoveryMode::Strict)
    }

    /// Split and detect `mrz` using the given recovery mode.
    ///
    /// # Errors
    ///
    /// Returns [`MrzError::RowLengthMismatch`] (strict mode only) or
    /// [`MrzError::UnknownFormat`].
    pub fn with_mode(mrz: &str, mode: RecoveryMode) -> Result<Self> {
        let mut recovery = RecoveryContext::new(mode);
        let rows = format::split_rows(mrz, &mut recovery)?;
        let format = format::detect_rows(&rows, mrz)?;
        Ok(MrzParser {
            mrz: mrz.to_string(),
            rows: rows.iter().map(|row| row.chars().collect()).collect(),
            format,
            recovery,
        })
    }

    /// The text this parser was created from.
    #[must_use]
    pub fn mrz(&self) -> &str {
        &self.mrz
    }

    /// The detected format.
    #[must_use]
    pub fn format(&self) -> MrzFormat {
        self.format
    }

    /// Repairs applied while normalizing rows (lenient mode only).
    #[must_use]
    pub fn recovery_messages(&self) -> &[String] {
        &self.recovery.recovery_messages
    }

    fn parse_error(&self, range: MrzRange, message: String) -> MrzError {
        MrzError::ParseError {
            message,
            mrz: self.mrz.clone(),
            range,
            format: Some(self.format),
        }
    }

    fn slice(&self, range: MrzRange) -> Result<&[char]> {
        self.rows
            .get(range.row())
            .and_then(|row| row.get(range.column()..range.column_to()))
            .ok_or_else(|| self.parse_error(range, "Range outside of the MRZ".to_string()))
    }

    /// Character at a single position.
    ///
    /// # Errors
    ///
    /// Returns [`MrzError::ParseError`] if the position is outside the MRZ.
    pub fn char_at(&self, row: usize, column: usize) -> Result<char> {
        Ok(self.slice(MrzRange::at(row, column))?[0])
    }

    /// Concatenated raw text of the given ranges, fillers included.
    ///
    /// # Errors
    ///
    /// Returns [`MrzError::ParseError`] if any range is outside the MRZ.
    pub fn raw_value(&self, ranges: &[MrzRange]) -> Result<String> {
        let mut value = String::new();
        for range in ranges {
            value.extend(self.slice(*range)?);
        }
        Ok(value)
    }

    /// Ensure a range holds only `[A-Z0-9<]`.
    ///
    /// # Errors
    ///
    /// Returns [`MrzError::InvalidCharacter`] naming the first offending position.
    pub fn check_valid_characters(&self, range: MrzRange) -> Result<()> {
        let chars = self.slice(range)?;
        match chars.iter().position(|c| !codec::is_valid_char(*c)) {
            None => Ok(()),
            Some(offset) => Err(MrzError::InvalidCharacter {
                character: chars[offset],
                mrz: self.mrz.clone(),
                range: MrzRange::at(range.row(), range.column() + offset),
                format: Some(self.format),
            }),
        }
    }

    /// Read a text field: trailing fillers dropped, `<<` to `", "`, `<` to a space.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds or holds invalid characters.
    pub fn parse_string(&self, range: MrzRange) -> Result<String> {
        self.check_valid_characters(range)?;
        Ok(codec::filler_to_text(&self.raw_value(&[range])?))
    }

    /// Read a name field and split it into `(surname, given names)`.
    ///
    /// The first `<<` separates the surname from the given names. Without a
    /// separator the whole field is taken as given names and the surname is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds or holds invalid characters.
    pub fn parse_name(&self, range: MrzRange) -> Result<(String, String)> {
        self.check_valid_characters(range)?;
        let raw = self.raw_value(&[range])?;
        let name = raw.trim_end_matches(FILLER);
        match name.find("<<") {
            Some(split) => Ok((
                codec::filler_to_text(&name[..split]),
                codec::filler_to_text(&name[split + 2..]),
            )),
            None => Ok((String::new(), codec::filler_to_text(name))),
        }
    }

    /// Read a six-character date.
    ///
    /// Non-numeric components become `-1`; the date is then invalid but
    /// parsing continues.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds or not six columns wide.
    pub fn parse_date(&self, range: MrzRange) -> Result<MrzDate> {
        let raw = self.raw_value(&[range])?;
        MrzDate::from_mrz(&raw).map_err(|e| self.parse_error(range, e.to_string()))
    }

    /// Read the sex character at a position.
    ///
    /// # Errors
    ///
    /// Returns [`MrzError::ParseError`] for anything but `M`, `F`, `X` or `<`.
    pub fn parse_sex(&self, row: usize, column: usize) -> Result<MrzSex> {
        let c = self.char_at(row, column)?;
        MrzSex::from_mrz(c).ok_or_else(|| {
            self.parse_error(
                MrzRange::at(row, column),
                format!("Invalid MRZ sex character: {c}"),
            )
        })
    }

    /// Verify the check digit at `(row, column)` against the given ranges.
    ///
    /// A filler at the check position reads as `0`. Never fails: positions
    /// outside the MRZ and spans with invalid characters count as a mismatch.
    #[must_use]
    pub fn check_digit(&self, row: usize, column: usize, ranges: &[MrzRange], label: &str) -> bool {
        match self.raw_value(ranges) {
            Ok(value) => self.check_digit_str(row, column, &value, label),
            Err(error) => {
                debug!(%error, label, "Check digit span unreadable");
                false
            },
        }
    }

    /// Verify the check digit at `(row, column)` against an explicit value.
    #[must_use]
    pub fn check_digit_str(&self, row: usize, column: usize, value: &str, label: &str) -> bool {
        let Ok(found) = self.char_at(row, column) else {
            debug!(row, column, label, "Check digit position outside the MRZ");
            return false;
        };
        let found = if found == FILLER { '0' } else { found };
        match codec::check_digit_char(value) {
            Ok(expected) if expected == found => true,
            Ok(expected) => {
                debug!(
                    label,
                    value,
                    %expected,
                    %found,
                    row,
                    column,
                    "Check digit verification failed"
                );
                false
            },
            Err(error) => {
                debug!(%error, label, value, "Check digit not computable");
                false
            },
        }
    }

    /// Decode the MRZ into a record of the detected format.
    ///
    /// # Errors
    ///
    /// Returns a structural error from the format's layout.
    pub fn decode(&self) -> Result<MrzRecord> {
        records::decode(self)
    }
}

/// Detect and decode an MRZ in strict mode.
///
/// # Errors
///
/// Returns an error if the format is unknown or the text is structurally
/// invalid. Check digit failures are reported through the record's flags.
///
/// # Examples
///
/// ```
/// use mrzc::{parse, MrzFormat};
///
/// let record = parse(
///     "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
///      L898902C36UTO7408122F1204159ZE184226B<<<<<10",
/// )
/// .unwrap();
/// assert_eq!(record.format(), MrzFormat::Passport);
/// assert_eq!(record.surname(), "ERIKSSON");
/// assert_eq!(record.given_names(), "ANNA MARIA");
/// assert!(record.valid_composite());
/// ```
pub fn parse(mrz: &str) -> Result<MrzRecord> {
    parse_with_mode(mrz, RecoveryMode::Strict)
}

/// Detect and decode an MRZ using the given recovery mode.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_mode(mrz: &str, mode: RecoveryMode) -> Result<MrzRecord> {
    MrzParser::with_mode(mrz, mode)?.decode()
}
