//! Decoded MRZ records.
//!
//! An [`MrzRecord`] is produced either by decoding text or by
//! [`MrzRecordBuilder`](crate::record_builder::MrzRecordBuilder). It is
//! immutable; the `with_*` methods return a new record with every check digit
//! recomputed.

use crate::date::MrzDate;
use crate::document_code::MrzDocumentCode;
use crate::error::{MrzError, Result};
use crate::format::MrzFormat;
use crate::parser::MrzParser;
use crate::range::MrzRange;
use crate::record_builder::MrzRecordBuilder;
use crate::records;
use crate::sex::MrzSex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields that only some layouts carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutDetails {
    /// TD3 passports: a personal number protected by its own check digit.
    PersonalNumber {
        /// Personal number, or empty.
        personal_number: String,
        /// Whether the personal number check digit matched.
        valid_personal_number: bool,
    },
    /// TD1 cards: optional data on the first and second rows.
    DualOptional {
        /// Optional data on the first row.
        optional: String,
        /// Optional data on the second row.
        optional2: String,
    },
    /// Two-row cards and visas: a single optional data field.
    SingleOptional {
        /// Optional data.
        optional: String,
    },
}

/// A decoded machine-readable zone.
///
/// Check digit results are exposed as flags; a record with wrong check digits
/// is still returned so that callers can decide what to trust.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrzRecord {
    pub(crate) code: MrzDocumentCode,
    pub(crate) code1: char,
    pub(crate) code2: char,
    pub(crate) issuing_country: String,
    pub(crate) document_number: String,
    pub(crate) surname: String,
    pub(crate) given_names: String,
    pub(crate) date_of_birth: MrzDate,
    pub(crate) sex: MrzSex,
    pub(crate) expiration_date: Option<MrzDate>,
    pub(crate) nationality: String,
    pub(crate) format: MrzFormat,
    pub(crate) valid_document_number: bool,
    pub(crate) valid_date_of_birth: bool,
    pub(crate) valid_expiration_date: bool,
    pub(crate) valid_composite: bool,
    pub(crate) details: LayoutDetails,
}

impl MrzRecord {
    crate::define_getters!(
        ref issuing_country: str,
        document_number: str,
        surname: str,
        given_names: str,
        nationality: str,
        date_of_birth: MrzDate,
        details: LayoutDetails,
    );

    crate::define_getters!(
        copy code: MrzDocumentCode,
        code1: char,
        code2: char,
        sex: MrzSex,
        format: MrzFormat,
        valid_document_number: bool,
        valid_date_of_birth: bool,
        valid_expiration_date: bool,
        valid_composite: bool,
    );

    /// Decode MRZ text of any supported format.
    ///
    /// # Errors
    ///
    /// See [`crate::parse`].
    pub fn decode(mrz: &str) -> Result<Self> {
        crate::parser::parse(mrz)
    }

    /// Decode MRZ text that must be in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`MrzError::ParseError`] if the text is detected as a
    /// different format, and any error [`crate::parse`] returns.
    pub fn decode_as(mrz: &str, format: MrzFormat) -> Result<Self> {
        let parser = MrzParser::new(mrz)?;
        if parser.format() != format {
            return Err(MrzError::ParseError {
                message: format!("Wrong format: expected {format}, detected {}", parser.format()),
                mrz: mrz.to_string(),
                range: MrzRange::new(0, 0, format.columns()),
                format: Some(format),
            });
        }
        parser.decode()
    }

    /// Expiration date; `None` for layouts that do not carry one.
    #[must_use]
    pub fn expiration_date(&self) -> Option<&MrzDate> {
        self.expiration_date.as_ref()
    }

    /// TD3 personal number.
    #[must_use]
    pub fn personal_number(&self) -> Option<&str> {
        match &self.details {
            LayoutDetails::PersonalNumber {
                personal_number, ..
            } => Some(personal_number),
            _ => None,
        }
    }

    /// Whether the TD3 personal number check digit matched.
    #[must_use]
    pub fn valid_personal_number(&self) -> Option<bool> {
        match &self.details {
            LayoutDetails::PersonalNumber {
                valid_personal_number,
                ..
            } => Some(*valid_personal_number),
            _ => None,
        }
    }

    /// Optional data (first row on TD1 cards).
    #[must_use]
    pub fn optional(&self) -> Option<&str> {
        match &self.details {
            LayoutDetails::DualOptional { optional, .. }
            | LayoutDetails::SingleOptional { optional } => Some(optional),
            LayoutDetails::PersonalNumber { .. } => None,
        }
    }

    /// Optional data on the second row of TD1 cards.
    #[must_use]
    pub fn optional2(&self) -> Option<&str> {
        match &self.details {
            LayoutDetails::DualOptional { optional2, .. } => Some(optional2),
            _ => None,
        }
    }

    /// Whether every check digit this layout carries matched.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid_document_number
            && self.valid_date_of_birth
            && self.valid_expiration_date
            && self.valid_composite
            && self.valid_personal_number().unwrap_or(true)
    }

    /// Encode back to MRZ text, one `\n`-terminated line per row.
    ///
    /// Check digits are recomputed from the current field values; the
    /// validity flags are not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`MrzError::InvalidArgument`] if a value cannot be fitted
    /// into its field, for example a name that cannot be truncated enough.
    pub fn to_mrz(&self) -> Result<String> {
        records::encode(self)
    }

    /// A builder pre-filled with this record's values.
    #[must_use]
    pub fn to_builder(&self) -> MrzRecordBuilder {
        let mut builder = MrzRecordBuilder::new(self.format)
            .document_code(self.code1, self.code2)
            .issuing_country(&self.issuing_country)
            .document_number(&self.document_number)
            .surname(&self.surname)
            .given_names(&self.given_names)
            .date_of_birth(self.date_of_birth.clone())
            .sex(self.sex)
            .nationality(&self.nationality);
        if let Some(expiration_date) = &self.expiration_date {
            builder = builder.expiration_date(expiration_date.clone());
        }
        match &self.details {
            LayoutDetails::PersonalNumber {
                personal_number, ..
            } => builder.personal_number(personal_number),
            LayoutDetails::DualOptional {
                optional,
                optional2,
            } => builder.optional(optional).optional2(optional2),
            LayoutDetails::SingleOptional { optional } => builder.optional(optional),
        }
    }

    /// A copy with a different document number.
    ///
    /// # Errors
    ///
    /// See [`MrzRecordBuilder::build`].
    pub fn with_document_number(&self, document_number: impl Into<String>) -> Result<Self> {
        self.to_builder().document_number(document_number).build()
    }

    /// A copy with different names.
    ///
    /// # Errors
    ///
    /// See [`MrzRecordBuilder::build`].
    pub fn with_names(
        &self,
        surname: impl Into<String>,
        given_names: impl Into<String>,
    ) -> Result<Self> {
        self.to_builder()
            .surname(surname)
            .given_names(given_names)
            .build()
    }

    /// A copy with a different date of birth.
    ///
    /// # Errors
    ///
    /// See [`MrzRecordBuilder::build`].
    pub fn with_date_of_birth(&self, date_of_birth: MrzDate) -> Result<Self> {
        self.to_builder().date_of_birth(date_of_birth).build()
    }

    /// A copy with a different expiration date.
    ///
    /// # Errors
    ///
    /// See [`MrzRecordBuilder::build`]; fails for layouts without one.
    pub fn with_expiration_date(&self, expiration_date: MrzDate) -> Result<Self> {
        self.to_builder().expiration_date(expiration_date).build()
    }

    /// A copy with a different sex.
    ///
    /// # Errors
    ///
    /// See [`MrzRecordBuilder::build`].
    pub fn with_sex(&self, sex: MrzSex) -> Result<Self> {
        self.to_builder().sex(sex).build()
    }

    /// A copy with a different nationality.
    ///
    /// # Errors
    ///
    /// See [`MrzRecordBuilder::build`].
    pub fn with_nationality(&self, nationality: impl Into<String>) -> Result<Self> {
        self.to_builder().nationality(nationality).build()
    }

    /// A copy with a different issuing country.
    ///
    /// # Errors
    ///
    /// See [`MrzRecordBuilder::build`].
    pub fn with_issuing_country(&self, issuing_country: impl Into<String>) -> Result<Self> {
        self.to_builder().issuing_country(issuing_country).build()
    }

    /// A copy with different optional data (first row on TD1 cards).
    ///
    /// # Errors
    ///
    /// See [`MrzRecordBuilder::build`].
    pub fn with_optional(&self, optional: impl Into<String>) -> Result<Self> {
        self.to_builder().optional(optional).build()
    }

    /// A copy with different second-row optional data (TD1-family cards).
    ///
    /// # Errors
    ///
    /// See [`MrzRecordBuilder::build`].
    pub fn with_optional2(&self, optional2: impl Into<String>) -> Result<Self> {
        self.to_builder().optional2(optional2).build()
    }

    /// A copy with a different TD3 personal number.
    ///
    /// # Errors
    ///
    /// See [`MrzRecordBuilder::build`].
    pub fn with_personal_number(&self, personal_number: impl Into<String>) -> Result<Self> {
        self.to_builder().personal_number(personal_number).build()
    }
}

impl fmt::Display for MrzRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{{{}, {}{} {} {}, {}, born {}, {}",
            self.format,
            self.code,
            self.code1,
            self.code2,
            self.issuing_country,
            self.document_number,
            self.surname,
            self.date_of_birth,
            self.sex
        )?;
        if !self.given_names.is_empty() {
            write!(f, ", given {}", self.given_names)?;
        }
        if let Some(expiration_date) = &self.expiration_date {
            write!(f, ", expires {expiration_date}")?;
        }
        write!(f, ", nationality {}}}", self.nationality)
    }
}
