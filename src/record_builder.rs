//! Builder for new MRZ records.
//!
//! [`MrzRecordBuilder`] collects field values and, in [`build`], encodes them
//! in the chosen layout and decodes the result. The finished record therefore
//! holds exactly what its MRZ text says, with every check digit computed and
//! every flag set from the encoded text.
//!
//! [`build`]: MrzRecordBuilder::build

use crate::codec::{filler_to_text, to_mrz_string, FILLER};
use crate::date::MrzDate;
use crate::document_code::MrzDocumentCode;
use crate::error::{MrzError, Result};
use crate::format::{MrzFormat, RecordKind};
use crate::parser::MrzParser;
use crate::record::{LayoutDetails, MrzRecord};
use crate::records;
use crate::sex::MrzSex;

/// Fluent builder for [`MrzRecord`].
///
/// # Examples
///
/// ```
/// use mrzc::{MrzDate, MrzFormat, MrzRecordBuilder, MrzSex};
///
/// let record = MrzRecordBuilder::new(MrzFormat::Passport)
///     .issuing_country("USA")
///     .nationality("USA")
///     .document_number("123456789")
///     .surname("Doe")
///     .given_names("John")
///     .date_of_birth(MrzDate::new(80, 1, 1))
///     .sex(MrzSex::Male)
///     .expiration_date(MrzDate::new(30, 1, 1))
///     .build()
///     .unwrap();
///
/// assert!(record.is_valid());
/// assert!(record.to_mrz().unwrap().starts_with("P<USADOE<<JOHN<"));
/// ```
#[derive(Debug, Clone)]
pub struct MrzRecordBuilder {
    format: MrzFormat,
    code1: char,
    code2: char,
    issuing_country: String,
    document_number: String,
    surname: String,
    given_names: String,
    date_of_birth: Option<MrzDate>,
    sex: MrzSex,
    expiration_date: Option<MrzDate>,
    nationality: String,
    personal_number: String,
    optional: String,
    optional2: String,
}

impl MrzRecordBuilder {
    /// Start a record in `format`.
    ///
    /// The document code and, for national formats, the issuing country start
    /// out as the format's defaults (`P<` for passports, `V<` for visas,
    /// `IDFRA` for French cards and so on).
    #[must_use]
    pub fn new(format: MrzFormat) -> Self {
        let (code1, code2, issuing_country) = format.default_header();
        MrzRecordBuilder {
            format,
            code1,
            code2,
            issuing_country: issuing_country.to_string(),
            document_number: String::new(),
            surname: String::new(),
            given_names: String::new(),
            date_of_birth: None,
            sex: MrzSex::Unspecified,
            expiration_date: None,
            nationality: String::new(),
            personal_number: String::new(),
            optional: String::new(),
            optional2: String::new(),
        }
    }

    /// Set the two document code characters.
    #[must_use]
    pub fn document_code(mut self, code1: char, code2: char) -> Self {
        self.code1 = code1;
        self.code2 = code2;
        self
    }

    /// Set the issuing state or organization.
    #[must_use]
    pub fn issuing_country(mut self, value: impl Into<String>) -> Self {
        self.issuing_country = value.into();
        self
    }

    /// Set the document number.
    #[must_use]
    pub fn document_number(mut self, value: impl Into<String>) -> Self {
        self.document_number = value.into();
        self
    }

    /// Set the surname (primary identifier).
    #[must_use]
    pub fn surname(mut self, value: impl Into<String>) -> Self {
        self.surname = value.into();
        self
    }

    /// Set the given names (secondary identifier).
    #[must_use]
    pub fn given_names(mut self, value: impl Into<String>) -> Self {
        self.given_names = value.into();
        self
    }

    /// Set the date of birth.
    #[must_use]
    pub fn date_of_birth(mut self, value: MrzDate) -> Self {
        self.date_of_birth = Some(value);
        self
    }

    /// Set the sex.
    #[must_use]
    pub fn sex(mut self, value: MrzSex) -> Self {
        self.sex = value;
        self
    }

    /// Set the expiration date.
    #[must_use]
    pub fn expiration_date(mut self, value: MrzDate) -> Self {
        self.expiration_date = Some(value);
        self
    }

    /// Set the nationality. French ID cards ignore this and use the issuing country.
    #[must_use]
    pub fn nationality(mut self, value: impl Into<String>) -> Self {
        self.nationality = value.into();
        self
    }

    /// Set the TD3 personal number.
    #[must_use]
    pub fn personal_number(mut self, value: impl Into<String>) -> Self {
        self.personal_number = value.into();
        self
    }

    /// Set the optional data field (first row on TD1 cards).
    #[must_use]
    pub fn optional(mut self, value: impl Into<String>) -> Self {
        self.optional = value.into();
        self
    }

    /// Set the second-row optional data of TD1 cards.
    #[must_use]
    pub fn optional2(mut self, value: impl Into<String>) -> Self {
        self.optional2 = value.into();
        self
    }

    /// Encode the collected values and decode them into a record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the document code is malformed or outside the format's family
    /// - the date of birth is missing
    /// - the expiration date is missing, or given for a format without one
    /// - a value does not fit its field
    /// - the encoded text would be detected as a different format, for
    ///   example a TD1 card whose issuing country is `SEN`
    pub fn build(self) -> Result<MrzRecord> {
        for c in [self.code1, self.code2] {
            if !(c.is_ascii_uppercase() || c == FILLER) {
                return Err(MrzError::InvalidArgument(format!(
                    "document code character '{c}' must be a letter A-Z or '<'"
                )));
            }
        }
        let code = MrzDocumentCode::parse(&format!("{}{}", self.code1, self.code2))?;
        if let Some(expected) = self.format.spec().code {
            if code != expected {
                return Err(MrzError::InvalidArgument(format!(
                    "{} requires a {expected} document code, got {}{}",
                    self.format, self.code1, self.code2
                )));
            }
        }
        let date_of_birth = self
            .date_of_birth
            .ok_or_else(|| MrzError::InvalidArgument("date of birth is required".to_string()))?;
        let expiration_date = match (self.format.kind(), self.expiration_date) {
            (RecordKind::FrenchId, None) => None,
            (RecordKind::FrenchId, Some(_)) => {
                return Err(MrzError::InvalidArgument(format!(
                    "{} has no expiration date",
                    self.format
                )))
            },
            (_, Some(date)) => Some(date),
            (_, None) => {
                return Err(MrzError::InvalidArgument(
                    "expiration date is required".to_string(),
                ))
            },
        };
        let details = match self.format.kind() {
            RecordKind::Passport => LayoutDetails::PersonalNumber {
                personal_number: self.personal_number,
                valid_personal_number: true,
            },
            RecordKind::Td1 | RecordKind::SenegalId => LayoutDetails::DualOptional {
                optional: self.optional,
                optional2: self.optional2,
            },
            _ => LayoutDetails::SingleOptional {
                optional: self.optional,
            },
        };
        let document_number = filler_to_text(&to_mrz_string(&self.document_number, None));
        let draft = MrzRecord {
            code,
            code1: self.code1,
            code2: self.code2,
            issuing_country: self.issuing_country,
            document_number: self.document_number,
            surname: self.surname,
            given_names: self.given_names,
            date_of_birth,
            sex: self.sex,
            expiration_date,
            nationality: self.nationality,
            format: self.format,
            valid_document_number: true,
            valid_date_of_birth: true,
            valid_expiration_date: true,
            valid_composite: true,
            details,
        };

        let text = records::encode(&draft)?;
        let parser = MrzParser::new(&text)?;
        if parser.format() != self.format {
            return Err(MrzError::InvalidArgument(format!(
                "record would be read back as {} rather than {}",
                parser.format(),
                self.format
            )));
        }
        let record = parser.decode()?;
        if record.document_number() != document_number {
            return Err(MrzError::InvalidArgument(format!(
                "document number '{document_number}' does not fit a {} record, it reads back as '{}'",
                self.format,
                record.document_number()
            )));
        }
        Ok(record)
    }
}
