//! Field layouts for every supported format.
//!
//! Each submodule describes one layout as a table of [`MrzRange`] constants
//! and provides a `decode` reading those ranges through
//! [`MrzParser`](crate::parser::MrzParser) and an `encode` writing the same
//! ranges back. [`decode`] and [`encode`] dispatch on the format's
//! [`RecordKind`].

use crate::codec;
use crate::date::MrzDate;
use crate::document_code::MrzDocumentCode;
use crate::error::{MrzError, Result};
use crate::format::{MrzFormat, RecordKind};
use crate::parser::MrzParser;
use crate::range::MrzRange;
use crate::record::MrzRecord;

pub mod french_id;
pub mod mrv;
pub mod passport;
pub mod senegal_id;
pub mod slovak_id;
pub mod td1;
pub mod td2;

const ISSUING_COUNTRY: MrzRange = MrzRange::new(0, 2, 5);

/// Decode the parser's MRZ using the layout of its detected format.
///
/// # Errors
///
/// Returns a structural error from the layout, or [`MrzError::ParseError`]
/// if the document code does not belong to the format's family.
pub fn decode(parser: &MrzParser) -> Result<MrzRecord> {
    let header = Header::decode(parser)?;
    match parser.format().kind() {
        RecordKind::Passport => passport::decode(parser, header),
        RecordKind::Td1 => td1::decode(parser, header),
        RecordKind::SenegalId => senegal_id::decode(parser, header),
        RecordKind::Td2 => td2::decode(parser, header),
        RecordKind::SlovakId => slovak_id::decode(parser, header),
        RecordKind::MrvA => mrv::decode_a(parser, header),
        RecordKind::MrvB => mrv::decode_b(parser, header),
        RecordKind::FrenchId => french_id::decode(parser, header),
    }
}

/// Encode a record using the layout of its format.
///
/// # Errors
///
/// Returns [`MrzError::InvalidArgument`] if a value does not fit its field.
pub fn encode(record: &MrzRecord) -> Result<String> {
    match record.format.kind() {
        RecordKind::Passport => passport::encode(record),
        RecordKind::Td1 => td1::encode(record),
        RecordKind::SenegalId => senegal_id::encode(record),
        RecordKind::Td2 => td2::encode(record),
        RecordKind::SlovakId => slovak_id::encode(record),
        RecordKind::MrvA => mrv::encode_a(record),
        RecordKind::MrvB => mrv::encode_b(record),
        RecordKind::FrenchId => french_id::encode(record),
    }
}

/// Fields shared by every layout: the document code and issuing country.
#[derive(Debug, Clone)]
pub struct Header {
    pub(crate) code: MrzDocumentCode,
    pub(crate) code1: char,
    pub(crate) code2: char,
    pub(crate) issuing_country: String,
    pub(crate) format: MrzFormat,
}

impl Header {
    fn decode(parser: &MrzParser) -> Result<Self> {
        let format = parser.format();
        let code = MrzDocumentCode::parse(parser.mrz())?;
        if let Some(expected) = format.spec().code {
            if code != expected {
                return Err(MrzError::ParseError {
                    message: format!("Wrong document code: {code}, expected {expected}"),
                    mrz: parser.mrz().to_string(),
                    range: MrzRange::new(0, 0, 2),
                    format: Some(format),
                });
            }
        }
        Ok(Header {
            code,
            code1: parser.char_at(0, 0)?,
            code2: parser.char_at(0, 1)?,
            issuing_country: parser.parse_string(ISSUING_COUNTRY)?,
            format,
        })
    }

    /// Start a record from this header; layouts fill in the rest.
    pub(crate) fn into_record(self, fields: Fields) -> MrzRecord {
        MrzRecord {
            code: self.code,
            code1: self.code1,
            code2: self.code2,
            issuing_country: self.issuing_country,
            document_number: fields.document_number,
            surname: fields.surname,
            given_names: fields.given_names,
            date_of_birth: fields.date_of_birth,
            sex: fields.sex,
            expiration_date: fields.expiration_date,
            nationality: fields.nationality,
            format: self.format,
            valid_document_number: fields.valid_document_number,
            valid_date_of_birth: fields.valid_date_of_birth,
            valid_expiration_date: fields.valid_expiration_date,
            valid_composite: fields.valid_composite,
            details: fields.details,
        }
    }
}

/// Layout-specific fields collected by a variant's decoder.
#[derive(Debug)]
pub(crate) struct Fields {
    pub(crate) document_number: String,
    pub(crate) surname: String,
    pub(crate) given_names: String,
    pub(crate) date_of_birth: MrzDate,
    pub(crate) sex: crate::sex::MrzSex,
    pub(crate) expiration_date: Option<MrzDate>,
    pub(crate) nationality: String,
    pub(crate) valid_document_number: bool,
    pub(crate) valid_date_of_birth: bool,
    pub(crate) valid_expiration_date: bool,
    pub(crate) valid_composite: bool,
    pub(crate) details: crate::record::LayoutDetails,
}

/// Read a date and verify its check digit; the flag also requires the date
/// itself to be in range.
pub(crate) fn checked_date(
    parser: &MrzParser,
    range: MrzRange,
    check_column: usize,
    label: &str,
) -> Result<(MrzDate, bool)> {
    let date = parser.parse_date(range)?;
    let valid = parser.check_digit(range.row(), check_column, &[range], label) && date.is_valid();
    Ok((date, valid))
}

/// The first two characters and issuing country of row 0.
pub(crate) fn header_text(record: &MrzRecord) -> String {
    let mut text = String::with_capacity(5);
    text.push(record.code1);
    text.push(record.code2);
    text.push_str(&field(&record.issuing_country, 3));
    text
}

/// Convert a value to MRZ characters of exactly `width`.
pub(crate) fn field(value: &str, width: usize) -> String {
    codec::to_mrz_string(value, Some(width))
}

/// A field followed by its check digit.
pub(crate) fn with_check(value: &str) -> Result<String> {
    let mut out = value.to_string();
    out.push(codec::check_digit_char(value)?);
    Ok(out)
}

/// The six characters of a date, rejecting anything that would shift the layout.
pub(crate) fn date_text(date: Option<&MrzDate>, label: &str) -> Result<String> {
    let date = date.ok_or_else(|| MrzError::InvalidArgument(format!("{label} is required")))?;
    let text = date.to_mrz();
    if text.len() != 6 || !text.chars().all(codec::is_valid_char) {
        return Err(MrzError::InvalidArgument(format!(
            "{label} '{text}' is not six MRZ characters"
        )));
    }
    Ok(text)
}

/// Concatenate the given ranges of rows that are being built.
pub(crate) fn slice_rows(rows: &[&str], ranges: &[MrzRange]) -> Result<String> {
    let mut out = String::new();
    for range in ranges {
        let row = rows
            .get(range.row())
            .and_then(|row| row.get(range.column()..range.column_to()))
            .ok_or_else(|| {
                MrzError::InvalidArgument(format!("encoded row too short for range {range}"))
            })?;
        out.push_str(row);
    }
    Ok(out)
}

/// Join finished rows, each terminated by a newline.
pub(crate) fn join_rows(rows: &[String]) -> String {
    let mut out = String::with_capacity(rows.iter().map(|row| row.len() + 1).sum());
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}
