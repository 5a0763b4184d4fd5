//! French national identity card (2×36, `IDFRA`).
//!
//! ```text
//! row 0: IDFRABERTHIER<<<<<<<<<<<<<<<<<<<<<<<
//! row 1: 9409923102854CORINNE<<<<<<<6512068F4
//! ```
//!
//! Row 0 holds the surname (5..30) and optional data (30..36); row 1 the
//! document number (0..12) with its check digit, the given names (13..27),
//! date of birth, sex and a composite check digit over everything before it.
//! There is no expiration date, and the nationality is the issuing country.

use super::{checked_date, date_text, field, header_text, join_rows, with_check, Fields, Header};
use crate::codec;
use crate::error::Result;
use crate::parser::MrzParser;
use crate::range::MrzRange;
use crate::record::{LayoutDetails, MrzRecord};

const SURNAME: MrzRange = MrzRange::new(0, 5, 30);
const OPTIONAL: MrzRange = MrzRange::new(0, 30, 36);
const DOCUMENT_NUMBER: MrzRange = MrzRange::new(1, 0, 12);
const GIVEN_NAMES: MrzRange = MrzRange::new(1, 13, 27);
const DATE_OF_BIRTH: MrzRange = MrzRange::new(1, 27, 33);
const SEX_COLUMN: usize = 34;
const COMPOSITE: [MrzRange; 2] = [MrzRange::new(0, 0, 36), MrzRange::new(1, 0, 35)];

pub(crate) fn decode(parser: &MrzParser, header: Header) -> Result<MrzRecord> {
    let surname = parser.parse_string(SURNAME)?;
    let optional = parser.parse_string(OPTIONAL)?;
    let document_number = parser.parse_string(DOCUMENT_NUMBER)?;
    let valid_document_number = parser.check_digit(1, 12, &[DOCUMENT_NUMBER], "document number");
    let given_names = parser.parse_string(GIVEN_NAMES)?;
    let (date_of_birth, valid_date_of_birth) =
        checked_date(parser, DATE_OF_BIRTH, 33, "date of birth")?;
    let sex = parser.parse_sex(1, SEX_COLUMN)?;
    let valid_composite = parser.check_digit(1, 35, &COMPOSITE, "composite");
    let nationality = header.issuing_country.clone();
    Ok(header.into_record(Fields {
        document_number,
        surname,
        given_names,
        date_of_birth,
        sex,
        expiration_date: None,
        nationality,
        valid_document_number,
        valid_date_of_birth,
        valid_expiration_date: true,
        valid_composite,
        details: LayoutDetails::SingleOptional { optional },
    }))
}

pub(crate) fn encode(record: &MrzRecord) -> Result<String> {
    let mut row0 = header_text(record);
    row0.push_str(&field(&record.surname, SURNAME.length()));
    row0.push_str(&field(
        record.optional().unwrap_or_default(),
        OPTIONAL.length(),
    ));

    let mut row1 = with_check(&field(&record.document_number, DOCUMENT_NUMBER.length()))?;
    row1.push_str(&field(&record.given_names, GIVEN_NAMES.length()));
    row1.push_str(&with_check(&date_text(
        Some(&record.date_of_birth),
        "date of birth",
    )?)?);
    row1.push(record.sex.mrz_char());
    let mut composite = row0.clone();
    composite.push_str(&row1);
    row1.push(codec::check_digit_char(&composite)?);
    Ok(join_rows(&[row0, row1]))
}
