//! Two-row layouts: TD2 cards and the layouts derived from them.
//!
//! TD2, TD3, both visa types and the Slovak card share the first 28 columns
//! of the second row:
//!
//! ```text
//! row 1: NNNNNNNNNC CCC YYMMDDC S YYMMDDC ...
//!        0        9 10  13    19 21   27
//! ```
//!
//! They differ in width, in what follows column 28 and in whether a composite
//! check digit closes the row.

use super::{
    checked_date, date_text, field, header_text, join_rows, slice_rows, with_check, Fields,
    Header,
};
use crate::codec::{self, name_to_mrz};
use crate::date::MrzDate;
use crate::error::Result;
use crate::parser::MrzParser;
use crate::range::MrzRange;
use crate::record::{LayoutDetails, MrzRecord};
use crate::sex::MrzSex;

pub(crate) const DOCUMENT_NUMBER: MrzRange = MrzRange::new(1, 0, 9);
pub(crate) const NATIONALITY: MrzRange = MrzRange::new(1, 10, 13);
pub(crate) const DATE_OF_BIRTH: MrzRange = MrzRange::new(1, 13, 19);
pub(crate) const SEX_COLUMN: usize = 20;
pub(crate) const EXPIRATION_DATE: MrzRange = MrzRange::new(1, 21, 27);

/// The shared first 28 columns of row 1.
#[derive(Debug)]
pub(crate) struct TravelLine {
    pub(crate) document_number: String,
    pub(crate) valid_document_number: bool,
    pub(crate) nationality: String,
    pub(crate) date_of_birth: MrzDate,
    pub(crate) valid_date_of_birth: bool,
    pub(crate) sex: MrzSex,
    pub(crate) expiration_date: MrzDate,
    pub(crate) valid_expiration_date: bool,
}

impl TravelLine {
    pub(crate) fn decode(parser: &MrzParser) -> Result<Self> {
        let document_number = parser.parse_string(DOCUMENT_NUMBER)?;
        let valid_document_number =
            parser.check_digit(1, 9, &[DOCUMENT_NUMBER], "document number");
        let nationality = parser.parse_string(NATIONALITY)?;
        let (date_of_birth, valid_date_of_birth) =
            checked_date(parser, DATE_OF_BIRTH, 19, "date of birth")?;
        let sex = parser.parse_sex(1, SEX_COLUMN)?;
        let (expiration_date, valid_expiration_date) =
            checked_date(parser, EXPIRATION_DATE, 27, "expiration date")?;
        Ok(TravelLine {
            document_number,
            valid_document_number,
            nationality,
            date_of_birth,
            valid_date_of_birth,
            sex,
            expiration_date,
            valid_expiration_date,
        })
    }

    /// Columns 0..28 of row 1 for `record`.
    pub(crate) fn encode(record: &MrzRecord) -> Result<String> {
        let mut row = with_check(&field(&record.document_number, 9))?;
        row.push_str(&field(&record.nationality, 3));
        row.push_str(&with_check(&date_text(
            Some(&record.date_of_birth),
            "date of birth",
        )?)?);
        row.push(record.sex.mrz_char());
        row.push_str(&with_check(&date_text(
            record.expiration_date.as_ref(),
            "expiration date",
        )?)?);
        Ok(row)
    }
}

/// A two-row layout with a single optional data field after column 28.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TwoRowLayout {
    pub(crate) columns: usize,
    pub(crate) composite: bool,
}

/// ICAO TD2: 36 columns, optional data 28..35, composite at 35.
pub(crate) const TD2: TwoRowLayout = TwoRowLayout {
    columns: 36,
    composite: true,
};

impl TwoRowLayout {
    fn name(self) -> MrzRange {
        MrzRange::new(0, 5, self.columns)
    }

    fn optional(self) -> MrzRange {
        MrzRange::new(1, 28, self.columns - usize::from(self.composite))
    }

    fn composite_ranges(self) -> [MrzRange; 3] {
        [
            MrzRange::new(1, 0, 10),
            MrzRange::new(1, 13, 20),
            MrzRange::new(1, 21, self.columns - 1),
        ]
    }

    pub(crate) fn decode(self, parser: &MrzParser, header: Header) -> Result<MrzRecord> {
        let (surname, given_names) = parser.parse_name(self.name())?;
        let line = TravelLine::decode(parser)?;
        let optional = parser.parse_string(self.optional())?;
        let valid_composite = !self.composite
            || parser.check_digit(1, self.columns - 1, &self.composite_ranges(), "composite");
        Ok(header.into_record(Fields {
            document_number: line.document_number,
            surname,
            given_names,
            date_of_birth: line.date_of_birth,
            sex: line.sex,
            expiration_date: Some(line.expiration_date),
            nationality: line.nationality,
            valid_document_number: line.valid_document_number,
            valid_date_of_birth: line.valid_date_of_birth,
            valid_expiration_date: line.valid_expiration_date,
            valid_composite,
            details: LayoutDetails::SingleOptional { optional },
        }))
    }

    pub(crate) fn encode(self, record: &MrzRecord) -> Result<String> {
        let mut row0 = header_text(record);
        row0.push_str(&name_to_mrz(
            &record.surname,
            &record.given_names,
            self.name().length(),
        )?);

        let mut row1 = TravelLine::encode(record)?;
        row1.push_str(&field(
            record.optional().unwrap_or_default(),
            self.optional().length(),
        ));
        if self.composite {
            let composite = slice_rows(&[&row0, &row1], &self.composite_ranges())?;
            row1.push(codec::check_digit_char(&composite)?);
        }
        Ok(join_rows(&[row0, row1]))
    }
}

pub(crate) fn decode(parser: &MrzParser, header: Header) -> Result<MrzRecord> {
    TD2.decode(parser, header)
}

pub(crate) fn encode(record: &MrzRecord) -> Result<String> {
    TD2.encode(record)
}
