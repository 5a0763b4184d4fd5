//! TD3 passport layout (2×44).
//!
//! ```text
//! row 0: P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<
//! row 1: L898902C36UTO7408122F1204159ZE184226B<<<<<10
//! ```
//!
//! Row 1 carries the shared travel line, then the personal number (28..42)
//! with its check digit at 42 and the composite check digit at 43.

use super::td2::TravelLine;
use super::{field, header_text, join_rows, slice_rows, Fields, Header};
use crate::codec::{self, name_to_mrz};
use crate::error::Result;
use crate::parser::MrzParser;
use crate::range::MrzRange;
use crate::record::{LayoutDetails, MrzRecord};

const NAME: MrzRange = MrzRange::new(0, 5, 44);
const PERSONAL_NUMBER: MrzRange = MrzRange::new(1, 28, 42);
const COMPOSITE: [MrzRange; 3] = [
    MrzRange::new(1, 0, 10),
    MrzRange::new(1, 13, 20),
    MrzRange::new(1, 21, 43),
];

pub(crate) fn decode(parser: &MrzParser, header: Header) -> Result<MrzRecord> {
    let (surname, given_names) = parser.parse_name(NAME)?;
    let line = TravelLine::decode(parser)?;
    let personal_number = parser.parse_string(PERSONAL_NUMBER)?;
    let valid_personal_number = parser.check_digit(1, 42, &[PERSONAL_NUMBER], "personal number");
    let valid_composite = parser.check_digit(1, 43, &COMPOSITE, "composite");
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
        details: LayoutDetails::PersonalNumber {
            personal_number,
            valid_personal_number,
        },
    }))
}

pub(crate) fn encode(record: &MrzRecord) -> Result<String> {
    let mut row0 = header_text(record);
    row0.push_str(&name_to_mrz(&record.surname, &record.given_names, NAME.length())?);

    let mut row1 = TravelLine::encode(record)?;
    let personal_number = field(
        record.personal_number().unwrap_or_default(),
        PERSONAL_NUMBER.length(),
    );
    row1.push_str(&personal_number);
    row1.push(codec::check_digit_char_prefer_filler(&personal_number)?);
    let composite = slice_rows(&[&row0, &row1], &COMPOSITE)?;
    row1.push(codec::check_digit_char(&composite)?);
    Ok(join_rows(&[row0, row1]))
}

#[cfg(test)]
mod tests {
    use crate::date::MrzDate;
    use crate::format::MrzFormat;
    use crate::parser::parse;
    use crate::record_builder::MrzRecordBuilder;
    use crate::sex::MrzSex;

    const SPECIMEN: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
                            L898902C36UTO7408122F1204159ZE184226B<<<<<10";

    #[test]
    fn test_decode_passport_specimen() {
        let record = parse(SPECIMEN).unwrap();
        assert_eq!(record.format(), MrzFormat::Passport);
        assert_eq!(record.code1(), 'P');
        assert_eq!(record.code2(), '<');
        assert_eq!(record.issuing_country(), "UTO");
        assert_eq!(record.document_number(), "L898902C3");
        assert_eq!(record.nationality(), "UTO");
        assert_eq!(record.date_of_birth(), &MrzDate::new(74, 8, 12));
        assert_eq!(record.sex(), MrzSex::Female);
        assert_eq!(record.expiration_date(), Some(&MrzDate::new(12, 4, 15)));
        assert_eq!(record.personal_number(), Some("ZE184226B"));
        assert!(record.is_valid());
    }

    #[test]
    fn test_encode_passport_specimen() {
        let record = parse(SPECIMEN).unwrap();
        assert_eq!(record.to_mrz().unwrap(), format!("{SPECIMEN}\n"));
    }

    #[test]
    fn test_flipped_document_check_digit_only_clears_its_flag() {
        let broken = SPECIMEN.replacen("L898902C36", "L898902C37", 1);
        let record = parse(&broken).unwrap();
        assert!(!record.valid_document_number());
        assert!(record.valid_date_of_birth());
        assert!(record.valid_expiration_date());
        assert_eq!(record.valid_personal_number(), Some(true));
        // The composite covers the check digit too.
        assert!(!record.valid_composite());
    }

    #[test]
    fn test_empty_personal_number_uses_filler_check_digit() {
        let mrz = MrzRecordBuilder::new(MrzFormat::Passport)
            .issuing_country("USA")
            .nationality("USA")
            .document_number("123456789")
            .surname("Doe")
            .given_names("John")
            .date_of_birth(MrzDate::new(80, 1, 1))
            .sex(MrzSex::Male)
            .expiration_date(MrzDate::new(30, 1, 1))
            .build()
            .unwrap()
            .to_mrz()
            .unwrap();
        let rows: Vec<&str> = mrz.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], format!("{:<<44}", "P<USADOE<<JOHN"));
        assert_eq!(&rows[1][..28], "1234567897USA8001014M3001019");
        assert_eq!(&rows[1][28..43], "<<<<<<<<<<<<<<<");
        assert_eq!(rows[1].len(), 44);
    }
}
