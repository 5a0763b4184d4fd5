//! Senegalese identity card (3×30, `I<SEN`).
//!
//! The document number is 17 characters long and spans columns 5..14 and
//! 15..23 of row 0, with its check digit at 23. Column 14 carries the check
//! digit of the first nine characters; it is written on encode but not
//! consulted on decode. Trailing fillers are dropped from the decoded number.
//! Optional data shrinks to 24..30. Rows 1 and 2 follow the TD1 layout.

use super::td1::LowerRows;
use super::{field, header_text, Header};
use crate::codec::{self, filler_to_text};
use crate::error::Result;
use crate::parser::MrzParser;
use crate::range::MrzRange;
use crate::record::MrzRecord;

const DOCUMENT_NUMBER: [MrzRange; 2] = [MrzRange::new(0, 5, 14), MrzRange::new(0, 15, 23)];
const DOCUMENT_NUMBER_CHECK: usize = 23;
const OPTIONAL: MrzRange = MrzRange::new(0, 24, 30);
const NUMBER_LENGTH: usize = 17;
const FIRST_PART_LENGTH: usize = 9;

pub(crate) fn decode(parser: &MrzParser, header: Header) -> Result<MrzRecord> {
    for range in DOCUMENT_NUMBER {
        parser.check_valid_characters(range)?;
    }
    let number = parser.raw_value(&DOCUMENT_NUMBER)?;
    let valid_document_number = parser.check_digit(
        0,
        DOCUMENT_NUMBER_CHECK,
        &DOCUMENT_NUMBER,
        "document number",
    );
    let optional = parser.parse_string(OPTIONAL)?;
    let lower = LowerRows::decode(parser)?;
    Ok(lower.into_record(
        header,
        filler_to_text(&number),
        valid_document_number,
        optional,
    ))
}

pub(crate) fn encode(record: &MrzRecord) -> Result<String> {
    let number = field(&record.document_number, NUMBER_LENGTH);
    let (first, second) = number.split_at(FIRST_PART_LENGTH);

    let mut row0 = header_text(record);
    row0.push_str(first);
    row0.push(codec::check_digit_char(first)?);
    row0.push_str(second);
    row0.push(codec::check_digit_char(&number)?);
    row0.push_str(&field(record.optional().unwrap_or_default(), OPTIONAL.length()));
    LowerRows::encode(record, row0)
}

#[cfg(test)]
mod tests {
    use crate::date::MrzDate;
    use crate::format::MrzFormat;
    use crate::parser::parse;
    use crate::record_builder::MrzRecordBuilder;
    use crate::sex::MrzSex;

    fn card() -> crate::record::MrzRecord {
        MrzRecordBuilder::new(MrzFormat::SenegalId)
            .nationality("SEN")
            .document_number("12345678901234567")
            .optional("AB")
            .surname("Diop")
            .given_names("Awa")
            .date_of_birth(MrzDate::new(88, 2, 29))
            .sex(MrzSex::Female)
            .expiration_date(MrzDate::new(28, 2, 28))
            .build()
            .unwrap()
    }

    #[test]
    fn test_senegal_document_number_spans_both_parts() {
        let record = card();
        assert_eq!(record.format(), MrzFormat::SenegalId);
        assert_eq!(record.issuing_country(), "SEN");
        assert_eq!(record.document_number(), "12345678901234567");
        assert_eq!(record.optional(), Some("AB"));
        assert!(record.is_valid());

        let mrz = record.to_mrz().unwrap();
        let row0 = mrz.lines().next().unwrap();
        assert_eq!(&row0[..5], "I<SEN");
        assert_eq!(&row0[5..14], "123456789");
        assert_eq!(&row0[15..23], "01234567");
        assert_eq!(&row0[24..30], "AB<<<<");
    }

    #[test]
    fn test_senegal_ignores_first_part_check_digit() {
        let mrz = card().to_mrz().unwrap();
        let mut broken = mrz.clone();
        let current = broken.as_bytes()[14] as char;
        let wrong = if current == '0' { "1" } else { "0" };
        broken.replace_range(14..15, wrong);
        let record = parse(&broken).unwrap();
        assert!(record.valid_document_number());
        // Column 14 is still covered by the composite.
        assert!(!record.valid_composite());
    }

    #[test]
    fn test_senegal_short_number_drops_fillers() {
        let record = MrzRecordBuilder::new(MrzFormat::SenegalId)
            .nationality("SEN")
            .document_number("AB12")
            .surname("Diop")
            .given_names("Awa")
            .date_of_birth(MrzDate::new(88, 2, 29))
            .sex(MrzSex::Female)
            .expiration_date(MrzDate::new(28, 2, 28))
            .build()
            .unwrap();
        assert_eq!(record.document_number(), "AB12");
        assert!(record.valid_document_number());
        let mrz = record.to_mrz().unwrap();
        assert_eq!(&mrz[5..23], "AB12<<<<<8<<<<<<<<");
    }

    #[test]
    fn test_senegal_round_trip() {
        let record = card();
        assert_eq!(parse(&record.to_mrz().unwrap()).unwrap(), record);
    }
}
