//! TD1 three-row card layout (3×30).
//!
//! ```text
//! row 0: I<UTOD231458907<<<<<<<<<<<<<<<
//! row 1: 7408122F1204159UTO<<<<<<<<<<<6
//! row 2: ERIKSSON<<ANNA<MARIA<<<<<<<<<<
//! ```
//!
//! Document numbers longer than nine characters continue in the optional
//! data of row 0: column 14 then holds a filler, the overflow follows in
//! column 15 onwards, and the last character before the next filler is the
//! check digit over the whole number. A filler in column 14 is still read as
//! check digit 0 first, so the long reading only applies when the first nine
//! characters fail that check.
//!
//! The national cards of Burkina Faso, Cameroon, the Dominican Republic,
//! El Salvador, Guatemala and Iraq use this layout unchanged.

use super::{
    checked_date, date_text, field, header_text, join_rows, slice_rows, with_check, Fields,
    Header,
};
use crate::codec::{self, filler_to_text, name_to_mrz, FILLER};
use crate::date::MrzDate;
use crate::error::{MrzError, Result};
use crate::parser::MrzParser;
use crate::range::MrzRange;
use crate::record::{LayoutDetails, MrzRecord};
use crate::sex::MrzSex;

const DOCUMENT_NUMBER: MrzRange = MrzRange::new(0, 5, 14);
const DOCUMENT_NUMBER_CHECK: usize = 14;
const OPTIONAL: MrzRange = MrzRange::new(0, 15, 30);
const DATE_OF_BIRTH: MrzRange = MrzRange::new(1, 0, 6);
const SEX_COLUMN: usize = 7;
const EXPIRATION_DATE: MrzRange = MrzRange::new(1, 8, 14);
const NATIONALITY: MrzRange = MrzRange::new(1, 15, 18);
const OPTIONAL2: MrzRange = MrzRange::new(1, 18, 29);
const NAME: MrzRange = MrzRange::new(2, 0, 30);
const COMPOSITE: [MrzRange; 4] = [
    MrzRange::new(0, 5, 30),
    MrzRange::new(1, 0, 7),
    MrzRange::new(1, 8, 15),
    MrzRange::new(1, 18, 29),
];

pub(crate) fn decode(parser: &MrzParser, header: Header) -> Result<MrzRecord> {
    parser.check_valid_characters(DOCUMENT_NUMBER)?;
    parser.check_valid_characters(OPTIONAL)?;
    let number = parser.raw_value(&[DOCUMENT_NUMBER])?;
    let optional = parser.raw_value(&[OPTIONAL])?;

    let check = parser.char_at(0, DOCUMENT_NUMBER_CHECK)?;
    let valid_standard = parser.check_digit(
        0,
        DOCUMENT_NUMBER_CHECK,
        &[DOCUMENT_NUMBER],
        "document number",
    );
    // A filler check digit stands for 0, so the long reading only applies
    // when the nine-character number fails and the overflow check holds.
    let extension = extension_length(check, &optional)
        .filter(|_| !valid_standard)
        .map(|length| (length, format!("{number}{}", &optional[..length - 1])))
        .filter(|(length, extended)| {
            parser.check_digit_str(
                0,
                OPTIONAL.column() + length - 1,
                extended,
                "document number",
            )
        });
    let (document_number, valid_document_number, optional) = match extension {
        Some((length, extended)) => {
            let rest = optional.get(length + 1..).unwrap_or_default();
            (filler_to_text(&extended), true, filler_to_text(rest))
        },
        None => (
            filler_to_text(&number),
            valid_standard,
            filler_to_text(&optional),
        ),
    };

    let lower = LowerRows::decode(parser)?;
    Ok(lower.into_record(header, document_number, valid_document_number, optional))
}

// Length of the number overflow including its check digit, if present.
fn extension_length(check: char, optional: &str) -> Option<usize> {
    if check != FILLER {
        return None;
    }
    let length = optional.find(FILLER).unwrap_or(optional.len());
    (length > 0).then_some(length)
}

pub(crate) fn encode(record: &MrzRecord) -> Result<String> {
    let mut row0 = header_text(record);
    let number = codec::to_mrz_string(&record.document_number, None);
    let optional = record.optional().unwrap_or_default();
    if number.len() <= DOCUMENT_NUMBER.length() {
        row0.push_str(&with_check(&field(&number, DOCUMENT_NUMBER.length()))?);
        row0.push_str(&field(optional, OPTIONAL.length()));
    } else {
        let (head, overflow) = number.split_at(DOCUMENT_NUMBER.length());
        if overflow.contains(FILLER) {
            return Err(MrzError::InvalidArgument(format!(
                "document number '{}' has a filler in its overflow",
                record.document_number
            )));
        }
        if codec::compute_check_digit(head)? == 0 {
            return Err(MrzError::InvalidArgument(format!(
                "document number '{}' reads as its first nine characters on a TD1 card",
                record.document_number
            )));
        }
        let mut extension = overflow.to_string();
        extension.push(codec::check_digit_char(&number)?);
        extension.push(FILLER);
        if extension.len() > OPTIONAL.length() {
            return Err(MrzError::InvalidArgument(format!(
                "document number '{}' is too long for a TD1 card",
                record.document_number
            )));
        }
        extension.push_str(&codec::to_mrz_string(optional, None));
        row0.push_str(head);
        row0.push(FILLER);
        row0.push_str(&field(&extension, OPTIONAL.length()));
    }
    LowerRows::encode(record, row0)
}

/// Rows 1 and 2 plus the composite check digit, shared with the Senegalese card.
#[derive(Debug)]
pub(crate) struct LowerRows {
    date_of_birth: MrzDate,
    valid_date_of_birth: bool,
    sex: MrzSex,
    expiration_date: MrzDate,
    valid_expiration_date: bool,
    nationality: String,
    optional2: String,
    surname: String,
    given_names: String,
    valid_composite: bool,
}

impl LowerRows {
    pub(crate) fn decode(parser: &MrzParser) -> Result<Self> {
        let (date_of_birth, valid_date_of_birth) =
            checked_date(parser, DATE_OF_BIRTH, 6, "date of birth")?;
        let sex = parser.parse_sex(1, SEX_COLUMN)?;
        let (expiration_date, valid_expiration_date) =
            checked_date(parser, EXPIRATION_DATE, 14, "expiration date")?;
        let nationality = parser.parse_string(NATIONALITY)?;
        let optional2 = parser.parse_string(OPTIONAL2)?;
        let valid_composite = parser.check_digit(1, 29, &COMPOSITE, "composite");
        let (surname, given_names) = parser.parse_name(NAME)?;
        Ok(LowerRows {
            date_of_birth,
            valid_date_of_birth,
            sex,
            expiration_date,
            valid_expiration_date,
            nationality,
            optional2,
            surname,
            given_names,
            valid_composite,
        })
    }

    pub(crate) fn into_record(
        self,
        header: Header,
        document_number: String,
        valid_document_number: bool,
        optional: String,
    ) -> MrzRecord {
        header.into_record(Fields {
            document_number,
            surname: self.surname,
            given_names: self.given_names,
            date_of_birth: self.date_of_birth,
            sex: self.sex,
            expiration_date: Some(self.expiration_date),
            nationality: self.nationality,
            valid_document_number,
            valid_date_of_birth: self.valid_date_of_birth,
            valid_expiration_date: self.valid_expiration_date,
            valid_composite: self.valid_composite,
            details: LayoutDetails::DualOptional {
                optional,
                optional2: self.optional2,
            },
        })
    }

    /// Append rows 1 and 2 to a finished row 0.
    pub(crate) fn encode(record: &MrzRecord, row0: String) -> Result<String> {
        let mut row1 = with_check(&date_text(
            Some(&record.date_of_birth),
            "date of birth",
        )?)?;
        row1.push(record.sex.mrz_char());
        row1.push_str(&with_check(&date_text(
            record.expiration_date.as_ref(),
            "expiration date",
        )?)?);
        row1.push_str(&field(&record.nationality, NATIONALITY.length()));
        row1.push_str(&field(
            record.optional2().unwrap_or_default(),
            OPTIONAL2.length(),
        ));
        let composite = slice_rows(&[&row0, &row1], &COMPOSITE)?;
        row1.push(codec::check_digit_char(&composite)?);

        let row2 = name_to_mrz(&record.surname, &record.given_names, NAME.length())?;
        Ok(join_rows(&[row0, row1, row2]))
    }
}

#[cfg(test)]
mod tests {
    use crate::date::MrzDate;
    use crate::document_code::MrzDocumentCode;
    use crate::error::MrzError;
    use crate::format::MrzFormat;
    use crate::parser::parse;
    use crate::record_builder::MrzRecordBuilder;
    use crate::sex::MrzSex;

    const SPECIMEN: &str = "I<UTOD231458907<<<<<<<<<<<<<<<\n\
                            7408122F1204159UTO<<<<<<<<<<<6\n\
                            ERIKSSON<<ANNA<MARIA<<<<<<<<<<";

    #[test]
    fn test_decode_td1_specimen() {
        let record = parse(SPECIMEN).unwrap();
        assert_eq!(record.format(), MrzFormat::MrtdTd1);
        assert_eq!(record.code(), MrzDocumentCode::TypeI);
        assert_eq!(record.document_number(), "D23145890");
        assert_eq!(record.date_of_birth(), &MrzDate::new(74, 8, 12));
        assert_eq!(record.sex(), MrzSex::Female);
        assert_eq!(record.expiration_date(), Some(&MrzDate::new(12, 4, 15)));
        assert_eq!(record.nationality(), "UTO");
        assert_eq!(record.surname(), "ERIKSSON");
        assert_eq!(record.given_names(), "ANNA MARIA");
        assert_eq!(record.optional(), Some(""));
        assert_eq!(record.optional2(), Some(""));
        assert!(record.is_valid());
    }

    #[test]
    fn test_encode_td1_specimen() {
        let record = parse(SPECIMEN).unwrap();
        assert_eq!(record.to_mrz().unwrap(), format!("{SPECIMEN}\n"));
    }

    #[test]
    fn test_long_document_number_round_trip() {
        let record = MrzRecordBuilder::new(MrzFormat::MrtdTd1)
            .issuing_country("NLD")
            .nationality("NLD")
            .document_number("D23145890123")
            .optional("OPT")
            .surname("De Vries")
            .given_names("Anna")
            .date_of_birth(MrzDate::new(74, 8, 12))
            .sex(MrzSex::Female)
            .expiration_date(MrzDate::new(30, 4, 15))
            .build()
            .unwrap();
        assert_eq!(record.document_number(), "D23145890123");
        assert_eq!(record.optional(), Some("OPT"));
        assert!(record.valid_document_number());
        assert!(record.valid_composite());

        let mrz = record.to_mrz().unwrap();
        let row0 = mrz.lines().next().unwrap();
        assert_eq!(&row0[5..15], "D23145890<");
        assert_eq!(&row0[15..18], "123");
        assert_eq!(&row0[19..23], "<OPT");
    }

    #[test]
    fn test_long_document_number_check_digit_mismatch() {
        let record = MrzRecordBuilder::new(MrzFormat::MrtdTd1)
            .issuing_country("NLD")
            .nationality("NLD")
            .document_number("D23145890123")
            .surname("De Vries")
            .given_names("Anna")
            .date_of_birth(MrzDate::new(74, 8, 12))
            .sex(MrzSex::Female)
            .expiration_date(MrzDate::new(30, 4, 15))
            .build()
            .unwrap();
        let mrz = record.to_mrz().unwrap();
        let check = mrz.as_bytes()[18] as char;
        let wrong = if check == '9' { '8' } else { '9' };
        let mut broken = mrz.clone();
        broken.replace_range(18..19, &wrong.to_string());
        let decoded = parse(&broken).unwrap();
        assert_eq!(decoded.document_number(), "D23145890");
        assert!(!decoded.valid_document_number());
    }

    #[test]
    fn test_filler_check_digit_reads_as_zero_before_long_number() {
        // "100000003" has check digit 0, so a filler in column 14 is valid.
        let record = MrzRecordBuilder::new(MrzFormat::MrtdTd1)
            .issuing_country("UTO")
            .nationality("UTO")
            .document_number("100000003")
            .optional("ABC")
            .surname("Doe")
            .given_names("John")
            .date_of_birth(MrzDate::new(80, 1, 1))
            .sex(MrzSex::Male)
            .expiration_date(MrzDate::new(30, 1, 1))
            .build()
            .unwrap();
        let mrz = record.to_mrz().unwrap();
        assert_eq!(&mrz[14..15], "0");
        let mut filled = mrz.clone();
        filled.replace_range(14..15, "<");

        let decoded = parse(&filled).unwrap();
        assert_eq!(decoded.document_number(), "100000003");
        assert!(decoded.valid_document_number());
        assert_eq!(decoded.optional(), Some("ABC"));
        assert!(decoded.is_valid());
    }

    #[test]
    fn test_filler_inside_number_overflow_is_rejected() {
        let result = MrzRecordBuilder::new(MrzFormat::MrtdTd1)
            .issuing_country("UTO")
            .nationality("UTO")
            .document_number("ABCDEFGHIJ K")
            .date_of_birth(MrzDate::new(80, 1, 1))
            .expiration_date(MrzDate::new(30, 1, 1))
            .build();
        assert!(matches!(result, Err(MrzError::InvalidArgument(_))));
    }

    #[test]
    fn test_long_number_with_zero_head_check_is_rejected() {
        // The first nine characters would verify on their own.
        let result = MrzRecordBuilder::new(MrzFormat::MrtdTd1)
            .issuing_country("UTO")
            .nationality("UTO")
            .document_number("100000003XY")
            .date_of_birth(MrzDate::new(80, 1, 1))
            .expiration_date(MrzDate::new(30, 1, 1))
            .build();
        assert!(matches!(result, Err(MrzError::InvalidArgument(_))));
    }

    #[test]
    fn test_document_number_too_long() {
        let result = MrzRecordBuilder::new(MrzFormat::MrtdTd1)
            .document_number("ABCDEFGHIJKLMNOPQRSTUVWXYZ")
            .date_of_birth(MrzDate::new(74, 8, 12))
            .expiration_date(MrzDate::new(30, 4, 15))
            .build();
        assert!(matches!(result, Err(MrzError::InvalidArgument(_))));
    }

    #[test]
    fn test_national_td1_variant_requires_id_code() {
        let card = MrzRecordBuilder::new(MrzFormat::IraqId)
            .nationality("IRQ")
            .document_number("A12345678")
            .surname("Hassan")
            .given_names("Ali")
            .date_of_birth(MrzDate::new(90, 5, 17))
            .sex(MrzSex::Male)
            .expiration_date(MrzDate::new(31, 5, 16))
            .build()
            .unwrap();
        assert_eq!(card.format(), MrzFormat::IraqId);
        assert_eq!(card.issuing_country(), "IRQ");
        assert_eq!(card.code1(), 'I');
        assert_eq!(card.code2(), 'D');
        assert!(card.is_valid());
        assert_eq!(parse(&card.to_mrz().unwrap()).unwrap(), card);
    }
}
