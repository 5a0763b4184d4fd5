//! Slovak identity card (2×34).
//!
//! A TD2 layout narrowed to 34 columns: name 5..34 and optional data 28..34
//! with no composite check digit.

use super::td2::TwoRowLayout;
use super::Header;
use crate::error::Result;
use crate::parser::MrzParser;
use crate::record::MrzRecord;

const SLOVAK_ID: TwoRowLayout = TwoRowLayout {
    columns: 34,
    composite: false,
};

pub(crate) fn decode(parser: &MrzParser, header: Header) -> Result<MrzRecord> {
    SLOVAK_ID.decode(parser, header)
}

pub(crate) fn encode(record: &MrzRecord) -> Result<String> {
    SLOVAK_ID.encode(record)
}

#[cfg(test)]
mod tests {
    use crate::date::MrzDate;
    use crate::format::MrzFormat;
    use crate::record_builder::MrzRecordBuilder;
    use crate::sex::MrzSex;

    #[test]
    fn test_slovak_id_round_trip() {
        let record = MrzRecordBuilder::new(MrzFormat::SlovakId234)
            .issuing_country("SVK")
            .nationality("SVK")
            .document_number("SP123456")
            .surname("Kováčová")
            .given_names("Zuzana")
            .date_of_birth(MrzDate::new(85, 3, 21))
            .sex(MrzSex::Female)
            .expiration_date(MrzDate::new(29, 11, 30))
            .optional("X1")
            .build()
            .unwrap();
        assert_eq!(record.format(), MrzFormat::SlovakId234);
        assert_eq!(record.surname(), "KOVACOVA");
        assert_eq!(record.optional(), Some("X1"));
        assert!(record.valid_composite());

        let mrz = record.to_mrz().unwrap();
        let rows: Vec<&str> = mrz.lines().collect();
        assert_eq!(rows[0].len(), 34);
        assert_eq!(rows[1].len(), 34);
        assert_eq!(crate::parse(&mrz).unwrap(), record);
    }
}
