//! Common test helpers and sample documents shared across the test suite.

#![allow(dead_code)]

use mrzc::{MrzDate, MrzFormat, MrzRecordBuilder, MrzSex};

/// ICAO 9303 TD3 passport specimen.
pub const PASSPORT: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
                            L898902C36UTO7408122F1204159ZE184226B<<<<<10";

/// ICAO 9303 TD1 card specimen.
pub const TD1: &str = "I<UTOD231458907<<<<<<<<<<<<<<<\n\
                       7408122F1204159UTO<<<<<<<<<<<6\n\
                       ERIKSSON<<ANNA<MARIA<<<<<<<<<<";

/// ICAO 9303 TD2 card specimen.
pub const TD2: &str = "I<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<\n\
                       D231458907UTO7408122F1204159<<<<<<<6";

/// ICAO 9303 MRV-A visa specimen.
pub const MRV_A: &str = "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
                         L8988901C4XXX4009078F96121096ZE184226B<<<<<<";

/// ICAO 9303 MRV-B visa specimen.
pub const MRV_B: &str = "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<\n\
                         L8988901C4XXX4009078F9612109<<<<<<<<";

/// French national ID card sample.
pub const FRENCH_ID: &str = "IDFRABERTHIER<<<<<<<<<<<<<<<<<<<<<<<\n\
                             9409923102854CORINNE<<<<<<<6512068F4";

/// Creates a builder for the John Doe sample document in `format`.
///
/// French cards get no expiration date and a 12-character document number.
pub fn doe_builder(format: MrzFormat) -> MrzRecordBuilder {
    let builder = MrzRecordBuilder::new(format)
        .nationality("USA")
        .surname("Doe")
        .given_names("John")
        .date_of_birth(MrzDate::new(80, 1, 1))
        .sex(MrzSex::Male);
    match format {
        MrzFormat::FrenchId => builder.document_number("123456789012"),
        MrzFormat::Passport
        | MrzFormat::MrtdTd1
        | MrzFormat::MrtdTd2
        | MrzFormat::SlovakId234
        | MrzFormat::MrvVisaA
        | MrzFormat::MrvVisaB => builder
            .issuing_country("USA")
            .document_number("123456789")
            .expiration_date(MrzDate::new(30, 1, 1)),
        _ => builder
            .document_number("123456789")
            .expiration_date(MrzDate::new(30, 1, 1)),
    }
}

/// Every supported format in detection order.
pub fn all_formats() -> Vec<MrzFormat> {
    mrzc::REGISTRY.iter().map(|spec| spec.format).collect()
}

/// Replace the character at `(row, column)` of newline-separated MRZ text.
pub fn replace_char(mrz: &str, row: usize, column: usize, c: char) -> String {
    mrz.split('\n')
        .enumerate()
        .map(|(index, line)| {
            if index == row {
                line.chars()
                    .enumerate()
                    .map(|(col, old)| if col == column { c } else { old })
                    .collect()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<String>>()
        .join("\n")
}
