//! Clean-up of OCR output before decoding.
//!
//! Text recognized from a camera frame usually carries noise around the MRZ:
//! leading text from the document body, spaces, blank lines and a few
//! characters that OCR engines commonly confuse with the filler. [`clean`]
//! removes that noise; [`parse_and_clean`] decodes the result and repairs
//! digit look-alikes in name and country fields once the check digits
//! confirm the read.

use crate::error::{MrzError, Result};
use crate::parser::parse;
use crate::record::MrzRecord;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

lazy_static! {
    static ref LEADING_NOISE: Regex = Regex::new(r"^[^PIACV]*").expect("valid regex");
    static ref BLANKS: Regex = Regex::new(r"[ \t\r]+").expect("valid regex");
    static ref NEWLINES: Regex = Regex::new(r"\n+").expect("valid regex");
    static ref PASSPORT_CODE: Regex = Regex::new(r"^P[KC]").expect("valid regex");
    static ref NON_MRZ: Regex = Regex::new(r"[^A-Z0-9<\n]").expect("valid regex");
}

/// Fillers that OCR engines commonly misread, each seen between two fillers.
const MISREAD_FILLERS: &[&str] = &[
    "<c<", "<e<", "<E<", "<K<", "<S<", "<C<", "<¢<", "<(<", "<{<", "<[<",
];

const MAX_TWO_ROW_LENGTH: usize = 89;
const MAX_THREE_ROW_LENGTH: usize = 92;

/// Strip OCR noise from recognized text.
///
/// # Errors
///
/// Returns [`MrzError::InvalidInput`] if the cleaned text has no filler,
/// does not start with `P`, `I`, `A`, `C` or `V`, or does not have two or
/// three rows.
///
/// # Examples
///
/// ```
/// use mrzc::cleaner::clean;
///
/// let ocr = "republic of utopia\nPK UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\n\
///            L898902C36UTO7408122F1204159ZE184226B<<<<<10 ";
/// assert_eq!(
///     clean(ocr).unwrap(),
///     "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
///      L898902C36UTO7408122F1204159ZE184226B<<<<<10"
/// );
/// ```
pub fn clean(mrz: &str) -> Result<String> {
    let mut result = LEADING_NOISE.replace(mrz, "").into_owned();
    result = BLANKS.replace_all(&result, "").into_owned();
    result = NEWLINES.replace_all(&result, "\n").into_owned();
    result = result.replace('«', "<");
    for misread in MISREAD_FILLERS {
        result = result.replace(misread, "<<<");
    }
    result = PASSPORT_CODE.replace(&result, "P<").into_owned();
    result = NON_MRZ.replace_all(&result, "").into_owned();
    let mut result = result.trim().to_string();

    let starts_like_mrz = result.starts_with(['P', 'I', 'A', 'C', 'V']);
    if !result.contains('<') || !starts_like_mrz {
        warn!(cleaned = %result, "Rejected OCR text without MRZ markers");
        return Err(MrzError::InvalidInput(
            "no '<' or leading 'P', 'I', 'A', 'C', 'V' detected".to_string(),
        ));
    }
    match result.matches('\n').count() {
        1 => result.truncate(MAX_TWO_ROW_LENGTH),
        2 => result.truncate(MAX_THREE_ROW_LENGTH),
        rows => {
            warn!(newlines = rows, "Rejected OCR text with wrong number of rows");
            return Err(MrzError::InvalidInput(
                "wrong number of lines".to_string(),
            ));
        },
    }
    Ok(result)
}

/// Decode `mrz` and repair digit look-alikes in the name and country fields.
///
/// The record is accepted when the document number, date of birth and
/// expiration date check digits all match, or when the composite check digit
/// matches. Surname, given names, issuing country and nationality then have
/// `0`, `1`, `8`, `5`, `2` and `3` replaced by `O`, `I`, `B`, `S`, `Z` and `J`.
///
/// # Errors
///
/// Returns [`MrzError::InvalidCheckDigits`] if the record is not accepted,
/// and any decode error.
pub fn parse_and_clean(mrz: &str) -> Result<MrzRecord> {
    let mut record = parse(mrz)?;
    let accepted = (record.valid_date_of_birth
        && record.valid_document_number
        && record.valid_expiration_date)
        || record.valid_composite;
    if !accepted {
        debug!(format = %record.format, "Check digits rejected the scan");
        return Err(MrzError::InvalidCheckDigits);
    }
    record.given_names = digits_to_letters(&record.given_names);
    record.surname = digits_to_letters(&record.surname);
    record.issuing_country = digits_to_letters(&record.issuing_country);
    record.nationality = digits_to_letters(&record.nationality);
    Ok(record)
}

fn digits_to_letters(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '0' => 'O',
            '1' => 'I',
            '8' => 'B',
            '5' => 'S',
            '2' => 'Z',
            '3' => 'J',
            other => other,
        })
        .collect()
}
