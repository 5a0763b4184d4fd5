//! MRZ character-set conversion and check digits.
//!
//! The MRZ alphabet is `A-Z`, `0-9` and the filler `<`. This module converts
//! free text into that alphabet, fits personal names into a fixed width and
//! computes the ICAO 9303 7-3-1 check digit.

use crate::error::{MrzError, Result};
use crate::range::MrzRange;
use unicode_normalization::UnicodeNormalization;

/// The MRZ filler character.
pub const FILLER: char = '<';

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Characters that expand to more than one MRZ letter before accent stripping.
const EXPANSIONS: &[(char, &str)] = &[
    ('Ä', "AE"),
    ('ä', "AE"),
    ('Å', "AA"),
    ('å', "AA"),
    ('Æ', "AE"),
    ('æ', "AE"),
    ('Ĳ', "IJ"),
    ('ĳ', "IJ"),
    ('Ö', "OE"),
    ('ö', "OE"),
    ('Ø', "OE"),
    ('ø', "OE"),
    ('Ü', "UE"),
    ('ü', "UE"),
    ('ß', "SS"),
];

/// Whether `c` belongs to the MRZ alphabet `[A-Z0-9<]`.
#[must_use]
pub fn is_valid_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_uppercase() || c == FILLER
}

/// Numeric value of an MRZ character for check digit purposes.
///
/// Digits map to themselves, letters to 10 through 35 and the filler to 0.
#[must_use]
pub fn character_value(c: char) -> Option<u32> {
    match c {
        FILLER => Some(0),
        '0'..='9' => c.to_digit(10),
        'A'..='Z' => Some(u32::from(c) - u32::from('A') + 10),
        _ => None,
    }
}

/// Compute the 7-3-1 check digit over `value`.
///
/// # Errors
///
/// Returns [`MrzError::InvalidCharacter`] if `value` contains a character
/// outside the MRZ alphabet. The reported range is relative to `value`.
///
/// # Examples
///
/// ```
/// use mrzc::codec::compute_check_digit;
///
/// assert_eq!(compute_check_digit("L898902C3").unwrap(), 6);
/// assert_eq!(compute_check_digit("740812").unwrap(), 2);
/// assert!(compute_check_digit("abc").is_err());
/// ```
pub fn compute_check_digit(value: &str) -> Result<u32> {
    let mut sum = 0u32;
    for (i, c) in value.chars().enumerate() {
        let Some(v) = character_value(c) else {
            return Err(MrzError::InvalidCharacter {
                character: c,
                mrz: value.to_string(),
                range: MrzRange::at(0, i),
                format: None,
            });
        };
        sum += v * WEIGHTS[i % 3];
    }
    Ok(sum % 10)
}

/// The check digit of `value` as a character.
///
/// # Errors
///
/// Same as [`compute_check_digit`].
pub fn check_digit_char(value: &str) -> Result<char> {
    let digit = compute_check_digit(value)?;
    Ok(digit_char(digit))
}

/// The check digit of `value`, rendering zero as the filler.
///
/// Used for the passport personal number, where an empty field is
/// conventionally written `<<<<<<<<<<<<<<<` rather than ending in `0`.
///
/// # Errors
///
/// Same as [`compute_check_digit`].
pub fn check_digit_char_prefer_filler(value: &str) -> Result<char> {
    match compute_check_digit(value)? {
        0 => Ok(FILLER),
        digit => Ok(digit_char(digit)),
    }
}

fn digit_char(digit: u32) -> char {
    char::from_digit(digit, 10).unwrap_or('0')
}

/// Convert free text to MRZ characters.
///
/// Umlauts and ligatures are expanded (`Ä` to `AE`, `ß` to `SS` and so on),
/// apostrophes are removed, accents are stripped and the text is upper-cased.
/// Whatever is still outside `[A-Z0-9<]` becomes a filler. With
/// `Some(length)` the result is truncated or padded with fillers to exactly
/// `length` characters; `None` leaves the length alone.
///
/// # Examples
///
/// ```
/// use mrzc::codec::to_mrz_string;
///
/// assert_eq!(to_mrz_string("Sedím na konári", Some(20)), "SEDIM<NA<KONARI<<<<<");
/// assert_eq!(to_mrz_string("Pat, Mat", Some(8)), "PAT<<MAT");
/// assert_eq!(to_mrz_string("foo/bar baz", Some(4)), "FOO<");
/// assert_eq!(to_mrz_string("Müller", None), "MUELLER");
/// ```
#[must_use]
pub fn to_mrz_string(input: &str, length: Option<usize>) -> String {
    let mut result: String = deaccent(&expand(input))
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if let Some(length) = length {
        result.truncate(length);
    }
    let mut result: String = result
        .chars()
        .map(|c| if is_valid_char(c) { c } else { FILLER })
        .collect();
    if let Some(length) = length {
        while result.len() < length {
            result.push(FILLER);
        }
    }
    result
}

fn expand(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c == '\'' || c == '\u{2019}' {
            continue;
        }
        match EXPANSIONS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

// NFD splits accented letters into base letter plus combining marks; anything
// that is still not ASCII afterwards is dropped.
fn deaccent(input: &str) -> String {
    input.nfd().filter(char::is_ascii).collect()
}

/// Map MRZ filler notation back to readable text.
///
/// Trailing fillers are dropped, `<<` becomes `", "` and any remaining `<`
/// becomes a space.
///
/// ```
/// use mrzc::codec::filler_to_text;
///
/// assert_eq!(filler_to_text("ABC<<DEF<<<"), "ABC, DEF");
/// assert_eq!(filler_to_text("JOHN<PAUL<<<<"), "JOHN PAUL");
/// ```
#[must_use]
pub fn filler_to_text(raw: &str) -> String {
    raw.trim_end_matches(FILLER)
        .replace("<<", ", ")
        .replace(FILLER, " ")
}

/// Fit a surname and given names into a name field of `width` characters.
///
/// Both parts are split on whitespace (`", "` counts as a separator) and each
/// token is converted with [`to_mrz_string`]. The result is the surname
/// tokens joined by `<`, then `<<`, then the given-name tokens joined by `<`,
/// padded to `width`. When that does not fit, tokens are shortened starting
/// with the last given name and moving backwards; a token that cannot absorb
/// the whole overflow is cut to its initial. Surname tokens are only touched
/// once every given name has been reduced to an initial.
///
/// # Errors
///
/// Returns [`MrzError::InvalidArgument`] if `width` is zero or the name does
/// not fit even with every token reduced to one character.
///
/// # Examples
///
/// ```
/// use mrzc::codec::name_to_mrz;
///
/// assert_eq!(name_to_mrz("Doe", "John", 12).unwrap(), "DOE<<JOHN<<<");
/// assert_eq!(name_to_mrz("Doe", "John Paul", 12).unwrap(), "DOE<<JOHN<PA");
/// ```
pub fn name_to_mrz(surname: &str, given_names: &str, width: usize) -> Result<String> {
    if width == 0 {
        return Err(MrzError::InvalidArgument(
            "name field width must be positive".to_string(),
        ));
    }
    let mut surnames = tokenize(surname);
    let mut given = tokenize(given_names);

    let mut size = name_size(&surnames, &given);
    let mut truncating_surnames = false;
    let mut index = given.len() - 1;
    while size > width {
        let tokens = if truncating_surnames {
            &mut surnames
        } else {
            &mut given
        };
        let token = &mut tokens[index];
        let token_len = token.len();
        if size - token_len + 1 <= width {
            token.truncate(token_len - (size - width));
        } else {
            token.truncate(token_len.min(1));
            if index > 0 {
                index -= 1;
            } else if truncating_surnames {
                return Err(MrzError::InvalidArgument(format!(
                    "cannot fit name '{surname}, {given_names}' into {width} characters"
                )));
            } else {
                truncating_surnames = true;
                index = surnames.len() - 1;
            }
        }
        size = name_size(&surnames, &given);
    }
    Ok(to_mrz_string(&compose_name(&surnames, &given), Some(width)))
}

// Always yields at least one token so that an empty part still occupies
// its separator in the composed name.
fn tokenize(part: &str) -> Vec<String> {
    let tokens: Vec<String> = part
        .replace(", ", " ")
        .split_whitespace()
        .map(|token| to_mrz_string(token, None))
        .collect();
    if tokens.is_empty() {
        vec![String::new()]
    } else {
        tokens
    }
}

fn name_size(surnames: &[String], given: &[String]) -> usize {
    surnames
        .iter()
        .chain(given.iter())
        .map(|token| token.len() + 1)
        .sum()
}

fn compose_name(surnames: &[String], given: &[String]) -> String {
    let mut name = surnames.join("<");
    name.push(FILLER);
    for token in given {
        name.push(FILLER);
        name.push_str(token);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digit_known_values() {
        assert_eq!(compute_check_digit("L898902C3").unwrap(), 6);
        assert_eq!(compute_check_digit("740812").unwrap(), 2);
        assert_eq!(compute_check_digit("120415").unwrap(), 9);
        assert_eq!(compute_check_digit("ZE184226B<<<<<").unwrap(), 1);
        assert_eq!(compute_check_digit("").unwrap(), 0);
        assert_eq!(compute_check_digit("<<<<<<<<<").unwrap(), 0);
    }

    #[test]
    fn test_check_digit_is_deterministic() {
        let first = compute_check_digit("D23145890").unwrap();
        let second = compute_check_digit("D23145890").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, 7);
    }

    #[test]
    fn test_check_digit_rejects_lowercase() {
        let err = compute_check_digit("AB1c").unwrap_err();
        match err {
            MrzError::InvalidCharacter {
                character, range, ..
            } => {
                assert_eq!(character, 'c');
                assert_eq!(range, MrzRange::at(0, 3));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_digit_prefer_filler() {
        assert_eq!(check_digit_char_prefer_filler("<<<<<<<<<<<<<<").unwrap(), '<');
        assert_eq!(check_digit_char("<<<<<<<<<<<<<<").unwrap(), '0');
        assert_eq!(check_digit_char_prefer_filler("ZE184226B<<<<<").unwrap(), '1');
    }

    #[test]
    fn test_character_values() {
        assert_eq!(character_value('<'), Some(0));
        assert_eq!(character_value('7'), Some(7));
        assert_eq!(character_value('A'), Some(10));
        assert_eq!(character_value('Z'), Some(35));
        assert_eq!(character_value('a'), None);
    }

    #[test]
    fn test_to_mrz_string_examples() {
        assert_eq!(to_mrz_string("Sedím na konári", Some(20)), "SEDIM<NA<KONARI<<<<<");
        assert_eq!(to_mrz_string("Pat, Mat", Some(8)), "PAT<<MAT");
        assert_eq!(to_mrz_string("foo/bar baz", Some(4)), "FOO<");
        assert_eq!(to_mrz_string("*$()&/\\", Some(8)), "<<<<<<<<");
    }

    #[test]
    fn test_to_mrz_string_expansions() {
        assert_eq!(to_mrz_string("Müller", None), "MUELLER");
        assert_eq!(to_mrz_string("Straße", None), "STRASSE");
        assert_eq!(to_mrz_string("Ångström", None), "AANGSTROEM");
        assert_eq!(to_mrz_string("Bjørn", None), "BJOERN");
        assert_eq!(to_mrz_string("O'Neill", None), "ONEILL");
        assert_eq!(to_mrz_string("D\u{2019}Arcy", None), "DARCY");
    }

    #[test]
    fn test_to_mrz_string_drops_undecomposable_characters() {
        assert_eq!(to_mrz_string("Ann李", None), "ANN");
        assert_eq!(to_mrz_string("", Some(3)), "<<<");
    }

    #[test]
    fn test_filler_to_text() {
        assert_eq!(filler_to_text("ABC<<DEF<<<"), "ABC, DEF");
        assert_eq!(filler_to_text("<<<<"), "");
        assert_eq!(filler_to_text("UTO"), "UTO");
    }

    #[test]
    fn test_name_to_mrz_fits() {
        assert_eq!(
            name_to_mrz("Eriksson", "Anna Maria", 39).unwrap(),
            "ERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<"
        );
        assert_eq!(name_to_mrz("van der Berg", "Jan", 20).unwrap(), "VAN<DER<BERG<<JAN<<<");
    }

    #[test]
    fn test_name_to_mrz_truncates_given_names_first() {
        // Last given name absorbs the overflow when it can.
        assert_eq!(name_to_mrz("Doe", "John Paul", 12).unwrap(), "DOE<<JOHN<PA");
        // Otherwise it shrinks to an initial and the previous one is cut.
        assert_eq!(name_to_mrz("Doe", "Johnathan Paul", 10).unwrap(), "DOE<<JOH<P");
    }

    #[test]
    fn test_name_to_mrz_truncates_surnames_last() {
        assert_eq!(name_to_mrz("Abcdefg", "X", 4).unwrap(), "A<<X");
        assert_eq!(name_to_mrz("Abcdefg Hij", "Xy", 9).unwrap(), "ABCD<H<<X");
    }

    #[test]
    fn test_name_to_mrz_rejects_impossible_width() {
        assert!(matches!(
            name_to_mrz("Doe", "John", 0),
            Err(MrzError::InvalidArgument(_))
        ));
        assert!(matches!(
            name_to_mrz("Abc Def", "Ghi Jkl", 5),
            Err(MrzError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_name_to_mrz_comma_and_empty_given() {
        assert_eq!(name_to_mrz("Smith, Jones", "Ann", 16).unwrap(), "SMITH<JONES<<ANN");
        assert_eq!(name_to_mrz("Doe", "", 8).unwrap(), "DOE<<<<<");
    }
}
