//! Document code families from the first two MRZ characters.

use crate::error::{MrzError, Result};
use crate::range::MrzRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Family of a travel document, derived from its two-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MrzDocumentCode {
    /// Passport (`P`, `T`, `IP`).
    Passport,
    /// Identity card (`I`).
    TypeI,
    /// Type A document.
    TypeA,
    /// Crew member certificate (`AC`).
    CrewMember,
    /// Type C document.
    TypeC,
    /// Visa (`V`).
    TypeV,
    /// Migrant or residence document (`R`, `ME`, `TD`).
    Migrant,
}

const CODE_RANGE: MrzRange = MrzRange::new(0, 0, 2);

impl MrzDocumentCode {
    /// Classify an MRZ by its first two characters.
    ///
    /// Two-letter codes are checked before single letters, so `AC` is a crew
    /// member certificate and `IP` a passport. `IV` is rejected outright.
    ///
    /// # Errors
    ///
    /// Returns [`MrzError::ParseError`] at columns 0-2 of row 0 if the text is
    /// shorter than two characters, the code is `IV`, or nothing matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrzc::MrzDocumentCode;
    ///
    /// assert_eq!(MrzDocumentCode::parse("P<UTO").unwrap(), MrzDocumentCode::Passport);
    /// assert_eq!(MrzDocumentCode::parse("AC").unwrap(), MrzDocumentCode::CrewMember);
    /// assert!(MrzDocumentCode::parse("IV").is_err());
    /// ```
    pub fn parse(mrz: &str) -> Result<Self> {
        let mut chars = mrz.chars();
        let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
            return Err(code_error(mrz, "MRZ too short to carry a document code"));
        };
        match (first, second) {
            ('I', 'V') => Err(code_error(mrz, "IV document code is not allowed")),
            ('A', 'C') => Ok(MrzDocumentCode::CrewMember),
            ('M', 'E') | ('T', 'D') => Ok(MrzDocumentCode::Migrant),
            ('I', 'P') | ('T' | 'P', _) => Ok(MrzDocumentCode::Passport),
            ('A', _) => Ok(MrzDocumentCode::TypeA),
            ('C', _) => Ok(MrzDocumentCode::TypeC),
            ('V', _) => Ok(MrzDocumentCode::TypeV),
            ('I', _) => Ok(MrzDocumentCode::TypeI),
            ('R', _) => Ok(MrzDocumentCode::Migrant),
            _ => Err(code_error(
                mrz,
                &format!("Unsupported document code: {first}{second}"),
            )),
        }
    }
}

fn code_error(mrz: &str, message: &str) -> MrzError {
    MrzError::ParseError {
        message: message.to_string(),
        mrz: mrz.to_string(),
        range: CODE_RANGE,
        format: None,
    }
}

impl fmt::Display for MrzDocumentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_letter_codes_win() {
        assert_eq!(MrzDocumentCode::parse("AC").unwrap(), MrzDocumentCode::CrewMember);
        assert_eq!(MrzDocumentCode::parse("ME").unwrap(), MrzDocumentCode::Migrant);
        assert_eq!(MrzDocumentCode::parse("TD").unwrap(), MrzDocumentCode::Migrant);
        assert_eq!(MrzDocumentCode::parse("IP").unwrap(), MrzDocumentCode::Passport);
    }

    #[test]
    fn test_single_letter_codes() {
        assert_eq!(MrzDocumentCode::parse("P<").unwrap(), MrzDocumentCode::Passport);
        assert_eq!(MrzDocumentCode::parse("TX").unwrap(), MrzDocumentCode::Passport);
        assert_eq!(MrzDocumentCode::parse("A<").unwrap(), MrzDocumentCode::TypeA);
        assert_eq!(MrzDocumentCode::parse("C<").unwrap(), MrzDocumentCode::TypeC);
        assert_eq!(MrzDocumentCode::parse("V<").unwrap(), MrzDocumentCode::TypeV);
        assert_eq!(MrzDocumentCode::parse("ID").unwrap(), MrzDocumentCode::TypeI);
        assert_eq!(MrzDocumentCode::parse("I<").unwrap(), MrzDocumentCode::TypeI);
        assert_eq!(MrzDocumentCode::parse("R<").unwrap(), MrzDocumentCode::Migrant);
    }

    #[test]
    fn test_rejected_codes() {
        let err = MrzDocumentCode::parse("IV").unwrap_err();
        assert_eq!(err.range(), Some(MrzRange::new(0, 0, 2)));
        assert!(MrzDocumentCode::parse("X<").is_err());
        assert!(MrzDocumentCode::parse("P").is_err());
    }
}
