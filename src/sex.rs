//! Holder sex as printed in an MRZ.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sex of the document holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MrzSex {
    /// `M`
    Male,
    /// `F`
    Female,
    /// `X`, also read from `<`
    Unspecified,
}

impl MrzSex {
    /// The character written when encoding.
    #[must_use]
    pub const fn mrz_char(self) -> char {
        match self {
            MrzSex::Male => 'M',
            MrzSex::Female => 'F',
            MrzSex::Unspecified => 'X',
        }
    }

    /// Read the sex character; both `X` and `<` mean unspecified.
    #[must_use]
    pub const fn from_mrz(c: char) -> Option<Self> {
        match c {
            'M' => Some(MrzSex::Male),
            'F' => Some(MrzSex::Female),
            'X' | '<' => Some(MrzSex::Unspecified),
            _ => None,
        }
    }
}

impl fmt::Display for MrzSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MrzSex::Male => "Male",
            MrzSex::Female => "Female",
            MrzSex::Unspecified => "Unspecified",
        };
        f.write_str(name)
    }
}
