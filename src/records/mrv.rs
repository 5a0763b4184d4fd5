//! Machine-readable visas.
//!
//! MRV-A spans the full TD3 width and MRV-B the TD2 width. Neither has a
//! composite check digit; optional data runs from column 28 to the end of
//! the second row.

use super::td2::TwoRowLayout;
use super::Header;
use crate::error::Result;
use crate::parser::MrzParser;
use crate::record::MrzRecord;

const MRV_A: TwoRowLayout = TwoRowLayout {
    columns: 44,
    composite: false,
};

const MRV_B: TwoRowLayout = TwoRowLayout {
    columns: 36,
    composite: false,
};

pub(crate) fn decode_a(parser: &MrzParser, header: Header) -> Result<MrzRecord> {
    MRV_A.decode(parser, header)
}

pub(crate) fn encode_a(record: &MrzRecord) -> Result<String> {
    MRV_A.encode(record)
}

pub(crate) fn decode_b(parser: &MrzParser, header: Header) -> Result<MrzRecord> {
    MRV_B.decode(parser, header)
}

pub(crate) fn encode_b(record: &MrzRecord) -> Result<String> {
    MRV_B.encode(record)
}
