//! The chip data-group path (DG1).
//!
//! Data group 1 of an electronic passport stores the MRZ as a flat run of
//! ASCII characters with no row separators. The layout is recovered from the
//! declared length alone: 90 bytes are a TD1 card, 88 a TD3 passport and 72
//! a TD2 card. The rebuilt rows go through the same parser as scanned text.

use crate::error::{MrzError, Result};
use crate::parser::MrzParser;
use crate::record::MrzRecord;
use tracing::debug;

/// Rows and columns for a DG1 payload of `length` bytes.
///
/// # Errors
///
/// Returns [`MrzError::DataGroup`] for any length other than 90, 88 or 72.
pub fn layout_for_length(length: usize) -> Result<(usize, usize)> {
    match length {
        90 => Ok((3, 30)),
        88 => Ok((2, 44)),
        72 => Ok((2, 36)),
        other => Err(MrzError::DataGroup(format!(
            "unsupported MRZ length {other}; expected 90, 88 or 72"
        ))),
    }
}

/// Decode the first `length` bytes of a DG1 payload.
///
/// # Errors
///
/// Returns [`MrzError::DataGroup`] if `length` is unsupported, exceeds the
/// buffer or covers non-ASCII bytes, and any decode error otherwise.
///
/// # Examples
///
/// ```
/// use mrzc::dg1::decode_data_group;
///
/// let bytes = b"P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\
///               L898902C36UTO7408122F1204159ZE184226B<<<<<10";
/// let record = decode_data_group(bytes, 88).unwrap();
/// assert_eq!(record.document_number(), "L898902C3");
/// ```
pub fn decode_data_group(bytes: &[u8], length: usize) -> Result<MrzRecord> {
    let (rows, columns) = layout_for_length(length)?;
    let payload = bytes.get(..length).ok_or_else(|| {
        MrzError::DataGroup(format!(
            "declared length {length} exceeds buffer of {} bytes",
            bytes.len()
        ))
    })?;
    if !payload.is_ascii() {
        return Err(MrzError::DataGroup(
            "MRZ bytes must be ASCII".to_string(),
        ));
    }
    let mut text = String::with_capacity(length + rows);
    for (index, row) in payload.chunks(columns).enumerate() {
        if index > 0 {
            text.push('\n');
        }
        text.extend(row.iter().map(|b| char::from(*b)));
    }
    debug!(rows, columns, "Rebuilt MRZ rows from data group");
    MrzParser::new(&text)?.decode()
}

/// Encode a record as a DG1 payload: the MRZ rows without separators.
///
/// # Errors
///
/// Returns any error from [`MrzRecord::to_mrz`].
pub fn encode_data_group(record: &MrzRecord) -> Result<Vec<u8>> {
    let mrz = record.to_mrz()?;
    Ok(mrz.bytes().filter(|b| *b != b'\n').collect())
}
