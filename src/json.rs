//! Flat JSON export of MRZ records.
//!
//! The JSON shape is the one scanning front-ends consume: a single object with
//! camel-case keys, dates as `day/month/year` and the re-encoded MRZ text.
//! For a lossless representation use the serde implementation of
//! [`MrzRecord`] instead.
//!
//! # Examples
//!
//! ```
//! use mrzc::{json, parse};
//!
//! let record = parse(
//!     "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
//!      L898902C36UTO7408122F1204159ZE184226B<<<<<10",
//! )?;
//! let value = json::record_to_json(&record)?;
//! assert_eq!(value["surname"], "ERIKSSON");
//! assert_eq!(value["dateOfBirth"], "12/8/74");
//!
//! let restored = json::json_to_record(&value)?;
//! assert_eq!(restored, record);
//! # Ok::<(), mrzc::MrzError>(())
//! ```

use crate::error::{MrzError, Result};
use crate::parser::parse;
use crate::record::MrzRecord;
use serde_json::{json, Value};

/// Convert a record to the flat JSON result object.
///
/// Keys: `code`, `code1`, `code2`, `dateOfBirth`, `documentNumber`,
/// `expirationDate`, `format`, `givenNames`, `issuingCountry`,
/// `nationality`, `sex`, `surname`, `mrz`, `optional`, `optional2` and
/// `personalNumber`. Fields a layout lacks are `null`.
///
/// # Errors
///
/// Returns an error if the record cannot be re-encoded as MRZ text.
pub fn record_to_json(record: &MrzRecord) -> Result<Value> {
    Ok(json!({
        "code": record.code().to_string(),
        "code1": record.code1().to_string(),
        "code2": record.code2().to_string(),
        "dateOfBirth": record.date_of_birth().to_string(),
        "documentNumber": record.document_number(),
        "expirationDate": record.expiration_date().map(ToString::to_string),
        "format": record.format().to_string(),
        "givenNames": record.given_names(),
        "issuingCountry": record.issuing_country(),
        "nationality": record.nationality(),
        "sex": record.sex().to_string(),
        "surname": record.surname(),
        "mrz": record.to_mrz()?,
        "optional": record.optional(),
        "optional2": record.optional2(),
        "personalNumber": record.personal_number(),
        "valid": record.is_valid(),
    }))
}

/// Rebuild a record from a flat JSON object by decoding its `mrz` member.
///
/// # Errors
///
/// Returns [`MrzError::InvalidArgument`] if the object has no string `mrz`
/// member, and any decode error.
pub fn json_to_record(value: &Value) -> Result<MrzRecord> {
    let mrz = value
        .get("mrz")
        .and_then(Value::as_str)
        .ok_or_else(|| MrzError::InvalidArgument("JSON object has no 'mrz' string".to_string()))?;
    parse(mrz)
}

/// Convert a record to a JSON string.
///
/// # Errors
///
/// Returns an error if the record cannot be re-encoded or serialized.
pub fn record_to_json_string(record: &MrzRecord) -> Result<String> {
    Ok(serde_json::to_string(&record_to_json(record)?)?)
}
