//! Parallel MRZ decoding using Rayon.
//!
//! Every input is an independent MRZ, so a batch is decoded on Rayon's
//! work-stealing pool with no shared state. Results come back in input order.
//!
//! # Examples
//!
//! ```
//! use mrzc::batch::parse_batch;
//! use mrzc::RecoveryMode;
//!
//! let inputs = [
//!     "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\nL898902C36UTO7408122F1204159ZE184226B<<<<<10",
//!     "not an mrz",
//! ];
//! let results = parse_batch(&inputs, RecoveryMode::Strict);
//! assert!(results[0].is_ok());
//! assert!(results[1].is_err());
//! ```

use crate::error::Result;
use crate::parser::parse_with_mode;
use crate::record::MrzRecord;
use crate::recovery::RecoveryMode;
use rayon::prelude::*;

/// Decode a batch of MRZ texts in parallel, one result per input.
#[must_use]
pub fn parse_batch<S: AsRef<str> + Sync>(inputs: &[S], mode: RecoveryMode) -> Vec<Result<MrzRecord>> {
    inputs
        .par_iter()
        .map(|input| parse_with_mode(input.as_ref(), mode))
        .collect()
}

/// Decode a batch of MRZ texts in parallel, failing on the first error.
///
/// # Errors
///
/// Returns an error if any input fails to decode.
pub fn parse_batch_all<S: AsRef<str> + Sync>(
    inputs: &[S],
    mode: RecoveryMode,
) -> Result<Vec<MrzRecord>> {
    inputs
        .par_iter()
        .map(|input| parse_with_mode(input.as_ref(), mode))
        .collect::<Result<Vec<MrzRecord>>>()
}
