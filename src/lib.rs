#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! ## Module Organization
//!
//! - [`format`]: the format registry and detection
//! - [`parser`]: fixed-position field primitives and the top-level [`parse`]
//! - [`record`] and [`record_builder`]: decoded records and how new ones are made
//! - [`codec`]: check digits, transliteration and name fitting
//! - [`date`], [`sex`], [`document_code`], [`range`]: field value types
//! - [`recovery`]: strict or lenient handling of uneven rows
//! - [`cleaner`]: OCR noise removal
//! - [`dg1`], [`json`], [`csv`], [`batch`]: chip, export and bulk surfaces

pub mod batch;
pub mod cleaner;
pub mod codec;
pub mod csv;
pub mod date;
pub mod dg1;
pub mod document_code;
pub mod error;
pub mod format;
pub mod json;
pub mod macros;
pub mod parser;
pub mod range;
pub mod record;
pub mod record_builder;
mod records;
pub mod recovery;
pub mod sex;

pub use date::MrzDate;
pub use document_code::MrzDocumentCode;
pub use error::{MrzError, Result};
pub use format::{FormatSpec, MrzFormat, RecordKind, REGISTRY};
pub use parser::{parse, parse_with_mode, MrzParser};
pub use range::MrzRange;
pub use record::{LayoutDetails, MrzRecord};
pub use record_builder::MrzRecordBuilder;
pub use recovery::{RecoveryContext, RecoveryMode};
pub use sex::MrzSex;
