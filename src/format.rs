//! The format registry and format detection.
//!
//! Formats that share dimensions are told apart by a prefix of the first row,
//! so the order of [`REGISTRY`] matters: a national variant must be probed
//! before the generic layout it refines.

use crate::document_code::MrzDocumentCode;
use crate::error::{MrzError, Result};
use crate::recovery::{RecoveryContext, RecoveryMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A supported MRZ layout.
///
/// Variants are declared in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MrzFormat {
    /// Senegalese ID card, 3×30, `I<SEN`.
    SenegalId,
    /// Burkina Faso ID card, 3×30, `I<BFA`.
    BurkinaFasoId,
    /// Cameroonian ID card, 3×30, `IDCMR`.
    CameroonId,
    /// Dominican Republic ID card, 3×30, `IDDOM`.
    DominicanRepublicId,
    /// Salvadoran ID card, 3×30, `IDSLV`.
    ElSalvadorId,
    /// Guatemalan ID card, 3×30, `IDGTM`.
    GuatemalaId,
    /// Iraqi ID card, 3×30, `IDIRQ`.
    IraqId,
    /// ICAO TD1 card, 3×30.
    MrtdTd1,
    /// French national ID card, 2×36, `IDFRA`.
    FrenchId,
    /// Type B visa, 2×36, first character `V`.
    MrvVisaB,
    /// ICAO TD2 card, 2×36.
    MrtdTd2,
    /// Slovak ID card, 2×34.
    SlovakId234,
    /// Type A visa, 2×44, first character `V`.
    MrvVisaA,
    /// ICAO TD3 passport, 2×44.
    Passport,
}

/// Field layout used to decode and encode a format.
///
/// Several formats share one layout; the national ID cards on the TD1 grid
/// all use [`RecordKind::Td1`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// TD3 passport layout with a personal number.
    Passport,
    /// TD1 three-row card layout.
    Td1,
    /// TD1 layout with a 17-character Senegalese document number.
    SenegalId,
    /// TD2 two-row card layout.
    Td2,
    /// TD2-like layout 34 columns wide.
    SlovakId,
    /// 44-column visa layout.
    MrvA,
    /// 36-column visa layout.
    MrvB,
    /// French ID card layout.
    FrenchId,
}

/// One registry entry.
#[derive(Debug, Clone, Copy)]
pub struct FormatSpec {
    /// The format this entry describes.
    pub format: MrzFormat,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns per row.
    pub columns: usize,
    /// Required prefix of the first row, if any.
    pub prefix: Option<&'static str>,
    /// Layout used for decoding and encoding.
    pub kind: RecordKind,
    /// Document code family the format requires, if restricted.
    pub code: Option<MrzDocumentCode>,
}

const fn entry(
    format: MrzFormat,
    rows: usize,
    columns: usize,
    prefix: Option<&'static str>,
    kind: RecordKind,
    code: Option<MrzDocumentCode>,
) -> FormatSpec {
    FormatSpec {
        format,
        rows,
        columns,
        prefix,
        kind,
        code,
    }
}

const ID: Option<MrzDocumentCode> = Some(MrzDocumentCode::TypeI);
const VISA: Option<MrzDocumentCode> = Some(MrzDocumentCode::TypeV);

/// Every supported format in detection order.
pub static REGISTRY: &[FormatSpec] = &[
    entry(MrzFormat::SenegalId, 3, 30, Some("I<SEN"), RecordKind::SenegalId, ID),
    entry(MrzFormat::BurkinaFasoId, 3, 30, Some("I<BFA"), RecordKind::Td1, ID),
    entry(MrzFormat::CameroonId, 3, 30, Some("IDCMR"), RecordKind::Td1, ID),
    entry(MrzFormat::DominicanRepublicId, 3, 30, Some("IDDOM"), RecordKind::Td1, ID),
    entry(MrzFormat::ElSalvadorId, 3, 30, Some("IDSLV"), RecordKind::Td1, ID),
    entry(MrzFormat::GuatemalaId, 3, 30, Some("IDGTM"), RecordKind::Td1, ID),
    entry(MrzFormat::IraqId, 3, 30, Some("IDIRQ"), RecordKind::Td1, ID),
    entry(MrzFormat::MrtdTd1, 3, 30, None, RecordKind::Td1, None),
    entry(MrzFormat::FrenchId, 2, 36, Some("IDFRA"), RecordKind::FrenchId, ID),
    entry(MrzFormat::MrvVisaB, 2, 36, Some("V"), RecordKind::MrvB, VISA),
    entry(MrzFormat::MrtdTd2, 2, 36, None, RecordKind::Td2, None),
    entry(MrzFormat::SlovakId234, 2, 34, None, RecordKind::SlovakId, None),
    entry(MrzFormat::MrvVisaA, 2, 44, Some("V"), RecordKind::MrvA, VISA),
    entry(MrzFormat::Passport, 2, 44, None, RecordKind::Passport, None),
];

impl FormatSpec {
    /// Whether `rows` has this entry's dimensions and prefix.
    #[must_use]
    pub fn matches(&self, rows: &[String]) -> bool {
        if rows.len() != self.rows {
            return false;
        }
        let Some(first) = rows.first() else {
            return false;
        };
        first.chars().count() == self.columns
            && self.prefix.map_or(true, |prefix| first.starts_with(prefix))
    }
}

impl MrzFormat {
    /// The registry entry for this format.
    #[must_use]
    pub fn spec(self) -> &'static FormatSpec {
        &REGISTRY[self as usize]
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(self) -> usize {
        self.spec().rows
    }

    /// Number of columns per row.
    #[must_use]
    pub fn columns(self) -> usize {
        self.spec().columns
    }

    /// Layout used for decoding and encoding.
    #[must_use]
    pub fn kind(self) -> RecordKind {
        self.spec().kind
    }

    /// Whether the given rows are in this format.
    #[must_use]
    pub fn is_format_of(self, rows: &[String]) -> bool {
        self.spec().matches(rows)
    }

    /// The `(code1, code2, issuing country)` a new record of this format starts with.
    ///
    /// Formats with a five-character prefix take all three from it; visas
    /// start as `V<`, passports as `P<` and other cards as `I<`.
    #[must_use]
    pub fn default_header(self) -> (char, char, &'static str) {
        let spec = self.spec();
        match spec.prefix {
            Some(prefix) if prefix.len() == 5 => {
                let mut chars = prefix.chars();
                let code1 = chars.next().unwrap_or('I');
                let code2 = chars.next().unwrap_or('<');
                (code1, code2, &prefix[2..])
            },
            _ => match spec.kind {
                RecordKind::Passport => ('P', '<', ""),
                RecordKind::MrvA | RecordKind::MrvB => ('V', '<', ""),
                _ => ('I', '<', ""),
            },
        }
    }

    /// Detect the format of `mrz` in strict mode.
    ///
    /// # Errors
    ///
    /// See [`MrzFormat::detect_with_mode`].
    ///
    /// # Examples
    ///
    /// ```
    /// use mrzc::MrzFormat;
    ///
    /// let mrz = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
    ///            L898902C36UTO7408122F1204159ZE184226B<<<<<10";
    /// assert_eq!(MrzFormat::detect(mrz).unwrap(), MrzFormat::Passport);
    /// ```
    pub fn detect(mrz: &str) -> Result<Self> {
        MrzFormat::detect_with_mode(mrz, RecoveryMode::Strict)
    }

    /// Detect the format of `mrz`.
    ///
    /// # Errors
    ///
    /// Returns [`MrzError::RowLengthMismatch`] in strict mode when rows differ
    /// in length, and [`MrzError::UnknownFormat`] when no registry entry
    /// matches.
    pub fn detect_with_mode(mrz: &str, mode: RecoveryMode) -> Result<Self> {
        let mut ctx = RecoveryContext::new(mode);
        let rows = split_rows(mrz, &mut ctx)?;
        detect_rows(&rows, mrz)
    }

    fn name(self) -> &'static str {
        match self {
            MrzFormat::SenegalId => "SENEGAL_ID",
            MrzFormat::BurkinaFasoId => "BURKINA_FASO_ID",
            MrzFormat::CameroonId => "CAMEROON_ID",
            MrzFormat::DominicanRepublicId => "DOMINICAN_REPUBLIC_ID",
            MrzFormat::ElSalvadorId => "EL_SALVADOR_ID",
            MrzFormat::GuatemalaId => "GUATEMALA_ID",
            MrzFormat::IraqId => "IRAQ_ID",
            MrzFormat::MrtdTd1 => "MRTD_TD1",
            MrzFormat::FrenchId => "FRENCH_ID",
            MrzFormat::MrvVisaB => "MRV_VISA_B",
            MrzFormat::MrtdTd2 => "MRTD_TD2",
            MrzFormat::SlovakId234 => "SLOVAK_ID_234",
            MrzFormat::MrvVisaA => "MRV_VISA_A",
            MrzFormat::Passport => "PASSPORT",
        }
    }
}

impl fmt::Display for MrzFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Split MRZ text into rows and reconcile their lengths.
///
/// A single trailing empty row is ignored and a `\r` before each newline is
/// dropped.
pub(crate) fn split_rows(mrz: &str, ctx: &mut RecoveryContext) -> Result<Vec<String>> {
    let text = mrz.strip_suffix('\n').unwrap_or(mrz);
    let mut rows: Vec<String> = text
        .split('\n')
        .map(|row| row.strip_suffix('\r').unwrap_or(row).to_string())
        .collect();
    ctx.normalize_rows(&mut rows, mrz)?;
    Ok(rows)
}

/// Walk the registry in order and return the first matching format.
pub(crate) fn detect_rows(rows: &[String], mrz: &str) -> Result<MrzFormat> {
    match REGISTRY.iter().find(|spec| spec.matches(rows)) {
        Some(spec) => {
            debug!(format = %spec.format, "Detected MRZ format");
            Ok(spec.format)
        },
        None => Err(MrzError::UnknownFormat {
            rows: rows.len(),
            columns: rows.first().map_or(0, |row| row.chars().count()),
            mrz: mrz.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(rows: &[String]) -> String {
        rows.join("\n")
    }

    fn filler_rows(first: &str, rows: usize, columns: usize) -> Vec<String> {
        let mut out = vec![format!("{first:<<columns$}")];
        for _ in 1..rows {
            out.push("<".repeat(columns));
        }
        out
    }

    #[test]
    fn test_registry_is_in_declaration_order() {
        for (index, spec) in REGISTRY.iter().enumerate() {
            assert_eq!(spec.format as usize, index, "{}", spec.format);
            assert_eq!(spec.format.spec().format, spec.format);
        }
        assert_eq!(REGISTRY.len(), 14);
    }

    #[test]
    fn test_national_prefixes_win_over_td1() {
        let cases = [
            ("I<SEN", MrzFormat::SenegalId),
            ("I<BFA", MrzFormat::BurkinaFasoId),
            ("IDCMR", MrzFormat::CameroonId),
            ("IDDOM", MrzFormat::DominicanRepublicId),
            ("IDSLV", MrzFormat::ElSalvadorId),
            ("IDGTM", MrzFormat::GuatemalaId),
            ("IDIRQ", MrzFormat::IraqId),
            ("I<UTO", MrzFormat::MrtdTd1),
        ];
        for (prefix, expected) in cases {
            let rows = filler_rows(prefix, 3, 30);
            assert_eq!(MrzFormat::detect(&text(&rows)).unwrap(), expected, "{prefix}");
        }
    }

    #[test]
    fn test_two_row_precedence() {
        let cases = [
            ("IDFRA", 36, MrzFormat::FrenchId),
            ("V<UTO", 36, MrzFormat::MrvVisaB),
            ("I<UTO", 36, MrzFormat::MrtdTd2),
            ("I<SVK", 34, MrzFormat::SlovakId234),
            ("V<UTO", 44, MrzFormat::MrvVisaA),
            ("P<UTO", 44, MrzFormat::Passport),
        ];
        for (prefix, columns, expected) in cases {
            let rows = filler_rows(prefix, 2, columns);
            assert_eq!(MrzFormat::detect(&text(&rows)).unwrap(), expected, "{prefix}");
        }
    }

    #[test]
    fn test_unknown_dimensions() {
        let rows = filler_rows("P<UTO", 4, 20);
        match MrzFormat::detect(&text(&rows)).unwrap_err() {
            MrzError::UnknownFormat { rows, columns, .. } => {
                assert_eq!((rows, columns), (4, 20));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_trailing_newline_and_carriage_returns() {
        let rows = filler_rows("P<UTO", 2, 44);
        let crlf = format!("{}\r\n{}\r\n", rows[0], rows[1]);
        assert_eq!(MrzFormat::detect(&crlf).unwrap(), MrzFormat::Passport);
    }

    #[test]
    fn test_row_length_mismatch_strict_and_lenient() {
        let mut rows = filler_rows("I<UTO", 2, 36);
        rows[1].pop();
        let mrz = text(&rows);
        assert!(matches!(
            MrzFormat::detect(&mrz),
            Err(MrzError::RowLengthMismatch {
                row: 1,
                expected: 36,
                actual: 35,
                ..
            })
        ));
        assert_eq!(
            MrzFormat::detect_with_mode(&mrz, RecoveryMode::Lenient).unwrap(),
            MrzFormat::MrtdTd2
        );
    }

    #[test]
    fn test_default_header() {
        assert_eq!(MrzFormat::SenegalId.default_header(), ('I', '<', "SEN"));
        assert_eq!(MrzFormat::FrenchId.default_header(), ('I', 'D', "FRA"));
        assert_eq!(MrzFormat::MrvVisaA.default_header(), ('V', '<', ""));
        assert_eq!(MrzFormat::Passport.default_header(), ('P', '<', ""));
        assert_eq!(MrzFormat::MrtdTd2.default_header(), ('I', '<', ""));
    }

    #[test]
    fn test_format_display() {
        assert_eq!(MrzFormat::SlovakId234.to_string(), "SLOVAK_ID_234");
        assert_eq!(MrzFormat::MrtdTd1.rows(), 3);
        assert_eq!(MrzFormat::MrtdTd1.columns(), 30);
        assert_eq!(MrzFormat::IraqId.kind(), RecordKind::Td1);
    }
}
