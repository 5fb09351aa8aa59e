mod error;
mod exclusions;
mod model;
mod options;
mod pages;
mod pdf_text;
mod roster;
mod warning;
mod xlsx_out;

use std::path::Path;

use crate::pdf_text::{read_roster_text, read_roster_text_from_bytes};
use crate::warning::WarningCode;

pub use error::ExtractError;
pub use exclusions::ExclusionSet;
pub use model::{Roster, RosterReport};
pub use options::ExtractOptions;
pub use pages::PageSelection;
pub use roster::parse_roster;
pub use warning::{ExtractWarning, WarningCode as ExtractWarningCode};
pub use xlsx_out::{write_xlsx, write_xlsx_to_bytes};

fn build_report(roster: &Roster, mut warnings: Vec<ExtractWarning>) -> RosterReport {
    if roster.is_misaligned() {
        warnings.push(ExtractWarning::new(
            WarningCode::ColumnLengthMismatch,
            "extracted columns have unequal lengths; rows may not line up person-for-person",
        ));
    }

    RosterReport {
        row_count: roster.row_count(),
        first_name_count: roster.first_names.len(),
        last_name_count: roster.last_names.len(),
        email_count: roster.emails.len(),
        room_count: roster.rooms.len(),
        warnings,
    }
}

/// Runs the whole pipeline: read the selected pages, parse the roster, and
/// write the formatted workbook. Fails with
/// [`ExtractError::NoExtractableText`] before creating the output file when
/// every selected page came back blank.
pub fn extract_roster_to_xlsx(
    input_pdf: &Path,
    output_xlsx: &Path,
    options: &ExtractOptions,
) -> Result<RosterReport, ExtractError> {
    let (text, warnings) = read_roster_text(input_pdf, options.pages.as_ref())?;
    let Some(text) = text else {
        return Err(ExtractError::NoExtractableText);
    };

    let roster = parse_roster(&text, &options.exclusions);
    xlsx_out::write_xlsx(output_xlsx, &roster)?;

    Ok(build_report(&roster, warnings))
}

/// Extraction and parsing without the spreadsheet write, for in-memory
/// documents. Pair with [`write_xlsx_to_bytes`] to produce a workbook.
pub fn extract_roster_from_bytes(
    input_pdf: &[u8],
    options: &ExtractOptions,
) -> Result<(Roster, RosterReport), ExtractError> {
    let (text, warnings) = read_roster_text_from_bytes(input_pdf, options.pages.as_ref())?;
    let Some(text) = text else {
        return Err(ExtractError::NoExtractableText);
    };

    let roster = parse_roster(&text, &options.exclusions);
    let report = build_report(&roster, warnings);
    Ok((roster, report))
}

#[cfg(test)]
mod tests {
    use super::{Roster, build_report};
    use crate::warning::WarningCode;

    #[test]
    fn report_flags_misaligned_columns() {
        let roster = Roster {
            first_names: vec!["Jane".to_string()],
            last_names: vec!["Doe".to_string()],
            emails: Vec::new(),
            rooms: Vec::new(),
        };

        let report = build_report(&roster, Vec::new());
        assert_eq!(report.row_count, 1);
        assert_eq!(report.email_count, 0);
        assert!(
            report
                .warnings
                .iter()
                .any(|warning| warning.code == WarningCode::ColumnLengthMismatch)
        );
    }

    #[test]
    fn report_is_quiet_for_aligned_columns() {
        let roster = Roster {
            first_names: vec!["Jane".to_string()],
            last_names: vec!["Doe".to_string()],
            emails: vec!["jane@example.edu".to_string()],
            rooms: vec!["MCUT-123".to_string()],
        };

        let report = build_report(&roster, Vec::new());
        assert!(report.warnings.is_empty());
    }
}
