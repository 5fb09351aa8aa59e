use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::ExtractError;
use crate::model::Roster;

const SHEET_NAME: &str = "Roster";
const HEADERS: [&str; 4] = ["First Name", "Last Name", "Email", "Room Number"];
const COLUMN_WIDTHS: [f64; 4] = [15.0, 15.0, 30.0, 12.0];

fn fill_worksheet(worksheet: &mut Worksheet, roster: &Roster) -> Result<(), ExtractError> {
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in (0_u16..).zip(HEADERS) {
        worksheet.write_string(0, col, header)?;
    }
    for (col, width) in (0_u16..).zip(COLUMN_WIDTHS) {
        worksheet.set_column_width(col, width)?;
    }

    // Columns of unequal length are right-padded: unwritten cells stay blank.
    let columns = [
        &roster.first_names,
        &roster.last_names,
        &roster.emails,
        &roster.rooms,
    ];
    for (col, values) in (0_u16..).zip(columns) {
        for (row, value) in (1_u32..).zip(values) {
            worksheet.write_string(row, col, value)?;
        }
    }

    Ok(())
}

/// Writes the roster to `path` as a single-sheet workbook, overwriting any
/// existing file.
pub fn write_xlsx(path: &Path, roster: &Roster) -> Result<(), ExtractError> {
    let mut workbook = Workbook::new();
    fill_worksheet(workbook.add_worksheet(), roster)?;
    workbook.save(path)?;
    Ok(())
}

/// In-memory variant of [`write_xlsx`] for callers that manage their own I/O.
pub fn write_xlsx_to_bytes(roster: &Roster) -> Result<Vec<u8>, ExtractError> {
    let mut workbook = Workbook::new();
    fill_worksheet(workbook.add_worksheet(), roster)?;
    Ok(workbook.save_to_buffer()?)
}
