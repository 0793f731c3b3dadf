use poster_core::{FieldValue, PosterData};
use rust_xlsxwriter::Workbook;

use crate::error::ExportError;

/// Serialize poster data into a single-row spreadsheet: one column per
/// field in mapping order, a header row of field names, and one value
/// row. Null values render as empty cells. Deterministic for identical
/// input ordering.
pub fn export(data: &PosterData) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, (field, value)) in data.iter().enumerate() {
        let col = col as u16;
        sheet.write_string(0, col, field.as_str())?;
        if !matches!(value, FieldValue::Null) {
            sheet.write_string(1, col, value.to_cell_text())?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
