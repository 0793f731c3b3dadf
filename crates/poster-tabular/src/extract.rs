use poster_core::{FieldMapping, FieldValue, PosterData};
use tracing::debug;

use crate::table::Table;

/// Pull poster fields out of a parsed table.
///
/// For each mapping entry, if the source column exists, the first
/// non-missing cell is stringified and assigned to the field. Fields whose
/// column is absent or entirely missing are omitted from the result — this
/// is a best-effort contract, not an error.
pub fn extract_fields(table: &Table, mapping: &FieldMapping) -> PosterData {
    let mut result = PosterData::new();

    for (field, column_name) in mapping {
        let Some(column) = table.column(column_name) else {
            debug!(field = %field, column = %column_name, "mapped column absent, skipping");
            continue;
        };
        if let Some(cell) = column.cells.iter().find(|c| !c.is_missing()) {
            result.insert(field.clone(), FieldValue::Text(cell.to_text()));
        }
    }

    result
}
