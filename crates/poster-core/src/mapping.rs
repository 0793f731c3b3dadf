use indexmap::IndexMap;

use crate::value::FieldValue;

/// Poster-field name → source key (table column name or document heading).
///
/// Built fresh per request; insertion order is significant — it determines
/// the column order of the Excel export.
pub type FieldMapping = IndexMap<String, String>;

/// Poster-field name → extracted value. The terminal artifact returned to
/// the caller and fed to the Excel exporter.
pub type PosterData = IndexMap<String, FieldValue>;

/// Sanitize every value in a poster record in place.
pub fn sanitize_poster_data(data: PosterData) -> PosterData {
    data.into_iter()
        .map(|(k, v)| (k, crate::value::sanitize(v)))
        .collect()
}
