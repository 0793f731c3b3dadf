use indexmap::IndexMap;
use poster_core::{FieldValue, PosterData};
use tracing::debug;

/// Candidate heading lists per poster field, e.g.
/// `{"Results": ["RESULTS", "Findings"]}`.
pub type SectionMapping = IndexMap<String, Vec<String>>;

/// Mapping-based field resolution for documents.
///
/// For each poster field, the first candidate heading that exists among
/// the (already summarized) sections supplies the value; fields with no
/// matching heading are omitted, mirroring the tabular best-effort
/// contract. The default mode — no mapping supplied — keeps sections
/// keyed verbatim by heading; this mode is opt-in per request.
pub fn resolve_section_fields(
    sections: &IndexMap<String, String>,
    mapping: &SectionMapping,
) -> PosterData {
    let mut result = PosterData::new();

    for (field, candidates) in mapping {
        let hit = candidates
            .iter()
            .find_map(|heading| sections.get(heading).map(|text| (heading, text)));
        match hit {
            Some((heading, text)) => {
                result.insert(field.clone(), FieldValue::Text(text.clone()));
                debug!(field = %field, heading = %heading, "section field resolved");
            }
            None => {
                debug!(field = %field, "no candidate heading present, skipping");
            }
        }
    }

    result
}
