use indexmap::IndexMap;
use tracing::debug;

use crate::error::DocxError;
use crate::paragraph::DocParagraph;

/// Document sections keyed by heading text, in document order.
pub type Sections = IndexMap<String, Vec<String>>;

const MAX_HEADING_LEN: usize = 100;

/// Heading heuristic. A paragraph is a heading if ANY of:
/// - its style id begins with `Heading`;
/// - at least one of its runs is bold;
/// - its trimmed text is non-empty, shorter than 100 characters, does not
///   end with a period, and is entirely uppercase.
pub fn is_heading(para: &DocParagraph) -> bool {
    if para.style_name.starts_with("Heading") {
        return true;
    }
    if para.runs_bold.iter().any(|&b| b) {
        return true;
    }
    let text = para.text.trim();
    let len = text.chars().count();
    len > 0
        && len < MAX_HEADING_LEN
        && !text.ends_with('.')
        && text.chars().any(|c| c.is_alphabetic())
        && text == text.to_uppercase()
}

/// Partition a paragraph sequence into named sections.
///
/// Empty paragraphs are skipped entirely. Body text before the first
/// detected heading is dropped. A later heading with text identical to an
/// earlier one resumes that section, appending to its paragraph list.
/// A document yielding zero sections is a structural error.
pub fn segment(paragraphs: &[DocParagraph]) -> Result<Sections, DocxError> {
    let mut sections = Sections::new();
    let mut current: Option<String> = None;

    for para in paragraphs {
        let text = para.text.trim();
        if text.is_empty() {
            continue;
        }

        if is_heading(para) {
            sections.entry(text.to_string()).or_default();
            current = Some(text.to_string());
        } else if let Some(heading) = &current {
            if let Some(body) = sections.get_mut(heading) {
                body.push(text.to_string());
            }
        }
    }

    if sections.is_empty() {
        return Err(DocxError::NoHeadings);
    }

    debug!(sections = sections.len(), "segmented document");

    Ok(sections)
}
