use poster_core::FieldMapping;
use tracing::debug;

use crate::error::TabularError;
use crate::table::Table;

/// Decide which field→column mapping applies to a request.
///
/// Precedence, highest first:
/// 1. a template table — identity over its column names, so an uploaded
///    exemplar spreadsheet's headers define exactly which columns to pull;
/// 2. an explicit mapping, used verbatim;
/// 3. a language preset (`ru`, `en`, `de`); unknown codes yield nothing.
///
/// An empty outcome is a configuration error: the caller must supply at
/// least one usable source.
pub fn resolve_mapping(
    explicit: Option<&FieldMapping>,
    language: Option<&str>,
    template: Option<&Table>,
) -> Result<FieldMapping, TabularError> {
    if let Some(table) = template {
        let mapping: FieldMapping = table
            .column_names()
            .map(|name| (name.to_string(), name.to_string()))
            .collect();
        if !mapping.is_empty() {
            debug!(fields = mapping.len(), "mapping resolved from template columns");
            return Ok(mapping);
        }
    }

    if let Some(mapping) = explicit {
        if !mapping.is_empty() {
            debug!(fields = mapping.len(), "mapping resolved from explicit request");
            return Ok(mapping.clone());
        }
    }

    if let Some(code) = language {
        let mapping = language_preset(code);
        if !mapping.is_empty() {
            debug!(language = %code, fields = mapping.len(), "mapping resolved from language preset");
            return Ok(mapping);
        }
    }

    Err(TabularError::NoMapping)
}

/// Fixed per-language poster field presets, mapping poster fields to the
/// localized column names conventionally used in submission spreadsheets.
pub fn language_preset(code: &str) -> FieldMapping {
    let pairs: &[(&str, &str)] = match code {
        "en" => &[
            ("Project Title", "Title"),
            ("Authors", "Authors"),
            ("Affiliation", "Affiliation"),
            ("Abstract", "Abstract"),
            ("Keywords", "Keywords"),
            ("Methods", "Methods"),
            ("Results", "Results"),
            ("Conclusion", "Conclusion"),
            ("Contact", "Contact"),
        ],
        "ru" => &[
            ("Project Title", "Название"),
            ("Authors", "Авторы"),
            ("Affiliation", "Организация"),
            ("Abstract", "Аннотация"),
            ("Keywords", "Ключевые слова"),
            ("Methods", "Методы"),
            ("Results", "Результаты"),
            ("Conclusion", "Заключение"),
            ("Contact", "Контакты"),
        ],
        "de" => &[
            ("Project Title", "Titel"),
            ("Authors", "Autoren"),
            ("Affiliation", "Einrichtung"),
            ("Abstract", "Zusammenfassung"),
            ("Keywords", "Schlagwörter"),
            ("Methods", "Methoden"),
            ("Results", "Ergebnisse"),
            ("Conclusion", "Fazit"),
            ("Contact", "Kontakt"),
        ],
        _ => &[],
    };

    pairs
        .iter()
        .map(|(field, column)| (field.to_string(), column.to_string()))
        .collect()
}
