use indexmap::IndexMap;
use serde::Serialize;

/// A single extracted value in the poster record.
///
/// This is the sanitizer's recursion domain. `serde_json::Value` cannot
/// represent NaN or ±∞, so extracted values live in this tree until they
/// have been sanitized, and only then get serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
    Map(IndexMap<String, FieldValue>),
}

impl FieldValue {
    /// Render the value as cell text for the Excel export.
    /// `Null` renders as an empty string (empty cell).
    pub fn to_cell_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items
                .iter()
                .map(FieldValue::to_cell_text)
                .collect::<Vec<_>>()
                .join(", "),
            FieldValue::Map(map) => map
                .iter()
                .map(|(k, v)| format!("{k}: {}", v.to_cell_text()))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// Integral floats print without a trailing `.0`, matching how
/// spreadsheet cells stringify.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Recursively normalize a value: NaN and ±∞ become `Null`, everything
/// else passes through unchanged. Idempotent.
pub fn sanitize(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Number(n) if !n.is_finite() => FieldValue::Null,
        FieldValue::List(items) => {
            FieldValue::List(items.into_iter().map(sanitize).collect())
        }
        FieldValue::Map(map) => {
            FieldValue::Map(map.into_iter().map(|(k, v)| (k, sanitize(v))).collect())
        }
        other => other,
    }
}
