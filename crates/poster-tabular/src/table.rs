use std::io::Cursor;

use calamine::{Data, Reader};
use tracing::debug;

use crate::error::TabularError;

/// A single scalar cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// A cell that contributes no value: empty, whitespace-only text, or a
    /// non-finite number.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => !n.is_finite(),
            Cell::Bool(_) => false,
        }
    }

    /// Stringify the cell the way a spreadsheet displays it (integral
    /// floats without a trailing `.0`).
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Cell::Bool(b) => b.to_string(),
        }
    }
}

/// A named column of cells, in source order.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

/// An ordered collection of named columns parsed from spreadsheet or CSV
/// bytes. Immutable once parsed.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Table { columns }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Declared format of the incoming bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// XLSX or XLS workbook.
    Spreadsheet,
    /// Delimited text.
    Csv,
}

/// Per-request parse options.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Sheet to read from a workbook. `None` selects the first sheet.
    pub sheet_name: Option<String>,
    /// CSV field delimiter.
    pub delimiter: u8,
    /// CSV text encoding label (WHATWG), e.g. `utf-8`, `windows-1251`.
    pub encoding: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            sheet_name: None,
            delimiter: b',',
            encoding: "utf-8".to_string(),
        }
    }
}

/// Parse raw bytes into a [`Table`] according to the declared kind.
pub fn read_table(
    bytes: &[u8],
    kind: TableKind,
    options: &ReadOptions,
) -> Result<Table, TabularError> {
    match kind {
        TableKind::Spreadsheet => read_spreadsheet(bytes, options.sheet_name.as_deref()),
        TableKind::Csv => read_csv(bytes, options.delimiter, &options.encoding),
    }
}

fn read_spreadsheet(bytes: &[u8], sheet_name: Option<&str>) -> Result<Table, TabularError> {
    let cursor = Cursor::new(bytes);
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| TabularError::Parse(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    if sheet_names.is_empty() {
        return Err(TabularError::NoSheets);
    }

    let target = match sheet_name {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(TabularError::SheetNotFound(name.to_string()));
            }
            name.to_string()
        }
        None => sheet_names[0].clone(),
    };

    let range = workbook
        .worksheet_range(&target)
        .map_err(|e| TabularError::Parse(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let mut columns: Vec<Column> = header
        .iter()
        .map(|cell| Column {
            name: cell.to_string().trim().to_string(),
            cells: Vec::new(),
        })
        .collect();

    for row in rows {
        for (idx, column) in columns.iter_mut().enumerate() {
            let cell = row.get(idx).map(convert_cell).unwrap_or(Cell::Empty);
            column.cells.push(cell);
        }
    }

    // Headerless trailing columns carry no name and cannot be addressed.
    columns.retain(|c| !c.name.is_empty());

    debug!(sheet = %target, columns = columns.len(), "parsed spreadsheet");

    Ok(Table::new(columns))
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Error(_) => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}

fn read_csv(bytes: &[u8], delimiter: u8, encoding: &str) -> Result<Table, TabularError> {
    let codec = encoding_rs::Encoding::for_label(encoding.as_bytes())
        .ok_or_else(|| TabularError::UnknownEncoding(encoding.to_string()))?;
    let (decoded, _, had_errors) = codec.decode(bytes);
    if had_errors {
        return Err(TabularError::Parse(format!(
            "input is not valid {encoding}"
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| TabularError::Parse(e.to_string()))?
        .clone();

    let mut columns: Vec<Column> = headers
        .iter()
        .map(|name| Column {
            name: name.trim().to_string(),
            cells: Vec::new(),
        })
        .collect();

    for record in reader.records() {
        let record = record.map_err(|e| TabularError::Parse(e.to_string()))?;
        for (idx, column) in columns.iter_mut().enumerate() {
            let cell = match record.get(idx) {
                Some(value) if !value.is_empty() => Cell::Text(value.to_string()),
                _ => Cell::Empty,
            };
            column.cells.push(cell);
        }
    }

    columns.retain(|c| !c.name.is_empty());

    debug!(columns = columns.len(), "parsed csv");

    Ok(Table::new(columns))
}
