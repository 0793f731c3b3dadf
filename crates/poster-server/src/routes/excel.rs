use axum::Json;
use axum::extract::Multipart;
use poster_core::{FieldMapping, PosterData, mapping::sanitize_poster_data};
use poster_tabular::{ReadOptions, Table, TableKind, extract_fields, read_table, resolve_mapping};
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::routes::upload::{extension, resolve_source};

#[derive(Serialize)]
pub struct ExcelResponse {
    pub poster_data: PosterData,
}

#[derive(Default)]
struct ExcelForm {
    upload: Option<(String, Vec<u8>)>,
    path: Option<String>,
    mapping: Option<String>,
    language: Option<String>,
    template: Option<(String, Vec<u8>)>,
    template_sheet_name: Option<String>,
    sheet_name: Option<String>,
    delimiter: Option<String>,
    encoding: Option<String>,
}

/// `POST /process/excel` — extract poster fields from an XLSX/XLS/CSV
/// file using a resolved field→column mapping.
pub async fn process_excel(
    mut multipart: Multipart,
) -> Result<Json<ExcelResponse>, ApiError> {
    let form = read_form(&mut multipart).await?;

    let document = resolve_source(form.upload, form.path).await?;
    let kind = table_kind(&document.filename)?;

    let explicit = form
        .mapping
        .as_deref()
        .map(parse_mapping)
        .transpose()?;

    let template = form
        .template
        .map(|(name, bytes)| read_template(&name, &bytes, form.template_sheet_name.as_deref()))
        .transpose()?;

    let mapping = resolve_mapping(
        explicit.as_ref(),
        form.language.as_deref(),
        template.as_ref(),
    )?;

    let options = ReadOptions {
        sheet_name: form.sheet_name,
        delimiter: parse_delimiter(form.delimiter.as_deref())?,
        encoding: form.encoding.unwrap_or_else(|| "utf-8".to_string()),
    };

    let table = read_table(&document.bytes, kind, &options)?;
    let poster_data = sanitize_poster_data(extract_fields(&table, &mapping));

    info!(
        file = %document.filename,
        fields = poster_data.len(),
        "processed tabular document"
    );

    Ok(Json(ExcelResponse { poster_data }))
}

async fn read_form(multipart: &mut Multipart) -> Result<ExcelForm, ApiError> {
    let mut form = ExcelForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                form.upload = Some((filename, bytes.to_vec()));
            }
            "template" => {
                let filename = field.file_name().unwrap_or("template").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                form.template = Some((filename, bytes.to_vec()));
            }
            other => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                match other {
                    "path" => form.path = Some(value),
                    "mapping" => form.mapping = Some(value),
                    "language" => form.language = Some(value),
                    "template_sheet_name" => form.template_sheet_name = Some(value),
                    "sheet_name" => form.sheet_name = Some(value),
                    "delimiter" => form.delimiter = Some(value),
                    "encoding" => form.encoding = Some(value),
                    _ => {}
                }
            }
        }
    }

    Ok(form)
}

fn table_kind(filename: &str) -> Result<TableKind, ApiError> {
    match extension(filename).as_str() {
        "xlsx" | "xls" => Ok(TableKind::Spreadsheet),
        "csv" => Ok(TableKind::Csv),
        other => Err(ApiError::BadRequest(format!(
            "unsupported file format: {other}"
        ))),
    }
}

fn parse_mapping(raw: &str) -> Result<FieldMapping, ApiError> {
    serde_json::from_str(raw)
        .map_err(|e| ApiError::BadRequest(format!("invalid mapping JSON: {e}")))
}

/// The template's own sheet selection is independent of the target file's
/// `sheet_name`.
fn read_template(
    filename: &str,
    bytes: &[u8],
    sheet_name: Option<&str>,
) -> Result<Table, ApiError> {
    let kind = table_kind(filename)?;
    let options = ReadOptions {
        sheet_name: sheet_name.map(str::to_string),
        ..ReadOptions::default()
    };
    Ok(read_table(bytes, kind, &options)?)
}

fn parse_delimiter(raw: Option<&str>) -> Result<u8, ApiError> {
    match raw {
        None | Some("") => Ok(b','),
        Some(s) if s.len() == 1 => Ok(s.as_bytes()[0]),
        Some(s) => Err(ApiError::BadRequest(format!(
            "delimiter must be a single character, got {s:?}"
        ))),
    }
}
