use axum::Json;
use axum::extract::{Multipart, State};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use poster_core::{FieldValue, PosterData, mapping::sanitize_poster_data};
use poster_docx::fields::SectionMapping;
use poster_docx::{read_paragraphs, resolve_section_fields, segment};
use poster_summarize::join_sections;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::routes::upload::{extension, resolve_source};
use crate::state::AppState;

const DEFAULT_MAX_CHARS: usize = 1000;

#[derive(Serialize)]
pub struct DocxResponse {
    pub poster_data: PosterData,
    pub excel_data: ExcelData,
}

#[derive(Serialize)]
pub struct ExcelData {
    pub filename: String,
    pub content_base64: String,
}

#[derive(Default)]
struct DocxForm {
    upload: Option<(String, Vec<u8>)>,
    path: Option<String>,
    max_chars: Option<String>,
    summarize: Option<String>,
    section_mapping: Option<String>,
}

/// `POST /process/docx` — segment a Word document by headings, condense
/// long sections, and return the poster record plus its Excel export.
pub async fn process_docx(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DocxResponse>, ApiError> {
    let form = read_form(&mut multipart).await?;

    let document = resolve_source(form.upload, form.path).await?;
    if extension(&document.filename) != "docx" {
        return Err(ApiError::BadRequest(
            "only .docx files are supported".to_string(),
        ));
    }

    let max_chars = match form.max_chars.as_deref() {
        None | Some("") => DEFAULT_MAX_CHARS,
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("invalid max_chars: {raw:?}")))?,
    };
    let summarize = match form.summarize.as_deref() {
        None | Some("") => true,
        Some(raw) => parse_bool(raw)?,
    };
    let section_mapping: Option<SectionMapping> = form
        .section_mapping
        .as_deref()
        .map(|raw| {
            serde_json::from_str(raw)
                .map_err(|e| ApiError::BadRequest(format!("invalid section_mapping JSON: {e}")))
        })
        .transpose()?;

    let paragraphs = read_paragraphs(&document.bytes)?;
    let sections = segment(&paragraphs)?;

    let condensed = if summarize {
        state
            .summarizer
            .summarize_sections(&sections, max_chars)
            .await?
    } else {
        join_sections(&sections)
    };

    // Two supported field modes: mapping-based resolution when a section
    // mapping is supplied, sections keyed verbatim by heading otherwise.
    let poster_data = match &section_mapping {
        Some(mapping) => resolve_section_fields(&condensed, mapping),
        None => condensed
            .into_iter()
            .map(|(heading, text)| (heading, FieldValue::Text(text)))
            .collect(),
    };
    let poster_data = sanitize_poster_data(poster_data);

    let excel_bytes = poster_export::export(&poster_data)?;
    let excel_filename = document.filename.replace(".docx", ".xlsx");

    info!(
        file = %document.filename,
        fields = poster_data.len(),
        summarize,
        "processed word document"
    );

    Ok(Json(DocxResponse {
        poster_data,
        excel_data: ExcelData {
            filename: excel_filename,
            content_base64: BASE64.encode(&excel_bytes),
        },
    }))
}

async fn read_form(multipart: &mut Multipart) -> Result<DocxForm, ApiError> {
    let mut form = DocxForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or("upload.docx").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            form.upload = Some((filename, bytes.to_vec()));
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "path" => form.path = Some(value),
            "max_chars" => form.max_chars = Some(value),
            "summarize" => form.summarize = Some(value),
            "section_mapping" => form.section_mapping = Some(value),
            _ => {}
        }
    }

    Ok(form)
}

fn parse_bool(raw: &str) -> Result<bool, ApiError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ApiError::BadRequest(format!(
            "invalid summarize flag: {other:?}"
        ))),
    }
}
