use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::error::DocxError;

/// The structural attributes of one paragraph that the heading heuristic
/// looks at. This is the whole surface the rest of the crate sees — the
/// docx-rs object model stops here.
#[derive(Debug, Clone, Default)]
pub struct DocParagraph {
    /// Concatenated run text.
    pub text: String,
    /// Paragraph style id, e.g. `Heading1`. Empty when unstyled.
    pub style_name: String,
    /// One emphasis flag per run, in run order.
    pub runs_bold: Vec<bool>,
}

impl DocParagraph {
    pub fn new(text: impl Into<String>) -> Self {
        DocParagraph {
            text: text.into(),
            ..DocParagraph::default()
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style_name = style.into();
        self
    }

    pub fn with_runs_bold(mut self, runs_bold: Vec<bool>) -> Self {
        self.runs_bold = runs_bold;
        self
    }
}

/// Parse DOCX bytes into the flat paragraph sequence, document order.
pub fn read_paragraphs(bytes: &[u8]) -> Result<Vec<DocParagraph>, DocxError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| DocxError::Parse(e.to_string()))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            paragraphs.push(convert_paragraph(para));
        }
    }

    Ok(paragraphs)
}

fn convert_paragraph(para: &docx_rs::Paragraph) -> DocParagraph {
    let style_name = para
        .property
        .style
        .as_ref()
        .map(|s| s.val.clone())
        .unwrap_or_default();

    let mut text = String::new();
    let mut runs_bold = Vec::new();

    for child in &para.children {
        match child {
            ParagraphChild::Run(run) => collect_run(run, &mut text, &mut runs_bold),
            ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let ParagraphChild::Run(run) = inner {
                        collect_run(run, &mut text, &mut runs_bold);
                    }
                }
            }
            _ => {}
        }
    }

    DocParagraph {
        text,
        style_name,
        runs_bold,
    }
}

fn collect_run(run: &docx_rs::Run, text: &mut String, runs_bold: &mut Vec<bool>) {
    runs_bold.push(run.run_property.bold.is_some());
    for child in &run.children {
        if let RunChild::Text(t) = child {
            text.push_str(&t.text);
        }
    }
}
