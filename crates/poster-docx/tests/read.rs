use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};
use poster_docx::{read_paragraphs, segment};

fn build_docx(paragraphs: Vec<Paragraph>) -> Vec<u8> {
    let mut docx = Docx::new();
    for p in paragraphs {
        docx = docx.add_paragraph(p);
    }
    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    buf.into_inner()
}

#[test]
fn reads_styled_headings_and_body_text() {
    let bytes = build_docx(vec![
        Paragraph::new()
            .style("Heading1")
            .add_run(Run::new().add_text("Introduction")),
        Paragraph::new().add_run(Run::new().add_text("Body paragraph one.")),
        Paragraph::new().add_run(Run::new().add_text("Body paragraph two.")),
    ]);

    let paragraphs = read_paragraphs(&bytes).unwrap();
    assert_eq!(paragraphs.len(), 3);
    assert_eq!(paragraphs[0].style_name, "Heading1");
    assert_eq!(paragraphs[0].text, "Introduction");

    let sections = segment(&paragraphs).unwrap();
    assert_eq!(
        sections["Introduction"],
        vec!["Body paragraph one.", "Body paragraph two."]
    );
}

#[test]
fn bold_runs_survive_the_round_trip() {
    let bytes = build_docx(vec![
        Paragraph::new().add_run(Run::new().add_text("Bold lead-in").bold()),
        Paragraph::new().add_run(Run::new().add_text("plain follow-up")),
    ]);

    let paragraphs = read_paragraphs(&bytes).unwrap();
    assert_eq!(paragraphs[0].runs_bold, vec![true]);
    assert_eq!(paragraphs[1].runs_bold, vec![false]);
}

#[test]
fn invalid_bytes_are_a_parse_error() {
    let err = read_paragraphs(b"not a docx archive").unwrap_err();
    assert!(matches!(err, poster_docx::DocxError::Parse(_)));
}
