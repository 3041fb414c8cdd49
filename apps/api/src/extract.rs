//! Document text extraction — uploaded bytes to a plain-text string.
//!
//! Pure transformation: no fallback logic lives here. PDF goes through
//! `pdf-extract`, DOCX is unzipped and the text runs of `word/document.xml`
//! are pulled out with `quick-xml`, TXT is decoded lossily. The caller passes
//! a lowercase extension hint; anything else is rejected before we touch the
//! bytes.

use std::io::Read;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format: '{0}' (expected pdf, docx, or txt)")]
    UnsupportedFormat(String),

    #[error("failed to read document: {0}")]
    Unreadable(String),

    #[error("document contains no extractable text")]
    Empty,
}

/// Extract plain text from an uploaded document.
///
/// An empty or whitespace-only result is an error: the import pipeline has
/// nothing to work with and must abort rather than fabricate a document.
pub fn extract_text(bytes: &[u8], extension: &str) -> Result<String, ExtractError> {
    let text = match extension {
        "pdf" => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Unreadable(format!("pdf: {e}")))?,
        "docx" => extract_docx(bytes)?,
        "txt" => String::from_utf8_lossy(bytes).into_owned(),
        other => return Err(ExtractError::UnsupportedFormat(other.to_string())),
    };

    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(text)
}

/// DOCX is a ZIP container; the document body lives in `word/document.xml`.
/// We collect text events and turn paragraph ends into newlines so the
/// downstream line-based heuristics see a sensible layout.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| ExtractError::Unreadable(format!("docx container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Unreadable(format!("docx body missing: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Unreadable(format!("docx body: {e}")))?;

    let mut reader = Reader::from_str(&xml);
    let mut out = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let chunk = t
                    .unescape()
                    .map_err(|e| ExtractError::Unreadable(format!("docx xml: {e}")))?;
                out.push_str(&chunk);
            }
            // Paragraph and line-break boundaries become newlines
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => out.push('\n'),
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:br" => out.push('\n'),
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Unreadable(format!("docx xml: {e}"))),
            _ => {}
        }
    }
    Ok(out)
}
