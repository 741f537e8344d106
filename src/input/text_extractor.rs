//! Text extraction from in-memory documents
//!
//! Extraction is lenient: a document that cannot be read produces an empty
//! string rather than an error, so one bad upload never aborts a batch.

use crate::input::file_detector::FileType;
use log::{debug, warn};
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use pulldown_cmark::{Event, Parser, Tag};

pub trait DocumentTextExtractor {
    /// Convert raw document bytes into trimmed plain text
    fn extract(&self, bytes: &[u8]) -> String;
}

/// Result of reading a single PDF page
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Extracted(String),
    Skipped,
}

pub struct PdfExtractor;

impl PdfExtractor {
    /// Per-page outcomes in page-number order; empty if the document does not load
    pub fn extract_pages(&self, bytes: &[u8]) -> Vec<PageOutcome> {
        let document = match Document::load_mem(bytes) {
            Ok(document) => document,
            Err(e) => {
                warn!("Could not parse PDF document: {}", e);
                return Vec::new();
            }
        };

        document
            .get_pages()
            .into_iter()
            .map(|(page_number, page_id)| match read_page(&document, page_number, page_id) {
                Ok(text) => PageOutcome::Extracted(text.trim().to_string()),
                Err(e) => {
                    debug!("Skipping unreadable page {}: {}", page_number, e);
                    PageOutcome::Skipped
                }
            })
            .collect()
    }
}

/// lopdf's text extraction quietly yields nothing for content streams it
/// cannot resolve or decode, so those are checked first.
fn read_page(document: &Document, page_number: u32, page_id: ObjectId) -> lopdf::Result<String> {
    for stream_id in document.get_page_contents(page_id) {
        let stream = document.get_object(stream_id).and_then(Object::as_stream)?;
        let data = if stream.dict.has(b"Filter") {
            stream.decompressed_content()?
        } else {
            stream.content.clone()
        };
        Content::decode(&data)?;
    }
    document.extract_text(&[page_number])
}

impl DocumentTextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        let pages: Vec<String> = self
            .extract_pages(bytes)
            .into_iter()
            .filter_map(|outcome| match outcome {
                PageOutcome::Extracted(text) if !text.is_empty() => Some(text),
                _ => None,
            })
            .collect();

        pages.join("\n")
    }
}

pub struct PlainTextExtractor;

impl DocumentTextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).trim().to_string()
    }
}

/// Keeps the text and inline code of a Markdown document, one block per line
pub struct MarkdownExtractor;

impl DocumentTextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        let markdown_content = String::from_utf8_lossy(bytes);
        let mut text = String::new();

        for event in Parser::new(&markdown_content) {
            match event {
                Event::Text(chunk) | Event::Code(chunk) => text.push_str(&chunk),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_))
                | Event::End(Tag::TableCell) => text.push('\n'),
                _ => {}
            }
        }

        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

/// Route bytes to the extractor for their type; unknown types are read as PDF
pub fn extract_text(file_type: FileType, bytes: &[u8]) -> String {
    match file_type {
        FileType::Text => PlainTextExtractor.extract(bytes),
        FileType::Markdown => MarkdownExtractor.extract(bytes),
        FileType::Pdf | FileType::Unknown => PdfExtractor.extract(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_pdf_yields_empty_text() {
        assert_eq!(PdfExtractor.extract(b"definitely not a pdf"), "");
        assert!(PdfExtractor.extract_pages(b"").is_empty());
    }

    #[test]
    fn test_plain_text_is_trimmed() {
        let text = PlainTextExtractor.extract(b"  \n Rust developer \n\n");
        assert_eq!(text, "Rust developer");
    }

    #[test]
    fn test_plain_text_tolerates_invalid_utf8() {
        let text = PlainTextExtractor.extract(&[b'o', b'k', 0xff, b'!']);
        assert!(text.starts_with("ok"));
        assert!(text.ends_with('!'));
    }

    #[test]
    fn test_markdown_formatting_is_stripped() {
        let markdown = b"# Jane Roe\n\n**Skills**: Rust, *Kubernetes* & Go\n\n- Terraform\n";
        let text = MarkdownExtractor.extract(markdown);

        assert!(text.contains("Jane Roe"));
        assert!(text.contains("Kubernetes"));
        assert!(text.contains("Rust, Kubernetes & Go"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_markdown_keeps_text_around_angle_brackets() {
        let text = MarkdownExtractor.extract(b"Team size < 10 engineers, budget > 5k, Rust");
        assert_eq!(text, "Team size < 10 engineers, budget > 5k, Rust");
    }

    #[test]
    fn test_markdown_blocks_become_lines() {
        let text = MarkdownExtractor.extract(b"## Experience\n\n- Rust `tokio`\n- Go\n\nLed a team\nof five");
        assert_eq!(text, "Experience\nRust tokio\nGo\nLed a team\nof five");
    }

    #[test]
    fn test_routing_by_file_type() {
        assert_eq!(extract_text(FileType::Text, b"hello there"), "hello there");
        assert_eq!(extract_text(FileType::Unknown, b"hello there"), "");
    }
}
