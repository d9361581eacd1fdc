//! Text extraction from various file formats

use crate::error::{MatcherError, Result};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        // pdf-extract can panic on malformed input; the blocking task contains it
        let parsed = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| {
                MatcherError::ExtractionFailure(format!("PDF parser aborted on '{}': {}", path.display(), e))
            })?;

        parsed.map_err(|e| {
            MatcherError::ExtractionFailure(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(Self::markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    /// Keep text and inline code, break lines at block ends
    pub fn markdown_to_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push(' '),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_formatting_is_stripped() {
        let md = "# Jane Roe\n\n**Skills:** Python, `Node.js`\n\n- React\n- Docker\n";
        let text = MarkdownExtractor::markdown_to_text(md);

        assert!(text.contains("Jane Roe"));
        assert!(text.contains("Node.js"));
        assert!(text.contains("React"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[tokio::test]
    async fn test_pdf_garbage_is_an_error_not_a_panic() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, b"not really a pdf").unwrap();

        let result = PdfExtractor.extract(&path).await;
        assert!(matches!(result, Err(MatcherError::ExtractionFailure(_))));
    }
}
