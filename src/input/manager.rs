//! Input manager for handling different file types

use crate::error::{MatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{info, warn};
use serde::Serialize;
use std::path::Path;

/// Text pulled out of one document for the duration of a single match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedText {
    content: String,
    status: ExtractionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExtractionStatus {
    Extracted,
    Empty,
    Failed(String),
}

impl ExtractedText {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let status = if content.trim().is_empty() {
            ExtractionStatus::Empty
        } else {
            ExtractionStatus::Extracted
        };
        Self {
            content: content.trim().to_string(),
            status,
        }
    }

    /// The "no text" sentinel: empty content with the reason kept alongside
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            status: ExtractionStatus::Failed(reason.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn status(&self) -> &ExtractionStatus {
        &self.status
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Extract text, degrading any failure to an empty `ExtractedText`
    pub async fn extract_text(&self, path: &Path) -> ExtractedText {
        match self.try_extract(path).await {
            Ok(text) => {
                let extracted = ExtractedText::new(text);
                if extracted.is_empty() {
                    warn!("No text extracted from {}", path.display());
                }
                extracted
            }
            Err(e) => {
                warn!("Error reading {}: {}", path.display(), e);
                ExtractedText::failed(e.to_string())
            }
        }
    }

    async fn try_extract(&self, path: &Path) -> Result<String> {
        match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await
            }
            FileType::Unknown => Err(MatcherError::ExtractionFailure(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_plain_text_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "  Looking for a Python developer \n").unwrap();

        let text = InputManager::new().extract_text(&path).await;
        assert_eq!(text.as_str(), "Looking for a Python developer");
        assert_eq!(text.status(), &ExtractionStatus::Extracted);
    }

    #[tokio::test]
    async fn test_blank_file_is_empty_not_failed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, "\n\n   ").unwrap();

        let text = InputManager::new().extract_text(&path).await;
        assert!(text.is_empty());
        assert_eq!(text.status(), &ExtractionStatus::Empty);
    }

    #[tokio::test]
    async fn test_unreadable_inputs_degrade_to_sentinel() {
        let dir = TempDir::new().unwrap();
        let unknown = dir.path().join("resume.docx");
        std::fs::write(&unknown, "binary").unwrap();
        let missing = dir.path().join("gone.txt");

        let manager = InputManager::new();
        for path in [unknown, missing] {
            let text = manager.extract_text(&path).await;
            assert!(text.is_empty());
            assert!(matches!(text.status(), ExtractionStatus::Failed(_)));
        }
    }
}
