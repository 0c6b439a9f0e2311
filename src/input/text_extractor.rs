//! Decoding document bytes into plain text

use crate::error::JobFitError;
use crate::input::file_detector::FileType;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use thiserror::Error;

/// Why a document could not be turned into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    #[error("document is unreadable: {0}")]
    Unreadable(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(FileType),

    #[error("document is corrupt: {0}")]
    Corrupt(String),
}

impl From<DecodeFailure> for JobFitError {
    fn from(failure: DecodeFailure) -> Self {
        match failure {
            DecodeFailure::UnsupportedFormat(file_type) => {
                JobFitError::UnsupportedFormat(file_type.to_string())
            }
            other => JobFitError::ParseFailed(other.to_string()),
        }
    }
}

pub trait DocumentDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> std::result::Result<String, DecodeFailure>;
}

pub struct PlainTextDecoder;

impl DocumentDecoder for PlainTextDecoder {
    fn decode(&self, bytes: &[u8]) -> std::result::Result<String, DecodeFailure> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| DecodeFailure::Corrupt(format!("invalid UTF-8: {}", e)))?;
        if text.trim().is_empty() {
            return Err(DecodeFailure::Unreadable("no text content".to_string()));
        }
        Ok(text.to_string())
    }
}

/// Renders Markdown to HTML and strips the markup, one block per line.
pub struct MarkdownDecoder {
    tag_regex: Regex,
}

impl Default for MarkdownDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownDecoder {
    pub fn new() -> Self {
        Self {
            tag_regex: Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"),
        }
    }

    fn html_to_text(&self, html: &str) -> String {
        let text = html.replace("<br />", "\n");
        let text = self.tag_regex.replace_all(&text, "");
        let text = text
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl DocumentDecoder for MarkdownDecoder {
    fn decode(&self, bytes: &[u8]) -> std::result::Result<String, DecodeFailure> {
        let markdown = PlainTextDecoder.decode(bytes)?;

        let parser = Parser::new(&markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

/// Decoder for a detected file type. Binary office formats are handled by
/// external tooling and are reported as unsupported here.
pub fn decoder_for(file_type: FileType) -> std::result::Result<Box<dyn DocumentDecoder>, DecodeFailure> {
    match file_type {
        FileType::Text => Ok(Box::new(PlainTextDecoder)),
        FileType::Markdown => Ok(Box::new(MarkdownDecoder::new())),
        other => Err(DecodeFailure::UnsupportedFormat(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_plain_text_decoding() {
        assert_eq!(
            PlainTextDecoder.decode("Vaga de emprego".as_bytes()).unwrap(),
            "Vaga de emprego"
        );
        assert!(matches!(
            PlainTextDecoder.decode(&[0xFF, 0xFE, 0x00]),
            Err(DecodeFailure::Corrupt(_))
        ));
        assert!(matches!(
            PlainTextDecoder.decode(b"   \n "),
            Err(DecodeFailure::Unreadable(_))
        ));
    }

    #[test]
    fn test_markdown_is_flattened_to_lines() {
        let markdown = "# João Silva\n\n## Habilidades\n\n- **Rust** & Go\n- SQL\n";
        let text = MarkdownDecoder::new().decode(markdown.as_bytes()).unwrap();

        assert_eq!(text, "João Silva\nHabilidades\nRust & Go\nSQL");
    }

    #[test]
    fn test_binary_formats_are_unsupported() {
        assert!(decoder_for(FileType::Text).is_ok());
        let failure = decoder_for(FileType::Pdf).err().unwrap();
        assert_eq!(failure, DecodeFailure::UnsupportedFormat(FileType::Pdf));

        let err: JobFitError = failure.into();
        assert_eq!(err.kind(), ErrorKind::ParseFailed);
        assert_eq!(err.to_string(), "File format not supported: PDF");
    }
}
