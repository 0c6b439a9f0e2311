//! File type detection from content signatures and extensions

use std::fmt;

/// Largest accepted input document.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];
const DOCX_MARKER: &[u8] = b"word/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Doc,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "doc" => FileType::Doc,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Identify binary containers by their leading bytes. A ZIP archive that
    /// is not a Word document is reported as `Unknown`.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PDF_MAGIC) {
            Some(FileType::Pdf)
        } else if bytes.starts_with(ZIP_MAGIC) {
            if contains(bytes, DOCX_MARKER) {
                Some(FileType::Docx)
            } else {
                Some(FileType::Unknown)
            }
        } else if bytes.starts_with(OLE_MAGIC) {
            Some(FileType::Doc)
        } else {
            None
        }
    }

    /// Signature first, extension second.
    pub fn detect(bytes: &[u8], extension: Option<&str>) -> Self {
        Self::from_magic(bytes)
            .or_else(|| extension.map(Self::from_extension))
            .unwrap_or(FileType::Unknown)
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, FileType::Pdf | FileType::Docx | FileType::Doc)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileType::Pdf => "PDF",
            FileType::Docx => "DOCX",
            FileType::Doc => "DOC",
            FileType::Text => "plain text",
            FileType::Markdown => "Markdown",
            FileType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_bytes_win_over_extension() {
        assert_eq!(FileType::detect(b"%PDF-1.7 ...", Some("txt")), FileType::Pdf);
        assert_eq!(
            FileType::detect(b"PK\x03\x04....word/document.xml", Some("zip")),
            FileType::Docx
        );
        assert_eq!(FileType::detect(b"PK\x03\x04....xl/sheet1.xml", Some("docx")), FileType::Unknown);
        assert_eq!(
            FileType::detect(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1], None),
            FileType::Doc
        );
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(FileType::detect(b"plain words", Some("TXT")), FileType::Text);
        assert_eq!(FileType::detect(b"# Title", Some("markdown")), FileType::Markdown);
        assert_eq!(FileType::detect(b"plain words", Some("xyz")), FileType::Unknown);
        assert_eq!(FileType::detect(b"plain words", None), FileType::Unknown);
    }

    #[test]
    fn test_binary_formats() {
        assert!(FileType::Pdf.is_binary());
        assert!(FileType::Doc.is_binary());
        assert!(!FileType::Markdown.is_binary());
    }
}
