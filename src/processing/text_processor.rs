//! Text cleaning, counting and fingerprinting

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of leading characters covered by the content fingerprint.
pub const FINGERPRINT_PREFIX_CHARS: usize = 5000;

/// Fixed target language of every processed document.
pub const TARGET_LANGUAGE: &str = "pt-BR";

/// Minimum trimmed length of a fragment to count as a sentence.
const MIN_SENTENCE_CHARS: usize = 10;

pub struct TextProcessor {
    tag_regex: Regex,
    line_break_regex: Regex,
    horizontal_space_regex: Regex,
}

/// Normalized document text plus the counts computed once at ingestion.
///
/// `content_hash` covers only the first [`FINGERPRINT_PREFIX_CHARS`] characters,
/// so two documents that differ only after that point share a fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedText {
    pub clean_text: String,
    pub char_count: usize,
    pub token_count: usize,
    pub content_hash: String,
    pub language: String,
    pub sentences: Vec<String>,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let tag_regex = Regex::new(r"<[^>]*>").expect("Invalid markup tag regex");
        let line_break_regex = Regex::new(r"\r\n?").expect("Invalid line break regex");
        let horizontal_space_regex =
            Regex::new(r"[^\S\n]+").expect("Invalid horizontal whitespace regex");

        Self {
            tag_regex,
            line_break_regex,
            horizontal_space_regex,
        }
    }

    /// Clean raw extracted text and compute its counts and fingerprint.
    pub fn process(&self, raw_text: &str) -> ProcessedText {
        let clean_text = self.clean_text(raw_text);

        let char_count = clean_text.chars().count();
        let token_count = clean_text.split_whitespace().count();
        let content_hash = fingerprint(&clean_text);
        let sentences = split_sentences(&clean_text)
            .into_iter()
            .map(|s| s.trim().to_string())
            .collect();

        ProcessedText {
            clean_text,
            char_count,
            token_count,
            content_hash,
            language: TARGET_LANGUAGE.to_string(),
            sentences,
        }
    }

    /// Normalize text while keeping its line structure.
    ///
    /// Markup tags become spaces, line breaks become `\n`, runs of other
    /// whitespace collapse to one space, and blank lines are dropped.
    pub fn clean_text(&self, text: &str) -> String {
        let text = normalize_unicode(text);
        let text = self.tag_regex.replace_all(&text, " ");
        let text = self.line_break_regex.replace_all(&text, "\n");
        let text = self.horizontal_space_regex.replace_all(&text, " ");

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split on `.`, `!` and `?`, keeping fragments longer than ten characters.
///
/// Shared by the content validator, the normalizer and the segmenter fallback
/// so every stage agrees on what a sentence is.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .filter(|fragment| fragment.trim().chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

/// Hex SHA-256 of the first [`FINGERPRINT_PREFIX_CHARS`] characters.
pub fn fingerprint(text: &str) -> String {
    let prefix: String = text.chars().take(FINGERPRINT_PREFIX_CHARS).collect();
    format!("{:x}", Sha256::digest(prefix.as_bytes()))
}

/// Map typographic punctuation to plain forms.
fn normalize_unicode(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'', // Smart quotes to regular quotes
            '\u{201C}' | '\u{201D}' => '"',  // Smart double quotes
            '\u{2013}' | '\u{2014}' => '-',  // En dash, em dash to hyphen
            '\u{2023}' | '\u{25AA}' | '\u{25CF}' => '•', // Bullet variants
            _ => c,
        })
        .collect()
}
