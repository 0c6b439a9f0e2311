//! Error handling for the job/resume analysis core

use crate::processing::validator::{ContentKind, Shortfall};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobFitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input below the minimum length or sentence count for its kind.
    #[error("EMPTY_CONTENT: {kind} {shortfall}")]
    InsufficientContent { kind: ContentKind, shortfall: Shortfall },

    #[error("EMPTY_CONTENT: {0}")]
    EmptyContent(String),

    #[error("PARSE_FAILED: {0}")]
    ParseFailed(String),

    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Skill vocabulary error: {0}")]
    Vocabulary(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, JobFitError>;

/// Coarse error categories shared with callers that persist or report failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyContent,
    ParseFailed,
    InvalidInput,
    Internal,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::EmptyContent => "EMPTY_CONTENT",
            ErrorKind::ParseFailed => "PARSE_FAILED",
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl JobFitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JobFitError::InsufficientContent { .. } | JobFitError::EmptyContent(_) => {
                ErrorKind::EmptyContent
            }
            JobFitError::ParseFailed(_) | JobFitError::UnsupportedFormat(_) => ErrorKind::ParseFailed,
            JobFitError::InvalidInput(_) => ErrorKind::InvalidInput,
            JobFitError::Io(_)
            | JobFitError::Configuration(_)
            | JobFitError::Vocabulary(_)
            | JobFitError::Serialization(_)
            | JobFitError::OutputFormatting(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = JobFitError::EmptyContent("no skills".to_string());
        assert_eq!(err.kind(), ErrorKind::EmptyContent);
        assert_eq!(err.kind().code(), "EMPTY_CONTENT");

        let err = JobFitError::UnsupportedFormat("xyz".to_string());
        assert_eq!(err.kind(), ErrorKind::ParseFailed);

        let err = JobFitError::InvalidInput("missing job".to_string());
        assert_eq!(err.to_string(), "INVALID_INPUT: missing job");
    }

    #[test]
    fn test_insufficient_content_message_reports_count() {
        let err = JobFitError::InsufficientContent {
            kind: ContentKind::Job,
            shortfall: Shortfall::Characters { found: 120, required: 800 },
        };
        let message = err.to_string();
        assert!(message.starts_with("EMPTY_CONTENT"));
        assert!(message.contains("120 characters"));
    }
}
