//! Minimum-content checks that run before any extraction work

use crate::config::ValidationConfig;
use crate::error::{JobFitError, Result};
use crate::processing::text_processor::split_sentences;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of document being ingested; selects the validation thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Job,
    Resume,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Job => write!(f, "job posting"),
            ContentKind::Resume => write!(f, "resume"),
        }
    }
}

/// Which threshold a document missed, with the measured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortfall {
    Characters { found: usize, required: usize },
    Sentences { found: usize, required: usize },
}

impl Shortfall {
    pub fn found(&self) -> usize {
        match self {
            Shortfall::Characters { found, .. } | Shortfall::Sentences { found, .. } => *found,
        }
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shortfall::Characters { found, required } => write!(
                f,
                "content too short ({} characters, minimum {})",
                found, required
            ),
            Shortfall::Sentences { found, required } => write!(
                f,
                "content insufficient ({} sentences, minimum {})",
                found, required
            ),
        }
    }
}

/// Character and sentence minimums for one document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_chars: usize,
    pub min_sentences: usize,
}

impl Thresholds {
    pub const JOB: Thresholds = Thresholds { min_chars: 800, min_sentences: 8 };
    pub const RESUME: Thresholds = Thresholds { min_chars: 600, min_sentences: 6 };
}

pub struct ContentValidator {
    job: Thresholds,
    resume: Thresholds,
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self::new(Thresholds::JOB, Thresholds::RESUME)
    }
}

impl ContentValidator {
    pub fn new(job: Thresholds, resume: Thresholds) -> Self {
        Self { job, resume }
    }

    pub fn from_config(config: &ValidationConfig) -> Self {
        Self::new(config.job, config.resume)
    }

    pub fn thresholds(&self, kind: ContentKind) -> Thresholds {
        match kind {
            ContentKind::Job => self.job,
            ContentKind::Resume => self.resume,
        }
    }

    /// Reject text that is too short to analyse. The character check runs first,
    /// so a document failing both reports its character count.
    pub fn validate(&self, text: &str, kind: ContentKind) -> Result<()> {
        let thresholds = self.thresholds(kind);

        let char_count = text.chars().count();
        if char_count < thresholds.min_chars {
            debug!("{} rejected: {} characters", kind, char_count);
            return Err(JobFitError::InsufficientContent {
                kind,
                shortfall: Shortfall::Characters {
                    found: char_count,
                    required: thresholds.min_chars,
                },
            });
        }

        let sentence_count = split_sentences(text).len();
        if sentence_count < thresholds.min_sentences {
            debug!("{} rejected: {} sentences", kind, sentence_count);
            return Err(JobFitError::InsufficientContent {
                kind,
                shortfall: Shortfall::Sentences {
                    found: sentence_count,
                    required: thresholds.min_sentences,
                },
            });
        }

        Ok(())
    }
}
