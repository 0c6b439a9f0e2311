//! Report structures wrapping analysis results for output

use crate::processing::analyzer::{JobAnalysis, MatchReport, ResumeAnalysis};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::SystemTime;

/// One rendered unit of output: an analysis plus where and when it was made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub body: ReportBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReportBody {
    Job(JobAnalysis),
    Resume(ResumeAnalysis),
    Match {
        job: JobAnalysis,
        resume: ResumeAnalysis,
        result: MatchReport,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: SystemTime,

    /// Version of jobfit used
    pub version: String,

    /// Input files, job posting first
    pub sources: Vec<String>,

    /// Total processing time
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    fn new(sources: &[&Path], processing_time_ms: u64) -> Self {
        Self {
            generated_at: SystemTime::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            sources: sources.iter().map(|p| p.display().to_string()).collect(),
            processing_time_ms,
        }
    }
}

impl Report {
    pub fn job(analysis: JobAnalysis, source: &Path) -> Self {
        Self {
            metadata: ReportMetadata::new(&[source], analysis.processing_time_ms),
            body: ReportBody::Job(analysis),
        }
    }

    pub fn resume(analysis: ResumeAnalysis, source: &Path) -> Self {
        Self {
            metadata: ReportMetadata::new(&[source], analysis.processing_time_ms),
            body: ReportBody::Resume(analysis),
        }
    }

    pub fn matched(
        job: JobAnalysis,
        resume: ResumeAnalysis,
        result: MatchReport,
        job_source: &Path,
        resume_source: &Path,
    ) -> Self {
        let processing_time_ms = job.processing_time_ms + resume.processing_time_ms;
        Self {
            metadata: ReportMetadata::new(&[job_source, resume_source], processing_time_ms),
            body: ReportBody::Match { job, resume, result },
        }
    }
}
