//! Analysis engine tying the extraction stages together
//!
//! Each document goes through validate → normalize → segment → extract in
//! order. Job and resume analyses share no state, so they can run in parallel;
//! matching only reads two finished analyses.

use crate::config::Config;
use crate::error::Result;
use crate::processing::alerts::generate_alerts;
use crate::processing::ats_matcher::{self, AtsProbability, CompatibilityResult, JobSkills};
use crate::processing::job_info::{AttributeExtractor, JobInfo};
use crate::processing::keywords::{KeywordRanker, TopKeyword};
use crate::processing::sections::{JobSections, ResumeSections, SectionSegmenter, SectionSet};
use crate::processing::skill_normalizer::{ExtractedSkill, SkillNormalizer};
use crate::processing::text_processor::{ProcessedText, TextProcessor};
use crate::processing::validator::{ContentKind, ContentValidator};
use crate::processing::vocabulary::VocabularyStore;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub processed: ProcessedText,
    pub sections: JobSections,
    pub info: JobInfo,
    pub top_keywords: Vec<TopKeyword>,
    pub alerts: Vec<String>,
    pub skills: JobSkills,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub processed: ProcessedText,
    pub sections: ResumeSections,
    pub top_keywords: Vec<TopKeyword>,
    pub alerts: Vec<String>,
    pub skills: Vec<ExtractedSkill>,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub job_title: String,
    pub candidate_name: String,
    pub compatibility: CompatibilityResult,
    pub ats_probability: AtsProbability,
    pub ats_points: i32,
    pub rationale: String,
}

/// Owns one instance of every stage. Cheap to share behind an `Arc`.
pub struct AnalysisEngine {
    config: Config,
    validator: ContentValidator,
    processor: TextProcessor,
    segmenter: SectionSegmenter,
    extractor: AttributeExtractor,
    normalizer: SkillNormalizer,
    ranker: KeywordRanker,
    vocabulary: Arc<VocabularyStore>,
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Result<Self> {
        let vocabulary = Arc::new(VocabularyStore::from_path(config.vocabulary.path.as_deref()));
        Self::with_vocabulary(config, vocabulary)
    }

    pub fn with_vocabulary(config: &Config, vocabulary: Arc<VocabularyStore>) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            validator: ContentValidator::from_config(&config.validation),
            processor: TextProcessor::new(),
            segmenter: SectionSegmenter::new(),
            extractor: AttributeExtractor::new(),
            normalizer: SkillNormalizer::new()?,
            ranker: KeywordRanker::new(),
            vocabulary,
        })
    }

    pub fn vocabulary(&self) -> &VocabularyStore {
        &self.vocabulary
    }

    pub fn analyze_job(&self, raw_text: &str) -> Result<JobAnalysis> {
        let start_time = Instant::now();

        self.validator.validate(raw_text, ContentKind::Job)?;
        let processed = self.processor.process(raw_text);
        let text = processed.clean_text.as_str();

        let sections = self.segmenter.segment_job(text);
        let info = self.extractor.extract(text);
        let top_keywords = self.ranker.rank(text, self.config.analysis.top_keywords);
        let alerts = generate_alerts(SectionSet::Job(&sections), Some(&info));

        let vocabulary = self.vocabulary.load();
        let skill_texts = sections.skill_texts();
        let extracted = self
            .normalizer
            .normalize(skill_texts.iter().map(String::as_str), vocabulary.as_deref());
        let skills = JobSkills::partition(extracted, &sections);

        info!(
            "Analyzed job posting '{}': {} must / {} nice skills, {} alerts",
            info.title,
            skills.must.len(),
            skills.nice.len(),
            alerts.len()
        );

        Ok(JobAnalysis {
            processed,
            sections,
            info,
            top_keywords,
            alerts,
            skills,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    pub fn analyze_resume(&self, raw_text: &str) -> Result<ResumeAnalysis> {
        let start_time = Instant::now();

        self.validator.validate(raw_text, ContentKind::Resume)?;
        let processed = self.processor.process(raw_text);
        let text = processed.clean_text.as_str();

        let sections = self.segmenter.segment_resume(text);
        let top_keywords = self.ranker.rank(text, self.config.analysis.top_keywords);
        let alerts = generate_alerts(SectionSet::Resume(&sections), None);

        let vocabulary = self.vocabulary.load();
        let skill_texts = sections.skill_texts();
        let skills = self
            .normalizer
            .normalize(skill_texts.iter().map(String::as_str), vocabulary.as_deref());

        info!(
            "Analyzed resume: {} skills, {} alerts",
            skills.len(),
            alerts.len()
        );

        Ok(ResumeAnalysis {
            processed,
            sections,
            top_keywords,
            alerts,
            skills,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// Score a resume against a job posting. Fails with `EMPTY_CONTENT` when
    /// either side has no skills to compare.
    pub fn match_documents(&self, job: &JobAnalysis, resume: &ResumeAnalysis) -> Result<MatchReport> {
        ats_matcher::ensure_comparable(&job.skills, &resume.skills)?;

        let compatibility = ats_matcher::score(&job.skills, &resume.skills);
        let ats_points =
            ats_matcher::ats_points(compatibility.compatibility_score, &resume.sections, &resume.alerts);
        let ats_probability =
            ats_matcher::classify(compatibility.compatibility_score, &resume.sections, &resume.alerts);
        let rationale = ats_matcher::rationale(&compatibility, &job.skills, ats_probability);

        debug!(
            "Match scored {} with {} ATS points",
            compatibility.compatibility_score, ats_points
        );

        Ok(MatchReport {
            job_title: job.info.title.clone(),
            candidate_name: resume.sections.personal_info.name.clone(),
            compatibility,
            ats_probability,
            ats_points,
            rationale,
        })
    }
}
