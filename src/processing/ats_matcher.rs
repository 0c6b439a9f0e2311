//! Compatibility scoring and ATS (Applicant Tracking System) readiness

use crate::error::{JobFitError, Result};
use crate::processing::sections::{JobSections, ResumeSections};
use crate::processing::skill_normalizer::ExtractedSkill;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const MUST_WEIGHT: f64 = 0.6;
pub const NICE_WEIGHT: f64 = 0.3;
pub const EXTRA_WEIGHT: f64 = 0.1;

/// Extra skills beyond this count add nothing to the score and are not reported.
pub const EXTRA_SKILLS_CAP: usize = 10;

const RATIONALE_GAP_LIMIT: usize = 3;
const RATIONALE_EXTRA_LIMIT: usize = 5;

/// Job skills split into mandatory and preferred.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSkills {
    pub must: Vec<ExtractedSkill>,
    pub nice: Vec<ExtractedSkill>,
}

impl JobSkills {
    /// A skill is mandatory when its origin text appears inside any
    /// mandatory-requirement line; everything else is preferred.
    pub fn partition(skills: Vec<ExtractedSkill>, sections: &JobSections) -> Self {
        let must_lines: Vec<String> = sections
            .requirements_must
            .iter()
            .map(|line| line.to_lowercase())
            .collect();

        let (must, nice) = skills.into_iter().partition(|skill| {
            let origin = skill.origin.to_lowercase();
            must_lines.iter().any(|line| line.contains(&origin))
        });

        Self { must, nice }
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.nice.is_empty()
    }

    pub fn len(&self) -> usize {
        self.must.len() + self.nice.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBuckets {
    pub must: Vec<String>,
    pub nice: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub compatibility_score: u8,
    pub matched: SkillBuckets,
    pub missing: SkillBuckets,
    pub extra_skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AtsProbability {
    Low,
    Medium,
    High,
}

impl AtsProbability {
    fn verdict(&self) -> &'static str {
        match self {
            AtsProbability::High => "Well structured and aligned profile",
            AtsProbability::Medium => "Adequate profile with some room for improvement",
            AtsProbability::Low => "Profile needs optimization for ATS",
        }
    }
}

impl fmt::Display for AtsProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtsProbability::Low => write!(f, "Low"),
            AtsProbability::Medium => write!(f, "Medium"),
            AtsProbability::High => write!(f, "High"),
        }
    }
}

/// Reject a pair of skill sets that cannot be scored meaningfully.
/// Must be called before [`score`].
pub fn ensure_comparable(job: &JobSkills, candidate: &[ExtractedSkill]) -> Result<()> {
    if job.is_empty() {
        return Err(JobFitError::EmptyContent(
            "no skills identified in the job posting".to_string(),
        ));
    }
    if candidate.is_empty() {
        return Err(JobFitError::EmptyContent(
            "no skills identified in the resume".to_string(),
        ));
    }
    Ok(())
}

/// Weighted overlap of job and candidate skills by canonical name.
///
/// Matched and missing lists follow the job's skill order; extras follow the
/// candidate's order.
pub fn score(job: &JobSkills, candidate: &[ExtractedSkill]) -> CompatibilityResult {
    let candidate_names: HashSet<&str> = candidate.iter().map(|s| s.canonical.as_str()).collect();
    let must_names: HashSet<&str> = job.must.iter().map(|s| s.canonical.as_str()).collect();
    let nice_names: HashSet<&str> = job.nice.iter().map(|s| s.canonical.as_str()).collect();

    let (matched_must, missing_must) = split_by_presence(&job.must, &candidate_names);
    let (matched_nice, missing_nice) = split_by_presence(&job.nice, &candidate_names);

    let extra: Vec<String> = candidate
        .iter()
        .filter(|s| {
            !must_names.contains(s.canonical.as_str()) && !nice_names.contains(s.canonical.as_str())
        })
        .map(|s| s.canonical.clone())
        .collect();

    let must_ratio = ratio(matched_must.len(), must_names.len());
    let nice_ratio = ratio(matched_nice.len(), nice_names.len());
    let extra_ratio = extra.len().min(EXTRA_SKILLS_CAP) as f64 / EXTRA_SKILLS_CAP as f64;

    let weighted = MUST_WEIGHT * must_ratio + NICE_WEIGHT * nice_ratio + EXTRA_WEIGHT * extra_ratio;
    let compatibility_score = (100.0 * weighted).round().clamp(0.0, 100.0) as u8;

    CompatibilityResult {
        compatibility_score,
        matched: SkillBuckets {
            must: matched_must,
            nice: matched_nice,
        },
        missing: SkillBuckets {
            must: missing_must,
            nice: missing_nice,
        },
        extra_skills: extra.into_iter().take(EXTRA_SKILLS_CAP).collect(),
    }
}

/// Additive readiness points. May be negative when there are many alerts.
pub fn ats_points(compatibility: u8, resume: &ResumeSections, alerts: &[String]) -> i32 {
    let mut points: i32 = if compatibility >= 80 {
        40
    } else if compatibility >= 60 {
        25
    } else if compatibility >= 40 {
        10
    } else {
        0
    };

    if !resume.experience.is_empty() {
        points += 15;
    }
    if !resume.skills.is_empty() {
        points += 15;
    }
    if !resume.education.is_empty() {
        points += 10;
    }
    if !resume.personal_info.email.is_empty() {
        points += 5;
    }
    if !resume.personal_info.phone.is_empty() {
        points += 5;
    }

    points - 3 * alerts.len() as i32
}

pub fn classify(compatibility: u8, resume: &ResumeSections, alerts: &[String]) -> AtsProbability {
    match ats_points(compatibility, resume, alerts) {
        points if points >= 70 => AtsProbability::High,
        points if points >= 40 => AtsProbability::Medium,
        _ => AtsProbability::Low,
    }
}

/// Short human readable explanation of a match result.
pub fn rationale(result: &CompatibilityResult, job: &JobSkills, probability: AtsProbability) -> String {
    let mut parts = Vec::new();

    if !job.must.is_empty() {
        let matched = result.matched.must.len();
        let total = job.must.len();
        let percentage = (matched as f64 / total as f64 * 100.0).round();
        parts.push(format!(
            "Meets {}/{} mandatory requirements ({}%)",
            matched, total, percentage
        ));

        if !result.missing.must.is_empty() {
            let gaps: Vec<&str> = result
                .missing
                .must
                .iter()
                .take(RATIONALE_GAP_LIMIT)
                .map(String::as_str)
                .collect();
            parts.push(format!("Main gaps: {}", gaps.join(", ")));
        }
    }

    if !job.nice.is_empty() && !result.matched.nice.is_empty() {
        parts.push(format!(
            "{} nice-to-have skills met",
            result.matched.nice.len()
        ));
    }

    if !result.extra_skills.is_empty() {
        parts.push(format!(
            "{} additional relevant skills",
            result.extra_skills.len().min(RATIONALE_EXTRA_LIMIT)
        ));
    }

    parts.push(format!("ATS probability: {}", probability.verdict()));

    format!("{}.", parts.join(". "))
}

fn split_by_presence(skills: &[ExtractedSkill], present: &HashSet<&str>) -> (Vec<String>, Vec<String>) {
    let (found, absent): (Vec<&ExtractedSkill>, Vec<&ExtractedSkill>) = skills
        .iter()
        .partition(|s| present.contains(s.canonical.as_str()));

    (
        found.into_iter().map(|s| s.canonical.clone()).collect(),
        absent.into_iter().map(|s| s.canonical.clone()).collect(),
    )
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
