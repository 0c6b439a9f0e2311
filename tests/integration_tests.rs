//! Integration tests for jobfit

use jobfit::config::{Config, OutputFormat};
use jobfit::error::{ErrorKind, JobFitError};
use jobfit::input::InputManager;
use jobfit::output::{Report, ReportGenerator};
use jobfit::processing::analyzer::AnalysisEngine;
use jobfit::processing::ats_matcher::AtsProbability;
use jobfit::processing::job_info::{EmploymentType, Language, SalaryPeriod, WorkModel};
use std::path::Path;
use std::sync::Arc;

const JOB_FIXTURE: &str = "tests/fixtures/sample_job.txt";
const RESUME_FIXTURE: &str = "tests/fixtures/sample_resume.txt";
const RESUME_MD_FIXTURE: &str = "tests/fixtures/sample_resume.md";

async fn read(path: &str) -> String {
    InputManager::new().extract_text(Path::new(path)).await.unwrap()
}

fn canonicals<'a, I>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a jobfit::processing::skill_normalizer::ExtractedSkill>,
{
    skills.into_iter().map(|s| s.canonical.clone()).collect()
}

#[tokio::test]
async fn test_job_posting_analysis() {
    let engine = AnalysisEngine::new(&Config::default()).unwrap();
    let job = engine.analyze_job(&read(JOB_FIXTURE).await).unwrap();

    let info = &job.info;
    assert_eq!(info.title, "Desenvolvedor Web Pleno");
    assert_eq!(info.work_model, WorkModel::Remote);
    assert_eq!(info.employment_type, EmploymentType::Clt);
    assert_eq!(info.salary.min, Some(8000.0));
    assert_eq!(info.salary.max, Some(11000.0));
    assert_eq!(info.salary.currency, "BRL");
    assert_eq!(info.salary.period, SalaryPeriod::Monthly);
    assert_eq!(info.location, "São Paulo - SP");
    assert_eq!(info.languages, vec![Language::Portuguese, Language::English]);
    assert_eq!(
        info.education,
        "Formação superior em Computação ou áreas relacionadas"
    );

    assert_eq!(
        canonicals(&job.skills.must),
        vec!["javascript", "react", "nodejs", "postgresql", "git"]
    );
    assert_eq!(canonicals(&job.skills.nice), vec!["docker", "aws", "typescript"]);
    assert!(job.alerts.is_empty());
    assert!(!job.top_keywords.is_empty());
    assert!(job.top_keywords.len() <= 10);
}

#[tokio::test]
async fn test_resume_analysis() {
    let engine = AnalysisEngine::new(&Config::default()).unwrap();
    let resume = engine.analyze_resume(&read(RESUME_FIXTURE).await).unwrap();

    let personal = &resume.sections.personal_info;
    assert_eq!(personal.name, "Maria Oliveira Santos");
    assert_eq!(personal.email, "maria.santos@email.com");
    assert_eq!(personal.phone, "(11) 98765-4321");

    assert_eq!(
        canonicals(&resume.skills),
        vec![
            "javascript", "typescript", "react", "nodejs", "postgresql", "mongodb", "git",
            "docker", "aws"
        ]
    );
    assert!(resume.alerts.is_empty());
    assert!(!resume.sections.experience.is_empty());
    assert!(!resume.sections.education.is_empty());
}

#[tokio::test]
async fn test_markdown_resume_matches_plain_text() {
    let engine = AnalysisEngine::new(&Config::default()).unwrap();
    let plain = engine.analyze_resume(&read(RESUME_FIXTURE).await).unwrap();
    let markdown = engine.analyze_resume(&read(RESUME_MD_FIXTURE).await).unwrap();

    let text = &markdown.processed.clean_text;
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));

    let mut plain_skills = canonicals(&plain.skills);
    let mut markdown_skills = canonicals(&markdown.skills);
    plain_skills.sort();
    markdown_skills.sort();
    assert_eq!(plain_skills, markdown_skills);
    assert_eq!(markdown.sections.personal_info.email, "maria.santos@email.com");
}

#[tokio::test]
async fn test_parallel_analysis_and_match() {
    let engine = Arc::new(AnalysisEngine::new(&Config::default()).unwrap());
    let job_text = read(JOB_FIXTURE).await;
    let resume_text = read(RESUME_FIXTURE).await;

    let job_engine = Arc::clone(&engine);
    let resume_engine = Arc::clone(&engine);
    let (job, resume) = tokio::try_join!(
        tokio::task::spawn_blocking(move || job_engine.analyze_job(&job_text)),
        tokio::task::spawn_blocking(move || resume_engine.analyze_resume(&resume_text)),
    )
    .unwrap();
    let (job, resume) = (job.unwrap(), resume.unwrap());

    let result = engine.match_documents(&job, &resume).unwrap();
    let compatibility = &result.compatibility;

    assert_eq!(compatibility.compatibility_score, 91);
    assert_eq!(
        compatibility.matched.must,
        vec!["javascript", "react", "nodejs", "postgresql", "git"]
    );
    assert_eq!(compatibility.matched.nice, vec!["docker", "aws", "typescript"]);
    assert!(compatibility.missing.must.is_empty());
    assert!(compatibility.missing.nice.is_empty());
    assert_eq!(compatibility.extra_skills, vec!["mongodb"]);

    assert_eq!(result.ats_points, 90);
    assert_eq!(result.ats_probability, AtsProbability::High);
    assert_eq!(result.job_title, "Desenvolvedor Web Pleno");
    assert_eq!(result.candidate_name, "Maria Oliveira Santos");
}

#[tokio::test]
async fn test_match_report_renders_as_json() {
    let engine = AnalysisEngine::new(&Config::default()).unwrap();
    let job = engine.analyze_job(&read(JOB_FIXTURE).await).unwrap();
    let resume = engine.analyze_resume(&read(RESUME_FIXTURE).await).unwrap();
    let result = engine.match_documents(&job, &resume).unwrap();

    let report = Report::matched(
        job,
        resume,
        result,
        Path::new(JOB_FIXTURE),
        Path::new(RESUME_FIXTURE),
    );
    let generator = ReportGenerator::with_options(false, true, false);

    let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["body"]["kind"], "match");
    assert_eq!(value["body"]["result"]["compatibility"]["compatibility_score"], 91);
    assert_eq!(value["body"]["result"]["ats_probability"], "High");
    assert_eq!(value["body"]["job"]["info"]["employment_type"], "CLT");

    let console = generator.generate_report(&report, &OutputFormat::Console).unwrap();
    assert!(console.contains("Score: 91% [STRONG MATCH]"));
    assert!(console.contains("Extra: mongodb"));
    assert!(console.contains("Desenvolvedor Web Pleno"));
}

#[tokio::test]
async fn test_short_documents_are_rejected() {
    let engine = AnalysisEngine::new(&Config::default()).unwrap();

    let err = engine.analyze_job("Vaga de desenvolvedor.").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyContent);

    let err = engine.analyze_resume("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyContent);
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new(RESUME_FIXTURE);

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/unsupported.xyz"))
        .await;

    assert!(matches!(result, Err(JobFitError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/nonexistent.txt"))
        .await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidInput);
}
