//! Report formatters for the console and JSON

use crate::config::OutputFormat;
use crate::error::{JobFitError, Result};
use crate::output::report::{Report, ReportBody};
use crate::processing::analyzer::{JobAnalysis, MatchReport, ResumeAnalysis};
use crate::processing::ats_matcher::AtsProbability;
use crate::processing::job_info::{Salary, NOT_INFORMED};
use crate::processing::keywords::TopKeyword;
use colored::{Color, Colorize};
use std::path::Path;

/// Characters of the content hash shown on the console.
const HASH_PREVIEW_CHARS: usize = 12;

pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

/// Picks the formatter for the configured output format.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            80..=100 => ("STRONG MATCH", Color::Green),
            60..=79 => ("GOOD MATCH", Color::Yellow),
            40..=59 => ("PARTIAL MATCH", Color::BrightYellow),
            _ => ("WEAK MATCH", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_probability(&self, probability: AtsProbability) -> String {
        let color = match probability {
            AtsProbability::High => Color::Green,
            AtsProbability::Medium => Color::Yellow,
            AtsProbability::Low => Color::Red,
        };
        self.colorize(&probability.to_string(), color)
    }

    fn format_list(&self, label: &str, items: &[String], color: Color) -> String {
        if items.is_empty() {
            format!("{}: -\n", label)
        } else {
            format!("{}: {}\n", label, self.colorize(&items.join(", "), color))
        }
    }

    fn format_alerts(&self, alerts: &[String]) -> String {
        let mut output = self.format_header("Alerts", 3);
        if alerts.is_empty() {
            output.push_str(&self.colorize("No missing information detected\n", Color::Green));
        }
        for alert in alerts {
            output.push_str(&format!("  {} {}\n", self.colorize("!", Color::Red), alert));
        }
        output
    }

    fn format_keywords(&self, keywords: &[TopKeyword]) -> String {
        let mut output = self.format_header("Top Keywords", 3);
        for keyword in keywords {
            output.push_str(&format!("  {:<20} {:.3}\n", keyword.term, keyword.weight));
        }
        output
    }

    fn format_sections(&self, sections: &[(&str, &[String])]) -> String {
        let mut output = self.format_header("Sections", 3);
        for (name, lines) in sections {
            output.push_str(&format!("{} ({})\n", name, lines.len()));
            if self.detailed {
                for line in lines.iter() {
                    output.push_str(&format!("  • {}\n", line));
                }
            }
        }
        output
    }

    fn format_job(&self, job: &JobAnalysis) -> String {
        let mut output = self.format_header(&format!("💼 {}", job.info.title), 2);
        let info = &job.info;
        let languages: Vec<String> = info.languages.iter().map(|l| l.to_string()).collect();

        output.push_str(&format!("Work model: {}\n", info.work_model));
        output.push_str(&format!("Employment: {}\n", info.employment_type));
        output.push_str(&format!("Salary: {}\n", format_salary(&info.salary)));
        output.push_str(&format!("Location: {}\n", info.location));
        output.push_str(&format!("Education: {}\n", info.education));
        output.push_str(&format!("Languages: {}\n", languages.join(", ")));

        let must: Vec<String> = job.skills.must.iter().map(|s| s.canonical.clone()).collect();
        let nice: Vec<String> = job.skills.nice.iter().map(|s| s.canonical.clone()).collect();
        output.push_str(&self.format_header("Skills", 3));
        output.push_str(&self.format_list("Must have", &must, Color::Cyan));
        output.push_str(&self.format_list("Nice to have", &nice, Color::Cyan));

        let sections = &job.sections;
        output.push_str(&self.format_sections(&[
            ("Responsibilities", sections.responsibilities.as_slice()),
            ("Mandatory requirements", sections.requirements_must.as_slice()),
            ("Preferred requirements", sections.requirements_nice.as_slice()),
            ("Benefits", sections.benefits.as_slice()),
            ("Tools and technologies", sections.tools_tech.as_slice()),
        ]));
        output.push_str(&self.format_alerts(&job.alerts));

        if self.detailed {
            output.push_str(&self.format_keywords(&job.top_keywords));
            output.push_str(&self.format_text_stats(
                job.processed.char_count,
                job.processed.token_count,
                job.processed.sentences.len(),
                &job.processed.content_hash,
            ));
        }
        output
    }

    fn format_resume(&self, resume: &ResumeAnalysis) -> String {
        let personal = &resume.sections.personal_info;
        let name = if personal.name.is_empty() { NOT_INFORMED } else { personal.name.as_str() };
        let mut output = self.format_header(&format!("📄 {}", name), 2);

        output.push_str(&format!("E-mail: {}\n", or_not_informed(&personal.email)));
        output.push_str(&format!("Phone: {}\n", or_not_informed(&personal.phone)));

        let skills: Vec<String> = resume.skills.iter().map(|s| s.canonical.clone()).collect();
        output.push_str(&self.format_header("Skills", 3));
        output.push_str(&self.format_list("Recognized", &skills, Color::Cyan));

        let sections = &resume.sections;
        output.push_str(&self.format_sections(&[
            ("Experience", sections.experience.as_slice()),
            ("Skills", sections.skills.as_slice()),
            ("Certifications", sections.certifications.as_slice()),
            ("Education", sections.education.as_slice()),
        ]));
        output.push_str(&self.format_alerts(&resume.alerts));

        if self.detailed {
            output.push_str(&self.format_keywords(&resume.top_keywords));
            output.push_str(&self.format_text_stats(
                resume.processed.char_count,
                resume.processed.token_count,
                resume.processed.sentences.len(),
                &resume.processed.content_hash,
            ));
        }
        output
    }

    fn format_match(&self, result: &MatchReport) -> String {
        let compatibility = &result.compatibility;
        let mut output = self.format_header("🎯 Compatibility", 2);

        output.push_str(&format!(
            "Score: {}% {}\n",
            compatibility.compatibility_score,
            self.format_score_badge(compatibility.compatibility_score)
        ));
        output.push_str(&format!(
            "ATS probability: {}\n",
            self.format_probability(result.ats_probability)
        ));
        if self.detailed {
            output.push_str(&format!("ATS points: {}\n", result.ats_points));
        }

        output.push_str(&self.format_header("Skills", 3));
        output.push_str(&self.format_list("Matched (must)", &compatibility.matched.must, Color::Green));
        output.push_str(&self.format_list("Matched (nice)", &compatibility.matched.nice, Color::Green));
        output.push_str(&self.format_list("Missing (must)", &compatibility.missing.must, Color::Red));
        output.push_str(&self.format_list("Missing (nice)", &compatibility.missing.nice, Color::Yellow));
        output.push_str(&self.format_list("Extra", &compatibility.extra_skills, Color::Cyan));

        output.push_str(&self.format_header("Rationale", 3));
        output.push_str(&format!("{}\n", result.rationale));
        output
    }

    fn format_text_stats(&self, chars: usize, tokens: usize, sentences: usize, hash: &str) -> String {
        let preview: String = hash.chars().take(HASH_PREVIEW_CHARS).collect();
        format!(
            "\nText: {} characters, {} tokens, {} sentences (fingerprint {})\n",
            chars, tokens, sentences, preview
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        let title = match &report.body {
            ReportBody::Job(_) => "📊 JOB POSTING ANALYSIS",
            ReportBody::Resume(_) => "📊 RESUME ANALYSIS",
            ReportBody::Match { .. } => "📊 JOB MATCH ANALYSIS",
        };
        output.push_str(&self.format_header(title, 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
                .format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        match &report.body {
            ReportBody::Job(job) => output.push_str(&self.format_job(job)),
            ReportBody::Resume(resume) => output.push_str(&self.format_resume(resume)),
            ReportBody::Match { job, resume, result } => {
                output.push_str(&self.format_match(result));
                if self.detailed {
                    output.push_str(&self.format_job(job));
                    output.push_str(&self.format_resume(resume));
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
        }
    }

    pub fn generate_report(&self, report: &Report, format: &OutputFormat) -> Result<String> {
        let formatters: [&dyn OutputFormatter; 2] = [&self.console_formatter, &self.json_formatter];
        let formatter = formatters
            .into_iter()
            .find(|formatter| formatter.supports_format() == *format)
            .ok_or_else(|| {
                JobFitError::OutputFormatting(format!("No formatter for {:?} output", format))
            })?;

        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

fn format_salary(salary: &Salary) -> String {
    match (salary.min, salary.max) {
        (Some(min), Some(max)) => {
            format!("{} {:.2} - {:.2} ({})", salary.currency, min, max, salary.period)
        }
        (Some(min), None) => format!("{} {:.2} ({})", salary.currency, min, salary.period),
        _ => NOT_INFORMED.to_string(),
    }
}

fn or_not_informed(value: &str) -> &str {
    if value.is_empty() {
        NOT_INFORMED
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ats_matcher::{CompatibilityResult, JobSkills, SkillBuckets};
    use crate::processing::job_info::{JobInfo, SalaryPeriod, WorkModel};
    use crate::processing::sections::JobSections;
    use crate::processing::text_processor::TextProcessor;

    fn job_analysis() -> JobAnalysis {
        let mut info = JobInfo::default();
        info.title = "Desenvolvedor Rust".to_string();
        info.work_model = WorkModel::Remote;
        info.salary.min = Some(9000.0);
        info.salary.max = Some(12000.0);

        JobAnalysis {
            processed: TextProcessor::new().process("Desenvolvedor Rust"),
            sections: JobSections::default(),
            info,
            top_keywords: Vec::new(),
            alerts: vec!["Benefits not informed".to_string()],
            skills: JobSkills::default(),
            processing_time_ms: 3,
        }
    }

    #[test]
    fn test_console_job_report_without_colors() {
        let report = Report::job(job_analysis(), Path::new("vaga.txt"));
        let output = ConsoleFormatter::new(false, false).format_report(&report).unwrap();

        assert!(output.contains("JOB POSTING ANALYSIS"));
        assert!(output.contains("Desenvolvedor Rust"));
        assert!(output.contains("Work model: Remote"));
        assert!(output.contains("Salary: BRL 9000.00 - 12000.00 (monthly)"));
        assert!(output.contains("! Benefits not informed"));
        assert!(!output.contains("Top Keywords"));
    }

    #[test]
    fn test_json_report_is_tagged() {
        let report = Report::job(job_analysis(), Path::new("vaga.txt"));
        let output = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["body"]["kind"], "job");
        assert_eq!(value["body"]["info"]["work_model"], "Remote");
        assert_eq!(value["metadata"]["sources"][0], "vaga.txt");
    }

    #[test]
    fn test_match_section() {
        let result = MatchReport {
            job_title: "Desenvolvedor Rust".to_string(),
            candidate_name: "Ana".to_string(),
            compatibility: CompatibilityResult {
                compatibility_score: 81,
                matched: SkillBuckets {
                    must: vec!["rust".to_string()],
                    nice: Vec::new(),
                },
                missing: SkillBuckets::default(),
                extra_skills: vec!["go".to_string()],
            },
            ats_probability: AtsProbability::High,
            ats_points: 90,
            rationale: "Meets 1/1 mandatory requirements (100%).".to_string(),
        };

        let output = ConsoleFormatter::new(false, false).format_match(&result);
        assert!(output.contains("Score: 81% [STRONG MATCH]"));
        assert!(output.contains("ATS probability: High"));
        assert!(output.contains("Matched (must): rust"));
        assert!(output.contains("Missing (must): -"));
    }

    #[test]
    fn test_salary_formatting() {
        let mut salary = Salary::default();
        assert_eq!(format_salary(&salary), "Not informed");

        salary.min = Some(50.0);
        salary.period = SalaryPeriod::Hourly;
        assert_eq!(format_salary(&salary), "BRL 50.00 (hourly)");
    }

    #[test]
    fn test_generator_dispatches_by_supported_format() {
        assert_eq!(ConsoleFormatter::new(false, false).supports_format(), OutputFormat::Console);
        assert_eq!(JsonFormatter::new(false).supports_format(), OutputFormat::Json);

        let report = Report::job(job_analysis(), Path::new("vaga.txt"));
        let generator = ReportGenerator::with_options(false, false, false);

        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(json.starts_with('{'));
        let console = generator.generate_report(&report, &OutputFormat::Console).unwrap();
        assert!(console.contains("JOB POSTING ANALYSIS"));
    }
}
