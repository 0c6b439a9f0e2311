//! CLI interface for jobfit

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jobfit")]
#[command(about = "Job posting and resume analysis tool")]
#[command(long_about = "Extract structured information from job postings and resumes, normalize skills, and score how well a resume fits a posting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: console, json (overrides the configured format)
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Include sections, keywords and text statistics
    #[arg(short, long, global = true)]
    pub detailed: bool,

    /// Save the report to a file instead of printing it
    #[arg(short, long, global = true)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a job posting
    Job {
        /// Path to the job posting: plain text or Markdown (PDF and Word files are not supported)
        file: PathBuf,
    },

    /// Analyze a resume
    Resume {
        /// Path to the resume: plain text or Markdown (PDF and Word files are not supported)
        file: PathBuf,
    },

    /// Score a resume against a job posting
    Match {
        /// Path to the job posting
        #[arg(short, long)]
        job: PathBuf,

        /// Path to the resume
        #[arg(short, long)]
        resume: PathBuf,
    },

    /// Inspect the skill vocabulary
    Vocabulary {
        #[command(subcommand)]
        action: VocabularyAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum VocabularyAction {
    /// List canonical skills and their aliases
    Show,

    /// Resolve a term to its canonical skill
    Lookup {
        /// Skill name or alias
        term: String,
    },

    /// Re-read the vocabulary source and report what it contains
    Reload,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("console"), Ok(OutputFormat::Console));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_match_command_parses() {
        let cli = Cli::try_parse_from([
            "jobfit", "match", "--job", "vaga.txt", "--resume", "cv.md", "-o", "json",
        ])
        .unwrap();

        assert_eq!(cli.output.as_deref(), Some("json"));
        match cli.command {
            Commands::Match { job, resume } => {
                assert_eq!(job, PathBuf::from("vaga.txt"));
                assert_eq!(resume, PathBuf::from("cv.md"));
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn test_vocabulary_reload_parses() {
        let cli = Cli::try_parse_from(["jobfit", "vocabulary", "reload"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Vocabulary {
                action: VocabularyAction::Reload
            }
        ));
    }

    #[test]
    fn test_resume_help_names_supported_formats() {
        let err = Cli::try_parse_from(["jobfit", "resume", "--help"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("PDF and Word files are not supported"));
    }
}
