//! jobfit: job posting and resume analysis tool

use anyhow::{Context, Result};
use clap::Parser;
use jobfit::cli::{self, Cli, Commands, ConfigAction, VocabularyAction};
use jobfit::config::{Config, OutputFormat};
use jobfit::input::InputManager;
use jobfit::output::{save_report_to_file, Report, ReportGenerator};
use jobfit::processing::analyzer::AnalysisEngine;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

/// How a finished report leaves the program.
struct OutputOptions {
    format: OutputFormat,
    detailed: bool,
    use_colors: bool,
    save: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(cli: Cli, config: Config, config_path: &Path) -> Result<()> {
    let options = output_options(&cli, &config)?;
    let config_override = cli.config.clone();

    match cli.command {
        Commands::Job { file } => {
            let engine = AnalysisEngine::new(&config)?;
            let text = read_document(&mut InputManager::new(), &file).await?;

            let analysis = engine.analyze_job(&text)?;
            emit(&Report::job(analysis, &file), &options)?;
        }

        Commands::Resume { file } => {
            let engine = AnalysisEngine::new(&config)?;
            let text = read_document(&mut InputManager::new(), &file).await?;

            let analysis = engine.analyze_resume(&text)?;
            emit(&Report::resume(analysis, &file), &options)?;
        }

        Commands::Match { job, resume } => {
            info!("Matching {} against {}", resume.display(), job.display());

            let engine = Arc::new(AnalysisEngine::new(&config)?);
            let mut input_manager = InputManager::new();
            let job_text = read_document(&mut input_manager, &job).await?;
            let resume_text = read_document(&mut input_manager, &resume).await?;

            let job_engine = Arc::clone(&engine);
            let resume_engine = Arc::clone(&engine);
            let (job_analysis, resume_analysis) = tokio::try_join!(
                tokio::task::spawn_blocking(move || job_engine.analyze_job(&job_text)),
                tokio::task::spawn_blocking(move || resume_engine.analyze_resume(&resume_text)),
            )
            .context("Analysis task panicked")?;
            let job_analysis = job_analysis.context("Job posting analysis failed")?;
            let resume_analysis = resume_analysis.context("Resume analysis failed")?;

            let result = engine.match_documents(&job_analysis, &resume_analysis)?;
            let report = Report::matched(job_analysis, resume_analysis, result, &job, &resume);
            emit(&report, &options)?;
        }

        Commands::Vocabulary { action } => {
            let engine = AnalysisEngine::new(&config)?;
            let store = engine.vocabulary();
            let loaded = if matches!(action, VocabularyAction::Reload) {
                store.reload()
            } else {
                store.load()
            };

            match (action, loaded) {
                (_, None) => {
                    println!("⚠️  No skill vocabulary available from {}", store.source_description());
                    println!("💡 Skills are matched against the fallback list only");
                }

                (VocabularyAction::Show, Some(vocabulary)) => {
                    println!("📚 Skill vocabulary ({})\n", store.source_description());
                    for (canonical, aliases) in vocabulary.grouped() {
                        if aliases.is_empty() {
                            println!("  {}", canonical);
                        } else {
                            println!("  {:<20} {}", canonical, aliases.join(", "));
                        }
                    }
                    println!(
                        "\n{} skills, {} terms",
                        vocabulary.canonical_count(),
                        vocabulary.len()
                    );
                }

                (VocabularyAction::Lookup { term }, Some(vocabulary)) => {
                    match vocabulary.lookup(&term) {
                        Some(canonical) => println!("✅ {} → {}", term, canonical),
                        None => println!("❌ '{}' is not in the vocabulary", term),
                    }
                }

                (VocabularyAction::Reload, Some(vocabulary)) => {
                    println!(
                        "🔄 Reloaded {} skills ({} terms) from {}",
                        vocabulary.canonical_count(),
                        vocabulary.len(),
                        store.source_description()
                    );
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .context("Failed to serialize configuration")?;
                println!("{}", content);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                match &config_override {
                    Some(path) => Config::default().save_to(path)?,
                    None => Config::default().save()?,
                }
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

fn output_options(cli: &Cli, config: &Config) -> Result<OutputOptions> {
    let format = match &cli.output {
        Some(format) => cli::parse_output_format(format).map_err(anyhow::Error::msg)?,
        None => config.output.format,
    };

    Ok(OutputOptions {
        format,
        detailed: cli.detailed || config.output.detailed,
        use_colors: config.output.color_output && cli.save.is_none(),
        save: cli.save.clone(),
    })
}

async fn read_document(input_manager: &mut InputManager, path: &Path) -> Result<String> {
    input_manager
        .extract_text(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn emit(report: &Report, options: &OutputOptions) -> Result<()> {
    let generator = ReportGenerator::with_options(options.use_colors, options.detailed, true);
    let content = generator.generate_report(report, &options.format)?;

    match &options.save {
        Some(path) => {
            save_report_to_file(&content, path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
