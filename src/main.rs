//! Resume matcher: keyword-based resume and job description matching tool

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::manager::{load_document, load_job_description};
use resume_matcher::output::ReportGenerator;
use resume_matcher::processing::embedding_manager::EmbeddingModelManager;
use resume_matcher::ResumeMatcher;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            job,
            top_n,
            output,
            detailed,
        } => {
            cli::validate_file_extension(&resume, &["pdf"])
                .map_err(|e| ResumeMatcherError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| ResumeMatcherError::InvalidInput(format!("Job description file: {}", e)))?;
            if !resume.exists() {
                return Err(ResumeMatcherError::InvalidInput(format!(
                    "File does not exist: {}",
                    resume.display()
                )));
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeMatcherError::InvalidInput)?,
                None => config.output.format,
            };

            let job_text = load_job_description(&job).await?;

            let mut config = config;
            if let Some(top_n) = top_n {
                config.extraction.top_n = top_n;
            }

            info!("Matching {} against {}", resume.display(), job.display());
            let matcher = build_matcher(config.clone()).await?;
            let report = tokio::task::spawn_blocking(move || matcher.match_resume(&resume, &job_text))
                .await
                .map_err(|e| ResumeMatcherError::InvalidInput(format!("Matching task failed: {}", e)))?;

            if report.resume_text_missing() {
                warn!("No text could be extracted from the resume");
            }

            let use_colors = config.output.color_output && output_format == OutputFormat::Console;
            let generator = ReportGenerator::with_options(use_colors, detailed, true);
            println!("{}", generator.generate_report(&report, &output_format)?);
        }

        Commands::Keywords { input, top_n } => {
            let text = load_document(&input).await?;
            if text.trim().is_empty() {
                warn!("No text available in {}", input.display());
            }

            let top_n = top_n.unwrap_or(config.extraction.top_n);
            let matcher = build_matcher(config).await?;
            let (keywords, strategy) = tokio::task::spawn_blocking(move || {
                matcher.extract_keywords_with_strategy(&text, top_n)
            })
            .await
            .map_err(|e| ResumeMatcherError::InvalidInput(format!("Extraction task failed: {}", e)))?;

            println!("Keywords for {} ({}):", input.display(), strategy);
            for (i, keyword) in keywords.iter().enumerate() {
                println!("  {}. {}", i + 1, keyword);
            }
        }

        Commands::Models { action } => {
            let manager = EmbeddingModelManager::new(&config.models);

            match action {
                ModelAction::List => {
                    println!("Models directory: {}\n", manager.models_dir().display());
                    for model in manager.list_available_models() {
                        let status = if manager.is_model_downloaded(&model.name) {
                            "downloaded"
                        } else {
                            "available"
                        };
                        let active = if model.name == config.models.keyphrase_model { " (active)" } else { "" };

                        println!("  • {}{} ({}) - {} MB [{}]", model.name, active, model.repo_id, model.size_mb, status);
                        println!("    {}", model.description);
                    }
                }

                ModelAction::Download { model, force } => {
                    let model = model.unwrap_or_else(|| config.models.keyphrase_model.clone());

                    let spinner = ProgressBar::new_spinner();
                    spinner.set_style(
                        ProgressStyle::with_template("{spinner} {msg}")
                            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                    );
                    spinner.set_message(format!("Downloading {}", model));
                    spinner.enable_steady_tick(Duration::from_millis(120));

                    let result = manager.download_model(&model, force).await;
                    spinner.finish_and_clear();

                    let model_path = result?;
                    println!("Model '{}' ready at {}", model, model_path.display());
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("# {}\n{}", config_path.display(), content);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(&config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

/// Load the keyphrase model off the async runtime
async fn build_matcher(config: Config) -> Result<Arc<ResumeMatcher>> {
    tokio::task::spawn_blocking(move || ResumeMatcher::from_config(&config).map(Arc::new))
        .await
        .map_err(|e| ResumeMatcherError::ModelLoading(format!("Model loading task failed: {}", e)))?
}
