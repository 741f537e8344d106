//! Resume screener: rank resumes against a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_screener::cli::{self, Cli, Commands, ConfigAction, JobSource};
use resume_screener::config::Config;
use resume_screener::input::InputManager;
use resume_screener::output::formatter::{resolve_save_path, save_report_to_file, ReportGenerator};
use resume_screener::output::report::ScreeningReport;
use resume_screener::processing::screening::{validate_inputs, ScreeningOrchestrator};
use resume_screener::{Result, ScreenerError};
use std::path::Path;
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Screen {
            job,
            resumes,
            top_n,
            output,
            save,
            jobs,
            detailed,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ScreenerError::InvalidInput)?,
                None => config.output.format,
            };
            let top_n = top_n.unwrap_or(config.screening.top_n);
            let workers = jobs.unwrap_or(config.screening.max_concurrency).max(1);

            for resume in &resumes {
                cli::validate_file_extension(resume, &["pdf", "txt", "md"])
                    .map_err(|e| ScreenerError::InvalidInput(format!("Resume {}: {}", resume.display(), e)))?;
            }

            let input_manager = InputManager::new();
            let (job_text, job_source) = read_job(&input_manager, job).await?;

            let progress = ProgressBar::new(resumes.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} Loading resumes [{bar:30}] {pos}/{len} {msg}")
                    .map_err(|e| ScreenerError::OutputFormatting(e.to_string()))?,
            );
            let mut candidates = Vec::with_capacity(resumes.len());
            for resume in &resumes {
                progress.set_message(resume.display().to_string());
                candidates.push(input_manager.load_candidate(resume).await?);
                progress.inc(1);
            }
            progress.finish_and_clear();

            validate_inputs(&job_text, &candidates)?;

            let started = Instant::now();
            let orchestrator = ScreeningOrchestrator::new(top_n);
            let results = if workers == 1 {
                orchestrator.run(&job_text, &candidates)
            } else {
                orchestrator.run_concurrent(&job_text, candidates, workers).await?
            };
            let elapsed_ms = started.elapsed().as_millis() as u64;
            info!("Screened {} resumes in {}ms", results.len(), elapsed_ms);

            let report = ScreeningReport::new(results, job_source, top_n, elapsed_ms);
            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = resolve_save_path(&path, &output_format);
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
            Ok(())
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ScreenerError::Configuration(e.to_string()))?;
                println!("{}", content);
                Ok(())
            }
            ConfigAction::Reset => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset: {}", config_path.display());
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
        },
    }
}

async fn read_job(input_manager: &InputManager, job: JobSource) -> Result<(String, String)> {
    match (job.job, job.job_text) {
        (Some(path), _) => {
            let text = input_manager.read_job_description(&path).await?;
            Ok((text, path.display().to_string()))
        }
        (None, Some(text)) => Ok((text, "inline".to_string())),
        (None, None) => Err(ScreenerError::InvalidInput(
            "A job description is required".to_string(),
        )),
    }
}
