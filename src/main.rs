//! hiring-matcher: resume to job description matching from the command line

use clap::Parser;
use hiring_matcher::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use hiring_matcher::config::{Config, OutputFormat};
use hiring_matcher::error::{MatcherError, Result};
use hiring_matcher::output::{save_report_to_file, ReportGenerator};
use hiring_matcher::processing::embedding_manager::EmbeddingModelManager;
use hiring_matcher::processing::matcher::{MatchEngine, MatchResult};
use hiring_matcher::store::{DocumentRef, JsonlScoreRecorder, ManifestStore, ScoreRecorder};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Match {
            job,
            candidate,
            manifest,
            policy,
            output,
            record,
        } => {
            apply_overrides(&mut config, policy.as_deref(), output.as_deref())?;

            let manifest_path = manifest.or_else(|| config.store.manifest.clone()).ok_or_else(|| {
                MatcherError::Configuration("No manifest given (use --manifest or store.manifest)".to_string())
            })?;
            let store = ManifestStore::load(&manifest_path)?;
            info!(
                "Loaded manifest {} ({} jobs, {} candidates)",
                manifest_path.display(),
                store.job_count(),
                store.candidate_count()
            );

            let engine = load_engine(&config).await?;
            let result = engine.match_resume(&store, &job, &candidate).await?;

            if let Some(ledger) = record.or_else(|| config.store.ledger.clone()) {
                let recorder = JsonlScoreRecorder::new(ledger);
                recorder.record(&job, &candidate, &result)?;
                info!("Recorded application score in {}", recorder.path().display());
            }

            print_result(&result, &config, None)
        }

        Commands::Score {
            job,
            resume,
            policy,
            output,
            save,
        } => {
            apply_overrides(&mut config, policy.as_deref(), output.as_deref())?;

            for (label, path) in [("Job description", &job), ("Resume", &resume)] {
                cli::validate_file_extension(path, &["pdf", "txt", "md"])
                    .map_err(|e| MatcherError::InvalidInput(format!("{} file: {}", label, e)))?;
            }

            let engine = load_engine(&config).await?;
            let result = engine
                .match_files(
                    &DocumentRef {
                        id: job.display().to_string(),
                        path: job.clone(),
                    },
                    &DocumentRef {
                        id: resume.display().to_string(),
                        path: resume.clone(),
                    },
                )
                .await?;

            print_result(&result, &config, save.as_deref())
        }

        Commands::Models { action } => {
            let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

            match action {
                ModelAction::List => {
                    println!("Embedding models ({}):", config.models_dir().display());
                    for (id, info) in manager.list_available_models() {
                        let status = if manager.is_model_downloaded(id) { "downloaded" } else { "available" };
                        let marker = if id == config.models.embedding_model { "*" } else { " " };
                        println!(
                            "{} {} ({}) - {} MB, {} dims [{}]",
                            marker, id, info.repo_id, info.size_mb, info.dimensions, status
                        );
                        println!("    {}", info.description);
                    }
                }
                ModelAction::Download { model } => {
                    let model_id = manager
                        .resolve_model_id(&model)
                        .ok_or_else(|| MatcherError::InvalidInput(format!("Unknown embedding model: {}", model)))?;
                    let path = manager.download_model(&model_id).await?;
                    println!("Model {} ready at {}", model_id, path.display());
                }
            }
            Ok(())
        }

        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => print!("{}", config.to_toml()?),
                ConfigAction::Path => println!("{}", Config::config_path().display()),
                ConfigAction::Reset => {
                    Config::default().save()?;
                    println!("Configuration reset: {}", Config::config_path().display());
                }
            }
            Ok(())
        }
    }
}

fn apply_overrides(config: &mut Config, policy: Option<&str>, output: Option<&str>) -> Result<()> {
    if let Some(policy) = policy {
        config.matching.policy = cli::parse_policy(policy).map_err(MatcherError::InvalidInput)?;
    }
    if let Some(output) = output {
        config.output.format = cli::parse_output_format(output).map_err(MatcherError::InvalidInput)?;
    }
    Ok(())
}

async fn load_engine(config: &Config) -> Result<MatchEngine> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Loading embedding model {}", config.models.embedding_model));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let engine = MatchEngine::from_config(config).await;
    spinner.finish_and_clear();
    engine
}

fn print_result(result: &MatchResult, config: &Config, save: Option<&std::path::Path>) -> Result<()> {
    let use_colors = config.output.color_output && config.output.format == OutputFormat::Console;
    let rendered = ReportGenerator::new(use_colors).generate(result, config.output.format)?;

    match save {
        Some(path) => {
            save_report_to_file(&rendered, path)?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
