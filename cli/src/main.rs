//! CLI entrypoint for newsquiz
//!
//! This is the main binary that wires together all layers using
//! dependency injection, runs the daily pipeline once and exits.

use anyhow::{Context, Result, bail};
use clap::Parser;
use newsquiz_application::{
    Destinations, PacingPolicy, PipelineParams, PipelineServices, Publisher, RandomWordSource,
    RunInput, RunJournal, RunPipelineUseCase,
};
use newsquiz_infrastructure::{
    ConfigLoader, FileConfig, FileWordSource, JsonlRunJournal, ProviderFactory, TelegramPublisher,
};
use newsquiz_presentation::{
    Cli, ConsoleFormatter, ConsolePublisher, OutputFormat, ProgressReporter,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging based on verbosity level, optionally teeing into a file.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(level));

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new(level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn run(cli: Cli) -> Result<()> {
    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    let config = apply_overrides(config, &cli);

    for issue in config.check()? {
        warn!("{}", issue.message);
    }

    info!("Starting newsquiz");

    // === Dependency Injection ===
    let factory = ProviderFactory::new(&config.providers);
    let models = &config.models;

    let (publisher, destinations, pacing): (Arc<dyn Publisher>, Destinations, PacingPolicy) =
        if cli.dry_run {
            let params = config.pipeline.to_params();
            (
                Arc::new(ConsolePublisher),
                dry_run_destinations(config.telegram.to_destinations(), &params),
                PacingPolicy::none(),
            )
        } else {
            let Some(token) = config.telegram.resolve_bot_token() else {
                bail!(
                    "no Telegram bot token (set {} or use --dry-run)",
                    config.telegram.bot_token_env
                );
            };
            (
                Arc::new(TelegramPublisher::new(&config.telegram.api_url, &token)),
                config.telegram.to_destinations(),
                config.delivery.to_pacing(),
            )
        };

    let word_source: Arc<dyn RandomWordSource> = match FileWordSource::load(&config.vocabulary.path)
    {
        Ok(source) => Arc::new(source),
        Err(e) => {
            warn!("{}; every language will be skipped for lack of a vocabulary word", e);
            Arc::new(FileWordSource::empty())
        }
    };

    let services = PipelineServices {
        news_generator: factory.text_generator("news", &models.news)?,
        quiz_generator: factory.text_generator("quiz", &models.quiz)?,
        primary_verifier: factory.text_generator("primary_verifier", &models.primary_verifier)?,
        secondary_verifier: factory
            .text_generator("secondary_verifier", &models.secondary_verifier)?,
        image_generator: factory.image_generator("image", &models.image)?,
        word_source,
        publisher,
    };

    let mut use_case =
        RunPipelineUseCase::new(services, config.pipeline.to_params(), destinations, pacing);
    if let Some(path) = &config.journal.path {
        match JsonlRunJournal::open(path) {
            Some(journal) => {
                let journal: Arc<dyn RunJournal> = Arc::new(journal);
                use_case = use_case.with_journal(journal);
            }
            None => warn!("Journal disabled: cannot open {}", path.display()),
        }
    }

    let input = RunInput::new(chrono::Local::now().date_naive());
    let report = if cli.quiet || cli.dry_run {
        use_case.execute(&input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(&input, &progress).await?
    };

    let output = match cli.output {
        OutputFormat::Summary => ConsoleFormatter::format(&report),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };
    println!("{}", output);

    Ok(())
}

/// Command-line flags win over every configuration source.
fn apply_overrides(mut config: FileConfig, cli: &Cli) -> FileConfig {
    if !cli.language.is_empty() {
        config.pipeline.languages = cli.language.clone();
    }
    if let Some(policy) = cli.policy {
        config.pipeline.verifier_failure_policy = policy.as_str().to_string();
    }
    config
}

/// In a dry run every language gets a printable destination.
fn dry_run_destinations(mut destinations: Destinations, params: &PipelineParams) -> Destinations {
    for language in &params.languages {
        destinations
            .channels
            .entry(language.clone())
            .or_insert_with(|| format!("#{}", language));
    }
    if destinations.log_channel.is_none() {
        destinations.log_channel = Some("#log".to_string());
    }
    destinations
}
