//! Anubad - Messenger Translation Bot
//!
//! Entry point: runs the webhook server or translates single messages from
//! the command line.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use anubad::cli::{Args, Commands};
use anubad::config::Config;
use anubad::detect;
use anubad::error::AnubadError;
use anubad::gateway;
use anubad::pipeline::{ReplySource, TranslationPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    let mut config = load_config(&args)?;

    match args.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let pipeline = TranslationPipeline::from_config(&config)?;
            info!(
                "Starting webhook server with {} provider(s), worst-case latency {:?}",
                config.translate.providers.len(),
                pipeline.max_latency()
            );
            gateway::run_server(&config, pipeline).await?;
        }
        Commands::Translate { text, explain } => {
            let pipeline = TranslationPipeline::from_config(&config)?;
            let reply = pipeline.process(&text).await;

            if explain {
                if let Some(classification) = reply.classification {
                    println!("Classification: {:?}", classification);
                }
                if let Some(target) = reply.target {
                    println!("Target:         {}", target);
                }
                if let Some(transliterated) = &reply.transliterated {
                    println!("Transliterated: {}", transliterated);
                }
                let source = match &reply.source {
                    ReplySource::Empty => "empty input".to_string(),
                    ReplySource::Shortcut => "phrase shortcut".to_string(),
                    ReplySource::Provider(name) => format!("provider '{}'", name),
                    ReplySource::Failure => "all providers failed".to_string(),
                };
                println!("Source:         {}", source);
                println!();
            }

            println!("{}", reply.text);
        }
        Commands::Detect { text } => {
            let classification = detect::classify(text.trim());
            let target = detect::select_target(classification);
            println!("Classification: {:?}", classification);
            println!("Target:         {}", target);
        }
        Commands::InitConfig { output, force } => {
            if output.exists() && !force {
                return Err(AnubadError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    output.display()
                ))
                .into());
            }
            Config::default().save_to_file(&output)?;
            println!("Wrote default configuration to {}", output.display());
        }
    }

    Ok(())
}

/// Explicit path, then ./config.toml, then defaults; environment overrides last
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    config.apply_env_overrides()?;
    config.validate()?;
    Ok(config)
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".anubad").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "anubad.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Console output goes to stderr so `translate` output stays clean on stdout
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    subscriber.try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("anubad.log").display());

    Ok(())
}
