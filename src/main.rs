//! healthgate - aggregated health endpoint
//!
//! Serves the aggregate health report over HTTP, or runs one check and
//! prints it.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use healthgate::core::health::{JsonFormatter, ReportFormatter, TextFormatter};
use healthgate::server::builder::{build_engine, run_server};
use healthgate::utils::logging::init_tracing;
use healthgate::Config;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "config/healthgate.yaml";

#[derive(Debug, Parser)]
#[command(name = "healthgate", version, about)]
struct Cli {
    /// Configuration file
    #[arg(long, short, env = "HEALTHGATE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the health endpoint (default)
    Serve,
    /// Run the probes once, print the report and exit non-zero unless healthy
    Check {
        /// Comma-separated tag filter
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Display with context chain, not Debug
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let (mut config, defaulted) = load_config(&cli.config).await?;
    if let Some(host) = cli.host {
        config.gateway.server.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.server.port = port;
    }
    config.validate().context("invalid configuration")?;

    init_tracing(config.logging());
    if defaulted {
        info!(
            "No configuration file at {}, using defaults and environment",
            DEFAULT_CONFIG_PATH
        );
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            run_server(config).await.context("server failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { tags, format } => {
            let engine = build_engine(&config, Vec::new()).context("failed to register probes")?;
            let filter: BTreeSet<String> = tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();

            let report = engine.run_health_check(Some(&filter)).await;
            let formatter: Box<dyn ReportFormatter> = match format {
                OutputFormat::Text => Box::new(TextFormatter),
                OutputFormat::Json => Box::new(JsonFormatter::pretty()),
            };
            println!("{}", formatter.format(&report)?.trim_end());

            Ok(if report.is_healthy() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
    }
}

/// Load the configuration file
///
/// A missing default file falls back to defaults plus environment overrides;
/// the returned flag reports that fallback.
async fn load_config(path: &Path) -> anyhow::Result<(Config, bool)> {
    if path == Path::new(DEFAULT_CONFIG_PATH) && !path.exists() {
        let config = Config::from_env().context("invalid environment configuration")?;
        return Ok((config, true));
    }

    let config = Config::from_file(path)
        .await
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok((config, false))
}
