use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lotto_advisor::advisor::Advisor;
use lotto_advisor::agents::backend::create_backend;
use lotto_advisor::api::state::AppState;
use lotto_advisor::api::{build_router, resolve_count};
use lotto_advisor::config::AppConfig;
use lotto_advisor::fetch::DhLotteryRepository;

#[derive(Parser)]
#[command(name = "lotto-advisor")]
#[command(about = "Lotto draw statistics with AI-assisted recommendations")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (defaults to the config file value)
        #[arg(long)]
        host: Option<String>,

        /// Port number (defaults to the config file value)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Analyze recent draws and print the result
    Analyze {
        /// Number of recent draws to analyze
        #[arg(long)]
        count: Option<u32>,

        /// Only print statistics, skip the AI recommendation
        #[arg(long)]
        no_ai: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Number of combinations to request (defaults to the config file value)
        #[arg(long)]
        combinations: Option<usize>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    let level = cli.log_level.as_deref().unwrap_or(config.log_level.as_str());
    init_tracing(level, cli.json_logs);

    tracing::info!("Starting lotto-advisor v{}", env!("CARGO_PKG_VERSION"));

    let repository = DhLotteryRepository::new(config.source.draw_source())
        .context("Failed to create draw repository")?;
    let backend = create_backend(&config.ai).context("Failed to create AI backend")?;
    tracing::info!("Using {} AI backend", backend.name());

    let mut advisor = Advisor::new(Arc::new(repository), backend)
        .with_combinations(config.recommender.combinations);

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState {
                advisor: Arc::new(advisor),
                default_window: config.source.default_window,
                cors_origin: config.server.cors_origin.clone(),
            };
            let app = build_router(state);

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Analyze {
            count,
            no_ai,
            json,
            combinations,
        } => {
            let count = resolve_count(count, config.source.default_window)?;
            if let Some(combinations) = combinations {
                advisor = advisor.with_combinations(combinations);
            }

            if no_ai {
                let report = advisor.statistics(count).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print!("{}", report.summary);
                }
                return Ok(());
            }

            let response = advisor.advise(count).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}\n", response.report);
                for combo in &response.combinations {
                    let numbers = combo
                        .numbers
                        .iter()
                        .map(|n| format!("{:>2}", n))
                        .collect::<Vec<_>>()
                        .join(" ");
                    println!("  [{}]  {}", numbers, combo.theme);
                }
            }
        }
    }

    Ok(())
}
