//! Engine-vs-engine games without a terminal UI. Prints JSON stats to stdout.

use clap::Parser;
use connect4_client::config::{ClientConfig, DEFAULT_CONFIG_PATH, ENGINE_URL_ENV};
use connect4_client::network::HttpGameClient;
use connect4_client::selfplay::{run_selfplay, SelfPlayConfig};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "selfplay")]
#[command(about = "Run Negamax-vs-Negamax games against the engine")]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value = "1")]
    games: usize,

    /// Search depth for player 1
    #[arg(long, default_value = "4")]
    depth1: u32,

    /// Search depth for player 2
    #[arg(long, default_value = "4")]
    depth2: u32,

    /// Engine base URL (overrides the config file)
    #[arg(long, env = ENGINE_URL_ENV)]
    engine_url: Option<String>,

    /// Per-call timeout in milliseconds, 0 disables it
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::load_or_default(&args.config);
    if let Some(url) = args.engine_url {
        config.engine_url = url;
    }
    if let Some(ms) = args.timeout_ms {
        config.request_timeout_ms = ms;
    }
    let client = HttpGameClient::from_config(&config)?;

    let stats = run_selfplay(
        client,
        SelfPlayConfig {
            num_games: args.games,
            depth1: args.depth1,
            depth2: args.depth2,
            call_timeout: config.request_timeout(),
        },
    )
    .await?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
