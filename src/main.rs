use clap::Parser;
use connect4_client::config::{ClientConfig, DEFAULT_CONFIG_PATH, ENGINE_URL_ENV};
use connect4_client::display::TerminalSink;
use connect4_client::game::{Game, GameExit, TurnOrchestrator};
use connect4_client::network::HttpGameClient;
use connect4_client::player::TuiController;
use connect4_client::ui::selection::select_players;
use crossterm::{execute, terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "connect4-client")]
#[command(about = "Terminal Connect Four client for a remote game engine")]
struct Args {
    /// Engine base URL (overrides the config file)
    #[arg(long, env = ENGINE_URL_ENV)]
    engine_url: Option<String>,

    /// Per-call timeout in milliseconds, 0 disables it
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ClientConfig::load_or_default(&args.config);
    if let Some(url) = args.engine_url {
        config.engine_url = url;
    }
    if let Some(ms) = args.timeout_ms {
        config.request_timeout_ms = ms;
    }
    config.validate()?;

    // 画面を汚さないようログはファイルへ
    if let Some(path) = &config.log_file {
        let file = File::create(path)?;
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run(config).await;

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Err(e) = &res {
        error!(error = %e, "Client exited with an error");
    }
    res
}

async fn run(config: ClientConfig) -> anyhow::Result<()> {
    let client = HttpGameClient::from_config(&config)?;
    info!(engine = client.base_url(), "Client ready");

    let orchestrator = TurnOrchestrator::new(client, TerminalSink::new())
        .with_call_timeout(config.request_timeout());
    let mut game = Game::new(orchestrator);
    let controller = TuiController::new("You");

    let mut seats = config.default_players;
    let mut notice: Option<String> = None;
    // q や開始失敗で座席選択へ戻り、座席選択で q なら終了
    while let Some((p1, p2)) = select_players(seats, notice.as_deref())? {
        seats = (p1, p2);
        notice = match game.play(&controller, p1, p2).await? {
            GameExit::Quit => None,
            GameExit::StartFailed(e) => Some(format!("Error starting the game: {}", e)),
        };
    }
    Ok(())
}
