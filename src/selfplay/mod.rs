//! エンジン同士の連続対局 (画面なし)

use crate::core::{Outcome, PlayerConfig, PlayerSlot};
use crate::display::LogSink;
use crate::game::TurnOrchestrator;
use crate::network::RemoteGameClient;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub depth1: u32,
    pub depth2: u32,
    pub call_timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub outcome: Outcome,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub p1_wins: usize,
    pub p2_wins: usize,
    pub draws: usize,
    /// Games abandoned after an engine error.
    pub failed: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub player1: String,
    pub player2: String,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.outcome {
            Outcome::Win(PlayerSlot::First) => self.p1_wins += 1,
            Outcome::Win(PlayerSlot::Second) => self.p2_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::None => self.failed += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        let finished: Vec<&GameResult> = self
            .games
            .iter()
            .filter(|g| g.outcome.is_terminal())
            .collect();
        if finished.is_empty() {
            return;
        }
        let total_moves: usize = finished.iter().map(|g| g.moves).sum();
        let total_time: u128 = finished.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / finished.len() as f64;
        self.avg_time_ms = total_time as f64 / finished.len() as f64;
    }
}

pub async fn run_selfplay<C: RemoteGameClient>(
    client: C,
    config: SelfPlayConfig,
) -> anyhow::Result<SelfPlayStats> {
    let p1 = PlayerConfig::agent(config.depth1)?;
    let p2 = PlayerConfig::agent(config.depth2)?;

    let mut stats = SelfPlayStats::new();
    stats.player1 = p1.to_string();
    stats.player2 = p2.to_string();

    let mut orchestrator =
        TurnOrchestrator::new(client, LogSink::new()).with_call_timeout(config.call_timeout);

    for game_num in 1..=config.num_games {
        let start_time = Instant::now();
        // 前局が途中で失敗していても破棄して始める
        orchestrator.abandon();

        let outcome = match orchestrator.start_session(p1, p2).await {
            Ok(()) => orchestrator
                .session()
                .map(|s| s.outcome)
                .unwrap_or_default(),
            Err(e) => {
                warn!(game = game_num, error = %e, "Game aborted");
                Outcome::None
            }
        };

        let result = GameResult {
            outcome,
            moves: orchestrator.moves_applied(),
            time_ms: start_time.elapsed().as_millis(),
        };
        info!(
            game = game_num,
            of = config.num_games,
            outcome = ?result.outcome,
            moves = result.moves,
            time_ms = result.time_ms as u64,
            "Game completed"
        );
        stats.add_result(result);
    }

    info!(
        p1_wins = stats.p1_wins,
        p2_wins = stats.p2_wins,
        draws = stats.draws,
        failed = stats.failed,
        avg_moves = stats.avg_moves,
        "Self-play finished"
    );
    Ok(stats)
}
