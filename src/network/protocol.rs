use crate::core::{Board, MoveResult, Outcome, PlayerConfig, PlayerSlot, SessionState};
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};

pub const START_GAME_PATH: &str = "/start_game";
pub const MAKE_MOVE_PATH: &str = "/make_move";

// Client -> Engine

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameRequest {
    pub player1: PlayerConfig,
    pub player2: PlayerConfig,
}

/// `column` を省略すると「手番のエージェントに指させる」
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MakeMoveRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

// Engine -> Client

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameResponse {
    pub board: Board,
    pub current_player: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeMoveResponse {
    pub board: Board,
    pub current_player: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    pub check_winner: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winning_sequence: Option<Vec<[usize; 2]>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn slot_from_wire(current_player: i64) -> Result<PlayerSlot> {
    PlayerSlot::from_wire(current_player).ok_or_else(|| {
        GameError::Transport(format!(
            "engine reported unknown currentPlayer {}",
            current_player
        ))
    })
}

impl StartGameResponse {
    pub fn into_session(self, players: (PlayerConfig, PlayerConfig)) -> Result<SessionState> {
        let active = slot_from_wire(self.current_player)?;
        Ok(SessionState::new(self.board, active, players))
    }
}

impl MakeMoveResponse {
    pub fn into_move_result(self) -> Result<MoveResult> {
        let next_active = slot_from_wire(self.current_player)?;
        let outcome = Outcome::from_wire(self.winner.as_deref()).ok_or_else(|| {
            GameError::Transport(format!(
                "engine reported unknown winner {:?}",
                self.winner
            ))
        })?;
        let winning_line = self
            .winning_sequence
            .unwrap_or_default()
            .into_iter()
            .map(|[row, col]| (row, col))
            .collect();

        Ok(MoveResult {
            board: self.board,
            next_active,
            outcome,
            check_winner: self.check_winner,
            winning_line,
        })
    }
}
