use super::board::Board;
use super::types::{Outcome, PlayerConfig, PlayerSlot};
use crate::error::{GameError, Result};

/// `checkWinner` value meaning "no winner yet, keep going".
pub const NO_WINNER_SENTINEL: i64 = -1;

/// エンジンの着手応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    pub next_active: PlayerSlot,
    pub outcome: Outcome,
    pub check_winner: i64,
    pub winning_line: Vec<(usize, usize)>,
}

/// 対局状態
///
/// Only ever replaced wholesale: `apply` builds the next value and leaves
/// `self` untouched when the result is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub board: Board,
    pub active: PlayerSlot,
    pub outcome: Outcome,
    pub players: (PlayerConfig, PlayerConfig),
    pub winning_line: Vec<(usize, usize)>,
}

impl SessionState {
    pub fn new(board: Board, active: PlayerSlot, players: (PlayerConfig, PlayerConfig)) -> Self {
        SessionState {
            board,
            active,
            outcome: Outcome::None,
            players,
            winning_line: Vec::new(),
        }
    }

    pub fn config_of(&self, slot: PlayerSlot) -> PlayerConfig {
        match slot {
            PlayerSlot::First => self.players.0,
            PlayerSlot::Second => self.players.1,
        }
    }

    pub fn active_config(&self) -> PlayerConfig {
        self.config_of(self.active)
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn awaiting_human(&self) -> bool {
        !self.is_terminal() && self.active_config().is_human()
    }

    pub fn awaiting_agent(&self) -> bool {
        !self.is_terminal() && self.active_config().is_agent()
    }

    /// Produces the state after `result`, or an error if the engine's answer
    /// would break the session invariants.
    pub fn apply(&self, result: MoveResult) -> Result<SessionState> {
        if self.is_terminal() {
            return Err(GameError::Precondition(
                "cannot apply a move to a finished session".to_string(),
            ));
        }
        if !self.board.same_dimensions(&result.board) {
            return Err(GameError::Transport(format!(
                "engine returned a {}x{} board for a {}x{} session",
                result.board.rows(),
                result.board.cols(),
                self.board.rows(),
                self.board.cols()
            )));
        }
        // 1手ごとに石はちょうど1つ増える
        if result.board.mark_count() != self.board.mark_count() + 1 {
            return Err(GameError::Transport(format!(
                "engine returned {} pieces after a move from {}",
                result.board.mark_count(),
                self.board.mark_count()
            )));
        }
        if !result.outcome.is_terminal() {
            // checkWinner が -1 以外ならエンジン側で終局済み
            if result.check_winner != NO_WINNER_SENTINEL {
                return Err(GameError::Transport(format!(
                    "engine reported checkWinner {} without a winner",
                    result.check_winner
                )));
            }
            if result.next_active == self.active {
                return Err(GameError::Transport(format!(
                    "engine kept {} active after its move without ending the game",
                    self.active
                )));
            }
            if result.board.is_full() {
                return Err(GameError::Transport(
                    "engine reported a full board without an outcome".to_string(),
                ));
            }
        }

        Ok(SessionState {
            board: result.board,
            active: result.next_active,
            outcome: result.outcome,
            players: self.players,
            winning_line: result.winning_line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human_pair() -> (PlayerConfig, PlayerConfig) {
        (PlayerConfig::Human, PlayerConfig::Human)
    }

    fn result(board: Board, next: PlayerSlot, outcome: Outcome) -> MoveResult {
        MoveResult {
            board,
            next_active: next,
            outcome,
            check_winner: NO_WINNER_SENTINEL,
            winning_line: Vec::new(),
        }
    }

    #[test]
    fn test_apply_hands_over_turn() {
        let state = SessionState::new(Board::default(), PlayerSlot::First, human_pair());
        let (board, _) = state.board.with_drop(3, PlayerSlot::First).unwrap();
        let next = state
            .apply(result(board, PlayerSlot::Second, Outcome::None))
            .unwrap();
        assert_eq!(next.active, PlayerSlot::Second);
        assert_eq!(next.board.mark_count(), 1);
        assert!(!next.is_terminal());
    }

    #[test]
    fn test_apply_rejects_same_active_without_outcome() {
        let state = SessionState::new(Board::default(), PlayerSlot::First, human_pair());
        let before = state.clone();
        let (board, _) = state.board.with_drop(0, PlayerSlot::First).unwrap();
        let res = state.apply(result(board, PlayerSlot::First, Outcome::None));
        assert!(matches!(res, Err(GameError::Transport(_))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_apply_rejects_dimension_change() {
        let state = SessionState::new(Board::default(), PlayerSlot::First, human_pair());
        let res = state.apply(result(Board::empty(5, 5), PlayerSlot::Second, Outcome::None));
        assert!(matches!(res, Err(GameError::Transport(_))));
    }

    #[test]
    fn test_apply_requires_exactly_one_new_piece() {
        let state = SessionState::new(Board::default(), PlayerSlot::First, human_pair());
        let res = state.apply(result(Board::default(), PlayerSlot::Second, Outcome::None));
        assert!(matches!(res, Err(GameError::Transport(_))));

        let (board, _) = state.board.with_drop(0, PlayerSlot::First).unwrap();
        let (board, _) = board.with_drop(1, PlayerSlot::Second).unwrap();
        let res = state.apply(result(board, PlayerSlot::Second, Outcome::None));
        assert!(matches!(res, Err(GameError::Transport(_))));
    }

    #[test]
    fn test_apply_rejects_full_board_without_outcome() {
        let state = SessionState::new(Board::empty(1, 1), PlayerSlot::First, human_pair());
        let (board, _) = state.board.with_drop(0, PlayerSlot::First).unwrap();
        let res = state.apply(result(board.clone(), PlayerSlot::Second, Outcome::None));
        assert!(matches!(res, Err(GameError::Transport(_))));

        let done = state
            .apply(result(board, PlayerSlot::Second, Outcome::Draw))
            .unwrap();
        assert_eq!(done.outcome, Outcome::Draw);
    }

    #[test]
    fn test_apply_rejects_resolved_check_without_winner() {
        let state = SessionState::new(Board::default(), PlayerSlot::First, human_pair());
        let before = state.clone();
        let (board, _) = state.board.with_drop(0, PlayerSlot::First).unwrap();
        let mut res = result(board, PlayerSlot::Second, Outcome::None);
        res.check_winner = 0;
        assert!(matches!(state.apply(res), Err(GameError::Transport(_))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_terminal_may_keep_active() {
        let state = SessionState::new(Board::default(), PlayerSlot::First, human_pair());
        let (board, _) = state.board.with_drop(2, PlayerSlot::First).unwrap();
        let next = state
            .apply(result(
                board.clone(),
                PlayerSlot::First,
                Outcome::Win(PlayerSlot::First),
            ))
            .unwrap();
        assert!(next.is_terminal());
        assert!(!next.awaiting_human());
        let (after, _) = board.with_drop(3, PlayerSlot::Second).unwrap();
        assert!(matches!(
            next.apply(result(after, PlayerSlot::Second, Outcome::None)),
            Err(GameError::Precondition(_))
        ));
    }

    #[test]
    fn test_seat_lookup() {
        let state = SessionState::new(
            Board::default(),
            PlayerSlot::Second,
            (PlayerConfig::Human, PlayerConfig::Agent { depth: 2 }),
        );
        assert_eq!(state.config_of(PlayerSlot::First), PlayerConfig::Human);
        assert!(state.awaiting_agent());
        assert!(!state.awaiting_human());
    }
}
