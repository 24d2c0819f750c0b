//! テスト用の偽エンジンと記録用シンク

use crate::core::{
    Board, Cell, MoveResult, Outcome, PlayerConfig, PlayerSlot, SessionState, NO_WINNER_SENTINEL,
};
use crate::display::PresentationSink;
use crate::error::{GameError, Result};
use crate::network::RemoteGameClient;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Mutex;

const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Transport,
    /// Never answers.
    Hang,
    /// Answers with the unchanged board and the same active seat.
    Corrupt,
    /// Plays the move but reports `checkWinner` 0 without a winner.
    UnresolvedCheck,
}

struct EngineState {
    rows: usize,
    cols: usize,
    board: Board,
    active: PlayerSlot,
    outcome: Outcome,
    started: bool,
    begin_calls: usize,
    advance_calls: Vec<Option<usize>>,
    fail_begin: bool,
    faults: HashMap<usize, Fault>,
    agent_script: VecDeque<usize>,
}

/// Connect Four rules in memory. Agents drop into the leftmost open column
/// unless a script says otherwise.
pub struct FakeEngine {
    state: Mutex<EngineState>,
}

impl FakeEngine {
    pub fn new(rows: usize, cols: usize) -> Self {
        FakeEngine {
            state: Mutex::new(EngineState {
                rows,
                cols,
                board: Board::empty(rows, cols),
                active: PlayerSlot::First,
                outcome: Outcome::None,
                started: false,
                begin_calls: 0,
                advance_calls: Vec::new(),
                fail_begin: false,
                faults: HashMap::new(),
                agent_script: VecDeque::new(),
            }),
        }
    }

    pub fn standard() -> Self {
        Self::new(6, 7)
    }

    pub fn failing_begin(self) -> Self {
        self.state.lock().unwrap().fail_begin = true;
        self
    }

    /// `call` counts every `advance`, starting at 0.
    pub fn with_fault(self, call: usize, fault: Fault) -> Self {
        self.state.lock().unwrap().faults.insert(call, fault);
        self
    }

    pub fn with_agent_script(self, columns: &[usize]) -> Self {
        self.state.lock().unwrap().agent_script = columns.iter().copied().collect();
        self
    }

    pub fn begin_calls(&self) -> usize {
        self.state.lock().unwrap().begin_calls
    }

    pub fn advance_calls(&self) -> Vec<Option<usize>> {
        self.state.lock().unwrap().advance_calls.clone()
    }

    fn play(&self, column: Option<usize>) -> Answer {
        let mut st = self.state.lock().unwrap();
        let call = st.advance_calls.len();
        st.advance_calls.push(column);

        match st.faults.get(&call).copied() {
            Some(Fault::Transport) => {
                Answer::Ready(Err(GameError::Transport("injected failure".to_string())))
            }
            Some(Fault::Hang) => Answer::Hang,
            Some(Fault::Corrupt) => Answer::Ready(Ok(MoveResult {
                board: st.board.clone(),
                next_active: st.active,
                outcome: Outcome::None,
                check_winner: NO_WINNER_SENTINEL,
                winning_line: Vec::new(),
            })),
            Some(Fault::UnresolvedCheck) => Answer::Ready(st.drop_piece(column).map(|mut r| {
                r.check_winner = 0;
                r
            })),
            None => Answer::Ready(st.drop_piece(column)),
        }
    }
}

enum Answer {
    Ready(Result<MoveResult>),
    Hang,
}

impl EngineState {
    fn drop_piece(&mut self, column: Option<usize>) -> Result<MoveResult> {
        if !self.started || self.outcome.is_terminal() {
            return Err(GameError::Transport("no game in progress".to_string()));
        }
        let col = match column {
            Some(c) => c,
            None => match self.agent_script.pop_front() {
                Some(c) => c,
                None => *self
                    .board
                    .playable_columns()
                    .iter()
                    .next()
                    .ok_or_else(|| GameError::Transport("board is full".to_string()))?,
            },
        };

        let mover = self.active;
        let (board, row) = self.board.with_drop(col, mover).ok_or_else(|| {
            if col >= self.cols {
                GameError::InvalidMove(format!("column {} is out of range", col))
            } else {
                GameError::InvalidMove(format!("column {} is full", col))
            }
        })?;
        self.board = board;

        let line = winning_line(&self.board, row, col, mover);
        self.outcome = if !line.is_empty() {
            Outcome::Win(mover)
        } else if self.board.is_full() {
            Outcome::Draw
        } else {
            Outcome::None
        };
        if !self.outcome.is_terminal() {
            self.active = mover.opponent();
        }

        Ok(MoveResult {
            board: self.board.clone(),
            next_active: self.active,
            outcome: self.outcome,
            check_winner: match self.outcome {
                Outcome::None => NO_WINNER_SENTINEL,
                Outcome::Win(slot) => slot.wire_index(),
                Outcome::Draw => 2,
            },
            winning_line: line,
        })
    }
}

fn winning_line(board: &Board, row: usize, col: usize, slot: PlayerSlot) -> Vec<(usize, usize)> {
    let owned = |r: i64, c: i64| {
        r >= 0
            && c >= 0
            && (r as usize) < board.rows()
            && (c as usize) < board.cols()
            && board.get(r as usize, c as usize) == Cell::Owner(slot)
    };
    for (dr, dc) in [(0i64, 1i64), (1, 0), (1, 1), (1, -1)] {
        let (r0, c0) = (row as i64, col as i64);
        let mut start = 0i64;
        while owned(r0 + (start - 1) * dr, c0 + (start - 1) * dc) {
            start -= 1;
        }
        let mut end = 0i64;
        while owned(r0 + (end + 1) * dr, c0 + (end + 1) * dc) {
            end += 1;
        }
        if (end - start + 1) as usize >= CONNECT {
            return (start..=end)
                .map(|k| ((r0 + k * dr) as usize, (c0 + k * dc) as usize))
                .collect();
        }
    }
    Vec::new()
}

#[async_trait]
impl RemoteGameClient for FakeEngine {
    async fn begin(&self, p1: PlayerConfig, p2: PlayerConfig) -> Result<SessionState> {
        let mut st = self.state.lock().unwrap();
        st.begin_calls += 1;
        p1.validate()?;
        p2.validate()?;
        if st.fail_begin {
            return Err(GameError::Transport("connection refused".to_string()));
        }
        st.board = Board::empty(st.rows, st.cols);
        st.active = PlayerSlot::First;
        st.outcome = Outcome::None;
        st.started = true;
        Ok(SessionState::new(st.board.clone(), st.active, (p1, p2)))
    }

    async fn advance(&self, column: Option<usize>) -> Result<MoveResult> {
        match self.play(column) {
            Answer::Ready(result) => result,
            Answer::Hang => std::future::pending().await,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Render {
        marks: usize,
        interactive: BTreeSet<usize>,
    },
    Busy(bool),
    Outcome(Outcome),
    Reset,
    Message(String),
    Highlight(usize),
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Outcome(o) => Some(*o),
                _ => None,
            })
            .collect()
    }

    pub fn busy_events(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Busy(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Message(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }
}

impl PresentationSink for RecordingSink {
    fn render(&mut self, board: &Board, interactive_columns: &BTreeSet<usize>) {
        self.events.push(SinkEvent::Render {
            marks: board.mark_count(),
            interactive: interactive_columns.clone(),
        });
    }

    fn set_busy(&mut self, busy: bool) {
        self.events.push(SinkEvent::Busy(busy));
    }

    fn announce_outcome(&mut self, outcome: Outcome) {
        self.events.push(SinkEvent::Outcome(outcome));
    }

    fn reset_controls(&mut self) {
        self.events.push(SinkEvent::Reset);
    }

    fn show_message(&mut self, message: &str) {
        self.events.push(SinkEvent::Message(message.to_string()));
    }

    fn highlight_winning_line(&mut self, line: &[(usize, usize)]) {
        self.events.push(SinkEvent::Highlight(line.len()));
    }
}
