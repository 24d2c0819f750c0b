use super::{render_board, DisplayState, PresentationSink};
use crate::core::{Board, Outcome};
use std::collections::BTreeSet;
use tracing::{debug, info, trace, warn};

/// crossterm で描画するシンク
pub struct TerminalSink {
    state: DisplayState,
    board: Option<Board>,
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            state: DisplayState::default(),
            board: None,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.state.status_msg = Some(status.into());
        self.redraw();
    }

    pub fn clear_message(&mut self) {
        self.state.message = None;
    }

    fn redraw(&self) {
        if let Some(board) = &self.board {
            if let Err(e) = render_board(board, &self.state) {
                warn!(error = %e, "Failed to draw board");
            }
        }
    }
}

impl PresentationSink for TerminalSink {
    fn render(&mut self, board: &Board, interactive_columns: &BTreeSet<usize>) {
        self.state.interactive = interactive_columns.clone();
        if interactive_columns.is_empty() {
            self.state.cursor_col = None;
        }
        self.board = Some(board.clone());
        self.redraw();
    }

    fn set_busy(&mut self, busy: bool) {
        self.state.busy = busy;
        self.redraw();
    }

    fn announce_outcome(&mut self, outcome: Outcome) {
        self.state.status_msg = Some(format!("Game Over: {}", outcome.message()));
        self.state.busy = false;
        self.redraw();
    }

    fn reset_controls(&mut self) {
        self.state = DisplayState::default();
    }

    fn show_message(&mut self, message: &str) {
        self.state.message = Some(message.to_string());
        self.redraw();
    }

    fn highlight_winning_line(&mut self, line: &[(usize, usize)]) {
        self.state.winning_line = line.to_vec();
    }
}

/// 画面を持たない実行 (selfplay) 用。すべて tracing に流す
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        LogSink
    }
}

impl PresentationSink for LogSink {
    fn render(&mut self, board: &Board, interactive_columns: &BTreeSet<usize>) {
        debug!(
            marks = board.mark_count(),
            interactive = interactive_columns.len(),
            "Board updated"
        );
    }

    fn set_busy(&mut self, busy: bool) {
        trace!(busy, "Busy state changed");
    }

    fn announce_outcome(&mut self, outcome: Outcome) {
        info!(outcome = ?outcome, "{}", outcome.message());
    }

    fn reset_controls(&mut self) {
        debug!("Controls reset");
    }

    fn show_message(&mut self, message: &str) {
        warn!("{}", message);
    }
}
