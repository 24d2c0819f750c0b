pub mod terminal;

use crate::core::{Board, Cell, Outcome, PlayerSlot};
use crossterm::{cursor, execute, style::Stylize, terminal as term};
use std::collections::BTreeSet;
use std::io::{self, stdout, Write};

pub use terminal::{LogSink, TerminalSink};

/// 表示層の契約
///
/// Sinks only ever see read-only snapshots; whether a column is clickable is
/// decided by the caller, never by the sink.
pub trait PresentationSink {
    /// An empty `interactive_columns` means the board is not clickable.
    fn render(&mut self, board: &Board, interactive_columns: &BTreeSet<usize>);
    fn set_busy(&mut self, busy: bool);
    /// Called exactly once per transition into a finished game.
    fn announce_outcome(&mut self, outcome: Outcome);
    /// Makes seat configuration editable again.
    fn reset_controls(&mut self);
    /// User-facing text for recoverable failures.
    fn show_message(&mut self, message: &str);

    fn highlight_winning_line(&mut self, _line: &[(usize, usize)]) {}
}

#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    pub cursor_col: Option<usize>,
    pub interactive: BTreeSet<usize>,
    pub winning_line: Vec<(usize, usize)>,
    pub status_msg: Option<String>,
    pub message: Option<String>,
    pub busy: bool,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn render_board(board: &Board, state: &DisplayState) -> io::Result<()> {
    let mut out = stdout();

    // 画面クリア（スクロール防止）
    execute!(out, term::Clear(term::ClearType::All), cursor::MoveTo(0, 0))?;

    print!("=== Connect Four ===\r\n");
    if let Some(msg) = &state.status_msg {
        print!("{}\r\n", msg.clone().bold().yellow());
    } else {
        print!("\r\n");
    }
    if state.busy {
        print!("{}\r\n", "Thinking...".italic().dark_grey());
    } else {
        print!("\r\n");
    }
    print!("\r\n");

    // 列番号
    print!(" ");
    for col in 0..board.cols() {
        let label = format!(" {}  ", col + 1);
        if state.cursor_col == Some(col) {
            print!("{}", label.black().on_yellow());
        } else if state.interactive.contains(&col) {
            print!("{}", label.green());
        } else {
            print!("{}", label.dark_grey());
        }
    }
    print!("\r\n");

    print!("+{}+\r\n", "----".repeat(board.cols()));
    for row in 0..board.rows() {
        print!("|");
        for col in 0..board.cols() {
            let cell = board.get(row, col);
            let text = format!(" {}  ", cell_char(cell));
            if state.winning_line.contains(&(row, col)) {
                print!("{}", text.black().on_green());
            } else {
                match cell {
                    Cell::Owner(PlayerSlot::First) => print!("{}", text.cyan()),
                    Cell::Owner(PlayerSlot::Second) => print!("{}", text.magenta()),
                    Cell::Empty => print!("{}", text.dark_grey()),
                }
            }
        }
        print!("|\r\n");
    }
    print!("+{}+\r\n", "----".repeat(board.cols()));

    if let Some(msg) = &state.message {
        print!("\r\n{}\r\n", msg.clone().red());
    }
    out.flush()
}

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Owner(slot) => slot.mark(),
        Cell::Empty => '.',
    }
}
