use crate::core::Board;
use crate::display::{render_board, DisplayState};
use crate::player::{Command, PlayerController};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::time::Duration;

pub struct TuiController {
    name: String,
}

impl TuiController {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl PlayerController for TuiController {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_command(&self, board: &Board, display: &DisplayState) -> anyhow::Result<Command> {
        let mut state = display.clone();
        // カーソルは操作可能な列に置く
        if !state
            .cursor_col
            .is_some_and(|c| state.interactive.contains(&c))
        {
            state.cursor_col = state.interactive.iter().next().copied();
        }

        let mut dirty = true;
        loop {
            if dirty {
                render_board(board, &state)?;
                if state.interactive.is_empty() {
                    print!("[r]: Restart / Retry | [q]: Quit\r\n");
                } else {
                    print!("[←/→]: Move | [Enter]: Drop | [1-{}]: Column | [r]: Restart | [q]: Quit\r\n", board.cols());
                }
                io::stdout().flush()?;
                dirty = false;
            }

            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }

            match code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(Command::Quit),
                KeyCode::Char('r') => return Ok(Command::Restart),
                KeyCode::Left => {
                    state.cursor_col = step_cursor(&state.interactive, state.cursor_col, false);
                    dirty = true;
                }
                KeyCode::Right => {
                    state.cursor_col = step_cursor(&state.interactive, state.cursor_col, true);
                    dirty = true;
                }
                KeyCode::Enter => {
                    if let Some(col) = state.cursor_col {
                        return Ok(Command::Drop(col));
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(col) = digit_column(c, &state.interactive) {
                        return Ok(Command::Drop(col));
                    }
                }
                _ => {}
            }
        }
    }
}

/// Next interactive column to the left or right, wrapping around.
fn step_cursor(interactive: &BTreeSet<usize>, current: Option<usize>, forward: bool) -> Option<usize> {
    let Some(current) = current else {
        return interactive.iter().next().copied();
    };
    if forward {
        interactive
            .range(current + 1..)
            .next()
            .or_else(|| interactive.iter().next())
            .copied()
    } else {
        interactive
            .range(..current)
            .next_back()
            .or_else(|| interactive.iter().next_back())
            .copied()
    }
}

/// 1始まりの数字キーを列番号へ
fn digit_column(key: char, interactive: &BTreeSet<usize>) -> Option<usize> {
    let n = key.to_digit(10)? as usize;
    let col = n.checked_sub(1)?;
    interactive.contains(&col).then_some(col)
}
