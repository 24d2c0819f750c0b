use crate::core::Board;
use crate::display::DisplayState;

/// 対局中の入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Drop(usize),
    /// Restart a finished game, or retry the last failed engine call.
    Restart,
    Quit,
}

/// プレイヤー操作のtrait
///
/// `display.interactive` lists the columns that may be dropped into. When it
/// is empty only `Restart` and `Quit` make sense.
pub trait PlayerController {
    fn next_command(&self, board: &Board, display: &DisplayState) -> anyhow::Result<Command>;
    fn name(&self) -> &str;
}
