pub mod board;
pub mod serialization;
pub mod session;
pub mod types;

pub use board::{Board, Cell, DEFAULT_COLS, DEFAULT_ROWS};
pub use session::{MoveResult, SessionState, NO_WINNER_SENTINEL};
pub use types::{Outcome, PlayerConfig, PlayerSlot, MAX_SEARCH_DEPTH};
