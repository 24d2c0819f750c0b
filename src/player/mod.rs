pub mod controller;
pub mod tui;

pub use controller::{Command, PlayerController};
pub use tui::TuiController;
