pub mod config;
pub mod core;
pub mod display;
pub mod error;
pub mod game;
pub mod network;
pub mod player;
pub mod selfplay;
pub mod ui;
