use crate::core::{PlayerConfig, PlayerSlot, MAX_SEARCH_DEPTH};
use crate::error::{GameError, Result};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io;

pub const DEFAULT_AGENT_DEPTH: u32 = 4;

/// 座席設定メニュー。`q` / Esc で `None`
///
/// `notice` is shown above the menu, e.g. why the last start failed.
pub fn select_players(
    defaults: (PlayerConfig, PlayerConfig),
    notice: Option<&str>,
) -> anyhow::Result<Option<(PlayerConfig, PlayerConfig)>> {
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    print!("=== Connect Four ===\r\n");
    if let Some(notice) = notice {
        print!("{}\r\n", notice.red());
    }

    let Some(p1) = select_seat(PlayerSlot::First, defaults.0)? else {
        return Ok(None);
    };
    let Some(p2) = select_seat(PlayerSlot::Second, defaults.1)? else {
        return Ok(None);
    };
    Ok(Some((p1, p2)))
}

fn select_seat(slot: PlayerSlot, default: PlayerConfig) -> anyhow::Result<Option<PlayerConfig>> {
    print!("\r\n{} ({}):\r\n", slot.label(), slot.mark());
    print!("1. Human\r\n");
    print!("2. Negamax AI\r\n");
    print!("Enter: keep {} | q: Quit\r\n", default);

    let choice = loop {
        match super::read_choice(&['1', '2', 'q', '\n'])? {
            None | Some('q') => return Ok(None),
            Some(c) => break c,
        }
    };
    match choice {
        '1' => {
            print!("-> Human\r\n");
            Ok(Some(PlayerConfig::Human))
        }
        '2' => loop {
            let default_depth = match default {
                PlayerConfig::Agent { depth } => depth,
                PlayerConfig::Human => DEFAULT_AGENT_DEPTH,
            };
            let prompt = format!("Search depth (1-{})", MAX_SEARCH_DEPTH);
            let input = match super::read_input_raw(&default_depth.to_string(), &prompt) {
                Ok(input) => input,
                Err(_) => return Ok(None),
            };
            match parse_depth(&input) {
                Ok(config) => {
                    print!("-> {}\r\n", config);
                    return Ok(Some(config));
                }
                Err(e) => print!("{}\r\n", e),
            }
        },
        _ => Ok(Some(default)),
    }
}

pub fn parse_depth(input: &str) -> Result<PlayerConfig> {
    let depth: u32 = input
        .trim()
        .parse()
        .map_err(|_| GameError::Config(format!("'{}' is not a number", input.trim())))?;
    PlayerConfig::agent(depth)
}
