//! 操作可否は状態から導出する (独立したフラグは持たない)

use crate::core::SessionState;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session installed.
    Idle,
    AwaitingHumanInput,
    /// An agent seat is active; includes a chain stopped by a failed call.
    ResolvingAgentChain,
    Terminal,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::AwaitingHumanInput => "awaiting human input",
            Phase::ResolvingAgentChain => "resolving agent chain",
            Phase::Terminal => "terminal",
        };
        f.write_str(s)
    }
}

pub fn phase_of(session: Option<&SessionState>) -> Phase {
    match session {
        None => Phase::Idle,
        Some(s) if s.is_terminal() => Phase::Terminal,
        Some(s) if s.active_config().is_human() => Phase::AwaitingHumanInput,
        Some(_) => Phase::ResolvingAgentChain,
    }
}

/// Columns a human may click right now. Empty during agent turns and after
/// the game ends.
pub fn interactive_columns(session: &SessionState) -> BTreeSet<usize> {
    if session.awaiting_human() {
        session.board.playable_columns()
    } else {
        BTreeSet::new()
    }
}

/// Seat configuration is editable whenever no game is in progress.
pub fn configuration_editable(session: Option<&SessionState>) -> bool {
    matches!(phase_of(session), Phase::Idle | Phase::Terminal)
}
