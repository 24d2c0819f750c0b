pub mod controls;
pub mod orchestrator;
pub mod recovery;

#[cfg(test)]
pub mod test_support;


pub use controls::Phase;
pub use orchestrator::TurnOrchestrator;

use crate::core::{PlayerConfig, SessionState};
use crate::display::TerminalSink;
use crate::error::GameError;
use crate::network::RemoteGameClient;
use crate::player::{Command, PlayerController};
use tracing::{debug, info};

/// `Game::play` の終わり方
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameExit {
    Quit,
    /// No session could be started; seats should be chosen again.
    StartFailed(GameError),
}

/// 端末での1対局分のループ
pub struct Game<C> {
    orchestrator: TurnOrchestrator<C, TerminalSink>,
}

impl<C: RemoteGameClient> Game<C> {
    pub fn new(orchestrator: TurnOrchestrator<C, TerminalSink>) -> Self {
        Game { orchestrator }
    }

    pub fn orchestrator(&self) -> &TurnOrchestrator<C, TerminalSink> {
        &self.orchestrator
    }

    /// Plays until the user quits, or until no session is left after a
    /// failed start or restart. Move failures are shown on screen and can be
    /// retried.
    pub async fn play(
        &mut self,
        controller: &dyn PlayerController,
        p1: PlayerConfig,
        p2: PlayerConfig,
    ) -> anyhow::Result<GameExit> {
        if let Err(e) = self.orchestrator.start_session(p1, p2).await {
            if self.orchestrator.phase() == Phase::Idle {
                debug!(error = %e, "Start failed");
                return Ok(GameExit::StartFailed(e));
            }
        }

        loop {
            let phase = self.orchestrator.phase();
            let board = self
                .orchestrator
                .session()
                .map(|s| s.board.clone())
                .unwrap_or_default();
            let status = status_line(phase, self.orchestrator.session());
            let sink = self.orchestrator.sink_mut();
            if let Some(status) = status {
                sink.set_status(status);
            }
            let display = sink.state().clone();

            let command = controller.next_command(&board, &display)?;
            self.orchestrator.sink_mut().clear_message();

            let result = match (phase, command) {
                (_, Command::Quit) => {
                    if !controls::configuration_editable(self.orchestrator.session()) {
                        info!(phase = %phase, "Leaving a game in progress");
                    }
                    self.orchestrator.abandon();
                    return Ok(GameExit::Quit);
                }
                (Phase::AwaitingHumanInput, Command::Drop(col)) => {
                    self.orchestrator.submit_human_move(col).await
                }
                // 途中で止まったエージェント手番は続きから
                (Phase::ResolvingAgentChain, Command::Restart) => {
                    self.orchestrator.resolve_agent_chain().await
                }
                (_, Command::Restart) => self.orchestrator.restart().await,
                (_, Command::Drop(_)) => Ok(()),
            };
            if let Err(e) = result {
                debug!(error = %e, "Command failed");
                // 対局が残っていなければ座席設定からやり直す
                if self.orchestrator.phase() == Phase::Idle {
                    return Ok(GameExit::StartFailed(e));
                }
            }
        }
    }
}

fn status_line(phase: Phase, session: Option<&SessionState>) -> Option<String> {
    match (phase, session) {
        (Phase::AwaitingHumanInput, Some(s)) => {
            Some(format!("{}'s turn ({})", s.active.label(), s.active_config()))
        }
        (Phase::ResolvingAgentChain, Some(s)) => Some(format!(
            "{} ({}) is waiting on the engine. Press [r] to retry.",
            s.active.label(),
            s.active_config()
        )),
        // 終局時は announce_outcome の表示を残す
        _ => None,
    }
}
