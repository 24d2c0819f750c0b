//! 手番制御のステートマシン
//!
//! `TurnOrchestrator` owns the only `SessionState`, talks to the engine one
//! call at a time, and keeps playing agent seats until a human has to move
//! or the game is over.

use crate::core::{MoveResult, PlayerConfig, SessionState};
use crate::display::PresentationSink;
use crate::error::{GameError, Result};
use crate::game::controls::{interactive_columns, phase_of, Phase};
use crate::game::recovery::{ErrorRecoveryHandler, Stage};
use crate::network::RemoteGameClient;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info};

pub struct TurnOrchestrator<C, S> {
    client: C,
    sink: S,
    session: Option<SessionState>,
    /// Seats of the most recent `start_session`, kept for `restart`.
    players: Option<(PlayerConfig, PlayerConfig)>,
    call_timeout: Option<Duration>,
    moves_applied: usize,
}

impl<C, S> TurnOrchestrator<C, S>
where
    C: RemoteGameClient,
    S: PresentationSink,
{
    pub fn new(client: C, sink: S) -> Self {
        Self {
            client,
            sink,
            session: None,
            players: None,
            call_timeout: None,
            moves_applied: 0,
        }
    }

    /// Upper bound for a single engine call. `None` waits indefinitely.
    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn phase(&self) -> Phase {
        phase_of(self.session.as_ref())
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> Option<SessionState> {
        self.session.clone()
    }

    pub fn players(&self) -> Option<(PlayerConfig, PlayerConfig)> {
        self.players
    }

    /// Engine results applied since the current session started.
    pub fn moves_applied(&self) -> usize {
        self.moves_applied
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Starts a game and plays any leading agent turns before returning.
    ///
    /// On failure no session is installed and the seat controls are reset.
    pub async fn start_session(&mut self, p1: PlayerConfig, p2: PlayerConfig) -> Result<()> {
        if let Some(session) = &self.session {
            if !session.is_terminal() {
                return Err(self.violation("a session is already in progress"));
            }
        }

        self.players = Some((p1, p2));
        self.session = None;
        self.moves_applied = 0;

        if let Err(e) = p1.validate().and_then(|_| p2.validate()) {
            ErrorRecoveryHandler::recover(&mut self.sink, Stage::Start, &e);
            return Err(e);
        }

        info!(player1 = %p1, player2 = %p2, "Starting session");
        let mut session = match with_timeout(self.call_timeout, self.client.begin(p1, p2)).await {
            Ok(session) => session,
            Err(e) => {
                ErrorRecoveryHandler::recover(&mut self.sink, Stage::Start, &e);
                return Err(e);
            }
        };
        // 座席設定はクライアント側が正
        session.players = (p1, p2);

        let interactive = interactive_columns(&session);
        self.sink.render(&session.board, &interactive);
        debug!(active = %session.active, "Session installed");
        self.session = Some(session);

        self.resolve_agent_chain().await
    }

    /// Drops a piece for the active human seat, then lets agents reply.
    pub async fn submit_human_move(&mut self, column: usize) -> Result<()> {
        match &self.session {
            None => return Err(self.violation("no session is active")),
            Some(s) if s.is_terminal() => return Err(self.violation("the game is already over")),
            Some(s) if !s.active_config().is_human() => {
                return Err(self.violation("the active seat is not human-controlled"))
            }
            Some(_) => {}
        }

        debug!(column, "Submitting human move");
        let result = match with_timeout(self.call_timeout, self.client.advance(Some(column))).await
        {
            Ok(result) => result,
            Err(e) => {
                ErrorRecoveryHandler::recover(&mut self.sink, Stage::HumanMove, &e);
                return Err(e);
            }
        };
        let next = self.validate(result, Stage::HumanMove)?;
        self.install(next);

        self.resolve_agent_chain().await
    }

    /// Plays agent seats until a human seat is active or the game ends.
    ///
    /// A no-op when a human is to move or the game is over. When a call
    /// fails the last applied state is kept and calling this again resumes
    /// the chain.
    pub async fn resolve_agent_chain(&mut self) -> Result<()> {
        loop {
            let mover = match &self.session {
                None => return Err(self.violation("no session is active")),
                Some(s) if !s.awaiting_agent() => return Ok(()),
                Some(s) => s.active,
            };

            debug!(active = %mover, "Requesting agent move");
            self.sink.set_busy(true);
            let result = match with_timeout(self.call_timeout, self.client.advance(None)).await {
                Ok(result) => result,
                Err(e) => {
                    ErrorRecoveryHandler::recover(&mut self.sink, Stage::AgentMove, &e);
                    return Err(e);
                }
            };
            let next = self.validate(result, Stage::AgentMove)?;
            // 操作可能な盤面を描く前に busy を解除
            self.sink.set_busy(false);
            self.install(next);
        }
    }

    /// Discards the current game and starts again with the same seats.
    pub async fn restart(&mut self) -> Result<()> {
        let (p1, p2) = self
            .players
            .ok_or_else(|| self.violation("there is no previous session to restart"))?;
        self.sink.reset_controls();
        self.session = None;
        self.start_session(p1, p2).await
    }

    /// Leaves the current game without contacting the engine.
    pub fn abandon(&mut self) {
        if self.session.take().is_some() {
            info!(moves = self.moves_applied, "Session abandoned");
        }
        self.moves_applied = 0;
        self.sink.reset_controls();
    }

    /// Checks the engine's answer against the current session. Nothing is
    /// changed when it is rejected.
    fn validate(&mut self, result: MoveResult, stage: Stage) -> Result<SessionState> {
        let Some(current) = &self.session else {
            return Err(self.violation("no session is active"));
        };
        match current.apply(result) {
            Ok(next) => Ok(next),
            Err(e) => {
                ErrorRecoveryHandler::recover(&mut self.sink, stage, &e);
                Err(e)
            }
        }
    }

    fn install(&mut self, next: SessionState) {
        let mover = self.session.as_ref().map(|s| s.active);
        self.moves_applied += 1;
        debug!(
            mover = ?mover,
            next = %next.active,
            outcome = ?next.outcome,
            marks = next.board.mark_count(),
            "Move applied"
        );

        let interactive = interactive_columns(&next);
        let outcome = next.outcome;
        if outcome.is_terminal() {
            self.sink.highlight_winning_line(&next.winning_line);
        }
        self.sink.render(&next.board, &interactive);
        self.session = Some(next);

        if outcome.is_terminal() {
            info!(outcome = ?outcome, moves = self.moves_applied, "Session finished");
            self.sink.announce_outcome(outcome);
        }
    }

    fn violation(&self, what: &str) -> GameError {
        error!(phase = %self.phase(), "{}", what);
        GameError::Precondition(format!("{} (phase: {})", what, self.phase()))
    }
}

async fn with_timeout<T, F>(limit: Option<Duration>, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match limit {
        None => call.await,
        Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
            GameError::Transport(format!("engine did not answer within {:?}", limit))
        })?,
    }
}
