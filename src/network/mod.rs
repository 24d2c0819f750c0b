pub mod client;
pub mod protocol;

use crate::core::{MoveResult, PlayerConfig, SessionState};
use crate::error::Result;
use async_trait::async_trait;

pub use client::HttpGameClient;

/// 対局エンジン (盤面・手番・勝敗の唯一の正)
///
/// Every successful call returns a complete, self-consistent state. Callers
/// never compute board deltas themselves.
#[async_trait]
pub trait RemoteGameClient: Send + Sync {
    /// Starts a new game on the engine.
    ///
    /// Fails with `Config` for a structurally invalid seat and `Transport`
    /// on communication failure.
    async fn begin(&self, p1: PlayerConfig, p2: PlayerConfig) -> Result<SessionState>;

    /// `None` asks the engine to play the active agent's move; `Some(c)`
    /// applies a human drop into column `c`.
    async fn advance(&self, column: Option<usize>) -> Result<MoveResult>;
}
