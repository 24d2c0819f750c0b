/// 対局クライアントのエラー分類
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Malformed player or client configuration. Blocks session start only.
    #[error("configuration error: {0}")]
    Config(String),

    /// Communication or server failure. Never leaves state half-applied.
    #[error("transport error: {0}")]
    Transport(String),

    /// The engine refused the column.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// An operation was invoked in the wrong session state.
    #[error("precondition violated: {0}")]
    Precondition(String),
}

impl GameError {
    /// Whether re-issuing the same operation can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GameError::Transport(_) | GameError::InvalidMove(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
