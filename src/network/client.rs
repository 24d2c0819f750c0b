use crate::config::ClientConfig;
use crate::core::{MoveResult, PlayerConfig, SessionState};
use crate::error::{GameError, Result};
use crate::network::protocol::{
    ErrorBody, MakeMoveRequest, MakeMoveResponse, StartGameRequest, StartGameResponse,
    MAKE_MOVE_PATH, START_GAME_PATH,
};
use crate::network::RemoteGameClient;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

/// Which call a failed response belongs to; decides how 4xx is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Begin,
    HumanMove,
    AgentMove,
}

pub struct HttpGameClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGameClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GameError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.engine_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req, call: Call) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        trace!(%url, ?call, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| GameError::Transport(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_failure(call, status, &text));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| GameError::Transport(format!("failed to parse engine response: {}", e)))
    }
}

/// エンジンのエラー応答を分類する
fn classify_failure(call: Call, status: StatusCode, body: &str) -> GameError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            }
        });

    if status.is_client_error() {
        match call {
            Call::Begin => return GameError::Config(message),
            Call::HumanMove => return GameError::InvalidMove(message),
            Call::AgentMove => {}
        }
    }
    GameError::Transport(format!("engine error {}: {}", status, message))
}

#[async_trait]
impl RemoteGameClient for HttpGameClient {
    async fn begin(&self, p1: PlayerConfig, p2: PlayerConfig) -> Result<SessionState> {
        p1.validate()?;
        p2.validate()?;

        let request = StartGameRequest {
            player1: p1,
            player2: p2,
        };
        let response: StartGameResponse = self.post(START_GAME_PATH, &request, Call::Begin).await?;
        debug!(current_player = response.current_player, "Engine started a game");
        response.into_session((p1, p2))
    }

    async fn advance(&self, column: Option<usize>) -> Result<MoveResult> {
        let call = if column.is_some() {
            Call::HumanMove
        } else {
            Call::AgentMove
        };
        let request = MakeMoveRequest { column };
        let response: MakeMoveResponse = self.post(MAKE_MOVE_PATH, &request, call).await?;
        response.into_move_result()
    }
}
