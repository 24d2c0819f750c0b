use crate::core::PlayerConfig;
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "connect4_config.json";
pub const DEFAULT_ENGINE_URL: &str = "http://127.0.0.1:5001";
pub const ENGINE_URL_ENV: &str = "CONNECT4_ENGINE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub engine_url: String,
    /// 0 disables the per-call timeout.
    pub request_timeout_ms: u64,
    pub log_file: Option<PathBuf>,
    pub default_players: (PlayerConfig, PlayerConfig),
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            engine_url: DEFAULT_ENGINE_URL.to_string(),
            request_timeout_ms: 30_000,
            log_file: Some(PathBuf::from("connect4-client.log")),
            default_players: (PlayerConfig::Human, PlayerConfig::Agent { depth: 4 }),
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// 設定ファイルが無い/壊れている場合はデフォルト値
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Using default client config");
                Self::default()
            }
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.request_timeout_ms))
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.engine_url.trim().is_empty() {
            return Err(GameError::Config("engine_url must not be empty".to_string()));
        }
        if !self.engine_url.starts_with("http://") && !self.engine_url.starts_with("https://") {
            return Err(GameError::Config(format!(
                "engine_url must be an http(s) URL, got '{}'",
                self.engine_url
            )));
        }
        self.default_players.0.validate()?;
        self.default_players.1.validate()?;
        Ok(())
    }
}
