use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// エンジン側で許容される探索深さの上限
pub const MAX_SEARCH_DEPTH: u32 = 12;

/// 座席 (人ではなく席を表す)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    First,  // 先手
    Second, // 後手
}

impl Default for PlayerSlot {
    fn default() -> Self {
        PlayerSlot::First
    }
}

impl PlayerSlot {
    pub fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::First => PlayerSlot::Second,
            PlayerSlot::Second => PlayerSlot::First,
        }
    }

    /// `currentPlayer` as sent by the engine.
    pub fn from_wire(index: i64) -> Option<PlayerSlot> {
        match index {
            0 => Some(PlayerSlot::First),
            1 => Some(PlayerSlot::Second),
            _ => None,
        }
    }

    pub fn wire_index(self) -> i64 {
        match self {
            PlayerSlot::First => 0,
            PlayerSlot::Second => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerSlot::First => "Player 1",
            PlayerSlot::Second => "Player 2",
        }
    }

    pub fn mark(self) -> char {
        match self {
            PlayerSlot::First => 'X',
            PlayerSlot::Second => 'O',
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 座席ごとの操作主体の設定
///
/// On the wire an agent is `{"type":"negamax","depth":N}` and a human is
/// `{"type":"human"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlayerConfig {
    Human,
    #[serde(rename = "negamax")]
    Agent { depth: u32 },
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig::Human
    }
}

impl PlayerConfig {
    pub fn agent(depth: u32) -> Result<Self> {
        let config = PlayerConfig::Agent { depth };
        config.validate()?;
        Ok(config)
    }

    pub fn is_human(&self) -> bool {
        matches!(self, PlayerConfig::Human)
    }

    pub fn is_agent(&self) -> bool {
        matches!(self, PlayerConfig::Agent { .. })
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            PlayerConfig::Human => Ok(()),
            PlayerConfig::Agent { depth } if depth == 0 => Err(GameError::Config(
                "search depth must be a positive integer".to_string(),
            )),
            PlayerConfig::Agent { depth } if depth > MAX_SEARCH_DEPTH => {
                Err(GameError::Config(format!(
                    "search depth {} exceeds the maximum of {}",
                    depth, MAX_SEARCH_DEPTH
                )))
            }
            PlayerConfig::Agent { .. } => Ok(()),
        }
    }
}

impl fmt::Display for PlayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerConfig::Human => write!(f, "Human"),
            PlayerConfig::Agent { depth } => write!(f, "Negamax (depth {})", depth),
        }
    }
}

/// 対局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    None,
    Win(PlayerSlot),
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::None)
    }

    /// Decodes the engine's `winner` field.
    pub fn from_wire(winner: Option<&str>) -> Option<Outcome> {
        match winner {
            None => Some(Outcome::None),
            Some("Player 1") => Some(Outcome::Win(PlayerSlot::First)),
            Some("Player 2") => Some(Outcome::Win(PlayerSlot::Second)),
            Some("Draw") => Some(Outcome::Draw),
            Some(_) => None,
        }
    }

    pub fn to_wire(&self) -> Option<&'static str> {
        match self {
            Outcome::None => None,
            Outcome::Win(slot) => Some(slot.label()),
            Outcome::Draw => Some("Draw"),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::None => String::new(),
            Outcome::Win(slot) => format!("{} wins!", slot),
            Outcome::Draw => "It's a draw!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(PlayerSlot::First.opponent(), PlayerSlot::Second);
        assert_eq!(PlayerSlot::Second.opponent(), PlayerSlot::First);
    }

    #[test]
    fn test_slot_wire_index() {
        assert_eq!(PlayerSlot::from_wire(0), Some(PlayerSlot::First));
        assert_eq!(PlayerSlot::from_wire(1), Some(PlayerSlot::Second));
        assert_eq!(PlayerSlot::from_wire(2), None);
        assert_eq!(PlayerSlot::from_wire(-1), None);
    }

    #[test]
    fn test_player_config_wire_shape() {
        let human = serde_json::to_value(PlayerConfig::Human).unwrap();
        assert_eq!(human, serde_json::json!({ "type": "human" }));

        let agent = serde_json::to_value(PlayerConfig::Agent { depth: 3 }).unwrap();
        assert_eq!(agent, serde_json::json!({ "type": "negamax", "depth": 3 }));

        let parsed: PlayerConfig =
            serde_json::from_value(serde_json::json!({ "type": "negamax", "depth": 5 })).unwrap();
        assert_eq!(parsed, PlayerConfig::Agent { depth: 5 });
    }

    #[test]
    fn test_depth_validation() {
        assert!(PlayerConfig::agent(1).is_ok());
        assert!(PlayerConfig::agent(MAX_SEARCH_DEPTH).is_ok());
        assert!(matches!(PlayerConfig::agent(0), Err(GameError::Config(_))));
        assert!(matches!(
            PlayerConfig::agent(MAX_SEARCH_DEPTH + 1),
            Err(GameError::Config(_))
        ));
        assert!(PlayerConfig::Human.validate().is_ok());
    }

    #[test]
    fn test_outcome_wire() {
        assert_eq!(Outcome::from_wire(None), Some(Outcome::None));
        assert_eq!(
            Outcome::from_wire(Some("Player 2")),
            Some(Outcome::Win(PlayerSlot::Second))
        );
        assert_eq!(Outcome::from_wire(Some("Draw")), Some(Outcome::Draw));
        assert_eq!(Outcome::from_wire(Some("Nobody")), None);
        assert_eq!(Outcome::Win(PlayerSlot::First).message(), "Player 1 wins!");
        assert_eq!(Outcome::Draw.message(), "It's a draw!");
    }
}
