//! エンジンとの盤面 (Grid<Cell>) の相互変換
//!
//! Used as `#[serde(with = "crate::core::serialization")]` on grid fields.

use crate::core::board::Cell;
use crate::core::PlayerSlot;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn cell_to_wire(cell: Cell) -> &'static str {
    match cell {
        Cell::Owner(PlayerSlot::First) => "X",
        Cell::Owner(PlayerSlot::Second) => "O",
        Cell::Empty => " ",
    }
}

pub fn cell_from_wire(s: &str) -> Cell {
    match s {
        "X" => Cell::Owner(PlayerSlot::First),
        "O" => Cell::Owner(PlayerSlot::Second),
        _ => Cell::Empty,
    }
}

pub fn serialize<S>(grid: &[Vec<Cell>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let vec: Vec<Vec<&str>> = grid
        .iter()
        .map(|row| row.iter().map(|c| cell_to_wire(*c)).collect())
        .collect();
    vec.serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Vec<Cell>>, D::Error>
where
    D: Deserializer<'de>,
{
    // 空文字や null、数値 0 なども空マスとして扱う
    let raw: Vec<Vec<serde_json::Value>> = Vec::deserialize(deserializer)?;
    if raw.is_empty() || raw[0].is_empty() {
        return Err(D::Error::custom("board grid is empty"));
    }
    let width = raw[0].len();
    if raw.iter().any(|row| row.len() != width) {
        return Err(D::Error::custom("board grid is not rectangular"));
    }

    Ok(raw
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => cell_from_wire(&s),
                    _ => Cell::Empty,
                })
                .collect()
        })
        .collect())
}
