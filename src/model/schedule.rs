use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Scheduled,
    Live,
    Completed,
    Cancelled,
}

impl GameStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::Scheduled => "Scheduled",
            GameStatus::Live => "Live",
            GameStatus::Completed => "Completed",
            GameStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub game_date: NaiveDate,
    /// `HH:MM:SS` whenever the backend value is a valid time.
    #[serde(deserialize_with = "deserialize_game_time")]
    pub game_time: String,
    pub status: GameStatus,
}

/// Body for creating or editing a scheduled game. Only constructible with a valid time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameInput {
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub game_date: NaiveDate,
    game_time: String,
    pub status: GameStatus,
}

impl GameInput {
    pub fn new(
        home_team_id: i64,
        away_team_id: i64,
        game_date: NaiveDate,
        game_time: &str,
        status: GameStatus,
    ) -> ApiResult<Self> {
        let game_time = normalize_game_time(game_time)
            .ok_or_else(|| ApiError::InvalidInput(format!("game time {game_time:?} is not HH:MM or HH:MM:SS")))?;
        Ok(Self { home_team_id, away_team_id, game_date, game_time, status })
    }

    pub fn game_time(&self) -> &str {
        &self.game_time
    }
}

/// Coerce a game time to `HH:MM:SS`; two-part input gets `:00` seconds.
pub fn normalize_game_time(input: &str) -> Option<String> {
    let s = input.trim();
    let parsed = match s.split(':').count() {
        2 => NaiveTime::parse_from_str(s, "%H:%M").ok(),
        3 => NaiveTime::parse_from_str(s, "%H:%M:%S").ok(),
        _ => None,
    }?;
    Some(parsed.format("%H:%M:%S").to_string())
}

fn deserialize_game_time<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_game_time(&raw).unwrap_or_else(|| {
        warn!(game_time = %raw, "Game time is not HH:MM[:SS]; keeping it as sent");
        raw
    }))
}
