use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Thumbs rating. Absence of a rating is `Option::None`, never a third variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Thumb {
    Up,
    Down,
}

impl fmt::Display for Thumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thumb::Up => f.write_str("up"),
            Thumb::Down => f.write_str("down"),
        }
    }
}

impl FromStr for Thumb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Thumb::Up),
            "down" => Ok(Thumb::Down),
            other => Err(format!("unknown rating '{}', expected 'up' or 'down'", other)),
        }
    }
}

/// Persisted value of the ratings map (keyed by `MediaKey::storage_key`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingEntry {
    pub rating: Thumb,
    pub date: DateTime<Utc>,
}
