//! Daily leaderboard types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed session's contribution to the daily ranking.
///
/// The canonical input row: the storage boundary normalizes whatever shape
/// the session store returns into this DTO, with missing metric columns
/// read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFact {
    pub user_id: Uuid,
    /// Session average intensity, 0-100
    pub intensity: u32,
    /// Session calorie estimate
    pub calories: u32,
    /// Exercises performed in the session
    pub exercises: u32,
}

/// Per-user accumulator for one calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserDayTotals {
    pub total_intensity: u32,
    pub total_calories: u32,
    pub total_exercises: u32,
    /// Number of completed sessions that day
    pub workout_count: u32,
}

/// Medal tier awarded to the top three daily scorers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal for a dense rank; ranks past third get none.
    pub fn from_rank(rank: u32) -> Option<Self> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Gold => "gold",
            Medal::Silver => "silver",
            Medal::Bronze => "bronze",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "gold" => Some(Medal::Gold),
            "silver" => Some(Medal::Silver),
            "bronze" => Some(Medal::Bronze),
            _ => None,
        }
    }
}

/// One row of the daily leaderboard, keyed by (user_id, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub total_intensity: u32,
    pub total_calories: u32,
    pub total_exercises: u32,
    pub workout_count: u32,
    /// Composite score, rounded to 2 decimal places
    pub score: f64,
    /// Dense rank, 1..N, unique per date
    pub rank: u32,
    /// Derived from rank; never set independently
    pub medal: Option<Medal>,
}
