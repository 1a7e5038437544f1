//! Friend streak queries.
//!
//! Pulls the trailing activity window from the daily leaderboard and runs
//! the streak detector over it.

use chrono::{Duration, Local, NaiveDate};
use std::sync::Arc;
use uuid::Uuid;

use crate::storage::database::parse_date;
use crate::storage::Database;
use crate::streaks::detector::{ActivityFact, StreakDetector, StreakInfo};

/// Streak query service.
pub struct StreakManager {
    db: Arc<Database>,
    detector: StreakDetector,
}

impl StreakManager {
    /// Create a new streak manager.
    pub fn new(db: Arc<Database>, detector: StreakDetector) -> Self {
        Self { db, detector }
    }

    /// Streaks among the given friends, anchored at the local date.
    pub fn friend_streaks_today(
        &self,
        friend_ids: &[Uuid],
    ) -> Result<Vec<StreakInfo>, StreakError> {
        self.friend_streaks(Local::now().date_naive(), friend_ids)
    }

    /// Streaks among the given friends, anchored at an explicit date.
    pub fn friend_streaks(
        &self,
        today: NaiveDate,
        friend_ids: &[Uuid],
    ) -> Result<Vec<StreakInfo>, StreakError> {
        if friend_ids.is_empty() {
            return Ok(Vec::new());
        }

        let since = today - Duration::days(self.detector.window_days());
        let facts = self.activity_window(friend_ids, since)?;

        Ok(self.detector.detect(today, friend_ids, &facts))
    }

    /// Active-day facts for the given users since a date, newest first.
    pub fn activity_window(
        &self,
        user_ids: &[Uuid],
        since: NaiveDate,
    ) -> Result<Vec<ActivityFact>, StreakError> {
        let conn = self.db.connection();

        let placeholders = vec!["?"; user_ids.len()].join(", ");
        let sql = format!(
            "SELECT user_id, date, workout_count
             FROM daily_leaderboard
             WHERE user_id IN ({placeholders}) AND date >= ? AND workout_count > 0
             ORDER BY date DESC"
        );

        let mut values: Vec<String> = user_ids.iter().map(Uuid::to_string).collect();
        values.push(since.format("%Y-%m-%d").to_string());

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StreakError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(rusqlite::params_from_iter(values.iter()), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            })
            .map_err(|e| StreakError::DatabaseError(e.to_string()))?;

        let mut facts = Vec::new();
        for row in rows {
            let (user_id_str, date_string, workout_count) =
                row.map_err(|e| StreakError::DatabaseError(e.to_string()))?;

            facts.push(ActivityFact {
                user_id: Uuid::parse_str(&user_id_str)
                    .map_err(|e| StreakError::DatabaseError(e.to_string()))?,
                date: parse_date(&date_string)
                    .map_err(|e| StreakError::DatabaseError(e.to_string()))?,
                workout_count,
            });
        }

        Ok(facts)
    }
}

/// Streak query errors.
#[derive(Debug, thiserror::Error)]
pub enum StreakError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
