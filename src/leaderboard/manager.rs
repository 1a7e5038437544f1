//! Leaderboard recalculation and queries.
//!
//! Reads the day's completed-session facts, runs the ranking engine, and
//! replaces that date's leaderboard rows in one transaction. Also provides
//! the read queries the application serves the leaderboard pages from.

use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::leaderboard::ranking::DailyRankingEngine;
use crate::leaderboard::types::{LeaderboardEntry, Medal, SessionFact};
use crate::storage::database::parse_date;
use crate::storage::Database;

/// Raw leaderboard row as stored, before id/date parsing.
type EntryRow = (
    String,
    String,
    u32,
    u32,
    u32,
    u32,
    f64,
    u32,
    Option<String>,
);

/// Daily leaderboard service.
pub struct LeaderboardManager {
    db: Arc<Database>,
    engine: DailyRankingEngine,
}

impl LeaderboardManager {
    /// Create a new leaderboard manager.
    pub fn new(db: Arc<Database>, engine: DailyRankingEngine) -> Self {
        Self { db, engine }
    }

    /// Recalculate and replace the leaderboard for one date.
    ///
    /// Returns the number of entries written. A date without completed
    /// sessions writes nothing and leaves any previous rows untouched.
    /// The replacement is a single transaction, so a failure never leaves
    /// a partially written day; rerunning with unchanged session facts
    /// produces identical rows.
    pub fn recalculate(&self, date: NaiveDate) -> Result<usize, LeaderboardError> {
        let facts = self.session_facts(date)?;
        if facts.is_empty() {
            tracing::debug!(%date, "No completed sessions; leaderboard unchanged");
            return Ok(0);
        }

        let entries = self.engine.rank_day(date, &facts);

        let conn = self.db.connection();
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;

        tx.execute(
            "DELETE FROM daily_leaderboard WHERE date = ?1",
            [date_str(date)],
        )
        .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;

        for entry in &entries {
            tx.execute(
                "INSERT INTO daily_leaderboard (user_id, date, total_intensity, total_calories,
                 total_exercises, workout_count, score, rank, medal)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    entry.user_id.to_string(),
                    date_str(entry.date),
                    entry.total_intensity,
                    entry.total_calories,
                    entry.total_exercises,
                    entry.workout_count,
                    entry.score,
                    entry.rank,
                    entry.medal.map(|m| m.as_str()),
                ],
            )
            .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;

        tracing::debug!(%date, entries = entries.len(), "Leaderboard recalculated");
        Ok(entries.len())
    }

    /// All completed-session facts for a date, NULL metrics read as zero.
    pub fn session_facts(&self, date: NaiveDate) -> Result<Vec<SessionFact>, LeaderboardError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                "SELECT user_id, COALESCE(intensity, 0), COALESCE(calories, 0),
                 COALESCE(exercises_count, 0)
                 FROM workout_sessions
                 WHERE workout_date = ?1 AND completed_at IS NOT NULL",
            )
            .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([date_str(date)], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, u32>(3)?,
                ))
            })
            .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;

        let mut facts = Vec::new();
        for row in rows {
            let (user_id_str, intensity, calories, exercises) =
                row.map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;

            facts.push(SessionFact {
                user_id: Uuid::parse_str(&user_id_str)
                    .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?,
                intensity,
                calories,
                exercises,
            });
        }

        Ok(facts)
    }

    /// Get the leaderboard for a date, ordered by rank.
    pub fn entries_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                "SELECT user_id, date, total_intensity, total_calories, total_exercises,
                 workout_count, score, rank, medal
                 FROM daily_leaderboard
                 WHERE date = ?1
                 ORDER BY rank ASC",
            )
            .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([date_str(date)], entry_row)
            .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;

        collect_entries(rows)
    }

    /// Get the top N entries for a date.
    pub fn top_entries(
        &self,
        date: NaiveDate,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                "SELECT user_id, date, total_intensity, total_calories, total_exercises,
                 workout_count, score, rank, medal
                 FROM daily_leaderboard
                 WHERE date = ?1
                 ORDER BY rank ASC
                 LIMIT ?2",
            )
            .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(
                rusqlite::params![date_str(date), limit as i64],
                entry_row,
            )
            .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;

        collect_entries(rows)
    }

    /// Get a single user's entry for a date, if they are ranked.
    pub fn user_entry(
        &self,
        user_id: &Uuid,
        date: NaiveDate,
    ) -> Result<Option<LeaderboardEntry>, LeaderboardError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                "SELECT user_id, date, total_intensity, total_calories, total_exercises,
                 workout_count, score, rank, medal
                 FROM daily_leaderboard
                 WHERE user_id = ?1 AND date = ?2",
            )
            .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;

        let mut rows = stmt
            .query_map(
                rusqlite::params![user_id.to_string(), date_str(date)],
                entry_row,
            )
            .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;

        match rows.next() {
            Some(row) => {
                let raw = row.map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;
                Ok(Some(parse_entry(raw)?))
            }
            None => Ok(None),
        }
    }
}

fn date_str(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn entry_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EntryRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn parse_entry(raw: EntryRow) -> Result<LeaderboardEntry, LeaderboardError> {
    let (user_id_str, date_string, total_intensity, total_calories, total_exercises, workout_count, score, rank, medal_str) =
        raw;

    Ok(LeaderboardEntry {
        user_id: Uuid::parse_str(&user_id_str)
            .map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?,
        date: parse_date(&date_string).map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?,
        total_intensity,
        total_calories,
        total_exercises,
        workout_count,
        score,
        rank,
        medal: medal_str.as_deref().and_then(Medal::from_str),
    })
}

fn collect_entries(
    rows: impl Iterator<Item = rusqlite::Result<EntryRow>>,
) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
    let mut entries = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| LeaderboardError::DatabaseError(e.to_string()))?;
        entries.push(parse_entry(raw)?);
    }
    Ok(entries)
}

/// Leaderboard errors.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
