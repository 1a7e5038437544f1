//! Database operations using rusqlite.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::metrics::SessionSummary;
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &PathBuf) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        // Create schema version table
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        // Check current version
        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            // Initial schema
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            // Record version
            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        }

        // Future migrations would go here:
        // if from_version < 2 { ... }

        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ========== Session Summary Operations ==========

    /// Insert or update a session's summary.
    ///
    /// Keyed by session id; the metric columns are replaced, so recomputing
    /// a summary from changed logs overwrites the previous values without
    /// touching the completion timestamp.
    pub fn upsert_session_summary(&self, summary: &SessionSummary) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO workout_sessions (id, user_id, workout_date, intensity, calories,
                 exercises_count, sets_count, completed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL)
                 ON CONFLICT(id) DO UPDATE SET
                     intensity = excluded.intensity,
                     calories = excluded.calories,
                     exercises_count = excluded.exercises_count,
                     sets_count = excluded.sets_count",
                params![
                    summary.session_id.to_string(),
                    summary.user_id.to_string(),
                    summary.date.format("%Y-%m-%d").to_string(),
                    summary.avg_intensity,
                    summary.total_calories,
                    summary.total_exercises,
                    summary.total_sets,
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Mark a session as completed at the given time.
    pub fn mark_session_completed(
        &self,
        session_id: &Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "UPDATE workout_sessions SET completed_at = ?1 WHERE id = ?2",
                params![completed_at.to_rfc3339(), session_id.to_string()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Get a session's summary by id.
    pub fn get_session_summary(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<SessionSummary>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, user_id, workout_date, COALESCE(intensity, 0),
                 COALESCE(calories, 0), COALESCE(exercises_count, 0), COALESCE(sets_count, 0)
                 FROM workout_sessions WHERE id = ?1",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut rows = stmt
            .query([session_id.to_string()])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let row = match rows
            .next()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
        {
            Some(row) => row,
            None => return Ok(None),
        };

        let id_str: String = row
            .get(0)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let user_id_str: String = row
            .get(1)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let date_str: String = row
            .get(2)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(Some(SessionSummary {
            session_id: Uuid::parse_str(&id_str)
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
            user_id: Uuid::parse_str(&user_id_str)
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
            date: parse_date(&date_str)?,
            avg_intensity: row
                .get(3)
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
            total_calories: row
                .get(4)
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
            total_exercises: row
                .get(5)
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
            total_sets: row
                .get(6)
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
        }))
    }

    /// Count all stored sessions.
    pub fn count_sessions(&self) -> Result<u32, DatabaseError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM workout_sessions", [], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }
}

/// Parse a stored `YYYY-MM-DD` date column.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| DatabaseError::QueryFailed(e.to_string()))
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}
