//! Database schema definitions for the GymQuest engine.

/// SQL schema for creating all engine tables.
pub const SCHEMA: &str = r#"
-- Completed workout session summaries
CREATE TABLE IF NOT EXISTS workout_sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    workout_date TEXT NOT NULL,
    intensity INTEGER,
    calories INTEGER,
    exercises_count INTEGER,
    sets_count INTEGER,
    completed_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_sessions_date ON workout_sessions(workout_date);
CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON workout_sessions(user_id);

-- Daily leaderboard, one row per user per date
CREATE TABLE IF NOT EXISTS daily_leaderboard (
    user_id TEXT NOT NULL,
    date TEXT NOT NULL,
    total_intensity INTEGER NOT NULL,
    total_calories INTEGER NOT NULL,
    total_exercises INTEGER NOT NULL,
    workout_count INTEGER NOT NULL,
    score REAL NOT NULL,
    rank INTEGER NOT NULL,
    medal TEXT,
    PRIMARY KEY (user_id, date)
);

CREATE INDEX IF NOT EXISTS idx_leaderboard_date ON daily_leaderboard(date);
CREATE INDEX IF NOT EXISTS idx_leaderboard_user_date ON daily_leaderboard(user_id, date);
"#;

/// Schema version tracking table.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;
