//! Integration tests for leaderboard recalculation against a real store.

use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use gymquest::config::EngineConfig;
use gymquest::leaderboard::{DailyRankingEngine, LeaderboardManager, Medal};
use gymquest::metrics::SessionSummary;
use gymquest::storage::Database;

fn manager(db: Arc<Database>) -> LeaderboardManager {
    let config = EngineConfig::default();
    LeaderboardManager::new(db, DailyRankingEngine::new(&config))
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()
}

/// Insert a completed session for a user on a date.
fn completed_session(
    db: &Database,
    user_id: Uuid,
    date: NaiveDate,
    intensity: u8,
    calories: u32,
    exercises: u32,
) -> Result<Uuid> {
    let session_id = Uuid::new_v4();
    db.upsert_session_summary(&SessionSummary {
        session_id,
        user_id,
        date,
        total_calories: calories,
        avg_intensity: intensity,
        total_exercises: exercises,
        total_sets: exercises * 3,
    })?;
    db.mark_session_completed(&session_id, Utc::now())?;
    Ok(session_id)
}

#[test]
fn test_recalculate_writes_ranked_entries() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let manager = manager(db.clone());

    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();
    completed_session(&db, user_a, date(), 50, 200, 3)?;
    completed_session(&db, user_b, date(), 80, 500, 6)?;

    let written = manager.recalculate(date())?;
    assert_eq!(written, 2);

    let entries = manager.entries_for_date(date())?;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].user_id, user_b);
    assert_eq!(entries[0].rank, 1);
    assert_eq!(entries[0].medal, Some(Medal::Gold));
    assert_eq!(entries[1].user_id, user_a);
    assert_eq!(entries[1].rank, 2);
    assert_eq!(entries[1].medal, Some(Medal::Silver));

    Ok(())
}

#[test]
fn test_recalculate_is_idempotent() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let manager = manager(db.clone());

    for _ in 0..4 {
        completed_session(&db, Uuid::new_v4(), date(), 70, 300, 5)?;
    }

    manager.recalculate(date())?;
    let first = manager.entries_for_date(date())?;

    manager.recalculate(date())?;
    let second = manager.entries_for_date(date())?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_incomplete_sessions_excluded() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let manager = manager(db.clone());

    let finished = Uuid::new_v4();
    let unfinished = Uuid::new_v4();
    completed_session(&db, finished, date(), 70, 300, 5)?;
    // Summary written but never marked completed
    db.upsert_session_summary(&SessionSummary {
        session_id: Uuid::new_v4(),
        user_id: unfinished,
        date: date(),
        total_calories: 999,
        avg_intensity: 99,
        total_exercises: 9,
        total_sets: 27,
    })?;

    manager.recalculate(date())?;
    let entries = manager.entries_for_date(date())?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user_id, finished);

    Ok(())
}

#[test]
fn test_empty_date_leaves_previous_rows() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let manager = manager(db.clone());

    completed_session(&db, Uuid::new_v4(), date(), 70, 300, 5)?;
    manager.recalculate(date())?;
    assert_eq!(manager.entries_for_date(date())?.len(), 1);

    // A different date with no sessions writes nothing...
    let other = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();
    assert_eq!(manager.recalculate(other)?, 0);
    assert!(manager.entries_for_date(other)?.is_empty());

    // ...and the recalculated date is untouched
    assert_eq!(manager.entries_for_date(date())?.len(), 1);

    Ok(())
}

#[test]
fn test_replace_drops_stale_entries() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let manager = manager(db.clone());

    let early_bird = Uuid::new_v4();
    let session = completed_session(&db, early_bird, date(), 70, 300, 5)?;
    manager.recalculate(date())?;

    // The session's logs change and the summary is recomputed smaller
    db.upsert_session_summary(&SessionSummary {
        session_id: session,
        user_id: early_bird,
        date: date(),
        total_calories: 100,
        avg_intensity: 40,
        total_exercises: 2,
        total_sets: 6,
    })?;
    manager.recalculate(date())?;

    let entries = manager.entries_for_date(date())?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].total_calories, 100);
    assert_eq!(entries[0].total_intensity, 40);

    Ok(())
}

#[test]
fn test_null_metrics_read_as_zero() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let manager = manager(db.clone());

    let user = Uuid::new_v4();
    // Insert a completed session with NULL metric columns directly
    db.connection().execute(
        "INSERT INTO workout_sessions (id, user_id, workout_date, completed_at)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            Uuid::new_v4().to_string(),
            user.to_string(),
            "2025-06-12",
            Utc::now().to_rfc3339(),
        ],
    )?;

    manager.recalculate(date())?;
    let entries = manager.entries_for_date(date())?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].total_intensity, 0);
    assert_eq!(entries[0].total_calories, 0);
    assert_eq!(entries[0].total_exercises, 0);
    assert_eq!(entries[0].workout_count, 1);
    // workout_count alone scores 10.0
    assert!((entries[0].score - 10.0).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_user_entry_and_top_entries() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let manager = manager(db.clone());

    let users: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
    for (i, &user) in users.iter().enumerate() {
        completed_session(&db, user, date(), 90 - 10 * i as u8, 300, 5)?;
    }
    manager.recalculate(date())?;

    let top3 = manager.top_entries(date(), 3)?;
    assert_eq!(top3.len(), 3);
    assert_eq!(top3[0].medal, Some(Medal::Gold));
    assert_eq!(top3[2].medal, Some(Medal::Bronze));

    let ranked = manager.user_entry(&users[4], date())?.expect("entry");
    assert_eq!(ranked.rank, 5);
    assert_eq!(ranked.medal, None);

    let stranger = manager.user_entry(&Uuid::new_v4(), date())?;
    assert!(stranger.is_none());

    Ok(())
}

#[test]
fn test_multiple_sessions_same_user_same_day() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let manager = manager(db.clone());

    let user = Uuid::new_v4();
    completed_session(&db, user, date(), 60, 200, 4)?;
    completed_session(&db, user, date(), 80, 400, 6)?;

    manager.recalculate(date())?;
    let entry = manager.user_entry(&user, date())?.expect("entry");

    assert_eq!(entry.workout_count, 2);
    assert_eq!(entry.total_intensity, 140);
    assert_eq!(entry.total_calories, 600);
    assert_eq!(entry.total_exercises, 10);

    Ok(())
}

#[test]
fn test_dates_are_independent() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let manager = manager(db.clone());

    let user = Uuid::new_v4();
    let day_one = date();
    let day_two = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();
    completed_session(&db, user, day_one, 70, 300, 5)?;
    completed_session(&db, user, day_two, 50, 150, 2)?;

    manager.recalculate(day_one)?;
    manager.recalculate(day_two)?;

    let first = manager.user_entry(&user, day_one)?.expect("entry");
    let second = manager.user_entry(&user, day_two)?.expect("entry");
    assert_eq!(first.total_calories, 300);
    assert_eq!(second.total_calories, 150);

    Ok(())
}
