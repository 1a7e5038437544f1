//! Integration tests for friend streak queries against a real store.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use gymquest::config::EngineConfig;
use gymquest::leaderboard::{DailyRankingEngine, LeaderboardManager};
use gymquest::metrics::SessionSummary;
use gymquest::storage::Database;
use gymquest::streaks::{StreakDetector, StreakManager};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()
}

fn managers(db: Arc<Database>) -> (LeaderboardManager, StreakManager) {
    let config = EngineConfig::default();
    (
        LeaderboardManager::new(db.clone(), DailyRankingEngine::new(&config)),
        StreakManager::new(db, StreakDetector::new(&config)),
    )
}

/// Log a completed session and refresh the leaderboard for that date.
fn train_on(
    db: &Database,
    leaderboard: &LeaderboardManager,
    user_id: Uuid,
    date: NaiveDate,
) -> Result<()> {
    let session_id = Uuid::new_v4();
    db.upsert_session_summary(&SessionSummary {
        session_id,
        user_id,
        date,
        total_calories: 250,
        avg_intensity: 60,
        total_exercises: 4,
        total_sets: 12,
    })?;
    db.mark_session_completed(&session_id, Utc::now())?;
    leaderboard.recalculate(date)?;
    Ok(())
}

#[test]
fn test_streak_detected_through_store() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let (leaderboard, streaks) = managers(db.clone());

    let friend = Uuid::new_v4();
    for days_ago in 0..4 {
        train_on(&db, &leaderboard, friend, today() - Duration::days(days_ago))?;
    }

    let reported = streaks.friend_streaks(today(), &[friend])?;

    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].streak, 4);
    assert_eq!(reported[0].last_active_date, today());

    Ok(())
}

#[test]
fn test_streak_requires_training_today() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let (leaderboard, streaks) = managers(db.clone());

    let friend = Uuid::new_v4();
    for days_ago in 1..5 {
        train_on(&db, &leaderboard, friend, today() - Duration::days(days_ago))?;
    }

    // Four consecutive days ending yesterday, but the walk anchors at today
    let reported = streaks.friend_streaks(today(), &[friend])?;
    assert!(reported.is_empty());

    Ok(())
}

#[test]
fn test_no_friends_no_query() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let (_, streaks) = managers(db);

    assert!(streaks.friend_streaks(today(), &[])?.is_empty());

    Ok(())
}

#[test]
fn test_window_excludes_old_activity() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let (leaderboard, streaks) = managers(db.clone());

    let friend = Uuid::new_v4();
    // Ancient activity only
    for days_ago in 30..34 {
        train_on(&db, &leaderboard, friend, today() - Duration::days(days_ago))?;
    }

    let facts = streaks.activity_window(&[friend], today() - Duration::days(7))?;
    assert!(facts.is_empty());
    assert!(streaks.friend_streaks(today(), &[friend])?.is_empty());

    Ok(())
}

#[test]
fn test_only_listed_friends_reported() -> Result<()> {
    let db = Arc::new(Database::open_in_memory()?);
    let (leaderboard, streaks) = managers(db.clone());

    let friend = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    for days_ago in 0..3 {
        let day = today() - Duration::days(days_ago);
        train_on(&db, &leaderboard, friend, day)?;
        train_on(&db, &leaderboard, stranger, day)?;
    }

    let reported = streaks.friend_streaks(today(), &[friend])?;

    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].user_id, friend);

    Ok(())
}
