//! Friend workout streak detection.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;

/// One "this user trained on this day" fact from the trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFact {
    pub user_id: Uuid,
    pub date: NaiveDate,
    /// Completed sessions on that day
    pub workout_count: u32,
}

/// A friend's active streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    pub user_id: Uuid,
    /// Consecutive active days ending today
    pub streak: u32,
    /// Most recent day with a workout
    pub last_active_date: NaiveDate,
}

/// Detects consecutive-day workout streaks among a user's friends.
///
/// The walk is anchored strictly at `today`: a friend who trained yesterday
/// and the day before but not yet today reports a streak of 0. Product has
/// been asked to confirm whether that anchor is intended; until then the
/// behavior is kept as shipped.
pub struct StreakDetector {
    /// Trailing window inspected, in days
    window_days: i64,
    /// Minimum streak length worth reporting
    min_streak: u32,
    /// Report cap
    max_reported: usize,
}

impl StreakDetector {
    /// Create a detector with the configured thresholds.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            window_days: config.streak_window_days,
            min_streak: config.min_streak_to_report,
            max_reported: config.max_streaks_reported,
        }
    }

    /// The trailing window this detector expects facts for.
    pub fn window_days(&self) -> i64 {
        self.window_days
    }

    /// Compute streaks for the given friends from their activity facts.
    ///
    /// Returns only streaks at or above the report threshold, longest
    /// first, capped at the configured report size.
    pub fn detect(
        &self,
        today: NaiveDate,
        friend_ids: &[Uuid],
        facts: &[ActivityFact],
    ) -> Vec<StreakInfo> {
        let mut streaks = Vec::new();

        for &friend_id in friend_ids {
            let active_days: BTreeSet<NaiveDate> = facts
                .iter()
                .filter(|f| f.user_id == friend_id && f.workout_count > 0)
                .map(|f| f.date)
                .collect();

            let last_active_date = match active_days.iter().next_back() {
                Some(&date) => date,
                None => continue,
            };

            // Walk backward from today; the streak grows only while each
            // expected day (today - streak) has an active record.
            let mut streak: u32 = 0;
            for &date in active_days.iter().rev() {
                let days_back = (today - date).num_days();
                if days_back == i64::from(streak) {
                    streak += 1;
                } else {
                    break;
                }
            }

            if streak >= self.min_streak {
                streaks.push(StreakInfo {
                    user_id: friend_id,
                    streak,
                    last_active_date,
                });
            }
        }

        streaks.sort_by(|a, b| b.streak.cmp(&a.streak));
        streaks.truncate(self.max_reported);
        streaks
    }
}
