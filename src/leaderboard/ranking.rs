//! Daily ranking computation.
//!
//! Pure function of the day's completed-session facts: grouping, composite
//! scoring, a deterministic total order, dense ranks, and medal awards.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::{EngineConfig, ScoreWeights};
use crate::leaderboard::types::{LeaderboardEntry, Medal, SessionFact, UserDayTotals};

/// Ranks all users who completed at least one session on a given date.
pub struct DailyRankingEngine {
    weights: ScoreWeights,
}

impl DailyRankingEngine {
    /// Create an engine with the configured score weights.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            weights: config.score_weights,
        }
    }

    /// Compute the full leaderboard for one date.
    ///
    /// Running this twice over the same facts produces identical entries;
    /// no facts produces no entries.
    pub fn rank_day(&self, date: NaiveDate, facts: &[SessionFact]) -> Vec<LeaderboardEntry> {
        let mut totals: HashMap<Uuid, UserDayTotals> = HashMap::new();

        for fact in facts {
            let user = totals.entry(fact.user_id).or_default();
            user.total_intensity += fact.intensity;
            user.total_calories += fact.calories;
            user.total_exercises += fact.exercises;
            user.workout_count += 1;
        }

        let mut entries: Vec<LeaderboardEntry> = totals
            .into_iter()
            .map(|(user_id, user_totals)| LeaderboardEntry {
                user_id,
                date,
                total_intensity: user_totals.total_intensity,
                total_calories: user_totals.total_calories,
                total_exercises: user_totals.total_exercises,
                workout_count: user_totals.workout_count,
                score: self.score(&user_totals),
                rank: 0,
                medal: None,
            })
            .collect();

        // Ties break on calories, then workout count, then user id, so the
        // order is total and independent of grouping order.
        entries.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.total_calories.cmp(&a.total_calories))
                .then_with(|| b.workout_count.cmp(&a.workout_count))
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = (index + 1) as u32;
            entry.medal = Medal::from_rank(entry.rank);
        }

        entries
    }

    /// Composite day score, rounded to 2 decimal places.
    fn score(&self, totals: &UserDayTotals) -> f64 {
        let avg_intensity = if totals.workout_count > 0 {
            f64::from(totals.total_intensity) / f64::from(totals.workout_count)
        } else {
            0.0
        };

        let raw = avg_intensity * self.weights.intensity
            + f64::from(totals.total_calories) * self.weights.calories
            + f64::from(totals.total_exercises) * self.weights.exercises
            + f64::from(totals.workout_count) * self.weights.workout_count;

        (raw * 100.0).round() / 100.0
    }
}
