//! Session-level aggregation of exercise statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metrics::types::ExerciseStat;

/// Totals for one completed workout session.
///
/// Recomputed in full whenever the underlying exercise logs change; there
/// is no incremental state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session identifier
    pub session_id: Uuid,
    /// Athlete who performed the session
    pub user_id: Uuid,
    /// Calendar date the session belongs to
    pub date: NaiveDate,
    /// Summed calorie estimate across exercises
    pub total_calories: u32,
    /// Mean intensity score across exercises, 0-100
    pub avg_intensity: u8,
    /// Number of exercises performed
    pub total_exercises: u32,
    /// Number of sets performed
    pub total_sets: u32,
}

impl SessionSummary {
    /// Aggregate per-exercise statistics into session totals.
    ///
    /// An empty stat list yields all-zero totals, never NaN.
    pub fn from_stats(
        session_id: Uuid,
        user_id: Uuid,
        date: NaiveDate,
        stats: &[ExerciseStat],
    ) -> Self {
        let total_calories = stats.iter().map(|s| s.estimated_calories).sum();
        let total_sets = stats.iter().map(|s| s.total_sets).sum();
        let total_exercises = stats.len() as u32;

        let avg_intensity = if stats.is_empty() {
            0
        } else {
            let sum: u32 = stats.iter().map(|s| u32::from(s.intensity_score)).sum();
            (sum as f64 / stats.len() as f64).round() as u8
        };

        Self {
            session_id,
            user_id,
            date,
            total_calories,
            avg_intensity,
            total_exercises,
            total_sets,
        }
    }
}
