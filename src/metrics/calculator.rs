//! Per-exercise metrics calculator.
//!
//! Turns the logged sets of one exercise into volume totals, a MET-based
//! calorie estimate, and a 0-100 intensity score.

use crate::config::EngineConfig;
use crate::metrics::types::{ExerciseStat, SetRecord};

/// MET value for vigorous resistance training (relative intensity > 0.5).
const MET_VIGOROUS: f64 = 6.0;
/// MET value for moderate resistance training (relative intensity > 0.2).
const MET_MODERATE: f64 = 5.0;
/// MET value for light resistance training.
const MET_LIGHT: f64 = 3.5;

const VIGOROUS_THRESHOLD: f64 = 0.5;
const MODERATE_THRESHOLD: f64 = 0.2;

/// Calculates per-exercise training metrics from logged sets.
pub struct MetricsCalculator {
    /// Athlete body weight in kg, used for bodyweight sets and the
    /// calorie estimate
    body_weight_kg: f64,
    /// Assumed minutes per set including rest
    minutes_per_set: u32,
}

impl MetricsCalculator {
    /// Create a calculator with the configured default body weight.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_body_weight(config, None)
    }

    /// Create a calculator for a specific athlete. Falls back to the
    /// configured default when the body weight is unknown or unusable.
    pub fn with_body_weight(config: &EngineConfig, body_weight_kg: Option<f64>) -> Self {
        let body_weight_kg = body_weight_kg
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(config.default_body_weight_kg);

        Self {
            body_weight_kg,
            minutes_per_set: config.minutes_per_set,
        }
    }

    /// The body weight this calculator resolves bodyweight sets against.
    pub fn body_weight_kg(&self) -> f64 {
        self.body_weight_kg
    }

    /// Compute the statistics for one exercise's sets.
    ///
    /// Malformed records are skipped; sets with neither reps nor weight are
    /// treated as not performed. Zero performed sets yields an all-zero stat.
    pub fn exercise_stats(
        &self,
        exercise_name: &str,
        muscle_group: &str,
        sets: &[SetRecord],
    ) -> ExerciseStat {
        let mut total_sets = 0u32;
        let mut total_reps = 0u32;
        let mut total_weight = 0.0f64;
        let mut max_weight = 0.0f64;

        for set in sets {
            if !set.is_valid() {
                tracing::warn!(exercise = exercise_name, "Skipping malformed set record");
                continue;
            }
            if !set.is_performed() {
                continue;
            }

            let effective = set.effective_weight(self.body_weight_kg);
            total_sets += 1;
            total_reps += set.reps;
            total_weight += effective * set.reps as f64;
            max_weight = max_weight.max(effective);
        }

        if total_sets == 0 {
            return ExerciseStat::empty(exercise_name, muscle_group);
        }

        let relative_intensity = if total_reps > 0 {
            (total_weight / total_reps as f64) / self.body_weight_kg
        } else {
            0.0
        };

        let met = if relative_intensity > VIGOROUS_THRESHOLD {
            MET_VIGOROUS
        } else if relative_intensity > MODERATE_THRESHOLD {
            MET_MODERATE
        } else {
            MET_LIGHT
        };

        let duration_min = (total_sets * self.minutes_per_set) as f64;
        let estimated_calories = (met * self.body_weight_kg * duration_min / 60.0).round() as u32;

        let strength_score = (relative_intensity * 80.0).min(40.0);
        let volume_score = (total_reps as f64 * 0.5).min(30.0);
        let set_score = (total_sets as f64 * 5.0).min(30.0);
        let intensity_score = (strength_score + volume_score + set_score)
            .round()
            .min(100.0) as u8;

        ExerciseStat {
            exercise_name: exercise_name.to_string(),
            muscle_group: muscle_group.to_string(),
            total_sets,
            total_reps,
            total_weight,
            max_weight,
            estimated_calories,
            intensity_score,
        }
    }
}
