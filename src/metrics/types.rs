//! Core metric input and output types.

use serde::{Deserialize, Serialize};

/// One logged set of an exercise.
///
/// Ephemeral input to the metrics calculator; never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    /// Repetitions performed
    pub reps: u32,
    /// Weight lifted in kilograms
    pub weight: f64,
    /// Whether the set was performed with body weight
    pub is_bodyweight: bool,
    /// Additional weight on top of body weight (weighted dips etc.)
    pub extra_weight: f64,
}

impl SetRecord {
    /// Create a plain weighted set.
    pub fn new(reps: u32, weight: f64) -> Self {
        Self {
            reps,
            weight,
            is_bodyweight: false,
            extra_weight: 0.0,
        }
    }

    /// Create a bodyweight set with optional extra weight.
    pub fn bodyweight(reps: u32, extra_weight: f64) -> Self {
        Self {
            reps,
            weight: 0.0,
            is_bodyweight: true,
            extra_weight,
        }
    }

    /// A record is well-formed when its weight fields are finite and
    /// non-negative. Malformed records are skipped, not fatal.
    pub fn is_valid(&self) -> bool {
        self.weight.is_finite()
            && self.weight >= 0.0
            && self.extra_weight.is_finite()
            && self.extra_weight >= 0.0
    }

    /// A set counts as performed when it has any reps or any weight;
    /// an all-zero row is treated as not performed.
    pub fn is_performed(&self) -> bool {
        self.reps > 0 || self.weight > 0.0
    }

    /// The weight actually moved: body weight plus extra for bodyweight
    /// sets, the logged weight otherwise.
    pub fn effective_weight(&self, body_weight_kg: f64) -> f64 {
        if self.is_bodyweight {
            body_weight_kg + self.extra_weight
        } else {
            self.weight
        }
    }
}

/// Derived statistics for one exercise within one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseStat {
    /// Exercise display name
    pub exercise_name: String,
    /// Muscle group the exercise targets
    pub muscle_group: String,
    /// Number of performed sets
    pub total_sets: u32,
    /// Total repetitions across all sets
    pub total_reps: u32,
    /// Total weight-volume in kg (effective weight × reps, summed)
    pub total_weight: f64,
    /// Heaviest effective weight of any set in kg
    pub max_weight: f64,
    /// Estimated energy expenditure in kcal
    pub estimated_calories: u32,
    /// Composite intensity score, 0-100
    pub intensity_score: u8,
}

impl ExerciseStat {
    /// An all-zero stat for an exercise with no performed sets.
    pub fn empty(exercise_name: &str, muscle_group: &str) -> Self {
        Self {
            exercise_name: exercise_name.to_string(),
            muscle_group: muscle_group.to_string(),
            total_sets: 0,
            total_reps: 0,
            total_weight: 0.0,
            max_weight: 0.0,
            estimated_calories: 0,
            intensity_score: 0,
        }
    }
}
