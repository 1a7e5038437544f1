//! GymQuest - Fitness Metrics & Ranking Engine
//!
//! The computation core of the GymQuest workout tracker: turns raw logged
//! sets into per-exercise and per-session training metrics, builds the
//! daily cross-user leaderboard with medal awards, and detects friend
//! workout streaks. Session lifecycle, chat, friends, and rendering live
//! in the surrounding application; this crate only computes and talks to
//! its SQLite-backed session and leaderboard stores.

pub mod config;
pub mod leaderboard;
pub mod metrics;
pub mod storage;
pub mod streaks;

// Re-export commonly used types
pub use config::EngineConfig;
pub use leaderboard::{DailyRankingEngine, LeaderboardEntry, LeaderboardManager, Medal};
pub use metrics::{ExerciseStat, MetricsCalculator, SessionSummary, SetRecord};
pub use storage::Database;
pub use streaks::{StreakDetector, StreakInfo, StreakManager};
