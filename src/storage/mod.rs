//! Storage module for the SQLite-backed session and leaderboard stores.

pub mod database;
pub mod schema;

pub use database::{Database, DatabaseError};
