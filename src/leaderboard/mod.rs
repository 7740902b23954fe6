//! Leaderboard
//!
//! Score records and top-N queries over sliding time windows. The game
//! engine only produces the values submitted here; it never calls the
//! leaderboard itself, and leaderboard failures never touch game state.

pub mod store;

pub use store::{Period, ScoreEntry, ScoreStore, ScoreSubmission, SubmitError};
