//! In-Memory Score Store
//!
//! Accepts validated score submissions and serves the top ten entries for a
//! time window, ordered by score (descending) with newer submissions winning
//! ties. The clock is always passed in by the caller, so window math is
//! test-isolated; all stored timestamps are UTC.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum player name length in characters.
pub const MAX_NAME_LEN: usize = 20;

/// How many entries a leaderboard query returns at most.
pub const TOP_LIMIT: usize = 10;

/// Time window for a leaderboard query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Since midnight of the query day
    Daily,
    /// Last 7×24 hours
    Weekly,
    /// Since one calendar month before the query instant
    Monthly,
    /// Unfiltered
    #[serde(rename = "alltime", alias = "all_time")]
    AllTime,
}

impl Period {
    /// Earliest `submitted_at` included in this window, or `None` for
    /// all-time.
    fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Period::Daily => Some(
                now.date_naive()
                    .and_hms_opt(0, 0, 0)
                    .expect("midnight is a valid time")
                    .and_utc(),
            ),
            Period::Weekly => Some(now - Duration::days(7)),
            Period::Monthly => Some(
                now.checked_sub_months(Months::new(1))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
            Period::AllTime => None,
        }
    }
}

/// A score submission from the game client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    /// Player display name, at most 20 characters after trimming
    pub player_name: String,
    /// Tokens removed during the game
    pub score: u32,
    /// Completion time in seconds for a perfect clear, `None` when time
    /// ran out with tokens remaining
    pub time_completed: Option<u32>,
}

/// A persisted leaderboard entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Entry identifier
    pub id: Uuid,
    /// Player display name
    pub player_name: String,
    /// Final score
    pub score: u32,
    /// Completion time for a perfect clear
    pub time_completed: Option<u32>,
    /// When the score was submitted (UTC)
    pub submitted_at: DateTime<Utc>,
}

/// Submission validation errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    /// Name was empty after trimming whitespace.
    #[error("player name is empty")]
    EmptyName,

    /// Name exceeds [`MAX_NAME_LEN`] characters.
    #[error("player name is {0} characters, max is {MAX_NAME_LEN}")]
    NameTooLong(usize),
}

/// In-memory leaderboard store.
#[derive(Clone, Debug, Default)]
pub struct ScoreStore {
    entries: Vec<ScoreEntry>,
}

impl ScoreStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and record a submission. Returns the stored entry.
    pub fn submit(
        &mut self,
        submission: ScoreSubmission,
        now: DateTime<Utc>,
    ) -> Result<ScoreEntry, SubmitError> {
        let name = submission.player_name.trim();
        if name.is_empty() {
            return Err(SubmitError::EmptyName);
        }
        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(SubmitError::NameTooLong(len));
        }

        let entry = ScoreEntry {
            id: Uuid::new_v4(),
            player_name: name.to_string(),
            score: submission.score,
            time_completed: submission.time_completed,
            submitted_at: now,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Top entries for a window, ordered by `(score desc, submitted_at
    /// desc)`, limited to [`TOP_LIMIT`].
    pub fn top(&self, period: Period, now: DateTime<Utc>) -> Vec<ScoreEntry> {
        let cutoff = period.cutoff(now);

        let mut entries: Vec<ScoreEntry> = self
            .entries
            .iter()
            .filter(|e| cutoff.is_none_or(|c| e.submitted_at >= c))
            .cloned()
            .collect();

        entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.submitted_at.cmp(&a.submitted_at))
        });
        entries.truncate(TOP_LIMIT);
        entries
    }

    /// Total number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
