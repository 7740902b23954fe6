//! Protocol Messages
//!
//! Wire format for the leaderboard service over WebSocket. All messages are
//! serialized as JSON for debugging ease.

use serde::{Deserialize, Serialize};

use crate::leaderboard::store::{Period, ScoreEntry};

// =============================================================================
// CLIENT -> SERVER MESSAGES
// =============================================================================

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Submit a finished game's score.
    SubmitScore {
        /// Player display name (≤ 20 characters).
        player_name: String,
        /// Final score.
        score: u32,
        /// Completion time in seconds for a perfect clear.
        time_completed: Option<u32>,
    },

    /// Request the top entries for a time window.
    Leaderboard {
        /// Query window.
        period: Period,
    },

    /// Ping for latency measurement.
    Ping {
        /// Client timestamp, echoed back.
        timestamp: u64,
    },
}

// =============================================================================
// SERVER -> CLIENT MESSAGES
// =============================================================================

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A submission was validated and recorded.
    ScoreAccepted {
        /// The stored entry.
        entry: LeaderboardEntry,
    },

    /// Leaderboard query result.
    Leaderboard {
        /// Window the entries were filtered by.
        period: Period,
        /// Top entries, best first.
        entries: Vec<LeaderboardEntry>,
    },

    /// Pong response.
    Pong {
        /// Echoed client timestamp.
        timestamp: u64,
    },

    /// Request was rejected or failed.
    Error {
        /// Machine-readable error class.
        code: ErrorCode,
        /// Human-readable description.
        message: String,
    },
}

/// Error classes surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Submission failed validation.
    InvalidSubmission,
    /// Message could not be parsed.
    MalformedMessage,
}

/// Wire form of a stored score entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Entry id as a string.
    pub id: String,
    /// Player display name.
    pub player_name: String,
    /// Final score.
    pub score: u32,
    /// Completion time for a perfect clear.
    pub time_completed: Option<u32>,
    /// Submission time, RFC 3339.
    pub submitted_at: String,
}

impl From<&ScoreEntry> for LeaderboardEntry {
    fn from(entry: &ScoreEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            player_name: entry.player_name.clone(),
            score: entry.score,
            time_completed: entry.time_completed,
            submitted_at: entry.submitted_at.to_rfc3339(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_tagged_json() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"leaderboard","period":"weekly"}"#).unwrap();
        assert!(matches!(
            msg,
            ClientMessage::Leaderboard {
                period: Period::Weekly
            }
        ));

        // Original API spelling for the unfiltered window is accepted
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"leaderboard","period":"alltime"}"#).unwrap();
        assert!(matches!(
            msg,
            ClientMessage::Leaderboard {
                period: Period::AllTime
            }
        ));
    }

    #[test]
    fn test_submit_score_shape() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"submit_score","player_name":"anna","score":42,"time_completed":null}"#,
        )
        .unwrap();
        match msg {
            ClientMessage::SubmitScore {
                player_name,
                score,
                time_completed,
            } => {
                assert_eq!(player_name, "anna");
                assert_eq!(score, 42);
                assert_eq!(time_completed, None);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_server_error_serializes_with_tag() {
        let msg = ServerMessage::Error {
            code: ErrorCode::MalformedMessage,
            message: "bad json".into(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"error""#));
        assert!(json.contains(r#""code":"malformed_message""#));
    }
}
