//! Engine Events
//!
//! Events generated by session commands and ticks, buffered on the session
//! and drained by the driver with `take_events()`. Consumed for logging and
//! by collaborators (rendering, leaderboard submission); never required for
//! engine correctness.

use serde::{Deserialize, Serialize};

use crate::game::grid::TokenId;

/// Something observable happened in the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new game started.
    GameStarted {
        /// Session generation the game belongs to
        generation: u64,
    },

    /// A valid selection removed tokens.
    TokensRemoved {
        /// Removed token ids
        ids: Vec<TokenId>,
        /// Points awarded (one per token)
        points: u32,
        /// Score after the removal
        new_score: u32,
    },

    /// A hint was consumed and the hint overlay became visible.
    HintShown {
        /// Hints left after this one
        remaining: u8,
    },

    /// The hint visibility window elapsed.
    HintExpired,

    /// Every token was removed before the timer expired.
    BoardCleared {
        /// Elapsed seconds since game start, floored
        completion_seconds: u32,
    },

    /// The timer reached zero.
    TimeExpired {
        /// Final score
        final_score: u32,
        /// Whether the board was already empty when time ran out
        perfect: bool,
    },
}
