//! Network Layer
//!
//! WebSocket service for the leaderboard. This layer owns no game state:
//! the engine produces scores, clients submit them here, and service
//! failures never affect an in-progress game.

pub mod protocol;
pub mod server;

pub use protocol::{ClientMessage, ErrorCode, LeaderboardEntry, ServerMessage};
pub use server::{LeaderboardServer, ServerConfig, ServerError};
