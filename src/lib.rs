//! # Fruitgrid Game Server
//!
//! Engine for a timed sum-to-ten puzzle game, plus a thin leaderboard service.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     FRUITGRID SERVER                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── geometry.rs - Points and boundary-inclusive rectangles  │
//! │  └── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │                                                              │
//! │  game/           - Game engine (single-threaded)             │
//! │  ├── grid.rs     - Token grid generation                     │
//! │  ├── selection.rs- Rectangular selection evaluation          │
//! │  ├── hints.rs    - Sum-to-ten combination search             │
//! │  ├── session.rs  - Game state machine and timer              │
//! │  ├── events.rs   - Engine events for collaborators           │
//! │  └── pointer.rs  - Device-to-canvas coordinate mapping       │
//! │                                                              │
//! │  leaderboard/    - Score records and time-window queries     │
//! │  └── store.rs    - In-memory score store                     │
//! │                                                              │
//! │  network/        - Leaderboard service (non-game state)      │
//! │  ├── protocol.rs - Message types                             │
//! │  └── server.rs   - WebSocket server                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership model
//!
//! The `game/` modules are single-threaded and lock-free: a [`Session`] is
//! owned by whatever drives the frame loop and is mutated only through its
//! commands (`tick`, selection lifecycle, hints). Rendering and the
//! leaderboard submission flow only read from it. All randomness comes from
//! a seeded Xorshift128+ PRNG, so token layouts replay identically for a
//! given seed on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod leaderboard;
pub mod network;

// Re-export commonly used types
pub use crate::core::geometry::{Point, Rect};
pub use crate::core::rng::DeterministicRng;
pub use game::grid::{GridConfig, Token, TokenId};
pub use game::selection::{SelectionOutcome, SelectionRect};
pub use game::session::{GamePhase, Session};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of token columns in a fresh grid.
pub const GRID_COLUMNS: u8 = 17;

/// Number of token rows in a fresh grid.
pub const GRID_ROWS: u8 = 10;

/// Logical canvas width the grid is laid out on.
pub const CANVAS_WIDTH: f32 = 850.0;

/// Logical canvas height the grid is laid out on.
pub const CANVAS_HEIGHT: f32 = 500.0;

/// The sum a selection must reach to be valid.
pub const TARGET_SUM: u32 = 10;

/// Game duration in seconds.
pub const GAME_DURATION_SECS: f32 = 120.0;

/// Hint budget per game.
pub const STARTING_HINTS: u8 = 3;

/// Seconds a hint stays visible before auto-hiding.
pub const HINT_VISIBLE_SECS: f32 = 10.0;

/// Maximum hint search rectangle height in rows.
pub const HINT_MAX_ROWS: u8 = 3;

/// Maximum hint search rectangle width in columns.
pub const HINT_MAX_COLS: u8 = 4;

/// Smallest token group the hint finder surfaces.
pub const HINT_MIN_TOKENS: usize = 2;

/// Largest token group the hint finder surfaces.
pub const HINT_MAX_TOKENS: usize = 4;

/// How many hint groups the reference UI displays at once.
///
/// Presentation policy for callers; the hint finder itself always returns
/// the full deduplicated list.
pub const HINT_DISPLAY_LIMIT: usize = 2;
