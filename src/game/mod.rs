//! Game Engine Module
//!
//! All game logic. Single-threaded and frame-driven: no locks, no I/O.
//!
//! ## Module Structure
//!
//! - `grid`: Token grid generation
//! - `selection`: Rectangular selection evaluation
//! - `hints`: Exhaustive sum-to-ten combination search
//! - `session`: Game state machine, timer, selection lifecycle
//! - `events`: Engine events consumed by collaborators
//! - `pointer`: Device-to-canvas coordinate mapping

pub mod events;
pub mod grid;
pub mod hints;
pub mod pointer;
pub mod selection;
pub mod session;

// Re-export key types
pub use events::GameEvent;
pub use grid::{GridConfig, Token, TokenId};
pub use hints::HintGroup;
pub use pointer::{CanvasViewport, PointerEvent, PointerPhase};
pub use selection::{SelectionOutcome, SelectionRect};
pub use session::{GamePhase, Session};
