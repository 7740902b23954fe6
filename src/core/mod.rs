//! Core deterministic primitives.
//!
//! Geometry for the logical canvas space and the seeded PRNG that token
//! values are drawn from. Nothing in here touches game state.

pub mod geometry;
pub mod rng;

// Re-export core types
pub use geometry::{Point, Rect};
pub use rng::DeterministicRng;
