//! Token Grid Generation
//!
//! Produces the initial token layout: a fixed grid of evenly spaced cell
//! centers, each holding a random value in [1, 9]. Layout is deterministic;
//! values come from the session PRNG. No solvability constraint is enforced
//! at generation time, so a board may have no full clear.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::geometry::Point;
use crate::core::rng::DeterministicRng;
use crate::{CANVAS_HEIGHT, CANVAS_WIDTH, GRID_COLUMNS, GRID_ROWS};

/// Token radius as a fraction of the smaller cell dimension.
const TOKEN_RADIUS_FACTOR: f32 = 0.3;

/// Stable token identity, derived from the grid cell at generation time.
///
/// Implements `Ord` so the live token set can be a `BTreeMap` with
/// deterministic iteration order. Ids are unique within one game and never
/// reused after removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId {
    /// Grid row the token was generated in.
    pub row: u8,
    /// Grid column the token was generated in.
    pub column: u8,
}

impl TokenId {
    /// Create an id from a grid cell.
    pub const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token-{}-{}", self.row, self.column)
    }
}

/// A single numbered grid cell the player can include in a selection.
///
/// Immutable once generated; removal deletes it from the live set, nothing
/// mutates it in place.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Stable identity
    pub id: TokenId,
    /// Grid row (0-based, top to bottom)
    pub row: u8,
    /// Grid column (0-based, left to right)
    pub column: u8,
    /// Center position in canvas coordinates
    pub position: Point,
    /// Face value in [1, 9]
    pub value: u8,
    /// Draw radius in canvas units
    pub radius: f32,
}

/// Grid layout parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of columns
    pub columns: u8,
    /// Number of rows
    pub rows: u8,
    /// Logical canvas width
    pub canvas_width: f32,
    /// Logical canvas height
    pub canvas_height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            rows: GRID_ROWS,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
        }
    }
}

impl GridConfig {
    /// Width of one grid cell.
    #[inline]
    pub fn cell_width(&self) -> f32 {
        self.canvas_width / self.columns as f32
    }

    /// Height of one grid cell.
    #[inline]
    pub fn cell_height(&self) -> f32 {
        self.canvas_height / self.rows as f32
    }
}

/// Generate a fresh token grid.
///
/// Layout is deterministic (cell centers); values are independent uniform
/// draws from the supplied RNG. Re-invoking with the same RNG state yields
/// the same board; the RNG advances, so consecutive calls deal new values.
pub fn generate_tokens(config: &GridConfig, rng: &mut DeterministicRng) -> Vec<Token> {
    let cell_w = config.cell_width();
    let cell_h = config.cell_height();
    let radius = cell_w.min(cell_h) * TOKEN_RADIUS_FACTOR;

    let mut tokens = Vec::with_capacity(config.rows as usize * config.columns as usize);

    for row in 0..config.rows {
        for column in 0..config.columns {
            let x = column as f32 * cell_w + cell_w / 2.0;
            let y = row as f32 * cell_h + cell_h / 2.0;

            tokens.push(Token {
                id: TokenId::new(row, column),
                row,
                column,
                position: Point::new(x, y),
                value: rng.next_token_value(),
                radius,
            });
        }
    }

    tokens
}

/// Collect generated tokens into the live set keyed by id.
pub fn into_token_set(tokens: Vec<Token>) -> BTreeMap<TokenId, Token> {
    tokens.into_iter().map(|t| (t.id, t)).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_token_count_and_values() {
        let config = GridConfig::default();
        let mut rng = DeterministicRng::new(1);
        let tokens = generate_tokens(&config, &mut rng);

        assert_eq!(tokens.len(), 17 * 10);
        assert!(tokens.iter().all(|t| (1..=9).contains(&t.value)));
    }

    #[test]
    fn test_ids_unique_and_stable() {
        let config = GridConfig::default();
        let mut rng = DeterministicRng::new(2);
        let tokens = generate_tokens(&config, &mut rng);

        let ids: BTreeSet<TokenId> = tokens.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), tokens.len());

        // Id encodes the generating cell
        for t in &tokens {
            assert_eq!(t.id, TokenId::new(t.row, t.column));
        }
    }

    #[test]
    fn test_layout_is_evenly_spaced_cell_centers() {
        let config = GridConfig::default();
        let mut rng = DeterministicRng::new(3);
        let tokens = generate_tokens(&config, &mut rng);

        let cell_w = config.cell_width();
        let cell_h = config.cell_height();

        for t in &tokens {
            assert_eq!(t.position.x, t.column as f32 * cell_w + cell_w / 2.0);
            assert_eq!(t.position.y, t.row as f32 * cell_h + cell_h / 2.0);
            assert!(t.position.x > 0.0 && t.position.x < config.canvas_width);
            assert!(t.position.y > 0.0 && t.position.y < config.canvas_height);
        }

        // Row-major generation order
        assert_eq!(tokens[0].id, TokenId::new(0, 0));
        assert_eq!(tokens[1].id, TokenId::new(0, 1));
        assert_eq!(tokens[17].id, TokenId::new(1, 0));
    }

    #[test]
    fn test_same_seed_same_board() {
        let config = GridConfig::default();
        let mut rng1 = DeterministicRng::new(99);
        let mut rng2 = DeterministicRng::new(99);

        let a = generate_tokens(&config, &mut rng1);
        let b = generate_tokens(&config, &mut rng2);
        assert_eq!(a, b);

        // Second deal from the same RNG is a different board
        let c = generate_tokens(&config, &mut rng1);
        assert_ne!(a, c);
    }

    #[test]
    fn test_token_id_display() {
        assert_eq!(TokenId::new(3, 14).to_string(), "token-3-14");
    }
}
