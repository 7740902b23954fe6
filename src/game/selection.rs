//! Rectangular Selection Evaluation
//!
//! Given the player's drag rectangle and the live token set, determine which
//! tokens are enclosed and whether their values sum to exactly 10. Called
//! once per pointer-move, so [`evaluate`] is pure and O(tokens) with a single
//! output allocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::geometry::{Point, Rect};
use crate::game::grid::{Token, TokenId};
use crate::TARGET_SUM;

/// The transient rectangle the player is dragging.
///
/// Created on selection-start, updated on every pointer-move, destroyed on
/// selection-end. `is_valid` is a cached copy of the latest evaluation,
/// recomputed on every update.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    /// Corner where the drag started
    pub anchor: Point,
    /// Corner under the pointer right now
    pub cursor: Point,
    /// Result of the most recent evaluation
    pub is_valid: bool,
}

impl SelectionRect {
    /// Start a new selection at a point. Anchor and cursor coincide; the
    /// rectangle has zero area until the first update.
    pub fn begin(at: Point) -> Self {
        Self {
            anchor: at,
            cursor: at,
            is_valid: false,
        }
    }

    /// Normalized bounds of the drag rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.anchor, self.cursor)
    }
}

/// Result of evaluating a rectangle against the live token set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    /// Ids of enclosed tokens, in token-set (grid) order
    pub enclosed: Vec<TokenId>,
    /// Sum of enclosed token values
    pub sum: u32,
    /// `sum == 10` and at least one token enclosed
    pub is_valid: bool,
}

impl SelectionOutcome {
    /// Outcome for an empty enclosure (sum 0, never valid).
    pub fn empty() -> Self {
        Self {
            enclosed: Vec::new(),
            sum: 0,
            is_valid: false,
        }
    }
}

/// Evaluate a selection rectangle against the live token set.
///
/// A token is enclosed iff its center lies within `bounds`, inclusive on all
/// four edges. Pure function: identical inputs give identical outputs.
pub fn evaluate(bounds: Rect, tokens: &BTreeMap<TokenId, Token>) -> SelectionOutcome {
    let mut enclosed = Vec::new();
    let mut sum: u32 = 0;

    for token in tokens.values() {
        if bounds.contains(token.position) {
            enclosed.push(token.id);
            sum += token.value as u32;
        }
    }

    let is_valid = sum == TARGET_SUM && !enclosed.is_empty();

    SelectionOutcome {
        enclosed,
        sum,
        is_valid,
    }
}

// =============================================================================
// TESTS
// =============================================================================
