//! Hint Combination Search
//!
//! Exhaustive bounded search for token groups that sum to exactly 10 and fit
//! within one drag. Candidate rectangles are anchored at every grid cell and
//! limited to 3 rows × 4 columns; groups of 2–4 tokens are accepted and
//! deduplicated by exact member set.
//!
//! Recomputed only on hint activation, never per frame. An empty result is a
//! normal outcome: the search window is an intentional bound, not a
//! completeness guarantee over the whole board.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::game::grid::{GridConfig, Token, TokenId};
use crate::{HINT_MAX_COLS, HINT_MAX_ROWS, HINT_MAX_TOKENS, HINT_MIN_TOKENS, TARGET_SUM};

/// A valid token group surfaced to the player as a drag suggestion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintGroup {
    /// Member token ids, in grid order
    pub members: Vec<TokenId>,
}

impl HintGroup {
    /// Number of tokens in the group.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group is empty (never true for finder output).
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Enumerate all valid sum-to-ten groups reachable by a single drag.
///
/// Results are in enumeration order: row-major anchor cell, then growing
/// rectangle size. Two rectangles yielding the identical token set count as
/// one hint. Callers that display hints typically take only the first
/// [`crate::HINT_DISPLAY_LIMIT`] groups.
pub fn find_combinations(
    tokens: &BTreeMap<TokenId, Token>,
    config: &GridConfig,
) -> Vec<HintGroup> {
    let mut groups: Vec<HintGroup> = Vec::new();
    let mut seen: BTreeSet<Vec<TokenId>> = BTreeSet::new();

    for start_row in 0..config.rows {
        for start_col in 0..config.columns {
            let max_row = (start_row + HINT_MAX_ROWS).min(config.rows);
            let max_col = (start_col + HINT_MAX_COLS).min(config.columns);

            for end_row in start_row..max_row {
                for end_col in start_col..max_col {
                    // A single cell can never hold two tokens
                    if start_row == end_row && start_col == end_col {
                        continue;
                    }

                    let mut members: Vec<TokenId> = Vec::new();
                    let mut sum: u32 = 0;

                    for token in tokens.values() {
                        if token.row >= start_row
                            && token.row <= end_row
                            && token.column >= start_col
                            && token.column <= end_col
                        {
                            members.push(token.id);
                            sum += token.value as u32;
                            if members.len() > HINT_MAX_TOKENS {
                                break;
                            }
                        }
                    }

                    if sum == TARGET_SUM
                        && (HINT_MIN_TOKENS..=HINT_MAX_TOKENS).contains(&members.len())
                        && seen.insert(members.clone())
                    {
                        groups.push(HintGroup { members });
                    }
                }
            }
        }
    }

    groups
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;

    /// Build a full grid with every token set to `fill`, then apply
    /// (row, column, value) overrides.
    fn board(config: &GridConfig, fill: u8, overrides: &[(u8, u8, u8)]) -> BTreeMap<TokenId, Token> {
        let cell_w = config.cell_width();
        let cell_h = config.cell_height();
        let mut tokens = BTreeMap::new();

        for row in 0..config.rows {
            for column in 0..config.columns {
                let id = TokenId::new(row, column);
                tokens.insert(
                    id,
                    Token {
                        id,
                        row,
                        column,
                        position: Point::new(
                            column as f32 * cell_w + cell_w / 2.0,
                            row as f32 * cell_h + cell_h / 2.0,
                        ),
                        value: fill,
                        radius: 12.0,
                    },
                );
            }
        }

        for &(row, column, value) in overrides {
            if let Some(t) = tokens.get_mut(&TokenId::new(row, column)) {
                t.value = value;
            }
        }

        tokens
    }

    #[test]
    fn test_no_combinations_on_all_nines() {
        // Any 2-4 nines sum to 18/27/36, never 10
        let config = GridConfig::default();
        let tokens = board(&config, 9, &[]);

        assert!(find_combinations(&tokens, &config).is_empty());
    }

    #[test]
    fn test_finds_adjacent_pair() {
        let config = GridConfig::default();
        // Isolate a 4+6 pair in a sea of nines
        let tokens = board(&config, 9, &[(5, 5, 4), (5, 6, 6)]);

        let groups = find_combinations(&tokens, &config);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].members,
            vec![TokenId::new(5, 5), TokenId::new(5, 6)]
        );
    }

    #[test]
    fn test_group_sizes_within_bounds() {
        let config = GridConfig::default();
        // All-ones board: only rectangles holding exactly 10 tokens would sum
        // to 10, but 10 > HINT_MAX_TOKENS, so nothing qualifies.
        let tokens = board(&config, 1, &[]);
        assert!(find_combinations(&tokens, &config).is_empty());

        // 2x2 block of 1,2,3,4 sums to 10 with 4 members
        let tokens = board(&config, 9, &[(0, 0, 1), (0, 1, 2), (1, 0, 3), (1, 1, 4)]);
        let groups = find_combinations(&tokens, &config);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 4);
    }

    #[test]
    fn test_members_fit_search_window() {
        let config = GridConfig::default();
        let mut rng = crate::core::rng::DeterministicRng::new(77);
        let tokens = crate::game::grid::into_token_set(crate::game::grid::generate_tokens(
            &config, &mut rng,
        ));

        for group in find_combinations(&tokens, &config) {
            assert!((HINT_MIN_TOKENS..=HINT_MAX_TOKENS).contains(&group.len()));

            let rows: Vec<u8> = group.members.iter().map(|id| id.row).collect();
            let cols: Vec<u8> = group.members.iter().map(|id| id.column).collect();
            let row_span = rows.iter().max().unwrap() - rows.iter().min().unwrap() + 1;
            let col_span = cols.iter().max().unwrap() - cols.iter().min().unwrap() + 1;
            assert!(row_span <= HINT_MAX_ROWS);
            assert!(col_span <= HINT_MAX_COLS);

            let sum: u32 = group
                .members
                .iter()
                .map(|id| tokens[id].value as u32)
                .sum();
            assert_eq!(sum, 10);
        }
    }

    #[test]
    fn test_no_duplicate_member_sets() {
        let config = GridConfig::default();
        // A lone 4+6 pair is reachable from many anchor rectangles; it must
        // still appear exactly once.
        let tokens = board(&config, 9, &[(5, 5, 4), (5, 6, 6)]);
        let groups = find_combinations(&tokens, &config);
        assert_eq!(groups.len(), 1);

        // And in general: no two groups share a member set
        let mut rng = crate::core::rng::DeterministicRng::new(123);
        let tokens = crate::game::grid::into_token_set(crate::game::grid::generate_tokens(
            &config, &mut rng,
        ));
        let groups = find_combinations(&tokens, &config);
        let unique: BTreeSet<&Vec<TokenId>> = groups.iter().map(|g| &g.members).collect();
        assert_eq!(unique.len(), groups.len());
    }

    #[test]
    fn test_sparse_board_after_removals() {
        let config = GridConfig::default();
        let mut tokens = board(&config, 9, &[(2, 2, 3), (2, 5, 7)]);

        // With the column-3 and column-4 nines between them removed, the 3
        // and 7 still span 4 columns and fit one drag window.
        tokens.remove(&TokenId::new(2, 3));
        tokens.remove(&TokenId::new(2, 4));

        let groups = find_combinations(&tokens, &config);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].members,
            vec![TokenId::new(2, 2), TokenId::new(2, 5)]
        );
    }
}
