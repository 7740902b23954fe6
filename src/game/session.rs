//! Game State Machine
//!
//! The [`Session`] owns all authoritative game state: live tokens, score,
//! timer, hint budget, and the transient selection. It is mutated only
//! through its commands, all of which are no-ops outside their legal phase
//! (policy rejections, not errors).
//!
//! Timing is a pure `tick(delta)` callable from any scheduling context: a
//! real-time frame loop, a fixed-timestep harness, or a headless simulation.
//! Deferred effects (the 10-second hint auto-hide) are expressed as countdowns
//! inside the session; external schedulers go through the generation-checked
//! [`Session::hide_hints`] so stale callbacks no-op after a reset.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::geometry::Point;
use crate::core::rng::{derive_board_seed, DeterministicRng};
use crate::game::events::GameEvent;
use crate::game::grid::{generate_tokens, into_token_set, GridConfig, Token, TokenId};
use crate::game::hints::{find_combinations, HintGroup};
use crate::game::selection::{evaluate, SelectionRect};
use crate::{GAME_DURATION_SECS, HINT_VISIBLE_SECS, STARTING_HINTS};

/// Current phase of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game in progress; board is empty.
    #[default]
    Ready,
    /// Active gameplay: timer runs, tokens can be removed.
    Playing,
    /// Timer expired; waiting for restart.
    GameOver,
}

/// The complete authoritative state of one game instance.
///
/// Single-threaded by construction: owned by whatever drives the frame loop,
/// read by rendering and the leaderboard submission flow.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Stable identifier, part of the board seed derivation.
    game_id: Uuid,
    /// Current phase.
    phase: GamePhase,
    /// Grid layout parameters.
    config: GridConfig,
    /// Monotonic counter bumped on every game start and reset. Deferred
    /// callbacks capture it at schedule time and no-op when stale.
    generation: u64,
    /// Board RNG, reseeded per game from `(game_id, generation)`.
    #[serde(skip)]
    rng: DeterministicRng,
    /// Live token set; only shrinks after generation.
    tokens: BTreeMap<TokenId, Token>,
    /// Active drag, if any. Exists only while Playing.
    selection: Option<SelectionRect>,
    /// Tokens removed so far (one point each).
    score: u32,
    /// Seconds left on the clock, in [0, 120].
    time_remaining: f32,
    /// Seconds of play consumed so far.
    elapsed: f32,
    /// Elapsed seconds at the moment the board was fully cleared. Pinned
    /// once by the clearing drag; `elapsed` keeps running afterwards.
    completed_at: Option<f32>,
    /// Hint budget left.
    hints_remaining: u8,
    /// Whether the hint overlay is currently visible.
    hints_visible: bool,
    /// Seconds until the visible hint auto-hides.
    hint_hide_remaining: f32,
    /// Wall-clock game start, for leaderboard display.
    started_at: Option<DateTime<Utc>>,
    /// Events generated since the last drain.
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an unstarted session with the default 17×10 grid.
    pub fn new() -> Self {
        Self::with_config(GridConfig::default())
    }

    /// Create an unstarted session with a custom grid layout.
    pub fn with_config(config: GridConfig) -> Self {
        Self::with_game_id(Uuid::new_v4(), config)
    }

    /// Create an unstarted session with a fixed game id, so boards replay
    /// deterministically from `(game_id, generation)`.
    pub fn with_game_id(game_id: Uuid, config: GridConfig) -> Self {
        Self {
            game_id,
            phase: GamePhase::Ready,
            config,
            generation: 0,
            rng: DeterministicRng::default(),
            tokens: BTreeMap::new(),
            selection: None,
            score: 0,
            time_remaining: GAME_DURATION_SECS,
            elapsed: 0.0,
            completed_at: None,
            hints_remaining: STARTING_HINTS,
            hints_visible: false,
            hint_hide_remaining: 0.0,
            started_at: None,
            pending_events: Vec::new(),
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Start a new game: deal a fresh board, reset score, timer, and hints.
    ///
    /// Legal only from `Ready`; a no-op otherwise. Restarting after a game
    /// goes through [`Session::reset_game`] first.
    pub fn start_game(&mut self) {
        if self.phase != GamePhase::Ready {
            return;
        }

        self.generation += 1;
        self.rng = DeterministicRng::new(derive_board_seed(
            self.game_id.as_bytes(),
            self.generation,
        ));
        self.tokens = into_token_set(generate_tokens(&self.config, &mut self.rng));
        self.selection = None;
        self.score = 0;
        self.time_remaining = GAME_DURATION_SECS;
        self.elapsed = 0.0;
        self.completed_at = None;
        self.hints_remaining = STARTING_HINTS;
        self.hints_visible = false;
        self.hint_hide_remaining = 0.0;
        self.started_at = Some(Utc::now());
        self.phase = GamePhase::Playing;

        self.pending_events.push(GameEvent::GameStarted {
            generation: self.generation,
        });
    }

    /// Full reset back to `Ready`. No carry-over of score or tokens; bumps
    /// the generation so outstanding deferred effects become harmless.
    pub fn reset_game(&mut self) {
        self.generation += 1;
        self.phase = GamePhase::Ready;
        self.tokens.clear();
        self.selection = None;
        self.score = 0;
        self.time_remaining = GAME_DURATION_SECS;
        self.elapsed = 0.0;
        self.completed_at = None;
        self.hints_remaining = STARTING_HINTS;
        self.hints_visible = false;
        self.hint_hide_remaining = 0.0;
        self.started_at = None;
        self.pending_events.clear();
    }

    /// Advance the timer by `delta`. A no-op outside `Playing`.
    ///
    /// `time_remaining` is floored at zero; reaching exactly zero transitions
    /// to `GameOver` on this same tick. Also counts down the hint visibility
    /// window.
    pub fn tick(&mut self, delta: Duration) {
        if self.phase != GamePhase::Playing {
            return;
        }

        let dt = delta.as_secs_f32();
        let consumed = dt.min(self.time_remaining);
        self.elapsed += consumed;
        self.time_remaining -= consumed;

        if self.hints_visible {
            self.hint_hide_remaining -= dt;
            if self.hint_hide_remaining <= 0.0 {
                self.hints_visible = false;
                self.hint_hide_remaining = 0.0;
                self.pending_events.push(GameEvent::HintExpired);
            }
        }

        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.phase = GamePhase::GameOver;
            self.selection = None;
            self.pending_events.push(GameEvent::TimeExpired {
                final_score: self.score,
                perfect: self.tokens.is_empty(),
            });
        }
    }

    /// Begin a drag at a canvas point. A no-op outside `Playing`.
    pub fn start_selection(&mut self, x: f32, y: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.selection = Some(SelectionRect::begin(Point::new(x, y)));
    }

    /// Move the drag cursor and re-evaluate validity. A no-op outside
    /// `Playing` or with no active selection.
    pub fn update_selection(&mut self, x: f32, y: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(selection) = self.selection.as_mut() else {
            return;
        };

        selection.cursor = Point::new(x, y);
        let outcome = evaluate(selection.bounds(), &self.tokens);
        selection.is_valid = outcome.is_valid;
    }

    /// Finish the drag. If the final rectangle is valid, remove the enclosed
    /// tokens and score one point each. The selection is always cleared,
    /// whether or not a removal occurred. Returns the removed ids.
    pub fn end_selection(&mut self) -> Vec<TokenId> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }
        let Some(selection) = self.selection.take() else {
            return Vec::new();
        };

        // Re-evaluate at the final cursor; never trust a cached flag
        let outcome = evaluate(selection.bounds(), &self.tokens);
        if !outcome.is_valid {
            return Vec::new();
        }

        for id in &outcome.enclosed {
            self.tokens.remove(id);
        }
        let points = outcome.enclosed.len() as u32;
        self.score += points;

        self.pending_events.push(GameEvent::TokensRemoved {
            ids: outcome.enclosed.clone(),
            points,
            new_score: self.score,
        });

        // A full clear does not end the game; play continues until the
        // timer expires. Completion time is pinned here while `elapsed`
        // keeps running.
        if self.tokens.is_empty() {
            self.completed_at = Some(self.elapsed);
            self.pending_events.push(GameEvent::BoardCleared {
                completion_seconds: self.elapsed as u32,
            });
        }

        outcome.enclosed
    }

    /// Consume one hint and show the hint overlay for ten seconds.
    ///
    /// A no-op outside `Playing`, when the budget is exhausted, or while a
    /// hint is already visible (at most one hint window at a time).
    pub fn use_hint(&mut self) {
        if self.phase != GamePhase::Playing
            || self.hints_remaining == 0
            || self.hints_visible
        {
            return;
        }

        self.hints_remaining -= 1;
        self.hints_visible = true;
        self.hint_hide_remaining = HINT_VISIBLE_SECS;

        self.pending_events.push(GameEvent::HintShown {
            remaining: self.hints_remaining,
        });
    }

    /// Hide the hint overlay, for externally scheduled hide callbacks.
    ///
    /// `generation` must match the value captured when the callback was
    /// scheduled; a stale generation (game reset or restarted since) is a
    /// no-op so the callback cannot touch the new game.
    pub fn hide_hints(&mut self, generation: u64) {
        if generation != self.generation || !self.hints_visible {
            return;
        }
        self.hints_visible = false;
        self.hint_hide_remaining = 0.0;
        self.pending_events.push(GameEvent::HintExpired);
    }

    /// Enumerate the valid drag groups on the current board.
    ///
    /// Advisory data for rendering; never mutates game state. Callers
    /// typically display only the first [`crate::HINT_DISPLAY_LIMIT`] groups.
    pub fn hints(&self) -> Vec<HintGroup> {
        find_combinations(&self.tokens, &self.config)
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    /// Stable game identifier.
    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Grid layout parameters.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Live token set, in grid order.
    pub fn tokens(&self) -> &BTreeMap<TokenId, Token> {
        &self.tokens
    }

    /// Active selection, if a drag is in progress.
    pub fn selection(&self) -> Option<&SelectionRect> {
        self.selection.as_ref()
    }

    /// Tokens removed so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds left on the clock.
    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Seconds of play consumed so far.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }

    /// Hints left in the budget.
    pub fn hints_remaining(&self) -> u8 {
        self.hints_remaining
    }

    /// Whether the hint overlay is visible.
    pub fn hints_visible(&self) -> bool {
        self.hints_visible
    }

    /// Current generation, for tagging deferred callbacks.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wall-clock start of the current game, if one has started.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Whether every token was removed (a perfect game once terminal).
    pub fn is_board_cleared(&self) -> bool {
        self.phase != GamePhase::Ready && self.tokens.is_empty()
    }

    /// Completion time in whole seconds, for leaderboard submission.
    ///
    /// `Some` only when the board was fully cleared, pinned at the moment of
    /// the clearing drag; `None` while tokens remain, in particular when time
    /// expired with tokens on the board ("ran out of time" is distinguishable
    /// from "cleared the board").
    pub fn completion_time_seconds(&self) -> Option<u32> {
        self.completed_at.map(|secs| secs as u32)
    }

    /// Drain pending events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// =============================================================================
// TESTS
// =============================================================================
