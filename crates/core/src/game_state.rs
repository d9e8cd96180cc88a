//! Game state module - the board engine's state machine
//!
//! Ties the board, the layout generator, the timer and the RNG together:
//!
//! - `Playing` → selections are resolved against the board.
//! - A match that clears the board → `GameOver { win: true }`, timer frozen,
//!   best time compared.
//! - A resolved pair that leaves no selectable pair → `GameOver { win: false }`.
//! - Restart / next layout → fresh deal, timer reset, back to `Playing`.
//!
//! The state machine does no I/O. Outcomes an observer cares about (a new
//! best time to persist, a loss to log) are published as [`CoreEvent`]s via
//! [`GameState::take_last_event`].

use std::time::{Duration, Instant};

use crate::board::{Board, Selection};
use crate::layout::{generate, next_layout_index, LayoutSource};
use crate::rng::SimpleRng;
use crate::snapshot::{GameSnapshot, TileView};
use crate::solver;
use crate::timer::Timer;
use crate::types::{CoreEvent, GameAction, GameStatus, TileId};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    timer: Timer,
    status: GameStatus,
    paused: bool,
    /// Generator index of the current (or, for custom boards, last) deal
    layout_index: usize,
    source: LayoutSource,
    rng: SimpleRng,
    seed: u32,
    /// Zero means no record yet
    best_time: Duration,
    /// Last selection outcome (consumed by observers)
    last_event: Option<CoreEvent>,
}

impl GameState {
    /// Create a new game on the default layout with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_layout(seed, 0)
    }

    /// Create a new game dealing the given layout index
    pub fn with_layout(seed: u32, layout_index: usize) -> Self {
        Self::with_layout_at(seed, layout_index, Instant::now())
    }

    /// Like [`with_layout`](Self::with_layout), with the timer started at `now`
    pub fn with_layout_at(seed: u32, layout_index: usize, now: Instant) -> Self {
        let mut rng = SimpleRng::new(seed);
        let board = generate(layout_index, &mut rng);
        let mut game = Self::assemble(board, rng, seed, now);
        game.layout_index = layout_index;
        game.source = LayoutSource::for_index(layout_index);
        log::info!(
            "dealt layout {} ({}), {} tiles",
            layout_index,
            game.source.name(),
            game.board.len()
        );
        game
    }

    /// Create a new game on an externally supplied board (editor layouts)
    pub fn with_board(board: Board, seed: u32) -> Self {
        let game = Self::assemble(board, SimpleRng::new(seed), seed, Instant::now());
        log::info!("loaded custom layout, {} tiles", game.board.len());
        game
    }

    fn assemble(board: Board, rng: SimpleRng, seed: u32, now: Instant) -> Self {
        Self {
            board,
            timer: Timer::started_at(now),
            status: GameStatus::Playing,
            paused: false,
            layout_index: 0,
            source: LayoutSource::Custom,
            rng,
            seed,
            best_time: Duration::ZERO,
            last_event: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    pub fn best_time(&self) -> Duration {
        self.best_time
    }

    /// Seed the best-time record (zero clears it)
    pub fn set_best_time(&mut self, best: Duration) {
        self.best_time = best;
    }

    pub fn layout_index(&self) -> usize {
        self.layout_index
    }

    pub fn layout_source(&self) -> LayoutSource {
        self.source
    }

    pub fn layout_name(&self) -> &'static str {
        self.source.name()
    }

    /// Check if a selection would currently be accepted
    pub fn playable(&self) -> bool {
        self.status.is_playing() && !self.paused
    }

    /// Take the last outcome event, if any.
    ///
    /// Only the most significant outcome of the last action is kept: a winning
    /// match reports `Won`, not `Matched`.
    pub fn take_last_event(&mut self) -> Option<CoreEvent> {
        self.last_event.take()
    }

    pub fn apply_action(&mut self, action: GameAction) -> bool {
        self.apply_action_at(action, Instant::now())
    }

    /// Apply a semantic action. Returns true if the state changed.
    ///
    /// `SaveLayout` is not an engine concern and always returns false.
    pub fn apply_action_at(&mut self, action: GameAction, now: Instant) -> bool {
        match action {
            GameAction::Select { x, y } => match self.board.pick_at(x, y) {
                Some(id) if self.playable() => self.select_at(id, now),
                _ => false,
            },
            GameAction::Pause => self.toggle_pause_at(now),
            GameAction::Restart => {
                self.restart_at(now);
                true
            }
            GameAction::NextLayout => {
                self.reset_at(next_layout_index(self.layout_index), now);
                true
            }
            GameAction::SaveLayout => false,
        }
    }

    pub fn select(&mut self, id: TileId) -> bool {
        self.select_at(id, Instant::now())
    }

    /// Select a tile by handle and resolve the outcome.
    ///
    /// Returns false (and changes nothing) when the game is over or paused, or
    /// the tile is removed, hidden or unknown.
    pub fn select_at(&mut self, id: TileId, now: Instant) -> bool {
        if !self.playable() {
            return false;
        }

        let event = match self.board.select(id) {
            Selection::Ignored => return false,
            Selection::Selected(tile) => CoreEvent::Selected { tile },
            Selection::Deselected(tile) => CoreEvent::Deselected { tile },
            Selection::Mismatched(first, second) => CoreEvent::Mismatched { first, second },
            Selection::Matched(first, second) => {
                let kind = self.board.tile(first).map_or(0, |t| t.kind);
                CoreEvent::Matched {
                    first,
                    second,
                    kind,
                }
            }
        };
        self.last_event = Some(event);

        if matches!(
            event,
            CoreEvent::Matched { .. } | CoreEvent::Mismatched { .. }
        ) {
            self.check_game_over(now);
        }
        true
    }

    fn check_game_over(&mut self, now: Instant) {
        if self.board.is_cleared() {
            self.timer.update_at(now);
            self.timer.stop();
            let elapsed = self.timer.elapsed();
            let new_best = self.best_time.is_zero() || elapsed < self.best_time;
            if new_best {
                self.best_time = elapsed;
            }
            self.status = GameStatus::GameOver { win: true };
            self.last_event = Some(CoreEvent::Won { elapsed, new_best });
            log::info!(
                "board cleared in {:.3}s (new best: {})",
                elapsed.as_secs_f64(),
                new_best
            );
        } else if !self.board.has_available_moves() {
            self.timer.update_at(now);
            self.timer.stop();
            self.status = GameStatus::GameOver { win: false };
            self.last_event = Some(CoreEvent::Lost);
            log::info!("no moves left, {} tiles remain", self.board.remaining());
        }
    }

    fn toggle_pause_at(&mut self, now: Instant) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        self.paused = !self.paused;
        if self.paused {
            self.timer.pause_at(now);
        } else {
            self.timer.resume_at(now);
        }
        true
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Per-frame update: advance the timer while playing and not paused
    pub fn tick_at(&mut self, now: Instant) {
        if self.playable() {
            self.timer.update_at(now);
        }
    }

    pub fn reset(&mut self, layout_index: usize) {
        self.reset_at(layout_index, Instant::now());
    }

    /// Discard the board and deal the given layout index
    pub fn reset_at(&mut self, layout_index: usize, now: Instant) {
        self.board = generate(layout_index, &mut self.rng);
        self.layout_index = layout_index;
        self.source = LayoutSource::for_index(layout_index);
        self.begin(now);
        log::info!(
            "dealt layout {} ({}), {} tiles",
            layout_index,
            self.source.name(),
            self.board.len()
        );
    }

    /// Record which layout index a custom board stands in for, without
    /// dealing. Later generated deals continue from this index.
    pub fn set_layout_index(&mut self, layout_index: usize) {
        self.layout_index = layout_index;
    }

    /// Discard the board and play the given one instead (editor layouts)
    pub fn reset_with_board(&mut self, board: Board, now: Instant) {
        self.board = board;
        self.source = LayoutSource::Custom;
        self.begin(now);
        log::info!("loaded custom layout, {} tiles", self.board.len());
    }

    /// Deal the current layout again. A custom board is restored to its
    /// initial state instead of being regenerated.
    pub fn restart_at(&mut self, now: Instant) {
        match self.source {
            LayoutSource::Custom => {
                let board = Board::new(self.board.tiles().to_vec());
                self.reset_with_board(board, now);
            }
            _ => self.reset_at(self.layout_index, now),
        }
    }

    fn begin(&mut self, now: Instant) {
        self.timer.reset_at(now);
        self.status = GameStatus::Playing;
        self.paused = false;
        self.last_event = None;
    }

    /// A selectable pair of equal kind, if the game is still on
    pub fn hint(&self) -> Option<(TileId, TileId)> {
        if !self.status.is_playing() {
            return None;
        }
        self.board.find_pair()
    }

    /// Check if the current board can still be cleared
    pub fn is_solvable(&self) -> bool {
        solver::is_solvable(&self.board)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Fill `out` with the current render surface, reusing its tile buffer
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear();

        let tiles = self.board.tiles();
        out.tiles.extend(
            self.board
                .ids()
                .filter(|id| !tiles[id.index()].removed())
                .map(|id| {
                    let t = &tiles[id.index()];
                    TileView {
                        id,
                        kind: t.kind,
                        rect: t.rect(),
                        layer: t.z,
                        selected: t.selected(),
                        selectable: t.is_selectable(tiles),
                    }
                }),
        );
        out.tiles.sort_by_key(|v| {
            let t = &tiles[v.id.index()];
            (t.z, t.y, t.x)
        });

        out.bounds = self.board.bounds();
        out.status = self.status;
        out.paused = self.paused;
        out.elapsed = self.timer.elapsed();
        out.best_time = self.best_time;
        out.layout_index = self.layout_index;
        out.layout_name = self.source.name();
        out.remaining = self.board.remaining();
    }
}
