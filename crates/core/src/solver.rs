//! Solver module - can this board still be cleared?
//!
//! Depth-first search over removable pairs with a few shortcuts:
//!
//! - Cover relations are pre-computed as bitmasks, so "is tile `i` free" is a
//!   single AND against the removed mask.
//! - Safe moves are applied without branching: when every remaining copy of a
//!   kind is free (and their count is even), removing them can only uncover
//!   more tiles, so no solution is lost. On a generated deal (two copies per
//!   kind) this turns the search into a greedy sweep.
//! - Dead states are memoised in an `FxHashSet` keyed by the removed mask.
//! - A state budget keeps pathological custom layouts from stalling a frame.

use rustc_hash::FxHashSet;

use crate::board::Board;
use crate::types::{TileId, TileKind};

/// Largest board the solver accepts (one bit per tile)
pub const MAX_SOLVER_TILES: usize = 128;

/// Branching states explored before the solver gives up
pub const MAX_SEARCH_STATES: usize = 200_000;

const KIND_SLOTS: usize = TileKind::MAX as usize + 1;

/// Solver verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solvability {
    /// A clearing sequence, in play order
    Solvable(Vec<(TileId, TileId)>),
    /// No clearing sequence exists
    Unsolvable,
    /// Board too large or search budget exhausted
    Undetermined,
}

impl Solvability {
    pub fn is_solvable(&self) -> bool {
        matches!(self, Solvability::Solvable(_))
    }
}

/// Search for a clearing sequence from the board's current state
pub fn solve(board: &Board) -> Solvability {
    if board.len() > MAX_SOLVER_TILES {
        return Solvability::Undetermined;
    }

    let mut search = Search::new(board);

    // A kind with an odd number of copies left can never be cleared
    let mut counts = [0u16; KIND_SLOTS];
    for i in 0..search.kinds.len() {
        if search.initial & (1u128 << i) == 0 {
            counts[search.kinds[i] as usize] += 1;
        }
    }
    if counts.iter().any(|c| c % 2 == 1) {
        return Solvability::Unsolvable;
    }

    let mut path = Vec::new();
    match search.run(search.initial, &mut path) {
        Some(true) => Solvability::Solvable(
            path.into_iter()
                .map(|(a, b)| (TileId(a), TileId(b)))
                .collect(),
        ),
        Some(false) => Solvability::Unsolvable,
        None => Solvability::Undetermined,
    }
}

/// Check if the board can still be cleared (undetermined counts as no)
pub fn is_solvable(board: &Board) -> bool {
    solve(board).is_solvable()
}

struct Search {
    kinds: Vec<TileKind>,
    /// `covers[i]`: tiles that hide tile `i` while they remain
    covers: Vec<u128>,
    initial: u128,
    full: u128,
    dead: FxHashSet<u128>,
    visited: usize,
}

impl Search {
    fn new(board: &Board) -> Self {
        let tiles = board.tiles();
        let n = tiles.len();

        let mut covers = vec![0u128; n];
        for (i, low) in tiles.iter().enumerate() {
            for (j, high) in tiles.iter().enumerate() {
                if high.z > low.z && low.overlaps(high) {
                    covers[i] |= 1u128 << j;
                }
            }
        }

        let initial = tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.removed())
            .fold(0u128, |acc, (i, _)| acc | (1u128 << i));
        let full = if n == 128 { u128::MAX } else { (1u128 << n) - 1 };

        Self {
            kinds: tiles.iter().map(|t| t.kind).collect(),
            covers,
            initial,
            full,
            dead: FxHashSet::default(),
            visited: 0,
        }
    }

    #[inline(always)]
    fn is_free(&self, removed: u128, i: usize) -> bool {
        removed & (1u128 << i) == 0 && self.covers[i] & !removed == 0
    }

    /// Free tiles sorted by kind, plus remaining copies per kind
    fn free_by_kind(&self, removed: u128) -> (Vec<(TileKind, usize)>, [u16; KIND_SLOTS]) {
        let mut remaining = [0u16; KIND_SLOTS];
        let mut free = Vec::new();
        for i in 0..self.kinds.len() {
            if removed & (1u128 << i) != 0 {
                continue;
            }
            remaining[self.kinds[i] as usize] += 1;
            if self.is_free(removed, i) {
                free.push((self.kinds[i], i));
            }
        }
        free.sort_unstable();
        (free, remaining)
    }

    /// Apply safe moves until none is left; returns the new removed mask
    fn sweep(&self, mut removed: u128, path: &mut Vec<(usize, usize)>) -> u128 {
        loop {
            let (free, remaining) = self.free_by_kind(removed);
            let mut progressed = false;

            for group in free.chunk_by(|a, b| a.0 == b.0) {
                let kind = group[0].0 as usize;
                if group.len() as u16 == remaining[kind] && group.len() % 2 == 0 {
                    for pair in group.chunks(2) {
                        path.push((pair[0].1, pair[1].1));
                        removed |= (1u128 << pair[0].1) | (1u128 << pair[1].1);
                    }
                    progressed = true;
                }
            }

            if !progressed {
                return removed;
            }
        }
    }

    /// `Some(true)`: solved (path holds the sequence). `Some(false)`: dead end.
    /// `None`: budget exhausted.
    fn run(&mut self, removed: u128, path: &mut Vec<(usize, usize)>) -> Option<bool> {
        let start = path.len();
        let removed = self.sweep(removed, path);

        if removed == self.full {
            return Some(true);
        }
        if self.dead.contains(&removed) {
            path.truncate(start);
            return Some(false);
        }

        self.visited += 1;
        if self.visited > MAX_SEARCH_STATES {
            path.truncate(start);
            return None;
        }

        let (free, _) = self.free_by_kind(removed);
        for group in free.chunk_by(|a, b| a.0 == b.0) {
            for (x, &(_, a)) in group.iter().enumerate() {
                for &(_, b) in &group[x + 1..] {
                    path.push((a, b));
                    let next = removed | (1u128 << a) | (1u128 << b);
                    match self.run(next, path) {
                        Some(true) => return Some(true),
                        Some(false) => {
                            path.pop();
                        }
                        None => {
                            path.truncate(start);
                            return None;
                        }
                    }
                }
            }
        }

        self.dead.insert(removed);
        path.truncate(start);
        Some(false)
    }
}
