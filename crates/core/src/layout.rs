//! Layout module - predefined templates and tile deals
//!
//! A template is an ordered list of positions `(x, y, layer)`, expanded from a
//! few rectangular regions. Dealing assigns a shuffled pair deck onto the first
//! [`FULL_DEAL_TILES`] positions; extra positions stay unused.
//!
//! Two deal modes:
//!
//! - **Template**: the deck is shuffled tile-by-tile and laid onto the
//!   requested template. Every kind appears twice, but the board may not be
//!   clearable.
//! - **Winnable** (requested index outside the catalog): pairs are laid onto
//!   the default template by simulated reverse play, so a clearing sequence
//!   exists by construction. The result is checked with the solver; if no
//!   verified deal is found within [`MAX_DEAL_ATTEMPTS`], a plain pair shuffle
//!   is used instead.

use crate::board::Board;
use crate::rng::{shuffled_deck, shuffled_pair_order, SimpleRng};
use crate::solver::{solve, Solvability};
use crate::tile::Tile;
use crate::types::{TileId, FULL_DEAL_TILES, TILE_HEIGHT, TILE_WIDTH};

/// Reverse-play attempts before the winnable deal gives up on verification
pub const MAX_DEAL_ATTEMPTS: usize = 32;

/// A position slot in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// A rectangular block of slots on one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub layer: i32,
    pub cols: i32,
    pub rows: i32,
    /// Top-left slot position in board units
    pub x: i32,
    pub y: i32,
}

impl Region {
    const fn new(layer: i32, cols: i32, rows: i32, x: i32, y: i32) -> Self {
        Self {
            layer,
            cols,
            rows,
            x,
            y,
        }
    }

    /// Row-major slots of this region
    fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols).map(move |c| Slot {
                x: self.x + c * TILE_WIDTH,
                y: self.y + r * TILE_HEIGHT,
                z: self.layer,
            })
        })
    }

    const fn len(&self) -> usize {
        (self.cols * self.rows) as usize
    }
}

/// A named, predefined arrangement of slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTemplate {
    pub name: &'static str,
    regions: &'static [Region],
}

impl LayoutTemplate {
    /// Ordered slot list, lower layers first
    pub fn slots(&self) -> Vec<Slot> {
        self.regions.iter().flat_map(Region::slots).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.iter().map(Region::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const HALF_W: i32 = TILE_WIDTH / 2;
const HALF_H: i32 = TILE_HEIGHT / 2;

/// The template catalog. Index 0 is the default template.
pub const TEMPLATES: [LayoutTemplate; 3] = [
    LayoutTemplate {
        name: "pyramid",
        regions: &[
            Region::new(0, 6, 4, 0, 0),
            Region::new(1, 4, 2, TILE_WIDTH, TILE_HEIGHT),
            Region::new(2, 2, 2, 2 * TILE_WIDTH, TILE_HEIGHT),
        ],
    },
    LayoutTemplate {
        name: "bridge",
        regions: &[
            Region::new(0, 8, 3, 0, 0),
            Region::new(1, 6, 2, TILE_WIDTH, HALF_H),
            // Spare slots beyond a full deal; never filled
            Region::new(2, 2, 1, 3 * TILE_WIDTH, TILE_HEIGHT),
        ],
    },
    LayoutTemplate {
        name: "fortress",
        regions: &[
            Region::new(0, 5, 4, 0, 0),
            Region::new(1, 4, 3, HALF_W, HALF_H),
            Region::new(2, 2, 2, TILE_WIDTH + HALF_W, TILE_HEIGHT),
        ],
    },
];

/// Number of templates in the catalog
pub fn template_count() -> usize {
    TEMPLATES.len()
}

/// Number of selectable layouts: every template plus the winnable deal
pub fn layout_count() -> usize {
    template_count() + 1
}

/// Layout index that follows `index`, wrapping back to the first template
pub fn next_layout_index(index: usize) -> usize {
    (index + 1) % layout_count()
}

/// Template by catalog index
pub fn template(index: usize) -> Option<&'static LayoutTemplate> {
    TEMPLATES.get(index)
}

/// Where a deal's positions came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutSource {
    /// A catalog template, by index
    Template(usize),
    /// The verified-winnable fallback on the default template
    Winnable,
    /// An externally supplied layout (editor file)
    Custom,
}

impl LayoutSource {
    /// The source a layout index resolves to
    pub fn for_index(index: usize) -> Self {
        if index < template_count() {
            LayoutSource::Template(index)
        } else {
            LayoutSource::Winnable
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayoutSource::Template(i) => TEMPLATES[*i].name,
            LayoutSource::Winnable => "winnable",
            LayoutSource::Custom => "custom",
        }
    }
}

/// Deal a fresh board for a layout index.
///
/// Indices inside the catalog deal that template; anything else deals the
/// winnable fallback.
pub fn generate(layout_index: usize, rng: &mut SimpleRng) -> Board {
    match template(layout_index) {
        Some(t) => deal_template(t, rng),
        None => deal_winnable(rng),
    }
}

/// Shuffle the pair deck tile-by-tile and lay it onto a template
pub fn deal_template(template: &LayoutTemplate, rng: &mut SimpleRng) -> Board {
    let deck = shuffled_deck(rng);
    let tiles = template
        .slots()
        .into_iter()
        .zip(deck)
        .map(|(s, kind)| Tile::new(kind, s.x, s.y, s.z))
        .collect();
    Board::new(tiles)
}

/// Deal pairs onto the default template so that a clearing sequence exists
pub fn deal_winnable(rng: &mut SimpleRng) -> Board {
    let slots: Vec<Slot> = TEMPLATES[0]
        .slots()
        .into_iter()
        .take(FULL_DEAL_TILES)
        .collect();

    for attempt in 1..=MAX_DEAL_ATTEMPTS {
        let Some(board) = deal_by_reverse_play(&slots, rng) else {
            log::debug!("winnable deal attempt {} ran out of free slots", attempt);
            continue;
        };
        if matches!(solve(&board), Solvability::Solvable(_)) {
            log::debug!("winnable deal verified after {} attempt(s)", attempt);
            return board;
        }
    }

    log::warn!(
        "no verified winnable deal after {} attempts; dealing unverified pairs",
        MAX_DEAL_ATTEMPTS
    );
    deal_pairs(&slots, rng)
}

/// Pairs in shuffled order, each pair laid onto two consecutive slots
fn deal_pairs(slots: &[Slot], rng: &mut SimpleRng) -> Board {
    let kinds = shuffled_pair_order(rng)
        .into_iter()
        .flat_map(|kind| [kind, kind]);
    let tiles = slots
        .iter()
        .zip(kinds)
        .map(|(s, kind)| Tile::new(kind, s.x, s.y, s.z))
        .collect();
    Board::new(tiles)
}

/// Assign pair kinds by lifting free slots off a full board two at a time.
///
/// Replaying the lifts in order is a valid clearing sequence, since each pair
/// was uncovered at the moment it was lifted. Returns `None` when fewer than
/// two slots are free at some step.
fn deal_by_reverse_play(slots: &[Slot], rng: &mut SimpleRng) -> Option<Board> {
    let mut scratch = Board::new(
        slots
            .iter()
            .map(|s| Tile::new(0, s.x, s.y, s.z))
            .collect(),
    );
    let mut kinds = vec![0; slots.len()];

    for kind in shuffled_pair_order(rng) {
        let free: Vec<TileId> = scratch.selectable().collect();
        if free.len() < 2 {
            return None;
        }
        let i = rng.next_range(free.len() as u32) as usize;
        let mut j = rng.next_range(free.len() as u32 - 1) as usize;
        if j >= i {
            j += 1;
        }

        for id in [free[i], free[j]] {
            kinds[id.index()] = kind;
            scratch.lift(id);
        }
    }

    let mut board = Board::new(scratch.tiles().to_vec());
    for (id, kind) in kinds.into_iter().enumerate() {
        board.set_kind(TileId(id), kind);
    }
    Some(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TileKind, TILE_KINDS};

    fn assert_full_pairs(board: &Board) {
        assert_eq!(board.len(), FULL_DEAL_TILES);
        let mut counts = [0usize; TILE_KINDS as usize + 1];
        for t in board.tiles() {
            assert!((1..=TILE_KINDS).contains(&t.kind), "bad kind {}", t.kind);
            counts[t.kind as usize] += 1;
        }
        for kind in 1..=TILE_KINDS as usize {
            assert_eq!(counts[kind], 2, "kind {} miscounted", kind);
        }
    }

    #[test]
    fn test_every_template_fits_a_full_deal() {
        for t in TEMPLATES.iter() {
            assert!(t.len() >= FULL_DEAL_TILES, "{} too small", t.name);
            assert_eq!(t.slots().len(), t.len());
        }
    }

    #[test]
    fn test_template_slots_are_distinct() {
        for t in TEMPLATES.iter() {
            let slots = t.slots();
            for (i, a) in slots.iter().enumerate() {
                assert!(
                    !slots[i + 1..].contains(a),
                    "{} repeats slot {:?}",
                    t.name,
                    a
                );
            }
        }
    }

    #[test]
    fn test_template_deals_are_full_pair_decks() {
        let mut rng = SimpleRng::new(2024);
        for index in 0..template_count() {
            let board = generate(index, &mut rng);
            assert_full_pairs(&board);
        }
    }

    #[test]
    fn test_template_deal_keeps_slot_order() {
        let mut rng = SimpleRng::new(5);
        let board = deal_template(&TEMPLATES[1], &mut rng);
        let slots = TEMPLATES[1].slots();
        assert!(slots.len() > FULL_DEAL_TILES);
        for (t, s) in board.tiles().iter().zip(slots.iter()) {
            assert_eq!((t.x, t.y, t.z), (s.x, s.y, s.z));
        }
    }

    #[test]
    fn test_out_of_range_index_deals_winnable() {
        let mut rng = SimpleRng::new(77);
        let board = generate(template_count(), &mut rng);
        assert_full_pairs(&board);

        let slots = TEMPLATES[0].slots();
        for (t, s) in board.tiles().iter().zip(slots.iter()) {
            assert_eq!((t.x, t.y, t.z), (s.x, s.y, s.z));
        }
    }

    #[test]
    fn test_winnable_deal_is_solvable() {
        for seed in [1, 2, 3, 42, 1000] {
            let mut rng = SimpleRng::new(seed);
            let board = deal_winnable(&mut rng);
            assert!(
                matches!(solve(&board), Solvability::Solvable(_)),
                "seed {} produced an unsolvable deal",
                seed
            );
        }
    }

    #[test]
    fn test_reverse_play_order_is_a_clearing_sequence() {
        let slots: Vec<Slot> = TEMPLATES[0].slots().into_iter().take(FULL_DEAL_TILES).collect();
        let mut rng = SimpleRng::new(9);
        let board = (0..MAX_DEAL_ATTEMPTS)
            .find_map(|_| deal_by_reverse_play(&slots, &mut rng))
            .expect("reverse play should succeed on the default template");
        assert_full_pairs(&board);
    }

    #[test]
    fn test_pair_fallback_keeps_pairs_adjacent() {
        let slots: Vec<Slot> = TEMPLATES[0].slots().into_iter().take(FULL_DEAL_TILES).collect();
        let mut rng = SimpleRng::new(11);
        let board = deal_pairs(&slots, &mut rng);
        assert_full_pairs(&board);
        let kinds: Vec<TileKind> = board.tiles().iter().map(|t| t.kind).collect();
        for pair in kinds.chunks(2) {
            assert_eq!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_next_layout_wraps_through_winnable() {
        let mut index = 0;
        let mut seen = Vec::new();
        for _ in 0..layout_count() {
            seen.push(LayoutSource::for_index(index));
            index = next_layout_index(index);
        }
        assert_eq!(index, 0);
        assert_eq!(seen.last(), Some(&LayoutSource::Winnable));
        assert_eq!(next_layout_index(99), 100 % layout_count());
    }

    #[test]
    fn test_layout_source_names() {
        assert_eq!(LayoutSource::for_index(0), LayoutSource::Template(0));
        assert_eq!(LayoutSource::for_index(0).name(), "pyramid");
        assert_eq!(LayoutSource::for_index(99), LayoutSource::Winnable);
        assert_eq!(LayoutSource::Custom.name(), "custom");
    }
}
