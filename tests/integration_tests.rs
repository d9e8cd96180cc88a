//! Integration tests - whole games through the facade crate

use std::time::{Duration, Instant};

use mahjong_solitaire::core::{layout_count, solve, Board, GameState, LayoutSource, Solvability, Tile};
use mahjong_solitaire::types::{
    CoreEvent, GameAction, GameStatus, TileId, TILE_KINDS, TILE_WIDTH,
};

fn kind_counts(board: &Board) -> Vec<usize> {
    let mut counts = vec![0; TILE_KINDS as usize + 1];
    for t in board.tiles() {
        counts[t.kind as usize] += 1;
    }
    counts
}

#[test]
fn test_every_layout_deals_two_of_each_kind() {
    let mut game = GameState::new(99);
    for _ in 0..layout_count() {
        let counts = kind_counts(game.board());
        assert_eq!(counts[0], 0);
        assert!(counts[1..].iter().all(|&c| c == 2), "{:?}", counts);
        game.apply_action(GameAction::NextLayout);
    }
}

#[test]
fn test_winnable_layout_plays_to_a_win() {
    let t0 = Instant::now();
    let mut game = GameState::with_layout(2024, layout_count() - 1);
    assert_eq!(game.layout_source(), LayoutSource::Winnable);
    game.reset_at(layout_count() - 1, t0);

    let Solvability::Solvable(moves) = solve(game.board()) else {
        panic!("winnable deal must be solvable");
    };
    assert_eq!(moves.len(), game.board().len() / 2);

    let mut now = t0;
    for (a, b) in moves {
        now += Duration::from_secs(1);
        assert!(game.select_at(a, now));
        assert!(game.select_at(b, now));
    }

    assert_eq!(game.status(), GameStatus::GameOver { win: true });
    assert_eq!(game.elapsed(), Duration::from_secs(18));
    assert_eq!(
        game.take_last_event(),
        Some(CoreEvent::Won {
            elapsed: Duration::from_secs(18),
            new_best: true
        })
    );
}

#[test]
fn test_side_by_side_fives_win_by_clicks() {
    let t0 = Instant::now();
    let mut game = GameState::with_board(
        Board::new(vec![Tile::new(5, 0, 0, 0), Tile::new(5, TILE_WIDTH, 0, 0)]),
        1,
    );
    game.reset_with_board(game.board().clone(), t0);

    game.apply_action_at(GameAction::Select { x: 30, y: 40 }, t0);
    game.apply_action_at(GameAction::Select { x: 90, y: 40 }, t0 + Duration::from_secs(3));

    assert_eq!(game.status(), GameStatus::GameOver { win: true });
    assert_eq!(game.best_time(), Duration::from_secs(3));

    // Clicks after the game ends change nothing
    assert!(!game.apply_action(GameAction::Select { x: 30, y: 40 }));
}

#[test]
fn test_loss_with_tiles_left() {
    let mut game = GameState::with_board(
        Board::new(vec![
            Tile::new(1, 0, 0, 0),
            Tile::new(1, 0, 0, 1),
            Tile::new(2, 3 * TILE_WIDTH, 0, 0),
            Tile::new(2, 5 * TILE_WIDTH, 0, 0),
        ]),
        1,
    );
    assert!(game.hint().is_some());
    game.select(TileId(2));
    game.select(TileId(3));
    assert_eq!(game.status(), GameStatus::GameOver { win: false });
    assert_eq!(game.board().remaining(), 2);
    assert_eq!(game.hint(), None);

    assert!(game.apply_action(GameAction::Restart));
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.board().remaining(), 4);
}

#[test]
fn test_restart_regenerates_same_layout() {
    let mut game = GameState::with_layout(5, 1);
    let first = game.board().placements();
    game.apply_action(GameAction::Restart);
    assert_eq!(game.layout_index(), 1);

    let positions = |p: &[mahjong_solitaire::types::TilePlacement]| {
        p.iter().map(|t| (t.x, t.y, t.z)).collect::<Vec<_>>()
    };
    assert_eq!(positions(&first), positions(&game.board().placements()));
}
