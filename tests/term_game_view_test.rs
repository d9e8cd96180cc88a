use std::time::{Duration, Instant};

use mahjong_solitaire::core::{Board, GameState, Tile};
use mahjong_solitaire::input::handle_mouse_event;
use mahjong_solitaire::term::{FrameBuffer, GameView, Viewport};
use mahjong_solitaire::types::{GameAction, GameStatus, TileId, TILE_WIDTH};

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).map_or(' ', |c| c.ch));
        }
        all.push('\n');
    }
    all
}

fn pair_game() -> GameState {
    GameState::with_board(
        Board::new(vec![
            Tile::new(12, 0, 0, 0),
            Tile::new(12, 2 * TILE_WIDTH, 0, 0),
        ]),
        1,
    )
}

#[test]
fn term_view_draws_tiles_and_panel() {
    let game = GameState::new(1);
    let view = GameView::new().with_player_name("Ada");
    let fb = view.render(&game.snapshot(), Viewport::new(100, 30));
    let text = screen_text(&fb);

    assert!(text.contains("PLAYER"));
    assert!(text.contains("Ada"));
    assert!(text.contains("1/4 pyramid"));
    assert!(text.contains("TILES"));
    assert!(text.contains("36"));
    assert!(text.contains('┌'));
    assert!(!text.contains("save layout"));
}

#[test]
fn term_view_shows_editor_hint() {
    let view = GameView::new().with_editor(true);
    let fb = view.render(&pair_game().snapshot(), Viewport::new(80, 24));
    assert!(screen_text(&fb).contains("save layout"));
}

#[test]
fn term_view_shows_kind_label() {
    let fb = GameView::new().render(&pair_game().snapshot(), Viewport::new(80, 24));
    assert_eq!(screen_text(&fb).matches("12").count(), 2);
}

#[test]
fn term_view_overlays_pause_and_win() {
    let mut game = pair_game();
    let view = GameView::new();

    game.apply_action(GameAction::Pause);
    let fb = view.render(&game.snapshot(), Viewport::new(80, 24));
    assert!(screen_text(&fb).contains("PAUSED"));

    let t0 = Instant::now();
    game.restart_at(t0);
    game.select_at(TileId(0), t0);
    game.select_at(TileId(1), t0 + Duration::from_secs(5));
    assert_eq!(game.status(), GameStatus::GameOver { win: true });
    let text = screen_text(&view.render(&game.snapshot(), Viewport::new(80, 24)));
    assert!(text.contains("YOU WIN!"));
    assert!(text.contains("NEW RECORD"));
}

#[test]
fn mouse_click_on_drawn_tile_selects_it() {
    let mut game = pair_game();
    let view = GameView::new();
    let viewport = Viewport::new(80, 24);
    let snap = game.snapshot();
    let layout = view.layout(&snap, viewport).unwrap();

    // Middle cell of the second tile's box
    let (x, y, w, h) = layout.cells_of(snap.tiles[1].rect);
    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: (x + w / 2) as u16,
        row: (y + h / 2) as u16,
        modifiers: KeyModifiers::NONE,
    };
    let action = handle_mouse_event(click, |c, r| layout.board_point(c, r)).unwrap();

    assert!(game.apply_action_at(action, Instant::now()));
    assert_eq!(game.board().selected(), Some(TileId(1)));
}
