//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Board coordinates are scaled down onto the terminal grid: one column spans
//! [`UNITS_PER_COL`] board units and one row [`UNITS_PER_ROW`], so a tile is
//! drawn as a 6x4 cell box. A cell belongs to a tile when the cell's center
//! point lies in the tile's projected footprint; clicks are mapped back
//! through the same center point, so what is drawn under the pointer is what
//! gets picked.

use crate::core::{format_mm_ss, layout_count, GameSnapshot, TileView};
use crate::fb::{BoxGlyphs, CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, TileKind, TileRect};

/// Board units covered by one terminal column
pub const UNITS_PER_COL: i32 = 10;
/// Board units covered by one terminal row
pub const UNITS_PER_ROW: i32 = 20;

const PANEL_WIDTH: i32 = 24;

const BG: Rgb = Rgb::new(18, 40, 28);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const TILE_FACE: Rgb = Rgb::new(236, 228, 206);
const TILE_FACE_SELECTED: Rgb = Rgb::new(250, 210, 90);
const TILE_FACE_BLOCKED: Rgb = Rgb::new(150, 145, 132);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Placement of the board area on the terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Board-space point mapped to the top-left cell's corner
    pub origin_x: i32,
    pub origin_y: i32,
    /// Terminal cell of the board area's top-left corner (inside the frame)
    pub left: i32,
    pub top: i32,
    pub cols: i32,
    pub rows: i32,
}

impl BoardLayout {
    /// Center a board with the given bounds in the space left of the panel
    pub fn fit(bounds: TileRect, viewport: Viewport) -> Self {
        let cols = ceil_div(bounds.width - UNITS_PER_COL / 2, UNITS_PER_COL).max(1);
        let rows = ceil_div(bounds.height - UNITS_PER_ROW / 2, UNITS_PER_ROW).max(1);
        let area_w = (viewport.width as i32 - PANEL_WIDTH).max(0);
        let frame_w = cols + 2;
        let frame_h = rows + 2;

        Self {
            origin_x: bounds.x,
            origin_y: bounds.y,
            left: ((area_w - frame_w) / 2).max(0) + 1,
            top: ((viewport.height as i32 - frame_h) / 2).max(0) + 1,
            cols,
            rows,
        }
    }

    /// Board point at the center of a cell given relative to the board area
    fn center_of(&self, col: i32, row: i32) -> (i32, i32) {
        (
            self.origin_x + col * UNITS_PER_COL + UNITS_PER_COL / 2,
            self.origin_y + row * UNITS_PER_ROW + UNITS_PER_ROW / 2,
        )
    }

    /// Cells covered by a board rectangle, as `(col, row, width, height)` in
    /// terminal coordinates (may extend past the board area)
    pub fn cells_of(&self, rect: TileRect) -> (i32, i32, i32, i32) {
        let half_c = UNITS_PER_COL / 2;
        let half_r = UNITS_PER_ROW / 2;
        let c0 = ceil_div(rect.x - self.origin_x - half_c, UNITS_PER_COL);
        let c1 = ceil_div(rect.right() - self.origin_x - half_c, UNITS_PER_COL);
        let r0 = ceil_div(rect.y - self.origin_y - half_r, UNITS_PER_ROW);
        let r1 = ceil_div(rect.bottom() - self.origin_y - half_r, UNITS_PER_ROW);
        (self.left + c0, self.top + r0, c1 - c0, r1 - r0)
    }

    /// Board point under a terminal cell, or `None` outside the board area
    pub fn board_point(&self, column: u16, row: u16) -> Option<(i32, i32)> {
        let col = column as i32 - self.left;
        let row = row as i32 - self.top;
        if col < 0 || row < 0 || col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.center_of(col, row))
    }
}

/// Ceiling division that is correct for negative numerators
fn ceil_div(a: i32, b: i32) -> i32 {
    (a + b - 1).div_euclid(b)
}

/// A lightweight terminal renderer for the Mahjong board.
#[derive(Debug, Clone, Default)]
pub struct GameView {
    player_name: String,
    editor: bool,
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// Show the editor hints (saving is only available there)
    pub fn with_editor(mut self, editor: bool) -> Self {
        self.editor = editor;
        self
    }

    /// Where the board lands for this snapshot, if it has any tiles at all
    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Option<BoardLayout> {
        snap.bounds.map(|b| BoardLayout::fit(b, viewport))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG).cell(' '));

        let layout = self.layout(snap, viewport);
        if let Some(layout) = layout {
            let felt = CellStyle::new(Rgb::new(60, 90, 70), BG);
            fb.fill_rect(layout.left, layout.top, layout.cols, layout.rows, ' ', felt);
            fb.draw_box(
                layout.left - 1,
                layout.top - 1,
                layout.cols + 2,
                layout.rows + 2,
                BoxGlyphs::LIGHT,
                CellStyle::new(Rgb::new(170, 170, 170), PANEL_BG),
            );

            for tile in &snap.tiles {
                draw_tile(fb, &layout, tile);
            }
        }

        self.draw_side_panel(fb, snap, viewport);

        let (x, y, w, h) = match layout {
            Some(l) => (l.left, l.top, l.cols, l.rows),
            None => (0, 0, viewport.width as i32 - PANEL_WIDTH, viewport.height as i32),
        };
        match snap.status {
            _ if snap.paused => draw_overlay(fb, x, y, w, h, &["PAUSED", "p to resume"]),
            GameStatus::GameOver { win: true } => {
                let time = format!("time {}", format_mm_ss(snap.elapsed));
                let record = snap.has_best_time() && snap.elapsed == snap.best_time;
                let mut lines = vec!["YOU WIN!", time.as_str()];
                if record {
                    lines.push("NEW RECORD");
                }
                draw_overlay(fb, x, y, w, h, &lines);
            }
            GameStatus::GameOver { win: false } => {
                draw_overlay(fb, x, y, w, h, &["GAME OVER", "no moves left", "r to restart"])
            }
            GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let x = viewport.width as i32 - PANEL_WIDTH + 2;
        if x < 0 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let best = if snap.has_best_time() {
            format_mm_ss(snap.best_time)
        } else {
            "--:--".to_string()
        };
        let layout = format!(
            "{}/{} {}",
            snap.layout_index + 1,
            layout_count(),
            snap.layout_name
        );
        let player = if self.player_name.is_empty() {
            "-"
        } else {
            self.player_name.as_str()
        };

        let mut y = 1;
        for (name, text) in [
            ("PLAYER", player.to_string()),
            ("LAYOUT", layout),
            ("TIME", format_mm_ss(snap.elapsed)),
            ("BEST", best),
            ("TILES", snap.remaining.to_string()),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, &text, value);
            y += 3;
        }

        let mut keys = vec![
            "click select",
            "r     restart",
            "n     next layout",
            "p     pause",
        ];
        if self.editor {
            keys.push("s     save layout");
        }
        keys.push("q     quit");
        for line in keys {
            fb.put_str(x, y, line, hint);
            y += 1;
        }
    }
}

fn kind_color(kind: TileKind) -> Rgb {
    const PALETTE: [Rgb; 6] = [
        Rgb::new(200, 40, 40),
        Rgb::new(30, 110, 50),
        Rgb::new(30, 70, 170),
        Rgb::new(140, 60, 150),
        Rgb::new(170, 100, 20),
        Rgb::new(20, 120, 130),
    ];
    PALETTE[kind as usize % PALETTE.len()]
}

fn draw_tile(fb: &mut FrameBuffer, layout: &BoardLayout, tile: &TileView) {
    let (x, y, w, h) = layout.cells_of(tile.rect);
    if w <= 0 || h <= 0 {
        return;
    }

    let face = if tile.selected {
        TILE_FACE_SELECTED
    } else if tile.selectable {
        TILE_FACE
    } else {
        TILE_FACE_BLOCKED
    };
    let edge = CellStyle::new(Rgb::new(70, 60, 50), face);
    let mut label = CellStyle::new(kind_color(tile.kind), face).bold();
    if !tile.selectable {
        label = label.dim();
    }

    fb.fill_rect(x, y, w, h, ' ', edge);
    let glyphs = if tile.selected {
        BoxGlyphs::HEAVY
    } else {
        BoxGlyphs::LIGHT
    };
    fb.draw_box(x, y, w, h, glyphs, edge);
    fb.put_str_centered(x, y + (h - 1) / 2, w, &tile.kind.to_string(), label);
}

fn draw_overlay(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, lines: &[&str]) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    let inner = lines.iter().map(|l| l.chars().count() as i32).max().unwrap_or(0);
    let box_w = inner + 4;
    let box_h = lines.len() as i32 + 2;
    let bx = x + (w - box_w).max(0) / 2;
    let by = y + (h - box_h).max(0) / 2;

    fb.fill_rect(bx, by, box_w, box_h, ' ', style);
    fb.draw_box(bx, by, box_w, box_h, BoxGlyphs::HEAVY, style);
    for (i, line) in lines.iter().enumerate() {
        fb.put_str_centered(bx, by + 1 + i as i32, box_w, line, style);
    }
}
