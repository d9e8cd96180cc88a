//! Framebuffer and style types for terminal rendering.
//!
//! Board geometry can place a tile partly outside the viewport, so every
//! drawing call takes signed coordinates and clips silently.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().cell(' ')
    }
}

/// Box-drawing glyph set for [`FrameBuffer::draw_box`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BoxGlyphs {
    pub const LIGHT: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    pub const HEAVY: Self = Self {
        top_left: '┏',
        top_right: '┓',
        bottom_left: '┗',
        bottom_right: '┛',
        horizontal: '━',
        vertical: '┃',
    };
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are unspecified
    /// afterwards; callers clear before drawing.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize((width as usize) * (height as usize), Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x as i32, y as i32).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        self.set(x, y, style.cell(ch));
    }

    pub fn put_str(&mut self, x: i32, y: i32, s: &str, style: CellStyle) {
        for (i, ch) in s.chars().enumerate() {
            let cx = x + i as i32;
            if cx >= self.width as i32 {
                break;
            }
            self.put_char(cx, y, ch, style);
        }
    }

    /// Write `s` centered inside the span `[x, x + w)`
    pub fn put_str_centered(&mut self, x: i32, y: i32, w: i32, s: &str, style: CellStyle) {
        let len = s.chars().count() as i32;
        self.put_str(x + (w - len).max(0) / 2, y, s, style);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x + dx, y + dy, ch, style);
            }
        }
    }

    /// Outline a `w` x `h` box. Boxes smaller than 2x2 are not drawn.
    pub fn draw_box(&mut self, x: i32, y: i32, w: i32, h: i32, glyphs: BoxGlyphs, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (x + w - 1, y + h - 1);

        self.put_char(x, y, glyphs.top_left, style);
        self.put_char(right, y, glyphs.top_right, style);
        self.put_char(x, bottom, glyphs.bottom_left, style);
        self.put_char(right, bottom, glyphs.bottom_right, style);
        for cx in x + 1..right {
            self.put_char(cx, y, glyphs.horizontal, style);
            self.put_char(cx, bottom, glyphs.horizontal, style);
        }
        for cy in y + 1..bottom {
            self.put_char(x, cy, glyphs.vertical, style);
            self.put_char(right, cy, glyphs.vertical, style);
        }
    }
}
