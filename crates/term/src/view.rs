//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure drawing, no I/O. Only grid rows 1..=20 and columns 1..=10 are shown;
//! the border sentinels become the box frame and row 0 stays hidden as the
//! spawn buffer.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::palette;
use crate::types::{Phase, FLOOR_ROW, LEFT_WALL_COL, PIECE_SIZE, RIGHT_WALL_COL};

/// First grid row that is drawn.
pub const VISIBLE_TOP_ROW: usize = 1;
pub const VISIBLE_ROWS: u16 = (FLOOR_ROW - VISIBLE_TOP_ROW) as u16;
pub const VISIBLE_COLS: u16 = (RIGHT_WALL_COL - LEFT_WALL_COL - 1) as u16;

/// Two columns per cell keeps blocks roughly square.
const DEFAULT_CELL_W: u16 = 2;
pub const MAX_CELL_W: u16 = 4;

const PANEL_GAP: u16 = 2;
const PANEL_W: u16 = 12;

const BLOCK: char = '█';
const DOT: char = '·';

const LEGEND: [&str; 6] = [
    "← →   move",
    "↓     down",
    "Z X   rotate",
    "P     pause",
    "Enter start",
    "Q     quit",
];

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

/// Where the playfield ended up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub panel_x: u16,
}

#[derive(Debug, Clone)]
pub struct GameView {
    /// Terminal columns per grid cell.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_W)
    }
}

impl GameView {
    /// Clamped to `1..=MAX_CELL_W`.
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_W),
        }
    }

    /// Two columns per cell when the playfield and side panel fit, one otherwise.
    pub fn fit(viewport: Viewport) -> Self {
        let cell_w = (1..=DEFAULT_CELL_W)
            .rev()
            .find(|&w| Self::new(w).required_width() <= viewport.width)
            .unwrap_or(1);
        Self::new(cell_w)
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    /// Columns needed to show the framed playfield next to the panel.
    pub fn required_width(&self) -> u16 {
        self.frame_w() + PANEL_GAP + PANEL_W
    }

    fn frame_w(&self) -> u16 {
        VISIBLE_COLS * self.cell_w + 2
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = self.frame_w();
        let frame_h = VISIBLE_ROWS + 2;
        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let frame_y = viewport.height.saturating_sub(frame_h) / 2;
        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            panel_x: frame_x.saturating_add(frame_w).saturating_add(PANEL_GAP),
        }
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Style::new(palette::TEXT, palette::SCREEN_BG).glyph(' '));

        let layout = self.layout(viewport);
        self.draw_frame(fb, &layout);
        self.draw_grid(fb, snap, &layout);
        self.draw_panel(fb, snap, &layout, viewport);
        self.draw_markers(fb, snap, &layout);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_frame(&self, fb: &mut FrameBuffer, l: &Layout) {
        let style = Style::new(palette::FRAME, palette::SCREEN_BG);
        let (x, y, w, h) = (l.frame_x, l.frame_y, l.frame_w, l.frame_h);

        fb.set(x, y, style.glyph('┌'));
        fb.set(x + w - 1, y, style.glyph('┐'));
        fb.set(x, y + h - 1, style.glyph('└'));
        fb.set(x + w - 1, y + h - 1, style.glyph('┘'));
        for dx in 1..w - 1 {
            fb.set(x + dx, y, style.glyph('─'));
            fb.set(x + dx, y + h - 1, style.glyph('─'));
        }
        for dy in 1..h - 1 {
            fb.set(x, y + dy, style.glyph('│'));
            fb.set(x + w - 1, y + dy, style.glyph('│'));
        }
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, l: &Layout) {
        let dot = Style::new(palette::EMPTY_DOT, palette::PLAYFIELD_BG);
        for vy in 0..VISIBLE_ROWS {
            let row = VISIBLE_TOP_ROW + vy as usize;
            for vx in 0..VISIBLE_COLS {
                let col = LEFT_WALL_COL + 1 + vx as usize;
                let glyph = match palette::tag_rgb(snap.grid[row][col]) {
                    Some(rgb) => Style::new(rgb, palette::PLAYFIELD_BG).glyph(BLOCK),
                    None => dot.glyph(DOT),
                };
                let px = l.frame_x + 1 + vx * self.cell_w;
                fb.fill_rect(px, l.frame_y + 1 + vy, self.cell_w, 1, glyph);
            }
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, l: &Layout, vp: Viewport) {
        if l.panel_x >= vp.width {
            return;
        }
        let label = Style::new(palette::LABEL, palette::SCREEN_BG).bold();
        let value = Style::new(palette::TEXT, palette::SCREEN_BG);
        let muted = Style::new(palette::MUTED, palette::SCREEN_BG);
        let x = l.panel_x;
        let mut y = l.frame_y;

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        for (r, row) in snap.next.iter().enumerate() {
            for (c, &tag) in row.iter().enumerate() {
                let Some(rgb) = palette::tag_rgb(tag) else {
                    continue;
                };
                let px = x + c as u16 * self.cell_w;
                let glyph = Style::new(rgb, palette::SCREEN_BG).glyph(BLOCK);
                fb.fill_rect(px, y + r as u16, self.cell_w, 1, glyph);
            }
        }
        y += PIECE_SIZE as u16 + 1;

        fb.put_str(x, y, "SCORE", label);
        fb.put_u32(x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(x, y, "SPEED", label);
        fb.put_u32(x, y + 1, snap.drop_interval_ms, value);
        let digits = digit_count(snap.drop_interval_ms);
        fb.put_str(x + digits + 1, y + 1, "ms", muted);
        y += 3;

        for line in LEGEND {
            if y >= vp.height {
                break;
            }
            fb.put_str(x, y, line, muted);
            y += 1;
        }
    }

    fn draw_markers(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, l: &Layout) {
        let mid = l.frame_y + l.frame_h / 2;
        match snap.phase {
            Phase::Running => {}
            Phase::Paused => self.draw_centered(fb, l, mid, "PAUSED"),
            Phase::GameOver => {
                self.draw_centered(fb, l, mid, "GAME OVER");
                self.draw_centered(fb, l, mid + 2, "PRESS ENTER");
            }
            Phase::Idle => self.draw_centered(fb, l, mid, "PRESS ENTER"),
        }
    }

    fn draw_centered(&self, fb: &mut FrameBuffer, l: &Layout, y: u16, text: &str) {
        let style = Style::new(Rgb::new(255, 255, 255), palette::SCREEN_BG).bold();
        let w = text.chars().count() as u16;
        let x = l.frame_x + l.frame_w.saturating_sub(w) / 2;
        fb.put_str(x, y, text, style);
    }
}

fn digit_count(mut v: u32) -> u16 {
    let mut n = 1;
    while v >= 10 {
        v /= 10;
        n += 1;
    }
    n
}
