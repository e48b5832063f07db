//! Colors for grid cell tags.

use crate::fb::Rgb;
use crate::types::{BlockColor, Cell, BORDER};

pub const PLAYFIELD_BG: Rgb = Rgb::new(24, 24, 32);
pub const EMPTY_DOT: Rgb = Rgb::new(70, 70, 84);
pub const FRAME: Rgb = Rgb::new(150, 150, 165);
pub const TEXT: Rgb = Rgb::new(210, 210, 210);
pub const LABEL: Rgb = Rgb::new(240, 240, 240);
pub const MUTED: Rgb = Rgb::new(130, 130, 140);
pub const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

pub fn block_rgb(color: BlockColor) -> Rgb {
    match color {
        BlockColor::Red => Rgb::new(220, 70, 70),
        BlockColor::Blue => Rgb::new(80, 120, 230),
        BlockColor::Green => Rgb::new(90, 200, 110),
        BlockColor::Yellow => Rgb::new(240, 215, 80),
        BlockColor::Orange => Rgb::new(250, 160, 40),
        BlockColor::White => Rgb::new(235, 235, 235),
        BlockColor::Gray => Rgb::new(150, 150, 150),
    }
}

/// Fill color for a cell tag; `None` for empty or unknown tags.
pub fn tag_rgb(tag: Cell) -> Option<Rgb> {
    if tag == BORDER {
        return Some(FRAME);
    }
    BlockColor::from_tag(tag).map(block_rgb)
}
