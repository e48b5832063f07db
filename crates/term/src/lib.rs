//! Terminal presentation for the falling-blocks game.
//!
//! Views draw a [`falling_blocks_core::GameSnapshot`] into a [`FrameBuffer`];
//! the [`TerminalRenderer`] flushes framebuffers to the terminal with
//! crossterm. Drawing never touches game state.

pub mod fb;
pub mod palette;
pub mod renderer;
pub mod view;

pub use falling_blocks_core as core;
pub use falling_blocks_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{GameView, Layout, Viewport, MAX_CELL_W, VISIBLE_COLS, VISIBLE_ROWS};
