//! Terminal input mapping.
//!
//! Turns `crossterm` key events into [`crate::types::Command`]s. Nothing here
//! reads the terminal; the binary polls events and hands each key to
//! [`map_key`].

pub mod map;

pub use falling_blocks_types as types;

pub use map::{is_quit, map_key};
