//! Core game logic - pure, deterministic, and testable
//!
//! Everything in this crate is plain data plus functions over it. There is
//! no clock, thread, terminal or logging here; the engine crate drives a
//! [`Game`] and forwards [`GameSnapshot`]s to whatever presents them.
//!
//! # Module Structure
//!
//! - [`grid`]: 22x12 bordered playfield with collision checks and row clearing
//! - [`piece`]: 3x3 shape matrices and rotation
//! - [`randomizer`]: uniform shape selection and the [`PieceSource`] seam
//! - [`scoring`]: row points and the drop-speed schedule
//! - [`game`]: the engine context tying the above together
//! - [`snapshot`]: immutable per-frame copy for rendering
//!
//! # Example
//!
//! ```
//! use falling_blocks_core::{Game, TickOutcome};
//! use falling_blocks_types::Direction;
//!
//! let mut game = Game::new(12345);
//! game.start();
//! game.apply_input(Direction::Left);
//!
//! // Nothing falls until a full drop interval has elapsed.
//! assert_eq!(game.tick(100), TickOutcome::Waiting);
//! assert_eq!(game.tick(800), TickOutcome::Descended);
//! assert_eq!(game.position(), (3, 0));
//! ```

pub mod game;
pub mod grid;
pub mod piece;
pub mod randomizer;
pub mod scoring;
pub mod snapshot;

pub use falling_blocks_types as types;

pub use game::{Game, LockEvent, TickOutcome};
pub use grid::{bordered_empty, Board, Grid};
pub use piece::{rotate_clockwise, rotate_counterclockwise, shape_cells, Piece, Side};
pub use randomizer::{PieceSource, Randomizer, ScriptedSource};
pub use scoring::{line_clear_points, SpeedSchedule};
pub use snapshot::GameSnapshot;
