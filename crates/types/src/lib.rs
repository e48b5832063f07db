//! Core types module - shared data structures and constants
//!
//! Everything in here is plain data with no dependencies, shared by the game
//! engine, the loop runtime and the terminal front end.
//!
//! # Grid Dimensions
//!
//! The grid is 22 rows by 12 columns. Only rows 0..=20 and columns 1..=10 are
//! playable; row 21 and columns 0/11 are border sentinels that are always
//! occupied, so pieces can hang their empty padding over the edge.
//!
//! ```text
//!  col: 0 1 2 3 4 5 6 7 8 9 10 11
//!  row 0  # . . . . . . . . . .  #
//!  ...
//!  row 20 # . . . . . . . . . .  #
//!  row 21 # # # # # # # # # # #  #
//! ```
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_MS` | 900 | Drop interval at game start |
//! | `SPEEDUP_STEP_MS` | 150 | Interval reduction per speed-up |
//! | `SPEEDUP_MIN_INTERVAL_MS` | 200 | Speed-ups stop once the interval is below this |
//! | `SPEEDUP_SCORE_DELTA` | 15 | Score growth needed for a speed-up |
//! | `DEFAULT_POLL_US` | 500 | Loop poll granularity |
//!
//! # Examples
//!
//! ```
//! use falling_blocks_types::{BlockColor, Direction, ShapeKind, GRID_COLS, GRID_ROWS};
//!
//! assert_eq!(ShapeKind::Bar.color(), BlockColor::Gray);
//! assert_eq!(BlockColor::from_tag(3), Some(BlockColor::Green));
//! assert_eq!(Direction::from_code(Direction::Down.code()), Some(Direction::Down));
//! assert_eq!((GRID_ROWS, GRID_COLS), (22, 12));
//! ```

/// Grid height including the floor sentinel row.
pub const GRID_ROWS: usize = 22;

/// Grid width including both wall sentinel columns.
pub const GRID_COLS: usize = 12;

/// Index of the floor sentinel row.
pub const FLOOR_ROW: usize = GRID_ROWS - 1;

/// Index of the left wall sentinel column.
pub const LEFT_WALL_COL: usize = 0;

/// Index of the right wall sentinel column.
pub const RIGHT_WALL_COL: usize = GRID_COLS - 1;

/// Side length of every piece matrix.
pub const PIECE_SIZE: usize = 3;

/// Spawn column of the piece's top-left corner.
pub const SPAWN_X: i8 = 4;

/// Spawn row of the piece's top-left corner (one row above the visible top).
pub const SPAWN_Y: i8 = -1;

/// Drop interval at game start.
pub const INITIAL_DROP_MS: u32 = 900;

/// Amount the drop interval shrinks on each speed-up.
pub const SPEEDUP_STEP_MS: u32 = 150;

/// A speed-up only applies while the interval is at least this long.
pub const SPEEDUP_MIN_INTERVAL_MS: u32 = 200;

/// Score growth (strictly greater than) that triggers a speed-up.
pub const SPEEDUP_SCORE_DELTA: u32 = 15;

/// Default sleep between loop iterations, in microseconds.
pub const DEFAULT_POLL_US: u64 = 500;

/// A grid cell: `EMPTY`, a [`BlockColor`] tag, or `BORDER`.
pub type Cell = u8;

/// An empty cell.
pub const EMPTY: Cell = 0;

/// The border sentinel tag. Never produced by a piece.
pub const BORDER: Cell = 8;

/// A piece's 3x3 cell matrix, row-major.
pub type Matrix = [[Cell; PIECE_SIZE]; PIECE_SIZE];

/// The fixed seven-color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockColor {
    Red = 1,
    Blue = 2,
    Green = 3,
    Yellow = 4,
    Orange = 5,
    White = 6,
    Gray = 7,
}

impl BlockColor {
    pub const ALL: [BlockColor; 7] = [
        BlockColor::Red,
        BlockColor::Blue,
        BlockColor::Green,
        BlockColor::Yellow,
        BlockColor::Orange,
        BlockColor::White,
        BlockColor::Gray,
    ];

    /// Cell tag stored in the grid.
    pub fn tag(self) -> Cell {
        self as Cell
    }

    /// Look up a palette color by cell tag.
    ///
    /// Returns `None` for `EMPTY`, `BORDER` and anything unknown.
    pub fn from_tag(tag: Cell) -> Option<Self> {
        match tag {
            1 => Some(BlockColor::Red),
            2 => Some(BlockColor::Blue),
            3 => Some(BlockColor::Green),
            4 => Some(BlockColor::Yellow),
            5 => Some(BlockColor::Orange),
            6 => Some(BlockColor::White),
            7 => Some(BlockColor::Gray),
            _ => None,
        }
    }
}

/// The seven piece shapes.
///
/// Each shape has one fixed color:
/// - **L**: Red
/// - **LMirrored**: Blue
/// - **T**: Green
/// - **Square**: Yellow, 2x2
/// - **S**: Orange
/// - **SMirrored**: White
/// - **Bar**: Gray, three cells wide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    L,
    LMirrored,
    T,
    Square,
    S,
    SMirrored,
    Bar,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::L,
        ShapeKind::LMirrored,
        ShapeKind::T,
        ShapeKind::Square,
        ShapeKind::S,
        ShapeKind::SMirrored,
        ShapeKind::Bar,
    ];

    pub fn color(self) -> BlockColor {
        match self {
            ShapeKind::L => BlockColor::Red,
            ShapeKind::LMirrored => BlockColor::Blue,
            ShapeKind::T => BlockColor::Green,
            ShapeKind::Square => BlockColor::Yellow,
            ShapeKind::S => BlockColor::Orange,
            ShapeKind::SMirrored => BlockColor::White,
            ShapeKind::Bar => BlockColor::Gray,
        }
    }
}

/// Directional input, also used to pick the collision policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Move one column left
    Left,
    /// Move one column right
    Right,
    /// Move one row down
    Down,
    /// Rotate 90° counter-clockwise
    RotateLeft,
    /// Rotate 90° clockwise
    RotateRight,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::RotateLeft,
        Direction::RotateRight,
    ];

    /// Non-zero wire code, so `0` can mean "nothing pending" in an atomic slot.
    pub fn code(self) -> u8 {
        match self {
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Down => 3,
            Direction::RotateLeft => 4,
            Direction::RotateRight => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Direction::Left),
            2 => Some(Direction::Right),
            3 => Some(Direction::Down),
            4 => Some(Direction::RotateLeft),
            5 => Some(Direction::RotateRight),
            _ => None,
        }
    }
}

/// Everything the presentation layer can ask of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move or rotate the active piece
    Move(Direction),
    /// Pause a running game, or resume a paused one
    TogglePause,
    /// Start a fresh game (from idle or after game over)
    Start,
    /// Stop the game loop and exit
    Quit,
}

/// Lifecycle of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "game_over",
        }
    }
}
