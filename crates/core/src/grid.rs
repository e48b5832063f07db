//! Grid module - the bordered playfield
//!
//! The grid is 22 rows x 12 columns. Row 21 and columns 0/11 hold the
//! `BORDER` sentinel so pieces can hang empty padding past the playable
//! area; everything else starts empty.
//!
//! Two boards are kept:
//! - `settled`: the authoritative record of locked cells and borders
//! - `overlay`: `settled` with the current placement drawn on top
//!
//! The overlay is always rebuilt from `settled` plus the stored placement,
//! never edited cell by cell. Collisions are checked against `settled` only,
//! since the overlay contains the piece itself.
//!
//! Coordinates passed around as `(x, y)` are the column and row of the
//! piece matrix's top-left corner; `y` may be negative while spawning.

use arrayvec::ArrayVec;

use crate::piece::{is_bottom_row_empty, is_edge_column_empty, Side};
use crate::types::{
    Cell, Direction, Matrix, BORDER, EMPTY, FLOOR_ROW, GRID_COLS, GRID_ROWS, LEFT_WALL_COL,
    PIECE_SIZE, RIGHT_WALL_COL,
};

/// Full grid storage, row-major.
pub type Board = [[Cell; GRID_COLS]; GRID_ROWS];

/// Completed-row indices found by a scan, top to bottom.
pub type CompletedRows = ArrayVec<usize, FLOOR_ROW>;

/// A bordered grid with no settled blocks.
pub const fn bordered_empty() -> Board {
    let mut board = [[EMPTY; GRID_COLS]; GRID_ROWS];
    let mut row = 0;
    while row < GRID_ROWS {
        board[row][LEFT_WALL_COL] = BORDER;
        board[row][RIGHT_WALL_COL] = BORDER;
        row += 1;
    }
    let mut col = 0;
    while col < GRID_COLS {
        board[FLOOR_ROW][col] = BORDER;
        col += 1;
    }
    board
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    cells: Matrix,
    x: i8,
    y: i8,
}

/// The playfield: settled cells plus the overlay view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    settled: Board,
    overlay: Board,
    placement: Option<Placement>,
}

impl Grid {
    /// Create an empty bordered grid
    pub fn new() -> Self {
        Self {
            settled: bordered_empty(),
            overlay: bordered_empty(),
            placement: None,
        }
    }

    /// Reset both boards to the bordered-empty state
    pub fn reset_to_empty(&mut self) {
        self.settled = bordered_empty();
        self.overlay = bordered_empty();
        self.placement = None;
    }

    pub fn settled(&self) -> &Board {
        &self.settled
    }

    pub fn overlay(&self) -> &Board {
        &self.overlay
    }

    /// Settled cell at (row, col), `None` outside the grid.
    pub fn settled_at(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 || row >= GRID_ROWS as i32 || col >= GRID_COLS as i32 {
            return None;
        }
        Some(self.settled[row as usize][col as usize])
    }

    /// Whether a piece cell at (row, col) would hit something.
    ///
    /// Above the top edge only the wall columns are solid; below the floor
    /// and outside the side columns everything is solid.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        if row < 0 {
            return col <= LEFT_WALL_COL as i32 || col >= RIGHT_WALL_COL as i32;
        }
        match self.settled_at(row, col) {
            Some(cell) => cell != EMPTY,
            None => true,
        }
    }

    /// Write one interior settled cell and refresh the overlay.
    ///
    /// Returns false for border or out-of-range coordinates.
    pub fn set_settled(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        if row >= FLOOR_ROW || col <= LEFT_WALL_COL || col >= RIGHT_WALL_COL {
            return false;
        }
        self.settled[row][col] = cell;
        self.refresh_overlay();
        true
    }

    /// Recompute the overlay with `cells` positioned at (x, y)
    ///
    /// Empty piece cells are transparent; cells outside the grid (for example
    /// above the top while spawning) are skipped.
    pub fn place_overlay(&mut self, cells: &Matrix, x: i8, y: i8) {
        self.placement = Some(Placement {
            cells: *cells,
            x,
            y,
        });
        self.refresh_overlay();
    }

    /// Drop the current placement so the overlay equals `settled`.
    pub fn clear_overlay(&mut self) {
        self.placement = None;
        self.refresh_overlay();
    }

    fn refresh_overlay(&mut self) {
        self.overlay = self.settled;
        let Some(p) = self.placement else {
            return;
        };
        for (r, row) in p.cells.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                if cell == EMPTY {
                    continue;
                }
                let gy = p.y as i32 + r as i32;
                let gx = p.x as i32 + c as i32;
                if gy < 0 || gx < 0 || gy >= GRID_ROWS as i32 || gx >= GRID_COLS as i32 {
                    continue;
                }
                self.overlay[gy as usize][gx as usize] = cell;
            }
        }
    }

    /// Check whether `cells` at the prospective position (x, y) is illegal
    ///
    /// Each direction adds its own edge rule before the common overlap test:
    /// - `Down`: the lowest occupied matrix row would reach the floor row.
    ///   A piece whose bottom row is padding gets one extra row of travel.
    /// - `Left` / `Right`: the leading edge is past the wall and that edge
    ///   column of the matrix holds a block (padding may overhang).
    /// - rotations: the piece's left edge is at or inside column 0; `cells`
    ///   must already be the rotated matrix.
    pub fn collides(&self, cells: &Matrix, direction: Direction, x: i8, y: i8) -> bool {
        let x = x as i32;
        let y = y as i32;
        let edge_blocked = match direction {
            Direction::Down => {
                let lowest = if is_bottom_row_empty(cells) {
                    PIECE_SIZE as i32 - 2
                } else {
                    PIECE_SIZE as i32 - 1
                };
                y + lowest >= FLOOR_ROW as i32
            }
            Direction::Right => {
                x + PIECE_SIZE as i32 > RIGHT_WALL_COL as i32
                    && !is_edge_column_empty(cells, Side::Right)
            }
            Direction::Left => {
                x <= LEFT_WALL_COL as i32 && !is_edge_column_empty(cells, Side::Left)
            }
            Direction::RotateLeft | Direction::RotateRight => x <= LEFT_WALL_COL as i32,
        };
        edge_blocked || self.overlaps_settled(cells, x, y)
    }

    fn overlaps_settled(&self, cells: &Matrix, x: i32, y: i32) -> bool {
        cells.iter().enumerate().any(|(r, row)| {
            row.iter()
                .enumerate()
                .any(|(c, &cell)| cell != EMPTY && self.is_occupied(y + r as i32, x + c as i32))
        })
    }

    /// Merge the overlay into `settled`; afterwards there is no placement
    pub fn lock_piece_into_settled(&mut self) {
        self.settled = self.overlay;
        self.placement = None;
        self.refresh_overlay();
    }

    /// Check if an interior row has no empty cell
    pub fn is_row_complete(&self, row: usize) -> bool {
        if row >= FLOOR_ROW {
            return false;
        }
        self.settled[row][LEFT_WALL_COL + 1..RIGHT_WALL_COL]
            .iter()
            .all(|&cell| cell != EMPTY)
    }

    /// Indices of all completed rows, top to bottom
    pub fn completed_rows(&self) -> CompletedRows {
        (0..FLOOR_ROW).filter(|&row| self.is_row_complete(row)).collect()
    }

    /// Remove completed rows and let everything above fall
    ///
    /// Non-completed rows are copied bottom-aligned into a fresh bordered
    /// board, which then replaces `settled`. Returns the number of rows
    /// removed (0 leaves the grid untouched).
    pub fn clear_completed_rows(&mut self) -> usize {
        let completed = self.completed_rows();
        if completed.is_empty() {
            return 0;
        }

        let mut compacted = bordered_empty();
        let mut write_row = FLOOR_ROW;
        for read_row in (0..FLOOR_ROW).rev() {
            if completed.contains(&read_row) {
                continue;
            }
            write_row -= 1;
            compacted[write_row][LEFT_WALL_COL + 1..RIGHT_WALL_COL]
                .copy_from_slice(&self.settled[read_row][LEFT_WALL_COL + 1..RIGHT_WALL_COL]);
        }

        self.settled = compacted;
        self.refresh_overlay();
        completed.len()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
