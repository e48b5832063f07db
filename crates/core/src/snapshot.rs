use crate::grid::{bordered_empty, Board};
use crate::types::{
    Matrix, Phase, EMPTY, GRID_COLS, GRID_ROWS, INITIAL_DROP_MS, PIECE_SIZE, SPAWN_X, SPAWN_Y,
};

/// Immutable copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Overlay grid: settled cells with the active piece drawn on top.
    pub grid: Board,
    pub next: Matrix,
    pub score: u32,
    pub drop_interval_ms: u32,
    pub phase: Phase,
    pub position: (i8, i8),
    pub piece_movable: bool,
    pub lines_cleared: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid = bordered_empty();
        self.next = [[EMPTY; PIECE_SIZE]; PIECE_SIZE];
        self.score = 0;
        self.drop_interval_ms = INITIAL_DROP_MS;
        self.phase = Phase::Idle;
        self.position = (SPAWN_X, SPAWN_Y);
        self.piece_movable = false;
        self.lines_cleared = 0;
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: [[EMPTY; GRID_COLS]; GRID_ROWS],
            next: [[EMPTY; PIECE_SIZE]; PIECE_SIZE],
            score: 0,
            drop_interval_ms: 0,
            phase: Phase::Idle,
            position: (0, 0),
            piece_movable: false,
            lines_cleared: 0,
        };
        s.clear();
        s
    }
}
