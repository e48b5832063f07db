//! Game module - the single mutable engine context
//!
//! [`Game`] owns the grid, the current and next pieces, the score and the
//! drop timer. It is driven from outside: [`Game::apply_input`] for player
//! moves and [`Game::tick`] with the elapsed wall time. Nothing here sleeps,
//! spawns threads or reads a clock.
//!
//! A drop step has three outcomes:
//! - the piece moves down one row
//! - the piece cannot move down, so it locks, rows are cleared and scored
//! - the piece locked on the previous step, so the next piece is promoted
//!
//! The lock and the promotion happen on separate steps, one drop interval
//! apart.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::randomizer::{PieceSource, Randomizer};
use crate::scoring::{line_clear_points, SpeedSchedule};
use crate::snapshot::GameSnapshot;
use crate::types::{Cell, Direction, Matrix, Phase, EMPTY, PIECE_SIZE, SPAWN_X, SPAWN_Y};

/// What a lock-in produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockEvent {
    pub rows: u32,
    pub points: u32,
    pub sped_up: bool,
}

/// Result of one [`Game::tick`] or [`Game::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickOutcome {
    /// Not running (idle, paused or over); nothing happened.
    Inactive,
    /// Timer accrued but no drop step was due.
    Waiting,
    /// The piece moved down one row.
    Descended,
    /// The piece locked into the grid.
    Locked(LockEvent),
    /// The next piece entered at the spawn position.
    Spawned,
    /// The piece locked at the top; the game is over.
    GameOver(LockEvent),
}

impl TickOutcome {
    /// Whether the visible state may have changed.
    pub fn redraw(&self) -> bool {
        !matches!(self, TickOutcome::Inactive | TickOutcome::Waiting)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game<S = Randomizer> {
    grid: Grid,
    source: S,
    current: Option<Piece>,
    next: Option<Piece>,
    x: i8,
    y: i8,
    score: u32,
    speed: SpeedSchedule,
    phase: Phase,
    drop_timer_ms: u32,
    last_event: Option<LockEvent>,
    lines_cleared: u32,
    pieces_spawned: u32,
}

impl Game<Randomizer> {
    /// Create an idle game with a seeded randomizer
    pub fn new(seed: u64) -> Self {
        Self::with_source(Randomizer::with_seed(seed))
    }

    /// Create an idle game seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_source(Randomizer::new())
    }
}

impl Default for Game<Randomizer> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<S: PieceSource> Game<S> {
    /// Create an idle game drawing shapes from `source`
    pub fn with_source(source: S) -> Self {
        Self {
            grid: Grid::new(),
            source,
            current: None,
            next: None,
            x: SPAWN_X,
            y: SPAWN_Y,
            score: 0,
            speed: SpeedSchedule::new(),
            phase: Phase::Idle,
            drop_timer_ms: 0,
            last_event: None,
            lines_cleared: 0,
            pieces_spawned: 0,
        }
    }

    /// Start a fresh game from `Idle` or `GameOver`
    ///
    /// Returns false (and changes nothing) while a game is running or paused.
    pub fn start(&mut self) -> bool {
        if matches!(self.phase, Phase::Running | Phase::Paused) {
            return false;
        }

        self.grid.reset_to_empty();
        self.score = 0;
        self.speed = SpeedSchedule::new();
        self.drop_timer_ms = 0;
        self.last_event = None;
        self.lines_cleared = 0;
        self.pieces_spawned = 0;

        self.current = Some(Piece::new(self.source.next_kind()));
        self.next = Some(Piece::new(self.source.next_kind()));
        self.pieces_spawned = 1;
        self.x = SPAWN_X;
        self.y = SPAWN_Y;
        self.phase = Phase::Running;
        self.refresh_overlay();
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.speed.interval_ms()
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn position(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// True while the current piece can still be moved by input or gravity.
    pub fn piece_movable(&self) -> bool {
        self.current.is_some_and(|p| p.can_move())
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Write one settled cell for setting up a position.
    ///
    /// The current piece is redrawn on top afterwards. Returns false for
    /// border cells and anything outside the playable area.
    pub fn set_settled(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        if !self.grid.set_settled(row, col, cell) {
            return false;
        }
        self.refresh_overlay();
        true
    }

    /// Pause or resume; only `Running` and `Paused` swap.
    ///
    /// Returns true if the phase changed.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        match (self.phase, paused) {
            (Phase::Running, true) => {
                self.phase = Phase::Paused;
                true
            }
            (Phase::Paused, false) => {
                self.phase = Phase::Running;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.phase == Phase::Running;
        self.set_paused(paused)
    }

    /// Move or rotate the current piece if the result is legal
    ///
    /// The prospective matrix and position are checked first and committed
    /// only when they do not collide. Ignored unless running with a movable
    /// piece, and `RotateLeft` is ignored while the piece's top row is above
    /// the grid. Returns true if the piece changed.
    pub fn apply_input(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(piece) = self.current.filter(|p| p.can_move()) else {
            return false;
        };
        // Counter-clockwise rotation waits until the piece is fully inside the grid.
        if direction == Direction::RotateLeft && self.y < 0 {
            return false;
        }

        let (cells, x, y) = match direction {
            Direction::Left => (*piece.cells(), self.x - 1, self.y),
            Direction::Right => (*piece.cells(), self.x + 1, self.y),
            Direction::Down => (*piece.cells(), self.x, self.y + 1),
            Direction::RotateLeft => (piece.rotated_counterclockwise(), self.x, self.y),
            Direction::RotateRight => (piece.rotated_clockwise(), self.x, self.y),
        };

        if self.grid.collides(&cells, direction, x, y) {
            return false;
        }

        if let Some(current) = self.current.as_mut() {
            current.commit_cells(cells);
        }
        self.x = x;
        self.y = y;
        self.refresh_overlay();
        true
    }

    /// Advance the drop timer by `elapsed_ms`
    ///
    /// Time only accrues while running. When the timer reaches the current
    /// interval it resets and one drop step runs.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Inactive;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.speed.interval_ms() {
            return TickOutcome::Waiting;
        }
        self.drop_timer_ms = 0;
        self.step()
    }

    /// Run one drop step immediately, ignoring the timer
    pub fn step(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Inactive;
        }
        let Some(piece) = self.current else {
            return TickOutcome::Inactive;
        };

        if !piece.can_move() {
            self.promote_next();
            return TickOutcome::Spawned;
        }

        let ny = self.y + 1;
        if !self.grid.collides(piece.cells(), Direction::Down, self.x, ny) {
            self.y = ny;
            self.refresh_overlay();
            return TickOutcome::Descended;
        }

        let event = self.lock_current();
        if ny <= 0 {
            self.phase = Phase::GameOver;
            return TickOutcome::GameOver(event);
        }
        TickOutcome::Locked(event)
    }

    /// Take and clear the last lock-in event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid = *self.grid.overlay();
        out.next = self
            .next
            .map(|p| *p.cells())
            .unwrap_or([[EMPTY; PIECE_SIZE]; PIECE_SIZE]);
        out.score = self.score;
        out.drop_interval_ms = self.speed.interval_ms();
        out.phase = self.phase;
        out.position = (self.x, self.y);
        out.piece_movable = self.piece_movable();
        out.lines_cleared = self.lines_cleared;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn lock_current(&mut self) -> LockEvent {
        self.grid.lock_piece_into_settled();
        if let Some(current) = self.current.as_mut() {
            current.set_can_move(false);
        }

        let rows = self.grid.clear_completed_rows() as u32;
        let points = line_clear_points(rows);
        self.score = self.score.saturating_add(points);
        self.lines_cleared = self.lines_cleared.saturating_add(rows);
        let sped_up = points > 0 && self.speed.on_score(self.score);

        let event = LockEvent {
            rows,
            points,
            sped_up,
        };
        self.last_event = Some(event);
        event
    }

    fn promote_next(&mut self) {
        let incoming = Piece::new(self.source.next_kind());
        self.current = self.next.replace(incoming);
        if self.current.is_none() {
            self.current = Some(Piece::new(self.source.next_kind()));
        }
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.x = SPAWN_X;
        self.y = SPAWN_Y;
        self.refresh_overlay();
    }

    fn refresh_overlay(&mut self) {
        match self.current {
            Some(piece) if piece.can_move() => {
                let cells: Matrix = *piece.cells();
                self.grid.place_overlay(&cells, self.x, self.y);
            }
            _ => self.grid.clear_overlay(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomizer::ScriptedSource;
    use crate::types::ShapeKind;

    fn bar_game() -> Game<ScriptedSource> {
        Game::with_source(ScriptedSource::repeat(ShapeKind::Bar))
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = Game::new(1);
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.current().is_none());
        assert_eq!(game.score(), 0);
        assert_eq!(game.drop_interval_ms(), 900);
    }

    #[test]
    fn test_start_places_overlay_at_spawn() {
        let mut game = bar_game();
        assert!(game.start());
        assert_eq!(game.position(), (4, -1));
        // The bar's middle row lands on grid row 0.
        assert_eq!(&game.grid().overlay()[0][4..7], &[7, 7, 7]);
        assert_eq!(game.pieces_spawned(), 1);
        assert!(!game.start());
    }

    #[test]
    fn test_input_ignored_before_start() {
        let mut game = bar_game();
        assert!(!game.apply_input(Direction::Left));
        assert_eq!(game.tick(5000), TickOutcome::Inactive);
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut game = bar_game();
        game.start();
        assert_eq!(game.tick(899), TickOutcome::Waiting);
        assert_eq!(game.tick(1), TickOutcome::Descended);
        assert_eq!(game.drop_timer_ms(), 0);
        assert_eq!(game.position(), (4, 0));
    }

    #[test]
    fn test_pause_freezes_timer_and_input() {
        let mut game = bar_game();
        game.start();
        game.tick(500);
        assert!(game.toggle_pause());
        assert!(game.paused());
        assert_eq!(game.tick(10_000), TickOutcome::Inactive);
        assert!(!game.apply_input(Direction::Left));
        assert_eq!(game.drop_timer_ms(), 500);
        assert!(game.toggle_pause());
        assert_eq!(game.tick(400), TickOutcome::Descended);
    }

    #[test]
    fn test_set_paused_only_from_running() {
        let mut game = bar_game();
        assert!(!game.set_paused(true));
        game.start();
        assert!(!game.set_paused(false));
        assert!(game.set_paused(true));
        assert!(!game.set_paused(true));
    }

    #[test]
    fn test_lock_then_promote_on_next_step() {
        let mut game = bar_game();
        game.start();
        while game.step() == TickOutcome::Descended {}
        assert!(!game.piece_movable());
        assert_eq!(game.position(), (4, 19));
        assert_eq!(&game.grid().settled()[20][4..7], &[7, 7, 7]);

        assert_eq!(game.step(), TickOutcome::Spawned);
        assert!(game.piece_movable());
        assert_eq!(game.position(), (4, -1));
        assert_eq!(game.pieces_spawned(), 2);
    }

    #[test]
    fn test_game_over_when_spawn_is_blocked() {
        let mut game = bar_game();
        game.start();
        for col in 4..=6 {
            game.set_settled(1, col, 3);
        }
        let outcome = game.step();
        assert!(matches!(outcome, TickOutcome::GameOver(_)));
        assert!(game.game_over());
        assert!(!game.apply_input(Direction::Left));
        assert_eq!(game.tick(10_000), TickOutcome::Inactive);
    }

    #[test]
    fn test_restart_after_game_over_resets_state() {
        let mut game = bar_game();
        game.start();
        for col in 4..=6 {
            game.set_settled(1, col, 3);
        }
        game.step();
        assert!(game.game_over());

        assert!(game.start());
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.grid().settled()[1][4], EMPTY);
        assert!(game.take_last_event().is_none());
    }

    #[test]
    fn test_rotate_left_waits_for_spawn_row_to_clear() {
        let mut game = Game::with_source(ScriptedSource::repeat(ShapeKind::T));
        game.start();
        let spawned = *game.current().map(|p| p.cells()).unwrap();
        assert!(!game.apply_input(Direction::RotateLeft));
        assert_eq!(game.current().map(|p| *p.cells()), Some(spawned));

        assert!(game.apply_input(Direction::RotateRight));
        assert!(game.apply_input(Direction::Down));
        assert_eq!(game.position(), (4, 0));
        assert!(game.apply_input(Direction::RotateLeft));
        assert_eq!(game.current().map(|p| *p.cells()), Some(spawned));
    }

    #[test]
    fn test_set_settled_keeps_piece_on_top() {
        let mut game = bar_game();
        game.start();
        assert!(game.set_settled(5, 2, 3));
        assert!(game.set_settled(0, 5, 4));
        assert!(!game.set_settled(21, 5, 4));
        assert!(!game.set_settled(3, 0, 4));

        let overlay = game.grid().overlay();
        assert_eq!(overlay[5][2], 3);
        assert_eq!(&overlay[0][4..7], &[7, 7, 7]);
        assert_eq!(game.grid().settled()[0][5], 4);
    }

    #[test]
    fn test_take_last_event_consumes() {
        let mut game = bar_game();
        game.start();
        while game.step() == TickOutcome::Descended {}
        let event = game.take_last_event();
        assert_eq!(
            event,
            Some(LockEvent {
                rows: 0,
                points: 0,
                sped_up: false
            })
        );
        assert!(game.take_last_event().is_none());
    }

    #[test]
    fn test_outcome_redraw() {
        assert!(!TickOutcome::Waiting.redraw());
        assert!(!TickOutcome::Inactive.redraw());
        assert!(TickOutcome::Spawned.redraw());
    }
}
