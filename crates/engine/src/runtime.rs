//! Game loop thread
//!
//! One background thread owns the [`Game`] and is the only thing that
//! mutates it. Each iteration runs, in order:
//! 1. cancellation check
//! 2. start request
//! 3. pause sync
//! 4. pending input, redrawing after every consumed move
//! 5. drop timer, redrawing on a step
//! 6. sleep for one poll interval
//!
//! Everything else talks to the loop through [`Controls`] and hears back
//! through a [`RenderSink`].

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info, warn};

use crate::config::LoopConfig;
use crate::controls::Controls;
use crate::core::{Game, GameSnapshot, PieceSource, Randomizer, TickOutcome};
use crate::sink::RenderSink;
use crate::types::Phase;

/// Final counters reported when the loop exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameSummary {
    pub score: u32,
    pub lines_cleared: u32,
    pub pieces_spawned: u32,
    pub phase: Phase,
}

/// Owner of the running loop thread.
///
/// Dropping the handle requests cancellation but does not wait.
#[derive(Debug)]
pub struct RuntimeHandle {
    controls: Controls,
    thread: Option<JoinHandle<GameSummary>>,
}

impl RuntimeHandle {
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn cancel(&self) {
        self.controls.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Wait for the loop to exit
    pub fn join(mut self) -> Result<GameSummary> {
        let thread = self
            .thread
            .take()
            .ok_or_else(|| anyhow!("game loop already joined"))?;
        thread
            .join()
            .map_err(|_| anyhow!("game loop thread panicked"))
    }
}

impl Drop for RuntimeHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.controls.cancel();
        }
    }
}

/// Spawn the game loop with an explicit piece source
pub fn spawn<S, K>(config: LoopConfig, source: S, sink: K) -> Result<RuntimeHandle>
where
    S: PieceSource + Send + 'static,
    K: RenderSink + Send + 'static,
{
    spawn_game(config, Game::with_source(source), sink)
}

/// Spawn the game loop around an existing game, in whatever phase it is in
pub fn spawn_game<S, K>(config: LoopConfig, game: Game<S>, sink: K) -> Result<RuntimeHandle>
where
    S: PieceSource + Send + 'static,
    K: RenderSink + Send + 'static,
{
    let controls = Controls::new();
    if game.paused() {
        controls.toggle_pause();
    }
    let loop_controls = controls.clone();
    let poll_interval = config.poll_interval;
    let phase = game.phase();

    let thread = thread::Builder::new()
        .name("game-loop".to_string())
        .spawn(move || GameLoop::new(game, loop_controls, sink, poll_interval).run())
        .context("failed to spawn game loop thread")?;

    info!(
        poll_us = poll_interval.as_micros() as u64,
        phase = phase.as_str(),
        "game loop started"
    );
    Ok(RuntimeHandle {
        controls,
        thread: Some(thread),
    })
}

/// Spawn the game loop with a randomizer seeded from `config`
pub fn spawn_with_randomizer<K>(config: LoopConfig, sink: K) -> Result<RuntimeHandle>
where
    K: RenderSink + Send + 'static,
{
    let source = match config.seed {
        Some(seed) => {
            info!(seed, "using fixed seed");
            Randomizer::with_seed(seed)
        }
        None => Randomizer::new(),
    };
    spawn(config, source, sink)
}

/// Converts wall time into whole milliseconds of running time.
///
/// Sub-millisecond remainders carry into the next reading; time that passes
/// while the game is not running is dropped.
#[derive(Debug)]
struct DropClock {
    last: Instant,
    carry_us: u128,
}

impl DropClock {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            carry_us: 0,
        }
    }

    fn reset(&mut self) {
        self.last = Instant::now();
        self.carry_us = 0;
    }

    fn elapsed_ms(&mut self, running: bool) -> u32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last);
        self.last = now;
        if !running {
            self.carry_us = 0;
            return 0;
        }
        let total_us = self.carry_us + delta.as_micros();
        self.carry_us = total_us % 1000;
        u32::try_from(total_us / 1000).unwrap_or(u32::MAX)
    }
}

struct GameLoop<S, K> {
    game: Game<S>,
    controls: Controls,
    sink: K,
    poll_interval: Duration,
    clock: DropClock,
    frame: GameSnapshot,
    sink_open: bool,
}

impl<S: PieceSource, K: RenderSink> GameLoop<S, K> {
    fn new(game: Game<S>, controls: Controls, sink: K, poll_interval: Duration) -> Self {
        Self {
            game,
            controls,
            sink,
            poll_interval,
            clock: DropClock::new(),
            frame: GameSnapshot::default(),
            sink_open: true,
        }
    }

    fn run(mut self) -> GameSummary {
        self.publish();

        loop {
            if self.controls.is_cancelled() {
                info!(score = self.game.score(), "game loop cancelled");
                break;
            }

            if self.controls.take_start() {
                self.handle_start();
            }

            self.sync_pause();

            if let Some(direction) = self.controls.take_move() {
                let moved = self.game.apply_input(direction);
                debug!(?direction, moved, "input applied");
                self.publish();
            }

            let elapsed = self.clock.elapsed_ms(self.game.phase() == Phase::Running);
            let outcome = self.game.tick(elapsed);
            self.log_outcome(outcome);
            if outcome.redraw() {
                self.publish();
            }

            thread::sleep(self.poll_interval);
        }

        GameSummary {
            score: self.game.score(),
            lines_cleared: self.game.lines_cleared(),
            pieces_spawned: self.game.pieces_spawned(),
            phase: self.game.phase(),
        }
    }

    fn handle_start(&mut self) {
        if !self.game.start() {
            debug!(phase = self.game.phase().as_str(), "start ignored");
            return;
        }
        info!("game started");
        self.controls.settle_pause(self.controls.pause_requested(), false);
        self.clock.reset();
        self.publish();
    }

    fn sync_pause(&mut self) {
        let requested = self.controls.pause_requested();
        if requested == self.game.paused() {
            return;
        }
        if self.game.set_paused(requested) {
            info!(paused = requested, "pause toggled");
            self.clock.reset();
            self.publish();
        }
        self.controls.settle_pause(requested, self.game.paused());
    }

    fn log_outcome(&self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Locked(event) => {
                debug!(rows = event.rows, points = event.points, "piece locked");
                if event.rows > 0 {
                    info!(rows = event.rows, score = self.game.score(), "rows cleared");
                }
                if event.sped_up {
                    info!(
                        interval_ms = self.game.drop_interval_ms(),
                        "drop speed increased"
                    );
                }
            }
            TickOutcome::GameOver(_) => {
                info!(
                    score = self.game.score(),
                    lines = self.game.lines_cleared(),
                    pieces = self.game.pieces_spawned(),
                    "game over"
                );
            }
            _ => {}
        }
    }

    fn publish(&mut self) {
        self.game.snapshot_into(&mut self.frame);
        let open = self.sink.submit(&self.frame);
        if self.sink_open && !open {
            warn!("render sink disconnected");
        }
        self.sink_open = open;
    }
}
