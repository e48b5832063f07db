//! Terminal falling-blocks runner (default binary).
//!
//! The game loop runs on its own thread. This thread polls crossterm for
//! keys, forwards them as commands, and draws whatever snapshot arrived last.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{debug, info, warn};

use falling_blocks::core::GameSnapshot;
use falling_blocks::engine::{spawn_with_randomizer, LoopConfig, RuntimeHandle};
use falling_blocks::input::map_key;
use falling_blocks::logging::{self, LogConfig};
use falling_blocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

const EVENT_POLL: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    let log_config = LogConfig::from_env();
    if logging::init(&log_config)? {
        info!(level = %log_config.level, "logging enabled");
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, LoopConfig::from_env());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: LoopConfig) -> Result<()> {
    let (tx, rx) = mpsc::channel::<GameSnapshot>();
    let runtime = spawn_with_randomizer(config, tx)?;

    let outcome = present(term, &runtime, &rx);

    runtime.cancel();
    let summary = runtime.join()?;
    info!(
        score = summary.score,
        lines = summary.lines_cleared,
        pieces = summary.pieces_spawned,
        "session ended"
    );
    outcome
}

fn present(
    term: &mut TerminalRenderer,
    runtime: &RuntimeHandle,
    rx: &Receiver<GameSnapshot>,
) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    let mut latest = GameSnapshot::default();
    let mut dirty = true;

    loop {
        if event::poll(EVENT_POLL).context("failed to poll terminal events")? {
            match event::read().context("failed to read terminal event")? {
                Event::Key(key) => {
                    if let Some(command) = map_key(key) {
                        debug!(?command, "input");
                        if !runtime.controls().dispatch(command) {
                            info!("quit requested");
                            return Ok(());
                        }
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        loop {
            match rx.try_recv() {
                Ok(snapshot) => {
                    latest = snapshot;
                    dirty = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("game loop stopped unexpectedly");
                    return Ok(());
                }
            }
        }

        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let viewport = Viewport::new(w, h);
            GameView::fit(viewport).render_into(&latest, viewport, &mut fb);
            term.draw(&fb)?;
            dirty = false;
        }
    }
}
