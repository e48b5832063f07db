//! Shared control surface between the input side and the game loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::slot::CommandSlot;
use crate::types::{Command, Direction};

#[derive(Debug, Default)]
struct Shared {
    slot: CommandSlot,
    paused: AtomicBool,
    start: AtomicBool,
    cancel: AtomicBool,
}

/// Cloneable handle; every clone talks to the same loop.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    shared: Arc<Shared>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route an input-surface command.
    ///
    /// Returns false for `Quit`, after requesting cancellation.
    pub fn dispatch(&self, command: Command) -> bool {
        match command {
            Command::Move(direction) => self.push_move(direction),
            Command::TogglePause => self.toggle_pause(),
            Command::Start => self.request_start(),
            Command::Quit => {
                self.cancel();
                return false;
            }
        }
        true
    }

    pub fn push_move(&self, direction: Direction) {
        self.shared.slot.store(direction);
    }

    pub fn take_move(&self) -> Option<Direction> {
        self.shared.slot.take()
    }

    /// Flip the requested pause state.
    pub fn toggle_pause(&self) {
        self.shared.paused.fetch_xor(true, Ordering::AcqRel);
    }

    pub fn pause_requested(&self) -> bool {
        self.shared.paused.load(Ordering::Acquire)
    }

    /// Bring the requested pause state back in line with the game.
    ///
    /// Only overwrites the flag if it still holds `requested`, so a toggle
    /// that raced in after the loop read it is kept.
    pub fn settle_pause(&self, requested: bool, actual: bool) {
        if requested != actual {
            let _ = self.shared.paused.compare_exchange(
                requested,
                actual,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
        }
    }

    pub fn request_start(&self) {
        self.shared.start.store(true, Ordering::Release);
    }

    pub fn take_start(&self) -> bool {
        self.shared.start.swap(false, Ordering::AcqRel)
    }

    pub fn cancel(&self) {
        self.shared.cancel.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.cancel.load(Ordering::Acquire)
    }
}
