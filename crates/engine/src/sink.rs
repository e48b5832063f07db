//! Render sinks - where the game loop sends frames

use std::sync::mpsc::{Sender, SyncSender, TrySendError};

use crate::core::GameSnapshot;

/// Receives a snapshot every time the visible state changes.
///
/// `submit` must not block the game loop. It returns false once nobody is
/// listening any more.
pub trait RenderSink {
    fn submit(&mut self, snapshot: &GameSnapshot) -> bool;
}

impl RenderSink for Sender<GameSnapshot> {
    fn submit(&mut self, snapshot: &GameSnapshot) -> bool {
        self.send(*snapshot).is_ok()
    }
}

/// Bounded channel: a full buffer drops the frame instead of waiting.
impl RenderSink for SyncSender<GameSnapshot> {
    fn submit(&mut self, snapshot: &GameSnapshot) -> bool {
        match self.try_send(*snapshot) {
            Ok(()) | Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn submit(&mut self, _snapshot: &GameSnapshot) -> bool {
        true
    }
}
