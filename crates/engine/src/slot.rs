//! Single-slot input buffer
//!
//! The input surface writes the most recent direction, the game loop takes
//! it. A newer write replaces an unconsumed older one, so input never queues
//! up behind a slow loop.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::types::Direction;

const EMPTY_SLOT: u8 = 0;

/// Last requested direction, or nothing.
#[derive(Debug, Default)]
pub struct CommandSlot {
    code: AtomicU8,
}

impl CommandSlot {
    pub fn new() -> Self {
        Self {
            code: AtomicU8::new(EMPTY_SLOT),
        }
    }

    /// Store `direction`, overwriting whatever was pending.
    pub fn store(&self, direction: Direction) {
        self.code.store(direction.code(), Ordering::Release);
    }

    /// Take the pending direction and leave the slot empty.
    pub fn take(&self) -> Option<Direction> {
        Direction::from_code(self.code.swap(EMPTY_SLOT, Ordering::AcqRel))
    }

    pub fn is_empty(&self) -> bool {
        self.code.load(Ordering::Acquire) == EMPTY_SLOT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_empties_slot() {
        let slot = CommandSlot::new();
        assert!(slot.is_empty());
        slot.store(Direction::Left);
        assert!(!slot.is_empty());
        assert_eq!(slot.take(), Some(Direction::Left));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_newer_input_overwrites_older() {
        let slot = CommandSlot::new();
        slot.store(Direction::Left);
        slot.store(Direction::RotateRight);
        assert_eq!(slot.take(), Some(Direction::RotateRight));
        assert!(slot.is_empty());
    }

    #[test]
    fn test_every_direction_survives_the_slot() {
        let slot = CommandSlot::new();
        for dir in Direction::ALL {
            slot.store(dir);
            assert_eq!(slot.take(), Some(dir));
        }
    }
}
