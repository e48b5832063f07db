//! Game loop runtime
//!
//! Owns a [`falling_blocks_core::Game`] on a background thread and connects
//! it to the outside world:
//! - [`Controls`]: thread-safe input side (moves, pause, start, cancel)
//! - [`RenderSink`]: where snapshots go after each visible change
//! - [`LoopConfig`]: poll interval and seed, read from the environment
//!
//! # Example
//!
//! ```no_run
//! use std::sync::mpsc;
//!
//! use falling_blocks_engine::core::GameSnapshot;
//! use falling_blocks_engine::{spawn_with_randomizer, LoopConfig};
//! use falling_blocks_types::{Command, Direction};
//!
//! let (tx, rx) = mpsc::channel::<GameSnapshot>();
//! let handle = spawn_with_randomizer(LoopConfig::from_env(), tx)?;
//! handle.controls().dispatch(Command::Start);
//! handle.controls().dispatch(Command::Move(Direction::Left));
//! let _frame = rx.recv()?;
//! handle.cancel();
//! let summary = handle.join()?;
//! println!("final score {}", summary.score);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod controls;
pub mod runtime;
pub mod sink;
pub mod slot;

pub use falling_blocks_core as core;
pub use falling_blocks_types as types;

pub use config::LoopConfig;
pub use controls::Controls;
pub use runtime::{spawn, spawn_game, spawn_with_randomizer, GameSummary, RuntimeHandle};
pub use sink::{NullSink, RenderSink};
pub use slot::CommandSlot;
