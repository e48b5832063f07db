//! Falling Blocks (workspace facade crate).
//!
//! Re-exports the member crates under one name so the binary, integration
//! tests and benches can use `falling_blocks::{core,engine,input,term,types}`.

pub mod logging;

pub use falling_blocks_core as core;
pub use falling_blocks_engine as engine;
pub use falling_blocks_input as input;
pub use falling_blocks_term as term;
pub use falling_blocks_types as types;
