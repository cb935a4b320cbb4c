//! RL Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `rl_tetris::{core, engine, types}` so callers depend
//! on a single package while the implementation lives in dedicated crates under `crates/`.

pub use rl_tetris_core as core;
pub use rl_tetris_engine as engine;
pub use rl_tetris_types as types;
