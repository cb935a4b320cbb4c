//! Agent-facing stepping environments on top of the simulation core
//!
//! This crate holds no game rules. It translates agent actions into core operations and
//! packages the results as observations, rewards, and episode flags.
//!
//! - [`TetrisEnv`]: one of six [`AtomicAction`](crate::types::AtomicAction)s per step
//! - [`GroupedEnv`]: one final placement per step, addressed by index into the
//!   enumerator's deterministic ordering, with per-slot features and resulting boards,
//!   a fixed-length validity mask, and the valid indices in its info
//! - [`EnvConfig`]: board size, randomizer, seed, spawn policy, step limit, and
//!   grouped feature set and scaling, optionally loaded from `RL_TETRIS_*` environment variables
//!
//! # Example
//!
//! ```
//! use rl_tetris_engine::{EnvConfig, GroupedEnv};
//!
//! let mut env = GroupedEnv::new(EnvConfig::default().with_seed(7)).unwrap();
//! let (obs, info) = env.reset();
//! assert_eq!(info.score, 0);
//!
//! let first_valid = obs.action_mask.iter().position(|&v| v).unwrap();
//! let step = env.step(first_valid).unwrap();
//! assert!(!step.terminated);
//! ```

pub mod config;
pub mod env;
pub mod observation;
pub mod place;

pub use rl_tetris_core as core;
pub use rl_tetris_types as types;

pub use config::{EnvConfig, FeatureSet};
pub use env::{GroupedEnv, TetrisEnv};
pub use observation::{
    GroupedInfo, GroupedLayout, GroupedObservation, Observation, Step, StepInfo,
};
pub use place::{apply_place, PlaceError};
