//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the simulation rules, state management, and the placement search.
//! It has **no dependencies** on rendering, agent frameworks, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games (for training and evaluation)
//! - **Side-effect free to explore**: placements are simulated on cloned boards
//! - **Testable**: every rule is reachable through plain function calls
//!
//! # Module Structure
//!
//! - [`board`]: runtime-sized grid with collision detection, line clearing, and features
//! - [`game_state`]: turn state machine, scoring, and spawning
//! - [`pieces`]: tetromino rotation tables and the [`Piece`] pose type
//! - [`placement`]: exhaustive final-placement enumeration
//! - [`rng`]: bag and uniform randomizers feeding a fixed-lookahead queue
//! - [`scoring`]: line-clear points and per-lock reward
//! - [`features`]: the `[lines, holes, bumpiness, height]` outcome vector and its
//!   extended variant
//!
//! # Example
//!
//! ```
//! use rl_tetris_core::{GameConfig, GameState};
//!
//! let mut game = GameState::new(GameConfig::default()).unwrap();
//!
//! // Inspect every final placement of the active piece
//! let placements = game.placements();
//! assert!(!placements.is_empty());
//!
//! // Play the first one
//! let chosen = placements[0];
//! let outcome = game.place(chosen.rotation, chosen.x).unwrap().unwrap();
//! assert_eq!(outcome.lines_cleared, 0);
//! assert_eq!(game.pieces_locked(), 1);
//! ```

pub mod board;
pub mod error;
pub mod features;
pub mod game_state;
pub mod pieces;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use rl_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::CoreError;
pub use features::{
    AdvancedFeatures, BoardFeatures, FeatureScale, ADVANCED_FEATURE_NAMES, FEATURE_NAMES,
};
pub use game_state::{GameConfig, GameState, LockOutcome, SpawnPolicy};
pub use pieces::{get_shape, rotation_count, rotations, Piece, Shape};
pub use placement::{enumerate, enumerate_outcomes, max_placements, Placement};
pub use rng::{PieceQueue, Randomizer, RandomizerKind};
pub use scoring::{calculate_reward, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
