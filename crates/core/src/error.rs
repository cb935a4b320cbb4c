//! Error type shared by every core operation.

use thiserror::Error;

/// Caller errors surfaced by the simulation core.
///
/// None of these are retried or recovered internally.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    #[error("board dimensions must be positive, got {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },
    #[error("invalid piece identifier: {0}")]
    InvalidPieceId(u8),
    #[error("invalid board state dimensions, expected {height}x{width}")]
    StateDimensions { height: usize, width: usize },
    #[error("game is over; reset before issuing further actions")]
    GameOver,
}
