//! Placement enumeration - every final resting pose of a piece, with its outcome
//!
//! For each distinct rotation (ascending) and each horizontal offset whose bounding box
//! fits the board (ascending), the piece is put on the spawn row. Offsets colliding there
//! are unreachable and skipped. Every remaining candidate is dropped, locked, and
//! line-cleared on its own clone of the board, and the outcome features are recorded.
//!
//! The caller's board is only ever borrowed immutably, so repeated or interleaved
//! enumeration against a live game has no side effects.

use crate::board::Board;
use crate::features::BoardFeatures;
use crate::pieces::{rotations, Piece};
use crate::types::{PieceKind, SPAWN_ROW};

/// One reachable final placement and its simulated outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Rotation index into the kind's distinct-state table
    pub rotation: usize,
    /// Anchor column of the shape's bounding box
    pub x: i32,
    /// Anchor row the piece comes to rest on
    pub y: i32,
    pub lines_cleared: u32,
    pub features: BoardFeatures,
}

/// Rows a piece at (x, y) can fall before it would collide
pub fn drop_distance(board: &Board, piece: &Piece, x: i32, y: i32) -> u32 {
    let mut distance = 0u32;
    while !board.check_collision(piece, x, y + distance as i32 + 1) {
        distance += 1;
    }
    distance
}

/// Simulate a single candidate on a private copy of `board`
///
/// Returns `None` when the candidate collides at the spawn row. Otherwise returns the
/// resulting board (after line clears) together with the placement record.
pub fn simulate(
    board: &Board,
    kind: PieceKind,
    rotation: usize,
    x: i32,
) -> Option<(Board, Placement)> {
    let mut piece = Piece::new(kind, x, SPAWN_ROW);
    piece.rotation = rotation;
    if rotation >= rotations(kind).len() || board.check_collision(&piece, x, SPAWN_ROW) {
        return None;
    }

    let y = SPAWN_ROW + drop_distance(board, &piece, x, SPAWN_ROW) as i32;
    piece.set_position(x, y);

    let mut sim = board.clone();
    sim.place_piece(&piece, x, y);
    let lines_cleared = sim.clear_full_rows() as u32;
    let features = sim.features(lines_cleared);

    Some((
        sim,
        Placement {
            rotation,
            x,
            y,
            lines_cleared,
            features,
        },
    ))
}

/// Enumerate every reachable final placement of `kind` on `board`
///
/// Results are ordered by ascending rotation index, then ascending offset, so an index
/// into the returned list identifies the same placement on every call for the same board.
pub fn enumerate(board: &Board, kind: PieceKind) -> Vec<Placement> {
    candidates(board, kind)
        .map(|(_, placement)| placement)
        .collect()
}

/// Like [`enumerate`], keeping each candidate's resulting board (after line clears)
pub fn enumerate_outcomes(board: &Board, kind: PieceKind) -> Vec<(Placement, Board)> {
    candidates(board, kind)
        .map(|(after, placement)| (placement, after))
        .collect()
}

fn candidates(board: &Board, kind: PieceKind) -> impl Iterator<Item = (Board, Placement)> + '_ {
    let width = board.width() as i32;
    rotations(kind)
        .iter()
        .enumerate()
        .flat_map(move |(rotation, shape)| {
            let max_x = width - shape.width as i32;
            (0..=max_x).filter_map(move |x| simulate(board, kind, rotation, x))
        })
}

/// Number of horizontal offsets a kind has on an empty board of `width` columns
fn offsets_on_empty(kind: PieceKind, width: usize) -> usize {
    rotations(kind)
        .iter()
        .map(|shape| (width + 1).saturating_sub(shape.width as usize))
        .sum()
}

/// Upper bound on [`enumerate`]'s result length for any kind on a board of `width` columns
///
/// Used to size fixed-length validity masks.
pub fn max_placements(width: usize) -> usize {
    PieceKind::ALL
        .iter()
        .map(|&kind| offsets_on_empty(kind, width))
        .max()
        .unwrap_or(0)
}
