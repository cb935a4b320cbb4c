//! Pieces module - Tetromino shapes and in-place rotation
//!
//! Every kind has a static table of its *distinct* rotation states, generated by
//! rotating the spawn bitmap clockwise and dropping congruent results. Shapes are
//! normalized to their bounding box and anchored at its top-left corner, so a
//! rotation never needs a pivot or a kick table.
//!
//! | Kind | States |
//! |------|--------|
//! | O | 1 |
//! | I, S, Z | 2 |
//! | T, L, J | 4 |

use std::fmt;

use arrayvec::ArrayVec;

use crate::error::CoreError;
use crate::types::PieceKind;

/// Offset of a single mino relative to the shape's bounding box
pub type MinoOffset = (i32, i32);

/// One rotation state: 4 mino offsets plus the bounding box they live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub cells: [MinoOffset; 4],
    pub width: u8,
    pub height: u8,
}

impl Shape {
    const fn new(cells: [MinoOffset; 4], width: u8, height: u8) -> Self {
        Self {
            cells,
            width,
            height,
        }
    }

    /// Row-major 0/1 bitmap of the bounding box
    pub fn bitmap(&self) -> Vec<Vec<u8>> {
        let mut rows = vec![vec![0u8; self.width as usize]; self.height as usize];
        for &(dx, dy) in &self.cells {
            rows[dy as usize][dx as usize] = 1;
        }
        rows
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.bitmap().iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for &bit in row {
                f.write_str(if bit != 0 { "█" } else { "." })?;
            }
        }
        Ok(())
    }
}

// Spawn bitmaps:
//   O  ##     I  ####    S  .##    Z  ##.    T  .#.    L  ..#    J  #..
//      ##                   ##.       .##       ###       ###       ###
const O_SHAPES: [Shape; 1] = [Shape::new([(0, 0), (1, 0), (0, 1), (1, 1)], 2, 2)];

const I_SHAPES: [Shape; 2] = [
    Shape::new([(0, 0), (1, 0), (2, 0), (3, 0)], 4, 1),
    Shape::new([(0, 0), (0, 1), (0, 2), (0, 3)], 1, 4),
];

const S_SHAPES: [Shape; 2] = [
    Shape::new([(1, 0), (2, 0), (0, 1), (1, 1)], 3, 2),
    Shape::new([(0, 0), (0, 1), (1, 1), (1, 2)], 2, 3),
];

const Z_SHAPES: [Shape; 2] = [
    Shape::new([(0, 0), (1, 0), (1, 1), (2, 1)], 3, 2),
    Shape::new([(1, 0), (0, 1), (1, 1), (0, 2)], 2, 3),
];

const T_SHAPES: [Shape; 4] = [
    Shape::new([(1, 0), (0, 1), (1, 1), (2, 1)], 3, 2),
    Shape::new([(0, 0), (0, 1), (1, 1), (0, 2)], 2, 3),
    Shape::new([(0, 0), (1, 0), (2, 0), (1, 1)], 3, 2),
    Shape::new([(1, 0), (0, 1), (1, 1), (1, 2)], 2, 3),
];

const L_SHAPES: [Shape; 4] = [
    Shape::new([(2, 0), (0, 1), (1, 1), (2, 1)], 3, 2),
    Shape::new([(0, 0), (0, 1), (0, 2), (1, 2)], 2, 3),
    Shape::new([(0, 0), (1, 0), (2, 0), (0, 1)], 3, 2),
    Shape::new([(0, 0), (1, 0), (1, 1), (1, 2)], 2, 3),
];

const J_SHAPES: [Shape; 4] = [
    Shape::new([(0, 0), (0, 1), (1, 1), (2, 1)], 3, 2),
    Shape::new([(0, 0), (1, 0), (0, 1), (0, 2)], 2, 3),
    Shape::new([(0, 0), (1, 0), (2, 0), (2, 1)], 3, 2),
    Shape::new([(1, 0), (1, 1), (0, 2), (1, 2)], 2, 3),
];

/// Distinct rotation states of a kind, in clockwise order
pub fn rotations(kind: PieceKind) -> &'static [Shape] {
    match kind {
        PieceKind::O => &O_SHAPES,
        PieceKind::I => &I_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::L => &L_SHAPES,
        PieceKind::J => &J_SHAPES,
    }
}

/// Number of distinct rotation states of a kind
#[inline]
pub fn rotation_count(kind: PieceKind) -> usize {
    rotations(kind).len()
}

/// Get the shape for a kind and rotation index (wrapped modulo the state count)
pub fn get_shape(kind: PieceKind, rotation: usize) -> &'static Shape {
    let table = rotations(kind);
    &table[rotation % table.len()]
}

/// Spawn shape of a kind
pub fn get_spawn_shape(kind: PieceKind) -> &'static Shape {
    get_shape(kind, 0)
}

/// A tetromino instance: kind, rotation index, and anchor
///
/// The anchor is the top-left corner of the current shape's bounding box.
/// Moves and rotations are unchecked here; the board decides legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a piece in its spawn rotation at `(x, y)`
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation: 0,
            x,
            y,
        }
    }

    /// Create a piece from a raw identifier (0..7)
    pub fn from_id(id: u8, x: i32, y: i32) -> Result<Self, CoreError> {
        let kind = PieceKind::from_id(id).ok_or(CoreError::InvalidPieceId(id))?;
        Ok(Self::new(kind, x, y))
    }

    /// Shape for the current rotation
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        get_shape(self.kind, self.rotation)
    }

    pub fn width(&self) -> i32 {
        self.shape().width as i32
    }

    pub fn height(&self) -> i32 {
        self.shape().height as i32
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotation = (self.rotation + 1) % rotation_count(self.kind);
    }

    pub fn rotate_counterclockwise(&mut self) {
        let count = rotation_count(self.kind);
        self.rotation = (self.rotation + count - 1) % count;
    }

    /// Translate the anchor
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// All distinct shapes of this piece's kind
    pub fn all_rotations(&self) -> ArrayVec<Shape, 4> {
        rotations(self.kind).iter().copied().collect()
    }

    /// Absolute board coordinates of the piece's minos
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape()
            .cells
            .iter()
            .map(move |&(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.shape(), f)
    }
}
