//! Board module - manages the game grid
//!
//! The board is a `height x width` grid where each cell can be empty or filled with a piece kind.
//! Uses a flat vector in row-major order for cache locality and cheap cloning.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom (row 0 is the top).
//!
//! A `Board` is a value type: `clone()` produces an independent grid, which is what the
//! placement search relies on to simulate candidates without touching the live board.

use std::fmt;

use crate::error::CoreError;
use crate::features::{AdvancedFeatures, BoardFeatures};
use crate::pieces::Piece;
use crate::types::{cell_tag, Cell, PieceKind};

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat vector of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    ///
    /// Fails if either dimension is zero; no partial board is created.
    pub fn new(height: usize, width: usize) -> Result<Self, CoreError> {
        if height == 0 || width == 0 {
            return Err(CoreError::InvalidDimensions { height, width });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    #[inline]
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// True if any mino of `piece`'s shape, anchored at (x, y), leaves the board
    /// or overlaps an occupied cell
    pub fn check_collision(&self, piece: &Piece, x: i32, y: i32) -> bool {
        piece
            .shape()
            .cells
            .iter()
            .any(|&(dx, dy)| !self.is_free(x + dx, y + dy))
    }

    /// Write the piece's minos into the board at anchor (x, y), tagged with its kind
    ///
    /// The caller must have checked [`Board::check_collision`] first; this method does
    /// not validate the pose so that simulated placements stay cheap.
    pub fn place_piece(&mut self, piece: &Piece, x: i32, y: i32) {
        debug_assert!(
            !self.check_collision(piece, x, y),
            "place_piece called on a colliding pose"
        );
        for &(dx, dy) in &piece.shape().cells {
            self.set(x + dx, y + dy, Some(piece.kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Check if every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Clear all full rows and return how many were removed
    ///
    /// Two-pointer compaction scanning bottom to top: every surviving row moves down by
    /// the number of cleared rows below it, and the freed rows at the top are emptied.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut write_y = self.height;
        let mut cleared = 0usize;

        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Height of each column: rows from its topmost filled cell to the floor, 0 if empty
    pub fn column_heights(&self) -> Vec<u32> {
        (0..self.width)
            .map(|x| {
                (0..self.height)
                    .find(|&y| self.cells[y * self.width + x].is_some())
                    .map_or(0, |top| (self.height - top) as u32)
            })
            .collect()
    }

    /// Tallest column height
    pub fn max_height(&self) -> u32 {
        self.column_heights().into_iter().max().unwrap_or(0)
    }

    /// Count empty cells lying below the topmost filled cell of their column
    pub fn holes(&self) -> u32 {
        let mut holes = 0u32;
        for x in 0..self.width {
            let mut covered = false;
            for y in 0..self.height {
                match self.cells[y * self.width + x] {
                    Some(_) => covered = true,
                    None if covered => holes += 1,
                    None => {}
                }
            }
        }
        holes
    }

    /// Returns `(bumpiness, total_height)`
    ///
    /// Bumpiness is the sum of absolute height differences between adjacent columns.
    pub fn bumpiness_and_height(&self) -> (u32, u32) {
        let heights = self.column_heights();
        let total = heights.iter().sum();
        let bumpiness = heights
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .sum();
        (bumpiness, total)
    }

    /// Feature vector of the current grid, paired with the lines cleared to reach it
    pub fn features(&self, lines_cleared: u32) -> BoardFeatures {
        let (bumpiness, total_height) = self.bumpiness_and_height();
        BoardFeatures {
            lines_cleared,
            holes: self.holes(),
            bumpiness,
            total_height,
        }
    }

    /// Number of rows that are currently full
    pub fn complete_rows(&self) -> u32 {
        (0..self.height).filter(|&y| self.is_row_full(y)).count() as u32
    }

    /// Holes weighted by depth: a hole on row `y` counts `(y + 1) / height`
    pub fn weighted_holes(&self) -> f32 {
        let mut sum = 0.0f32;
        for x in 0..self.width {
            let mut covered = false;
            for y in 0..self.height {
                match self.cells[y * self.width + x] {
                    Some(_) => covered = true,
                    None if covered => sum += (y + 1) as f32 / self.height as f32,
                    None => {}
                }
            }
        }
        sum
    }

    /// Columns strictly lower than both neighbours, treating the walls as higher
    ///
    /// Boards narrower than two columns have no wells.
    pub fn wells(&self) -> u32 {
        let heights = self.column_heights();
        if heights.len() < 2 {
            return 0;
        }
        let last = heights.len() - 1;
        (0..heights.len())
            .filter(|&i| {
                let left_higher = i == 0 || heights[i - 1] > heights[i];
                let right_higher = i == last || heights[i + 1] > heights[i];
                left_higher && right_higher
            })
            .count() as u32
    }

    /// Extended feature vector of the current grid
    pub fn advanced_features(&self, lines_cleared: u32) -> AdvancedFeatures {
        let heights = self.column_heights();
        let n = heights.len() as f64;
        let mean = heights.iter().map(|&h| h as f64).sum::<f64>() / n;
        let variance = heights
            .iter()
            .map(|&h| (h as f64 - mean).powi(2))
            .sum::<f64>()
            / n;

        AdvancedFeatures {
            basic: self.features(lines_cleared),
            max_height: heights.iter().copied().max().unwrap_or(0),
            min_height: heights.iter().copied().min().unwrap_or(0),
            height_variance: variance as f32,
            complete_rows: self.complete_rows(),
            weighted_holes: self.weighted_holes(),
            wells: self.wells(),
        }
    }

    /// Snapshot of the grid as occupancy tags (0 = empty, otherwise kind tag)
    ///
    /// The snapshot is a deep copy; mutating the board afterwards does not affect it.
    pub fn state(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|&cell| cell_tag(cell)).collect())
            .collect()
    }

    /// Restore the grid from a tag snapshot
    ///
    /// Rejects snapshots of the wrong dimensions or with unknown tags; the board is
    /// left untouched on error.
    pub fn set_state(&mut self, rows: &[Vec<u8>]) -> Result<(), CoreError> {
        if rows.len() != self.height || rows.iter().any(|row| row.len() != self.width) {
            return Err(CoreError::StateDimensions {
                height: self.height,
                width: self.width,
            });
        }

        let mut cells = Vec::with_capacity(self.cells.len());
        for &tag in rows.iter().flatten() {
            let cell = match tag {
                0 => None,
                t => Some(PieceKind::from_tag(t).ok_or(CoreError::InvalidPieceId(t))?),
            };
            cells.push(cell);
        }
        self.cells = cells;
        Ok(())
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            f.write_str("|")?;
            for cell in self.row(y) {
                f.write_str(if cell.is_some() { "█" } else { "." })?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+{}+", "-".repeat(self.width))
    }
}
