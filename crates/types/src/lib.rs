//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, placement search, agent-facing environments).
//!
//! # Board Dimensions
//!
//! The default playfield is 20 rows by 10 columns, but every board carries its
//! own runtime dimensions. Row 0 is the top of the board.
//!
//! # Piece Identifiers
//!
//! | Kind | Id | Cell tag |
//! |------|----|----------|
//! | O | 0 | 1 |
//! | I | 1 | 2 |
//! | S | 2 | 3 |
//! | Z | 3 | 4 |
//! | T | 4 | 5 |
//! | L | 5 | 6 |
//! | J | 6 | 7 |
//!
//! A cell tag of 0 means the cell is empty.
//!
//! # Examples
//!
//! ```
//! use rl_tetris_types::{AtomicAction, PieceKind, DEFAULT_HEIGHT, DEFAULT_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_name("t"), Some(piece));
//! assert_eq!(piece.tag(), 5);
//!
//! assert_eq!(AtomicAction::from_index(5), Some(AtomicAction::HardDrop));
//!
//! assert_eq!(DEFAULT_HEIGHT, 20);
//! assert_eq!(DEFAULT_WIDTH, 10);
//! ```

/// Default board width in cells (10 columns)
pub const DEFAULT_WIDTH: usize = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_HEIGHT: usize = 20;

/// Number of upcoming pieces buffered by the supply queue
pub const QUEUE_LOOKAHEAD: usize = 2;

/// Row on which pieces spawn
pub const SPAWN_ROW: i32 = 0;

/// Length of a placement feature vector: `[lines_cleared, holes, bumpiness, total_height]`
pub const FEATURE_DIM: usize = 4;

/// Length of the extended feature vector: the four basic features followed by
/// `[max_height, min_height, height_variance, complete_rows, weighted_holes, wells]`
pub const ADVANCED_FEATURE_DIM: usize = 10;

/// Reward handed out when a lock ends the game
pub const GAME_OVER_REWARD: i32 = -10;

/// Line clear scoring table
///
/// Points for clearing N lines with a single lock:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds, in identifier order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    T,
    L,
    J,
}

impl PieceKind {
    /// All kinds, indexed by identifier
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Number of piece kinds
    pub const COUNT: usize = 7;

    /// Look up a kind by identifier (0..7)
    ///
    /// # Examples
    ///
    /// ```
    /// use rl_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(0), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_id(6), Some(PieceKind::J));
    /// assert_eq!(PieceKind::from_id(7), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Identifier in 0..7
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Board occupancy tag (1..=7)
    pub fn tag(self) -> u8 {
        self.id() + 1
    }

    /// Inverse of [`PieceKind::tag`]. Returns `None` for 0 and unknown tags.
    pub fn from_tag(tag: u8) -> Option<Self> {
        tag.checked_sub(1).and_then(Self::from_id)
    }

    /// Parse piece kind from its letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use rl_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_name("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_name("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_name("unknown"), None);
    /// ```
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            _ => None,
        }
    }

    /// Convert to lowercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
        }
    }
}

/// Atomic actions accepted by the stepping environment
///
/// Indices are stable: agents address actions by position in [`AtomicAction::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomicAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; locks the piece when it cannot descend
    MoveDown,
    /// Rotate piece clockwise in place
    RotateCw,
    /// Rotate piece counter-clockwise in place
    RotateCcw,
    /// Drop piece to its resting row and lock it
    HardDrop,
}

impl AtomicAction {
    /// All actions in index order
    pub const ALL: [AtomicAction; 6] = [
        AtomicAction::MoveLeft,
        AtomicAction::MoveRight,
        AtomicAction::MoveDown,
        AtomicAction::RotateCw,
        AtomicAction::RotateCcw,
        AtomicAction::HardDrop,
    ];

    /// Number of atomic actions
    pub const COUNT: usize = 6;

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use rl_tetris_types::AtomicAction;
    ///
    /// assert_eq!(AtomicAction::from_str("moveLeft"), Some(AtomicAction::MoveLeft));
    /// assert_eq!(AtomicAction::from_str("rotateCcw"), Some(AtomicAction::RotateCcw));
    /// assert_eq!(AtomicAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(AtomicAction::MoveLeft),
            "moveright" => Some(AtomicAction::MoveRight),
            "movedown" => Some(AtomicAction::MoveDown),
            "rotatecw" => Some(AtomicAction::RotateCw),
            "rotateccw" => Some(AtomicAction::RotateCcw),
            "harddrop" => Some(AtomicAction::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            AtomicAction::MoveLeft => "moveLeft",
            AtomicAction::MoveRight => "moveRight",
            AtomicAction::MoveDown => "moveDown",
            AtomicAction::RotateCw => "rotateCw",
            AtomicAction::RotateCcw => "rotateCcw",
            AtomicAction::HardDrop => "hardDrop",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Occupancy tag of a cell (0 for empty)
#[inline]
pub fn cell_tag(cell: Cell) -> u8 {
    cell.map_or(0, PieceKind::tag)
}
