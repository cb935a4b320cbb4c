//! Game state module - manages the complete game state
//!
//! This module ties together the board, the supply queue, the active piece, and scoring.
//! A turn is: spawn, any number of moves and rotations, then a lock. Locking clears
//! rows, adds score, and spawns the next piece; a spawn that collides ends the game.
//!
//! Once the game is over, every mutating operation returns [`CoreError::GameOver`]
//! until [`GameState::reset`] is called.

use crate::board::Board;
use crate::error::CoreError;
use crate::pieces::{get_spawn_shape, Piece};
use crate::placement::{self, Placement};
use crate::rng::{PieceQueue, Randomizer, RandomizerKind};
use crate::scoring::{calculate_reward, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{PieceKind, DEFAULT_HEIGHT, DEFAULT_WIDTH, SPAWN_ROW};

/// Where new pieces appear horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnPolicy {
    /// Centered: `width / 2 - piece_width / 2`
    #[default]
    Center,
    /// Flush against the left wall
    Left,
}

impl SpawnPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "center" | "centre" => Some(SpawnPolicy::Center),
            "left" => Some(SpawnPolicy::Left),
            _ => None,
        }
    }

    /// Spawn anchor column for `kind` on a board of `width` columns
    pub fn spawn_x(self, kind: PieceKind, width: usize) -> i32 {
        match self {
            SpawnPolicy::Center => {
                let piece_width = get_spawn_shape(kind).width as i32;
                width as i32 / 2 - piece_width / 2
            }
            SpawnPolicy::Left => 0,
        }
    }
}

/// Construction parameters for a [`GameState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    pub randomizer: RandomizerKind,
    pub seed: u64,
    pub spawn: SpawnPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            randomizer: RandomizerKind::Bag,
            seed: 1,
            spawn: SpawnPolicy::Center,
        }
    }
}

/// Result of locking the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub lines_cleared: u32,
    pub game_over: bool,
}

impl LockOutcome {
    pub fn reward(&self) -> i32 {
        calculate_reward(self.lines_cleared, self.game_over)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    piece_queue: PieceQueue,
    active: Piece,
    spawn: SpawnPolicy,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    game_over: bool,
}

impl GameState {
    /// Create a new game and spawn its first piece
    pub fn new(config: GameConfig) -> Result<Self, CoreError> {
        let board = Board::new(config.height, config.width)?;
        let mut piece_queue =
            PieceQueue::new(Randomizer::new(config.randomizer, config.seed));
        let kind = piece_queue.pop();
        let active = Piece::new(kind, config.spawn.spawn_x(kind, config.width), SPAWN_ROW);
        let game_over = board.check_collision(&active, active.x, active.y);

        Ok(Self {
            board,
            piece_queue,
            active,
            spawn: config.spawn,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            game_over,
        })
    }

    /// Clear the board and counters and spawn a fresh piece; the piece stream continues
    pub fn reset(&mut self) {
        self.piece_queue.reset();
        self.restart();
    }

    /// Like [`GameState::reset`], but restarts the piece stream from `seed`
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.piece_queue.reseed(seed);
        self.restart();
    }

    fn restart(&mut self) {
        self.board.reset();
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.game_over = false;
        self.spawn_piece();
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// The active piece (the piece that collided at spawn once the game is over)
    pub fn active(&self) -> Piece {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup
    ///
    /// Edits bypass the turn state machine; the active piece is not re-validated.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Kind that will spawn after the active piece locks
    pub fn next_kind(&self) -> PieceKind {
        self.piece_queue.peek()
    }

    pub fn piece_queue(&self) -> &PieceQueue {
        &self.piece_queue
    }

    fn ensure_playable(&self) -> Result<(), CoreError> {
        if self.game_over {
            return Err(CoreError::GameOver);
        }
        Ok(())
    }

    /// Spawn the next piece from the queue; returns false (and ends the game) on collision
    fn spawn_piece(&mut self) -> bool {
        let kind = self.piece_queue.pop();
        let x = self.spawn.spawn_x(kind, self.board.width());
        self.active = Piece::new(kind, x, SPAWN_ROW);

        if self.board.check_collision(&self.active, x, SPAWN_ROW) {
            self.game_over = true;
            return false;
        }
        true
    }

    /// Check whether the active piece could move by (dx, dy)
    pub fn can_move(&self, dx: i32, dy: i32) -> bool {
        let a = &self.active;
        !self.board.check_collision(a, a.x + dx, a.y + dy)
    }

    /// Check if the active piece is resting on something
    pub fn is_grounded(&self) -> bool {
        !self.can_move(0, 1)
    }

    /// Try to move the active piece; the pose is unchanged on collision
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> Result<bool, CoreError> {
        self.ensure_playable()?;
        if !self.can_move(dx, dy) {
            return Ok(false);
        }
        self.active.move_by(dx, dy);
        Ok(true)
    }

    /// Try to rotate the active piece clockwise in place (no kicks)
    pub fn rotate_piece(&mut self) -> Result<bool, CoreError> {
        self.try_rotate(true)
    }

    /// Try to rotate the active piece counter-clockwise in place (no kicks)
    pub fn rotate_piece_ccw(&mut self) -> Result<bool, CoreError> {
        self.try_rotate(false)
    }

    fn try_rotate(&mut self, clockwise: bool) -> Result<bool, CoreError> {
        self.ensure_playable()?;
        let mut rotated = self.active;
        if clockwise {
            rotated.rotate_clockwise();
        } else {
            rotated.rotate_counterclockwise();
        }
        if self.board.check_collision(&rotated, rotated.x, rotated.y) {
            return Ok(false);
        }
        self.active = rotated;
        Ok(true)
    }

    /// Drop the active piece to its resting row; returns rows descended
    ///
    /// Does not lock. Dropping a grounded piece returns 0 and leaves it in place.
    pub fn hard_drop(&mut self) -> Result<u32, CoreError> {
        self.ensure_playable()?;
        let a = self.active;
        let distance = placement::drop_distance(&self.board, &a, a.x, a.y);
        self.active.move_by(0, distance as i32);
        Ok(distance)
    }

    /// Lock the active piece, clear rows, score, and spawn the next piece
    pub fn lock_piece(&mut self) -> Result<LockOutcome, CoreError> {
        self.ensure_playable()?;
        let a = self.active;
        self.board.place_piece(&a, a.x, a.y);

        let lines_cleared = self.board.clear_full_rows() as u32;
        self.score = self.score.saturating_add(line_clear_score(lines_cleared));
        self.lines = self.lines.saturating_add(lines_cleared);
        self.pieces_locked = self.pieces_locked.saturating_add(1);

        let spawned = self.spawn_piece();
        Ok(LockOutcome {
            lines_cleared,
            game_over: !spawned,
        })
    }

    /// Reward for a lock: -10 on game over, otherwise the squared line count
    pub fn calculate_reward(&self, lines_cleared: u32, is_game_over: bool) -> i32 {
        calculate_reward(lines_cleared, is_game_over)
    }

    /// All reachable final placements of the active piece's kind
    pub fn placements(&self) -> Vec<Placement> {
        placement::enumerate(&self.board, self.active.kind)
    }

    /// Like [`GameState::placements`], paired with each placement's resulting board
    pub fn placement_outcomes(&self) -> Vec<(Placement, Board)> {
        placement::enumerate_outcomes(&self.board, self.active.kind)
    }

    /// Put the active piece at (`rotation`, `x`) on the spawn row, drop it, and lock it
    ///
    /// Returns `Ok(None)` if that pose collides at the spawn row or the rotation index
    /// does not exist for the kind; the game is left unchanged in that case.
    pub fn place(&mut self, rotation: usize, x: i32) -> Result<Option<LockOutcome>, CoreError> {
        self.ensure_playable()?;
        let mut target = Piece::new(self.active.kind, x, SPAWN_ROW);
        target.rotation = rotation;
        if rotation >= target.all_rotations().len()
            || self.board.check_collision(&target, x, SPAWN_ROW)
        {
            return Ok(None);
        }

        self.active = target;
        self.hard_drop()?;
        self.lock_piece().map(Some)
    }

    /// Board tags with the active piece drawn in (for render views)
    pub fn board_with_piece(&self) -> Vec<Vec<u8>> {
        let mut grid = self.board.state();
        let tag = self.active.kind.tag();
        for (x, y) in self.active.cells() {
            if x < 0 || y < 0 {
                continue;
            }
            if let Some(cell) = grid.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
                if *cell == 0 {
                    *cell = tag;
                }
            }
        }
        grid
    }

    /// Read-only snapshot for render hooks
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.state(),
            active: ActiveSnapshot::from(self.active),
            next: self.piece_queue.peek(),
            score: self.score,
            lines: self.lines,
            game_over: self.game_over,
        }
    }
}
