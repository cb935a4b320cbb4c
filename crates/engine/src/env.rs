//! Stepping environments
//!
//! [`TetrisEnv`] takes one [`AtomicAction`] per step. A piece locks on `HardDrop`, or on
//! a `MoveDown` that cannot descend; every other action only moves the piece.
//!
//! [`GroupedEnv`] takes an index into the current piece's placement list, so every step
//! locks exactly one piece.
//!
//! Both report reward only on locks (`-10` when the lock ends the game, otherwise the
//! squared line count) and hand back an error once the episode has terminated.

use crate::config::EnvConfig;
use crate::core::{max_placements, Board, CoreError, GameState, LockOutcome, Placement};
use crate::observation::{
    GroupedInfo, GroupedLayout, GroupedObservation, Observation, Step, StepInfo,
};
use crate::place::{apply_place, PlaceError};
use crate::types::AtomicAction;

/// Shared step bookkeeping
#[derive(Debug, Clone)]
struct Episode {
    steps: u32,
    max_steps: Option<u32>,
}

impl Episode {
    fn new(max_steps: Option<u32>) -> Self {
        Self {
            steps: 0,
            max_steps,
        }
    }

    /// Count a step; returns whether the episode is now truncated
    fn advance(&mut self, terminated: bool) -> bool {
        self.steps = self.steps.saturating_add(1);
        !terminated && self.max_steps.is_some_and(|max| self.steps >= max)
    }
}

fn reward_for(lock: Option<LockOutcome>) -> f32 {
    lock.map_or(0.0, |outcome| outcome.reward() as f32)
}

/// Atomic-action environment
#[derive(Debug, Clone)]
pub struct TetrisEnv {
    game: GameState,
    episode: Episode,
}

impl TetrisEnv {
    pub fn new(config: EnvConfig) -> Result<Self, CoreError> {
        Ok(Self {
            game: GameState::new(config.game)?,
            episode: Episode::new(config.max_steps),
        })
    }

    /// Number of atomic actions
    pub fn action_count(&self) -> usize {
        AtomicAction::COUNT
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn steps(&self) -> u32 {
        self.episode.steps
    }

    pub fn observation(&self) -> Observation {
        Observation::from_game(&self.game)
    }

    pub fn info(&self) -> StepInfo {
        StepInfo::from_game(&self.game)
    }

    /// Start a new episode, continuing the piece stream
    pub fn reset(&mut self) -> (Observation, StepInfo) {
        self.game.reset();
        self.episode.steps = 0;
        (self.observation(), self.info())
    }

    /// Start a new episode with the piece stream restarted from `seed`
    pub fn reset_with_seed(&mut self, seed: u64) -> (Observation, StepInfo) {
        self.game.reset_with_seed(seed);
        self.episode.steps = 0;
        (self.observation(), self.info())
    }

    /// Apply one atomic action
    pub fn step(&mut self, action: AtomicAction) -> Result<Step<Observation>, CoreError> {
        let lock = match action {
            AtomicAction::MoveLeft => {
                self.game.move_piece(-1, 0)?;
                None
            }
            AtomicAction::MoveRight => {
                self.game.move_piece(1, 0)?;
                None
            }
            AtomicAction::MoveDown => {
                if self.game.move_piece(0, 1)? {
                    None
                } else {
                    Some(self.game.lock_piece()?)
                }
            }
            AtomicAction::RotateCw => {
                self.game.rotate_piece()?;
                None
            }
            AtomicAction::RotateCcw => {
                self.game.rotate_piece_ccw()?;
                None
            }
            AtomicAction::HardDrop => {
                self.game.hard_drop()?;
                Some(self.game.lock_piece()?)
            }
        };

        let terminated = self.game.game_over();
        let truncated = self.episode.advance(terminated);
        Ok(Step {
            observation: self.observation(),
            reward: reward_for(lock),
            terminated,
            truncated,
            info: self.info(),
        })
    }
}

/// Grouped-placement environment
#[derive(Debug, Clone)]
pub struct GroupedEnv {
    game: GameState,
    episode: Episode,
    layout: GroupedLayout,
    outcomes: Vec<(Placement, Board)>,
    placements: Vec<Placement>,
}

impl GroupedEnv {
    pub fn new(config: EnvConfig) -> Result<Self, CoreError> {
        let game = GameState::new(config.game)?;
        let mut env = Self {
            layout: GroupedLayout {
                slots: max_placements(config.game.width),
                height: config.game.height,
                width: config.game.width,
                features: config.features,
                scale: config.feature_scale,
            },
            outcomes: Vec::new(),
            placements: Vec::new(),
            game,
            episode: Episode::new(config.max_steps),
        };
        env.refresh();
        Ok(env)
    }

    fn refresh(&mut self) {
        self.outcomes = if self.game.game_over() {
            Vec::new()
        } else {
            self.game.placement_outcomes()
        };
        self.placements = self.outcomes.iter().map(|(placement, _)| *placement).collect();
    }

    /// Fixed number of action slots (the mask length)
    pub fn action_count(&self) -> usize {
        self.layout.slots
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Placements available for the active piece, in action-index order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn steps(&self) -> u32 {
        self.episode.steps
    }

    pub fn observation(&self) -> GroupedObservation {
        GroupedObservation::new(&self.outcomes, &self.layout)
    }

    pub fn info(&self) -> GroupedInfo {
        GroupedInfo::new(&self.game, &self.observation())
    }

    fn observe(&self) -> (GroupedObservation, GroupedInfo) {
        let observation = self.observation();
        let info = GroupedInfo::new(&self.game, &observation);
        (observation, info)
    }

    pub fn reset(&mut self) -> (GroupedObservation, GroupedInfo) {
        self.game.reset();
        self.episode.steps = 0;
        self.refresh();
        self.observe()
    }

    pub fn reset_with_seed(&mut self, seed: u64) -> (GroupedObservation, GroupedInfo) {
        self.game.reset_with_seed(seed);
        self.episode.steps = 0;
        self.refresh();
        self.observe()
    }

    /// Play the placement at `index` in the current ordering
    pub fn step(
        &mut self,
        index: usize,
    ) -> Result<Step<GroupedObservation, GroupedInfo>, PlaceError> {
        let outcome = apply_place(&mut self.game, &self.placements, index)?;
        self.refresh();

        let terminated = outcome.game_over;
        let truncated = self.episode.advance(terminated);
        let (observation, info) = self.observe();
        Ok(Step {
            observation,
            reward: reward_for(Some(outcome)),
            terminated,
            truncated,
            info,
        })
    }
}
