//! Observation and step result types handed to agents

use serde::Serialize;

use crate::config::FeatureSet;
use crate::core::{Board, FeatureScale, GameState, Placement};

/// Raw observation: the locked board plus the active piece pose
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// Occupancy tags, `height x width`
    pub board: Vec<Vec<u8>>,
    pub piece_id: u8,
    pub x: i32,
    pub y: i32,
}

impl Observation {
    pub fn from_game(game: &GameState) -> Self {
        let active = game.active();
        Self {
            board: game.board().state(),
            piece_id: active.kind.id(),
            x: active.x,
            y: active.y,
        }
    }
}

/// Per-slot layout of a grouped observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupedLayout {
    /// Fixed slot count (the mask length)
    pub slots: usize,
    pub height: usize,
    pub width: usize,
    pub features: FeatureSet,
    pub scale: Option<FeatureScale>,
}

impl GroupedLayout {
    fn feature_vector(&self, placement: &Placement, after: &Board) -> Vec<f32> {
        match (self.features, &self.scale) {
            (FeatureSet::Basic, None) => placement.features.to_array().to_vec(),
            (FeatureSet::Basic, Some(scale)) => placement.features.normalized(scale).to_vec(),
            (FeatureSet::Advanced, None) => {
                after.advanced_features(placement.lines_cleared).to_array().to_vec()
            }
            (FeatureSet::Advanced, Some(scale)) => after
                .advanced_features(placement.lines_cleared)
                .normalized(scale)
                .to_vec(),
        }
    }
}

/// Grouped observation: per placement slot, a feature vector and the resulting board,
/// plus a validity mask
///
/// All three vectors have the layout's fixed slot count; slots past the live
/// placement count hold zero features and empty boards and are masked out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedObservation {
    pub features: Vec<Vec<f32>>,
    /// Occupancy tags after each placement's lock and line clears, `slots x height x width`
    pub boards: Vec<Vec<Vec<u8>>>,
    pub action_mask: Vec<bool>,
    /// Live placements backing the valid slots, in slot order
    #[serde(skip)]
    pub placements: Vec<Placement>,
}

impl GroupedObservation {
    pub fn new(outcomes: &[(Placement, Board)], layout: &GroupedLayout) -> Self {
        let empty_board = vec![vec![0u8; layout.width]; layout.height];
        let mut features = vec![vec![0.0f32; layout.features.dim()]; layout.slots];
        let mut boards = vec![empty_board; layout.slots];
        let mut action_mask = vec![false; layout.slots];

        for (i, (placement, after)) in outcomes.iter().take(layout.slots).enumerate() {
            features[i] = layout.feature_vector(placement, after);
            boards[i] = after.state();
            action_mask[i] = true;
        }
        Self {
            features,
            boards,
            action_mask,
            placements: outcomes.iter().map(|(placement, _)| *placement).collect(),
        }
    }

    /// Number of valid slots
    pub fn valid_count(&self) -> usize {
        self.action_mask.iter().filter(|&&valid| valid).count()
    }

    /// Indices of the valid slots, ascending
    pub fn valid_indices(&self) -> Vec<usize> {
        self.action_mask
            .iter()
            .enumerate()
            .filter_map(|(i, &valid)| valid.then_some(i))
            .collect()
    }
}

/// Episode counters reported with every reset and step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepInfo {
    pub score: u32,
    pub lines: u32,
}

impl StepInfo {
    pub fn from_game(game: &GameState) -> Self {
        Self {
            score: game.score(),
            lines: game.lines(),
        }
    }
}

/// Grouped-environment counters plus the valid action indices and the locked board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedInfo {
    pub score: u32,
    pub lines: u32,
    /// Slot indices whose mask entry is true, ascending
    pub valid_indices: Vec<usize>,
    pub board: Vec<Vec<u8>>,
}

impl GroupedInfo {
    pub fn new(game: &GameState, observation: &GroupedObservation) -> Self {
        Self {
            score: game.score(),
            lines: game.lines(),
            valid_indices: observation.valid_indices(),
            board: game.board().state(),
        }
    }
}

/// Result of one environment step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step<O, I = StepInfo> {
    pub observation: O,
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: I,
}
