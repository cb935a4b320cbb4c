use thiserror::Error;

use crate::core::{CoreError, GameState, LockOutcome, Placement};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    #[error("placement index {index} out of range ({available} available)")]
    InvalidIndex { index: usize, available: usize },
    #[error("rotation {rotation} at x={x} collides on the spawn row")]
    Blocked { rotation: usize, x: i32 },
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::Core(CoreError::GameOver) => "not_playable",
            PlaceError::InvalidIndex { .. } | PlaceError::Blocked { .. } | PlaceError::Core(_) => {
                "invalid_place"
            }
        }
    }
}

/// Play `placements[index]` for the active piece
///
/// `placements` must come from enumerating the game's current board and piece.
pub fn apply_place(
    state: &mut GameState,
    placements: &[Placement],
    index: usize,
) -> Result<LockOutcome, PlaceError> {
    if state.game_over() {
        return Err(CoreError::GameOver.into());
    }

    let placement = placements.get(index).ok_or(PlaceError::InvalidIndex {
        index,
        available: placements.len(),
    })?;

    state
        .place(placement.rotation, placement.x)?
        .ok_or(PlaceError::Blocked {
            rotation: placement.rotation,
            x: placement.x,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::types::PieceKind;

    #[test]
    fn place_rejected_when_index_out_of_range() {
        let mut gs = GameState::new(GameConfig::default()).unwrap();
        let placements = gs.placements();
        let err = apply_place(&mut gs, &placements, placements.len()).unwrap_err();
        assert!(matches!(err, PlaceError::InvalidIndex { .. }));
        assert_eq!(err.code(), "invalid_place");
        assert_eq!(gs.pieces_locked(), 0);
    }

    #[test]
    fn place_rejected_when_spawn_row_blocked() {
        let mut gs = GameState::new(GameConfig::default()).unwrap();
        let placements = gs.placements();
        let target = placements[0];

        // Block the spawn-row footprint of the first placement after enumerating.
        let mut posed = gs.active();
        posed.rotation = target.rotation;
        for &(dx, dy) in &posed.shape().cells {
            gs.board_mut().set(target.x + dx, dy, Some(PieceKind::I));
        }

        let err = apply_place(&mut gs, &placements, 0).unwrap_err();
        assert!(matches!(err, PlaceError::Blocked { .. }));
    }

    #[test]
    fn place_rejected_when_game_over() {
        let mut gs = GameState::new(GameConfig::default()).unwrap();
        for _ in 0..1000 {
            let placements = gs.placements();
            if apply_place(&mut gs, &placements, 0).unwrap().game_over {
                break;
            }
        }
        assert!(gs.game_over());
        let err = apply_place(&mut gs, &[], 0).unwrap_err();
        assert_eq!(err, PlaceError::Core(CoreError::GameOver));
        assert_eq!(err.code(), "not_playable");
    }
}
