//! Game state tests - turn lifecycle, scoring, rewards, and terminal behavior

use rl_tetris::core::{
    CoreError, GameConfig, GameState, RandomizerKind, SpawnPolicy,
};
use rl_tetris::types::{PieceKind, LINE_SCORES};

fn config(height: usize, width: usize) -> GameConfig {
    GameConfig {
        height,
        width,
        ..GameConfig::default()
    }
}

/// Reseed until the active piece is `kind`
fn game_with_active(kind: PieceKind, height: usize, width: usize) -> GameState {
    let mut game = GameState::new(config(height, width)).unwrap();
    for seed in 0..200 {
        game.reset_with_seed(seed);
        if game.active().kind == kind {
            return game;
        }
    }
    panic!("no seed spawned {:?}", kind);
}

#[test]
fn test_vertical_i_on_4x4_board() {
    let mut game = game_with_active(PieceKind::I, 4, 4);
    assert_eq!(game.active().x, 0);

    assert_eq!(game.rotate_piece(), Ok(true));
    assert_eq!(game.hard_drop(), Ok(0));
    game.lock_piece().unwrap();

    assert_eq!(game.board().column_heights(), vec![4, 0, 0, 0]);
}

#[test]
fn test_hard_drop_distance_and_idempotence() {
    let mut game = game_with_active(PieceKind::O, 20, 10);
    assert_eq!(game.hard_drop(), Ok(18));
    let pose = game.active();
    assert!(game.is_grounded());

    assert_eq!(game.hard_drop(), Ok(0));
    assert_eq!(game.active(), pose);
    assert_eq!(game.pieces_locked(), 0);
}

#[test]
fn test_blocked_move_leaves_pose_unchanged() {
    let mut game = GameState::new(GameConfig {
        spawn: SpawnPolicy::Left,
        ..GameConfig::default()
    })
    .unwrap();
    let before = game.active();
    assert_eq!(before.x, 0);
    assert_eq!(game.move_piece(-1, 0), Ok(false));
    assert_eq!(game.move_piece(0, -1), Ok(false));
    assert_eq!(game.active(), before);

    assert_eq!(game.move_piece(1, 0), Ok(true));
    assert_eq!(game.active().x, 1);
}

#[test]
fn test_rotation_rejected_without_kicks() {
    let mut game = game_with_active(PieceKind::I, 20, 10);
    let x = game.active().x;
    game.board_mut().set(x, 2, Some(PieceKind::O));

    let before = game.active();
    assert_eq!(game.rotate_piece(), Ok(false));
    assert_eq!(game.rotate_piece_ccw(), Ok(false));
    assert_eq!(game.active(), before);
}

#[test]
fn test_scoring_table_for_line_clears() {
    for lines in 0..=4usize {
        let mut game = game_with_active(PieceKind::I, 6, 4);
        let mut rows = vec![vec![0u8; 4]; 6];
        for row in rows.iter_mut().skip(6 - lines) {
            *row = vec![0, 5, 5, 5];
        }
        game.board_mut().set_state(&rows).unwrap();

        let outcome = game.place(1, 0).unwrap().unwrap();
        assert_eq!(outcome.lines_cleared, lines as u32);
        assert!(!outcome.game_over);
        assert_eq!(game.score(), LINE_SCORES[lines]);
        assert_eq!(game.lines(), lines as u32);
        assert_eq!(outcome.reward(), (lines * lines) as i32);
    }
}

#[test]
fn test_reward_function() {
    let game = GameState::new(GameConfig::default()).unwrap();
    assert_eq!(game.calculate_reward(0, false), 0);
    assert_eq!(game.calculate_reward(1, false), 1);
    assert_eq!(game.calculate_reward(2, false), 4);
    assert_eq!(game.calculate_reward(4, false), 16);
    assert_eq!(game.calculate_reward(3, true), -10);
}

#[test]
fn test_lock_spawns_next_from_queue() {
    let mut game = GameState::new(GameConfig::default()).unwrap();
    let next = game.next_kind();
    game.hard_drop().unwrap();
    let outcome = game.lock_piece().unwrap();

    assert_eq!(outcome.lines_cleared, 0);
    assert_eq!(game.active().kind, next);
    assert_eq!(game.active().y, 0);
    assert_eq!(game.pieces_locked(), 1);
    assert_eq!(game.piece_queue().len(), 2);
}

#[test]
fn test_game_over_is_terminal_until_reset() {
    let mut game = GameState::new(config(4, 4)).unwrap();
    let mut last = None;
    for _ in 0..100 {
        game.hard_drop().unwrap();
        last = Some(game.lock_piece().unwrap());
        if game.game_over() {
            break;
        }
    }
    assert!(game.game_over());
    assert_eq!(last.map(|o| o.reward()), Some(-10));
    assert_eq!(game.lock_piece(), Err(CoreError::GameOver));

    assert_eq!(game.move_piece(1, 0), Err(CoreError::GameOver));
    assert_eq!(game.rotate_piece_ccw(), Err(CoreError::GameOver));
    assert_eq!(game.hard_drop(), Err(CoreError::GameOver));
    assert!(!game.snapshot().playable());

    game.reset();
    assert!(!game.game_over());
    assert!(game.board().is_empty());
    assert_eq!((game.score(), game.lines(), game.pieces_locked()), (0, 0, 0));
}

#[test]
fn test_same_seed_same_game() {
    for randomizer in [RandomizerKind::Bag, RandomizerKind::Uniform] {
        let cfg = GameConfig {
            randomizer,
            seed: 42,
            ..GameConfig::default()
        };
        let mut a = GameState::new(cfg).unwrap();
        let mut b = GameState::new(cfg).unwrap();
        for _ in 0..30 {
            if a.game_over() {
                break;
            }
            let pa = a.placements();
            let pb = b.placements();
            assert_eq!(pa, pb);
            let pick = pa[pa.len() / 2];
            a.place(pick.rotation, pick.x).unwrap();
            b.place(pick.rotation, pick.x).unwrap();
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }
}

#[test]
fn test_reset_with_seed_replays_first_piece() {
    let mut game = GameState::new(GameConfig {
        seed: 5,
        ..GameConfig::default()
    })
    .unwrap();
    let first = (game.active().kind, game.next_kind());

    game.hard_drop().unwrap();
    game.lock_piece().unwrap();
    game.reset_with_seed(5);
    assert_eq!((game.active().kind, game.next_kind()), first);
}

#[test]
fn test_place_matches_enumerated_outcome() {
    let mut game = GameState::new(GameConfig::default()).unwrap();
    let placements = game.placements();
    let target = placements[placements.len() - 1];

    let outcome = game.place(target.rotation, target.x).unwrap().unwrap();
    assert_eq!(outcome.lines_cleared, target.lines_cleared);
    assert_eq!(game.board().features(outcome.lines_cleared), target.features);
}

#[test]
fn test_snapshot_is_detached() {
    let mut game = GameState::new(GameConfig::default()).unwrap();
    let snapshot = game.snapshot();
    game.hard_drop().unwrap();
    game.lock_piece().unwrap();

    assert!(snapshot.board.iter().flatten().all(|&t| t == 0));
    assert_eq!(snapshot.score, 0);
    assert!(snapshot.playable());
}

#[test]
fn test_invalid_dimensions_rejected() {
    assert!(matches!(
        GameState::new(config(0, 10)),
        Err(CoreError::InvalidDimensions { .. })
    ));
}
