//! Board tests - grid, collision, placement, line clears, and features

use rl_tetris::core::{Board, CoreError, Piece};
use rl_tetris::types::PieceKind;

fn board() -> Board {
    Board::new(20, 10).unwrap()
}

#[test]
fn test_board_new_empty() {
    let board = board();
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);

    for y in 0..20 {
        for x in 0..10 {
            assert!(board.is_free(x, y), "Cell ({}, {}) should be free", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
    assert!(board.is_empty());
}

#[test]
fn test_board_rejects_non_positive_dimensions() {
    assert!(matches!(
        Board::new(0, 0),
        Err(CoreError::InvalidDimensions { .. })
    ));
    assert!(Board::new(1, 1).is_ok());
}

#[test]
fn test_board_get_set_out_of_bounds() {
    let mut board = board();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(10, 0), None);
    assert_eq!(board.get(0, 20), None);

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, 20, Some(PieceKind::T)));
    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert!(board.is_occupied(5, 10));
    assert!(!board.is_occupied(-1, 0));
}

#[test]
fn test_reset_empties_board() {
    let mut board = board();
    for x in 0..10 {
        board.set(x, 5, Some(PieceKind::T));
    }
    board.reset();
    assert!(board.is_empty());
}

#[test]
fn test_collision_bounds_and_overlap() {
    let mut board = Board::new(6, 5).unwrap();
    let o = Piece::new(PieceKind::O, 0, 0);

    assert!(!board.check_collision(&o, 0, 0));
    assert!(!board.check_collision(&o, 3, 4));
    assert!(board.check_collision(&o, -1, 0));
    assert!(board.check_collision(&o, 4, 0));
    assert!(board.check_collision(&o, 0, 5));
    assert!(board.check_collision(&o, 0, -1));

    board.set(2, 3, Some(PieceKind::Z));
    assert!(board.check_collision(&o, 1, 2));
    assert!(board.check_collision(&o, 2, 3));
    assert!(!board.check_collision(&o, 3, 3));
}

#[test]
fn test_empty_shape_cells_never_collide() {
    // T spawn shape leaves (0,0) and (2,0) of its bounding box empty.
    let mut board = Board::new(4, 4).unwrap();
    board.set(0, 0, Some(PieceKind::I));
    board.set(2, 0, Some(PieceKind::I));
    let t = Piece::new(PieceKind::T, 0, 0);
    assert!(!board.check_collision(&t, 0, 0));
}

#[test]
fn test_place_piece_tags_cells() {
    let mut board = board();
    let piece = Piece::new(PieceKind::O, 3, 5);
    board.place_piece(&piece, 3, 5);

    assert_eq!(board.get(3, 5), Some(Some(PieceKind::O)));
    assert_eq!(board.get(4, 5), Some(Some(PieceKind::O)));
    assert_eq!(board.get(3, 6), Some(Some(PieceKind::O)));
    assert_eq!(board.get(4, 6), Some(Some(PieceKind::O)));
    assert_eq!(board.state()[5][3], PieceKind::O.tag());
}

#[test]
fn test_board_is_row_full() {
    let mut board = board();
    assert!(!board.is_row_full(5));

    for x in 0..10 {
        board.set(x, 5, Some(PieceKind::T));
    }
    assert!(board.is_row_full(5));

    for x in 0..9 {
        board.set(x, 6, Some(PieceKind::I));
    }
    assert!(!board.is_row_full(6));
    assert!(!board.is_row_full(100));
}

#[test]
fn test_single_row_clear_shifts_rows_above() {
    let width = 6;
    let mut board = Board::new(5, width).unwrap();
    for x in 0..(width as i32 - 1) {
        board.set(x, 4, Some(PieceKind::T));
    }
    board.set(1, 3, Some(PieceKind::S));
    board.set(4, 2, Some(PieceKind::Z));

    // Vertical I fills the last gap of row 4 and rows 1..=3 of column 5.
    let mut i = Piece::new(PieceKind::I, 5, 1);
    i.rotate_clockwise();
    assert!(!board.check_collision(&i, 5, 1));
    board.place_piece(&i, 5, 1);

    assert_eq!(board.clear_full_rows(), 1);
    assert_eq!(
        board.state(),
        vec![
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 2],
            vec![0, 0, 0, 0, 4, 2],
            vec![0, 3, 0, 0, 0, 2],
        ]
    );
}

#[test]
fn test_board_clear_multiple_rows_order() {
    let mut board = board();

    for x in 0..10 {
        board.set(x, 5, Some(PieceKind::T));
        board.set(x, 10, Some(PieceKind::I));
        board.set(x, 15, Some(PieceKind::O));
    }

    board.set(0, 4, Some(PieceKind::J));
    board.set(0, 9, Some(PieceKind::L));
    board.set(0, 14, Some(PieceKind::S));

    assert_eq!(board.clear_full_rows(), 3);

    // Every surviving row drops by the number of cleared rows below it.
    assert_eq!(board.get(0, 7), Some(Some(PieceKind::J)));
    assert_eq!(board.get(0, 11), Some(Some(PieceKind::L)));
    assert_eq!(board.get(0, 15), Some(Some(PieceKind::S)));
    for y in 0..3 {
        assert!((0..10).all(|x| board.get(x, y) == Some(None)));
    }
}

#[test]
fn test_clear_with_no_full_rows_is_noop() {
    let mut board = board();
    board.set(3, 19, Some(PieceKind::L));
    let before = board.clone();
    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_features_on_known_board() {
    let mut board = Board::new(5, 4).unwrap();
    board
        .set_state(&[
            vec![0, 0, 0, 0],
            vec![0, 5, 0, 0],
            vec![0, 0, 0, 0],
            vec![1, 5, 0, 3],
            vec![1, 0, 0, 3],
        ])
        .unwrap();

    assert_eq!(board.column_heights(), vec![2, 4, 0, 2]);
    assert_eq!(board.holes(), 2);
    assert_eq!(board.bumpiness_and_height(), (8, 8));

    let features = board.features(1);
    assert_eq!(features.to_array(), [1.0, 2.0, 8.0, 8.0]);
}

#[test]
fn test_state_snapshot_is_independent() {
    let mut board = board();
    board.set(0, 19, Some(PieceKind::J));
    let snapshot = board.state();

    board.set(1, 19, Some(PieceKind::L));
    assert_eq!(snapshot[19][1], 0);

    let mut restored = Board::new(20, 10).unwrap();
    restored.set_state(&snapshot).unwrap();
    assert_eq!(restored.get(0, 19), Some(Some(PieceKind::J)));
    assert_eq!(restored.get(1, 19), Some(None));
}

#[test]
fn test_clone_is_deep() {
    let board = board();
    let mut copy = board.clone();
    copy.set(0, 0, Some(PieceKind::O));
    assert!(board.is_empty());
}
