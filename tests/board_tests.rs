//! Board and collision tests

use blockfall::core::pieces::{template, Shape};
use blockfall::core::{collides, Board};
use blockfall::types::{Color, PieceKind, BOARD_COLS, BOARD_ROWS};

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!((board.rows(), board.cols()), (BOARD_ROWS, BOARD_COLS));
    assert_eq!(board.cells().len(), BOARD_ROWS * BOARD_COLS);
    for row in 0..BOARD_ROWS {
        for col in 0..BOARD_COLS {
            assert_eq!(board.get(row, col), None, "({row}, {col})");
        }
    }
}

#[test]
fn test_clear_row_compacts_from_top() {
    let mut board = Board::from_ascii(&["#...", ".#..", "####", "..#."], Color::GREEN);
    board.clear_row(2);

    let expected = Board::from_ascii(&["....", "#...", ".#..", "..#."], Color::GREEN);
    assert_eq!(board, expected);
}

#[test]
fn test_clear_top_row() {
    let mut board = Board::from_ascii(&["####", "#..."], Color::GREEN);
    board.clear_row(0);
    assert_eq!(board, Board::from_ascii(&["....", "#..."], Color::GREEN));
}

#[test]
#[should_panic(expected = "outside")]
fn test_row_out_of_range_panics() {
    Board::default().clear_row(BOARD_ROWS);
}

#[test]
fn test_collides_on_every_side_but_top() {
    let board = Board::default();
    let i = template(PieceKind::I);
    let tall = i.rotated_cw();

    assert!(!collides(&board, &i, 6, 19));
    assert!(collides(&board, &i, 7, 19), "right wall");
    assert!(collides(&board, &i, -1, 0), "left wall");
    assert!(collides(&board, &tall, 0, 17), "floor");
    assert!(!collides(&board, &tall, 0, -3), "above the top");
}

#[test]
fn test_collides_with_locked_cells() {
    let mut board = Board::default();
    board.fill(10, 5, Color::RED);
    let dot = Shape::from_rows(&[&[1]]);

    assert!(collides(&board, &dot, 5, 10));
    assert!(!collides(&board, &dot, 4, 10));
    assert!(!collides(&board, &dot, 5, 9));
}

#[test]
fn test_collision_ignores_locked_cells_under_empty_shape_cells() {
    // S: .##
    //    ##.
    let mut board = Board::default();
    board.fill(0, 0, Color::RED);
    board.fill(1, 2, Color::RED);
    assert!(!collides(&board, &template(PieceKind::S), 0, 0));
}
