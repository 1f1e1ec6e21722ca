use super::*;

fn sq(c: &str) -> Square {
    Square::from_coord(c).unwrap()
}

fn moves_from(board: &Board, c: &str) -> Vec<Square> {
    let piece = board.piece_at(sq(c)).expect("no piece on test square");
    candidate_moves(board, piece)
}

#[test]
fn pawn_start_has_single_and_double_push() {
    let board = Board::standard();
    let moves = moves_from(&board, "e2");
    assert_eq!(moves.len(), 2);
    assert!(moves.contains(&sq("e3")));
    assert!(moves.contains(&sq("e4")));
}

#[test]
fn pawn_double_push_needs_both_squares_empty() {
    // Blocker on e3: no pushes at all.
    let board = Board::from_layout("8/8/8/8/8/4n3/4P3/8");
    assert!(moves_from(&board, "e2").is_empty());

    // Blocker on e4 only: single push remains.
    let board = Board::from_layout("8/8/8/8/4n3/8/4P3/8");
    assert_eq!(moves_from(&board, "e2"), vec![sq("e3")]);
}

#[test]
fn pawn_captures_diagonally_only_onto_enemies() {
    // White pawn e4; black pawn d5, white knight f5.
    let board = Board::from_layout("8/8/8/3pN3/4P3/8/8/8");
    let moves = moves_from(&board, "e4");
    assert!(moves.contains(&sq("d5")), "enemy capture missing");
    assert!(!moves.contains(&sq("f5")), "own piece offered as capture");
    assert!(moves.contains(&sq("e5")));
}

#[test]
fn black_pawn_moves_down_the_board() {
    let board = Board::standard();
    let moves = moves_from(&board, "d7");
    assert!(moves.contains(&sq("d6")));
    assert!(moves.contains(&sq("d5")));
}

#[test]
fn knight_jumps_and_respects_own_pieces() {
    let board = Board::standard();
    let moves = moves_from(&board, "g1");
    // f3 and h3 open; e2 blocked by own pawn.
    assert_eq!(moves.len(), 2);
    assert!(moves.contains(&sq("f3")));
    assert!(moves.contains(&sq("h3")));
}

#[test]
fn rook_stops_at_first_blocker_on_each_ray() {
    // Rook d4, enemy pawn d6, friendly pawn f4.
    let board = Board::from_layout("8/8/3p4/8/3R1P2/8/8/8");
    let moves = moves_from(&board, "d4");
    assert!(moves.contains(&sq("d5")));
    assert!(moves.contains(&sq("d6")), "capture square ends the ray");
    assert!(!moves.contains(&sq("d7")), "ray continued past blocker");
    assert!(moves.contains(&sq("e4")));
    assert!(!moves.contains(&sq("f4")), "own piece is not a destination");
    assert!(!moves.contains(&sq("g4")));
}

#[test]
fn bishop_covers_open_diagonals() {
    let board = Board::from_layout("8/8/8/8/3B4/8/8/8");
    let moves = moves_from(&board, "d4");
    assert_eq!(moves.len(), 13);
    assert!(moves.contains(&sq("a1")));
    assert!(moves.contains(&sq("h8")));
    assert!(moves.contains(&sq("a7")));
    assert!(moves.contains(&sq("g1")));
}

#[test]
fn queen_is_rook_plus_bishop() {
    let board = Board::from_layout("8/8/8/8/3Q4/8/8/8");
    assert_eq!(moves_from(&board, "d4").len(), 27);
}

#[test]
fn king_steps_one_square() {
    let board = Board::from_layout("8/8/8/8/3K4/8/8/8");
    let moves = moves_from(&board, "d4");
    assert_eq!(moves.len(), 8);

    let board = Board::from_layout("8/8/8/8/8/8/8/K7");
    assert_eq!(moves_from(&board, "a1").len(), 3);
}

#[test]
fn all_candidates_in_bounds_and_never_own_team() {
    let board = Board::standard();
    for piece in board.pieces().collect::<Vec<_>>() {
        for to in candidate_moves(&board, piece) {
            assert!(Square::new(to.file, to.rank).is_some());
            if let Some(target) = board.piece_at(to) {
                assert_ne!(target.team, piece.team, "{piece:?} may land on own piece");
            }
        }
    }
}

#[test]
fn self_check_is_not_filtered() {
    // White king e1, white rook e2 pinned by black rook e8. The pinned
    // rook still reports sideways moves; king capture ends the game
    // instead of pin enforcement.
    let board = Board::from_layout("4r3/8/8/8/8/8/4R3/4K3");
    let moves = moves_from(&board, "e2");
    assert!(moves.contains(&sq("a2")), "pinned piece should still move");
}
