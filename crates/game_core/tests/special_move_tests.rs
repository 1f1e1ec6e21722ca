//! End-to-end tests for special moves driven through the session:
//! en passant, castling, and promotion, plus the listener seam.

use std::sync::{Arc, Mutex};

use game_core::{
    Board, GameSession, PieceKind, SessionListener, SpecialMove, Square, Team,
};

fn sq(c: &str) -> Square {
    Square::from_coord(c).unwrap()
}

fn play(session: &mut GameSession, from: &str, to: &str) {
    session
        .select_piece(sq(from))
        .unwrap_or_else(|| panic!("cannot select {from}"));
    session
        .commit_move(sq(to))
        .unwrap_or_else(|e| panic!("cannot commit {from}->{to}: {e}"));
}

// =============================================================================
// En passant
// =============================================================================

#[test]
fn en_passant_full_flow_from_the_starting_position() {
    let mut session = GameSession::new();
    play(&mut session, "e2", "e4");
    play(&mut session, "a7", "a6");
    play(&mut session, "e4", "e5");
    play(&mut session, "d7", "d5"); // double push lands beside e5

    let selection = session.select_piece(sq("e5")).unwrap();
    assert_eq!(selection.special, SpecialMove::EnPassant);
    assert!(selection.candidates.contains(&sq("d6")));

    let outcome = session.commit_move(sq("d6")).unwrap();
    assert_eq!(outcome.special, SpecialMove::EnPassant);
    assert_eq!(outcome.captured.map(|p| p.position), Some(sq("d5")));

    // The pawn taken sat on d5, not on the destination square.
    assert!(session.piece_at(sq("d5")).is_none());
    assert_eq!(
        session.piece_at(sq("d6")).map(|p| (p.kind, p.team)),
        Some((PieceKind::Pawn, Team::White))
    );
    let dead = session.captured(Team::Black);
    assert_eq!(dead.len(), 1);
    assert_eq!(dead[0].kind, PieceKind::Pawn);
    assert_eq!(session.current_turn(), Team::Black);
}

#[test]
fn declining_en_passant_keeps_the_bypassed_pawn() {
    let mut session = GameSession::new();
    play(&mut session, "e2", "e4");
    play(&mut session, "a7", "a6");
    play(&mut session, "e4", "e5");
    play(&mut session, "d7", "d5");

    let selection = session.select_piece(sq("e5")).unwrap();
    assert_eq!(selection.special, SpecialMove::EnPassant);

    // Push straight ahead instead of capturing.
    session.commit_move(sq("e6")).unwrap();
    assert!(session.piece_at(sq("d5")).is_some(), "bypassed pawn vanished");
    assert!(session.captured(Team::Black).is_empty());
}

#[test]
fn en_passant_window_closes_after_one_move() {
    let mut session = GameSession::new();
    play(&mut session, "e2", "e4");
    play(&mut session, "a7", "a6");
    play(&mut session, "e4", "e5");
    play(&mut session, "d7", "d5");
    play(&mut session, "h2", "h3"); // white waits
    play(&mut session, "a6", "a5"); // black moves on

    let selection = session.select_piece(sq("e5")).unwrap();
    assert_eq!(selection.special, SpecialMove::None);
    assert!(!selection.candidates.contains(&sq("d6")));
}

// =============================================================================
// Castling
// =============================================================================

#[test]
fn king_side_castle_moves_king_and_rook_together() {
    let board = Board::from_layout("r3k2r/8/8/8/8/8/8/R3K2R");
    let mut session = GameSession::with_board(board, Team::White);

    let selection = session.select_piece(sq("e1")).unwrap();
    assert_eq!(selection.special, SpecialMove::Castling);

    let outcome = session.commit_move(sq("g1")).unwrap();
    assert_eq!(outcome.special, SpecialMove::Castling);

    assert_eq!(
        session.piece_at(sq("g1")).map(|p| p.kind),
        Some(PieceKind::King)
    );
    assert_eq!(
        session.piece_at(sq("f1")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert!(session.piece_at(sq("e1")).is_none());
    assert!(session.piece_at(sq("h1")).is_none());
    assert_eq!(session.current_turn(), Team::Black);
    assert_eq!(session.history().len(), 1, "castle is one history entry");
}

#[test]
fn queen_side_castle_for_black() {
    let board = Board::from_layout("r3k2r/8/8/8/8/8/8/R3K2R");
    let mut session = GameSession::with_board(board, Team::Black);

    session.select_piece(sq("e8")).unwrap();
    session.commit_move(sq("c8")).unwrap();

    assert_eq!(
        session.piece_at(sq("c8")).map(|p| p.kind),
        Some(PieceKind::King)
    );
    assert_eq!(
        session.piece_at(sq("d8")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert!(session.piece_at(sq("a8")).is_none());
}

#[test]
fn ordinary_king_step_under_castling_classification_leaves_rooks_alone() {
    let board = Board::from_layout("8/8/8/8/8/8/8/R3K2R");
    let mut session = GameSession::with_board(board, Team::White);

    let selection = session.select_piece(sq("e1")).unwrap();
    assert_eq!(selection.special, SpecialMove::Castling);

    session.commit_move(sq("e2")).unwrap();
    assert_eq!(
        session.piece_at(sq("h1")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert_eq!(
        session.piece_at(sq("a1")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
}

#[test]
fn castling_rights_do_not_return_with_the_king() {
    // A black rook shuttles on h8/h7 so the white king can leave home
    // and come back.
    let board = Board::from_layout("7r/8/8/8/8/8/8/R3K2R");
    let mut session = GameSession::with_board(board, Team::White);
    play(&mut session, "e1", "e2");
    play(&mut session, "h8", "h7");
    play(&mut session, "e2", "e1");
    play(&mut session, "h7", "h8");

    let selection = session.select_piece(sq("e1")).unwrap();
    assert_eq!(selection.special, SpecialMove::None);
    assert!(!selection.candidates.contains(&sq("g1")));
    assert!(!selection.candidates.contains(&sq("c1")));
}

// =============================================================================
// Promotion
// =============================================================================

#[test]
fn pawn_reaching_the_far_rank_becomes_a_queen() {
    let board = Board::from_layout("8/4P3/8/8/8/8/8/8");
    let mut session = GameSession::with_board(board, Team::White);

    let selection = session.select_piece(sq("e7")).unwrap();
    assert_eq!(selection.special, SpecialMove::Promotion);

    let outcome = session.commit_move(sq("e8")).unwrap();
    assert_eq!(outcome.special, SpecialMove::Promotion);
    assert_eq!(
        session.piece_at(sq("e8")).map(|p| p.kind),
        Some(PieceKind::Queen)
    );
}

#[test]
fn capture_promotion_takes_and_promotes() {
    let board = Board::from_layout("3r4/4P3/8/8/8/8/8/8");
    let mut session = GameSession::with_board(board, Team::White);

    session.select_piece(sq("e7")).unwrap();
    let outcome = session.commit_move(sq("d8")).unwrap();

    assert_eq!(outcome.captured.map(|p| p.kind), Some(PieceKind::Rook));
    assert_eq!(
        session.piece_at(sq("d8")).map(|p| p.kind),
        Some(PieceKind::Queen)
    );
    assert_eq!(session.captured(Team::Black).len(), 1);
    assert_eq!(session.record().moves[0].notation, "exd8=Q");
}

#[test]
fn black_pawn_promotes_on_rank_one() {
    let board = Board::from_layout("8/8/8/8/8/8/4p3/8");
    let mut session = GameSession::with_board(board, Team::Black);

    play(&mut session, "e2", "e1");
    assert_eq!(
        session.piece_at(sq("e1")).map(|p| (p.kind, p.team)),
        Some((PieceKind::Queen, Team::Black))
    );
}

// =============================================================================
// Listener seam
// =============================================================================

#[derive(Default)]
struct EventTally {
    moved: usize,
    captured: usize,
    promoted: usize,
    checkmates: Vec<Team>,
    resets: usize,
}

#[derive(Clone, Default)]
struct TallyListener(Arc<Mutex<EventTally>>);

impl SessionListener for TallyListener {
    fn piece_moved(&mut self, _from: Square, _to: Square) {
        self.0.lock().unwrap().moved += 1;
    }
    fn piece_captured(&mut self, _piece: game_core::Piece, _by: Team) {
        self.0.lock().unwrap().captured += 1;
    }
    fn piece_promoted(&mut self, _at: Square, _kind: PieceKind) {
        self.0.lock().unwrap().promoted += 1;
    }
    fn checkmate(&mut self, winner: Team) {
        self.0.lock().unwrap().checkmates.push(winner);
    }
    fn session_reset(&mut self) {
        self.0.lock().unwrap().resets += 1;
    }
}

#[test]
fn listener_hears_each_event_once() {
    let tally = TallyListener::default();
    let board = Board::from_layout("4k3/8/8/8/8/8/8/4R3");
    let mut session = GameSession::with_board(board, Team::White);
    session.set_listener(Box::new(tally.clone()));

    session.select_piece(sq("e1")).unwrap();
    session.commit_move(sq("e8")).unwrap();
    session.reset();

    let t = tally.0.lock().unwrap();
    assert_eq!(t.moved, 1);
    assert_eq!(t.captured, 1);
    assert_eq!(t.checkmates, vec![Team::White]);
    assert_eq!(t.resets, 1);
    assert_eq!(t.promoted, 0);
}

#[test]
fn rejected_commit_stays_silent() {
    let tally = TallyListener::default();
    let mut session = GameSession::new();
    session.set_listener(Box::new(tally.clone()));

    session.select_piece(sq("e2"));
    assert!(session.commit_move(sq("e5")).is_err());

    let t = tally.0.lock().unwrap();
    assert_eq!(t.moved, 0);
    assert_eq!(t.captured, 0);
}

#[test]
fn castle_reports_both_piece_movements() {
    let tally = TallyListener::default();
    let board = Board::from_layout("8/8/8/8/8/8/8/R3K2R");
    let mut session = GameSession::with_board(board, Team::White);
    session.set_listener(Box::new(tally.clone()));

    session.select_piece(sq("e1")).unwrap();
    session.commit_move(sq("g1")).unwrap();

    assert_eq!(tally.0.lock().unwrap().moved, 2, "king and rook");
}
