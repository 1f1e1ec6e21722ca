//! Text rendering of the session board, with candidate highlighting.

use game_core::{GameSession, Piece, PieceKind, Square, Team};

use crate::config::DisplayConfig;

fn piece_glyph(piece: Piece, unicode: bool) -> char {
    if !unicode {
        let c = piece.kind_letter();
        return if piece.team == Team::White {
            c
        } else {
            c.to_ascii_lowercase()
        };
    }
    match (piece.team, piece.kind) {
        (Team::White, PieceKind::King) => '♔',
        (Team::White, PieceKind::Queen) => '♕',
        (Team::White, PieceKind::Rook) => '♖',
        (Team::White, PieceKind::Bishop) => '♗',
        (Team::White, PieceKind::Knight) => '♘',
        (Team::White, PieceKind::Pawn) => '♙',
        (Team::Black, PieceKind::King) => '♚',
        (Team::Black, PieceKind::Queen) => '♛',
        (Team::Black, PieceKind::Rook) => '♜',
        (Team::Black, PieceKind::Bishop) => '♝',
        (Team::Black, PieceKind::Knight) => '♞',
        (Team::Black, PieceKind::Pawn) => '♟',
    }
}

/// Render the board rank by rank, marking the current selection's
/// candidate destinations.
pub fn board_to_string(session: &GameSession, config: &DisplayConfig) -> String {
    let candidates: Vec<Square> = session
        .selection()
        .map(|sel| sel.candidates.clone())
        .unwrap_or_default();
    let flipped = config.flip_for_black && session.current_turn() == Team::Black;

    let mut out = String::new();
    for row in 0..8 {
        let rank = if flipped { row } else { 7 - row };
        if config.show_coordinates {
            out.push((b'1' + rank as u8) as char);
            out.push(' ');
        }
        for col in 0..8 {
            let file = if flipped { 7 - col } else { col };
            let sq = Square::new(file, rank).expect("grid iteration stays on board");
            let glyph = match session.piece_at(sq) {
                Some(piece) => piece_glyph(piece, config.unicode_pieces),
                None if candidates.contains(&sq) => config.candidate_marker,
                None => '.',
            };
            out.push(glyph);
            out.push(' ');
        }
        out.push('\n');
    }
    if config.show_coordinates {
        out.push_str("  ");
        for col in 0..8 {
            let file = if flipped { 7 - col } else { col };
            out.push((b'a' + file as u8) as char);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// One line per captured piece set, in capture order.
pub fn captured_to_string(session: &GameSession, config: &DisplayConfig) -> String {
    let mut out = String::new();
    for team in [Team::White, Team::Black] {
        let dead = session.captured(team);
        out.push_str(&format!("{team}: "));
        if dead.is_empty() {
            out.push('-');
        } else {
            for piece in dead {
                out.push(piece_glyph(*piece, config.unicode_pieces));
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}
