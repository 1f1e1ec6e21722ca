use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::history::History;
use crate::types::*;

/// Classification of the special rule a selection may trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialMove {
    #[default]
    None,
    EnPassant,
    Castling,
    Promotion,
}

/// Classify the selected piece against the board and move history,
/// appending any rule-granted destinations to `candidates`.
///
/// Runs once per selection, before a destination is chosen. At most one
/// classification applies: en passant and promotion cannot coincide
/// (they require different pawn ranks), and only kings castle.
pub fn classify(
    board: &Board,
    history: &History,
    piece: Piece,
    candidates: &mut Vec<Square>,
) -> SpecialMove {
    match piece.kind {
        PieceKind::Pawn => {
            if let Some(target) = en_passant_target(board, history, piece) {
                candidates.push(target);
                return SpecialMove::EnPassant;
            }
            if candidates
                .iter()
                .any(|sq| sq.rank == piece.team.promotion_rank())
            {
                return SpecialMove::Promotion;
            }
            SpecialMove::None
        }
        PieceKind::King => {
            let mut any = false;
            for to in castle_destinations(board, history, piece) {
                candidates.push(to);
                any = true;
            }
            if any {
                SpecialMove::Castling
            } else {
                SpecialMove::None
            }
        }
        _ => SpecialMove::None,
    }
}

/// En passant: the last committed move was a two-square pawn advance by
/// the enemy, ending on the selected pawn's rank one file away. The
/// capture square is the one directly behind that pawn.
fn en_passant_target(board: &Board, history: &History, pawn: Piece) -> Option<Square> {
    let last = history.last()?;
    let neighbor = board.piece_at(last.to)?;
    if neighbor.team == pawn.team || neighbor.kind != PieceKind::Pawn {
        return None;
    }
    if last.from.file != last.to.file || (last.from.rank - last.to.rank).abs() != 2 {
        return None;
    }
    if last.to.rank != pawn.position.rank || (last.to.file - pawn.position.file).abs() != 1 {
        return None;
    }
    last.to.offset(0, pawn.team.forward())
}

/// Castling destinations for a king that has never left its home
/// square: standard semantics, with never-moved rights derived from the
/// history log.
fn castle_destinations(board: &Board, history: &History, king: Piece) -> Vec<Square> {
    let mut out = Vec::new();
    let rank = king.team.home_rank();
    let home = Square { file: 4, rank };
    if king.position != home || history.has_departed(home) {
        return out;
    }
    // Cannot castle out of check.
    let enemy = king.team.other();
    if board.is_square_attacked(home, enemy) {
        return out;
    }

    // King side: rook on the h-file, f and g empty and not attacked.
    if rook_ready(board, history, king.team, Square { file: 7, rank })
        && path_clear(board, rank, &[5, 6])
        && !board.is_square_attacked(Square { file: 5, rank }, enemy)
        && !board.is_square_attacked(Square { file: 6, rank }, enemy)
    {
        out.push(Square { file: 6, rank });
    }
    // Queen side: rook on the a-file, b/c/d empty, c and d not attacked.
    if rook_ready(board, history, king.team, Square { file: 0, rank })
        && path_clear(board, rank, &[1, 2, 3])
        && !board.is_square_attacked(Square { file: 2, rank }, enemy)
        && !board.is_square_attacked(Square { file: 3, rank }, enemy)
    {
        out.push(Square { file: 2, rank });
    }
    out
}

fn rook_ready(board: &Board, history: &History, team: Team, corner: Square) -> bool {
    match board.piece_at(corner) {
        Some(pc) => pc.team == team && pc.kind == PieceKind::Rook && !history.has_departed(corner),
        None => false,
    }
}

fn path_clear(board: &Board, rank: i8, files: &[i8]) -> bool {
    files
        .iter()
        .all(|&file| board.piece_at(Square { file, rank }).is_none())
}

#[cfg(test)]
#[path = "special_tests.rs"]
mod special_tests;
