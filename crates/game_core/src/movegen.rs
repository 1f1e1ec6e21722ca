use crate::board::Board;
use crate::types::*;

/// Candidate destinations for one piece on the current board.
///
/// Pure function of board and piece; every returned square is on the
/// board and not occupied by a same-team piece. A piece with nowhere to
/// go yields an empty vector.
///
/// Moves that leave the mover's own king capturable are NOT filtered
/// out; the game ends on the actual capture of the king.
pub fn candidate_moves(board: &Board, piece: Piece) -> Vec<Square> {
    let mut out = Vec::with_capacity(16);
    match piece.kind {
        PieceKind::Pawn => gen_pawn(board, piece, &mut out),
        PieceKind::Knight => gen_offsets(
            board,
            piece,
            &mut out,
            &[
                (1, 2),
                (2, 1),
                (-1, 2),
                (-2, 1),
                (1, -2),
                (2, -1),
                (-1, -2),
                (-2, -1),
            ],
        ),
        PieceKind::Bishop => gen_slider(
            board,
            piece,
            &mut out,
            &[(1, 1), (1, -1), (-1, 1), (-1, -1)],
        ),
        PieceKind::Rook => gen_slider(
            board,
            piece,
            &mut out,
            &[(1, 0), (-1, 0), (0, 1), (0, -1)],
        ),
        PieceKind::Queen => gen_slider(
            board,
            piece,
            &mut out,
            &[
                (1, 1),
                (1, -1),
                (-1, 1),
                (-1, -1),
                (1, 0),
                (-1, 0),
                (0, 1),
                (0, -1),
            ],
        ),
        PieceKind::King => gen_offsets(
            board,
            piece,
            &mut out,
            &[
                (1, 1),
                (1, 0),
                (1, -1),
                (0, 1),
                (0, -1),
                (-1, 1),
                (-1, 0),
                (-1, -1),
            ],
        ),
    }
    out
}

fn gen_pawn(board: &Board, piece: Piece, out: &mut Vec<Square>) {
    let from = piece.position;
    let dir = piece.team.forward();
    let start_rank = piece.team.home_rank() + dir;

    // forward 1, then 2 from the start rank, both into empty squares
    if let Some(to) = from.offset(0, dir) {
        if board.piece_at(to).is_none() {
            out.push(to);
            if from.rank == start_rank {
                if let Some(to2) = from.offset(0, 2 * dir) {
                    if board.piece_at(to2).is_none() {
                        out.push(to2);
                    }
                }
            }
        }
    }

    // diagonal captures onto enemy-occupied squares only
    for df in [-1, 1] {
        if let Some(to) = from.offset(df, dir) {
            if let Some(target) = board.piece_at(to) {
                if target.team != piece.team {
                    out.push(to);
                }
            }
        }
    }
}

fn gen_offsets(board: &Board, piece: Piece, out: &mut Vec<Square>, deltas: &[(i8, i8)]) {
    for &(df, dr) in deltas {
        if let Some(to) = piece.position.offset(df, dr) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.team != piece.team => out.push(to),
                _ => {}
            }
        }
    }
}

fn gen_slider(board: &Board, piece: Piece, out: &mut Vec<Square>, dirs: &[(i8, i8)]) {
    for &(df, dr) in dirs {
        let mut cur = piece.position.offset(df, dr);
        while let Some(to) = cur {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.team != piece.team => {
                    out.push(to);
                    break;
                }
                _ => break,
            }
            cur = to.offset(df, dr);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
