//! Annotated game record: a human-readable move list kept alongside the
//! raw history, serializable to JSON for post-game storage.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::board::Board;
use crate::special::SpecialMove;
use crate::types::*;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to read or write record file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed record: {0}")]
    Format(#[from] serde_json::Error),
}

/// One annotated move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedMove {
    pub from: Square,
    pub to: Square,
    /// Algebraic-style label ("e4", "Nxe5", "O-O", "e8=Q").
    pub notation: String,
}

/// The full record of a game in progress or finished.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<AnnotatedMove>,
    /// Set when a king was captured.
    pub winner: Option<Team>,
}

impl GameRecord {
    pub fn push(&mut self, from: Square, to: Square, notation: String) {
        self.moves.push(AnnotatedMove { from, to, notation });
    }

    pub fn clear(&mut self) {
        self.moves.clear();
        self.winner = None;
    }

    /// Save as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), RecordError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Annotate a move against the pre-move board.
///
/// Castling renders as O-O / O-O-O; captures get an 'x' (with the
/// origin file for pawn captures, en passant included); a pawn reaching
/// the far rank gets the automatic "=Q" suffix.
pub fn annotate(board: &Board, mover: Piece, to: Square, special: SpecialMove) -> String {
    if special == SpecialMove::Castling
        && mover.kind == PieceKind::King
        && (to.file - mover.position.file).abs() == 2
    {
        return if to.file > mover.position.file {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        };
    }

    let mut out = String::new();
    if mover.kind != PieceKind::Pawn {
        out.push(mover.kind_letter());
    }

    // A pawn changing file with an empty destination is an en passant
    // capture; everything else captures only what sits on `to`.
    let is_capture = board.piece_at(to).is_some()
        || (mover.kind == PieceKind::Pawn && to.file != mover.position.file);
    if is_capture {
        if mover.kind == PieceKind::Pawn {
            out.push((b'a' + mover.position.file as u8) as char);
        }
        out.push('x');
    }

    out.push_str(&to.to_string());

    if mover.kind == PieceKind::Pawn && to.rank == mover.team.promotion_rank() {
        out.push_str("=Q");
    }

    out
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
