pub mod board;
pub mod history;
pub mod movegen;
pub mod record;
pub mod session;
pub mod special;
pub mod types;

// Re-export the game-facing surface
pub use board::Board;
pub use history::{History, MoveRecord};
pub use movegen::candidate_moves;
pub use record::{AnnotatedMove, GameRecord, RecordError};
pub use session::{GameSession, MoveError, MoveOutcome, Selection};
pub use special::{classify, SpecialMove};
pub use types::*;

// =============================================================================
// Listener trait — implemented by the presentation layer (3D scene, console)
// =============================================================================

/// Receives push notifications from a [`GameSession`] while a move is
/// committed or the session is reset.
///
/// The core never calls back into rendering logic synchronously from
/// inside rule evaluation; these fire only after the corresponding state
/// change has been applied. All methods default to no-ops, so a
/// presenter implements only what it draws.
pub trait SessionListener: Send {
    /// A piece left `_from` and now stands on `_to`. Fired a second
    /// time for the rook when a castle completes.
    fn piece_moved(&mut self, _from: Square, _to: Square) {}

    /// `_piece` was removed from play by `_by` (regular capture or en
    /// passant) and appended to its team's captured sequence.
    fn piece_captured(&mut self, _piece: Piece, _by: Team) {}

    /// The pawn on `_at` was replaced by a `_kind` (always a queen).
    fn piece_promoted(&mut self, _at: Square, _kind: PieceKind) {}

    /// A king was captured; `_winner` takes the game.
    fn checkmate(&mut self, _winner: Team) {}

    /// The session returned to the starting layout.
    fn session_reset(&mut self) {}
}
