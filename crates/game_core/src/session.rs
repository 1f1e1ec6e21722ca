use thiserror::Error;
use tracing::{debug, info};

use crate::board::Board;
use crate::history::History;
use crate::movegen::candidate_moves;
use crate::record::{self, GameRecord};
use crate::special::{classify, SpecialMove};
use crate::types::*;
use crate::SessionListener;

/// Why a commit was rejected. A rejected commit never mutates board,
/// turn, history, or the captured sequences.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece is selected")]
    NoSelection,
    #[error("{0} is not a legal destination for the selected piece")]
    IllegalMove(Square),
    #[error("coordinate ({file}, {rank}) is outside the board")]
    OutOfBounds { file: i8, rank: i8 },
}

/// A piece chosen for moving, with its computed candidate set and
/// special-move classification. Lives from selection until the next
/// commit attempt.
#[derive(Clone, Debug)]
pub struct Selection {
    pub piece: Piece,
    pub candidates: Vec<Square>,
    pub special: SpecialMove,
}

/// What a successful commit did.
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    pub from: Square,
    pub to: Square,
    pub special: SpecialMove,
    /// The piece removed from play, by regular capture or en passant.
    pub captured: Option<Piece>,
    /// Winning team when this move captured a king. Reported as a side
    /// effect; play is not locked until `reset`.
    pub checkmate: Option<Team>,
}

/// One game of chess: board, turn, history, captured pieces, and the
/// selection state machine (Idle -> Selecting -> commit -> Idle).
///
/// An explicitly constructed, owned object; multiple sessions can run
/// side by side. All operations run synchronously on the calling
/// thread.
pub struct GameSession {
    board: Board,
    turn: Team,
    history: History,
    captured: [Vec<Piece>; 2],
    selection: Option<Selection>,
    winner: Option<Team>,
    record: GameRecord,
    listener: Option<Box<dyn SessionListener>>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_board(Board::standard(), Team::White)
    }

    /// Start from an arbitrary layout. The history starts empty, so
    /// derived castling rights treat every piece as unmoved.
    pub fn with_board(board: Board, turn: Team) -> Self {
        Self {
            board,
            turn,
            history: History::new(),
            captured: [Vec::new(), Vec::new()],
            selection: None,
            winner: None,
            record: GameRecord::default(),
            listener: None,
        }
    }

    /// Register the presentation-layer listener. Events are pushed
    /// during `commit_move` and `reset`; nothing is polled.
    pub fn set_listener(&mut self, listener: Box<dyn SessionListener>) {
        self.listener = Some(listener);
    }

    /// Validate an input-layer coordinate pair (e.g. a raycast tile
    /// index) into a `Square`. Out-of-range pairs are a caller bug and
    /// come back as a loud error, never a silent no-op.
    pub fn resolve(file: i8, rank: i8) -> Result<Square, MoveError> {
        Square::new(file, rank).ok_or(MoveError::OutOfBounds { file, rank })
    }

    pub fn current_turn(&self) -> Team {
        self.turn
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Pieces of `team` that have been removed from play, in capture
    /// order.
    pub fn captured(&self, team: Team) -> &[Piece] {
        &self.captured[team.idx()]
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Winning team once a king has been captured, until `reset`.
    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    /// Choose the piece on `sq` to move. Returns `None` (and clears any
    /// previous selection) when the square is empty or holds a piece of
    /// the team not on turn; otherwise the candidate destinations and
    /// special-move classification.
    pub fn select_piece(&mut self, sq: Square) -> Option<&Selection> {
        self.selection = None;

        let piece = self.board.piece_at(sq)?;
        if piece.team != self.turn {
            debug!(square = %sq, team = %piece.team, "selection refused: not on turn");
            return None;
        }

        let mut candidates = candidate_moves(&self.board, piece);
        let special = classify(&self.board, &self.history, piece, &mut candidates);
        debug!(
            square = %sq,
            candidates = candidates.len(),
            ?special,
            "piece selected"
        );

        self.selection = Some(Selection {
            piece,
            candidates,
            special,
        });
        self.selection.as_ref()
    }

    /// Commit the selected piece to `to`.
    ///
    /// Any commit attempt consumes the selection (as releasing a
    /// dragged piece does); on rejection the caller re-selects and all
    /// game state is left untouched.
    pub fn commit_move(&mut self, to: Square) -> Result<MoveOutcome, MoveError> {
        let sel = self.selection.take().ok_or(MoveError::NoSelection)?;
        if !sel.candidates.contains(&to) {
            return Err(MoveError::IllegalMove(to));
        }
        if let Some(occupant) = self.board.piece_at(to) {
            // Candidates never contain same-team squares; re-checked so
            // a stale selection cannot clobber the mover's own piece.
            if occupant.team == sel.piece.team {
                return Err(MoveError::IllegalMove(to));
            }
        }

        let mover = sel.piece;
        let from = mover.position;
        let notation = record::annotate(&self.board, mover, to, sel.special);

        // Capture the destination occupant first.
        let mut captured = self.board.take_piece(to);
        let mut checkmate = None;
        if let Some(victim) = captured {
            self.remove_from_play(victim, mover.team);
            if victim.kind == PieceKind::King {
                checkmate = Some(mover.team);
                self.declare_checkmate(mover.team);
            }
        }

        // Occupancy, turn, history.
        self.board.relocate(from, to);
        self.turn = self.turn.other();
        self.history.push(from, to);
        if let Some(l) = self.listener.as_mut() {
            l.piece_moved(from, to);
        }

        // Special-move side effects.
        match sel.special {
            SpecialMove::EnPassant => {
                if captured.is_none() {
                    captured = self.capture_bypassed_pawn(mover.team);
                }
            }
            SpecialMove::Castling => self.complete_castle(mover, from, to),
            SpecialMove::Promotion => self.promote(mover, to),
            SpecialMove::None => {}
        }

        self.board.assert_positions_consistent();

        info!(%from, %to, notation = %notation, "move committed");
        self.record.push(from, to, notation);
        if checkmate.is_some() {
            self.record.winner = checkmate;
        }

        Ok(MoveOutcome {
            from,
            to,
            special: sel.special,
            captured,
            checkmate,
        })
    }

    /// En passant execution: the last two history entries are the
    /// enemy's double advance and the capture just committed. The
    /// bypassed pawn sits on the enemy's arrival square, same file as
    /// the landed pawn, one rank off. Its square differs from the
    /// commit destination, so the regular capture path cannot have
    /// removed it.
    fn capture_bypassed_pawn(&mut self, by: Team) -> Option<Piece> {
        let (older, newer) = self.history.last_two()?;
        let bypassed = self.board.piece_at(older.to)?;
        if bypassed.team == by || bypassed.kind != PieceKind::Pawn {
            return None;
        }
        if bypassed.position.file != newer.to.file
            || (bypassed.position.rank - newer.to.rank).abs() != 1
        {
            return None;
        }
        self.board.take_piece(older.to);
        self.remove_from_play(bypassed, by);
        Some(bypassed)
    }

    /// Castling execution: when the king jumped two files, bring the
    /// matching rook to the square the king crossed.
    fn complete_castle(&mut self, mover: Piece, from: Square, to: Square) {
        if mover.kind != PieceKind::King || (to.file - from.file).abs() != 2 {
            return; // a regular king move under a Castling classification
        }
        let rank = from.rank;
        let (rook_from, rook_to) = if to.file > from.file {
            (Square { file: 7, rank }, Square { file: 5, rank })
        } else {
            (Square { file: 0, rank }, Square { file: 3, rank })
        };
        self.board.relocate(rook_from, rook_to);
        if let Some(l) = self.listener.as_mut() {
            l.piece_moved(rook_from, rook_to);
        }
    }

    /// Promotion execution: a pawn on the far rank becomes a queen.
    fn promote(&mut self, mover: Piece, to: Square) {
        if mover.kind != PieceKind::Pawn || to.rank != mover.team.promotion_rank() {
            return;
        }
        self.board.replace_kind(to, PieceKind::Queen);
        if let Some(l) = self.listener.as_mut() {
            l.piece_promoted(to, PieceKind::Queen);
        }
    }

    fn remove_from_play(&mut self, victim: Piece, by: Team) {
        info!(piece = ?victim.kind, team = %victim.team, at = %victim.position, "piece captured");
        self.captured[victim.team.idx()].push(victim);
        if let Some(l) = self.listener.as_mut() {
            l.piece_captured(victim, by);
        }
    }

    fn declare_checkmate(&mut self, winner: Team) {
        info!(%winner, "checkmate: king captured");
        self.winner = Some(winner);
        if let Some(l) = self.listener.as_mut() {
            l.checkmate(winner);
        }
    }

    /// Back to the standard starting layout: full occupancy rebuild,
    /// empty history and captured sequences, White to move. Calling it
    /// twice in a row is the same as calling it once.
    pub fn reset(&mut self) {
        info!("session reset");
        self.board = Board::standard();
        self.turn = Team::White;
        self.history.clear();
        self.captured[0].clear();
        self.captured[1].clear();
        self.selection = None;
        self.winner = None;
        self.record.clear();
        if let Some(l) = self.listener.as_mut() {
            l.session_reset();
        }
    }
}
