use crate::types::*;

/// The 8x8 occupancy grid. At most one piece per square; a stored piece's
/// `position` always matches its slot.
#[derive(Clone, Debug)]
pub struct Board {
    grid: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self { grid: [None; 64] }
    }

    /// The standard 32-piece starting layout.
    pub fn standard() -> Self {
        let mut b = Self::empty();

        // Pawns
        for f in 0..8 {
            b.place(Team::White, PieceKind::Pawn, Square { file: f, rank: 1 });
            b.place(Team::Black, PieceKind::Pawn, Square { file: f, rank: 6 });
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            b.place(Team::White, kind, Square { file: f as i8, rank: 0 });
            b.place(Team::Black, kind, Square { file: f as i8, rank: 7 });
        }
        b
    }

    /// Parse the piece-placement field of a position string
    /// ("rnbqkbnr/pppppppp/8/..."). Used by tests and tooling; side to
    /// move and special-move state live in the session, not here.
    pub fn from_layout(layout: &str) -> Self {
        let ranks: Vec<&str> = layout.split('/').collect();
        assert!(ranks.len() == 8, "Invalid layout: expected 8 ranks");

        let mut b = Self::empty();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // listed top rank first
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let team = if ch.is_uppercase() {
                        Team::White
                    } else {
                        Team::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => panic!("Invalid piece char in layout: {}", ch),
                    };
                    let sq = Square::new(file, rank).expect("layout rank overflows the board");
                    b.place(team, kind, sq);
                    file += 1;
                }
                assert!(file <= 8, "Too many files in layout rank");
            }
            assert!(file == 8, "Not enough files in layout rank");
        }
        b
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.index()]
    }

    /// Put a new piece on `sq`, replacing whatever was there.
    pub fn place(&mut self, team: Team, kind: PieceKind, sq: Square) {
        self.grid[sq.index()] = Some(Piece::new(team, kind, sq));
    }

    /// Remove and return the occupant of `sq`.
    pub fn take_piece(&mut self, sq: Square) -> Option<Piece> {
        self.grid[sq.index()].take()
    }

    /// Relocate the piece on `from` to `to`, keeping its stored position
    /// in step with the grid. Returns the piece as now placed.
    ///
    /// The destination must have been vacated (captures are taken out
    /// first by the caller).
    pub fn relocate(&mut self, from: Square, to: Square) -> Piece {
        debug_assert!(self.grid[to.index()].is_none(), "relocate onto occupied square");
        let mut piece = self.grid[from.index()]
            .take()
            .expect("relocate from empty square");
        piece.position = to;
        self.grid[to.index()] = Some(piece);
        piece
    }

    /// Swap in a different kind at `sq` (promotion). Team and position
    /// are preserved.
    pub fn replace_kind(&mut self, sq: Square, kind: PieceKind) -> Piece {
        let piece = self.grid[sq.index()]
            .as_mut()
            .expect("replace_kind on empty square");
        piece.kind = kind;
        *piece
    }

    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.grid.iter().filter_map(|slot| *slot)
    }

    /// Is `target` attacked by any piece of `by`? Only castling legality
    /// consults this; ordinary candidate generation does not.
    pub fn is_square_attacked(&self, target: Square, by: Team) -> bool {
        // Pawn attacks: a pawn of `by` sits one rank behind (from its own
        // point of view) on an adjacent file.
        for df in [-1, 1] {
            if let Some(s) = target.offset(df, -by.forward()) {
                if let Some(pc) = self.piece_at(s) {
                    if pc.team == by && pc.kind == PieceKind::Pawn {
                        return true;
                    }
                }
            }
        }

        // Knight attacks
        let knight = [
            (1, 2),
            (2, 1),
            (-1, 2),
            (-2, 1),
            (1, -2),
            (2, -1),
            (-1, -2),
            (-2, -1),
        ];
        for (df, dr) in knight {
            if let Some(s) = target.offset(df, dr) {
                if let Some(pc) = self.piece_at(s) {
                    if pc.team == by && pc.kind == PieceKind::Knight {
                        return true;
                    }
                }
            }
        }

        // King adjacency
        let king = [
            (1, 1),
            (1, 0),
            (1, -1),
            (0, 1),
            (0, -1),
            (-1, 1),
            (-1, 0),
            (-1, -1),
        ];
        for (df, dr) in king {
            if let Some(s) = target.offset(df, dr) {
                if let Some(pc) = self.piece_at(s) {
                    if pc.team == by && pc.kind == PieceKind::King {
                        return true;
                    }
                }
            }
        }

        // Sliding: bishop/rook/queen rays stop at the first occupant.
        let diag = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
        let ortho = [(1, 0), (-1, 0), (0, 1), (0, -1)];

        for (df, dr) in diag {
            let mut cur = target.offset(df, dr);
            while let Some(s) = cur {
                if let Some(pc) = self.piece_at(s) {
                    if pc.team == by
                        && (pc.kind == PieceKind::Bishop || pc.kind == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
                cur = s.offset(df, dr);
            }
        }
        for (df, dr) in ortho {
            let mut cur = target.offset(df, dr);
            while let Some(s) = cur {
                if let Some(pc) = self.piece_at(s) {
                    if pc.team == by && (pc.kind == PieceKind::Rook || pc.kind == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
                cur = s.offset(df, dr);
            }
        }

        false
    }

    pub(crate) fn assert_positions_consistent(&self) {
        for (i, slot) in self.grid.iter().enumerate() {
            if let Some(pc) = slot {
                debug_assert!(
                    pc.position.index() == i,
                    "piece at slot {} claims position {}",
                    i,
                    pc.position
                );
            }
        }
    }
}

impl std::fmt::Display for Board {
    /// Rank-by-rank text rendering, top rank first, '.' for empty.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = Square { file, rank };
                let ch = match self.piece_at(sq) {
                    Some(pc) => {
                        let c = pc.kind_letter();
                        if pc.team == Team::White {
                            c
                        } else {
                            c.to_ascii_lowercase()
                        }
                    }
                    None => '.',
                };
                write!(f, "{ch}")?;
                if file < 7 {
                    write!(f, " ")?;
                }
            }
            if rank > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
