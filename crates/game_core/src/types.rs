use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    White,
    Black,
}
impl Team {
    pub fn other(self) -> Team {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Team::White => 0,
            Team::Black => 1,
        }
    }
    /// Rank direction a pawn of this team advances in.
    pub fn forward(self) -> i8 {
        match self {
            Team::White => 1,
            Team::Black => -1,
        }
    }
    /// Rank the team's back pieces start on.
    pub fn home_rank(self) -> i8 {
        match self {
            Team::White => 0,
            Team::Black => 7,
        }
    }
    /// Rank a pawn of this team promotes on.
    pub fn promotion_rank(self) -> i8 {
        match self {
            Team::White => 7,
            Team::Black => 0,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::White => write!(f, "White"),
            Team::Black => write!(f, "Black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A board coordinate: file then rank, both in 0..8.
///
/// Construction is fallible, so any `Square` value is on the board.
/// "No square" is expressed as `Option::None` rather than a sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub file: i8,
    pub rank: i8,
}

impl Square {
    pub fn new(file: i8, rank: i8) -> Option<Square> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// The square `(df, dr)` away, or `None` past the edge.
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        Square::new(self.file + df, self.rank + dr)
    }

    /// Flat 0..64 index into the occupancy grid.
    pub fn index(self) -> usize {
        (self.rank as usize) * 8 + self.file as usize
    }

    /// Parse algebraic notation ("e4").
    pub fn from_coord(c: &str) -> Option<Square> {
        let b = c.as_bytes();
        if b.len() != 2 {
            return None;
        }
        if !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
            return None;
        }
        Square::new((b[0] - b'a') as i8, (b[1] - b'1') as i8)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = (b'a' + self.file as u8) as char;
        let rank = (b'1' + self.rank as u8) as char;
        write!(f, "{file}{rank}")
    }
}

/// A piece on the board. Identity is stable across moves; only
/// `position` changes, and it always matches the grid slot holding it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub team: Team,
    pub kind: PieceKind,
    pub position: Square,
}

impl Piece {
    pub fn new(team: Team, kind: PieceKind, position: Square) -> Self {
        Self {
            team,
            kind,
            position,
        }
    }

    /// Uppercase letter for the kind, pawn included ('P').
    pub fn kind_letter(self) -> char {
        match self.kind {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
