use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PositionParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unexpected color char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CastlingRightsParseError {
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
    #[error("duplicate char {0:?}")]
    DuplicateChar(char),
    #[error("unexpected empty string")]
    EmptyString,
}

/// A square on the board, as an immutable `(row, col)` pair.
///
/// Row 0 is rank 8 (Black's back rank), row 7 is rank 1. Column 0 is file `a`.
/// Both coordinates are always in range; there is no way to construct a
/// `Position` outside the board.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Position {
        assert!(row < 8 && col < 8, "position must lie on the board");
        Position {
            row: row as u8,
            col: col as u8,
        }
    }

    pub const fn row(&self) -> usize {
        self.row as usize
    }

    pub const fn col(&self) -> usize {
        self.col as usize
    }

    /// Shifts the position by the given deltas, clipping at the board edge.
    ///
    /// Returns `None` when the target square leaves the board. Move
    /// generation relies on this to discard out-of-range candidates.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Position> {
        let row = self.row as isize + d_row;
        let col = self.col as isize + d_col;
        if !(0..8).contains(&row) || !(0..8).contains(&col) {
            return None;
        }
        Some(Position {
            row: row as u8,
            col: col as u8,
        })
    }

    pub const fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    pub const fn rank_char(&self) -> char {
        (b'8' - self.row) as char
    }

    pub fn iter() -> impl Iterator<Item = Position> {
        (0..8).flat_map(|row| (0..8).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Position({})", self)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 {
            return Err(PositionParseError::BadLength);
        }
        let bytes = s.as_bytes();
        let (file_ch, rank_ch) = (bytes[0] as char, bytes[1] as char);
        let col = match file_ch {
            'a'..='h' => bytes[0] - b'a',
            _ => return Err(PositionParseError::UnexpectedFileChar(file_ch)),
        };
        let row = match rank_ch {
            '1'..='8' => b'8' - bytes[1],
            _ => return Err(PositionParseError::UnexpectedRankChar(rank_ch)),
        };
        Ok(Position { row, col })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index for per-color lookup tables.
    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(ColorParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        Color::from_char(ch).ok_or(ColorParseError::UnexpectedChar(ch))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// FEN letter for a piece of this kind: uppercase for White, lowercase
    /// for Black.
    pub fn as_char(&self, color: Color) -> char {
        let ch = match *self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    /// Recovers color and kind from a FEN placement letter.
    pub fn from_char(c: char) -> Option<(Color, PieceKind)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((color, kind))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

/// Castling availability for both players, as in the third FEN field.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    kingside: [bool; 2],
    queenside: [bool; 2],
}

impl CastlingRights {
    pub const EMPTY: CastlingRights = CastlingRights {
        kingside: [false; 2],
        queenside: [false; 2],
    };
    pub const FULL: CastlingRights = CastlingRights {
        kingside: [true; 2],
        queenside: [true; 2],
    };

    pub const fn has(&self, c: Color, s: CastlingSide) -> bool {
        match s {
            CastlingSide::King => self.kingside[c.index()],
            CastlingSide::Queen => self.queenside[c.index()],
        }
    }

    pub fn set(&mut self, c: Color, s: CastlingSide) {
        match s {
            CastlingSide::King => self.kingside[c.index()] = true,
            CastlingSide::Queen => self.queenside[c.index()] = true,
        }
    }

    pub fn unset(&mut self, c: Color, s: CastlingSide) {
        match s {
            CastlingSide::King => self.kingside[c.index()] = false,
            CastlingSide::Queen => self.queenside[c.index()] = false,
        }
    }

    pub const fn with(mut self, c: Color, s: CastlingSide) -> CastlingRights {
        match s {
            CastlingSide::King => self.kingside[c.index()] = true,
            CastlingSide::Queen => self.queenside[c.index()] = true,
        }
        self
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if *self == Self::EMPTY {
            return write!(f, "-");
        }
        if self.has(Color::White, CastlingSide::King) {
            write!(f, "K")?;
        }
        if self.has(Color::White, CastlingSide::Queen) {
            write!(f, "Q")?;
        }
        if self.has(Color::Black, CastlingSide::King) {
            write!(f, "k")?;
        }
        if self.has(Color::Black, CastlingSide::Queen) {
            write!(f, "q")?;
        }
        Ok(())
    }
}

impl FromStr for CastlingRights {
    type Err = CastlingRightsParseError;

    fn from_str(s: &str) -> Result<CastlingRights, Self::Err> {
        type Error = CastlingRightsParseError;
        if s == "-" {
            return Ok(CastlingRights::EMPTY);
        }
        if s.is_empty() {
            return Err(Error::EmptyString);
        }
        let mut res = CastlingRights::EMPTY;
        for b in s.bytes() {
            let (color, side) = match b {
                b'K' => (Color::White, CastlingSide::King),
                b'Q' => (Color::White, CastlingSide::Queen),
                b'k' => (Color::Black, CastlingSide::King),
                b'q' => (Color::Black, CastlingSide::Queen),
                _ => return Err(Error::UnexpectedChar(b as char)),
            };
            if res.has(color, side) {
                return Err(Error::DuplicateChar(b as char));
            }
            res.set(color, side);
        }
        Ok(res)
    }
}
