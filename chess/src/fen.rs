//! Parsing and emitting Forsyth–Edwards Notation.
//!
//! A FEN record has six space-separated fields: piece placement, active
//! color, castling rights, en passant target square, halfmove clock and
//! fullmove number. Parsing is all-or-nothing; a malformed record yields an
//! error and no partial result.

use crate::board::{Board, Grid};
use crate::piece::Piece;
use crate::types::{
    CastlingRights, CastlingRightsParseError, Color, ColorParseError, Position,
    PositionParseError,
};

use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing the placement field (the first part of a FEN record).
///
/// Rank numbers in the errors are chess ranks (8 down to 1), not row
/// indices.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlacementParseError {
    /// A rank describes more than eight squares.
    #[error("too many squares in rank {0}")]
    RankOverflow(u8),
    /// A rank describes fewer than eight squares.
    #[error("not enough squares in rank {0}")]
    RankUnderflow(u8),
    /// More than eight ranks.
    #[error("too many ranks")]
    TooManyRanks,
    /// Fewer than eight ranks.
    #[error("not enough ranks")]
    TooFewRanks,
    /// A character that is neither a piece letter nor an empty-square run.
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing a full FEN record.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// FEN contains non-ASCII characters.
    #[error("non-ASCII data in FEN")]
    NonAscii,
    /// The record is empty.
    #[error("placement not specified")]
    NoPlacement,
    /// Error parsing the placement field.
    #[error("bad placement: {0}")]
    Placement(#[from] PlacementParseError),
    /// The active color field is missing.
    #[error("no active color")]
    NoActiveColor,
    /// Error parsing the active color field.
    #[error("bad active color: {0}")]
    ActiveColor(#[from] ColorParseError),
    /// The castling rights field is missing.
    #[error("no castling rights")]
    NoCastling,
    /// Error parsing the castling rights field.
    #[error("bad castling rights: {0}")]
    Castling(#[from] CastlingRightsParseError),
    /// The en passant field is missing.
    #[error("no en passant square")]
    NoEpSquare,
    /// Error parsing the en passant field.
    #[error("bad en passant square: {0}")]
    EpSquare(#[from] PositionParseError),
    /// The halfmove clock field is missing.
    #[error("no halfmove clock")]
    NoMoveCounter,
    /// Error parsing the halfmove clock.
    #[error("bad halfmove clock: {0}")]
    MoveCounter(ParseIntError),
    /// The fullmove number field is missing.
    #[error("no fullmove number")]
    NoMoveNumber,
    /// Error parsing the fullmove number.
    #[error("bad fullmove number: {0}")]
    MoveNumber(ParseIntError),
    /// The record has more than six fields.
    #[error("extra data in FEN")]
    ExtraData,
}

/// A parsed FEN record.
///
/// `pieces` lists the placement in scan order: rank 8 first, file a to
/// file h within a rank. The record keeps every field of the notation even
/// though [`Board`] itself only consumes the placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Piece placement.
    pub pieces: Vec<(Position, Piece)>,
    /// Active color.
    pub side: Color,
    /// Castling availability.
    pub castling: CastlingRights,
    /// En passant target square, if any.
    pub ep_square: Option<Position>,
    /// Halfmove clock: halfmoves since the last capture or pawn move.
    pub move_counter: u16,
    /// Fullmove number.
    pub move_number: u16,
}

impl Fen {
    /// Parses a FEN record.
    ///
    /// Does the same as [`Fen::from_str`]. It is recommended to use this
    /// function instead of `from_str()` for better readability.
    #[inline]
    pub fn parse(s: &str) -> Result<Fen, FenParseError> {
        Fen::from_str(s)
    }

    /// Builds a board from the placement, dropping the bookkeeping fields.
    ///
    /// Every piece starts with a clean `has_moved` flag; the notation does
    /// not carry per-piece history.
    pub fn into_board(self) -> Board {
        let mut grid: Grid = [[None; 8]; 8];
        for &(pos, piece) in &self.pieces {
            grid[pos.row()][pos.col()] = Some(piece);
        }
        Board::from_grid(grid)
    }
}

impl FromStr for Fen {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Fen, Self::Err> {
        type Error = FenParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }
        let mut fields = s.split(' ').fuse();

        let pieces = parse_placement(fields.next().ok_or(Error::NoPlacement)?)?;
        let side = Color::from_str(fields.next().ok_or(Error::NoActiveColor)?)?;
        let castling = CastlingRights::from_str(fields.next().ok_or(Error::NoCastling)?)?;
        let ep_square = parse_ep_square(fields.next().ok_or(Error::NoEpSquare)?)?;
        let move_counter = u16::from_str(fields.next().ok_or(Error::NoMoveCounter)?)
            .map_err(Error::MoveCounter)?;
        let move_number = u16::from_str(fields.next().ok_or(Error::NoMoveNumber)?)
            .map_err(Error::MoveNumber)?;

        if fields.next().is_some() {
            return Err(Error::ExtraData);
        }

        Ok(Fen {
            pieces,
            side,
            castling,
            ep_square,
            move_counter,
            move_number,
        })
    }
}

impl Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", pieces_to_fen(&self.pieces))?;
        write!(f, " {} {}", self.side, self.castling)?;
        match self.ep_square {
            Some(pos) => write!(f, " {}", pos)?,
            None => write!(f, " -")?,
        };
        write!(f, " {} {}", self.move_counter, self.move_number)?;
        Ok(())
    }
}

fn rank_no(row: usize) -> u8 {
    8 - row as u8
}

fn parse_placement(s: &str) -> Result<Vec<(Position, Piece)>, PlacementParseError> {
    type Error = PlacementParseError;

    let mut pieces = Vec::new();
    let mut row = 0_usize;
    let mut col = 0_usize;
    for c in s.chars() {
        match c {
            '1'..='8' => {
                let run = (c as u8 - b'0') as usize;
                if col + run > 8 {
                    return Err(Error::RankOverflow(rank_no(row)));
                }
                col += run;
            }
            '/' => {
                if col < 8 {
                    return Err(Error::RankUnderflow(rank_no(row)));
                }
                row += 1;
                col = 0;
                if row >= 8 {
                    return Err(Error::TooManyRanks);
                }
            }
            _ => {
                if col >= 8 {
                    return Err(Error::RankOverflow(rank_no(row)));
                }
                let piece = Piece::from_char(c).ok_or(Error::UnexpectedChar(c))?;
                pieces.push((Position::new(row, col), piece));
                col += 1;
            }
        }
    }

    if col < 8 {
        return Err(Error::RankUnderflow(rank_no(row)));
    }
    if row < 7 {
        return Err(Error::TooFewRanks);
    }

    Ok(pieces)
}

fn parse_ep_square(s: &str) -> Result<Option<Position>, PositionParseError> {
    if s == "-" {
        return Ok(None);
    }
    Ok(Some(Position::from_str(s)?))
}

/// Encodes a flat piece collection as the FEN placement field.
///
/// Ranks are emitted in grid order (row 0, i.e. rank 8, first), with empty
/// squares collapsed into canonical run counts. The input order does not
/// matter; pieces are placed on a scratch grid first.
pub fn pieces_to_fen(pieces: &[(Position, Piece)]) -> String {
    let mut grid: Grid = [[None; 8]; 8];
    for &(pos, piece) in pieces {
        grid[pos.row()][pos.col()] = Some(piece);
    }

    let mut res = String::new();
    for (row, cells) in grid.iter().enumerate() {
        if row != 0 {
            res.push('/');
        }
        let mut empty = 0_u8;
        for cell in cells {
            match cell {
                None => empty += 1,
                Some(piece) => {
                    if empty != 0 {
                        res.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    res.push(piece.as_char());
                }
            }
        }
        if empty != 0 {
            res.push((b'0' + empty) as char);
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CastlingSide, PieceKind};

    fn pos(s: &str) -> Position {
        Position::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_single_rook() {
        let fen = Fen::parse("8/8/8/r7/8/8/8/8 w KQkq e4 2 1").unwrap();
        assert_eq!(fen.pieces.len(), 1);
        let (position, rook) = fen.pieces[0];
        assert_eq!(position, pos("a5"));
        assert_eq!(rook.kind(), PieceKind::Rook);
        assert_eq!(rook.color(), Color::Black);

        assert_eq!(fen.side, Color::White);
        assert_eq!(fen.castling, CastlingRights::FULL);
        assert_eq!(fen.ep_square, Some(pos("e4")));
        assert_eq!(fen.move_counter, 2);
        assert_eq!(fen.move_number, 1);
    }

    #[test]
    fn test_parse_empty_board() {
        let fen = Fen::parse("8/8/8/8/8/8/8/8 w - - 0 0").unwrap();
        assert!(fen.pieces.is_empty());
        assert_eq!(fen.side, Color::White);
        assert_eq!(fen.castling, CastlingRights::EMPTY);
        assert_eq!(fen.ep_square, None);
        assert_eq!(fen.move_counter, 0);
        assert_eq!(fen.move_number, 0);
    }

    #[test]
    fn test_parse_initial_position() {
        let fen = Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(fen.pieces.len(), 32);
        // Scan order: rank 8 first, so Black's queenside rook leads.
        let (position, rook) = fen.pieces[0];
        assert_eq!(position, pos("a8"));
        assert_eq!(rook.kind(), PieceKind::Rook);
        assert_eq!(rook.color(), Color::Black);
        assert_eq!(fen.to_string(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    }

    #[test]
    fn test_parse_partial_castling() {
        let fen = Fen::parse("8/8/8/8/8/8/8/8 b Kq - 3 40").unwrap();
        assert_eq!(fen.side, Color::Black);
        assert_eq!(
            fen.castling,
            CastlingRights::EMPTY
                .with(Color::White, CastlingSide::King)
                .with(Color::Black, CastlingSide::Queen)
        );
        assert!(!fen.castling.has(Color::White, CastlingSide::Queen));
        assert!(!fen.castling.has(Color::Black, CastlingSide::King));
    }

    #[test]
    fn test_placement_errors() {
        assert_eq!(
            Fen::parse("ppppppppp/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::Placement(PlacementParseError::RankOverflow(
                8
            )))
        );
        assert_eq!(
            Fen::parse("6p3/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::Placement(PlacementParseError::RankOverflow(
                8
            )))
        );
        // A digit that cannot start an empty run is not a run at all.
        assert_eq!(
            Fen::parse("9/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::Placement(
                PlacementParseError::UnexpectedChar('9')
            ))
        );
        assert_eq!(
            Fen::parse("3/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::Placement(
                PlacementParseError::RankUnderflow(8)
            ))
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::Placement(PlacementParseError::TooManyRanks))
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::Placement(PlacementParseError::TooFewRanks))
        );
        assert_eq!(
            Fen::parse("8/8/8/asdfghjk/8/8/8/8 w - - 0 1"),
            Err(FenParseError::Placement(
                PlacementParseError::UnexpectedChar('a')
            ))
        );
        assert_eq!(
            Fen::parse("8/8/10d5/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::Placement(
                PlacementParseError::UnexpectedChar('0')
            ))
        );
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(FenParseError::NoActiveColor)
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenParseError::NoCastling)
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq"),
            Err(FenParseError::NoEpSquare)
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
            Err(FenParseError::NoMoveCounter)
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0"),
            Err(FenParseError::NoMoveNumber)
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra"),
            Err(FenParseError::ExtraData)
        );
    }

    #[test]
    fn test_bad_fields() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(FenParseError::ActiveColor(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w KX - 0 1"),
            Err(FenParseError::Castling(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - e9 0 1"),
            Err(FenParseError::EpSquare(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - x 1"),
            Err(FenParseError::MoveCounter(_))
        ));
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 x"),
            Err(FenParseError::MoveNumber(_))
        ));
    }

    #[test]
    fn test_pieces_to_fen_single_pawn() {
        let pieces = vec![(pos("a8"), Piece::from_char('P').unwrap())];
        assert_eq!(pieces_to_fen(&pieces), "P7/8/8/8/8/8/8/8");
    }

    #[test]
    fn test_pieces_to_fen_scattered() {
        let pieces = vec![
            (pos("e4"), Piece::from_char('p').unwrap()),
            (pos("d1"), Piece::from_char('N').unwrap()),
        ];
        assert_eq!(pieces_to_fen(&pieces), "8/8/8/8/4p3/8/8/3N4");
    }

    #[test]
    fn test_pieces_to_fen_full_rank() {
        let pieces: Vec<(Position, Piece)> = (0..8)
            .map(|col| (Position::new(1, col), Piece::from_char('p').unwrap()))
            .collect();
        assert_eq!(pieces_to_fen(&pieces), "8/pppppppp/8/8/8/8/8/8");
    }

    #[test]
    fn test_placement_roundtrip() {
        for placement in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "r1bk3r/p2pBpNp/n4n2/1p1NP2P/6P1/3P4/P1P1K3/q5b1",
            "8/8/8/r7/8/8/8/8",
            "8/8/8/8/8/8/8/8",
        ] {
            let fen = Fen::parse(&format!("{} w - - 0 1", placement)).unwrap();
            assert_eq!(pieces_to_fen(&fen.pieces), placement);
        }
    }

    #[test]
    fn test_display_roundtrip() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "8/8/8/r7/8/8/8/8 b Kq e4 2 1",
            "8/8/8/8/8/8/8/8 w - - 0 0",
        ] {
            assert_eq!(Fen::parse(fen).unwrap().to_string(), fen);
        }
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(
            Fen::parse("8/8/8/♜7/8/8/8/8 w - - 0 1"),
            Err(FenParseError::NonAscii)
        );
    }
}
