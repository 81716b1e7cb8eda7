//! Piece values stored in the board grid.

use crate::types::{Color, PieceKind};

/// A single chessman.
///
/// Pieces are plain values: [`Board::update`](crate::Board::update) copies
/// the whole grid, so a piece belonging to one snapshot is never aliased by
/// another snapshot. Within a snapshot a piece is identified by the square
/// it stands on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    has_moved: bool,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    /// `true` once the piece has been relocated by a board update.
    ///
    /// Gates the pawn double step; a future legality layer uses it for
    /// castling eligibility.
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub(crate) fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    /// FEN placement letter: uppercase for White, lowercase for Black.
    pub fn as_char(&self) -> char {
        self.kind.as_char(self.color)
    }

    /// Builds a piece from a FEN placement letter. The piece starts with a
    /// clean `has_moved` flag; FEN carries no per-piece history.
    pub fn from_char(c: char) -> Option<Piece> {
        let (color, kind) = PieceKind::from_char(c)?;
        Some(Piece::new(color, kind))
    }
}
