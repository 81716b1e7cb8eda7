//! The board: an immutable snapshot of the piece placement.

use crate::check;
use crate::fen::{self, Fen, FenParseError};
use crate::geometry;
use crate::moves::Move;
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Position};

use std::str::FromStr;

/// The raw 8×8 grid, indexed `grid[row][col]` with row 0 being rank 8.
pub type Grid = [[Option<Piece>; 8]; 8];

/// Back-rank ordering of the initial position, file a to file h.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An immutable snapshot of the piece placement.
///
/// A board never changes once built: [`Board::update`] copies the grid and
/// returns a brand-new snapshot, leaving `self` untouched. Alongside the
/// grid, every board carries a per-color index of its pieces (built by one
/// full scan at construction) and, for boards produced by `update`, a
/// read-only copy of the predecessor grid.
///
/// The board performs no legality checking whatsoever. Applying a move that
/// the rules would forbid is a caller bug; see [`Board::update`].
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    prev: Option<Box<Grid>>,
    pieces: [Vec<(Position, Piece)>; 2],
}

impl Board {
    /// The standard initial position.
    pub fn initial() -> Board {
        let mut grid: Grid = [[None; 8]; 8];
        for color in [Color::White, Color::Black] {
            let back = geometry::back_rank_row(color);
            let pawns = geometry::pawn_start_row(color);
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                grid[back][col] = Some(Piece::new(color, kind));
            }
            for col in 0..8 {
                grid[pawns][col] = Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        Board::from_grid(grid)
    }

    /// Wraps an existing grid, rebuilding the piece index.
    pub fn from_grid(grid: Grid) -> Board {
        Board::with_prev(grid, None)
    }

    fn with_prev(grid: Grid, prev: Option<Box<Grid>>) -> Board {
        let mut pieces: [Vec<(Position, Piece)>; 2] = [Vec::new(), Vec::new()];
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some(piece) = cell {
                    pieces[piece.color().index()].push((Position::new(row, col), *piece));
                }
            }
        }
        Board { grid, prev, pieces }
    }

    /// Builds a board from the placement field of a FEN record.
    ///
    /// The bookkeeping fields (side to move, castling rights, en passant
    /// square, clocks) are parsed and then dropped; the board itself only
    /// models placement.
    pub fn from_fen(s: &str) -> Result<Board, FenParseError> {
        Ok(Fen::from_str(s)?.into_board())
    }

    /// Returns the piece standing at `pos`, if any.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.grid[pos.row()][pos.col()]
    }

    /// Read-only view of the grid, for rendering layers.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The predecessor grid, when this board was produced by [`Board::update`].
    ///
    /// Historical context only (a future en-passant legality check wants the
    /// position one move ago); never consulted by the engine itself.
    pub fn prev_grid(&self) -> Option<&Grid> {
        self.prev.as_deref()
    }

    /// All live pieces of `color` with the squares they stand on, in grid
    /// scan order.
    pub fn player_pieces(&self, color: Color) -> &[(Position, Piece)] {
        &self.pieces[color.index()]
    }

    /// The square of `color`'s king, if the king is on the board.
    pub fn king_pos(&self, color: Color) -> Option<Position> {
        self.player_pieces(color)
            .iter()
            .find(|(_, piece)| piece.kind() == PieceKind::King)
            .map(|(pos, _)| *pos)
    }

    /// Returns `true` if `player`'s king is attacked.
    ///
    /// Convenience alias for [`check::is_check`].
    pub fn is_check(&self, player: Color) -> bool {
        check::is_check(self, player)
    }

    /// Applies `mv` to a copy of the grid and wraps the result in a new
    /// snapshot; `self` and every piece it holds are left untouched.
    ///
    /// The removed square is cleared before the relocations run, so a
    /// capture landing on the vacated square survives. Each relocated piece
    /// gets its `has_moved` flag set on the copy.
    ///
    /// # Panics
    ///
    /// Panics if a relocation names an empty source square. The move is
    /// trusted; legality is the concern of a higher layer.
    pub fn update(&self, mv: &Move) -> Board {
        let mut grid = self.grid;
        if let Some(pos) = mv.removed() {
            grid[pos.row()][pos.col()] = None;
        }
        for &(src, dst) in mv.relocations() {
            let mut piece = grid[src.row()][src.col()]
                .expect("move relocates an empty square");
            grid[src.row()][src.col()] = None;
            piece.mark_moved();
            grid[dst.row()][dst.col()] = Some(piece);
        }
        Board::with_prev(grid, Some(Box::new(self.grid)))
    }

    /// The FEN placement field for the current grid.
    pub fn placement_fen(&self) -> String {
        let placed: Vec<(Position, Piece)> = self
            .pieces
            .iter()
            .flat_map(|side| side.iter().copied())
            .collect();
        fen::pieces_to_fen(&placed)
    }
}
