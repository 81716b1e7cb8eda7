//! Candidate move generation, one piece at a time.
//!
//! Generation is purely positional: it never mutates the board and never
//! asks whether a move would leave the own king in check. The check detector
//! and any future legality layer build on exactly these candidates.

use crate::board::Board;
use crate::geometry;
use crate::moves::Move;
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Position};

use std::slice;

use arrayvec::ArrayVec;
use derive_more::{Deref, DerefMut};

/// Upper bound on the moves a single piece can generate (a centralized
/// queen reaches 27 squares).
const MAX_PIECE_MOVES: usize = 28;

/// Candidate moves of a single piece, stored inline.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deref, DerefMut)]
pub struct MoveList(ArrayVec<Move, MAX_PIECE_MOVES>);

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, MAX_PIECE_MOVES>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

const KNIGHT_JUMPS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_STEPS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const DIAGONAL_RAYS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONAL_RAYS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Generates every candidate move for the piece standing at `pos`.
///
/// # Panics
///
/// Panics if `pos` is empty. Asking an empty square for its moves is a
/// caller bug, not a recoverable condition.
pub fn possible_moves(board: &Board, pos: Position) -> MoveList {
    let piece = board
        .get(pos)
        .expect("possible_moves called on an empty square");
    let mut res = MoveList::new();
    match piece.kind() {
        PieceKind::Pawn => gen_pawn(board, pos, piece, &mut res),
        PieceKind::Knight => gen_steps(board, pos, piece, &KNIGHT_JUMPS, &mut res),
        PieceKind::King => gen_steps(board, pos, piece, &KING_STEPS, &mut res),
        PieceKind::Bishop => gen_rays(board, pos, piece, &DIAGONAL_RAYS, &mut res),
        PieceKind::Rook => gen_rays(board, pos, piece, &ORTHOGONAL_RAYS, &mut res),
        PieceKind::Queen => {
            gen_rays(board, pos, piece, &DIAGONAL_RAYS, &mut res);
            gen_rays(board, pos, piece, &ORTHOGONAL_RAYS, &mut res);
        }
    }
    res
}

/// Accepts `dst` if it is empty or holds an opponent piece.
fn push_if_open(board: &Board, src: Position, dst: Position, color: Color, res: &mut MoveList) {
    match board.get(dst) {
        None => res.push(Move::new(src, dst)),
        Some(other) if other.color() != color => res.push(Move::capture(src, dst)),
        Some(_) => {}
    }
}

fn gen_steps(
    board: &Board,
    pos: Position,
    piece: Piece,
    steps: &[(isize, isize)],
    res: &mut MoveList,
) {
    for &(d_row, d_col) in steps {
        if let Some(dst) = pos.offset(d_row, d_col) {
            push_if_open(board, pos, dst, piece.color(), res);
        }
    }
}

fn gen_rays(
    board: &Board,
    pos: Position,
    piece: Piece,
    rays: &[(isize, isize)],
    res: &mut MoveList,
) {
    for &(d_row, d_col) in rays {
        let mut cur = pos;
        while let Some(dst) = cur.offset(d_row, d_col) {
            match board.get(dst) {
                None => {
                    res.push(Move::new(pos, dst));
                    cur = dst;
                }
                Some(other) => {
                    if other.color() != piece.color() {
                        res.push(Move::capture(pos, dst));
                    }
                    break;
                }
            }
        }
    }
}

fn gen_pawn(board: &Board, pos: Position, piece: Piece, res: &mut MoveList) {
    let forward = geometry::pawn_forward_delta(piece.color());

    if let Some(one) = pos.offset(forward, 0) {
        if board.get(one).is_none() {
            res.push(Move::new(pos, one));
            // The double step needs a pawn still on its starting rank that
            // has never been relocated, and both squares free.
            let double_eligible = !piece.has_moved()
                && pos.row() == geometry::pawn_start_row(piece.color());
            if double_eligible {
                if let Some(two) = one.offset(forward, 0) {
                    if board.get(two).is_none() {
                        res.push(Move::new(pos, two));
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(dst) = pos.offset(forward, d_col) {
            if let Some(other) = board.get(dst) {
                if other.color() != piece.color() {
                    res.push(Move::capture(pos, dst));
                }
            }
        }
    }
}
