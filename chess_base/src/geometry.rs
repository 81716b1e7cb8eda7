use crate::types::Color;

/// Row delta for a single pawn step. Rows count down toward White's side,
/// so White pawns move to smaller row indices.
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// Row holding the pawns in the initial position.
pub const fn pawn_start_row(c: Color) -> usize {
    match c {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Row holding the major pieces in the initial position.
pub const fn back_rank_row(c: Color) -> usize {
    match c {
        Color::White => 7,
        Color::Black => 0,
    }
}
