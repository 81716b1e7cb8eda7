//! Check detection.
//!
//! Attack detection reuses [`movegen::possible_moves`] wholesale: a king is
//! in check exactly when some opponent move would capture its square. Using
//! one generator for both purposes keeps "what attacks the king" and "what
//! is a playable move" consistent by construction. There is no recursion
//! hazard: the king's own generation never consults the detector.

use crate::board::Board;
use crate::movegen;
use crate::moves::Move;
use crate::types::{Color, PieceKind};

/// Returns `true` if `player`'s king is attacked on `board`.
pub fn is_check(board: &Board, player: Color) -> bool {
    for &(pos, _) in board.player_pieces(player.inv()) {
        for mv in &movegen::possible_moves(board, pos) {
            let removed = match mv.removed() {
                Some(removed) => removed,
                None => continue,
            };
            let target = match board.get(removed) {
                Some(target) => target,
                None => continue,
            };
            if target.kind() == PieceKind::King && target.color() == player {
                return true;
            }
        }
    }
    false
}

/// Every move currently generated for the opponent of `player`.
///
/// The detector only needs the capture squares, but the full list is useful
/// to a legality layer above and cheap to expose.
pub fn opponent_moves(board: &Board, player: Color) -> Vec<Move> {
    let mut res = Vec::new();
    for &(pos, _) in board.player_pieces(player.inv()) {
        res.extend(movegen::possible_moves(board, pos));
    }
    res
}
