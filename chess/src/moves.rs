//! The move value consumed by [`Board::update`](crate::Board::update).

use crate::types::Position;

use std::fmt;

use arrayvec::ArrayVec;

/// A single move carries at most two relocations (castling moves both the
/// king and a rook).
pub const MAX_RELOCATIONS: usize = 2;

/// A board delta.
///
/// A move names at most one square vacated by capture (`removed`) and an
/// ordered list of `(source, destination)` relocations (`moved`). The
/// removed square is cleared *before* the relocations are applied, so a
/// capture landing on the vacated square is never destroyed. The removed
/// square usually coincides with a destination, but the model keeps them
/// independent so that en passant stays representable.
///
/// A move carries no legality information of its own;
/// [`Board::update`](crate::Board::update) trusts it blindly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    removed: Option<Position>,
    moved: ArrayVec<(Position, Position), MAX_RELOCATIONS>,
}

impl Move {
    /// A quiet move of one piece.
    pub fn new(src: Position, dst: Position) -> Move {
        let mut moved = ArrayVec::new();
        moved.push((src, dst));
        Move {
            removed: None,
            moved,
        }
    }

    /// A capture: the destination square is vacated first.
    pub fn capture(src: Position, dst: Position) -> Move {
        Move {
            removed: Some(dst),
            ..Move::new(src, dst)
        }
    }

    /// The square vacated before the relocations run, if any.
    pub fn removed(&self) -> Option<Position> {
        self.removed
    }

    /// The `(source, destination)` pairs, in application order.
    pub fn relocations(&self) -> &[(Position, Position)] {
        &self.moved
    }

    pub fn is_capture(&self) -> bool {
        self.removed.is_some()
    }

    /// Source square of the first relocation.
    pub fn src(&self) -> Position {
        self.moved[0].0
    }

    /// Destination square of the first relocation.
    pub fn dst(&self) -> Position {
        self.moved[0].1
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, (src, dst)) in self.moved.iter().enumerate() {
            if i != 0 {
                write!(f, ",")?;
            }
            write!(f, "{}{}", src, dst)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn pos(s: &str) -> Position {
        Position::from_str(s).unwrap()
    }

    #[test]
    fn test_quiet_move() {
        let mv = Move::new(pos("e2"), pos("e4"));
        assert_eq!(mv.removed(), None);
        assert!(!mv.is_capture());
        assert_eq!(mv.relocations(), &[(pos("e2"), pos("e4"))]);
        assert_eq!(mv.src(), pos("e2"));
        assert_eq!(mv.dst(), pos("e4"));
        assert_eq!(mv.to_string(), "e2e4");
    }

    #[test]
    fn test_capture() {
        let mv = Move::capture(pos("d4"), pos("e5"));
        assert_eq!(mv.removed(), Some(pos("e5")));
        assert!(mv.is_capture());
        assert_eq!(mv.dst(), pos("e5"));
    }
}
