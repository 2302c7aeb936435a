//! Move representation.

use crate::{PieceKind, Square};
use std::fmt;

/// A move request: source, destination and an optional promotion choice.
///
/// A `Move` is not validated on construction. Moves obtained from the legal
/// move generator always carry an explicit promotion when one applies; moves
/// built by callers may leave it out, in which case
/// [`promotion_or_default`](Move::promotion_or_default) decides.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// The piece a pawn becomes when no promotion choice is given.
    pub const DEFAULT_PROMOTION: PieceKind = PieceKind::Queen;

    /// Creates a move without a promotion choice.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a promoting move.
    #[inline]
    pub const fn with_promotion(from: Square, to: Square, piece: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(piece),
        }
    }

    /// Returns the promotion choice, falling back to the default queen.
    ///
    /// Only meaningful when the move is a pawn reaching its far rank.
    #[inline]
    pub const fn promotion_or_default(self) -> PieceKind {
        match self.promotion {
            Some(piece) => piece,
            None => Self::DEFAULT_PROMOTION,
        }
    }

    /// Returns true if both moves name the same squares and resolve to the
    /// same promotion piece.
    pub fn matches(self, other: Move) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.promotion_or_default() == other.promotion_or_default()
    }

    /// Returns the long algebraic notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(piece) => format!("{}{}{}", self.from, self.to, piece.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from long algebraic notation.
    ///
    /// Note: only syntax is checked. Whether the move is legal is up to the
    /// position it is played in.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => {
                let piece = PieceKind::from_char(c)?;
                if !piece.is_promotion_choice() {
                    return None;
                }
                Some(piece)
            }
            None => None,
        };
        Some(Move {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
