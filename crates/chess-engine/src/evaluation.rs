//! Static material evaluation.

use crate::Position;
use chess_core::{Color, PieceKind};

/// Piece values in centipawns
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

/// Returns the material value of a piece kind in centipawns.
///
/// Kings are worth nothing: both sides always have one in play.
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => 0,
    }
}

impl Position {
    /// Returns the material balance: white's pieces count positive, black's
    /// negative. Square placement is ignored.
    pub fn evaluate(&self) -> i32 {
        self.board
            .pieces()
            .map(|(_, piece)| {
                let value = piece_value(piece.kind);
                match piece.color {
                    Color::White => value,
                    Color::Black => -value,
                }
            })
            .sum()
    }
}
