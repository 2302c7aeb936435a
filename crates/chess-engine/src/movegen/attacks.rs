//! Movement offsets and attack detection for all piece types.

use crate::Position;
use chess_core::{Color, Piece, PieceKind, Square};

/// Knight move offsets: (rank_delta, file_delta).
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King move offsets.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returns the ray directions a piece kind slides along (empty for non-sliders).
pub(crate) const fn slider_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
        (-1, 0),
        (1, 0),
        (0, -1),
        (0, 1),
        (-1, -1),
        (-1, 1),
        (1, -1),
        (1, 1),
    ];
    match kind {
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Queen => &QUEEN_DIRECTIONS,
        _ => &[],
    }
}

/// Returns the first occupied square along a ray, if any.
fn first_blocker(position: &Position, from: Square, (dr, df): (i8, i8)) -> Option<Square> {
    let mut current = from.offset(dr, df);
    while let Some(sq) = current {
        if !position.board.is_empty(sq) {
            return Some(sq);
        }
        current = sq.offset(dr, df);
    }
    None
}

/// Returns true if `sq` holds a piece of exactly this kind and color.
#[inline]
fn holds(position: &Position, sq: Option<Square>, kind: PieceKind, color: Color) -> bool {
    sq.and_then(|s| position.piece_at(s)) == Some(Piece::new(kind, color))
}

/// Returns true if the given square is attacked by the given color.
///
/// Attacks are movement patterns only: pawns attack diagonally whether or not
/// the target is occupied, and castling never counts. Works outward from the
/// target square, so it never generates moves and cannot recurse.
pub fn is_square_attacked(position: &Position, sq: Square, by_color: Color) -> bool {
    // Pawn attacks: an attacking pawn stands one step behind the target
    // along its own push direction.
    let behind = -by_color.pawn_direction();
    if holds(position, sq.offset(behind, -1), PieceKind::Pawn, by_color)
        || holds(position, sq.offset(behind, 1), PieceKind::Pawn, by_color)
    {
        return true;
    }

    // Knight attacks
    if KNIGHT_OFFSETS
        .iter()
        .any(|&(dr, df)| holds(position, sq.offset(dr, df), PieceKind::Knight, by_color))
    {
        return true;
    }

    // King attacks
    if KING_OFFSETS
        .iter()
        .any(|&(dr, df)| holds(position, sq.offset(dr, df), PieceKind::King, by_color))
    {
        return true;
    }

    // Bishop/Queen attacks (diagonal)
    let diagonal = BISHOP_DIRECTIONS.iter().any(|&dir| {
        first_blocker(position, sq, dir)
            .and_then(|s| position.piece_at(s))
            .is_some_and(|p| {
                p.color == by_color && matches!(p.kind, PieceKind::Bishop | PieceKind::Queen)
            })
    });
    if diagonal {
        return true;
    }

    // Rook/Queen attacks (orthogonal)
    ROOK_DIRECTIONS.iter().any(|&dir| {
        first_blocker(position, sq, dir)
            .and_then(|s| position.piece_at(s))
            .is_some_and(|p| {
                p.color == by_color && matches!(p.kind, PieceKind::Rook | PieceKind::Queen)
            })
    })
}

/// Returns true if the king of the given color is in check.
///
/// A position without a king of that color is never in check.
pub fn is_king_attacked(position: &Position, king_color: Color) -> bool {
    match position.king_square(king_color) {
        Some(king_sq) => is_square_attacked(position, king_sq, king_color.opposite()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn pawn_attacks_diagonally_only() {
        let position = Position::startpos();

        // e3 is attacked by the d2 and f2 pawns
        assert!(is_square_attacked(&position, sq("e3"), Color::White));
        // e4 is not attacked at start
        assert!(!is_square_attacked(&position, sq("e4"), Color::White));
        // black pawns attack rank 6
        assert!(is_square_attacked(&position, sq("a6"), Color::Black));
    }

    #[test]
    fn pawn_attacks_empty_squares() {
        let position = Position::from_fen("8/8/8/8/8/4p3/8/K6k w - - 0 1").unwrap();
        assert!(is_square_attacked(&position, sq("d2"), Color::Black));
        assert!(is_square_attacked(&position, sq("f2"), Color::Black));
        // pushes are not attacks
        assert!(!is_square_attacked(&position, sq("e2"), Color::Black));
    }

    #[test]
    fn sliders_are_blocked() {
        let position = Position::from_fen("4k3/8/8/8/4r3/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(is_square_attacked(&position, sq("e2"), Color::Black));
        assert!(!is_square_attacked(&position, sq("e1"), Color::Black));
        assert!(is_square_attacked(&position, sq("a4"), Color::Black));
    }

    #[test]
    fn knight_and_king_attacks() {
        let position = Position::from_fen("4k3/8/8/8/8/5n2/8/4K3 w - - 0 1").unwrap();
        assert!(is_square_attacked(&position, sq("e1"), Color::Black));
        assert!(is_square_attacked(&position, sq("g1"), Color::Black));
        assert!(is_square_attacked(&position, sq("d7"), Color::Black));
        assert!(!is_square_attacked(&position, sq("f1"), Color::Black));
    }

    #[test]
    fn is_king_attacked_startpos() {
        let position = Position::startpos();
        assert!(!is_king_attacked(&position, Color::White));
        assert!(!is_king_attacked(&position, Color::Black));
    }

    #[test]
    fn missing_king_is_never_attacked() {
        let position = Position::from_fen("8/8/8/8/8/8/8/q6K w - - 0 1").unwrap();
        assert!(!is_king_attacked(&position, Color::Black));
        assert!(is_king_attacked(&position, Color::White));
    }
}
