//! Move generation.
//!
//! Moves are generated per square from the piece's movement pattern
//! (pseudo-legal), then filtered by trying each one on a detached copy of the
//! position and rejecting those that leave the mover's king attacked.
//!
//! Enumeration order is canonical: squares in scan order (rank 0 first, then
//! by file), and for each piece the order of its offset or direction table.

mod attacks;
pub mod perft;

use crate::Position;
use chess_core::{Color, Move, Piece, PieceKind, Square};

pub use attacks::{is_king_attacked, is_square_attacked};
use attacks::{slider_directions, KING_OFFSETS, KNIGHT_OFFSETS};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::new(Square::A8, Square::A8); Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Appends every move of another list.
    pub fn extend_from(&mut self, other: &MoveList) {
        for &m in other {
            self.push(m);
        }
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Iterates the moves in generation order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list holds exactly this move.
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the side to move.
pub fn generate_moves(position: &Position) -> MoveList {
    position.all_legal_moves(position.side_to_move)
}

impl Position {
    /// Generates moves for the piece on `sq` by its movement rules alone.
    ///
    /// Moves that would leave the mover's own king in check are included.
    /// The piece's own color decides direction, so this works for either
    /// side regardless of whose turn it is. An empty square yields no moves.
    pub fn pseudo_legal_moves(&self, sq: Square) -> MoveList {
        let mut moves = MoveList::new();
        let Some(piece) = self.piece_at(sq) else {
            return moves;
        };

        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(sq, piece.color, &mut moves),
            PieceKind::Knight => self.step_moves(sq, piece.color, &KNIGHT_OFFSETS, &mut moves),
            PieceKind::King => {
                self.step_moves(sq, piece.color, &KING_OFFSETS, &mut moves);
                self.castling_moves(sq, piece.color, &mut moves);
            }
            kind => self.slider_moves(sq, piece.color, slider_directions(kind), &mut moves),
        }

        moves
    }

    /// Generates the legal moves for the piece on `sq`.
    ///
    /// Each pseudo-legal move is applied to a detached copy and kept only if
    /// the mover's king is not attacked afterwards. The receiver is never
    /// modified.
    pub fn legal_moves(&self, sq: Square) -> MoveList {
        let mut moves = self.pseudo_legal_moves(sq);
        moves.retain(|&m| self.is_move_safe(m));
        moves
    }

    /// Generates every legal move for `color`, in canonical order.
    pub fn all_legal_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        for sq in self.board.squares_of(color) {
            moves.extend_from(&self.legal_moves(sq));
        }
        moves
    }

    /// Returns true if `color` has at least one legal move.
    ///
    /// Stops at the first one found.
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.board.squares_of(color).any(|sq| {
            self.pseudo_legal_moves(sq)
                .iter()
                .any(|&m| self.is_move_safe(m))
        })
    }

    /// Returns true if the given square is attacked by `by_color`.
    pub fn is_square_attacked(&self, sq: Square, by_color: Color) -> bool {
        is_square_attacked(self, sq, by_color)
    }

    /// Returns true if playing `m` leaves the mover's own king unattacked.
    fn is_move_safe(&self, m: Move) -> bool {
        let Some(mover) = self.piece_at(m.from) else {
            return false;
        };
        self.try_move(m)
            .is_some_and(|next| !is_king_attacked(&next, mover.color))
    }

    fn pawn_moves(&self, from: Square, us: Color, moves: &mut MoveList) {
        let dir = us.pawn_direction();

        // Pushes
        if let Some(one) = from.offset(dir, 0).filter(|&s| self.board.is_empty(s)) {
            push_pawn_move(from, one, us, moves);

            if from.rank() == us.pawn_rank() {
                if let Some(two) = one.offset(dir, 0).filter(|&s| self.board.is_empty(s)) {
                    moves.push(Move::new(from, two));
                }
            }
        }

        // Captures (left and right), including en passant
        for df in [-1, 1] {
            let Some(to) = from.offset(dir, df) else {
                continue;
            };
            let captures_enemy = self
                .piece_at(to)
                .is_some_and(|target| target.color != us);
            let en_passant = self.en_passant == Some(to)
                && to.rank() == us.en_passant_rank()
                && self.board.is_empty(to);
            if captures_enemy || en_passant {
                push_pawn_move(from, to, us, moves);
            }
        }
    }

    fn step_moves(&self, from: Square, us: Color, offsets: &[(i8, i8)], moves: &mut MoveList) {
        for &(dr, df) in offsets {
            if let Some(to) = from.offset(dr, df) {
                if self.piece_at(to).map_or(true, |p| p.color != us) {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }

    fn slider_moves(
        &self,
        from: Square,
        us: Color,
        directions: &[(i8, i8)],
        moves: &mut MoveList,
    ) {
        for &(dr, df) in directions {
            let mut current = from.offset(dr, df);
            while let Some(to) = current {
                match self.piece_at(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(p) => {
                        if p.color != us {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }
                current = to.offset(dr, df);
            }
        }
    }

    /// Generates castling moves if legal.
    fn castling_moves(&self, from: Square, us: Color, moves: &mut MoveList) {
        let rank = us.back_rank();
        if from != Square::new_unchecked(rank, 4) {
            return;
        }

        let them = us.opposite();

        // Can't castle if in check
        if self.is_square_attacked(from, them) {
            return;
        }

        let rook = Some(Piece::new(PieceKind::Rook, us));
        let at = |file: u8| Square::new_unchecked(rank, file);

        // Kingside castling
        if self.castling.can_castle_kingside(us)
            && self.piece_at(at(7)) == rook
            && [5, 6].iter().all(|&f| self.board.is_empty(at(f)))
            && [5, 6].iter().all(|&f| !self.is_square_attacked(at(f), them))
        {
            moves.push(Move::new(from, at(6)));
        }

        // Queenside castling
        if self.castling.can_castle_queenside(us)
            && self.piece_at(at(0)) == rook
            && [1, 2, 3].iter().all(|&f| self.board.is_empty(at(f)))
            && [3, 2].iter().all(|&f| !self.is_square_attacked(at(f), them))
        {
            moves.push(Move::new(from, at(2)));
        }
    }
}

/// Pushes a pawn move, expanding it into one move per promotion choice when
/// it reaches the far rank.
fn push_pawn_move(from: Square, to: Square, us: Color, moves: &mut MoveList) {
    if to.rank() == us.promotion_rank() {
        for piece in PieceKind::PROMOTIONS {
            moves.push(Move::with_promotion(from, to, piece));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn mv(uci: &str) -> Move {
        Move::from_uci(uci).unwrap()
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = mv("e2e4");
        let m2 = mv("d2d4");

        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert!(list.contains(&m2));
        assert_eq!(list.iter().count(), 2);
    }

    #[test]
    fn movelist_clear() {
        let mut list = MoveList::default();
        list.push(mv("e2e4"));
        assert_eq!(list.len(), 1);

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn movelist_retain() {
        let mut list = MoveList::new();
        list.push(mv("e2e3"));
        list.push(mv("e2e4"));
        list.push(mv("e3e4"));

        // Keep only moves from e2
        list.retain(|m| m.from == sq("e2"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn generate_moves_startpos() {
        let position = Position::startpos();
        let moves = generate_moves(&position);
        assert_eq!(moves.len(), 20); // 16 pawn moves + 4 knight moves
        assert_eq!(position.all_legal_moves(Color::Black).len(), 20);
    }

    #[test]
    fn canonical_order_starts_at_rank_zero() {
        let position = Position::startpos();
        let black = position.all_legal_moves(Color::Black);
        assert_eq!(black[0], mv("b8a6"));
        let white = position.all_legal_moves(Color::White);
        assert_eq!(white[0], mv("a2a3"));
        assert_eq!(white[1], mv("a2a4"));
    }

    #[test]
    fn empty_square_has_no_moves() {
        let position = Position::startpos();
        assert!(position.pseudo_legal_moves(sq("e4")).is_empty());
        assert!(position.legal_moves(sq("e4")).is_empty());
    }

    #[test]
    fn pawn_pushes_blocked() {
        let position = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(position.pseudo_legal_moves(sq("e2")).is_empty());

        let position = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        let moves = position.pseudo_legal_moves(sq("e2"));
        assert_eq!(moves.as_slice(), &[mv("e2e3")]);
    }

    #[test]
    fn knight_moves_avoid_friends() {
        let position = Position::startpos();
        let moves = position.pseudo_legal_moves(Square::G1);
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&mv("g1f3")));
        assert!(moves.contains(&mv("g1h3")));
    }

    #[test]
    fn slider_stops_at_first_piece() {
        let position = Position::from_fen("4k3/8/8/8/p2R2P1/8/8/4K3 w - - 0 1").unwrap();
        let moves = position.pseudo_legal_moves(sq("d4"));
        assert!(moves.contains(&mv("d4a4")));
        assert!(!moves.contains(&mv("d4g4")));
        assert!(moves.contains(&mv("d4f4")));
        assert!(moves.contains(&mv("d4d8")));
        assert!(moves.contains(&mv("d4d1")));
        assert_eq!(moves.len(), 12);
    }

    #[test]
    fn legal_moves_respect_pins() {
        // The e2 bishop is pinned against the king by the e8 rook.
        let position = Position::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert!(!position.pseudo_legal_moves(sq("e2")).is_empty());
        assert!(position.legal_moves(sq("e2")).is_empty());
    }

    #[test]
    fn legal_moves_do_not_mutate() {
        let position = Position::startpos();
        let before = position.clone();
        let _ = position.all_legal_moves(Color::White);
        assert_eq!(position, before);
    }

    #[test]
    fn castling_kingside_and_queenside() {
        let position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let moves = position.legal_moves(Square::E1);
        assert!(moves.contains(&mv("e1g1")));
        assert!(moves.contains(&mv("e1c1")));
        let black = position.legal_moves(Square::E8);
        assert!(black.contains(&mv("e8g8")));
        assert!(black.contains(&mv("e8c8")));
    }

    #[test]
    fn no_castling_without_rights_or_rook() {
        let position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w kq - 0 1").unwrap();
        assert!(!position.legal_moves(Square::E1).contains(&mv("e1g1")));

        let position =
            Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K3 w KQkq - 0 1").unwrap();
        assert!(!position.legal_moves(Square::E1).contains(&mv("e1g1")));
    }

    #[test]
    fn no_castling_through_check() {
        // The e5 rook is gone from the e-file but the f-file is covered.
        let position =
            Position::from_fen("r3k2r/ppppp1pp/8/5r2/8/8/PPPPP1PP/R3K2R w KQkq - 0 1").unwrap();
        let moves = position.legal_moves(Square::E1);
        assert!(!moves.contains(&mv("e1g1")));
        assert!(moves.contains(&mv("e1c1")));
    }

    #[test]
    fn no_castling_into_check_or_out_of_check() {
        let into = Position::from_fen("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(!into.legal_moves(Square::E1).contains(&mv("e1g1")));

        let out_of = Position::from_fen("4k3/8/8/8/8/8/8/r3K2R w K - 0 1").unwrap();
        assert!(!out_of.legal_moves(Square::E1).contains(&mv("e1g1")));
    }

    #[test]
    fn no_castling_through_pawn_attack() {
        // The g2 pawn attacks f1 diagonally.
        let position = Position::from_fen("4k3/8/8/8/8/8/6p1/4K2R w K - 0 1").unwrap();
        assert!(!position.legal_moves(Square::E1).contains(&mv("e1g1")));
    }

    #[test]
    fn queenside_b_file_may_be_attacked() {
        let position = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(position.legal_moves(Square::E1).contains(&mv("e1c1")));
    }

    #[test]
    fn en_passant() {
        let position =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 1")
                .unwrap();
        let moves = position.legal_moves(sq("f5"));
        assert!(moves.contains(&mv("f5e6")));
    }

    #[test]
    fn en_passant_target_is_color_specific() {
        // e3 is a target for black; the white d2 pawn must not capture onto it.
        let position =
            Position::from_fen("4k3/8/8/8/3pP3/8/3P4/4K3 b - e3 0 1").unwrap();
        assert!(position.legal_moves(sq("d4")).contains(&mv("d4e3")));
        assert!(!position.pseudo_legal_moves(sq("d2")).contains(&mv("d2e3")));
    }

    #[test]
    fn en_passant_discovered_check_is_illegal() {
        // Capturing would expose the king on the fifth rank.
        let position = Position::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1").unwrap();
        assert!(!position.legal_moves(sq("e5")).contains(&mv("e5d6")));
    }

    #[test]
    fn promotion_yields_every_choice() {
        let position = Position::from_fen("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        let moves = position.legal_moves(sq("a7"));
        let promotions: Vec<Option<PieceKind>> = moves.iter().map(|m| m.promotion).collect();
        assert_eq!(
            promotions,
            vec![
                Some(PieceKind::Queen),
                Some(PieceKind::Rook),
                Some(PieceKind::Bishop),
                Some(PieceKind::Knight),
            ]
        );
    }

    #[test]
    fn has_legal_move_matches_generation() {
        let start = Position::startpos();
        assert!(start.has_legal_move(Color::White));
        let mate = Position::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!mate.has_legal_move(Color::Black));
        assert!(mate.all_legal_moves(Color::Black).is_empty());
    }
}
