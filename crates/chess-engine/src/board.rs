//! 8×8 mailbox board.

use chess_core::{Color, Piece, PieceKind, Square};

/// The piece grid: one optional piece per square.
///
/// `Board` is `Copy`, so copying a position or taking a snapshot always
/// yields an independent grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting arrangement.
    pub fn starting() -> Self {
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

        let mut board = Board::empty();
        for color in Color::BOTH {
            for (file, &kind) in BACK_RANK.iter().enumerate() {
                let back = Square::new_unchecked(color.back_rank(), file as u8);
                let pawn = Square::new_unchecked(color.pawn_rank(), file as u8);
                board.set(back, Some(Piece::new(kind, color)));
                board.set(pawn, Some(Piece::new(PieceKind::Pawn, color)));
            }
        }
        board
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize]
    }

    /// Places a piece on (or clears) the given square.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.rank() as usize][sq.file() as usize] = piece;
    }

    /// Removes and returns the piece on the given square.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize].take()
    }

    /// Returns true if the square has no piece.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Iterates occupied squares in scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Iterates the squares holding pieces of the given color, in scan order.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |(_, piece)| piece.color == color)
            .map(|(sq, _)| sq)
    }

    /// Returns the first square (in scan order) holding the given piece.
    pub fn find(&self, piece: Piece) -> Option<Square> {
        self.pieces().find(|&(_, p)| p == piece).map(|(sq, _)| sq)
    }

    /// Returns the number of pieces on the board.
    pub fn count(&self) -> usize {
        self.pieces().count()
    }
}

impl std::fmt::Display for Board {
    /// Renders the board as eight text rows, rank 8 first, `.` for empty.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.squares {
            let line: String = row
                .iter()
                .map(|cell| cell.map_or('.', |piece| piece.to_fen_char()))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
