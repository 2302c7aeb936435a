//! Chess position representation.

use chess_core::{Color, FenError, FenParser, Move, Piece, PieceKind, Square};

use crate::Board;

/// Castling rights flags.
///
/// Rights are only ever removed during play; nothing in the engine sets a
/// flag again except loading a new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Parses the FEN castling field ("KQkq", "Kq", "-", ...).
    ///
    /// The field is expected to have been validated by [`FenParser`].
    pub fn from_fen(field: &str) -> Self {
        let mut flags = 0u8;
        for c in field.chars() {
            match c {
                'K' => flags |= Self::WHITE_KINGSIDE,
                'Q' => flags |= Self::WHITE_QUEENSIDE,
                'k' => flags |= Self::BLACK_KINGSIDE,
                'q' => flags |= Self::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        CastlingRights::new(flags)
    }

    /// Returns the FEN castling field.
    pub fn to_fen(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .iter()
        .filter(|(flag, _)| self.0 & flag != 0)
        .map(|&(_, c)| c)
        .collect()
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove_kingside(color);
        self.remove_queenside(color);
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Removes the right tied to a rook's home corner, if `sq` is one.
    ///
    /// Called for both the source and destination of every move, so a rook
    /// leaving its corner and a rook captured in its corner both lose the right.
    pub fn remove_for_corner(&mut self, sq: Square) {
        match sq {
            s if s == Square::H1 => self.remove_kingside(Color::White),
            s if s == Square::A1 => self.remove_queenside(Color::White),
            s if s == Square::H8 => self.remove_kingside(Color::Black),
            s if s == Square::A8 => self.remove_queenside(Color::Black),
            _ => {}
        }
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// The state a position had before a move, plus the move itself.
///
/// Snapshots own their board copy; restoring one never aliases live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    /// The move that was applied to the state above.
    pub mv: Move,
}

/// Complete chess position state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// The piece grid.
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square (if any).
    pub en_passant: Option<Square>,

    /// Halfmove clock for 50-move rule.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,

    history: Vec<Snapshot>,
}

impl Position {
    /// Creates an empty position.
    pub fn empty() -> Self {
        Position {
            board: Board::empty(),
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Position {
            board: Board::starting(),
            castling: CastlingRights::ALL,
            ..Position::empty()
        }
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;

        let mut board = Board::empty();
        for &(sq, piece) in &parsed.pieces {
            board.set(sq, Some(piece));
        }

        Ok(Position {
            board,
            side_to_move: parsed.side_to_move,
            castling: CastlingRights::from_fen(&parsed.castling),
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
            history: Vec::new(),
        })
    }

    /// Resets to the standard starting position, discarding history.
    pub fn reset(&mut self) {
        *self = Position::startpos();
    }

    /// Replaces the current state with the given FEN.
    ///
    /// History is cleared unless `keep_history` is set. On error the position
    /// is left untouched.
    pub fn load_fen(&mut self, fen: &str, keep_history: bool) -> Result<(), FenError> {
        let mut loaded = Position::from_fen(fen)?;
        if keep_history {
            loaded.history = std::mem::take(&mut self.history);
        }
        *self = loaded;
        Ok(())
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        FenParser {
            pieces: self.board.pieces().collect(),
            side_to_move: self.side_to_move,
            castling: self.castling.to_fen(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }

    /// Returns the square of the given color's king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.board.find(Piece::new(PieceKind::King, color))
    }

    /// Returns the snapshots recorded by [`make_move`](Self::make_move), oldest first.
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Returns the most recently applied move that can still be undone.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|snapshot| snapshot.mv)
    }

    /// Returns an independent copy of the current state with no history.
    pub fn detached(&self) -> Position {
        Position {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            history: Vec::new(),
        }
    }

    /// Applies a move on a detached copy, returning the copy on success.
    ///
    /// The copy has no history, so it cannot be undone. The receiver is
    /// never modified.
    pub fn try_move(&self, mv: Move) -> Option<Position> {
        let piece = self.board.get(mv.from)?;
        let mut next = self.detached();
        next.apply(mv, piece);
        Some(next)
    }

    /// Applies a move in place.
    ///
    /// Returns false without changing anything when `mv.from` is empty.
    /// Legality is not re-checked; moves are expected to come from
    /// [`legal_moves`](Self::legal_moves).
    pub fn make_move(&mut self, mv: Move) -> bool {
        let Some(piece) = self.board.get(mv.from) else {
            return false;
        };

        self.history.push(Snapshot {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            mv,
        });
        self.apply(mv, piece);
        true
    }

    /// Updates board, rights, target square and clocks for `piece` playing
    /// `mv`, without recording history.
    fn apply(&mut self, mv: Move, piece: Piece) {
        let us = piece.color;
        let is_pawn = piece.kind == PieceKind::Pawn;
        let mut is_capture = self.board.get(mv.to).is_some();

        // Handle en passant capture
        if is_pawn
            && !is_capture
            && Some(mv.to) == self.en_passant
            && mv.from.file() != mv.to.file()
        {
            let captured_sq = Square::new_unchecked(mv.from.rank(), mv.to.file());
            self.board.take(captured_sq);
            is_capture = true;
        }

        // Move the piece, promoting on the far rank
        self.board.take(mv.from);
        let placed = if is_pawn && mv.to.rank() == us.promotion_rank() {
            Piece::new(mv.promotion_or_default(), us)
        } else {
            piece
        };
        self.board.set(mv.to, Some(placed));

        // Handle castling - move the rook
        let file_delta = mv.to.file() as i8 - mv.from.file() as i8;
        if piece.kind == PieceKind::King && file_delta.abs() == 2 {
            let rank = mv.from.rank();
            let (rook_from, rook_to) = if file_delta > 0 {
                (Square::new_unchecked(rank, 7), Square::new_unchecked(rank, 5))
            } else {
                (Square::new_unchecked(rank, 0), Square::new_unchecked(rank, 3))
            };
            let rook = self.board.take(rook_from);
            self.board.set(rook_to, rook);
        }

        // Update castling rights
        if piece.kind == PieceKind::King {
            self.castling.remove_color(us);
        }
        self.castling.remove_for_corner(mv.from);
        self.castling.remove_for_corner(mv.to);

        // Update en passant square
        let rank_delta = mv.to.rank() as i8 - mv.from.rank() as i8;
        self.en_passant = if is_pawn && rank_delta.abs() == 2 {
            mv.from.offset(rank_delta / 2, 0)
        } else {
            None
        };

        // Update clocks
        if is_pawn || is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = us.opposite();
    }

    /// Reverts the most recent move.
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo_move(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.board = snapshot.board;
        self.side_to_move = snapshot.side_to_move;
        self.castling = snapshot.castling;
        self.en_passant = snapshot.en_passant;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.fullmove_number = snapshot.fullmove_number;
        true
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
